//! Audio output stream and playback transport.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use super::track::AudioTrack;

/// State shared with the audio callback thread
struct Transport {
    /// Gate: the callback emits silence until playback starts
    playing: AtomicBool,

    /// Next stereo frame to emit
    cursor: AtomicUsize,
}

/// Audio system: one output stream playing a decoded track.
///
/// The stream is built up front and gated, so `play` flips a flag and
/// the track and the animation share one start instant. Past the end
/// of the track the callback emits silence; the animation keeps
/// looping on its own.
pub struct AudioSystem {
    transport: Arc<Transport>,
    stream: cpal::Stream,
}

impl AudioSystem {
    /// Build the output stream for a decoded track
    pub fn new(track: AudioTrack) -> Result<Self, String> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("No audio output device found")?;

        println!(
            "Audio: {} @ {}Hz",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            track.sample_rate()
        );

        let config = cpal::StreamConfig {
            channels: 2,
            sample_rate: cpal::SampleRate(track.sample_rate()),
            buffer_size: cpal::BufferSize::Default,
        };

        let transport = Arc::new(Transport {
            playing: AtomicBool::new(false),
            cursor: AtomicUsize::new(0),
        });
        let callback_transport = Arc::clone(&transport);

        // Build audio output stream; the callback owns the sample data
        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if !callback_transport.playing.load(Ordering::Relaxed) {
                        data.fill(0.0);
                        return;
                    }

                    let samples = track.samples();
                    let start = callback_transport.cursor.load(Ordering::Relaxed) * 2;
                    let available = samples.len().saturating_sub(start);
                    let copied = data.len().min(available);

                    data[..copied].copy_from_slice(&samples[start..start + copied]);
                    data[copied..].fill(0.0);

                    callback_transport
                        .cursor
                        .fetch_add(copied / 2, Ordering::Relaxed);
                },
                |err| log::error!("audio stream error: {}", err),
                None,
            )
            .map_err(|e| format!("Failed to build audio stream: {}", e))?;

        Ok(Self { transport, stream })
    }

    /// Start playback.
    ///
    /// On success the caller captures the pacing baseline; on failure
    /// the animation must not start.
    pub fn play(&self) -> Result<(), String> {
        self.stream
            .play()
            .map_err(|e| format!("Failed to start audio stream: {}", e))?;
        self.transport.playing.store(true, Ordering::Relaxed);
        Ok(())
    }

    /// Stop playback and rewind to the start of the track
    pub fn stop(&self) {
        self.transport.playing.store(false, Ordering::Relaxed);
        let _ = self.stream.pause();
        self.transport.cursor.store(0, Ordering::Relaxed);
    }
}
