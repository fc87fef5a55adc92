//! WAV track decoding into interleaved stereo samples.

use std::io::Read;
use std::path::Path;

/// Decoded audio track: interleaved stereo f32 at the source rate.
#[derive(Debug, Clone)]
pub struct AudioTrack {
    /// Interleaved stereo samples (left, right, left, ...)
    samples: Vec<f32>,

    /// Source sample rate (Hz)
    sample_rate: u32,
}

impl AudioTrack {
    /// Load a WAV file from disk
    pub fn load(path: &Path) -> Result<Self, String> {
        let reader = hound::WavReader::open(path)
            .map_err(|e| format!("cannot open {}: {}", path.display(), e))?;
        Self::decode(reader)
    }

    /// Decode an open WAV stream.
    ///
    /// Accepts mono or stereo, integer (16/24/32-bit) or 32-bit float
    /// samples; everything is normalized to interleaved stereo f32.
    pub fn decode<R: Read>(mut reader: hound::WavReader<R>) -> Result<Self, String> {
        let spec = reader.spec();
        if spec.channels == 0 || spec.channels > 2 {
            return Err(format!("unsupported channel count: {}", spec.channels));
        }

        let raw: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(|e| format!("bad sample data: {}", e))?,
            hound::SampleFormat::Int => {
                let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|sample| sample.map(|v| v as f32 / scale))
                    .collect::<Result<_, _>>()
                    .map_err(|e| format!("bad sample data: {}", e))?
            }
        };

        // Mono plays on both channels
        let samples = if spec.channels == 1 {
            let mut stereo = Vec::with_capacity(raw.len() * 2);
            for sample in raw {
                stereo.push(sample);
                stereo.push(sample);
            }
            stereo
        } else {
            raw
        };

        Ok(Self {
            samples,
            sample_rate: spec.sample_rate,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Interleaved stereo samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Track length in stereo frames
    pub fn frame_len(&self) -> usize {
        self.samples.len() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn wav_bytes(spec: hound::WavSpec, write: impl FnOnce(&mut hound::WavWriter<&mut Cursor<Vec<u8>>>)) -> Cursor<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            write(&mut writer);
            writer.finalize().unwrap();
        }
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn test_decode_i16_mono_duplicates_channels() {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let cursor = wav_bytes(spec, |writer| {
            writer.write_sample(0i16).unwrap();
            writer.write_sample(i16::MAX).unwrap();
            writer.write_sample(i16::MIN).unwrap();
        });

        let track = AudioTrack::decode(hound::WavReader::new(cursor).unwrap()).unwrap();

        assert_eq!(track.sample_rate(), 44_100);
        assert_eq!(track.frame_len(), 3);

        let samples = track.samples();
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[1], 0.0);
        assert!((samples[2] - i16::MAX as f32 / 32_768.0).abs() < 1e-6);
        assert_eq!(samples[2], samples[3]);
        assert_eq!(samples[4], -1.0);
        assert_eq!(samples[5], -1.0);
    }

    #[test]
    fn test_decode_f32_stereo_passthrough() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 48_000,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let cursor = wav_bytes(spec, |writer| {
            for sample in [0.25f32, -0.25, 0.5, -0.5] {
                writer.write_sample(sample).unwrap();
            }
        });

        let track = AudioTrack::decode(hound::WavReader::new(cursor).unwrap()).unwrap();

        assert_eq!(track.sample_rate(), 48_000);
        assert_eq!(track.frame_len(), 2);
        assert_eq!(track.samples(), &[0.25, -0.25, 0.5, -0.5]);
    }
}
