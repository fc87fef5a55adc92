//! Frame pacing: keeps the animation cursor tracking elapsed playback
//! time, one tick per display refresh.

use std::time::Instant;

/// Pacer state: nothing scheduled, or running against a baseline.
#[derive(Debug)]
enum PacerState {
    Idle,
    Running { started: Instant, cursor: u64 },
}

/// Idle/running frame scheduler.
///
/// Each tick computes the frame that should be showing,
/// `floor(elapsed_seconds * fps)`, and moves the cursor to match:
/// jump straight there when behind (catch up by skipping, so a slow
/// display never builds a backlog), advance exactly one frame when
/// clock jitter reads behind the cursor (never rewind), hold on an
/// exact match.
///
/// The cursor is monotonic and unwrapped; the modulo by sequence
/// length is applied only when producing a sequence index, so skip
/// and step share one wraparound rule.
#[derive(Debug)]
pub struct FramePacer {
    /// Target animation rate (frames per second of playback)
    fps: u32,
    state: PacerState,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            fps,
            state: PacerState::Idle,
        }
    }

    /// True while ticks advance the animation
    pub fn is_running(&self) -> bool {
        matches!(self.state, PacerState::Running { .. })
    }

    /// Displayed sequence index for the current cursor
    pub fn current_index(&self, frame_count: usize) -> usize {
        match &self.state {
            PacerState::Running { cursor, .. } if frame_count > 0 => {
                (cursor % frame_count as u64) as usize
            }
            _ => 0,
        }
    }

    /// Begin pacing with `now` as the playback baseline.
    ///
    /// Refuses an empty frame sequence: playback must not start before
    /// the store is populated. The first tick after a successful start
    /// lands on frame 0.
    pub fn start(&mut self, now: Instant, frame_count: usize) -> bool {
        if frame_count == 0 {
            return false;
        }
        self.state = PacerState::Running {
            started: now,
            cursor: 0,
        };
        true
    }

    /// Cancel pacing; subsequent ticks are no-ops.
    pub fn stop(&mut self) {
        self.state = PacerState::Idle;
    }

    /// Advance the cursor for a tick at `now`.
    ///
    /// Returns the sequence index to decode, or `None` when idle or
    /// when the sequence is empty.
    pub fn tick(&mut self, now: Instant, frame_count: usize) -> Option<usize> {
        let PacerState::Running { started, cursor } = &mut self.state else {
            return None;
        };
        if frame_count == 0 {
            return None;
        }

        let elapsed = now.saturating_duration_since(*started);
        let target = (elapsed.as_secs_f64() * self.fps as f64).floor() as u64;

        if target > *cursor {
            // Catch up by skipping, not single-stepping
            *cursor = target;
        } else if target < *cursor {
            // Clock jitter read behind the cursor: nudge forward one
            *cursor += 1;
        }

        Some((*cursor % frame_count as u64) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::{EncodedFrame, Grid};
    use std::time::Duration;

    #[test]
    fn test_first_tick_shows_frame_zero() {
        let mut pacer = FramePacer::new(30);
        let t0 = Instant::now();
        assert!(pacer.start(t0, 100));
        assert_eq!(pacer.tick(t0, 100), Some(0));
    }

    #[test]
    fn test_skip_jumps_to_target() {
        // Cursor at 2, clock says 5: jump to 5, not 3
        let mut pacer = FramePacer::new(1);
        let t0 = Instant::now();
        pacer.start(t0, 100);

        assert_eq!(pacer.tick(t0 + Duration::from_secs(2), 100), Some(2));
        assert_eq!(pacer.tick(t0 + Duration::from_secs(5), 100), Some(5));
    }

    #[test]
    fn test_jitter_steps_forward_one() {
        // Clock reads behind the cursor: advance by exactly one
        let mut pacer = FramePacer::new(1);
        let t0 = Instant::now();
        pacer.start(t0, 100);

        assert_eq!(pacer.tick(t0 + Duration::from_secs(5), 100), Some(5));
        assert_eq!(pacer.tick(t0 + Duration::from_secs(4), 100), Some(6));
    }

    #[test]
    fn test_exact_match_holds() {
        let mut pacer = FramePacer::new(1);
        let t0 = Instant::now();
        pacer.start(t0, 100);

        let t = t0 + Duration::from_millis(2500);
        assert_eq!(pacer.tick(t, 100), Some(2));
        assert_eq!(pacer.tick(t, 100), Some(2));
    }

    #[test]
    fn test_index_non_decreasing_until_wrap() {
        let mut pacer = FramePacer::new(30);
        let t0 = Instant::now();
        pacer.start(t0, 10_000);

        let mut last = 0;
        for ms in (0..2000).step_by(16) {
            let index = pacer.tick(t0 + Duration::from_millis(ms), 10_000).unwrap();
            assert!(index >= last);
            last = index;
        }
    }

    #[test]
    fn test_skip_wraps_modulo_sequence_length() {
        let mut pacer = FramePacer::new(1);
        let t0 = Instant::now();
        pacer.start(t0, 4);

        assert_eq!(pacer.tick(t0 + Duration::from_secs(9), 4), Some(1));
    }

    #[test]
    fn test_step_wraps_modulo_sequence_length() {
        let mut pacer = FramePacer::new(1);
        let t0 = Instant::now();
        pacer.start(t0, 4);

        assert_eq!(pacer.tick(t0 + Duration::from_secs(3), 4), Some(3));
        // Jitter at cursor 3 steps to 4, which wraps to index 0
        assert_eq!(pacer.tick(t0 + Duration::from_secs(2), 4), Some(0));
    }

    #[test]
    fn test_empty_sequence_never_starts() {
        let mut pacer = FramePacer::new(30);
        let t0 = Instant::now();

        assert!(!pacer.start(t0, 0));
        assert!(!pacer.is_running());
        assert_eq!(pacer.tick(t0 + Duration::from_secs(1), 0), None);
        assert_eq!(pacer.current_index(0), 0);
    }

    #[test]
    fn test_stop_cancels_ticks() {
        let mut pacer = FramePacer::new(30);
        let t0 = Instant::now();
        pacer.start(t0, 10);
        pacer.stop();

        assert!(!pacer.is_running());
        assert_eq!(pacer.tick(t0 + Duration::from_secs(1), 10), None);
    }

    #[test]
    fn test_paced_decode_sequence() {
        // End to end: tick, decode the returned index, repaint
        let frames = [
            EncodedFrame(vec![0, 3, 1, 1]),
            EncodedFrame(vec![1, 4]),
        ];
        let mut grid = Grid::new(2, 2);
        let mut pacer = FramePacer::new(1);
        let t0 = Instant::now();
        pacer.start(t0, frames.len());

        let index = pacer.tick(t0, frames.len()).unwrap();
        grid.apply_frame(&frames[index]);
        assert_eq!(grid.cells(), &[0, 0, 0, 1]);

        let index = pacer.tick(t0 + Duration::from_millis(1500), frames.len()).unwrap();
        assert_eq!(index, 1);
        grid.apply_frame(&frames[index]);
        assert_eq!(grid.cells(), &[1, 1, 1, 1]);
    }
}
