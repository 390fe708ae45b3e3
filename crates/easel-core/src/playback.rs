// File: crates/easel-core/src/playback.rs
// Summary: Frame step counter for periodic playback: advance/wrap, pause, seek.
// Notes:
// - The tick source lives outside the library. Callers check `is_playing`
//   before each injected tick, so playback is testable without a wall clock.

#[derive(Clone, Copy, Debug)]
pub struct Player {
    frame_count: usize,
    step: usize,
    playing: bool,
}

impl Player {
    pub fn new(frame_count: usize) -> Self {
        Self { frame_count, step: 0, playing: false }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advance one frame, wrapping to zero after the last (loop, not stop).
    /// Returns the new step.
    pub fn advance(&mut self) -> usize {
        if self.frame_count > 0 {
            self.step = (self.step + 1) % self.frame_count;
        }
        self.step
    }

    /// Pausing and resuming gate the external tick source only; the step
    /// counter is untouched.
    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    /// Back to frame zero. The caller forces an immediate reconciliation
    /// against frame zero afterwards.
    pub fn reset(&mut self) -> usize {
        self.step = 0;
        0
    }

    /// Jump to a frame (the slider contract), clamped to the frame range.
    pub fn seek(&mut self, step: usize) {
        self.step = step.min(self.frame_count.saturating_sub(1));
    }
}
