//! Frame timing for hosts driving a simulator.
//!
//! [`Time`] turns wall-clock frames (or a fixed step) into the `dt` passed to
//! [`ParticleSimulator::simulate`](crate::ParticleSimulator::simulate). It
//! applies a speed multiplier and reports a zero delta while paused.
//!
//! ```ignore
//! let mut time = Time::fixed(1.0 / 60.0);
//! time.set_time_scale(0.5); // slow motion
//!
//! loop {
//!     sim.simulate(time.tick());
//! }
//! ```

use std::time::Instant;

/// Frame clock.
#[derive(Debug, Clone)]
pub struct Time {
    /// When the last real-time frame occurred.
    last_frame: Instant,
    /// Fixed step, replacing wall-clock deltas when set.
    fixed_delta: Option<f32>,
    /// Speed multiplier applied to every delta.
    time_scale: f32,
    paused: bool,
    /// Scaled seconds handed out so far.
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
}

impl Time {
    /// Clock reading wall-clock time between ticks.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            fixed_delta: None,
            time_scale: 1.0,
            paused: false,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
        }
    }

    /// Clock advancing by `delta` seconds per tick, independent of real time.
    pub fn fixed(delta: f32) -> Self {
        let mut time = Self::new();
        time.set_fixed_delta(Some(delta));
        time
    }

    /// Advance one frame and return the scaled delta for this frame.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(self.fixed_delta.unwrap_or(raw))
    }

    /// Advance one frame by an externally measured `raw_delta` seconds.
    ///
    /// Useful when the host already has a frame time from its event loop.
    pub fn advance(&mut self, raw_delta: f32) -> f32 {
        self.frame_count += 1;
        self.delta_secs = if self.paused || !raw_delta.is_finite() {
            0.0
        } else {
            raw_delta.max(0.0) * self.time_scale
        };
        self.elapsed_secs += self.delta_secs;
        self.delta_secs
    }

    /// Scaled seconds since creation or the last reset.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Delta returned by the last tick.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames ticked so far, paused ones included.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after a pause. The paused wall-clock interval is skipped.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Use a fixed step instead of wall-clock deltas. `None` restores
    /// real-time stepping.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta.map(|d| d.max(0.0));
    }

    /// Set the speed multiplier. Negative values clamp to 0.
    ///
    /// - `1.0` = normal speed
    /// - `0.5` = half speed
    /// - `2.0` = double speed
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Reset counters; the fixed step and time scale are kept.
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
        self.elapsed_secs = 0.0;
        self.delta_secs = 0.0;
        self.frame_count = 0;
        self.paused = false;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert!(!time.is_paused());
        assert_eq!(time.time_scale(), 1.0);
    }

    #[test]
    fn test_real_time_tick() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        let delta = time.tick();
        assert!(delta > 0.0);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_fixed_delta() {
        let mut time = Time::fixed(0.25);
        thread::sleep(Duration::from_millis(5));
        assert_eq!(time.tick(), 0.25);
        assert_eq!(time.tick(), 0.25);
        assert_eq!(time.elapsed(), 0.5);
    }

    #[test]
    fn test_time_scale() {
        let mut time = Time::fixed(0.5);
        time.set_time_scale(2.0);
        assert_eq!(time.tick(), 1.0);

        time.set_time_scale(-1.0);
        assert_eq!(time.time_scale(), 0.0);
        assert_eq!(time.tick(), 0.0);
    }

    #[test]
    fn test_pause() {
        let mut time = Time::fixed(0.1);
        time.tick();
        time.pause();
        let before = time.elapsed();
        assert_eq!(time.tick(), 0.0);
        assert_eq!(time.elapsed(), before);
        time.toggle_pause();
        assert!(!time.is_paused());
        assert_eq!(time.tick(), 0.1);
    }

    #[test]
    fn test_advance_rejects_bad_deltas() {
        let mut time = Time::new();
        assert_eq!(time.advance(-1.0), 0.0);
        assert_eq!(time.advance(f32::INFINITY), 0.0);
        assert_eq!(time.advance(0.5), 0.5);
    }
}
