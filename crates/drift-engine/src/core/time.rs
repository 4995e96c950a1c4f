/// Converts host frame timestamps (milliseconds) into elapsed animation time.
/// Only running frames advance the clock, so pulses resume where they paused.
pub struct FrameClock {
    /// Timestamp of the previous frame, if there was one since the last resume.
    last_ms: Option<f64>,
    /// Seconds of animation time accumulated.
    elapsed: f32,
    /// Seconds since the previous frame (0 on the first frame after a resume).
    dt: f32,
}

impl FrameClock {
    /// Longest frame delta counted, so a backgrounded tab does not jump pulses.
    pub const MAX_DT: f32 = 0.25;

    pub fn new() -> Self {
        Self {
            last_ms: None,
            elapsed: 0.0,
            dt: 0.0,
        }
    }

    /// Record a frame at `timestamp_ms`. Returns the clamped delta in seconds.
    pub fn tick(&mut self, timestamp_ms: f64) -> f32 {
        self.dt = match self.last_ms {
            Some(last) => (((timestamp_ms - last) / 1000.0) as f32).clamp(0.0, Self::MAX_DT),
            None => 0.0,
        };
        self.last_ms = Some(timestamp_ms);
        self.elapsed += self.dt;
        self.dt
    }

    /// Forget the previous timestamp; the next tick counts as a first frame.
    pub fn resume(&mut self) {
        self.last_ms = None;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(1234.0), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn accumulates_deltas() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        clock.tick(16.0);
        clock.tick(32.0);
        assert!((clock.elapsed() - 0.032).abs() < 1e-6);
        assert!((clock.dt() - 0.016).abs() < 1e-6);
    }

    #[test]
    fn caps_long_gaps() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        assert_eq!(clock.tick(10_000.0), FrameClock::MAX_DT);
    }

    #[test]
    fn resume_skips_paused_time() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        clock.tick(100.0);
        clock.resume();
        clock.tick(5_000.0);
        assert!((clock.elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn backwards_timestamps_do_not_rewind() {
        let mut clock = FrameClock::new();
        clock.tick(100.0);
        assert_eq!(clock.tick(50.0), 0.0);
    }
}
