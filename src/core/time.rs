//! Frame timing driven by the host's animation scheduler.
//!
//! The host owns the real clock and hands each tick an elapsed time; this
//! type only accumulates it so animated effects (highlight pulses, walk
//! cycles) have a stable time base per scene instance.

/// Accumulated frame timing for one scene instance.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    /// Seconds elapsed since the clock was created or reset.
    elapsed: f32,
    /// Delta of the most recent tick, in seconds.
    delta: f32,
    /// Ticks observed.
    tick_count: u64,
    /// Ticks that actually produced a draw.
    frames_drawn: u64,
}

impl FrameClock {
    /// Create a new clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds. Negative or non-finite deltas count as zero.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.delta = dt;
        self.elapsed += dt;
        self.tick_count += 1;
    }

    /// Record that the current tick produced a draw.
    pub fn record_draw(&mut self) {
        self.frames_drawn += 1;
    }

    /// Reset elapsed time and counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Seconds since creation or last reset.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Delta of the most recent tick in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Total ticks observed.
    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Total ticks that drew a frame.
    #[inline]
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_accumulates() {
        let mut clock = FrameClock::new();
        clock.tick(0.5);
        clock.tick(0.25);
        assert!((clock.elapsed() - 0.75).abs() < 1e-6);
        assert!((clock.delta() - 0.25).abs() < 1e-6);
        assert_eq!(clock.tick_count(), 2);
    }

    #[test]
    fn test_bad_deltas_ignored() {
        let mut clock = FrameClock::new();
        clock.tick(-1.0);
        clock.tick(f32::NAN);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.tick_count(), 2);
    }

    #[test]
    fn test_draw_counter_and_reset() {
        let mut clock = FrameClock::new();
        clock.tick(1.0);
        clock.record_draw();
        assert_eq!(clock.frames_drawn(), 1);
        clock.reset();
        assert_eq!(clock.frames_drawn(), 0);
        assert_eq!(clock.elapsed(), 0.0);
    }
}
