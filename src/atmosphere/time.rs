//! Simulated clock for the sun: hour of day and day of year.

/// Days in the simulated year.
pub const DAYS_PER_YEAR: u32 = 365;

/// Hour within a 24-hour cycle plus day of the year (1-365).
#[derive(Clone, Debug, PartialEq)]
pub struct SunClock {
    /// Current hour, in the range `[0.0, 24.0)`.
    hour: f32,
    /// Current day, in the range `1..=365`.
    day_of_year: u32,
}

impl SunClock {
    pub fn new(hour: f32, day_of_year: u32) -> Self {
        let mut clock = Self {
            hour: 0.0,
            day_of_year: 1,
        };
        clock.set(hour, day_of_year);
        clock
    }

    /// Advance real time by `dt_seconds`, where `day_length_seconds` real
    /// seconds make one simulated day. Wraps hours into days and days into
    /// the next year.
    pub fn advance(&mut self, dt_seconds: f32, day_length_seconds: f32) {
        if day_length_seconds <= 0.0 || !dt_seconds.is_finite() {
            return;
        }
        self.hour += dt_seconds * 24.0 / day_length_seconds;
        while self.hour >= 24.0 {
            self.hour -= 24.0;
            self.day_of_year = self.day_of_year % DAYS_PER_YEAR + 1;
        }
        while self.hour < 0.0 {
            self.hour += 24.0;
            self.day_of_year = if self.day_of_year <= 1 {
                DAYS_PER_YEAR
            } else {
                self.day_of_year - 1
            };
        }
    }

    /// Set hour and day directly. Out-of-range values wrap.
    pub fn set(&mut self, hour: f32, day_of_year: u32) {
        let hour = if hour.is_finite() { hour } else { 12.0 };
        self.hour = hour.rem_euclid(24.0);
        if self.hour >= 24.0 {
            self.hour = 0.0;
        }
        self.day_of_year = (day_of_year.max(1) - 1) % DAYS_PER_YEAR + 1;
    }

    #[inline]
    pub fn hour(&self) -> f32 {
        self.hour
    }

    #[inline]
    pub fn day_of_year(&self) -> u32 {
        self.day_of_year
    }
}

impl Default for SunClock {
    fn default() -> Self {
        Self::new(12.0, 172)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_wraps() {
        let clock = SunClock::new(25.0, 366);
        assert!((clock.hour() - 1.0).abs() < 1e-5);
        assert_eq!(clock.day_of_year(), 1);

        let clock = SunClock::new(-1.0, 0);
        assert!((clock.hour() - 23.0).abs() < 1e-5);
        assert_eq!(clock.day_of_year(), 1);
    }

    #[test]
    fn test_advance_rolls_day() {
        let mut clock = SunClock::new(23.0, 10);
        // 120 s per day -> 0.2 h per second
        clock.advance(10.0, 120.0);
        assert!((clock.hour() - 1.0).abs() < 1e-4);
        assert_eq!(clock.day_of_year(), 11);
    }

    #[test]
    fn test_advance_rolls_year() {
        let mut clock = SunClock::new(23.5, 365);
        clock.advance(5.0, 120.0);
        assert_eq!(clock.day_of_year(), 1);
    }

    #[test]
    fn test_zero_day_length_is_paused() {
        let mut clock = SunClock::new(10.0, 100);
        clock.advance(50.0, 0.0);
        assert_eq!(clock, SunClock::new(10.0, 100));
    }
}
