//! Time-of-day lighting
//!
//! [`SunSystem`] owns the simulated clock and produces a [`SunState`]: the
//! solar position, the light direction and the banded lighting table entry.
//! The sun light is kept in the scene at night, only inactive.

pub mod config;
pub mod lighting;
pub mod sun;
pub mod time;

pub use config::SunConfig;
pub use lighting::{lighting_for_altitude, LightBand, Lighting};
pub use sun::{compute_sun_position, declination, SunPosition};
pub use time::SunClock;

use glam::Vec3;

/// Lighting derived from the current clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunState {
    pub position: SunPosition,
    /// Unit vector toward the sun.
    pub direction: Vec3,
    /// Where to put the directional light relative to the garden centre.
    pub light_position: Vec3,
    pub lighting: Lighting,
}

/// Sun clock plus derived lighting. Call [`update`](Self::update) per frame
/// or [`set_time`](Self::set_time) when the host picks a time.
#[derive(Clone, Debug)]
pub struct SunSystem {
    config: SunConfig,
    clock: SunClock,
    state: SunState,
}

impl SunSystem {
    pub fn new(config: SunConfig) -> Self {
        let clock = SunClock::new(config.start_hour, config.start_day);
        let state = compute_state(&config, &clock);
        Self { config, clock, state }
    }

    /// Advance the clock by `dt` real seconds. Returns whether the lighting
    /// changed.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.config.day_length_seconds <= 0.0 {
            return false;
        }
        self.clock.advance(dt, self.config.day_length_seconds);
        self.recompute()
    }

    /// Jump to a given hour and day of the year.
    pub fn set_time(&mut self, hour: f32, day_of_year: u32) -> bool {
        self.clock.set(hour, day_of_year);
        self.recompute()
    }

    fn recompute(&mut self) -> bool {
        let next = compute_state(&self.config, &self.clock);
        let changed = next != self.state;
        self.state = next;
        changed
    }

    #[inline]
    pub fn state(&self) -> &SunState {
        &self.state
    }

    #[inline]
    pub fn clock(&self) -> &SunClock {
        &self.clock
    }

    #[inline]
    pub fn config(&self) -> &SunConfig {
        &self.config
    }
}

fn compute_state(config: &SunConfig, clock: &SunClock) -> SunState {
    let position = compute_sun_position(clock.hour(), clock.day_of_year() as f32, config.latitude);
    let direction = position.direction();
    SunState {
        position,
        direction,
        light_position: direction * config.light_distance,
        lighting: lighting_for_altitude(position.altitude),
    }
}
