//! Sun and lighting configuration.

use serde::{Deserialize, Serialize};

/// Location and starting time for the sun.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    /// Latitude in degrees (positive north).
    pub latitude: f32,
    /// Starting hour (0-24).
    pub start_hour: f32,
    /// Starting day of the year (1-365).
    pub start_day: u32,
    /// Real seconds per simulated day when the clock is advanced. 0 = paused.
    pub day_length_seconds: f32,
    /// Distance of the directional light from the garden centre (feet).
    pub light_distance: f32,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            latitude: 40.0,
            start_hour: 10.0,
            start_day: 172,
            day_length_seconds: 0.0,
            light_distance: 100.0,
        }
    }
}
