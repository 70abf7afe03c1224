//! Lighting selected from discrete solar-altitude bands.
//!
//! Colours jump at band boundaries; there is no blending between bands.

use serde::Serialize;

use crate::core::types::{rgb, Color};

/// Altitude band the sun is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LightBand {
    /// Above 30 degrees.
    Midday,
    /// 15 to 30 degrees.
    GoldenHour,
    /// 0 to 15 degrees.
    SunriseSunset,
    /// Below the horizon.
    Night,
}

/// Light colours and intensities for one band.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Lighting {
    pub band: LightBand,
    /// Whether the directional sun light contributes at all.
    pub sun_active: bool,
    pub sun_color: Color,
    pub sun_intensity: f32,
    pub ambient_color: Color,
    pub ambient_intensity: f32,
    pub sky_color: Color,
}

/// Lower altitude bound (exclusive) and lighting, highest band first.
const BANDS: [(f32, Lighting); 3] = [
    (
        30.0,
        Lighting {
            band: LightBand::Midday,
            sun_active: true,
            sun_color: rgb(0xFFF4E0),
            sun_intensity: 1.0,
            ambient_color: rgb(0xB8C8D8),
            ambient_intensity: 0.55,
            sky_color: rgb(0x87CEEB),
        },
    ),
    (
        15.0,
        Lighting {
            band: LightBand::GoldenHour,
            sun_active: true,
            sun_color: rgb(0xFFCC80),
            sun_intensity: 0.8,
            ambient_color: rgb(0xD8C0A0),
            ambient_intensity: 0.45,
            sky_color: rgb(0xF0D8A8),
        },
    ),
    (
        0.0,
        Lighting {
            band: LightBand::SunriseSunset,
            sun_active: true,
            sun_color: rgb(0xFF8C40),
            sun_intensity: 0.55,
            ambient_color: rgb(0xC89078),
            ambient_intensity: 0.35,
            sky_color: rgb(0xF4A460),
        },
    ),
];

const NIGHT: Lighting = Lighting {
    band: LightBand::Night,
    sun_active: false,
    sun_color: rgb(0x404860),
    sun_intensity: 0.0,
    ambient_color: rgb(0x304068),
    ambient_intensity: 0.2,
    sky_color: rgb(0x0B1026),
};

/// Lighting for a solar altitude in degrees.
pub fn lighting_for_altitude(altitude: f32) -> Lighting {
    BANDS
        .iter()
        .find(|(min, _)| altitude > *min)
        .map_or(NIGHT, |(_, lighting)| *lighting)
}
