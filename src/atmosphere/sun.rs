//! Solar position from hour of day, day of year and latitude.
//!
//! Simplified model: declination from a cosine of the day offset from the
//! December solstice, altitude from the spherical law of cosines, azimuth
//! from the companion formula mirrored after solar noon.

use glam::Vec3;

/// Earth's axial tilt in degrees.
const AXIAL_TILT: f32 = 23.44;

/// Sun altitude and azimuth in degrees.
///
/// Azimuth is measured clockwise from north (90 = east, 180 = south).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunPosition {
    pub altitude: f32,
    pub azimuth: f32,
}

/// Solar declination in degrees for a day of the year (1-365).
pub fn declination(day_of_year: f32) -> f32 {
    -AXIAL_TILT * (360.0 / 365.0 * (day_of_year + 10.0)).to_radians().cos()
}

/// Compute the sun's position for local solar time `hour`.
pub fn compute_sun_position(hour: f32, day_of_year: f32, latitude: f32) -> SunPosition {
    let lat = latitude.to_radians();
    let decl = declination(day_of_year).to_radians();
    let hour_angle = (15.0 * (hour - 12.0)).to_radians();

    let sin_alt = lat.sin() * decl.sin() + lat.cos() * decl.cos() * hour_angle.cos();
    let altitude = sin_alt.clamp(-1.0, 1.0).asin();

    let denom = altitude.cos() * lat.cos();
    let azimuth = if denom.abs() < 1e-6 {
        180.0
    } else {
        let cos_az = ((decl.sin() - altitude.sin() * lat.sin()) / denom).clamp(-1.0, 1.0);
        let az = cos_az.acos().to_degrees();
        if hour > 12.0 { 360.0 - az } else { az }
    };

    SunPosition {
        altitude: altitude.to_degrees(),
        azimuth,
    }
}

impl SunPosition {
    /// Unit vector pointing from the ground toward the sun (north = -Z, east = +X).
    pub fn direction(&self) -> Vec3 {
        let alt = self.altitude.to_radians();
        let az = self.azimuth.to_radians();
        Vec3::new(az.sin() * alt.cos(), alt.sin(), -az.cos() * alt.cos()).normalize_or(Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declination_extremes() {
        // Around the June solstice (day 172) declination is near +23.44
        assert!((declination(172.0) - AXIAL_TILT).abs() < 0.5);
        // Around the December solstice (day 355) near -23.44
        assert!((declination(355.0) + AXIAL_TILT).abs() < 0.5);
    }

    #[test]
    fn test_noon_altitude_summer() {
        // At 40N on the June solstice noon altitude is 90 - 40 + 23.44
        let pos = compute_sun_position(12.0, 172.0, 40.0);
        assert!((pos.altitude - 73.44).abs() < 0.6, "altitude {}", pos.altitude);
        assert!((pos.azimuth - 180.0).abs() < 1.0, "azimuth {}", pos.azimuth);
    }

    #[test]
    fn test_midnight_below_horizon() {
        let pos = compute_sun_position(0.0, 172.0, 40.0);
        assert!(pos.altitude < 0.0);
    }

    #[test]
    fn test_morning_east_afternoon_west() {
        let morning = compute_sun_position(9.0, 80.0, 40.0);
        let afternoon = compute_sun_position(15.0, 80.0, 40.0);
        assert!(morning.azimuth < 180.0);
        assert!(afternoon.azimuth > 180.0);
        assert!((morning.altitude - afternoon.altitude).abs() < 1e-3);
        assert!((morning.azimuth + afternoon.azimuth - 360.0).abs() < 1e-2);
    }

    #[test]
    fn test_direction_follows_altitude() {
        let noon = compute_sun_position(12.0, 172.0, 40.0).direction();
        assert!(noon.y > 0.9);
        // Southern sky at noon in the northern hemisphere
        assert!(noon.z > 0.0);
        let east = compute_sun_position(7.0, 172.0, 40.0).direction();
        assert!(east.x > 0.0);
    }
}
