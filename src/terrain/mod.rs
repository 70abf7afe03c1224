//! Ground and soil surfaces.
//!
//! [`noise`] provides the deterministic gradient noise used for every organic
//! displacement in the scene; [`displacement`] turns it into height fields
//! for the garden ground and raised-bed soil.

pub mod displacement;
pub mod noise;

pub use displacement::{
    displace_grid, ground_height, soil_displacement_field, soil_height, GroundParams, SoilParams,
};
pub use self::noise::noise2d;
