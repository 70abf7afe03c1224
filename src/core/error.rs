//! Error types for gardenscape
//!
//! Only the boundary (loading descriptions, configs and asset manifests)
//! produces errors. Scene construction degrades instead of failing.

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Asset error: {0}")]
    Asset(String),

    #[error("Config error: {0}")]
    Config(String),
}
