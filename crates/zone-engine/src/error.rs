//! Error types for zone-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZoneError {
    #[error("Malformed offset: {0}")]
    MalformedOffset(String),

    #[error("Unknown zone: {0}")]
    UnknownZone(String),
}

pub type Result<T> = std::result::Result<T, ZoneError>;
