//! Errors at the crate's fallible edges (course and settings files)
//!
//! The simulation itself never fails; every fault inside a tick is absorbed
//! with a safe default.

#[derive(thiserror::Error, Debug)]
pub enum GolfError {
    #[error("invalid json: {0}")]
    InvalidJson(String),
    #[error("course validation error: {0}")]
    Validation(String),
    #[error("io error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for GolfError {
    fn from(e: serde_json::Error) -> Self {
        GolfError::InvalidJson(e.to_string())
    }
}

impl From<std::io::Error> for GolfError {
    fn from(e: std::io::Error) -> Self {
        GolfError::Io(e.to_string())
    }
}
