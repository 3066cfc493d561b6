//! Crate error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid simulation config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("Invalid surface bounds: {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },

    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Surface error: {message}")]
    Surface { message: String },
}
