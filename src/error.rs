//! Error types for the site behavior engine
//!
//! Only the library boundary can fail: loading or validating a pricing
//! config, and decoding a snapshot handed over as JSON. The estimate engine
//! itself never errors: malformed form state is normalized, not rejected.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
