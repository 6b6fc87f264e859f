use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BandwidthError {
    #[error("Unknown hardware identifier: {0}")]
    UnknownIdentifier(String),
    #[error("{code}: {message}")]
    Api { code: String, message: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),
    #[error("Summary period must be a positive number of seconds, got {0}")]
    InvalidPeriod(u32),
    #[error("Failed to read config file: {0}")]
    ConfigRead(#[from] io::Error),
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
