use thiserror::Error;

use crate::core::types::Vec2;

#[derive(Error, Debug)]
pub enum VillageError {
    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Position ({}, {}) is outside the play field", .0.x, .0.y)]
    OutOfBounds(Vec2),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VillageError>;
