use thiserror::Error;

use crate::entities::ObjectId;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("object pool exhausted ({capacity} slots in use)")]
    PoolExhausted { capacity: usize },

    #[error("stale object handle: {0:?}")]
    StaleObject(ObjectId),

    #[error("terrain code {code} at ({x}, {y}) has no descriptor")]
    UnknownTerrain { code: u8, x: usize, y: usize },

    #[error("tile ({x}, {y}) lies outside the terrain grid")]
    TileOutOfRange { x: usize, y: usize },

    #[error("malformed vector shape at point {index}: {reason}")]
    MalformedShape { index: usize, reason: &'static str },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
