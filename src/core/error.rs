use thiserror::Error;

use crate::core::types::{ActorId, PlaceId};

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid hour range {start}..{end} (must satisfy 0 <= start <= end <= 24)")]
    InvalidHours { start: u8, end: u8 },

    #[error("Core working hours {core_start}..{core_end} are not within workable hours {workable_start}..{workable_end}")]
    CoreHoursOutsideWorkable {
        core_start: u8,
        core_end: u8,
        workable_start: u8,
        workable_end: u8,
    },

    #[error("Place not found: {0}")]
    PlaceNotFound(PlaceId),

    #[error("Actor not found: {0}")]
    ActorNotFound(ActorId),

    #[error("Place {0} is not a home")]
    NotAHome(PlaceId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
