//! Ошибки контроллера
//!
//! Две категории:
//! - ConfigError: конфиг не прочитан / не распарсен / нарушает инварианты
//! - ControllerError: нарушены startup preconditions (нет mover'а, битый конфиг)

use bevy::prelude::Entity;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config field `{field}` must be finite (got {value})")]
    NotFinite { field: &'static str, value: f32 },

    #[error("config field `{field}` must be non-negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("config field `{field}` must be non-positive (got {value})")]
    Positive { field: &'static str, value: f32 },
}

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("invalid controller config: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Controller без CharacterMotor (или rapier motor без KinematicCharacterController)
    #[error("controller {0:?} has no collision-aware mover")]
    MissingMover(Entity),

    #[error("controller {0:?} look target is missing or not marked LookTarget")]
    MissingLookTarget(Entity),

    #[error("character collider must have radius > 0 and height >= 2 * radius (got radius {radius}, height {height})")]
    InvalidCollider { radius: f32, height: f32 },
}
