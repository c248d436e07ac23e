//! Error types.
//!
//! Configuration errors and invariant violations are hard errors. Layouts
//! that merely fail a validity gate are not errors; they score 0.0.

use std::path::PathBuf;

use crate::claims::ContestPolicy;
use crate::score::ResourceValueMethod;

/// Errors raised while generating or scoring a galaxy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GalaxyError {
    #[error("home-system layout is only defined for 6 players, got {0}")]
    UnsupportedPlayerCount(usize),

    #[error("at most 255 home systems are supported, got {0}")]
    TooManyPlayers(usize),

    #[error("{players} players do not fit in a galaxy of radius {radius}")]
    NegativePlaceableCount { radius: usize, players: usize },

    #[error("two home systems share coordinate ({x},{y})")]
    DuplicateHomeSystem { x: usize, y: usize },

    #[error("home system ({x},{y}) is not a placeable cell")]
    InvalidHomeSystem { x: usize, y: usize },

    #[error("tile pool has {available} tiles, layout needs {needed}")]
    TilePoolExhausted { needed: usize, available: usize },

    #[error("resource value method {method:?} is not supported with the {policy:?} contest policy")]
    UnsupportedValueMethod {
        method: ResourceValueMethod,
        policy: ContestPolicy,
    },

    #[error("system at ({x},{y}) has planets but no contesting player")]
    UncontestedSystem { x: usize, y: usize },
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors raised while setting up a crucible.
#[derive(Debug, thiserror::Error)]
pub enum CrucibleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Galaxy(#[from] GalaxyError),
}
