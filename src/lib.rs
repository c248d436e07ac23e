//! Galaxy crucible library.
//!
//! Generates random hex-board galaxies, divides them between players by
//! weighted distance claims, scores how evenly the value is split, and keeps
//! the fairest layout found across repeated search batches.

pub mod board;
pub mod claims;
pub mod config;
pub mod crucible;
pub mod error;
pub mod protocol;
pub mod random;
pub mod score;

pub use config::CrucibleConfig;
pub use crucible::{Crucible, SearchReport};
pub use error::{ConfigError, CrucibleError, GalaxyError};
pub use random::RandomSequence;
