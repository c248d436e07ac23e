//! Board interchange formats.
//!
//! The ring-ordered board string consumed by external renderers, and the
//! JSON summary the CLI writes for the best galaxy.

pub mod board_string;
pub mod summary;

pub use board_string::{encode_board_string, parse_board_string, ring_positions, BoardString, BoardStringError};
pub use summary::{GalaxySummary, PlayerSummary, TileSummary};
