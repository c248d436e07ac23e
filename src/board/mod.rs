//! Board representation.
//!
//! Contains planets, system tiles, the static tile catalog, and the galaxy
//! grid with its adjacency graph.

pub mod catalog;
pub mod galaxy;
pub mod planet;
pub mod tile;

pub use catalog::{TileSpec, CAPITAL_TILE, CATALOG};
pub use galaxy::{home_system_layout, in_shape, placeable_count, Galaxy, SUPPORTED_PLAYERS};
pub use planet::{Planet, Specialty, Trait};
pub use tile::{Anomaly, Occupancy, SystemTile, Wormhole, BLANK_TILE, OUTSIDE_TILE};
