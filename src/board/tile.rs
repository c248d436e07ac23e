//! System tiles: the nodes of the board graph.
//!
//! A tile carries its catalog identity (planets, wormholes, anomaly) plus an
//! occupancy marker saying whether it is a home system, an open map tile, or
//! a cell outside the playable hex shape. Adjacency is not stored here; the
//! owning `Galaxy` keeps it as index lists.

use std::fmt;

use bitflags::bitflags;

use super::planet::Planet;

/// Identifier of a blank placeholder tile.
pub const BLANK_TILE: i32 = 0;

/// Identifier reserved for cells outside the galaxy shape.
pub const OUTSIDE_TILE: i32 = -1;

bitflags! {
    /// Wormhole types present on a tile. Real tiles carry at most one.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Wormhole: u8 {
        const ALPHA = 1;
        const BETA = 2;
        const GAMMA = 4;
        const DELTA = 8;
    }
}

impl Wormhole {
    /// Human-readable name of the first type set, for display.
    pub fn label(self) -> &'static str {
        if self.contains(Wormhole::ALPHA) {
            "Alpha"
        } else if self.contains(Wormhole::BETA) {
            "Beta"
        } else if self.contains(Wormhole::GAMMA) {
            "Gamma"
        } else if self.contains(Wormhole::DELTA) {
            "Delta"
        } else {
            "None"
        }
    }
}

/// Anomaly classification. Mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anomaly {
    #[default]
    None,
    AsteroidField,
    GravityRift,
    Supernova,
    Nebula,
}

impl Anomaly {
    pub const fn name(self) -> &'static str {
        match self {
            Anomaly::None => "None",
            Anomaly::AsteroidField => "Asteroid Field",
            Anomaly::GravityRift => "Gravity Rift",
            Anomaly::Supernova => "Supernova",
            Anomaly::Nebula => "Nebula",
        }
    }

    #[inline]
    pub const fn is_anomaly(self) -> bool {
        !matches!(self, Anomaly::None)
    }
}

/// Who a grid cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Occupancy {
    /// Outside the playable hex shape; excluded from the board graph.
    Outside,
    /// Playable map tile with no owner.
    #[default]
    Open,
    /// Home system of the given player (1-based).
    Home(u8),
}

impl Occupancy {
    /// Integer marker: -1 outside, 0 open, 1..N home system.
    pub const fn marker(self) -> i32 {
        match self {
            Occupancy::Outside => -1,
            Occupancy::Open => 0,
            Occupancy::Home(p) => p as i32,
        }
    }

    #[inline]
    pub const fn in_play(self) -> bool {
        !matches!(self, Occupancy::Outside)
    }
}

/// A tile placed on (or reserved in) the galaxy grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemTile {
    pub id: i32,
    pub planets: &'static [Planet],
    pub wormholes: Wormhole,
    pub anomaly: Anomaly,
    pub occupancy: Occupancy,
}

impl SystemTile {
    /// A placeholder tile with no planets and no owner.
    pub const fn blank() -> Self {
        SystemTile {
            id: BLANK_TILE,
            planets: &[],
            wormholes: Wormhole::empty(),
            anomaly: Anomaly::None,
            occupancy: Occupancy::Open,
        }
    }

    /// Total resources over all planets.
    pub fn resources(&self) -> u32 {
        self.planets.iter().map(|p| p.resources).sum()
    }

    /// Total influence over all planets.
    pub fn influence(&self) -> u32 {
        self.planets.iter().map(|p| p.influence).sum()
    }

    /// Resources when `res` is true, influence otherwise.
    pub fn value(&self, res: bool) -> u32 {
        if res {
            self.resources()
        } else {
            self.influence()
        }
    }

    #[inline]
    pub fn has_planets(&self) -> bool {
        !self.planets.is_empty()
    }

    /// True for a real catalog system worth contesting: positive id and
    /// at least one planet.
    #[inline]
    pub fn is_contestable(&self) -> bool {
        self.id > 0 && self.has_planets()
    }

    #[inline]
    pub fn home_player(&self) -> Option<u8> {
        match self.occupancy {
            Occupancy::Home(p) => Some(p),
            _ => None,
        }
    }
}

impl Default for SystemTile {
    fn default() -> Self {
        SystemTile::blank()
    }
}

impl fmt::Display for SystemTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: \"", self.id)?;
        if self.planets.is_empty() {
            if self.anomaly.is_anomaly() {
                f.write_str(self.anomaly.name())?;
            } else if !self.wormholes.is_empty() {
                write!(f, "{} wormhole", self.wormholes.label())?;
            } else if self.id > 0 {
                f.write_str("Empty Space")?;
            }
        }
        for (i, planet) in self.planets.iter().enumerate() {
            if i > 0 {
                f.write_str(" / ")?;
            }
            write!(f, "{}", planet)?;
        }
        f.write_str("\"")
    }
}
