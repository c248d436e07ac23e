//! Static tile catalog.
//!
//! Maps tile identifiers 1..=51 to their planets, wormhole type, and
//! anomaly. Identifiers 1..=17 and 51 are faction home systems and the
//! Creuss gate, 18 is the central capital, 19..=38 are the "blue"
//! (planet) systems, and 39..=50 are the "red" (anomaly, wormhole, and
//! empty) systems. All data is compile-time `static`.

use std::ops::RangeInclusive;

use super::planet::{Planet, Specialty, Trait};
use super::tile::{Anomaly, Occupancy, SystemTile, Wormhole};

/// Identifier of the capital tile that always sits at the center.
pub const CAPITAL_TILE: i32 = 18;

/// Blue (planet-bearing) tiles placed at random.
pub const BLUE_TILES: RangeInclusive<i32> = 19..=38;

/// Red (anomaly / wormhole / empty) tiles placed at random.
pub const RED_TILES: RangeInclusive<i32> = 39..=50;

/// Number of entries in the catalog.
pub const CATALOG_SIZE: usize = 51;

/// Catalog data for one tile identifier.
#[derive(Debug, Clone, Copy)]
pub struct TileSpec {
    pub id: i32,
    pub planets: &'static [Planet],
    pub wormholes: Wormhole,
    pub anomaly: Anomaly,
}

impl TileSpec {
    /// Instantiates an unowned tile from this entry.
    pub fn to_tile(&self) -> SystemTile {
        SystemTile {
            id: self.id,
            planets: self.planets,
            wormholes: self.wormholes,
            anomaly: self.anomaly,
            occupancy: Occupancy::Open,
        }
    }
}

/// Shorthand constructors (used only in table construction).
const fn planets(id: i32, planets: &'static [Planet]) -> TileSpec {
    TileSpec {
        id,
        planets,
        wormholes: Wormhole::empty(),
        anomaly: Anomaly::None,
    }
}
const fn worm(id: i32, planets: &'static [Planet], wormholes: Wormhole) -> TileSpec {
    TileSpec {
        id,
        planets,
        wormholes,
        anomaly: Anomaly::None,
    }
}
const fn anomaly(id: i32, anomaly: Anomaly) -> TileSpec {
    TileSpec {
        id,
        planets: &[],
        wormholes: Wormhole::empty(),
        anomaly,
    }
}
const fn empty(id: i32) -> TileSpec {
    planets(id, &[])
}

const fn p(name: &'static str, res: u32, inf: u32) -> Planet {
    Planet::new(name, res, inf)
}
const fn pt(name: &'static str, res: u32, inf: u32, t: Trait, s: Specialty) -> Planet {
    Planet::with_traits(name, res, inf, t, s)
}

const IND: Trait = Trait::Industrial;
const CUL: Trait = Trait::Cultural;
const HAZ: Trait = Trait::Hazardous;
const NONE: Specialty = Specialty::None;
const RED: Specialty = Specialty::Red;
const YEL: Specialty = Specialty::Yellow;
const GRN: Specialty = Specialty::Green;
const BLU: Specialty = Specialty::Blue;

/// The full catalog, indexed by `id - 1`.
pub static CATALOG: [TileSpec; CATALOG_SIZE] = [
    // Home systems
    planets(1, &[p("Jord", 4, 2)]),
    planets(2, &[p("Moll Primus", 4, 1)]),
    planets(3, &[p("Darien", 4, 4)]),
    planets(4, &[p("Muaat", 4, 1)]),
    planets(5, &[p("Nestaphar", 3, 2)]),
    planets(6, &[p("0.0.0", 5, 0)]),
    planets(7, &[p("Winnu", 3, 4)]),
    planets(8, &[p("Mordai II", 4, 0)]),
    planets(9, &[p("Druaa", 3, 1), p("Maaluuk", 0, 2)]),
    planets(10, &[p("Arc Prime", 4, 0), p("Wren Terra", 2, 1)]),
    planets(11, &[p("Lisis II", 1, 0), p("Ragh", 2, 1)]),
    planets(12, &[p("Jol", 1, 2), p("Nar", 2, 3)]),
    planets(13, &[p("Quinarra", 3, 1), p("Tren'lak", 1, 0)]),
    planets(14, &[p("Archon Ren", 2, 3), p("Archon Tau", 1, 2)]),
    planets(15, &[p("Retillion", 2, 3), p("Shalloq", 1, 2)]),
    planets(16, &[p("Arretze", 2, 0), p("Hercant", 1, 1), p("Kamdorn", 0, 1)]),
    worm(17, &[], Wormhole::DELTA),
    // Capital
    planets(18, &[p("Mecatol Rex", 1, 6)]),
    // Blue systems
    planets(19, &[pt("Wellon", 1, 2, IND, YEL)]),
    planets(20, &[pt("Vefut II", 2, 2, HAZ, NONE)]),
    planets(21, &[pt("Thibah", 1, 1, IND, BLU)]),
    planets(22, &[pt("Tar'mann", 1, 1, IND, GRN)]),
    planets(23, &[pt("Saudor", 2, 2, IND, NONE)]),
    planets(24, &[pt("Mehar Xull", 1, 3, HAZ, RED)]),
    worm(25, &[pt("Quann", 2, 1, CUL, NONE)], Wormhole::BETA),
    worm(26, &[pt("Lodor", 3, 1, CUL, NONE)], Wormhole::ALPHA),
    planets(27, &[pt("New Albion", 1, 1, IND, GRN), pt("Starpoint", 3, 1, HAZ, NONE)]),
    planets(28, &[pt("Tequ'ran", 2, 0, HAZ, NONE), pt("Torkan", 0, 3, CUL, NONE)]),
    planets(29, &[pt("Rarron", 0, 3, CUL, NONE), pt("Qucen'n", 1, 2, IND, NONE)]),
    planets(30, &[pt("Mellon", 0, 2, CUL, NONE), pt("Zohbat", 3, 1, HAZ, NONE)]),
    planets(31, &[pt("Lazar", 1, 0, IND, YEL), pt("Sakulag", 2, 1, HAZ, NONE)]),
    planets(32, &[pt("Dal Bootha", 0, 2, CUL, NONE), pt("Xxehan", 1, 1, CUL, NONE)]),
    planets(33, &[pt("Corneeq", 1, 2, CUL, NONE), pt("Resculon", 2, 0, CUL, NONE)]),
    planets(34, &[pt("Centauri", 1, 3, CUL, NONE), pt("Gral", 1, 1, IND, BLU)]),
    planets(35, &[pt("Bereg", 3, 1, HAZ, NONE), pt("Lirta IV", 2, 3, HAZ, NONE)]),
    planets(36, &[pt("Arnor", 2, 1, IND, NONE), pt("Lor", 1, 2, IND, NONE)]),
    planets(37, &[pt("Arinam", 1, 2, IND, NONE), pt("Meer", 0, 4, IND, RED)]),
    planets(38, &[pt("Abyz", 3, 0, HAZ, NONE), pt("Fria", 2, 0, HAZ, NONE)]),
    // Red systems
    worm(39, &[], Wormhole::ALPHA),
    worm(40, &[], Wormhole::BETA),
    anomaly(41, Anomaly::GravityRift),
    anomaly(42, Anomaly::Nebula),
    anomaly(43, Anomaly::Supernova),
    anomaly(44, Anomaly::AsteroidField),
    anomaly(45, Anomaly::AsteroidField),
    empty(46),
    empty(47),
    empty(48),
    empty(49),
    empty(50),
    // Creuss home
    worm(51, &[p("Creuss", 4, 2)], Wormhole::DELTA),
];

/// Looks up the catalog entry for a tile identifier.
pub fn lookup(id: i32) -> Option<&'static TileSpec> {
    if id < 1 {
        return None;
    }
    CATALOG.get(id as usize - 1)
}

/// The capital tile for the center of the board.
pub fn capital() -> SystemTile {
    CATALOG[CAPITAL_TILE as usize - 1].to_tile()
}

fn tiles_in(range: RangeInclusive<i32>) -> impl Iterator<Item = SystemTile> {
    CATALOG
        .iter()
        .filter(move |spec| range.contains(&spec.id))
        .map(TileSpec::to_tile)
}

/// All blue tiles in identifier order.
pub fn blue_tiles() -> impl Iterator<Item = SystemTile> {
    tiles_in(BLUE_TILES)
}

/// All red tiles in identifier order.
pub fn red_tiles() -> impl Iterator<Item = SystemTile> {
    tiles_in(RED_TILES)
}

/// One full pass of randomizable tiles: blue then red.
pub fn all_tiles() -> Vec<SystemTile> {
    blue_tiles().chain(red_tiles()).collect()
}
