//! Galaxy layout: the hex grid, tile placement, and adjacency graph.
//!
//! The board is a `(2r+1) x (2r+1)` square grid in axial offset coordinates.
//! A cell `(x, y)` is playable iff `r <= x + y <= 3r`; everything else is
//! marked `Occupancy::Outside` and excluded from the graph.
//!
//! Tiles live in a flat arena indexed by `x * width + y`. Adjacency is a list
//! of arena indices per tile. Geometric edges use only the three forward
//! directions `(x+1, y)`, `(x, y+1)`, `(x+1, y-1)`, each inserted in both
//! directions, which yields the six-neighbor hex topology. Same-type
//! wormholes are then cross-linked across the whole board.

use super::catalog;
use super::tile::{Occupancy, SystemTile, Wormhole, OUTSIDE_TILE};
use crate::error::GalaxyError;
use crate::random::RandomSequence;

/// The only player count with a defined home-system layout.
pub const SUPPORTED_PLAYERS: usize = 6;

/// The six hex directions in offset coordinates.
const HEX_DIRECTIONS: [(isize, isize); 6] = [(1, 0), (-1, 0), (0, 1), (0, -1), (1, -1), (-1, 1)];

/// Directions used when inserting edges, so each pair is visited once.
const FORWARD_DIRECTIONS: [(isize, isize); 3] = [(1, 0), (0, 1), (1, -1)];

/// One complete generated board.
#[derive(Debug, Clone)]
pub struct Galaxy {
    radius: usize,
    players: usize,
    tiles: Vec<SystemTile>,
    adjacent: Vec<Vec<usize>>,
    /// Arena index of each player's home system; player `i + 1` at `homes[i]`.
    homes: Vec<usize>,
    /// Fairness score assigned after scoring.
    pub score: f64,
}

/// Number of randomly placed tiles for a radius and player count.
pub fn placeable_count(radius: usize, players: usize) -> Result<usize, GalaxyError> {
    let cells = 3 * radius * (radius + 1);
    cells
        .checked_sub(players)
        .ok_or(GalaxyError::NegativePlaceableCount { radius, players })
}

/// Home-system coordinates for the given player count, in player order.
pub fn home_system_layout(radius: usize, players: usize) -> Result<Vec<(usize, usize)>, GalaxyError> {
    if players != SUPPORTED_PLAYERS {
        return Err(GalaxyError::UnsupportedPlayerCount(players));
    }
    let r = radius;
    Ok(vec![(0, r), (0, 2 * r), (r, 0), (r, 2 * r), (2 * r, 0), (2 * r, r)])
}

impl Galaxy {
    /// Generates a random galaxy.
    ///
    /// Builds a tile pool from whole catalog passes until it covers every
    /// placeable cell, shuffles it, truncates it to the exact count, and
    /// lays it out. Large radii repeat tile identifiers.
    pub fn generate(
        radius: usize,
        players: usize,
        random: &RandomSequence,
    ) -> Result<Galaxy, GalaxyError> {
        if players != SUPPORTED_PLAYERS {
            return Err(GalaxyError::UnsupportedPlayerCount(players));
        }
        let needed = placeable_count(radius, players)?;
        let homes = home_system_layout(radius, players)?;

        let mut pool: Vec<SystemTile> = Vec::with_capacity(needed + catalog::CATALOG_SIZE);
        while pool.len() < needed {
            pool.extend(catalog::all_tiles());
        }
        random.shuffle(&mut pool);
        pool.truncate(needed);

        Galaxy::assemble(radius, &homes, pool)
    }

    /// Lays out a galaxy from explicit home systems and a tile pool.
    ///
    /// Pool tiles fill playable non-home, non-center cells in row-major
    /// order (`x` outer, `y` inner). The center always gets the capital.
    /// Extra pool tiles are ignored. Players are numbered from 1 in `homes`
    /// order, so at most 255 homes fit.
    pub fn assemble(
        radius: usize,
        homes: &[(usize, usize)],
        pool: Vec<SystemTile>,
    ) -> Result<Galaxy, GalaxyError> {
        let players = homes.len();
        if players > u8::MAX as usize {
            return Err(GalaxyError::TooManyPlayers(players));
        }
        let needed = placeable_count(radius, players)?;
        if pool.len() < needed {
            return Err(GalaxyError::TilePoolExhausted {
                needed,
                available: pool.len(),
            });
        }

        let width = 2 * radius + 1;
        let mut tiles = vec![SystemTile::blank(); width * width];
        let mut home_indices = Vec::with_capacity(players);

        for (i, &(x, y)) in homes.iter().enumerate() {
            if x >= width || y >= width || !in_shape(radius, x, y) || (x == radius && y == radius) {
                return Err(GalaxyError::InvalidHomeSystem { x, y });
            }
            let idx = x * width + y;
            if tiles[idx].occupancy != Occupancy::Open {
                return Err(GalaxyError::DuplicateHomeSystem { x, y });
            }
            tiles[idx].occupancy = Occupancy::Home(i as u8 + 1);
            home_indices.push(idx);
        }

        let mut pool = pool.into_iter();
        for x in 0..width {
            for y in 0..width {
                let idx = x * width + y;
                if x == radius && y == radius {
                    tiles[idx] = catalog::capital();
                } else if !in_shape(radius, x, y) {
                    tiles[idx].id = OUTSIDE_TILE;
                    tiles[idx].occupancy = Occupancy::Outside;
                } else if tiles[idx].occupancy == Occupancy::Open {
                    // Length was checked against `needed` above.
                    if let Some(mut tile) = pool.next() {
                        tile.occupancy = Occupancy::Open;
                        tiles[idx] = tile;
                    }
                }
            }
        }

        let mut galaxy = Galaxy {
            radius,
            players,
            adjacent: vec![Vec::new(); tiles.len()],
            tiles,
            homes: home_indices,
            score: 0.0,
        };
        galaxy.connect_neighbors();
        galaxy.connect_wormholes();
        Ok(galaxy)
    }

    fn connect_neighbors(&mut self) {
        let width = self.width();
        for x in 0..width {
            for y in 0..width {
                let idx = x * width + y;
                if !self.tiles[idx].occupancy.in_play() {
                    continue;
                }
                for &(dx, dy) in FORWARD_DIRECTIONS.iter() {
                    if let Some(other) = self.offset(x, y, dx, dy) {
                        if self.tiles[other].occupancy.in_play() {
                            self.adjacent[idx].push(other);
                            self.adjacent[other].push(idx);
                        }
                    }
                }
            }
        }
    }

    /// Links every pair of tiles sharing a wormhole type. Pairs that are also
    /// geometric neighbors end up listed twice; the layout validator rejects
    /// such boards.
    fn connect_wormholes(&mut self) {
        let holes: Vec<usize> = (0..self.tiles.len())
            .filter(|&i| self.tiles[i].occupancy.in_play() && !self.tiles[i].wormholes.is_empty())
            .collect();
        for &a in &holes {
            for &b in &holes {
                if a != b && self.tiles[a].wormholes.intersects(self.tiles[b].wormholes) {
                    self.adjacent[a].push(b);
                }
            }
        }
    }

    #[inline]
    fn offset(&self, x: usize, y: usize, dx: isize, dy: isize) -> Option<usize> {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        let width = self.width();
        if nx < width && ny < width {
            Some(nx * width + ny)
        } else {
            None
        }
    }

    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    #[inline]
    pub fn players(&self) -> usize {
        self.players
    }

    /// Side length of the square grid.
    #[inline]
    pub fn width(&self) -> usize {
        2 * self.radius + 1
    }

    /// Number of grid cells (including cells outside the shape).
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Arena index of a coordinate.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x * self.width() + y
    }

    /// Coordinate of an arena index.
    #[inline]
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        (idx / self.width(), idx % self.width())
    }

    /// Tile at a coordinate, if inside the grid.
    pub fn tile(&self, x: usize, y: usize) -> Option<&SystemTile> {
        let width = self.width();
        if x < width && y < width {
            self.tiles.get(x * width + y)
        } else {
            None
        }
    }

    #[inline]
    pub fn tile_at(&self, idx: usize) -> &SystemTile {
        &self.tiles[idx]
    }

    pub fn tiles(&self) -> &[SystemTile] {
        &self.tiles
    }

    /// Arena index of the center tile.
    #[inline]
    pub fn center(&self) -> usize {
        self.index(self.radius, self.radius)
    }

    /// All graph neighbors, including wormhole links. May contain duplicates
    /// on malformed boards.
    #[inline]
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.adjacent[idx]
    }

    /// Playable cells that touch `idx` on the hex grid.
    pub fn geometric_neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        let (x, y) = self.coords(idx);
        HEX_DIRECTIONS.iter().filter_map(move |&(dx, dy)| {
            self.offset(x, y, dx, dy)
                .filter(|&n| self.tiles[n].occupancy.in_play())
        })
    }

    /// True if two cells touch on the hex grid.
    pub fn are_geometric_neighbors(&self, a: usize, b: usize) -> bool {
        let (ax, ay) = self.coords(a);
        let (bx, by) = self.coords(b);
        let d = (bx as isize - ax as isize, by as isize - ay as isize);
        HEX_DIRECTIONS.contains(&d)
    }

    /// Home-system arena indices in player order.
    pub fn home_indices(&self) -> &[usize] {
        &self.homes
    }

    /// `(player, arena index)` for every home system.
    pub fn home_systems(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.homes.iter().enumerate().map(|(i, &idx)| (i as u8 + 1, idx))
    }

    /// Home-system coordinates in player order.
    pub fn home_coords(&self) -> Vec<(usize, usize)> {
        self.homes.iter().map(|&idx| self.coords(idx)).collect()
    }

    /// Arena indices of every playable cell.
    pub fn playable(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.tiles.len()).filter(|&i| self.tiles[i].occupancy.in_play())
    }

    /// Arena indices of tiles carrying the given wormhole type.
    pub fn wormhole_tiles(&self, kind: Wormhole) -> impl Iterator<Item = usize> + '_ {
        self.playable().filter(move |&i| self.tiles[i].wormholes.contains(kind))
    }
}

/// True if `(x, y)` is inside the playable hex shape of `radius`.
#[inline]
pub fn in_shape(radius: usize, x: usize, y: usize) -> bool {
    let s = x + y;
    s >= radius && s <= 3 * radius
}
