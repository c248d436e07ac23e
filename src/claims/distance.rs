//! Distance claims: weighted shortest paths from every home system.
//!
//! For each player a bucketed Dijkstra search runs from that player's home
//! tile. The frontier is a `BTreeMap` from cumulative distance to a FIFO
//! bucket of tiles; the smallest key is finalized first and ties inside a
//! bucket resolve in enqueue order. The cost of stepping into a tile depends
//! on the tile being entered (see `ClaimWeights::edge_weight`).

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::board::{Anomaly, Galaxy, SystemTile};

/// Traversal costs. Smaller is closer. All must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimWeights {
    pub walk: u32,
    pub empty: u32,
    pub asteroid: u32,
    pub nova: u32,
    pub nebula: u32,
    pub rift: u32,
    pub worm: u32,
}

impl Default for ClaimWeights {
    fn default() -> Self {
        ClaimWeights {
            walk: 10,
            empty: 11,
            asteroid: 13,
            nova: 100,
            nebula: 20,
            rift: 8,
            worm: 12,
        }
    }
}

impl ClaimWeights {
    /// Cost of moving from `from` into `to`.
    ///
    /// Anomalies on the destination win first (nova, nebula, asteroids,
    /// rift), then a shared wormhole, then an empty destination, then the
    /// plain walking cost.
    pub fn edge_weight(&self, from: &SystemTile, to: &SystemTile) -> u32 {
        match to.anomaly {
            Anomaly::Supernova => self.nova,
            Anomaly::Nebula => self.nebula,
            Anomaly::AsteroidField => self.asteroid,
            Anomaly::GravityRift => self.rift,
            Anomaly::None => {
                if from.wormholes.intersects(to.wormholes) {
                    self.worm
                } else if to.planets.is_empty() {
                    self.empty
                } else {
                    self.walk
                }
            }
        }
    }

    /// True if every weight is strictly positive.
    pub fn all_positive(&self) -> bool {
        [
            self.walk,
            self.empty,
            self.asteroid,
            self.nova,
            self.nebula,
            self.rift,
            self.worm,
        ]
        .iter()
        .all(|&w| w > 0)
    }
}

/// Per-tile, per-player shortest weighted distance from each home system.
///
/// Stored as a flat `tiles * players` matrix; `None` means the player cannot
/// reach the tile.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceClaims {
    players: usize,
    dist: Vec<Option<u32>>,
}

impl DistanceClaims {
    /// An empty claim matrix (no player reaches anything).
    pub fn empty(tile_count: usize, players: usize) -> Self {
        DistanceClaims {
            players,
            dist: vec![None; tile_count * players],
        }
    }

    #[inline]
    pub fn players(&self) -> usize {
        self.players
    }

    /// Number of tiles covered.
    #[inline]
    pub fn tile_count(&self) -> usize {
        if self.players == 0 {
            0
        } else {
            self.dist.len() / self.players
        }
    }

    /// Distance from `player`'s home to `tile`.
    #[inline]
    pub fn get(&self, tile: usize, player: u8) -> Option<u32> {
        self.dist[tile * self.players + player as usize - 1]
    }

    #[inline]
    pub fn set(&mut self, tile: usize, player: u8, distance: u32) {
        self.dist[tile * self.players + player as usize - 1] = Some(distance);
    }

    /// `(player, distance)` for every player with a claim on `tile`.
    pub fn for_tile(&self, tile: usize) -> impl Iterator<Item = (u8, u32)> + '_ {
        let row = &self.dist[tile * self.players..(tile + 1) * self.players];
        row.iter()
            .enumerate()
            .filter_map(|(i, d)| d.map(|d| (i as u8 + 1, d)))
    }

    /// Smallest claim on `tile`.
    pub fn best(&self, tile: usize) -> Option<u32> {
        self.for_tile(tile).map(|(_, d)| d).min()
    }

    /// Smallest claim strictly worse than the best.
    pub fn second_best(&self, tile: usize) -> Option<u32> {
        let best = self.best(tile)?;
        self.for_tile(tile).map(|(_, d)| d).filter(|&d| d > best).min()
    }

    /// True if any player reaches `tile`.
    pub fn has_claims(&self, tile: usize) -> bool {
        self.for_tile(tile).next().is_some()
    }
}

/// Computes every player's distance claim over the whole board.
pub fn compute_distance_claims(galaxy: &Galaxy, weights: &ClaimWeights) -> DistanceClaims {
    let mut claims = DistanceClaims::empty(galaxy.len(), galaxy.players());
    let mut finalized = vec![false; galaxy.len()];
    let mut frontier: BTreeMap<u32, VecDeque<usize>> = BTreeMap::new();

    for (player, home) in galaxy.home_systems() {
        finalized.iter_mut().for_each(|f| *f = false);
        frontier.clear();
        frontier.entry(0).or_default().push_back(home);

        while let Some((dist, current)) = pop_nearest(&mut frontier) {
            if finalized[current] {
                continue;
            }
            finalized[current] = true;
            claims.set(current, player, dist);

            let from = galaxy.tile_at(current);
            for &next in galaxy.neighbors(current) {
                if finalized[next] {
                    continue;
                }
                let step = weights.edge_weight(from, galaxy.tile_at(next));
                frontier
                    .entry(dist.saturating_add(step))
                    .or_default()
                    .push_back(next);
            }
        }
    }

    claims
}

/// Removes the first tile from the lowest-distance bucket.
fn pop_nearest(frontier: &mut BTreeMap<u32, VecDeque<usize>>) -> Option<(u32, usize)> {
    let mut entry = frontier.first_entry()?;
    let dist = *entry.key();
    let tile = entry.get_mut().pop_front();
    if entry.get().is_empty() {
        entry.remove();
    }
    tile.map(|t| (dist, t))
}
