//! Slices: the tiles each player holds the best claim on.
//!
//! A tile belongs to a player's slice when that player's distance is the
//! unique best. Tiles where several players tie for the best distance are
//! contested between all of them.

use serde::Serialize;

use super::distance::DistanceClaims;
use crate::board::Galaxy;

/// One player's claimed territory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Slice {
    pub player: u8,
    /// Tiles where this player alone holds the best claim.
    pub claimed: Vec<usize>,
    /// Tiles where this player ties others for the best claim.
    pub contested: Vec<usize>,
}

impl Slice {
    /// Planet-bearing tiles only, claimed and contested.
    pub fn systems<'a>(&'a self, galaxy: &'a Galaxy) -> impl Iterator<Item = usize> + 'a {
        self.claimed
            .iter()
            .chain(self.contested.iter())
            .copied()
            .filter(move |&i| galaxy.tile_at(i).has_planets())
    }
}

/// Players tied for the best claim on `tile`.
pub fn contenders(distances: &DistanceClaims, tile: usize) -> Vec<u8> {
    match distances.best(tile) {
        Some(best) => distances
            .for_tile(tile)
            .filter(|&(_, d)| d == best)
            .map(|(p, _)| p)
            .collect(),
        None => Vec::new(),
    }
}

/// Builds every player's slice, in player order.
pub fn slices(galaxy: &Galaxy, distances: &DistanceClaims) -> Vec<Slice> {
    let mut out: Vec<Slice> = galaxy
        .home_systems()
        .map(|(player, _)| Slice {
            player,
            ..Slice::default()
        })
        .collect();

    for idx in galaxy.playable() {
        let best = contenders(distances, idx);
        let contested = best.len() > 1;
        for player in best {
            let slice = &mut out[player as usize - 1];
            if contested {
                slice.contested.push(idx);
            } else {
                slice.claimed.push(idx);
            }
        }
    }

    out
}
