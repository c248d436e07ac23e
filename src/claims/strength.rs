//! Strength claims: normalized ownership shares per contestable system.
//!
//! Each contest policy turns a tile's distance claims into raw weights; the
//! weights are then normalized to sum to 1.0. A distance of 0 means the tile
//! is a player's own home and that player takes the whole tile.

use serde::{Deserialize, Serialize};

use super::distance::DistanceClaims;
use crate::board::Galaxy;
use crate::error::GalaxyError;

/// Players within this fraction of the best distance count as "close".
pub const CLOSE_CLAIM_TOLERANCE: f64 = 0.10;

/// How contested systems are divided between players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContestPolicy {
    /// Equal split among players tied for the best distance.
    Slices,
    /// Every reachable player, weighted by `distance^exponent`.
    #[default]
    ClaimSize,
    /// Players within `CLOSE_CLAIM_TOLERANCE` of the best, weighted by
    /// `distance^exponent`.
    TopAndClose,
}

impl ContestPolicy {
    /// Raw (unnormalized) weights for a tile's claims. `claims` holds only
    /// positive distances.
    pub fn weigh(self, claims: &[(u8, u32)], exponent: f64) -> Vec<(u8, f64)> {
        match self {
            ContestPolicy::Slices => slice_weights(claims),
            ContestPolicy::ClaimSize => claim_size_weights(claims, exponent),
            ContestPolicy::TopAndClose => top_and_close_weights(claims, exponent),
        }
    }
}

fn best_of(claims: &[(u8, u32)]) -> Option<u32> {
    claims.iter().map(|&(_, d)| d).min()
}

fn slice_weights(claims: &[(u8, u32)]) -> Vec<(u8, f64)> {
    let Some(best) = best_of(claims) else {
        return Vec::new();
    };
    claims
        .iter()
        .filter(|&&(_, d)| d == best)
        .map(|&(p, _)| (p, 1.0))
        .collect()
}

fn claim_size_weights(claims: &[(u8, u32)], exponent: f64) -> Vec<(u8, f64)> {
    claims
        .iter()
        .map(|&(p, d)| (p, (d as f64).powf(exponent)))
        .collect()
}

fn top_and_close_weights(claims: &[(u8, u32)], exponent: f64) -> Vec<(u8, f64)> {
    let Some(best) = best_of(claims) else {
        return Vec::new();
    };
    let limit = best as f64 * (1.0 + CLOSE_CLAIM_TOLERANCE);
    claims
        .iter()
        .filter(|&&(_, d)| d as f64 <= limit)
        .map(|&(p, d)| (p, (d as f64).powf(exponent)))
        .collect()
}

/// Per-tile, per-player ownership shares.
///
/// Flat `tiles * players` matrix. Only contestable systems are assigned;
/// every other tile has all-zero shares.
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthClaims {
    players: usize,
    shares: Vec<f64>,
    assigned: Vec<bool>,
}

impl StrengthClaims {
    fn empty(tile_count: usize, players: usize) -> Self {
        StrengthClaims {
            players,
            shares: vec![0.0; tile_count * players],
            assigned: vec![false; tile_count],
        }
    }

    #[inline]
    pub fn players(&self) -> usize {
        self.players
    }

    /// Share of `tile` held by `player` (0.0 when none).
    #[inline]
    pub fn get(&self, tile: usize, player: u8) -> f64 {
        self.shares[tile * self.players + player as usize - 1]
    }

    /// True if `tile` was divided between players.
    #[inline]
    pub fn is_assigned(&self, tile: usize) -> bool {
        self.assigned[tile]
    }

    /// `(player, share)` for every player with a positive share of `tile`.
    pub fn for_tile(&self, tile: usize) -> impl Iterator<Item = (u8, f64)> + '_ {
        let row = &self.shares[tile * self.players..(tile + 1) * self.players];
        row.iter()
            .enumerate()
            .filter(|(_, &s)| s > 0.0)
            .map(|(i, &s)| (i as u8 + 1, s))
    }

    /// Sum of all shares on `tile`.
    pub fn total(&self, tile: usize) -> f64 {
        self.for_tile(tile).map(|(_, s)| s).sum()
    }

    /// Indices of every assigned tile.
    pub fn assigned_tiles(&self) -> impl Iterator<Item = usize> + '_ {
        self.assigned
            .iter()
            .enumerate()
            .filter(|(_, &a)| a)
            .map(|(i, _)| i)
    }
}

/// Divides every contestable system between players.
///
/// Fails with `UncontestedSystem` if a planet-bearing system ends up with
/// no contesting player, which means the board graph is broken.
pub fn compute_strength_claims(
    galaxy: &Galaxy,
    distances: &DistanceClaims,
    policy: ContestPolicy,
    exponent: f64,
) -> Result<StrengthClaims, GalaxyError> {
    let players = galaxy.players();
    let mut strength = StrengthClaims::empty(galaxy.len(), players);
    let mut claims: Vec<(u8, u32)> = Vec::with_capacity(players);

    for idx in galaxy.playable() {
        if !galaxy.tile_at(idx).is_contestable() {
            continue;
        }
        claims.clear();
        claims.extend(distances.for_tile(idx));

        let owners: Vec<(u8, f64)> = claims
            .iter()
            .filter(|&&(_, d)| d == 0)
            .map(|&(p, _)| (p, 1.0))
            .collect();
        let weights = if owners.is_empty() {
            policy.weigh(&claims, exponent)
        } else {
            owners
        };

        let total: f64 = weights.iter().map(|&(_, w)| w).sum();
        if weights.is_empty() || !(total.is_finite() && total > 0.0) {
            let (x, y) = galaxy.coords(idx);
            return Err(GalaxyError::UncontestedSystem { x, y });
        }

        for (player, w) in weights {
            strength.shares[idx * players + player as usize - 1] = w / total;
        }
        strength.assigned[idx] = true;
    }

    Ok(strength)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::home_system_layout;
    use crate::claims::distance::{compute_distance_claims, ClaimWeights};
    use crate::random::RandomSequence;

    const EPS: f64 = 1e-9;

    #[test]
    fn slices_split_ties_equally() {
        let w = ContestPolicy::Slices.weigh(&[(1, 20), (2, 20), (3, 30)], -3.0);
        assert_eq!(w, vec![(1, 1.0), (2, 1.0)]);
    }

    #[test]
    fn claim_size_includes_everyone() {
        let w = ContestPolicy::ClaimSize.weigh(&[(1, 10), (2, 20)], -1.0);
        assert_eq!(w.len(), 2);
        assert!((w[0].1 - 0.1).abs() < EPS);
        assert!((w[1].1 - 0.05).abs() < EPS);
    }

    #[test]
    fn top_and_close_drops_far_claims() {
        let w = ContestPolicy::TopAndClose.weigh(&[(1, 20), (2, 22), (3, 23), (4, 40)], -2.0);
        let players: Vec<u8> = w.iter().map(|&(p, _)| p).collect();
        assert_eq!(players, vec![1, 2]);
    }

    #[test]
    fn empty_claims_weigh_nothing() {
        for policy in [ContestPolicy::Slices, ContestPolicy::ClaimSize, ContestPolicy::TopAndClose] {
            assert!(policy.weigh(&[], -3.0).is_empty());
        }
    }

    #[test]
    fn shares_sum_to_one_on_generated_boards() {
        let seq = RandomSequence::from_seed(17);
        for policy in [ContestPolicy::Slices, ContestPolicy::ClaimSize, ContestPolicy::TopAndClose] {
            for _ in 0..5 {
                let g = Galaxy::generate(3, 6, &seq).unwrap();
                let d = compute_distance_claims(&g, &ClaimWeights::default());
                let s = compute_strength_claims(&g, &d, policy, -3.0).unwrap();
                for idx in g.playable() {
                    if g.tile_at(idx).is_contestable() {
                        assert!(s.is_assigned(idx));
                        assert!((s.total(idx) - 1.0).abs() < EPS, "{:?} tile {}", policy, idx);
                    } else {
                        assert!(!s.is_assigned(idx));
                        assert_eq!(s.total(idx), 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn capital_is_split_evenly_between_ring_of_homes() {
        let homes = home_system_layout(1, 6).unwrap();
        let g = Galaxy::assemble(1, &homes, Vec::new()).unwrap();
        let d = compute_distance_claims(&g, &ClaimWeights::default());
        let s = compute_strength_claims(&g, &d, ContestPolicy::ClaimSize, -3.0).unwrap();
        let center = g.center();
        for player in 1..=6 {
            assert!((s.get(center, player) - 1.0 / 6.0).abs() < EPS);
        }
        assert_eq!(s.assigned_tiles().collect::<Vec<_>>(), vec![center]);
    }

    #[test]
    fn unreachable_system_is_an_error() {
        let homes = home_system_layout(1, 6).unwrap();
        let g = Galaxy::assemble(1, &homes, Vec::new()).unwrap();
        let d = DistanceClaims::empty(g.len(), 6);
        assert_eq!(
            compute_strength_claims(&g, &d, ContestPolicy::ClaimSize, -3.0).unwrap_err(),
            GalaxyError::UncontestedSystem { x: 1, y: 1 }
        );
    }

    #[test]
    fn home_distance_takes_whole_tile() {
        let homes = home_system_layout(1, 6).unwrap();
        let g = Galaxy::assemble(1, &homes, Vec::new()).unwrap();
        let center = g.center();
        let mut d = DistanceClaims::empty(g.len(), 6);
        d.set(center, 3, 0);
        d.set(center, 1, 5);
        d.set(center, 2, 7);
        let s = compute_strength_claims(&g, &d, ContestPolicy::ClaimSize, -3.0).unwrap();
        assert_eq!(s.get(center, 3), 1.0);
        assert_eq!(s.get(center, 1), 0.0);
        assert_eq!(s.for_tile(center).count(), 1);
    }
}
