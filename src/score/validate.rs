//! Structural layout gates.
//!
//! Gates run before any claim computation. A rejected layout scores 0.0;
//! rejections are expected outcomes of random generation, not errors.

use tracing::trace;

use super::fairness::ScoreConfig;
use crate::board::{Galaxy, Wormhole};

/// Why a layout was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GateRejection {
    #[error("tile {tile} lists a neighbor twice")]
    DuplicateAdjacency { tile: usize },

    #[error("missing a wormhole type: {alpha} alpha, {beta} beta")]
    MissingWormholeType { alpha: usize, beta: usize },

    #[error("wrong wormhole count: {alpha} alpha, {beta} beta, wanted {wanted}")]
    WrongWormholeCount { alpha: usize, beta: usize, wanted: usize },

    #[error("different wormhole types touch at tiles {a} and {b}")]
    AdjacentWormholes { a: usize, b: usize },

    #[error("anomalies touch at tiles {a} and {b}")]
    AdjacentAnomalies { a: usize, b: usize },
}

/// Wormhole gate: duplicate edges, per-type counts, and mixed-type contact.
pub fn check_wormholes(galaxy: &Galaxy, config: &ScoreConfig) -> Result<(), GateRejection> {
    let mut seen: Vec<usize> = Vec::new();
    for idx in galaxy.playable() {
        seen.clear();
        seen.extend_from_slice(galaxy.neighbors(idx));
        seen.sort_unstable();
        if seen.windows(2).any(|w| w[0] == w[1]) {
            return Err(GateRejection::DuplicateAdjacency { tile: idx });
        }
    }

    let alpha = galaxy.wormhole_tiles(Wormhole::ALPHA).count();
    let beta = galaxy.wormhole_tiles(Wormhole::BETA).count();
    let wanted = config.hole_count;

    if config.both_holes_required && (alpha == 0 || beta == 0) {
        return Err(GateRejection::MissingWormholeType { alpha, beta });
    }
    let counts_ok = if config.hard_hole_limit {
        alpha == wanted && beta == wanted
    } else {
        alpha >= wanted && beta >= wanted
    };
    if !counts_ok {
        return Err(GateRejection::WrongWormholeCount {
            alpha,
            beta,
            wanted,
        });
    }

    if !config.allow_adjacent_holes {
        for a in galaxy.playable() {
            let here = galaxy.tile_at(a).wormholes;
            if here.is_empty() {
                continue;
            }
            for b in galaxy.geometric_neighbors(a) {
                let there = galaxy.tile_at(b).wormholes;
                if !there.is_empty() && there != here {
                    return Err(GateRejection::AdjacentWormholes { a, b });
                }
            }
        }
    }

    Ok(())
}

/// Anomaly gate: optionally forbids anomalies touching each other.
pub fn check_anomalies(galaxy: &Galaxy, config: &ScoreConfig) -> Result<(), GateRejection> {
    if config.allow_adjacent_anomalies {
        return Ok(());
    }
    for a in galaxy.playable() {
        if !galaxy.tile_at(a).anomaly.is_anomaly() {
            continue;
        }
        if let Some(b) = galaxy
            .geometric_neighbors(a)
            .find(|&b| galaxy.tile_at(b).anomaly.is_anomaly())
        {
            return Err(GateRejection::AdjacentAnomalies { a, b });
        }
    }
    Ok(())
}

/// Runs both gates.
pub fn check_layout(galaxy: &Galaxy, config: &ScoreConfig) -> Result<(), GateRejection> {
    let result = check_wormholes(galaxy, config).and_then(|()| check_anomalies(galaxy, config));
    if let Err(rejection) = &result {
        trace!(target: "galaxy_crucible::validate", %rejection, "layout rejected");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{catalog, home_system_layout, SystemTile};

    fn tile(id: i32) -> SystemTile {
        catalog::lookup(id).unwrap().to_tile()
    }

    /// Radius-2 board filled with empty space, with overrides by pool slot.
    ///
    /// Row-major placeable slots for radius 2: 0=(0,3) 1=(1,1) 2=(1,2)
    /// 3=(1,3) 4=(1,4) 5=(2,1) 6=(2,3) 7=(3,0) 8=(3,1) 9=(3,2) 10=(3,3)
    /// 11=(4,1).
    fn board(overrides: &[(usize, i32)]) -> Galaxy {
        let homes = home_system_layout(2, 6).unwrap();
        let mut pool: Vec<SystemTile> = (0..12).map(|_| tile(46)).collect();
        for &(slot, id) in overrides {
            pool[slot] = tile(id);
        }
        Galaxy::assemble(2, &homes, pool).unwrap()
    }

    fn lenient() -> ScoreConfig {
        ScoreConfig {
            both_holes_required: false,
            hard_hole_limit: false,
            hole_count: 0,
            ..ScoreConfig::default()
        }
    }

    #[test]
    fn no_wormholes_fails_when_both_required() {
        let g = board(&[]);
        assert_eq!(
            check_wormholes(&g, &ScoreConfig::default()),
            Err(GateRejection::MissingWormholeType { alpha: 0, beta: 0 })
        );
        assert_eq!(check_wormholes(&g, &lenient()), Ok(()));
    }

    #[test]
    fn exact_counts_pass() {
        // Alphas at (0,3) and (4,1); betas at (1,4) and (3,0). No contact.
        let g = board(&[(0, 39), (11, 26), (4, 40), (7, 25)]);
        assert_eq!(check_wormholes(&g, &ScoreConfig::default()), Ok(()));
    }

    #[test]
    fn hard_limit_rejects_extra_holes() {
        // Third alpha at (2,1) touches the beta at (3,0) but no other alpha.
        let g = board(&[(0, 39), (11, 26), (4, 40), (7, 25), (5, 39)]);
        assert_eq!(
            check_wormholes(&g, &ScoreConfig::default()),
            Err(GateRejection::WrongWormholeCount { alpha: 3, beta: 2, wanted: 2 })
        );
        let soft = ScoreConfig {
            hard_hole_limit: false,
            allow_adjacent_holes: true,
            ..ScoreConfig::default()
        };
        assert_eq!(check_wormholes(&g, &soft), Ok(()));
    }

    #[test]
    fn minimum_count_rejects_missing_holes() {
        let g = board(&[(0, 39), (11, 26), (4, 40)]);
        let soft = ScoreConfig {
            hard_hole_limit: false,
            ..ScoreConfig::default()
        };
        assert_eq!(
            check_wormholes(&g, &soft),
            Err(GateRejection::WrongWormholeCount { alpha: 2, beta: 1, wanted: 2 })
        );
    }

    #[test]
    fn touching_same_type_wormholes_duplicate_an_edge() {
        // (1,1) and (1,2) touch and are both alpha.
        let g = board(&[(1, 39), (2, 26)]);
        assert!(matches!(
            check_wormholes(&g, &lenient()),
            Err(GateRejection::DuplicateAdjacency { .. })
        ));
    }

    #[test]
    fn touching_mixed_wormholes_rejected_unless_allowed() {
        // (1,1) alpha touches (1,2) beta.
        let g = board(&[(1, 39), (2, 40)]);
        assert!(matches!(
            check_wormholes(&g, &lenient()),
            Err(GateRejection::AdjacentWormholes { .. })
        ));
        let allow = ScoreConfig {
            allow_adjacent_holes: true,
            ..lenient()
        };
        assert_eq!(check_wormholes(&g, &allow), Ok(()));
    }

    #[test]
    fn touching_anomalies_rejected_unless_allowed() {
        // (1,1) nebula touches (1,2) rift.
        let g = board(&[(1, 42), (2, 41)]);
        assert!(matches!(
            check_anomalies(&g, &ScoreConfig::default()),
            Err(GateRejection::AdjacentAnomalies { .. })
        ));
        let allow = ScoreConfig {
            allow_adjacent_anomalies: true,
            ..ScoreConfig::default()
        };
        assert_eq!(check_anomalies(&g, &allow), Ok(()));
    }

    #[test]
    fn separated_anomalies_pass() {
        // (0,3) and (4,1) are far apart.
        let g = board(&[(0, 42), (11, 43)]);
        assert_eq!(check_anomalies(&g, &ScoreConfig::default()), Ok(()));
    }

    #[test]
    fn check_layout_runs_both_gates() {
        let g = board(&[(0, 39), (11, 26), (4, 40), (7, 25), (1, 42), (2, 41)]);
        assert!(matches!(
            check_layout(&g, &ScoreConfig::default()),
            Err(GateRejection::AdjacentAnomalies { .. })
        ));
    }
}
