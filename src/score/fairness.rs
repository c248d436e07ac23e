//! Fairness scoring.
//!
//! A layout that passes the gates is divided between players by strength
//! claims; each player's total is the share-weighted value of every
//! planet-bearing system. The score is `(min / max) ^ resource_scaling`
//! over those totals, so 1.0 is a perfectly even board.

use serde::{Deserialize, Serialize};

use super::validate::{check_layout, GateRejection};
use crate::board::{Galaxy, SystemTile};
use crate::claims::{compute_distance_claims, compute_strength_claims, ClaimWeights, ContestPolicy};
use crate::error::GalaxyError;

/// How a system's planets are reduced to a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResourceValueMethod {
    /// Resources and influence balanced independently. Only meaningful
    /// with the `Slices` contest policy.
    Separate,
    /// `resources + ratio * influence` per planet.
    DirectSum,
    /// `max(resources, ratio * influence)` per planet.
    #[default]
    MaxVal,
}

impl ResourceValueMethod {
    /// Single value of a tile under this method. `Separate` has no single
    /// value and falls back to resources.
    pub fn tile_value(self, tile: &SystemTile, influence_ratio: f64) -> f64 {
        match self {
            ResourceValueMethod::Separate => tile.resources() as f64,
            ResourceValueMethod::DirectSum => tile
                .planets
                .iter()
                .map(|p| p.summed_value(influence_ratio))
                .sum(),
            ResourceValueMethod::MaxVal => tile
                .planets
                .iter()
                .map(|p| p.max_value(influence_ratio))
                .sum(),
        }
    }

    /// True if this method can be used with `policy`.
    pub fn supports(self, policy: ContestPolicy) -> bool {
        self != ResourceValueMethod::Separate || policy == ContestPolicy::Slices
    }
}

/// Scoring knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub both_holes_required: bool,
    pub hard_hole_limit: bool,
    pub hole_count: usize,
    pub allow_adjacent_holes: bool,
    pub allow_adjacent_anomalies: bool,
    pub contest_policy: ContestPolicy,
    pub resource_value_method: ResourceValueMethod,
    pub resource_influence_ratio: f64,
    pub resource_scaling: f64,
    /// Negative; closer claims weigh more.
    pub claim_exponent: f64,
    pub weights: ClaimWeights,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        ScoreConfig {
            both_holes_required: true,
            hard_hole_limit: true,
            hole_count: 2,
            allow_adjacent_holes: false,
            allow_adjacent_anomalies: false,
            contest_policy: ContestPolicy::ClaimSize,
            resource_value_method: ResourceValueMethod::MaxVal,
            resource_influence_ratio: 1.0,
            resource_scaling: 2.0,
            claim_exponent: -3.0,
            weights: ClaimWeights::default(),
        }
    }
}

/// Everything the scorer learned about one layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub score: f64,
    /// Per-player claimed value, player 1 first. Resources only under
    /// `Separate`. Empty when a gate rejected the layout.
    pub totals: Vec<f64>,
    /// Per-player claimed influence; filled only under `Separate`.
    pub influence: Vec<f64>,
    pub rejection: Option<GateRejection>,
}

impl ScoreBreakdown {
    fn rejected(rejection: GateRejection) -> Self {
        ScoreBreakdown {
            score: 0.0,
            totals: Vec::new(),
            influence: Vec::new(),
            rejection: Some(rejection),
        }
    }

    #[inline]
    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }
}

/// `(min / max) ^ scaling`, or 0.0 when nobody holds any value.
pub fn fairness_ratio(totals: &[f64], scaling: f64) -> f64 {
    let min = totals.iter().copied().fold(f64::INFINITY, f64::min);
    let max = totals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if totals.is_empty() || max <= 0.0 {
        return 0.0;
    }
    (min / max).powf(scaling)
}

/// Scores a layout and reports the per-player totals behind the score.
pub fn evaluate(galaxy: &Galaxy, config: &ScoreConfig) -> Result<ScoreBreakdown, GalaxyError> {
    let method = config.resource_value_method;
    let policy = config.contest_policy;
    if !method.supports(policy) {
        return Err(GalaxyError::UnsupportedValueMethod { method, policy });
    }

    if let Err(rejection) = check_layout(galaxy, config) {
        return Ok(ScoreBreakdown::rejected(rejection));
    }

    let distances = compute_distance_claims(galaxy, &config.weights);
    let strength = compute_strength_claims(galaxy, &distances, policy, config.claim_exponent)?;

    let players = galaxy.players();
    let ratio = config.resource_influence_ratio;
    let separate = method == ResourceValueMethod::Separate;
    let mut totals = vec![0.0; players];
    let mut influence = if separate { vec![0.0; players] } else { Vec::new() };

    for idx in strength.assigned_tiles() {
        let tile = galaxy.tile_at(idx);
        let value = method.tile_value(tile, ratio);
        for (player, share) in strength.for_tile(idx) {
            let p = player as usize - 1;
            totals[p] += value * share;
            if separate {
                influence[p] += tile.influence() as f64 * share;
            }
        }
    }

    let scaling = config.resource_scaling;
    let score = if separate {
        (fairness_ratio(&totals, scaling) + ratio * fairness_ratio(&influence, scaling)) / (1.0 + ratio)
    } else {
        fairness_ratio(&totals, scaling)
    };

    Ok(ScoreBreakdown {
        score,
        totals,
        influence,
        rejection: None,
    })
}

/// Fairness score in `[0, 1]`.
pub fn score(galaxy: &Galaxy, config: &ScoreConfig) -> Result<f64, GalaxyError> {
    evaluate(galaxy, config).map(|b| b.score)
}

/// Scores `galaxy` and stores the result on it.
pub fn score_galaxy(galaxy: &mut Galaxy, config: &ScoreConfig) -> Result<f64, GalaxyError> {
    let s = score(galaxy, config)?;
    galaxy.score = s;
    Ok(s)
}
