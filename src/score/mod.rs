//! Layout gates and fairness scoring.

pub mod fairness;
pub mod validate;

pub use fairness::{
    evaluate, fairness_ratio, score, score_galaxy, ResourceValueMethod, ScoreBreakdown, ScoreConfig,
};
pub use validate::{check_anomalies, check_layout, check_wormholes, GateRejection};
