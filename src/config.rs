//! Crucible configuration.
//!
//! Loaded from JSON. Every field has a default, so a partial file (or `{}`)
//! is a valid configuration. Command-line flags override file values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::score::ScoreConfig;

/// Configuration for a search run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrucibleConfig {
    /// Galaxy radius in rings around the center.
    pub radius: usize,
    /// Number of players. Only 6 has a home-system layout.
    pub players: usize,
    /// Galaxies generated per `search` call.
    pub batch_size: usize,
    /// Number of `search` calls the CLI makes.
    pub batches: usize,
    /// Score iterations on the worker pool.
    pub parallel: bool,
    /// Worker threads for parallel search.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    pub score: ScoreConfig,
}

impl Default for CrucibleConfig {
    fn default() -> Self {
        CrucibleConfig {
            radius: 3,
            players: 6,
            batch_size: 1000,
            batches: 1,
            parallel: true,
            threads: 4,
            seed: 0,
            score: ScoreConfig::default(),
        }
    }
}

impl CrucibleConfig {
    /// Rejects settings that could never produce a scored galaxy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radius == 0 {
            return Err(ConfigError::Invalid("radius must be at least 1".into()));
        }
        if self.threads == 0 {
            return Err(ConfigError::Invalid("threads must be at least 1".into()));
        }
        if !self.score.weights.all_positive() {
            return Err(ConfigError::Invalid("claim weights must all be positive".into()));
        }
        if !(self.score.claim_exponent < 0.0) {
            return Err(ConfigError::Invalid(format!(
                "claim_exponent must be negative, got {}",
                self.score.claim_exponent
            )));
        }
        let scaling = self.score.resource_scaling;
        if !(scaling.is_finite() && scaling > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "resource_scaling must be positive, got {}",
                scaling
            )));
        }
        let ratio = self.score.resource_influence_ratio;
        if !(ratio.is_finite() && ratio >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "resource_influence_ratio must be non-negative, got {}",
                ratio
            )));
        }
        Ok(())
    }
}

/// Parses a configuration from JSON text and validates it.
pub fn load_config_from_str(json: &str) -> Result<CrucibleConfig, ConfigError> {
    let config: CrucibleConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Reads and validates a JSON configuration file.
pub fn load_config(path: &Path) -> Result<CrucibleConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::ContestPolicy;
    use crate::score::ResourceValueMethod;

    #[test]
    fn empty_object_is_default() {
        let c = load_config_from_str("{}").unwrap();
        assert_eq!(c, CrucibleConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let c = load_config_from_str(
            r#"{
                "batch_size": 50,
                "seed": 7,
                "score": {
                    "contest_policy": "TopAndClose",
                    "resource_value_method": "DirectSum",
                    "weights": { "nova": 250 }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(c.batch_size, 50);
        assert_eq!(c.seed, 7);
        assert_eq!(c.radius, 3);
        assert_eq!(c.score.contest_policy, ContestPolicy::TopAndClose);
        assert_eq!(c.score.resource_value_method, ResourceValueMethod::DirectSum);
        assert_eq!(c.score.weights.nova, 250);
        assert_eq!(c.score.weights.walk, 10);
        assert_eq!(c.score.hole_count, 2);
    }

    #[test]
    fn rejects_bad_values() {
        for json in [
            r#"{"threads": 0}"#,
            r#"{"radius": 0}"#,
            r#"{"score": {"weights": {"walk": 0}}}"#,
            r#"{"score": {"claim_exponent": 1.5}}"#,
            r#"{"score": {"resource_scaling": -2.0}}"#,
            r#"{"score": {"resource_scaling": 0.0}}"#,
            r#"{"score": {"resource_influence_ratio": -1.0}}"#,
        ] {
            assert!(
                matches!(load_config_from_str(json), Err(ConfigError::Invalid(_))),
                "{}",
                json
            );
        }
    }

    #[test]
    fn accepts_zero_influence_ratio() {
        let c = load_config_from_str(r#"{"score": {"resource_influence_ratio": 0.0}}"#).unwrap();
        assert_eq!(c.score.resource_influence_ratio, 0.0);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            load_config_from_str("{\"radius\": "),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            load_config_from_str(r#"{"score": {"contest_policy": "Nearest"}}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/galaxy-crucible.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/galaxy-crucible.json"));
    }
}
