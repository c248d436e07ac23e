//! The crucible: repeated generate-and-score search for a fair galaxy.
//!
//! A `Crucible` owns a shared random sequence, a worker pool, and the running
//! best galaxy, which is generated and scored on construction. Each `search`
//! call runs one batch of independent iterations (generate a galaxy, score
//! it, offer it as the new best) either on the pool or on the calling thread.
//! The best galaxy and its score live together behind one mutex, so the
//! compare-and-replace is a single critical section and a published galaxy
//! is never mutated again.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::board::Galaxy;
use crate::config::CrucibleConfig;
use crate::error::{CrucibleError, GalaxyError};
use crate::random::RandomSequence;
use crate::score::{evaluate, ScoreConfig};

#[derive(Debug, Clone)]
struct Best {
    galaxy: Arc<Galaxy>,
    score: f64,
}

/// Result of a single iteration.
#[derive(Debug)]
enum Outcome {
    Scored { score: f64, improved: bool },
    Rejected,
    Failed(GalaxyError),
}

/// Summary of one `search` call.
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Best galaxy after the batch (possibly from an earlier batch).
    pub best: Arc<Galaxy>,
    pub best_score: f64,
    /// Iterations that produced a score, including gate rejections.
    pub evaluated: usize,
    /// Iterations rejected by a layout gate (scored 0.0).
    pub rejected: usize,
    /// Iterations that replaced the running best.
    pub improvements: usize,
    /// Iterations that failed with an error.
    pub failures: Vec<GalaxyError>,
    /// Highest score seen in this batch, if any iteration produced one.
    pub max_iteration_score: Option<f64>,
    pub elapsed: Duration,
}

/// Process-lifetime search state.
pub struct Crucible {
    radius: usize,
    players: usize,
    score: ScoreConfig,
    random: RandomSequence,
    pool: rayon::ThreadPool,
    best: Mutex<Best>,
}

impl Crucible {
    /// Validates `config`, builds the worker pool, and generates the initial
    /// best galaxy.
    ///
    /// Fails if the initial galaxy cannot be generated or scored, which
    /// means every later iteration would fail the same way.
    pub fn new(config: &CrucibleConfig) -> Result<Self, CrucibleError> {
        config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("crucible-{}", i))
            .build()?;
        let random = RandomSequence::from_config_seed(config.seed);

        let mut galaxy = Galaxy::generate(config.radius, config.players, &random)?;
        let score = evaluate(&galaxy, &config.score)?.score;
        galaxy.score = score;
        debug!(target: "galaxy_crucible::crucible", score, "initial galaxy");

        Ok(Crucible {
            radius: config.radius,
            players: config.players,
            score: config.score.clone(),
            random,
            pool,
            best: Mutex::new(Best {
                galaxy: Arc::new(galaxy),
                score,
            }),
        })
    }

    /// The running best galaxy and its score.
    pub fn best(&self) -> (Arc<Galaxy>, f64) {
        let best = self.lock_best();
        (Arc::clone(&best.galaxy), best.score)
    }

    pub fn best_score(&self) -> f64 {
        self.lock_best().score
    }

    pub fn score_config(&self) -> &ScoreConfig {
        &self.score
    }

    /// Runs `batch` iterations and returns the running best.
    ///
    /// Errors from individual iterations are collected in the report and
    /// never touch the running best.
    pub fn search(&self, batch: usize, parallel: bool) -> SearchReport {
        let start = Instant::now();

        let outcomes: Vec<Outcome> = if parallel {
            self.pool
                .install(|| (0..batch).into_par_iter().map(|_| self.iterate()).collect())
        } else {
            (0..batch).map(|_| self.iterate()).collect()
        };

        let mut evaluated = 0;
        let mut rejected = 0;
        let mut improvements = 0;
        let mut failures = Vec::new();
        let mut max_iteration_score: Option<f64> = None;
        for outcome in outcomes {
            let score = match outcome {
                Outcome::Scored { score, improved } => {
                    improvements += improved as usize;
                    score
                }
                Outcome::Rejected => {
                    rejected += 1;
                    0.0
                }
                Outcome::Failed(err) => {
                    failures.push(err);
                    continue;
                }
            };
            evaluated += 1;
            max_iteration_score = Some(max_iteration_score.map_or(score, |m| m.max(score)));
        }

        let (best, best_score) = self.best();

        let elapsed = start.elapsed();
        info!(
            target: "galaxy_crucible::crucible",
            batch,
            parallel,
            evaluated,
            rejected,
            improvements,
            failures = failures.len(),
            best_score,
            elapsed_ms = elapsed.as_millis() as u64,
            "batch complete"
        );

        SearchReport {
            best,
            best_score,
            evaluated,
            rejected,
            improvements,
            failures,
            max_iteration_score,
            elapsed,
        }
    }

    fn lock_best(&self) -> MutexGuard<'_, Best> {
        // Best is replaced as a whole; a poisoned lock still holds a
        // consistent pair.
        self.best.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn iterate(&self) -> Outcome {
        let mut galaxy = match Galaxy::generate(self.radius, self.players, &self.random) {
            Ok(g) => g,
            Err(err) => return self.fail(err),
        };
        let breakdown = match evaluate(&galaxy, &self.score) {
            Ok(b) => b,
            Err(err) => return self.fail(err),
        };
        if breakdown.is_rejected() {
            return Outcome::Rejected;
        }
        let score = breakdown.score;
        galaxy.score = score;
        let improved = self.offer(galaxy);
        Outcome::Scored { score, improved }
    }

    fn fail(&self, err: GalaxyError) -> Outcome {
        warn!(target: "galaxy_crucible::crucible", error = %err, "iteration failed");
        Outcome::Failed(err)
    }

    /// Installs `galaxy` as the best if it beats the current one.
    fn offer(&self, galaxy: Galaxy) -> bool {
        let score = galaxy.score;
        let mut best = self.lock_best();
        if score <= best.score {
            return false;
        }
        let previous = best.score;
        *best = Best {
            galaxy: Arc::new(galaxy),
            score,
        };
        drop(best);
        info!(target: "galaxy_crucible::crucible", score, previous, "new best galaxy");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::ContestPolicy;
    use crate::score::ResourceValueMethod;

    fn config(seed: u64) -> CrucibleConfig {
        CrucibleConfig {
            seed,
            threads: 2,
            ..CrucibleConfig::default()
        }
    }

    #[test]
    fn new_crucible_holds_a_scored_galaxy() {
        let c = Crucible::new(&config(11)).unwrap();
        let (galaxy, score) = c.best();
        assert_eq!(galaxy.score, score);
        assert!((0.0..=1.0).contains(&score));

        let report = c.search(0, false);
        assert_eq!(report.evaluated, 0);
        assert_eq!(report.max_iteration_score, None);
        assert_eq!(report.best_score, score);
    }

    #[test]
    fn best_score_never_decreases() {
        let c = Crucible::new(&config(12)).unwrap();
        let mut last = c.best_score();
        for parallel in [false, true, false, true] {
            let report = c.search(25, parallel);
            assert!(report.best_score >= last);
            last = report.best_score;
        }
    }

    #[test]
    fn best_beats_every_iteration() {
        for parallel in [false, true] {
            let c = Crucible::new(&config(13)).unwrap();
            let report = c.search(60, parallel);
            assert_eq!(report.evaluated, 60);
            assert!(report.failures.is_empty());
            let max = report.max_iteration_score.unwrap();
            assert!(report.best_score >= max);
            assert!(report.rejected <= report.evaluated);
        }
    }

    #[test]
    fn best_galaxy_carries_its_score() {
        let c = Crucible::new(&config(14)).unwrap();
        let report = c.search(40, true);
        assert_eq!(report.best.score, report.best_score);
        assert_eq!(c.best_score(), report.best_score);
    }

    #[test]
    fn failed_iterations_leave_best_untouched() {
        let mut c = Crucible::new(&config(17)).unwrap();
        let (before, before_score) = c.best();
        c.score.contest_policy = ContestPolicy::ClaimSize;
        c.score.resource_value_method = ResourceValueMethod::Separate;

        for parallel in [true, false] {
            let report = c.search(10, parallel);
            assert_eq!(report.failures.len(), 10, "parallel={}", parallel);
            assert!(report
                .failures
                .iter()
                .all(|e| matches!(e, GalaxyError::UnsupportedValueMethod { .. })));
            assert_eq!(report.evaluated, 0);
            assert_eq!(report.improvements, 0);
            assert_eq!(report.max_iteration_score, None);
            assert_eq!(report.best_score, before_score);
            assert!(Arc::ptr_eq(&report.best, &before));
        }
        let (after, after_score) = c.best();
        assert!(Arc::ptr_eq(&after, &before));
        assert_eq!(after_score, before_score);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let bad = CrucibleConfig {
            threads: 0,
            ..CrucibleConfig::default()
        };
        assert!(matches!(Crucible::new(&bad), Err(CrucibleError::Config(_))));
    }

    #[test]
    fn unsupported_player_count_surfaces() {
        let result = Crucible::new(&CrucibleConfig {
            players: 4,
            ..config(15)
        });
        assert!(matches!(
            result,
            Err(CrucibleError::Galaxy(GalaxyError::UnsupportedPlayerCount(4)))
        ));
    }

    #[test]
    fn unsupported_value_method_surfaces() {
        let mut cfg = config(16);
        cfg.score.contest_policy = ContestPolicy::ClaimSize;
        cfg.score.resource_value_method = ResourceValueMethod::Separate;
        assert!(matches!(
            Crucible::new(&cfg),
            Err(CrucibleError::Galaxy(GalaxyError::UnsupportedValueMethod { .. }))
        ));
    }
}
