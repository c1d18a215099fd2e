//! Epsilon-greedy bandit with a randomized tie-break.
//!
//! Each selection draws `r` uniformly from `[0, 1)`:
//! - `r > epsilon`: **explore**, any arm uniformly at random.
//! - `r <= epsilon`: **exploit**, the best averaged score. When several arms share
//!   the best score one of them is drawn uniformly.
//!
//! So `epsilon` is the exploit threshold: `epsilon = 1` always exploits, and
//! `epsilon = 0` explores on every draw except an exact `0.0`.
//!
//! Selection never touches arm statistics. Serving an arm and hearing nothing back
//! must not drag its average down, so `times_shown` moves only in
//! [`EpsilonGreedy::record_observation`].

use tracing::{debug, warn};

use crate::error::{BanditError, Result};
use crate::random::{RandomSource, SeededSource};
use crate::registry::{Arm, ArmRegistry};
use crate::report::{Report, ReportRow};
use crate::{Decision, DecisionNote, DecisionPolicy, ObservationStatus};

/// Configuration for [`EpsilonGreedy::with_config`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpsilonGreedyConfig {
    /// Exploit threshold in `[0, 1]`.
    pub epsilon: f64,
    /// Seed for the internal `SeededSource`.
    pub seed: u64,
}

impl Default for EpsilonGreedyConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.3,
            seed: 0,
        }
    }
}

/// Running score for one arm.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreedyStats {
    pub raw_score: f64,
    pub times_shown: u64,
}

impl GreedyStats {
    /// `raw_score / times_shown`, or `0` for an arm never observed.
    pub fn averaged_score(&self) -> f64 {
        if self.times_shown == 0 {
            0.0
        } else {
            self.raw_score / self.times_shown as f64
        }
    }
}

/// Seedable epsilon-greedy bandit.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<R = SeededSource> {
    epsilon: f64,
    registry: ArmRegistry<GreedyStats>,
    rng: R,
}

impl EpsilonGreedy<SeededSource> {
    /// Create a policy with a fixed seed (0).
    pub fn new<I, T>(epsilon: f64, ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::with_seed(epsilon, ids, 0)
    }

    pub fn with_seed<I, T>(epsilon: f64, ids: I, seed: u64) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::with_source(epsilon, ids, SeededSource::new(seed))
    }

    pub fn with_config<I, T>(cfg: EpsilonGreedyConfig, ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::with_seed(cfg.epsilon, ids, cfg.seed)
    }
}

impl<R: RandomSource> EpsilonGreedy<R> {
    /// Create a policy drawing from `rng`.
    ///
    /// Fails with `InvalidEpsilon` unless `0 <= epsilon <= 1`, and with
    /// `DuplicateArm` if an identifier repeats.
    pub fn with_source<I, T>(epsilon: f64, ids: I, rng: R) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(BanditError::InvalidEpsilon(epsilon));
        }
        let registry = ArmRegistry::new(ids, GreedyStats::default)?;
        Ok(Self {
            epsilon,
            registry,
            rng,
        })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn arms(&self) -> &[Arm<GreedyStats>] {
        self.registry.arms()
    }

    pub fn stats(&self, id: &str) -> Result<GreedyStats> {
        self.registry.get(id).map(|a| a.stats)
    }

    pub fn source(&self) -> &R {
        &self.rng
    }

    /// Select an arm.
    pub fn select(&mut self) -> Result<String> {
        self.decide().map(|d| d.chosen)
    }

    /// Select an arm and explain the branch taken.
    pub fn decide(&mut self) -> Result<Decision> {
        if self.registry.is_empty() {
            return Err(BanditError::EmptyArmPool);
        }

        let draw = self.rng.uniform01();
        if draw > self.epsilon {
            let idx = self.rng.pick_index(self.registry.len());
            let chosen = self.registry.at(idx).id().to_string();
            debug!(arm = %chosen, draw, "exploring");
            return Ok(Decision {
                policy: DecisionPolicy::EpsilonGreedy,
                chosen,
                notes: vec![DecisionNote::Explore { draw }],
            });
        }

        let (best_score, tied) = self.best_plateau();
        let pick = self.rng.pick_index(tied.len());
        let chosen = tied[pick].clone();
        debug!(arm = %chosen, draw, best_score, tied = tied.len(), "exploiting");
        Ok(Decision {
            policy: DecisionPolicy::EpsilonGreedy,
            chosen,
            notes: vec![DecisionNote::Exploit {
                draw,
                best_score,
                tied,
            }],
        })
    }

    /// Arms sharing the best averaged score.
    ///
    /// Sorts descending (stable, so equal scores keep registry order) and walks the
    /// sorted run while each score is `>=` the previous one. The first entry is always
    /// admitted, so the result is never empty for a non-empty registry.
    fn best_plateau(&self) -> (f64, Vec<String>) {
        let mut ranked: Vec<(&str, f64)> = self
            .registry
            .arms()
            .iter()
            .map(|a| (a.id(), a.stats.averaged_score()))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let best = ranked[0].1;
        let mut prev = best;
        let mut tied = vec![ranked[0].0.to_string()];
        for &(id, score) in &ranked[1..] {
            if score >= prev {
                tied.push(id.to_string());
                prev = score;
            } else {
                break;
            }
        }
        (best, tied)
    }

    /// Add `value` to the arm's score and count one more showing.
    ///
    /// Unknown identifiers and non-finite values are logged and ignored.
    pub fn record_observation(&mut self, arm: &str, value: f64) -> ObservationStatus {
        let Ok(entry) = self.registry.get_mut(arm) else {
            warn!(arm, value, "observation for unknown arm ignored");
            return ObservationStatus::UnknownArm;
        };
        if !value.is_finite() {
            warn!(arm, value, "non-finite observation ignored");
            return ObservationStatus::NonFinite;
        }
        entry.stats.raw_score += value;
        entry.stats.times_shown = entry.stats.times_shown.saturating_add(1);
        ObservationStatus::Recorded
    }

    /// Epsilon and every arm's averaged score.
    pub fn report(&self) -> Report {
        Report {
            header: format!("Epsilon: {}", self.epsilon),
            rows: self
                .registry
                .arms()
                .iter()
                .map(|a| ReportRow {
                    id: a.id().to_string(),
                    label: "Performance".to_string(),
                    value: a.stats.averaged_score(),
                })
                .collect(),
        }
    }
}
