//! Thompson sampling bandit for arm selection.
//!
//! Every arm carries a `Beta(alpha, beta)` posterior, starting at `Beta(10, 10)` so
//! the prior is proper and fairly flat around one half. Selection draws one sample
//! per arm by inverse-CDF sampling (uniform draw, then Beta quantile) and returns the
//! strict maximum; the first arm in registry order wins ties.
//!
//! Observations are integers passed through a caller-supplied reward translator.
//! The update is deliberately asymmetric:
//! - `reward == 1`: `alpha += 1`
//! - anything else: `beta -= reward`
//!
//! A `-1` failure therefore grows `beta` by one, a `0` changes nothing, and a reward
//! of `2` or more shrinks `beta`. Enough of the latter drives `beta` to zero, after
//! which selection fails with [`BanditError::InvalidPosterior`].

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{BanditError, Result};
use crate::random::{RandomSource, SeededSource};
use crate::registry::{Arm, ArmRegistry};
use crate::report::{Report, ReportRow};
use crate::{Decision, DecisionNote, DecisionPolicy, ObservationStatus};

/// Maps a raw observation to the reward fed into the posterior update.
pub type RewardTranslator = Arc<dyn Fn(i64) -> i64 + Send + Sync>;

/// Passes observations through unchanged.
pub fn identity_reward(observation: i64) -> i64 {
    observation
}

/// Configuration for Thompson sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThompsonConfig {
    /// Prior alpha (must be finite and > 0).
    pub alpha0: f64,
    /// Prior beta (must be finite and > 0).
    pub beta0: f64,
    /// Seed for the internal `SeededSource`.
    pub seed: u64,
}

impl Default for ThompsonConfig {
    fn default() -> Self {
        Self {
            alpha0: 10.0,
            beta0: 10.0,
            seed: 0,
        }
    }
}

/// Beta posterior state for one arm.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BetaStats {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaStats {
    pub fn expected_value(&self) -> f64 {
        let denom = self.alpha + self.beta;
        if denom <= 0.0 {
            0.5
        } else {
            self.alpha / denom
        }
    }
}

/// Seedable Thompson-sampling bandit.
#[derive(Clone)]
pub struct ThompsonSampling<R = SeededSource> {
    registry: ArmRegistry<BetaStats>,
    translator: RewardTranslator,
    iterations: u64,
    rng: R,
}

impl<R: fmt::Debug> fmt::Debug for ThompsonSampling<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThompsonSampling")
            .field("registry", &self.registry)
            .field("iterations", &self.iterations)
            .field("rng", &self.rng)
            .finish_non_exhaustive()
    }
}

impl ThompsonSampling<SeededSource> {
    /// Create a bandit with the default `Beta(10, 10)` prior and a fixed seed (0).
    pub fn new<I, T, F>(ids: I, translator: F) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
        F: Fn(i64) -> i64 + Send + Sync + 'static,
    {
        Self::with_config(ThompsonConfig::default(), ids, translator)
    }

    pub fn with_seed<I, T, F>(ids: I, translator: F, seed: u64) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
        F: Fn(i64) -> i64 + Send + Sync + 'static,
    {
        Self::with_config(
            ThompsonConfig {
                seed,
                ..ThompsonConfig::default()
            },
            ids,
            translator,
        )
    }

    pub fn with_config<I, T, F>(cfg: ThompsonConfig, ids: I, translator: F) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
        F: Fn(i64) -> i64 + Send + Sync + 'static,
    {
        Self::with_source(cfg, ids, translator, SeededSource::new(cfg.seed))
    }
}

impl<R: RandomSource> ThompsonSampling<R> {
    /// Create a bandit drawing from `rng`. `cfg.seed` is ignored.
    pub fn with_source<I, T, F>(
        cfg: ThompsonConfig,
        ids: I,
        translator: F,
        rng: R,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
        F: Fn(i64) -> i64 + Send + Sync + 'static,
    {
        let (alpha, beta) = (cfg.alpha0, cfg.beta0);
        if !(alpha.is_finite() && beta.is_finite()) || alpha <= 0.0 || beta <= 0.0 {
            return Err(BanditError::InvalidPrior { alpha, beta });
        }
        let registry = ArmRegistry::new(ids, || BetaStats { alpha, beta })?;
        Ok(Self {
            registry,
            translator: Arc::new(translator),
            iterations: 0,
            rng,
        })
    }

    pub fn arms(&self) -> &[Arm<BetaStats>] {
        self.registry.arms()
    }

    pub fn stats(&self, id: &str) -> Result<BetaStats> {
        self.registry.get(id).map(|a| a.stats)
    }

    /// Number of observations recorded against known arms.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn source(&self) -> &R {
        &self.rng
    }

    /// Select an arm.
    pub fn select(&mut self) -> Result<String> {
        self.decide().map(|d| d.chosen)
    }

    /// Select an arm and return every posterior sample drawn.
    pub fn decide(&mut self) -> Result<Decision> {
        if self.registry.is_empty() {
            return Err(BanditError::EmptyArmPool);
        }

        let mut samples: Vec<(String, f64)> = Vec::with_capacity(self.registry.len());
        let mut best: Option<(usize, f64)> = None;
        for (i, arm) in self.registry.arms().iter().enumerate() {
            let BetaStats { alpha, beta } = arm.stats;
            let u = self.rng.uniform01();
            let x = self.rng.beta_quantile(alpha, beta, u).map_err(|_| {
                BanditError::InvalidPosterior {
                    arm: arm.id().to_string(),
                    alpha,
                    beta,
                }
            })?;
            debug!(arm = arm.id(), alpha, beta, sample = x, "posterior sample");
            if best.map_or(true, |(_, b)| x > b) {
                best = Some((i, x));
            }
            samples.push((arm.id().to_string(), x));
        }

        let (idx, _) = best.ok_or(BanditError::EmptyArmPool)?;
        Ok(Decision {
            policy: DecisionPolicy::Thompson,
            chosen: self.registry.at(idx).id().to_string(),
            notes: vec![DecisionNote::SampledPosteriorMax { samples }],
        })
    }

    /// Translate `observation` into a reward and shift the arm's posterior.
    ///
    /// Unknown identifiers are a no-op and do not count as an iteration.
    pub fn record_observation(&mut self, arm: &str, observation: i64) -> ObservationStatus {
        let Ok(entry) = self.registry.get_mut(arm) else {
            debug!(arm, observation, "observation for unknown arm ignored");
            return ObservationStatus::UnknownArm;
        };
        let reward = (self.translator)(observation);
        if reward == 1 {
            entry.stats.alpha += 1.0;
        } else {
            entry.stats.beta -= reward as f64;
        }
        self.iterations += 1;
        debug!(arm, observation, reward, "posterior updated");
        ObservationStatus::Recorded
    }

    /// Iteration count and each arm's posterior mean.
    pub fn report(&self) -> Report {
        Report {
            header: format!("Iterations: {}", self.iterations),
            rows: self
                .registry
                .arms()
                .iter()
                .map(|a| ReportRow {
                    id: a.id().to_string(),
                    label: "Posterior mean".to_string(),
                    value: a.stats.expected_value(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedSource;

    fn buttons() -> Vec<&'static str> {
        vec!["red button", "yellow button", "green button"]
    }

    #[test]
    fn arms_start_at_ten_ten() {
        let ts = ThompsonSampling::new(buttons(), identity_reward).unwrap();
        for a in ts.arms() {
            assert_eq!(a.stats, BetaStats { alpha: 10.0, beta: 10.0 });
        }
        assert_eq!(ts.iterations(), 0);
    }

    #[test]
    fn rejects_duplicates_and_bad_priors() {
        let err = ThompsonSampling::new(["x", "x"], identity_reward).unwrap_err();
        assert_eq!(err, BanditError::DuplicateArm { id: "x".into() });

        let cfg = ThompsonConfig {
            alpha0: 0.0,
            ..ThompsonConfig::default()
        };
        let err = ThompsonSampling::with_config(cfg, ["x"], identity_reward).unwrap_err();
        assert!(matches!(err, BanditError::InvalidPrior { .. }));
    }

    #[test]
    fn empty_pool_cannot_select() {
        let mut ts = ThompsonSampling::new(Vec::<String>::new(), identity_reward).unwrap();
        assert_eq!(ts.select(), Err(BanditError::EmptyArmPool));
    }

    #[test]
    fn reward_of_one_increments_alpha_only() {
        let mut ts = ThompsonSampling::new(["a"], identity_reward).unwrap();
        assert!(ts.record_observation("a", 1).is_recorded());
        assert_eq!(ts.stats("a").unwrap(), BetaStats { alpha: 11.0, beta: 10.0 });
        assert_eq!(ts.iterations(), 1);
    }

    #[test]
    fn reward_of_zero_leaves_posterior_alone() {
        let mut ts = ThompsonSampling::new(["a"], identity_reward).unwrap();
        ts.record_observation("a", 0);
        assert_eq!(ts.stats("a").unwrap(), BetaStats { alpha: 10.0, beta: 10.0 });
        assert_eq!(ts.iterations(), 1);
    }

    #[test]
    fn reward_of_minus_one_increments_beta() {
        let mut ts = ThompsonSampling::new(["a"], identity_reward).unwrap();
        ts.record_observation("a", -1);
        assert_eq!(ts.stats("a").unwrap(), BetaStats { alpha: 10.0, beta: 11.0 });
    }

    // Documented asymmetry: any reward other than exactly 1 is subtracted from beta.
    #[test]
    fn rewards_above_one_shrink_beta() {
        let mut ts = ThompsonSampling::new(["a"], identity_reward).unwrap();
        ts.record_observation("a", 3);
        assert_eq!(ts.stats("a").unwrap(), BetaStats { alpha: 10.0, beta: 7.0 });
    }

    #[test]
    fn translator_sits_between_observation_and_update() {
        let clicks = |seconds: i64| if seconds >= 30 { 1 } else { -1 };
        let mut ts = ThompsonSampling::new(["a"], clicks).unwrap();
        ts.record_observation("a", 45);
        ts.record_observation("a", 2);
        assert_eq!(ts.stats("a").unwrap(), BetaStats { alpha: 11.0, beta: 11.0 });
    }

    #[test]
    fn unknown_arm_is_a_noop() {
        let mut ts = ThompsonSampling::new(["a"], identity_reward).unwrap();
        let before = ts.arms().to_vec();
        assert_eq!(ts.record_observation("b", 1), ObservationStatus::UnknownArm);
        assert_eq!(ts.arms(), before.as_slice());
        assert_eq!(ts.iterations(), 0);
    }

    #[test]
    fn equal_samples_pick_first_arm() {
        let src = ScriptedSource::new(vec![0.5]).with_fixed_quantile(0.42);
        let mut ts =
            ThompsonSampling::with_source(ThompsonConfig::default(), ["X", "Y"], identity_reward, src)
                .unwrap();
        for _ in 0..10 {
            assert_eq!(ts.select().unwrap(), "X");
        }
    }

    #[test]
    fn one_uniform_draw_per_arm() {
        let src = ScriptedSource::new(vec![0.1, 0.9, 0.5]);
        let mut ts =
            ThompsonSampling::with_source(ThompsonConfig::default(), buttons(), identity_reward, src)
                .unwrap();
        let d = ts.decide().unwrap();
        assert_eq!(ts.source().draws(), 3);
        // Identical priors: the largest uniform maps to the largest sample.
        assert_eq!(d.chosen, "yellow button");
        match &d.notes[0] {
            DecisionNote::SampledPosteriorMax { samples } => {
                assert_eq!(samples.len(), 3);
                assert!(samples[1].1 > samples[2].1 && samples[2].1 > samples[0].1);
            }
            other => panic!("unexpected note {other:?}"),
        }
    }

    #[test]
    fn collapsed_posterior_fails_selection() {
        let mut ts = ThompsonSampling::new(["a", "b"], identity_reward).unwrap();
        ts.record_observation("b", 10);
        assert_eq!(ts.stats("b").unwrap().beta, 0.0);
        let err = ts.select().unwrap_err();
        assert_eq!(
            err,
            BanditError::InvalidPosterior {
                arm: "b".into(),
                alpha: 10.0,
                beta: 0.0
            }
        );
    }

    #[test]
    fn selection_leaves_posteriors_untouched() {
        let mut ts = ThompsonSampling::with_seed(buttons(), identity_reward, 17).unwrap();
        ts.record_observation("green button", 1);
        ts.record_observation("red button", -1);
        let before = ts.arms().to_vec();
        for _ in 0..100 {
            ts.select().unwrap();
        }
        assert_eq!(ts.arms(), before.as_slice());
        assert_eq!(ts.iterations(), 2);
    }

    #[test]
    fn same_seed_same_choices() {
        let mut t1 = ThompsonSampling::with_seed(buttons(), identity_reward, 42).unwrap();
        let mut t2 = ThompsonSampling::with_seed(buttons(), identity_reward, 42).unwrap();
        for _ in 0..50 {
            let a = t1.select().unwrap();
            let b = t2.select().unwrap();
            assert_eq!(a, b);
            t1.record_observation(&a, 1);
            t2.record_observation(&b, 1);
        }
    }

    #[test]
    fn strong_posterior_dominates() {
        let mut ts = ThompsonSampling::with_seed(["good", "bad"], identity_reward, 8).unwrap();
        for _ in 0..60 {
            ts.record_observation("good", 1);
            ts.record_observation("bad", -1);
        }
        for _ in 0..100 {
            assert_eq!(ts.select().unwrap(), "good");
        }
    }

    #[test]
    fn report_shows_posterior_means() {
        let mut ts = ThompsonSampling::new(["a", "b"], identity_reward).unwrap();
        ts.record_observation("a", -1);
        let r = ts.report();
        assert_eq!(r.header, "Iterations: 1");
        assert_eq!(r.rows[0].value, 10.0 / 21.0);
        assert_eq!(r.rows[1].value, 0.5);
    }
}
