//! Unified `BanditPolicy` trait.
//!
//! [`EpsilonGreedy`](crate::EpsilonGreedy) and
//! [`ThompsonSampling`](crate::ThompsonSampling) keep very different per-arm state,
//! but both expose the same loop: pick an arm, then report what happened. The
//! observation type differs (a real-valued score vs. an integer outcome), so it is an
//! associated type.
//!
//! # Example
//!
//! ```rust
//! use banditry::{BanditPolicy, EpsilonGreedy, ObservationStatus};
//!
//! fn one_round<P: BanditPolicy>(policy: &mut P, outcome: P::Observation) {
//!     let arm = policy.select().unwrap();
//!     assert_eq!(policy.record_observation(&arm, outcome), ObservationStatus::Recorded);
//! }
//!
//! let mut eg = EpsilonGreedy::new(0.3, ["a", "b"]).unwrap();
//! one_round(&mut eg, 4.0);
//! ```

use crate::error::Result;
use crate::Decision;

/// Outcome of reporting an observation.
///
/// Reporting never fails hard; a bad report is ignored and described here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObservationStatus {
    /// The arm's statistics were updated.
    Recorded,
    /// No arm with that identifier; nothing changed.
    UnknownArm,
    /// The value was NaN or infinite; nothing changed.
    NonFinite,
}

impl ObservationStatus {
    pub fn is_recorded(self) -> bool {
        self == ObservationStatus::Recorded
    }
}

/// Common interface for the selection/feedback loop.
pub trait BanditPolicy {
    /// What a caller reports back after serving an arm.
    type Observation;

    /// Choose an arm, with an explanation.
    ///
    /// Must not change any arm statistics; only the random source advances.
    fn decide(&mut self) -> Result<Decision>;

    /// Choose an arm.
    fn select(&mut self) -> Result<String> {
        self.decide().map(|d| d.chosen)
    }

    /// Feed an outcome back for `arm`. The only operation that mutates arm state.
    fn record_observation(&mut self, arm: &str, observation: Self::Observation)
        -> ObservationStatus;
}

impl<R: crate::RandomSource> BanditPolicy for crate::EpsilonGreedy<R> {
    type Observation = f64;

    fn decide(&mut self) -> Result<Decision> {
        self.decide()
    }
    fn record_observation(&mut self, arm: &str, value: f64) -> ObservationStatus {
        self.record_observation(arm, value)
    }
}

impl<R: crate::RandomSource> BanditPolicy for crate::ThompsonSampling<R> {
    type Observation = i64;

    fn decide(&mut self) -> Result<Decision> {
        self.decide()
    }
    fn record_observation(&mut self, arm: &str, observation: i64) -> ObservationStatus {
        self.record_observation(arm, observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{identity_reward, EpsilonGreedy, ThompsonSampling};

    fn arms() -> Vec<String> {
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    }

    fn run_generic<P: BanditPolicy>(p: &mut P, obs: impl Fn() -> P::Observation) {
        for _ in 0..20 {
            let chosen = p.select().unwrap();
            assert!(arms().contains(&chosen));
            assert!(p.record_observation(&chosen, obs()).is_recorded());
        }
    }

    #[test]
    fn epsilon_greedy_implements_bandit_policy() {
        let mut eg = EpsilonGreedy::with_seed(0.5, arms(), 3).unwrap();
        run_generic(&mut eg, || 1.0);
    }

    #[test]
    fn thompson_implements_bandit_policy() {
        let mut ts = ThompsonSampling::with_seed(arms(), identity_reward, 3).unwrap();
        run_generic(&mut ts, || 1);
    }

    #[test]
    fn unknown_arm_is_reported_not_raised() {
        let mut eg = EpsilonGreedy::new(0.5, arms()).unwrap();
        assert_eq!(
            BanditPolicy::record_observation(&mut eg, "zzz", 1.0),
            ObservationStatus::UnknownArm
        );
    }
}
