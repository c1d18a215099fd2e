//! Round-driving glue.
//!
//! [`run_rounds`] runs the select -> serve -> report loop against a caller-supplied
//! environment. The environment sees the chosen arm and returns an observation, or
//! `None` to stop (an interactive loop's exit sentinel, an exhausted log, ...).

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::Result;
use crate::BanditPolicy;

/// What happened over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundsSummary {
    /// Rounds that produced an observation.
    pub rounds: u64,
    /// Selections per arm (including a final selection the environment declined).
    pub pulls: BTreeMap<String, u64>,
    /// Observations the policy accepted.
    pub recorded: u64,
    /// Observations the policy ignored (unknown arm, non-finite value).
    pub ignored: u64,
    /// The environment returned `None` before `max_rounds` was reached.
    pub stopped_early: bool,
}

/// Run up to `max_rounds` rounds of `policy` against `env`.
///
/// Selection errors abort the run and are returned as-is.
pub fn run_rounds<P, F>(policy: &mut P, max_rounds: u64, mut env: F) -> Result<RoundsSummary>
where
    P: BanditPolicy,
    F: FnMut(&str) -> Option<P::Observation>,
{
    let mut summary = RoundsSummary::default();
    while summary.rounds < max_rounds {
        let arm = policy.select()?;
        *summary.pulls.entry(arm.clone()).or_insert(0) += 1;

        let Some(observation) = env(&arm) else {
            debug!(arm = %arm, rounds = summary.rounds, "environment stopped the run");
            summary.stopped_early = true;
            break;
        };
        if policy.record_observation(&arm, observation).is_recorded() {
            summary.recorded += 1;
        } else {
            summary.ignored += 1;
        }
        summary.rounds += 1;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{identity_reward, BanditError, EpsilonGreedy, ThompsonSampling};

    #[test]
    fn stops_at_max_rounds() {
        let mut eg = EpsilonGreedy::with_seed(0.5, ["a", "b"], 1).unwrap();
        let s = run_rounds(&mut eg, 25, |_| Some(1.0)).unwrap();
        assert_eq!(s.rounds, 25);
        assert_eq!(s.recorded, 25);
        assert_eq!(s.pulls.values().sum::<u64>(), 25);
        assert!(!s.stopped_early);
        let shown: u64 = eg.arms().iter().map(|a| a.stats.times_shown).sum();
        assert_eq!(shown, 25);
    }

    #[test]
    fn sentinel_stops_early_without_recording() {
        let mut ts = ThompsonSampling::with_seed(["x", "y"], identity_reward, 2).unwrap();
        let mut feed = vec![1, -1, 1].into_iter();
        let s = run_rounds(&mut ts, 100, |_| feed.next()).unwrap();
        assert_eq!(s.rounds, 3);
        assert!(s.stopped_early);
        assert_eq!(s.pulls.values().sum::<u64>(), 4);
        assert_eq!(ts.iterations(), 3);
    }

    #[test]
    fn ignored_observations_are_counted() {
        let mut eg = EpsilonGreedy::with_seed(0.5, ["a"], 1).unwrap();
        let s = run_rounds(&mut eg, 4, |_| Some(f64::NAN)).unwrap();
        assert_eq!(s.recorded, 0);
        assert_eq!(s.ignored, 4);
    }

    #[test]
    fn selection_errors_propagate() {
        let mut eg = EpsilonGreedy::new(0.5, Vec::<String>::new()).unwrap();
        assert_eq!(
            run_rounds(&mut eg, 3, |_| Some(1.0)),
            Err(BanditError::EmptyArmPool)
        );
    }
}
