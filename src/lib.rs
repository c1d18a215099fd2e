//! `banditry`: seedable epsilon-greedy and Thompson-sampling bandit policies.
//!
//! Designed for the classic serve-and-learn loop: a fixed set of arms (page
//! variants, button colors, image sets — anything you choose between repeatedly),
//! a policy that picks one, and an observation you report back afterwards.
//!
//! **Goals:**
//! - **Deterministic by default**: every policy owns an explicit [`RandomSource`];
//!   default construction uses seed `0`.
//! - **Selection is pure with respect to arm state**: `select` only advances the
//!   random source. [`BanditPolicy::record_observation`] is the only mutation.
//! - **Reporting never fails hard**: a bad report comes back as an
//!   [`ObservationStatus`], not an error.
//!
//! **Policies:**
//! - [`EpsilonGreedy`]: explore when the draw exceeds epsilon, otherwise exploit
//!   the best averaged score with a randomized tie-break.
//! - [`ThompsonSampling`]: inverse-CDF sample from each arm's `Beta(alpha, beta)`
//!   posterior; strict maximum wins, first arm on ties.
//!
//! **Glue:**
//! - [`Decision`] / [`DecisionNote`]: what was chosen and which branch chose it.
//! - [`Report`]: per-arm standing, printable.
//! - [`run_rounds`]: drive a policy against an environment closure.
//!
//! **Non-goals:** contextual features, discounting, regret bounds, persistence.
//!
//! # Example
//!
//! ```rust
//! use banditry::{identity_reward, EpsilonGreedy, ThompsonSampling};
//!
//! let mut eg = EpsilonGreedy::new(0.3, ["dog images", "cat images"]).unwrap();
//! let arm = eg.select().unwrap();
//! eg.record_observation(&arm, 12.0);
//!
//! let mut ts = ThompsonSampling::new(["red", "green"], identity_reward).unwrap();
//! let arm = ts.select().unwrap();
//! ts.record_observation(&arm, 1);
//! assert_eq!(ts.iterations(), 1);
//! ```

mod decision;
pub use decision::*;

mod error;
pub use error::{BanditError, Result};

mod policy;
pub use policy::{BanditPolicy, ObservationStatus};

mod random;
pub use random::*;

mod registry;
pub use registry::{Arm, ArmRegistry};

mod report;
pub use report::{Report, ReportRow};

mod epsilon;
pub use epsilon::*;

mod thompson;
pub use thompson::*;

mod harness;
pub use harness::*;

pub const BANDITRY_VERSION: &str = env!("CARGO_PKG_VERSION");
