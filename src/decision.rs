//! Decision envelope returned by [`BanditPolicy::decide`](crate::BanditPolicy::decide).
//!
//! `select` only hands back the chosen identifier. `decide` makes the same choice
//! (same draws, same result) and also records which branch was taken, so callers
//! can log or replay a decision without re-deriving it.

/// Which policy produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecisionPolicy {
    EpsilonGreedy,
    Thompson,
}

/// Why a particular arm was chosen.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecisionNote {
    /// The explore/exploit draw exceeded epsilon; the arm was picked uniformly.
    Explore { draw: f64 },

    /// Best averaged score won; `tied` lists the plateau the arm was drawn from,
    /// in sorted encounter order.
    Exploit {
        draw: f64,
        best_score: f64,
        tied: Vec<String>,
    },

    /// One posterior sample per arm (construction order); the strict maximum won.
    SampledPosteriorMax { samples: Vec<(String, f64)> },
}

/// A single policy decision.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision {
    pub policy: DecisionPolicy,
    /// The selected arm identifier.
    pub chosen: String,
    pub notes: Vec<DecisionNote>,
}

impl Decision {
    /// True when an epsilon-greedy decision took the explore branch.
    pub fn explored(&self) -> bool {
        self.notes
            .iter()
            .any(|n| matches!(n, DecisionNote::Explore { .. }))
    }
}
