//! Error type shared by the registry and both policies.

use thiserror::Error;

/// Errors surfaced by construction and selection.
///
/// Observation reporting never returns one of these; it reports an
/// [`ObservationStatus`](crate::ObservationStatus) instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BanditError {
    /// Epsilon outside `[0, 1]` (or NaN).
    #[error("epsilon must be in [0, 1], got {0}")]
    InvalidEpsilon(f64),

    /// Two arms were given the same identifier.
    #[error("arm identifiers must be unique: {id:?} appears more than once")]
    DuplicateArm { id: String },

    /// No arm with this identifier is registered.
    #[error("unknown arm {id:?}")]
    UnknownArm { id: String },

    /// Selection was requested from a policy with no arms.
    #[error("cannot select from an empty arm pool")]
    EmptyArmPool,

    /// Prior Beta parameters must be finite and strictly positive.
    #[error("invalid Beta prior (alpha={alpha}, beta={beta})")]
    InvalidPrior { alpha: f64, beta: f64 },

    /// An arm's posterior left the valid Beta parameter domain.
    #[error("arm {arm:?} has an invalid Beta posterior (alpha={alpha}, beta={beta})")]
    InvalidPosterior { arm: String, alpha: f64, beta: f64 },
}

pub type Result<T, E = BanditError> = std::result::Result<T, E>;
