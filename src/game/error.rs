//! Errors shared by the game components.

use thiserror::Error;

use crate::store::StoreError;

/// Errors from the proposal, bet, dare and outcome components.
#[derive(Debug, Error)]
pub enum GameError {
    /// Entity missing, or the caller is not the one allowed to act on it.
    /// The two cases are reported the same way on purpose.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Request failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An outcome is already recorded for this proposal.
    #[error("outcome already recorded for this proposal")]
    DuplicateOutcome,

    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}
