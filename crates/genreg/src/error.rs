use thiserror::Error;

use crate::adjacency::StoreError;

/// Terminal outcomes of a single construction run.
#[derive(Debug, Error)]
pub enum GenRegError {
    /// The pre-check ruled the parameters out; no search was attempted.
    #[error("infeasible parameters n={n} k={k} g={g}: {reason}")]
    InfeasibleParameters {
        n: usize,
        k: usize,
        g: usize,
        reason: String,
    },
    /// Backtracking emptied the stack: no graph along this construction order.
    #[error("search exhausted for n={n} k={k} g={g}: no graph reachable in cycle order")]
    SearchExhausted { n: usize, k: usize, g: usize },
    /// Resuming from saved intermediate state is not implemented.
    #[error("resuming a search from saved state is not supported")]
    UnsupportedResume,
    #[error("invalid seed graph: {reason}")]
    InvalidSeed { reason: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GenRegError {
    pub(crate) fn invalid_seed(reason: impl Into<String>) -> Self {
        Self::InvalidSeed {
            reason: reason.into(),
        }
    }

    /// Exhaustion is an expected outcome for hard parameters, not a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SearchExhausted { .. })
    }
}
