//! Error types for clustering operations.
//!
//! Every variant is recoverable: the caller reconfigures and retries. Nothing
//! in this crate panics on bad input.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, KMeansError>;

/// Errors that can occur while configuring or running a clustering session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KMeansError {
    /// Cluster count, margin or another parameter is out of range.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Which parameter is wrong and why.
        reason: String,
    },

    /// The operation is not allowed in the controller's current state.
    #[error("Precondition failed: {reason}")]
    PreconditionFailed {
        /// What the controller was missing or refusing.
        reason: String,
    },

    /// An update step produced a non-finite centroid.
    #[error("Degenerate update: centroid {index} is not finite")]
    DegenerateUpdate {
        /// Index of the offending centroid.
        index: usize,
    },

    /// The iteration cap was reached before the centroids settled.
    #[error("Did not converge after {iterations} iterations")]
    DidNotConverge {
        /// Number of passes performed before giving up.
        iterations: usize,
    },
}

impl KMeansError {
    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Create a PreconditionFailed error.
    pub fn precondition_failed(reason: impl Into<String>) -> Self {
        Self::PreconditionFailed {
            reason: reason.into(),
        }
    }

    /// True for errors caused by configuration the caller can fix before retrying.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }
}
