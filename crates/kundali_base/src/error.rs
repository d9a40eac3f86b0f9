//! Error types for chart construction and scoring.

use thiserror::Error;

/// Errors from kundali calculations.
///
/// A chart either builds completely or fails with one of these; no partial
/// chart is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum KundaliError {
    /// Birth parameters or provider values outside their valid range.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The ephemeris provider could not resolve a body at the instant.
    #[error("ephemeris failure for {body} at JD {jd_ut}: {reason}")]
    EphemerisFailure {
        body: String,
        jd_ut: f64,
        reason: String,
    },
    /// An internal formula broke one of its own invariants.
    #[error("computation invariant violated: {0}")]
    ComputationInvariant(String),
}

impl KundaliError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::ComputationInvariant(msg.into())
    }
}
