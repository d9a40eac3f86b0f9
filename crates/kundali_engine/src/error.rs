//! Errors raised by ephemeris providers and table loading.

use kundali_base::KundaliError;
use thiserror::Error;

/// Why a provider could not answer a query.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ProviderError {
    /// No stored value for this body at this instant.
    #[error("no sample for {body} at JD {jd_ut}")]
    NoSample { body: String, jd_ut: f64 },
    /// The instant falls outside the provider's data coverage.
    #[error("{body} at JD {jd_ut} outside coverage [{start}, {end}]")]
    OutOfCoverage {
        body: String,
        jd_ut: f64,
        start: f64,
        end: f64,
    },
    /// Any other backend failure.
    #[error("{body} at JD {jd_ut}: {reason}")]
    Backend {
        body: String,
        jd_ut: f64,
        reason: String,
    },
}

/// Failure loading a sampled ephemeris table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("cannot read ephemeris table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed ephemeris table: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid ephemeris table: {0}")]
    Invalid(String),
}

impl ProviderError {
    pub fn body(&self) -> &str {
        match self {
            Self::NoSample { body, .. }
            | Self::OutOfCoverage { body, .. }
            | Self::Backend { body, .. } => body,
        }
    }

    pub fn jd_ut(&self) -> f64 {
        match self {
            Self::NoSample { jd_ut, .. }
            | Self::OutOfCoverage { jd_ut, .. }
            | Self::Backend { jd_ut, .. } => *jd_ut,
        }
    }

    /// Cause without the body/instant prefix.
    pub fn reason(&self) -> String {
        match self {
            Self::NoSample { .. } => "no sample".to_string(),
            Self::OutOfCoverage { start, end, .. } => {
                format!("outside coverage [{start}, {end}]")
            }
            Self::Backend { reason, .. } => reason.clone(),
        }
    }
}

impl From<ProviderError> for KundaliError {
    fn from(e: ProviderError) -> Self {
        KundaliError::EphemerisFailure {
            body: e.body().to_string(),
            jd_ut: e.jd_ut(),
            reason: e.reason(),
        }
    }
}
