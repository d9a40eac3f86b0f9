//! Kundali orchestration over an injected ephemeris provider.
//!
//! This crate provides:
//! - The [`EphemerisProvider`] seam and its error type
//! - Birth input validation and civil-time to Julian-day conversion
//! - Full chart and two-chart compatibility from birth data
//! - Parallel Shadbala/Bhava Bala range scans
//! - [`SampledEphemeris`], a provider over a JSON sample table

pub mod birth;
pub mod error;
pub mod kundali;
pub mod provider;
pub mod sampled;
pub mod scan;

pub use birth::{BirthInput, GeoLocation, jd_from_utc, local_from_jd, utc_from_jd};
pub use error::{ProviderError, TableError};
pub use kundali::{CompatibilityResult, compatibility_for_births, kundali_for_birth};
pub use provider::{EphemerisProvider, ProviderSnapshot, raw_positions, snapshot};
pub use sampled::{EphemerisSample, SampledBody, SampledEphemeris};
pub use scan::{
    BalaSample, MAX_SCAN_INSTANTS, ScanConfig, ScanReport, ScanStep, bala_range_scan,
    best_instant,
};
