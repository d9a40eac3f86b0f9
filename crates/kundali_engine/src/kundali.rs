//! Birth-to-chart orchestration over an [`EphemerisProvider`].

use kundali_base::{AshtakootaResult, ChartResult, KundaliError, compute_chart, compute_compatibility};
use log::debug;
use serde::Serialize;

use crate::birth::BirthInput;
use crate::provider::{EphemerisProvider, snapshot};

/// Validate a birth, query the provider and compute the full chart.
///
/// Any provider failure fails the whole chart.
pub fn kundali_for_birth<P: EphemerisProvider + ?Sized>(
    provider: &P,
    birth: &BirthInput,
) -> Result<ChartResult, KundaliError> {
    let moment = birth.birth_moment()?;
    let snap = snapshot(
        provider,
        moment.jd_ut,
        birth.location.latitude_deg,
        birth.location.longitude_deg,
        birth.ayanamsha,
    )?;
    debug!(
        "kundali for {}-{:02}-{:02} {:02}:{:02}:{:02} (UTC{:+}) -> JD {:.6}",
        birth.year,
        birth.month,
        birth.day,
        birth.hour,
        birth.minute,
        birth.second,
        birth.utc_offset_hours,
        moment.jd_ut
    );
    compute_chart(&snap.positions, snap.ascendant_tropical, snap.ayanamsha, moment)
}

/// Both charts and their Ashtakoota score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityResult {
    pub first: ChartResult,
    pub second: ChartResult,
    pub score: AshtakootaResult,
}

/// Compute both births and match their Moons.
pub fn compatibility_for_births<P: EphemerisProvider + ?Sized>(
    provider: &P,
    first: &BirthInput,
    second: &BirthInput,
) -> Result<CompatibilityResult, KundaliError> {
    let a = kundali_for_birth(provider, first)?;
    let b = kundali_for_birth(provider, second)?;
    let score = compute_compatibility(&a.chart, &b.chart);
    debug!("ashtakoota total {:.1}/{:.0}", score.total, score.max_total);
    Ok(CompatibilityResult {
        first: a,
        second: b,
        score,
    })
}
