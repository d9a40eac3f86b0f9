//! One-shot chart computation: chart state, both strength engines and the
//! dasha timeline from a single set of provider values.

use log::debug;
use serde::Serialize;

use crate::bhava_bala::{BhavaBalaResult, bhava_bala_for_chart};
use crate::chart::{BirthMoment, ChartState, RawPositions, build_chart_state};
use crate::dasha::{VimshottariDasha, vimshottari_dasha};
use crate::error::KundaliError;
use crate::shadbala::{ShadbalaResult, shadbala_for_chart};

/// Everything computed for one birth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartResult {
    pub chart: ChartState,
    pub shadbala: ShadbalaResult,
    pub bhava_bala: BhavaBalaResult,
    pub dasha: VimshottariDasha,
}

/// Build the chart and run every engine over it.
///
/// Fails as a whole: a bad provider value or a broken dasha invariant
/// yields no partial result.
pub fn compute_chart(
    raw: &RawPositions,
    ascendant_tropical: f64,
    ayanamsha: f64,
    moment: BirthMoment,
) -> Result<ChartResult, KundaliError> {
    let chart = build_chart_state(raw, ascendant_tropical, ayanamsha, moment)?;
    let shadbala = shadbala_for_chart(&chart);
    let bhava_bala = bhava_bala_for_chart(&chart, &shadbala);
    let dasha = vimshottari_dasha(chart.moon().sidereal_lon, moment.jd_ut)?;
    debug!(
        "chart computed: shadbala={:.3} rupas, bhava={:.3} rupas",
        shadbala.total_rupas(),
        bhava_bala.total_rupas()
    );
    Ok(ChartResult {
        chart,
        shadbala,
        bhava_bala,
        dasha,
    })
}
