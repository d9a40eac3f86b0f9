//! Bala range scan: Shadbala and Bhava Bala over a span of dates.
//!
//! Instants are independent, so they are fanned out over the rayon pool.
//! Output keeps input order. An instant the provider cannot resolve is
//! logged and skipped; the scan itself only fails on a bad configuration.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use kundali_base::{ALL_GRAHAS, AyanamshaSystem, ChartResult, KundaliError};
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::birth::{BirthInput, GeoLocation};
use crate::kundali::kundali_for_birth;
use crate::provider::EphemerisProvider;

/// Upper bound on instants in one scan.
pub const MAX_SCAN_INSTANTS: usize = 500_000;

/// Sampling cadence of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStep {
    /// Every local hour, 00:00 to 23:00.
    Hourly,
    /// Local noon of each day.
    #[default]
    Daily,
}

impl ScanStep {
    pub const fn instants_per_day(self) -> usize {
        match self {
            Self::Hourly => 24,
            Self::Daily => 1,
        }
    }
}

/// Range scan configuration. `start` and `end` are local dates, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub step: ScanStep,
    pub location: GeoLocation,
    pub utc_offset_hours: f64,
    #[serde(default)]
    pub ayanamsha: AyanamshaSystem,
}

impl ScanConfig {
    pub fn day_count(&self) -> usize {
        usize::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }

    /// Every birth the scan will compute, in chronological order.
    pub fn births(&self) -> Result<Vec<BirthInput>, KundaliError> {
        if self.end < self.start {
            return Err(KundaliError::invalid(format!(
                "scan end {} before start {}",
                self.end, self.start
            )));
        }
        let total = self.day_count() * self.step.instants_per_day();
        if total > MAX_SCAN_INSTANTS {
            return Err(KundaliError::invalid(format!(
                "scan covers {total} instants, limit is {MAX_SCAN_INSTANTS}"
            )));
        }

        let mut births = Vec::with_capacity(total);
        for date in self.start.iter_days().take(self.day_count()) {
            let midnight = date.and_time(NaiveTime::MIN);
            match self.step {
                ScanStep::Hourly => {
                    for h in 0..24 {
                        births.push(self.birth_at(midnight + TimeDelta::hours(h)));
                    }
                }
                ScanStep::Daily => births.push(self.birth_at(midnight + TimeDelta::hours(12))),
            }
        }
        if let Some(first) = births.first() {
            first.validate()?;
        }
        Ok(births)
    }

    fn birth_at(&self, local: NaiveDateTime) -> BirthInput {
        BirthInput::from_local(local, self.utc_offset_hours, self.location, self.ayanamsha)
    }
}

/// Strength summary of one scanned instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalaSample {
    pub local: NaiveDateTime,
    pub jd_ut: f64,
    pub lagna_sign: u8,
    /// Shadbala in rupas, indexed by graha.
    pub shadbala_rupas: [f64; 9],
    /// Bhava Bala in rupas, house 1 first.
    pub bhava_rupas: [f64; 12],
    pub shadbala_total: f64,
    pub bhava_total: f64,
    /// Grahas labelled Strong.
    pub strong_count: usize,
}

impl BalaSample {
    pub fn from_result(local: NaiveDateTime, result: &ChartResult) -> Self {
        let shadbala_rupas = ALL_GRAHAS.map(|g| result.shadbala.get(g).total_rupas);
        let bhava_rupas = std::array::from_fn(|i| result.bhava_bala.entries[i].total_rupas);
        Self {
            local,
            jd_ut: result.chart.jd_ut,
            lagna_sign: result.chart.lagna_sign(),
            shadbala_rupas,
            bhava_rupas,
            shadbala_total: shadbala_rupas.iter().sum(),
            bhava_total: bhava_rupas.iter().sum(),
            strong_count: result.shadbala.entries.iter().filter(|e| e.is_strong).count(),
        }
    }
}

/// Scan output: computed samples in order plus the number skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    pub samples: Vec<BalaSample>,
    pub skipped: usize,
}

impl ScanReport {
    pub fn best(&self) -> Option<&BalaSample> {
        best_instant(&self.samples)
    }
}

/// Compute Shadbala and Bhava Bala for every instant of the range.
pub fn bala_range_scan<P: EphemerisProvider + ?Sized>(
    provider: &P,
    config: &ScanConfig,
) -> Result<ScanReport, KundaliError> {
    let births = config.births()?;
    let requested = births.len();

    let samples: Vec<BalaSample> = births
        .par_iter()
        .filter_map(|birth| {
            let local = birth.local_datetime().ok()?;
            match kundali_for_birth(provider, birth) {
                Ok(result) => Some(BalaSample::from_result(local, &result)),
                Err(e) => {
                    warn!("skipping {local}: {e}");
                    None
                }
            }
        })
        .collect();

    let skipped = requested - samples.len();
    info!(
        "bala scan {}..{} ({:?}): {} computed, {} skipped",
        config.start,
        config.end,
        config.step,
        samples.len(),
        skipped
    );
    Ok(ScanReport { samples, skipped })
}

/// The sample with the highest Shadbala total. Earliest wins ties.
pub fn best_instant(samples: &[BalaSample]) -> Option<&BalaSample> {
    samples.iter().reduce(|best, s| {
        if s.shadbala_total.total_cmp(&best.shadbala_total).is_gt() {
            s
        } else {
            best
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(step: ScanStep, days: i64) -> ScanConfig {
        let start = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        ScanConfig {
            start,
            end: start + TimeDelta::days(days - 1),
            step,
            location: GeoLocation::new(28.6139, 77.2090),
            utc_offset_hours: 5.5,
            ayanamsha: AyanamshaSystem::Lahiri,
        }
    }

    #[test]
    fn daily_births_at_noon() {
        let births = config(ScanStep::Daily, 4).births().unwrap();
        assert_eq!(births.len(), 4);
        // 2024 is a leap year.
        assert_eq!((births[2].month, births[2].day), (2, 29));
        assert!(births.iter().all(|b| b.hour == 12 && b.minute == 0));
    }

    #[test]
    fn hourly_births_cover_day() {
        let births = config(ScanStep::Hourly, 2).births().unwrap();
        assert_eq!(births.len(), 48);
        assert_eq!(births[0].hour, 0);
        assert_eq!(births[23].hour, 23);
        assert_eq!(births[24].day, 28);
    }

    #[test]
    fn reversed_range_rejected() {
        let mut c = config(ScanStep::Daily, 1);
        c.end = c.start - TimeDelta::days(1);
        assert!(matches!(c.births(), Err(KundaliError::InvalidInput(_))));
    }

    #[test]
    fn oversized_range_rejected() {
        let c = config(ScanStep::Hourly, 30_000);
        assert!(c.births().is_err());
    }

    #[test]
    fn bad_location_rejected() {
        let mut c = config(ScanStep::Daily, 2);
        c.location.latitude_deg = 95.0;
        assert!(c.births().is_err());
    }

    fn sample(total: f64) -> BalaSample {
        BalaSample {
            local: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_time(NaiveTime::MIN),
            jd_ut: 0.0,
            lagna_sign: 0,
            shadbala_rupas: [0.0; 9],
            bhava_rupas: [0.0; 12],
            shadbala_total: total,
            bhava_total: 0.0,
            strong_count: 0,
        }
    }

    #[test]
    fn best_picks_highest_then_earliest() {
        let mut samples = vec![sample(40.0), sample(55.5), sample(55.5), sample(12.0)];
        samples[2].jd_ut = 1.0;
        let best = best_instant(&samples).unwrap();
        assert!((best.shadbala_total - 55.5).abs() < 1e-12);
        assert_eq!(best.jd_ut, 0.0);
        assert!(best_instant(&[]).is_none());
    }
}
