//! A provider backed by a table of precomputed samples.
//!
//! Each sample holds the tropical positions of the eight provider grahas and
//! the ascendant at one Julian day, for the one location the table was built
//! for. Lookups are exact-instant: a query between samples is a
//! [`ProviderError::NoSample`], never an interpolation.
//!
//! Table layout (JSON):
//!
//! ```json
//! {
//!   "location": { "latitude_deg": 28.6139, "longitude_deg": 77.209 },
//!   "samples": [
//!     {
//!       "jd_ut": 2451545.0,
//!       "bodies": { "Sun": { "longitude": 280.37, "speed": 1.0194 }, "...": {} },
//!       "ascendant": 12.0,
//!       "ayanamsha": { "lahiri": 23.853 }
//!     }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use kundali_base::{
    AyanamshaSystem, Graha, PROVIDER_GRAHAS, RawPosition, mean_ayanamsha_deg,
};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::birth::GeoLocation;
use crate::error::{ProviderError, TableError};
use crate::provider::EphemerisProvider;

/// Two Julian days closer than this are the same instant (~0.09 s).
pub const JD_MATCH_TOLERANCE: f64 = 1e-6;

/// Location match tolerance, degrees.
const LOCATION_TOLERANCE_DEG: f64 = 1e-6;

/// Tropical longitude and speed of one body in a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampledBody {
    pub longitude: f64,
    pub speed: f64,
}

/// Everything the table knows about one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisSample {
    pub jd_ut: f64,
    /// Keyed by English graha name ("Sun" .. "Rahu").
    pub bodies: BTreeMap<String, SampledBody>,
    /// Tropical ascendant for the table's location.
    pub ascendant: f64,
    /// Stored ayanamsha values. Systems not listed use the mean
    /// precession model.
    #[serde(default)]
    pub ayanamsha: HashMap<AyanamshaSystem, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TableFile {
    #[serde(default)]
    location: Option<GeoLocation>,
    samples: Vec<EphemerisSample>,
}

/// Deterministic exact-instant provider over a sample table.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledEphemeris {
    location: Option<GeoLocation>,
    /// Sorted by `jd_ut`, no duplicates.
    samples: Vec<EphemerisSample>,
}

impl SampledEphemeris {
    /// Build from samples. Sorts them and rejects duplicates or values
    /// outside their valid range.
    pub fn new(
        location: Option<GeoLocation>,
        mut samples: Vec<EphemerisSample>,
    ) -> Result<Self, TableError> {
        for s in &samples {
            validate_sample(s)?;
        }
        samples.sort_by(|a, b| a.jd_ut.total_cmp(&b.jd_ut));
        if let Some(pair) = samples
            .windows(2)
            .find(|w| w[1].jd_ut - w[0].jd_ut < JD_MATCH_TOLERANCE)
        {
            return Err(TableError::Invalid(format!(
                "duplicate sample at JD {}",
                pair[1].jd_ut
            )));
        }
        debug!("sampled ephemeris: {} samples", samples.len());
        Ok(Self { location, samples })
    }

    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        let file: TableFile = serde_json::from_str(json)?;
        Self::new(file.location, file.samples)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, TableError> {
        let json = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, TableError> {
        let file = TableFile {
            location: self.location,
            samples: self.samples.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First and last sampled Julian days.
    pub fn coverage(&self) -> Option<(f64, f64)> {
        Some((self.samples.first()?.jd_ut, self.samples.last()?.jd_ut))
    }

    pub fn samples(&self) -> &[EphemerisSample] {
        &self.samples
    }

    fn sample_at(&self, jd_ut: f64, body: &str) -> Result<&EphemerisSample, ProviderError> {
        let Some((start, end)) = self.coverage() else {
            return Err(ProviderError::NoSample {
                body: body.to_string(),
                jd_ut,
            });
        };
        if !jd_ut.is_finite()
            || jd_ut < start - JD_MATCH_TOLERANCE
            || jd_ut > end + JD_MATCH_TOLERANCE
        {
            return Err(ProviderError::OutOfCoverage {
                body: body.to_string(),
                jd_ut,
                start,
                end,
            });
        }
        let i = self
            .samples
            .partition_point(|s| s.jd_ut < jd_ut - JD_MATCH_TOLERANCE);
        match self.samples.get(i) {
            Some(s) if (s.jd_ut - jd_ut).abs() < JD_MATCH_TOLERANCE => Ok(s),
            _ => Err(ProviderError::NoSample {
                body: body.to_string(),
                jd_ut,
            }),
        }
    }
}

fn validate_sample(s: &EphemerisSample) -> Result<(), TableError> {
    if !s.jd_ut.is_finite() {
        return Err(TableError::Invalid("non-finite sample JD".into()));
    }
    check_longitude(s.jd_ut, "ascendant", s.ascendant)?;
    for g in PROVIDER_GRAHAS {
        let name = g.english_name();
        let Some(b) = s.bodies.get(name) else {
            return Err(TableError::Invalid(format!(
                "sample at JD {} has no {name}",
                s.jd_ut
            )));
        };
        check_longitude(s.jd_ut, name, b.longitude)?;
        if !b.speed.is_finite() {
            return Err(TableError::Invalid(format!(
                "{name} speed at JD {} is not finite",
                s.jd_ut
            )));
        }
    }
    if let Some((sys, v)) = s.ayanamsha.iter().find(|(_, v)| !v.is_finite()) {
        return Err(TableError::Invalid(format!(
            "{sys} ayanamsha at JD {} is {v}",
            s.jd_ut
        )));
    }
    Ok(())
}

fn check_longitude(jd_ut: f64, label: &str, lon: f64) -> Result<(), TableError> {
    if !lon.is_finite() || !(0.0..=360.0).contains(&lon) {
        return Err(TableError::Invalid(format!(
            "{label} longitude {lon} at JD {jd_ut} outside [0, 360]"
        )));
    }
    Ok(())
}

impl EphemerisProvider for SampledEphemeris {
    fn position(&self, jd_ut: f64, graha: Graha) -> Result<RawPosition, ProviderError> {
        let name = graha.english_name();
        let sample = self.sample_at(jd_ut, name)?;
        sample
            .bodies
            .get(name)
            .map(|b| RawPosition::new(b.longitude, b.speed))
            .ok_or_else(|| ProviderError::NoSample {
                body: name.to_string(),
                jd_ut,
            })
    }

    fn ascendant(&self, jd_ut: f64, latitude: f64, longitude: f64) -> Result<f64, ProviderError> {
        if let Some(loc) = self.location {
            let off = (loc.latitude_deg - latitude)
                .abs()
                .max((loc.longitude_deg - longitude).abs());
            if off > LOCATION_TOLERANCE_DEG {
                return Err(ProviderError::Backend {
                    body: "ascendant".into(),
                    jd_ut,
                    reason: format!(
                        "table built for ({}, {}), asked for ({latitude}, {longitude})",
                        loc.latitude_deg, loc.longitude_deg
                    ),
                });
            }
        }
        Ok(self.sample_at(jd_ut, "ascendant")?.ascendant)
    }

    fn ayanamsha(&self, jd_ut: f64, system: AyanamshaSystem) -> Result<f64, ProviderError> {
        let sample = self.sample_at(jd_ut, "ayanamsha")?;
        Ok(sample
            .ayanamsha
            .get(&system)
            .copied()
            .unwrap_or_else(|| mean_ayanamsha_deg(system, jd_ut)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(jd_ut: f64, offset: f64) -> EphemerisSample {
        let bodies = PROVIDER_GRAHAS
            .iter()
            .map(|g| {
                let lon = (f64::from(g.index()) * 40.0 + offset) % 360.0;
                (g.english_name().to_string(), SampledBody { longitude: lon, speed: 1.0 })
            })
            .collect();
        EphemerisSample {
            jd_ut,
            bodies,
            ascendant: 100.0 + offset,
            ayanamsha: HashMap::from([(AyanamshaSystem::Lahiri, 23.75)]),
        }
    }

    fn table() -> SampledEphemeris {
        SampledEphemeris::new(
            Some(GeoLocation::new(10.0, 20.0)),
            vec![sample(2_451_546.0, 5.0), sample(2_451_545.0, 0.0)],
        )
        .unwrap()
    }

    #[test]
    fn samples_sorted() {
        let t = table();
        assert_eq!(t.len(), 2);
        assert_eq!(t.coverage(), Some((2_451_545.0, 2_451_546.0)));
    }

    #[test]
    fn exact_instant_lookup() {
        let t = table();
        let p = t.position(2_451_546.0, Graha::Mangal).unwrap();
        assert!((p.longitude - 85.0).abs() < 1e-12);
        let asc = t.ascendant(2_451_545.0, 10.0, 20.0).unwrap();
        assert!((asc - 100.0).abs() < 1e-12);
    }

    #[test]
    fn between_samples_is_no_sample() {
        let t = table();
        let e = t.position(2_451_545.5, Graha::Surya).unwrap_err();
        assert!(matches!(e, ProviderError::NoSample { .. }));
    }

    #[test]
    fn outside_coverage() {
        let t = table();
        let e = t.position(2_451_600.0, Graha::Chandra).unwrap_err();
        assert!(matches!(e, ProviderError::OutOfCoverage { .. }));
    }

    #[test]
    fn ayanamsha_falls_back_to_mean_model() {
        let t = table();
        assert!((t.ayanamsha(2_451_545.0, AyanamshaSystem::Lahiri).unwrap() - 23.75).abs() < 1e-12);
        let raman = t.ayanamsha(2_451_545.0, AyanamshaSystem::Raman).unwrap();
        assert!((raman - mean_ayanamsha_deg(AyanamshaSystem::Raman, 2_451_545.0)).abs() < 1e-12);
    }

    #[test]
    fn wrong_location_rejected() {
        let t = table();
        assert!(t.ascendant(2_451_545.0, 11.0, 20.0).is_err());
    }

    #[test]
    fn duplicates_and_gaps_rejected() {
        let dup = SampledEphemeris::new(None, vec![sample(1.0, 0.0), sample(1.0, 1.0)]);
        assert!(matches!(dup, Err(TableError::Invalid(_))));

        let mut missing = sample(1.0, 0.0);
        missing.bodies.remove("Rahu");
        assert!(SampledEphemeris::new(None, vec![missing]).is_err());
    }

    #[test]
    fn json_round_trip() {
        let t = table();
        let json = t.to_json_string().unwrap();
        let back = SampledEphemeris::from_json_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            SampledEphemeris::from_json_str("{\"samples\": 3}"),
            Err(TableError::Parse(_))
        ));
    }
}
