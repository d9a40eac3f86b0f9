//! Orchestration tests against an in-memory provider.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use kundali_base::{
    AyanamshaSystem, Graha, Koota, KundaliError, RawPosition, mean_ayanamsha_deg, normalize_360,
};
use kundali_engine::{
    BirthInput, EphemerisProvider, EphemerisSample, GeoLocation, ProviderError, SampledBody,
    SampledEphemeris, ScanConfig, ScanStep, bala_range_scan, best_instant,
    compatibility_for_births, kundali_for_birth,
};

const J2000: f64 = 2_451_545.0;
const EPS: f64 = 1e-9;

/// Mean longitudes at J2000 and daily motions, Surya..Rahu.
const BASE: [f64; 8] = [280.46, 218.32, 355.45, 252.25, 34.40, 181.98, 50.08, 125.04];
const RATE: [f64; 8] = [0.9856, 13.1764, 0.5240, 4.0923, 0.0831, 1.6021, 0.0335, -0.0530];

/// Linear-motion ephemeris. Deterministic and cheap.
struct LinearEphemeris {
    calls: AtomicUsize,
}

impl LinearEphemeris {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

impl EphemerisProvider for LinearEphemeris {
    fn position(&self, jd_ut: f64, graha: Graha) -> Result<RawPosition, ProviderError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let i = graha.index() as usize;
        Ok(RawPosition::new(
            normalize_360(BASE[i] + RATE[i] * (jd_ut - J2000)),
            RATE[i],
        ))
    }

    fn ascendant(&self, jd_ut: f64, _latitude: f64, longitude: f64) -> Result<f64, ProviderError> {
        Ok(normalize_360(100.0 + 360.985_647 * (jd_ut - J2000) + longitude))
    }

    fn ayanamsha(&self, jd_ut: f64, system: AyanamshaSystem) -> Result<f64, ProviderError> {
        Ok(mean_ayanamsha_deg(system, jd_ut))
    }
}

/// Fails the Moon on every third day counted from J2000.
struct GappyEphemeris(LinearEphemeris);

impl EphemerisProvider for GappyEphemeris {
    fn position(&self, jd_ut: f64, graha: Graha) -> Result<RawPosition, ProviderError> {
        let day = (jd_ut - J2000).floor() as i64;
        if graha == Graha::Chandra && day.rem_euclid(3) == 0 {
            return Err(ProviderError::NoSample {
                body: "Moon".into(),
                jd_ut,
            });
        }
        self.0.position(jd_ut, graha)
    }

    fn ascendant(&self, jd_ut: f64, latitude: f64, longitude: f64) -> Result<f64, ProviderError> {
        self.0.ascendant(jd_ut, latitude, longitude)
    }

    fn ayanamsha(&self, jd_ut: f64, system: AyanamshaSystem) -> Result<f64, ProviderError> {
        self.0.ayanamsha(jd_ut, system)
    }
}

fn delhi() -> GeoLocation {
    GeoLocation::new(28.6139, 77.2090)
}

fn birth(year: i32, month: u32, day: u32, hour: u32) -> BirthInput {
    BirthInput {
        year,
        month,
        day,
        hour,
        minute: 0,
        second: 0,
        utc_offset_hours: 5.5,
        location: delhi(),
        ayanamsha: AyanamshaSystem::Lahiri,
    }
}

#[test]
fn chart_uses_provider_values() {
    let eph = LinearEphemeris::new();
    // 17:30 IST on 2000-01-01 is J2000.
    let mut b = birth(2000, 1, 1, 17);
    b.minute = 30;
    let r = kundali_for_birth(&eph, &b).unwrap();
    assert!((r.chart.jd_ut - J2000).abs() < EPS);
    assert!((r.chart.local_hour - 17.5).abs() < EPS);
    let aya = mean_ayanamsha_deg(AyanamshaSystem::Lahiri, J2000);
    assert!((r.chart.ayanamsha - aya).abs() < EPS);
    let sun = r.chart.body(Graha::Surya);
    assert!((sun.sidereal_lon - normalize_360(BASE[0] - aya)).abs() < 1e-9);
    assert_eq!(r.dasha.mahadashas.len(), 9);
}

#[test]
fn ayanamsha_system_reaches_provider() {
    let eph = LinearEphemeris::new();
    let mut b = birth(1985, 6, 15, 9);
    let lahiri = kundali_for_birth(&eph, &b).unwrap();
    b.ayanamsha = AyanamshaSystem::Raman;
    let raman = kundali_for_birth(&eph, &b).unwrap();
    let diff = lahiri.chart.ayanamsha - raman.chart.ayanamsha;
    assert!((diff - (23.853 - 22.370)).abs() < 1e-9);
}

#[test]
fn invalid_birth_rejected_before_provider() {
    let eph = LinearEphemeris::new();
    let mut b = birth(2000, 2, 30, 12);
    let err = kundali_for_birth(&eph, &b).unwrap_err();
    assert!(matches!(err, KundaliError::InvalidInput(_)));
    b.day = 1;
    b.location.latitude_deg = -90.5;
    assert!(kundali_for_birth(&eph, &b).is_err());
    assert_eq!(eph.calls.load(Ordering::Relaxed), 0);
}

#[test]
fn provider_failure_fails_whole_chart() {
    let eph = GappyEphemeris(LinearEphemeris::new());
    // 05:30 IST on 2000-01-02 is JD 2451545.5, within day 0.
    let mut b = birth(2000, 1, 2, 5);
    b.minute = 30;
    match kundali_for_birth(&eph, &b) {
        Err(KundaliError::EphemerisFailure { body, reason, .. }) => {
            assert_eq!(body, "Moon");
            assert_eq!(reason, "no sample");
        }
        other => panic!("expected ephemeris failure, got {other:?}"),
    }
}

#[test]
fn compatibility_of_same_birth() {
    let eph = LinearEphemeris::new();
    let b = birth(1992, 3, 14, 8);
    let r = compatibility_for_births(&eph, &b, &b).unwrap();
    assert!((r.score.get(Koota::Gana).score - 6.0).abs() < EPS);
    assert!(r.score.get(Koota::Nadi).score.abs() < EPS);
    assert_eq!(r.first, r.second);
}

#[test]
fn compatibility_total_symmetric() {
    let eph = LinearEphemeris::new();
    let a = birth(1990, 1, 10, 6);
    let b = birth(1993, 8, 21, 22);
    let ab = compatibility_for_births(&eph, &a, &b).unwrap();
    let ba = compatibility_for_births(&eph, &b, &a).unwrap();
    assert!((ab.score.total - ba.score.total).abs() < EPS);
    assert!((0.0..=36.0).contains(&ab.score.total));
}

fn scan_config(step: ScanStep, days: u32) -> ScanConfig {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    ScanConfig {
        start,
        end: NaiveDate::from_ymd_opt(2000, 1, days).unwrap(),
        step,
        location: delhi(),
        utc_offset_hours: 0.0,
        ayanamsha: AyanamshaSystem::Lahiri,
    }
}

#[test]
fn daily_scan_in_order() {
    let eph = LinearEphemeris::new();
    let report = bala_range_scan(&eph, &scan_config(ScanStep::Daily, 10)).unwrap();
    assert_eq!(report.samples.len(), 10);
    assert_eq!(report.skipped, 0);
    for (i, s) in report.samples.iter().enumerate() {
        assert!((s.jd_ut - (J2000 + i as f64)).abs() < EPS);
        let sum: f64 = s.shadbala_rupas.iter().sum();
        assert!((s.shadbala_total - sum).abs() < EPS);
        let bsum: f64 = s.bhava_rupas.iter().sum();
        assert!((s.bhava_total - bsum).abs() < EPS);
        assert!(s.strong_count <= 9);
        assert!(s.lagna_sign < 12);
    }
}

#[test]
fn hourly_scan_matches_single_charts() {
    let eph = LinearEphemeris::new();
    let config = scan_config(ScanStep::Hourly, 1);
    let report = bala_range_scan(&eph, &config).unwrap();
    assert_eq!(report.samples.len(), 24);
    let seven = &report.samples[7];
    let single = kundali_for_birth(
        &eph,
        &BirthInput {
            utc_offset_hours: 0.0,
            ..birth(2000, 1, 1, 7)
        },
    )
    .unwrap();
    assert!((seven.shadbala_total - single.shadbala.total_rupas()).abs() < EPS);
    assert!((seven.bhava_total - single.bhava_bala.total_rupas()).abs() < EPS);
}

#[test]
fn scan_skips_failed_instants() {
    let eph = GappyEphemeris(LinearEphemeris::new());
    let report = bala_range_scan(&eph, &scan_config(ScanStep::Daily, 9)).unwrap();
    // Noon UT on Jan 1, 4, 7 lands on day 0, 3, 6.
    assert_eq!(report.skipped, 3);
    assert_eq!(report.samples.len(), 6);
    assert!(report.samples.windows(2).all(|w| w[0].jd_ut < w[1].jd_ut));
}

#[test]
fn scan_is_deterministic() {
    let eph = LinearEphemeris::new();
    let config = scan_config(ScanStep::Daily, 20);
    let a = bala_range_scan(&eph, &config).unwrap();
    let b = bala_range_scan(&eph, &config).unwrap();
    assert_eq!(a, b);
    let best = best_instant(&a.samples).unwrap();
    assert!(a.samples.iter().all(|s| s.shadbala_total <= best.shadbala_total));
    assert_eq!(a.best(), Some(best));
}

fn table_for(births: &[BirthInput]) -> SampledEphemeris {
    let eph = LinearEphemeris::new();
    let samples = births
        .iter()
        .map(|b| {
            let jd = b.birth_moment().unwrap().jd_ut;
            let bodies = kundali_base::PROVIDER_GRAHAS
                .iter()
                .map(|&g| {
                    let p = eph.position(jd, g).unwrap();
                    (
                        g.english_name().to_string(),
                        SampledBody {
                            longitude: p.longitude,
                            speed: p.speed,
                        },
                    )
                })
                .collect();
            EphemerisSample {
                jd_ut: jd,
                bodies,
                ascendant: eph.ascendant(jd, 0.0, delhi().longitude_deg).unwrap(),
                ayanamsha: [(
                    AyanamshaSystem::Lahiri,
                    mean_ayanamsha_deg(AyanamshaSystem::Lahiri, jd),
                )]
                .into_iter()
                .collect(),
            }
        })
        .collect();
    SampledEphemeris::new(Some(delhi()), samples).unwrap()
}

#[test]
fn sampled_table_reproduces_provider() {
    let births = [birth(1975, 11, 2, 4), birth(2011, 7, 30, 19)];
    let table = table_for(&births);
    let eph = LinearEphemeris::new();
    for b in &births {
        let direct = kundali_for_birth(&eph, b).unwrap();
        let sampled = kundali_for_birth(&table, b).unwrap();
        assert_eq!(direct, sampled);
    }
}

#[test]
fn sampled_table_misses_unknown_instant() {
    let table = table_for(&[birth(1975, 11, 2, 4), birth(2011, 7, 30, 19)]);
    let err = kundali_for_birth(&table, &birth(1990, 5, 5, 5)).unwrap_err();
    assert!(matches!(err, KundaliError::EphemerisFailure { .. }));
}
