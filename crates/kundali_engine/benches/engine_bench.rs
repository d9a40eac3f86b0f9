use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kundali_base::{AyanamshaSystem, Graha, RawPosition, mean_ayanamsha_deg, normalize_360};
use kundali_engine::{
    BirthInput, EphemerisProvider, GeoLocation, ProviderError, ScanConfig, ScanStep,
    bala_range_scan, kundali_for_birth,
};

const J2000: f64 = 2_451_545.0;
const BASE: [f64; 8] = [280.46, 218.32, 355.45, 252.25, 34.40, 181.98, 50.08, 125.04];
const RATE: [f64; 8] = [0.9856, 13.1764, 0.5240, 4.0923, 0.0831, 1.6021, 0.0335, -0.0530];

struct LinearEphemeris;

impl EphemerisProvider for LinearEphemeris {
    fn position(&self, jd_ut: f64, graha: Graha) -> Result<RawPosition, ProviderError> {
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

fn delhi() -> GeoLocation {
    GeoLocation::new(28.6139, 77.2090)
}

fn kundali_bench(c: &mut Criterion) {
    let birth = BirthInput {
        year: 1990,
        month: 1,
        day: 10,
        hour: 6,
        minute: 30,
        second: 0,
        utc_offset_hours: 5.5,
        location: delhi(),
        ayanamsha: AyanamshaSystem::Lahiri,
    };

    let mut group = c.benchmark_group("engine_kundali");
    group.bench_function("kundali_for_birth", |b| {
        b.iter(|| kundali_for_birth(&LinearEphemeris, black_box(&birth)))
    });
    group.finish();
}

fn scan_bench(c: &mut Criterion) {
    let (Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(2024, 1, 1),
        NaiveDate::from_ymd_opt(2024, 12, 31),
    ) else {
        return;
    };
    let config = ScanConfig {
        start,
        end,
        step: ScanStep::Daily,
        location: delhi(),
        utc_offset_hours: 5.5,
        ayanamsha: AyanamshaSystem::Lahiri,
    };

    let mut group = c.benchmark_group("engine_scan");
    group.sample_size(20);
    group.bench_function("bala_range_scan_daily_year", |b| {
        b.iter(|| bala_range_scan(&LinearEphemeris, black_box(&config)))
    });
    group.finish();
}

criterion_group!(benches, kundali_bench, scan_bench);
criterion_main!(benches);
