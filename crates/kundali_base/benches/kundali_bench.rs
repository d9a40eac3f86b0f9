use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kundali_base::{
    Amsha, BirthMoment, MoonPlacement, RawPosition, RawPositions, ashtakoota, amsha_rashi,
    bhava_bala_for_chart, build_chart_state, compute_chart, shadbala_for_chart, vimshottari_dasha,
};

fn sample_raw() -> RawPositions {
    RawPositions::new([
        RawPosition::new(280.37, 1.0194),
        RawPosition::new(223.32, 12.02),
        RawPosition::new(327.96, 0.7757),
        RawPosition::new(271.89, 1.5563),
        RawPosition::new(25.25, 0.0408),
        RawPosition::new(241.57, 1.2092),
        RawPosition::new(40.40, -0.0222),
        RawPosition::new(125.06, -0.0530),
    ])
}

const MOMENT: BirthMoment = BirthMoment {
    jd_ut: 2_451_545.0,
    local_hour: 17.5,
};

fn chart_bench(c: &mut Criterion) {
    let raw = sample_raw();

    let mut group = c.benchmark_group("chart");
    group.bench_function("build_chart_state", |b| {
        b.iter(|| build_chart_state(black_box(&raw), black_box(12.0), 23.85, MOMENT))
    });
    group.bench_function("amsha_rashi_d30", |b| {
        b.iter(|| amsha_rashi(black_box(123.456), Amsha::D30))
    });
    group.bench_function("compute_chart", |b| {
        b.iter(|| compute_chart(black_box(&raw), black_box(12.0), 23.85, MOMENT))
    });
    group.finish();
}

fn bala_bench(c: &mut Criterion) {
    let Ok(chart) = build_chart_state(&sample_raw(), 12.0, 23.85, MOMENT) else {
        return;
    };
    let shadbala = shadbala_for_chart(&chart);

    let mut group = c.benchmark_group("bala");
    group.bench_function("shadbala_for_chart", |b| {
        b.iter(|| shadbala_for_chart(black_box(&chart)))
    });
    group.bench_function("bhava_bala_for_chart", |b| {
        b.iter(|| bhava_bala_for_chart(black_box(&chart), black_box(&shadbala)))
    });
    group.finish();
}

fn dasha_and_match_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("dasha_match");
    group.bench_function("vimshottari_dasha", |b| {
        b.iter(|| vimshottari_dasha(black_box(123.456), black_box(2_451_545.0)))
    });
    let a = MoonPlacement::new(3, 7);
    let m = MoonPlacement::new(9, 21);
    group.bench_function("ashtakoota", |b| {
        b.iter(|| ashtakoota(black_box(a), black_box(m)))
    });
    group.finish();
}

criterion_group!(benches, chart_bench, bala_bench, dasha_and_match_bench);
criterion_main!(benches);
