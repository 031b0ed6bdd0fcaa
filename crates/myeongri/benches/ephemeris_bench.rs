use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use myeongri::ephemeris::{Body, Ephemeris};
use myeongri::houses::{HouseCalculator, HouseSystem};
use myeongri::{Kernel, NatalRequest, SajuRequest};

fn bench_positions(c: &mut Criterion) {
    let ephemeris = Ephemeris::approximate();
    let jd = ephemeris.julian_day(Utc.with_ymd_and_hms(1990, 5, 15, 1, 0, 0).unwrap());

    c.bench_function("positions", |b| {
        b.iter(|| ephemeris.positions(black_box(jd), black_box(&Body::PLANETS)))
    });
}

fn bench_houses(c: &mut Criterion) {
    let ephemeris = Ephemeris::approximate();
    let houses = HouseCalculator::new();
    let jd = ephemeris.julian_day(Utc.with_ymd_and_hms(1990, 5, 15, 1, 0, 0).unwrap());

    c.bench_function("porphyry_houses", |b| {
        b.iter(|| {
            houses.compute(
                black_box(&ephemeris),
                black_box(jd),
                black_box(40.7128),
                black_box(-74.0060),
                black_box(HouseSystem::Porphyry),
            )
        })
    });
}

fn bench_charts(c: &mut Criterion) {
    let kernel = Kernel::with_defaults().with_ephemeris(Ephemeris::approximate());
    let saju = SajuRequest::solar(1990, 5, 15).at(10, 0);
    let natal = NatalRequest::new(1990, 5, 15, 10, 0, 37.5665, 126.978);

    c.bench_function("saju_chart", |b| {
        b.iter(|| kernel.compute_saju_chart(black_box(&saju)))
    });
    c.bench_function("natal_chart", |b| {
        b.iter(|| kernel.compute_natal_chart(black_box(&natal)))
    });
}

criterion_group!(benches, bench_positions, bench_houses, bench_charts);
criterion_main!(benches);
