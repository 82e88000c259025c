
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use natcat::exposure::{match_exposures, rank_alerts};
use natcat::geo::{GeoPoint, haversine_km};
use natcat::summary::summarize;

use fixtures::{LARGE, MEDIUM, SMALL, build};

// ── Group 1: haversine — single distance ─────────────────────────────────────

fn bench_haversine(c: &mut Criterion) {
    let a = GeoPoint::new(35.6762, 139.6503);
    let b = GeoPoint::new(34.0522, -118.2437);
    c.bench_function("haversine", |bench| {
        bench.iter(|| haversine_km(std::hint::black_box(a), std::hint::black_box(b)))
    });
}

// ── Group 2: match — events × treaties cross product ─────────────────────────

fn bench_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("match");
    for (name, scenario) in [("small", &SMALL), ("medium", &MEDIUM), ("large", &LARGE)] {
        let (events, treaties) = build(scenario);
        group.throughput(Throughput::Elements((events.len() * treaties.len()) as u64));
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| match_exposures(&events, &treaties))
        });
    }
    group.finish();
}

// ── Group 3: refresh — match, summarize and rank a full snapshot ─────────────

fn bench_refresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("refresh");
    for (name, scenario) in [("small", &SMALL), ("medium", &MEDIUM), ("large", &LARGE)] {
        let (events, treaties) = build(scenario);
        group.throughput(Throughput::Elements(events.len() as u64));
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| {
                let records = match_exposures(&events, &treaties);
                let stats = summarize(&events, &records);
                let ranked = rank_alerts(&records);
                std::hint::black_box((stats, ranked.len()))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_haversine, bench_match, bench_refresh);
criterion_main!(benches);
