// Criterion benchmarks for the house price pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use house_price_app::config::ArtifactSettings;
use house_price_app::core::{derive_features, format_currency, CategoricalEncoder};
use house_price_app::models::{FurnishingStatus, HouseRecord, YesNo};
use house_price_app::services::load_artifacts;
use std::path::Path;

fn create_record(i: usize) -> HouseRecord {
    let flag = |bit: usize| if i & (1 << bit) != 0 { YesNo::Yes } else { YesNo::No };
    HouseRecord {
        area: 1650.0 + (i % 100) as f64 * 150.0,
        bedrooms: 1 + (i % 6) as u8,
        bathrooms: 1 + (i % 4) as u8,
        stories: 1 + (i % 4) as u8,
        parking: (i % 4) as u8,
        mainroad: flag(0),
        guestroom: flag(1),
        basement: flag(2),
        hotwaterheating: flag(3),
        airconditioning: flag(4),
        prefarea: flag(5),
        furnishingstatus: FurnishingStatus::ALL[i % 3],
    }
}

fn artifact_settings() -> ArtifactSettings {
    ArtifactSettings::in_dir(Path::new(env!("CARGO_MANIFEST_DIR")).join("artifacts"))
}

fn bench_derive_features(c: &mut Criterion) {
    let record = create_record(42);
    c.bench_function("derive_features", |b| {
        b.iter(|| derive_features(black_box(&record)));
    });
}

fn bench_encode(c: &mut Criterion) {
    let set = load_artifacts(&artifact_settings()).expect("bundled artifacts load");
    let record = create_record(42);

    c.bench_function("one_hot_encode", |b| {
        b.iter(|| set.encoder.transform(black_box(&record.categorical_values())));
    });
}

fn bench_format_currency(c: &mut Criterion) {
    c.bench_function("format_currency", |b| {
        b.iter(|| format_currency(black_box(6936384.827872712)));
    });
}

fn bench_predict(c: &mut Criterion) {
    let predictor = load_artifacts(&artifact_settings())
        .and_then(|set| set.into_predictor())
        .expect("bundled artifacts load");

    let mut group = c.benchmark_group("predict");

    for record_count in [1, 10, 100, 1000].iter() {
        let records: Vec<HouseRecord> = (0..*record_count).map(create_record).collect();

        group.bench_with_input(
            BenchmarkId::new("predict_batch", record_count),
            record_count,
            |b, _| {
                b.iter(|| {
                    for record in &records {
                        let _ = black_box(predictor.predict(black_box(record)));
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_derive_features,
    bench_encode,
    bench_format_currency,
    bench_predict
);

criterion_main!(benches);
