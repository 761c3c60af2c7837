use chrono::{Duration, NaiveDate};
use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;
use usage_spiral::api::{EngineConfig, UsageSpiralEngine};
use usage_spiral::core::Viewport;
use usage_spiral::data::{PipelineConfig, RawTable, build_dataset};
use usage_spiral::render::NullRenderer;
use usage_spiral::spiral::{SpiralConfig, SpiralLayout};

/// 365 date columns (every tenth one split into a `.1` duplicate) by 200 apps.
fn year_of_usage() -> RawTable {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
    let mut columns = vec!["App name".to_owned(), "Device".to_owned()];
    for offset in 0..365 {
        let key = (start + Duration::days(offset))
            .format("%B %-d, %Y")
            .to_string();
        if offset % 10 == 0 {
            columns.push(format!("{key}.1"));
        }
        columns.push(key);
    }

    let mut table = RawTable::new(columns.clone());
    for app in 0..200u64 {
        let mut row = vec![format!("App {app}"), "Phone".to_owned()];
        row.extend(
            (0..columns.len() - 2).map(|column| ((app * 31 + column as u64 * 17) % 900).to_string()),
        );
        table.push_row(row);
    }
    table
}

fn bench_build_dataset_year(c: &mut Criterion) {
    let table = year_of_usage();
    let config = PipelineConfig::default();

    c.bench_function("build_dataset_365_days_200_apps", |b| {
        b.iter(|| {
            let _ = build_dataset(black_box(&table), None, black_box(&config))
                .expect("dataset should build");
        })
    });
}

fn bench_scatter_points_year(c: &mut Criterion) {
    let dataset = build_dataset(&year_of_usage(), None, &PipelineConfig::default())
        .expect("dataset should build");
    let layout = SpiralLayout::new(&dataset, Viewport::new(900, 900), &SpiralConfig::default())
        .expect("layout");

    c.bench_function("scatter_points_365_days", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(17);
            let _ = layout.scatter_points(black_box(&dataset), &mut rng);
        })
    });
}

fn bench_engine_render_year(c: &mut Criterion) {
    let config = EngineConfig::new(Viewport::new(900, 900), Viewport::new(200, 800))
        .with_spiral(SpiralConfig::default().with_scatter_seed(3));
    let mut engine =
        UsageSpiralEngine::from_tables(NullRenderer::default(), &year_of_usage(), None, config)
            .expect("engine init");
    engine.hover_day(100);

    c.bench_function("engine_render_365_days", |b| {
        b.iter(|| {
            engine.render().expect("render should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_build_dataset_year,
    bench_scatter_points_year,
    bench_engine_render_year
);
criterion_main!(benches);
