use criterion::{Criterion, criterion_group, criterion_main};
use multiline_chart::api::{ChartConfig, ChartSession};
use multiline_chart::core::{
    Dataset, DomainValue, HitSample, LinearScale, PixelRange, Record, ScaleKind, SelectionRect,
    Slot,
};
use multiline_chart::render::NullRenderer;
use std::hint::black_box;

fn slot(x: f64, y_key: &str, y: f64) -> Slot {
    let mut slot = Slot::new();
    slot.insert("date".to_owned(), DomainValue::Number(x));
    slot.insert(y_key.to_owned(), DomainValue::Number(y));
    slot
}

fn dataset(n: usize) -> Dataset {
    Dataset::new(
        (0..n)
            .map(|i| {
                let x = i as f64;
                Record::new(vec![
                    slot(x, "apple", 100.0 + (x * 0.1).sin() * 20.0),
                    slot(x, "fb", 150.0 + (x * 0.07).cos() * 25.0),
                ])
            })
            .collect(),
    )
}

fn config() -> ChartConfig {
    ChartConfig::new("date", vec!["apple".to_owned(), "fb".to_owned()])
        .with_scales(ScaleKind::Linear, ScaleKind::Linear)
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new(0.0, 10_000.0, PixelRange::new(0.0, 1920.0)).expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.to_pixel(black_box(4_321.123)).expect("to pixel");
            let _ = scale.pixel_to_domain(px).expect("from pixel");
        })
    });
}

fn bench_selection_filter_10k(c: &mut Criterion) {
    let samples: Vec<HitSample> = (0..10_000)
        .map(|i| {
            let x = i as f64 * 0.05;
            HitSample::new(x, [100.0 + (x * 0.1).sin() * 80.0, 150.0 + (x * 0.07).cos() * 60.0])
        })
        .collect();
    let rect = SelectionRect::new((100.0, 60.0), (350.0, 180.0));

    c.bench_function("selection_filter_10k", |b| {
        b.iter(|| {
            let hits = black_box(&samples)
                .iter()
                .filter(|sample| rect.contains(sample))
                .count();
            black_box(hits)
        })
    });
}

fn bench_full_draw_1k(c: &mut Criterion) {
    let mut session = ChartSession::new(NullRenderer::default(), config(), dataset(1_000))
        .expect("session init");

    c.bench_function("full_draw_1k", |b| {
        b.iter(|| {
            session.draw_chart().expect("draw should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_selection_filter_10k,
    bench_full_draw_1k
);
criterion_main!(benches);
