use multiline_chart::api::{ChartConfig, ChartSession, PipelineStage};
use multiline_chart::core::{Dataset, DomainValue, Margin, Record, ScaleKind, Slot};
use multiline_chart::error::ChartError;
use multiline_chart::render::NullRenderer;

fn slot(x: f64, y_key: &str, y: f64) -> Slot {
    let mut slot = Slot::new();
    slot.insert("date".to_owned(), DomainValue::Number(x));
    slot.insert(y_key.to_owned(), DomainValue::Number(y));
    slot
}

fn record(x: f64, apple: f64, fb: f64) -> Record {
    Record::new(vec![slot(x, "apple", apple), slot(x, "fb", fb)])
}

fn dataset(n: usize) -> Dataset {
    Dataset::new(
        (0..n)
            .map(|i| record(i as f64, 100.0 + i as f64, 50.0 + 2.0 * i as f64))
            .collect(),
    )
}

fn config() -> ChartConfig {
    ChartConfig::new("date", vec!["apple".to_owned(), "fb".to_owned()])
        .with_scales(ScaleKind::Linear, ScaleKind::Linear)
        .with_x_label("Price")
}

#[test]
fn draw_emits_one_path_and_one_marker_per_record_per_series() {
    let mut session = ChartSession::new(NullRenderer::default(), config(), dataset(7))
        .expect("session init");
    session.draw_chart().expect("draw");

    let frame = session
        .renderer()
        .last_frame
        .as_ref()
        .expect("frame rendered");
    assert_eq!(frame.path_count(), 2);
    assert_eq!(frame.marker_count_for_series(0), 7);
    assert_eq!(frame.marker_count_for_series(1), 7);
    assert_eq!(frame.markers.len(), 14);
}

#[test]
fn clear_then_draw_reproduces_identical_coordinates() {
    let mut session = ChartSession::new(NullRenderer::default(), config(), dataset(5))
        .expect("session init");

    session.draw_chart().expect("first draw");
    let first = session.renderer().last_frame.clone().expect("first frame");

    session.clear_chart().expect("clear");
    let cleared = session.renderer().last_frame.clone().expect("cleared frame");
    assert!(cleared.is_empty());

    session.draw_chart().expect("second draw");
    let second = session.renderer().last_frame.clone().expect("second frame");

    assert_eq!(first, second);
}

#[test]
fn stages_progress_through_the_draw_lifecycle() {
    let mut session = ChartSession::new(NullRenderer::default(), config(), dataset(3))
        .expect("session init");
    assert_eq!(session.stage(), PipelineStage::Unmounted);

    session.draw_chart().expect("draw");
    assert_eq!(session.stage(), PipelineStage::Drawn);
    assert!(session.scales().is_some());

    session.clear_chart().expect("clear");
    assert_eq!(session.stage(), PipelineStage::SurfaceReady);
    assert!(session.scales().is_none());
}

#[test]
fn empty_dataset_fails_at_draw_not_construction() {
    let mut session = ChartSession::new(NullRenderer::default(), config(), Dataset::default())
        .expect("empty dataset is accepted until drawn");
    let result = session.draw_chart();
    assert!(matches!(result, Err(ChartError::EmptyDataset)));
    assert_ne!(session.stage(), PipelineStage::Drawn);
}

#[test]
fn misshapen_dataset_is_rejected_before_any_draw() {
    let lopsided = Dataset::new(vec![Record::new(vec![slot(0.0, "apple", 1.0)])]);
    let result = ChartSession::new(NullRenderer::default(), config(), lopsided);
    assert!(matches!(result, Err(ChartError::Configuration(_))));
}

#[test]
fn zero_series_config_is_rejected() {
    let config = ChartConfig::new("date", Vec::new());
    let result = ChartSession::new(NullRenderer::default(), config, dataset(2));
    assert!(matches!(result, Err(ChartError::Configuration(_))));
}

#[test]
fn margins_swallowing_the_viewport_are_rejected() {
    let config = config()
        .with_size(100, 100)
        .with_margin(Margin::new(60, 10, 60, 10));
    let result = ChartSession::new(NullRenderer::default(), config, dataset(2));
    assert!(matches!(result, Err(ChartError::Configuration(_))));
}

#[test]
fn legend_emits_one_swatch_and_label_per_series() {
    let mut session = ChartSession::new(NullRenderer::default(), config(), dataset(4))
        .expect("session init");
    session.draw_chart().expect("draw");

    let frame = session.renderer().last_frame.as_ref().expect("frame");
    // one legend swatch per series; no brush overlay or tooltip in this frame
    assert_eq!(frame.rects.len(), 2);
    let labels: Vec<&str> = frame.texts.iter().map(|t| t.text.as_str()).collect();
    assert!(labels.contains(&"apple"));
    assert!(labels.contains(&"fb"));
    assert!(labels.contains(&"Price"));
}
