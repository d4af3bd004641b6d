use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use multiline_chart::core::{DomainValue, PixelRange, ScaleKind, ScaleMapping};
use multiline_chart::error::ChartError;

fn numbers(values: &[f64]) -> Vec<DomainValue> {
    values.iter().copied().map(DomainValue::Number).collect()
}

#[test]
fn point_scale_preserves_first_occurrence_order() {
    let values = vec![
        DomainValue::Text("b".to_owned()),
        DomainValue::Text("a".to_owned()),
        DomainValue::Text("b".to_owned()),
        DomainValue::Text("c".to_owned()),
        DomainValue::Text("a".to_owned()),
    ];
    let scale = ScaleMapping::build(&values, ScaleKind::Point, PixelRange::new(0.0, 100.0))
        .expect("point scale");

    let ScaleMapping::Point(point) = &scale else {
        panic!("expected point scale");
    };
    let domain: Vec<String> = point
        .domain_values()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(domain, vec!["b", "a", "c"]);
}

#[test]
fn point_scale_spreads_domain_across_range() {
    let values = numbers(&[10.0, 20.0, 30.0]);
    let scale = ScaleMapping::build(&values, ScaleKind::Point, PixelRange::new(0.0, 100.0))
        .expect("point scale");

    assert_relative_eq!(scale.to_pixel(&values[0]).unwrap(), 0.0);
    assert_relative_eq!(scale.to_pixel(&values[1]).unwrap(), 50.0);
    assert_relative_eq!(scale.to_pixel(&values[2]).unwrap(), 100.0);
}

#[test]
fn point_scale_rejects_unknown_value() {
    let values = numbers(&[1.0, 2.0]);
    let scale = ScaleMapping::build(&values, ScaleKind::Point, PixelRange::new(0.0, 10.0))
        .expect("point scale");
    assert!(scale.to_pixel(&DomainValue::Number(3.0)).is_err());
}

#[test]
fn linear_scale_domain_is_min_max_extent() {
    let values = numbers(&[5.0, -2.0, 9.0, 3.0]);
    let scale = ScaleMapping::build(&values, ScaleKind::Linear, PixelRange::new(0.0, 100.0))
        .expect("linear scale");

    let ScaleMapping::Linear(linear) = scale else {
        panic!("expected linear scale");
    };
    assert_eq!(linear.domain(), (-2.0, 9.0));
}

#[test]
fn linear_scale_round_trip_within_tolerance() {
    let values = numbers(&[10.0, 110.0]);
    let scale = ScaleMapping::build(&values, ScaleKind::Linear, PixelRange::new(0.0, 1000.0))
        .expect("linear scale");
    let ScaleMapping::Linear(linear) = scale else {
        panic!("expected linear scale");
    };

    let original = 42.5;
    let px = linear.to_pixel(original).expect("to pixel");
    let recovered = linear.pixel_to_domain(px).expect("from pixel");
    assert_relative_eq!(recovered, original, epsilon = 1e-9);
}

#[test]
fn inverted_vertical_range_puts_maximum_at_pixel_zero() {
    let values = numbers(&[10.0, 110.0]);
    let scale = ScaleMapping::build(&values, ScaleKind::Linear, PixelRange::new(320.0, 0.0))
        .expect("linear scale");

    assert_relative_eq!(scale.to_pixel(&DomainValue::Number(110.0)).unwrap(), 0.0);
    assert_relative_eq!(scale.to_pixel(&DomainValue::Number(10.0)).unwrap(), 320.0);
}

#[test]
fn time_scale_maps_extent_to_range_edges() {
    let start = Utc.with_ymd_and_hms(2019, 5, 1, 0, 0, 0).unwrap();
    let mid = Utc.with_ymd_and_hms(2019, 5, 16, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2019, 5, 31, 0, 0, 0).unwrap();
    let values = vec![
        DomainValue::Time(mid),
        DomainValue::Time(start),
        DomainValue::Time(end),
    ];

    let scale = ScaleMapping::build(&values, ScaleKind::Time, PixelRange::new(0.0, 300.0))
        .expect("time scale");
    assert_relative_eq!(scale.to_pixel(&DomainValue::Time(start)).unwrap(), 0.0);
    assert_relative_eq!(scale.to_pixel(&DomainValue::Time(end)).unwrap(), 300.0);

    let mid_px = scale.to_pixel(&DomainValue::Time(mid)).unwrap();
    assert_relative_eq!(mid_px, 150.0, epsilon = 1e-6);
}

#[test]
fn empty_dataset_fails_fast() {
    for kind in [ScaleKind::Point, ScaleKind::Linear, ScaleKind::Time] {
        let result = ScaleMapping::build(&[], kind, PixelRange::new(0.0, 100.0));
        assert!(matches!(result, Err(ChartError::EmptyDataset)));
    }
}

#[test]
fn non_numeric_value_on_linear_scale_is_invalid() {
    let values = vec![DomainValue::Text("AAPL".to_owned())];
    let result = ScaleMapping::build(&values, ScaleKind::Linear, PixelRange::new(0.0, 100.0));
    assert!(matches!(result, Err(ChartError::InvalidData(_))));
}

#[test]
fn point_scale_grid_values_fall_back_to_domain() {
    let values = numbers(&[1.0, 2.0, 1.0]);
    let scale = ScaleMapping::build(&values, ScaleKind::Point, PixelRange::new(0.0, 100.0))
        .expect("point scale");
    assert!(scale.ticks().is_none());
    assert_eq!(scale.grid_values(), numbers(&[1.0, 2.0]));
}

#[test]
fn continuous_scale_grid_values_use_generated_ticks() {
    let values = numbers(&[0.0, 100.0]);
    let scale = ScaleMapping::build(&values, ScaleKind::Linear, PixelRange::new(0.0, 430.0))
        .expect("linear scale");
    let ticks = scale.ticks().expect("linear ticks");
    assert!(ticks.len() >= 2);
    assert_eq!(scale.grid_values(), ticks);
}
