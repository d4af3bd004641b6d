use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::value::{DomainKey, DomainValue, datetime_to_unix_seconds};
use crate::error::{ChartError, ChartResult};

/// Declared scale kind for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    /// Discrete mapping: one pixel slot per distinct domain value.
    #[default]
    Point,
    Linear,
    Time,
}

impl ScaleKind {
    /// Parses a configured kind name, failing fast on unknown names instead
    /// of silently defaulting.
    pub fn parse(name: &str) -> ChartResult<Self> {
        match name {
            "point" => Ok(Self::Point),
            "linear" => Ok(Self::Linear),
            "time" => Ok(Self::Time),
            other => Err(ChartError::Configuration(format!(
                "unknown scale kind `{other}`; expected `point`, `linear`, or `time`"
            ))),
        }
    }
}

/// Pixel extent of one axis.
///
/// `start` may exceed `end`: the vertical axis is built inverted so that
/// pixel 0 corresponds to the data maximum (top-left screen origin).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRange {
    pub start: f64,
    pub end: f64,
}

impl PixelRange {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }
}

const TICK_TARGET_SPACING_PX: f64 = 60.0;
const TICK_MIN_COUNT: usize = 2;
const TICK_MAX_COUNT: usize = 12;

/// Discrete mapping whose domain preserves first-occurrence insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct PointScale {
    domain: Vec<DomainValue>,
    keys: IndexSet<DomainKey>,
    range: PixelRange,
}

impl PointScale {
    pub fn build(values: &[DomainValue], range: PixelRange) -> ChartResult<Self> {
        if values.is_empty() {
            return Err(ChartError::EmptyDataset);
        }
        let mut domain = Vec::new();
        let mut keys = IndexSet::new();
        for value in values {
            if keys.insert(value.key()) {
                domain.push(value.clone());
            }
        }
        Ok(Self { domain, keys, range })
    }

    #[must_use]
    pub fn domain_values(&self) -> &[DomainValue] {
        &self.domain
    }

    pub fn to_pixel(&self, value: &DomainValue) -> ChartResult<f64> {
        let index = self.keys.get_index_of(&value.key()).ok_or_else(|| {
            ChartError::InvalidData(format!("value `{value}` is not in the ordinal domain"))
        })?;
        Ok(self.position(index))
    }

    fn position(&self, index: usize) -> f64 {
        if self.domain.len() < 2 {
            return self.range.start;
        }
        let step = self.range.span() / (self.domain.len() - 1) as f64;
        self.range.start + step * index as f64
    }
}

/// Continuous affine mapping over a numeric [min, max] domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range: PixelRange,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64, range: PixelRange) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(ChartError::InvalidData(
                "linear scale domain must be finite".to_owned(),
            ));
        }
        Ok(Self {
            domain_start,
            domain_end,
            range,
        })
    }

    pub fn build(values: &[DomainValue], range: PixelRange) -> ChartResult<Self> {
        let numbers = numeric_values(values, "linear")?;
        if numbers.is_empty() {
            return Err(ChartError::EmptyDataset);
        }
        let mut sorted = numbers;
        sorted.sort_by(f64::total_cmp);
        Self::new(sorted[0], sorted[sorted.len() - 1], range)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> PixelRange {
        self.range
    }

    pub fn to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }
        let span = self.domain_end - self.domain_start;
        if span == 0.0 {
            // Degenerate domain: every value collapses onto the range start.
            return Ok(self.range.start);
        }
        let normalized = (value - self.domain_start) / span;
        Ok(self.range.start + normalized * self.range.span())
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        let range_span = self.range.span();
        if range_span == 0.0 {
            return Ok(self.domain_start);
        }
        let normalized = (pixel - self.range.start) / range_span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    #[must_use]
    pub fn ticks(self) -> Vec<f64> {
        linear_ticks(
            self.domain_start,
            self.domain_end,
            tick_target_count(self.range.span().abs()),
        )
    }
}

/// Continuous mapping over a temporal [earliest, latest] domain,
/// linear in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain_start: DateTime<Utc>,
    domain_end: DateTime<Utc>,
    inner: LinearScale,
}

impl TimeScale {
    pub fn build(values: &[DomainValue], range: PixelRange) -> ChartResult<Self> {
        if values.is_empty() {
            return Err(ChartError::EmptyDataset);
        }
        let mut times = Vec::with_capacity(values.len());
        for value in values {
            let time = value.as_time().ok_or_else(|| {
                ChartError::InvalidData(format!("value `{value}` is not a time on a time scale"))
            })?;
            times.push(time);
        }
        let domain_start = *times.iter().min().expect("non-empty");
        let domain_end = *times.iter().max().expect("non-empty");
        let inner = LinearScale::new(
            datetime_to_unix_seconds(domain_start),
            datetime_to_unix_seconds(domain_end),
            range,
        )?;
        Ok(Self {
            domain_start,
            domain_end,
            inner,
        })
    }

    #[must_use]
    pub fn domain(self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.domain_start, self.domain_end)
    }

    pub fn to_pixel(self, time: DateTime<Utc>) -> ChartResult<f64> {
        self.inner.to_pixel(datetime_to_unix_seconds(time))
    }

    #[must_use]
    pub fn ticks(self) -> Vec<DateTime<Utc>> {
        self.inner
            .ticks()
            .into_iter()
            .filter_map(|seconds| DateTime::from_timestamp_millis((seconds * 1000.0).round() as i64))
            .collect()
    }
}

/// A built per-axis coordinate mapping: domain value → pixel offset.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleMapping {
    Point(PointScale),
    Linear(LinearScale),
    Time(TimeScale),
}

impl ScaleMapping {
    /// Builds the mapping declared by `kind` from the axis's domain values.
    ///
    /// An empty value slice fails fast with `EmptyDataset`; this is applied
    /// consistently for both axes rather than rendering an empty scale.
    pub fn build(values: &[DomainValue], kind: ScaleKind, range: PixelRange) -> ChartResult<Self> {
        match kind {
            ScaleKind::Point => Ok(Self::Point(PointScale::build(values, range)?)),
            ScaleKind::Linear => Ok(Self::Linear(LinearScale::build(values, range)?)),
            ScaleKind::Time => Ok(Self::Time(TimeScale::build(values, range)?)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Point(_) => ScaleKind::Point,
            Self::Linear(_) => ScaleKind::Linear,
            Self::Time(_) => ScaleKind::Time,
        }
    }

    pub fn to_pixel(&self, value: &DomainValue) -> ChartResult<f64> {
        match self {
            Self::Point(scale) => scale.to_pixel(value),
            Self::Linear(scale) => {
                let number = value.as_number().ok_or_else(|| {
                    ChartError::InvalidData(format!(
                        "value `{value}` is not numeric on a linear scale"
                    ))
                })?;
                scale.to_pixel(number)
            }
            Self::Time(scale) => {
                let time = value.as_time().ok_or_else(|| {
                    ChartError::InvalidData(format!(
                        "value `{value}` is not a time on a time scale"
                    ))
                })?;
                scale.to_pixel(time)
            }
        }
    }

    /// Generated tick values, when the scale kind produces them.
    #[must_use]
    pub fn ticks(&self) -> Option<Vec<DomainValue>> {
        match self {
            Self::Point(_) => None,
            Self::Linear(scale) => {
                Some(scale.ticks().into_iter().map(DomainValue::Number).collect())
            }
            Self::Time(scale) => Some(scale.ticks().into_iter().map(DomainValue::Time).collect()),
        }
    }

    /// Gridline positions: generated ticks, or the domain values themselves
    /// for ordinal scales without a tick producer.
    #[must_use]
    pub fn grid_values(&self) -> Vec<DomainValue> {
        match self.ticks() {
            Some(ticks) => ticks,
            None => match self {
                Self::Point(scale) => scale.domain_values().to_vec(),
                _ => Vec::new(),
            },
        }
    }
}

fn numeric_values(values: &[DomainValue], kind: &str) -> ChartResult<Vec<f64>> {
    values
        .iter()
        .map(|value| {
            value.as_number().ok_or_else(|| {
                ChartError::InvalidData(format!("value `{value}` is not numeric on a {kind} scale"))
            })
        })
        .collect()
}

fn tick_target_count(axis_span_px: f64) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return TICK_MIN_COUNT;
    }
    let raw = (axis_span_px / TICK_TARGET_SPACING_PX).floor() as usize + 1;
    raw.clamp(TICK_MIN_COUNT, TICK_MAX_COUNT)
}

/// Round tick values at 1/2/5 × 10^k steps covering [start, stop].
fn linear_ticks(start: f64, stop: f64, target_count: usize) -> Vec<f64> {
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if start < stop { (start, stop) } else { (stop, start) };
    let step = tick_step(lo, hi, target_count);
    if step <= 0.0 || !step.is_finite() {
        return vec![lo, hi];
    }
    let first = (lo / step).ceil();
    let last = (hi / step).floor();
    let mut ticks = Vec::new();
    let mut i = first;
    while i <= last {
        ticks.push(i * step);
        i += 1.0;
    }
    ticks
}

fn tick_step(lo: f64, hi: f64, target_count: usize) -> f64 {
    let raw = (hi - lo) / target_count.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let factor = if residual >= 7.07 {
        10.0
    } else if residual >= 3.162 {
        5.0
    } else if residual >= 1.414 {
        2.0
    } else {
        1.0
    };
    factor * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_steps_are_round() {
        let ticks = linear_ticks(0.0, 100.0, 5);
        assert_eq!(ticks, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn degenerate_domain_yields_single_tick() {
        assert_eq!(linear_ticks(42.0, 42.0, 10), vec![42.0]);
    }

    #[test]
    fn unknown_kind_name_is_rejected() {
        assert!(ScaleKind::parse("scaleBanana").is_err());
        assert_eq!(ScaleKind::parse("time").unwrap(), ScaleKind::Time);
    }
}
