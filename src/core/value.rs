use std::fmt;

use chrono::{DateTime, Timelike, Utc};
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One cell of tabular chart input: a point in time, a number, or a category label.
///
/// The untagged representation mirrors the JSON shape produced by price-feed
/// harnesses: RFC 3339 strings become times, JSON numbers become numbers, and
/// everything else is treated as a category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainValue {
    Time(DateTime<Utc>),
    Number(f64),
    Text(String),
}

impl DomainValue {
    pub fn from_decimal(value: Decimal, field_name: &str) -> ChartResult<Self> {
        Ok(Self::Number(decimal_to_f64(value, field_name)?))
    }

    /// Numeric view used by continuous scales.
    ///
    /// Times are expressed as fractional unix seconds; labels have no numeric view.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Time(time) => Some(datetime_to_unix_seconds(*time)),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Time(time) => Some(*time),
            _ => None,
        }
    }

    /// Hashable identity used by ordinal (point) scale domains.
    #[must_use]
    pub fn key(&self) -> DomainKey {
        match self {
            Self::Number(value) => DomainKey::Number(OrderedFloat(*value)),
            Self::Time(time) => DomainKey::Time(time.timestamp_millis()),
            Self::Text(text) => DomainKey::Text(text.clone()),
        }
    }
}

impl fmt::Display for DomainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Time(time) => {
                if time.num_seconds_from_midnight() == 0 {
                    write!(f, "{}", time.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", time.format("%Y-%m-%d %H:%M:%S"))
                }
            }
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Hashable, totally ordered form of a `DomainValue`.
///
/// Ordinal scale domains deduplicate through this key while keeping
/// first-occurrence insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DomainKey {
    Number(OrderedFloat<f64>),
    Time(i64),
    Text(String),
}

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    #[test]
    fn decimal_input_becomes_a_number() {
        let value = DomainValue::from_decimal(Decimal::new(21_050, 2), "close").unwrap();
        assert_eq!(value, DomainValue::Number(210.5));
    }

    #[test]
    fn midnight_times_display_as_bare_dates() {
        let midnight = Utc.with_ymd_and_hms(2019, 5, 1, 0, 0, 0).unwrap();
        let intraday = Utc.with_ymd_and_hms(2019, 5, 1, 14, 30, 0).unwrap();
        assert_eq!(DomainValue::Time(midnight).to_string(), "2019-05-01");
        assert_eq!(
            DomainValue::Time(intraday).to_string(),
            "2019-05-01 14:30:00"
        );
    }

    #[test]
    fn keys_agree_exactly_where_values_do() {
        assert_eq!(
            DomainValue::Number(2.0).key(),
            DomainValue::Number(2.0).key()
        );
        assert_ne!(
            DomainValue::Number(2.0).key(),
            DomainValue::Text("2".to_owned()).key()
        );
    }
}
