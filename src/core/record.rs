use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::value::DomainValue;
use crate::error::{ChartError, ChartResult};

/// One per-series cell of a record: a key → value mapping carrying the shared
/// x field plus that series' y field.
pub type Slot = IndexMap<String, DomainValue>;

/// One aligned row of chart input: an ordered tuple of slots, one per series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    slots: Vec<Slot>,
}

impl Record {
    #[must_use]
    pub fn new(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Shared x value, read from the first slot.
    #[must_use]
    pub fn x_value(&self, x_prop: &str) -> Option<&DomainValue> {
        self.slots.first().and_then(|slot| slot.get(x_prop))
    }

    /// Series `series` y value, read from that series' slot.
    #[must_use]
    pub fn y_value(&self, series: usize, y_prop: &str) -> Option<&DomainValue> {
        self.slots.get(series).and_then(|slot| slot.get(y_prop))
    }
}

/// Ordered sequence of records; order defines the horizontal draw order.
///
/// Owned exclusively by the chart session and replaced wholesale on brushing
/// or reset, never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Parses the JSON shape produced by the data-acquisition harness:
    /// an array of records, each an array of slot objects.
    pub fn from_json_records(json: &str) -> ChartResult<Self> {
        let records: Vec<Record> = serde_json::from_str(json)
            .map_err(|err| ChartError::InvalidData(format!("dataset json: {err}")))?;
        Ok(Self::new(records))
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Checks the record/series alignment contract before anything is drawn.
    ///
    /// Every record must carry one slot per configured series, every slot must
    /// carry the shared x key, and slot `i` must carry `y_props[i]`.
    pub fn validate_shape(&self, x_prop: &str, y_props: &[String]) -> ChartResult<()> {
        for (index, record) in self.records.iter().enumerate() {
            if record.slot_count() != y_props.len() {
                return Err(ChartError::Configuration(format!(
                    "record {index} has {} slots but {} series are configured",
                    record.slot_count(),
                    y_props.len()
                )));
            }
            for (series, slot) in record.slots().iter().enumerate() {
                if !slot.contains_key(x_prop) {
                    return Err(ChartError::Configuration(format!(
                        "record {index} slot {series} is missing x key `{x_prop}`"
                    )));
                }
                let y_prop = &y_props[series];
                if !slot.contains_key(y_prop.as_str()) {
                    return Err(ChartError::Configuration(format!(
                        "record {index} slot {series} is missing y key `{y_prop}`"
                    )));
                }
            }
        }
        Ok(())
    }

    /// X-axis domain values: one per record, taken from the first slot.
    pub(crate) fn x_values(&self, x_prop: &str) -> ChartResult<Vec<DomainValue>> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                record.x_value(x_prop).cloned().ok_or_else(|| {
                    ChartError::Configuration(format!(
                        "record {index} is missing x key `{x_prop}`"
                    ))
                })
            })
            .collect()
    }

    /// Y-axis domain values: one per (record, series) pair, record-major.
    pub(crate) fn y_values(&self, y_props: &[String]) -> ChartResult<Vec<DomainValue>> {
        let mut values = Vec::with_capacity(self.records.len() * y_props.len());
        for (index, record) in self.records.iter().enumerate() {
            for (series, y_prop) in y_props.iter().enumerate() {
                let value = record.y_value(series, y_prop).cloned().ok_or_else(|| {
                    ChartError::Configuration(format!(
                        "record {index} slot {series} is missing y key `{y_prop}`"
                    ))
                })?;
                values.push(value);
            }
        }
        Ok(values)
    }
}
