//! multiline-chart: a headless multi-series line chart engine.
//!
//! The crate owns the chart's internal state machine: how tabular input is
//! projected into pixel coordinates, how that projection stays deterministic
//! across re-renders triggered by brushing, and how the brush-selection
//! hit-test decides which records survive a filter. Data acquisition and the
//! host display surface are external collaborators: hosts supply a `Dataset`
//! and consume `RenderFrame`s through a `Renderer` implementation.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartSession};
pub use error::{ChartError, ChartResult};
