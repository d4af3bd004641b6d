use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_HEIGHT, DEFAULT_WIDTH, Margin, ScaleKind, Viewport};
use crate::error::{ChartError, ChartResult};

/// Chart bootstrap configuration, immutable after session construction.
///
/// Series identity is positional: series `i` is named by `y_props[i]` and
/// reads its values from slot `i` of every record.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub margin: Margin,
    pub x_prop: String,
    pub y_props: Vec<String>,
    #[serde(default)]
    pub x_scale: ScaleKind,
    #[serde(default)]
    pub y_scale: ScaleKind,
    #[serde(default)]
    pub x_label: Option<String>,
}

impl ChartConfig {
    /// Creates a config with default size, margins, and `point` scales.
    #[must_use]
    pub fn new(x_prop: impl Into<String>, y_props: Vec<String>) -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin: Margin::default(),
            x_prop: x_prop.into(),
            y_props,
            x_scale: ScaleKind::default(),
            y_scale: ScaleKind::default(),
            x_label: None,
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_scales(mut self, x_scale: ScaleKind, y_scale: ScaleKind) -> Self {
        self.x_scale = x_scale;
        self.y_scale = y_scale;
        self
    }

    #[must_use]
    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.y_props.len()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Horizontal pixel extent of the plot area.
    #[must_use]
    pub fn plot_width(&self) -> f64 {
        f64::from(self.width) - f64::from(self.margin.hsum())
    }

    /// Vertical pixel extent of the plot area.
    #[must_use]
    pub fn plot_height(&self) -> f64 {
        f64::from(self.height) - f64::from(self.margin.vsum())
    }

    /// Fails fast on invalid configuration, before any drawing side effect.
    pub fn validate(&self) -> ChartResult<()> {
        if self.x_prop.is_empty() {
            return Err(ChartError::Configuration(
                "x_prop must not be empty".to_owned(),
            ));
        }
        if self.y_props.is_empty() {
            return Err(ChartError::Configuration(
                "at least one y_prop is required".to_owned(),
            ));
        }
        if let Some(position) = self.y_props.iter().position(String::is_empty) {
            return Err(ChartError::Configuration(format!(
                "y_props[{position}] must not be empty"
            )));
        }
        if !self.viewport().is_valid() {
            return Err(ChartError::Configuration(format!(
                "viewport must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.margin.hsum() >= self.width || self.margin.vsum() >= self.height {
            return Err(ChartError::Configuration(format!(
                "margins {:?} leave no plot area inside {}x{}",
                self.margin, self.width, self.height
            )));
        }
        Ok(())
    }
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}
