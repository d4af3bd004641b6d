use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::{Dataset, SeriesPalette};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{BrushPhase, BrushState, TooltipContent, TooltipRow, TooltipState};
use crate::render::{RenderFrame, Renderer};

use super::pipeline::{
    FrameInputs, PipelineStage, ScalePair, build_frame, compute_scales, project_hit_samples,
};
use super::ChartConfig;

/// Top-level chart session: owns the configuration, the live dataset, the
/// single-level undo snapshot, and the render/clear/rebuild lifecycle.
///
/// Construction validates configuration and dataset shape but performs no
/// drawing: the session starts `Unmounted` and the host invokes `draw_chart`
/// once its layout has settled. All operations run synchronously on the
/// host's UI thread; a re-entrant draw is rejected with `ChartError::Busy`.
pub struct ChartSession<R: Renderer> {
    renderer: R,
    config: ChartConfig,
    palette: SeriesPalette,
    dataset: Dataset,
    previous_dataset: Option<Dataset>,
    scales: Option<ScalePair>,
    stage: PipelineStage,
    tooltip: TooltipState,
    brush: BrushState,
    hovered: Option<(usize, usize)>,
    drawing: bool,
}

impl<R: Renderer> ChartSession<R> {
    pub fn new(renderer: R, config: ChartConfig, dataset: Dataset) -> ChartResult<Self> {
        config.validate()?;
        dataset.validate_shape(&config.x_prop, &config.y_props)?;
        Ok(Self {
            renderer,
            config,
            palette: SeriesPalette::default(),
            dataset,
            previous_dataset: None,
            scales: None,
            stage: PipelineStage::Unmounted,
            tooltip: TooltipState::default(),
            brush: BrushState::default(),
            hovered: None,
            drawing: false,
        })
    }

    /// Replaces the injected series palette.
    pub fn with_palette(mut self, palette: SeriesPalette) -> ChartResult<Self> {
        if palette.is_empty() {
            return Err(ChartError::Configuration(
                "series palette must not be empty".to_owned(),
            ));
        }
        self.palette = palette;
        Ok(self)
    }

    /// Runs the full pipeline: scales → axes → grid → series → legend.
    ///
    /// A failed draw leaves previously drawn output untouched only when
    /// `clear_chart` has not run first; callers must not assume rollback
    /// mid-pipeline.
    pub fn draw_chart(&mut self) -> ChartResult<()> {
        if self.drawing {
            return Err(ChartError::Busy);
        }
        self.drawing = true;
        let result = self.draw_pass();
        self.drawing = false;
        result
    }

    fn draw_pass(&mut self) -> ChartResult<()> {
        let viewport = self.config.viewport();
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.stage = PipelineStage::SurfaceReady;
        trace!(stage = ?self.stage, "surface ready");

        let scales = compute_scales(&self.config, &self.dataset)?;
        self.stage = PipelineStage::AxesReady;
        trace!(stage = ?self.stage, "axes ready");

        let frame = build_frame(&FrameInputs {
            config: &self.config,
            dataset: &self.dataset,
            scales: &scales,
            palette: &self.palette,
            hovered: self.hovered,
            brush_overlay: self.brush.preview_rect(),
            tooltip: &self.tooltip,
        })?;
        self.renderer.render(&frame)?;

        self.scales = Some(scales);
        self.stage = PipelineStage::Drawn;
        debug!(
            records = self.dataset.len(),
            series = self.config.series_count(),
            "chart drawn"
        );
        Ok(())
    }

    /// Tears down all drawn elements so `draw_chart` can be re-invoked.
    ///
    /// The tooltip state deliberately survives: it belongs to the session, not
    /// to one drawn frame.
    pub fn clear_chart(&mut self) -> ChartResult<()> {
        let frame = RenderFrame::new(self.config.viewport());
        self.renderer.render(&frame)?;
        self.scales = None;
        self.stage = PipelineStage::SurfaceReady;
        debug!("chart cleared");
        Ok(())
    }

    /// Restores the dataset snapshotted by the last brush filter and re-runs
    /// the pipeline. No-op when no snapshot exists.
    pub fn reset_chart(&mut self) -> ChartResult<()> {
        let Some(previous) = self.previous_dataset.take() else {
            trace!("reset requested with no snapshot; ignoring");
            return Ok(());
        };
        debug!(
            from = self.dataset.len(),
            to = previous.len(),
            "dataset restored from snapshot"
        );
        self.dataset = previous;
        self.hovered = None;
        self.clear_chart()?;
        self.draw_chart()
    }

    pub fn on_drag_start(&mut self, x: f64, y: f64) {
        self.brush.on_drag_start(x, y);
    }

    pub fn on_drag_move(&mut self, x: f64, y: f64) {
        self.brush.on_drag_move(x, y);
    }

    /// Ends the brush drag and applies the selection filter.
    ///
    /// Returns `true` when the dataset was replaced and redrawn. An empty or
    /// missed selection is silently absorbed so the chart never collapses to
    /// a blank state.
    pub fn on_drag_end(&mut self, x: f64, y: f64) -> ChartResult<bool> {
        let Some(rect) = self.brush.on_drag_end(x, y) else {
            return Ok(false);
        };
        self.brush.acknowledge();

        let Some(scales) = &self.scales else {
            warn!("brush released before any draw; ignoring selection");
            return Ok(false);
        };

        let samples = project_hit_samples(&self.config, &self.dataset, scales)?;
        let filtered: Vec<_> = self
            .dataset
            .records()
            .iter()
            .zip(&samples)
            .filter(|(_, sample)| rect.contains(sample))
            .map(|(record, _)| record.clone())
            .collect();

        if filtered.is_empty() {
            debug!("brush selection matched no records; keeping current view");
            return Ok(false);
        }

        let filtered = Dataset::new(filtered);
        debug!(
            from = self.dataset.len(),
            to = filtered.len(),
            "brush filter applied"
        );
        self.previous_dataset = Some(std::mem::replace(&mut self.dataset, filtered));
        self.hovered = None;
        self.clear_chart()?;
        self.draw_chart()?;
        Ok(true)
    }

    /// Marks the hovered point, fills the tooltip, and redraws.
    ///
    /// Tooltip content is the record's x value plus every series'
    /// (label, color, value) triple, positioned near the pointer.
    pub fn on_pointer_enter(
        &mut self,
        series: usize,
        record: usize,
        pointer_x: f64,
        pointer_y: f64,
    ) -> ChartResult<()> {
        if series >= self.config.series_count() {
            return Err(ChartError::InvalidData(format!(
                "series index {series} out of range"
            )));
        }
        let Some(target) = self.dataset.records().get(record) else {
            return Err(ChartError::InvalidData(format!(
                "record index {record} out of range"
            )));
        };

        let heading = target
            .x_value(&self.config.x_prop)
            .map(|value| value.to_string())
            .unwrap_or_default();
        let mut rows: SmallVec<[TooltipRow; 2]> =
            SmallVec::with_capacity(self.config.series_count());
        for (index, y_prop) in self.config.y_props.iter().enumerate() {
            let value = target.y_value(index, y_prop).ok_or_else(|| {
                ChartError::Configuration(format!(
                    "record {record} slot {index} is missing y key `{y_prop}`"
                ))
            })?;
            rows.push(TooltipRow {
                label: y_prop.clone(),
                color: self.palette.color(index),
                value: value.clone(),
            });
        }

        self.hovered = Some((series, record));
        self.tooltip
            .show(TooltipContent { heading, rows }, pointer_x, pointer_y);
        self.redraw_if_drawn()
    }

    /// Clears the hover mark and starts the tooltip fade-out.
    pub fn on_pointer_leave(&mut self) -> ChartResult<()> {
        self.hovered = None;
        self.tooltip.hide();
        self.redraw_if_drawn()
    }

    /// Advances the tooltip fade transitions; returns whether anything
    /// changed (and was redrawn).
    pub fn advance_animations(&mut self, delta_seconds: f64) -> ChartResult<bool> {
        if self.tooltip.step(delta_seconds) {
            self.redraw_if_drawn()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn redraw_if_drawn(&mut self) -> ChartResult<()> {
        if self.stage == PipelineStage::Drawn {
            self.draw_chart()
        } else {
            Ok(())
        }
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn previous_dataset(&self) -> Option<&Dataset> {
        self.previous_dataset.as_ref()
    }

    #[must_use]
    pub fn scales(&self) -> Option<&ScalePair> {
        self.scales.as_ref()
    }

    #[must_use]
    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    #[must_use]
    pub fn brush_phase(&self) -> BrushPhase {
        self.brush.phase()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
