use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{
    Dataset, HitSample, PixelRange, ScaleMapping, SelectionRect, SeriesPalette,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::TooltipState;
use crate::render::{
    Color, LinePrimitive, MarkerPrimitive, PathPrimitive, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

use super::ChartConfig;

/// Series path stroke width, in pixels.
pub const SERIES_STROKE_WIDTH_PX: f64 = 1.5;
/// Hoverable point marker radius, in pixels.
pub const MARKER_RADIUS_PX: f64 = 4.0;
/// Legend column stride, in pixels.
pub const LEGEND_STRIDE_PX: f64 = 50.0;
/// Axis/grid label font size, in pixels.
const LABEL_FONT_SIZE_PX: f64 = 10.0;
/// Tooltip body font size, in pixels.
const TOOLTIP_FONT_SIZE_PX: f64 = 11.0;
const TOOLTIP_LINE_HEIGHT_PX: f64 = 14.0;
const TOOLTIP_PADDING_PX: f64 = 6.0;
const TOOLTIP_GLYPH_WIDTH_PX: f64 = 6.5;

fn grid_color() -> Color {
    // #efefef, the original gridline stroke.
    Color::from_rgb8(0xef, 0xef, 0xef)
}

fn axis_color() -> Color {
    Color::rgb(0.0, 0.0, 0.0)
}

fn brush_overlay_color() -> Color {
    Color::rgb(0.3, 0.3, 0.3).with_alpha(0.15)
}

fn tooltip_background_color() -> Color {
    Color::rgb(1.0, 1.0, 1.0)
}

/// Draw lifecycle of one session surface.
///
/// Transitions are strictly sequential and driven by the single draw entry
/// point: `Unmounted → SurfaceReady → AxesReady → Drawn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStage {
    Unmounted,
    SurfaceReady,
    AxesReady,
    Drawn,
}

/// Built per-axis mappings for one draw pass.
///
/// Scales are values returned from the scale stage and threaded through the
/// remaining stages (and into brush hit-testing), never implicit object state.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalePair {
    pub x: ScaleMapping,
    pub y: ScaleMapping,
}

/// Scale stage: derives both axis mappings from the current dataset.
///
/// X domain values come from slot 0 of each record; y domain values are
/// flattened across all (record, series) pairs. The vertical range is
/// inverted so pixel 0 corresponds to the data maximum.
pub fn compute_scales(config: &ChartConfig, dataset: &Dataset) -> ChartResult<ScalePair> {
    let x_values = dataset.x_values(&config.x_prop)?;
    let y_values = dataset.y_values(&config.y_props)?;
    let x = ScaleMapping::build(
        &x_values,
        config.x_scale,
        PixelRange::new(0.0, config.plot_width()),
    )?;
    let y = ScaleMapping::build(
        &y_values,
        config.y_scale,
        PixelRange::new(config.plot_height(), 0.0),
    )?;
    debug!(
        x_kind = ?x.kind(),
        y_kind = ?y.kind(),
        records = dataset.len(),
        "scales computed"
    );
    Ok(ScalePair { x, y })
}

/// Projects every record into viewport-absolute pixel space for brush
/// hit-testing: the shared x pixel plus one y pixel per series.
pub fn project_hit_samples(
    config: &ChartConfig,
    dataset: &Dataset,
    scales: &ScalePair,
) -> ChartResult<Vec<HitSample>> {
    let left = f64::from(config.margin.left);
    let top = f64::from(config.margin.top);
    let mut samples = Vec::with_capacity(dataset.len());
    for (index, record) in dataset.records().iter().enumerate() {
        let x_value = record.x_value(&config.x_prop).ok_or_else(|| {
            ChartError::Configuration(format!(
                "record {index} is missing x key `{}`",
                config.x_prop
            ))
        })?;
        let x = left + scales.x.to_pixel(x_value)?;
        let mut ys: SmallVec<[f64; 2]> = SmallVec::with_capacity(config.series_count());
        for (series, y_prop) in config.y_props.iter().enumerate() {
            let y_value = record.y_value(series, y_prop).ok_or_else(|| {
                ChartError::Configuration(format!(
                    "record {index} slot {series} is missing y key `{y_prop}`"
                ))
            })?;
            ys.push(top + scales.y.to_pixel(y_value)?);
        }
        samples.push(HitSample { x, ys });
    }
    Ok(samples)
}

/// Everything the frame stage needs, borrowed from the session.
pub(super) struct FrameInputs<'a> {
    pub config: &'a ChartConfig,
    pub dataset: &'a Dataset,
    pub scales: &'a ScalePair,
    pub palette: &'a SeriesPalette,
    pub hovered: Option<(usize, usize)>,
    pub brush_overlay: Option<SelectionRect>,
    pub tooltip: &'a TooltipState,
}

/// Frame stage: assembles axes, gridlines, series paths and markers, legend,
/// and the transient brush/tooltip overlays into one deterministic frame.
pub(super) fn build_frame(inputs: &FrameInputs<'_>) -> ChartResult<RenderFrame> {
    let config = inputs.config;
    let mut frame = RenderFrame::new(config.viewport());

    append_axes(&mut frame, config, inputs.scales)?;
    append_grid(&mut frame, config, inputs.scales)?;
    append_series(&mut frame, inputs)?;
    append_legend(&mut frame, config, inputs.palette);
    if let Some(rect) = inputs.brush_overlay {
        frame.push_rect(RectPrimitive::new(
            rect.top_left.0,
            rect.top_left.1,
            rect.width(),
            rect.height(),
            brush_overlay_color(),
        ));
    }
    append_tooltip(&mut frame, inputs.tooltip);

    Ok(frame)
}

fn append_axes(
    frame: &mut RenderFrame,
    config: &ChartConfig,
    scales: &ScalePair,
) -> ChartResult<()> {
    let left = f64::from(config.margin.left);
    let top = f64::from(config.margin.top);
    let right = left + config.plot_width();
    let bottom = top + config.plot_height();

    frame.push_line(LinePrimitive::new(left, bottom, right, bottom, 1.0, axis_color()));
    frame.push_line(LinePrimitive::new(left, top, left, bottom, 1.0, axis_color()));

    // Tick labels below the x axis, centered on each tick.
    for value in scales.x.grid_values() {
        let x = left + scales.x.to_pixel(&value)?;
        frame.push_text(TextPrimitive::new(
            value.to_string(),
            x,
            bottom + 4.0,
            LABEL_FONT_SIZE_PX,
            axis_color(),
            TextHAlign::Center,
        ));
    }
    // Tick labels left of the y axis, right-aligned against it.
    for value in scales.y.grid_values() {
        let y = top + scales.y.to_pixel(&value)?;
        frame.push_text(TextPrimitive::new(
            value.to_string(),
            left - 6.0,
            y - LABEL_FONT_SIZE_PX / 2.0,
            LABEL_FONT_SIZE_PX,
            axis_color(),
            TextHAlign::Right,
        ));
    }

    if let Some(label) = &config.x_label {
        if !label.is_empty() {
            frame.push_text(TextPrimitive::new(
                label.clone(),
                right,
                f64::from(config.height) - f64::from(config.margin.bottom) + 10.0,
                LABEL_FONT_SIZE_PX,
                axis_color(),
                TextHAlign::Right,
            ));
        }
    }
    Ok(())
}

fn append_grid(
    frame: &mut RenderFrame,
    config: &ChartConfig,
    scales: &ScalePair,
) -> ChartResult<()> {
    let left = f64::from(config.margin.left);
    let top = f64::from(config.margin.top);
    let right = left + config.plot_width();
    let bottom = top + config.plot_height();

    for value in scales.x.grid_values() {
        let x = left + scales.x.to_pixel(&value)?;
        frame.push_line(LinePrimitive::new(x, top + 4.0, x, bottom, 1.0, grid_color()));
    }
    for value in scales.y.grid_values() {
        let y = top + scales.y.to_pixel(&value)?;
        frame.push_line(LinePrimitive::new(left, y, right, y, 1.0, grid_color()));
    }
    Ok(())
}

fn append_series(frame: &mut RenderFrame, inputs: &FrameInputs<'_>) -> ChartResult<()> {
    let config = inputs.config;
    let left = f64::from(config.margin.left);
    let top = f64::from(config.margin.top);

    for (series, y_prop) in config.y_props.iter().enumerate() {
        let color = inputs.palette.color(series);
        let mut points = Vec::with_capacity(inputs.dataset.len());
        for (index, record) in inputs.dataset.records().iter().enumerate() {
            let x_value = record.x_value(&config.x_prop).ok_or_else(|| {
                ChartError::Configuration(format!(
                    "record {index} is missing x key `{}`",
                    config.x_prop
                ))
            })?;
            let y_value = record.y_value(series, y_prop).ok_or_else(|| {
                ChartError::Configuration(format!(
                    "record {index} slot {series} is missing y key `{y_prop}`"
                ))
            })?;
            let x = left + inputs.scales.x.to_pixel(x_value)?;
            let y = top + inputs.scales.y.to_pixel(y_value)?;
            points.push((x, y));
        }

        for (index, &(x, y)) in points.iter().enumerate() {
            let fill = match inputs.hovered {
                Some((hovered_series, hovered_record))
                    if hovered_series == series && hovered_record == index =>
                {
                    Some(color)
                }
                _ => None,
            };
            frame.push_marker(MarkerPrimitive::new(
                x,
                y,
                MARKER_RADIUS_PX,
                fill,
                series,
                index,
            ));
        }
        frame.push_path(PathPrimitive::new(
            points,
            SERIES_STROKE_WIDTH_PX,
            color,
            series,
        ));
    }
    Ok(())
}

fn append_legend(frame: &mut RenderFrame, config: &ChartConfig, palette: &SeriesPalette) {
    // One row below the plot, a third of the bottom margin above the chart edge.
    let y = f64::from(config.height) - f64::from(config.margin.bottom) / 3.0;
    let left = f64::from(config.margin.left);
    let swatch = SeriesPalette::SWATCH_RADIUS_PX;

    for (series, y_prop) in config.y_props.iter().enumerate() {
        let x = left + series as f64 * LEGEND_STRIDE_PX;
        frame.push_rect(RectPrimitive::new(
            x - swatch,
            y - swatch,
            swatch * 2.0,
            swatch * 2.0,
            palette.color(series),
        ));
        frame.push_text(TextPrimitive::new(
            y_prop.clone(),
            x + swatch + 1.0,
            y - LABEL_FONT_SIZE_PX / 2.0,
            LABEL_FONT_SIZE_PX,
            palette.color(series),
            TextHAlign::Left,
        ));
    }
}

fn append_tooltip(frame: &mut RenderFrame, tooltip: &TooltipState) {
    let Some(content) = tooltip.content() else {
        return;
    };
    if !tooltip.is_visible() {
        return;
    }

    let opacity = tooltip.opacity();
    let (x, y) = tooltip.position();

    let widest = content
        .rows
        .iter()
        .map(|row| row.label.len() + row.value.to_string().len() + 2)
        .chain(std::iter::once(content.heading.len()))
        .max()
        .unwrap_or(0);
    let width = widest as f64 * TOOLTIP_GLYPH_WIDTH_PX + TOOLTIP_PADDING_PX * 2.0;
    let height =
        (content.rows.len() + 1) as f64 * TOOLTIP_LINE_HEIGHT_PX + TOOLTIP_PADDING_PX * 2.0;

    frame.push_rect(RectPrimitive::new(
        x,
        y,
        width,
        height,
        tooltip_background_color().with_alpha(opacity),
    ));
    frame.push_text(TextPrimitive::new(
        content.heading.clone(),
        x + TOOLTIP_PADDING_PX,
        y + TOOLTIP_PADDING_PX,
        TOOLTIP_FONT_SIZE_PX,
        axis_color().with_alpha(opacity),
        TextHAlign::Left,
    ));
    for (row_index, row) in content.rows.iter().enumerate() {
        frame.push_text(TextPrimitive::new(
            format!("{}: {}", row.label, row.value),
            x + TOOLTIP_PADDING_PX,
            y + TOOLTIP_PADDING_PX + (row_index + 1) as f64 * TOOLTIP_LINE_HEIGHT_PX,
            TOOLTIP_FONT_SIZE_PX,
            row.color.with_alpha(row.color.alpha * opacity),
            TextHAlign::Left,
        ));
    }
}
