mod config;
mod pipeline;
mod session;

pub use config::ChartConfig;
pub use pipeline::{
    LEGEND_STRIDE_PX, MARKER_RADIUS_PX, PipelineStage, SERIES_STROKE_WIDTH_PX, ScalePair,
    compute_scales, project_hit_samples,
};
pub use session::ChartSession;
