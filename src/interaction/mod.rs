mod brush;
mod tooltip;

pub use brush::{BrushPhase, BrushState};
pub use tooltip::{
    TOOLTIP_FADE_SECONDS, TOOLTIP_MAX_OPACITY, TOOLTIP_OFFSET_X_PX, TOOLTIP_OFFSET_Y_PX,
    TooltipContent, TooltipRow, TooltipState,
};
