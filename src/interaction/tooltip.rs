use smallvec::SmallVec;

use crate::core::DomainValue;
use crate::render::Color;

/// Fade duration for tooltip show/hide, mirroring the original 100 ms
/// transitions.
pub const TOOLTIP_FADE_SECONDS: f64 = 0.1;
/// Fully shown tooltip opacity.
pub const TOOLTIP_MAX_OPACITY: f64 = 0.99;
/// Horizontal offset from the pointer, in pixels.
pub const TOOLTIP_OFFSET_X_PX: f64 = 4.0;
/// Vertical offset from the pointer, in pixels.
pub const TOOLTIP_OFFSET_Y_PX: f64 = -28.0;

/// One (series label, series color, value) row of tooltip content.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipRow {
    pub label: String,
    pub color: Color,
    pub value: DomainValue,
}

/// Tooltip body for one hovered record: the shared x value as heading plus
/// one row per plotted series.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub heading: String,
    pub rows: SmallVec<[TooltipRow; 2]>,
}

/// Per-session tooltip overlay state.
///
/// One tooltip exists per chart session, created with it and dropped with it;
/// it survives `clear_chart`. Fades are deterministic transitions advanced by
/// the host clock, fire-and-forget, and idempotent when re-triggered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipState {
    content: Option<TooltipContent>,
    position: (f64, f64),
    opacity: f64,
    target_opacity: f64,
}

impl TooltipState {
    /// Fills the tooltip and starts the fade-in, positioned near the pointer.
    pub fn show(&mut self, content: TooltipContent, pointer_x: f64, pointer_y: f64) {
        self.content = Some(content);
        self.position = (
            pointer_x + TOOLTIP_OFFSET_X_PX,
            pointer_y + TOOLTIP_OFFSET_Y_PX,
        );
        self.target_opacity = TOOLTIP_MAX_OPACITY;
    }

    /// Starts the fade-out; content is kept until fully faded.
    pub fn hide(&mut self) {
        self.target_opacity = 0.0;
    }

    /// Advances the fade by `delta_seconds`; returns whether the opacity
    /// changed (a redraw hint for the host).
    pub fn step(&mut self, delta_seconds: f64) -> bool {
        if delta_seconds <= 0.0 || self.opacity == self.target_opacity {
            return false;
        }
        let rate = TOOLTIP_MAX_OPACITY / TOOLTIP_FADE_SECONDS;
        let max_delta = rate * delta_seconds;
        let gap = self.target_opacity - self.opacity;
        if gap.abs() <= max_delta {
            self.opacity = self.target_opacity;
        } else {
            self.opacity += max_delta * gap.signum();
        }
        if self.opacity == 0.0 {
            self.content = None;
        }
        true
    }

    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.content.is_some()
    }

    #[must_use]
    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        self.position
    }
}
