use serde::{Deserialize, Serialize};

use crate::core::SelectionRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrushPhase {
    Idle,
    Dragging,
    Selected,
}

/// Drag-to-select state machine: `Idle → Dragging → Selected → Idle`.
///
/// The selection rectangle is transient: it exists for exactly one filtering
/// operation and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushState {
    phase: BrushPhase,
    origin: (f64, f64),
    cursor: (f64, f64),
}

impl Default for BrushState {
    fn default() -> Self {
        Self {
            phase: BrushPhase::Idle,
            origin: (0.0, 0.0),
            cursor: (0.0, 0.0),
        }
    }
}

impl BrushState {
    #[must_use]
    pub fn phase(self) -> BrushPhase {
        self.phase
    }

    pub fn on_drag_start(&mut self, x: f64, y: f64) {
        self.phase = BrushPhase::Dragging;
        self.origin = (x, y);
        self.cursor = (x, y);
    }

    pub fn on_drag_move(&mut self, x: f64, y: f64) {
        if self.phase == BrushPhase::Dragging {
            self.cursor = (x, y);
        }
    }

    /// Ends the drag and returns the selection, if it has any area.
    ///
    /// A zero-area drag (missed click) yields `None` and returns to `Idle`.
    pub fn on_drag_end(&mut self, x: f64, y: f64) -> Option<SelectionRect> {
        if self.phase != BrushPhase::Dragging {
            return None;
        }
        self.cursor = (x, y);
        let rect = SelectionRect::from_corners(self.origin, self.cursor);
        if rect.is_empty() {
            self.phase = BrushPhase::Idle;
            None
        } else {
            self.phase = BrushPhase::Selected;
            Some(rect)
        }
    }

    /// In-flight rectangle for the drag overlay while dragging.
    #[must_use]
    pub fn preview_rect(self) -> Option<SelectionRect> {
        if self.phase == BrushPhase::Dragging {
            let rect = SelectionRect::from_corners(self.origin, self.cursor);
            if !rect.is_empty() {
                return Some(rect);
            }
        }
        None
    }

    /// Consumes the `Selected` phase once the filter has been applied.
    pub fn acknowledge(&mut self) {
        self.phase = BrushPhase::Idle;
    }
}
