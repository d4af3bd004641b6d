use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Screen-space brush rectangle, normalized so `top_left` is the minimum
/// corner on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub top_left: (f64, f64),
    pub bottom_right: (f64, f64),
}

impl SelectionRect {
    #[must_use]
    pub const fn new(top_left: (f64, f64), bottom_right: (f64, f64)) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Builds a normalized rectangle from two drag corners in any order.
    #[must_use]
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            top_left: (a.0.min(b.0), a.1.min(b.1)),
            bottom_right: (a.0.max(b.0), a.1.max(b.1)),
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.bottom_right.0 - self.top_left.0
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom_right.1 - self.top_left.1
    }

    /// A selection with no area selects nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Brush hit-test: the record's x pixel must fall in the horizontal band
    /// AND at least one of its series' y pixels in the vertical band.
    ///
    /// The asymmetry is intentional: a record is selected when its time is in
    /// range and ANY of its plotted values is in range. All edges inclusive.
    #[must_use]
    pub fn contains(&self, sample: &HitSample) -> bool {
        if sample.x < self.top_left.0 || sample.x > self.bottom_right.0 {
            return false;
        }
        sample
            .ys
            .iter()
            .any(|&y| y >= self.top_left.1 && y <= self.bottom_right.1)
    }
}

/// One record projected into pixel space: the shared x pixel plus one y pixel
/// per plotted series.
#[derive(Debug, Clone, PartialEq)]
pub struct HitSample {
    pub x: f64,
    pub ys: SmallVec<[f64; 2]>,
}

impl HitSample {
    #[must_use]
    pub fn new(x: f64, ys: impl IntoIterator<Item = f64>) -> Self {
        Self {
            x,
            ys: ys.into_iter().collect(),
        }
    }
}
