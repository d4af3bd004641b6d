use serde::{Deserialize, Serialize};

/// Default chart width in pixels.
pub const DEFAULT_WIDTH: u32 = 500;
/// Default chart height in pixels.
pub const DEFAULT_HEIGHT: u32 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Screen margins in pixels, non-negative by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Margin {
    #[must_use]
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub const fn hsum(&self) -> u32 {
        self.left + self.right
    }

    #[must_use]
    pub const fn vsum(&self) -> u32 {
        self.top + self.bottom
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(50, 30, 20, 50)
    }
}
