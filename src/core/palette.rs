use crate::render::Color;

/// Stable per-series-index color assignment.
///
/// The palette is an explicit value injected into the render pipeline rather
/// than process-wide shared state, so independent chart sessions never share
/// mutable coloring state.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPalette {
    colors: Vec<Color>,
}

impl SeriesPalette {
    pub const SWATCH_RADIUS_PX: f64 = 4.0;

    #[must_use]
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// The d3 `schemeCategory10` palette.
    #[must_use]
    pub fn category10() -> Self {
        Self::new(vec![
            Color::from_rgb8(0x1f, 0x77, 0xb4),
            Color::from_rgb8(0xff, 0x7f, 0x0e),
            Color::from_rgb8(0x2c, 0xa0, 0x2c),
            Color::from_rgb8(0xd6, 0x27, 0x28),
            Color::from_rgb8(0x94, 0x67, 0xbd),
            Color::from_rgb8(0x8c, 0x56, 0x4b),
            Color::from_rgb8(0xe3, 0x77, 0xc2),
            Color::from_rgb8(0x7f, 0x7f, 0x7f),
            Color::from_rgb8(0xbc, 0xbd, 0x22),
            Color::from_rgb8(0x17, 0xbe, 0xcf),
        ])
    }

    /// Color for series `index`; wraps when there are more series than colors.
    #[must_use]
    pub fn color(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for SeriesPalette {
    fn default() -> Self {
        Self::category10()
    }
}
