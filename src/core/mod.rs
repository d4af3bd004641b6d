pub mod geometry;
pub mod palette;
pub mod record;
pub mod scale;
pub mod types;
pub mod value;

pub use geometry::{HitSample, SelectionRect};
pub use palette::SeriesPalette;
pub use record::{Dataset, Record, Slot};
pub use scale::{LinearScale, PixelRange, PointScale, ScaleKind, ScaleMapping, TimeScale};
pub use types::{DEFAULT_HEIGHT, DEFAULT_WIDTH, Margin, Viewport};
pub use value::{DomainKey, DomainValue};
