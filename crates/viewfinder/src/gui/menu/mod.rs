pub mod model;
pub mod view;

pub use model::{ItemViews, build_items};
pub use view::CairoCanvas;

/// Pixel size icons are decoded at.
pub const ICON_SIZE: i32 = 96;
/// Side of the square an item view occupies on the slice.
pub const VIEW_SIZE: f64 = 36.0;
pub const LABEL_FONT_SIZE: f64 = 12.0;
