pub mod color;
pub mod geometry;
pub mod ids;
pub mod paper;
pub mod raster;

pub use color::Color;
pub use geometry::{Point, Rect, Size};
pub use ids::{ImageId, ResourceKey};
pub use paper::PaperSize;
pub use raster::{PixelFormat, Raster};
