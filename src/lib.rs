pub mod canvas;
pub mod editor;
pub mod engine;
pub mod error;
pub mod utils;

pub use canvas::buffer::PixelBuffer;
pub use canvas::history::History;
pub use editor::PixelEditor;
pub use error::EditError;
pub use utils::color::Rgba32;
pub use utils::geom::{Point, VisibleRegion};
pub use utils::grid::GridSpec;
