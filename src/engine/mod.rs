pub mod block_paint;
pub mod fill;
pub mod pixelate;
