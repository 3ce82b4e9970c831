//! Fixed-point escape-time kernel and the row-major ASCII rasterizer.

pub mod escape;
pub mod rasterizer;

pub use escape::escape_time;
pub use rasterizer::Rasterizer;
