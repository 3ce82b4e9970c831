//! Fixed-point model, configuration, and shared types for mandelscii.
//!
//! This crate holds everything the rasterizer and the binary agree on:
//! the 12-bit fixed-point convention, the viewport/grid model, the
//! iteration frame, the glyph table, and configuration loading.

pub mod charset;
pub mod config;
pub mod error;
pub mod fixed;
pub mod frame;
pub mod traits;
pub mod viewport;

pub use charset::GlyphLut;
pub use config::RasterConfig;
pub use error::CoreError;
pub use frame::IterationFrame;
pub use traits::{LineSink, WriterSink};
pub use viewport::{Axis, AxisSampler, Grid, Steps, Viewport};
