#![forbid(unsafe_code)]

//! Deterministic software rasterizer.
//!
//! Renders an indexed triangle mesh into a small indexed-color framebuffer:
//! rotate, perspective-project, flat-shade, depth-sort, then fill each
//! triangle through an ordered-dither mask. Everything here is pure CPU work
//! with no host dependencies, so the whole pipeline is testable natively and
//! produces byte-identical frames for identical inputs.

pub mod dither;
pub mod font;
pub mod frame;
pub mod palette;
pub mod pipeline;

pub use frame::Frame;
pub use palette::Palette;
pub use pipeline::{Lighting, SolidParams, draw_mesh};
