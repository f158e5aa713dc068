#![forbid(unsafe_code)]

//! Mesh extraction from WRL (VRML 2.0) text.
//!
//! This crate deliberately does not implement a full VRML parser. A viewer
//! only needs the first `point [ ... ]` and `coordIndex [ ... ]` blocks of a
//! scene; everything else in the file is skipped. The extraction rules are:
//!
//! - the first occurrence of each block wins,
//! - coordinates are grouped into XYZ triples, uniformly scaled, and Y is
//!   negated (screen space grows downward),
//! - `-1` terminates a face; triangles are kept, quads are split into two
//!   triangles, any other arity is dropped.
//!
//! Face indices are *not* validated against the vertex count here; the
//! rasterizer skips triangles that reference missing vertices.

pub mod error;
pub mod geometry;
pub mod mesh;
pub mod wrl;

pub use error::WrlParseError;
pub use geometry::Vec3;
pub use mesh::{Mesh, Triangle};
pub use wrl::parse_wrl;
