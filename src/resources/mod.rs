//! GPU-facing data records
//!
//! Plain data shared between the loader and a renderer, independent of any
//! GPU backend:
//! - Vertex: interleaved skinned vertex and its buffer layout
//! - Mesh: per-node list of primitive draw ranges

pub mod mesh;
pub mod vertex;

pub use mesh::{Mesh, PrimitiveRange};
pub use vertex::Vertex;
