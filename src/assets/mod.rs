//! Asset decoding
//!
//! - `accessor`: typed, strided reads of glTF accessors
//! - `primitive`: primitive attributes → shared vertex/index buffers
//! - `loaders`: full glTF document → [`Model`](crate::model::Model)

pub mod accessor;
pub mod loaders;
pub mod primitive;

pub use accessor::{AccessorView, Cardinality, ComponentType};
pub use loaders::GltfLoader;
pub use primitive::{GeometryBuilder, PrimitiveAttributes};
