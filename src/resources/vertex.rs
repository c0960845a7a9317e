//! GPU-facing vertex record
//!
//! Every primitive of a model is decoded into this single interleaved layout so
//! one vertex buffer and one pipeline vertex declaration serve the whole model.
//! The shader locations follow a fixed order:
//!
//! | location | field              | format      |
//! |----------|--------------------|-------------|
//! | 0        | `position`         | `Float32x3` |
//! | 1        | `normal`           | `Float32x3` |
//! | 2        | `uv`               | `Float32x2` |
//! | 3        | `joint_indices0`   | `Uint32x4`  |
//! | 4        | `joint_weights0`   | `Float32x4` |
//! | 5        | `joint_indices1`   | `Uint32x4`  |
//! | 6        | `joint_weights1`   | `Float32x4` |

use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};
use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

/// Interleaved skinned vertex. Up to eight joints influence one vertex.
///
/// Fields absent from the source primitive stay zero.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub joint_indices0: [u32; 4],
    pub joint_indices1: [u32; 4],
    pub joint_weights0: [f32; 4],
    pub joint_weights1: [f32; 4],
}

const VERTEX_ATTRIBUTES: [VertexAttribute; 7] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: offset_of!(Vertex, position) as u64,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: offset_of!(Vertex, normal) as u64,
        shader_location: 1,
    },
    VertexAttribute {
        format: VertexFormat::Float32x2,
        offset: offset_of!(Vertex, uv) as u64,
        shader_location: 2,
    },
    VertexAttribute {
        format: VertexFormat::Uint32x4,
        offset: offset_of!(Vertex, joint_indices0) as u64,
        shader_location: 3,
    },
    VertexAttribute {
        format: VertexFormat::Float32x4,
        offset: offset_of!(Vertex, joint_weights0) as u64,
        shader_location: 4,
    },
    VertexAttribute {
        format: VertexFormat::Uint32x4,
        offset: offset_of!(Vertex, joint_indices1) as u64,
        shader_location: 5,
    },
    VertexAttribute {
        format: VertexFormat::Float32x4,
        offset: offset_of!(Vertex, joint_weights1) as u64,
        shader_location: 6,
    },
];

impl Vertex {
    /// Byte stride of one vertex in the shared vertex buffer.
    pub const STRIDE: u64 = size_of::<Self>() as u64;

    /// Vertex buffer layout the renderer's pipeline must declare.
    #[must_use]
    pub fn layout() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_record() {
        assert_eq!(Vertex::STRIDE, 96);

        let layout = Vertex::layout();
        let locations: Vec<u32> = layout.attributes.iter().map(|a| a.shader_location).collect();
        assert_eq!(locations, vec![0, 1, 2, 3, 4, 5, 6]);

        for attr in layout.attributes {
            assert!(attr.offset + attr.format.size() <= Vertex::STRIDE);
        }
    }
}
