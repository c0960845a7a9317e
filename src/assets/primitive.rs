//! Primitive → shared vertex/index buffers
//!
//! Every primitive of a model is appended to one [`GeometryBuilder`]. Indices
//! are offset by the vertex count at the time the primitive is appended, so the
//! combined buffers stay valid when drawn with `vertex_offset = 0`.

use crate::assets::accessor::AccessorView;
use crate::errors::{ArmatureError, Result};
use crate::resources::mesh::PrimitiveRange;
use crate::resources::vertex::Vertex;

/// Accessors of one primitive, keyed by the semantics this crate consumes.
///
/// Only `position` is required; a primitive without it is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveAttributes<'a> {
    pub position: Option<AccessorView<'a>>,
    pub normal: Option<AccessorView<'a>>,
    pub tex_coord0: Option<AccessorView<'a>>,
    /// `JOINTS_0`, `JOINTS_1`
    pub joints: [Option<AccessorView<'a>>; 2],
    /// `WEIGHTS_0`, `WEIGHTS_1`
    pub weights: [Option<AccessorView<'a>>; 2],
    pub indices: Option<AccessorView<'a>>,
}

/// Accumulates decoded vertices and offset indices across primitives.
#[derive(Debug, Clone, Default)]
pub struct GeometryBuilder {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl GeometryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes one primitive and appends it.
    ///
    /// Returns the primitive's draw range, or `None` when it has no `POSITION`
    /// accessor. Non-indexed primitives get a sequential index list.
    ///
    /// Fails with [`ArmatureError::BufferOutOfRange`] when an index does not
    /// address a vertex of this primitive; the builder is left unchanged.
    pub fn append(&mut self, attributes: &PrimitiveAttributes<'_>) -> Result<Option<PrimitiveRange>> {
        let Some(positions) = attributes.position else {
            return Ok(None);
        };

        let vertex_start = self.vertices.len();
        let first_index = self.indices.len();
        let vertex_count = positions.count();

        if u32::try_from(vertex_start + vertex_count).is_err() {
            return Err(ArmatureError::BufferOutOfRange {
                context: format!("{} vertices exceed the u32 index range", vertex_start + vertex_count),
                index: vertex_start,
            });
        }
        let base = vertex_start as u32;

        let local = match attributes.indices {
            Some(indices) => indices.to_indices(),
            None => (0..vertex_count as u32).collect(),
        };
        if let Some(position) = local.iter().position(|&index| index as usize >= vertex_count) {
            return Err(ArmatureError::BufferOutOfRange {
                context: format!(
                    "index {} addresses a primitive of {} vertices",
                    local[position], vertex_count
                ),
                index: position,
            });
        }

        self.vertices.reserve(vertex_count);
        for i in 0..vertex_count {
            self.vertices.push(decode_vertex(attributes, &positions, i));
        }
        self.indices.extend(local.into_iter().map(|index| index + base));

        let range = PrimitiveRange {
            first_index: first_index as u32,
            index_count: (self.indices.len() - first_index) as u32,
        };

        log::debug!(
            "Primitive appended: {} vertices at {}, {} indices at {}",
            vertex_count,
            vertex_start,
            range.index_count,
            range.first_index
        );

        Ok(Some(range))
    }
}

fn decode_vertex(attributes: &PrimitiveAttributes<'_>, positions: &AccessorView<'_>, i: usize) -> Vertex {
    let mut vertex = Vertex::default();

    positions.read_f32(i, &mut vertex.position);

    if let Some(normals) = &attributes.normal {
        normals.read_f32(i, &mut vertex.normal);
    }
    if let Some(uvs) = &attributes.tex_coord0 {
        uvs.read_f32(i, &mut vertex.uv);
    }

    if let Some(joints) = &attributes.joints[0] {
        joints.read_u32(i, &mut vertex.joint_indices0);
    }
    if let Some(joints) = &attributes.joints[1] {
        joints.read_u32(i, &mut vertex.joint_indices1);
    }

    // Weights are passed through as stored; the asset must supply them
    // normalized.
    if let Some(weights) = &attributes.weights[0] {
        weights.read_f32(i, &mut vertex.joint_weights0);
    }
    if let Some(weights) = &attributes.weights[1] {
        weights.read_f32(i, &mut vertex.joint_weights1);
    }

    vertex
}
