//! Loaded models
//!
//! - [`Model`]: the CPU side. Scene graph, skins, animations and the decoded
//!   vertex/index data. GPU-agnostic and fully testable on its own.
//! - [`SkinnedModel`]: a [`Model`] plus the GPU buffers created through a
//!   [`GpuContext`]. This is the object a renderer loop holds and advances
//!   once per frame.

use std::path::Path;

use crate::animation::{Animation, AnimationPlayer};
use crate::assets::loaders::GltfLoader;
use crate::assets::primitive::GeometryBuilder;
use crate::errors::Result;
use crate::gpu::{BufferKind, GpuContext};
use crate::resources::vertex::Vertex;
use crate::scene::{NodeIndex, SceneGraph, Skin, update_joint_matrices};
use crate::settings::ModelSettings;

/// One indexed draw: a single primitive of a mesh node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    pub node: NodeIndex,
    /// Skin whose joint buffer the draw reads, if any.
    pub skin: Option<usize>,
    pub first_index: u32,
    pub index_count: u32,
    /// Always 0; vertex starts are baked into the indices.
    pub vertex_offset: i32,
    pub instance_count: u32,
}

#[derive(Debug, Clone)]
pub struct Model {
    pub graph: SceneGraph,
    pub skins: Vec<Skin>,
    pub player: AnimationPlayer,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Model {
    /// Assembles a model and computes its rest-pose joint matrices.
    #[must_use]
    pub fn new(graph: SceneGraph, skins: Vec<Skin>, player: AnimationPlayer, geometry: GeometryBuilder) -> Self {
        let mut model = Self {
            graph,
            skins,
            player,
            vertices: geometry.vertices,
            indices: geometry.indices,
        };
        update_joint_matrices(&model.graph, &mut model.skins);
        model
    }

    pub fn load(path: impl AsRef<Path>, settings: &ModelSettings) -> Result<Self> {
        GltfLoader::load(path.as_ref(), settings)
    }

    /// Advances the active animation and refreshes every skin's joint matrices.
    ///
    /// Returns `false`, touching nothing, when no animation is active.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.player.update(dt, &mut self.graph) {
            return false;
        }
        update_joint_matrices(&self.graph, &mut self.skins);
        true
    }

    pub fn set_active_animation(&mut self, index: usize) -> Result<()> {
        self.player.set_active(index)
    }

    #[must_use]
    pub fn active_animation(&self) -> Option<&Animation> {
        self.player.active()
    }

    pub fn animation_names(&self) -> impl Iterator<Item = &str> {
        self.player.animation_names()
    }

    /// One draw per primitive, in linear (depth-first) node order.
    #[must_use]
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        let mut commands = Vec::new();
        for &index in self.graph.linear() {
            let Some(node) = self.graph.get(index) else {
                continue;
            };
            let Some(mesh) = &node.mesh else {
                continue;
            };
            commands.extend(mesh.primitives.iter().map(|primitive| DrawCommand {
                node: index,
                skin: node.skin,
                first_index: primitive.first_index,
                index_count: primitive.index_count,
                vertex_offset: 0,
                instance_count: 1,
            }));
        }
        commands
    }
}

/// Joint-matrix buffer of one skin and the binding shaders read it through.
pub struct SkinResources<C: GpuContext> {
    pub buffer: C::Buffer,
    pub binding: C::Binding,
}

/// A [`Model`] with its GPU resources.
///
/// Owns every buffer it creates; they live until [`SkinnedModel::unload`].
pub struct SkinnedModel<C: GpuContext> {
    model: Model,
    vertex_buffer: Option<C::Buffer>,
    index_buffer: Option<C::Buffer>,
    // Parallel to `model.skins`; `None` for skins without bind matrices.
    skin_resources: Vec<Option<SkinResources<C>>>,
}

impl<C: GpuContext> SkinnedModel<C> {
    /// Loads `path` and uploads it through `ctx`.
    ///
    /// The asset is fully decoded before the first buffer is created, so a
    /// failed load allocates nothing.
    pub fn load(path: impl AsRef<Path>, settings: &ModelSettings, ctx: &mut C) -> Result<Self> {
        let model = Model::load(path, settings)?;
        Ok(Self::upload(model, ctx))
    }

    /// Creates the vertex, index and per-skin joint buffers for `model`.
    pub fn upload(model: Model, ctx: &mut C) -> Self {
        let vertex_buffer = (!model.vertices.is_empty()).then(|| {
            ctx.create_buffer_init("Model Vertices", BufferKind::Vertex, bytemuck::cast_slice(&model.vertices))
        });
        let index_buffer = (!model.indices.is_empty()).then(|| {
            ctx.create_buffer_init("Model Indices", BufferKind::Index, bytemuck::cast_slice(&model.indices))
        });

        let skin_resources = model
            .skins
            .iter()
            .map(|skin| {
                if !skin.has_bind_matrices() {
                    return None;
                }
                let label = format!("{} Joint Matrices", skin.name);
                let buffer = ctx.create_buffer(&label, BufferKind::JointMatrices, skin.buffer_size());
                ctx.write_buffer(&buffer, bytemuck::cast_slice(skin.joint_matrices()));
                let binding = ctx.create_binding(&label, &buffer);
                Some(SkinResources { buffer, binding })
            })
            .collect();

        Self {
            model,
            vertex_buffer,
            index_buffer,
            skin_resources,
        }
    }

    /// Per-frame update: advances the active animation, refreshes joint
    /// matrices and overwrites every skin buffer.
    ///
    /// Call at most once per frame, before any draw that reads the joint
    /// buffers. A no-op returning `false` when no animation is active.
    pub fn advance(&mut self, ctx: &mut C, dt: f32) -> bool {
        if !self.model.update(dt) {
            return false;
        }

        for (skin, resources) in self.model.skins.iter().zip(&self.skin_resources) {
            if let Some(resources) = resources {
                ctx.write_buffer(&resources.buffer, bytemuck::cast_slice(skin.joint_matrices()));
            }
        }
        true
    }

    /// Releases every GPU buffer and binding and returns the CPU model.
    pub fn unload(self, ctx: &mut C) -> Model {
        if let Some(buffer) = self.vertex_buffer {
            ctx.release_buffer(buffer);
        }
        if let Some(buffer) = self.index_buffer {
            ctx.release_buffer(buffer);
        }
        for resources in self.skin_resources.into_iter().flatten() {
            ctx.release_binding(resources.binding);
            ctx.release_buffer(resources.buffer);
        }
        self.model
    }

    #[inline]
    #[must_use]
    pub fn model(&self) -> &Model {
        &self.model
    }

    #[inline]
    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    #[inline]
    #[must_use]
    pub fn vertex_buffer(&self) -> Option<&C::Buffer> {
        self.vertex_buffer.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn index_buffer(&self) -> Option<&C::Buffer> {
        self.index_buffer.as_ref()
    }

    #[must_use]
    pub fn skin_resources(&self, skin: usize) -> Option<&SkinResources<C>> {
        self.skin_resources.get(skin)?.as_ref()
    }

    #[must_use]
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        self.model.draw_commands()
    }
}
