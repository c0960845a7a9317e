use glam::Mat4;

use crate::resources::mesh::Mesh;
use crate::scene::NodeIndex;
use crate::scene::transform::Transform;

/// A scene graph node.
///
/// # Hierarchy
///
/// Nodes live in the [`SceneGraph`](crate::scene::SceneGraph) arena and refer
/// to each other by [`NodeIndex`]:
/// - `parent`: `None` for top-level nodes
/// - `children`: ordered as declared by the asset
///
/// # Payload
///
/// - `transform`: local TRS + baked matrix, written by the animation evaluator
/// - `mesh`: primitive draw ranges into the model's shared index buffer
/// - `skin`: index into the model's skin list
#[derive(Debug, Clone)]
pub struct Node {
    /// Index of the node in the source asset.
    pub index: usize,
    pub name: Option<String>,

    pub(crate) parent: Option<NodeIndex>,
    pub(crate) children: Vec<NodeIndex>,

    pub transform: Transform,

    pub mesh: Option<Mesh>,
    pub skin: Option<usize>,
}

impl Node {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            index,
            name: None,
            parent: None,
            children: Vec::new(),
            transform: Transform::IDENTITY,
            mesh: None,
            skin: None,
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        self.transform.local_matrix()
    }
}
