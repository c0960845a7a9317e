use glam::Mat4;

use crate::scene::NodeIndex;
use crate::scene::graph::SceneGraph;

/// Joint set and bind data of one glTF skin.
///
/// `joints[i]` pairs with `inverse_bind_matrices[i]` and produces
/// `joint_matrices[i]`, which is joint `i` in the skinning shader.
#[derive(Debug, Clone)]
pub struct Skin {
    pub name: String,

    pub skeleton_root: Option<NodeIndex>,
    pub joints: Vec<NodeIndex>,

    // Static after load. Empty when the asset has no bind matrices; such a
    // skin gets no GPU buffer and its joint matrices are never computed.
    pub(crate) inverse_bind_matrices: Vec<Mat4>,

    // Recomputed every refresh, then copied to the skin's GPU buffer.
    pub(crate) joint_matrices: Vec<Mat4>,
}

impl Skin {
    #[must_use]
    pub fn new(
        name: &str,
        skeleton_root: Option<NodeIndex>,
        joints: Vec<NodeIndex>,
        inverse_bind_matrices: Vec<Mat4>,
    ) -> Self {
        let count = joints.len();
        Self {
            name: name.to_string(),
            skeleton_root,
            joints,
            inverse_bind_matrices,
            joint_matrices: vec![Mat4::IDENTITY; count],
        }
    }

    #[inline]
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// Whether the skin carries bind matrices and can be rendered.
    #[inline]
    #[must_use]
    pub fn has_bind_matrices(&self) -> bool {
        !self.inverse_bind_matrices.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn inverse_bind_matrices(&self) -> &[Mat4] {
        &self.inverse_bind_matrices
    }

    /// Matrices from the last refresh, ordered like `joints`.
    #[inline]
    #[must_use]
    pub fn joint_matrices(&self) -> &[Mat4] {
        &self.joint_matrices
    }

    /// Size in bytes of the skin's GPU buffer.
    #[inline]
    #[must_use]
    pub fn buffer_size(&self) -> u64 {
        (std::mem::size_of::<Mat4>() * self.joints.len()) as u64
    }

    /// Recomputes every joint matrix.
    ///
    /// `node_world_inverse` is the inverse world transform of the node the
    /// skinned mesh hangs off; it brings joint transforms back into mesh space.
    pub fn compute_joint_matrices(&mut self, graph: &SceneGraph, node_world_inverse: Mat4) {
        for ((slot, &joint), ibm) in self
            .joint_matrices
            .iter_mut()
            .zip(&self.joints)
            .zip(&self.inverse_bind_matrices)
        {
            *slot = node_world_inverse * graph.world_matrix(joint) * *ibm;
        }
    }
}

/// Refreshes the joint matrices of every skin referenced from the graph.
///
/// Walks depth-first from each root. A node carrying a skin computes its world
/// transform once, inverts it (singular transforms are not checked) and feeds
/// it to its skin; the walk continues into children either way.
pub fn update_joint_matrices(graph: &SceneGraph, skins: &mut [Skin]) {
    let mut stack: Vec<NodeIndex> = graph.roots().iter().rev().copied().collect();
    while let Some(index) = stack.pop() {
        let Some(node) = graph.get(index) else {
            continue;
        };

        if let Some(skin) = node.skin.and_then(|s| skins.get_mut(s))
            && skin.has_bind_matrices()
        {
            let inverse = graph.world_matrix(index).inverse();
            skin.compute_joint_matrices(graph, inverse);
        }

        stack.extend(node.children().iter().rev().copied());
    }
}
