//! Node arena and hierarchy queries
//!
//! [`SceneGraph`] owns every node of a model in a flat arena. Relations are
//! plain indices into that arena, so the hierarchy has no reference cycles to
//! manage and malformed links can be rejected up front:
//!
//! - [`SceneGraph::attach`] refuses out-of-range indices, self-parenting and a
//!   second parent for the same child.
//! - [`SceneGraph::validate_acyclic`] rejects parent chains that loop.
//!
//! Two views over the arena are kept:
//! - `roots`: top-level nodes of the built scene, in declaration order
//! - `linear`: every node reachable from `roots`, depth-first, for whole-scene
//!   iteration without re-walking the tree

use glam::Mat4;

use crate::errors::{ArmatureError, Result};
use crate::scene::NodeIndex;
use crate::scene::node::Node;

#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    roots: Vec<NodeIndex>,
    linear: Vec<NodeIndex>,
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            roots: Vec::new(),
            linear: Vec::with_capacity(capacity),
        }
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Adds a detached node and returns its arena index.
    pub fn insert(&mut self, node: Node) -> NodeIndex {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Links `child` under `parent`, appending it to the parent's children.
    pub fn attach(&mut self, child: NodeIndex, parent: NodeIndex) -> Result<()> {
        let len = self.nodes.len();
        if child >= len || parent >= len {
            return Err(ArmatureError::MalformedHierarchy(format!(
                "link {parent} -> {child} references a node outside 0..{len}"
            )));
        }
        if child == parent {
            return Err(ArmatureError::MalformedHierarchy(format!(
                "node {child} lists itself as a child"
            )));
        }
        if let Some(existing) = self.nodes[child].parent {
            return Err(ArmatureError::MalformedHierarchy(format!(
                "node {child} has two parents ({existing} and {parent})"
            )));
        }

        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        Ok(())
    }

    /// Marks `node` as a top-level node of the scene.
    pub fn add_root(&mut self, node: NodeIndex) -> Result<()> {
        let Some(entry) = self.nodes.get(node) else {
            return Err(ArmatureError::MalformedHierarchy(format!(
                "scene root {node} is outside 0..{}",
                self.nodes.len()
            )));
        };
        if let Some(parent) = entry.parent {
            return Err(ArmatureError::MalformedHierarchy(format!(
                "scene root {node} is also a child of {parent}"
            )));
        }
        if !self.roots.contains(&node) {
            self.roots.push(node);
        }
        Ok(())
    }

    /// Fails if any parent chain revisits a node.
    pub fn validate_acyclic(&self) -> Result<()> {
        let limit = self.nodes.len();
        for start in 0..self.nodes.len() {
            let mut steps = 0;
            let mut current = self.nodes[start].parent;
            while let Some(index) = current {
                steps += 1;
                if steps > limit {
                    return Err(ArmatureError::MalformedHierarchy(format!(
                        "parent chain of node {start} is cyclic"
                    )));
                }
                current = self.nodes[index].parent;
            }
        }
        Ok(())
    }

    /// Rebuilds the depth-first linear list from the current roots.
    pub fn rebuild_linear(&mut self) {
        let mut linear = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeIndex> = self.roots.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            linear.push(index);
            stack.extend(self.nodes[index].children.iter().rev().copied());
        }
        self.linear = linear;
    }

    // ========================================================================
    // Access
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    #[must_use]
    pub fn roots(&self) -> &[NodeIndex] {
        &self.roots
    }

    /// Every node reachable from the roots, depth-first.
    #[inline]
    #[must_use]
    pub fn linear(&self) -> &[NodeIndex] {
        &self.linear
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Depth-first search from the roots for the node whose asset index is
    /// `asset_index`. O(n); meant for load-time resolution.
    #[must_use]
    pub fn find_node(&self, asset_index: usize) -> Option<NodeIndex> {
        self.find(|node| node.index == asset_index)
    }

    #[must_use]
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeIndex> {
        self.find(|node| node.name.as_deref() == Some(name))
    }

    fn find(&self, predicate: impl Fn(&Node) -> bool) -> Option<NodeIndex> {
        let mut stack: Vec<NodeIndex> = self.roots.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if predicate(node) {
                return Some(index);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// Ancestors of `index`, nearest first.
    pub fn ancestors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(self.nodes.get(index).and_then(|n| n.parent), move |&i| {
            self.nodes[i].parent
        })
    }

    /// World transform of `index`: its local matrix composed with every
    /// ancestor's, `root * ... * parent * local`.
    ///
    /// Unknown indices yield identity.
    #[must_use]
    pub fn world_matrix(&self, index: NodeIndex) -> Mat4 {
        let Some(node) = self.nodes.get(index) else {
            return Mat4::IDENTITY;
        };
        self.ancestors(index)
            .fold(node.local_matrix(), |world, ancestor| {
                self.nodes[ancestor].local_matrix() * world
            })
    }
}
