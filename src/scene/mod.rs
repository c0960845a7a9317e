//! Scene graph module
//!
//! Hierarchy, transforms and skins of a loaded model:
//! - Node: arena entry with parent/children links, local transform, mesh and skin references
//! - Transform: local TRS + baked matrix
//! - SceneGraph: node arena, roots, depth-first linear list, lookup and world transforms
//! - Skin: joints, inverse bind matrices and the joint matrix resolver

pub mod graph;
pub mod node;
pub mod skin;
pub mod transform;

pub use graph::SceneGraph;
pub use node::Node;
pub use skin::{Skin, update_joint_matrices};
pub use transform::Transform;

/// Stable index of a node in the [`SceneGraph`] arena.
pub type NodeIndex = usize;
