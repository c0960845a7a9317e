#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Skinned glTF playback core.
//!
//! Loads a glTF asset into a node arena with skins and keyframe animations,
//! advances the active animation each frame and keeps one joint-matrix buffer
//! per skin up to date through a [`GpuContext`].
//!
//! ```rust,ignore
//! use armature::{HeadlessContext, ModelSettings, SkinnedModel};
//!
//! let mut ctx = HeadlessContext::new();
//! let mut model = SkinnedModel::load("fox.glb", &ModelSettings::default(), &mut ctx)?;
//! model.advance(&mut ctx, 1.0 / 60.0);
//! for draw in model.draw_commands() {
//!     // one indexed draw per primitive
//! }
//! ```

pub mod animation;
pub mod assets;
pub mod errors;
pub mod gpu;
pub mod model;
pub mod resources;
pub mod scene;
pub mod settings;
pub mod utils;

pub use animation::{Animation, AnimationChannel, AnimationPlayer, AnimationSampler, InterpolationMode, TargetPath};
pub use assets::GltfLoader;
pub use errors::{ArmatureError, Result};
pub use gpu::{BufferKind, GpuContext, HeadlessContext, WgpuContext};
pub use model::{DrawCommand, Model, SkinResources, SkinnedModel};
pub use resources::{Mesh, PrimitiveRange, Vertex};
pub use scene::{Node, NodeIndex, SceneGraph, Skin, Transform};
pub use settings::ModelSettings;
pub use utils::Timer;
