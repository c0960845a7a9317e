//! Keyframe animation
//!
//! - `tracks`: samplers (keyframe times + padded values) and interval lookup
//! - `values`: linear, slerp and cubic-spline interpolation
//! - `binding`: channels binding a sampler to a node property
//! - `clip`: animations with their time window and looping play-head
//! - `player`: active-animation selection and per-frame evaluation

pub mod binding;
pub mod clip;
pub mod player;
pub mod tracks;
pub mod values;

pub use binding::{AnimationChannel, TargetPath};
pub use clip::Animation;
pub use player::AnimationPlayer;
pub use tracks::{AnimationSampler, InterpolationMode};
pub use values::Interpolatable;
