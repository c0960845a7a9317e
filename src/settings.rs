//! Model Load & Playback Configuration
//!
//! [`ModelSettings`] controls which scene is materialized from an asset, which
//! animation starts active, and how the caller's frame delta is scaled before
//! it reaches the evaluator.
//!
//! ```rust,ignore
//! use armature::ModelSettings;
//!
//! let settings = ModelSettings {
//!     active_animation: 1,
//!     ..Default::default()
//! };
//!
//! // Or from a JSON file shipped next to the asset
//! let settings = ModelSettings::from_json_str(r#"{ "time_scale": 0.5 }"#)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Index of the animation driven by `advance`. An index past the loaded
    /// animation list leaves playback inert rather than failing the load.
    pub active_animation: usize,

    /// Scene to build. `None` picks the asset's default scene, then its first
    /// scene, then every parentless node.
    pub scene: Option<usize>,

    /// Multiplier applied to the caller-supplied delta. Not clamped.
    pub time_scale: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            active_animation: 0,
            scene: None,
            time_scale: 1.0,
        }
    }
}

impl ModelSettings {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
