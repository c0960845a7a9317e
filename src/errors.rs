//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`ArmatureError`] covers every load-time failure mode:
//! - File I/O and glTF decoding errors
//! - Buffer resolution (GLB chunk, external files, data URIs)
//! - Malformed node hierarchies
//! - Out-of-range animation selection
//!
//! Per-frame operations (`advance`, joint matrix refresh) never fail and do not
//! return a `Result`.
//!
//! ```rust,ignore
//! use armature::errors::Result;
//!
//! fn load() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum ArmatureError {
    // ========================================================================
    // I/O & Decoding Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The asset could not be parsed as either text glTF or binary GLB.
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),

    /// Base64 decoding error in an embedded data URI.
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// JSON parsing error (settings files).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // Asset Content Errors
    // ========================================================================
    /// A buffer declared as the GLB binary chunk, but the file carries none.
    #[error("Missing GLB binary chunk")]
    MissingBinaryChunk,

    /// A buffer URI scheme that cannot be resolved locally.
    #[error("Unsupported buffer URI: {0}")]
    UnsupportedUri(String),

    /// A buffer or accessor reference points outside the decoded data.
    #[error("Buffer reference out of range: {context} (index: {index})")]
    BufferOutOfRange {
        /// Description of what was being accessed
        context: String,
        /// The invalid index
        index: usize,
    },

    /// Cyclic, shared or out-of-range parent/child references.
    #[error("Malformed node hierarchy: {0}")]
    MalformedHierarchy(String),

    /// Requested scene does not exist in the asset.
    #[error("Scene index {index} out of bounds (count: {count})")]
    SceneIndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Number of scenes in the asset
        count: usize,
    },

    // ========================================================================
    // GPU Errors
    // ========================================================================
    /// No suitable adapter was found.
    #[error("Failed to request adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to request a device from the adapter.
    #[error("Failed to request device: {0}")]
    DeviceRequestFailed(#[from] wgpu::RequestDeviceError),

    // ========================================================================
    // Playback Errors
    // ========================================================================
    /// Active animation selector points past the loaded animation list.
    #[error("Animation index {index} out of bounds (count: {count})")]
    AnimationIndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Number of loaded animations
        count: usize,
    },
}

/// Alias for `Result<T, ArmatureError>`.
pub type Result<T> = std::result::Result<T, ArmatureError>;
