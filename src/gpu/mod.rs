//! GPU capability consumed by the model
//!
//! The animation and scene core never touches a device directly. Everything it
//! needs from the GPU goes through [`GpuContext`]: create a buffer, bind a
//! joint-matrix buffer, overwrite a buffer's contents, release buffers and
//! bindings.
//!
//! Two implementations ship with the crate:
//! - [`WgpuContext`]: wgpu device + queue
//! - [`HeadlessContext`]: host memory, for tools and tests
//!
//! Resource creation is assumed to succeed; device-level failures belong to
//! the renderer that owns the context.

pub mod headless;
pub mod wgpu_context;

pub use headless::{HeadlessBinding, HeadlessBuffer, HeadlessContext};
pub use wgpu_context::WgpuContext;

/// What a buffer is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// Immutable interleaved [`Vertex`](crate::resources::Vertex) data.
    Vertex,
    /// Immutable `u32` index data.
    Index,
    /// Per-skin `array<mat4x4<f32>>`, rewritten every frame.
    JointMatrices,
}

pub trait GpuContext {
    type Buffer;
    type Binding;

    /// Creates a buffer holding `contents`.
    fn create_buffer_init(&mut self, label: &str, kind: BufferKind, contents: &[u8]) -> Self::Buffer;

    /// Creates a zero-filled buffer of `size` bytes.
    fn create_buffer(&mut self, label: &str, kind: BufferKind, size: u64) -> Self::Buffer;

    /// Creates the resource binding through which a shader reads `buffer`.
    fn create_binding(&mut self, label: &str, buffer: &Self::Buffer) -> Self::Binding;

    /// Overwrites `buffer` from offset 0 with `data`.
    ///
    /// Any mapping the backend needs is acquired and released inside the call.
    fn write_buffer(&mut self, buffer: &Self::Buffer, data: &[u8]);

    fn release_buffer(&mut self, buffer: Self::Buffer);

    fn release_binding(&mut self, binding: Self::Binding);
}
