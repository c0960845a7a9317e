//! Host-memory [`GpuContext`]
//!
//! Buffers are plain byte vectors. Writes go through a scoped [`MappedRange`]
//! that unmaps on drop, so a buffer is never left mapped between calls.

use std::ops::{Deref, DerefMut};

use crate::gpu::{BufferKind, GpuContext};

/// Handle to a buffer owned by a [`HeadlessContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeadlessBuffer(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessBinding {
    pub buffer: HeadlessBuffer,
}

#[derive(Debug)]
struct HostBuffer {
    label: String,
    kind: BufferKind,
    data: Vec<u8>,
    mapped: bool,
    writes: u64,
}

/// Mapped view of a host buffer; unmaps when dropped.
pub struct MappedRange<'a> {
    buffer: &'a mut HostBuffer,
}

impl Deref for MappedRange<'_> {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.buffer.data
    }
}

impl DerefMut for MappedRange<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.buffer.data
    }
}

impl Drop for MappedRange<'_> {
    fn drop(&mut self) {
        self.buffer.mapped = false;
    }
}

#[derive(Debug, Default)]
pub struct HeadlessContext {
    buffers: Vec<Option<HostBuffer>>,
    bindings: usize,
}

impl HeadlessContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buffers created and not yet released.
    #[must_use]
    pub fn live_buffers(&self) -> usize {
        self.buffers.iter().flatten().count()
    }

    /// Number of bindings created and not yet released.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings
    }

    #[must_use]
    pub fn contents(&self, buffer: HeadlessBuffer) -> Option<&[u8]> {
        self.host(buffer).map(|b| b.data.as_slice())
    }

    #[must_use]
    pub fn label(&self, buffer: HeadlessBuffer) -> Option<&str> {
        self.host(buffer).map(|b| b.label.as_str())
    }

    #[must_use]
    pub fn kind(&self, buffer: HeadlessBuffer) -> Option<BufferKind> {
        self.host(buffer).map(|b| b.kind)
    }

    #[must_use]
    pub fn is_mapped(&self, buffer: HeadlessBuffer) -> bool {
        self.host(buffer).is_some_and(|b| b.mapped)
    }

    /// Number of `write_buffer` calls that reached `buffer`.
    #[must_use]
    pub fn write_count(&self, buffer: HeadlessBuffer) -> u64 {
        self.host(buffer).map_or(0, |b| b.writes)
    }

    /// Maps `buffer` for writing. `None` if it was released.
    pub fn map(&mut self, buffer: HeadlessBuffer) -> Option<MappedRange<'_>> {
        let host = self.buffers.get_mut(buffer.0)?.as_mut()?;
        host.mapped = true;
        Some(MappedRange { buffer: host })
    }

    fn host(&self, buffer: HeadlessBuffer) -> Option<&HostBuffer> {
        self.buffers.get(buffer.0)?.as_ref()
    }

    fn push(&mut self, label: &str, kind: BufferKind, data: Vec<u8>) -> HeadlessBuffer {
        self.buffers.push(Some(HostBuffer {
            label: label.to_string(),
            kind,
            data,
            mapped: false,
            writes: 0,
        }));
        HeadlessBuffer(self.buffers.len() - 1)
    }
}

impl GpuContext for HeadlessContext {
    type Buffer = HeadlessBuffer;
    type Binding = HeadlessBinding;

    fn create_buffer_init(&mut self, label: &str, kind: BufferKind, contents: &[u8]) -> HeadlessBuffer {
        self.push(label, kind, contents.to_vec())
    }

    fn create_buffer(&mut self, label: &str, kind: BufferKind, size: u64) -> HeadlessBuffer {
        self.push(label, kind, vec![0; size as usize])
    }

    fn create_binding(&mut self, _label: &str, buffer: &HeadlessBuffer) -> HeadlessBinding {
        self.bindings += 1;
        HeadlessBinding { buffer: *buffer }
    }

    fn write_buffer(&mut self, buffer: &HeadlessBuffer, data: &[u8]) {
        let Some(mut range) = self.map(*buffer) else {
            log::warn!("write to released buffer {buffer:?} ignored");
            return;
        };
        let len = data.len().min(range.len());
        range[..len].copy_from_slice(&data[..len]);
        range.buffer.writes += 1;
    }

    fn release_buffer(&mut self, buffer: HeadlessBuffer) {
        if let Some(slot) = self.buffers.get_mut(buffer.0) {
            *slot = None;
        }
    }

    fn release_binding(&mut self, _binding: HeadlessBinding) {
        self.bindings = self.bindings.saturating_sub(1);
    }
}
