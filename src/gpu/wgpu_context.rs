//! wgpu-backed [`GpuContext`]
//!
//! Joint matrices are exposed to shaders as a read-only storage buffer at
//! binding 0, visible to the vertex stage:
//!
//! ```wgsl
//! @group(N) @binding(0) var<storage, read> joint_matrices: array<mat4x4<f32>>;
//! ```

use wgpu::util::DeviceExt;

use crate::errors::{ArmatureError, Result};
use crate::gpu::{BufferKind, GpuContext};

/// Device and queue used to create and update model buffers.
pub struct WgpuContext {
    /// The wgpu device for GPU operations
    pub device: wgpu::Device,
    /// The command queue for buffer writes
    pub queue: wgpu::Queue,

    joint_layout: wgpu::BindGroupLayout,
}

impl WgpuContext {
    /// Wraps an existing device and queue.
    #[must_use]
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        let joint_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Joint Matrices Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        Self {
            device,
            queue,
            joint_layout,
        }
    }

    /// Requests a default adapter and device without a surface.
    pub async fn new_headless() -> Result<Self> {
        let instance = wgpu::Instance::default();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| ArmatureError::AdapterRequestFailed(e.to_string()))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Armature Device"),
                ..Default::default()
            })
            .await?;

        Ok(Self::new(device, queue))
    }

    /// Layout matching the bind groups returned by `create_binding`.
    #[must_use]
    pub fn joint_layout(&self) -> &wgpu::BindGroupLayout {
        &self.joint_layout
    }

    fn usage(kind: BufferKind) -> wgpu::BufferUsages {
        match kind {
            BufferKind::Vertex => wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            BufferKind::Index => wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            BufferKind::JointMatrices => wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        }
    }
}

impl GpuContext for WgpuContext {
    type Buffer = wgpu::Buffer;
    type Binding = wgpu::BindGroup;

    fn create_buffer_init(&mut self, label: &str, kind: BufferKind, contents: &[u8]) -> wgpu::Buffer {
        self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage: Self::usage(kind),
        })
    }

    fn create_buffer(&mut self, label: &str, kind: BufferKind, size: u64) -> wgpu::Buffer {
        self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: Self::usage(kind),
            mapped_at_creation: false,
        })
    }

    fn create_binding(&mut self, label: &str, buffer: &wgpu::Buffer) -> wgpu::BindGroup {
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.joint_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        })
    }

    fn write_buffer(&mut self, buffer: &wgpu::Buffer, data: &[u8]) {
        self.queue.write_buffer(buffer, 0, data);
    }

    fn release_buffer(&mut self, buffer: wgpu::Buffer) {
        buffer.destroy();
    }

    fn release_binding(&mut self, binding: wgpu::BindGroup) {
        drop(binding);
    }
}
