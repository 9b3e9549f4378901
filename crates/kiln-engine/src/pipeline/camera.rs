use bytemuck::{Pod, Zeroable};

use super::layout::{CAMERA_BINDING, CAMERA_UNIFORM_SIZE};
use super::MainPipeline;

/// Column-major view-projection matrix as uploaded to `@group(0) @binding(0)`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub const IDENTITY: Self = Self {
        view_proj: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn from_cols(view_proj: [[f32; 4]; 4]) -> Self {
        Self { view_proj }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Camera uniform buffer and the bind group that exposes it to a pipeline.
pub struct CameraBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl CameraBinding {
    pub fn new(device: &wgpu::Device, pipeline: &MainPipeline) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera uniform buffer"),
            size: CAMERA_UNIFORM_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera bind group"),
            layout: pipeline.bind_group_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding: CAMERA_BINDING,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self { buffer, bind_group }
    }

    pub fn write(&self, queue: &wgpu::Queue, camera: &CameraUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(camera));
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{build_pipeline, VertexVariant};

    #[test]
    fn uniform_fills_the_binding_exactly() {
        assert_eq!(std::mem::size_of::<CameraUniform>() as u64, CAMERA_UNIFORM_SIZE);
    }

    #[test]
    fn default_is_identity() {
        let uniform = CameraUniform::default();
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&uniform));
        for (i, f) in floats.iter().enumerate() {
            let expected = if i % 5 == 0 { 1.0 } else { 0.0 };
            assert_eq!(*f, expected, "element {i}");
        }
    }

    #[test]
    fn binding_buffer_matches_uniform() {
        let Some((device, queue)) = crate::testing::headless_device() else { return };

        let pipeline = build_pipeline(&device, wgpu::TextureFormat::Rgba8Unorm, VertexVariant::Full)
            .expect("pipeline");
        let camera = CameraBinding::new(&device, &pipeline);
        camera.write(&queue, &CameraUniform::IDENTITY);

        assert_eq!(camera.buffer().size(), CAMERA_UNIFORM_SIZE);
        assert!(camera.buffer().usage().contains(wgpu::BufferUsages::UNIFORM));
    }
}
