//! Fixed layout and fixed-function state shared by every variant.

pub const CAMERA_GROUP: u32 = 0;
pub const CAMERA_BINDING: u32 = 0;

/// One `mat4x4<f32>`.
pub const CAMERA_UNIFORM_SIZE: wgpu::BufferAddress = 4 * 4 * 4;

/// Camera matrix uniform, visible to the vertex stage only.
pub fn camera_layout_entry() -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: CAMERA_BINDING,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(CAMERA_UNIFORM_SIZE),
        },
        count: None,
    }
}

/// Triangle list, counter-clockwise front faces, back faces culled.
pub fn primitive_state() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: Some(wgpu::Face::Back),
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

pub fn color_target(format: wgpu::TextureFormat) -> wgpu::ColorTargetState {
    wgpu::ColorTargetState {
        format,
        blend: None,
        write_mask: wgpu::ColorWrites::ALL,
    }
}
