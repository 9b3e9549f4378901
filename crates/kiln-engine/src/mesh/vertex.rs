use bytemuck::{Pod, Zeroable};

/// Interleaved position + normal + texcoord vertex.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: [f32; 2],
}

impl MeshVertex {
    /// Offsets are running sums of the preceding attribute sizes (0, 12, 24).
    pub const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // normal
        2 => Float32x2  // texcoord
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// 2D position-only vertex.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PositionVertex {
    pub position: [f32; 2],
}

impl PositionVertex {
    pub const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PositionVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_vertex_offsets_are_running_sums() {
        let a = &MeshVertex::ATTRS;
        assert_eq!(a[0].offset, 0);
        assert_eq!(a[1].offset, a[0].format.size());
        assert_eq!(a[2].offset, a[0].format.size() + a[1].format.size());
        assert_eq!(
            a.iter().map(|x| x.shader_location).collect::<Vec<_>>(),
            [0, 1, 2]
        );
    }

    #[test]
    fn mesh_vertex_stride_is_32_bytes() {
        let layout = MeshVertex::layout();
        let sum: u64 = layout.attributes.iter().map(|a| a.format.size()).sum();
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.array_stride, sum);
        assert_eq!(std::mem::offset_of!(MeshVertex, normal) as u64, 12);
        assert_eq!(std::mem::offset_of!(MeshVertex, texcoord) as u64, 24);
    }

    #[test]
    fn position_vertex_stride_is_8_bytes() {
        let layout = PositionVertex::layout();
        assert_eq!(layout.array_stride, 8);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x2);
    }

    #[test]
    fn vertices_cast_to_interleaved_bytes() {
        let v = MeshVertex {
            position: [1.0, 2.0, 3.0],
            normal: [0.0, 0.0, 1.0],
            texcoord: [0.5, 0.25],
        };
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&v));
        assert_eq!(floats, [1.0, 2.0, 3.0, 0.0, 0.0, 1.0, 0.5, 0.25]);
    }
}
