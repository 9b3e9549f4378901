use crate::mesh::{MeshVertex, PositionVertex};

use super::shader;

/// Which vertex format (and matching shader) a pipeline is built for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum VertexVariant {
    /// Interleaved position + normal + texcoord ([`MeshVertex`]), shaded by normal.
    #[default]
    Full,
    /// 2D positions only ([`PositionVertex`]), solid fill.
    PositionOnly,
}

impl VertexVariant {
    pub const ALL: [VertexVariant; 2] = [VertexVariant::Full, VertexVariant::PositionOnly];

    pub fn vertex_layout(self) -> wgpu::VertexBufferLayout<'static> {
        match self {
            Self::Full => MeshVertex::layout(),
            Self::PositionOnly => PositionVertex::layout(),
        }
    }

    pub fn attributes(self) -> &'static [wgpu::VertexAttribute] {
        self.vertex_layout().attributes
    }

    pub fn array_stride(self) -> wgpu::BufferAddress {
        self.vertex_layout().array_stride
    }

    /// Embedded WGSL source for this variant.
    pub fn shader_source(self) -> &'static str {
        match self {
            Self::Full => shader::MESH_SHADER,
            Self::PositionOnly => shader::POSITION_SHADER,
        }
    }
}
