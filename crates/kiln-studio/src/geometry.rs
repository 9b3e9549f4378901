//! Demo geometry uploaded by the viewer.

use kiln_engine::mesh::{MeshVertex, PositionVertex};
use kiln_engine::pipeline::VertexVariant;

/// Counter-clockwise quad, two triangles.
pub static QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Quad whose normals lean outwards at each corner, so the normal shading
/// shows a gradient.
pub static FULL_QUAD: [MeshVertex; 4] = [
    MeshVertex { position: [-0.5, -0.5, 0.0], normal: [0.2, 0.2, 1.0], texcoord: [0.0, 1.0] },
    MeshVertex { position: [0.5, -0.5, 0.0], normal: [1.0, 0.2, 0.2], texcoord: [1.0, 1.0] },
    MeshVertex { position: [0.5, 0.5, 0.0], normal: [0.2, 1.0, 0.2], texcoord: [1.0, 0.0] },
    MeshVertex { position: [-0.5, 0.5, 0.0], normal: [1.0, 1.0, 0.2], texcoord: [0.0, 0.0] },
];

pub static POSITION_QUAD: [PositionVertex; 4] = [
    PositionVertex { position: [-1.0, -1.0] },
    PositionVertex { position: [1.0, -1.0] },
    PositionVertex { position: [1.0, 1.0] },
    PositionVertex { position: [-1.0, 1.0] },
];

/// Vertex bytes laid out for `variant`.
pub fn vertex_bytes(variant: VertexVariant) -> &'static [u8] {
    match variant {
        VertexVariant::Full => bytemuck::cast_slice(&FULL_QUAD),
        VertexVariant::PositionOnly => bytemuck::cast_slice(&POSITION_QUAD),
    }
}

pub fn index_bytes() -> &'static [u8] {
    bytemuck::cast_slice(&QUAD_INDICES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_bytes_follow_layout_stride() {
        for variant in VertexVariant::ALL {
            let len = vertex_bytes(variant).len() as u64;
            assert_eq!(len, 4 * variant.array_stride());
        }
    }

    #[test]
    fn uploads_are_copy_aligned() {
        assert_eq!(index_bytes().len() as u64 % wgpu::COPY_BUFFER_ALIGNMENT, 0);
        for variant in VertexVariant::ALL {
            assert_eq!(vertex_bytes(variant).len() as u64 % wgpu::COPY_BUFFER_ALIGNMENT, 0);
        }
    }

    #[test]
    fn quad_winds_counter_clockwise() {
        for tri in QUAD_INDICES.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| POSITION_QUAD[i as usize].position);
            let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
            assert!(cross > 0.0);
        }
    }
}
