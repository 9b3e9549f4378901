/// Vertex and index buffers for one mesh.
///
/// Contents are uninitialized; fill them with `Queue::write_buffer`.
pub struct MeshBuffers {
    pub vertex: wgpu::Buffer,
    pub index: wgpu::Buffer,
}

/// Descriptors for a vertex buffer and an index buffer of the given sizes.
///
/// Sizes are used as given; no alignment or rounding is applied.
pub fn mesh_buffer_descriptors(
    vertex_byte_length: wgpu::BufferAddress,
    index_byte_length: wgpu::BufferAddress,
) -> [wgpu::BufferDescriptor<'static>; 2] {
    [
        wgpu::BufferDescriptor {
            label: Some("mesh vertex buffer"),
            size: vertex_byte_length,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        },
        wgpu::BufferDescriptor {
            label: Some("mesh index buffer"),
            size: index_byte_length,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        },
    ]
}

/// Allocates a fresh vertex buffer and index buffer.
///
/// Every call creates new resources; the caller owns and releases them.
pub fn allocate_mesh_buffers(
    device: &wgpu::Device,
    vertex_byte_length: wgpu::BufferAddress,
    index_byte_length: wgpu::BufferAddress,
) -> MeshBuffers {
    let [vertex_desc, index_desc] = mesh_buffer_descriptors(vertex_byte_length, index_byte_length);
    log::debug!("allocating mesh buffers: vertex {vertex_byte_length} B, index {index_byte_length} B");

    MeshBuffers {
        vertex: device.create_buffer(&vertex_desc),
        index: device.create_buffer(&index_desc),
    }
}
