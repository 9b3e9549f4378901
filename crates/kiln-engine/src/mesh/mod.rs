//! Mesh vertex formats and GPU buffer allocation.

mod buffers;
mod vertex;

pub use buffers::{allocate_mesh_buffers, mesh_buffer_descriptors, MeshBuffers};
pub use vertex::{MeshVertex, PositionVertex};
