//! The main render pipeline.
//!
//! One embedded shader per [`VertexVariant`], one vertex buffer layout, one
//! bind group layout holding the camera matrix. Built once per
//! `(device, format, variant)`; nothing is cached.

mod builder;
mod camera;
mod layout;
mod shader;
mod variant;

pub use builder::{build_pipeline, describe_pipeline, MainPipeline, PipelineDesc};
pub use camera::{CameraBinding, CameraUniform};
pub use layout::{CAMERA_BINDING, CAMERA_GROUP, CAMERA_UNIFORM_SIZE};
pub use shader::{validate_shader, FRAGMENT_ENTRY, VERTEX_ENTRY};
pub use variant::VertexVariant;
