//! GPU device + presentation context setup.
//!
//! This module is responsible for:
//! - checking that the host can render at all
//! - acquiring an adapter, a logical device and a presentation context
//! - configuring the context with the host's preferred format
//! - acquiring frames for callers that present to a window

mod context;
mod error;
mod frame;
mod gpu;
mod host;
mod init;
mod surface;
mod wgpu_host;

pub use context::{initialize, initialize_blocking, Initialized, DEVICE_LABEL};
pub use error::{InitError, SurfaceErrorAction};
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use host::GraphicsHost;
pub use init::GpuInit;
pub use wgpu_host::{GpuDevice, SurfaceContext, WgpuHost};
