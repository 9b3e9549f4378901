//! Kiln engine crate.
//!
//! One-shot GPU setup on wgpu: device + presentation context initialization,
//! the main render pipeline, and mesh buffer allocation.

pub mod device;
pub mod logging;
pub mod mesh;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod testing {
    /// Headless device for tests; `None` when the machine has no adapter.
    pub(crate) fn headless_device() -> Option<(wgpu::Device, wgpu::Queue)> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter =
            pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()))
                .ok()?;

        pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("kiln test device"),
            ..Default::default()
        }))
        .ok()
    }
}
