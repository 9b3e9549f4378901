use std::error::Error;

/// The host graphics subsystem, as seen by [`initialize`](super::initialize).
///
/// One implementation drives wgpu ([`WgpuHost`](super::WgpuHost)); tests plug
/// in hosts that can refuse any step on demand.
#[allow(async_fn_in_trait)]
pub trait GraphicsHost {
    /// Drawing surface handed in by the caller.
    type Surface;
    type Adapter;
    type Device;
    /// Presentation context obtained from a surface.
    type Context;
    /// Error raised when the device request is rejected.
    type Error: Error + Send + Sync + 'static;

    /// Returns false when no graphics subsystem is available at all.
    fn is_supported(&self) -> bool;

    /// Requests an adapter. `None` means the host has nothing suitable.
    async fn request_adapter(&self) -> Option<Self::Adapter>;

    /// Binds `surface` to a presentation context usable with `adapter`.
    fn acquire_context(
        &self,
        adapter: &Self::Adapter,
        surface: Self::Surface,
    ) -> Option<Self::Context>;

    /// Requests a logical device from `adapter`.
    async fn request_device(
        &self,
        adapter: &Self::Adapter,
        label: &str,
    ) -> Result<Self::Device, Self::Error>;

    /// The format the host prefers for presenting `context`.
    fn preferred_format(
        &self,
        adapter: &Self::Adapter,
        context: &Self::Context,
    ) -> Option<wgpu::TextureFormat>;

    /// Configures `context` to present with `device` in `format`.
    fn configure(
        &self,
        adapter: &Self::Adapter,
        device: &Self::Device,
        context: &mut Self::Context,
        format: wgpu::TextureFormat,
    );
}
