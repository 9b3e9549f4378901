/// Swapchain texture, its view and a fresh encoder, from
/// [`Gpu::begin_frame`](super::Gpu::begin_frame).
///
/// The next `begin_frame` blocks until this one is passed to
/// [`Gpu::submit`](super::Gpu::submit).
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
