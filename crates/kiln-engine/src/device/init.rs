/// Knobs for [`WgpuHost`](super::WgpuHost) and [`Gpu::new`](super::Gpu::new).
///
/// `Default` asks for every backend, a high-performance adapter, FIFO
/// presentation and the host's own surface format.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends the instance may use.
    ///
    /// If none of them is compiled into wgpu, initialization reports an
    /// unsupported platform.
    pub backends: wgpu::Backends,

    /// Adapter power preference.
    pub power_preference: wgpu::PowerPreference,

    /// Prefer an sRGB surface format when available.
    ///
    /// When false the host's preferred format is used unchanged.
    pub prefer_srgb: bool,

    /// Present mode. FIFO is the only mode every backend has to support.
    pub present_mode: wgpu::PresentMode,

    /// Compositing alpha mode. `None`, or a mode the surface does not list,
    /// falls back to the surface's first listed mode.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits passed to `request_device`.
    pub required_limits: wgpu::Limits,

    /// Written to `SurfaceConfiguration::desired_maximum_frame_latency`.
    /// Backends may clamp it.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
