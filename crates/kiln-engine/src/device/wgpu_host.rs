use std::marker::PhantomData;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::{GpuInit, GraphicsHost};
use super::surface;

/// Logical device plus its command queue.
pub struct GpuDevice {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

/// A window surface and, once configured, its active configuration.
pub struct SurfaceContext<'w> {
    /// Surface lifetime is tied to the window it was created from.
    surface: wgpu::Surface<'w>,
    size: PhysicalSize<u32>,
    config: Option<wgpu::SurfaceConfiguration>,
}

impl<'w> SurfaceContext<'w> {
    pub fn surface(&self) -> &wgpu::Surface<'w> {
        &self.surface
    }

    /// Drawable size captured when the context was acquired.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Active configuration; `None` until configured.
    pub fn config(&self) -> Option<&wgpu::SurfaceConfiguration> {
        self.config.as_ref()
    }

    /// Splits a configured context into surface and configuration.
    pub fn into_configured(
        self,
    ) -> Option<(wgpu::Surface<'w>, wgpu::SurfaceConfiguration, PhysicalSize<u32>)> {
        let config = self.config?;
        Some((self.surface, config, self.size))
    }
}

/// [`GraphicsHost`] backed by a wgpu instance presenting to winit windows.
pub struct WgpuHost<'w> {
    instance: wgpu::Instance,
    init: GpuInit,
    _window: PhantomData<&'w Window>,
}

impl<'w> WgpuHost<'w> {
    pub fn new(init: GpuInit) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.backends,
            ..Default::default()
        });

        Self {
            instance,
            init,
            _window: PhantomData,
        }
    }

    pub fn instance(&self) -> &wgpu::Instance {
        &self.instance
    }
}

impl<'w> GraphicsHost for WgpuHost<'w> {
    type Surface = &'w Window;
    type Adapter = wgpu::Adapter;
    type Device = GpuDevice;
    type Context = SurfaceContext<'w>;
    type Error = wgpu::RequestDeviceError;

    fn is_supported(&self) -> bool {
        wgpu::Instance::enabled_backend_features().intersects(self.init.backends)
    }

    // No `compatible_surface`: the surface only exists once the context is
    // acquired, and `acquire_context` checks `is_surface_supported` instead.
    async fn request_adapter(&self) -> Option<wgpu::Adapter> {
        let adapter = self
            .instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: self.init.power_preference,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await;

        match adapter {
            Ok(adapter) => {
                log::debug!("adapter: {:?}", adapter.get_info());
                Some(adapter)
            }
            Err(err) => {
                log::debug!("adapter request failed: {err}");
                None
            }
        }
    }

    fn acquire_context(
        &self,
        adapter: &wgpu::Adapter,
        window: &'w Window,
    ) -> Option<SurfaceContext<'w>> {
        let size = window.inner_size();

        let surface = match self.instance.create_surface(window) {
            Ok(surface) => surface,
            Err(err) => {
                log::debug!("surface creation failed: {err}");
                return None;
            }
        };

        if !adapter.is_surface_supported(&surface) {
            log::debug!("adapter cannot present to this surface");
            return None;
        }

        Some(SurfaceContext {
            surface,
            size,
            config: None,
        })
    }

    async fn request_device(
        &self,
        adapter: &wgpu::Adapter,
        label: &str,
    ) -> Result<GpuDevice, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some(label),
                required_features: self.init.required_features,
                required_limits: self.init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await?;

        Ok(GpuDevice { device, queue })
    }

    fn preferred_format(
        &self,
        adapter: &wgpu::Adapter,
        context: &SurfaceContext<'w>,
    ) -> Option<wgpu::TextureFormat> {
        let caps = context.surface.get_capabilities(adapter);
        surface::choose_surface_format(&caps, self.init.prefer_srgb)
    }

    fn configure(
        &self,
        adapter: &wgpu::Adapter,
        device: &GpuDevice,
        context: &mut SurfaceContext<'w>,
        format: wgpu::TextureFormat,
    ) {
        let caps = context.surface.get_capabilities(adapter);
        let alpha_mode = surface::choose_alpha_mode(&caps, self.init.alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: context.size.width.max(1),
            height: context.size.height.max(1),
            present_mode: self.init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: self.init.desired_maximum_frame_latency,
        };

        context.surface.configure(&device.device, &config);
        context.config = Some(config);
    }
}
