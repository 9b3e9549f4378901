use super::{GraphicsHost, InitError};

/// Label given to every device requested by [`initialize`].
pub const DEVICE_LABEL: &str = "main-device";

/// Everything produced by a successful [`initialize`] call.
///
/// The caller owns all of it; nothing here is released explicitly.
pub struct Initialized<H: GraphicsHost> {
    pub adapter: H::Adapter,
    pub device: H::Device,
    /// Context already configured with `device` and `format`.
    pub context: H::Context,
    pub format: wgpu::TextureFormat,
}

/// Acquires an adapter and device, binds `surface` to a presentation context
/// and configures it with the host's preferred format.
///
/// Checks run in order: platform support, adapter, presentation context. The
/// first failure aborts the call. Each call yields an independent device and
/// context.
pub async fn initialize<H: GraphicsHost>(
    host: &H,
    surface: H::Surface,
) -> Result<Initialized<H>, InitError> {
    if !host.is_supported() {
        log::warn!("graphics subsystem unavailable");
        return Err(InitError::UnsupportedPlatform);
    }

    let Some(adapter) = host.request_adapter().await else {
        log::warn!("adapter request returned no adapter");
        return Err(InitError::NoAdapter);
    };

    let Some(mut context) = host.acquire_context(&adapter, surface) else {
        log::warn!("surface did not yield a presentation context");
        return Err(InitError::ContextUnavailable);
    };

    let device = host
        .request_device(&adapter, DEVICE_LABEL)
        .await
        .map_err(InitError::device)?;

    let Some(format) = host.preferred_format(&adapter, &context) else {
        log::warn!("presentation context reports no usable format");
        return Err(InitError::ContextUnavailable);
    };

    host.configure(&adapter, &device, &mut context, format);
    log::info!("presentation context configured with {format:?}");

    Ok(Initialized {
        adapter,
        device,
        context,
        format,
    })
}

/// Blocking form of [`initialize`]; parks the current thread until the host
/// grants or rejects each request.
pub fn initialize_blocking<H: GraphicsHost>(
    host: &H,
    surface: H::Surface,
) -> Result<Initialized<H>, InitError> {
    pollster::block_on(initialize(host, surface))
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::error::Error;
    use std::io;

    use super::*;

    #[derive(Debug)]
    struct StubContext {
        surface: &'static str,
        configured: Option<(u32, wgpu::TextureFormat)>,
    }

    struct StubHost {
        supported: bool,
        adapter: bool,
        context: bool,
        device: bool,
        format: Option<wgpu::TextureFormat>,
        adapter_requests: Cell<u32>,
        next_device: Cell<u32>,
        labels: RefCell<Vec<String>>,
    }

    impl StubHost {
        fn conformant(format: wgpu::TextureFormat) -> Self {
            Self {
                supported: true,
                adapter: true,
                context: true,
                device: true,
                format: Some(format),
                adapter_requests: Cell::new(0),
                next_device: Cell::new(1),
                labels: RefCell::new(Vec::new()),
            }
        }
    }

    impl GraphicsHost for StubHost {
        type Surface = &'static str;
        type Adapter = ();
        type Device = u32;
        type Context = StubContext;
        type Error = io::Error;

        fn is_supported(&self) -> bool {
            self.supported
        }

        async fn request_adapter(&self) -> Option<()> {
            self.adapter_requests.set(self.adapter_requests.get() + 1);
            self.adapter.then_some(())
        }

        fn acquire_context(&self, _: &(), surface: &'static str) -> Option<StubContext> {
            self.context.then_some(StubContext { surface, configured: None })
        }

        async fn request_device(&self, _: &(), label: &str) -> Result<u32, io::Error> {
            self.labels.borrow_mut().push(label.to_string());
            if !self.device {
                return Err(io::Error::other("device lost during creation"));
            }
            let id = self.next_device.get();
            self.next_device.set(id + 1);
            Ok(id)
        }

        fn preferred_format(&self, _: &(), _: &StubContext) -> Option<wgpu::TextureFormat> {
            self.format
        }

        fn configure(
            &self,
            _: &(),
            device: &u32,
            context: &mut StubContext,
            format: wgpu::TextureFormat,
        ) {
            context.configured = Some((*device, format));
        }
    }

    fn run(host: &StubHost) -> Result<Initialized<StubHost>, InitError> {
        initialize_blocking(host, "canvas")
    }

    #[test]
    fn unsupported_platform_aborts_before_adapter_request() {
        let host = StubHost {
            supported: false,
            ..StubHost::conformant(wgpu::TextureFormat::Bgra8Unorm)
        };
        let err = run(&host).err().expect("must fail");
        assert!(matches!(err, InitError::UnsupportedPlatform));
        assert_eq!(host.adapter_requests.get(), 0);
        assert!(err.to_string().contains("not supported"));
    }

    #[test]
    fn missing_adapter_is_reported() {
        let host = StubHost {
            adapter: false,
            ..StubHost::conformant(wgpu::TextureFormat::Bgra8Unorm)
        };
        let err = run(&host).err().expect("must fail");
        assert!(matches!(err, InitError::NoAdapter));
        assert!(host.labels.borrow().is_empty());
    }

    #[test]
    fn missing_context_is_distinct_from_missing_adapter() {
        let host = StubHost {
            context: false,
            ..StubHost::conformant(wgpu::TextureFormat::Bgra8Unorm)
        };
        let err = run(&host).err().expect("must fail");
        assert!(matches!(err, InitError::ContextUnavailable));
        assert_ne!(err.to_string(), InitError::NoAdapter.to_string());
    }

    #[test]
    fn context_without_format_is_unavailable() {
        let host = StubHost {
            format: None,
            ..StubHost::conformant(wgpu::TextureFormat::Bgra8Unorm)
        };
        assert!(matches!(run(&host), Err(InitError::ContextUnavailable)));
    }

    #[test]
    fn device_rejection_keeps_host_error_as_source() {
        let host = StubHost {
            device: false,
            ..StubHost::conformant(wgpu::TextureFormat::Bgra8Unorm)
        };
        let err = run(&host).err().expect("must fail");
        assert!(matches!(err, InitError::Device(_)));
        assert_eq!(err.to_string(), "failed to create GPU device");
        let source = err.source().expect("host error kept as source");
        assert!(source.to_string().contains("device lost during creation"));
    }

    #[test]
    fn configures_context_with_preferred_format() {
        let host = StubHost::conformant(wgpu::TextureFormat::Bgra8Unorm);
        let ready = run(&host).expect("init");

        assert_eq!(ready.format, wgpu::TextureFormat::Bgra8Unorm);
        assert_eq!(ready.context.surface, "canvas");
        assert_eq!(
            ready.context.configured,
            Some((ready.device, wgpu::TextureFormat::Bgra8Unorm))
        );
        assert_eq!(host.labels.borrow().as_slice(), [DEVICE_LABEL]);
    }

    #[test]
    fn repeated_calls_yield_independent_devices() {
        let host = StubHost::conformant(wgpu::TextureFormat::Rgba8Unorm);
        let first = run(&host).expect("first init");
        let second = run(&host).expect("second init");
        assert_ne!(first.device, second.device);
        assert_eq!(host.adapter_requests.get(), 2);
    }
}
