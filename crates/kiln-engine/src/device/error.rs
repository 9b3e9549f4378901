use std::error::Error;
use std::fmt;

/// Failure while bringing up a device and presentation context.
///
/// Every variant is terminal for the call that produced it; nothing is retried.
#[derive(Debug)]
pub enum InitError {
    /// The host has no usable graphics subsystem.
    UnsupportedPlatform,
    /// The adapter request resolved without an adapter.
    NoAdapter,
    /// The surface did not yield a presentation context.
    ContextUnavailable,
    /// The host rejected the device request.
    Device(Box<dyn Error + Send + Sync + 'static>),
}

impl InitError {
    pub(crate) fn device(err: impl Error + Send + Sync + 'static) -> Self {
        Self::Device(Box::new(err))
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedPlatform => {
                f.write_str("GPU rendering is not supported on this platform")
            }
            Self::NoAdapter => f.write_str("no suitable GPU adapter found"),
            Self::ContextUnavailable => {
                f.write_str("could not get a presentation context from the surface")
            }
            Self::Device(_) => f.write_str("failed to create GPU device"),
        }
    }
}

impl Error for InitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Device(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}
