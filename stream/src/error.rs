//! Error types for bridge operations.

use core::fmt;

/// The bounded wait for transport readiness elapsed without the bank
/// becoming ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitTimeout;

impl fmt::Display for WaitTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport readiness wait timed out")
    }
}

/// Errors surfaced by the block-interval device layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError<E> {
    /// Underlying block device error, propagated unchanged.
    Io(E),

    /// Transfer offset or length does not line up with the medium
    /// geometry.
    Misaligned,

    /// The wrapped device does not expose the supported block size.
    UnsupportedGeometry,
}

impl<E: fmt::Display> fmt::Display for DeviceError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "block device error: {}", e),
            Self::Misaligned => write!(f, "offset or length misaligned to block geometry"),
            Self::UnsupportedGeometry => write!(f, "unsupported device block size"),
        }
    }
}
