//! Host-transport session capability.
//!
//! The bridge never talks to transport hardware directly; it drives a
//! [`TransportSession`], which models one bulk endpoint bank of a
//! mass-storage transport: a fixed-size buffer the host fills (OUT) or
//! drains (IN), plus a reset indicator the host can raise at any time.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::error::WaitTimeout;

/// One side of the host bulk data channel, as seen by an in-flight
/// transfer.
///
/// A session is direction-scoped: during a device-to-host transfer the
/// bank readiness means "room for more output", during a host-to-device
/// transfer it means "unread input available". The same transfer never
/// uses both directions.
///
/// # Waiting
///
/// [`wait_ready`](Self::wait_ready) is the single suspension point of the
/// whole bridge. Implementations must bound it — poll with an iteration
/// or tick budget — and report [`WaitTimeout`] instead of spinning
/// forever.
pub trait TransportSession {
    /// Current bank readiness: room for more output (device-to-host) or
    /// unread data (host-to-device).
    fn is_ready(&self) -> bool;

    /// Block until the current bank becomes ready, within the session's
    /// configured bound.
    fn wait_ready(&mut self) -> Result<(), WaitTimeout>;

    /// Hand the filled output bank to the host. Does not wait for the
    /// next bank.
    fn flush_output(&mut self);

    /// Release the drained input bank so the host can send the next
    /// packet. Does not wait for it to arrive.
    fn advance_input(&mut self);

    /// Copy `buf` into the output bank. The flow gate guarantees room
    /// before each call.
    fn write_stream(&mut self, buf: &[u8]);

    /// Fill `buf` from the input bank. The flow gate guarantees data
    /// before each call.
    fn read_stream(&mut self, buf: &mut [u8]);

    /// Whether the host has reset the session mid-command.
    fn is_aborted(&self) -> bool;
}

/// Host-initiated reset indicator shared between the command layer and an
/// in-flight transfer.
///
/// The command layer raises the flag from its reset handler; the transfer
/// polls it once per chunk, so worst-case abort latency is one chunk.
#[derive(Debug)]
pub struct ResetFlag(AtomicBool);

impl ResetFlag {
    /// New, lowered flag.
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Raise the flag.
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Lower the flag for the next command.
    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Whether the flag is currently raised.
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for ResetFlag {
    fn default() -> Self {
        Self::new()
    }
}
