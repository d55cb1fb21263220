//! Flow-control gate between the chunk relay and the transport.
//!
//! Data may only move when the transport bank has room (device-to-host)
//! or data (host-to-device). When it has neither, the gate hands the
//! current bank over and performs the one bounded wait of the bridge.

use crate::error::WaitTimeout;
use crate::transport::TransportSession;

/// Make room for one more output chunk.
///
/// If the output bank is full, flush it to the host and wait for the
/// next bank to become ready.
pub fn ensure_output_room<T: TransportSession>(session: &mut T) -> Result<(), WaitTimeout> {
    if !session.is_ready() {
        session.flush_output();
        session.wait_ready()?;
    }
    Ok(())
}

/// Make one more input chunk available.
///
/// If the input bank is drained, release it and wait for the next host
/// packet to arrive.
pub fn ensure_input_data<T: TransportSession>(session: &mut T) -> Result<(), WaitTimeout> {
    if !session.is_ready() {
        session.advance_input();
        session.wait_ready()?;
    }
    Ok(())
}
