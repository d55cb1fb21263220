//! Per-chunk relay between the staging buffer and the transport.
//!
//! The device interval primitive invokes one of these for every
//! chunk-sized slice of a block. Each relay moves exactly one full chunk:
//! gate first, then the byte move, then the abort poll. The abort poll
//! deliberately comes after the move, so an aborted chunk still leaves
//! the streams in step.

use crate::flow;
use crate::transport::TransportSession;
use crate::types::ChunkStep;

/// Relay one chunk from the staging buffer to the host.
pub fn relay_out<T: TransportSession>(chunk: &[u8], session: &mut T) -> ChunkStep {
    if flow::ensure_output_room(session).is_err() {
        return ChunkStep::TimedOut;
    }

    session.write_stream(chunk);

    if session.is_aborted() {
        return ChunkStep::Aborted;
    }

    ChunkStep::Continue
}

/// Relay one chunk from the host into the staging buffer.
pub fn relay_in<T: TransportSession>(chunk: &mut [u8], session: &mut T) -> ChunkStep {
    if flow::ensure_input_data(session).is_err() {
        return ChunkStep::TimedOut;
    }

    session.read_stream(chunk);

    if session.is_aborted() {
        return ChunkStep::Aborted;
    }

    ChunkStep::Continue
}
