//! Transfer entry points driven by the mass-storage command layer.
//!
//! Both directions share one shape: a readiness precondition, a
//! block-by-block loop over the device interval primitive with the chunk
//! relay plugged in, and a boundary flush/advance of the last partial
//! bank. The chunk staging buffer lives on this call's stack and is owned
//! by it for the whole transfer, so a second transfer cannot alias it.

use gpt_disk_types::Lba;
use log::{debug, trace};

use crate::chunk;
use crate::device::IntervalIo;
use crate::transport::TransportSession;
use crate::types::{ChunkStep, TransferOutcome, BLOCK_SIZE, CHUNK_SIZE};

/// Stream `count` blocks from the device to the host, starting at
/// `address`.
///
/// Returns the transfer outcome, or the device's own error unchanged if
/// the medium fails mid-run. `address + count` must stay within the
/// device's addressable range.
///
/// A `count` of zero performs no device I/O but still evaluates the
/// transport readiness precondition once.
pub fn read_blocks<D, T>(
    device: &mut D,
    session: &mut T,
    address: Lba,
    count: u16,
) -> Result<TransferOutcome, D::Error>
where
    D: IntervalIo,
    T: TransportSession,
{
    trace!("read {} blocks at lba {}", count, address.0);

    // The host must be ready to take output before any medium access.
    if session.wait_ready().is_err() {
        debug!("read precondition wait timed out");
        return Ok(TransferOutcome::TimedOut);
    }

    let mut staging = [0u8; CHUNK_SIZE];
    let mut outcome = TransferOutcome::Completed;

    for lba in address.0..address.0 + u64::from(count) {
        let step = device.read_interval(
            lba * BLOCK_SIZE as u64,
            &mut staging,
            BLOCK_SIZE,
            |data, _offset| chunk::relay_out(data, session),
        )?;

        if !step.should_continue() {
            outcome = step.into();
            debug!("read stopped early at lba {}: {:?}", lba, outcome);
            break;
        }
    }

    // Hand the final partial bank to the host.
    if !session.is_ready() {
        session.flush_output();
    }

    Ok(outcome)
}

/// Stream `count` blocks from the host to the device, starting at
/// `address`.
///
/// Mirror image of [`read_blocks`]; the same preconditions apply.
pub fn write_blocks<D, T>(
    device: &mut D,
    session: &mut T,
    address: Lba,
    count: u16,
) -> Result<TransferOutcome, D::Error>
where
    D: IntervalIo,
    T: TransportSession,
{
    trace!("write {} blocks at lba {}", count, address.0);

    // The first host packet must have arrived before any medium access.
    if session.wait_ready().is_err() {
        debug!("write precondition wait timed out");
        return Ok(TransferOutcome::TimedOut);
    }

    let mut staging = [0u8; CHUNK_SIZE];
    let mut outcome = TransferOutcome::Completed;

    for lba in address.0..address.0 + u64::from(count) {
        let step = device.write_interval(
            lba * BLOCK_SIZE as u64,
            &mut staging,
            BLOCK_SIZE,
            |data, _offset| chunk::relay_in(data, session),
        )?;

        if !step.should_continue() {
            outcome = step.into();
            debug!("write stopped early at lba {}: {:?}", lba, outcome);
            break;
        }
    }

    // Release the drained bank so the next host packet can land.
    if !session.is_ready() {
        session.advance_input();
    }

    Ok(outcome)
}

/// Addressable capacity of the medium in blocks.
pub fn capacity_in_blocks<D: IntervalIo>(device: &mut D) -> Result<u32, D::Error> {
    Ok((device.capacity_bytes()? / BLOCK_SIZE as u64) as u32)
}
