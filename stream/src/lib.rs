//! Chunked Streaming Bridge
//!
//! A `no_std` bridge between a host-facing bulk mass-storage transport
//! and a raw block device, streaming data in small fixed chunks through a
//! single stack-owned staging buffer.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │     Mass-storage command layer         │
//! └───────────────────┬────────────────────┘
//!                     │ read_blocks / write_blocks
//!                     ▼
//! ┌────────────────────────────────────────┐
//! │        Streaming bridge (this)         │
//! │   per-block loop + 16-byte staging     │
//! └──────┬──────────────────────┬──────────┘
//!        │ IntervalIo           │ TransportSession
//!        ▼                      ▼
//! ┌──────────────┐      ┌───────────────────┐
//! │  Raw medium  │      │  Bulk endpoint    │
//! │  (SD card)   │      │  banks + reset    │
//! └──────────────┘      └───────────────────┘
//! ```
//!
//! Control flows downward; completion and abort status flow back up
//! through return values only. The whole path is single-threaded and
//! cooperative: the one suspension point is the bounded transport
//! readiness wait inside the flow gate.
//!
//! # Usage
//!
//! ```ignore
//! use massbridge_stream::{read_blocks, BlockIoInterval, TransferOutcome};
//! use gpt_disk_types::Lba;
//!
//! let mut device = BlockIoInterval::new(sd_card)?;
//!
//! match read_blocks(&mut device, &mut session, Lba(cmd.lba), cmd.blocks)? {
//!     TransferOutcome::Completed => {}
//!     TransferOutcome::Aborted => command_failed(&mut session),
//!     TransferOutcome::TimedOut => command_failed(&mut session),
//! }
//! ```

#![no_std]
#![warn(missing_docs)]

pub mod bridge;
pub mod chunk;
pub mod device;
pub mod error;
pub mod flow;
pub mod transport;
pub mod types;

pub use bridge::{capacity_in_blocks, read_blocks, write_blocks};
pub use device::{BlockIoInterval, IntervalIo};
pub use error::{DeviceError, WaitTimeout};
pub use transport::{ResetFlag, TransportSession};
pub use types::{ChunkStep, TransferOutcome, BLOCK_SIZE, CHUNKS_PER_BLOCK, CHUNK_SIZE};
