//! Transfer geometry and per-chunk/per-transfer status types.

use static_assertions::const_assert_eq;

/// Logical block size of the backing medium in bytes.
pub const BLOCK_SIZE: usize = 512;

/// Bytes staged per transport interaction.
///
/// One chunk is the unit moved between the staging buffer and the
/// transport byte stream. Small on purpose: the staging buffer lives on
/// the stack of the in-flight transfer call.
pub const CHUNK_SIZE: usize = 16;

// Blocks must split into whole chunks; the relay never slices unevenly.
const_assert_eq!(BLOCK_SIZE % CHUNK_SIZE, 0);

/// Chunks needed to move one full block.
pub const CHUNKS_PER_BLOCK: usize = BLOCK_SIZE / CHUNK_SIZE;

/// Verdict of a single chunk relay, consumed by the device interval
/// primitive to decide whether to keep streaming the current block.
///
/// Anything other than [`Continue`](ChunkStep::Continue) stops the
/// interval immediately, and the bridge loop stops with it: once a relay
/// stops, no further device or transport I/O happens for that transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStep {
    /// Keep feeding chunks of the current block.
    Continue,

    /// Stop early: the transport readiness wait exceeded its bound.
    TimedOut,

    /// Stop early: the host reset the session mid-command.
    Aborted,
}

impl ChunkStep {
    /// Whether the interval primitive should request another chunk.
    #[inline]
    pub fn should_continue(&self) -> bool {
        matches!(self, ChunkStep::Continue)
    }
}

/// Final status of one `read_blocks` / `write_blocks` call.
///
/// Device-level failures are not an outcome; they propagate unchanged as
/// the `Err` arm of the bridge entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Every requested block was moved.
    Completed,

    /// The host reset the session; data moved so far is left as-is.
    Aborted,

    /// A transport readiness wait exceeded its bound.
    TimedOut,
}

impl From<ChunkStep> for TransferOutcome {
    fn from(step: ChunkStep) -> Self {
        match step {
            ChunkStep::Continue => TransferOutcome::Completed,
            ChunkStep::TimedOut => TransferOutcome::TimedOut,
            ChunkStep::Aborted => TransferOutcome::Aborted,
        }
    }
}
