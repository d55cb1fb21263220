//! Block-interval device primitive and the whole-block adapter.
//!
//! The bridge consumes storage through [`IntervalIo`]: a device that can
//! stream one block as a run of chunk-sized slices, invoking a relay for
//! each slice. Media that only expose whole-block transfers are wrapped
//! in [`BlockIoInterval`], which stages one block internally and slices
//! it:
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │            Streaming bridge            │
//! └───────────────────┬────────────────────┘
//!                     │ IntervalIo (chunk at a time)
//!                     ▼
//! ┌────────────────────────────────────────┐
//! │         BlockIoInterval (this)         │
//! │     block-sized staging buffer         │
//! └───────────────────┬────────────────────┘
//!                     │ gpt_disk_io::BlockIo (block at a time)
//!                     ▼
//! ┌────────────────────────────────────────┐
//! │      Raw medium (SD card, image)       │
//! └────────────────────────────────────────┘
//! ```

use gpt_disk_io::BlockIo;
use gpt_disk_types::{BlockSize, Lba};

use crate::error::DeviceError;
use crate::types::{ChunkStep, BLOCK_SIZE};

/// A storage device that streams block intervals chunk by chunk.
///
/// Both operations process `block_len` bytes starting at the absolute
/// byte offset `offset`, in slices of `chunk.len()` bytes, calling
/// `handler` once per slice with the slice and its absolute offset. The
/// first non-[`Continue`](ChunkStep::Continue) verdict stops the interval
/// and is returned to the caller.
pub trait IntervalIo {
    /// Device-level failure type, propagated unchanged to the bridge
    /// caller.
    type Error;

    /// Usable capacity of the medium in bytes.
    fn capacity_bytes(&mut self) -> Result<u64, Self::Error>;

    /// Stream one block out of the medium.
    ///
    /// Fills `chunk` with consecutive slices of the block and hands each
    /// to `handler` for consumption.
    fn read_interval<F>(
        &mut self,
        offset: u64,
        chunk: &mut [u8],
        block_len: usize,
        handler: F,
    ) -> Result<ChunkStep, Self::Error>
    where
        F: FnMut(&[u8], u64) -> ChunkStep;

    /// Stream one block into the medium.
    ///
    /// Asks `handler` to fill `chunk` for each slice, then commits the
    /// assembled block. A block whose handler stops mid-fill is dropped,
    /// not committed.
    fn write_interval<F>(
        &mut self,
        offset: u64,
        chunk: &mut [u8],
        block_len: usize,
        handler: F,
    ) -> Result<ChunkStep, Self::Error>
    where
        F: FnMut(&mut [u8], u64) -> ChunkStep;
}

/// Chunked interval access over a whole-block [`BlockIo`] device.
///
/// Holds one block of staging so the wrapped device only ever sees full
/// block transfers. Construction pins the device to the bridge geometry.
pub struct BlockIoInterval<B> {
    inner: B,
    block: [u8; BLOCK_SIZE],
}

impl<B: BlockIo> BlockIoInterval<B> {
    /// Wrap a block device.
    ///
    /// Fails with [`DeviceError::UnsupportedGeometry`] if the device's
    /// block size differs from [`BLOCK_SIZE`].
    pub fn new(inner: B) -> Result<Self, DeviceError<B::Error>> {
        if inner.block_size() != BlockSize::BS_512 {
            return Err(DeviceError::UnsupportedGeometry);
        }

        Ok(Self {
            inner,
            block: [0u8; BLOCK_SIZE],
        })
    }

    /// Access the wrapped device.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Unwrap the device.
    pub fn into_inner(self) -> B {
        self.inner
    }

    fn check_geometry(&self, offset: u64, chunk_len: usize, block_len: usize) -> Result<(), DeviceError<B::Error>> {
        let aligned = block_len == BLOCK_SIZE
            && offset % BLOCK_SIZE as u64 == 0
            && chunk_len != 0
            && block_len % chunk_len == 0;
        if aligned {
            Ok(())
        } else {
            Err(DeviceError::Misaligned)
        }
    }
}

impl<B: BlockIo> IntervalIo for BlockIoInterval<B> {
    type Error = DeviceError<B::Error>;

    fn capacity_bytes(&mut self) -> Result<u64, Self::Error> {
        let blocks = self.inner.num_blocks().map_err(DeviceError::Io)?;
        Ok(blocks * BLOCK_SIZE as u64)
    }

    fn read_interval<F>(
        &mut self,
        offset: u64,
        chunk: &mut [u8],
        block_len: usize,
        mut handler: F,
    ) -> Result<ChunkStep, Self::Error>
    where
        F: FnMut(&[u8], u64) -> ChunkStep,
    {
        self.check_geometry(offset, chunk.len(), block_len)?;

        let lba = Lba(offset / BLOCK_SIZE as u64);
        self.inner
            .read_blocks(lba, &mut self.block)
            .map_err(DeviceError::Io)?;

        let step_len = chunk.len();
        for (i, slice) in self.block.chunks_exact(step_len).enumerate() {
            chunk.copy_from_slice(slice);
            let step = handler(chunk, offset + (i * step_len) as u64);
            if !step.should_continue() {
                return Ok(step);
            }
        }

        Ok(ChunkStep::Continue)
    }

    fn write_interval<F>(
        &mut self,
        offset: u64,
        chunk: &mut [u8],
        block_len: usize,
        mut handler: F,
    ) -> Result<ChunkStep, Self::Error>
    where
        F: FnMut(&mut [u8], u64) -> ChunkStep,
    {
        self.check_geometry(offset, chunk.len(), block_len)?;

        let step_len = chunk.len();
        for i in 0..block_len / step_len {
            let step = handler(chunk, offset + (i * step_len) as u64);
            if !step.should_continue() {
                // Stopped mid-block: nothing reaches the medium.
                return Ok(step);
            }
            self.block[i * step_len..(i + 1) * step_len].copy_from_slice(chunk);
        }

        let lba = Lba(offset / BLOCK_SIZE as u64);
        self.inner
            .write_blocks(lba, &self.block)
            .map_err(DeviceError::Io)?;

        Ok(ChunkStep::Continue)
    }
}
