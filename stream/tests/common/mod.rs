//! Common test utilities: in-memory medium and scripted transport mocks

use std::collections::VecDeque;
use std::io;

use gpt_disk_io::BlockIo;
use gpt_disk_types::{BlockSize, Lba};
use massbridge_stream::{ResetFlag, TransportSession, WaitTimeout};

/// In-memory block medium for testing
#[derive(Debug)]
pub struct MemoryBlockDevice {
    pub data: Vec<u8>,
    pub block_size: u32,
    pub reads: usize,
    pub writes: usize,
}

impl MemoryBlockDevice {
    /// Zero-filled medium of `blocks` 512-byte blocks
    pub fn new(blocks: usize) -> Self {
        Self {
            data: vec![0u8; blocks * 512],
            block_size: 512,
            reads: 0,
            writes: 0,
        }
    }

    /// Medium pre-filled with a rolling byte pattern
    pub fn with_pattern(blocks: usize) -> Self {
        let mut device = Self::new(blocks);
        for (i, byte) in device.data.iter_mut().enumerate() {
            *byte = (i % 251) as u8;
        }
        device
    }

    /// Medium with a non-bridge block size, for geometry rejection tests
    #[allow(dead_code)]
    pub fn with_block_size(blocks: usize, block_size: u32) -> Self {
        Self {
            data: vec![0u8; blocks * block_size as usize],
            block_size,
            reads: 0,
            writes: 0,
        }
    }
}

impl BlockIo for MemoryBlockDevice {
    type Error = io::Error;

    fn block_size(&self) -> BlockSize {
        BlockSize::new(self.block_size).expect("valid block size")
    }

    fn num_blocks(&mut self) -> Result<u64, Self::Error> {
        Ok((self.data.len() / self.block_size as usize) as u64)
    }

    fn read_blocks(&mut self, start_lba: Lba, dst: &mut [u8]) -> Result<(), Self::Error> {
        self.reads += 1;
        let offset = start_lba.0 as usize * self.block_size as usize;
        if offset + dst.len() > self.data.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "read beyond end of device",
            ));
        }
        dst.copy_from_slice(&self.data[offset..offset + dst.len()]);
        Ok(())
    }

    fn write_blocks(&mut self, start_lba: Lba, src: &[u8]) -> Result<(), Self::Error> {
        self.writes += 1;
        let offset = start_lba.0 as usize * self.block_size as usize;
        if offset + src.len() > self.data.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "write beyond end of device",
            ));
        }
        self.data[offset..offset + src.len()].copy_from_slice(src);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Device-to-host session: collects flushed banks into `received`
pub struct HostSink {
    pub bank: Vec<u8>,
    pub bank_size: usize,
    pub received: Vec<u8>,
    pub waits: usize,
    pub flushes: usize,
    pub writes: usize,
    /// Waits beyond this count fail with `WaitTimeout`
    pub wait_budget: Option<usize>,
    pub abort: ResetFlag,
    /// Raise the reset flag as this write-stream call completes
    pub abort_after_writes: Option<usize>,
}

impl HostSink {
    pub fn new(bank_size: usize) -> Self {
        Self {
            bank: Vec::new(),
            bank_size,
            received: Vec::new(),
            waits: 0,
            flushes: 0,
            writes: 0,
            wait_budget: None,
            abort: ResetFlag::new(),
            abort_after_writes: None,
        }
    }

    #[allow(dead_code)]
    pub fn with_wait_budget(mut self, budget: usize) -> Self {
        self.wait_budget = Some(budget);
        self
    }

    #[allow(dead_code)]
    pub fn abort_after(mut self, writes: usize) -> Self {
        self.abort_after_writes = Some(writes);
        self
    }
}

impl TransportSession for HostSink {
    fn is_ready(&self) -> bool {
        self.bank.len() < self.bank_size
    }

    fn wait_ready(&mut self) -> Result<(), WaitTimeout> {
        self.waits += 1;
        if let Some(budget) = self.wait_budget {
            if self.waits > budget {
                return Err(WaitTimeout);
            }
        }
        Ok(())
    }

    fn flush_output(&mut self) {
        self.flushes += 1;
        self.received.append(&mut self.bank);
    }

    fn advance_input(&mut self) {
        unreachable!("device-to-host session has no input side");
    }

    fn write_stream(&mut self, buf: &[u8]) {
        self.writes += 1;
        self.bank.extend_from_slice(buf);
        if self.abort_after_writes == Some(self.writes) {
            self.abort.raise();
        }
    }

    fn read_stream(&mut self, _buf: &mut [u8]) {
        unreachable!("device-to-host session has no input side");
    }

    fn is_aborted(&self) -> bool {
        self.abort.is_raised()
    }
}

/// Host-to-device session: serves scripted packets through an input bank
pub struct HostSource {
    pending: VecDeque<Vec<u8>>,
    bank: Vec<u8>,
    cursor: usize,
    pub waits: usize,
    pub advances: usize,
    pub reads: usize,
    pub abort: ResetFlag,
    /// Raise the reset flag as this read-stream call completes
    pub abort_after_reads: Option<usize>,
}

impl HostSource {
    /// Split `data` into packets of `packet_size` bytes
    pub fn new(data: &[u8], packet_size: usize) -> Self {
        Self {
            pending: data.chunks(packet_size).map(<[u8]>::to_vec).collect(),
            bank: Vec::new(),
            cursor: 0,
            waits: 0,
            advances: 0,
            reads: 0,
            abort: ResetFlag::new(),
            abort_after_reads: None,
        }
    }

    #[allow(dead_code)]
    pub fn abort_after(mut self, reads: usize) -> Self {
        self.abort_after_reads = Some(reads);
        self
    }
}

impl TransportSession for HostSource {
    fn is_ready(&self) -> bool {
        self.cursor < self.bank.len()
    }

    fn wait_ready(&mut self) -> Result<(), WaitTimeout> {
        self.waits += 1;
        if !self.is_ready() {
            match self.pending.pop_front() {
                Some(packet) => {
                    self.bank = packet;
                    self.cursor = 0;
                }
                None => return Err(WaitTimeout),
            }
        }
        Ok(())
    }

    fn flush_output(&mut self) {
        unreachable!("host-to-device session has no output side");
    }

    fn advance_input(&mut self) {
        self.advances += 1;
        self.bank.clear();
        self.cursor = 0;
    }

    fn write_stream(&mut self, _buf: &[u8]) {
        unreachable!("host-to-device session has no output side");
    }

    fn read_stream(&mut self, buf: &mut [u8]) {
        self.reads += 1;
        buf.copy_from_slice(&self.bank[self.cursor..self.cursor + buf.len()]);
        self.cursor += buf.len();
        if self.abort_after_reads == Some(self.reads) {
            self.abort.raise();
        }
    }

    fn is_aborted(&self) -> bool {
        self.abort.is_raised()
    }
}
