//! Serial command interface driver for VS10xx audio decoders.
//!
//! Register-style access to a VS1003-class decoder over a shared
//! synchronous bus: a fixed opcode byte, a register address byte, and a
//! 16-bit value, clocked out while the command chip select is held. The
//! chip signals readiness for the next command on a dedicated
//! data-request line, which this driver polls with a bounded budget.
//!
//! The decoder shares the bus with other peripherals, so command
//! transactions drop to the safe bus clock and restore the fast clock
//! before returning.
//!
//! # Usage
//!
//! ```ignore
//! use massbridge_codec::{Sci, registers};
//!
//! let mut codec = Sci::new(bus, 50_000);
//! codec.init()?;
//! codec.write_register(registers::VOL, 0x2424)?;
//! ```

#![no_std]
#![warn(missing_docs)]

use log::warn;

/// SCI read opcode.
const OP_READ: u8 = 0x03;

/// SCI write opcode.
const OP_WRITE: u8 = 0x02;

/// Chip version expected in the status register (VS1003).
const SUPPORTED_VERSION: u8 = 3;

/// Bytes the chip accepts per data-request assertion on the stream path.
const DATA_BURST: usize = 32;

/// SCI register addresses.
pub mod registers {
    /// Mode control.
    pub const MODE: u8 = 0x00;
    /// Status, including the chip version field.
    pub const STATUS: u8 = 0x01;
    /// Built-in bass/treble control.
    pub const BASS: u8 = 0x02;
    /// Clock frequency and multiplier.
    pub const CLOCKF: u8 = 0x03;
    /// Decoded audio data rate.
    pub const AUDATA: u8 = 0x05;
    /// Volume control, one byte per channel.
    pub const VOL: u8 = 0x0B;
}

/// Hardware lines and byte transfer of the shared synchronous bus, as
/// seen by the decoder.
pub trait SciBus {
    /// Drive the command chip select.
    fn select_control(&mut self, active: bool);

    /// Drive the data chip select.
    fn select_data(&mut self, active: bool);

    /// Level of the data-request line; high when the chip can take a
    /// command or more stream data.
    fn data_request(&self) -> bool;

    /// Exchange one byte on the bus.
    fn transfer(&mut self, byte: u8) -> u8;

    /// Toggle the doubled bus clock. Command transactions run with it
    /// off; stream data may run with it on.
    fn set_fast_clock(&mut self, enabled: bool);
}

/// Errors surfaced by the decoder driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// The data-request line stayed low past the poll budget.
    NotReady,

    /// The status register reported an unsupported chip version.
    WrongVersion(u8),
}

impl core::fmt::Display for CodecError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotReady => write!(f, "decoder not ready within poll budget"),
            Self::WrongVersion(v) => write!(f, "unsupported decoder version {}", v),
        }
    }
}

/// VS10xx decoder handle over an [`SciBus`].
pub struct Sci<B> {
    bus: B,
    /// Poll iterations allowed per data-request wait.
    ready_budget: u32,
}

impl<B: SciBus> Sci<B> {
    /// New driver over `bus`, polling the data-request line at most
    /// `ready_budget` times per wait.
    pub fn new(bus: B, ready_budget: u32) -> Self {
        Self { bus, ready_budget }
    }

    /// Probe the chip and verify it is a supported decoder.
    ///
    /// Reads the version field out of the status register; anything but
    /// a VS1003 is rejected.
    pub fn init(&mut self) -> Result<(), CodecError> {
        let status = self.read_register(registers::STATUS)?;
        let version = ((status & 0xF0) >> 4) as u8;
        if version != SUPPORTED_VERSION {
            warn!("unexpected decoder version {}", version);
            return Err(CodecError::WrongVersion(version));
        }
        Ok(())
    }

    /// Read a 16-bit SCI register.
    pub fn read_register(&mut self, addr: u8) -> Result<u16, CodecError> {
        self.wait_ready()?;
        self.bus.set_fast_clock(false);
        self.bus.select_control(true);

        self.bus.transfer(OP_READ);
        self.bus.transfer(addr);

        // Dummy sends clock the value out.
        let hi = self.bus.transfer(0);
        let lo = self.bus.transfer(0);

        self.bus.select_control(false);
        self.bus.set_fast_clock(true);

        Ok(u16::from_be_bytes([hi, lo]))
    }

    /// Write a 16-bit SCI register.
    pub fn write_register(&mut self, addr: u8, value: u16) -> Result<(), CodecError> {
        self.wait_ready()?;
        self.bus.set_fast_clock(false);
        self.bus.select_control(true);

        self.bus.transfer(OP_WRITE);
        self.bus.transfer(addr);
        self.bus.transfer((value >> 8) as u8);
        self.bus.transfer((value & 0xFF) as u8);

        self.bus.select_control(false);
        self.bus.set_fast_clock(true);

        Ok(())
    }

    /// Stream encoded audio bytes to the decoder's data interface.
    ///
    /// The chip takes at most 32 bytes per data-request assertion, so
    /// the stream is paced in bursts.
    pub fn send_data(&mut self, data: &[u8]) -> Result<(), CodecError> {
        for burst in data.chunks(DATA_BURST) {
            self.wait_ready()?;
            self.bus.select_data(true);
            for &byte in burst {
                self.bus.transfer(byte);
            }
            self.bus.select_data(false);
        }
        Ok(())
    }

    /// Reclaim the bus.
    pub fn into_bus(self) -> B {
        self.bus
    }

    /// Poll the data-request line until it goes high.
    fn wait_ready(&mut self) -> Result<(), CodecError> {
        for _ in 0..self.ready_budget {
            if self.bus.data_request() {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        Err(CodecError::NotReady)
    }
}
