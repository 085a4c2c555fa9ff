//! Blocking MCP2515 CAN controller driver.
//!
//! Only the slice of the chip this gauge needs: reset, 500 kbit/s bit
//! timing, normal mode, single-buffer transmit (TXB0) and receive (RXB0)
//! with the INT pin signalling a full receive buffer.
//!
//! The controller hangs off SPI1 with a 16 MHz crystal; the display owns
//! SPI0. Transmit is best-effort: if TXB0 is still busy with the previous
//! frame the new one is dropped, matching the bus contract of "no retry, no
//! backpressure".

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Blocking, Config as SpiConfig, Spi};
use embedded_can::StandardId;

// SPI instructions
const CMD_RESET: u8 = 0xC0;
const CMD_READ: u8 = 0x03;
const CMD_WRITE: u8 = 0x02;
const CMD_RTS_TXB0: u8 = 0x81;
const CMD_BIT_MODIFY: u8 = 0x05;

// Registers
const REG_CNF3: u8 = 0x28;
const REG_CNF2: u8 = 0x29;
const REG_CNF1: u8 = 0x2A;
const REG_CANINTE: u8 = 0x2B;
const REG_CANINTF: u8 = 0x2C;
const REG_TXB0CTRL: u8 = 0x30;
const REG_TXB0SIDH: u8 = 0x31;
const REG_RXB0CTRL: u8 = 0x60;
const REG_RXB0SIDH: u8 = 0x61;
const REG_CANSTAT: u8 = 0x0E;
const REG_CANCTRL: u8 = 0x0F;

// Bit timing for 500 kbit/s with a 16 MHz crystal
const CNF1_500K: u8 = 0x00;
const CNF2_500K: u8 = 0xF0;
const CNF3_500K: u8 = 0x86;

// Operating modes (CANCTRL/CANSTAT bits 7..5)
const MODE_MASK: u8 = 0xE0;
const MODE_NORMAL: u8 = 0x00;
const MODE_CONFIG: u8 = 0x80;

// Flag bits
const CANINTE_RX0IE: u8 = 0x01;
const CANINTF_RX0IF: u8 = 0x01;
const TXB0CTRL_TXREQ: u8 = 0x08;
/// Receive any standard or extended frame, no filtering.
const RXB0CTRL_RXM_ANY: u8 = 0x60;

/// A received classic data frame.
#[derive(Clone, Copy, Debug)]
pub struct CanFrame {
    /// 11-bit identifier.
    pub id: u16,
    /// Significant data bytes (0..=8).
    pub dlc: u8,
    pub data: [u8; 8],
}

/// Driver faults surfaced to the caller.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CanError {
    /// TXB0 still pending; the frame was dropped.
    TxBusy,
    /// Controller did not enter the requested operating mode.
    Mode,
}

/// SPI configuration for the MCP2515 (10 MHz maximum, mode 0).
pub fn can_spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = 10_000_000;
    config
}

pub struct Mcp2515<'d> {
    spi: Spi<'d, SPI1, Blocking>,
    cs: Output<'d>,
}

impl<'d> Mcp2515<'d> {
    pub fn new(spi: Spi<'d, SPI1, Blocking>, cs: Output<'d>) -> Self { Self { spi, cs } }

    fn read_reg(&mut self, reg: u8) -> u8 {
        let mut buf = [CMD_READ, reg, 0];
        self.cs.set_low();
        self.spi.blocking_transfer_in_place(&mut buf).ok();
        self.cs.set_high();
        buf[2]
    }

    fn write_reg(&mut self, reg: u8, value: u8) {
        self.cs.set_low();
        self.spi.blocking_write(&[CMD_WRITE, reg, value]).ok();
        self.cs.set_high();
    }

    /// Burst-write consecutive registers starting at `start` (the address
    /// auto-increments while CS stays asserted).
    fn write_regs(&mut self, start: u8, values: &[u8]) {
        self.cs.set_low();
        self.spi.blocking_write(&[CMD_WRITE, start]).ok();
        self.spi.blocking_write(values).ok();
        self.cs.set_high();
    }

    fn bit_modify(&mut self, reg: u8, mask: u8, value: u8) {
        self.cs.set_low();
        self.spi.blocking_write(&[CMD_BIT_MODIFY, reg, mask, value]).ok();
        self.cs.set_high();
    }

    /// Hardware reset. The chip needs a few milliseconds before it accepts
    /// configuration; the caller provides the delay.
    pub fn reset(&mut self) {
        self.cs.set_low();
        self.spi.blocking_write(&[CMD_RESET]).ok();
        self.cs.set_high();
    }

    /// One-time bus setup: bit timing, open receive buffer, receive
    /// interrupt, then normal mode. Must complete before the first transmit.
    pub fn configure(&mut self) -> Result<(), CanError> {
        self.write_reg(REG_CANCTRL, MODE_CONFIG);
        if self.read_reg(REG_CANSTAT) & MODE_MASK != MODE_CONFIG {
            return Err(CanError::Mode);
        }

        self.write_reg(REG_CNF1, CNF1_500K);
        self.write_reg(REG_CNF2, CNF2_500K);
        self.write_reg(REG_CNF3, CNF3_500K);

        self.write_reg(REG_RXB0CTRL, RXB0CTRL_RXM_ANY);
        self.write_reg(REG_CANINTE, CANINTE_RX0IE);

        self.write_reg(REG_CANCTRL, MODE_NORMAL);
        if self.read_reg(REG_CANSTAT) & MODE_MASK != MODE_NORMAL {
            return Err(CanError::Mode);
        }
        Ok(())
    }

    /// Load TXB0 with an 8-byte frame and request transmission.
    ///
    /// Returns [`CanError::TxBusy`] without touching the buffer when the
    /// previous frame has not gone out yet.
    pub fn transmit(&mut self, id: StandardId, data: &[u8; 8]) -> Result<(), CanError> {
        if self.read_reg(REG_TXB0CTRL) & TXB0CTRL_TXREQ != 0 {
            return Err(CanError::TxBusy);
        }

        let raw = id.as_raw();
        let mut buf = [0u8; 13];
        buf[0] = (raw >> 3) as u8; // SIDH
        buf[1] = ((raw & 0x07) << 5) as u8; // SIDL, standard data frame
        buf[4] = data.len() as u8; // DLC
        buf[5..].copy_from_slice(data);
        self.write_regs(REG_TXB0SIDH, &buf);

        self.cs.set_low();
        self.spi.blocking_write(&[CMD_RTS_TXB0]).ok();
        self.cs.set_high();
        Ok(())
    }

    /// True while RXB0 holds an unread frame.
    pub fn has_rx0(&mut self) -> bool { self.read_reg(REG_CANINTF) & CANINTF_RX0IF != 0 }

    /// Read RXB0 and release it by clearing the receive flag.
    pub fn read_rx0(&mut self) -> CanFrame {
        // CMD + address, then SIDH SIDL EID8 EID0 DLC D0..D7
        let mut buf = [0u8; 15];
        buf[0] = CMD_READ;
        buf[1] = REG_RXB0SIDH;
        self.cs.set_low();
        self.spi.blocking_transfer_in_place(&mut buf).ok();
        self.cs.set_high();

        let id = (u16::from(buf[2]) << 3) | u16::from(buf[3] >> 5);
        let dlc = (buf[6] & 0x0F).min(8);
        let mut data = [0u8; 8];
        data.copy_from_slice(&buf[7..15]);

        self.bit_modify(REG_CANINTF, CANINTF_RX0IF, 0);

        CanFrame { id, dlc, data }
    }
}
