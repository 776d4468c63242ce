//! Simulated register banks
//!
//! Host-side stand-ins for the PIO, PMC and converter blocks. They model
//! the set/clear/status behaviour the driver relies on and keep a log of
//! which bits were written to each write-only register so tests can assert
//! on exact register traffic.

use core::cell::Cell;

use super::{AdcRegisters, PioRegisters, PmcRegisters, ADC_CR_START, ADC_ISR_DRDY};

/// Write-only PIO registers tracked by [`SimPio::written`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PioReg {
    Per,
    Pdr,
    Oer,
    Odr,
    Ower,
    Sodr,
    Codr,
    Puer,
    Pudr,
}

const PIO_REG_COUNT: usize = 9;

/// Simulated PIO controller
#[derive(Default)]
pub struct SimPio {
    log: [Cell<u32>; PIO_REG_COUNT],
    writes: Cell<u32>,
    psr: Cell<u32>,
    osr: Cell<u32>,
    owsr: Cell<u32>,
    odsr: Cell<u32>,
    pusr: Cell<u32>,
    abcdsr: [Cell<u32>; 2],
    external: Cell<u32>,
}

impl SimPio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bits ever written to `reg`
    pub fn written(&self, reg: PioReg) -> u32 {
        self.log[reg as usize].get()
    }

    /// Total number of register writes
    pub fn write_count(&self) -> u32 {
        self.writes.get()
    }

    /// Forget the write log, keeping register state
    pub fn clear_log(&self) {
        for reg in &self.log {
            reg.set(0);
        }
        self.writes.set(0);
    }

    /// Pins under PIO control (`PIO_PSR`)
    pub fn pio_status(&self) -> u32 {
        self.psr.get()
    }

    /// Pins with the output driver enabled (`PIO_OSR`)
    pub fn output_status(&self) -> u32 {
        self.osr.get()
    }

    /// Pins accepting direct `PIO_ODSR` writes (`PIO_OWSR`)
    pub fn output_write_status(&self) -> u32 {
        self.owsr.get()
    }

    /// Pins with the pull-up enabled
    pub fn pull_up_status(&self) -> u32 {
        self.pusr.get()
    }

    /// Preload a peripheral select register without logging a write
    pub fn preset_peripheral_select(&self, index: usize, value: u32) {
        self.abcdsr[index & 1].set(value);
    }

    /// Drive the external level seen on input pins
    pub fn set_external_level(&self, mask: u32, high: bool) {
        let level = self.external.get();
        self.external
            .set(if high { level | mask } else { level & !mask });
    }

    fn log_write(&self, reg: PioReg, mask: u32) {
        let slot = &self.log[reg as usize];
        slot.set(slot.get() | mask);
        self.count();
    }

    fn count(&self) {
        self.writes.set(self.writes.get() + 1);
    }
}

fn set_bits(cell: &Cell<u32>, mask: u32) {
    cell.set(cell.get() | mask);
}

fn clear_bits(cell: &Cell<u32>, mask: u32) {
    cell.set(cell.get() & !mask);
}

impl PioRegisters for SimPio {
    fn enable_pio(&self, mask: u32) {
        self.log_write(PioReg::Per, mask);
        set_bits(&self.psr, mask);
    }

    fn disable_pio(&self, mask: u32) {
        self.log_write(PioReg::Pdr, mask);
        clear_bits(&self.psr, mask);
    }

    fn enable_output(&self, mask: u32) {
        self.log_write(PioReg::Oer, mask);
        set_bits(&self.osr, mask);
    }

    fn disable_output(&self, mask: u32) {
        self.log_write(PioReg::Odr, mask);
        clear_bits(&self.osr, mask);
    }

    fn enable_output_write(&self, mask: u32) {
        self.log_write(PioReg::Ower, mask);
        set_bits(&self.owsr, mask);
    }

    fn set_output_data(&self, mask: u32) {
        self.log_write(PioReg::Sodr, mask);
        set_bits(&self.odsr, mask);
    }

    fn clear_output_data(&self, mask: u32) {
        self.log_write(PioReg::Codr, mask);
        clear_bits(&self.odsr, mask);
    }

    fn output_data_status(&self) -> u32 {
        self.odsr.get()
    }

    fn write_output_data_status(&self, value: u32) {
        self.count();
        let writable = self.owsr.get();
        self.odsr
            .set((self.odsr.get() & !writable) | (value & writable));
    }

    fn pin_data_status(&self) -> u32 {
        let driven = self.osr.get();
        (self.odsr.get() & driven) | (self.external.get() & !driven)
    }

    fn enable_pull_up(&self, mask: u32) {
        self.log_write(PioReg::Puer, mask);
        set_bits(&self.pusr, mask);
    }

    fn disable_pull_up(&self, mask: u32) {
        self.log_write(PioReg::Pudr, mask);
        clear_bits(&self.pusr, mask);
    }

    fn peripheral_select(&self, index: usize) -> u32 {
        self.abcdsr[index & 1].get()
    }

    fn write_peripheral_select(&self, index: usize, value: u32) {
        self.count();
        self.abcdsr[index & 1].set(value);
    }
}

/// Simulated power management controller
#[derive(Default)]
pub struct SimPmc {
    pcsr0: Cell<u32>,
    pcsr1: Cell<u32>,
    writes: Cell<u32>,
}

impl SimPmc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> u32 {
        self.writes.get()
    }
}

impl PmcRegisters for SimPmc {
    fn enable_peripheral_clock0(&self, mask: u32) {
        self.writes.set(self.writes.get() + 1);
        set_bits(&self.pcsr0, mask);
    }

    fn enable_peripheral_clock1(&self, mask: u32) {
        self.writes.set(self.writes.get() + 1);
        set_bits(&self.pcsr1, mask);
    }

    fn peripheral_clock_status0(&self) -> u32 {
        self.pcsr0.get()
    }

    fn peripheral_clock_status1(&self) -> u32 {
        self.pcsr1.get()
    }
}

/// Simulated converter
///
/// Conversions never finish on their own; call
/// [`finish_conversion`](SimAdc::finish_conversion) to make a result
/// available. As on the chip, only reading `LCDR` clears `ISR.DRDY`, so a
/// conversion that completes after its channel was disabled still leaves a
/// result behind.
#[derive(Default)]
pub struct SimAdc {
    chsr: Cell<u32>,
    isr: Cell<u32>,
    lcdr: Cell<u32>,
    mr: Cell<u32>,
    starts: Cell<u32>,
    writes: Cell<u32>,
}

impl SimAdc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Complete the running conversion with `value`
    pub fn finish_conversion(&self, value: u32) {
        self.lcdr.set(value);
        set_bits(&self.isr, ADC_ISR_DRDY);
    }

    /// Number of `CR.START` commands seen
    pub fn starts(&self) -> u32 {
        self.starts.get()
    }

    pub fn write_count(&self) -> u32 {
        self.writes.get()
    }

    fn count(&self) {
        self.writes.set(self.writes.get() + 1);
    }
}

impl AdcRegisters for SimAdc {
    fn write_control(&self, value: u32) {
        self.count();
        if value & ADC_CR_START != 0 {
            self.starts.set(self.starts.get() + 1);
        }
    }

    fn mode(&self) -> u32 {
        self.mr.get()
    }

    fn write_mode(&self, value: u32) {
        self.count();
        self.mr.set(value);
    }

    fn enable_channels(&self, mask: u32) {
        self.count();
        set_bits(&self.chsr, mask);
    }

    fn disable_channels(&self, mask: u32) {
        self.count();
        clear_bits(&self.chsr, mask);
    }

    fn channel_status(&self) -> u32 {
        self.chsr.get()
    }

    fn last_converted_data(&self) -> u32 {
        clear_bits(&self.isr, ADC_ISR_DRDY);
        self.lcdr.get()
    }

    fn interrupt_status(&self) -> u32 {
        self.isr.get()
    }
}
