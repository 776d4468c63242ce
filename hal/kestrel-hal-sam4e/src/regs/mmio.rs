//! Memory-mapped register blocks of the SAM4E
//!
//! The only place in the crate that touches raw addresses. Base addresses
//! and offsets are taken from the SAM4E datasheet.

#![allow(unsafe_code)]

use core::ptr::{read_volatile, write_volatile};

use super::{AdcRegisters, PioRegisters, PmcRegisters, PORT_COUNT};

const PIOA_BASE: usize = 0x400E_0E00;
const PIOB_BASE: usize = 0x400E_1000;
const PIOC_BASE: usize = 0x400E_1200;
const PIOD_BASE: usize = 0x400E_1400;
const PMC_BASE: usize = 0x400E_0400;
const AFEC0_BASE: usize = 0x400B_0000;

// PIO register offsets
const PIO_PER: usize = 0x00;
const PIO_PDR: usize = 0x04;
const PIO_OER: usize = 0x10;
const PIO_ODR: usize = 0x14;
const PIO_SODR: usize = 0x30;
const PIO_CODR: usize = 0x34;
const PIO_ODSR: usize = 0x38;
const PIO_PDSR: usize = 0x3C;
const PIO_PUDR: usize = 0x60;
const PIO_PUER: usize = 0x64;
const PIO_ABCDSR: usize = 0x70;
const PIO_OWER: usize = 0xA0;

// PMC register offsets
const PMC_PCER0: usize = 0x10;
const PMC_PCSR0: usize = 0x18;
const PMC_PCER1: usize = 0x100;
const PMC_PCSR1: usize = 0x108;

// Converter register offsets
const ADC_CR: usize = 0x00;
const ADC_MR: usize = 0x04;
const ADC_CHER: usize = 0x14;
const ADC_CHDR: usize = 0x18;
const ADC_CHSR: usize = 0x1C;
const ADC_LCDR: usize = 0x20;
const ADC_ISR: usize = 0x30;

/// A block of 32-bit registers at a fixed base address
struct Block {
    base: usize,
}

impl Block {
    fn read(&self, offset: usize) -> u32 {
        // SAFETY: `base` points at a peripheral block (see constructors) and
        // every offset used is a register inside it.
        unsafe { read_volatile((self.base + offset) as *const u32) }
    }

    fn write(&self, offset: usize, value: u32) {
        // SAFETY: as for `read`.
        unsafe { write_volatile((self.base + offset) as *mut u32, value) }
    }
}

/// PIO controller
pub struct Pio {
    block: Block,
}

impl Pio {
    /// # Safety
    /// `base` must be the base address of a PIO controller.
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            block: Block { base },
        }
    }
}

impl PioRegisters for Pio {
    fn enable_pio(&self, mask: u32) {
        self.block.write(PIO_PER, mask);
    }

    fn disable_pio(&self, mask: u32) {
        self.block.write(PIO_PDR, mask);
    }

    fn enable_output(&self, mask: u32) {
        self.block.write(PIO_OER, mask);
    }

    fn disable_output(&self, mask: u32) {
        self.block.write(PIO_ODR, mask);
    }

    fn enable_output_write(&self, mask: u32) {
        self.block.write(PIO_OWER, mask);
    }

    fn set_output_data(&self, mask: u32) {
        self.block.write(PIO_SODR, mask);
    }

    fn clear_output_data(&self, mask: u32) {
        self.block.write(PIO_CODR, mask);
    }

    fn output_data_status(&self) -> u32 {
        self.block.read(PIO_ODSR)
    }

    fn write_output_data_status(&self, value: u32) {
        self.block.write(PIO_ODSR, value);
    }

    fn pin_data_status(&self) -> u32 {
        self.block.read(PIO_PDSR)
    }

    fn enable_pull_up(&self, mask: u32) {
        self.block.write(PIO_PUER, mask);
    }

    fn disable_pull_up(&self, mask: u32) {
        self.block.write(PIO_PUDR, mask);
    }

    fn peripheral_select(&self, index: usize) -> u32 {
        self.block.read(PIO_ABCDSR + 4 * (index & 1))
    }

    fn write_peripheral_select(&self, index: usize, value: u32) {
        self.block.write(PIO_ABCDSR + 4 * (index & 1), value);
    }
}

/// Power management controller
pub struct Pmc {
    block: Block,
}

impl Pmc {
    /// # Safety
    /// `base` must be the base address of the PMC.
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            block: Block { base },
        }
    }
}

impl PmcRegisters for Pmc {
    fn enable_peripheral_clock0(&self, mask: u32) {
        self.block.write(PMC_PCER0, mask);
    }

    fn enable_peripheral_clock1(&self, mask: u32) {
        self.block.write(PMC_PCER1, mask);
    }

    fn peripheral_clock_status0(&self) -> u32 {
        self.block.read(PMC_PCSR0)
    }

    fn peripheral_clock_status1(&self) -> u32 {
        self.block.read(PMC_PCSR1)
    }
}

/// Analog front end used as the conversion engine
pub struct Afec {
    block: Block,
}

impl Afec {
    /// # Safety
    /// `base` must be the base address of an AFEC instance.
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            block: Block { base },
        }
    }
}

impl AdcRegisters for Afec {
    fn write_control(&self, value: u32) {
        self.block.write(ADC_CR, value);
    }

    fn mode(&self) -> u32 {
        self.block.read(ADC_MR)
    }

    fn write_mode(&self, value: u32) {
        self.block.write(ADC_MR, value);
    }

    fn enable_channels(&self, mask: u32) {
        self.block.write(ADC_CHER, mask);
    }

    fn disable_channels(&self, mask: u32) {
        self.block.write(ADC_CHDR, mask);
    }

    fn channel_status(&self) -> u32 {
        self.block.read(ADC_CHSR)
    }

    fn last_converted_data(&self) -> u32 {
        self.block.read(ADC_LCDR)
    }

    fn interrupt_status(&self) -> u32 {
        self.block.read(ADC_ISR)
    }
}

pub static PIOA: Pio = unsafe { Pio::new(PIOA_BASE) };
pub static PIOB: Pio = unsafe { Pio::new(PIOB_BASE) };
pub static PIOC: Pio = unsafe { Pio::new(PIOC_BASE) };
pub static PIOD: Pio = unsafe { Pio::new(PIOD_BASE) };
pub static PMC: Pmc = unsafe { Pmc::new(PMC_BASE) };
pub static AFEC0: Afec = unsafe { Afec::new(AFEC0_BASE) };

/// Port register banks in port order
pub fn ports() -> [&'static Pio; PORT_COUNT] {
    [&PIOA, &PIOB, &PIOC, &PIOD]
}
