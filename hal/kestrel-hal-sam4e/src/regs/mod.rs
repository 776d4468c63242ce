//! Register access boundary
//!
//! Everything above this module talks to the hardware through the three
//! traits below. Each method maps to exactly one register read or write, so
//! the driver logic can run against [`mmio`] on the chip or against the
//! simulated banks in `sim` on the host.
//!
//! Methods take `&self`: register blocks are shared by every handle on the
//! same port, the hardware itself is the mutable state.

pub mod mmio;
#[cfg(any(test, feature = "sim"))]
pub mod sim;

/// Number of PIO controllers handled by this driver (PIOA..PIOD)
pub const PORT_COUNT: usize = 4;

/// Peripheral identifier of PIOA; PIOB..PIOD follow consecutively
pub const ID_PIOA: u32 = 9;

/// Peripheral identifier of AFEC0, the analog front end used for conversions
pub const ID_ADC: u32 = 30;

/// `CR.START`: begin a conversion on all enabled channels
pub const ADC_CR_START: u32 = 1 << 1;

/// `ISR.DRDY`: a converted result is waiting in `LCDR`
pub const ADC_ISR_DRDY: u32 = 1 << 24;

/// `LCDR.LDATA` field
pub const ADC_LCDR_LDATA_MASK: u32 = 0x0fff;

/// `MR.STARTUP` value for 768 converter clock periods
pub const ADC_MR_STARTUP_SUT768: u32 = 12 << 16;

/// Build the `MR.PRESCAL` field
pub const fn adc_mr_prescal(prescal: u32) -> u32 {
    (prescal & 0xff) << 8
}

/// Build the `MR.TRANSFER` field
pub const fn adc_mr_transfer(transfer: u32) -> u32 {
    (transfer & 0x3) << 28
}

/// Parallel I/O controller registers
pub trait PioRegisters {
    /// `PIO_PER`: hand pins to the PIO controller
    fn enable_pio(&self, mask: u32);

    /// `PIO_PDR`: hand pins to their selected peripheral
    fn disable_pio(&self, mask: u32);

    /// `PIO_OER`
    fn enable_output(&self, mask: u32);

    /// `PIO_ODR`
    fn disable_output(&self, mask: u32);

    /// `PIO_OWER`: allow direct writes to `PIO_ODSR`
    fn enable_output_write(&self, mask: u32);

    /// `PIO_SODR`
    fn set_output_data(&self, mask: u32);

    /// `PIO_CODR`
    fn clear_output_data(&self, mask: u32);

    /// `PIO_ODSR` read
    fn output_data_status(&self) -> u32;

    /// `PIO_ODSR` write; only bits enabled in `PIO_OWSR` are affected
    fn write_output_data_status(&self, value: u32);

    /// `PIO_PDSR`
    fn pin_data_status(&self) -> u32;

    /// `PIO_PUER`
    fn enable_pull_up(&self, mask: u32);

    /// `PIO_PUDR`
    fn disable_pull_up(&self, mask: u32);

    /// `PIO_ABCDSR[index]` read, `index` is 0 or 1
    fn peripheral_select(&self, index: usize) -> u32;

    /// `PIO_ABCDSR[index]` write, `index` is 0 or 1
    fn write_peripheral_select(&self, index: usize, value: u32);
}

/// Power management controller registers
pub trait PmcRegisters {
    /// `PMC_PCER0`: enable clocks of peripherals 0..31
    fn enable_peripheral_clock0(&self, mask: u32);

    /// `PMC_PCER1`: enable clocks of peripherals 32..63
    fn enable_peripheral_clock1(&self, mask: u32);

    /// `PMC_PCSR0`
    fn peripheral_clock_status0(&self) -> u32;

    /// `PMC_PCSR1`
    fn peripheral_clock_status1(&self) -> u32;
}

/// Analog converter registers
pub trait AdcRegisters {
    /// `CR`
    fn write_control(&self, value: u32);

    /// `MR` read
    fn mode(&self) -> u32;

    /// `MR` write
    fn write_mode(&self, value: u32);

    /// `CHER`
    fn enable_channels(&self, mask: u32);

    /// `CHDR`
    fn disable_channels(&self, mask: u32);

    /// `CHSR`
    fn channel_status(&self) -> u32;

    /// `LCDR`; reading clears `ISR.DRDY`
    fn last_converted_data(&self) -> u32;

    /// `ISR`
    fn interrupt_status(&self) -> u32;
}
