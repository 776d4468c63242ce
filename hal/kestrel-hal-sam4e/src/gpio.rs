//! Digital output and input pins
//!
//! [`Gpio`] is the table of port register banks. Setup resolves a logical
//! pin number against it once and hands back a small `Copy` handle holding
//! the bank reference and bit mask; later calls never look at the pin number
//! again.
//!
//! Handles share their port's registers with every other handle on that
//! port. Each bit must have a single owner, which is up to the caller.

use core::convert::Infallible;

use critical_section::CriticalSection;
use embedded_hal::digital;
use kestrel_hal::gpio::{DigitalInput, DigitalOutput};

use crate::clock;
use crate::irq::IrqGuard;
use crate::mux::{self, PeripheralFunction};
use crate::pins::{Pin, PinId, PortIndex};
use crate::regs::mmio::{self, Pio, Pmc};
use crate::regs::{PioRegisters, PmcRegisters, ID_PIOA, PORT_COUNT};
use crate::shutdown::{or_shutdown, ConfigError, Shutdown};

/// Port register banks plus the clock controller needed to power them
pub struct Gpio<'a, P, C> {
    banks: [&'a P; PORT_COUNT],
    pmc: &'a C,
}

impl<P, C> Clone for Gpio<'_, P, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, C> Copy for Gpio<'_, P, C> {}

impl Gpio<'static, Pio, Pmc> {
    /// The chip's own PIOA..PIOD and PMC
    pub fn hardware() -> Self {
        Self::new(mmio::ports(), &mmio::PMC)
    }
}

impl<'a, P: PioRegisters, C: PmcRegisters> Gpio<'a, P, C> {
    pub fn new(banks: [&'a P; PORT_COUNT], pmc: &'a C) -> Self {
        Self { banks, pmc }
    }

    /// Register bank of `port`
    pub fn bank(&self, port: PortIndex) -> &'a P {
        self.banks[port.index()]
    }

    pub fn pmc(&self) -> &'a C {
        self.pmc
    }

    /// Route pins of `port` to peripheral `function` (`'A'..='D'`)
    ///
    /// An unknown function letter keeps the current routing; the pull-up
    /// and PIO release are applied either way.
    pub fn peripheral(&self, port: PortIndex, bit: u32, function: char, pull_up: bool) {
        let selected = PeripheralFunction::from_char(function);
        if selected.is_none() {
            warn!("Unknown peripheral function {} on port {}", function, port);
        }
        trace!("Peripheral {} on port {} bits {=u32:#x}", function, port, bit);
        mux::configure(self.bank(port), bit, selected, pull_up);
    }
}

/// Digital output handle
pub struct OutputPin<'a, P> {
    regs: &'a P,
    bit: u32,
}

impl<P> Clone for OutputPin<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for OutputPin<'_, P> {}

impl<'a, P: PioRegisters> OutputPin<'a, P> {
    /// Configure `pin` as a push-pull output starting at `value`
    pub fn try_setup<C: PmcRegisters>(
        gpio: &Gpio<'a, P, C>,
        pin: PinId,
        value: bool,
    ) -> Result<Self, ConfigError> {
        let resolved = Pin::decode(pin).ok_or(ConfigError::NotOutputPin(pin))?;
        let regs = gpio.bank(resolved.port());
        let bit = resolved.bit();

        {
            let _irq = IrqGuard::new();
            if value {
                regs.set_output_data(bit);
            } else {
                regs.clear_output_data(bit);
            }
            regs.enable_output(bit);
            regs.enable_output_write(bit);
            regs.enable_pio(bit);
        }

        debug!("Output {} initial level {}", resolved, value);
        Ok(Self { regs, bit })
    }

    /// As [`try_setup`](Self::try_setup), shutting down on a bad pin
    pub fn setup<C, S>(gpio: &Gpio<'a, P, C>, pin: PinId, value: bool, shutdown: &S) -> Self
    where
        C: PmcRegisters,
        S: Shutdown + ?Sized,
    {
        or_shutdown(Self::try_setup(gpio, pin, value), shutdown)
    }

    pub fn write(&self, value: bool) {
        if value {
            self.regs.set_output_data(self.bit);
        } else {
            self.regs.clear_output_data(self.bit);
        }
    }

    /// Invert the output; interrupts must already be masked
    pub fn toggle_noirq(&self, _cs: CriticalSection<'_>) {
        let odsr = self.regs.output_data_status();
        self.regs.write_output_data_status(odsr ^ self.bit);
    }

    pub fn toggle(&self) {
        let irq = IrqGuard::new();
        self.toggle_noirq(irq.token());
    }

    /// Level the output driver is set to
    pub fn is_set_high(&self) -> bool {
        self.regs.output_data_status() & self.bit != 0
    }

    pub fn bit(&self) -> u32 {
        self.bit
    }
}

/// Digital input handle
pub struct InputPin<'a, P> {
    regs: &'a P,
    bit: u32,
}

impl<P> Clone for InputPin<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for InputPin<'_, P> {}

impl<'a, P: PioRegisters> InputPin<'a, P> {
    /// Configure `pin` as an input, with the pull-up on or off
    pub fn try_setup<C: PmcRegisters>(
        gpio: &Gpio<'a, P, C>,
        pin: PinId,
        pull_up: bool,
    ) -> Result<Self, ConfigError> {
        let resolved = Pin::decode(pin).ok_or(ConfigError::NotInputPin(pin))?;
        let port = resolved.port();
        let regs = gpio.bank(port);
        let bit = resolved.bit();

        {
            let _irq = IrqGuard::new();
            clock::enable_peripheral(gpio.pmc(), ID_PIOA + port.index() as u32);
            if pull_up {
                regs.enable_pull_up(bit);
            } else {
                regs.disable_pull_up(bit);
            }
            regs.disable_output(bit);
            regs.enable_pio(bit);
        }

        debug!("Input {} pull-up {}", resolved, pull_up);
        Ok(Self { regs, bit })
    }

    /// As [`try_setup`](Self::try_setup), shutting down on a bad pin
    pub fn setup<C, S>(gpio: &Gpio<'a, P, C>, pin: PinId, pull_up: bool, shutdown: &S) -> Self
    where
        C: PmcRegisters,
        S: Shutdown + ?Sized,
    {
        or_shutdown(Self::try_setup(gpio, pin, pull_up), shutdown)
    }

    pub fn read(&self) -> bool {
        self.regs.pin_data_status() & self.bit != 0
    }

    pub fn bit(&self) -> u32 {
        self.bit
    }
}

impl<P: PioRegisters> DigitalOutput for OutputPin<'_, P> {
    fn write(&mut self, high: bool) {
        OutputPin::write(self, high);
    }

    fn toggle(&mut self) {
        OutputPin::toggle(self);
    }

    fn is_set_high(&self) -> bool {
        OutputPin::is_set_high(self)
    }
}

impl<P: PioRegisters> DigitalInput for InputPin<'_, P> {
    fn read(&self) -> bool {
        InputPin::read(self)
    }
}

impl<P> digital::ErrorType for OutputPin<'_, P> {
    type Error = Infallible;
}

impl<P: PioRegisters> digital::OutputPin for OutputPin<'_, P> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        OutputPin::write(self, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        OutputPin::write(self, true);
        Ok(())
    }
}

impl<P: PioRegisters> digital::StatefulOutputPin for OutputPin<'_, P> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(OutputPin::is_set_high(self))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!OutputPin::is_set_high(self))
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        OutputPin::toggle(self);
        Ok(())
    }
}

impl<P> digital::ErrorType for InputPin<'_, P> {
    type Error = Infallible;
}

impl<P: PioRegisters> digital::InputPin for InputPin<'_, P> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(InputPin::read(self))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!InputPin::read(self))
    }
}
