//! Digital pin abstractions
//!
//! Pin handles are created once during start-up and then driven by the
//! command layer for the rest of the run. Operations on an already
//! configured handle cannot fail.

/// Digital output pin
pub trait DigitalOutput {
    /// Drive the pin to the given level
    fn write(&mut self, high: bool);

    /// Invert the driven level
    ///
    /// Implementations must make this safe against interrupts that also
    /// write output state.
    fn toggle(&mut self);

    /// Drive the pin high (logic 1)
    fn set_high(&mut self) {
        self.write(true);
    }

    /// Drive the pin low (logic 0)
    fn set_low(&mut self) {
        self.write(false);
    }

    /// Level the output driver is currently set to
    fn is_set_high(&self) -> bool;

    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait DigitalInput {
    /// Check if the pin reads high (logic 1)
    fn read(&self) -> bool;

    fn is_low(&self) -> bool {
        !self.read()
    }
}
