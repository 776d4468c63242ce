//! Analog input abstraction
//!
//! Conversions are driven by polling: the caller asks for a sample, gets
//! back either "ready" or a number of clock ticks to wait, and reschedules
//! itself. Nothing here ever blocks.

/// Progress of a channel through a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleState {
    /// Channel does not own the converter
    Idle,
    /// Conversion started, result not available yet
    Started,
    /// Result available, call [`AnalogInput::read`]
    Ready,
}

/// Non-blocking analog input channel
pub trait AnalogInput {
    /// Full-scale conversion result
    const MAX: u16;

    /// Start or advance a conversion
    ///
    /// Returns `0` once a result is ready. Any other value is the number of
    /// clock ticks to wait before calling again.
    fn sample(&mut self) -> u32;

    /// Take the ready result and release the converter
    ///
    /// Only valid after [`sample`](AnalogInput::sample) returned `0`.
    fn read(&mut self) -> u16;

    /// Abandon a conversion this channel may have started
    ///
    /// Safe to call at any time, including when no sample was started.
    fn cancel_sample(&mut self);

    /// Poll once and read the result if it is ready
    ///
    /// Returns `Err(ticks)` with the wait hint otherwise.
    fn try_read(&mut self) -> Result<u16, u32> {
        match self.sample() {
            0 => Ok(self.read()),
            ticks => Err(ticks),
        }
    }
}
