//! Configuration errors and the fatal shutdown path
//!
//! A bad pin in the board configuration is not recoverable: the firmware
//! reports it through a [`Shutdown`] handler and stops. The `try_setup`
//! variants expose the error instead for callers that validate ahead of
//! time.

use core::fmt;

use crate::pins::PinId;

/// Pin configuration error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin does not belong to any port with an output driver
    NotOutputPin(PinId),
    /// Pin does not belong to any port with an input path
    NotInputPin(PinId),
    /// Pin is not wired to the analog multiplexer
    NotAdcPin(PinId),
}

impl ConfigError {
    /// Shutdown message reported to the host
    pub fn message(&self) -> &'static str {
        match self {
            ConfigError::NotOutputPin(_) => "Not an output pin",
            ConfigError::NotInputPin(_) => "Not an input pin",
            ConfigError::NotAdcPin(_) => "Not a valid ADC pin",
        }
    }

    /// Offending pin
    pub fn pin(&self) -> PinId {
        match *self {
            ConfigError::NotOutputPin(pin)
            | ConfigError::NotInputPin(pin)
            | ConfigError::NotAdcPin(pin) => pin,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (pin {})", self.message(), self.pin())
    }
}

/// Fatal error reporter
///
/// Implementations stop the firmware; the call never returns.
pub trait Shutdown {
    fn shutdown(&self, err: ConfigError) -> !;
}

/// Shutdown handler that panics with the error message
///
/// On target the panic handler (e.g. `panic-probe`) does the reporting.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicShutdown;

impl Shutdown for PanicShutdown {
    fn shutdown(&self, err: ConfigError) -> ! {
        panic!("{}", err)
    }
}

/// Unwrap a setup result or take the fatal path
pub(crate) fn or_shutdown<T, S>(result: Result<T, ConfigError>, shutdown: &S) -> T
where
    S: Shutdown + ?Sized,
{
    match result {
        Ok(value) => value,
        Err(err) => {
            error!("{}: pin {}", err.message(), err.pin());
            shutdown.shutdown(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ConfigError::NotOutputPin(130).message(), "Not an output pin");
        assert_eq!(ConfigError::NotInputPin(200).message(), "Not an input pin");
        assert_eq!(ConfigError::NotAdcPin(0).message(), "Not a valid ADC pin");
        assert_eq!(ConfigError::NotAdcPin(7).pin(), 7);
    }

    #[test]
    fn test_ok_passes_through() {
        assert_eq!(or_shutdown(Ok::<u8, ConfigError>(3), &PanicShutdown), 3);
    }

    #[test]
    #[should_panic(expected = "Not a valid ADC pin")]
    fn test_err_takes_fatal_path() {
        let _: u8 = or_shutdown(Err(ConfigError::NotAdcPin(0)), &PanicShutdown);
    }
}
