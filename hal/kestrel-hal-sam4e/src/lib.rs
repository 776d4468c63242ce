//! SAM4E-specific HAL for the Kestrel firmware
//!
//! Maps logical pin numbers (`port * 32 + bit`, ports A-D) onto the PIO
//! controllers and the analog front end:
//!
//! - [`gpio::OutputPin`] / [`gpio::InputPin`] - digital I/O handles
//! - [`mux`] - routing pins to peripheral functions A-D
//! - [`adc::AdcChannel`] - non-blocking conversions on the 24 analog pins
//!
//! Handles are resolved once at setup and are cheap `Copy` values after
//! that. A pin that cannot serve the requested role is a configuration
//! error: the `setup` constructors hand it to a [`Shutdown`] handler, the
//! `try_setup` variants return it.
//!
//! All register access goes through the traits in [`regs`], so everything
//! except [`regs::mmio`] runs unchanged against the simulated banks in
//! `regs::sim` (feature `sim`).
//!
//! # Features
//!
//! - `defmt` - Enable debug formatting and driver logging
//! - `serde` - Serialize/deserialize configuration types
//! - `sim` - Simulated register banks for host-side tests
//! - `critical-section-impl` - Provide the single-core critical section

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

// Must come first so the logging macros are visible in the modules below
#[macro_use]
mod fmt;

pub mod adc;
pub mod clock;
pub mod config;
pub mod gpio;
pub mod irq;
pub mod mux;
pub mod pins;
pub mod regs;
pub mod shutdown;

pub use adc::{Adc, AdcChannel, ADC_MAX};
pub use config::{ChipConfig, PinConfig};
pub use gpio::{Gpio, InputPin, OutputPin};
pub use irq::IrqGuard;
pub use pins::{PinId, PortIndex};
pub use shutdown::{ConfigError, PanicShutdown, Shutdown};
