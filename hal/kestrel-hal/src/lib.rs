//! Kestrel Hardware Abstraction Layer
//!
//! This crate defines the traits that chip-specific pin drivers implement
//! (SAM4E today). Code above the driver, such as the command layer that
//! turns host requests into pin and sensor operations, only talks to these
//! traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Command dispatch / scheduler (caller)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kestrel-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  kestrel-hal- │
//!             │     sam4e     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::DigitalOutput`], [`gpio::DigitalInput`] - Digital I/O
//! - [`adc::AnalogInput`] - Non-blocking analog sampling

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use adc::AnalogInput;
pub use gpio::{DigitalInput, DigitalOutput};
