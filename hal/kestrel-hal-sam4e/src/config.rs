//! Chip and pin configuration types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pins::{gpio, PinId, PortIndex, PINS_PER_PORT};

/// Default core clock of the SAM4E (120 MHz)
pub const DEFAULT_CLOCK_FREQ_HZ: u32 = 120_000_000;

/// Chip-level settings the driver needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChipConfig {
    /// Core clock in Hz; timer ticks run at this rate
    pub clock_freq_hz: u32,
}

impl ChipConfig {
    pub const fn new(clock_freq_hz: u32) -> Self {
        Self { clock_freq_hz }
    }
}

impl Default for ChipConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CLOCK_FREQ_HZ)
    }
}

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// Logical pin number
    pub pin: PinId,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    pub const fn new(pin: PinId) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "PA8" -> pin 8
/// - "!PB1" -> pin 33, inverted/active-low
/// - "^PC3" -> pin 67, pull-up enabled
/// - "^!PD0" / "!^PD0" -> both modifiers
pub fn parse_pin_string(s: &str) -> Option<PinConfig> {
    let mut s = s.trim();
    let mut config = PinConfig::default();

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            config.inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            config.pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let s = s.strip_prefix('P')?;
    let mut chars = s.chars();
    let port = PortIndex::from_char(chars.next()?)?;

    let num_str = chars.as_str();
    if num_str.is_empty() || !num_str.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let num: u8 = num_str.parse().ok()?;
    if num >= PINS_PER_PORT {
        return None;
    }

    config.pin = gpio(port.as_char(), num);
    Some(config)
}
