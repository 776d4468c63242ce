//! Pin numbering
//!
//! Pins are addressed by a single logical number, `port * 32 + bit`, the
//! same scheme the host uses when it names pins such as `PA8` or `PC31`.

use crate::regs::PORT_COUNT;

/// Logical pin number
pub type PinId = u8;

/// Pins per PIO controller
pub const PINS_PER_PORT: u8 = 32;

/// Number of valid logical pin numbers
pub const PIN_COUNT: usize = PORT_COUNT * PINS_PER_PORT as usize;

/// Logical pin number of `P<port><num>`, e.g. `gpio('A', 8)` for PA8
pub const fn gpio(port: char, num: u8) -> PinId {
    (port as u8 - b'A') * PINS_PER_PORT + num
}

/// PIO controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PortIndex {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
}

impl PortIndex {
    pub const ALL: [PortIndex; PORT_COUNT] =
        [PortIndex::A, PortIndex::B, PortIndex::C, PortIndex::D];

    /// Port from its position in the register bank table
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Port from its letter (`'A'..='D'`)
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(PortIndex::A),
            'B' => Some(PortIndex::B),
            'C' => Some(PortIndex::C),
            'D' => Some(PortIndex::D),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_char(self) -> char {
        (b'A' + self as u8) as char
    }
}

/// A pin resolved to its port and bit mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin {
    port: PortIndex,
    bit: u32,
}

impl Pin {
    /// Resolve a logical pin number
    ///
    /// Returns `None` when the number is past the last port.
    pub fn decode(pin: PinId) -> Option<Self> {
        let port = PortIndex::from_index((pin / PINS_PER_PORT) as usize)?;
        Some(Self {
            port,
            bit: 1 << (pin % PINS_PER_PORT),
        })
    }

    pub fn port(&self) -> PortIndex {
        self.port
    }

    /// Single-bit mask selecting this pin in its port's registers
    pub fn bit(&self) -> u32 {
        self.bit
    }

    /// Position of the pin within its port
    pub fn number(&self) -> u8 {
        self.bit.trailing_zeros() as u8
    }

    /// Logical pin number
    pub fn id(&self) -> PinId {
        self.port as u8 * PINS_PER_PORT + self.number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gpio_encoding() {
        assert_eq!(gpio('A', 0), 0);
        assert_eq!(gpio('A', 8), 8);
        assert_eq!(gpio('B', 8), 40);
        assert_eq!(gpio('C', 31), 95);
        assert_eq!(gpio('D', 31), 127);
    }

    #[test]
    fn test_decode_port_b() {
        let pin = Pin::decode(40).unwrap();
        assert_eq!(pin.port(), PortIndex::B);
        assert_eq!(pin.bit(), 0x100);
        assert_eq!(pin.number(), 8);
    }

    #[test]
    fn test_decode_out_of_range() {
        assert_eq!(Pin::decode(128), None);
        assert_eq!(Pin::decode(255), None);
        assert!(Pin::decode(127).is_some());
    }

    #[test]
    fn test_port_letters() {
        for port in PortIndex::ALL {
            assert_eq!(PortIndex::from_char(port.as_char()), Some(port));
        }
        assert_eq!(PortIndex::from_char('E'), None);
        assert_eq!(PortIndex::from_index(4), None);
    }

    proptest! {
        #[test]
        fn prop_decode_matches_division(pin in 0u8..128) {
            let decoded = Pin::decode(pin).unwrap();
            prop_assert_eq!(decoded.port().index(), (pin / 32) as usize);
            prop_assert_eq!(decoded.bit(), 1u32 << (pin % 32));
            prop_assert_eq!(decoded.bit().count_ones(), 1);
            prop_assert_eq!(decoded.id(), pin);
        }

        #[test]
        fn prop_decode_rejects_high_ports(pin in 128u8..=255) {
            prop_assert!(Pin::decode(pin).is_none());
        }
    }
}
