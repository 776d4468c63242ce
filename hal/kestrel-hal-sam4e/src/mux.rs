//! Peripheral function multiplexing
//!
//! Each pin can be routed to one of four peripheral functions through the
//! two `PIO_ABCDSR` select registers:
//!
//! | function | ABCDSR[0] | ABCDSR[1] |
//! |----------|-----------|-----------|
//! | A        | 0         | 0         |
//! | B        | 1         | 0         |
//! | C        | 0         | 1         |
//! | D        | 1         | 1         |

use crate::regs::PioRegisters;

/// Peripheral function a pin can be routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralFunction {
    A,
    B,
    C,
    D,
}

impl PeripheralFunction {
    /// Function from its letter, as used in pin tables
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(PeripheralFunction::A),
            'B' => Some(PeripheralFunction::B),
            'C' => Some(PeripheralFunction::C),
            'D' => Some(PeripheralFunction::D),
            _ => None,
        }
    }

    /// Bit values for (ABCDSR[0], ABCDSR[1])
    fn select_bits(self) -> (bool, bool) {
        match self {
            PeripheralFunction::A => (false, false),
            PeripheralFunction::B => (true, false),
            PeripheralFunction::C => (false, true),
            PeripheralFunction::D => (true, true),
        }
    }
}

fn with_bit(value: u32, bit: u32, set: bool) -> u32 {
    if set {
        value | bit
    } else {
        value & !bit
    }
}

/// Route the pins in `bit` to a peripheral and release them from the PIO
///
/// `function` of `None` leaves the current selection untouched; the pull-up
/// and PIO release are applied regardless.
pub fn configure<P: PioRegisters + ?Sized>(
    regs: &P,
    bit: u32,
    function: Option<PeripheralFunction>,
    pull_up: bool,
) {
    if let Some(function) = function {
        let (sel0, sel1) = function.select_bits();
        let abcdsr0 = regs.peripheral_select(0);
        let abcdsr1 = regs.peripheral_select(1);
        regs.write_peripheral_select(0, with_bit(abcdsr0, bit, sel0));
        regs.write_peripheral_select(1, with_bit(abcdsr1, bit, sel1));
    }

    if pull_up {
        regs.enable_pull_up(bit);
    } else {
        regs.disable_pull_up(bit);
    }
    regs.disable_pio(bit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regs::sim::{PioReg, SimPio};

    const BIT: u32 = 1 << 5;

    fn selects(pio: &SimPio) -> (u32, u32) {
        (pio.peripheral_select(0), pio.peripheral_select(1))
    }

    #[test]
    fn test_function_select_bits() {
        let pio = SimPio::new();
        pio.preset_peripheral_select(0, 0x8000_0001);
        pio.preset_peripheral_select(1, 0x8000_0001);

        configure(&pio, BIT, Some(PeripheralFunction::B), false);
        assert_eq!(selects(&pio), (0x8000_0021, 0x8000_0001));

        configure(&pio, BIT, Some(PeripheralFunction::C), false);
        assert_eq!(selects(&pio), (0x8000_0001, 0x8000_0021));

        configure(&pio, BIT, Some(PeripheralFunction::D), false);
        assert_eq!(selects(&pio), (0x8000_0021, 0x8000_0021));

        // Other pins' selections survive every step
        configure(&pio, BIT, Some(PeripheralFunction::A), false);
        assert_eq!(selects(&pio), (0x8000_0001, 0x8000_0001));
    }

    #[test]
    fn test_pull_and_release() {
        let pio = SimPio::new();
        pio.enable_pio(BIT);

        configure(&pio, BIT, Some(PeripheralFunction::A), true);
        assert_eq!(pio.written(PioReg::Puer), BIT);
        assert_eq!(pio.written(PioReg::Pdr), BIT);
        assert_eq!(pio.pio_status() & BIT, 0);

        configure(&pio, BIT, Some(PeripheralFunction::A), false);
        assert_eq!(pio.written(PioReg::Pudr), BIT);
        assert_eq!(pio.pull_up_status() & BIT, 0);
    }

    #[test]
    fn test_unknown_function_leaves_selects() {
        let pio = SimPio::new();
        pio.preset_peripheral_select(0, BIT);
        pio.preset_peripheral_select(1, 0);

        configure(&pio, BIT, PeripheralFunction::from_char('Z'), true);

        assert_eq!(selects(&pio), (BIT, 0));
        assert_eq!(pio.written(PioReg::Puer), BIT);
        assert_eq!(pio.written(PioReg::Pdr), BIT);
        // Only the pull-up and PIO release were written
        assert_eq!(pio.write_count(), 2);
    }
}
