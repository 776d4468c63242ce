//! Peripheral clock gating
//!
//! Only the bare minimum: turning on the clock of a peripheral before it is
//! used. Core clock setup belongs to the start-up code.

use crate::regs::PmcRegisters;

/// Enable the clock of peripheral `id`
///
/// Enabling an already running clock is a no-op in hardware.
pub fn enable_peripheral<C: PmcRegisters + ?Sized>(pmc: &C, id: u32) {
    if id < 32 {
        pmc.enable_peripheral_clock0(1 << id);
    } else {
        pmc.enable_peripheral_clock1(1 << (id - 32));
    }
}

/// Check whether the clock of peripheral `id` is running
pub fn peripheral_enabled<C: PmcRegisters + ?Sized>(pmc: &C, id: u32) -> bool {
    if id < 32 {
        pmc.peripheral_clock_status0() & (1 << id) != 0
    } else {
        pmc.peripheral_clock_status1() & (1 << (id - 32)) != 0
    }
}
