//! Interrupt-masked critical sections
//!
//! Built on the `critical-section` crate, which provides the
//! mask-and-return-token / restore-token pair. On the chip the
//! implementation comes from `cortex-m` (feature `critical-section-impl`);
//! host tests use the `std` implementation.

#![allow(unsafe_code)]

use core::marker::PhantomData;

use critical_section::{CriticalSection, RestoreState};

/// Masks interrupts while alive
///
/// The previous mask state is restored when the guard is dropped, so guards
/// nest. Guards must be dropped in reverse order of creation, which scoping
/// gives for free; do not `mem::forget` one.
pub struct IrqGuard {
    state: RestoreState,
    // Restoring must happen on the context that masked
    _not_send: PhantomData<*mut ()>,
}

impl IrqGuard {
    pub fn new() -> Self {
        // SAFETY: released exactly once, in `Drop`.
        let state = unsafe { critical_section::acquire() };
        Self {
            state,
            _not_send: PhantomData,
        }
    }

    /// Proof that interrupts are masked, for `*_noirq` operations
    pub fn token(&self) -> CriticalSection<'_> {
        // SAFETY: interrupts stay masked for as long as `self` is borrowed.
        unsafe { CriticalSection::new() }
    }
}

impl Default for IrqGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for IrqGuard {
    fn drop(&mut self) {
        // SAFETY: `state` came from the matching `acquire` in `new`.
        unsafe { critical_section::release(self.state) }
    }
}
