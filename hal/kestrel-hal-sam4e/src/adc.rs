//! Analog to digital conversion
//!
//! The chip has one conversion engine shared by the 24 analog-capable pins
//! in [`ADC_PINS`]; a pin's position in that table is its channel number.
//! Only one channel can own the engine at a time. Ownership is the
//! engine's channel-status register: a channel is active while its enable
//! bit is the one set there.
//!
//! A channel moves through three states:
//!
//! ```text
//!   Idle ──sample()──▶ Started ──(conversion done)──▶ Ready ──read()──▶ Idle
//!     ▲                   │
//!     └─cancel_sample()───┘
//! ```
//!
//! [`AdcChannel::sample`] never blocks. While the engine is busy, with this
//! channel or another one, it returns the number of clock ticks to wait
//! before polling again. Channels that lose the race just keep polling.

use kestrel_hal::adc::{AnalogInput, SampleState};

use crate::clock;
use crate::config::ChipConfig;
use crate::irq::IrqGuard;
use crate::pins::{gpio, PinId};
use crate::regs::mmio::{self, Afec, Pmc};
use crate::regs::{
    adc_mr_prescal, adc_mr_transfer, AdcRegisters, PmcRegisters, ADC_CR_START, ADC_ISR_DRDY,
    ADC_LCDR_LDATA_MASK, ADC_MR_STARTUP_SUT768, ID_ADC,
};
use crate::shutdown::{or_shutdown, ConfigError, Shutdown};

/// Full-scale conversion result (12 bits)
pub const ADC_MAX: u16 = 4095;

/// Highest converter clock the engine supports
pub const ADC_FREQ_MAX: u32 = 20_000_000;

/// Pins wired to the analog multiplexer, in channel order
#[rustfmt::skip]
pub const ADC_PINS: [PinId; 24] = [
    gpio('A', 8), gpio('A', 17), gpio('A', 18), gpio('A', 19),
    gpio('A', 20), gpio('A', 21), gpio('A', 22), gpio('B', 0),
    gpio('B', 1), gpio('B', 2), gpio('B', 3), gpio('C', 0),
    gpio('C', 1), gpio('C', 2), gpio('C', 3), gpio('C', 4),
    gpio('C', 12), gpio('C', 13), gpio('C', 15), gpio('C', 26),
    gpio('C', 27), gpio('C', 29), gpio('C', 30), gpio('C', 31),
];

/// Channel-status bits that belong to channels in [`ADC_PINS`]
///
/// AFEC0 implements channels 0..=15 only; entries 16..=23 never show up in
/// its status register.
const CHANNEL_MASK: u32 = (1u32 << ADC_PINS.len()) - 1;

/// Channel number of `pin`, if it is analog-capable
pub fn channel_for_pin(pin: PinId) -> Option<u8> {
    ADC_PINS.iter().position(|&p| p == pin).map(|chan| chan as u8)
}

/// The shared conversion engine
pub struct Adc<'a, A, C> {
    regs: &'a A,
    pmc: &'a C,
    config: ChipConfig,
}

impl Adc<'static, Afec, Pmc> {
    pub fn hardware(config: ChipConfig) -> Self {
        Self::new(&mmio::AFEC0, &mmio::PMC, config)
    }
}

impl<'a, A: AdcRegisters, C: PmcRegisters> Adc<'a, A, C> {
    pub fn new(regs: &'a A, pmc: &'a C, config: ChipConfig) -> Self {
        Self { regs, pmc, config }
    }

    /// Ticks a caller should wait before polling a busy engine again
    pub fn wait_ticks(&self) -> u32 {
        let clock = u64::from(self.config.clock_freq_hz.max(1));
        let ticks = u64::from(ADC_FREQ_MAX) * 1000 / clock;
        ticks.clamp(1, u64::from(u32::MAX)) as u32
    }

    /// Power the engine and program its timing, once
    fn ensure_enabled(&self) {
        if clock::peripheral_enabled(self.pmc, ID_ADC) {
            return;
        }
        clock::enable_peripheral(self.pmc, ID_ADC);

        let prescal = (self.config.clock_freq_hz / (2 * ADC_FREQ_MAX)).saturating_sub(1);
        self.regs
            .write_mode(adc_mr_prescal(prescal) | ADC_MR_STARTUP_SUT768 | adc_mr_transfer(1));
        info!("ADC enabled, prescaler {}", prescal);
    }
}

/// A reserved analog channel
pub struct AdcChannel<'a, A> {
    regs: &'a A,
    bit: u32,
    wait_ticks: u32,
}

impl<A> Clone for AdcChannel<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for AdcChannel<'_, A> {}

impl<'a, A: AdcRegisters> AdcChannel<'a, A> {
    /// Look `pin` up in the analog table and bring the engine up if needed
    pub fn try_setup<C: PmcRegisters>(
        adc: &Adc<'a, A, C>,
        pin: PinId,
    ) -> Result<Self, ConfigError> {
        let chan = channel_for_pin(pin).ok_or(ConfigError::NotAdcPin(pin))?;
        adc.ensure_enabled();

        debug!("ADC pin {} on channel {}", pin, chan);
        Ok(Self {
            regs: adc.regs,
            bit: 1u32 << chan,
            wait_ticks: adc.wait_ticks(),
        })
    }

    /// As [`try_setup`](Self::try_setup), shutting down on a bad pin
    pub fn setup<C, S>(adc: &Adc<'a, A, C>, pin: PinId, shutdown: &S) -> Self
    where
        C: PmcRegisters,
        S: Shutdown + ?Sized,
    {
        or_shutdown(Self::try_setup(adc, pin), shutdown)
    }

    /// Try to sample a value
    ///
    /// Returns zero once the result is ready, otherwise the number of clock
    /// ticks to wait before calling again.
    pub fn sample(&self) -> u32 {
        let chsr = self.regs.channel_status() & CHANNEL_MASK;
        if chsr == 0 {
            if self.regs.interrupt_status() & ADC_ISR_DRDY != 0 {
                // Left over from a cancelled conversion
                self.regs.last_converted_data();
            }
            self.regs.enable_channels(self.bit);
            self.regs.write_control(ADC_CR_START);
            return self.wait_ticks;
        }
        if chsr != self.bit {
            // Engine busy with another channel
            return self.wait_ticks;
        }
        if self.regs.interrupt_status() & ADC_ISR_DRDY == 0 {
            return self.wait_ticks;
        }
        0
    }

    /// Take the result and release the engine
    ///
    /// Only meaningful after [`sample`](Self::sample) returned zero.
    pub fn read(&self) -> u16 {
        self.regs.disable_channels(self.bit);
        (self.regs.last_converted_data() & ADC_LCDR_LDATA_MASK) as u16
    }

    /// Release the engine if this channel holds it
    pub fn cancel_sample(&self) {
        let _irq = IrqGuard::new();
        if self.regs.channel_status() & CHANNEL_MASK == self.bit {
            self.read();
        }
    }

    /// Where this channel is in its conversion
    pub fn state(&self) -> SampleState {
        if self.regs.channel_status() & CHANNEL_MASK != self.bit {
            SampleState::Idle
        } else if self.regs.interrupt_status() & ADC_ISR_DRDY == 0 {
            SampleState::Started
        } else {
            SampleState::Ready
        }
    }

    pub fn bit(&self) -> u32 {
        self.bit
    }

    /// Channel number (position in [`ADC_PINS`])
    pub fn channel(&self) -> u8 {
        self.bit.trailing_zeros() as u8
    }
}

impl<A: AdcRegisters> AnalogInput for AdcChannel<'_, A> {
    const MAX: u16 = ADC_MAX;

    fn sample(&mut self) -> u32 {
        AdcChannel::sample(self)
    }

    fn read(&mut self) -> u16 {
        AdcChannel::read(self)
    }

    fn cancel_sample(&mut self) {
        AdcChannel::cancel_sample(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regs::sim::{SimAdc, SimPmc};
    use crate::shutdown::PanicShutdown;
    use proptest::prelude::*;

    const WAIT_120MHZ: u32 = 166;

    #[derive(Default)]
    struct Engine {
        regs: SimAdc,
        pmc: SimPmc,
    }

    impl Engine {
        fn adc(&self) -> Adc<'_, SimAdc, SimPmc> {
            Adc::new(&self.regs, &self.pmc, ChipConfig::default())
        }
    }

    #[test]
    fn test_table_positions_are_channels() {
        let engine = Engine::default();
        let adc = engine.adc();

        for (index, &pin) in ADC_PINS.iter().enumerate() {
            let chan = AdcChannel::setup(&adc, pin, &PanicShutdown);
            assert_eq!(chan.bit(), 1u32 << index);
            assert_eq!(chan.channel() as usize, index);
        }
    }

    #[test]
    fn test_last_entry_is_channel_23() {
        let engine = Engine::default();
        let chan = AdcChannel::setup(&engine.adc(), gpio('C', 31), &PanicShutdown);
        assert_eq!(chan.bit(), 1u32 << 23);
    }

    #[test]
    fn test_non_analog_pin_rejected() {
        let engine = Engine::default();
        let result = AdcChannel::try_setup(&engine.adc(), gpio('A', 0));
        assert!(matches!(result, Err(ConfigError::NotAdcPin(0))));
        // Rejected before the engine is touched
        assert_eq!(engine.pmc.write_count(), 0);
        assert_eq!(engine.regs.write_count(), 0);
    }

    #[test]
    #[should_panic(expected = "Not a valid ADC pin")]
    fn test_non_analog_pin_shuts_down() {
        let engine = Engine::default();
        let _ = AdcChannel::setup(&engine.adc(), gpio('A', 0), &PanicShutdown);
    }

    #[test]
    fn test_engine_brought_up_once() {
        let engine = Engine::default();
        let adc = engine.adc();

        AdcChannel::setup(&adc, gpio('A', 8), &PanicShutdown);
        assert!(clock::peripheral_enabled(&engine.pmc, ID_ADC));
        // AFEC0 only; bit 31 would be AFEC1
        assert_eq!(engine.pmc.peripheral_clock_status0(), 1 << 30);
        assert_eq!(engine.pmc.peripheral_clock_status1(), 0);
        // 120 MHz / (2 * 20 MHz) - 1 = 2
        assert_eq!(
            engine.regs.mode(),
            adc_mr_prescal(2) | ADC_MR_STARTUP_SUT768 | adc_mr_transfer(1)
        );

        let writes = engine.regs.write_count();
        AdcChannel::setup(&adc, gpio('B', 0), &PanicShutdown);
        assert_eq!(engine.regs.write_count(), writes);
        assert_eq!(engine.pmc.write_count(), 1);
    }

    #[test]
    fn test_wait_ticks() {
        let engine = Engine::default();
        assert_eq!(engine.adc().wait_ticks(), WAIT_120MHZ);

        let slow = Adc::new(&engine.regs, &engine.pmc, ChipConfig::new(48_000_000));
        assert_eq!(slow.wait_ticks(), 416);

        let silly = Adc::new(&engine.regs, &engine.pmc, ChipConfig::new(0));
        assert!(silly.wait_ticks() > 0);
    }

    #[test]
    fn test_sample_protocol() {
        let engine = Engine::default();
        let adc = engine.adc();
        let chan = AdcChannel::setup(&adc, gpio('A', 17), &PanicShutdown);
        assert_eq!(chan.state(), SampleState::Idle);

        // Idle -> Started
        assert_eq!(chan.sample(), WAIT_120MHZ);
        assert_eq!(engine.regs.starts(), 1);
        assert_eq!(engine.regs.channel_status(), chan.bit());
        assert_eq!(chan.state(), SampleState::Started);

        // Still converting, no second start
        assert_eq!(chan.sample(), WAIT_120MHZ);
        assert_eq!(engine.regs.starts(), 1);

        // Started -> Ready
        engine.regs.finish_conversion(1234);
        assert_eq!(chan.state(), SampleState::Ready);
        assert_eq!(chan.sample(), 0);

        // Ready -> Idle
        assert_eq!(chan.read(), 1234);
        assert_eq!(engine.regs.channel_status(), 0);
        assert_eq!(chan.state(), SampleState::Idle);
    }

    #[test]
    fn test_busy_engine_makes_others_wait() {
        let engine = Engine::default();
        let adc = engine.adc();
        let first = AdcChannel::setup(&adc, gpio('C', 0), &PanicShutdown);
        let second = AdcChannel::setup(&adc, gpio('C', 1), &PanicShutdown);

        assert_eq!(first.sample(), WAIT_120MHZ);
        assert_eq!(second.sample(), WAIT_120MHZ);
        assert_eq!(second.state(), SampleState::Idle);
        assert_eq!(engine.regs.starts(), 1);

        // A finished conversion on `first` is not `second`'s result
        engine.regs.finish_conversion(10);
        assert_eq!(second.sample(), WAIT_120MHZ);
        assert_eq!(first.sample(), 0);
        first.read();

        // Engine free again, `second` gets its turn
        assert_eq!(second.sample(), WAIT_120MHZ);
        assert_eq!(engine.regs.channel_status(), second.bit());
        assert_eq!(engine.regs.starts(), 2);
    }

    #[test]
    fn test_read_stays_in_range() {
        let engine = Engine::default();
        let chan = AdcChannel::setup(&engine.adc(), gpio('B', 3), &PanicShutdown);

        chan.sample();
        engine.regs.finish_conversion(0xffff_ffff);
        assert_eq!(chan.sample(), 0);
        assert_eq!(chan.read(), ADC_MAX);
    }

    #[test]
    fn test_cancel_without_sample_writes_nothing() {
        let engine = Engine::default();
        let chan = AdcChannel::setup(&engine.adc(), gpio('A', 22), &PanicShutdown);
        let writes = engine.regs.write_count();

        chan.cancel_sample();
        chan.cancel_sample();
        assert_eq!(engine.regs.write_count(), writes);
    }

    #[test]
    fn test_cancel_releases_engine() {
        let engine = Engine::default();
        let adc = engine.adc();
        let chan = AdcChannel::setup(&adc, gpio('A', 20), &PanicShutdown);
        let other = AdcChannel::setup(&adc, gpio('A', 21), &PanicShutdown);

        chan.sample();
        // Cancelling a channel that does not hold the engine changes nothing
        other.cancel_sample();
        assert_eq!(engine.regs.channel_status(), chan.bit());

        chan.cancel_sample();
        assert_eq!(engine.regs.channel_status(), 0);
        assert_eq!(chan.state(), SampleState::Idle);

        // Second cancel is a no-op
        let writes = engine.regs.write_count();
        chan.cancel_sample();
        assert_eq!(engine.regs.write_count(), writes);
    }

    #[test]
    fn test_cancel_mid_conversion_does_not_leak_result() {
        let engine = Engine::default();
        let adc = engine.adc();
        let cancelled = AdcChannel::setup(&adc, gpio('B', 1), &PanicShutdown);
        let next = AdcChannel::setup(&adc, gpio('B', 2), &PanicShutdown);

        cancelled.sample();
        cancelled.cancel_sample();
        // The abandoned conversion still completes
        engine.regs.finish_conversion(111);

        assert_eq!(next.sample(), WAIT_120MHZ);
        assert_eq!(next.state(), SampleState::Started);
        assert_eq!(next.sample(), WAIT_120MHZ);

        engine.regs.finish_conversion(222);
        assert_eq!(next.sample(), 0);
        assert_eq!(next.read(), 222);
        assert_eq!(engine.regs.starts(), 2);
    }

    #[test]
    fn test_analog_input_trait() {
        let engine = Engine::default();
        let mut chan = AdcChannel::setup(&engine.adc(), gpio('C', 29), &PanicShutdown);

        assert_eq!(<AdcChannel<'_, SimAdc> as AnalogInput>::MAX, 4095);
        assert_eq!(chan.try_read(), Err(WAIT_120MHZ));
        engine.regs.finish_conversion(2048);
        assert_eq!(chan.try_read(), Ok(2048));
    }

    proptest! {
        #[test]
        fn prop_setup_succeeds_only_for_table_pins(pin in 0u8..=255) {
            let engine = Engine::default();
            let result = AdcChannel::try_setup(&engine.adc(), pin);

            match ADC_PINS.iter().position(|&p| p == pin) {
                Some(index) => prop_assert_eq!(result.map(|c| c.bit()), Ok(1u32 << index)),
                None => prop_assert_eq!(result.map(|c| c.bit()), Err(ConfigError::NotAdcPin(pin))),
            }
        }
    }
}
