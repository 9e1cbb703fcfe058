//! STM32F303 TIM1 backend
//!
//! Implements [`PwmPeripheral`] with the embassy-stm32 low-level timer
//! driver. PA8/PA9/PA10 are bound to TIM1 (AF6) when the `PwmPin`s are
//! built; the user button is a `Flex` pin reconfigured by `gpio_init`.

use embassy_stm32::gpio::{Flex, Pull as GpioPull};
use embassy_stm32::pac::timer::vals::Ckd;
use embassy_stm32::peripherals::TIM1;
use embassy_stm32::timer::low_level::{CountingMode, OutputCompareMode, OutputPolarity, Timer};
use embassy_stm32::timer::simple_pwm::{Ch1, Ch2, Ch3, PwmPin};
use embassy_stm32::timer::Channel as TimChannel;
use embassy_time::{block_for, Duration};

use super::{
    compare_register, ClockDivision, CounterMode, OcMode, OutputCompareConfig, Pin, PinConfig,
    PinMode, Polarity, Pull, PwmPeripheral, TimerBaseConfig,
};
use crate::types::Channel;

/// TIM1 with its three output pins and the user button
pub struct Tim1Pwm<'d> {
    timer: Timer<'d, TIM1>,
    _outputs: (
        PwmPin<'d, TIM1, Ch1>,
        PwmPin<'d, TIM1, Ch2>,
        PwmPin<'d, TIM1, Ch3>,
    ),
    button: Flex<'d>,
}

impl<'d> Tim1Pwm<'d> {
    /// Take ownership of the timer, the bound output pins and the button pin
    #[must_use]
    pub fn new(
        timer: Timer<'d, TIM1>,
        outputs: (
            PwmPin<'d, TIM1, Ch1>,
            PwmPin<'d, TIM1, Ch2>,
            PwmPin<'d, TIM1, Ch3>,
        ),
        button: Flex<'d>,
    ) -> Self {
        Self {
            timer,
            _outputs: outputs,
            button,
        }
    }
}

const fn tim_channel(channel: Channel) -> TimChannel {
    match channel {
        Channel::Ch1 => TimChannel::Ch1,
        Channel::Ch2 => TimChannel::Ch2,
        Channel::Ch3 => TimChannel::Ch3,
    }
}

const fn polarity(polarity: Polarity) -> OutputPolarity {
    match polarity {
        Polarity::ActiveHigh => OutputPolarity::ActiveHigh,
        Polarity::ActiveLow => OutputPolarity::ActiveLow,
    }
}

const fn clock_division(division: ClockDivision) -> Ckd {
    match division {
        ClockDivision::Div1 => Ckd::DIV1,
        ClockDivision::Div2 => Ckd::DIV2,
        ClockDivision::Div4 => Ckd::DIV4,
    }
}

impl Tim1Pwm<'_> {
    /// Store into CCRx; the 16-bit register keeps the low half-word
    fn write_compare(&self, channel: TimChannel, value: u32) {
        self.timer
            .regs_advanced()
            .ccr(channel.index())
            .modify(|w| w.set_ccr(compare_register(value)));
    }
}

impl PwmPeripheral for Tim1Pwm<'_> {
    fn timer_base_init(&mut self, config: &TimerBaseConfig) {
        self.timer.stop();
        self.timer.set_counting_mode(match config.counter_mode {
            CounterMode::Up => CountingMode::EdgeAlignedUp,
            CounterMode::Down => CountingMode::EdgeAlignedDown,
            CounterMode::CenterAligned => CountingMode::CenterAlignedBothInterrupts,
        });
        self.timer
            .set_clock_division(clock_division(config.clock_division));

        let regs = self.timer.regs_advanced();
        regs.psc().write_value(config.prescaler);
        regs.arr().write(|w| w.set_arr(config.period));
        regs.rcr().write(|w| w.set_rep(config.repetition_counter.into()));
        // Latch PSC/ARR/RCR now instead of at the next overflow.
        regs.egr().write(|w| w.set_ug(true));
        self.timer.enable_outputs();

        defmt::debug!("TIM1 base: {}", config);
    }

    fn timer_base_start(&mut self) {
        self.timer.start();
    }

    fn configure_channel(&mut self, config: &OutputCompareConfig, channel: Channel) {
        let ch = tim_channel(channel);
        let index = ch.index();

        self.timer.set_output_compare_mode(
            ch,
            match config.mode {
                OcMode::Pwm1 => OutputCompareMode::PwmMode1,
                OcMode::Pwm2 => OutputCompareMode::PwmMode2,
            },
        );
        self.timer.set_output_polarity(ch, polarity(config.polarity));
        self.timer
            .set_complementary_output_polarity(ch, polarity(config.complementary_polarity));
        self.timer.set_output_compare_preload(ch, true);

        let regs = self.timer.regs_advanced();
        regs.ccmr_output(index / 2)
            .modify(|w| w.set_ocfe(index % 2, config.fast_mode));
        regs.cr2().modify(|w| {
            w.set_ois(index, config.idle_state.is_set());
            w.set_oisn(index, config.complementary_idle_state.is_set());
        });

        self.write_compare(ch, config.pulse);
        self.timer.enable_channel(ch, false);
    }

    fn set_compare(&mut self, channel: Channel, value: u32) {
        self.write_compare(tim_channel(channel), value);
    }

    fn start(&mut self, channel: Channel) {
        self.timer.enable_channel(tim_channel(channel), true);
    }

    fn stop(&mut self, channel: Channel) {
        self.timer.enable_channel(tim_channel(channel), false);
    }

    fn gpio_init(&mut self, config: &PinConfig) {
        if config.contains(Pin::USER_BUTTON) && config.mode == PinMode::Input {
            self.button.set_as_input(match config.pull {
                Pull::None => GpioPull::None,
                Pull::Up => GpioPull::Up,
                Pull::Down => GpioPull::Down,
            });
        } else {
            // Alternate function outputs were bound when the PwmPins were built.
            defmt::trace!("gpio_init: {} pins bound at construction", config.pins.len());
        }
    }

    fn gpio_read(&mut self, pin: Pin) -> bool {
        pin == Pin::USER_BUTTON && self.button.is_high()
    }

    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(u64::from(ms)));
    }
}
