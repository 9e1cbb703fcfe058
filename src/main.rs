//! PWM Console Main Application
//!
//! Entry point for the STM32F303 PWM console firmware.
//! Brings up clocks and USB, then serves console commands over CDC ACM.

#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Flex, Level, Output, OutputType, Speed};
use embassy_stm32::peripherals::USB;
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::low_level::Timer as LowLevelTimer;
use embassy_stm32::timer::simple_pwm::PwmPin;
use embassy_stm32::usb::{Driver, InterruptHandler};
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_usb::class::cdc_acm::CdcAcmClass;
use embassy_usb::driver::EndpointError;
use embassy_usb::{Builder, UsbDevice};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use pwm_console::breathe::BreatheState;
use pwm_console::hal::stm32::Tim1Pwm;
use pwm_console::prelude::*;
use pwm_console::usb::cdc::{echo, CdcState, CdcWriteBuffer, UsbIdentity};

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    USB_LP_CAN_RX0 => InterruptHandler<peripherals::USB>;
});

type UsbDriver = Driver<'static, USB>;
type ConsoleShell = Shell<Tim1Pwm<'static>, CdcWriteBuffer>;

static CDC_STATE: StaticCell<CdcState<'static>> = StaticCell::new();
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("PWM Console Firmware v{}", env!("CARGO_PKG_VERSION"));

    let mut p = embassy_stm32::init(clock_config());

    info!("Peripherals initialized");

    // Pull D+ low for a moment so the host re-enumerates after reset.
    {
        let _dp = Output::new(&mut p.PA12, Level::Low, Speed::Low);
        Timer::after_millis(10).await;
    }

    let outputs = (
        PwmPin::new_ch1(p.PA8, OutputType::PushPull),
        PwmPin::new_ch2(p.PA9, OutputType::PushPull),
        PwmPin::new_ch3(p.PA10, OutputType::PushPull),
    );
    let pwm = Tim1Pwm::new(LowLevelTimer::new(p.TIM1), outputs, Flex::new(p.PA0));

    let driver = Driver::new(p.USB, Irqs, p.PA12, p.PA11);
    let (usb, class) = build_usb(driver);
    spawner.spawn(usb_device_task(usb)).unwrap();

    info!("USB CDC console ready");

    let mut shell = Shell::new(PwmController::new(pwm), CdcWriteBuffer::new());
    console_task(class, &mut shell).await;
}

/// 72 MHz SYSCLK from the 8 MHz ST-LINK clock, USB at 48 MHz
fn clock_config() -> embassy_stm32::Config {
    use embassy_stm32::rcc::{
        AHBPrescaler, APBPrescaler, Hse, HseMode, Pll, PllMul, PllPreDiv, PllSource, Sysclk,
    };

    let mut config = embassy_stm32::Config::default();
    config.rcc.hse = Some(Hse {
        freq: Hertz(HSE_FREQUENCY_HZ),
        mode: HseMode::Bypass,
    });
    config.rcc.pll = Some(Pll {
        src: PllSource::HSE,
        prediv: PllPreDiv::DIV1,
        mul: PllMul::MUL9,
    });
    config.rcc.sys = Sysclk::PLL1_P;
    config.rcc.ahb_pre = AHBPrescaler::DIV1;
    config.rcc.apb1_pre = APBPrescaler::DIV2;
    config.rcc.apb2_pre = APBPrescaler::DIV1;
    // USB 48 MHz: embassy-stm32 selects USBPRE = /1.5 itself for a 72 MHz PLL.
    config
}

fn build_usb(driver: UsbDriver) -> (UsbDevice<'static, UsbDriver>, CdcAcmClass<'static, UsbDriver>) {
    let identity = UsbIdentity::CONSOLE;
    info!("Enumerating as {}", identity);

    let mut builder = Builder::new(
        driver,
        identity.config(),
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        &mut [],
        CONTROL_BUF.init([0; 64]),
    );

    let state = CDC_STATE.init(CdcState::new());
    let class = CdcAcmClass::new(&mut builder, state.state_mut(), USB_CDC_PACKET_SIZE);
    (builder.build(), class)
}

/// USB device task - services enumeration and control transfers
#[embassy_executor::task]
async fn usb_device_task(mut usb: UsbDevice<'static, UsbDriver>) -> ! {
    usb.run().await
}

/// Console loop - one session per host connection
async fn console_task(mut class: CdcAcmClass<'static, UsbDriver>, shell: &mut ConsoleShell) -> ! {
    loop {
        class.wait_connection().await;
        info!("Console connected");
        if let Err(err) = console_session(&mut class, shell).await {
            warn!("Console disconnected: {}", err);
        }
    }
}

async fn console_session(
    class: &mut CdcAcmClass<'static, UsbDriver>,
    shell: &mut ConsoleShell,
) -> Result<(), EndpointError> {
    let mut packet = [0u8; USB_CDC_PACKET_SIZE as usize];

    class.write_packet(CONSOLE_PROMPT.as_bytes()).await?;

    loop {
        let n = class.read_packet(&mut packet).await?;
        for &byte in &packet[..n] {
            class.write_packet(echo(&byte)).await?;

            let Some(execution) = shell.feed(byte) else {
                continue;
            };
            flush(class, shell.output_mut()).await?;

            if let Execution::Breathe(mut breathe) = execution {
                while breathe.step(shell.controller_mut()) != BreatheState::Cancelled {
                    Timer::after_millis(u64::from(BREATHE_STEP_MS)).await;
                }
            }

            class.write_packet(CONSOLE_PROMPT.as_bytes()).await?;
        }
    }
}

async fn flush(
    class: &mut CdcAcmClass<'static, UsbDriver>,
    out: &mut CdcWriteBuffer,
) -> Result<(), EndpointError> {
    for chunk in out.packets() {
        class.write_packet(chunk).await?;
    }
    out.clear();
    Ok(())
}
