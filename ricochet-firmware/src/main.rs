//! Ricochet - POCSAG Pager Firmware
//!
//! Main firmware binary for RP2040-based pagers. A decoder co-processor
//! does the radio work; this firmware decides who a page is for and
//! alerts on the screen, the buzzer and the status LED.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_rp::i2c::{Config as I2cConfig, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ricochet_core::config::parse_config;
use ricochet_core::{AlertOutputs, PagerConfig};
use ricochet_drivers::{Buzzer, Ssd1306, SSD1306_ADDR};
use ricochet_hal_rp2040::{BatterySense, LedPin, PwmTone};

use crate::clock::UptimeClock;
use crate::radio::UartRadio;
use crate::tasks::FirmwarePager;

/// Embedded configuration (compiled into firmware)
/// Edit pager.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../pager.toml");

/// Decoder link speed
const DECODER_BAUD: u32 = 115_200;

/// Panel bus speed
const I2C_FREQUENCY_HZ: u32 = 400_000;

mod channels;
mod clock;
mod radio;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Ricochet firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Decoder co-processor on UART0 (GPIO0 TX, GPIO1 RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = DECODER_BAUD;
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    info!("UART initialized for decoder link");

    // SSD1306 on I2C0 (GPIO4 SDA, GPIO5 SCL)
    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config);
    let display = Ssd1306::new(i2c, SSD1306_ADDR);

    // Piezo on PWM slice 7 channel B (GPIO15)
    let pwm = Pwm::new_output_b(p.PWM_SLICE7, p.PIN_15, PwmConfig::default());
    let tone = Buzzer::new(
        PwmTone::new(pwm, embassy_rp::clocks::clk_sys_freq()),
        Delay,
    );

    // Status LED (GPIO25 on the Pico)
    let indicator = LedPin::new(Output::new(p.PIN_25, Level::Low));

    // Battery divider on ADC0 (GPIO26)
    let adc = Adc::new_blocking(p.ADC, embassy_rp::adc::Config::default());
    let battery = BatterySense::new(adc, Channel::new_pin(p.PIN_26, Pull::None));

    info!("Alert peripherals initialized");

    let outputs = AlertOutputs {
        display,
        tone,
        indicator,
        delay: Delay,
    };
    let pager: FirmwarePager =
        FirmwarePager::new(config, UartRadio::new(tx), outputs, battery, UptimeClock);

    spawner.spawn(tasks::modem_rx_task(rx)).unwrap();
    spawner.spawn(tasks::pager_task(pager)).unwrap();

    info!("All tasks spawned, firmware running");
}

/// Parse the embedded pager.toml, falling back to factory defaults
///
/// build.rs already rejects a broken file, so the fallback only matters
/// when the two validators disagree.
fn load_config() -> PagerConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Parsed embedded configuration: {} recipients, {} ringtones",
                config.directory.len(),
                config.ringtones.len()
            );
            config
        }
        Err(e) => {
            error!(
                "Failed to parse embedded config at line {}: {:?}",
                e.line, e.kind
            );
            error!("Using factory default configuration");
            PagerConfig::default()
        }
    }
}
