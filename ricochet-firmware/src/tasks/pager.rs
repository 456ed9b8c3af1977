//! Pager task
//!
//! Boots the pager once, then runs the main loop forever. Alerts run
//! inline, so nothing else is read from the decoder while one plays.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Duration, Timer};

use ricochet_core::{BootPhase, CycleReport, FatalError, Pager, ReceiveOutcome};
use ricochet_drivers::{Buzzer, Ssd1306};
use ricochet_hal_rp2040::{BatterySense, LedPin, PwmTone};

use crate::clock::UptimeClock;
use crate::radio::UartRadio;

/// The pager with this board's collaborators plugged in
pub type FirmwarePager = Pager<
    UartRadio,
    Ssd1306<I2c<'static, I2C0, Async>>,
    Buzzer<PwmTone, Delay>,
    LedPin,
    Delay,
    BatterySense,
    UptimeClock,
>;

/// Pager task - boot, then poll forever
#[embassy_executor::task]
pub async fn pager_task(mut pager: FirmwarePager) {
    info!("Pager task started");

    let result = pager.boot().await;
    log_boot(&result);

    if let Err(err) = result {
        error!("Pager halted: {:?}", err);
        // Terminal state; only a reset brings the pager back
        loop {
            Timer::after(Duration::from_secs(3600)).await;
        }
    }

    info!(
        "Listening on {} Hz, {} recipients",
        pager.config().radio.tuned_frequency_hz(),
        pager.config().directory.len()
    );

    loop {
        match pager.poll().await {
            Ok(report) => log_cycle(&report),
            Err(e) => {
                error!("Main loop stopped: {:?}", e);
                return;
            }
        }
        // Let the RX task drain the UART between cycles
        Timer::after(Duration::from_millis(1)).await;
    }
}

/// One line per boot phase, in the order they ran
fn log_boot(result: &Result<(), FatalError>) {
    let failed = result.as_ref().err().map(|e| e.phase());
    let mut phase = Some(BootPhase::Display);

    while let Some(current) = phase {
        if Some(current) == failed {
            if let Err(err) = result {
                match err {
                    FatalError::Display(e) => {
                        error!("[{}] init ... failed, {:?}", current.name(), e)
                    }
                    FatalError::Radio(e) | FatalError::Protocol(e) | FatalError::Receiver(e) => {
                        error!("[{}] init ... failed, code {}", current.name(), e.0)
                    }
                }
            }
            return;
        }
        info!("[{}] init ... success", current.name());
        phase = current.next();
    }
}

fn log_cycle(report: &CycleReport) {
    match &report.receive {
        ReceiveOutcome::Waiting { .. } => {}
        ReceiveOutcome::Decoded { message, matches } => {
            info!(
                "[pager] received to {}: {}",
                message.address,
                message.text.as_str()
            );
            if *matches == 0 {
                info!("[pager] no recipient for {}", message.address);
            } else {
                debug!("[pager] alerted {} recipient(s)", matches);
            }
        }
        ReceiveOutcome::DecodeFailed(e) => {
            warn!("[pager] reading data failed, code {}", e.0);
        }
    }

    match &report.battery {
        Some(Ok(sample)) => debug!("[battery] {} V (raw {})", sample.voltage, sample.raw),
        Some(Err(e)) => warn!("[battery] read failed: {:?}", e),
        None => {}
    }

    if let Some(e) = report.display_error {
        warn!("[display] {:?}", e);
    }
}
