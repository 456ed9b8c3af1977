//! Battery monitor
//!
//! Samples the battery sense input and draws the voltage in a white band
//! along the bottom of the screen. The main loop refreshes it on a timer;
//! the dispatcher also redraws it straight after every alert page.

use core::fmt::Write;

use heapless::String;
use ricochet_hal::{AdcError, AnalogInput};

use crate::config::BatteryConfig;
use crate::traits::{Color, DisplayError, DisplaySurface, Rect};

/// Overlay band at the bottom of the screen
pub const OVERLAY_RECT: Rect = Rect::new(0, 55, 127, 9);

/// Where the voltage text starts
pub const OVERLAY_TEXT_POS: (i16, i16) = (1, 56);

/// One battery reading
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatterySample {
    /// Raw ADC reading
    pub raw: u16,
    /// Battery voltage
    pub voltage: f32,
}

impl BatterySample {
    /// Convert a raw reading through the divider
    pub fn from_raw(raw: u16, config: &BatteryConfig) -> Self {
        let full_scale = f32::from(config.full_scale_raw.max(1));
        let voltage =
            (f32::from(raw) / full_scale) * config.divider_ratio * config.reference_voltage;
        Self { raw, voltage }
    }
}

/// Result of one overlay refresh
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryRefresh {
    /// Reading, or why it could not be taken
    pub sample: Result<BatterySample, AdcError>,
    /// Outcome of pushing the overlay to the panel
    pub display: Result<(), DisplayError>,
}

/// Periodic battery sampler
pub struct BatteryMonitor<A> {
    input: A,
    config: BatteryConfig,
    last_refresh_ms: u64,
}

impl<A: AnalogInput> BatteryMonitor<A> {
    /// Create a monitor; the first timer refresh is due once the interval
    /// has elapsed from time zero
    pub fn new(input: A, config: BatteryConfig) -> Self {
        Self {
            input,
            config,
            last_refresh_ms: 0,
        }
    }

    /// Take a reading
    pub fn sample(&mut self) -> Result<BatterySample, AdcError> {
        let raw = self.input.read_raw()?;
        Ok(BatterySample::from_raw(raw, &self.config))
    }

    /// Check whether the refresh interval has been exceeded
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_refresh_ms) > u64::from(self.config.refresh_interval_ms)
    }

    /// Timestamp of the last timer-driven refresh
    pub fn last_refresh_ms(&self) -> u64 {
        self.last_refresh_ms
    }

    /// Sample and draw the overlay, without touching the timer
    pub async fn refresh<D: DisplaySurface>(&mut self, display: &mut D) -> BatteryRefresh {
        let sample = self.sample();
        let display = match sample {
            Ok(sample) => {
                draw_overlay(display, sample.voltage);
                display.flush().await
            }
            Err(_) => Ok(()),
        };
        BatteryRefresh { sample, display }
    }

    /// Refresh if the interval has elapsed, and restart the timer
    pub async fn refresh_if_due<D: DisplaySurface>(
        &mut self,
        display: &mut D,
        now_ms: u64,
    ) -> Option<BatteryRefresh> {
        if !self.is_due(now_ms) {
            return None;
        }
        let refresh = self.refresh(display).await;
        self.last_refresh_ms = now_ms;
        Some(refresh)
    }
}

fn draw_overlay<D: DisplaySurface>(display: &mut D, voltage: f32) {
    let mut text: String<16> = String::new();
    // 16 bytes holds any f32 at two decimals below 1e12
    let _ = write!(text, "{:.2}V", voltage);

    display.fill_rect(OVERLAY_RECT, Color::White);
    display.set_cursor(OVERLAY_TEXT_POS.0, OVERLAY_TEXT_POS.1);
    display.set_text_color(Color::Black);
    display.print(&text);
}
