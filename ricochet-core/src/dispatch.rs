//! Notification dispatcher
//!
//! Runs one alert for one matched recipient, start to finish:
//!
//! 1. Page layout: white header band with the recipient label, message
//!    body underneath
//! 2. Battery overlay redrawn so the voltage shows alongside the page
//! 3. Ringtone, one slot per `note_duration_ms`
//! 4. Indicator blinks
//!
//! Each step completes before the next starts and nothing can cancel the
//! sequence. A display failure does not stop the tone or the blinks.

use embedded_hal_async::delay::DelayNs;
use ricochet_hal::{AnalogInput, OutputPin};

use crate::battery::{BatteryMonitor, BatteryRefresh};
use crate::config::{AlertConfig, RecipientEntry, Ringtone, RingtoneBank};
use crate::traits::{Color, DisplayError, DisplaySurface, Rect, ToneEmitter};

/// Header band holding the recipient label
pub const HEADER_RECT: Rect = Rect::new(0, 0, 127, 9);

/// Label position inside the header band
pub const LABEL_POS: (i16, i16) = (1, 1);

/// Top-left of the message body
pub const BODY_POS: (i16, i16) = (0, 12);

/// Everything an alert drives
pub struct AlertOutputs<D, T, L, W> {
    pub display: D,
    pub tone: T,
    pub indicator: L,
    pub delay: W,
}

/// Outcome of one alert
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertReport {
    /// Flush of the page layout
    pub page: Result<(), DisplayError>,
    /// Battery overlay drawn after the page
    pub battery: BatteryRefresh,
}

impl AlertReport {
    /// First display error in the alert, if any
    pub fn display_error(&self) -> Option<DisplayError> {
        self.page.err().or(self.battery.display.err())
    }
}

/// Sequences one alert across the outputs
#[derive(Debug, Clone, Copy)]
pub struct NotificationDispatcher<'a> {
    alert: &'a AlertConfig,
    ringtones: &'a RingtoneBank,
}

impl<'a> NotificationDispatcher<'a> {
    pub fn new(alert: &'a AlertConfig, ringtones: &'a RingtoneBank) -> Self {
        Self { alert, ringtones }
    }

    /// Alert `entry` with `text`
    pub async fn dispatch<D, T, L, W, A>(
        &self,
        entry: &RecipientEntry,
        text: &str,
        outputs: &mut AlertOutputs<D, T, L, W>,
        battery: &mut BatteryMonitor<A>,
    ) -> AlertReport
    where
        D: DisplaySurface,
        T: ToneEmitter,
        L: OutputPin,
        W: DelayNs,
        A: AnalogInput,
    {
        let page = render_page(&mut outputs.display, entry.label.as_str(), text).await;
        let battery = battery.refresh(&mut outputs.display).await;

        // Validated at config load, silent if the bank changed underneath
        let ringtone = self
            .ringtones
            .get(entry.ringtone)
            .copied()
            .unwrap_or(Ringtone::SILENT);
        self.play(&mut outputs.tone, &ringtone).await;
        self.blink(&mut outputs.indicator, &mut outputs.delay).await;

        AlertReport { page, battery }
    }

    /// Play every slot of `ringtone`, rests included
    pub async fn play<T: ToneEmitter>(&self, tone: &mut T, ringtone: &Ringtone) {
        for &frequency in ringtone.notes() {
            tone.emit(frequency, self.alert.note_duration_ms).await;
        }
    }

    /// Blink the indicator `blink_count` times
    pub async fn blink<L: OutputPin, W: DelayNs>(&self, indicator: &mut L, delay: &mut W) {
        for _ in 0..self.alert.blink_count {
            indicator.set_high();
            delay.delay_ms(self.alert.blink_on_ms).await;
            indicator.set_low();
            delay.delay_ms(self.alert.blink_off_ms).await;
        }
    }
}

/// Draw the two-region page and push it to the panel
async fn render_page<D: DisplaySurface>(
    display: &mut D,
    label: &str,
    text: &str,
) -> Result<(), DisplayError> {
    display.clear();

    display.fill_rect(HEADER_RECT, Color::White);
    display.set_cursor(LABEL_POS.0, LABEL_POS.1);
    display.set_text_color(Color::Black);
    display.print(label);

    display.set_cursor(BODY_POS.0, BODY_POS.1);
    display.set_text_color(Color::White);
    display.print(text);

    display.flush().await
}
