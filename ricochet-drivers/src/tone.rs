//! Piezo buzzer tone emitter
//!
//! Drives a [`ToneOutput`] for the requested slot and waits the slot out.
//! Rests (frequency 0) and frequencies the output cannot produce both
//! leave the buzzer silent for the duration.

use embedded_hal_async::delay::DelayNs;
use ricochet_core::traits::ToneEmitter;
use ricochet_hal::ToneOutput;

/// Buzzer on a square-wave output
pub struct Buzzer<T, D> {
    output: T,
    delay: D,
}

impl<T: ToneOutput, D: DelayNs> Buzzer<T, D> {
    pub fn new(output: T, delay: D) -> Self {
        Self { output, delay }
    }

    /// Release the output and delay
    pub fn release(self) -> (T, D) {
        (self.output, self.delay)
    }
}

impl<T: ToneOutput, D: DelayNs> ToneEmitter for Buzzer<T, D> {
    async fn emit(&mut self, frequency_hz: u16, duration_ms: u32) {
        if frequency_hz == 0 || self.output.start(frequency_hz).is_err() {
            self.output.stop();
        }
        self.delay.delay_ms(duration_ms).await;
        self.output.stop();
    }
}
