//! Tone output abstraction
//!
//! A tone output produces a square wave at a requested frequency until
//! told to stop. Timing of how long a tone lasts is the caller's job.

/// Errors that can occur when starting a tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToneError {
    /// Requested frequency cannot be produced by this output
    FrequencyOutOfRange(u16),
}

/// Square-wave output for a piezo buzzer
pub trait ToneOutput {
    /// Start producing `frequency_hz`
    ///
    /// A frequency of 0 must behave like [`ToneOutput::stop`].
    fn start(&mut self, frequency_hz: u16) -> Result<(), ToneError>;

    /// Silence the output
    fn stop(&mut self);

    /// Check if a tone is currently sounding
    fn is_sounding(&self) -> bool;
}
