//! Analog input abstraction
//!
//! Used for the battery voltage divider. Readings are raw converter
//! counts; scaling to volts belongs to the caller.

/// Errors that can occur during a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// Converter reported an error for this sample
    ConversionFailed,
    /// Channel not configured for analog input
    NotConfigured,
}

/// Single-channel analog input
///
/// Takes `&mut self` because ADC reads typically require mutable access.
pub trait AnalogInput {
    /// Full-scale count for this converter (4095 for a 12-bit ADC)
    const FULL_SCALE: u16;

    /// Take one raw sample
    fn read_raw(&mut self) -> Result<u16, AdcError>;
}
