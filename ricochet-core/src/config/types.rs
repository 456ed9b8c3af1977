//! Configuration type definitions
//!
//! Everything here is fixed before first boot. The firmware builds a
//! [`PagerConfig`] from the embedded `pager.toml` (or falls back to
//! [`PagerConfig::default`]) and hands it to the pager by value.

use super::directory::RecipientDirectory;
use super::ringtone::RingtoneBank;

/// Configuration validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Directory capacity exceeded
    TooManyRecipients,
    /// Ringtone bank capacity exceeded
    TooManyRingtones,
    /// A recipient refers to a ringtone the bank does not have
    UnknownRingtone { address: u32, ringtone: u8 },
    /// The startup ringtone is not in the bank
    UnknownStartupRingtone(u8),
    /// Label longer than the display field
    LabelTooLong,
    /// Full-scale ADC reading of zero
    InvalidFullScale,
}

/// Address filter applied by the decoder when receiving starts
///
/// A mask of 0 accepts every address; matching against the directory
/// happens afterwards in the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressFilter {
    pub address: u32,
    pub mask: u32,
}

impl Default for AddressFilter {
    fn default() -> Self {
        Self {
            address: 200,
            mask: 0,
        }
    }
}

/// Radio bring-up parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioConfig {
    /// Nominal channel frequency (Hz)
    pub frequency_hz: u32,
    /// Crystal correction added to the nominal frequency (Hz)
    pub offset_hz: i32,
    /// POCSAG bit rate
    pub baud: u16,
    /// Filter passed to start-receive
    pub filter: AddressFilter,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 439_987_500,
            offset_hz: 4_400,
            baud: 1200,
            filter: AddressFilter::default(),
        }
    }
}

impl RadioConfig {
    /// Frequency actually programmed into the radio
    pub fn tuned_frequency_hz(&self) -> u32 {
        self.frequency_hz.saturating_add_signed(self.offset_hz)
    }
}

/// Receive gate parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceiveConfig {
    /// Buffered batches required before a decode is attempted
    pub batch_threshold: u8,
}

impl Default for ReceiveConfig {
    fn default() -> Self {
        Self { batch_threshold: 2 }
    }
}

/// Battery sense parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryConfig {
    /// Minimum time between timer-driven refreshes (ms)
    pub refresh_interval_ms: u32,
    /// ADC reading at the reference voltage
    pub full_scale_raw: u16,
    /// Resistor divider ratio on the sense input
    pub divider_ratio: f32,
    /// ADC reference voltage
    pub reference_voltage: f32,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 2000,
            full_scale_raw: 4095,
            divider_ratio: 2.0,
            reference_voltage: 3.3,
        }
    }
}

/// Alert timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertConfig {
    /// Length of one ringtone slot (ms)
    pub note_duration_ms: u32,
    /// Indicator blinks per alert
    pub blink_count: u8,
    /// Indicator on time per blink (ms)
    pub blink_on_ms: u32,
    /// Indicator off time per blink (ms)
    pub blink_off_ms: u32,
    /// Ringtone played once after a successful boot
    pub startup_ringtone: Option<u8>,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            note_duration_ms: 130,
            blink_count: 20,
            blink_on_ms: 100,
            blink_off_ms: 100,
            startup_ringtone: Some(4),
        }
    }
}

/// Complete pager configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PagerConfig {
    pub radio: RadioConfig,
    pub receive: ReceiveConfig,
    pub battery: BatteryConfig,
    pub alert: AlertConfig,
    pub ringtones: RingtoneBank,
    pub directory: RecipientDirectory,
}

impl PagerConfig {
    /// Check cross-references between tables
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.battery.full_scale_raw == 0 {
            return Err(ConfigError::InvalidFullScale);
        }
        if let Some(index) = self.alert.startup_ringtone {
            if !self.ringtones.contains(index) {
                return Err(ConfigError::UnknownStartupRingtone(index));
            }
        }
        self.directory.validate(&self.ringtones)
    }
}
