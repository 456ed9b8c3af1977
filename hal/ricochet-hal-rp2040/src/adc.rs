//! ADC sampling
//!
//! RP2040 has a single 12-bit ADC with 5 channels:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29 (VSYS/3 on the Pico)
//! - ADC4: Internal temperature sensor

use embassy_rp::adc::{Adc, Blocking, Channel};
use ricochet_hal::{AdcError, AnalogInput};

/// ADC channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcChannel {
    Adc0,
    Adc1,
    Adc2,
    Adc3,
    Temperature,
}

impl AdcChannel {
    /// Get ADC channel from GPIO pin
    pub fn from_gpio(gpio: u8) -> Option<Self> {
        match gpio {
            26 => Some(AdcChannel::Adc0),
            27 => Some(AdcChannel::Adc1),
            28 => Some(AdcChannel::Adc2),
            29 => Some(AdcChannel::Adc3),
            _ => None,
        }
    }

    /// Get the GPIO pin for this channel
    pub fn gpio(&self) -> Option<u8> {
        match self {
            AdcChannel::Adc0 => Some(26),
            AdcChannel::Adc1 => Some(27),
            AdcChannel::Adc2 => Some(28),
            AdcChannel::Adc3 => Some(29),
            AdcChannel::Temperature => None,
        }
    }
}

/// Battery divider input on one ADC channel
///
/// Owns the ADC outright; the pager samples nothing else.
pub struct BatterySense {
    adc: Adc<'static, Blocking>,
    channel: Channel<'static>,
}

impl BatterySense {
    pub fn new(adc: Adc<'static, Blocking>, channel: Channel<'static>) -> Self {
        Self { adc, channel }
    }
}

impl AnalogInput for BatterySense {
    const FULL_SCALE: u16 = 4095;

    fn read_raw(&mut self) -> Result<u16, AdcError> {
        self.adc
            .blocking_read(&mut self.channel)
            .map_err(|_| AdcError::ConversionFailed)
    }
}
