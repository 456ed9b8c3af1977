//! PWM tone generation
//!
//! One PWM slice drives the piezo with a 50% square wave. The output
//! frequency is `clk_sys / (divider * (top + 1))`; the divider is an
//! 8.4 fixed-point value and `top` a 16-bit wrap count.

use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use fixed::types::U12F4;
use ricochet_hal::{ToneError, ToneOutput};

/// Largest divider the RP2040 slice accepts (255 + 15/16), in 1/16 units
const MAX_DIVIDER_BITS: u64 = 0x0FFF;

/// Divider and wrap count for one output frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmTiming {
    pub divider: U12F4,
    pub top: u16,
}

/// Compute slice timing for `frequency_hz` from a `sys_hz` clock
///
/// Picks the smallest divider that keeps `top` within 16 bits, which
/// keeps the frequency error as low as the hardware allows.
pub fn pwm_timing(sys_hz: u32, frequency_hz: u16) -> Option<PwmTiming> {
    if frequency_hz == 0 {
        return None;
    }
    let sys16 = u64::from(sys_hz) * 16;
    let freq = u64::from(frequency_hz);

    let divider_bits = sys16.div_ceil(freq * 65_536).max(16);
    if divider_bits > MAX_DIVIDER_BITS {
        return None;
    }

    let period = sys16 / (divider_bits * freq);
    if !(2..=65_536).contains(&period) {
        return None;
    }

    Some(PwmTiming {
        divider: U12F4::from_bits(divider_bits as u16),
        top: (period - 1) as u16,
    })
}

/// Piezo buzzer on a PWM slice output
pub struct PwmTone {
    pwm: Pwm<'static>,
    config: PwmConfig,
    sys_hz: u32,
    sounding: bool,
}

impl PwmTone {
    /// Wrap a slice that already owns the buzzer pin
    pub fn new(mut pwm: Pwm<'static>, sys_hz: u32) -> Self {
        let mut config = PwmConfig::default();
        config.enable = false;
        pwm.set_config(&config);
        Self {
            pwm,
            config,
            sys_hz,
            sounding: false,
        }
    }
}

impl ToneOutput for PwmTone {
    fn start(&mut self, frequency_hz: u16) -> Result<(), ToneError> {
        if frequency_hz == 0 {
            self.stop();
            return Ok(());
        }
        let timing = pwm_timing(self.sys_hz, frequency_hz)
            .ok_or(ToneError::FrequencyOutOfRange(frequency_hz))?;

        self.config.divider = timing.divider;
        self.config.top = timing.top;
        // Same duty on both channels so either pin of the slice can drive the piezo
        let half = (u32::from(timing.top) + 1) / 2;
        self.config.compare_a = half as u16;
        self.config.compare_b = half as u16;
        self.config.enable = true;
        self.pwm.set_config(&self.config);
        self.sounding = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.config.enable = false;
        self.config.compare_a = 0;
        self.config.compare_b = 0;
        self.pwm.set_config(&self.config);
        self.sounding = false;
    }

    fn is_sounding(&self) -> bool {
        self.sounding
    }
}
