//! RP2040-specific HAL for the pager firmware
//!
//! Implements the `ricochet-hal` traits on top of `embassy-rp`:
//!
//! - GPIO output for the status LED
//! - Blocking ADC sampling for the battery divider
//! - PWM slice tone generation for the piezo buzzer

#![no_std]

pub mod adc;
pub mod gpio;
pub mod tone;

pub use adc::{AdcChannel, BatterySense};
pub use gpio::LedPin;
pub use tone::{pwm_timing, PwmTiming, PwmTone};
