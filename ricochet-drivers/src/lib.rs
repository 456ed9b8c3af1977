//! Hardware driver implementations
//!
//! Concrete implementations of the collaborator traits defined in
//! ricochet-core:
//!
//! - SSD1306 128x64 OLED as a [`DisplaySurface`](ricochet_core::traits::DisplaySurface)
//! - Piezo buzzer as a [`ToneEmitter`](ricochet_core::traits::ToneEmitter)

#![no_std]
#![deny(unsafe_code)]
#![allow(async_fn_in_trait)]

pub mod display;
pub mod tone;

pub use display::{Ssd1306, SSD1306_ADDR};
pub use tone::Buzzer;
