//! Ricochet Hardware Abstraction Layer
//!
//! This crate defines the pin-level traits the pager logic is written
//! against. Chip-specific HALs (currently RP2040) implement them, and the
//! host test suites implement them with recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ricochet-core / ricochet-drivers       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ricochet-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ricochet-hal-rp2040                    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Status LED and other digital outputs
//! - [`adc::AnalogInput`] - Battery voltage sense
//! - [`tone::ToneOutput`] - Square-wave buzzer drive

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod tone;

// Re-export key traits at crate root for convenience
pub use adc::{AdcError, AnalogInput};
pub use gpio::OutputPin;
pub use tone::{ToneError, ToneOutput};
