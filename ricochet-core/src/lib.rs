//! Board-agnostic core logic for the pager firmware
//!
//! This crate decides whether, for whom and how to alert once a page
//! has been decoded. It does not touch hardware directly:
//!
//! - Collaborator traits (radio decoder, display surface, tone emitter, clock)
//! - Recipient directory and ringtone bank (compiled-in configuration)
//! - Receive gate, address resolver and notification dispatcher
//! - Battery monitor with periodic overlay refresh
//! - Boot state machine and the cooperative main loop
//! - A small `no_std` parser for the embedded `pager.toml`

#![no_std]
#![deny(unsafe_code)]
#![allow(async_fn_in_trait)] // single-threaded executor, Send bounds not needed

pub mod battery;
pub mod config;
pub mod dispatch;
pub mod gate;
pub mod pager;
pub mod resolver;
pub mod state;
pub mod traits;

pub use battery::{BatteryMonitor, BatteryRefresh, BatterySample};
pub use config::{PagerConfig, RecipientDirectory, RecipientEntry, Ringtone, RingtoneBank};
pub use dispatch::{AlertOutputs, AlertReport, NotificationDispatcher};
pub use gate::{GateOutcome, ReceiveGate};
pub use pager::{CycleReport, NotListening, Pager, ReceiveOutcome};
pub use resolver::AddressResolver;
pub use state::{BootPhase, Event, FatalError, State};
