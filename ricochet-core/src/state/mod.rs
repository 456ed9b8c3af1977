//! Pager lifecycle state machine
//!
//! Boot phases, the listening loop and the terminal halt are explicit
//! states. Transitions are a pure function of state and event.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{BootPhase, FatalError, State};
