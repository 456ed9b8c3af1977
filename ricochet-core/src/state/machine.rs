//! State machine definition

use super::events::Event;
use crate::traits::{DisplayError, RadioError};

/// Initialization phases, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootPhase {
    /// Panel bring-up
    Display,
    /// Transceiver bring-up in FSK mode
    Radio,
    /// POCSAG layer configuration
    Protocol,
    /// Start receiving
    Receiver,
}

impl BootPhase {
    /// Phase that follows this one, `None` after the last
    pub fn next(self) -> Option<Self> {
        match self {
            BootPhase::Display => Some(BootPhase::Radio),
            BootPhase::Radio => Some(BootPhase::Protocol),
            BootPhase::Protocol => Some(BootPhase::Receiver),
            BootPhase::Receiver => None,
        }
    }

    /// Short name for diagnostics
    pub fn name(self) -> &'static str {
        match self {
            BootPhase::Display => "display",
            BootPhase::Radio => "radio",
            BootPhase::Protocol => "pager",
            BootPhase::Receiver => "receive",
        }
    }
}

/// Unrecoverable initialization failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FatalError {
    Display(DisplayError),
    Radio(RadioError),
    Protocol(RadioError),
    Receiver(RadioError),
}

impl FatalError {
    /// Boot phase that produced this error
    pub fn phase(&self) -> BootPhase {
        match self {
            FatalError::Display(_) => BootPhase::Display,
            FatalError::Radio(_) => BootPhase::Radio,
            FatalError::Protocol(_) => BootPhase::Protocol,
            FatalError::Receiver(_) => BootPhase::Receiver,
        }
    }
}

/// Pager states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Running an initialization phase
    Booting(BootPhase),
    /// Main loop running: polling for pages and refreshing the battery
    Listening,
    /// Alert sequence in progress; intake is stalled
    Alerting,
    /// Initialization failed; nothing runs again until reset
    Halted(FatalError),
}

impl Default for State {
    fn default() -> Self {
        State::Booting(BootPhase::Display)
    }
}

impl State {
    /// Check if the main loop may run
    pub fn is_listening(&self) -> bool {
        matches!(self, State::Listening)
    }

    /// Check if this is the terminal halt
    pub fn is_halted(&self) -> bool {
        matches!(self, State::Halted(_))
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Halted absorbs everything
            (Halted(_), _) => self,

            // Boot transitions
            (Booting(phase), PhaseComplete) => match phase.next() {
                Some(next) => Booting(next),
                None => Listening,
            },
            (Booting(_), InitFailed(err)) => Halted(err),

            // Alert transitions
            (Listening, AlertStarted) => Alerting,
            (Alerting, AlertFinished) => Listening,

            // Default: stay in current state
            _ => self,
        }
    }
}
