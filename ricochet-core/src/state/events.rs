//! Events that trigger state transitions

use super::machine::FatalError;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Boot events
    /// Current boot phase succeeded
    PhaseComplete,
    /// Current boot phase failed
    InitFailed(FatalError),

    // Alert events
    /// A matched page started alerting
    AlertStarted,
    /// Alert sequence ran to completion
    AlertFinished,
}
