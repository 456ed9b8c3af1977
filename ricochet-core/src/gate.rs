//! Receive gate
//!
//! Short pages often span several radio batches, so a decode is only
//! attempted once enough of them are buffered. Below the threshold the
//! gate returns straight away.

use crate::config::ReceiveConfig;
use crate::traits::{DecodeError, DecodedMessage, RadioDecoder};

/// What one pass through the gate produced
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateOutcome {
    /// Not enough data buffered; no decode attempted
    Waiting { batches: usize },
    /// A page was decoded
    Decoded(DecodedMessage),
    /// The decoder rejected the buffered data
    Failed(DecodeError),
}

/// Batch-count gate in front of the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiveGate {
    threshold: usize,
}

impl ReceiveGate {
    pub fn new(config: &ReceiveConfig) -> Self {
        Self {
            threshold: usize::from(config.batch_threshold),
        }
    }

    /// Batches required before decoding
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Make at most one decode attempt
    pub async fn poll<R: RadioDecoder>(&self, radio: &mut R) -> GateOutcome {
        let batches = radio.available_batches().await;
        if batches < self.threshold {
            return GateOutcome::Waiting { batches };
        }
        match radio.decode().await {
            Ok(message) => GateOutcome::Decoded(message),
            Err(err) => GateOutcome::Failed(err),
        }
    }
}
