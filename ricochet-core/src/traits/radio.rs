//! Radio decoder traits
//!
//! Demodulation and POCSAG framing happen outside this crate. The pager
//! only asks how much data is buffered and pulls decoded pages.

use heapless::String;

use crate::config::AddressFilter;

/// Longest page text kept
pub const MAX_TEXT_LEN: usize = 128;

/// Opaque decoder failure code, logged verbatim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodeError(pub i16);

/// Opaque radio bring-up failure code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioError(pub i16);

/// A page pulled from the decoder
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodedMessage {
    /// RIC the page was sent to
    pub address: u32,
    /// Message text
    pub text: String<MAX_TEXT_LEN>,
}

impl DecodedMessage {
    /// Build a message, truncating `text` at a char boundary if needed
    pub fn new(address: u32, text: &str) -> Self {
        let mut stored = String::new();
        for c in text.chars() {
            if stored.push(c).is_err() {
                break;
            }
        }
        Self {
            address,
            text: stored,
        }
    }
}

/// Source of decoded pages
pub trait RadioDecoder {
    /// Number of fully buffered batches
    async fn available_batches(&mut self) -> usize;

    /// Decode the buffered batches into a page
    async fn decode(&mut self) -> Result<DecodedMessage, DecodeError>;
}

/// Decoder that also needs bringing up at boot
pub trait PagerRadio: RadioDecoder {
    /// Bring up the transceiver in FSK mode
    async fn begin_fsk(&mut self) -> Result<(), RadioError>;

    /// Configure the POCSAG layer
    async fn begin_pager(&mut self, frequency_hz: u32, baud: u16) -> Result<(), RadioError>;

    /// Start receiving pages that pass `filter`
    async fn start_receive(&mut self, filter: AddressFilter) -> Result<(), RadioError>;
}
