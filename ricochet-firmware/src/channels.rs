//! Inter-task communication
//!
//! The modem RX task is the only writer; the pager task reads.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use portable_atomic::AtomicU8;

use ricochet_protocol::DecoderMessage;

/// Channel capacity for decoder replies
const REPLY_CHANNEL_SIZE: usize = 4;

/// Replies from the decoder (status, pages, decode failures)
pub static DECODER_REPLIES: Channel<CriticalSectionRawMutex, DecoderMessage, REPLY_CHANNEL_SIZE> =
    Channel::new();

/// Last batch count pushed by the decoder
pub static BUFFERED_BATCHES: AtomicU8 = AtomicU8::new(0);
