//! Decoder co-processor adapter
//!
//! Implements [`PagerRadio`] by sending framed commands over the UART
//! and waiting on replies forwarded by the modem RX task.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{with_timeout, Duration};
use embedded_io_async::Write;

use ricochet_core::config::AddressFilter;
use ricochet_core::traits::{DecodeError, DecodedMessage, PagerRadio, RadioDecoder, RadioError};
use ricochet_protocol::{DecoderMessage, HostMessage};

use crate::channels::{BUFFERED_BATCHES, DECODER_REPLIES};

/// Radio library code for "no reply in time"
const ERR_TIMEOUT: i16 = -6;
/// Radio library code for an unspecified failure
const ERR_UNKNOWN: i16 = -1;

/// How long a bring-up command may take on the decoder side
const COMMAND_TIMEOUT: Duration = Duration::from_millis(500);
/// How long a page read may take on the decoder side
const READ_TIMEOUT: Duration = Duration::from_millis(1000);

/// Host side of the decoder link
pub struct UartRadio {
    tx: BufferedUartTx,
}

impl UartRadio {
    pub fn new(tx: BufferedUartTx) -> Self {
        Self { tx }
    }

    async fn send(&mut self, msg: HostMessage) -> Result<(), i16> {
        let frame = msg.to_frame().map_err(|_| ERR_UNKNOWN)?;
        let bytes = frame.encode_to_vec().map_err(|_| ERR_UNKNOWN)?;

        // Replies to an earlier command that timed out would be misread as ours
        while DECODER_REPLIES.try_receive().is_ok() {}

        self.tx.write_all(&bytes).await.map_err(|e| {
            warn!("Decoder link write failed: {:?}", e);
            ERR_UNKNOWN
        })
    }

    /// Send a bring-up command and wait for its status
    async fn command(&mut self, msg: HostMessage) -> Result<(), RadioError> {
        self.send(msg).await.map_err(RadioError)?;

        let wait = async {
            loop {
                match DECODER_REPLIES.receive().await {
                    DecoderMessage::Status { code } => return code,
                    other => debug!("Ignoring {:?} while waiting for status", other),
                }
            }
        };

        match with_timeout(COMMAND_TIMEOUT, wait).await {
            Ok(0) => Ok(()),
            Ok(code) => Err(RadioError(code)),
            Err(_) => Err(RadioError(ERR_TIMEOUT)),
        }
    }
}

impl RadioDecoder for UartRadio {
    async fn available_batches(&mut self) -> usize {
        usize::from(BUFFERED_BATCHES.load(Ordering::Acquire))
    }

    async fn decode(&mut self) -> Result<DecodedMessage, DecodeError> {
        // The decoder drains its buffer on read. Clear first so a count it
        // pushes while the request is in flight is kept.
        BUFFERED_BATCHES.store(0, Ordering::Release);
        self.send(HostMessage::ReadPage).await.map_err(DecodeError)?;

        let wait = async {
            loop {
                match DECODER_REPLIES.receive().await {
                    DecoderMessage::Page { address, text } => {
                        return Ok(DecodedMessage::new(address, &text))
                    }
                    DecoderMessage::DecodeFailed { code } => return Err(DecodeError(code)),
                    other => debug!("Ignoring {:?} while waiting for page", other),
                }
            }
        };

        with_timeout(READ_TIMEOUT, wait)
            .await
            .unwrap_or(Err(DecodeError(ERR_TIMEOUT)))
    }
}

impl PagerRadio for UartRadio {
    async fn begin_fsk(&mut self) -> Result<(), RadioError> {
        self.command(HostMessage::BeginFsk).await
    }

    async fn begin_pager(&mut self, frequency_hz: u32, baud: u16) -> Result<(), RadioError> {
        self.command(HostMessage::BeginPager { frequency_hz, baud })
            .await
    }

    async fn start_receive(&mut self, filter: AddressFilter) -> Result<(), RadioError> {
        self.command(HostMessage::StartReceive {
            address: filter.address,
            mask: filter.mask,
        })
        .await
    }
}
