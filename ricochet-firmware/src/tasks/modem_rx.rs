//! Decoder UART receive task
//!
//! Receives frames from the decoder co-processor. Batch counts are
//! published through an atomic so the pager can poll them without
//! waiting; every other reply goes to the reply channel.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use ricochet_protocol::{DecoderMessage, FrameParser};

use crate::channels::{BUFFERED_BATCHES, DECODER_REPLIES};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Modem RX task - receives and parses frames from the decoder
#[embassy_executor::task]
pub async fn modem_rx_task(mut rx: BufferedUartRx) {
    info!("Modem RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match DecoderMessage::from_frame(&frame) {
                            Ok(msg) => handle_decoder_message(msg),
                            Err(e) => warn!("Failed to parse decoder message: {:?}", e),
                        },
                        Ok(None) => {}
                        Err(e) => warn!("Frame parse error: {:?}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => warn!("UART read error: {:?}", e),
        }
    }
}

fn handle_decoder_message(msg: DecoderMessage) {
    match msg {
        DecoderMessage::Batches { count } => {
            trace!("Batches buffered: {}", count);
            BUFFERED_BATCHES.store(count, Ordering::Release);
        }
        reply => {
            debug!("Decoder reply: {:?}", reply);
            if DECODER_REPLIES.try_send(reply).is_err() {
                warn!("Reply channel full, dropping decoder reply");
            }
        }
    }
}
