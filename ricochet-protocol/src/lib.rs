//! Decoder Co-processor Link
//!
//! This crate defines the UART protocol between the pager MCU (host) and
//! the radio co-processor that owns the transceiver and does POCSAG
//! demodulation. The host brings the radio up, then pulls decoded pages.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CRC8 │
//! │ 1B    │ 1B     │ 1B   │ 0–200B      │ 1B   │
//! └───────┴────────┴──────┴─────────────┴──────┘
//! ```
//!
//! Bring-up commands are answered with a `Status` frame. The decoder
//! pushes a `Batches` frame whenever its buffered batch count changes,
//! and answers `ReadPage` with either `Page` or `DecodeFailed`.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;

pub use frame::{crc8, Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::{DecoderMessage, HostMessage, MAX_PAGE_TEXT};
