//! Pager configuration
//!
//! Everything here is fixed before first boot. The firmware embeds a
//! `pager.toml`, parses it once at startup and hands the resulting
//! [`PagerConfig`] to the components by reference. Nothing mutates it
//! afterwards.

pub mod directory;
pub mod parse;
pub mod ringtone;
pub mod types;

pub use directory::*;
pub use parse::{parse_config, ParseError, ParseErrorKind};
pub use ringtone::*;
pub use types::*;
