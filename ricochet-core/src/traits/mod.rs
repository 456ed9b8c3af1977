//! Collaborator traits
//!
//! These traits define the interface between the dispatch logic and the
//! services it drives. Implementations live in the drivers crate and the
//! firmware; tests use in-memory mocks.

pub mod clock;
pub mod display;
pub mod radio;
pub mod tone;

pub use clock::Clock;
pub use display::{Color, DisplayError, DisplaySurface, Rect};
pub use radio::{DecodeError, DecodedMessage, PagerRadio, RadioDecoder, RadioError, MAX_TEXT_LEN};
pub use tone::ToneEmitter;
