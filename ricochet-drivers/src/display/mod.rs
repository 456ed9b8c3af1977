//! Pager screen drivers

pub mod ssd1306;
pub mod text;

pub use ssd1306::{Ssd1306, SSD1306_ADDR};
pub use text::TextCursor;
