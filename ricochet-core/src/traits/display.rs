//! Display surface trait for the pager screen
//!
//! The surface owns its framebuffer. Drawing calls only touch that buffer
//! and cannot fail; `flush` pushes the buffer to the panel.

/// Errors that can occur talking to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transaction failed
    Bus,
    /// Controller did not acknowledge its address
    NotFound,
    /// `flush` called before `init`
    NotInitialized,
}

/// Monochrome pixel colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    #[default]
    Black,
    White,
}

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: i16, y: i16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Trait for the pager screen
///
/// Text printed with [`print`](Self::print) starts at the cursor, uses the
/// current text colour and wraps at the right edge.
pub trait DisplaySurface {
    /// Bring up the panel
    async fn init(&mut self) -> Result<(), DisplayError>;

    /// Clear the framebuffer to black
    fn clear(&mut self);

    /// Fill a region with a solid colour
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Move the text cursor
    fn set_cursor(&mut self, x: i16, y: i16);

    /// Set the text colour
    fn set_text_color(&mut self, color: Color);

    /// Draw text at the cursor and advance it
    fn print(&mut self, text: &str);

    /// Push the framebuffer to the panel
    async fn flush(&mut self) -> Result<(), DisplayError>;
}
