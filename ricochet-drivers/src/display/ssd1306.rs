//! SSD1306 OLED Display Driver
//!
//! Driver for 128x64 SSD1306 panels over async I2C. Drawing goes into a
//! page-organised framebuffer through embedded-graphics; `flush` pushes
//! the whole buffer one page at a time.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::{Error as _, ErrorKind, NoAcknowledgeSource};
use embedded_hal_async::i2c::I2c;
use ricochet_core::traits::{Color, DisplayError, DisplaySurface, Rect};

use super::text::TextCursor;

/// SSD1306 I2C address (0x3C, or 0x3D with SA0 high)
pub const SSD1306_ADDR: u8 = 0x3C;

/// Display dimensions
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// 5x8 glyphs in a 6x8 cell
const FONT: MonoFont<'static> = MonoFont {
    character_spacing: 1,
    ..FONT_5X8
};

/// SSD1306 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Initialization sequence, internal charge pump
const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80,
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14,
    cmd::SET_MEMORY_MODE,
    0x02, // page addressing
    cmd::SET_SEG_REMAP,
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::RESUME_RAM,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: [[u8; WIDTH]; PAGES],
    cursor: TextCursor,
    text_color: BinaryColor,
    initialized: bool,
}

impl<I2C: I2c> Ssd1306<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: [[0; WIDTH]; PAGES],
            cursor: TextCursor::new(FONT.character_size + Size::new(1, 0), WIDTH as u32),
            text_color: BinaryColor::On,
            initialized: false,
        }
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Read a pixel from the framebuffer
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.buffer[y / 8][x] & (1 << (y % 8)) != 0
    }

    async fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[0x00, cmd])
            .await
            .map_err(bus_error)
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        let bit = 1 << (y % 8);
        let byte = &mut self.buffer[y / 8][x];
        if on {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
    }
}

fn bus_error<E: embedded_hal::i2c::Error>(err: E) -> DisplayError {
    match err.kind() {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => DisplayError::NotFound,
        _ => DisplayError::Bus,
    }
}

fn to_binary(color: Color) -> BinaryColor {
    match color {
        Color::Black => BinaryColor::Off,
        Color::White => BinaryColor::On,
    }
}

impl<I2C: I2c> OriginDimensions for Ssd1306<I2C> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<I2C: I2c> DrawTarget for Ssd1306<I2C> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<P>(&mut self, pixels: P) -> Result<(), Self::Error>
    where
        P: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) {
                if x < WIDTH && y < HEIGHT {
                    self.set_pixel(x, y, color.is_on());
                }
            }
        }
        Ok(())
    }
}

impl<I2C: I2c> DisplaySurface for Ssd1306<I2C> {
    async fn init(&mut self) -> Result<(), DisplayError> {
        for &c in INIT_SEQUENCE {
            self.command(c).await?;
        }
        self.initialized = true;
        Ok(())
    }

    fn clear(&mut self) {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let area = Rectangle::new(
            Point::new(i32::from(rect.x), i32::from(rect.y)),
            Size::new(u32::from(rect.width), u32::from(rect.height)),
        );
        let _ = area
            .into_styled(PrimitiveStyle::with_fill(to_binary(color)))
            .draw(self);
    }

    fn set_cursor(&mut self, x: i16, y: i16) {
        self.cursor
            .set_position(Point::new(i32::from(x), i32::from(y)));
    }

    fn set_text_color(&mut self, color: Color) {
        self.text_color = to_binary(color);
    }

    fn print(&mut self, text: &str) {
        let style = MonoTextStyle::new(&FONT, self.text_color);
        let mut utf8 = [0u8; 4];
        for ch in text.chars() {
            if let Some(at) = self.cursor.place(ch) {
                let glyph: &str = ch.encode_utf8(&mut utf8);
                let _ = Text::with_baseline(glyph, at, style, Baseline::Top).draw(self);
            }
        }
    }

    async fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | page as u8).await?;
            self.command(cmd::SET_LOW_COLUMN).await?;
            self.command(cmd::SET_HIGH_COLUMN).await?;

            let mut data = [0u8; WIDTH + 1];
            data[0] = 0x40; // Data mode
            data[1..].copy_from_slice(&self.buffer[page]);
            self.i2c
                .write(self.address, &data)
                .await
                .map_err(bus_error)?;
        }
        Ok(())
    }
}
