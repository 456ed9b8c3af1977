//! Text cursor with wrap-at-right-edge
//!
//! Characters advance one cell at a time. A character that would cross
//! the right edge moves to the start of the next line first, and `\n`
//! forces a new line. Nothing clips at the bottom; glyphs below the panel
//! are simply not drawn.

use embedded_graphics::prelude::{Point, Size};

/// Text cursor over a fixed-width panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextCursor {
    position: Point,
    cell: Size,
    width: i32,
}

impl TextCursor {
    /// `cell` is the advance per character and per line
    pub fn new(cell: Size, width: u32) -> Self {
        Self {
            position: Point::zero(),
            cell,
            width: width as i32,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Place `ch` and advance; returns where to draw it, `None` for `\n`
    pub fn place(&mut self, ch: char) -> Option<Point> {
        let advance = self.cell.width as i32;
        match ch {
            '\n' => {
                self.newline();
                None
            }
            '\r' => None,
            _ => {
                if self.position.x + advance > self.width {
                    self.newline();
                }
                let at = self.position;
                self.position.x += advance;
                Some(at)
            }
        }
    }

    fn newline(&mut self) {
        self.position = Point::new(0, self.position.y + self.cell.height as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor() -> TextCursor {
        TextCursor::new(Size::new(6, 8), 128)
    }

    #[test]
    fn test_advances_one_cell() {
        let mut c = cursor();
        c.set_position(Point::new(1, 1));
        assert_eq!(c.place('A'), Some(Point::new(1, 1)));
        assert_eq!(c.place('B'), Some(Point::new(7, 1)));
        assert_eq!(c.position(), Point::new(13, 1));
    }

    #[test]
    fn test_wraps_before_right_edge() {
        let mut c = cursor();
        c.set_position(Point::new(0, 12));
        // 21 cells of 6px fit in 128px
        for i in 0..21 {
            assert_eq!(c.place('x'), Some(Point::new(i * 6, 12)));
        }
        assert_eq!(c.place('y'), Some(Point::new(0, 20)));
    }

    #[test]
    fn test_newline() {
        let mut c = cursor();
        c.set_position(Point::new(30, 12));
        assert_eq!(c.place('\n'), None);
        assert_eq!(c.place('z'), Some(Point::new(0, 20)));
    }
}
