/*
 *  src/display/panel.rs
 *
 *  strato - always-on clock and three-day forecast panel
 *  (c) 2023-26 the strato authors
 *
 *  Drawing surface wrapping a DrawTarget with the small set of
 *  operations the render scheduler needs: rect fills, 1-bpp glyph
 *  blits, and cursor-addressed scaled text
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::display::framebuffer::FrameBuffer;
use crate::display::layout::{GLYPH_CELL_HEIGHT, GLYPH_CELL_WIDTH, Region};

/// The drawing collaborator consumed by the render scheduler.
///
/// Wraps any `Rgb565` draw target (hardware framebuffer, mock driver)
/// and carries the cursor/text state the scheduler addresses it with.
pub struct Panel<D> {
    target: D,
    cursor: Point,
    scale: u32,
    fg: Rgb565,
    bg: Option<Rgb565>,
}

impl<D> Panel<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            cursor: Point::zero(),
            scale: 1,
            fg: Rgb565::WHITE,
            bg: Some(Rgb565::BLACK),
        }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.target.bounding_box().size.width
    }

    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    pub fn set_text_size(&mut self, scale: u32) {
        self.scale = scale.max(1);
    }

    /// Foreground and optional background. With a background set,
    /// `print` wipes each glyph cell before drawing, so text regions
    /// self-clear on overwrite.
    pub fn set_text_color(&mut self, fg: Rgb565, bg: Option<Rgb565>) {
        self.fg = fg;
        self.bg = bg;
    }

    pub fn clear(&mut self, color: Rgb565) -> Result<(), D::Error> {
        self.target.clear(color)
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb565) -> Result<(), D::Error> {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
    }

    pub fn fill_region(&mut self, region: Region, color: Rgb565) -> Result<(), D::Error> {
        self.fill_rect(region.x, region.y, region.w, region.h, color)
    }

    /// One-pixel rectangle outline.
    pub fn draw_frame(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb565) -> Result<(), D::Error> {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target)
    }

    pub fn draw_hline(&mut self, x0: i32, x1: i32, y: i32, color: Rgb565) -> Result<(), D::Error> {
        self.fill_rect(x0, y, (x1 - x0).max(0) as u32, 1, color)
    }

    /// Blit a 1-bpp bitmap, set bits in `color`, clear bits left
    /// untouched. Rows are padded to a byte boundary, MSB first. The
    /// caller clears the cell first when a full wipe is needed.
    pub fn draw_bitmap(
        &mut self,
        x: i32,
        y: i32,
        bitmap: &[u8],
        w: u32,
        h: u32,
        color: Rgb565,
    ) -> Result<(), D::Error> {
        let row_bytes = ((w as usize) + 7) / 8;
        let pixels = (0..h as usize).flat_map(move |row| {
            (0..w as usize).filter_map(move |col| {
                let byte = bitmap[row * row_bytes + col / 8];
                if byte & (0x80 >> (col % 8)) != 0 {
                    Some(Pixel(Point::new(x + col as i32, y + row as i32), color))
                } else {
                    None
                }
            })
        });
        self.target.draw_iter(pixels)
    }

    /// Print `text` at the cursor using the current scale and colors,
    /// advancing the cursor. Glyphs are the 6x10 base raster with each
    /// pixel replicated `scale` times, so every glyph occupies a fixed
    /// `6 * scale` by `10 * scale` cell and layout matches
    /// `layout::centered_x`.
    pub fn print(&mut self, text: &str) -> Result<(), D::Error> {
        let scale = self.scale;
        let cell_w = (GLYPH_CELL_WIDTH * scale) as i32;
        let cell_h = GLYPH_CELL_HEIGHT * scale;
        let style = MonoTextStyle::new(&FONT_6X10, self.fg);

        let mut x = self.cursor.x;
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            if let Some(bg) = self.bg {
                self.fill_rect(x, self.cursor.y, cell_w as u32, cell_h, bg)?;
            }
            if scale == 1 {
                Text::with_baseline(
                    ch.encode_utf8(&mut buf),
                    Point::new(x, self.cursor.y),
                    style,
                    Baseline::Top,
                )
                .draw(&mut self.target)?;
            } else {
                self.blit_scaled_glyph(ch, x, self.cursor.y, scale)?;
            }
            x += cell_w;
        }
        self.cursor.x = x;
        Ok(())
    }

    /// Rasterize one glyph at the base size, then replicate every lit
    /// pixel as a `scale` x `scale` block.
    fn blit_scaled_glyph(&mut self, ch: char, x: i32, y: i32, scale: u32) -> Result<(), D::Error> {
        let mut raster = FrameBuffer::new(GLYPH_CELL_WIDTH, GLYPH_CELL_HEIGHT, Rgb565::BLACK);
        let style = MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE);
        let mut buf = [0u8; 4];
        // the raster target is infallible
        let _ = Text::with_baseline(
            ch.encode_utf8(&mut buf),
            Point::zero(),
            style,
            Baseline::Top,
        )
        .draw(&mut raster);

        let s = scale as i32;
        for row in 0..GLYPH_CELL_HEIGHT {
            for col in 0..GLYPH_CELL_WIDTH {
                if raster.pixel(col, row) == Some(Rgb565::WHITE) {
                    self.fill_rect(x + col as i32 * s, y + row as i32 * s, scale, scale, self.fg)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::framebuffer::FrameBuffer;

    fn panel() -> Panel<FrameBuffer<Rgb565>> {
        Panel::new(FrameBuffer::new(240, 320, Rgb565::BLACK))
    }

    fn ink_in(fb: &FrameBuffer<Rgb565>, x0: u32, y0: u32, w: u32, h: u32) -> usize {
        let mut n = 0;
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                if fb.pixel(x, y) != Some(Rgb565::BLACK) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_fill_rect() {
        let mut p = panel();
        p.fill_rect(10, 10, 5, 5, Rgb565::WHITE).unwrap();
        assert_eq!(ink_in(p.target(), 10, 10, 5, 5), 25);
        assert_eq!(ink_in(p.target(), 0, 0, 10, 10), 0);
    }

    #[test]
    fn test_print_advances_cursor_by_cell_width() {
        let mut p = panel();
        p.set_cursor(12, 40);
        p.set_text_size(2);
        p.print("68").unwrap();
        // two glyphs at 12 px cells
        p.print("F").unwrap();
        assert!(ink_in(p.target(), 12, 40, 12, 20) > 0);
        assert!(ink_in(p.target(), 24, 40, 12, 20) > 0);
        assert!(ink_in(p.target(), 36, 40, 12, 20) > 0);
    }

    #[test]
    fn test_scaled_glyphs_grow_with_scale() {
        let mut base = panel();
        base.set_cursor(0, 0);
        base.print("8").unwrap();
        let n1 = ink_in(base.target(), 0, 0, 6, 10);
        assert!(n1 > 0);

        let mut big = panel();
        big.set_cursor(0, 0);
        big.set_text_size(3);
        big.print("8").unwrap();
        let n3 = ink_in(big.target(), 0, 0, 18, 30);
        // pixel replication: every base pixel becomes a 3x3 block
        assert_eq!(n3, 9 * n1);
        // and the glyph really extends past the base raster height
        assert!(ink_in(big.target(), 0, 15, 18, 15) > 0);
    }

    #[test]
    fn test_print_background_wipes_cell() {
        let mut p = panel();
        p.set_cursor(0, 0);
        p.set_text_size(1);
        p.set_text_color(Rgb565::WHITE, Some(Rgb565::BLACK));
        p.print("8").unwrap();
        let first = ink_in(p.target(), 0, 0, 6, 10);
        assert!(first > 0);
        // overwriting with a space leaves an empty cell
        p.set_cursor(0, 0);
        p.print(" ").unwrap();
        assert_eq!(ink_in(p.target(), 0, 0, 6, 10), 0);
    }

    #[test]
    fn test_bitmap_blit_is_transparent_on_clear_bits() {
        let mut p = panel();
        // 8x2 bitmap: top row solid, bottom row empty
        let bmp = [0xFFu8, 0x00];
        p.fill_rect(0, 0, 8, 2, Rgb565::CSS_DARK_RED).unwrap();
        p.draw_bitmap(0, 0, &bmp, 8, 2, Rgb565::WHITE).unwrap();
        assert_eq!(p.target().pixel(3, 0), Some(Rgb565::WHITE));
        // clear bit did not overwrite the underlying pixel
        assert_eq!(p.target().pixel(3, 1), Some(Rgb565::CSS_DARK_RED));
    }
}
