/*
 *  src/display/framebuffer.rs
 *
 *  strato - always-on clock and three-day forecast panel
 *  (c) 2023-26 the strato authors
 *
 *  Runtime-sized framebuffer for embedded-graphics
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

use core::convert::Infallible;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::PixelColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// A runtime-sized framebuffer for embedded-graphics.
#[derive(Debug, Clone)]
pub struct FrameBuffer<C: PixelColor> {
    buf: Vec<C>,
    w: usize,
    h: usize,
}

impl<C: PixelColor + Clone> FrameBuffer<C> {
    pub fn new(width: u32, height: u32, fill: C) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self { buf: vec![fill; w * h], w, h }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Immutable raw access (useful for pushing regions to the panel)
    pub fn as_slice(&self) -> &[C] {
        &self.buf
    }

    /// Mutable raw access
    pub fn as_mut_slice(&mut self) -> &mut [C] {
        &mut self.buf
    }

    /// Clear to a color
    pub fn clear_color(&mut self, color: C) {
        self.buf.fill(color);
    }

    /// Read one pixel; `None` when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<C> {
        self.idx(Point::new(x as i32, y as i32)).map(|i| self.buf[i])
    }

    /// Map (x,y) to linear index; returns None if out of bounds
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 {
            let (x, y) = (p.x as usize, p.y as usize);
            if x < self.w && y < self.h {
                return Some(y * self.w + x);
            }
        }
        None
    }
}

impl<C: PixelColor> OriginDimensions for FrameBuffer<C> {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl<C: PixelColor + Clone> DrawTarget for FrameBuffer<C> {
    type Color = C;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.clear_color(color);
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // fast path for the rectangular fills the primitives use;
        // areas hanging off the canvas fall back to draw_iter
        let Size { width, height } = area.size;
        if width == 0 || height == 0 {
            return Ok(());
        }
        if area.top_left.x < 0
            || area.top_left.y < 0
            || area.top_left.x as usize + width as usize > self.w
            || area.top_left.y as usize + height as usize > self.h
        {
            let points = area.points();
            return self.draw_iter(
                points
                    .zip(colors)
                    .map(|(p, c)| Pixel(p, c)),
            );
        }

        let (x0, y0) = (area.top_left.x as usize, area.top_left.y as usize);
        let mut it = colors.into_iter();
        for row in 0..height as usize {
            let base = (y0 + row) * self.w + x0;
            for col in 0..width as usize {
                match it.next() {
                    Some(c) => self.buf[base + col] = c,
                    None => return Ok(()),
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn test_new_buffer_is_filled() {
        let fb = FrameBuffer::new(8, 4, Rgb565::BLACK);
        assert_eq!(fb.as_slice().len(), 32);
        assert!(fb.as_slice().iter().all(|&c| c == Rgb565::BLACK));
    }

    #[test]
    fn test_rect_fill_and_oob_clipping() {
        let mut fb = FrameBuffer::new(16, 16, Rgb565::BLACK);
        Rectangle::new(Point::new(12, 12), Size::new(8, 8))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::WHITE))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.pixel(13, 13), Some(Rgb565::WHITE));
        assert_eq!(fb.pixel(11, 11), Some(Rgb565::BLACK));
        assert_eq!(fb.pixel(16, 16), None);
    }

    #[test]
    fn test_clear_color() {
        let mut fb = FrameBuffer::new(4, 4, Rgb565::BLACK);
        fb.clear_color(Rgb565::WHITE);
        assert!(fb.as_slice().iter().all(|&c| c == Rgb565::WHITE));
    }
}
