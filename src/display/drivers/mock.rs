/*
 *  src/display/drivers/mock.rs
 *
 *  strato - always-on clock and three-day forecast panel
 *  (c) 2023-26 the strato authors
 *
 *  Mock display driver for tests and headless operation
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

use embedded_graphics::geometry::Size;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::display::error::DisplayError;
use crate::display::framebuffer::FrameBuffer;
use crate::display::traits::{DisplayCapabilities, DisplayDriver};

/// Mock display driver.
///
/// Simulates the 240x320 panel without hardware: unit tests inspect
/// the framebuffer and the operation counters, and the binary runs
/// headless on it (optionally dumping frames as PPM for eyeballing).
#[derive(Debug, Clone)]
pub struct MockDriver {
    framebuffer: FrameBuffer<Rgb565>,
    capabilities: DisplayCapabilities,
    state: Arc<Mutex<MockDriverState>>,
}

/// Internal state, shared for inspection in tests.
#[derive(Debug, Default)]
pub struct MockDriverState {
    /// Number of times init() was called
    pub init_count: usize,

    /// Number of times flush() was called
    pub flush_count: usize,

    /// Number of times clear() was called
    pub clear_count: usize,

    /// Whether the driver is initialized
    pub is_initialized: bool,

    /// Simulate failures (for error testing)
    pub simulate_init_failure: bool,
    pub simulate_flush_failure: bool,
}

impl MockDriver {
    pub fn new(width: u32, height: u32) -> Self {
        let capabilities = DisplayCapabilities {
            width,
            height,
            max_fps: 30,
        };
        Self {
            framebuffer: FrameBuffer::new(width, height, Rgb565::BLACK),
            capabilities,
            state: Arc::new(Mutex::new(MockDriverState::default())),
        }
    }

    /// Get pixel at position for testing
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb565> {
        self.framebuffer.pixel(x, y)
    }

    /// Count pixels that differ from the cleared (black) state
    pub fn count_lit_pixels(&self) -> usize {
        self.framebuffer
            .as_slice()
            .iter()
            .filter(|&&p| p != Rgb565::BLACK)
            .count()
    }

    /// Reference to state for inspection in tests
    pub fn state(&self) -> Arc<Mutex<MockDriverState>> {
        Arc::clone(&self.state)
    }

    /// Save the framebuffer as a binary PPM (for visual debugging of
    /// headless runs).
    pub fn dump_ppm(&self, path: &Path) -> Result<(), DisplayError> {
        use std::io::Write;

        let mut out = Vec::with_capacity(self.framebuffer.as_slice().len() * 3 + 32);
        write!(
            out,
            "P6\n{} {}\n255\n",
            self.capabilities.width, self.capabilities.height
        )?;
        for &px in self.framebuffer.as_slice() {
            // expand 5/6/5 to 8-bit channels
            out.push((px.r() << 3) | (px.r() >> 2));
            out.push((px.g() << 2) | (px.g() >> 4));
            out.push((px.b() << 3) | (px.b() >> 2));
        }
        std::fs::write(path, out)?;
        Ok(())
    }
}

impl DisplayDriver for MockDriver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        let mut state = self.state.lock().unwrap();

        if state.simulate_init_failure {
            return Err(DisplayError::InitializationFailed("simulated".to_string()));
        }

        state.init_count += 1;
        state.is_initialized = true;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        let mut state = self.state.lock().unwrap();

        if state.simulate_flush_failure {
            return Err(DisplayError::Other("simulated flush failure".to_string()));
        }

        state.flush_count += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        {
            let mut state = self.state.lock().unwrap();
            state.clear_count += 1;
        } // release before flush re-locks

        self.framebuffer.clear_color(Rgb565::BLACK);
        self.flush()
    }
}

impl DrawTarget for MockDriver {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.framebuffer.draw_iter(pixels)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.framebuffer.clear(color)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.framebuffer.fill_contiguous(area, colors)
    }
}

impl OriginDimensions for MockDriver {
    fn size(&self) -> Size {
        Size::new(self.capabilities.width, self.capabilities.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    #[test]
    fn test_mock_driver_creation() {
        let driver = MockDriver::new(240, 320);
        assert_eq!(driver.capabilities().width, 240);
        assert_eq!(driver.capabilities().height, 320);
        assert_eq!(driver.count_lit_pixels(), 0);
    }

    #[test]
    fn test_mock_driver_init() {
        let mut driver = MockDriver::new(240, 320);

        let state = driver.state();
        assert_eq!(state.lock().unwrap().init_count, 0);
        assert!(!state.lock().unwrap().is_initialized);

        driver.init().unwrap();

        assert_eq!(state.lock().unwrap().init_count, 1);
        assert!(state.lock().unwrap().is_initialized);
    }

    #[test]
    fn test_mock_driver_drawing_and_clear() {
        let mut driver = MockDriver::new(240, 320);

        Line::new(Point::new(0, 0), Point::new(10, 10))
            .into_styled(PrimitiveStyle::with_stroke(Rgb565::WHITE, 1))
            .draw(&mut driver)
            .unwrap();

        assert!(driver.count_lit_pixels() > 0);
        assert_eq!(driver.pixel(0, 0), Some(Rgb565::WHITE));

        // DisplayDriver::clear, not DrawTarget::clear
        DisplayDriver::clear(&mut driver).unwrap();

        assert_eq!(driver.count_lit_pixels(), 0);
        assert_eq!(driver.state().lock().unwrap().clear_count, 1);
    }

    #[test]
    fn test_mock_driver_simulated_failure() {
        let mut driver = MockDriver::new(240, 320);

        driver.state().lock().unwrap().simulate_flush_failure = true;
        assert!(driver.flush().is_err());

        driver.state().lock().unwrap().simulate_flush_failure = false;
        assert!(driver.flush().is_ok());
    }
}
