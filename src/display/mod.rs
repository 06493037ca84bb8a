/*
 *  src/display/mod.rs
 *
 *  strato - always-on clock and three-day forecast panel
 *  (c) 2023-26 the strato authors
 *
 *  Display subsystem: driver abstraction, framebuffer, layout, and
 *  the drawing surface consumed by the render scheduler
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

pub mod drivers;
pub mod error;
pub mod framebuffer;
pub mod layout;
pub mod panel;
pub mod traits;

pub use drivers::MockDriver;
pub use error::DisplayError;
pub use panel::Panel;
pub use traits::{DisplayCapabilities, DisplayDriver};
