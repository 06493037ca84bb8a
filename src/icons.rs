/*
 *  src/icons.rs
 *
 *  strato - always-on clock and three-day forecast panel
 *  (c) 2023-26 the strato authors
 *
 *  Weather icon bitmap assets
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

use crate::weathercode::WeatherIcon;

/// Icon cell dimensions (all glyphs share them).
pub const ICON_WIDTH: u32 = 60;
pub const ICON_HEIGHT: u32 = 60;

/// Seven 60x60 glyphs in a vertical strip, monochrome, rows padded to
/// a byte boundary, MSB first. Glyph order follows the `WeatherIcon`
/// discriminants: blank, clear, cloudy, fog, rain, winter, thunderstorm.
const ICON_STRIP: &[u8] = include_bytes!("../data/weather_60x420.bin");

/// Get a slice for a specific glyph from a binary strip.
pub fn glyph_slice(raw: &'static [u8], index: usize, w: u32, h: u32) -> &'static [u8] {
    let byte_size = ((w as usize + 7) / 8) * h as usize;
    let start_idx = index * byte_size;
    let end_idx = start_idx + byte_size;
    &raw[start_idx..end_idx]
}

/// Bitmap data for one weather icon.
pub fn icon_slice(icon: WeatherIcon) -> &'static [u8] {
    glyph_slice(ICON_STRIP, icon as usize, ICON_WIDTH, ICON_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BYTES_PER_ICON: usize = 8 * 60; // ceil(60/8) bytes per row

    #[test]
    fn test_strip_holds_seven_icons() {
        assert_eq!(ICON_STRIP.len(), 7 * BYTES_PER_ICON);
    }

    #[test]
    fn test_icon_slices_are_distinct() {
        assert_eq!(icon_slice(WeatherIcon::Clear).len(), BYTES_PER_ICON);
        // the blank fallback really is blank
        assert!(icon_slice(WeatherIcon::Unknown).iter().all(|&b| b == 0));
        // every real glyph has ink
        for icon in [
            WeatherIcon::Clear,
            WeatherIcon::Cloudy,
            WeatherIcon::Fog,
            WeatherIcon::Rain,
            WeatherIcon::WinterPrecip,
            WeatherIcon::Thunderstorm,
        ] {
            assert!(icon_slice(icon).iter().any(|&b| b != 0), "{icon:?} is empty");
        }
    }
}
