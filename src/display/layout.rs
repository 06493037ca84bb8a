/*
 *  src/display/layout.rs
 *
 *  strato - always-on clock and three-day forecast panel
 *  (c) 2023-26 the strato authors
 *
 *  Fixed canvas regions and centered text layout
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

/// Panel canvas dimensions. The layout below is hand-tuned for this
/// one geometry; regions are constants, not computed.
pub const CANVAS_WIDTH: u32 = 240;
pub const CANVAS_HEIGHT: u32 = 320;

/// Base glyph cell at text scale 1. Scaled glyph cells are
/// `GLYPH_CELL_WIDTH * scale` wide and `GLYPH_CELL_HEIGHT * scale`
/// tall; region heights below must cover the scaled cell of the text
/// they hold or stale descender ink survives a redraw.
pub const GLYPH_CELL_WIDTH: u32 = 6;
pub const GLYPH_CELL_HEIGHT: u32 = 10;

/// A fixed rectangle reserved for one piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

/// Weekday header line, scale 3 text.
pub const WEEKDAY_HEADER: Region = Region { x: 0, y: 15, w: CANVAS_WIDTH, h: 30 };

/// Date line, scale 2 text.
pub const DATE_LINE: Region = Region { x: 0, y: 50, w: CANVAS_WIDTH, h: 20 };

/// Time line, scale 4 text.
pub const TIME_LINE: Region = Region { x: 0, y: 105, w: CANVAS_WIDTH, h: 40 };

/// Horizontal rules separating the three bands.
pub const RULE_TOP_Y: i32 = 80;
pub const RULE_MID_Y: i32 = 155;
pub const RULE_X0: i32 = 10;
pub const RULE_X1: i32 = 230;

/// Column header baseline (abbrev weekday / "Today" / abbrev weekday).
pub const COLUMN_HEADER_Y: i32 = 170;

/// Horizontal shifts of the three forecast columns from the canvas
/// center; text centered with these via `centered_x_offset` lands on
/// the column centers (x = 45, 120, 195).
pub const COLUMN_OFFSETS: [i32; 3] = [-75, 0, 75];

/// The three 60x60 icon cells, yesterday/today/tomorrow order.
pub const ICON_CELLS: [Region; 3] = [
    Region { x: 15, y: 192, w: 60, h: 60 },
    Region { x: 90, y: 192, w: 60, h: 60 },
    Region { x: 165, y: 192, w: 60, h: 60 },
];

/// The three temperature cells, one per column center. The cell
/// rectangle covers the centered value, the raised degree mark, and
/// the unit letter so a clear wipes all three before a redraw.
pub const TEMP_CELLS: [Region; 3] = [
    Region { x: 18, y: 258, w: 54, h: 28 },
    Region { x: 93, y: 258, w: 54, h: 28 },
    Region { x: 168, y: 258, w: 54, h: 28 },
];

/// Temperature baselines; the x position comes from centering the
/// value on its column.
pub const TEMP_VALUE_Y: i32 = 265;
pub const TEMP_DEGREE_Y: i32 = 260;
pub const TEMP_UNIT_Y: i32 = 272;

/// Location footer baseline, scale 1 text.
pub const FOOTER_Y: i32 = 300;

/// Cursor x that centers `text` at the given glyph scale on a canvas
/// `canvas_width` wide.
///
/// Results are intentionally not clamped: text wider than the canvas
/// yields a negative cursor and the overflow clips at both edges,
/// which is the accepted behavior for this fixed layout.
pub fn centered_x(text: &str, scale: u32, canvas_width: u32) -> i32 {
    let text_width = text.chars().count() as i32 * (scale * GLYPH_CELL_WIDTH) as i32;
    (canvas_width as i32 - text_width) / 2
}

/// Like `centered_x`, shifted right by `offset` pixels. Used to lay
/// out the three forecast columns symmetrically around a shared
/// center.
pub fn centered_x_offset(text: &str, scale: u32, canvas_width: u32, offset: i32) -> i32 {
    centered_x(text, scale, canvas_width) + offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_text_is_symmetric() {
        for (text, scale) in [("Wednesday", 3), ("07:41 PM", 4), ("x", 1)] {
            let x = centered_x(text, scale, CANVAS_WIDTH);
            let right = x + text.len() as i32 * (scale * GLYPH_CELL_WIDTH) as i32;
            let slack = (CANVAS_WIDTH as i32 - right) - x;
            assert!(slack.abs() <= 1, "{text} at scale {scale}: slack {slack}");
        }
    }

    #[test]
    fn test_known_positions() {
        // 24 chars at scale 1 -> 144 px -> (240-144)/2
        assert_eq!(centered_x("Rapid City, South Dakota", 1, 240), 48);
        // 8 chars at scale 4 -> 192 px
        assert_eq!(centered_x("07:41 PM", 4, 240), 24);
    }

    #[test]
    fn test_overwide_text_goes_negative() {
        let x = centered_x("a string much too long for this canvas", 4, 240);
        assert!(x < 0);
    }

    #[test]
    fn test_offset_shifts_center() {
        let base = centered_x("Mon", 2, 240);
        assert_eq!(centered_x_offset("Mon", 2, 240, -75), base - 75);
        assert_eq!(centered_x_offset("Mon", 2, 240, 75), base + 75);
    }

    #[test]
    fn test_text_regions_cover_their_scaled_glyph_cells() {
        // (region, text scale) pairs; a shorter region leaks
        // descender ink from the previous string on redraw
        for (region, scale) in [(WEEKDAY_HEADER, 3), (DATE_LINE, 2), (TIME_LINE, 4)] {
            assert!(
                region.h >= scale * GLYPH_CELL_HEIGHT,
                "region at y={} is {} tall, scale {} text needs {}",
                region.y,
                region.h,
                scale,
                scale * GLYPH_CELL_HEIGHT
            );
        }
        // temperature cells hold a scale-2 value starting at
        // TEMP_VALUE_Y plus the scale-1 unit letter below it
        for cell in TEMP_CELLS {
            assert!(cell.y <= TEMP_DEGREE_Y);
            assert!(cell.y + cell.h as i32 >= TEMP_VALUE_Y + 2 * GLYPH_CELL_HEIGHT as i32);
            assert!(cell.y + cell.h as i32 >= TEMP_UNIT_Y + GLYPH_CELL_HEIGHT as i32);
        }
    }
}
