/*
 *  src/render.rs
 *
 *  strato - always-on clock and three-day forecast panel
 *  (c) 2023-26 the strato authors
 *
 *  Render scheduling: owns the retained display state and repaints
 *  only the regions whose backing state changed
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

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use log::{debug, warn};

use crate::display::layout::{
    CANVAS_HEIGHT, COLUMN_HEADER_Y, COLUMN_OFFSETS, DATE_LINE, FOOTER_Y, ICON_CELLS, RULE_MID_Y,
    RULE_TOP_Y, RULE_X0, RULE_X1, TEMP_CELLS, TEMP_DEGREE_Y, TEMP_UNIT_Y, TEMP_VALUE_Y, TIME_LINE,
    WEEKDAY_HEADER, centered_x, centered_x_offset,
};
use crate::display::panel::Panel;
use crate::icons::{ICON_HEIGHT, ICON_WIDTH, icon_slice};
use crate::payload::{self, Slot, WeatherBatch};
use crate::timekeeper::{TickEvents, TimeSource, TimeStateTracker, weekday_abbrev};
use crate::transport::{PayloadChannel, PayloadMessage};
use crate::weathercode::WeatherIcon;

const FRAME_COLOR: Rgb565 = Rgb565::CSS_DIM_GRAY;
const RULE_COLOR: Rgb565 = Rgb565::CSS_DIM_GRAY;
const MUTED_TEXT: Rgb565 = Rgb565::CSS_LIGHT_GRAY;

/// Owns the panel and the retained state behind every region. All
/// drawing flows through here; nothing repaints unless the state
/// backing its region changed.
pub struct RenderScheduler<D> {
    panel: Panel<D>,
    tracker: TimeStateTracker,
    temps: Option<WeatherBatch<i32>>,
    codes: Option<WeatherBatch<String>>,
    location_label: String,
}

impl<D> RenderScheduler<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(panel: Panel<D>, location_label: impl Into<String>) -> Self {
        Self {
            panel,
            tracker: TimeStateTracker::new(),
            temps: None,
            codes: None,
            location_label: location_label.into(),
        }
    }

    pub fn panel(&self) -> &Panel<D> {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Panel<D> {
        &mut self.panel
    }

    /// Paint the static chrome: border frame, band separators, the
    /// forecast column headers, and the location footer. Everything
    /// else arrives through `on_tick` and `apply`.
    pub fn initial_layout(&mut self, time: &dyn TimeSource) -> Result<(), D::Error> {
        let width = self.panel.width();
        self.panel.clear(Rgb565::BLACK)?;
        self.panel
            .draw_frame(0, 0, width, CANVAS_HEIGHT, FRAME_COLOR)?;
        self.panel.draw_hline(RULE_X0, RULE_X1, RULE_TOP_Y, RULE_COLOR)?;
        self.panel.draw_hline(RULE_X0, RULE_X1, RULE_MID_Y, RULE_COLOR)?;

        self.draw_column_headers(time)?;

        let footer = self.location_label.clone();
        self.panel.set_text_size(1);
        self.panel.set_text_color(MUTED_TEXT, Some(Rgb565::BLACK));
        self.panel.set_cursor(centered_x(&footer, 1, width), FOOTER_Y);
        self.panel.print(&footer)?;
        Ok(())
    }

    /// One 1 Hz tick: snapshot the clock, diff against the last
    /// rendered state, repaint only what moved.
    pub fn on_tick(&mut self, time: &dyn TimeSource) -> Result<TickEvents, D::Error> {
        let snap = time.snapshot();
        let events = self.tracker.tick(&snap);

        if events.day_changed {
            debug!("day changed, repainting header and date");
            self.draw_weekday_header(weekday_full(time))?;
            self.draw_date_line(&time.format_date())?;
            self.draw_column_headers(time)?;
        }

        if events.time_changed {
            self.draw_time_line(&time.format_time())?;
        }

        Ok(events)
    }

    /// Apply one inbound payload. A payload that fails to parse is
    /// logged and dropped whole; the regions keep their last good
    /// content.
    pub fn apply(&mut self, msg: &PayloadMessage) -> Result<(), D::Error> {
        match msg.channel {
            PayloadChannel::Temperature => match payload::parse_temperatures(&msg.body) {
                Ok(batch) => {
                    debug!(
                        "temperatures {} / {} / {}",
                        batch.yesterday, batch.today, batch.tomorrow
                    );
                    self.temps = Some(batch);
                    self.draw_temperatures()?;
                }
                Err(err) => warn!("rejecting temperature payload: {err}"),
            },
            PayloadChannel::WeatherCode => match payload::parse_codes(&msg.body) {
                Ok(batch) => {
                    self.codes = Some(batch);
                    self.draw_icons()?;
                }
                Err(err) => warn!("rejecting weather code payload: {err}"),
            },
        }
        Ok(())
    }

    fn draw_weekday_header(&mut self, name: &str) -> Result<(), D::Error> {
        let width = self.panel.width();
        self.panel.fill_region(WEEKDAY_HEADER, Rgb565::BLACK)?;
        self.panel.set_text_size(3);
        self.panel.set_text_color(Rgb565::WHITE, Some(Rgb565::BLACK));
        self.panel.set_cursor(centered_x(name, 3, width), WEEKDAY_HEADER.y);
        self.panel.print(name)
    }

    fn draw_date_line(&mut self, date: &str) -> Result<(), D::Error> {
        let width = self.panel.width();
        self.panel.fill_region(DATE_LINE, Rgb565::BLACK)?;
        self.panel.set_text_size(2);
        self.panel.set_text_color(MUTED_TEXT, Some(Rgb565::BLACK));
        self.panel.set_cursor(centered_x(date, 2, width), DATE_LINE.y);
        self.panel.print(date)
    }

    fn draw_time_line(&mut self, hhmm: &str) -> Result<(), D::Error> {
        let width = self.panel.width();
        self.panel.fill_region(TIME_LINE, Rgb565::BLACK)?;
        self.panel.set_text_size(4);
        self.panel.set_text_color(Rgb565::WHITE, Some(Rgb565::BLACK));
        self.panel.set_cursor(centered_x(hhmm, 4, width), TIME_LINE.y);
        self.panel.print(hhmm)
    }

    /// Yesterday's and tomorrow's abbreviated weekday flank a literal
    /// "Today", each centered on its column. Redrawn on day change
    /// since the flanks move.
    fn draw_column_headers(&mut self, time: &dyn TimeSource) -> Result<(), D::Error> {
        let width = self.panel.width();
        let weekday = time.snapshot().weekday;
        let labels = [
            weekday_abbrev(weekday, -1),
            "Today",
            weekday_abbrev(weekday, 1),
        ];
        self.panel.set_text_size(2);
        self.panel.set_text_color(Rgb565::WHITE, Some(Rgb565::BLACK));
        for (offset, label) in COLUMN_OFFSETS.iter().zip(labels) {
            self.panel
                .set_cursor(centered_x_offset(label, 2, width, *offset), COLUMN_HEADER_Y);
            self.panel.print(label)?;
        }
        Ok(())
    }

    /// Repaint the three icon cells from the retained codes. Each cell
    /// is wiped first because glyph blits only set ink bits.
    fn draw_icons(&mut self) -> Result<(), D::Error> {
        let Some(codes) = self.codes.clone() else {
            return Ok(());
        };
        for (slot, cell) in Slot::ALL.iter().zip(ICON_CELLS) {
            let icon = WeatherIcon::for_code(codes.get(*slot));
            debug!("{slot:?}: {}", icon.description());
            self.panel.fill_region(cell, Rgb565::BLACK)?;
            self.panel.draw_bitmap(
                cell.x,
                cell.y,
                icon_slice(icon),
                ICON_WIDTH,
                ICON_HEIGHT,
                Rgb565::WHITE,
            )?;
        }
        Ok(())
    }

    /// Repaint the three temperature cells: value at scale 2 centered
    /// on its column, a small raised degree mark, and the unit letter
    /// below it.
    fn draw_temperatures(&mut self) -> Result<(), D::Error> {
        let Some(temps) = self.temps.clone() else {
            return Ok(());
        };
        let width = self.panel.width();
        for ((slot, cell), offset) in Slot::ALL.iter().zip(TEMP_CELLS).zip(COLUMN_OFFSETS) {
            let value = temps.get(*slot).to_string();
            let value_x = centered_x_offset(&value, 2, width, offset);
            self.panel.fill_region(cell, Rgb565::BLACK)?;

            self.panel.set_text_size(2);
            self.panel.set_text_color(Rgb565::WHITE, Some(Rgb565::BLACK));
            self.panel.set_cursor(value_x, TEMP_VALUE_Y);
            self.panel.print(&value)?;

            // degree mark and unit hang off the last digit
            let mark_x = value_x + value.chars().count() as i32 * 12 + 2;
            self.panel.set_text_size(1);
            self.panel.set_text_color(Rgb565::WHITE, None);
            self.panel.set_cursor(mark_x, TEMP_DEGREE_Y);
            self.panel.print("o")?;
            self.panel.set_text_color(MUTED_TEXT, None);
            self.panel.set_cursor(mark_x, TEMP_UNIT_Y);
            self.panel.print("F")?;
        }
        Ok(())
    }
}

/// Full weekday name for the snapshot's current day.
fn weekday_full(time: &dyn TimeSource) -> &'static str {
    crate::timekeeper::weekday_name(time.snapshot().weekday, 0)
}
