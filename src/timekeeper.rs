/*
 *  src/timekeeper.rs
 *
 *  strato - always-on clock and three-day forecast panel
 *  (c) 2023-26 the strato authors
 *
 *  Wall-clock snapshots and change tracking against the last render
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

use chrono::{Datelike, FixedOffset, Timelike, Utc};

/// Fixed panel timezone, hours west of UTC. The panel is single-site;
/// there is deliberately no timezone configuration.
pub const UTC_OFFSET_HOURS_WEST: i32 = 7;

/// Wall-clock state captured once per tick. Immutable after capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSnapshot {
    /// Day of month, 1-31
    pub day: u32,
    /// Hour of day, 0-23
    pub hour: u32,
    /// Minute of hour, 0-59
    pub minute: u32,
    /// Second of minute, 0-59
    pub second: u32,
    /// Day of week, 1-7 with Sunday = 1
    pub weekday: u32,
}

/// Clock collaborator. The render path only ever sees this trait so
/// tests can drive it with a scripted clock.
pub trait TimeSource {
    fn snapshot(&self) -> TimeSnapshot;

    /// Locale-style date, "Month D, Year".
    fn format_date(&self) -> String;

    /// Locale-style time, "HH:MM AM/PM".
    fn format_time(&self) -> String;
}

/// System clock with the fixed UTC offset applied.
pub struct SystemTimeSource {
    offset: FixedOffset,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        let offset = FixedOffset::west_opt(UTC_OFFSET_HOURS_WEST * 3600)
            .expect("fixed UTC offset is in range");
        Self { offset }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn snapshot(&self) -> TimeSnapshot {
        let now = Utc::now().with_timezone(&self.offset);
        TimeSnapshot {
            day: now.day(),
            hour: now.hour(),
            minute: now.minute(),
            second: now.second(),
            weekday: now.weekday().number_from_sunday(),
        }
    }

    fn format_date(&self) -> String {
        Utc::now()
            .with_timezone(&self.offset)
            .format("%B %-d, %Y")
            .to_string()
    }

    fn format_time(&self) -> String {
        Utc::now()
            .with_timezone(&self.offset)
            .format("%I:%M %p")
            .to_string()
    }
}

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Full weekday name for `weekday` (1-7, Sunday = 1) shifted by
/// `offset` days, wrapping across the week.
pub fn weekday_name(weekday: u32, offset: i32) -> &'static str {
    let idx = (weekday as i32 + offset - 1).rem_euclid(7);
    WEEKDAY_NAMES[idx as usize]
}

/// Three-letter weekday abbreviation, same shift semantics.
pub fn weekday_abbrev(weekday: u32, offset: i32) -> &'static str {
    &weekday_name(weekday, offset)[..3]
}

/// Events raised by one tick of the tracker. Both may be set on the
/// same tick (midnight rollover, and the very first tick).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub day_changed: bool,
    pub time_changed: bool,
}

/// Tracks the last-rendered day/hour/minute and reports transitions.
///
/// The three watched fields start unset so the first tick always
/// reports both events and paints the full date and time.
#[derive(Debug, Default)]
pub struct TimeStateTracker {
    last_day: Option<u32>,
    last_hour: Option<u32>,
    last_minute: Option<u32>,
}

impl TimeStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare a fresh snapshot against the last-rendered state and
    /// advance it. Fields that did not change raise no event, so the
    /// caller never repaints an unchanged region.
    pub fn tick(&mut self, snap: &TimeSnapshot) -> TickEvents {
        let mut events = TickEvents::default();

        if self.last_day != Some(snap.day) {
            self.last_day = Some(snap.day);
            events.day_changed = true;
        }

        if self.last_hour != Some(snap.hour) || self.last_minute != Some(snap.minute) {
            self.last_hour = Some(snap.hour);
            self.last_minute = Some(snap.minute);
            events.time_changed = true;
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(day: u32, hour: u32, minute: u32, second: u32) -> TimeSnapshot {
        TimeSnapshot {
            day,
            hour,
            minute,
            second,
            weekday: 1 + (day - 1) % 7,
        }
    }

    #[test]
    fn test_first_tick_fires_both_events() {
        let mut tracker = TimeStateTracker::new();
        let events = tracker.tick(&snap(16, 9, 41, 3));
        assert!(events.day_changed);
        assert!(events.time_changed);
    }

    #[test]
    fn test_unchanged_fields_raise_nothing() {
        let mut tracker = TimeStateTracker::new();
        tracker.tick(&snap(16, 9, 41, 3));
        // same minute, seconds advancing
        for second in 4..60 {
            assert_eq!(tracker.tick(&snap(16, 9, 41, second)), TickEvents::default());
        }
    }

    #[test]
    fn test_minute_rollover_fires_time_only() {
        let mut tracker = TimeStateTracker::new();
        tracker.tick(&snap(16, 9, 41, 59));
        let events = tracker.tick(&snap(16, 9, 42, 0));
        assert!(!events.day_changed);
        assert!(events.time_changed);
    }

    #[test]
    fn test_midnight_fires_both() {
        let mut tracker = TimeStateTracker::new();
        tracker.tick(&snap(16, 23, 59, 59));
        let events = tracker.tick(&snap(17, 0, 0, 0));
        assert!(events.day_changed);
        assert!(events.time_changed);
    }

    #[test]
    fn test_day_changed_once_per_transition() {
        let mut tracker = TimeStateTracker::new();
        let mut day_events = 0;
        // one simulated hour either side of midnight at 1 Hz
        for tick in 0..7200u32 {
            let day = if tick < 3600 { 16 } else { 17 };
            let hour = if tick < 3600 { 23 } else { 0 };
            let minute = (tick % 3600) / 60;
            let second = tick % 60;
            if tracker.tick(&snap(day, hour, minute, second)).day_changed {
                day_events += 1;
            }
        }
        // first tick (sentinel) plus the midnight transition
        assert_eq!(day_events, 2);
    }

    #[test]
    fn test_weekday_wrap() {
        // Sunday (1) with -1 offset is Saturday, +1 is Monday
        assert_eq!(weekday_name(1, -1), "Saturday");
        assert_eq!(weekday_name(1, 0), "Sunday");
        assert_eq!(weekday_name(1, 1), "Monday");
        assert_eq!(weekday_abbrev(7, 1), "Sun");
        assert_eq!(weekday_abbrev(4, -1), "Tue");
    }
}
