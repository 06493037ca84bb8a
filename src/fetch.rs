/*
 *  src/fetch.rs
 *
 *  strato - always-on clock and three-day forecast panel
 *  (c) 2023-26 the strato authors
 *
 *  Daily weather fetch scheduling
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

use log::info;

use crate::timekeeper::TimeSnapshot;

/// Names of the two upstream request events, one per payload channel.
pub const EVENT_TEMPERATURE: &str = "getTemp";
pub const EVENT_WEATHER_CODE: &str = "weatherCode";

/// Outbound side of the weather pipeline. Publishing an event asks the
/// upstream integration to post fresh payloads back on the inbound
/// channels; replies are asynchronous and may never arrive.
pub trait RequestPublisher {
    fn publish(&self, event: &str);
}

/// Fires the pair of fetch events once at startup and once per day at
/// local midnight.
///
/// The midnight check is level-triggered on the 00:00:00 snapshot and
/// latched on the day of month, so a duplicate tick inside the same
/// second (or a skipped one) cannot double-fire or drop a day.
#[derive(Debug, Default)]
pub struct FetchScheduler {
    fired_on_day: Option<u32>,
}

impl FetchScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish both request events immediately.
    pub fn request_now<P: RequestPublisher + ?Sized>(&mut self, publisher: &P) {
        info!("requesting weather refresh");
        publisher.publish(EVENT_TEMPERATURE);
        publisher.publish(EVENT_WEATHER_CODE);
    }

    /// Drive the midnight schedule from the per-second tick.
    /// Returns true when a fetch was published.
    pub fn on_tick<P: RequestPublisher + ?Sized>(
        &mut self,
        snap: &TimeSnapshot,
        publisher: &P,
    ) -> bool {
        let at_midnight = snap.hour == 0 && snap.minute == 0 && snap.second == 0;
        if at_midnight && self.fired_on_day != Some(snap.day) {
            self.fired_on_day = Some(snap.day);
            self.request_now(publisher);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingPublisher {
        events: Mutex<Vec<String>>,
    }

    impl RequestPublisher for RecordingPublisher {
        fn publish(&self, event: &str) {
            self.events.lock().unwrap().push(event.to_string());
        }
    }

    fn snap(day: u32, hour: u32, minute: u32, second: u32) -> TimeSnapshot {
        TimeSnapshot {
            day,
            hour,
            minute,
            second,
            weekday: 1,
        }
    }

    #[test]
    fn test_request_now_publishes_both_events() {
        let publisher = RecordingPublisher::default();
        let mut scheduler = FetchScheduler::new();
        scheduler.request_now(&publisher);
        assert_eq!(
            *publisher.events.lock().unwrap(),
            vec![EVENT_TEMPERATURE.to_string(), EVENT_WEATHER_CODE.to_string()]
        );
    }

    #[test]
    fn test_fires_once_per_midnight() {
        let publisher = RecordingPublisher::default();
        let mut scheduler = FetchScheduler::new();

        // a day and a bit of 1 Hz ticks crossing two midnights
        let mut fired = 0;
        for tick in 0..(26 * 3600u32) {
            let day = 16 + tick / 86_400;
            let hour = (tick % 86_400) / 3600;
            let minute = (tick % 3600) / 60;
            let second = tick % 60;
            if scheduler.on_tick(&snap(day, hour, minute, second), &publisher) {
                fired += 1;
            }
        }
        assert_eq!(fired, 2); // tick 0 (00:00:00 day 16) and midnight day 17
        assert_eq!(publisher.events.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_duplicate_midnight_tick_does_not_double_fire() {
        let publisher = RecordingPublisher::default();
        let mut scheduler = FetchScheduler::new();
        assert!(scheduler.on_tick(&snap(17, 0, 0, 0), &publisher));
        assert!(!scheduler.on_tick(&snap(17, 0, 0, 0), &publisher));
        assert!(!scheduler.on_tick(&snap(17, 0, 0, 1), &publisher));
    }

    #[test]
    fn test_non_midnight_never_fires() {
        let publisher = RecordingPublisher::default();
        let mut scheduler = FetchScheduler::new();
        assert!(!scheduler.on_tick(&snap(17, 1, 0, 0), &publisher));
        assert!(!scheduler.on_tick(&snap(17, 0, 1, 0), &publisher));
        assert!(!scheduler.on_tick(&snap(17, 0, 0, 30), &publisher));
        assert!(publisher.events.lock().unwrap().is_empty());
    }
}
