/*
 *  src/transport.rs
 *
 *  strato - always-on clock and three-day forecast panel
 *  (c) 2023-26 the strato authors
 *
 *  Inbound payload channels and outbound request publishing
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

use log::{debug, info};
use tokio::sync::mpsc;

use crate::fetch::RequestPublisher;

/// The two inbound webhook subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadChannel {
    Temperature,
    WeatherCode,
}

/// A raw payload as delivered, body unparsed. Parsing happens on the
/// render task so a malformed body can be rejected atomically there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadMessage {
    pub channel: PayloadChannel,
    pub body: String,
}

impl PayloadMessage {
    pub fn temperature(body: impl Into<String>) -> Self {
        Self {
            channel: PayloadChannel::Temperature,
            body: body.into(),
        }
    }

    pub fn weather_code(body: impl Into<String>) -> Self {
        Self {
            channel: PayloadChannel::WeatherCode,
            body: body.into(),
        }
    }
}

pub type PayloadSender = mpsc::UnboundedSender<PayloadMessage>;
pub type PayloadReceiver = mpsc::UnboundedReceiver<PayloadMessage>;

/// Queue connecting payload producers to the render loop. Unbounded is
/// fine here: producers post at most a handful of messages per day and
/// the loop drains fully every second.
pub fn payload_queue() -> (PayloadSender, PayloadReceiver) {
    mpsc::unbounded_channel()
}

/// Publisher that only logs the outbound events. Stands in for the
/// real webhook integration when running headless or under test.
#[derive(Debug, Clone, Default)]
pub struct LogPublisher;

impl RequestPublisher for LogPublisher {
    fn publish(&self, event: &str) {
        info!("publish event {event:?}");
    }
}

/// Feed a canned pair of payloads after a short delay, simulating the
/// webhook round trip. Used by the demo mode.
pub fn spawn_demo_feeder(tx: PayloadSender) {
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_secs(2)).await;
        debug!("demo feeder posting canned payloads");
        let _ = tx.send(PayloadMessage::temperature("67.9~72.4~75.0"));
        let _ = tx.send(PayloadMessage::weather_code("1000~4200~8000"));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_preserves_order() {
        let (tx, mut rx) = payload_queue();
        tx.send(PayloadMessage::temperature("68~72~75")).unwrap();
        tx.send(PayloadMessage::weather_code("1000~4000~8000")).unwrap();

        let first = rx.try_recv().unwrap();
        assert_eq!(first.channel, PayloadChannel::Temperature);
        assert_eq!(first.body, "68~72~75");
        let second = rx.try_recv().unwrap();
        assert_eq!(second.channel, PayloadChannel::WeatherCode);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_demo_feeder_posts_both_channels() {
        tokio::time::pause();
        let (tx, mut rx) = payload_queue();
        spawn_demo_feeder(tx);
        tokio::time::advance(std::time::Duration::from_secs(3)).await;

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.channel, PayloadChannel::Temperature);
        assert_eq!(second.channel, PayloadChannel::WeatherCode);
    }
}
