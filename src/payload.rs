/*
 *  src/payload.rs
 *
 *  strato - always-on clock and three-day forecast panel
 *  (c) 2023-26 the strato authors
 *
 *  Parsing of the delimited webhook payloads into weather batches
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

use thiserror::Error;

/// Field delimiter used by both webhook channels.
pub const FIELD_DELIMITER: char = '~';

/// Error type for payload parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("payload needs two '~' delimiters, found {found}")]
    MissingDelimiter { found: usize },
    #[error("slot {slot:?} is not a number: {field:?}")]
    BadNumber { slot: Slot, field: String },
}

/// One of the three forecast slots, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Yesterday,
    Today,
    Tomorrow,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Yesterday, Slot::Today, Slot::Tomorrow];
}

/// Three readings travelling together, always in slot order.
///
/// A batch is constructed whole or not at all; there is no partial
/// state to leak onto the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherBatch<T> {
    pub yesterday: T,
    pub today: T,
    pub tomorrow: T,
}

impl<T> WeatherBatch<T> {
    pub fn get(&self, slot: Slot) -> &T {
        match slot {
            Slot::Yesterday => &self.yesterday,
            Slot::Today => &self.today,
            Slot::Tomorrow => &self.tomorrow,
        }
    }
}

/// Split a raw payload into its first three fields.
///
/// Anything past the third field is ignored; the upstream webhook
/// template occasionally appends a trailing delimiter.
fn three_fields(raw: &str) -> Result<[&str; 3], PayloadError> {
    let mut it = raw.split(FIELD_DELIMITER);
    let a = it.next().unwrap_or("");
    let found = raw.matches(FIELD_DELIMITER).count();
    let (Some(b), Some(c)) = (it.next(), it.next()) else {
        return Err(PayloadError::MissingDelimiter { found });
    };
    Ok([a, b, c])
}

/// Parse a temperature payload (`"67.9~72.1~75"`), rounding each slot
/// to the nearest whole degree.
pub fn parse_temperatures(raw: &str) -> Result<WeatherBatch<i32>, PayloadError> {
    let fields = three_fields(raw)?;
    let mut rounded = [0i32; 3];
    for (i, (slot, field)) in Slot::ALL.iter().zip(fields.iter()).enumerate() {
        let value: f64 = field.parse().map_err(|_| PayloadError::BadNumber {
            slot: *slot,
            field: (*field).to_string(),
        })?;
        rounded[i] = value.round() as i32;
    }
    Ok(WeatherBatch {
        yesterday: rounded[0],
        today: rounded[1],
        tomorrow: rounded[2],
    })
}

/// Parse a weather-code payload (`"1000~4200~8000"`). Codes are opaque
/// strings here; mapping to icons happens later and is total.
pub fn parse_codes(raw: &str) -> Result<WeatherBatch<String>, PayloadError> {
    let [a, b, c] = three_fields(raw)?;
    Ok(WeatherBatch {
        yesterday: a.to_string(),
        today: b.to_string(),
        tomorrow: c.to_string(),
    })
}
