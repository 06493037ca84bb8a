/*
 *  src/weathercode.rs
 *
 *  strato - always-on clock and three-day forecast panel
 *  (c) 2023-26 the strato authors
 *
 *  Weather code to icon mapping
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

/// Logical icon handle, one per meteorological category plus a blank
/// fallback. The numeric value is the glyph index in the icon strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Unknown = 0,
    Clear = 1,
    Cloudy = 2,
    Fog = 3,
    Rain = 4,
    WinterPrecip = 5,
    Thunderstorm = 6,
}

impl WeatherIcon {
    /// Resolve a provider weather code to an icon.
    ///
    /// Total by construction: any code outside the table maps to the
    /// blank `Unknown` glyph, never an error.
    pub fn for_code(code: &str) -> WeatherIcon {
        match code {
            "1000" | "1100" => WeatherIcon::Clear,
            "1001" | "1101" | "1102" => WeatherIcon::Cloudy,
            "2000" | "2100" => WeatherIcon::Fog,
            "4000" | "4001" | "4200" | "4201" => WeatherIcon::Rain,
            "5000" | "5001" | "5100" | "5101" | "6000" | "6001" | "6200" | "6201"
            | "7000" | "7101" | "7102" => WeatherIcon::WinterPrecip,
            "8000" => WeatherIcon::Thunderstorm,
            _ => WeatherIcon::Unknown,
        }
    }

    /// Short description, used in logs only.
    pub fn description(self) -> &'static str {
        match self {
            WeatherIcon::Unknown => "no data",
            WeatherIcon::Clear => "clear",
            WeatherIcon::Cloudy => "cloudy",
            WeatherIcon::Fog => "fog",
            WeatherIcon::Rain => "rain",
            WeatherIcon::WinterPrecip => "snow/sleet",
            WeatherIcon::Thunderstorm => "thunderstorm",
        }
    }
}
