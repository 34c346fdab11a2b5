// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only domain snapshots handed to every widget call.
//!
//! Producers (weather services, the sunrise/sunset service, the background
//! picker) build these off-thread and the host replaces them wholesale. All
//! timestamps are local wall-clock times.

use std::collections::VecDeque;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Where current conditions came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataSource {
    /// A forecast/observation web service.
    #[default]
    Service,
    /// A personal weather station.
    Station,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Service => "Service",
            Self::Station => "Station",
        })
    }
}

/// The currently shown background image and its tagging results.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundState {
    /// Image on screen, if one was picked.
    pub path: Option<PathBuf>,
    /// Tags the picker asked for.
    pub requested_tags: Vec<String>,
    /// Tags attached to the chosen image.
    pub image_tags: Vec<String>,
    /// Human-readable explanation of the pick.
    pub message: Option<String>,
}

/// Current conditions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentData {
    /// Producer kind.
    pub source: DataSource,
    /// Station identifier when `source` is a station.
    pub station_id: Option<String>,
    /// Air temperature.
    pub temperature: Option<f64>,
    /// Apparent temperature.
    pub feels_like: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
    /// Precipitation since midnight, in the configured unit.
    pub rain: Option<f64>,
    /// Sustained wind speed.
    pub wind_speed: Option<f64>,
    /// Gust speed.
    pub wind_gust: Option<f64>,
    /// Direction the wind blows from, degrees clockwise from north.
    pub wind_direction: Option<f64>,
    /// Free-text conditions ("Partly cloudy", "Light rain").
    pub conditions: Option<String>,
    /// When the producer last refreshed.
    pub last_update: Option<NaiveDateTime>,
    /// Observation time at the station.
    pub observed_at: Option<NaiveDateTime>,
    /// Background picker state.
    pub background: BackgroundState,
}

/// One half-day of forecast.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastPeriod {
    /// High (daytime) or low (nighttime) temperature.
    pub temperature: Option<f64>,
    /// Chance of precipitation in percent.
    pub rain_chance: Option<f64>,
    /// Free-text conditions.
    pub conditions: Option<String>,
}

/// Lunar phase reported with the forecast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoonPhase {
    /// New moon.
    #[serde(rename = "New Moon")]
    NewMoon,
    /// Waxing crescent.
    #[serde(rename = "Waxing Crescent")]
    WaxingCrescent,
    /// First quarter.
    #[serde(rename = "First Quarter")]
    FirstQuarter,
    /// Waxing gibbous.
    #[serde(rename = "Waxing Gibbous")]
    WaxingGibbous,
    /// Full moon.
    #[serde(rename = "Full Moon")]
    FullMoon,
    /// Waning gibbous.
    #[serde(rename = "Waning Gibbous")]
    WaningGibbous,
    /// Last (third) quarter.
    #[serde(rename = "Last Quarter", alias = "Third Quarter")]
    LastQuarter,
    /// Waning crescent.
    #[serde(rename = "Waning Crescent")]
    WaningCrescent,
}

impl MoonPhase {
    /// Every phase, starting at the new moon.
    pub const ALL: [Self; 8] = [
        Self::NewMoon,
        Self::WaxingCrescent,
        Self::FirstQuarter,
        Self::WaxingGibbous,
        Self::FullMoon,
        Self::WaningGibbous,
        Self::LastQuarter,
        Self::WaningCrescent,
    ];

    /// The name forecast services use, e.g. `Waxing Crescent`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NewMoon => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::FullMoon => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A moon phase name no service is known to send.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown moon phase `{0}`")]
pub struct UnknownMoonPhase(pub String);

impl FromStr for MoonPhase {
    type Err = UnknownMoonPhase;

    /// Case-insensitive; `Third Quarter` is accepted for [`MoonPhase::LastQuarter`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("third quarter") {
            return Ok(Self::LastQuarter);
        }
        Self::ALL
            .into_iter()
            .find(|phase| phase.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMoonPhase(s.to_owned()))
    }
}

/// One hour of the 24-hour forecast.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    /// Start of the hour.
    pub at: NaiveDateTime,
    /// Air temperature.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Cloud cover in percent.
    #[serde(default)]
    pub cloud_cover: Option<f64>,
    /// Chance of rain in percent.
    #[serde(default)]
    pub rain_chance: Option<f64>,
    /// Expected rain, in the configured unit.
    #[serde(default)]
    pub rain_amount: Option<f64>,
    /// Free-text conditions.
    #[serde(default)]
    pub conditions: Option<String>,
}

/// When the next rain is expected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainTimes {
    /// First hour with rain.
    pub start: Option<NaiveDateTime>,
    /// Hour the rain stops.
    pub end: Option<NaiveDateTime>,
    /// Whether it is raining now.
    pub already_raining: bool,
}

impl RainTimes {
    /// Whether rain is falling or expected.
    #[must_use]
    pub fn expects_rain(&self) -> bool {
        self.already_raining || self.start.is_some()
    }
}

/// Today's forecast.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastData {
    /// Daytime period.
    pub daytime: Option<ForecastPeriod>,
    /// Nighttime period.
    pub nighttime: Option<ForecastPeriod>,
    /// Tonight's moon.
    pub moon: Option<MoonPhase>,
    /// The next 24 hours, oldest first.
    pub hourly: Vec<HourlyForecast>,
    /// Rain start and end.
    pub rain_times: RainTimes,
}

impl ForecastData {
    /// Forecast high, from the daytime period.
    #[must_use]
    pub fn high(&self) -> Option<f64> {
        self.daytime.as_ref().and_then(|p| p.temperature)
    }

    /// Forecast low, from the nighttime period.
    #[must_use]
    pub fn low(&self) -> Option<f64> {
        self.nighttime.as_ref().and_then(|p| p.temperature)
    }
}

/// One past observation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryLine {
    /// Observation time.
    pub at: NaiveDateTime,
    /// Air temperature.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Sustained wind speed.
    #[serde(default)]
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees.
    #[serde(default)]
    pub wind_direction: Option<f64>,
}

/// Bounded, time-ordered observation history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryData {
    lines: VecDeque<HistoryLine>,
    capacity: usize,
}

impl Default for HistoryData {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl HistoryData {
    /// One day of five-minute observations.
    pub const DEFAULT_CAPACITY: usize = 288;

    /// An empty history keeping at most `capacity` lines (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Appends an observation, dropping the oldest beyond capacity.
    ///
    /// Lines older than the newest one are inserted in time order.
    pub fn push(&mut self, line: HistoryLine) {
        let pos = self.lines.partition_point(|l| l.at <= line.at);
        self.lines.insert(pos, line);
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    /// Number of stored lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryLine> {
        self.lines.iter()
    }

    /// Newest to oldest.
    pub fn recent(&self) -> impl Iterator<Item = &HistoryLine> {
        self.lines.iter().rev()
    }
}

impl FromIterator<HistoryLine> for HistoryData {
    fn from_iter<I: IntoIterator<Item = HistoryLine>>(iter: I) -> Self {
        let mut history = Self::default();
        for line in iter {
            history.push(line);
        }
        history
    }
}

/// Sunrise window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunriseTimes {
    /// Start of morning astronomical twilight.
    pub astronomical_twilight: NaiveDateTime,
    /// Full daylight.
    pub day: NaiveDateTime,
}

/// Sunset window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunsetTimes {
    /// The sun starts to set.
    pub start: NaiveDateTime,
    /// End of evening astronomical twilight.
    pub astronomical_twilight: NaiveDateTime,
}

/// Sun events for one day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySunTimes {
    /// Morning window.
    pub sunrise: SunriseTimes,
    /// Evening window.
    pub sunset: SunsetTimes,
}

/// Sun events for today and tomorrow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunData {
    /// Today.
    pub today: Option<DailySunTimes>,
    /// Tomorrow.
    pub tomorrow: Option<DailySunTimes>,
}

impl SunData {
    /// Whether `t` falls outside both days' twilight-to-twilight windows.
    ///
    /// Unknown without both days of data; reported as `false`.
    #[must_use]
    pub fn is_night(&self, t: NaiveDateTime) -> bool {
        let (Some(today), Some(tomorrow)) = (self.today, self.tomorrow) else {
            return false;
        };
        t < today.sunrise.astronomical_twilight
            || (today.sunset.astronomical_twilight < t
                && t < tomorrow.sunrise.astronomical_twilight)
            || tomorrow.sunset.astronomical_twilight < t
    }

    /// Whether `t` is within a sunrise window.
    #[must_use]
    pub fn is_sunrise(&self, t: NaiveDateTime) -> bool {
        [self.today, self.tomorrow].into_iter().flatten().any(|day| {
            day.sunrise.astronomical_twilight <= t && t <= day.sunrise.day
        })
    }

    /// Whether `t` is within a sunset window.
    #[must_use]
    pub fn is_sunset(&self, t: NaiveDateTime) -> bool {
        [self.today, self.tomorrow]
            .into_iter()
            .flatten()
            .any(|day| day.sunset.start <= t && t <= day.sunset.astronomical_twilight)
    }
}

/// The four snapshots every widget call reads.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshots {
    /// Current conditions.
    pub current: CurrentData,
    /// Forecast.
    pub forecast: ForecastData,
    /// Observation history.
    pub history: HistoryData,
    /// Sun events.
    pub sun: SunData,
}
