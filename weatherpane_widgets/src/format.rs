// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text formatting shared by the widgets.

use core::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDateTime, TimeDelta};

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// The 16-point compass name for a bearing in degrees.
#[must_use]
pub fn compass_point(degrees: f64) -> &'static str {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is in 0.0..16.0 after rem_euclid"
    )]
    let index = ((degrees + 11.25).rem_euclid(360.0) / 22.5) as usize;
    COMPASS[index % COMPASS.len()]
}

/// Shown in place of a value that is unknown or failed to render.
pub const PLACEHOLDER: &str = "--";

/// `21.5°`, or `--°` when unknown.
#[must_use]
pub fn temperature(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}°"),
        None => "--°".to_owned(),
    }
}

/// `24°`, or `--°` when unknown.
#[must_use]
pub fn whole_temperature(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.0}°"),
        None => "--°".to_owned(),
    }
}

struct Monikers {
    separator: &'static str,
    day: &'static str,
    hour: &'static str,
    minute: &'static str,
    second: &'static str,
    plural: &'static str,
}

const SHORT: Monikers = Monikers {
    separator: " ",
    day: "d",
    hour: "h",
    minute: "m",
    second: "s",
    plural: "",
};

const LONG: Monikers = Monikers {
    separator: ", ",
    day: " day",
    hour: " hour",
    minute: " minute",
    second: " second",
    plural: "s",
};

fn readable(delta: TimeDelta, m: &Monikers) -> String {
    let total = delta.num_seconds().unsigned_abs();
    let days = total / 86_400;
    let hours = total % 86_400 / 3_600;
    let minutes = total % 3_600 / 60;
    let seconds = total % 60;

    let mut parts = Vec::with_capacity(4);
    let mut part = |value: u64, unit: &str| {
        let plural = if value == 1 { "" } else { m.plural };
        parts.push(format!("{value}{unit}{plural}"));
    };
    if days > 0 {
        part(days, m.day);
    }
    if days > 0 || hours > 0 {
        part(hours, m.hour);
    }
    if days > 0 || hours > 0 || minutes > 0 {
        part(minutes, m.minute);
    }
    part(seconds, m.second);
    parts.join(m.separator)
}

/// `1d 2h 3m 4s`. Leading zero units are left out; the sign is ignored.
#[must_use]
pub fn readable_duration(delta: TimeDelta) -> String {
    readable(delta, &SHORT)
}

/// `1 day, 2 hours, 3 minutes, 4 seconds`.
#[must_use]
pub fn long_readable_duration(delta: TimeDelta) -> String {
    readable(delta, &LONG)
}

/// A strftime format chrono cannot render.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid time format `{0}`")]
pub struct InvalidFormat(pub String);

/// Formats `at` with a strftime `format`.
///
/// `%-I` and `%-H` print hours without padding. Unknown specifiers are an
/// error instead of a panic.
pub fn format_time(at: &NaiveDateTime, format: &str) -> Result<String, InvalidFormat> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(InvalidFormat(format.to_owned()));
    }
    let mut out = String::new();
    write!(out, "{}", at.format_with_items(items.iter()))
        .map_err(|_| InvalidFormat(format.to_owned()))?;
    Ok(out)
}
