// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sky classification from the conditions text and the sun's position.

use core::fmt;

use chrono::NaiveDateTime;
use weatherpane_core::data::{CurrentData, MoonPhase, SunData};

/// What the sky looks like right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkyKind {
    /// Morning twilight.
    Sunrise,
    /// Evening twilight.
    Sunset,
    /// Dark and not raining or snowing, under the given moon.
    Night(MoonPhase),
    /// Rain or showers.
    Rainy,
    /// Clear daylight.
    Sunny,
    /// Some clouds.
    PartlyCloudy,
    /// Clouds or overcast, also the fallback.
    Cloudy,
    /// Snow or sleet.
    Snowy,
    /// Thunder or lightning.
    Stormy,
    /// Fog, mist or haze.
    Foggy,
}

impl fmt::Display for SkyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Three glyphs drawn on top of each other, back first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmojiStack {
    /// Drawn on top.
    pub front: &'static str,
    /// Drawn in between.
    pub middle: &'static str,
    /// Drawn first.
    pub back: &'static str,
}

/// An icon file name plus two glyph overlays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconDisplay {
    /// Icon name, as in `Icon-{name}.png`.
    pub name: &'static str,
    /// Drawn in between.
    pub middle: &'static str,
    /// Drawn on top.
    pub front: &'static str,
}

fn mentions(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// Moon assumed when the forecast carries no phase.
pub const DEFAULT_MOON: MoonPhase = MoonPhase::FullMoon;

/// Classifies the sky at `now` from the current conditions.
#[must_use]
pub fn classify(
    current: &CurrentData,
    moon: Option<MoonPhase>,
    sun: &SunData,
    now: NaiveDateTime,
) -> SkyKind {
    classify_conditions(current.conditions.as_deref(), moon, sun, now)
}

/// Classifies the sky at `now` from a conditions text.
///
/// Precipitation and storms win over the time of day; sunrise, sunset and
/// night win over cloud cover. Unknown conditions fall back to
/// [`SkyKind::Cloudy`] by day and [`SkyKind::Night`] after dark. Night uses
/// `moon`, or [`DEFAULT_MOON`] when the phase is unknown.
#[must_use]
pub fn classify_conditions(
    conditions: Option<&str>,
    moon: Option<MoonPhase>,
    sun: &SunData,
    now: NaiveDateTime,
) -> SkyKind {
    let text = conditions.unwrap_or_default().to_lowercase();

    if mentions(&text, &["thunder", "lightning", "storm"]) {
        return SkyKind::Stormy;
    }
    if mentions(&text, &["snow", "sleet", "flurr", "ice"]) {
        return SkyKind::Snowy;
    }
    if mentions(&text, &["rain", "shower", "drizzle"]) {
        return SkyKind::Rainy;
    }
    if mentions(&text, &["fog", "mist", "haze"]) {
        return SkyKind::Foggy;
    }

    if sun.is_sunrise(now) {
        return SkyKind::Sunrise;
    }
    if sun.is_sunset(now) {
        return SkyKind::Sunset;
    }
    if sun.is_night(now) {
        return SkyKind::Night(moon.unwrap_or(DEFAULT_MOON));
    }

    if mentions(&text, &["partly", "mostly sunny", "mostly clear"]) {
        SkyKind::PartlyCloudy
    } else if mentions(&text, &["cloud", "overcast"]) {
        SkyKind::Cloudy
    } else if mentions(&text, &["sunny", "clear", "fair"]) {
        SkyKind::Sunny
    } else {
        SkyKind::Cloudy
    }
}

const fn moon_glyph(moon: MoonPhase) -> &'static str {
    match moon {
        MoonPhase::NewMoon => "🌑",
        MoonPhase::WaxingCrescent => "🌒",
        MoonPhase::FirstQuarter => "🌓",
        MoonPhase::WaxingGibbous => "🌔",
        MoonPhase::FullMoon => "🌕",
        MoonPhase::WaningGibbous => "🌖",
        MoonPhase::LastQuarter => "🌗",
        MoonPhase::WaningCrescent => "🌘",
    }
}

const fn moon_icon(moon: MoonPhase) -> &'static str {
    match moon {
        MoonPhase::NewMoon => "New_Moon",
        MoonPhase::WaxingCrescent => "Waxing_Crescent",
        MoonPhase::FirstQuarter => "First_Quarter",
        MoonPhase::WaxingGibbous => "Waxing_Gibbous",
        MoonPhase::FullMoon => "Full_Moon",
        MoonPhase::WaningGibbous => "Waning_Gibbous",
        MoonPhase::LastQuarter => "Last_Quarter",
        MoonPhase::WaningCrescent => "Waning_Crescent",
    }
}

impl SkyKind {
    /// Glyphs for the emoji widget.
    #[must_use]
    pub const fn emoji(self) -> EmojiStack {
        let (back, middle, front) = match self {
            Self::Sunrise => ("🌅", "", ""),
            Self::Sunset => ("🌆", "", ""),
            Self::Night(moon) => (moon_glyph(moon), "", ""),
            Self::Rainy => ("☁", "🌧", ""),
            Self::Sunny => ("☀", "", ""),
            Self::PartlyCloudy => ("☀", "☁", ""),
            Self::Cloudy => ("☁", "", ""),
            Self::Snowy => ("☁", "🌨", "❄"),
            Self::Stormy => ("⛈", "", "⚡"),
            Self::Foggy => ("🌫", "", ""),
        };
        EmojiStack {
            front,
            middle,
            back,
        }
    }

    /// Icon and overlays for the icon widget.
    #[must_use]
    pub const fn icon(self) -> IconDisplay {
        let (name, middle, front) = match self {
            Self::Sunrise => ("Sunrise", "", ""),
            Self::Sunset => ("Sunset", "", ""),
            Self::Night(moon) => (moon_icon(moon), "", ""),
            Self::Rainy => ("Moderate_Rain", "", ""),
            Self::Sunny => ("Sunny", "", ""),
            Self::PartlyCloudy => ("Partly_Cloudy", "", ""),
            Self::Cloudy => ("Cloudy", "", ""),
            Self::Snowy => ("Moderate_Snow", "❄", ""),
            Self::Stormy => ("Thunderstorm", "", "⚡"),
            Self::Foggy => ("Foggy", "", ""),
        };
        IconDisplay {
            name,
            middle,
            front,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use weatherpane_core::data::{DailySunTimes, SunriseTimes, SunsetTimes};

    use super::*;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn day(d: u32) -> DailySunTimes {
        DailySunTimes {
            sunrise: SunriseTimes {
                astronomical_twilight: at(d, 4, 0),
                day: at(d, 5, 30),
            },
            sunset: SunsetTimes {
                start: at(d, 20, 30),
                astronomical_twilight: at(d, 22, 0),
            },
        }
    }

    fn sun() -> SunData {
        SunData {
            today: Some(day(10)),
            tomorrow: Some(day(11)),
        }
    }

    fn current(text: &str) -> CurrentData {
        CurrentData {
            conditions: Some(text.to_owned()),
            ..CurrentData::default()
        }
    }

    #[test]
    fn weather_words_beat_time_of_day() {
        let night = at(10, 23, 0);
        assert_eq!(classify(&current("Light Rain"), None, &sun(), night), SkyKind::Rainy);
        assert_eq!(
            classify(&current("Thunderstorms and rain"), None, &sun(), night),
            SkyKind::Stormy
        );
        assert_eq!(classify(&current("Patchy Fog"), None, &sun(), night), SkyKind::Foggy);
        assert_eq!(classify(&current("Snow Showers"), None, &sun(), night), SkyKind::Snowy);
    }

    #[test]
    fn sun_windows_beat_clouds() {
        let s = sun();
        assert_eq!(classify(&current("Cloudy"), None, &s, at(10, 5, 0)), SkyKind::Sunrise);
        assert_eq!(classify(&current("Cloudy"), None, &s, at(10, 21, 0)), SkyKind::Sunset);
        assert_eq!(
            classify(&current("Clear"), None, &s, at(10, 23, 0)),
            SkyKind::Night(DEFAULT_MOON)
        );
    }

    #[test]
    fn night_follows_the_moon() {
        let s = sun();
        let late = at(10, 23, 30);
        let night = |moon| classify(&current("Clear"), Some(moon), &s, late);

        let new = night(MoonPhase::NewMoon);
        assert_eq!(new, SkyKind::Night(MoonPhase::NewMoon));
        assert_eq!(new.emoji().back, "🌑");
        assert_eq!(new.icon().name, "New_Moon");

        let full = night(MoonPhase::FullMoon);
        assert_eq!(full.emoji().back, "🌕");
        assert_eq!(full.icon().name, "Full_Moon");

        let crescent = night(MoonPhase::WaxingCrescent);
        assert_eq!(crescent.emoji().back, "🌒");
        assert_eq!(crescent.icon().name, "Waxing_Crescent");

        assert_eq!(night(MoonPhase::WaningCrescent).emoji().back, "🌘");
        assert_eq!(
            classify(&current("Light rain"), Some(MoonPhase::NewMoon), &s, late),
            SkyKind::Rainy,
            "weather still wins at night"
        );
    }

    #[test]
    fn daytime_cloud_cover() {
        let noon = at(10, 12, 0);
        let s = sun();
        assert_eq!(classify(&current("Mostly Sunny"), None, &s, noon), SkyKind::PartlyCloudy);
        assert_eq!(classify(&current("Overcast"), None, &s, noon), SkyKind::Cloudy);
        assert_eq!(classify(&current("Sunny"), None, &s, noon), SkyKind::Sunny);
        assert_eq!(classify(&current("Windy"), None, &s, noon), SkyKind::Cloudy);
        assert_eq!(classify(&CurrentData::default(), None, &s, noon), SkyKind::Cloudy);
    }

    #[test]
    fn every_kind_has_a_back_glyph_and_icon() {
        for kind in [
            SkyKind::Sunrise,
            SkyKind::Sunset,
            SkyKind::Night(MoonPhase::NewMoon),
            SkyKind::Night(MoonPhase::WaningGibbous),
            SkyKind::Rainy,
            SkyKind::Sunny,
            SkyKind::PartlyCloudy,
            SkyKind::Cloudy,
            SkyKind::Snowy,
            SkyKind::Stormy,
            SkyKind::Foggy,
        ] {
            assert!(!kind.emoji().back.is_empty(), "{kind}");
            assert!(!kind.icon().name.is_empty(), "{kind}");
        }
    }
}
