// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display configuration.
//!
//! Every section has a `Default` matching a 1920x1080 layout, and every
//! field may be omitted from the TOML file:
//!
//! ```toml
//! assets_dir = "/opt/weatherpane/assets"
//!
//! [units]
//! wind = "kph"
//!
//! [time]
//! x = 400
//! y = 30
//! format = "%-I:%M %p"
//! font = { size = 90, weight = "bold" }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use weatherpane_core::scene::{Anchor, Color, Font, FontWeight, Halo, Justify, TextStyle};

/// Failure to load [`Settings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The file could not be read.
    #[error("failed to read settings from `{}`", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid settings TOML.
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Temperature unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    /// Degrees Fahrenheit.
    #[default]
    F,
    /// Degrees Celsius.
    C,
}

/// Wind speed unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindUnit {
    /// Miles per hour.
    #[default]
    Mph,
    /// Kilometres per hour.
    Kph,
}

impl WindUnit {
    /// Label shown after a speed.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Mph => "MPH",
            Self::Kph => "KPH",
        }
    }
}

/// Precipitation unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecipitationUnit {
    /// Inches.
    #[default]
    In,
    /// Millimetres.
    Mm,
}

impl PrecipitationUnit {
    /// Label shown after an amount.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::In => "\"",
            Self::Mm => "MM",
        }
    }
}

/// Units the incoming data is expressed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Units {
    /// Temperature.
    pub temperature: TemperatureUnit,
    /// Wind speed.
    pub wind: WindUnit,
    /// Precipitation.
    pub precipitation: PrecipitationUnit,
}

// ---------------------------------------------------------------------------
// Element sections
// ---------------------------------------------------------------------------

/// A positioned element that can be switched off.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementSettings {
    /// Whether the widget draws anything.
    pub enabled: bool,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Default for ElementSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            x: 0.0,
            y: 0.0,
        }
    }
}

/// A text element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextElementSettings {
    /// Whether the widget draws anything.
    pub enabled: bool,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Font.
    pub font: Font,
    /// Fill color.
    pub fill: Color,
    /// Anchor point.
    pub anchor: Anchor,
    /// Line alignment.
    pub justify: Justify,
    /// Whether to draw a stroke halo behind the text.
    pub stroke: bool,
    /// Halo color.
    pub stroke_color: Color,
    /// Halo offset in pixels.
    pub stroke_width: f64,
}

impl Default for TextElementSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            x: 0.0,
            y: 0.0,
            font: Font::default(),
            fill: Color::WHITE,
            anchor: Anchor::NorthWest,
            justify: Justify::Left,
            stroke: true,
            stroke_color: Color::BLACK,
            stroke_width: 2.0,
        }
    }
}

impl TextElementSettings {
    /// Default settings placed at (`x`, `y`).
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Sets the font size.
    #[must_use]
    pub fn size(mut self, size: u16) -> Self {
        self.font.size = size;
        self
    }

    /// Uses a bold font.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.font.weight = FontWeight::Bold;
        self
    }

    /// Sets the fill color.
    #[must_use]
    pub fn fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    /// Sets the anchor.
    #[must_use]
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Turns the halo off.
    #[must_use]
    pub fn no_stroke(mut self) -> Self {
        self.stroke = false;
        self
    }

    /// Switches the element off.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Configured position.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Text style for the primitive.
    #[must_use]
    pub fn style(&self) -> TextStyle {
        TextStyle {
            font: self.font.clone(),
            fill: self.fill,
            anchor: self.anchor,
            justify: self.justify,
        }
    }

    /// Halo for the primitive, if stroking is on.
    #[must_use]
    pub fn halo(&self) -> Option<Halo> {
        self.stroke.then_some(Halo {
            color: self.stroke_color,
            width: self.stroke_width,
        })
    }
}

/// A text element rendering a timestamp.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattedTextSettings {
    /// Text placement and style.
    #[serde(flatten)]
    pub text: TextElementSettings,
    /// chrono strftime format; `%-I` and `%-H` give unpadded hours.
    pub format: String,
}

impl Default for FormattedTextSettings {
    fn default() -> Self {
        Self::new(TextElementSettings::default(), "%Y-%m-%d %H:%M:%S")
    }
}

impl FormattedTextSettings {
    /// Pairs text settings with a format.
    #[must_use]
    pub fn new(text: TextElementSettings, format: &str) -> Self {
        Self {
            text,
            format: format.to_owned(),
        }
    }
}

/// A square gauge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquareSettings {
    /// Whether the widget draws anything.
    pub enabled: bool,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Side length.
    pub size: f64,
}

impl Default for SquareSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            x: 0.0,
            y: 0.0,
            size: 100.0,
        }
    }
}

impl SquareSettings {
    /// The square's center.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.size / 2.0, self.y + self.size / 2.0)
    }
}

/// Humidity gauge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumiditySquareSettings {
    /// Square placement.
    #[serde(flatten)]
    pub square: SquareSettings,
    /// Emoji in the middle of the square.
    pub emoji: TextElementSettings,
    /// Percentage label.
    pub text: TextElementSettings,
    /// Fill bar color.
    pub fill: Color,
}

impl Default for HumiditySquareSettings {
    fn default() -> Self {
        Self {
            square: SquareSettings::default(),
            emoji: TextElementSettings::default()
                .anchor(Anchor::Center)
                .size(40)
                .bold()
                .fill(Color::rgb(0, 0, 0xFF))
                .no_stroke(),
            text: TextElementSettings::default()
                .anchor(Anchor::Center)
                .size(24)
                .bold(),
            fill: Color::rgb(0, 0xBF, 0xFF),
        }
    }
}

/// Rain gauge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainSquareSettings {
    /// Square placement.
    #[serde(flatten)]
    pub square: SquareSettings,
    /// Emoji in the middle of the square.
    pub emoji: TextElementSettings,
    /// Amount label.
    pub text: TextElementSettings,
    /// Fill bar color.
    pub fill: Color,
    /// Amount that fills the square.
    pub max_rain: f64,
}

impl Default for RainSquareSettings {
    fn default() -> Self {
        let humidity = HumiditySquareSettings::default();
        Self {
            square: humidity.square,
            emoji: humidity.emoji,
            text: humidity.text,
            fill: Color::rgb(0, 0, 0xFF),
            max_rain: 2.0,
        }
    }
}

/// Wind dial.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindIndicatorSettings {
    /// Whether the widget draws anything.
    pub enabled: bool,
    /// Dial center, horizontal.
    pub x: f64,
    /// Dial center, vertical.
    pub y: f64,
    /// Dial radius.
    pub radius: f64,
    /// Number of fading arrows showing earlier directions.
    pub history_arrows: usize,
    /// Wind speed label.
    pub wind: TextElementSettings,
    /// Gust label.
    pub gust: TextElementSettings,
    /// Direction label.
    pub direction: TextElementSettings,
}

impl Default for WindIndicatorSettings {
    fn default() -> Self {
        let label = TextElementSettings::default()
            .anchor(Anchor::Center)
            .size(22)
            .bold();
        Self {
            enabled: true,
            x: 0.0,
            y: 0.0,
            radius: 100.0,
            history_arrows: 5,
            wind: label.clone(),
            gust: label,
            direction: TextElementSettings::default()
                .anchor(Anchor::Center)
                .size(18),
        }
    }
}

impl WindIndicatorSettings {
    /// Dial center.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// 24-hour temperature trace.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureGraphSettings {
    /// Whether the widget draws anything.
    pub enabled: bool,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Plot width.
    pub width: f64,
    /// Plot height.
    pub height: f64,
}

impl Default for TemperatureGraphSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            x: 0.0,
            y: 0.0,
            width: 360.0,
            height: 130.0,
        }
    }
}

/// Colored band beneath the rain bars showing daylight and cloud cover.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyGradientSettings {
    /// Whether the band is drawn.
    pub enabled: bool,
    /// Whether the cloud strip is drawn on top of the band.
    pub cloud: bool,
    /// Cloud strip height.
    pub cloud_height: f64,
    /// Total band height, cloud strip included.
    pub height: f64,
    /// Pixels per band line.
    pub step: u32,
}

impl Default for SkyGradientSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            cloud: true,
            cloud_height: 8.0,
            height: 35.0,
            step: 4,
        }
    }
}

/// 24 hourly rain-chance bars.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainForecastSettings {
    /// Whether the widget draws anything.
    pub enabled: bool,
    /// Left edge.
    pub x: f64,
    /// Top edge of the bars.
    pub y: f64,
    /// Bar width.
    pub bar_width: f64,
    /// Gap after each bar.
    pub bar_spacing: f64,
    /// Height of a 100% bar.
    pub bar_max_height: f64,
    /// Bar color.
    pub bar_color: Color,
    /// Hour label above each bar.
    pub hour: FormattedTextSettings,
    /// Expected amount above the hour label, only for hours with rain.
    pub rain_amount: TextElementSettings,
    /// Condition emoji below the band.
    pub emoji: TextElementSettings,
    /// Cloud cover label below the emoji.
    pub cloud_cover: TextElementSettings,
    /// Shown across the bars when no rain is expected.
    pub no_rain_warning: TextElementSettings,
    /// Daylight band.
    pub sky_gradient: SkyGradientSettings,
}

impl Default for RainForecastSettings {
    fn default() -> Self {
        let small = TextElementSettings::default().anchor(Anchor::North).size(10);
        Self {
            enabled: true,
            x: 0.0,
            y: 0.0,
            bar_width: 20.0,
            bar_spacing: 20.0,
            bar_max_height: 100.0,
            bar_color: Color::rgb(0, 0, 0xFF),
            hour: FormattedTextSettings::new(
                TextElementSettings::default().anchor(Anchor::North).size(14),
                "%-I%p",
            ),
            rain_amount: small.clone(),
            emoji: TextElementSettings::default()
                .anchor(Anchor::North)
                .size(14)
                .no_stroke()
                .disabled(),
            cloud_cover: small,
            no_rain_warning: TextElementSettings::default()
                .anchor(Anchor::North)
                .size(30)
                .fill(Color::rgb(0, 0xFF, 0)),
            sky_gradient: SkyGradientSettings::default(),
        }
    }
}

impl RainForecastSettings {
    /// Horizontal distance from one bar to the next.
    #[must_use]
    pub fn slot(&self) -> f64 {
        self.bar_width + self.bar_spacing
    }

    /// Width of the 24 bar slots.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.slot() * 24.0
    }
}

/// A three-layer emoji glyph stack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackedEmojiSettings {
    /// Whether the widget draws anything.
    pub enabled: bool,
    /// Stack origin, horizontal.
    pub x: f64,
    /// Stack origin, vertical.
    pub y: f64,
    /// Glyph style shared by all layers.
    pub glyph: TextElementSettings,
    /// Middle layer offset from the origin.
    pub middle_offset: [f64; 2],
    /// Front layer offset from the origin.
    pub front_offset: [f64; 2],
}

impl Default for StackedEmojiSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            x: 1880.0,
            y: 30.0,
            glyph: TextElementSettings::default()
                .anchor(Anchor::NorthEast)
                .size(72)
                .no_stroke(),
            middle_offset: [0.0, 0.0],
            front_offset: [-24.0, 36.0],
        }
    }
}

impl StackedEmojiSettings {
    /// Stack origin.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// An icon image with two emoji layers on top.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackedIconSettings {
    /// Whether the widget draws anything.
    pub enabled: bool,
    /// Stack origin, horizontal.
    pub x: f64,
    /// Stack origin, vertical.
    pub y: f64,
    /// Icon width in pixels.
    pub width: u32,
    /// Icon height in pixels.
    pub height: u32,
    /// Icon anchor.
    pub anchor: Anchor,
    /// Use the `-Outline` icon variant.
    pub outline: bool,
    /// Glyph style of the emoji layers.
    pub glyph: TextElementSettings,
    /// Middle layer offset from the origin.
    pub middle_offset: [f64; 2],
    /// Front layer offset from the origin.
    pub front_offset: [f64; 2],
}

impl Default for StackedIconSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            x: 1880.0,
            y: 30.0,
            width: 128,
            height: 128,
            anchor: Anchor::NorthEast,
            outline: false,
            glyph: TextElementSettings::default()
                .anchor(Anchor::NorthEast)
                .size(36)
                .no_stroke(),
            middle_offset: [-8.0, 72.0],
            front_offset: [-64.0, 72.0],
        }
    }
}

impl StackedIconSettings {
    /// Stack origin.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

pub(crate) fn offset(pair: [f64; 2]) -> Vec2 {
    Vec2::new(pair[0], pair[1])
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Everything the widget set reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the `icons/` and `backgrounds/` folders.
    pub assets_dir: PathBuf,
    /// Data units.
    pub units: Units,
    /// Background image.
    pub background: ElementSettings,
    /// Clock.
    pub time: FormattedTextSettings,
    /// Weekday.
    pub day_of_week: FormattedTextSettings,
    /// Date.
    pub full_date: FormattedTextSettings,
    /// Time since start.
    pub uptime: TextElementSettings,
    /// Current temperature.
    pub current_temp: TextElementSettings,
    /// Feels-like temperature.
    pub feels_like: TextElementSettings,
    /// Forecast high.
    pub high: TextElementSettings,
    /// Forecast low.
    pub low: TextElementSettings,
    /// Station id.
    pub station: TextElementSettings,
    /// Data source.
    pub source: TextElementSettings,
    /// Time of the last data update.
    pub last_update: FormattedTextSettings,
    /// Time of the observation.
    pub observed_time: FormattedTextSettings,
    /// Background tag message.
    pub image_tags: TextElementSettings,
    /// Weather emoji stack.
    pub weather_emoji: StackedEmojiSettings,
    /// Weather icon stack.
    pub weather_icon: StackedIconSettings,
    /// Humidity gauge.
    pub humidity_square: HumiditySquareSettings,
    /// Rain gauge.
    pub rain_square: RainSquareSettings,
    /// Wind dial.
    pub wind_indicator: WindIndicatorSettings,
    /// Temperature history graph.
    pub temperature_graph: TemperatureGraphSettings,
    /// Rain forecast bars.
    pub rain_forecast: RainForecastSettings,
}

impl Default for Settings {
    fn default() -> Self {
        let gray = Color::gray(0x77);
        let footer = |y| {
            TextElementSettings::at(1900.0, y)
                .fill(gray)
                .anchor(Anchor::East)
                .no_stroke()
        };
        Self {
            assets_dir: PathBuf::from("assets"),
            units: Units::default(),
            background: ElementSettings::default(),
            time: FormattedTextSettings::new(
                TextElementSettings::at(400.0, 30.0).size(90).bold(),
                "%-I:%M %p",
            ),
            day_of_week: FormattedTextSettings::new(
                TextElementSettings::at(30.0, 30.0).size(40).bold(),
                "%A",
            ),
            full_date: FormattedTextSettings::new(
                TextElementSettings::at(30.0, 90.0).size(40).bold(),
                "%B %d, %Y",
            ),
            uptime: footer(1000.0),
            current_temp: TextElementSettings::at(1750.0, 30.0)
                .anchor(Anchor::NorthEast)
                .size(72)
                .bold(),
            feels_like: TextElementSettings::at(1750.0, 160.0)
                .anchor(Anchor::NorthEast)
                .fill(Color::gray(0xBB))
                .size(40)
                .bold(),
            high: TextElementSettings::at(1420.0, 30.0)
                .anchor(Anchor::NorthEast)
                .fill(Color::rgb(0xFF, 0, 0))
                .size(46)
                .bold(),
            low: TextElementSettings::at(1420.0, 90.0)
                .anchor(Anchor::NorthEast)
                .fill(Color::rgb(0, 0, 0xFF))
                .size(46)
                .bold(),
            station: footer(920.0),
            source: footer(940.0),
            last_update: FormattedTextSettings::new(
                footer(980.0),
                "Last Updated: %Y-%m-%d %-I:%M:%S %p",
            ),
            observed_time: FormattedTextSettings::new(
                footer(960.0),
                "Observed: %Y-%m-%d %-I:%M:%S %p",
            ),
            image_tags: TextElementSettings::at(5.0, 10.0).no_stroke().disabled(),
            weather_emoji: StackedEmojiSettings::default(),
            weather_icon: StackedIconSettings::default(),
            humidity_square: HumiditySquareSettings {
                square: SquareSettings {
                    x: 1290.0,
                    y: 280.0,
                    ..SquareSettings::default()
                },
                ..HumiditySquareSettings::default()
            },
            rain_square: RainSquareSettings {
                square: SquareSettings {
                    x: 1400.0,
                    y: 280.0,
                    ..SquareSettings::default()
                },
                ..RainSquareSettings::default()
            },
            wind_indicator: WindIndicatorSettings {
                x: 1700.0,
                y: 350.0,
                ..WindIndicatorSettings::default()
            },
            temperature_graph: TemperatureGraphSettings {
                x: 940.0,
                y: 30.0,
                ..TemperatureGraphSettings::default()
            },
            rain_forecast: RainForecastSettings {
                x: 30.0,
                y: 850.0,
                ..RainForecastSettings::default()
            },
        }
    }
}

impl Settings {
    /// Parses settings from TOML. Missing sections and fields keep their
    /// defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a settings file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let source = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Where the icon `name` lives.
    #[must_use]
    pub fn icon_path(&self, name: &str, outline: bool) -> PathBuf {
        icon_file(&self.assets_dir, name, outline)
    }
}

/// `{assets_dir}/icons/Icon-{name}[-Outline].png`.
#[must_use]
pub fn icon_file(assets_dir: &Path, name: &str, outline: bool) -> PathBuf {
    let suffix = if outline { "-Outline" } else { "" };
    assets_dir.join("icons").join(format!("Icon-{name}{suffix}.png"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = Settings::from_toml_str(
            r##"
            assets_dir = "/srv/assets"

            [units]
            wind = "kph"

            [time]
            x = 12
            format = "%-H:%M"
            fill = "#0f0"
            font = { size = 64 }

            [humidity_square]
            size = 80.0

            [wind_indicator]
            history_arrows = 3

            [rain_forecast]
            bar_width = 10.0
            sky_gradient = { enabled = false }
            "##,
        )
        .unwrap();
        assert_eq!(settings.assets_dir, PathBuf::from("/srv/assets"));
        assert_eq!(settings.units.wind, WindUnit::Kph);
        assert_eq!(settings.units.precipitation, PrecipitationUnit::In);
        assert_eq!(settings.time.format, "%-H:%M");
        assert_eq!(settings.time.text.x, 12.0);
        assert_eq!(settings.time.text.fill, Color::rgb(0, 0xFF, 0));
        assert_eq!(settings.time.text.font.size, 64);
        assert_eq!(settings.time.text.font.family, "Arial");
        assert!(settings.time.text.enabled);
        assert_eq!(settings.humidity_square.square.size, 80.0);
        assert_eq!(settings.humidity_square.square.x, 0.0, "section replaced as a whole");
        assert_eq!(settings.wind_indicator.history_arrows, 3);
        assert_eq!(settings.rain_forecast.slot(), 30.0);
        assert!(!settings.rain_forecast.sky_gradient.enabled);
        assert_eq!(settings.rain_forecast.sky_gradient.cloud_height, 8.0);
        assert_eq!(settings.temperature_graph, Settings::default().temperature_graph);
        assert_eq!(settings.low, Settings::default().low);
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        let err = Settings::from_toml_str("[high]\nfill = \"#12\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Settings::load(&missing).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[station]\nenabled = false").unwrap();
        let settings = Settings::load(file.path()).unwrap();
        assert!(!settings.station.enabled);
    }

    #[test]
    fn icon_path_uses_variant_suffix() {
        let settings = Settings {
            assets_dir: PathBuf::from("/a"),
            ..Settings::default()
        };
        assert_eq!(
            settings.icon_path("Sunny", true),
            PathBuf::from("/a/icons/Icon-Sunny-Outline.png")
        );
    }

    #[test]
    fn halo_follows_stroke_flag() {
        let text = TextElementSettings::default();
        assert_eq!(text.halo().map(|h| h.width), Some(2.0));
        assert!(text.no_stroke().halo().is_none());
    }
}
