// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing primitive descriptions handed to a [`Canvas`](super::Canvas).

use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::image_cache::RasterImage;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An opaque RGB color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Pure white.
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    /// Pure black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Creates a color from its channels.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a gray with all three channels set to `level`.
    #[inline]
    #[must_use]
    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    /// Gray at `fraction` of full intensity, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn gray_fraction(fraction: f64) -> Self {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "value is clamped to 0..=255 before the cast"
        )]
        let level = (fraction.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::gray(level)
    }

    /// The color `t` of the way from `self` to `other`, `t` clamped to
    /// `0.0..=1.0`. Channels are truncated.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "the result lies between two u8 channels"
        )]
        let channel = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t) as u8;
        Self::rgb(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({self})")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Failure to parse a [`Color`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid color `{0}`: expected #rgb, #rrggbb or a color name")]
pub struct ColorParseError(pub String);

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_owned());
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            let digit = |c: char| c.to_digit(16).ok_or_else(err);
            let chars: Vec<char> = hex.chars().collect();
            return match chars.as_slice() {
                [r, g, b] => {
                    let expand = |c: char| digit(c).map(|d| u8::try_from(d * 17).unwrap_or(0));
                    Ok(Self::rgb(expand(*r)?, expand(*g)?, expand(*b)?))
                }
                [r1, r2, g1, g2, b1, b2] => {
                    let pair = |hi: char, lo: char| -> Result<u8, ColorParseError> {
                        let value = digit(hi)? * 16 + digit(lo)?;
                        u8::try_from(value).map_err(|_| err())
                    };
                    Ok(Self::rgb(pair(*r1, *r2)?, pair(*g1, *g2)?, pair(*b1, *b2)?))
                }
                _ => Err(err()),
            };
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "white" => Ok(Self::WHITE),
            "black" => Ok(Self::BLACK),
            "gray" | "grey" => Ok(Self::gray(0x80)),
            "red" => Ok(Self::rgb(0xFF, 0, 0)),
            "green" => Ok(Self::rgb(0, 0x80, 0)),
            "blue" => Ok(Self::rgb(0, 0, 0xFF)),
            "yellow" => Ok(Self::rgb(0xFF, 0xFF, 0)),
            "orange" => Ok(Self::rgb(0xFF, 0xA5, 0)),
            "deepskyblue" => Ok(Self::rgb(0, 0xBF, 0xFF)),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Which point of a primitive's bounding box sits at its position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    /// Top-left corner.
    #[default]
    #[serde(rename = "nw")]
    NorthWest,
    /// Top edge center.
    #[serde(rename = "n")]
    North,
    /// Top-right corner.
    #[serde(rename = "ne")]
    NorthEast,
    /// Left edge center.
    #[serde(rename = "w")]
    West,
    /// Center.
    #[serde(rename = "center")]
    Center,
    /// Right edge center.
    #[serde(rename = "e")]
    East,
    /// Bottom-left corner.
    #[serde(rename = "sw")]
    SouthWest,
    /// Bottom edge center.
    #[serde(rename = "s")]
    South,
    /// Bottom-right corner.
    #[serde(rename = "se")]
    SouthEast,
}

/// Horizontal alignment of multi-line text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// Font weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

/// A font request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    /// Family name.
    pub family: String,
    /// Size in points.
    pub size: u16,
    /// Weight.
    pub weight: FontWeight,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "Arial".to_owned(),
            size: 16,
            weight: FontWeight::Normal,
        }
    }
}

/// Everything about a text primitive except its content and position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextStyle {
    /// Font.
    pub font: Font,
    /// Fill color.
    pub fill: Color,
    /// Anchor point.
    pub anchor: Anchor,
    /// Line alignment.
    pub justify: Justify,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: Font::default(),
            fill: Color::WHITE,
            anchor: Anchor::NorthWest,
            justify: Justify::Left,
        }
    }
}

/// A stroke halo drawn behind a text or line primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Halo {
    /// Color of the halo copies.
    pub color: Color,
    /// Offset of each copy, in pixels.
    pub width: f64,
}

impl Halo {
    /// Offsets of the eight halo copies, in creation order.
    #[must_use]
    pub fn offsets(&self) -> [Vec2; 8] {
        let n = self.width;
        [
            Vec2::new(-n, -n),
            Vec2::new(0.0, -n),
            Vec2::new(n, -n),
            Vec2::new(-n, 0.0),
            Vec2::new(n, 0.0),
            Vec2::new(-n, n),
            Vec2::new(0.0, n),
            Vec2::new(n, n),
        ]
    }
}

// ---------------------------------------------------------------------------
// Lines and shapes
// ---------------------------------------------------------------------------

/// Where a line carries an arrow head.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrowHead {
    /// At the starting point.
    First,
    /// At the end point.
    Last,
    /// At both ends.
    Both,
}

/// Style of a line primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    /// Stroke width in pixels.
    pub width: f64,
    /// Stroke color.
    pub fill: Color,
    /// Optional arrow head.
    pub arrow: Option<ArrowHead>,
    /// Whether the backend should smooth the line.
    pub smooth: bool,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: 2.0,
            fill: Color::WHITE,
            arrow: None,
            smooth: false,
        }
    }
}

/// Style of a rectangle or oval primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeStyle {
    /// Outline color; `None` draws no outline.
    pub outline: Option<Color>,
    /// Fill color; `None` leaves the interior transparent.
    pub fill: Option<Color>,
    /// Outline width in pixels.
    pub border_width: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            outline: Some(Color::WHITE),
            fill: None,
            border_width: 2.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Primitive
// ---------------------------------------------------------------------------

/// Geometry for a coordinate update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Coords {
    /// A single anchor point (text, image).
    At(Point),
    /// Two points (line endpoints or rectangle corners).
    Span(Point, Point),
}

impl Coords {
    /// Returns the coordinates shifted by `offset`.
    #[must_use]
    pub fn offset(self, offset: Vec2) -> Self {
        match self {
            Self::At(p) => Self::At(p + offset),
            Self::Span(a, b) => Self::Span(a + offset, b + offset),
        }
    }
}

/// A primitive to create on a [`Canvas`](super::Canvas).
#[derive(Clone, Copy, Debug)]
pub enum Primitive<'a> {
    /// A text run.
    Text {
        /// Anchor position.
        at: Point,
        /// Content.
        text: &'a str,
        /// Style.
        style: &'a TextStyle,
    },
    /// A straight line.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Style.
        style: &'a LineStyle,
    },
    /// An axis-aligned rectangle.
    Rectangle {
        /// Bounds.
        rect: Rect,
        /// Style.
        style: &'a ShapeStyle,
    },
    /// An ellipse inscribed in `rect`.
    Oval {
        /// Bounds.
        rect: Rect,
        /// Style.
        style: &'a ShapeStyle,
    },
    /// A raster image.
    Image {
        /// Anchor position.
        at: Point,
        /// Anchor point of the image.
        anchor: Anchor,
        /// Decoded pixels.
        image: &'a RasterImage,
    },
}

impl Primitive<'_> {
    /// The coordinates this primitive is created at.
    #[must_use]
    pub fn coords(&self) -> Coords {
        match *self {
            Self::Text { at, .. } | Self::Image { at, .. } => Coords::At(at),
            Self::Line { from, to, .. } => Coords::Span(from, to),
            Self::Rectangle { rect, .. } | Self::Oval { rect, .. } => {
                Coords::Span(rect.origin(), Point::new(rect.x1, rect.y1))
            }
        }
    }
}
