// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Square fill gauges for humidity and rain.
//!
//! ```text
//!   +--------+   outline
//!   |   💧   |   emoji and label at the center
//!   | 0.25"  |
//!   |########|   fill bar, rising from the bottom edge
//!   +--------+
//! ```

use core::fmt;

use kurbo::{Point, Rect};
use weatherpane_core::data::CurrentData;
use weatherpane_core::policy::{RefreshPolicy, Trigger, TriggerSet, delay};
use weatherpane_core::scene::{Color, ShapeStyle};
use weatherpane_core::widget::{RefreshContext, StoredHandle, Widget, WidgetError, WidgetId};

use crate::settings::{
    HumiditySquareSettings, PrecipitationUnit, RainSquareSettings, SquareSettings,
    TextElementSettings,
};

const POLICY: RefreshPolicy = RefreshPolicy::on(TriggerSet::EMPTY.with(Trigger::CurrentDataChanged))
    .every(delay::from_minutes(5));

/// How full the gauge is and what it says.
#[derive(Clone, Debug, PartialEq)]
pub struct Reading {
    /// Fill fraction, `0.0..=1.0`.
    pub ratio: f64,
    /// Center label.
    pub label: String,
}

/// Maps current conditions to a [`Reading`].
pub type ReadingFn = Box<dyn Fn(&CurrentData) -> Reading>;

// Group layout.
const FILL: usize = 0;
const LABEL: usize = 3;

/// A square gauge widget.
pub struct Gauge {
    id: WidgetId,
    square: SquareSettings,
    emoji: TextElementSettings,
    text: TextElementSettings,
    glyph: &'static str,
    fill: Color,
    reading: ReadingFn,
}

impl fmt::Debug for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gauge")
            .field("id", &self.id)
            .field("square", &self.square)
            .field("glyph", &self.glyph)
            .field("fill", &self.fill)
            .finish_non_exhaustive()
    }
}

impl Gauge {
    /// The fill bar for `ratio`, rising from the bottom edge.
    ///
    /// The height is truncated to whole pixels.
    #[must_use]
    pub fn fill_rect(square: &SquareSettings, ratio: f64) -> Rect {
        let height = (square.size * ratio.clamp(0.0, 1.0)).trunc();
        let bottom = square.y + square.size;
        Rect::new(square.x, bottom - height, square.x + square.size, bottom)
    }

    fn outline(&self) -> Rect {
        let s = &self.square;
        Rect::new(s.x, s.y, s.x + s.size, s.y + s.size)
    }
}

impl Widget for Gauge {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn initialize(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
        if !self.square.enabled {
            return Ok(POLICY);
        }
        let reading = (self.reading)(&cx.data.current);
        let center = self.square.center();
        let surface = &mut cx.scene.surface;
        let fill = surface.create_rectangle(
            Self::fill_rect(&self.square, reading.ratio),
            &ShapeStyle {
                outline: None,
                fill: Some(self.fill),
                border_width: 0.0,
            },
        );
        let outline = surface.create_rectangle(self.outline(), &ShapeStyle::default());
        let emoji = surface.create_text(
            self.glyph,
            center,
            &self.emoji.style(),
            self.emoji.halo().as_ref(),
        );
        let label = surface.create_text(
            &reading.label,
            center,
            &self.text.style(),
            self.text.halo().as_ref(),
        );
        cx.scene
            .store
            .insert(self.id, StoredHandle::Group(vec![fill, outline, emoji, label]));
        Ok(POLICY)
    }

    fn refresh(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
        if !self.square.enabled {
            cx.scene.delete_widget(self.id);
            return Ok(POLICY);
        }
        let Some(group) = cx
            .scene
            .store
            .group(self.id)
            .filter(|_| cx.scene.is_live(self.id))
            .map(<[_]>::to_vec)
        else {
            cx.scene.delete_widget(self.id);
            return self.initialize(cx);
        };
        let reading = (self.reading)(&cx.data.current);
        let rect = Self::fill_rect(&self.square, reading.ratio);
        cx.scene
            .surface
            .move_segment(group[FILL], rect.origin(), Point::new(rect.x1, rect.y1));
        cx.scene.surface.update_text(group[LABEL], &reading.label);
        Ok(POLICY)
    }
}

/// Relative humidity, `--%` while unknown.
#[must_use]
pub fn humidity_square(settings: &HumiditySquareSettings) -> Gauge {
    Gauge {
        id: WidgetId::HumiditySquare,
        square: settings.square,
        emoji: settings.emoji.clone(),
        text: settings.text.clone(),
        glyph: "💦",
        fill: settings.fill,
        reading: Box::new(|current: &CurrentData| match current.humidity {
            Some(h) => Reading {
                ratio: h / 100.0,
                label: format!("{h:.0}%"),
            },
            None => Reading {
                ratio: 0.0,
                label: "--%".to_owned(),
            },
        }),
    }
}

/// Rain amount. The fill bar saturates at `max_rain`.
#[must_use]
pub fn rain_square(settings: &RainSquareSettings, unit: PrecipitationUnit) -> Gauge {
    let max = settings.max_rain;
    Gauge {
        id: WidgetId::RainSquare,
        square: settings.square,
        emoji: settings.emoji.clone(),
        text: settings.text.clone(),
        glyph: "💧",
        fill: settings.fill,
        reading: Box::new(move |current: &CurrentData| match current.rain {
            Some(rain) => {
                let clamped = rain.clamp(0.0, max.max(0.0));
                Reading {
                    ratio: if max > 0.0 { clamped / max } else { 0.0 },
                    label: format!("{rain:.2}{}", unit.suffix()),
                }
            }
            None => Reading {
                ratio: 0.0,
                label: format!("--{}", unit.suffix()),
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use weatherpane_core::scene::{Coords, PrimitiveKind};

    use super::*;
    use crate::testing::Harness;

    fn fill_coords(h: &Harness, id: WidgetId) -> Coords {
        let group = h.scene.store.group(id).unwrap();
        let primitive = h.scene.surface.primary(group[FILL]).unwrap();
        h.log.primitive(primitive).unwrap().coords
    }

    #[test]
    fn fill_rises_from_bottom() {
        let square = SquareSettings {
            x: 10.0,
            y: 20.0,
            size: 100.0,
            ..SquareSettings::default()
        };
        let rect = Gauge::fill_rect(&square, 0.455);
        assert_eq!(rect, Rect::new(10.0, 75.0, 110.0, 120.0));
        assert_eq!(Gauge::fill_rect(&square, 0.0).height(), 0.0);
        assert_eq!(Gauge::fill_rect(&square, 3.0).height(), 100.0);
    }

    #[test]
    fn humidity_draws_four_parts() {
        let mut h = Harness::new();
        h.data.current.humidity = Some(64.0);
        let mut gauge = humidity_square(&HumiditySquareSettings::default());
        let policy = h.initialize(&mut gauge).unwrap();
        assert_eq!(policy.timer(), Some(delay::from_minutes(5)));
        assert_eq!(h.log.count_kind(PrimitiveKind::Rectangle), 2);
        assert!(h.log.shows("💦"));
        assert!(h.log.shows("64%"));
        assert_eq!(
            fill_coords(&h, WidgetId::HumiditySquare),
            Coords::Span(Point::new(0.0, 36.0), Point::new(100.0, 100.0))
        );
    }

    #[test]
    fn humidity_refresh_moves_fill() {
        let mut h = Harness::new();
        let mut gauge = humidity_square(&HumiditySquareSettings::default());
        h.initialize(&mut gauge).unwrap();
        assert!(h.log.shows("--%"));
        let created = h.log.created_count();

        h.data.current.humidity = Some(50.0);
        h.refresh(&mut gauge).unwrap();
        assert_eq!(h.log.created_count(), created);
        assert!(h.log.shows("50%"));
        assert_eq!(
            fill_coords(&h, WidgetId::HumiditySquare),
            Coords::Span(Point::new(0.0, 50.0), Point::new(100.0, 100.0))
        );
    }

    #[test]
    fn rain_fill_saturates_at_max() {
        let mut h = Harness::new();
        h.data.current.rain = Some(3.5);
        let mut gauge = rain_square(&RainSquareSettings::default(), PrecipitationUnit::In);
        h.initialize(&mut gauge).unwrap();
        assert!(h.log.shows("3.50\""));
        assert_eq!(
            fill_coords(&h, WidgetId::RainSquare),
            Coords::Span(Point::new(0.0, 0.0), Point::new(100.0, 100.0))
        );
    }

    #[test]
    fn rain_placeholder_uses_unit() {
        let mut h = Harness::new();
        let mut gauge = rain_square(&RainSquareSettings::default(), PrecipitationUnit::Mm);
        h.initialize(&mut gauge).unwrap();
        assert!(h.log.shows("--MM"));

        h.data.current.rain = Some(0.25);
        h.refresh(&mut gauge).unwrap();
        assert!(h.log.shows("0.25MM"));
    }

    #[test]
    fn gauge_heals_after_partial_delete() {
        let mut h = Harness::new();
        let mut gauge = humidity_square(&HumiditySquareSettings::default());
        h.initialize(&mut gauge).unwrap();
        let live = h.log.live_count();
        let outline = h.scene.store.group(WidgetId::HumiditySquare).unwrap()[1];
        h.scene.surface.delete(outline);

        h.refresh(&mut gauge).unwrap();
        assert!(h.scene.is_live(WidgetId::HumiditySquare));
        assert_eq!(h.log.live_count(), live);
    }
}
