// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The last 24 hours of temperature as a colored trace.
//!
//! History is averaged into one bucket per wall-clock hour, oldest on the
//! left and the current hour on the right. The vertical range runs from the
//! forecast low to the forecast high, falling back to the observed range.
//! Segments shade from blue (cold) to red (warm).
//!
//! ```text
//!   ---------------------------   high
//!                  o---o
//!        o--o---o        \o
//!   o---o                     low
//!   ---------------------------
//! ```

use std::collections::BTreeMap;

use chrono::{DurationRound, NaiveDateTime, TimeDelta};
use kurbo::{Point, Rect};
use weatherpane_core::data::{ForecastData, HistoryData};
use weatherpane_core::policy::{RefreshPolicy, Trigger, TriggerSet, delay};
use weatherpane_core::scene::{Color, ElementId, LineStyle, ShapeStyle};
use weatherpane_core::widget::{RefreshContext, StoredHandle, Widget, WidgetError, WidgetId};

use crate::settings::TemperatureGraphSettings;

const POLICY: RefreshPolicy = RefreshPolicy::on(
    TriggerSet::EMPTY
        .with(Trigger::HistoryDataChanged)
        .with(Trigger::ForecastDataChanged),
)
.every(delay::from_minutes(5));

/// Hourly buckets plotted.
pub const HOURS: usize = 24;

const COLD: Color = Color::rgb(0, 0, 0xFF);
const WARM: Color = Color::rgb(0xFF, 0, 0);
const POINT_RADIUS: f64 = 2.0;

// Group layout: the two frame lines, then the series.
const SERIES: usize = 2;

fn hour_of(t: NaiveDateTime) -> NaiveDateTime {
    t.duration_trunc(TimeDelta::hours(1)).unwrap_or(t)
}

/// Mean temperature per hour, oldest first. `None` where the hour has no
/// observations.
#[must_use]
pub fn hourly_means(history: &HistoryData, now: NaiveDateTime) -> [Option<f64>; HOURS] {
    let current = hour_of(now);
    let mut sums: BTreeMap<NaiveDateTime, (f64, u32)> = BTreeMap::new();
    for line in history.iter() {
        if let Some(temperature) = line.temperature {
            let (sum, count) = sums.entry(hour_of(line.at)).or_default();
            *sum += temperature;
            *count += 1;
        }
    }
    core::array::from_fn(|i| {
        let back = i64::try_from(HOURS - 1 - i).unwrap_or_default();
        let hour = current - TimeDelta::hours(back);
        sums.get(&hour).map(|(sum, count)| sum / f64::from(*count))
    })
}

/// Low and high the trace is scaled to.
///
/// Forecast values win; either side missing falls back to the observed
/// extreme. `None` when neither is known.
#[must_use]
pub fn range(forecast: &ForecastData, means: &[Option<f64>]) -> Option<(f64, f64)> {
    let observed = means.iter().flatten().copied();
    let low = forecast.low().or_else(|| observed.clone().reduce(f64::min))?;
    let high = forecast.high().or_else(|| observed.reduce(f64::max))?;
    Some((low, high))
}

/// 24-hour temperature trace.
#[derive(Clone, Debug)]
pub struct TemperatureGraph {
    settings: TemperatureGraphSettings,
}

impl TemperatureGraph {
    /// Creates the widget.
    #[must_use]
    pub fn new(settings: TemperatureGraphSettings) -> Self {
        Self { settings }
    }

    fn frame(&self, cx: &mut RefreshContext<'_>) -> Vec<ElementId> {
        let s = &self.settings;
        let style = LineStyle::default();
        [s.y, s.y + s.height]
            .into_iter()
            .map(|y| {
                cx.scene.surface.create_line(
                    Point::new(s.x, y),
                    Point::new(s.x + s.width, y),
                    &style,
                    None,
                )
            })
            .collect()
    }

    fn series(&self, cx: &mut RefreshContext<'_>) -> Vec<ElementId> {
        let s = &self.settings;
        let means = hourly_means(&cx.data.history, cx.local_now());
        let Some((low, high)) = range(&cx.data.forecast, &means) else {
            return Vec::new();
        };
        let span = (high - low).max(1.0);
        let step = s.width / (HOURS - 1) as f64;
        let points: Vec<(Point, f64)> = means
            .iter()
            .enumerate()
            .filter_map(|(i, mean)| {
                let norm = (((*mean)? - low) / span).clamp(0.0, 1.0);
                let at = Point::new(s.x + i as f64 * step, s.y + s.height * (1.0 - norm));
                Some((at, norm))
            })
            .collect();

        let surface = &mut cx.scene.surface;
        let dot = ShapeStyle {
            outline: None,
            fill: Some(Color::WHITE),
            border_width: 0.0,
        };
        let mut ids: Vec<ElementId> = points
            .iter()
            .map(|(at, _)| {
                let r = POINT_RADIUS;
                surface.create_oval(Rect::new(at.x - r, at.y - r, at.x + r, at.y + r), &dot)
            })
            .collect();
        for pair in points.windows(2) {
            let [(a, na), (b, nb)] = pair else { continue };
            let style = LineStyle {
                fill: COLD.lerp(WARM, (na + nb) / 2.0),
                smooth: true,
                ..LineStyle::default()
            };
            ids.push(surface.create_line(*a, *b, &style, None));
        }
        ids
    }
}

impl Widget for TemperatureGraph {
    fn id(&self) -> WidgetId {
        WidgetId::TemperatureGraph
    }

    fn initialize(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
        if !self.settings.enabled {
            return Ok(POLICY);
        }
        let mut group = self.frame(cx);
        group.extend(self.series(cx));
        cx.scene
            .store
            .insert(WidgetId::TemperatureGraph, StoredHandle::Group(group));
        Ok(POLICY)
    }

    fn refresh(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
        let id = WidgetId::TemperatureGraph;
        if !self.settings.enabled {
            cx.scene.delete_widget(id);
            return Ok(POLICY);
        }
        let Some(mut group) = cx
            .scene
            .store
            .group(id)
            .filter(|_| cx.scene.is_live(id))
            .map(<[_]>::to_vec)
        else {
            cx.scene.delete_widget(id);
            return self.initialize(cx);
        };
        for element in group.drain(SERIES..) {
            cx.scene.surface.delete(element);
        }
        group.extend(self.series(cx));
        cx.scene.store.insert(id, StoredHandle::Group(group));
        Ok(POLICY)
    }
}
