// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hourly rain chance for the next 24 hours.
//!
//! ```text
//!          0.10"               rain amount, only for wet hours
//!   1PM  2PM  3PM  4PM         hour labels
//!   ------------------------   top frame line
//!        ##
//!   ##   ##        ##          bars, height = rain chance
//!   ------------------------   bottom frame line
//!   ::::::::::::::::::::::::   cloud strip
//!   ########################   sky band, daylight colors
//!   ☀    ☁    🌧    ☁          emoji (off by default)
//!   10%  80%  95%  60%         cloud cover
//! ```
//!
//! The sky band starts at the current time and runs 24 hours to the right,
//! one vertical line per `step` pixels. Its color follows the sun: night,
//! dusk, civil twilight and day, blended linearly between the sun events.
//! The cloud strip mixes that color toward gray by the forecast cloud
//! cover, interpolated between hours.

use core::time::Duration;

use chrono::{DateTime, DurationRound, Local, NaiveDateTime, TimeDelta};
use kurbo::{Point, Rect};
use weatherpane_core::data::{DailySunTimes, HourlyForecast, SunData};
use weatherpane_core::policy::{RefreshPolicy, Trigger, TriggerSet, delay};
use weatherpane_core::scene::{Color, DrawingSurface, ElementId, LineStyle, ShapeStyle};
use weatherpane_core::widget::{RefreshContext, StoredHandle, Widget, WidgetError, WidgetId};

use crate::conditions::classify_conditions;
use crate::format;
use crate::settings::{PrecipitationUnit, RainForecastSettings, TextElementSettings};

const TRIGGERS: TriggerSet = TriggerSet::EMPTY
    .with(Trigger::ForecastDataChanged)
    .with(Trigger::SunDataChanged);

/// Hours drawn.
pub const HOURS: usize = 24;

const NO_RAIN: &str = "No Rain Detected in the next 24 Hours";

const NIGHT: Color = Color::rgb(10, 15, 35);
const DUSK: Color = Color::rgb(25, 35, 70);
const CIVIL: Color = Color::rgb(120, 90, 60);
const DAY: Color = Color::rgb(135, 206, 235);
const CLOUD: Color = Color::gray(169);

// Vertical offsets from the top of the bars.
const HOUR_LABEL: f64 = -24.0;
const RAIN_LABEL: f64 = -40.0;
const EMOJI: f64 = 107.0;
const CLOUD_LABEL: f64 = 135.0;
const WARNING: f64 = 25.0;

fn midpoint(a: NaiveDateTime, b: NaiveDateTime) -> NaiveDateTime {
    a + (b - a) / 2
}

fn day_keyframes(day: &DailySunTimes) -> [(NaiveDateTime, Color); 8] {
    let rise = day.sunrise;
    let set = day.sunset;
    let dawn = TimeDelta::minutes(15);
    [
        (rise.astronomical_twilight - dawn, NIGHT),
        (rise.astronomical_twilight, DUSK),
        (midpoint(rise.astronomical_twilight, rise.day), CIVIL),
        (rise.day, DAY),
        (set.start, DAY),
        (midpoint(set.start, set.astronomical_twilight), CIVIL),
        (set.astronomical_twilight, DUSK),
        (set.astronomical_twilight + dawn, NIGHT),
    ]
}

/// Sky color at `t`, or `None` without today's sun events.
///
/// Outside the known days the sky is night.
#[must_use]
pub fn sky_color(sun: &SunData, t: NaiveDateTime) -> Option<Color> {
    let today = sun.today?;
    let frames: Vec<(NaiveDateTime, Color)> = [Some(today), sun.tomorrow]
        .iter()
        .flatten()
        .flat_map(day_keyframes)
        .collect();
    let next = frames.partition_point(|(at, _)| *at <= t);
    let color = match (next.checked_sub(1).map(|i| frames[i]), frames.get(next)) {
        (Some((from, a)), Some(&(to, b))) => {
            let total = (to - from).num_milliseconds();
            let ratio = if total > 0 {
                (t - from).num_milliseconds() as f64 / total as f64
            } else {
                1.0
            };
            a.lerp(b, ratio)
        }
        _ => NIGHT,
    };
    Some(color)
}

fn hour_of(t: NaiveDateTime) -> NaiveDateTime {
    t.duration_trunc(TimeDelta::hours(1)).unwrap_or(t)
}

fn cover_at(hourly: &[HourlyForecast], hour: NaiveDateTime) -> f64 {
    hourly
        .iter()
        .find(|h| h.at == hour)
        .and_then(|h| h.cloud_cover)
        .map_or(0.0, |c| (c / 100.0).clamp(0.0, 1.0))
}

/// Cloud cover fraction at `t`, blended between the surrounding hours.
/// Hours without a forecast count as clear.
#[must_use]
pub fn cloud_cover(hourly: &[HourlyForecast], t: NaiveDateTime) -> f64 {
    let left = hour_of(t);
    let into = (t - left).num_seconds() as f64 / 3600.0;
    let a = cover_at(hourly, left);
    let b = cover_at(hourly, left + TimeDelta::hours(1));
    (1.0 - into) * a + into * b
}

/// Rain chance bars with a daylight band.
#[derive(Clone, Debug)]
pub struct RainForecastGraph {
    settings: RainForecastSettings,
    unit: PrecipitationUnit,
}

impl RainForecastGraph {
    /// Creates the widget.
    #[must_use]
    pub fn new(settings: RainForecastSettings, unit: PrecipitationUnit) -> Self {
        Self { settings, unit }
    }

    fn seconds_per_pixel(&self) -> Option<f64> {
        let width = self.settings.span();
        (width > 0.0).then(|| 86_400.0 / width)
    }

    /// Time until the band has moved by one line.
    fn column_period(&self) -> Option<Duration> {
        let gradient = &self.settings.sky_gradient;
        if !gradient.enabled {
            return None;
        }
        let seconds = f64::from(gradient.step.max(1)) * self.seconds_per_pixel()?;
        Duration::try_from_secs_f64(seconds).ok()
    }

    fn policy(&self, now: &DateTime<Local>) -> RefreshPolicy {
        let hour = RefreshPolicy::next_hour_after(now)
            .timer()
            .unwrap_or(delay::from_hours(1));
        let wait = self.column_period().map_or(hour, |column| column.min(hour));
        RefreshPolicy::on(TRIGGERS).every(wait)
    }

    fn text(
        surface: &mut DrawingSurface,
        settings: &TextElementSettings,
        text: &str,
        at: Point,
    ) -> Option<ElementId> {
        settings.enabled.then(|| {
            surface.create_text(
                text,
                at + settings.position().to_vec2(),
                &settings.style(),
                settings.halo().as_ref(),
            )
        })
    }

    fn gradient(&self, cx: &mut RefreshContext<'_>, first: NaiveDateTime) -> Vec<ElementId> {
        let s = &self.settings;
        let g = &s.sky_gradient;
        let Some(spp) = self.seconds_per_pixel().filter(|_| g.enabled) else {
            return Vec::new();
        };
        let now = cx.local_now();
        let data = cx.data;
        let step = f64::from(g.step.max(1));
        let push = ((now - first).num_seconds().max(0) as f64 / spp).trunc();
        let cloud_height = if g.cloud { g.cloud_height } else { 0.0 };
        let top = s.y + s.bar_max_height;

        let mut ids = Vec::new();
        let mut offset = 0.0;
        while push + offset <= s.span() {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "offsets stay within one day of milliseconds"
            )]
            let t = now + TimeDelta::milliseconds((offset * spp * 1000.0) as i64);
            let Some(main) = sky_color(&data.sun, t) else {
                break;
            };
            let x = s.x + push + offset;
            let line = |fill: Color| LineStyle {
                width: step,
                fill,
                ..LineStyle::default()
            };
            let surface = &mut cx.scene.surface;
            if g.cloud {
                let gray = main.lerp(CLOUD, cloud_cover(&data.forecast.hourly, t));
                ids.push(surface.create_line(
                    Point::new(x, top),
                    Point::new(x, top + cloud_height),
                    &line(gray),
                    None,
                ));
            }
            ids.push(surface.create_line(
                Point::new(x, top + cloud_height),
                Point::new(x, top + g.height),
                &line(main),
                None,
            ));
            offset += step;
        }
        ids
    }

    fn draw(&self, cx: &mut RefreshContext<'_>) -> Result<Vec<ElementId>, WidgetError> {
        let s = &self.settings;
        let data = cx.data;
        let hours = &data.forecast.hourly[..data.forecast.hourly.len().min(HOURS)];
        let labels = hours
            .iter()
            .map(|h| format::format_time(&h.at, &s.hour.format))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| WidgetError::Setting(err.to_string()))?;

        let mut ids = match hours.first() {
            Some(first) => self.gradient(cx, first.at),
            None => Vec::new(),
        };
        let surface = &mut cx.scene.surface;
        let bottom = s.y + s.bar_max_height;
        let bar = ShapeStyle {
            outline: None,
            fill: Some(s.bar_color),
            border_width: 0.0,
        };
        let mut wet = false;
        for (i, (hour, label)) in hours.iter().zip(&labels).enumerate() {
            let left = s.x + i as f64 * s.slot();
            let center = left + 2.0 + (s.bar_width / 2.0).trunc();
            let chance = hour.rain_chance.unwrap_or_default().clamp(0.0, 100.0);
            let height = s.bar_max_height * chance / 100.0;
            ids.push(surface.create_rectangle(
                Rect::new(left, bottom - height, left + s.bar_width, bottom),
                &bar,
            ));
            ids.extend(Self::text(
                surface,
                &s.hour.text,
                label,
                Point::new(center, s.y + HOUR_LABEL),
            ));
            if s.emoji.enabled {
                let sky = classify_conditions(
                    hour.conditions.as_deref(),
                    data.forecast.moon,
                    &data.sun,
                    hour.at,
                );
                ids.extend(Self::text(
                    surface,
                    &s.emoji,
                    sky.emoji().back,
                    Point::new(center, s.y + EMOJI),
                ));
            }
            let cover = match hour.cloud_cover {
                Some(c) => format!("{c:.0}%"),
                None => format!("{}%", format::PLACEHOLDER),
            };
            ids.extend(Self::text(
                surface,
                &s.cloud_cover,
                &cover,
                Point::new(center, s.y + CLOUD_LABEL),
            ));
            if let Some(amount) = hour.rain_amount.filter(|a| *a > 0.0) {
                wet = true;
                ids.extend(Self::text(
                    surface,
                    &s.rain_amount,
                    &format!("{amount:.2}{}", self.unit.suffix()),
                    Point::new(center, s.y + RAIN_LABEL),
                ));
            }
        }

        let frame = LineStyle::default();
        for y in [s.y, bottom] {
            ids.push(surface.create_line(
                Point::new(s.x, y),
                Point::new(s.x + s.span(), y),
                &frame,
                None,
            ));
        }
        if !hours.is_empty() && !wet && !data.forecast.rain_times.expects_rain() {
            ids.extend(Self::text(
                surface,
                &s.no_rain_warning,
                NO_RAIN,
                Point::new(s.x + s.slot() * 12.0, s.y + WARNING),
            ));
        }
        Ok(ids)
    }
}

impl Widget for RainForecastGraph {
    fn id(&self) -> WidgetId {
        WidgetId::RainForecastGraph
    }

    fn initialize(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
        let policy = self.policy(&cx.now);
        if !self.settings.enabled {
            return Ok(policy);
        }
        let group = self.draw(cx)?;
        cx.scene
            .store
            .insert(WidgetId::RainForecastGraph, StoredHandle::Group(group));
        Ok(policy)
    }

    fn refresh(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
        cx.scene.delete_widget(WidgetId::RainForecastGraph);
        self.initialize(cx)
    }
}
