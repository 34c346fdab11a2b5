// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wind dial with fading history arrows.
//!
//! The dial is a circle of `radius` around the configured center. The
//! primary arrow points toward the current direction and overshoots the
//! dial (`1.2 * radius`); history arrows stop just inside it
//! (`0.95 * radius`) and fade from dim (oldest) to bright (newest).
//!
//! ```text
//!            N
//!        .-""|""-.
//!      /     |     \      12.0 MPH
//!     |      o      |     (18.5 MPH)
//!      \    /      /      225° (SW)
//!        '-/-..-'
//! ```

use kurbo::{Point, Rect, Vec2};
use tracing::trace;
use weatherpane_core::data::HistoryData;
use weatherpane_core::policy::{RefreshPolicy, Trigger, TriggerSet, delay};
use weatherpane_core::scene::{ArrowHead, Color, ElementId, Halo, LineStyle, ShapeStyle};
use weatherpane_core::widget::{RefreshContext, StoredHandle, Widget, WidgetError, WidgetId};

use crate::format::compass_point;
use crate::settings::{TextElementSettings, WindIndicatorSettings, WindUnit};

const POLICY: RefreshPolicy = RefreshPolicy::on(
    TriggerSet::EMPTY
        .with(Trigger::CurrentDataChanged)
        .with(Trigger::HistoryDataChanged),
)
.every(delay::from_minutes(2));

const PRIMARY_REACH: f64 = 1.2;
const HISTORY_REACH: f64 = 0.95;
const LABEL_SPACING: f64 = 30.0;

const PRIMARY_HALO: Halo = Halo {
    color: Color::BLACK,
    width: 2.0,
};

/// Where a line of `length` from `center` toward `degrees` (clockwise
/// from north) ends.
#[must_use]
pub fn tip(center: Point, degrees: f64, length: f64) -> Point {
    let angle = (degrees - 90.0).to_radians();
    center + Vec2::new(angle.cos(), angle.sin()) * length
}

/// Distinct earlier directions, newest first.
///
/// Consecutive repeats collapse into one entry, and a direction equal to
/// `current` is skipped at the front. At most `limit` entries are returned.
#[must_use]
pub fn history_directions(current: Option<f64>, history: &HistoryData, limit: usize) -> Vec<f64> {
    let mut last = current;
    let mut directions = Vec::with_capacity(limit);
    for direction in history.recent().filter_map(|line| line.wind_direction) {
        if directions.len() >= limit {
            break;
        }
        if last != Some(direction) {
            directions.push(direction);
            last = Some(direction);
        }
    }
    directions
}

/// Gray level of history arrow `index` out of `count`, dimmest first.
#[must_use]
pub fn history_fade(index: usize, count: usize) -> Color {
    let fade = 0.1 + 0.5 * (index + 1) as f64 / count.max(1) as f64;
    Color::gray_fraction(fade)
}

/// The wind dial widget.
#[derive(Debug)]
pub struct WindIndicator {
    settings: WindIndicatorSettings,
    unit: WindUnit,
}

/// Element handles, in group order.
struct Parts<'a> {
    history: &'a [ElementId],
    primary: ElementId,
    wind: ElementId,
    gust: ElementId,
    direction: ElementId,
}

impl<'a> Parts<'a> {
    /// Splits `[dial, history.., primary, wind, gust, direction]`.
    fn split(group: &'a [ElementId]) -> Option<Self> {
        let (_dial, rest) = group.split_first()?;
        let [history @ .., primary, wind, gust, direction] = rest else {
            return None;
        };
        Some(Self {
            history,
            primary: *primary,
            wind: *wind,
            gust: *gust,
            direction: *direction,
        })
    }
}

impl WindIndicator {
    /// Creates the widget showing speeds in `unit`.
    #[must_use]
    pub fn new(settings: WindIndicatorSettings, unit: WindUnit) -> Self {
        Self { settings, unit }
    }

    fn label_at(
        &self,
        cx: &mut RefreshContext<'_>,
        settings: &TextElementSettings,
        dy: f64,
    ) -> ElementId {
        cx.scene.surface.create_text(
            "",
            self.settings.center() + Vec2::new(0.0, dy),
            &settings.style(),
            settings.halo().as_ref(),
        )
    }

    fn apply(&self, cx: &mut RefreshContext<'_>, parts: &Parts<'_>) {
        let center = self.settings.center();
        let radius = self.settings.radius;
        let current = &cx.data.current;
        let suffix = self.unit.suffix();
        let surface = &mut cx.scene.surface;

        let heading = current.wind_direction.unwrap_or(0.0);
        surface.move_segment(parts.primary, center, tip(center, heading, radius * PRIMARY_REACH));

        let wind = match current.wind_speed {
            Some(speed) => format!("{speed:.1} {suffix}"),
            None => format!("-- {suffix}"),
        };
        let gust = match current.wind_gust {
            Some(speed) => format!("({speed:.1} {suffix})"),
            None => format!("(-- {suffix})"),
        };
        let direction = match current.wind_direction {
            Some(degrees) => format!("{degrees:.0}° ({})", compass_point(degrees)),
            None => "--° (--)".to_owned(),
        };
        surface.update_text(parts.wind, &wind);
        surface.update_text(parts.gust, &gust);
        surface.update_text(parts.direction, &direction);

        let past = history_directions(
            current.wind_direction,
            &cx.data.history,
            parts.history.len(),
        );
        trace!(?past, "wind history");
        // Newest direction takes the brightest (last) arrow; leftovers
        // collapse onto the center.
        for (slot, arrow) in parts.history.iter().rev().enumerate() {
            let end = past
                .get(slot)
                .map_or(center, |&degrees| tip(center, degrees, radius * HISTORY_REACH));
            surface.move_segment(*arrow, center, end);
        }
    }
}

impl Widget for WindIndicator {
    fn id(&self) -> WidgetId {
        WidgetId::WindIndicator
    }

    fn initialize(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
        if !self.settings.enabled {
            return Ok(POLICY);
        }
        let center = self.settings.center();
        let radius = self.settings.radius;
        let count = self.settings.history_arrows;

        let mut group = Vec::with_capacity(count + 5);
        group.push(cx.scene.surface.create_oval(
            Rect::from_center_size(center, (radius * 2.0, radius * 2.0)),
            &ShapeStyle {
                border_width: 3.0,
                ..ShapeStyle::default()
            },
        ));
        for i in 0..count {
            group.push(cx.scene.surface.create_line(
                center,
                center,
                &LineStyle {
                    width: 3.0,
                    fill: history_fade(i, count),
                    arrow: Some(ArrowHead::Last),
                    smooth: false,
                },
                None,
            ));
        }
        group.push(cx.scene.surface.create_line(
            center,
            tip(center, 0.0, radius * PRIMARY_REACH),
            &LineStyle {
                width: 5.0,
                fill: Color::WHITE,
                arrow: Some(ArrowHead::Last),
                smooth: false,
            },
            Some(&PRIMARY_HALO),
        ));
        group.push(self.label_at(cx, &self.settings.wind, -LABEL_SPACING));
        group.push(self.label_at(cx, &self.settings.gust, 0.0));
        group.push(self.label_at(cx, &self.settings.direction, LABEL_SPACING));

        if let Some(parts) = Parts::split(&group) {
            self.apply(cx, &parts);
        }
        cx.scene
            .store
            .insert(WidgetId::WindIndicator, StoredHandle::Group(group));
        Ok(POLICY)
    }

    fn refresh(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
        if !self.settings.enabled {
            cx.scene.delete_widget(WidgetId::WindIndicator);
            return Ok(POLICY);
        }
        let group = cx
            .scene
            .store
            .group(WidgetId::WindIndicator)
            .filter(|_| cx.scene.is_live(WidgetId::WindIndicator))
            .map(<[_]>::to_vec);
        match group.as_deref().and_then(Parts::split) {
            Some(parts) => {
                self.apply(cx, &parts);
                Ok(POLICY)
            }
            None => {
                cx.scene.delete_widget(WidgetId::WindIndicator);
                self.initialize(cx)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use weatherpane_core::data::HistoryLine;
    use weatherpane_core::scene::{Coords, PrimitiveKind};

    use super::*;
    use crate::testing::Harness;

    fn at(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, 10)
            .unwrap()
            .and_hms_opt(11, minute, 0)
            .unwrap()
    }

    fn history(directions: &[f64]) -> HistoryData {
        directions
            .iter()
            .enumerate()
            .map(|(i, &d)| HistoryLine {
                at: at(u32::try_from(i).unwrap()),
                temperature: None,
                wind_speed: None,
                wind_direction: Some(d),
            })
            .collect()
    }

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    fn end_of(h: &Harness, element: ElementId) -> Point {
        let primitive = h.scene.surface.primary(element).unwrap();
        match h.log.primitive(primitive).unwrap().coords {
            Coords::Span(_, end) => end,
            Coords::At(p) => p,
        }
    }

    fn dial(history_arrows: usize) -> WindIndicator {
        WindIndicator::new(
            WindIndicatorSettings {
                x: 100.0,
                y: 100.0,
                radius: 50.0,
                history_arrows,
                ..WindIndicatorSettings::default()
            },
            WindUnit::Mph,
        )
    }

    #[test]
    fn tip_points_clockwise_from_north() {
        let c = Point::new(10.0, 10.0);
        assert!(close(tip(c, 0.0, 5.0), Point::new(10.0, 5.0)));
        assert!(close(tip(c, 90.0, 5.0), Point::new(15.0, 10.0)));
        assert!(close(tip(c, 180.0, 5.0), Point::new(10.0, 15.0)));
        assert!(close(tip(c, 270.0, 5.0), Point::new(5.0, 10.0)));
    }

    #[test]
    fn history_is_deduped_newest_first() {
        // Oldest to newest.
        let h = history(&[10.0, 20.0, 20.0, 30.0, 45.0, 45.0]);
        assert_eq!(history_directions(Some(45.0), &h, 5), vec![30.0, 20.0, 10.0]);
        assert_eq!(history_directions(None, &h, 2), vec![45.0, 30.0]);
        assert!(history_directions(Some(1.0), &h, 0).is_empty());
    }

    #[test]
    fn fades_brighten_toward_newest() {
        assert_eq!(history_fade(0, 5), Color::gray_fraction(0.2));
        assert_eq!(history_fade(4, 5), Color::gray_fraction(0.6));
    }

    #[test]
    fn placeholders_without_data() {
        let mut h = Harness::new();
        let mut wind = dial(3);
        let policy = h.initialize(&mut wind).unwrap();
        assert!(policy.triggers().contains(Trigger::HistoryDataChanged));
        assert_eq!(policy.timer(), Some(delay::from_minutes(2)));
        assert!(h.log.shows("-- MPH"));
        assert!(h.log.shows("(-- MPH)"));
        assert!(h.log.shows("--° (--)"));
        assert_eq!(h.log.count_kind(PrimitiveKind::Oval), 1);
        // Three history arrows, the primary and its eight halo copies.
        assert_eq!(h.log.count_kind(PrimitiveKind::Line), 12);

        let group = h.scene.store.group(WidgetId::WindIndicator).unwrap().to_vec();
        assert!(close(end_of(&h, group[4]), Point::new(100.0, 40.0)));
    }

    #[test]
    fn refresh_points_arrows() {
        let mut h = Harness::new();
        let mut wind = dial(3);
        h.initialize(&mut wind).unwrap();

        h.data.current.wind_speed = Some(12.0);
        h.data.current.wind_gust = Some(18.46);
        h.data.current.wind_direction = Some(90.0);
        h.data.history = history(&[180.0, 90.0]);
        h.refresh(&mut wind).unwrap();

        assert!(h.log.shows("12.0 MPH"));
        assert!(h.log.shows("(18.5 MPH)"));
        assert!(h.log.shows("90° (E)"));

        let group = h.scene.store.group(WidgetId::WindIndicator).unwrap().to_vec();
        let center = Point::new(100.0, 100.0);
        assert!(close(end_of(&h, group[4]), Point::new(160.0, 100.0)));
        // Newest distinct direction (180) on the brightest arrow.
        assert!(close(end_of(&h, group[3]), Point::new(100.0, 147.5)));
        assert!(close(end_of(&h, group[2]), center));
        assert!(close(end_of(&h, group[1]), center));
    }

    #[test]
    fn heals_when_a_label_is_gone() {
        let mut h = Harness::new();
        let mut wind = dial(2);
        h.initialize(&mut wind).unwrap();
        let live = h.log.live_count();
        let label = *h.scene.store.group(WidgetId::WindIndicator).unwrap().last().unwrap();
        h.scene.surface.delete(label);

        h.refresh(&mut wind).unwrap();
        assert!(h.scene.is_live(WidgetId::WindIndicator));
        assert_eq!(h.log.live_count(), live);
    }

    #[test]
    fn kph_suffix() {
        let mut h = Harness::new();
        h.data.current.wind_speed = Some(5.0);
        let mut wind = WindIndicator::new(WindIndicatorSettings::default(), WindUnit::Kph);
        h.initialize(&mut wind).unwrap();
        assert!(h.log.shows("5.0 KPH"));
    }
}
