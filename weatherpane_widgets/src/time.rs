// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clock, calendar and uptime labels.

use chrono::{DateTime, Local};
use weatherpane_core::policy::RefreshPolicy;
use weatherpane_core::widget::{RefreshContext, WidgetError, WidgetId};

use crate::format;
use crate::label::Label;
use crate::settings::{FormattedTextSettings, TextElementSettings};

fn formatted_now(
    id: WidgetId,
    settings: &FormattedTextSettings,
    policy: fn(&DateTime<Local>) -> RefreshPolicy,
) -> Label {
    let fmt = settings.format.clone();
    Label::new(
        id,
        settings.text.clone(),
        Box::new(move |cx: &RefreshContext<'_>| {
            format::format_time(&cx.local_now(), &fmt)
                .map(Some)
                .map_err(|err| WidgetError::Setting(err.to_string()))
        }),
        Box::new(move |cx: &RefreshContext<'_>| policy(&cx.now)),
    )
}

/// The wall-clock time, redrawn every second.
#[must_use]
pub fn time(settings: &FormattedTextSettings) -> Label {
    formatted_now(WidgetId::Time, settings, RefreshPolicy::next_second_after)
}

/// The weekday, redrawn at midnight.
#[must_use]
pub fn day_of_week(settings: &FormattedTextSettings) -> Label {
    formatted_now(WidgetId::DayOfWeek, settings, RefreshPolicy::on_midnight_after)
}

/// The date, redrawn at midnight.
#[must_use]
pub fn full_date(settings: &FormattedTextSettings) -> Label {
    formatted_now(WidgetId::FullDate, settings, RefreshPolicy::on_midnight_after)
}

/// `Uptime: 1d 2h 3m 4s` since `started`.
#[must_use]
pub fn uptime(settings: &TextElementSettings, started: DateTime<Local>) -> Label {
    Label::new(
        WidgetId::Uptime,
        settings.clone(),
        Box::new(move |cx: &RefreshContext<'_>| {
            Ok(Some(format!(
                "Uptime: {}",
                format::readable_duration(cx.now - started)
            )))
        }),
        Box::new(|cx: &RefreshContext<'_>| RefreshPolicy::next_second_after(&cx.now)),
    )
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use chrono::TimeDelta;
    use weatherpane_core::widget::Widget;

    use super::*;
    use crate::testing::Harness;

    #[test]
    fn time_aligns_to_next_second() {
        let mut h = Harness::new();
        h.now += TimeDelta::milliseconds(250);
        let settings = FormattedTextSettings::new(TextElementSettings::default(), "%-I:%M %p");
        let policy = h.initialize(&mut time(&settings)).unwrap();
        assert_eq!(policy.timer(), Some(Duration::from_millis(750)));
        assert!(h.log.shows("12:00 PM"));
    }

    #[test]
    fn date_labels_wait_for_midnight() {
        let mut h = Harness::new();
        let weekday = FormattedTextSettings::new(TextElementSettings::default(), "%A");
        let date = FormattedTextSettings::new(TextElementSettings::default(), "%B %d, %Y");
        let mut day = day_of_week(&weekday);
        let mut full = full_date(&date);
        let policy = h.initialize(&mut day).unwrap();
        h.initialize(&mut full).unwrap();
        assert_eq!(policy.timer(), Some(Duration::from_secs(12 * 3_600)));
        assert!(h.log.shows("Wednesday"));
        assert!(h.log.shows("June 10, 2026"));

        h.now += TimeDelta::days(1);
        h.refresh(&mut full).unwrap();
        assert!(h.log.shows("June 11, 2026"));
        assert!(h.log.shows("Wednesday"), "full date refresh leaves the weekday alone");
        assert_eq!(full.id(), WidgetId::FullDate);
    }

    #[test]
    fn bad_format_is_a_setting_error() {
        let mut h = Harness::new();
        let settings = FormattedTextSettings::new(TextElementSettings::default(), "%Q");
        let err = h.initialize(&mut time(&settings)).unwrap_err();
        assert!(matches!(err, WidgetError::Setting(_)));
    }

    #[test]
    fn uptime_counts_from_start() {
        let mut h = Harness::new();
        let started = h.now - TimeDelta::seconds(3 * 3_600 + 5);
        let mut label = uptime(&TextElementSettings::default(), started);
        h.initialize(&mut label).unwrap();
        assert!(h.log.shows("Uptime: 3h 0m 5s"));

        h.now += TimeDelta::seconds(1);
        h.refresh(&mut label).unwrap();
        assert!(h.log.shows("Uptime: 3h 0m 6s"));
    }
}
