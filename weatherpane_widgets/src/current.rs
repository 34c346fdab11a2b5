// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Labels fed by the current-conditions and forecast snapshots.

use chrono::NaiveDateTime;
use weatherpane_core::data::{CurrentData, DataSource};
use weatherpane_core::policy::{RefreshPolicy, Trigger, TriggerSet, delay};
use weatherpane_core::widget::{RefreshContext, WidgetError, WidgetId};

use crate::format;
use crate::label::Label;
use crate::settings::{FormattedTextSettings, TextElementSettings};

const fn on_current(minutes: u64) -> RefreshPolicy {
    RefreshPolicy::on(TriggerSet::EMPTY.with(Trigger::CurrentDataChanged))
        .every(delay::from_minutes(minutes))
}

const fn on_forecast(hours: u64) -> RefreshPolicy {
    RefreshPolicy::on(TriggerSet::EMPTY.with(Trigger::ForecastDataChanged))
        .every(delay::from_hours(hours))
}

fn current_label(
    id: WidgetId,
    settings: &TextElementSettings,
    policy: RefreshPolicy,
    text: fn(&CurrentData) -> Option<String>,
) -> Label {
    Label::fixed(
        id,
        settings.clone(),
        policy,
        Box::new(move |cx: &RefreshContext<'_>| Ok(text(&cx.data.current))),
    )
}

/// `21.5°`.
#[must_use]
pub fn current_temp(settings: &TextElementSettings) -> Label {
    current_label(WidgetId::CurrentTemp, settings, on_current(5), |c| {
        Some(format::temperature(c.temperature))
    })
}

/// `Feels Like: 20.1°`.
#[must_use]
pub fn feels_like(settings: &TextElementSettings) -> Label {
    current_label(WidgetId::FeelsLike, settings, on_current(5), |c| {
        Some(format!("Feels Like: {}", format::temperature(c.feels_like)))
    })
}

/// `Station: KXYZ123`, only while the data comes from a station.
#[must_use]
pub fn station(settings: &TextElementSettings) -> Label {
    current_label(WidgetId::Station, settings, on_current(15), |c| {
        match (c.source, &c.station_id) {
            (DataSource::Station, Some(id)) => Some(format!("Station: {id}")),
            _ => None,
        }
    })
}

/// `Source: Service`.
#[must_use]
pub fn source(settings: &TextElementSettings) -> Label {
    current_label(WidgetId::Source, settings, on_current(15), |c| {
        Some(format!("Source: {}", c.source))
    })
}

fn current_time_label(
    id: WidgetId,
    settings: &FormattedTextSettings,
    at: fn(&CurrentData) -> Option<NaiveDateTime>,
) -> Label {
    let fmt = settings.format.clone();
    Label::fixed(
        id,
        settings.text.clone(),
        on_current(15),
        Box::new(move |cx: &RefreshContext<'_>| {
            let Some(t) = at(&cx.data.current) else {
                return Ok(Some(format::PLACEHOLDER.to_owned()));
            };
            format::format_time(&t, &fmt)
                .map(Some)
                .map_err(|err| WidgetError::Setting(err.to_string()))
        }),
    )
}

/// When the data was last fetched, `--` until known.
#[must_use]
pub fn last_update(settings: &FormattedTextSettings) -> Label {
    current_time_label(WidgetId::LastUpdate, settings, |c| c.last_update)
}

/// When the observation was made, `--` until known.
#[must_use]
pub fn observed_time(settings: &FormattedTextSettings) -> Label {
    current_time_label(WidgetId::ObservedTime, settings, |c| c.observed_at)
}

/// `H: 24°`.
#[must_use]
pub fn high(settings: &TextElementSettings) -> Label {
    Label::fixed(
        WidgetId::High,
        settings.clone(),
        on_forecast(3),
        Box::new(|cx: &RefreshContext<'_>| {
            Ok(Some(format!(
                "H: {}",
                format::whole_temperature(cx.data.forecast.high())
            )))
        }),
    )
}

/// `L: 11°`.
#[must_use]
pub fn low(settings: &TextElementSettings) -> Label {
    Label::fixed(
        WidgetId::Low,
        settings.clone(),
        on_forecast(3),
        Box::new(|cx: &RefreshContext<'_>| {
            Ok(Some(format!(
                "L: {}",
                format::whole_temperature(cx.data.forecast.low())
            )))
        }),
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use weatherpane_core::data::{ForecastData, ForecastPeriod};

    use super::*;
    use crate::testing::Harness;

    #[test]
    fn temperature_placeholder_then_value() {
        let mut h = Harness::new();
        let mut label = current_temp(&TextElementSettings::default());
        let policy = h.initialize(&mut label).unwrap();
        assert!(policy.triggers().contains(Trigger::CurrentDataChanged));
        assert_eq!(policy.timer(), Some(delay::from_minutes(5)));
        assert!(h.log.shows("--°"));

        h.data.current.temperature = Some(21.5);
        h.refresh(&mut label).unwrap();
        assert!(h.log.shows("21.5°"));
    }

    #[test]
    fn station_only_for_station_source() {
        let mut h = Harness::new();
        h.data.current.station_id = Some("KSEA42".to_owned());
        let mut label = station(&TextElementSettings::default());
        let policy = h.initialize(&mut label).unwrap();
        assert_eq!(h.log.live_count(), 0, "service data shows no station");
        assert!(!policy.is_idle());

        h.data.current.source = DataSource::Station;
        h.refresh(&mut label).unwrap();
        assert!(h.log.shows("Station: KSEA42"));

        h.data.current.source = DataSource::Service;
        h.refresh(&mut label).unwrap();
        assert_eq!(h.log.live_count(), 0);
    }

    #[test]
    fn observed_time_uses_format() {
        let mut h = Harness::new();
        h.data.current.observed_at = NaiveDate::from_ymd_opt(2026, 6, 10)
            .unwrap()
            .and_hms_opt(14, 5, 0);
        let settings = FormattedTextSettings::new(
            TextElementSettings::default(),
            "Observed: %-I:%M %p",
        );
        h.initialize(&mut observed_time(&settings)).unwrap();
        assert!(h.log.shows("Observed: 2:05 PM"));
    }

    #[test]
    fn unknown_times_keep_a_placeholder() {
        let mut h = Harness::new();
        let settings = FormattedTextSettings::new(
            TextElementSettings::default().no_stroke(),
            "%Y-%m-%d %H:%M:%S",
        );
        let mut updated = last_update(&settings);
        let mut observed = observed_time(&settings);
        h.initialize(&mut updated).unwrap();
        h.initialize(&mut observed).unwrap();
        assert!(h.scene.is_live(WidgetId::LastUpdate));
        assert!(h.scene.is_live(WidgetId::ObservedTime));
        assert_eq!(
            h.log.texts().iter().filter(|t| t.as_str() == "--").count(),
            2,
            "one placeholder per label"
        );

        h.data.current.last_update = NaiveDate::from_ymd_opt(2026, 6, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0);
        h.refresh(&mut updated).unwrap();
        assert!(h.log.shows("2026-06-10 09:00:00"));
    }

    #[test]
    fn forecast_labels() {
        let mut h = Harness::new();
        h.data.forecast = ForecastData {
            daytime: Some(ForecastPeriod {
                temperature: Some(23.6),
                ..ForecastPeriod::default()
            }),
            ..ForecastData::default()
        };
        let policy = h.initialize(&mut high(&TextElementSettings::default())).unwrap();
        h.initialize(&mut low(&TextElementSettings::default())).unwrap();
        assert!(policy.triggers().contains(Trigger::ForecastDataChanged));
        assert_eq!(policy.timer(), Some(delay::from_hours(3)));
        assert!(h.log.shows("H: 24°"));
        assert!(h.log.shows("L: --°"));
    }
}
