// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Builds the full widget set from [`Settings`].

use chrono::{DateTime, Local};
use weatherpane_core::widget::{DuplicateWidget, Widget, WidgetSet};

use crate::background::{Background, image_tags};
use crate::current::{
    current_temp, feels_like, high, last_update, low, observed_time, source, station,
};
use crate::emoji::{WeatherEmoji, WeatherIcon};
use crate::gauge::{humidity_square, rain_square};
use crate::rain_graph::RainForecastGraph;
use crate::settings::Settings;
use crate::temperature_graph::TemperatureGraph;
use crate::time::{day_of_week, full_date, time, uptime};
use crate::wind::WindIndicator;

/// Every widget, in draw order. The background comes first so it ends up
/// beneath everything else.
///
/// `started` is the time the uptime label counts from.
pub fn build(settings: &Settings, started: DateTime<Local>) -> Result<WidgetSet, DuplicateWidget> {
    let widgets: [Box<dyn Widget>; 21] = [
        Box::new(Background::new(settings.background)),
        Box::new(time(&settings.time)),
        Box::new(day_of_week(&settings.day_of_week)),
        Box::new(full_date(&settings.full_date)),
        Box::new(uptime(&settings.uptime, started)),
        Box::new(current_temp(&settings.current_temp)),
        Box::new(feels_like(&settings.feels_like)),
        Box::new(high(&settings.high)),
        Box::new(low(&settings.low)),
        Box::new(station(&settings.station)),
        Box::new(source(&settings.source)),
        Box::new(last_update(&settings.last_update)),
        Box::new(observed_time(&settings.observed_time)),
        Box::new(image_tags(&settings.image_tags)),
        Box::new(WeatherEmoji::new(settings.weather_emoji.clone())),
        Box::new(WeatherIcon::new(
            settings.weather_icon.clone(),
            settings.assets_dir.clone(),
        )),
        Box::new(TemperatureGraph::new(settings.temperature_graph)),
        Box::new(RainForecastGraph::new(
            settings.rain_forecast.clone(),
            settings.units.precipitation,
        )),
        Box::new(humidity_square(&settings.humidity_square)),
        Box::new(rain_square(&settings.rain_square, settings.units.precipitation)),
        Box::new(WindIndicator::new(
            settings.wind_indicator.clone(),
            settings.units.wind,
        )),
    ];
    let mut set = WidgetSet::new();
    for widget in widgets {
        set.push(widget)?;
    }
    Ok(set)
}
