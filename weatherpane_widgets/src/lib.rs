// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widgets of a weather-station display.
//!
//! Everything here is built on the [`Widget`](weatherpane_core::widget::Widget)
//! contract from `weatherpane_core`: paint once in `initialize`, mutate the
//! same elements in `refresh`, and rebuild when a handle turns out dead.
//!
//! [`registry::build`] turns a [`Settings`](settings::Settings) tree into
//! the full [`WidgetSet`](weatherpane_core::widget::WidgetSet):
//!
//! | Module                | Widgets                                                    |
//! |-----------------------|------------------------------------------------------------|
//! | [`background`]        | background image, image tag message                        |
//! | [`time`]              | clock, weekday, date, uptime                               |
//! | [`current`]           | temperature, feels-like, high, low, station, source, times |
//! | [`emoji`]             | weather emoji stack, weather icon stack                    |
//! | [`gauge`]             | humidity and rain squares                                  |
//! | [`wind`]              | wind dial                                                  |
//! | [`temperature_graph`] | 24-hour temperature trace                                  |
//! | [`rain_graph`]        | hourly rain chance bars with a daylight band               |
//!
//! Support modules: [`settings`] (TOML configuration), [`format`] (text
//! helpers), [`conditions`] (sky classification) and [`label`] (the
//! single-text widget most of the above are made of).

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod background;
pub mod conditions;
pub mod current;
pub mod emoji;
pub mod format;
pub mod gauge;
pub mod label;
pub mod rain_graph;
pub mod registry;
pub mod settings;
pub mod temperature_graph;
pub mod time;
pub mod wind;

#[cfg(test)]
mod testing;
