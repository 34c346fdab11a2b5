// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated hour of a weather-station display.
//!
//! Drives the full widget set against a [`RecordingCanvas`] and a manual
//! clock. Host timers live in a min-heap keyed by due time; scripted data
//! pushes are interleaved with them. Trace events go to both a
//! [`PrettyPrintSink`] on stdout and a [`RecorderSink`], which is exported as
//! JSON at the end.
//!
//! ```text
//! cargo run -p station_demo [settings.toml]
//! RUST_LOG=debug cargo run -p station_demo
//! ```

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};
use kurbo::Size;
use tracing::info;
use tracing_subscriber::EnvFilter;

use weatherpane_core::clock::{ManualClock, WallClock};
use weatherpane_core::data::{
    BackgroundState, CurrentData, DailySunTimes, DataSource, ForecastData, ForecastPeriod,
    HistoryData, HistoryLine, HourlyForecast, MoonPhase, RainTimes, SunData, SunriseTimes,
    SunsetTimes,
};
use weatherpane_core::display::Display;
use weatherpane_core::scene::{DrawingSurface, RecordingCanvas};
use weatherpane_core::scheduler::{TimerHost, TimerId};
use weatherpane_core::trace::{
    BucketFiredEvent, TimerArmedEvent, TraceSink, Tracer, WidgetFailedEvent,
};
use weatherpane_debug::pretty::PrettyPrintSink;
use weatherpane_debug::recorder::RecorderSink;
use weatherpane_widgets::registry;
use weatherpane_widgets::settings::Settings;

const SIMULATED_MINUTES: i64 = 60;
/// Minutes between scripted observations.
const OBSERVATION_INTERVAL: i64 = 5;

// ---------------------------------------------------------------------------
// Host timers
// ---------------------------------------------------------------------------

/// One-shot timers ordered by due time.
struct HeapTimers {
    clock: ManualClock,
    pending: BinaryHeap<Reverse<(DateTime<Local>, TimerId)>>,
}

impl HeapTimers {
    fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            pending: BinaryHeap::new(),
        }
    }

    fn next_due(&self) -> Option<DateTime<Local>> {
        self.pending.peek().map(|Reverse((due, _))| *due)
    }

    fn pop(&mut self) -> Option<(DateTime<Local>, TimerId)> {
        self.pending.pop().map(|Reverse(entry)| entry)
    }
}

impl TimerHost for HeapTimers {
    fn arm(&mut self, timer: TimerId, delay: core::time::Duration) {
        let delay = TimeDelta::from_std(delay).unwrap_or_else(|_| TimeDelta::days(365));
        self.pending
            .push(Reverse((self.clock.now() + delay, timer)));
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Forwards every event to both sinks.
struct Tee<'a> {
    pretty: &'a mut PrettyPrintSink,
    recorder: &'a mut RecorderSink,
}

impl TraceSink for Tee<'_> {
    fn on_bucket_fired(&mut self, e: &BucketFiredEvent) {
        self.pretty.on_bucket_fired(e);
        self.recorder.on_bucket_fired(e);
    }

    fn on_timer_armed(&mut self, e: &TimerArmedEvent) {
        self.pretty.on_timer_armed(e);
        self.recorder.on_timer_armed(e);
    }

    fn on_widget_failed(&mut self, e: &WidgetFailedEvent<'_>) {
        self.pretty.on_widget_failed(e);
        self.recorder.on_widget_failed(e);
    }
}

// ---------------------------------------------------------------------------
// Scripted data
// ---------------------------------------------------------------------------

fn at(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
    date.and_hms_opt(h, m, 0).unwrap_or_default()
}

fn sun_times(date: NaiveDate) -> DailySunTimes {
    DailySunTimes {
        sunrise: SunriseTimes {
            astronomical_twilight: at(date, 4, 10),
            day: at(date, 5, 50),
        },
        sunset: SunsetTimes {
            start: at(date, 20, 20),
            astronomical_twilight: at(date, 22, 5),
        },
    }
}

/// Observation `step` of the hour: a slowly warming morning with the wind
/// backing from west to south-west.
fn observation(step: i64, now: NaiveDateTime) -> CurrentData {
    let t = step as f64;
    CurrentData {
        source: DataSource::Station,
        station_id: Some("KWADEMO7".to_owned()),
        temperature: Some(14.0 + 0.4 * t),
        feels_like: Some(13.0 + 0.4 * t),
        humidity: Some(82.0 - 1.5 * t),
        rain: Some(if step < 6 { 0.02 * t } else { 0.1 }),
        wind_speed: Some(4.0 + 0.5 * t),
        wind_gust: Some(9.0 + 0.8 * t),
        wind_direction: Some(270.0 - 4.0 * t),
        conditions: Some(if step < 6 { "Light rain" } else { "Partly cloudy" }.to_owned()),
        last_update: Some(now),
        observed_at: Some(now - TimeDelta::minutes(1)),
        ..CurrentData::default()
    }
}

fn history_line(step: i64, now: NaiveDateTime) -> HistoryLine {
    let current = observation(step, now);
    HistoryLine {
        at: now,
        temperature: current.temperature,
        wind_speed: current.wind_speed,
        wind_direction: current.wind_direction,
    }
}

/// A wet morning clearing by midday.
fn hourly_forecast(first: NaiveDateTime) -> Vec<HourlyForecast> {
    (0..24)
        .map(|i: i32| {
            let wet = i < 4;
            HourlyForecast {
                at: first + TimeDelta::hours(i64::from(i)),
                temperature: Some(14.0 + f64::from(i.min(8))),
                cloud_cover: Some(if wet { 90.0 } else { f64::from(60 - i.min(12) * 4) }),
                rain_chance: Some(if wet { 70.0 - 10.0 * f64::from(i) } else { 5.0 }),
                rain_amount: wet.then_some(0.05),
                conditions: Some(if wet { "Light rain" } else { "Partly cloudy" }.to_owned()),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)).expect("failed to load settings"),
        None => Settings::default(),
    };

    let start = Local
        .with_ymd_and_hms(2026, 6, 10, 6, 0, 0)
        .earliest()
        .expect("demo start time exists");
    let end = start + TimeDelta::minutes(SIMULATED_MINUTES);
    let clock = ManualClock::new(start);
    let today = start.date_naive();

    // -- display -------------------------------------------------------------
    let canvas = RecordingCanvas::new();
    let log = canvas.log();
    let widgets = registry::build(&settings, start).expect("widget ids are unique");
    let mut display = Display::new(
        DrawingSurface::new(Box::new(canvas), Size::new(1920.0, 1080.0)),
        widgets,
        Box::new(clock.clone()),
    );
    let mut timers = HeapTimers::new(clock.clone());

    // -- sinks ---------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();
    let mut tee = Tee {
        pretty: &mut pretty,
        recorder: &mut recorder,
    };
    let mut tracer = Tracer::new(&mut tee);

    display.start(&mut timers, &mut tracer);

    display.update_sun_data(
        SunData {
            today: Some(sun_times(today)),
            tomorrow: today.succ_opt().map(sun_times),
        },
        &mut timers,
        &mut tracer,
    );
    display.update_forecast_data(
        ForecastData {
            daytime: Some(ForecastPeriod {
                temperature: Some(24.0),
                rain_chance: Some(30.0),
                conditions: Some("Showers early".to_owned()),
            }),
            nighttime: Some(ForecastPeriod {
                temperature: Some(12.0),
                rain_chance: Some(10.0),
                conditions: Some("Clear".to_owned()),
            }),
            moon: Some(MoonPhase::WaxingGibbous),
            hourly: hourly_forecast(start.naive_local()),
            rain_times: RainTimes {
                start: None,
                end: Some(start.naive_local() + TimeDelta::hours(4)),
                already_raining: true,
            },
        },
        &mut timers,
        &mut tracer,
    );
    display.update_background(
        BackgroundState {
            path: None,
            requested_tags: vec!["rain".to_owned(), "morning".to_owned()],
            image_tags: Vec::new(),
            message: Some("No image matched: rain, morning".to_owned()),
        },
        &mut timers,
        &mut tracer,
    );

    // -- simulated loop ------------------------------------------------------
    let mut history = HistoryData::default();
    let mut step = 0;
    let mut next_observation = start;
    let mut timer_fires = 0_u32;
    let mut data_pushes = 0_u32;

    loop {
        let timer_due = timers.next_due().filter(|due| *due <= end);
        let observation_due = Some(next_observation).filter(|due| *due <= end);
        let timer_first = match (timer_due, observation_due) {
            (None, None) => break,
            (Some(timer), Some(obs)) => timer < obs,
            (Some(_), None) => true,
            (None, Some(_)) => false,
        };
        if timer_first {
            let Some((due, id)) = timers.pop() else {
                break;
            };
            clock.set(due);
            if display.on_timer(id, &mut timers, &mut tracer).is_some() {
                timer_fires += 1;
            }
        } else {
            clock.set(next_observation);
            let now = next_observation.naive_local();
            history.push(history_line(step, now));
            display.update_history_data(history.clone(), &mut timers, &mut tracer);
            display.update_current_data(observation(step, now), &mut timers, &mut tracer);
            data_pushes += 1;
            step += 1;
            next_observation += TimeDelta::minutes(OBSERVATION_INTERVAL);
        }
    }

    let live_timers = display.scheduler().live_timers();
    info!(
        timer_fires,
        data_pushes,
        live_timers,
        primitives = log.live_count(),
        created = log.created_count(),
        "simulation finished"
    );
    println!("On screen at {}:", clock.now().format("%H:%M:%S"));
    for text in log.texts() {
        println!("  {text}");
    }

    // -- export JSON ---------------------------------------------------------
    let path = "station_trace.json";
    let file = File::create(path).expect("failed to create station_trace.json");
    let mut writer = BufWriter::new(file);
    weatherpane_debug::json::export(recorder.as_bytes(), &mut writer)
        .expect("failed to write trace JSON");

    println!("Wrote {path} ({SIMULATED_MINUTES} simulated minutes)");
}
