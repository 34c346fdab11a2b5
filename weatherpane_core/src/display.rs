// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The display orchestrator.
//!
//! [`Display`] owns everything a refresh needs (scene, widgets, snapshots and
//! clock) next to the [`Scheduler`] that decides when refreshes happen. Hosts
//! drive it from three directions:
//!
//! - [`start`](Display::start) once, and again after a full rebuild.
//! - `update_*` whenever new data arrives.
//! - [`on_timer`](Display::on_timer) whenever a timer armed through the
//!   [`TimerHost`] elapses.
//!
//! Every entry point takes the host and a [`Tracer`], so the display itself
//! stays free of threads and event-loop types.

use core::fmt;

use tracing::{info, warn};

use crate::clock::WallClock;
use crate::data::{BackgroundState, CurrentData, ForecastData, HistoryData, Snapshots, SunData};
use crate::policy::{RefreshPolicy, Trigger, TriggerSet, delay};
use crate::scene::DrawingSurface;
use crate::scheduler::{FireSummary, Scheduler, TimerHost, TimerId};
use crate::trace::{Tracer, WidgetFailedEvent};
use crate::widget::{Phase, RefreshContext, Scene, WidgetError, WidgetId, WidgetSet};

/// Policy given to a widget whose `initialize` failed.
pub const INITIALIZE_RETRY: RefreshPolicy = RefreshPolicy::after(delay::from_minutes(1));

/// Scene, widgets, snapshots and scheduler wired together.
pub struct Display {
    scene: Scene,
    widgets: WidgetSet,
    scheduler: Scheduler,
    data: Snapshots,
    clock: Box<dyn WallClock>,
}

impl fmt::Debug for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Display")
            .field("scene", &self.scene)
            .field("widgets", &self.widgets)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

impl Display {
    /// Creates a display with empty snapshots. Nothing is drawn until
    /// [`start`](Self::start).
    #[must_use]
    pub fn new(surface: DrawingSurface, widgets: WidgetSet, clock: Box<dyn WallClock>) -> Self {
        Self {
            scene: Scene::new(surface),
            widgets,
            scheduler: Scheduler::new(),
            data: Snapshots::default(),
            clock,
        }
    }

    /// Replaces the initial snapshots.
    #[must_use]
    pub fn with_snapshots(mut self, data: Snapshots) -> Self {
        self.data = data;
        self
    }

    // -- Accessors --

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The current snapshots.
    #[must_use]
    pub fn snapshots(&self) -> &Snapshots {
        &self.data
    }

    /// The scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Registered widget ids in draw order.
    #[must_use]
    pub fn widget_ids(&self) -> Vec<WidgetId> {
        self.widgets.ids()
    }

    // -- Lifecycle --

    /// Clears the surface, initializes every widget in draw order and files
    /// the resulting policies.
    ///
    /// A widget whose `initialize` fails is retried after one minute; its
    /// next refresh finds no live handle and initializes again.
    pub fn start(&mut self, host: &mut dyn TimerHost, tracer: &mut Tracer<'_>) -> Vec<TimerId> {
        self.scheduler.reset();
        self.scene.clear();

        let now = self.clock.now();
        let mut results = Vec::with_capacity(self.widgets.len());
        for widget in self.widgets.iter_mut() {
            let id = widget.id();
            let mut cx = RefreshContext {
                scene: &mut self.scene,
                data: &self.data,
                now,
            };
            let policy = match widget.initialize(&mut cx) {
                Ok(policy) => policy,
                Err(err) => {
                    let message = err.to_string();
                    warn!(widget = %id, error = %message, "initialize failed, retrying later");
                    tracer.widget_failed(&WidgetFailedEvent {
                        widget: id,
                        phase: Phase::Initialize,
                        message: &message,
                    });
                    INITIALIZE_RETRY
                }
            };
            results.push((id, policy));
        }
        info!(
            widgets = results.len(),
            elements = self.scene.surface.element_count(),
            "display started"
        );
        self.scheduler.file(results, host, tracer)
    }

    /// Clears the surface without touching the scheduler.
    ///
    /// Widgets redraw themselves from scratch on their next refresh.
    pub fn reset(&mut self) {
        self.scene.clear();
        info!("display cleared");
    }

    // -- Events --

    /// Fires the bucket for `trigger`.
    pub fn notify(
        &mut self,
        trigger: Trigger,
        host: &mut dyn TimerHost,
        tracer: &mut Tracer<'_>,
    ) -> FireSummary {
        let Self {
            scene,
            widgets,
            scheduler,
            data,
            clock,
        } = self;
        scheduler.notify(trigger, host, tracer, |id| {
            refresh_widget(widgets, scene, data, &**clock, id)
        })
    }

    /// Forwards an elapsed host timer.
    ///
    /// Returns `None` if the timer's bucket already fired or was pruned.
    pub fn on_timer(
        &mut self,
        timer: TimerId,
        host: &mut dyn TimerHost,
        tracer: &mut Tracer<'_>,
    ) -> Option<FireSummary> {
        let Self {
            scene,
            widgets,
            scheduler,
            data,
            clock,
        } = self;
        scheduler.fire_timer(timer, host, tracer, |id| {
            refresh_widget(widgets, scene, data, &**clock, id)
        })
    }

    /// Replaces the current conditions and notifies their widgets.
    ///
    /// The background state is kept; it changes only through
    /// [`update_background`](Self::update_background).
    pub fn update_current_data(
        &mut self,
        current: CurrentData,
        host: &mut dyn TimerHost,
        tracer: &mut Tracer<'_>,
    ) -> FireSummary {
        let background = core::mem::take(&mut self.data.current.background);
        self.data.current = current;
        self.data.current.background = background;
        self.notify(Trigger::CurrentDataChanged, host, tracer)
    }

    /// Replaces the forecast and notifies its widgets.
    pub fn update_forecast_data(
        &mut self,
        forecast: ForecastData,
        host: &mut dyn TimerHost,
        tracer: &mut Tracer<'_>,
    ) -> FireSummary {
        self.data.forecast = forecast;
        self.notify(Trigger::ForecastDataChanged, host, tracer)
    }

    /// Replaces the history and notifies its widgets.
    pub fn update_history_data(
        &mut self,
        history: HistoryData,
        host: &mut dyn TimerHost,
        tracer: &mut Tracer<'_>,
    ) -> FireSummary {
        self.data.history = history;
        self.notify(Trigger::HistoryDataChanged, host, tracer)
    }

    /// Replaces the sun times and notifies their widgets.
    pub fn update_sun_data(
        &mut self,
        sun: SunData,
        host: &mut dyn TimerHost,
        tracer: &mut Tracer<'_>,
    ) -> FireSummary {
        self.data.sun = sun;
        self.notify(Trigger::SunDataChanged, host, tracer)
    }

    /// Replaces the background state and notifies its widgets.
    pub fn update_background(
        &mut self,
        background: BackgroundState,
        host: &mut dyn TimerHost,
        tracer: &mut Tracer<'_>,
    ) -> FireSummary {
        self.data.current.background = background;
        self.notify(Trigger::BackgroundChanged, host, tracer)
    }
}

fn refresh_widget(
    widgets: &mut WidgetSet,
    scene: &mut Scene,
    data: &Snapshots,
    clock: &dyn WallClock,
    id: WidgetId,
) -> Result<RefreshPolicy, WidgetError> {
    let Some(widget) = widgets.get_mut(id) else {
        warn!(widget = %id, "no widget registered under this id");
        return Ok(RefreshPolicy::on(TriggerSet::EMPTY));
    };
    let mut cx = RefreshContext {
        scene,
        data,
        now: clock.now(),
    };
    widget.refresh(&mut cx)
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use chrono::{Local, TimeZone};
    use kurbo::{Point, Size};

    use super::*;
    use crate::clock::ManualClock;
    use crate::scene::{CanvasLog, RecordingCanvas, TextStyle};
    use crate::widget::{StoredHandle, Widget};

    #[derive(Default)]
    struct Timers {
        armed: Vec<(TimerId, Duration)>,
    }

    impl TimerHost for Timers {
        fn arm(&mut self, timer: TimerId, delay: Duration) {
            self.armed.push((timer, delay));
        }
    }

    struct Temperature;

    impl Temperature {
        fn text(cx: &RefreshContext<'_>) -> String {
            match cx.data.current.temperature {
                Some(t) => format!("{t:.1}°"),
                None => "--°".to_owned(),
            }
        }

        fn policy() -> RefreshPolicy {
            RefreshPolicy::triggered_by([Trigger::CurrentDataChanged]).every(delay::from_minutes(5))
        }
    }

    impl Widget for Temperature {
        fn id(&self) -> WidgetId {
            WidgetId::CurrentTemp
        }

        fn initialize(
            &mut self,
            cx: &mut RefreshContext<'_>,
        ) -> Result<RefreshPolicy, WidgetError> {
            let text = Self::text(cx);
            let id = cx
                .scene
                .surface
                .create_text(&text, Point::new(10.0, 10.0), &TextStyle::default(), None);
            cx.scene.store.insert(self.id(), StoredHandle::Element(id));
            Ok(Self::policy())
        }

        fn refresh(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
            let Some(id) = cx.scene.store.element(self.id()).filter(|_| cx.scene.is_live(self.id()))
            else {
                return self.initialize(cx);
            };
            let text = Self::text(cx);
            cx.scene.surface.update_text(id, &text);
            Ok(Self::policy())
        }
    }

    struct Broken;

    impl Widget for Broken {
        fn id(&self) -> WidgetId {
            WidgetId::High
        }

        fn initialize(&mut self, _: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
            Err(WidgetError::MissingData {
                snapshot: "forecast",
                field: "daytime",
            })
        }

        fn refresh(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError> {
            self.initialize(cx)
        }
    }

    fn display(widgets: WidgetSet) -> (Display, CanvasLog) {
        let canvas = RecordingCanvas::new();
        let log = canvas.log();
        let surface = DrawingSurface::new(Box::new(canvas), Size::new(800.0, 480.0));
        let start = Local.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        let display = Display::new(surface, widgets, Box::new(ManualClock::new(start)));
        (display, log)
    }

    fn temperature_only() -> WidgetSet {
        let mut widgets = WidgetSet::new();
        widgets.push(Box::new(Temperature)).unwrap();
        widgets
    }

    #[test]
    fn start_draws_and_arms() {
        let (mut display, log) = display(temperature_only());
        let mut timers = Timers::default();
        let armed = display.start(&mut timers, &mut Tracer::none());
        assert_eq!(armed.len(), 1);
        assert_eq!(timers.armed[0].1, delay::from_minutes(5));
        assert!(log.shows("--°"));
    }

    #[test]
    fn current_push_updates_text() {
        let (mut display, log) = display(temperature_only());
        let mut timers = Timers::default();
        display.start(&mut timers, &mut Tracer::none());

        let current = CurrentData {
            temperature: Some(21.5),
            ..CurrentData::default()
        };
        let summary = display.update_current_data(current, &mut timers, &mut Tracer::none());
        assert_eq!(summary.refreshed, 1);
        assert!(log.shows("21.5°"));
        assert!(!log.shows("--°"));
        assert_eq!(display.scene().surface.element_count(), 1);
    }

    #[test]
    fn current_push_keeps_background() {
        let (mut display, _) = display(WidgetSet::new());
        let mut timers = Timers::default();
        let background = BackgroundState {
            message: Some("Tags: rain".to_owned()),
            ..BackgroundState::default()
        };
        display.update_background(background, &mut timers, &mut Tracer::none());
        display.update_current_data(CurrentData::default(), &mut timers, &mut Tracer::none());
        assert_eq!(
            display.snapshots().current.background.message.as_deref(),
            Some("Tags: rain")
        );
    }

    #[test]
    fn reset_then_timer_rebuilds_same_primitives() {
        let (mut display, log) = display(temperature_only());
        let mut timers = Timers::default();
        display.start(&mut timers, &mut Tracer::none());
        let before = display.scene().surface.primitive_count();

        display.reset();
        assert_eq!(log.live_count(), 0);

        let first = timers.armed[0].0;
        let summary = display
            .on_timer(first, &mut timers, &mut Tracer::none())
            .unwrap();
        assert_eq!(summary.refreshed, 1);
        assert_eq!(display.scene().surface.primitive_count(), before);
        assert_eq!(log.live_count(), before);
    }

    #[test]
    fn failing_initialize_gets_retry_timer() {
        let mut widgets = temperature_only();
        widgets.push(Box::new(Broken)).unwrap();
        let (mut display, log) = display(widgets);
        let mut timers = Timers::default();
        let armed = display.start(&mut timers, &mut Tracer::none());
        assert_eq!(armed.len(), 2);
        assert!(timers.armed.iter().any(|(_, d)| *d == delay::from_minutes(1)));
        assert!(log.shows("--°"), "other widgets still drew");
    }

    #[test]
    fn stale_timer_is_ignored() {
        let (mut display, _) = display(temperature_only());
        let mut timers = Timers::default();
        display.start(&mut timers, &mut Tracer::none());
        assert!(
            display
                .on_timer(TimerId(42), &mut timers, &mut Tracer::none())
                .is_none()
        );
    }
}
