// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget contract and the store of widget handles.
//!
//! A [`Widget`] paints itself once in [`Widget::initialize`] and then updates
//! its existing elements in [`Widget::refresh`]. Both return the
//! [`RefreshPolicy`] describing when it wants to run next.
//!
//! Handles live in the [`WidgetStore`], keyed by [`WidgetId`]. A refresh that
//! finds its stored handle missing or dead (after [`Scene::clear`], say)
//! re-runs `initialize` instead of touching the stale handle.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime};

use crate::data::Snapshots;
use crate::policy::RefreshPolicy;
use crate::scene::{DrawingSurface, ElementId, GlyphStack, SurfaceError};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Every widget the display knows how to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidgetId {
    /// Full-screen background image.
    Background,
    /// Wall-clock time.
    Time,
    /// Weekday name.
    DayOfWeek,
    /// Calendar date.
    FullDate,
    /// Process uptime.
    Uptime,
    /// Current temperature.
    CurrentTemp,
    /// Apparent temperature.
    FeelsLike,
    /// Forecast high.
    High,
    /// Forecast low.
    Low,
    /// Station identifier, shown only for station data.
    Station,
    /// Data source label.
    Source,
    /// Producer refresh time.
    LastUpdate,
    /// Observation time.
    ObservedTime,
    /// Background tag message.
    ImageTags,
    /// Stacked weather emoji.
    WeatherEmoji,
    /// Stacked weather icon.
    WeatherIcon,
    /// Humidity gauge.
    HumiditySquare,
    /// Rain gauge.
    RainSquare,
    /// Wind dial with history arrows.
    WindIndicator,
    /// Past 24 hours of temperatures.
    TemperatureGraph,
    /// Next 24 hours of rain chances over a sky gradient.
    RainForecastGraph,
}

impl WidgetId {
    /// Every widget id, in declaration order.
    pub const ALL: [Self; 21] = [
        Self::Background,
        Self::Time,
        Self::DayOfWeek,
        Self::FullDate,
        Self::Uptime,
        Self::CurrentTemp,
        Self::FeelsLike,
        Self::High,
        Self::Low,
        Self::Station,
        Self::Source,
        Self::LastUpdate,
        Self::ObservedTime,
        Self::ImageTags,
        Self::WeatherEmoji,
        Self::WeatherIcon,
        Self::HumiditySquare,
        Self::RainSquare,
        Self::WindIndicator,
        Self::TemperatureGraph,
        Self::RainForecastGraph,
    ];

    /// Position of this id in [`WidgetId::ALL`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable name used in logs and trace output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Time => "time",
            Self::DayOfWeek => "day_of_week",
            Self::FullDate => "full_date",
            Self::Uptime => "uptime",
            Self::CurrentTemp => "current_temp",
            Self::FeelsLike => "feels_like",
            Self::High => "high",
            Self::Low => "low",
            Self::Station => "station",
            Self::Source => "source",
            Self::LastUpdate => "last_update",
            Self::ObservedTime => "observed_time",
            Self::ImageTags => "image_tags",
            Self::WeatherEmoji => "weather_emoji",
            Self::WeatherIcon => "weather_icon",
            Self::HumiditySquare => "humidity_square",
            Self::RainSquare => "rain_square",
            Self::WindIndicator => "wind_indicator",
            Self::TemperatureGraph => "temperature_graph",
            Self::RainForecastGraph => "rain_forecast_graph",
        }
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which half of the widget contract was running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// [`Widget::initialize`].
    Initialize,
    /// [`Widget::refresh`].
    Refresh,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// The handle(s) a widget keeps between calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoredHandle {
    /// One element.
    Element(ElementId),
    /// A glyph stack.
    Glyphs(GlyphStack),
    /// Several elements in a widget-defined order.
    Group(Vec<ElementId>),
}

impl StoredHandle {
    /// Every element behind this handle.
    #[must_use]
    pub fn elements(&self) -> Vec<ElementId> {
        match self {
            Self::Element(id) => vec![*id],
            Self::Glyphs(stack) => stack.layers().to_vec(),
            Self::Group(ids) => ids.clone(),
        }
    }
}

/// Typed registry of widget handles.
#[derive(Clone, Debug, Default)]
pub struct WidgetStore {
    handles: HashMap<WidgetId, StoredHandle>,
}

impl WidgetStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `handle` for `id`, returning the previous one.
    pub fn insert(&mut self, id: WidgetId, handle: StoredHandle) -> Option<StoredHandle> {
        self.handles.insert(id, handle)
    }

    /// Removes and returns the handle for `id`.
    pub fn remove(&mut self, id: WidgetId) -> Option<StoredHandle> {
        self.handles.remove(&id)
    }

    /// The stored handle for `id`.
    #[must_use]
    pub fn get(&self, id: WidgetId) -> Option<&StoredHandle> {
        self.handles.get(&id)
    }

    /// The single element stored for `id`.
    #[must_use]
    pub fn element(&self, id: WidgetId) -> Option<ElementId> {
        match self.handles.get(&id)? {
            StoredHandle::Element(element) => Some(*element),
            _ => None,
        }
    }

    /// The glyph stack stored for `id`.
    #[must_use]
    pub fn glyphs(&self, id: WidgetId) -> Option<GlyphStack> {
        match self.handles.get(&id)? {
            StoredHandle::Glyphs(stack) => Some(*stack),
            _ => None,
        }
    }

    /// The element group stored for `id`.
    #[must_use]
    pub fn group(&self, id: WidgetId) -> Option<&[ElementId]> {
        match self.handles.get(&id)? {
            StoredHandle::Group(ids) => Some(ids),
            _ => None,
        }
    }

    /// Number of widgets with a stored handle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no widget has a stored handle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// The drawing surface together with the widget store.
#[derive(Debug)]
pub struct Scene {
    /// Drawing surface.
    pub surface: DrawingSurface,
    /// Widget handles.
    pub store: WidgetStore,
}

impl Scene {
    /// Creates a scene with an empty store.
    #[must_use]
    pub fn new(surface: DrawingSurface) -> Self {
        Self {
            surface,
            store: WidgetStore::new(),
        }
    }

    /// Whether `id` has a stored handle whose elements are all live.
    #[must_use]
    pub fn is_live(&self, id: WidgetId) -> bool {
        self.store.get(id).is_some_and(|handle| {
            handle
                .elements()
                .into_iter()
                .all(|element| self.surface.is_alive(element))
        })
    }

    /// Deletes every element stored for `id` and forgets the handle.
    pub fn delete_widget(&mut self, id: WidgetId) {
        if let Some(handle) = self.store.remove(id) {
            for element in handle.elements() {
                self.surface.delete(element);
            }
        }
    }

    /// Clears the surface. Stored handles stay behind, dead, so each widget
    /// rebuilds itself on its next refresh.
    pub fn clear(&mut self) {
        self.surface.clear();
    }
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// Everything a widget call may read or change.
#[derive(Debug)]
pub struct RefreshContext<'a> {
    /// Surface and store.
    pub scene: &'a mut Scene,
    /// Read-only snapshots.
    pub data: &'a Snapshots,
    /// Wall-clock time of this call.
    pub now: DateTime<Local>,
}

impl RefreshContext<'_> {
    /// `now` as a naive local timestamp, comparable with snapshot times.
    #[must_use]
    pub fn local_now(&self) -> NaiveDateTime {
        self.now.naive_local()
    }
}

/// Failure inside a widget call.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    /// A value the widget cannot do without is absent.
    #[error("{field} is missing from the {snapshot} snapshot")]
    MissingData {
        /// Snapshot name.
        snapshot: &'static str,
        /// Field name.
        field: &'static str,
    },
    /// The drawing surface refused an operation.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    /// The widget's settings cannot be honored.
    #[error("invalid setting: {0}")]
    Setting(String),
}

/// A self-contained display unit.
///
/// Implementations touch only their own [`WidgetStore`] entry.
pub trait Widget {
    /// Which widget this is.
    fn id(&self) -> WidgetId;

    /// First paint: create elements, store their handles, return a policy.
    ///
    /// A disabled widget creates nothing but still returns a policy so it
    /// keeps being polled.
    fn initialize(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError>;

    /// Incremental update.
    ///
    /// Must begin by checking [`Scene::is_live`] and delegating to
    /// [`initialize`](Self::initialize) when the handle is gone.
    fn refresh(&mut self, cx: &mut RefreshContext<'_>) -> Result<RefreshPolicy, WidgetError>;
}

// ---------------------------------------------------------------------------
// WidgetSet
// ---------------------------------------------------------------------------

/// A widget id was registered twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("widget `{0}` is already registered")]
pub struct DuplicateWidget(pub WidgetId);

/// The widgets of a display, in draw order.
#[derive(Default)]
pub struct WidgetSet {
    widgets: Vec<Box<dyn Widget>>,
    index: HashMap<WidgetId, usize>,
}

impl fmt::Debug for WidgetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.widgets.iter().map(|w| w.id()))
            .finish()
    }
}

impl WidgetSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a widget.
    pub fn push(&mut self, widget: Box<dyn Widget>) -> Result<(), DuplicateWidget> {
        let id = widget.id();
        if self.index.contains_key(&id) {
            return Err(DuplicateWidget(id));
        }
        self.index.insert(id, self.widgets.len());
        self.widgets.push(widget);
        Ok(())
    }

    /// The widget registered as `id`.
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut (dyn Widget + 'static)> {
        let idx = *self.index.get(&id)?;
        Some(self.widgets[idx].as_mut())
    }

    /// Widget ids in draw order.
    #[must_use]
    pub fn ids(&self) -> Vec<WidgetId> {
        self.widgets.iter().map(|w| w.id()).collect()
    }

    /// Widgets in draw order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Widget>> {
        self.widgets.iter_mut()
    }

    /// Number of widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
