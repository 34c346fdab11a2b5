// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structured diagnostics for the refresh loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! scheduler and display call as buckets fire and timers are armed. All
//! method bodies default to no-ops, so implementing only the events you care
//! about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! Human-oriented logging goes through `tracing` regardless of this feature;
//! sinks are for tools that want typed events (recorders, test doubles).
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).

use core::time::Duration;

use crate::policy::Trigger;
use crate::scheduler::TimerId;
use crate::widget::{Phase, WidgetId};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Which bucket fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BucketSource {
    /// A domain event bucket.
    Event(Trigger),
    /// A timer bucket.
    Timer {
        /// The host timer that fired.
        id: TimerId,
        /// The delay it was armed with.
        delay: Duration,
    },
}

/// Emitted after a bucket has been drained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BucketFiredEvent {
    /// Which bucket.
    pub source: BucketSource,
    /// Entries taken out of the bucket.
    pub drained: u32,
    /// Entries whose widget was refreshed successfully.
    pub refreshed: u32,
    /// Entries skipped because another bucket already fired them.
    pub skipped: u32,
    /// Entries whose refresh returned an error.
    pub failed: u32,
}

/// Emitted when a host timer is armed for a new timer bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerArmedEvent {
    /// Timer bucket id.
    pub timer: TimerId,
    /// Requested delay.
    pub delay: Duration,
    /// Entries waiting on the timer.
    pub entries: u32,
}

/// Emitted when a widget call fails.
#[derive(Clone, Copy, Debug)]
pub struct WidgetFailedEvent<'a> {
    /// Which widget.
    pub widget: WidgetId,
    /// Which call.
    pub phase: Phase,
    /// Rendered error.
    pub message: &'a str,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the refresh loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a bucket is drained.
    fn on_bucket_fired(&mut self, e: &BucketFiredEvent) {
        _ = e;
    }

    /// Called when a host timer is armed.
    fn on_timer_armed(&mut self, e: &TimerArmedEvent) {
        _ = e;
    }

    /// Called when a widget call fails.
    fn on_widget_failed(&mut self, e: &WidgetFailedEvent<'_>) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`BucketFiredEvent`].
    #[inline]
    pub fn bucket_fired(&mut self, e: &BucketFiredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_bucket_fired(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TimerArmedEvent`].
    #[inline]
    pub fn timer_armed(&mut self, e: &TimerArmedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_timer_armed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`WidgetFailedEvent`].
    #[inline]
    pub fn widget_failed(&mut self, e: &WidgetFailedEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_widget_failed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}
