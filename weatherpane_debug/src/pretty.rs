// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use weatherpane_core::trace::{
    BucketFiredEvent, BucketSource, TimerArmedEvent, TraceSink, WidgetFailedEvent,
};
use weatherpane_core::widget::Phase;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Initialize => "initialize",
        Phase::Refresh => "refresh",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_bucket_fired(&mut self, e: &BucketFiredEvent) {
        let source = match e.source {
            BucketSource::Event(trigger) => format!("event:{trigger}"),
            BucketSource::Timer { id, delay } => {
                format!("timer:{id} ({:.3}s)", delay.as_secs_f64())
            }
        };
        let _ = writeln!(
            self.writer,
            "[fire] {source} drained={} refreshed={} skipped={} failed={}",
            e.drained, e.refreshed, e.skipped, e.failed,
        );
    }

    fn on_timer_armed(&mut self, e: &TimerArmedEvent) {
        let _ = writeln!(
            self.writer,
            "[arm] timer:{} delay={:.3}s entries={}",
            e.timer,
            e.delay.as_secs_f64(),
            e.entries,
        );
    }

    fn on_widget_failed(&mut self, e: &WidgetFailedEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[fail] {} {}: {}",
            e.widget,
            phase_name(e.phase),
            e.message,
        );
    }
}
