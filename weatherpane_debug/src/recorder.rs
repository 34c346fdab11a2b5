// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as little-endian records, one tag byte each. [`decode`] reads
//! them back as an iterator of [`RecordedEvent`].
//!
//! Delays are stored as whole nanoseconds, saturating at `u64::MAX`. Strings
//! are length-prefixed UTF-8, cut at a char boundary below 4 GiB.

use core::time::Duration;

use weatherpane_core::policy::Trigger;
use weatherpane_core::scheduler::TimerId;
use weatherpane_core::trace::{
    BucketFiredEvent, BucketSource, TimerArmedEvent, TraceSink, WidgetFailedEvent,
};
use weatherpane_core::widget::{Phase, WidgetId};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_BUCKET_FIRED: u8 = 1;
const TAG_TIMER_ARMED: u8 = 2;
const TAG_WIDGET_FAILED: u8 = 3;

const SOURCE_EVENT: u8 = 0;
const SOURCE_TIMER: u8 = 1;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_delay(&mut self, d: Duration) {
        self.write_u64(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX));
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "both enums have far fewer than 256 variants"
    )]
    fn write_index(&mut self, index: usize) {
        self.write_u8(index as u8);
    }

    fn write_str(&mut self, s: &str) {
        let s = clamp_str(s, usize::try_from(u32::MAX).unwrap_or(usize::MAX));
        self.write_u32(u32::try_from(s.len()).unwrap_or(u32::MAX));
        self.buf.extend_from_slice(s.as_bytes());
    }
}

/// The longest prefix of `s` that fits in `max` bytes and ends on a char
/// boundary.
fn clamp_str(s: &str, max: usize) -> &str {
    &s[..s.floor_char_boundary(max)]
}

impl TraceSink for RecorderSink {
    fn on_bucket_fired(&mut self, e: &BucketFiredEvent) {
        self.write_u8(TAG_BUCKET_FIRED);
        match e.source {
            BucketSource::Event(trigger) => {
                self.write_u8(SOURCE_EVENT);
                self.write_index(trigger.index());
            }
            BucketSource::Timer { id, delay } => {
                self.write_u8(SOURCE_TIMER);
                self.write_u64(id.0);
                self.write_delay(delay);
            }
        }
        self.write_u32(e.drained);
        self.write_u32(e.refreshed);
        self.write_u32(e.skipped);
        self.write_u32(e.failed);
    }

    fn on_timer_armed(&mut self, e: &TimerArmedEvent) {
        self.write_u8(TAG_TIMER_ARMED);
        self.write_u64(e.timer.0);
        self.write_delay(e.delay);
        self.write_u32(e.entries);
    }

    fn on_widget_failed(&mut self, e: &WidgetFailedEvent<'_>) {
        self.write_u8(TAG_WIDGET_FAILED);
        self.write_index(e.widget.index());
        self.write_u8(match e.phase {
            Phase::Initialize => 0,
            Phase::Refresh => 1,
        });
        self.write_str(e.message);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`BucketFiredEvent`].
    BucketFired(BucketFiredEvent),
    /// A [`TimerArmedEvent`].
    TimerArmed(TimerArmedEvent),
    /// A [`WidgetFailedEvent`] with an owned message.
    WidgetFailed {
        /// Which widget.
        widget: WidgetId,
        /// Which call.
        phase: Phase,
        /// Rendered error.
        message: String,
    },
}

/// Decodes a recording produced by [`RecorderSink`].
///
/// Iteration stops at the first truncated record or unknown tag.
#[must_use]
pub fn decode(data: &[u8]) -> DecodeIter<'_> {
    DecodeIter { data, pos: 0 }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take(&mut self, n: usize) -> Option<&[u8]> {
        let end = self.pos.checked_add(n)?;
        let bytes = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        Some(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.take(4)?.try_into().ok()?))
    }

    fn read_u64(&mut self) -> Option<u64> {
        Some(u64::from_le_bytes(self.take(8)?.try_into().ok()?))
    }

    fn read_delay(&mut self) -> Option<Duration> {
        Some(Duration::from_nanos(self.read_u64()?))
    }

    fn read_string(&mut self) -> Option<String> {
        let len = usize::try_from(self.read_u32()?).ok()?;
        let bytes = self.take(len)?;
        Some(String::from_utf8_lossy(bytes).into_owned())
    }

    fn decode_bucket_fired(&mut self) -> Option<RecordedEvent> {
        let source = match self.read_u8()? {
            SOURCE_EVENT => {
                BucketSource::Event(*Trigger::ALL.get(usize::from(self.read_u8()?))?)
            }
            SOURCE_TIMER => BucketSource::Timer {
                id: TimerId(self.read_u64()?),
                delay: self.read_delay()?,
            },
            _ => return None,
        };
        Some(RecordedEvent::BucketFired(BucketFiredEvent {
            source,
            drained: self.read_u32()?,
            refreshed: self.read_u32()?,
            skipped: self.read_u32()?,
            failed: self.read_u32()?,
        }))
    }

    fn decode_timer_armed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TimerArmed(TimerArmedEvent {
            timer: TimerId(self.read_u64()?),
            delay: self.read_delay()?,
            entries: self.read_u32()?,
        }))
    }

    fn decode_widget_failed(&mut self) -> Option<RecordedEvent> {
        let widget = *WidgetId::ALL.get(usize::from(self.read_u8()?))?;
        let phase = match self.read_u8()? {
            0 => Phase::Initialize,
            _ => Phase::Refresh,
        };
        Some(RecordedEvent::WidgetFailed {
            widget,
            phase,
            message: self.read_string()?,
        })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_BUCKET_FIRED => self.decode_bucket_fired(),
            TAG_TIMER_ARMED => self.decode_timer_armed(),
            TAG_WIDGET_FAILED => self.decode_widget_failed(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
