// Copyright 2026 the Weatherpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes them as a pretty-printed JSON array, one object per event:
//!
//! ```json
//! [
//!   { "seq": 0, "name": "TimerArmed", "args": { "timer": 1, "delay_ms": 1000, "entries": 2 } },
//!   {
//!     "seq": 1,
//!     "name": "BucketFired",
//!     "args": { "bucket": { "source": "event", "trigger": "current" }, "drained": 9, ... }
//!   }
//! ]
//! ```

use std::io::{self, Write};

use serde_json::{Value, json};

use weatherpane_core::trace::BucketSource;
use weatherpane_core::widget::Phase;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as a JSON array.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = decode(bytes)
        .enumerate()
        .map(|(seq, recorded)| to_value(seq, recorded))
        .collect();
    serde_json::to_writer_pretty(&mut *writer, &events)?;
    writeln!(writer)
}

fn to_value(seq: usize, recorded: RecordedEvent) -> Value {
    match recorded {
        RecordedEvent::BucketFired(e) => {
            let source = match e.source {
                BucketSource::Event(trigger) => json!({
                    "source": "event",
                    "trigger": trigger.name(),
                }),
                BucketSource::Timer { id, delay } => json!({
                    "source": "timer",
                    "timer": id.0,
                    "delay_ms": millis(delay),
                }),
            };
            json!({
                "seq": seq,
                "name": "BucketFired",
                "args": {
                    "bucket": source,
                    "drained": e.drained,
                    "refreshed": e.refreshed,
                    "skipped": e.skipped,
                    "failed": e.failed,
                }
            })
        }
        RecordedEvent::TimerArmed(e) => json!({
            "seq": seq,
            "name": "TimerArmed",
            "args": {
                "timer": e.timer.0,
                "delay_ms": millis(e.delay),
                "entries": e.entries,
            }
        }),
        RecordedEvent::WidgetFailed {
            widget,
            phase,
            message,
        } => {
            let phase = match phase {
                Phase::Initialize => "initialize",
                Phase::Refresh => "refresh",
            };
            json!({
                "seq": seq,
                "name": "WidgetFailed",
                "args": {
                    "widget": widget.name(),
                    "phase": phase,
                    "message": message,
                }
            })
        }
    }
}

fn millis(d: core::time::Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use weatherpane_core::policy::Trigger;
    use weatherpane_core::scheduler::TimerId;
    use weatherpane_core::trace::{
        BucketFiredEvent, TimerArmedEvent, TraceSink, WidgetFailedEvent,
    };
    use weatherpane_core::widget::WidgetId;

    use super::*;
    use crate::recorder::RecorderSink;

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_timer_armed(&TimerArmedEvent {
            timer: TimerId(5),
            delay: Duration::from_secs(120),
            entries: 3,
        });
        rec.on_bucket_fired(&BucketFiredEvent {
            source: BucketSource::Event(Trigger::SunDataChanged),
            drained: 2,
            refreshed: 2,
            skipped: 0,
            failed: 0,
        });
        rec.on_widget_failed(&WidgetFailedEvent {
            widget: WidgetId::RainSquare,
            phase: Phase::Refresh,
            message: "element gone",
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();

        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 3, "one object per event");
        assert_eq!(parsed[0]["name"], "TimerArmed");
        assert_eq!(parsed[0]["args"]["delay_ms"], 120_000);
        assert_eq!(parsed[1]["args"]["bucket"]["trigger"], "sun");
        assert_eq!(parsed[2]["seq"], 2);
        assert_eq!(parsed[2]["args"]["widget"], "rain_square");
        assert_eq!(parsed[2]["args"]["phase"], "refresh");
    }

    #[test]
    fn empty_recording_exports_empty_array() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert!(parsed.is_empty(), "no events recorded");
    }
}
