// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] writes recorded fold events as [Chrome Trace Event
//! Format][spec] JSON, suitable for loading into `chrome://tracing` or
//! [Perfetto](https://ui.perfetto.dev/). Fold transitions become duration
//! ("B"/"E") events; composited frames become instant events. Timestamps are
//! converted to microseconds using the provided
//! [`Timebase`](pagefold_core::time::Timebase).
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use pagefold_core::time::Timebase;

use crate::recorder::RecordedEvent;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects.
pub fn export(
    events: &[RecordedEvent],
    timebase: Timebase,
    writer: &mut dyn Write,
) -> io::Result<()> {
    let mut out: Vec<Value> = Vec::with_capacity(events.len());

    for recorded in events {
        match recorded {
            RecordedEvent::Begin(e) => {
                out.push(json!({
                    "ph": "B",
                    "name": "Fold",
                    "cat": "Fold",
                    "ts": ticks_to_us(e.started.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "from": e.from,
                        "to": e.to,
                        "direction": format!("{:?}", e.direction),
                        "duration_ms": e.duration.to_millis(timebase),
                    }
                }));
            }
            RecordedEvent::Frame(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "FoldFrame",
                    "cat": "Fold",
                    "ts": ticks_to_us(e.now.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "progress": e.progress,
                        "half": format!("{:?}", e.half),
                        "angle_deg": e.angle_deg,
                    }
                }));
            }
            RecordedEvent::End(e) => {
                out.push(json!({
                    "ph": "E",
                    "name": "Fold",
                    "cat": "Fold",
                    "ts": ticks_to_us(e.ended.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "index": e.index,
                        "direction": format!("{:?}", e.direction),
                        "frames": e.frames,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(&mut *writer, &out)?;
    writer.flush()
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> u64 {
    timebase.ticks_to_nanos(ticks) / 1_000
}

#[cfg(test)]
mod tests {
    use pagefold_core::compositor::FoldHalf;
    use pagefold_core::fold::FoldDirection;
    use pagefold_core::time::{Duration, HostTime};
    use pagefold_core::trace::{FoldBeginEvent, FoldEndEvent, FoldFrameEvent};

    use super::*;

    #[test]
    fn export_produces_valid_paired_events() {
        let events = [
            RecordedEvent::Begin(FoldBeginEvent {
                from: 0,
                to: 1,
                direction: FoldDirection::Up,
                started: HostTime(1_000),
                duration: Duration(500),
            }),
            RecordedEvent::Frame(FoldFrameEvent {
                now: HostTime(1_250),
                progress: 0.5,
                half: FoldHalf::Second,
                angle_deg: 90.0,
            }),
            RecordedEvent::End(FoldEndEvent {
                index: 1,
                direction: FoldDirection::Up,
                ended: HostTime(1_500),
                frames: 1,
            }),
        ];

        let mut buf = Vec::new();
        export(&events, Timebase::MILLIS, &mut buf).unwrap();

        let parsed: Value = serde_json::from_slice(&buf).unwrap();
        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 3);
        assert_eq!(arr[0]["ph"], "B");
        assert_eq!(arr[0]["ts"], 1_000_000, "1000ms ticks in µs");
        assert_eq!(arr[0]["args"]["direction"], "Up");
        assert_eq!(arr[1]["ph"], "i");
        assert_eq!(arr[1]["args"]["half"], "Second");
        assert_eq!(arr[2]["ph"], "E");
        assert_eq!(arr[2]["args"]["frames"], 1);
    }

    #[test]
    fn export_empty_events_is_an_empty_array() {
        let mut buf = Vec::new();
        export(&[], Timebase::NANOS, &mut buf).unwrap();
        let parsed: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, json!([]));
    }
}
