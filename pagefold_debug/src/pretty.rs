// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to milliseconds using a [`Timebase`].

use std::io::Write;

use pagefold_core::time::{HostTime, Timebase};
use pagefold_core::trace::{FoldBeginEvent, FoldEndEvent, FoldFrameEvent, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            timebase,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }

    fn host_ms(&self, t: HostTime) -> f64 {
        self.timebase.ticks_to_nanos(t.ticks()) as f64 / 1_000_000.0
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_fold_begin(&mut self, e: &FoldBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[fold:begin] {} -> {} dir={:?} at {:.1}ms over {}ms",
            e.from,
            e.to,
            e.direction,
            self.host_ms(e.started),
            e.duration.to_millis(self.timebase),
        );
    }

    fn on_fold_frame(&mut self, e: &FoldFrameEvent) {
        let _ = writeln!(
            self.writer,
            "[fold:frame] at {:.1}ms progress={:.3} half={:?} angle={:.1}°",
            self.host_ms(e.now),
            e.progress,
            e.half,
            e.angle_deg,
        );
    }

    fn on_fold_end(&mut self, e: &FoldEndEvent) {
        let _ = writeln!(
            self.writer,
            "[fold:end] index={} dir={:?} at {:.1}ms frames={}",
            e.index,
            e.direction,
            self.host_ms(e.ended),
            e.frames,
        );
    }
}
