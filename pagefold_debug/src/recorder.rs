// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and stores every event as a
//! [`RecordedEvent`]. The fold event set is small and fixed-size, so events
//! are kept directly rather than encoded; feed the recorded slice to
//! [`chrome::export`](crate::chrome::export) for offline analysis.

use pagefold_core::trace::{FoldBeginEvent, FoldEndEvent, FoldFrameEvent, TraceSink};

/// One recorded fold-loop event.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A transition started.
    Begin(FoldBeginEvent),
    /// A frame was composited.
    Frame(FoldFrameEvent),
    /// A transition completed.
    End(FoldEndEvent),
}

/// A [`TraceSink`] that stores events in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded events.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Discards all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TraceSink for RecorderSink {
    fn on_fold_begin(&mut self, e: &FoldBeginEvent) {
        self.events.push(RecordedEvent::Begin(*e));
    }

    fn on_fold_frame(&mut self, e: &FoldFrameEvent) {
        self.events.push(RecordedEvent::Frame(*e));
    }

    fn on_fold_end(&mut self, e: &FoldEndEvent) {
        self.events.push(RecordedEvent::End(*e));
    }
}
