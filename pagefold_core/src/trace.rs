// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the fold loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods the
//! container calls as a transition progresses. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use crate::compositor::FoldHalf;
use crate::fold::FoldDirection;
use crate::time::{Duration, HostTime};

/// Emitted when a fold transition starts.
#[derive(Clone, Copy, Debug)]
pub struct FoldBeginEvent {
    /// Index the transition leaves.
    pub from: usize,
    /// Index the transition lands on.
    pub to: usize,
    /// Direction of the transition.
    pub direction: FoldDirection,
    /// Host time the transition started.
    pub started: HostTime,
    /// Configured duration in ticks.
    pub duration: Duration,
}

/// Emitted once per composited fold frame.
#[derive(Clone, Copy, Debug)]
pub struct FoldFrameEvent {
    /// Host time of the tick.
    pub now: HostTime,
    /// Eased, direction-adjusted progress of the frame.
    pub progress: f32,
    /// Which half-phase the frame belongs to.
    pub half: FoldHalf,
    /// Rotation angle of the moving quadrant, in degrees.
    pub angle_deg: f64,
}

/// Emitted when a fold transition completes.
#[derive(Clone, Copy, Debug)]
pub struct FoldEndEvent {
    /// The new current index.
    pub index: usize,
    /// Direction the transition ran under.
    pub direction: FoldDirection,
    /// Host time of the finalizing tick.
    pub ended: HostTime,
    /// Number of frames composited during the transition.
    pub frames: u32,
}

/// Receives trace events from the fold loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a fold transition starts.
    fn on_fold_begin(&mut self, e: &FoldBeginEvent) {
        _ = e;
    }

    /// Called once per composited frame.
    fn on_fold_frame(&mut self, e: &FoldFrameEvent) {
        _ = e;
    }

    /// Called when a fold transition completes.
    fn on_fold_end(&mut self, e: &FoldEndEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
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

    /// Emits a [`FoldBeginEvent`].
    #[inline]
    pub fn fold_begin(&mut self, e: &FoldBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_fold_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FoldFrameEvent`].
    #[inline]
    pub fn fold_frame(&mut self, e: &FoldFrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_fold_frame(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FoldEndEvent`].
    #[inline]
    pub fn fold_end(&mut self, e: &FoldEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_fold_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}
