// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fold container: child registry, visibility, and the tick contract.
//!
//! [`PageFold`] is the public face of the engine. It owns an ordered registry
//! of host children (anything implementing [`Snapshot`]), per-child
//! visibility flags, the [`FoldMachine`], and an optional completion
//! listener.
//!
//! The original continuous-redraw loop ("invalidate, then draw, then
//! invalidate again") is re-expressed as an explicit contract: the host calls
//! [`tick`](PageFold::tick) from its display-refresh callback and gets back a
//! [`TickResult`] saying what to draw and whether to schedule another
//! callback. The container never blocks, spawns, or sleeps; every transition
//! runs on whatever cadence the host delivers, at wall-clock speed.
//!
//! Visibility invariant: exactly one child is visible whenever the container
//! is idle (and has children); all children are hidden while a fold is in
//! flight, because the composited frame replaces them on screen.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::compositor::FoldFrame;
use crate::easing::EasingFn;
use crate::fold::{FoldDirection, FoldError, FoldMachine, MachineTick, QuadrantSet};
use crate::host::{FoldListener, Snapshot};
use crate::time::{Duration, HostTime, Timebase};
use crate::trace::{FoldBeginEvent, FoldEndEvent, FoldFrameEvent, Tracer};
use crate::transform::FoldCamera;

/// Default transition duration in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 500;

/// What the host should draw after a tick.
#[derive(Clone, Debug, PartialEq)]
pub enum TickContent {
    /// No transition is in flight: draw the child at this index normally.
    Resting(usize),
    /// A transition is in flight: composite this frame (see
    /// [`PageFold::quadrants`] for the pixel sources).
    Frame(FoldFrame),
}

/// Details of a fold that completed on this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FoldFinished {
    /// The new current child index.
    pub index: usize,
    /// Direction the transition ran under.
    pub direction: FoldDirection,
    /// Number of frames composited during the transition.
    pub frames: u32,
}

/// Result of one tick of the fold loop.
#[derive(Clone, Debug, PartialEq)]
pub struct TickResult {
    /// What to draw.
    pub content: TickContent,
    /// Whether the host should schedule another display-refresh callback.
    pub needs_redraw: bool,
    /// Present exactly on the tick that finalizes a transition.
    pub finished: Option<FoldFinished>,
}

/// A container that changes its visible child with page-fold transitions.
///
/// `C` is the host's child type. The container is generic so it can run
/// against real host views in production and synthetic pages in tests.
pub struct PageFold<C> {
    children: Vec<C>,
    visible: Vec<bool>,
    machine: FoldMachine,
    timebase: Timebase,
    listener: Option<Box<dyn FoldListener<C>>>,
}

impl<C> fmt::Debug for PageFold<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageFold")
            .field("children", &self.children.len())
            .field("machine", &self.machine)
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl<C: Snapshot> PageFold<C> {
    /// Creates an empty container.
    ///
    /// `timebase` describes the host's tick units and is used to convert the
    /// millisecond duration API. The duration defaults to
    /// [`DEFAULT_DURATION_MS`]; easing defaults to linear.
    #[must_use]
    pub fn new(timebase: Timebase) -> Self {
        Self {
            children: Vec::new(),
            visible: Vec::new(),
            machine: FoldMachine::new(Duration::from_millis(DEFAULT_DURATION_MS, timebase)),
            timebase,
            listener: None,
        }
    }

    // -- Registry --

    /// Replaces the child registry, once the host's layout has stabilized.
    ///
    /// Resets the current index to 0 and shows only that child. Duration,
    /// easing, direction, and listener settings are preserved.
    ///
    /// # Panics
    ///
    /// Panics if called while a fold is in flight; the registry is frozen
    /// for the duration of a transition.
    pub fn attach_children(&mut self, children: Vec<C>) {
        assert!(
            !self.machine.is_folding(),
            "cannot replace children mid-fold"
        );
        self.visible.clear();
        self.visible.resize(children.len(), false);
        self.children = children;
        self.machine.set_current(0);
        if !self.children.is_empty() {
            self.visible[0] = true;
        }
    }

    /// Returns the attached children.
    #[must_use]
    pub fn children(&self) -> &[C] {
        &self.children
    }

    /// Returns the number of attached children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Returns the current child index.
    ///
    /// While folding this is still the *outgoing* index; it moves to the
    /// fold target on the finalizing tick.
    #[inline]
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.machine.current()
    }

    /// Returns whether a transition is in flight.
    #[inline]
    #[must_use]
    pub const fn is_folding(&self) -> bool {
        self.machine.is_folding()
    }

    /// Returns whether the child at `index` is visible.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn child_visible(&self, index: usize) -> bool {
        assert!(
            index < self.visible.len(),
            "child index {index} out of range for {} children",
            self.visible.len()
        );
        self.visible[index]
    }

    /// Returns the index of the single visible child, or `None` while a
    /// fold is in flight (all children are hidden behind the composited
    /// frame).
    #[must_use]
    pub fn visible_child(&self) -> Option<usize> {
        self.visible.iter().position(|&v| v)
    }

    /// Shows the child at `index` without animating, hiding all others.
    ///
    /// # Panics
    ///
    /// Panics if a fold is in flight or `index` is out of range.
    pub fn show_child(&mut self, index: usize) {
        assert!(!self.machine.is_folding(), "cannot jump mid-fold");
        assert!(
            index < self.children.len(),
            "child index {index} out of range for {} children",
            self.children.len()
        );
        self.machine.set_current(index);
        self.show_single(index);
    }

    // -- Configuration --

    /// Returns the direction the next fold will use.
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> FoldDirection {
        self.machine.direction()
    }

    /// Sets the direction for subsequent folds. The direction remains set
    /// after each fold; an in-flight transition is unaffected.
    pub fn set_direction(&mut self, direction: FoldDirection) {
        self.machine.set_direction(direction);
    }

    /// Flips the direction for subsequent folds. No animation is performed.
    pub fn reverse_direction(&mut self) {
        self.machine.reverse_direction();
    }

    /// Returns the transition duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.machine.duration().to_millis(self.timebase)
    }

    /// Sets the transition duration in milliseconds.
    ///
    /// Zero is legal: the next fold completes on its first tick.
    pub fn set_duration_ms(&mut self, millis: u64) {
        self.machine
            .set_duration(Duration::from_millis(millis, self.timebase));
    }

    /// Returns the easing curve (linear unless changed).
    #[must_use]
    pub fn easing(&self) -> EasingFn {
        self.machine.easing()
    }

    /// Sets the easing curve for subsequent folds.
    pub fn set_easing(&mut self, easing: EasingFn) {
        self.machine.set_easing(easing);
    }

    /// Returns the projection camera.
    #[must_use]
    pub fn camera(&self) -> FoldCamera {
        self.machine.camera()
    }

    /// Sets the projection camera.
    pub fn set_camera(&mut self, camera: FoldCamera) {
        self.machine.set_camera(camera);
    }

    /// Installs the completion listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: Box<dyn FoldListener<C>>) {
        self.listener = Some(listener);
    }

    /// Removes the completion listener.
    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    // -- Folding --

    /// Starts a fold toward the neighboring child in the current direction.
    ///
    /// Captures the two pages, derives the quadrants, hides all children,
    /// and records `now` as the transition start. Every failure
    /// ([`FoldError`]) leaves the container unchanged: no transition starts,
    /// visibility is untouched, and exactly one child is still shown.
    pub fn fold(&mut self, now: HostTime) -> Result<(), FoldError> {
        self.fold_traced(now, &mut Tracer::none())
    }

    /// Like [`fold`](Self::fold), emitting a begin event to the tracer.
    pub fn fold_traced(
        &mut self,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), FoldError> {
        if self.children.is_empty() {
            return Err(FoldError::NotReady);
        }
        let plan = self.machine.plan(self.children.len())?;
        let from = self.machine.current();
        let front = self.children[plan.front].capture();
        let back = self.children[plan.back].capture();
        self.machine.begin(now, plan, &front, &back)?;
        self.hide_all();
        tracer.fold_begin(&FoldBeginEvent {
            from,
            to: plan.next,
            direction: plan.direction,
            started: now,
            duration: self.machine.duration(),
        });
        Ok(())
    }

    /// Reverses direction, then folds.
    pub fn fold_reverse(&mut self, now: HostTime) -> Result<(), FoldError> {
        self.machine.reverse_direction();
        self.fold(now)
    }

    /// Sets the direction, then folds. The direction remains set afterward.
    pub fn fold_direction(
        &mut self,
        now: HostTime,
        direction: FoldDirection,
    ) -> Result<(), FoldError> {
        self.machine.set_direction(direction);
        self.fold(now)
    }

    /// Returns the quadrants of the in-flight transition, if any.
    ///
    /// The rasterizer needs these alongside the [`FoldFrame`] plan.
    #[must_use]
    pub fn quadrants(&self) -> Option<&QuadrantSet> {
        self.machine.quadrants()
    }

    // -- Ticking --

    /// Advances the fold loop to `now`.
    ///
    /// Call from the host's display-refresh callback; schedule another
    /// callback whenever the result's `needs_redraw` is true. On the tick
    /// that completes a transition the result is already
    /// [`TickContent::Resting`] at the new index, visibility has been
    /// restored, and the listener has fired.
    pub fn tick(&mut self, now: HostTime) -> TickResult {
        self.tick_traced(now, &mut Tracer::none())
    }

    /// Like [`tick`](Self::tick), emitting frame and end events to the
    /// tracer.
    pub fn tick_traced(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> TickResult {
        match self.machine.advance(now) {
            MachineTick::Idle => TickResult {
                content: TickContent::Resting(self.machine.current()),
                needs_redraw: false,
                finished: None,
            },
            MachineTick::Frame(frame) => {
                tracer.fold_frame(&FoldFrameEvent {
                    now,
                    progress: frame.progress,
                    half: frame.half,
                    angle_deg: frame.angle_deg,
                });
                TickResult {
                    content: TickContent::Frame(frame),
                    needs_redraw: true,
                    finished: None,
                }
            }
            MachineTick::Finished {
                index,
                direction,
                frames,
            } => {
                self.show_single(index);
                tracer.fold_end(&FoldEndEvent {
                    index,
                    direction,
                    ended: now,
                    frames,
                });
                if let Some(listener) = self.listener.as_mut() {
                    listener.on_fold_finished(index, &self.children[index], direction);
                }
                TickResult {
                    content: TickContent::Resting(index),
                    needs_redraw: false,
                    finished: Some(FoldFinished {
                        index,
                        direction,
                        frames,
                    }),
                }
            }
        }
    }

    // -- Internal helpers --

    fn hide_all(&mut self) {
        self.visible.fill(false);
    }

    fn show_single(&mut self, index: usize) {
        self.hide_all();
        self.visible[index] = true;
    }
}
