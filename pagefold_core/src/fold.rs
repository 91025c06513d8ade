// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fold state machine.
//!
//! [`FoldMachine`] owns everything a transition needs: direction, the current
//! page index, duration, easing curve, camera, and the per-transition state
//! (start time and the [`QuadrantSet`] sliced from the two pages). It is
//! deliberately host-free — pages arrive as already-captured
//! [`Surface`]s and time arrives as [`HostTime`] arguments — so the machine
//! is testable with synthetic buffers and a scripted clock.
//!
//! A fold runs to completion once started: there is no cancellation, and at
//! most one transition is in flight. Requesting a fold while folding, with
//! fewer than two pages, or before pages exist is an error *and* a no-op.
//!
//! # Lifecycle
//!
//! ```text
//!   plan() ──► begin() ──► advance()* ──► MachineTick::Finished
//!   (Idle)     (Folding)   (Folding)       (Idle, current = next)
//! ```

use core::fmt;

use crate::compositor::{FoldFrame, QuadrantId, compose};
use crate::easing::{self, EasingFn};
use crate::surface::{SliceError, Surface};
use crate::time::{Duration, HostTime};
use crate::transform::FoldCamera;

/// Which neighbor a fold transitions to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FoldDirection {
    /// Fold toward the next page (`current + 1`, wrapping).
    Up,
    /// Fold toward the previous page (`current - 1`, wrapping).
    Down,
}

impl FoldDirection {
    /// Returns the opposite direction.
    #[inline]
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

/// Error returned by a malformed fold request.
///
/// Every variant is a pure no-op: the machine's state is unchanged and no
/// quadrants were derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoldError {
    /// A transition is already in flight; at most one fold runs at a time.
    AlreadyFolding,
    /// No page registry has been attached yet.
    NotReady,
    /// Fewer than two pages are attached; there is no neighbor to fold to.
    TooFewChildren,
    /// A captured page was too small to slice into halves.
    BadSurface(SliceError),
}

impl fmt::Display for FoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyFolding => write!(f, "a fold is already in flight"),
            Self::NotReady => write!(f, "no children attached"),
            Self::TooFewChildren => write!(f, "fewer than two children attached"),
            Self::BadSurface(e) => write!(f, "captured page cannot be sliced: {e}"),
        }
    }
}

impl core::error::Error for FoldError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::BadSurface(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SliceError> for FoldError {
    fn from(e: SliceError) -> Self {
        Self::BadSurface(e)
    }
}

/// The four half-surfaces derived at fold start.
///
/// Owned exclusively by the machine for the life of one transition and
/// dropped when the transition ends. Each page is split at its own floored
/// midline, so the halves of a page restack to that page exactly.
#[derive(Clone, Debug)]
pub struct QuadrantSet {
    top_front: Surface,
    top_back: Surface,
    bottom_front: Surface,
    bottom_back: Surface,
}

impl QuadrantSet {
    /// Slices the front and back pages into the four fold quadrants.
    pub fn from_pages(front: &Surface, back: &Surface) -> Result<Self, SliceError> {
        let front_split = front.height() / 2;
        let back_split = back.height() / 2;
        Ok(Self {
            top_front: front.slice(0, front_split)?,
            bottom_front: front.slice(front_split, front.height())?,
            top_back: back.slice(0, back_split)?,
            bottom_back: back.slice(back_split, back.height())?,
        })
    }

    /// Returns the surface for the given quadrant.
    #[must_use]
    pub fn get(&self, id: QuadrantId) -> &Surface {
        match id {
            QuadrantId::TopFront => &self.top_front,
            QuadrantId::TopBack => &self.top_back,
            QuadrantId::BottomFront => &self.bottom_front,
            QuadrantId::BottomBack => &self.bottom_back,
        }
    }
}

/// The page assignments computed for one fold request.
///
/// Produced by [`FoldMachine::plan`] and consumed by [`FoldMachine::begin`]
/// once the container has captured the two page surfaces. The direction is
/// frozen here: changing the machine's direction between `plan` and `begin`
/// (or mid-flight) does not affect this transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FoldPlan {
    /// Index the transition lands on.
    pub next: usize,
    /// Index of the page acting as the fold's front face.
    pub front: usize,
    /// Index of the page acting as the fold's back face.
    pub back: usize,
    /// Direction this transition was planned under.
    pub direction: FoldDirection,
}

/// State for one in-flight transition.
#[derive(Debug)]
struct ActiveFold {
    started: HostTime,
    direction: FoldDirection,
    next: usize,
    width: u32,
    height: u32,
    quadrants: QuadrantSet,
    frames: u32,
}

/// Result of advancing the machine by one tick.
#[derive(Debug)]
pub enum MachineTick {
    /// No transition is in flight; show the current page as-is.
    Idle,
    /// A composited frame for an in-flight transition. Another tick is
    /// needed.
    Frame(FoldFrame),
    /// The transition completed on this tick. The machine is idle again and
    /// `index` is the new current page; no frame is composited (the host
    /// shows the page itself).
    Finished {
        /// The new current page index.
        index: usize,
        /// Direction the finished transition ran under.
        direction: FoldDirection,
        /// Number of frames composited during the transition.
        frames: u32,
    },
}

/// Owns fold configuration and per-transition state.
#[derive(Debug)]
pub struct FoldMachine {
    direction: FoldDirection,
    duration: Duration,
    easing: EasingFn,
    camera: FoldCamera,
    current: usize,
    active: Option<ActiveFold>,
}

impl FoldMachine {
    /// Creates an idle machine at page 0 with the given duration, linear
    /// easing, and the default camera. The direction starts as
    /// [`FoldDirection::Down`].
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            direction: FoldDirection::Down,
            duration,
            easing: easing::linear,
            camera: FoldCamera::DEFAULT,
            current: 0,
            active: None,
        }
    }

    /// Returns whether a transition is in flight.
    #[inline]
    #[must_use]
    pub const fn is_folding(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the current page index.
    #[inline]
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Returns the direction the *next* fold will use.
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> FoldDirection {
        self.direction
    }

    /// Sets the direction for subsequent folds.
    ///
    /// Legal while folding, but an in-flight transition keeps the direction
    /// it was planned under.
    pub fn set_direction(&mut self, direction: FoldDirection) {
        self.direction = direction;
    }

    /// Flips the direction for subsequent folds. No animation is performed.
    pub fn reverse_direction(&mut self) {
        self.direction = self.direction.reversed();
    }

    /// Returns the configured transition duration.
    #[inline]
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Sets the transition duration.
    ///
    /// A zero duration is legal: the next fold completes on its first tick.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Returns the easing curve.
    #[inline]
    #[must_use]
    pub const fn easing(&self) -> EasingFn {
        self.easing
    }

    /// Sets the easing curve.
    pub fn set_easing(&mut self, easing: EasingFn) {
        self.easing = easing;
    }

    /// Returns the projection camera.
    #[inline]
    #[must_use]
    pub const fn camera(&self) -> FoldCamera {
        self.camera
    }

    /// Sets the projection camera.
    pub fn set_camera(&mut self, camera: FoldCamera) {
        self.camera = camera;
    }

    /// Jumps the current page index without animating.
    ///
    /// # Panics
    ///
    /// Panics if a transition is in flight.
    pub fn set_current(&mut self, index: usize) {
        assert!(
            self.active.is_none(),
            "cannot move the current index mid-fold"
        );
        self.current = index;
    }

    /// Returns the quadrants of the in-flight transition, if any.
    #[must_use]
    pub fn quadrants(&self) -> Option<&QuadrantSet> {
        self.active.as_ref().map(|active| &active.quadrants)
    }

    /// Computes the page assignments for a fold request.
    ///
    /// Fails (and changes nothing) if a transition is already in flight or
    /// fewer than two pages exist. When the direction is [`Up`] the current
    /// page is the front face and the next page the back; [`Down`] swaps
    /// them, so the incoming page folds open instead of closed.
    ///
    /// [`Up`]: FoldDirection::Up
    /// [`Down`]: FoldDirection::Down
    pub fn plan(&self, child_count: usize) -> Result<FoldPlan, FoldError> {
        if self.active.is_some() {
            return Err(FoldError::AlreadyFolding);
        }
        if child_count < 2 {
            return Err(FoldError::TooFewChildren);
        }
        assert!(
            self.current < child_count,
            "current index {} out of range for {child_count} children",
            self.current
        );

        let next = match self.direction {
            FoldDirection::Up => (self.current + 1) % child_count,
            FoldDirection::Down => (self.current + child_count - 1) % child_count,
        };
        let (front, back) = match self.direction {
            FoldDirection::Up => (self.current, next),
            FoldDirection::Down => (next, self.current),
        };
        Ok(FoldPlan {
            next,
            front,
            back,
            direction: self.direction,
        })
    }

    /// Starts the planned transition from the two captured page surfaces.
    ///
    /// Derives the [`QuadrantSet`] (the only copies made; the borrowed pages
    /// can be released immediately) and records the start time. Fails as a
    /// no-op if a page is too small to slice.
    ///
    /// # Panics
    ///
    /// Panics if a transition is already in flight; callers obtain a
    /// [`FoldPlan`] from [`plan`](Self::plan), which checks this.
    pub fn begin(
        &mut self,
        now: HostTime,
        plan: FoldPlan,
        front: &Surface,
        back: &Surface,
    ) -> Result<(), FoldError> {
        assert!(self.active.is_none(), "fold already in flight");
        let quadrants = QuadrantSet::from_pages(front, back)?;
        self.active = Some(ActiveFold {
            started: now,
            direction: plan.direction,
            next: plan.next,
            width: front.width(),
            height: front.height(),
            quadrants,
            frames: 0,
        });
        Ok(())
    }

    /// Advances the transition to `now`.
    ///
    /// Idle machines return [`MachineTick::Idle`]. An in-flight transition
    /// either composites a frame or, once the elapsed time reaches the
    /// configured duration, finalizes: the current index moves to the
    /// planned target and the quadrants are dropped. The finalization check
    /// runs before any progress division, so a zero duration completes on
    /// the first tick without ever dividing by zero.
    pub fn advance(&mut self, now: HostTime) -> MachineTick {
        let Some(mut active) = self.active.take() else {
            return MachineTick::Idle;
        };

        let elapsed = now.saturating_duration_since(active.started);
        if elapsed >= self.duration {
            self.current = active.next;
            return MachineTick::Finished {
                index: active.next,
                direction: active.direction,
                frames: active.frames,
            };
        }

        // elapsed < duration, so the divisor is nonzero here.
        let fraction = elapsed.ticks() as f32 / self.duration.ticks() as f32;
        let eased = (self.easing)(fraction);
        let progress = match active.direction {
            FoldDirection::Up => eased,
            FoldDirection::Down => 1.0 - eased,
        };

        let frame = compose(progress, active.width, active.height, self.camera);
        active.frames += 1;
        self.active = Some(active);
        MachineTick::Frame(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::FoldHalf;
    use crate::surface::argb;

    const RED: u32 = argb(255, 255, 0, 0);
    const BLUE: u32 = argb(255, 0, 0, 255);

    fn machine(duration_ticks: u64) -> FoldMachine {
        let mut m = FoldMachine::new(Duration(duration_ticks));
        m.set_direction(FoldDirection::Up);
        m
    }

    fn pages() -> (Surface, Surface) {
        (Surface::filled(8, 6, RED), Surface::filled(8, 6, BLUE))
    }

    fn start(m: &mut FoldMachine, now: HostTime, child_count: usize) -> FoldPlan {
        let plan = m.plan(child_count).unwrap();
        let (front, back) = pages();
        m.begin(now, plan, &front, &back).unwrap();
        plan
    }

    #[test]
    fn plan_requires_two_children() {
        let m = machine(500);
        assert_eq!(m.plan(0), Err(FoldError::TooFewChildren));
        assert_eq!(m.plan(1), Err(FoldError::TooFewChildren));
        assert!(m.plan(2).is_ok());
    }

    #[test]
    fn plan_wraps_up_and_down() {
        let mut m = machine(500);
        assert_eq!(
            m.plan(3).unwrap(),
            FoldPlan {
                next: 1,
                front: 0,
                back: 1,
                direction: FoldDirection::Up,
            }
        );

        m.set_direction(FoldDirection::Down);
        assert_eq!(
            m.plan(3).unwrap(),
            FoldPlan {
                next: 2,
                front: 2,
                back: 0,
                direction: FoldDirection::Down,
            }
        );
    }

    #[test]
    fn plan_while_folding_is_rejected() {
        let mut m = machine(500);
        start(&mut m, HostTime(0), 2);
        assert_eq!(m.plan(2), Err(FoldError::AlreadyFolding));
    }

    #[test]
    fn quadrants_are_sliced_per_page() {
        let mut m = machine(500);
        start(&mut m, HostTime(0), 2);

        let q = m.quadrants().expect("folding");
        for id in [QuadrantId::TopFront, QuadrantId::BottomFront] {
            assert_eq!(q.get(id).pixels()[0], RED);
        }
        for id in [QuadrantId::TopBack, QuadrantId::BottomBack] {
            assert_eq!(q.get(id).pixels()[0], BLUE);
        }
        assert_eq!(q.get(QuadrantId::TopFront).height(), 3);
        assert_eq!(q.get(QuadrantId::BottomBack).height(), 3);
    }

    #[test]
    fn odd_height_bottom_halves_carry_extra_row() {
        let front = Surface::filled(8, 7, RED);
        let back = Surface::filled(8, 7, BLUE);
        let q = QuadrantSet::from_pages(&front, &back).unwrap();
        assert_eq!(q.get(QuadrantId::TopFront).height(), 3);
        assert_eq!(q.get(QuadrantId::BottomFront).height(), 4);
        assert_eq!(q.get(QuadrantId::TopBack).height(), 3);
        assert_eq!(q.get(QuadrantId::BottomBack).height(), 4);
    }

    #[test]
    fn too_small_page_fails_as_noop() {
        let mut m = machine(500);
        let plan = m.plan(2).unwrap();
        let front = Surface::new(8, 1);
        let back = Surface::new(8, 6);
        assert!(matches!(
            m.begin(HostTime(0), plan, &front, &back),
            Err(FoldError::BadSurface(_))
        ));
        assert!(!m.is_folding(), "failed begin leaves the machine idle");
    }

    #[test]
    fn linear_fold_runs_through_both_phases() {
        let mut m = machine(500);
        start(&mut m, HostTime(1000), 2);

        match m.advance(HostTime(1000)) {
            MachineTick::Frame(frame) => {
                assert_eq!(frame.progress, 0.0);
                assert_eq!(frame.half, FoldHalf::First);
            }
            other => panic!("expected frame, got {other:?}"),
        }

        match m.advance(HostTime(1250)) {
            MachineTick::Frame(frame) => {
                assert_eq!(frame.progress, 0.5);
                assert_eq!(frame.half, FoldHalf::Second);
            }
            other => panic!("expected frame, got {other:?}"),
        }

        match m.advance(HostTime(1500)) {
            MachineTick::Finished {
                index,
                direction,
                frames,
            } => {
                assert_eq!(index, 1);
                assert_eq!(direction, FoldDirection::Up);
                assert_eq!(frames, 2);
            }
            other => panic!("expected finish, got {other:?}"),
        }

        assert!(!m.is_folding());
        assert_eq!(m.current(), 1);
        assert!(m.quadrants().is_none(), "quadrants released at completion");
    }

    #[test]
    fn down_direction_inverts_progress() {
        let mut m = machine(500);
        m.set_direction(FoldDirection::Down);
        start(&mut m, HostTime(0), 2);

        // 20% elapsed means progress 0.8: the incoming page unfolds.
        match m.advance(HostTime(100)) {
            MachineTick::Frame(frame) => {
                assert!((frame.progress - 0.8).abs() < 1e-6);
                assert_eq!(frame.half, FoldHalf::Second);
            }
            other => panic!("expected frame, got {other:?}"),
        }
    }

    #[test]
    fn zero_duration_finishes_on_first_tick() {
        let mut m = machine(0);
        start(&mut m, HostTime(100), 2);

        match m.advance(HostTime(100)) {
            MachineTick::Finished { index, frames, .. } => {
                assert_eq!(index, 1);
                assert_eq!(frames, 0, "no frame composited");
            }
            other => panic!("expected immediate finish, got {other:?}"),
        }
    }

    #[test]
    fn direction_change_does_not_touch_in_flight_fold() {
        let mut m = machine(500);
        start(&mut m, HostTime(0), 3);
        m.reverse_direction();

        // Still the Up transition: progress not inverted, lands on page 1.
        match m.advance(HostTime(100)) {
            MachineTick::Frame(frame) => assert!((frame.progress - 0.2).abs() < 1e-6),
            other => panic!("expected frame, got {other:?}"),
        }
        match m.advance(HostTime(500)) {
            MachineTick::Finished {
                index, direction, ..
            } => {
                assert_eq!(index, 1);
                assert_eq!(direction, FoldDirection::Up);
            }
            other => panic!("expected finish, got {other:?}"),
        }
        // The stored direction is ready for the next fold.
        assert_eq!(m.direction(), FoldDirection::Down);
    }

    #[test]
    fn easing_shapes_progress() {
        let mut m = machine(500);
        m.set_easing(crate::easing::ease_in);
        start(&mut m, HostTime(0), 2);

        match m.advance(HostTime(250)) {
            MachineTick::Frame(frame) => {
                assert!((frame.progress - 0.25).abs() < 1e-6, "0.5 squared");
            }
            other => panic!("expected frame, got {other:?}"),
        }
    }

    #[test]
    fn idle_machine_reports_idle() {
        let mut m = machine(500);
        assert!(matches!(m.advance(HostTime(42)), MachineTick::Idle));
    }

    #[test]
    fn repeated_up_folds_cycle_indices() {
        let mut m = machine(100);
        let mut visited = alloc::vec::Vec::new();
        for _ in 0..6 {
            let start_plan = start(&mut m, HostTime(0), 3);
            match m.advance(HostTime(100)) {
                MachineTick::Finished { index, .. } => {
                    assert_eq!(index, start_plan.next);
                    visited.push(index);
                }
                other => panic!("expected finish, got {other:?}"),
            }
        }
        assert_eq!(visited, [1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn repeated_down_folds_cycle_indices_in_reverse() {
        let mut m = machine(100);
        m.set_direction(FoldDirection::Down);
        let mut visited = alloc::vec::Vec::new();
        for _ in 0..6 {
            start(&mut m, HostTime(0), 3);
            match m.advance(HostTime(100)) {
                MachineTick::Finished { index, .. } => visited.push(index),
                other => panic!("expected finish, got {other:?}"),
            }
        }
        assert_eq!(visited, [2, 1, 0, 2, 1, 0]);
    }
}
