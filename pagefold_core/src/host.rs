// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for embedding the fold engine.
//!
//! The engine is embedded in a host UI toolkit that owns the real child
//! views. The host provides three things, and nothing else crosses the
//! boundary:
//!
//! - **Capture** — each child implements [`Snapshot`] so the engine can
//!   request a rendered [`Surface`] of it at fold start (the equivalent of a
//!   drawing-cache capture). The engine copies what it needs immediately;
//!   no borrow of host pixels outlives the fold request.
//!
//! - **Tick source** — the host calls
//!   [`PageFold::tick`](crate::container::PageFold::tick) from its
//!   display-refresh callback and schedules another callback whenever the
//!   returned [`TickResult`](crate::container::TickResult) asks for one.
//!   There is no timer or thread inside the engine; a host that skips
//!   refreshes simply shows fewer frames of the same wall-clock animation.
//!
//! - **Visibility** — after each tick the host shows or hides children to
//!   match the container's visibility flags (all hidden while folding,
//!   exactly one visible when idle).
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_refresh(now: HostTime) {
//!     let result = fold.tick(now);
//!     match result.content {
//!         TickContent::Resting(index) => draw_child(index),
//!         TickContent::Frame(frame) => {
//!             pagefold_raster::render(&frame, fold.quadrants().unwrap(), &mut out);
//!             draw_surface(&out);
//!         }
//!     }
//!     if result.needs_redraw {
//!         request_refresh();
//!     }
//! }
//! ```

use crate::fold::FoldDirection;
use crate::surface::Surface;

/// A child view that can be rendered to a pixel buffer on demand.
///
/// Implemented by host views (via whatever capture mechanism the toolkit
/// offers) and by synthetic test pages. The engine calls this at most twice
/// per fold request, once for each page of the transition.
pub trait Snapshot {
    /// Renders this child into a new surface.
    fn capture(&self) -> Surface;
}

/// Observer notified when a fold transition completes.
///
/// Invoked synchronously on the tick that finalizes the transition, after
/// the container has updated its current index and visibility.
pub trait FoldListener<C> {
    /// Called once per completed fold with the new current index, the child
    /// now visible, and the direction the transition ran under.
    fn on_fold_finished(&mut self, index: usize, child: &C, direction: FoldDirection);
}
