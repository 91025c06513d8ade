// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types and fold state machine for page-fold transition compositing.
//!
//! `pagefold_core` animates the switch between two rendered pages by folding
//! the outgoing page about its horizontal midline, with perspective rotation
//! and synthetic lighting. It is `no_std` compatible (with `alloc`) and
//! completely host-driven: the embedding toolkit supplies captured pixel
//! buffers, monotonic timestamps, and a display-refresh callback; the engine
//! supplies a draw plan per tick.
//!
//! # Architecture
//!
//! A fold turns two page captures into a stream of composited frames:
//!
//! ```text
//!   Snapshot::capture() ×2
//!       │
//!       ▼
//!   PageFold::fold(now) ──► QuadrantSet (4 sliced half-surfaces)
//!       │
//!       ▼ each display refresh
//!   PageFold::tick(now) ──► TickResult { FoldFrame | Resting, needs_redraw }
//!       │
//!       ▼
//!   pagefold_raster::render() ──► output Surface
//! ```
//!
//! **[`surface`]** — Owned ARGB pixel buffers and the vertical slicer that
//! derives fold quadrants.
//!
//! **[`transform`]** — 4×4 hinge rotation, pinhole camera, and the 3×3
//! planar homography the rasterizer consumes.
//!
//! **[`lighting`]** — Signed lighting progress to tint-operation mapping.
//!
//! **[`easing`]** — Polynomial easing curves, including overshooting and
//! bouncing ones.
//!
//! **[`fold`]** — The fold state machine: direction, indices, timing, and
//! per-transition quadrant ownership.
//!
//! **[`compositor`]** — Builds the per-tick [`FoldFrame`](compositor::FoldFrame)
//! draw plan (two static quadrants, one rotating).
//!
//! **[`container`]** — [`PageFold`](container::PageFold): child registry,
//! visibility invariant, public fold API, and the tick contract.
//!
//! **[`host`]** — The capability traits hosts implement
//! ([`Snapshot`](host::Snapshot), [`FoldListener`](host::FoldListener)).
//!
//! **[`time`]** — Monotonic tick timestamps and timebase conversion.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) events for fold-loop
//! instrumentation, with the zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod compositor;
pub mod container;
pub mod easing;
pub mod fold;
pub mod host;
pub mod lighting;
pub mod surface;
pub mod time;
pub mod trace;
pub mod transform;
