// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for pagefold
//! diagnostics.
//!
//! This crate provides [`TraceSink`](pagefold_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`] — in-memory event recording.
//! - [`chrome::export`] — writes Chrome Trace Event Format JSON from
//!   recorded events.

pub mod chrome;
pub mod pretty;
pub mod recorder;
