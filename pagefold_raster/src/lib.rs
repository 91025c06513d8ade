// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Software rasterizer for pagefold frame plans.
//!
//! `pagefold_core` produces a [`FoldFrame`](pagefold_core::compositor::FoldFrame)
//! draw plan per tick; this crate turns a plan plus the transition's
//! [`QuadrantSet`](pagefold_core::fold::QuadrantSet) into pixels:
//!
//! - [`render`] — clear, blit the static quadrants, perspective-map the
//!   rotating one.
//! - [`blit`] / [`draw_projected`] — the individual draw passes.
//! - [`tint`] — per-pixel tint and source-over arithmetic.
//!
//! Hosts with their own compositor (GPU layers, native views) can ignore
//! this crate and consume the plan directly; it exists for software hosts,
//! tests, and demos.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod draw;
pub mod tint;

pub use draw::{blit, draw_projected, render};
