// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthetic lighting for the rotating quadrant.
//!
//! As a quadrant folds away from flat, it is shaded: toward the viewer it
//! brightens (white tint, drawn over the quadrant), away from the viewer it
//! darkens (black tint, constrained to the quadrant's own coverage). The
//! mapping is a pure function of the signed lighting progress.

use crate::surface::argb;

/// How a tint color combines with the quadrant it covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TintBlend {
    /// Standard source-over: the tint lightens everything it covers,
    /// including spilling alpha onto otherwise transparent pixels.
    #[default]
    SourceOver,
    /// Source-atop: the tint only affects pixels the quadrant already
    /// covers, leaving their alpha untouched.
    SourceAtop,
}

/// A color tint applied to a quadrant while it rotates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TintOp {
    /// Tint color as an unpremultiplied `0xAARRGGBB` word.
    pub color: u32,
    /// How the tint combines with the covered pixels.
    pub blend: TintBlend,
}

impl TintOp {
    /// Returns whether this tint leaves pixels unchanged (zero alpha).
    #[inline]
    #[must_use]
    pub const fn is_noop(self) -> bool {
        self.color >> 24 == 0
    }
}

/// Maps a signed lighting progress to a tint operation.
///
/// `progress` is clamped to `[-100, 100]`. Positive values produce a white
/// [`TintBlend::SourceOver`] tint with alpha `progress * 255 / 100`
/// (lightening); zero and negative values produce a black
/// [`TintBlend::SourceAtop`] tint with alpha `-progress * 255 / 100`
/// (darkening, constrained to covered pixels). `lighting_tint(0)` is a fully
/// transparent no-op.
#[must_use]
pub const fn lighting_tint(progress: i32) -> TintOp {
    let progress = if progress > 100 {
        100
    } else if progress < -100 {
        -100
    } else {
        progress
    };
    if progress > 0 {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "progress in (0, 100] puts the alpha in [0, 255]"
        )]
        let value = (progress * 255 / 100) as u8;
        TintOp {
            color: argb(value, 255, 255, 255),
            blend: TintBlend::SourceOver,
        }
    } else {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "progress in [-100, 0] puts the alpha in [0, 255]"
        )]
        let value = (-progress * 255 / 100) as u8;
        TintOp {
            color: argb(value, 0, 0, 0),
            blend: TintBlend::SourceAtop,
        }
    }
}
