// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-tick frame composition.
//!
//! While a fold is in flight, each tick produces a [`FoldFrame`]: an ordered,
//! back-to-front plan of quadrant draws over an implicitly transparent
//! output. Two quadrants are static for the whole transition; one rotates.
//!
//! The fold is modeled as two flat panels hinging at the container midline,
//! split into two half-phases at progress 0.5:
//!
//! - **First half** (`progress < 0.5`): the top-front quadrant rotates from
//!   flat (0°) down to perpendicular (90°), hinged at its bottom edge.
//! - **Second half** (`progress >= 0.5`): the bottom-back quadrant rotates
//!   up from perpendicular to flat, hinged at its top edge and placed in the
//!   lower half.
//!
//! Splitting at the perpendicular avoids projecting a plane viewed exactly
//! edge-on; each frame carries exactly one rotating quadrant.

use alloc::vec::Vec;

use crate::lighting::{TintOp, lighting_tint};
use crate::transform::{FoldCamera, PlaneMatrix, Transform3d};

/// Identifies one of the four half-surfaces of a fold.
///
/// "Front" and "back" are in page order: the front page is the one whose top
/// half rotates away first; the back page is revealed beneath it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuadrantId {
    /// Top half of the front page (rotates during the first half-phase).
    TopFront,
    /// Top half of the back page (static, visible behind the rotating panel).
    TopBack,
    /// Bottom half of the front page (static until covered).
    BottomFront,
    /// Bottom half of the back page (rotates during the second half-phase).
    BottomBack,
}

/// Which half-phase of the fold a frame belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FoldHalf {
    /// `progress < 0.5`: the top-front quadrant is rotating.
    First,
    /// `progress >= 0.5`: the bottom-back quadrant is rotating.
    Second,
}

/// How a frame item is drawn into the output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemPass {
    /// Copy the quadrant at an integer offset, unscaled and untinted.
    Blit {
        /// Left edge of the destination, in output pixels.
        dx: u32,
        /// Top edge of the destination, in output pixels.
        dy: u32,
    },
    /// Map the quadrant through a perspective homography and tint it.
    Projected {
        /// Quadrant-local to output-space homography.
        transform: PlaneMatrix,
        /// Lighting tint applied to sampled pixels.
        tint: TintOp,
    },
}

/// A single quadrant draw in a [`FoldFrame`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameItem {
    /// Which quadrant to draw.
    pub quadrant: QuadrantId,
    /// How to draw it.
    pub pass: ItemPass,
}

/// One composited fold frame: an ordered draw plan for a single tick.
///
/// Items are in back-to-front order over a transparent-cleared output of
/// `width` × `height` pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct FoldFrame {
    /// Output width in pixels (the front page's width).
    pub width: u32,
    /// Output height in pixels (the front page's height).
    pub height: u32,
    /// Signed fold progress this frame was composed at.
    pub progress: f32,
    /// Which half-phase the frame belongs to.
    pub half: FoldHalf,
    /// Rotation angle of the moving quadrant, in degrees.
    pub angle_deg: f64,
    /// Draw items, back to front.
    pub items: Vec<FrameItem>,
}

/// Composes the draw plan for one fold frame.
///
/// `progress` is the eased, direction-adjusted fold progress. Values outside
/// `[0, 1]` (overshooting easing curves) are composed as-is: the rotation
/// angle follows the overshoot and the lighting progress saturates.
///
/// # Panics
///
/// Panics if `width` or `height` is zero.
#[must_use]
pub fn compose(progress: f32, width: u32, height: u32, camera: FoldCamera) -> FoldFrame {
    assert!(width > 0 && height > 0, "cannot compose a zero-area frame");

    let half = height / 2;
    let half_w = f64::from(width / 2);
    let half_h = f64::from(half);

    let mut items = Vec::with_capacity(3);
    items.push(FrameItem {
        quadrant: QuadrantId::TopBack,
        pass: ItemPass::Blit { dx: 0, dy: 0 },
    });
    items.push(FrameItem {
        quadrant: QuadrantId::BottomFront,
        pass: ItemPass::Blit { dx: 0, dy: half },
    });

    let (half_phase, angle_deg) = if progress < 0.5 {
        (FoldHalf::First, f64::from(-progress) * 180.0)
    } else {
        (FoldHalf::Second, f64::from(1.0 - progress) * 180.0)
    };

    let rotation = Transform3d::from_rotation_x(angle_deg.to_radians());
    debug_assert!(rotation.is_finite(), "rotation must be finite");

    match half_phase {
        FoldHalf::First => {
            // Hinge the top-front quadrant at its bottom edge, pinned to the
            // container midline.
            let transform = camera
                .project(rotation)
                .pre_translate(-half_w, -half_h)
                .post_translate(half_w, half_h);
            #[expect(
                clippy::cast_possible_truncation,
                reason = "lighting progress saturates inside lighting_tint"
            )]
            let tint = lighting_tint((-progress * 100.0) as i32);
            items.push(FrameItem {
                quadrant: QuadrantId::TopFront,
                pass: ItemPass::Projected { transform, tint },
            });
        }
        FoldHalf::Second => {
            // Hinge the bottom-back quadrant at its top edge and place it in
            // the lower half.
            let transform = camera
                .project(rotation)
                .pre_translate(-half_w, 0.0)
                .post_translate(half_w, half_h);
            #[expect(
                clippy::cast_possible_truncation,
                reason = "lighting progress saturates inside lighting_tint"
            )]
            let tint = lighting_tint((progress * 100.0 - 100.0) as i32);
            items.push(FrameItem {
                quadrant: QuadrantId::BottomBack,
                pass: ItemPass::Projected { transform, tint },
            });
        }
    }

    FoldFrame {
        width,
        height,
        progress,
        half: half_phase,
        angle_deg,
        items,
    }
}
