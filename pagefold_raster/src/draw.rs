// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-plan rasterization.
//!
//! [`render`] applies a [`FoldFrame`] to an output [`Surface`]: a transparent
//! clear, then each item back to front. Static quadrants are integer blits;
//! the rotating quadrant is drawn by inverse-mapping destination pixels
//! through the item's homography and sampling nearest-neighbor, with the
//! lighting tint applied to every sampled pixel.
//!
//! Destinations are clipped to the output; a quadrant magnified past the
//! frame bounds by the perspective simply loses the off-screen part.

use kurbo::{Point, Rect};

use pagefold_core::compositor::{FoldFrame, ItemPass};
use pagefold_core::fold::QuadrantSet;
use pagefold_core::lighting::TintOp;
use pagefold_core::surface::Surface;
use pagefold_core::transform::PlaneMatrix;

use crate::tint::{apply_tint, over};

/// Rasterizes one fold frame into `out`.
///
/// # Panics
///
/// Panics if `out` does not match the frame's dimensions.
pub fn render(frame: &FoldFrame, quadrants: &QuadrantSet, out: &mut Surface) {
    assert!(
        out.width() == frame.width && out.height() == frame.height,
        "output {}x{} does not match frame {}x{}",
        out.width(),
        out.height(),
        frame.width,
        frame.height
    );

    out.fill(0);
    for item in &frame.items {
        let src = quadrants.get(item.quadrant);
        match item.pass {
            ItemPass::Blit { dx, dy } => blit(src, out, dx, dy),
            ItemPass::Projected { transform, tint } => {
                draw_projected(src, &transform, tint, out);
            }
        }
    }
}

/// Source-over copies `src` into `out` at an integer offset, clipped to the
/// output bounds.
pub fn blit(src: &Surface, out: &mut Surface, dx: u32, dy: u32) {
    let cols = src.width().min(out.width().saturating_sub(dx));
    let rows = src.height().min(out.height().saturating_sub(dy));
    for y in 0..rows {
        for x in 0..cols {
            let composed = over(src.pixel(x, y), out.pixel(dx + x, dy + y));
            out.set_pixel(dx + x, dy + y, composed);
        }
    }
}

/// Draws `src` through a perspective homography with a lighting tint.
///
/// The destination area is the bounding box of the forward-projected source
/// corners (the whole output if a corner projects behind the camera),
/// clipped to the output. Each destination pixel center is inverse-mapped to
/// source space and sampled nearest-neighbor. A singular transform (quadrant
/// viewed exactly edge-on) draws nothing.
pub fn draw_projected(src: &Surface, transform: &PlaneMatrix, tint: TintOp, out: &mut Surface) {
    if src.width() == 0 || src.height() == 0 {
        return;
    }
    let Some(inverse) = transform.invert() else {
        return;
    };

    let (x0, y0, x1, y1) = match dest_bounds(src, transform) {
        Some(rect) => clip_to(rect, out.width(), out.height()),
        // A corner behind the camera: fall back to scanning the whole output.
        None => (0, 0, out.width(), out.height()),
    };

    let src_w = f64::from(src.width());
    let src_h = f64::from(src.height());
    for py in y0..y1 {
        for px in x0..x1 {
            let center = Point::new(f64::from(px) + 0.5, f64::from(py) + 0.5);
            let Some(p) = inverse.apply(center) else {
                continue;
            };
            if p.x < 0.0 || p.y < 0.0 || p.x >= src_w || p.y >= src_h {
                continue;
            }
            #[expect(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "bounds-checked above; floor of a non-negative in-range f64"
            )]
            let (sx, sy) = (p.x as u32, p.y as u32);
            let sampled = apply_tint(src.pixel(sx, sy), tint);
            let composed = over(sampled, out.pixel(px, py));
            out.set_pixel(px, py, composed);
        }
    }
}

/// Bounding box of the forward-projected corners of `src`, or `None` if any
/// corner has no screen position.
fn dest_bounds(src: &Surface, transform: &PlaneMatrix) -> Option<Rect> {
    let w = f64::from(src.width());
    let h = f64::from(src.height());
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(0.0, h),
        Point::new(w, h),
    ];

    let first = transform.apply(corners[0])?;
    let mut rect = Rect::from_points(first, first);
    for corner in &corners[1..] {
        let p = transform.apply(*corner)?;
        rect = rect.union_pt(p);
    }
    Some(rect)
}

/// Clips a destination rectangle to `width` × `height` pixel bounds.
fn clip_to(rect: Rect, width: u32, height: u32) -> (u32, u32, u32, u32) {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to [0, u32 pixel bounds] before the cast"
    )]
    let clamp = |v: f64, hi: u32| -> u32 { v.clamp(0.0, f64::from(hi)) as u32 };
    (
        clamp(rect.x0.floor(), width),
        clamp(rect.y0.floor(), height),
        clamp(rect.x1.ceil(), width),
        clamp(rect.y1.ceil(), height),
    )
}

#[cfg(test)]
mod tests {
    use pagefold_core::compositor::compose;
    use pagefold_core::lighting::lighting_tint;
    use pagefold_core::surface::{alpha, argb, red};
    use pagefold_core::transform::{FoldCamera, Transform3d};

    use super::*;

    const RED: u32 = argb(255, 200, 0, 0);
    const BLUE: u32 = argb(255, 0, 0, 200);

    /// Quadrants for a red front page and a blue back page, both 8×6.
    fn fold_quadrants() -> QuadrantSet {
        let front = Surface::filled(8, 6, RED);
        let back = Surface::filled(8, 6, BLUE);
        QuadrantSet::from_pages(&front, &back).unwrap()
    }

    #[test]
    fn blit_offsets_and_clips() {
        let src = Surface::filled(3, 2, RED);
        let mut out = Surface::new(4, 3);
        blit(&src, &mut out, 2, 2);

        assert_eq!(out.pixel(2, 2), RED);
        assert_eq!(out.pixel(3, 2), RED);
        assert_eq!(out.pixel(1, 2), 0);
        assert_eq!(out.pixel(2, 1), 0);
    }

    #[test]
    fn identity_projection_copies_pixels() {
        let src = Surface::filled(4, 3, RED);
        let mut out = Surface::new(8, 6);
        draw_projected(
            &src,
            &PlaneMatrix::IDENTITY,
            lighting_tint(0),
            &mut out,
        );
        assert_eq!(out.pixel(0, 0), RED);
        assert_eq!(out.pixel(3, 2), RED);
        assert_eq!(out.pixel(4, 0), 0, "outside the source footprint");
    }

    #[test]
    fn singular_transform_draws_nothing() {
        let src = Surface::filled(4, 4, RED);
        let mut out = Surface::new(8, 8);
        let edge_on =
            FoldCamera::DEFAULT.project(Transform3d::from_rotation_x(core::f64::consts::FRAC_PI_2));
        draw_projected(&src, &edge_on, lighting_tint(0), &mut out);
        assert!(out.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn projected_tint_darkens_samples() {
        let src = Surface::filled(4, 4, RED);
        let mut out = Surface::new(8, 8);
        draw_projected(&src, &PlaneMatrix::IDENTITY, lighting_tint(-50), &mut out);
        let p = out.pixel(1, 1);
        assert_eq!(alpha(p), 255);
        assert!(red(p) < red(RED) && red(p) > 0);
    }

    #[test]
    fn frame_at_start_shows_the_front_page() {
        // Progress 0: the flat, untinted top-front covers the top-back, and
        // the bottom-front fills the lower half — the front page, restacked.
        let frame = compose(0.0, 8, 6, FoldCamera::DEFAULT);
        let mut out = Surface::new(8, 6);
        render(&frame, &fold_quadrants(), &mut out);
        assert!(out.pixels().iter().all(|&p| p == RED));
    }

    #[test]
    fn frame_at_end_shows_the_back_page() {
        // Progress 1: static top-back plus the flat bottom-back translated
        // into the lower half — the back page, restacked.
        let frame = compose(1.0, 8, 6, FoldCamera::DEFAULT);
        let mut out = Surface::new(8, 6);
        render(&frame, &fold_quadrants(), &mut out);
        assert!(out.pixels().iter().all(|&p| p == BLUE));
    }

    #[test]
    fn frame_at_midpoint_shows_only_static_quadrants() {
        // Progress 0.5: the rotating quadrant is edge-on (singular) and
        // contributes nothing; top is back page, bottom is front page.
        let frame = compose(0.5, 8, 6, FoldCamera::DEFAULT);
        let mut out = Surface::new(8, 6);
        render(&frame, &fold_quadrants(), &mut out);
        for x in 0..8 {
            assert_eq!(out.pixel(x, 0), BLUE);
            assert_eq!(out.pixel(x, 2), BLUE);
            assert_eq!(out.pixel(x, 3), RED);
            assert_eq!(out.pixel(x, 5), RED);
        }
    }

    #[test]
    fn mid_first_phase_folds_the_top_toward_the_midline() {
        let frame = compose(0.25, 8, 6, FoldCamera::DEFAULT);
        let mut out = Surface::new(8, 6);
        render(&frame, &fold_quadrants(), &mut out);

        // The top row is already revealed back page; just above the hinge the
        // rotating front panel still covers (darkened red, not blue).
        assert_eq!(out.pixel(4, 0), BLUE);
        let near_hinge = out.pixel(4, 2);
        assert!(red(near_hinge) > 0, "rotating front panel covers the hinge");
        assert_eq!(alpha(near_hinge), 255);

        // Lower half is untouched static front.
        assert_eq!(out.pixel(4, 4), RED);
    }

    #[test]
    #[should_panic(expected = "does not match frame")]
    fn mismatched_output_panics() {
        let frame = compose(0.0, 8, 6, FoldCamera::DEFAULT);
        let mut out = Surface::new(4, 4);
        render(&frame, &fold_quadrants(), &mut out);
    }
}
