// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pixel tint and compositing arithmetic.
//!
//! All math is integer arithmetic on unpremultiplied `0xAARRGGBB` channels,
//! with `(x * y + 127) / 255` rounding for channel products.

use pagefold_core::lighting::{TintBlend, TintOp};
use pagefold_core::surface::{alpha, argb, blue, green, red};

/// Rounded `a * b / 255` for channel values.
#[inline]
fn mul255(a: u8, b: u8) -> u8 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "(255 * 255 + 127) / 255 = 255 fits u8"
    )]
    let v = ((u32::from(a) * u32::from(b) + 127) / 255) as u8;
    v
}

/// Applies a lighting tint to one pixel.
///
/// [`TintBlend::SourceOver`] composites the tint color over the pixel,
/// lightening color and coverage alike. [`TintBlend::SourceAtop`] mixes the
/// tint into the pixel's color but preserves the pixel's alpha, so fully
/// transparent pixels stay invisible.
#[must_use]
pub fn apply_tint(pixel: u32, tint: TintOp) -> u32 {
    if tint.is_noop() {
        return pixel;
    }
    let ta = alpha(tint.color);
    match tint.blend {
        TintBlend::SourceOver => over(tint.color, pixel),
        TintBlend::SourceAtop => {
            let keep = 255 - ta;
            argb(
                alpha(pixel),
                mul255(red(tint.color), ta) + mul255(red(pixel), keep),
                mul255(green(tint.color), ta) + mul255(green(pixel), keep),
                mul255(blue(tint.color), ta) + mul255(blue(pixel), keep),
            )
        }
    }
}

/// Source-over composite of `src` onto `dst` (both unpremultiplied).
#[must_use]
pub fn over(src: u32, dst: u32) -> u32 {
    let sa = alpha(src);
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }
    let da = alpha(dst);
    let keep = 255 - sa;
    let oa = sa + mul255(da, keep);
    if oa == 0 {
        return 0;
    }
    // Blend premultiplied, then un-premultiply by the output alpha.
    let channel = |s: u8, d: u8| -> u8 {
        let premult = u32::from(mul255(s, sa)) + u32::from(mul255(mul255(d, da), keep));
        #[expect(
            clippy::cast_possible_truncation,
            reason = "premult <= oa by construction, so the quotient fits u8"
        )]
        let v = ((premult * 255 + u32::from(oa) / 2) / u32::from(oa)).min(255) as u8;
        v
    };
    argb(
        oa,
        channel(red(src), red(dst)),
        channel(green(src), green(dst)),
        channel(blue(src), blue(dst)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagefold_core::lighting::lighting_tint;

    const OPAQUE_RED: u32 = argb(255, 200, 0, 0);

    #[test]
    fn noop_tint_keeps_pixel() {
        assert_eq!(apply_tint(OPAQUE_RED, lighting_tint(0)), OPAQUE_RED);
    }

    #[test]
    fn full_white_tint_saturates() {
        let tinted = apply_tint(OPAQUE_RED, lighting_tint(100));
        assert_eq!(tinted, argb(255, 255, 255, 255));
    }

    #[test]
    fn full_black_tint_blacks_out_color_but_keeps_alpha() {
        let tinted = apply_tint(OPAQUE_RED, lighting_tint(-100));
        assert_eq!(tinted, argb(255, 0, 0, 0));

        let half = apply_tint(argb(128, 200, 0, 0), lighting_tint(-100));
        assert_eq!(alpha(half), 128, "atop preserves the pixel's alpha");
        assert_eq!(red(half), 0);
    }

    #[test]
    fn darkening_scales_channels_down() {
        let tinted = apply_tint(OPAQUE_RED, lighting_tint(-50));
        assert_eq!(alpha(tinted), 255);
        let expected = mul255(200, 255 - alpha(lighting_tint(-50).color));
        assert_eq!(red(tinted), expected);
        assert_eq!(green(tinted), 0);
    }

    #[test]
    fn atop_on_transparent_pixel_stays_invisible() {
        let tinted = apply_tint(0, lighting_tint(-60));
        assert_eq!(alpha(tinted), 0);
    }

    #[test]
    fn lightening_spills_onto_transparent_pixels() {
        // Source-over white tints empty coverage too.
        let tinted = apply_tint(0, lighting_tint(40));
        assert!(alpha(tinted) > 0);
        assert_eq!(red(tinted), 255);
    }

    #[test]
    fn over_opaque_source_wins() {
        assert_eq!(over(OPAQUE_RED, argb(255, 0, 0, 200)), OPAQUE_RED);
    }

    #[test]
    fn over_transparent_source_keeps_destination() {
        assert_eq!(over(0, OPAQUE_RED), OPAQUE_RED);
    }

    #[test]
    fn over_blends_half_coverage() {
        let blended = over(argb(128, 255, 255, 255), argb(255, 0, 0, 0));
        assert_eq!(alpha(blended), 255);
        // Roughly half gray, allowing rounding slack.
        assert!((i32::from(red(blended)) - 128).abs() <= 1);
    }

    #[test]
    fn over_two_transparents_is_transparent() {
        assert_eq!(over(argb(0, 255, 0, 0), argb(0, 0, 255, 0)), 0);
    }
}
