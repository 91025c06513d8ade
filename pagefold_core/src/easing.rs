// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves for fold pacing.
//!
//! An [`EasingFn`] maps the elapsed time fraction (clamped to `[0, 1]` by the
//! caller's clock arithmetic) to a progress fraction. Output is *not* required
//! to stay inside `[0, 1]`: overshooting curves such as [`ease_out_back`]
//! deliberately push past the endpoints, which reads as the page swinging
//! past flat before settling. All curves here are polynomial and `no_std`
//! safe.

/// Easing function signature: maps a time fraction to a progress fraction.
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity). The default curve.
#[inline]
#[must_use]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in (slow start).
#[inline]
#[must_use]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (slow end).
#[inline]
#[must_use]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
#[must_use]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u / 2.0
    }
}

/// Cubic back ease-out: overshoots above 1 before settling.
#[inline]
#[must_use]
pub fn ease_out_back(t: f32) -> f32 {
    const C1: f32 = 1.70158;
    const C3: f32 = C1 + 1.0;
    let t = t.clamp(0.0, 1.0);
    let u = t - 1.0;
    1.0 + C3 * u * u * u + C1 * u * u
}

/// Bounce ease-out: the page lands and bounces a few times before resting.
///
/// Non-monotone but bounded in `[0, 1]`.
#[inline]
#[must_use]
pub fn bounce(t: f32) -> f32 {
    fn rebound(t: f32) -> f32 {
        t * t * 8.0
    }
    let t = t.clamp(0.0, 1.0) * 1.1226;
    if t < 0.3535 {
        rebound(t)
    } else if t < 0.7408 {
        rebound(t - 0.54719) + 0.7
    } else if t < 0.9644 {
        rebound(t - 0.8526) + 0.9
    } else {
        rebound(t - 1.0435) + 0.95
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [(EasingFn, &str); 6] = [
        (linear, "linear"),
        (ease_in, "ease_in"),
        (ease_out, "ease_out"),
        (ease_in_out, "ease_in_out"),
        (ease_out_back, "ease_out_back"),
        (bounce, "bounce"),
    ];

    #[test]
    fn endpoints_settle() {
        for (curve, name) in CURVES {
            assert!(curve(0.0).abs() < 1e-3, "{name}(0) should be ~0");
            assert!((curve(1.0) - 1.0).abs() < 1e-2, "{name}(1) should be ~1");
        }
    }

    #[test]
    fn input_outside_unit_interval_clamps() {
        for (curve, name) in CURVES {
            assert_eq!(curve(-0.5), curve(0.0), "{name} clamps below");
            assert_eq!(curve(1.5), curve(1.0), "{name} clamps above");
        }
    }

    #[test]
    fn linear_is_identity_inside_unit_interval() {
        assert_eq!(linear(0.25), 0.25);
        assert_eq!(linear(0.5), 0.5);
        assert_eq!(linear(0.75), 0.75);
    }

    #[test]
    fn quadratic_curves_meet_at_midpoint() {
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
        assert!(ease_in(0.5) < 0.5);
        assert!(ease_out(0.5) > 0.5);
    }

    #[test]
    fn back_curve_overshoots() {
        let mut peak = 0.0_f32;
        let mut i = 0;
        while i <= 100 {
            peak = peak.max(ease_out_back(i as f32 / 100.0));
            i += 1;
        }
        assert!(peak > 1.05, "ease_out_back should exceed 1, peaked at {peak}");
    }

    #[test]
    fn bounce_stays_bounded_and_dips() {
        let mut min_after_first_land = 2.0_f32;
        let mut i = 0;
        while i <= 100 {
            let v = bounce(i as f32 / 100.0);
            assert!((-0.01..=1.01).contains(&v), "bounce({i}%) = {v}");
            if i > 40 {
                min_after_first_land = min_after_first_land.min(v);
            }
            i += 1;
        }
        assert!(
            min_after_first_land < 0.95,
            "bounce should dip after landing, min {min_after_first_land}"
        );
    }
}
