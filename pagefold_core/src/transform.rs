// Copyright 2026 the Pagefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fold geometry: 3-D hinge rotation and planar perspective projection.
//!
//! The fold is simulated by rotating a flat quadrant about the X axis and
//! projecting the result back onto the output plane through a pinhole camera:
//!
//! - [`Transform3d`] — minimal column-major 4×4 affine transform (identity,
//!   translation, X-axis rotation, multiply).
//! - [`FoldCamera`] — the projection distance; flattens a [`Transform3d`]
//!   applied to the z = 0 plane into a [`PlaneMatrix`].
//! - [`PlaneMatrix`] — a 3×3 homography with perspective division, the form
//!   consumed by the rasterizer (forward for bounds, inverse for sampling).

use core::ops::Mul;

use kurbo::Point;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// A column-major 4×4 affine transform stored as `[[f64; 4]; 4]`.
///
/// Each inner array is one *column* of the matrix, matching the memory layout
/// used by GPU APIs and Core Animation's `CATransform3D`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3d {
    /// Four columns, each a 4-element array `[x, y, z, w]`.
    pub cols: [[f64; 4]; 4],
}

impl Transform3d {
    /// The 4×4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Creates a pure translation transform.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Creates a rotation around the X axis (radians).
    ///
    /// This is the fold hinge: content on the positive-y side of the axis
    /// swings toward positive z for positive angles.
    #[inline]
    #[must_use]
    pub fn from_rotation_x(radians: f64) -> Self {
        #[cfg(feature = "std")]
        let (s, c) = radians.sin_cos();
        #[cfg(not(feature = "std"))]
        let (s, c) = (radians.sin(), radians.cos());
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, s, 0.0],
                [0.0, -s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Returns column `i` (0-based).
    ///
    /// # Panics
    ///
    /// Panics if `i >= 4`.
    #[inline]
    #[must_use]
    pub const fn col(self, i: usize) -> [f64; 4] {
        self.cols[i]
    }

    /// Is every element of this transform [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.cols
            .iter()
            .all(|col| col.iter().all(|v| v.is_finite()))
    }
}

impl Default for Transform3d {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform3d {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0_f64; 4]; 4];
        let mut j = 0;
        while j < 4 {
            let mut i = 0;
            while i < 4 {
                out[j][i] =
                    a[0][i] * b[j][0] + a[1][i] * b[j][1] + a[2][i] * b[j][2] + a[3][i] * b[j][3];
                i += 1;
            }
            j += 1;
        }
        Self { cols: out }
    }
}

/// Pinhole camera used to flatten fold rotations onto the output plane.
///
/// The viewer sits on the positive z axis at `depth` pixels from the plane;
/// points rotated toward positive z approach the viewer and magnify. The
/// [default](Self::DEFAULT) depth of 576 is the classic viewing distance of
/// 8 units at 72 pixels per unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoldCamera {
    /// Distance from the viewer to the z = 0 plane, in pixels.
    pub depth: f64,
}

impl FoldCamera {
    /// The conventional 576-pixel viewing distance.
    pub const DEFAULT: Self = Self { depth: 576.0 };

    /// Creates a camera with the given projection distance.
    ///
    /// # Panics
    ///
    /// Panics if `depth` is not strictly positive.
    #[must_use]
    pub fn new(depth: f64) -> Self {
        assert!(depth > 0.0, "camera depth must be positive");
        Self { depth }
    }

    /// Projects a 3-D transform applied to the z = 0 plane into a 2-D
    /// homography.
    ///
    /// For a plane point `(x, y, 0, 1)` the transform yields `(x', y', z')`;
    /// the screen position is `(x', y')` scaled by `depth / (depth - z')`.
    /// That division is what [`PlaneMatrix::apply`] performs.
    #[must_use]
    pub fn project(self, t: Transform3d) -> PlaneMatrix {
        let d = self.depth;
        let c = &t.cols;
        PlaneMatrix {
            cols: [
                [c[0][0], c[0][1], -c[0][2] / d],
                [c[1][0], c[1][1], -c[1][2] / d],
                [c[3][0], c[3][1], 1.0 - c[3][2] / d],
            ],
        }
    }
}

impl Default for FoldCamera {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A column-major 3×3 planar homography.
///
/// Maps `(x, y, 1)` column vectors to homogeneous `(x', y', w)` and divides
/// by `w`. Produced by [`FoldCamera::project`] and composed with the pivot
/// translations that hinge a quadrant at the container midline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneMatrix {
    /// Three columns, each a 3-element array `[x, y, w]`.
    pub cols: [[f64; 3]; 3],
}

impl PlaneMatrix {
    /// The 3×3 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Creates a pure 2-D translation.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64) -> Self {
        Self {
            cols: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [x, y, 1.0]],
        }
    }

    /// Prepends a translation: source points are shifted by `(x, y)` before
    /// this matrix applies.
    ///
    /// This is how a quadrant's hinge edge is moved onto the rotation axis.
    #[inline]
    #[must_use]
    pub fn pre_translate(self, x: f64, y: f64) -> Self {
        self * Self::from_translation(x, y)
    }

    /// Appends a translation: results are shifted by `(x, y)` after this
    /// matrix applies.
    ///
    /// This is how the rotated quadrant is placed back at the container
    /// midline.
    #[inline]
    #[must_use]
    pub fn post_translate(self, x: f64, y: f64) -> Self {
        Self::from_translation(x, y) * self
    }

    /// Applies the homography to a point.
    ///
    /// Returns `None` when the point projects to or behind the camera plane
    /// (non-positive `w`), where no meaningful screen position exists.
    #[must_use]
    pub fn apply(&self, p: Point) -> Option<Point> {
        let c = &self.cols;
        let w = c[0][2] * p.x + c[1][2] * p.y + c[2][2];
        if w <= 1e-9 {
            return None;
        }
        let x = c[0][0] * p.x + c[1][0] * p.y + c[2][0];
        let y = c[0][1] * p.x + c[1][1] * p.y + c[2][1];
        Some(Point::new(x / w, y / w))
    }

    /// Returns the inverse homography, or `None` if this matrix is singular
    /// (e.g. a quadrant viewed exactly edge-on collapses to zero area).
    #[must_use]
    pub fn invert(&self) -> Option<Self> {
        let c = &self.cols;
        // Row-major aliases for the cofactor expansion.
        let (a, b, cc) = (c[0][0], c[1][0], c[2][0]);
        let (d, e, f) = (c[0][1], c[1][1], c[2][1]);
        let (g, h, i) = (c[0][2], c[1][2], c[2][2]);

        let det = a * (e * i - f * h) - b * (d * i - f * g) + cc * (d * h - e * g);
        if det.abs() < 1e-12 {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self {
            cols: [
                [
                    (e * i - f * h) * inv,
                    (f * g - d * i) * inv,
                    (d * h - e * g) * inv,
                ],
                [
                    (cc * h - b * i) * inv,
                    (a * i - cc * g) * inv,
                    (b * g - a * h) * inv,
                ],
                [
                    (b * f - cc * e) * inv,
                    (cc * d - a * f) * inv,
                    (a * e - b * d) * inv,
                ],
            ],
        })
    }

    /// Is every element of this homography [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.cols
            .iter()
            .all(|col| col.iter().all(|v| v.is_finite()))
    }
}

impl Default for PlaneMatrix {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for PlaneMatrix {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0_f64; 3]; 3];
        let mut j = 0;
        while j < 3 {
            let mut i = 0;
            while i < 3 {
                out[j][i] = a[0][i] * b[j][0] + a[1][i] * b[j][1] + a[2][i] * b[j][2];
                i += 1;
            }
            j += 1;
        }
        Self { cols: out }
    }
}
