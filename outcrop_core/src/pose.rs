// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column-major 4×4 rigid transform.
//!
//! [`RigidTransform`] covers the subset of pose math outcrop needs (identity,
//! multiply, translation/rotation constructors, position extraction) without
//! pulling in a linear-algebra crate. Storage is column-major `f32`, the
//! layout `XRRigidTransform.matrix` hands back, so a WebXR pose converts with
//! a single copy and no transposition.
//!
//! A rigid transform carries position and orientation only — there is no
//! scale constructor. Hit poses reported by an XR runtime are rigid by
//! definition.

use core::ops::Mul;

/// A column-major 4×4 rigid transform stored as `[[f32; 4]; 4]`.
///
/// Each inner array is one *column* of the matrix, matching the memory
/// layout of `XRRigidTransform.matrix` and GPU APIs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidTransform {
    /// Four columns, each a 4-element array `[x, y, z, w]`.
    pub cols: [[f32; 4]; 4],
}

impl RigidTransform {
    /// The 4×4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Creates a transform from a flat column-major 16-element array.
    #[inline]
    #[must_use]
    pub const fn from_cols_array(m: &[f32; 16]) -> Self {
        Self {
            cols: [
                [m[0], m[1], m[2], m[3]],
                [m[4], m[5], m[6], m[7]],
                [m[8], m[9], m[10], m[11]],
                [m[12], m[13], m[14], m[15]],
            ],
        }
    }

    /// Creates a transform from a column-major slice as returned by
    /// `XRRigidTransform.matrix`.
    ///
    /// Returns `None` if the slice is not exactly 16 elements or contains a
    /// non-finite value.
    #[must_use]
    pub fn try_from_matrix(m: &[f32]) -> Option<Self> {
        let m: &[f32; 16] = m.try_into().ok()?;
        let t = Self::from_cols_array(m);
        t.is_finite().then_some(t)
    }

    /// Returns the flat column-major 16-element array.
    #[inline]
    #[must_use]
    pub const fn to_cols_array(self) -> [f32; 16] {
        let c = self.cols;
        [
            c[0][0], c[0][1], c[0][2], c[0][3], c[1][0], c[1][1], c[1][2], c[1][3], c[2][0],
            c[2][1], c[2][2], c[2][3], c[3][0], c[3][1], c[3][2], c[3][3],
        ]
    }

    /// Creates a pure translation transform.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f32, y: f32, z: f32) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Creates a rotation around the Y axis (radians).
    ///
    /// Y is "up" in both `local` and `viewer` XR reference spaces, so this is
    /// the natural yaw for surface-aligned content.
    #[inline]
    #[must_use]
    pub fn from_rotation_y(radians: f32) -> Self {
        let (s, c) = (libm::sinf(radians), libm::cosf(radians));
        Self {
            cols: [
                [c, 0.0, -s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Returns the translation component `[x, y, z]`.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> [f32; 3] {
        let t = self.cols[3];
        [t[0], t[1], t[2]]
    }

    /// Is every element [finite](f32::is_finite)?
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.cols.iter().flatten().all(|v| v.is_finite())
    }
}

impl Default for RigidTransform {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for RigidTransform {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0_f32; 4]; 4];
        for j in 0..4 {
            for i in 0..4 {
                out[j][i] =
                    a[0][i] * b[j][0] + a[1][i] * b[j][1] + a[2][i] * b[j][2] + a[3][i] * b[j][3];
            }
        }
        Self { cols: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        assert_eq!(RigidTransform::default(), RigidTransform::IDENTITY);
    }

    #[test]
    fn identity_multiply() {
        let t = RigidTransform::from_translation(1.0, 2.0, 3.0);
        assert_eq!(RigidTransform::IDENTITY * t, t);
        assert_eq!(t * RigidTransform::IDENTITY, t);
    }

    #[test]
    fn translation_composition() {
        let a = RigidTransform::from_translation(1.0, 0.0, 0.0);
        let b = RigidTransform::from_translation(0.0, 2.0, 0.0);
        assert_eq!((a * b).position(), [1.0, 2.0, 0.0]);
    }

    #[test]
    fn flat_array_round_trip() {
        let t = RigidTransform::from_translation(5.0, 6.0, 7.0);
        let arr = t.to_cols_array();
        assert_eq!(RigidTransform::from_cols_array(&arr), t);
        // Translation lands in the last column, as XRRigidTransform.matrix
        // stores it.
        assert_eq!(&arr[12..15], &[5.0, 6.0, 7.0]);
    }

    #[test]
    fn rotation_y_ninety_degrees() {
        let r = RigidTransform::from_rotation_y(core::f32::consts::FRAC_PI_2);
        let eps = 1e-6;
        // +Z maps to +X.
        assert!((r.cols[2][0] - 1.0).abs() < eps);
        assert!((r.cols[2][2]).abs() < eps);
    }

    #[test]
    fn try_from_matrix_accepts_xr_layout() {
        let mut m = RigidTransform::IDENTITY.to_cols_array();
        m[12] = 0.5;
        m[13] = -0.2;
        m[14] = 1.5;
        let t = RigidTransform::try_from_matrix(&m).expect("valid matrix");
        assert_eq!(t.position(), [0.5, -0.2, 1.5]);
    }

    #[test]
    fn try_from_matrix_rejects_bad_input() {
        assert!(RigidTransform::try_from_matrix(&[0.0; 15]).is_none());
        let mut m = RigidTransform::IDENTITY.to_cols_array();
        m[5] = f32::NAN;
        assert!(RigidTransform::try_from_matrix(&m).is_none());
    }
}
