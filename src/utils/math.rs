//! 2D vector helpers layered on top of `glam`.
//!
//! `glam::Vec2` already covers add, subtract, scale, dot, length and squared
//! length through its operators and methods. The helpers here cover the
//! zero-safe normalization used for contact normals and the in-place scaling
//! behind the speed cap.

use glam::Vec2;

/// Returns the unit vector of `v`, or zero when `v` has zero length.
#[inline]
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let length = v.length();
    if length == 0.0 {
        return Vec2::ZERO;
    }
    v / length
}

/// Scales `v` in place.
#[inline]
pub fn scale_in_place(v: &mut Vec2, factor: f32) {
    *v *= factor;
}

/// Rescales `v` to `max_length` if it is longer, leaving it untouched otherwise.
///
/// Compares squared lengths so the common case needs no square root.
#[inline]
pub fn clamp_length_in_place(v: &mut Vec2, max_length: f32) {
    let length_sq = v.length_squared();
    if length_sq > max_length * max_length {
        scale_in_place(v, max_length / length_sq.sqrt());
    }
}

/// Splits `v` into its components along and across the unit `normal`.
#[inline]
pub fn decompose(v: Vec2, normal: Vec2) -> (Vec2, Vec2) {
    let along = normal * v.dot(normal);
    (along, v - along)
}
