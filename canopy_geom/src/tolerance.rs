// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tolerant floating-point comparisons shared by every shape.

/// Absolute tolerance used by all tolerant comparisons in this crate.
pub const EPSILON: f64 = 1e-9;

/// Whether `a` and `b` differ by less than [`EPSILON`].
#[inline]
pub fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Whether `a > b`, or the two are close enough to be considered equal.
#[inline]
pub fn is_close_or_greater(a: f64, b: f64) -> bool {
    a > b || is_close(a, b)
}

/// Like [`is_close`], but the tolerance grows with the magnitude of the operands.
///
/// Used where the compared values are products of coordinates (areas), so that
/// large coordinate domains do not fall outside a fixed absolute tolerance.
#[inline]
pub fn is_close_relative(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= EPSILON * scale
}

/// Bit pattern of `v` with `-0.0` folded onto `0.0`, so that values equal under
/// `==` hash identically.
#[inline]
pub(crate) fn canonical_bits(v: f64) -> u64 {
    if v == 0.0 { 0 } else { v.to_bits() }
}
