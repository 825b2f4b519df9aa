// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validated ray directions.

use kurbo::Vec2;

/// Reasons a [`Direction`] cannot be constructed.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum DirectionError {
    /// Both components were zero, so the ray has no heading.
    #[error("a direction cannot be the zero vector")]
    Zero,
    /// A component was NaN or infinite.
    #[error("direction components must be finite")]
    NonFinite,
}

/// Direction of a ray: a finite 2D vector that is never the zero vector.
///
/// The length carries no meaning; only the heading is used by ray queries.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Direction {
    dx: f64,
    dy: f64,
}

impl Direction {
    /// Towards `+x`.
    pub const POS_X: Self = Self { dx: 1.0, dy: 0.0 };
    /// Towards `-x`.
    pub const NEG_X: Self = Self { dx: -1.0, dy: 0.0 };
    /// Towards `+y`.
    pub const POS_Y: Self = Self { dx: 0.0, dy: 1.0 };
    /// Towards `-y`.
    pub const NEG_Y: Self = Self { dx: 0.0, dy: -1.0 };

    /// Create a direction from its components.
    ///
    /// Fails with [`DirectionError::Zero`] when both components are zero and with
    /// [`DirectionError::NonFinite`] when either is NaN or infinite.
    pub fn new(dx: f64, dy: f64) -> Result<Self, DirectionError> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(DirectionError::NonFinite);
        }
        if dx == 0.0 && dy == 0.0 {
            return Err(DirectionError::Zero);
        }
        Ok(Self { dx, dy })
    }

    /// The `x` component.
    #[inline]
    pub const fn dx(self) -> f64 {
        self.dx
    }

    /// The `y` component.
    #[inline]
    pub const fn dy(self) -> f64 {
        self.dy
    }

    /// The direction as a plain Kurbo vector.
    #[inline]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }

    /// The same heading scaled to unit length.
    pub fn unit(self) -> Vec2 {
        self.to_vec2().normalize()
    }
}

impl TryFrom<Vec2> for Direction {
    type Error = DirectionError;

    fn try_from(v: Vec2) -> Result<Self, Self::Error> {
        Self::new(v.x, v.y)
    }
}

impl From<Direction> for Vec2 {
    fn from(d: Direction) -> Self {
        d.to_vec2()
    }
}
