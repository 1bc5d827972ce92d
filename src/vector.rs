//! Vector algebra helpers on top of [`glam`].
//!
//! Orbits are computed with [`DVec3`] (and [`DVec2`] for the orbital
//! plane). This module adds the handful of queries the engine needs that
//! glam doesn't provide out of the box, like tolerance-based equality
//! and signed angles.

use glam::{DMat3, DVec2, DVec3};

/// The default tolerance used when comparing vectors.
///
/// Orbit geometry accumulates floating-point error quickly, so
/// vectors are compared within this tolerance rather than bit-for-bit.
pub const EPSILON: f64 = 1e-9;

/// Returns the unit vector in the XY plane pointing at the given angle,
/// measured counterclockwise from the +X axis.
///
/// # Example
/// ```
/// use glam::DVec3;
/// use keplerian_engine::vector::{direction, VectorExt};
///
/// let up = direction(std::f64::consts::FRAC_PI_2);
/// assert!(up.approx_eq(DVec3::Y));
/// ```
pub fn direction(angle: f64) -> DVec3 {
    let (sin, cos) = angle.sin_cos();
    DVec3::new(cos, sin, 0.0)
}

/// Extra vector operations used by the orbit engine.
pub trait VectorExt: Sized {
    /// Rotates the vector by `angle` radians around `axis`, following the
    /// right-hand rule.
    ///
    /// The axis doesn't need to be normalized. A zero axis or a zero angle
    /// leaves the vector untouched.
    fn rotate_about_axis(self, axis: DVec3, angle: f64) -> Self;

    /// Rotates the vector by `angle` radians around the X axis.
    fn rotate_x(self, angle: f64) -> Self;

    /// Rotates the vector by `angle` radians around the Z axis.
    fn rotate_z(self, angle: f64) -> Self;

    /// Gets the angle between this vector and another.
    ///
    /// The angle is negative when the rotation from `self` to `other`
    /// is clockwise when seen from +Z.
    fn signed_angle_with(self, other: Self) -> f64;

    /// Gets the angle of the vector's projection onto the XY plane,
    /// measured from the +X axis.
    fn longitude(self) -> f64;

    /// Compares two vectors within [`EPSILON`].
    fn approx_eq(self, other: Self) -> bool {
        self.approx_eq_eps(other, EPSILON)
    }

    /// Compares two vectors component-wise within `epsilon`.
    fn approx_eq_eps(self, other: Self, epsilon: f64) -> bool;

    /// Whether the vector lies within `radius` of `center`, inclusive.
    fn is_inside_radius(self, center: Self, radius: f64) -> bool;

    /// Like [`is_inside_radius`][VectorExt::is_inside_radius], ignoring
    /// the Z component of both vectors.
    fn is_inside_radius_2d(self, center: Self, radius: f64) -> bool;
}

impl VectorExt for DVec3 {
    fn rotate_about_axis(self, axis: DVec3, angle: f64) -> DVec3 {
        if angle == 0.0 {
            return self;
        }

        let axis = axis.normalize_or_zero();
        if axis == DVec3::ZERO {
            return self;
        }

        DMat3::from_axis_angle(axis, angle) * self
    }

    fn rotate_x(self, angle: f64) -> DVec3 {
        if angle == 0.0 {
            return self;
        }

        let (sin, cos) = angle.sin_cos();
        DVec3::new(
            self.x,
            self.y * cos - self.z * sin,
            self.z * cos + self.y * sin,
        )
    }

    fn rotate_z(self, angle: f64) -> DVec3 {
        if angle == 0.0 {
            return self;
        }

        let (sin, cos) = angle.sin_cos();
        DVec3::new(
            self.x * cos - self.y * sin,
            self.y * cos + self.x * sin,
            self.z,
        )
    }

    fn signed_angle_with(self, other: DVec3) -> f64 {
        let a = self.normalize_or_zero();
        let b = other.normalize_or_zero();

        // Rounding can push the dot product of parallel vectors past 1
        let angle = a.dot(b).clamp(-1.0, 1.0).acos();

        if a.cross(b).z < 0.0 {
            -angle
        } else {
            angle
        }
    }

    fn longitude(self) -> f64 {
        self.y.atan2(self.x)
    }

    fn approx_eq_eps(self, other: DVec3, epsilon: f64) -> bool {
        self.abs_diff_eq(other, epsilon)
    }

    fn is_inside_radius(self, center: DVec3, radius: f64) -> bool {
        self.distance_squared(center) <= radius * radius
    }

    fn is_inside_radius_2d(self, center: DVec3, radius: f64) -> bool {
        self.truncate().is_inside_radius(center.truncate(), radius)
    }
}

impl VectorExt for DVec2 {
    fn rotate_about_axis(self, axis: DVec3, angle: f64) -> DVec2 {
        self.extend(0.0).rotate_about_axis(axis, angle).truncate()
    }

    fn rotate_x(self, angle: f64) -> DVec2 {
        self.extend(0.0).rotate_x(angle).truncate()
    }

    fn rotate_z(self, angle: f64) -> DVec2 {
        DVec2::from_angle(angle).rotate(self)
    }

    fn signed_angle_with(self, other: DVec2) -> f64 {
        self.extend(0.0).signed_angle_with(other.extend(0.0))
    }

    fn longitude(self) -> f64 {
        self.to_angle()
    }

    fn approx_eq_eps(self, other: DVec2, epsilon: f64) -> bool {
        self.abs_diff_eq(other, epsilon)
    }

    fn is_inside_radius(self, center: DVec2, radius: f64) -> bool {
        self.distance_squared(center) <= radius * radius
    }

    fn is_inside_radius_2d(self, center: DVec2, radius: f64) -> bool {
        self.is_inside_radius(center, radius)
    }
}
