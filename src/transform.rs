//! Rotation from the orbital plane into the parent body's frame.
//!
//! Positions are first computed in the perifocal (PQW) frame: the X axis
//! points at periapsis and the Y axis 90° ahead of it, in the direction of
//! motion. Three rotations bring them into the parent's frame:
//! the argument of periapsis about the orbit normal, the inclination about
//! the line of nodes, and the longitude of ascending node about the
//! parent's Z axis.

use glam::{DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{vector::VectorExt, OrbitalElements};

/// A struct representing a 3x2 matrix.
///
/// This struct is used to store the transformation matrix
/// for transforming a 2D vector into a 3D vector.
///
/// Namely, it is used to tilt a 2D position in the orbital plane into 3D,
/// using the orbital parameters.
///
/// Each element is named `eXY`, where `X` is the row and `Y` is the column.
///
/// # Example
/// ```
/// use glam::{DVec2, DVec3};
///
/// use keplerian_engine::Matrix3x2;
///
/// let matrix = Matrix3x2 {
///    e11: 1.0, e12: 0.0,
///    e21: 0.0, e22: 1.0,
///    e31: 0.0, e32: 0.0,
/// };
///
/// let vec = DVec2::new(1.0, 2.0);
///
/// let result = matrix.dot_vec(vec);
///
/// assert_eq!(result, DVec3::new(1.0, 2.0, 0.0));
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Matrix3x2 {
    // Element XY
    pub e11: f64,
    pub e12: f64,
    pub e21: f64,
    pub e22: f64,
    pub e31: f64,
    pub e32: f64,
}

impl Matrix3x2 {
    /// The matrix that embeds the XY plane into 3D space unchanged.
    pub const IDENTITY: Matrix3x2 = Matrix3x2 {
        e11: 1.0,
        e12: 0.0,
        e21: 0.0,
        e22: 1.0,
        e31: 0.0,
        e32: 0.0,
    };

    /// Builds the perifocal-to-parent transformation matrix for a set of
    /// orbital elements.
    ///
    /// # Example
    /// ```
    /// use keplerian_engine::{Matrix3x2, OrbitalElements};
    ///
    /// let matrix = Matrix3x2::from_elements(&OrbitalElements::default());
    /// assert_eq!(matrix, Matrix3x2::IDENTITY);
    /// ```
    pub fn from_elements(elements: &OrbitalElements) -> Matrix3x2 {
        Self::from_angles(
            elements.inclination(),
            elements.arg_pe(),
            elements.long_asc_node(),
        )
    }

    /// Builds the perifocal-to-parent transformation matrix from the
    /// orientation angles, in radians.
    ///
    /// This is the first two columns of `Rz(long_asc_node) Rx(inclination) Rz(arg_pe)`.
    pub fn from_angles(inclination: f64, arg_pe: f64, long_asc_node: f64) -> Matrix3x2 {
        let (sin_inc, cos_inc) = inclination.sin_cos();
        let (sin_arg_pe, cos_arg_pe) = arg_pe.sin_cos();
        let (sin_lan, cos_lan) = long_asc_node.sin_cos();

        // https://downloads.rene-schwarz.com/download/M001-Keplerian_Orbit_Elements_to_Cartesian_State_Vectors.pdf
        Matrix3x2 {
            e11: cos_arg_pe * cos_lan - sin_arg_pe * cos_inc * sin_lan,
            e12: -(sin_arg_pe * cos_lan + cos_arg_pe * cos_inc * sin_lan),

            e21: cos_arg_pe * sin_lan + sin_arg_pe * cos_inc * cos_lan,
            e22: cos_arg_pe * cos_inc * cos_lan - sin_arg_pe * sin_lan,

            e31: sin_arg_pe * sin_inc,
            e32: cos_arg_pe * sin_inc,
        }
    }

    /// Computes a dot product between this matrix and a 2D vector.
    ///
    /// # Example
    /// ```
    /// use glam::{DVec2, DVec3};
    ///
    /// use keplerian_engine::Matrix3x2;
    ///
    /// let matrix = Matrix3x2 {
    ///     e11: 1.0, e12: 0.0,
    ///     e21: 0.0, e22: 1.0,
    ///     e31: 1.0, e32: 1.0,
    /// };
    ///
    /// let vec = DVec2::new(1.0, 2.0);
    ///
    /// let result = matrix.dot_vec(vec);
    ///
    /// assert_eq!(result, DVec3::new(1.0, 2.0, 3.0));
    /// ```
    pub fn dot_vec(&self, vec: DVec2) -> DVec3 {
        DVec3::new(
            vec.x * self.e11 + vec.y * self.e12,
            vec.x * self.e21 + vec.y * self.e22,
            vec.x * self.e31 + vec.y * self.e32,
        )
    }

    /// The direction of periapsis in the parent's frame (the P axis).
    pub fn basis_p(&self) -> DVec3 {
        DVec3::new(self.e11, self.e21, self.e31)
    }

    /// The in-plane direction 90° ahead of periapsis (the Q axis).
    pub fn basis_q(&self) -> DVec3 {
        DVec3::new(self.e12, self.e22, self.e32)
    }

    /// The orbit normal (the W axis), parallel to the angular momentum.
    pub fn basis_w(&self) -> DVec3 {
        self.basis_p().cross(self.basis_q())
    }
}

/// Rotates an orbital-plane vector into the parent's frame one axis-angle
/// rotation at a time.
///
/// First the longitude of ascending node about the parent's Z axis, then
/// the inclination about the line of nodes, then the argument of
/// periapsis about the tilted orbit normal.
///
/// This gives the same result as
/// [`Matrix3x2::from_elements`]`(elements).dot_vec(vector)`, which is
/// much faster when several vectors go through the same orbit.
pub fn rotate_into_parent_frame(elements: &OrbitalElements, vector: DVec2) -> DVec3 {
    let long_asc_node = elements.long_asc_node();

    let rotated = vector.extend(0.0).rotate_z(long_asc_node);

    let node_axis = DVec3::new(long_asc_node.cos(), long_asc_node.sin(), 0.0);
    let rotated = rotated.rotate_about_axis(node_axis, elements.inclination());

    let normal = DVec3::Z.rotate_about_axis(node_axis, elements.inclination());
    rotated.rotate_about_axis(normal, elements.arg_pe())
}
