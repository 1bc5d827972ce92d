use core::f64::consts::TAU;

use glam::DVec3;
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    body::ParentBody, vector::EPSILON, NumericalError, Orbit, OrbitType, OrbitalElements,
    ParameterError, Result,
};

/// A struct representing a position and velocity at a point in the orbit.
///
/// The position and velocity vectors are three-dimensional and relative
/// to the parent body.
///
/// The position vector is in meters, while the velocity vector is in
/// meters per second.
///
/// State vectors can be used to form an orbit, see
/// [`to_elements`][Self::to_elements] for more information.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateVectors {
    /// The 3D position at a point in the orbit, in meters.
    pub position: DVec3,
    /// The 3D velocity at a point in the orbit, in meters per second.
    pub velocity: DVec3,
}

impl StateVectors {
    /// Derives the orbital elements of the orbit passing through these
    /// state vectors, given the gravitational parameter of the parent.
    ///
    /// # Mu
    /// Mu is also known as the gravitational parameter, and
    /// is equal to `GM`, where `G` is the gravitational constant,
    /// and `M` is the mass of the parent body.
    ///
    /// Learn more about the gravitational parameter:
    /// <https://en.wikipedia.org/wiki/Standard_gravitational_parameter>
    ///
    /// # Phase
    /// The mean anomaly at epoch of the returned elements is always zero;
    /// the body's position along the orbit is not recovered.
    ///
    /// # Orientation
    /// - For equatorial orbits (the angular momentum is parallel to the Z
    ///   axis) the line of nodes is undefined. The longitude of ascending
    ///   node is set to zero, and the argument of periapsis holds the
    ///   longitude of periapsis.
    /// - For circular orbits the periapsis is undefined, and the argument
    ///   of periapsis is set to zero.
    ///
    /// # Errors
    /// - [`ParameterError::NonPositiveGravitationalParameter`] if `mu <= 0`.
    /// - [`ParameterError::ZeroPosition`] if the position is at the origin.
    /// - [`ParameterError::ZeroAngularMomentum`] if the motion is purely
    ///   radial, or the velocity is zero.
    /// - [`NumericalError::NonFinite`] if the vectors contain infinities or NaNs.
    /// - [`NumericalError::NanAscendingNode`] if the longitude of ascending
    ///   node can't be computed.
    ///
    /// # Example
    /// ```
    /// use glam::DVec3;
    /// use keplerian_engine::{OrbitType, StateVectors};
    ///
    /// let mu = 3.986e14;
    /// let radius: f64 = 7_000_000.0;
    ///
    /// let sv = StateVectors {
    ///     position: DVec3::new(radius, 0.0, 0.0),
    ///     velocity: DVec3::new(0.0, (mu / radius).sqrt(), 0.0),
    /// };
    ///
    /// let elements = sv.to_elements(mu).unwrap();
    ///
    /// assert!((elements.semi_major_axis() - radius).abs() < 1e-3);
    /// assert!(elements.eccentricity() < 1e-9);
    /// ```
    pub fn to_elements(self, mu: f64) -> Result<OrbitalElements> {
        // Reference:
        // https://orbital-mechanics.space/classical-orbital-elements/orbital-elements-and-the-state-vector.html
        if !(mu > 0.0) || !mu.is_finite() {
            return Err(ParameterError::NonPositiveGravitationalParameter(mu).into());
        }
        if !self.position.is_finite() || !self.velocity.is_finite() {
            return Err(NumericalError::NonFinite("state vectors").into());
        }

        let distance = self.position.length();
        if distance == 0.0 {
            return Err(ParameterError::ZeroPosition.into());
        }

        let speed_squared = self.velocity.length_squared();

        // Orbital angular momentum
        let angular_momentum_vector = self.position.cross(self.velocity);
        let angular_momentum = angular_momentum_vector.length();
        if angular_momentum <= f64::EPSILON * distance * speed_squared.sqrt() {
            return Err(ParameterError::ZeroAngularMomentum.into());
        }

        // Eccentricity
        // e = ((v^2 - mu/r) r - (r . v) v) / mu
        let eccentricity_vector = (self.position * (speed_squared - mu / distance)
            - self.velocity * self.position.dot(self.velocity))
            / mu;
        let eccentricity = eccentricity_vector.length();
        let orbit_type = OrbitType::classify(eccentricity)?;

        // Semi-major axis, from the semi-latus rectum p = h^2 / mu.
        // a = p / (1 - e^2) takes its sign from e, so it always agrees with
        // the orbit type, even when rounding puts the energy on the wrong
        // side of zero.
        let semi_latus_rectum = angular_momentum * angular_momentum / mu;
        let semi_major_axis = match orbit_type {
            // The semi-major axis of a parabola is infinite, so we store the
            // periapsis distance instead: q = p / (1 + e) = p / 2
            OrbitType::Parabolic => semi_latus_rectum / 2.0,
            OrbitType::Circular | OrbitType::Elliptical | OrbitType::Hyperbolic => {
                semi_latus_rectum / (1.0 - eccentricity * eccentricity)
            }
        };

        // Inclination
        let inclination = (angular_momentum_vector.z / angular_momentum)
            .clamp(-1.0, 1.0)
            .acos();

        // Line of nodes: (0, 0, 1) x h
        let node_vector = DVec3::new(-angular_momentum_vector.y, angular_momentum_vector.x, 0.0);
        let node_length = node_vector.length();
        let is_equatorial = node_length <= EPSILON * angular_momentum;
        let is_circular = eccentricity <= EPSILON;

        let (long_asc_node, arg_pe) = if is_equatorial {
            debug!("state vectors describe an equatorial orbit, line of nodes is undefined");

            let arg_pe = if is_circular {
                0.0
            } else if angular_momentum_vector.z >= 0.0 {
                eccentricity_vector.y.atan2(eccentricity_vector.x)
            } else {
                // Retrograde: the orbit is flipped over the X axis
                (-eccentricity_vector.y).atan2(eccentricity_vector.x)
            };

            (0.0, arg_pe.rem_euclid(TAU))
        } else {
            let long_asc_node = {
                let tmp = (node_vector.x / node_length).clamp(-1.0, 1.0).acos();
                if tmp.is_nan() {
                    return Err(NumericalError::NanAscendingNode.into());
                }
                if node_vector.y >= 0.0 {
                    tmp
                } else {
                    TAU - tmp
                }
            };

            let arg_pe = if is_circular {
                debug!("state vectors describe a circular orbit, periapsis is undefined");
                0.0
            } else {
                let tmp = (node_vector.dot(eccentricity_vector) / (node_length * eccentricity))
                    .clamp(-1.0, 1.0)
                    .acos();
                if eccentricity_vector.z >= 0.0 {
                    tmp
                } else {
                    TAU - tmp
                }
            };

            (long_asc_node, arg_pe)
        };

        OrbitalElements::new(
            mu,
            semi_major_axis,
            eccentricity,
            inclination,
            long_asc_node,
            arg_pe,
            0.0,
        )
    }

    /// Creates an [`Orbit`] around `parent` passing through these state
    /// vectors.
    ///
    /// See [`to_elements`][Self::to_elements] for the details and errors.
    pub fn to_orbit(self, parent: &impl ParentBody) -> Result<Orbit> {
        self.to_elements(parent.gravitational_parameter())
            .map(Orbit::from_elements)
    }
}
