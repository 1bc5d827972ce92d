use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{body::ParentBody, OrbitError, ParameterError, Result};

/// The geometric class of an orbit, determined by its eccentricity.
///
/// Every shape-dependent formula in this crate matches on this enum
/// instead of comparing the eccentricity again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrbitType {
    /// e = 0: a perfect circle.
    Circular,
    /// 0 < e < 1: an ellipse.
    Elliptical,
    /// e = 1: a parabola, the boundary between bound and unbound.
    Parabolic,
    /// e > 1: a hyperbola.
    Hyperbolic,
}

impl OrbitType {
    /// Classifies an eccentricity.
    ///
    /// The comparisons are exact: an eccentricity of `1e-17` is elliptical,
    /// not circular.
    ///
    /// # Errors
    /// Fails with [`ParameterError::NegativeEccentricity`] if the
    /// eccentricity is negative or NaN.
    ///
    /// # Example
    /// ```
    /// use keplerian_engine::OrbitType;
    ///
    /// assert_eq!(OrbitType::classify(0.0).unwrap(), OrbitType::Circular);
    /// assert_eq!(OrbitType::classify(0.5).unwrap(), OrbitType::Elliptical);
    /// assert_eq!(OrbitType::classify(1.0).unwrap(), OrbitType::Parabolic);
    /// assert_eq!(OrbitType::classify(3.0).unwrap(), OrbitType::Hyperbolic);
    /// assert!(OrbitType::classify(-0.1).is_err());
    /// ```
    pub fn classify(eccentricity: f64) -> Result<OrbitType> {
        if eccentricity.is_nan() || eccentricity < 0.0 {
            return Err(ParameterError::NegativeEccentricity(eccentricity).into());
        }

        Ok(if eccentricity == 0.0 {
            OrbitType::Circular
        } else if eccentricity < 1.0 {
            OrbitType::Elliptical
        } else if eccentricity == 1.0 {
            OrbitType::Parabolic
        } else {
            OrbitType::Hyperbolic
        })
    }

    /// Whether an orbit of this type repeats itself.
    pub fn is_bound(self) -> bool {
        match self {
            OrbitType::Circular | OrbitType::Elliptical => true,
            OrbitType::Parabolic | OrbitType::Hyperbolic => false,
        }
    }
}

impl fmt::Display for OrbitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrbitType::Circular => "circular",
            OrbitType::Elliptical => "elliptical",
            OrbitType::Parabolic => "parabolic",
            OrbitType::Hyperbolic => "hyperbolic",
        };
        f.write_str(name)
    }
}

/// The immutable elements that define one Keplerian orbit.
///
/// The elements are validated on construction and carry their
/// [`OrbitType`], so the classification is only computed once.
///
/// # Example
/// ```
/// use keplerian_engine::{OrbitalElements, OrbitType};
///
/// let elements = OrbitalElements::new(
///     // Gravitational parameter of the parent body, in m^3 s^-2
///     3.986e14,
///     // Semi-major axis, in meters
///     24_400_000.0,
///     // Eccentricity
///     0.7,
///     // Inclination, longitude of ascending node,
///     // argument of periapsis, mean anomaly at epoch
///     0.1, 0.2, 0.3, 0.0,
/// ).unwrap();
///
/// assert_eq!(elements.orbit_type(), OrbitType::Elliptical);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrbitalElements {
    /// The gravitational parameter of the parent body, in m^3 s^-2.
    /// Zero when the orbit has no parent.
    gravitational_parameter: f64,

    /// The semi-major axis, in meters.
    /// Positive for bound orbits, negative for hyperbolic ones.
    /// For parabolic orbits this holds the periapsis distance instead,
    /// as the semi-major axis of a parabola is infinite.
    semi_major_axis: f64,

    /// The eccentricity.
    eccentricity: f64,

    /// The inclination, in radians.
    inclination: f64,

    /// The longitude of ascending node, in radians.
    long_asc_node: f64,

    /// The argument of periapsis, in radians.
    arg_pe: f64,

    /// The mean anomaly at epoch, in radians.
    mean_anomaly_at_epoch: f64,

    orbit_type: OrbitType,
}

impl OrbitalElements {
    /// Creates and validates a new set of orbital elements.
    ///
    /// # Parameters
    /// - `gravitational_parameter`: The gravitational parameter of the parent body, in m^3 s^-2.
    /// - `semi_major_axis`: The semi-major axis, in meters. For parabolic orbits,
    ///   the periapsis distance.
    /// - `eccentricity`: The eccentricity of the orbit.
    /// - `inclination`: The inclination of the orbit, in radians.
    /// - `long_asc_node`: The longitude of ascending node, in radians.
    /// - `arg_pe`: The argument of periapsis, in radians.
    /// - `mean_anomaly_at_epoch`: The mean anomaly at epoch, in radians.
    ///
    /// # Errors
    /// - [`ParameterError::NegativeEccentricity`] if the eccentricity is
    ///   negative or NaN.
    /// - [`ParameterError::NonPositiveGravitationalParameter`] if the
    ///   gravitational parameter is negative or not finite. Zero is
    ///   accepted and means there is no parent body.
    /// - [`ParameterError::InvalidSemiMajorAxis`] if the semi-major axis is
    ///   zero, not finite, or its sign doesn't match the orbit type.
    pub fn new(
        gravitational_parameter: f64,
        semi_major_axis: f64,
        eccentricity: f64,
        inclination: f64,
        long_asc_node: f64,
        arg_pe: f64,
        mean_anomaly_at_epoch: f64,
    ) -> Result<OrbitalElements> {
        let orbit_type = OrbitType::classify(eccentricity)?;

        if !gravitational_parameter.is_finite() || gravitational_parameter < 0.0 {
            return Err(
                ParameterError::NonPositiveGravitationalParameter(gravitational_parameter).into(),
            );
        }

        let sign_matches = match orbit_type {
            OrbitType::Circular | OrbitType::Elliptical | OrbitType::Parabolic => {
                semi_major_axis > 0.0
            }
            OrbitType::Hyperbolic => semi_major_axis < 0.0,
        };
        if !semi_major_axis.is_finite() || !sign_matches {
            return Err(ParameterError::InvalidSemiMajorAxis {
                semi_major_axis,
                orbit_type,
            }
            .into());
        }

        Ok(OrbitalElements {
            gravitational_parameter,
            semi_major_axis,
            eccentricity,
            inclination,
            long_asc_node,
            arg_pe,
            mean_anomaly_at_epoch,
            orbit_type,
        })
    }

    /// Creates orbital elements around a parent body.
    ///
    /// The gravitational parameter is read from the parent once; the
    /// elements don't keep a reference to it.
    ///
    /// # Errors
    /// Same as [`new`][Self::new].
    pub fn around(
        parent: &impl ParentBody,
        semi_major_axis: f64,
        eccentricity: f64,
        inclination: f64,
        long_asc_node: f64,
        arg_pe: f64,
        mean_anomaly_at_epoch: f64,
    ) -> Result<OrbitalElements> {
        Self::new(
            parent.gravitational_parameter(),
            semi_major_axis,
            eccentricity,
            inclination,
            long_asc_node,
            arg_pe,
            mean_anomaly_at_epoch,
        )
    }

    /// The gravitational parameter of the parent body, in m^3 s^-2.
    #[doc(alias = "mu")]
    pub fn gravitational_parameter(&self) -> f64 {
        self.gravitational_parameter
    }

    /// The semi-major axis as given on construction, in meters.
    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    /// The eccentricity.
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    /// The inclination, in radians.
    pub fn inclination(&self) -> f64 {
        self.inclination
    }

    /// The longitude of ascending node, in radians.
    pub fn long_asc_node(&self) -> f64 {
        self.long_asc_node
    }

    /// The argument of periapsis, in radians.
    pub fn arg_pe(&self) -> f64 {
        self.arg_pe
    }

    /// The mean anomaly at epoch, in radians.
    pub fn mean_anomaly_at_epoch(&self) -> f64 {
        self.mean_anomaly_at_epoch
    }

    /// The classification of the orbit.
    pub fn orbit_type(&self) -> OrbitType {
        self.orbit_type
    }

    /// Fails with [`ParameterError::UnboundOrbit`] unless the orbit is
    /// circular or elliptical, and with
    /// [`ParameterError::NonPositiveGravitationalParameter`] if there is no
    /// parent body to go around.
    pub(crate) fn require_bound(&self) -> Result<()> {
        if !self.orbit_type.is_bound() {
            return Err(OrbitError::from(ParameterError::UnboundOrbit(
                self.eccentricity,
            )));
        }
        if self.gravitational_parameter <= 0.0 {
            return Err(ParameterError::NonPositiveGravitationalParameter(
                self.gravitational_parameter,
            )
            .into());
        }

        Ok(())
    }
}

impl Default for OrbitalElements {
    /// The unit orbit: a circle of radius 1 around a parent with a
    /// gravitational parameter of 1.
    fn default() -> OrbitalElements {
        OrbitalElements {
            gravitational_parameter: 1.0,
            semi_major_axis: 1.0,
            eccentricity: 0.0,
            inclination: 0.0,
            long_asc_node: 0.0,
            arg_pe: 0.0,
            mean_anomaly_at_epoch: 0.0,
            orbit_type: OrbitType::Circular,
        }
    }
}
