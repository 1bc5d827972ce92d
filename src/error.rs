use thiserror::Error;

use crate::OrbitType;

/// Result type used throughout the crate.
pub type Result<T> = core::result::Result<T, OrbitError>;

/// An error produced by the orbit engine.
///
/// Errors fall into two families: the caller passed something the engine
/// cannot work with ([`ParameterError`]), or the maths broke down on input
/// that was otherwise acceptable ([`NumericalError`]).
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum OrbitError {
    /// The input parameters are invalid for the requested operation.
    #[error(transparent)]
    InvalidParameter(#[from] ParameterError),

    /// A numerical computation became unstable.
    #[error(transparent)]
    Numerical(#[from] NumericalError),
}

impl OrbitError {
    /// Whether the error was caused by invalid input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, OrbitError::InvalidParameter(_))
    }

    /// Whether the error was caused by a numerical breakdown.
    pub fn is_numerical(&self) -> bool {
        matches!(self, OrbitError::Numerical(_))
    }
}

/// Invalid input passed to an orbit operation.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ParameterError {
    /// ### Eccentricity is negative (or NaN).
    /// The eccentricity of a conic section can't be negative.
    #[error("eccentricity must not be negative, got {0}")]
    NegativeEccentricity(f64),

    /// ### The Kepler solver only handles bound orbits.
    /// Eccentricities of 1 and above describe open trajectories, which
    /// the elliptic Kepler equation doesn't cover.
    #[error("eccentricity {0} is not supported by the elliptic Kepler solver (must be below 1)")]
    UnsupportedEccentricity(f64),

    /// ### The operation needs a closed orbit.
    /// Periodic quantities such as the time since periapsis only make
    /// sense when the orbit repeats itself.
    #[error("orbit with eccentricity {0} is unbound and has no period")]
    UnboundOrbit(f64),

    /// ### The gravitational parameter is not positive.
    /// Negative or non-finite values are rejected everywhere. Zero stands
    /// for "no parent body" and is only rejected where a period is needed.
    #[error("gravitational parameter must be positive, got {0}")]
    NonPositiveGravitationalParameter(f64),

    /// ### The semi-major axis doesn't fit the orbit type.
    /// It must be finite and non-zero, positive for circular, elliptical
    /// and parabolic orbits (where it holds the periapsis distance) and
    /// negative for hyperbolic ones.
    #[error("semi-major axis {semi_major_axis} is invalid for a {orbit_type} orbit")]
    InvalidSemiMajorAxis {
        /// The rejected value.
        semi_major_axis: f64,
        /// The type implied by the eccentricity.
        orbit_type: OrbitType,
    },

    /// ### The true anomaly is past the asymptotes of a hyperbola.
    /// A hyperbolic trajectory only covers true anomalies with
    /// `1 + e cos θ > 0`.
    #[error("true anomaly {0} lies beyond the asymptotes of the hyperbola")]
    TrueAnomalyBeyondAsymptote(f64),

    /// ### The position vector is at the origin.
    #[error("position vector must not be zero")]
    ZeroPosition,

    /// ### Position and velocity are parallel.
    /// Rectilinear motion has no angular momentum and therefore no
    /// orbital plane.
    #[error("angular momentum is zero, the motion is rectilinear")]
    ZeroAngularMomentum,
}

/// A numerical breakdown inside an orbit computation.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum NumericalError {
    /// The derivative of Kepler's equation got too close to zero for a
    /// Newton-Raphson step.
    #[error("derivative of Kepler's equation vanished at eccentric anomaly {eccentric_anomaly}")]
    VanishingDerivative {
        /// The iterate at which the derivative vanished.
        eccentric_anomaly: f64,
    },

    /// Newton-Raphson hit its iteration cap before reaching the requested
    /// precision.
    #[error("Kepler solver did not converge after {iterations} iterations (residual {residual})")]
    NoConvergence {
        /// The number of iterations taken.
        iterations: u32,
        /// The residual of Kepler's equation at the last iterate.
        residual: f64,
    },

    /// An iterate or intermediate value became infinite or NaN.
    #[error("non-finite value encountered while computing {0}")]
    NonFinite(&'static str),

    /// The longitude of the ascending node came out as NaN.
    #[error("longitude of ascending node is NaN")]
    NanAscendingNode,
}
