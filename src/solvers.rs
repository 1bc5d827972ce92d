//! Numerical solvers for Kepler's equation.

use core::f64::consts::{PI, TAU};

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{NumericalError, ParameterError, Result};

/// The default number of decimal digits the solver aims for.
pub const DEFAULT_PRECISION: u32 = 10;

/// The maximum number of Newton-Raphson iterations.
///
/// This is used to prevent infinite loops in case the method fails to converge.
pub const DEFAULT_MAX_ITERATIONS: u32 = 30;

/// Below this magnitude the derivative of Kepler's equation is treated
/// as zero.
pub const DERIVATIVE_EPSILON: f64 = 1e-12;

/// A Newton-Raphson solver for the elliptic Kepler equation,
///
/// ```text
/// M = E - e sin(E)
/// ```
///
/// ...where `M` is the mean anomaly, `E` the eccentric anomaly and `e`
/// the eccentricity.
///
/// # Example
/// ```
/// use keplerian_engine::KeplerSolver;
///
/// let solver = KeplerSolver::default();
/// let eccentricity = 0.7;
/// let mean_anomaly = 1.0;
///
/// let eccentric_anomaly = solver.solve(mean_anomaly, eccentricity).unwrap();
/// let residual = eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly;
///
/// assert!(residual.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeplerSolver {
    /// Number of decimal digits of the target precision: the solver stops
    /// once `|E - e sin(E) - M| <= 10^-precision`.
    pub precision: u32,

    /// Cap on the number of iterations, regardless of convergence.
    pub max_iterations: u32,
}

impl Default for KeplerSolver {
    fn default() -> KeplerSolver {
        KeplerSolver {
            precision: DEFAULT_PRECISION,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// The outcome of a solver run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// The eccentric anomaly, in radians. Not normalized.
    pub eccentric_anomaly: f64,

    /// The residual of Kepler's equation at the returned anomaly.
    pub residual: f64,

    /// How many Newton steps were taken.
    pub iterations: u32,

    /// Whether the residual got within the requested tolerance.
    pub converged: bool,
}

impl KeplerSolver {
    /// Creates a solver with the given precision and the default iteration cap.
    pub fn with_precision(precision: u32) -> KeplerSolver {
        KeplerSolver {
            precision,
            ..KeplerSolver::default()
        }
    }

    /// The largest residual the solver accepts, `10^-precision`.
    pub fn tolerance(&self) -> f64 {
        10f64.powi(-(self.precision.min(400) as i32))
    }

    /// Gets the eccentric anomaly for a mean anomaly.
    ///
    /// The returned angle follows the mean anomaly and is not normalized
    /// into `[0, 2π)`; use [`normalize_angle`] if you need that.
    ///
    /// # Errors
    /// - [`ParameterError::NegativeEccentricity`] if `e < 0` or NaN.
    /// - [`ParameterError::UnsupportedEccentricity`] if `e >= 1`.
    /// - [`NumericalError::VanishingDerivative`] if the Newton denominator
    ///   `1 - e cos(E)` gets too close to zero.
    /// - [`NumericalError::NonFinite`] if the mean anomaly or an iterate
    ///   isn't finite.
    /// - [`NumericalError::NoConvergence`] if the iteration cap is reached
    ///   before the residual gets within the tolerance.
    pub fn solve(&self, mean_anomaly: f64, eccentricity: f64) -> Result<f64> {
        let solution = self.solve_detailed(mean_anomaly, eccentricity)?;

        if !solution.converged {
            return Err(NumericalError::NoConvergence {
                iterations: solution.iterations,
                residual: solution.residual,
            }
            .into());
        }

        Ok(solution.eccentric_anomaly)
    }

    /// Like [`solve`][KeplerSolver::solve], also reporting the residual
    /// and iteration count.
    ///
    /// Reaching the iteration cap is not an error here: the last iterate
    /// is returned with [`Solution::converged`] set to `false`.
    pub fn solve_detailed(&self, mean_anomaly: f64, eccentricity: f64) -> Result<Solution> {
        if eccentricity.is_nan() || eccentricity < 0.0 {
            return Err(ParameterError::NegativeEccentricity(eccentricity).into());
        }
        if eccentricity >= 1.0 {
            return Err(ParameterError::UnsupportedEccentricity(eccentricity).into());
        }
        if !mean_anomaly.is_finite() {
            return Err(NumericalError::NonFinite("mean anomaly").into());
        }

        if eccentricity == 0.0 {
            return Ok(Solution {
                eccentric_anomaly: mean_anomaly,
                residual: 0.0,
                iterations: 0,
                converged: true,
            });
        }

        let tolerance = self.tolerance();

        // Solve for |M| reduced into [0, pi], then restore the sign and the
        // whole revolutions. f is convex on [0, pi] and the seed is never
        // below the root, so the iterates decrease monotonically onto it.
        let revolutions = ((mean_anomaly + PI) / TAU).floor() * TAU;
        let reduced = mean_anomaly - revolutions;
        let sign = if reduced < 0.0 { -1.0 } else { 1.0 };
        let target = reduced.abs();

        let mut eccentric_anomaly = if target == 0.0 {
            0.0
        } else {
            (target + eccentricity).min(PI)
        };
        let mut residual = keplers_equation(target, eccentric_anomaly, eccentricity);
        let mut iterations = 0;

        while residual.abs() > tolerance && iterations < self.max_iterations {
            let derivative = keplers_equation_derivative(eccentric_anomaly, eccentricity);

            if derivative.abs() < DERIVATIVE_EPSILON {
                return Err(NumericalError::VanishingDerivative {
                    eccentric_anomaly: sign * eccentric_anomaly + revolutions,
                }
                .into());
            }

            eccentric_anomaly -= residual / derivative;

            if !eccentric_anomaly.is_finite() {
                return Err(NumericalError::NonFinite("eccentric anomaly").into());
            }

            residual = keplers_equation(target, eccentric_anomaly, eccentricity);
            iterations += 1;
        }

        let eccentric_anomaly = sign * eccentric_anomaly + revolutions;
        let residual = sign * residual;
        let converged = residual.abs() <= tolerance;

        if !converged {
            debug!(
                "Kepler solver stopped after {iterations} iterations without converging \
                (M = {mean_anomaly}, e = {eccentricity}, residual = {residual})"
            );
        }

        Ok(Solution {
            eccentric_anomaly,
            residual,
            iterations,
            converged,
        })
    }
}

/// Gets the eccentric anomaly for a mean anomaly with the default iteration cap.
///
/// `precision` is the number of decimal digits to converge to.
///
/// See [`KeplerSolver::solve`] for details and errors.
pub fn calculate_eccentric_anomaly(
    mean_anomaly: f64,
    eccentricity: f64,
    precision: u32,
) -> Result<f64> {
    KeplerSolver::with_precision(precision).solve(mean_anomaly, eccentricity)
}

/// Wraps an angle into `[0, 2π)`.
///
/// # Example
/// ```
/// use keplerian_engine::normalize_angle;
/// use std::f64::consts::{PI, TAU};
///
/// assert!((normalize_angle(-PI) - PI).abs() < 1e-12);
/// assert!((normalize_angle(3.0 * TAU + 1.0) - 1.0).abs() < 1e-12);
/// ```
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

#[inline]
pub(crate) fn keplers_equation(mean_anomaly: f64, eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentric_anomaly - (eccentricity * eccentric_anomaly.sin()) - mean_anomaly
}

#[inline]
pub(crate) fn keplers_equation_derivative(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    1.0 - (eccentricity * eccentric_anomaly.cos())
}
