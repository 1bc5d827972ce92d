//! Conversions between the true, eccentric and mean anomalies.
//!
//! The true anomaly is the actual angle of the body from periapsis, as
//! seen from the parent body. The eccentric anomaly parameterizes the
//! position on the auxiliary circle (or hyperbola), and the mean anomaly
//! advances linearly with time.
//!
//! For parabolic orbits the "eccentric anomaly" is Barker's parameter
//! `D = tan(θ / 2)`, and for hyperbolic orbits it is the hyperbolic
//! eccentric anomaly `H`.

use core::f64::consts::{PI, TAU};

use crate::{geometry, KeplerSolver, OrbitType, OrbitalElements, ParameterError, Result};

/// Converts a time in milliseconds since epoch into seconds.
#[inline]
pub fn millis_to_seconds(time: i64) -> f64 {
    time as f64 / 1000.0
}

/// Arc-cosine that keeps the half-plane and revolution of a reference angle.
///
/// `acos` alone only returns values in `[0, π]`. This picks the result
/// that lies in the same half-turn (and the same revolution) as `angle`,
/// so the output keeps growing as `angle` grows.
///
/// # Example
/// ```
/// use keplerian_engine::anomaly::acos2;
/// use std::f64::consts::PI;
///
/// // cos(x) = 0 has solutions π/2 and 3π/2; the reference picks one.
/// assert!((acos2(0.0, 1.0) - PI / 2.0).abs() < 1e-12);
/// assert!((acos2(0.0, 4.0) - 3.0 * PI / 2.0).abs() < 1e-12);
/// assert!((acos2(0.0, -1.0) + PI / 2.0).abs() < 1e-12);
/// ```
pub fn acos2(cosine: f64, angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    let revolutions = angle - wrapped;

    // Rounding can push the cosine slightly out of range near periapsis
    let base = cosine.clamp(-1.0, 1.0).acos();

    if wrapped <= PI {
        revolutions + base
    } else {
        revolutions + TAU - base
    }
}

/// `(e + cos θ) / (1 + e cos θ)`: the cosine of the eccentric anomaly
/// (or hyperbolic cosine, for hyperbolic orbits) at a true anomaly.
#[inline]
fn eccentric_anomaly_cosine(eccentricity: f64, true_anomaly: f64) -> f64 {
    let cos = true_anomaly.cos();
    (eccentricity + cos) / (1.0 + eccentricity * cos)
}

/// Gets the eccentric anomaly at a given true anomaly.
///
/// For elliptical orbits the result follows the true anomaly's
/// revolution, e.g. a true anomaly of `2π + 0.1` gives an eccentric
/// anomaly slightly above `2π`.
///
/// # Errors
/// Fails with [`ParameterError::TrueAnomalyBeyondAsymptote`] for hyperbolic
/// orbits when the true anomaly lies outside the trajectory, where
/// `1 + e cos θ <= 0`.
pub fn eccentric_anomaly_at_true_anomaly(
    elements: &OrbitalElements,
    true_anomaly: f64,
) -> Result<f64> {
    let e = elements.eccentricity();
    Ok(match elements.orbit_type() {
        OrbitType::Circular => true_anomaly,
        OrbitType::Elliptical => acos2(eccentric_anomaly_cosine(e, true_anomaly), true_anomaly),
        OrbitType::Parabolic => (true_anomaly * 0.5).tan(),
        OrbitType::Hyperbolic => {
            if 1.0 + e * true_anomaly.cos() <= 0.0 {
                return Err(ParameterError::TrueAnomalyBeyondAsymptote(true_anomaly).into());
            }

            let magnitude = eccentric_anomaly_cosine(e, true_anomaly).acosh();
            if true_anomaly.sin() < 0.0 {
                -magnitude
            } else {
                magnitude
            }
        }
    })
}

/// Gets the mean anomaly at a given eccentric anomaly, using Kepler's
/// equation for the orbit's type.
///
/// - Circular: `M = E`
/// - Elliptical: `M = E - e sin(E)`
/// - Parabolic: `M = D + D^3 / 3` (Barker's equation)
/// - Hyperbolic: `M = e sinh(H) - H`
pub fn mean_anomaly_at_eccentric_anomaly(
    elements: &OrbitalElements,
    eccentric_anomaly: f64,
) -> f64 {
    let e = elements.eccentricity();
    match elements.orbit_type() {
        OrbitType::Circular => eccentric_anomaly,
        OrbitType::Elliptical => eccentric_anomaly - e * eccentric_anomaly.sin(),
        OrbitType::Parabolic => eccentric_anomaly + eccentric_anomaly.powi(3) / 3.0,
        OrbitType::Hyperbolic => e * eccentric_anomaly.sinh() - eccentric_anomaly,
    }
}

/// Gets the mean anomaly at a given true anomaly.
///
/// # Errors
/// Same as [`eccentric_anomaly_at_true_anomaly`].
pub fn mean_anomaly_at_true_anomaly(elements: &OrbitalElements, true_anomaly: f64) -> Result<f64> {
    let eccentric_anomaly = eccentric_anomaly_at_true_anomaly(elements, true_anomaly)?;
    Ok(mean_anomaly_at_eccentric_anomaly(elements, eccentric_anomaly))
}

/// Gets the mean anomaly at a given time.
///
/// `M(t) = n * t + M_0`, where `n` is the mean motion in radians per
/// second.
///
/// # Time
/// The time is expressed in milliseconds since epoch.
pub fn mean_anomaly_at_time(elements: &OrbitalElements, time: i64) -> f64 {
    geometry::mean_motion(elements) * millis_to_seconds(time) + elements.mean_anomaly_at_epoch()
}

/// Gets the eccentric anomaly at a given time, by solving Kepler's
/// equation with the given solver.
///
/// # Errors
/// Fails for parabolic and hyperbolic orbits, which the solver doesn't
/// support, and on any error reported by the solver.
pub fn eccentric_anomaly_at_time(
    elements: &OrbitalElements,
    solver: &KeplerSolver,
    time: i64,
) -> Result<f64> {
    solver.solve(mean_anomaly_at_time(elements, time), elements.eccentricity())
}

/// Gets the true anomaly at a given eccentric anomaly.
///
/// Bound orbits use
/// `θ = 2 atan2(sqrt(1 + e) sin(E / 2), sqrt(1 - e) cos(E / 2))`,
/// which returns values in `(-2π, 2π]`.
pub fn true_anomaly_at_eccentric_anomaly(
    elements: &OrbitalElements,
    eccentric_anomaly: f64,
) -> f64 {
    let e = elements.eccentricity();
    match elements.orbit_type() {
        OrbitType::Circular | OrbitType::Elliptical => {
            let (sin, cos) = (eccentric_anomaly * 0.5).sin_cos();
            2.0 * ((1.0 + e).sqrt() * sin).atan2((1.0 - e).sqrt() * cos)
        }
        OrbitType::Parabolic => 2.0 * eccentric_anomaly.atan(),
        OrbitType::Hyperbolic => {
            2.0 * (((e + 1.0) / (e - 1.0)).sqrt() * (eccentric_anomaly * 0.5).tanh()).atan()
        }
    }
}

/// Gets the true anomaly at a given time.
///
/// # Errors
/// Same as [`eccentric_anomaly_at_time`].
pub fn true_anomaly_at_time(
    elements: &OrbitalElements,
    solver: &KeplerSolver,
    time: i64,
) -> Result<f64> {
    let eccentric_anomaly = eccentric_anomaly_at_time(elements, solver, time)?;
    Ok(true_anomaly_at_eccentric_anomaly(elements, eccentric_anomaly))
}
