//! Closed-form geometry of a Keplerian orbit.
//!
//! Everything here is a pure function of the [`OrbitalElements`], and
//! branches on the [`OrbitType`] carried by the elements.

use core::f64::consts::TAU;

use crate::{OrbitType, OrbitalElements, Result};

/// Gets the periapsis distance, in meters.
///
/// For parabolic orbits the semi-major axis element holds the periapsis
/// distance, and is returned as-is.
pub fn periapsis(elements: &OrbitalElements) -> f64 {
    let a = elements.semi_major_axis();
    match elements.orbit_type() {
        OrbitType::Circular => a,
        OrbitType::Parabolic => a,
        OrbitType::Elliptical | OrbitType::Hyperbolic => a * (1.0 - elements.eccentricity()),
    }
}

/// Gets the apoapsis distance, in meters.
///
/// Returns infinity for parabolic orbits and negative values for
/// hyperbolic orbits.
pub fn apoapsis(elements: &OrbitalElements) -> f64 {
    let a = elements.semi_major_axis();
    match elements.orbit_type() {
        OrbitType::Circular => a,
        OrbitType::Parabolic => f64::INFINITY,
        OrbitType::Elliptical | OrbitType::Hyperbolic => a * (1.0 + elements.eccentricity()),
    }
}

/// Gets the semi-major axis, in meters.
///
/// Returns infinity for parabolic orbits.
pub fn semi_major_axis(elements: &OrbitalElements) -> f64 {
    match elements.orbit_type() {
        OrbitType::Parabolic => f64::INFINITY,
        OrbitType::Circular | OrbitType::Elliptical | OrbitType::Hyperbolic => {
            elements.semi_major_axis()
        }
    }
}

/// Gets the semi-minor axis, in meters.
///
/// Hyperbolic orbits follow the sign of their semi-major axis and return
/// negative values. Parabolic orbits return infinity.
pub fn semi_minor_axis(elements: &OrbitalElements) -> f64 {
    let a = elements.semi_major_axis();
    let e = elements.eccentricity();
    match elements.orbit_type() {
        OrbitType::Circular => a,
        OrbitType::Elliptical => a * (1.0 - e * e).sqrt(),
        OrbitType::Parabolic => f64::INFINITY,
        OrbitType::Hyperbolic => a * (e * e - 1.0).sqrt(),
    }
}

/// Gets the distance between the center of the conic and the focus
/// occupied by the parent body, in meters.
///
/// Also known as the linear eccentricity.
#[doc(alias = "linear_eccentricity")]
pub fn focus_distance(elements: &OrbitalElements) -> f64 {
    match elements.orbit_type() {
        OrbitType::Circular => 0.0,
        OrbitType::Parabolic => f64::INFINITY,
        OrbitType::Elliptical | OrbitType::Hyperbolic => {
            elements.semi_major_axis() * elements.eccentricity()
        }
    }
}

/// Gets the semi-latus rectum, in meters.
///
/// Learn more: <https://en.wikipedia.org/wiki/Conic_section#Conic_parameters>
pub fn semi_latus_rectum(elements: &OrbitalElements) -> f64 {
    let a = elements.semi_major_axis();
    let e = elements.eccentricity();
    match elements.orbit_type() {
        OrbitType::Circular => a,
        OrbitType::Parabolic => 2.0 * periapsis(elements),
        OrbitType::Elliptical | OrbitType::Hyperbolic => (a * (1.0 - e * e)).abs(),
    }
}

/// Gets the distance from the parent body at a given true anomaly, in meters.
#[doc(alias = "altitude_at_true_anomaly")]
pub fn radius_at_true_anomaly(elements: &OrbitalElements, true_anomaly: f64) -> f64 {
    match elements.orbit_type() {
        OrbitType::Circular => elements.semi_major_axis(),
        OrbitType::Parabolic => 2.0 * periapsis(elements) / (1.0 + true_anomaly.cos()),
        OrbitType::Elliptical | OrbitType::Hyperbolic => {
            semi_latus_rectum(elements) / (1.0 + elements.eccentricity() * true_anomaly.cos())
        }
    }
}

/// Gets the specific orbital energy, in J/kg.
///
/// Negative for bound orbits, zero for parabolic ones and positive for
/// hyperbolic ones. It doesn't depend on time or on the true anomaly.
pub fn specific_orbital_energy(elements: &OrbitalElements) -> f64 {
    match elements.orbit_type() {
        OrbitType::Parabolic => 0.0,
        OrbitType::Circular | OrbitType::Elliptical | OrbitType::Hyperbolic => {
            -elements.gravitational_parameter() / (2.0 * elements.semi_major_axis())
        }
    }
}

/// Gets the speed at a given distance from the parent body, in m/s.
///
/// Uses the vis-viva equation: <https://en.wikipedia.org/wiki/Vis-viva_equation>
pub fn speed_at_radius(elements: &OrbitalElements, radius: f64) -> f64 {
    let mu = elements.gravitational_parameter();
    match elements.orbit_type() {
        OrbitType::Circular => mean_velocity(elements),
        OrbitType::Parabolic => (2.0 * mu / radius).sqrt(),
        OrbitType::Elliptical | OrbitType::Hyperbolic => {
            (mu * (2.0 / radius - 1.0 / elements.semi_major_axis())).sqrt()
        }
    }
}

/// Gets the speed at a given true anomaly, in m/s.
pub fn speed_at_true_anomaly(elements: &OrbitalElements, true_anomaly: f64) -> f64 {
    speed_at_radius(elements, radius_at_true_anomaly(elements, true_anomaly))
}

/// Gets the flight path angle at a given true anomaly, in radians.
///
/// This is the angle between the velocity and the local horizontal
/// (the direction perpendicular to the radius). It's zero at periapsis
/// and apoapsis, and always zero on circular orbits.
#[doc(alias = "flight_path_angle")]
pub fn velocity_angle_at_true_anomaly(elements: &OrbitalElements, true_anomaly: f64) -> f64 {
    let e = elements.eccentricity();
    match elements.orbit_type() {
        OrbitType::Circular => 0.0,
        OrbitType::Elliptical | OrbitType::Parabolic | OrbitType::Hyperbolic => {
            let (sin, cos) = true_anomaly.sin_cos();
            (e * sin).atan2(1.0 + e * cos)
        }
    }
}

/// Gets the mean orbital speed, in m/s.
///
/// For hyperbolic orbits this is the hyperbolic excess velocity, the speed
/// left over at infinite distance. For parabolic orbits that is zero.
pub fn mean_velocity(elements: &OrbitalElements) -> f64 {
    let mu = elements.gravitational_parameter();
    match elements.orbit_type() {
        OrbitType::Circular | OrbitType::Elliptical => (mu / elements.semi_major_axis()).sqrt(),
        OrbitType::Parabolic => 0.0,
        OrbitType::Hyperbolic => (-mu / elements.semi_major_axis()).sqrt(),
    }
}

/// Gets the mean motion, in radians per second.
///
/// This is the rate at which the mean anomaly advances.
/// Parabolic orbits use the rate from Barker's equation,
/// `sqrt(mu / (2 q^3))`, where `q` is the periapsis distance.
pub fn mean_motion(elements: &OrbitalElements) -> f64 {
    let mu = elements.gravitational_parameter();
    let a = elements.semi_major_axis();
    match elements.orbit_type() {
        OrbitType::Circular | OrbitType::Elliptical => (mu / (a * a * a)).sqrt(),
        OrbitType::Parabolic => (mu / (2.0 * a * a * a)).sqrt(),
        OrbitType::Hyperbolic => (mu / -(a * a * a)).sqrt(),
    }
}

/// Gets the time it takes to complete one revolution, in seconds.
///
/// # Errors
/// Fails for parabolic and hyperbolic orbits, which never come back.
pub fn period(elements: &OrbitalElements) -> Result<f64> {
    elements.require_bound()?;

    // T = 2pi * sqrt(a^3 / GM)
    // https://en.wikipedia.org/wiki/Orbital_period
    Ok(TAU / mean_motion(elements))
}

/// Gets the areal velocity, the area swept by the radius per unit of
/// time, in m^2/s.
///
/// It is constant along the orbit (Kepler's second law) and equal to half
/// the specific angular momentum, `h / 2`, for every orbit type.
///
/// This is a deliberate correction of the per-type forms `sqrt(mu a)`
/// (circular) and `sqrt(mu a (1 + e) / (1 - e))` (elliptical), which don't
/// equal the swept rate, and whose hyperbolic counterpart is NaN.
pub fn areal_velocity(elements: &OrbitalElements) -> f64 {
    let mu = elements.gravitational_parameter();
    let a = elements.semi_major_axis();
    let e = elements.eccentricity();
    match elements.orbit_type() {
        OrbitType::Circular => 0.5 * (mu * a).sqrt(),
        OrbitType::Elliptical => 0.5 * (mu * a * (1.0 - e * e)).sqrt(),
        OrbitType::Parabolic => (mu * periapsis(elements) / 2.0).sqrt(),
        OrbitType::Hyperbolic => 0.5 * (-mu * a * (e * e - 1.0)).sqrt(),
    }
}

/// Gets the eccentricity of an ellipse from its semi-axes.
///
/// # Example
/// ```
/// use keplerian_engine::geometry::eccentricity_from_axes;
///
/// assert_eq!(eccentricity_from_axes(5.0, 5.0), 0.0);
/// assert!((eccentricity_from_axes(5.0, 4.0) - 0.6).abs() < 1e-12);
/// ```
pub fn eccentricity_from_axes(semi_major_axis: f64, semi_minor_axis: f64) -> f64 {
    let ratio = semi_minor_axis / semi_major_axis;
    (1.0 - ratio * ratio).sqrt()
}
