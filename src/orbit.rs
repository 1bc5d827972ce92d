use core::fmt;

use glam::{DVec2, DVec3};
use log::trace;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    anomaly, body::ParentBody, geometry, normalize_angle, KeplerSolver, Matrix3x2, OrbitType,
    OrbitalElements, Result, StateVectors,
};

/// A struct representing a Keplerian orbit around a parent body.
///
/// The orbit is immutable. The transformation matrix that tilts the
/// orbital plane into the parent's frame is computed once on construction.
///
/// # Example
/// ```
/// use keplerian_engine::{Body, Orbit};
///
/// let earth = Body::default();
///
/// let orbit = Orbit::new(
///     // The parent body; only its gravitational parameter is kept
///     &earth,
///
///     // Semi-major axis, in meters
///     24_400_000.0,
///
///     // Eccentricity
///     0.7,
///
///     // Inclination
///     0.1,
///
///     // Longitude of ascending node
///     0.2,
///
///     // Argument of periapsis
///     0.3,
///
///     // Mean anomaly at epoch
///     0.0,
/// ).unwrap();
///
/// // Same as above, with every angle set to zero
/// let flat = Orbit::with_shape(&earth, 24_400_000.0, 0.7).unwrap();
///
/// assert_eq!(orbit.get_periapsis(), flat.get_periapsis());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Orbit {
    elements: OrbitalElements,
    solver: KeplerSolver,
    cache: OrbitCachedCalculations,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct OrbitCachedCalculations {
    /// The transformation matrix to tilt the 2D planar orbit into 3D space.
    transformation_matrix: Matrix3x2,
}

/// A snapshot of an orbit evaluated at one instant.
///
/// Produced by [`Orbit::render_at_time`]. Rendering runs the whole
/// time → anomaly → position chain once, so that several derived queries
/// about the same instant don't repeat it.
///
/// The snapshot is a plain value: it doesn't change when the orbit is
/// rendered again, and can be shared between threads.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderedState {
    time: i64,
    mean_anomaly: f64,
    eccentric_anomaly: f64,
    true_anomaly: f64,
    position_in_plane: DVec2,
    position_from_parent: DVec3,
}

impl RenderedState {
    /// The instant this state was rendered at, in milliseconds since epoch.
    pub fn time(&self) -> i64 {
        self.time
    }

    /// The mean anomaly at the rendered instant, in radians.
    pub fn mean_anomaly(&self) -> f64 {
        self.mean_anomaly
    }

    /// The eccentric anomaly at the rendered instant, in radians.
    ///
    /// Not normalized; it follows the mean anomaly.
    pub fn eccentric_anomaly(&self) -> f64 {
        self.eccentric_anomaly
    }

    /// The true anomaly at the rendered instant, in radians.
    pub fn true_anomaly(&self) -> f64 {
        self.true_anomaly
    }

    /// The position in the orbital plane, with periapsis along +X, in meters.
    pub fn position_in_plane(&self) -> DVec2 {
        self.position_in_plane
    }

    /// The position relative to the parent body, in the parent's frame, in meters.
    pub fn position_from_parent(&self) -> DVec3 {
        self.position_from_parent
    }

    /// The distance from the parent body, in meters.
    pub fn radius(&self) -> f64 {
        self.position_from_parent.length()
    }

    /// The position in absolute coordinates, given where the parent is.
    pub fn absolute_position(&self, parent: &impl ParentBody) -> DVec3 {
        self.position_from_parent + parent.absolute_position()
    }
}

// Initialization and cache management
impl Orbit {
    /// Creates a new orbit around `parent`.
    ///
    /// The gravitational parameter of the parent is read once; the orbit
    /// keeps no reference to it.
    ///
    /// # Parameters
    /// - `parent`: The body being orbited.
    /// - `semi_major_axis`: The semi-major axis, in meters. Negative for
    ///   hyperbolic orbits; the periapsis distance for parabolic ones.
    /// - `eccentricity`: The eccentricity of the orbit.
    /// - `inclination`: The inclination of the orbit, in radians.
    /// - `long_asc_node`: The longitude of ascending node of the orbit, in radians.
    /// - `arg_pe`: The argument of periapsis of the orbit, in radians.
    /// - `mean_anomaly_at_epoch`: The mean anomaly of the orbit at epoch, in radians.
    ///
    /// # Errors
    /// Same as [`OrbitalElements::new`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        parent: &impl ParentBody,
        semi_major_axis: f64,
        eccentricity: f64,
        inclination: f64,
        long_asc_node: f64,
        arg_pe: f64,
        mean_anomaly_at_epoch: f64,
    ) -> Result<Orbit> {
        OrbitalElements::around(
            parent,
            semi_major_axis,
            eccentricity,
            inclination,
            long_asc_node,
            arg_pe,
            mean_anomaly_at_epoch,
        )
        .map(Self::from_elements)
    }

    /// Creates a new orbit around `parent` with every angle set to zero.
    ///
    /// # Errors
    /// Same as [`OrbitalElements::new`].
    pub fn with_shape(
        parent: &impl ParentBody,
        semi_major_axis: f64,
        eccentricity: f64,
    ) -> Result<Orbit> {
        Self::new(parent, semi_major_axis, eccentricity, 0.0, 0.0, 0.0, 0.0)
    }

    /// Creates a new orbit from already validated elements.
    pub fn from_elements(elements: OrbitalElements) -> Orbit {
        Orbit {
            elements,
            solver: KeplerSolver::default(),
            cache: Self::get_cached_calculations(&elements),
        }
    }

    /// Replaces the Kepler solver settings used by time-based queries.
    ///
    /// # Example
    /// ```
    /// use keplerian_engine::{KeplerSolver, Orbit};
    ///
    /// let orbit = Orbit::default().with_solver(KeplerSolver {
    ///     precision: 14,
    ///     max_iterations: 50,
    /// });
    ///
    /// assert_eq!(orbit.get_solver().precision, 14);
    /// ```
    pub fn with_solver(self, solver: KeplerSolver) -> Orbit {
        Orbit { solver, ..self }
    }

    fn get_cached_calculations(elements: &OrbitalElements) -> OrbitCachedCalculations {
        OrbitCachedCalculations {
            transformation_matrix: Matrix3x2::from_elements(elements),
        }
    }
}

// Elements
impl Orbit {
    /// Gets the orbital elements of the orbit.
    pub fn get_elements(&self) -> &OrbitalElements {
        &self.elements
    }

    /// Gets the solver settings used by time-based queries.
    pub fn get_solver(&self) -> &KeplerSolver {
        &self.solver
    }

    /// Gets the classification of the orbit.
    pub fn get_orbit_type(&self) -> OrbitType {
        self.elements.orbit_type()
    }

    /// Gets the eccentricity of the orbit.
    ///
    /// The eccentricity of an orbit is a measure of how much it deviates
    /// from a perfect circle.
    ///
    /// An eccentricity of 0 means the orbit is a perfect circle.
    /// Between 0 and 1, the orbit is elliptic, and has an oval shape.
    /// An orbit with an eccentricity of 1 is said to be parabolic.
    /// If it's greater than 1, the orbit is hyperbolic.
    pub fn get_eccentricity(&self) -> f64 {
        self.elements.eccentricity()
    }

    /// Gets the gravitational parameter of the parent body, in m^3 s^-2.
    ///
    /// The gravitational parameter mu of the parent body equals a certain
    /// gravitational constant G times the mass of the parent body M.
    #[doc(alias = "get_mu")]
    pub fn get_gravitational_parameter(&self) -> f64 {
        self.elements.gravitational_parameter()
    }

    /// Gets the inclination of the orbit, in radians.
    pub fn get_inclination(&self) -> f64 {
        self.elements.inclination()
    }

    /// Gets the longitude of ascending node of the orbit, in radians.
    pub fn get_long_asc_node(&self) -> f64 {
        self.elements.long_asc_node()
    }

    /// Gets the argument of periapsis of the orbit, in radians.
    pub fn get_arg_pe(&self) -> f64 {
        self.elements.arg_pe()
    }

    /// Gets the mean anomaly of the orbit at epoch, in radians.
    pub fn get_mean_anomaly_at_epoch(&self) -> f64 {
        self.elements.mean_anomaly_at_epoch()
    }

    /// Gets the transformation matrix needed to tilt a 2D vector into the
    /// tilted orbital plane.
    ///
    /// # Example
    /// ```
    /// use keplerian_engine::{Matrix3x2, Orbit};
    ///
    /// let orbit = Orbit::default();
    /// assert_eq!(orbit.get_transformation_matrix(), Matrix3x2::IDENTITY);
    /// ```
    pub fn get_transformation_matrix(&self) -> Matrix3x2 {
        self.cache.transformation_matrix
    }
}

// Shape
impl Orbit {
    /// Gets the semi-major axis of the orbit, in meters.
    ///
    /// Returns infinity for parabolic orbits, and negative values for
    /// hyperbolic orbits.
    ///
    /// Learn more: <https://en.wikipedia.org/wiki/Semi-major_and_semi-minor_axes>
    pub fn get_semi_major_axis(&self) -> f64 {
        geometry::semi_major_axis(&self.elements)
    }

    /// Gets the semi-minor axis of the orbit, in meters.
    ///
    /// In an elliptic orbit, the semi-minor axis is half of the maximum "width"
    /// of the orbit.
    ///
    /// Learn more: <https://en.wikipedia.org/wiki/Semi-major_and_semi-minor_axes>
    pub fn get_semi_minor_axis(&self) -> f64 {
        geometry::semi_minor_axis(&self.elements)
    }

    /// Gets the distance between the center of the orbit and the parent
    /// body, in meters.
    #[doc(alias = "get_linear_eccentricity")]
    pub fn get_focus_distance(&self) -> f64 {
        geometry::focus_distance(&self.elements)
    }

    /// Gets the semi-latus rectum of the orbit, in meters.
    ///
    /// Learn more: <https://en.wikipedia.org/wiki/Ellipse#Semi-latus_rectum>
    pub fn get_semi_latus_rectum(&self) -> f64 {
        geometry::semi_latus_rectum(&self.elements)
    }

    /// Gets the periapsis of the orbit, in meters.
    ///
    /// The periapsis is the closest point of the orbit to the parent body.
    pub fn get_periapsis(&self) -> f64 {
        geometry::periapsis(&self.elements)
    }

    /// Gets the apoapsis of the orbit, in meters.
    /// Returns infinity for parabolic orbits.
    /// Returns negative values for hyperbolic orbits.
    ///
    /// # Example
    /// ```
    /// use keplerian_engine::Orbit;
    ///
    /// let circle = Orbit::with_shape(&3.986e14, 7e6, 0.0).unwrap();
    /// assert_eq!(circle.get_apoapsis(), circle.get_periapsis());
    ///
    /// let parabola = Orbit::with_shape(&3.986e14, 7e6, 1.0).unwrap();
    /// assert!(parabola.get_apoapsis().is_infinite());
    ///
    /// let hyperbola = Orbit::with_shape(&3.986e14, -7e6, 2.0).unwrap();
    /// assert!(hyperbola.get_apoapsis() < 0.0);
    /// ```
    pub fn get_apoapsis(&self) -> f64 {
        geometry::apoapsis(&self.elements)
    }

    /// Gets the distance from the parent body at a given true anomaly, in meters.
    #[doc(alias = "get_altitude_at_true_anomaly")]
    pub fn get_radius_at_true_anomaly(&self, true_anomaly: f64) -> f64 {
        geometry::radius_at_true_anomaly(&self.elements, true_anomaly)
    }
}

// Energy and velocities
impl Orbit {
    /// Gets the specific orbital energy, in J/kg.
    ///
    /// This is constant along the orbit.
    pub fn get_specific_orbital_energy(&self) -> f64 {
        geometry::specific_orbital_energy(&self.elements)
    }

    /// Gets the speed at a given distance from the parent body, in m/s.
    pub fn get_speed_at_radius(&self, radius: f64) -> f64 {
        geometry::speed_at_radius(&self.elements, radius)
    }

    /// Gets the speed at a given true anomaly, in m/s.
    pub fn get_speed_at_true_anomaly(&self, true_anomaly: f64) -> f64 {
        geometry::speed_at_true_anomaly(&self.elements, true_anomaly)
    }

    /// Gets the flight path angle at a given true anomaly, in radians.
    ///
    /// See [`geometry::velocity_angle_at_true_anomaly`].
    pub fn get_velocity_angle_at_true_anomaly(&self, true_anomaly: f64) -> f64 {
        geometry::velocity_angle_at_true_anomaly(&self.elements, true_anomaly)
    }

    /// Gets the mean orbital speed, in m/s.
    ///
    /// On a circular orbit this is the speed at every point.
    pub fn get_mean_velocity(&self) -> f64 {
        geometry::mean_velocity(&self.elements)
    }

    /// Gets the mean motion, in radians per second.
    pub fn get_mean_motion(&self) -> f64 {
        geometry::mean_motion(&self.elements)
    }

    /// Gets the areal velocity, in m^2/s.
    pub fn get_areal_velocity(&self) -> f64 {
        geometry::areal_velocity(&self.elements)
    }
}

// Time
impl Orbit {
    /// Gets the time it takes to complete one revolution of the orbit, in seconds.
    ///
    /// # Errors
    /// Fails for parabolic and hyperbolic orbits, and for orbits without a
    /// parent body (zero gravitational parameter).
    #[doc(alias = "get_orbital_period")]
    pub fn get_period(&self) -> Result<f64> {
        geometry::period(&self.elements)
    }

    /// Gets the time it takes to complete one revolution of the orbit, in
    /// whole milliseconds.
    ///
    /// # Errors
    /// Fails for parabolic and hyperbolic orbits, and for orbits without a
    /// parent body (zero gravitational parameter).
    pub fn get_period_millis(&self) -> Result<i64> {
        Ok((self.get_period()? * 1000.0).round() as i64)
    }

    /// Gets the time since the last periapsis passage when the body is at
    /// the given true anomaly, in seconds.
    ///
    /// True anomalies beyond one revolution count the extra revolutions,
    /// and negative ones give negative times (time until periapsis).
    ///
    /// # Errors
    /// Fails for parabolic and hyperbolic orbits, and for orbits without a
    /// parent body (zero gravitational parameter).
    #[doc(alias = "get_time_from_periapsis")]
    pub fn get_time_since_periapsis(&self, true_anomaly: f64) -> Result<f64> {
        self.elements.require_bound()?;

        Ok(self.get_mean_anomaly_at_true_anomaly(true_anomaly)? / self.get_mean_motion())
    }
}

// Anomalies
impl Orbit {
    /// Gets the mean anomaly at a given time.
    ///
    /// # Time
    /// The time is expressed in milliseconds since epoch.
    pub fn get_mean_anomaly_at_time(&self, time: i64) -> f64 {
        anomaly::mean_anomaly_at_time(&self.elements, time)
    }

    /// Gets the eccentric anomaly at a given time.
    ///
    /// The eccentric anomaly is an angular parameter that defines the position
    /// of a body that is moving along an elliptic Kepler orbit.
    ///
    /// — [Wikipedia](https://en.wikipedia.org/wiki/Eccentric_anomaly)
    ///
    /// # Time
    /// The time is expressed in milliseconds since epoch.
    ///
    /// # Performance
    /// The method to get the eccentric anomaly from the time
    /// uses numerical approach methods, and so it is not performant.
    /// It is recommended to cache this value if you can, or use
    /// [`render_at_time`][Orbit::render_at_time].
    ///
    /// # Errors
    /// Fails for parabolic and hyperbolic orbits, and if the Kepler solver
    /// breaks down or runs out of iterations.
    pub fn get_eccentric_anomaly_at_time(&self, time: i64) -> Result<f64> {
        anomaly::eccentric_anomaly_at_time(&self.elements, &self.solver, time)
    }

    /// Gets the true anomaly at a given time.
    ///
    /// The true anomaly is the angle between the direction of periapsis
    /// and the current position of the body, as seen from the main focus
    /// of the ellipse.
    ///
    /// — [Wikipedia](https://en.wikipedia.org/wiki/True_anomaly)
    ///
    /// # Errors
    /// Same as [`get_eccentric_anomaly_at_time`][Orbit::get_eccentric_anomaly_at_time].
    pub fn get_true_anomaly_at_time(&self, time: i64) -> Result<f64> {
        anomaly::true_anomaly_at_time(&self.elements, &self.solver, time)
    }

    /// Gets the eccentric anomaly at a given true anomaly.
    ///
    /// # Errors
    /// Fails for hyperbolic orbits when the true anomaly lies beyond the
    /// asymptotes.
    #[doc(alias = "get_eccentric_anomaly_at_angle")]
    pub fn get_eccentric_anomaly_at_true_anomaly(&self, true_anomaly: f64) -> Result<f64> {
        anomaly::eccentric_anomaly_at_true_anomaly(&self.elements, true_anomaly)
    }

    /// Gets the mean anomaly at a given eccentric anomaly.
    pub fn get_mean_anomaly_at_eccentric_anomaly(&self, eccentric_anomaly: f64) -> f64 {
        anomaly::mean_anomaly_at_eccentric_anomaly(&self.elements, eccentric_anomaly)
    }

    /// Gets the mean anomaly at a given true anomaly.
    ///
    /// # Errors
    /// Same as [`get_eccentric_anomaly_at_true_anomaly`][Orbit::get_eccentric_anomaly_at_true_anomaly].
    #[doc(alias = "get_mean_anomaly_at_angle")]
    pub fn get_mean_anomaly_at_true_anomaly(&self, true_anomaly: f64) -> Result<f64> {
        anomaly::mean_anomaly_at_true_anomaly(&self.elements, true_anomaly)
    }

    /// Gets the true anomaly at a given eccentric anomaly.
    pub fn get_true_anomaly_at_eccentric_anomaly(&self, eccentric_anomaly: f64) -> f64 {
        anomaly::true_anomaly_at_eccentric_anomaly(&self.elements, eccentric_anomaly)
    }
}

// Positions and velocities
impl Orbit {
    /// Transforms a 2D vector in the orbital plane into the parent's 3D frame.
    ///
    /// The input is in the perifocal (PQW) frame: +X points at periapsis
    /// and +Y is 90° ahead of it in the direction of motion.
    ///
    /// Learn more: <https://en.wikipedia.org/wiki/Perifocal_coordinate_system>
    pub fn transform_pqw_vector(&self, vector: DVec2) -> DVec3 {
        self.cache.transformation_matrix.dot_vec(vector)
    }

    /// Gets the position in the orbital plane at a given true anomaly, in meters.
    pub fn get_pqw_position_at_true_anomaly(&self, true_anomaly: f64) -> DVec2 {
        let radius = self.get_radius_at_true_anomaly(true_anomaly);
        let (sin, cos) = true_anomaly.sin_cos();
        DVec2::new(radius * cos, radius * sin)
    }

    /// Gets the position in the orbital plane at a given eccentric anomaly, in meters.
    ///
    /// For parabolic and hyperbolic orbits the eccentric anomaly is
    /// converted to a true anomaly first.
    pub fn get_pqw_position_at_eccentric_anomaly(&self, eccentric_anomaly: f64) -> DVec2 {
        let a = self.elements.semi_major_axis();
        let e = self.elements.eccentricity();
        match self.get_orbit_type() {
            OrbitType::Circular | OrbitType::Elliptical => {
                let (sin, cos) = eccentric_anomaly.sin_cos();
                DVec2::new(a * (cos - e), a * (1.0 - e * e).sqrt() * sin)
            }
            OrbitType::Parabolic | OrbitType::Hyperbolic => self.get_pqw_position_at_true_anomaly(
                self.get_true_anomaly_at_eccentric_anomaly(eccentric_anomaly),
            ),
        }
    }

    /// Gets the velocity in the orbital plane at a given true anomaly, in m/s.
    pub fn get_pqw_velocity_at_true_anomaly(&self, true_anomaly: f64) -> DVec2 {
        // v = sqrt(mu / p) * (-sin(f), e + cos(f))
        // https://en.wikipedia.org/wiki/Perifocal_coordinate_system
        let scale = (self.get_gravitational_parameter() / self.get_semi_latus_rectum()).sqrt();
        let (sin, cos) = true_anomaly.sin_cos();
        DVec2::new(-sin, self.get_eccentricity() + cos) * scale
    }

    /// Gets the position relative to the parent at a given true anomaly, in meters.
    #[doc(alias = "get_position_at_angle")]
    pub fn get_position_at_true_anomaly(&self, true_anomaly: f64) -> DVec3 {
        self.transform_pqw_vector(self.get_pqw_position_at_true_anomaly(true_anomaly))
    }

    /// Gets the velocity relative to the parent at a given true anomaly, in m/s.
    pub fn get_velocity_at_true_anomaly(&self, true_anomaly: f64) -> DVec3 {
        self.transform_pqw_vector(self.get_pqw_velocity_at_true_anomaly(true_anomaly))
    }

    /// Gets the position and velocity at a given true anomaly.
    ///
    /// The result can be turned back into an orbit with
    /// [`StateVectors::to_elements`].
    pub fn get_state_vectors_at_true_anomaly(&self, true_anomaly: f64) -> StateVectors {
        StateVectors {
            position: self.get_position_at_true_anomaly(true_anomaly),
            velocity: self.get_velocity_at_true_anomaly(true_anomaly),
        }
    }

    /// Gets the position relative to the parent at a given time, in meters.
    ///
    /// Unlike [`render_at_time`][Orbit::render_at_time], nothing but the
    /// position is returned.
    ///
    /// # Errors
    /// Same as [`get_eccentric_anomaly_at_time`][Orbit::get_eccentric_anomaly_at_time].
    #[doc(alias = "get_position_at_time")]
    pub fn get_position_from_parent_at_time(&self, time: i64) -> Result<DVec3> {
        let eccentric_anomaly = self.get_eccentric_anomaly_at_time(time)?;
        Ok(self.transform_pqw_vector(self.get_pqw_position_at_eccentric_anomaly(eccentric_anomaly)))
    }

    /// Gets the position in absolute coordinates at a given time, in meters.
    ///
    /// # Errors
    /// Same as [`get_eccentric_anomaly_at_time`][Orbit::get_eccentric_anomaly_at_time].
    pub fn get_absolute_position_at_time(
        &self,
        time: i64,
        parent: &impl ParentBody,
    ) -> Result<DVec3> {
        Ok(self.get_position_from_parent_at_time(time)? + parent.absolute_position())
    }

    /// Gets the position and velocity at a given time.
    ///
    /// # Errors
    /// Same as [`get_eccentric_anomaly_at_time`][Orbit::get_eccentric_anomaly_at_time].
    pub fn get_state_vectors_at_time(&self, time: i64) -> Result<StateVectors> {
        let state = self.render_at_time(time)?;
        Ok(StateVectors {
            position: state.position_from_parent(),
            velocity: self.get_rendered_velocity(&state),
        })
    }
}

// Rendering
impl Orbit {
    /// Evaluates the orbit at a given time.
    ///
    /// Solves Kepler's equation once and returns everything derived from
    /// it as a [`RenderedState`]. Pass the state to
    /// [`get_rendered_velocity`][Orbit::get_rendered_velocity] and friends
    /// to answer further questions about the same instant.
    ///
    /// # Errors
    /// Same as [`get_eccentric_anomaly_at_time`][Orbit::get_eccentric_anomaly_at_time].
    ///
    /// # Example
    /// ```
    /// use keplerian_engine::{Body, Orbit};
    ///
    /// let orbit = Orbit::with_shape(&Body::default(), 7_000_000.0, 0.1).unwrap();
    /// let state = orbit.render_at_time(60_000).unwrap();
    ///
    /// assert_eq!(state.time(), 60_000);
    /// assert!(state.true_anomaly() > state.mean_anomaly());
    /// assert!(orbit.get_rendered_speed(&state) > 0.0);
    /// ```
    pub fn render_at_time(&self, time: i64) -> Result<RenderedState> {
        let mean_anomaly = self.get_mean_anomaly_at_time(time);
        let eccentric_anomaly = self.solver.solve(mean_anomaly, self.get_eccentricity())?;
        let true_anomaly = self.get_true_anomaly_at_eccentric_anomaly(eccentric_anomaly);
        let position_in_plane = self.get_pqw_position_at_eccentric_anomaly(eccentric_anomaly);
        let position_from_parent = self.transform_pqw_vector(position_in_plane);

        trace!("rendered orbit at t = {time} ms: M = {mean_anomaly}, E = {eccentric_anomaly}");

        Ok(RenderedState {
            time,
            mean_anomaly,
            eccentric_anomaly,
            true_anomaly,
            position_in_plane,
            position_from_parent,
        })
    }

    /// Gets the speed at a rendered state, in m/s.
    pub fn get_rendered_speed(&self, state: &RenderedState) -> f64 {
        self.get_speed_at_radius(state.radius())
    }

    /// Gets the velocity at a rendered state, in m/s.
    pub fn get_rendered_velocity(&self, state: &RenderedState) -> DVec3 {
        self.get_velocity_at_true_anomaly(state.true_anomaly)
    }

    /// Gets the unit vector along the direction of motion at a rendered state.
    ///
    /// This is the tangent to the orbit at the rendered position.
    pub fn get_rendered_tangent(&self, state: &RenderedState) -> DVec3 {
        self.get_rendered_velocity(state).normalize_or_zero()
    }

    /// Gets the angle of the direction of motion in the orbital plane at a
    /// rendered state, in radians from the periapsis direction.
    pub fn get_rendered_tangent_angle(&self, state: &RenderedState) -> f64 {
        normalize_angle(self.get_pqw_velocity_at_true_anomaly(state.true_anomaly).to_angle())
    }
}

impl Default for Orbit {
    /// Creates a unit orbit.
    ///
    /// The unit orbit is a perfect circle of radius 1 and no "tilt",
    /// around a parent with a gravitational parameter of 1.
    fn default() -> Orbit {
        Self::from_elements(OrbitalElements::default())
    }
}

impl fmt::Display for Orbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} orbit, semi-major axis {} m, eccentricity {}",
            self.get_orbit_type(),
            self.elements.semi_major_axis(),
            self.get_eccentricity()
        )
    }
}
