#![cfg(test)]

use core::f64::consts::{PI, TAU};

use glam::{DVec2, DVec3};

use crate::{
    Body, KeplerSolver, Orbit, OrbitError, OrbitType, ParameterError, RenderedState, StateVectors,
};

const ORBIT_POLL_ANGLES: usize = 1024;


use assertions::*;
use polling::*;
use seeders::*;

const EARTH_MU: f64 = 3.986e14;

fn unit_orbit() -> Orbit {
    Orbit::default()
}

fn inclined_elliptic() -> Orbit {
    Orbit::new(&EARTH_MU, 24_400_000.0, 0.7, 0.1, 0.2, 0.3, 0.0).unwrap()
}

#[test]
fn unit_orbit_angle_3d() {
    let orbit = unit_orbit();

    assert_orbit_positions_3d(
        &orbit,
        &[
            ("unit orbit 1", 0.0 * PI, DVec3::new(1.0, 0.0, 0.0)),
            ("unit orbit 2", 0.5 * PI, DVec3::new(0.0, 1.0, 0.0)),
            ("unit orbit 3", 1.0 * PI, DVec3::new(-1.0, 0.0, 0.0)),
            ("unit orbit 4", 1.5 * PI, DVec3::new(0.0, -1.0, 0.0)),
            ("unit orbit 5", 2.0 * PI, DVec3::new(1.0, 0.0, 0.0)),
        ],
    );
}

#[test]
fn unit_orbit_angle_2d() {
    let orbit = unit_orbit();

    assert_orbit_positions_2d(
        &orbit,
        &[
            ("unit orbit 1", 0.0 * PI, DVec2::new(1.0, 0.0)),
            ("unit orbit 2", 0.5 * PI, DVec2::new(0.0, 1.0)),
            ("unit orbit 3", 1.0 * PI, DVec2::new(-1.0, 0.0)),
            ("unit orbit 4", 1.5 * PI, DVec2::new(0.0, -1.0)),
            ("unit orbit 5", 2.0 * PI, DVec2::new(1.0, 0.0)),
        ],
    );
}

#[test]
fn unit_orbit_transformation() {
    // Test how the inclination and LAN tilts points in the orbit.
    // Since inclination is zero, it should not do anything.
    let orbit = unit_orbit();

    let tests = [(1.0, 1.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)];

    for point in tests {
        let transformed = orbit.transform_pqw_vector(DVec2::new(point.0, point.1));

        assert_eq!(transformed.x, point.0);
        assert_eq!(transformed.y, point.1);
        assert_eq!(transformed.z, 0.0);
    }
}

#[test]
fn unit_orbit_at_epoch() {
    let orbit = unit_orbit();
    let state = orbit.render_at_time(0).unwrap();

    assert_eq_vec3(
        state.position_from_parent(),
        DVec3::new(1.0, 0.0, 0.0),
        "unit orbit at epoch",
    );
    assert_eq!(state.mean_anomaly(), 0.0);
    assert_eq!(state.true_anomaly(), 0.0);
}

#[test]
fn tilted_equidistant() {
    let orbit = Orbit::new(
        &1.0,
        1.0,
        0.0,
        2.848915582093,
        1.9520945821,
        2.1834987325,
        0.69482153021,
    )
    .unwrap();

    // Test for equidistance
    let points = poll_orbit(&orbit);

    for point in points {
        let distance = point.length();

        assert_almost_eq(distance, 1.0, "Distance");
    }

    for point in poll_transform(&orbit) {
        assert_almost_eq(point.length(), 1.0, "Transformed unit vector");
    }
}

#[test]
fn tilted_90deg() {
    let orbit = Orbit::new(&1.0, 1.0, 0.0, PI / 2.0, 0.0, 0.0, 0.0).unwrap();

    // Transform test
    let tests = [
        // Before and after transformation
        (("Vector 1"), (1.0, 0.0), DVec3::new(1.0, 0.0, 0.0)),
        (("Vector 2"), (0.0, 1.0), DVec3::new(0.0, 0.0, 1.0)),
        (("Vector 3"), (-1.0, 0.0), DVec3::new(-1.0, 0.0, 0.0)),
        (("Vector 4"), (0.0, -1.0), DVec3::new(0.0, 0.0, -1.0)),
    ];

    for (what, point, expected) in tests.iter() {
        let transformed = orbit.transform_pqw_vector(DVec2::new(point.0, point.1));

        assert_almost_eq_vec3(transformed, *expected, what);
    }
}

#[test]
fn apoapsis_of_two() {
    let orbit = Orbit::with_shape(&1.0, 1.5, 1.0 / 3.0).unwrap();

    let point_at_apoapsis = orbit.get_position_at_true_anomaly(PI);
    let point_at_periapsis = orbit.get_position_at_true_anomaly(0.0);

    assert_almost_eq_vec3(point_at_apoapsis, DVec3::new(-2.0, 0.0, 0.0), "Ap");
    assert_almost_eq_vec3(point_at_periapsis, DVec3::new(1.0, 0.0, 0.0), "Pe");
    assert_almost_eq(orbit.get_apoapsis(), 2.0, "Apoapsis getter");
    assert_almost_eq(orbit.get_periapsis(), 1.0, "Periapsis getter");
}

#[test]
fn parabolic() {
    let orbit = Orbit::with_shape(&1.0, 1.0, 1.0).unwrap();

    assert_eq!(orbit.get_orbit_type(), OrbitType::Parabolic);

    let point_near_infinity = orbit.get_position_at_true_anomaly(PI - 1e-7);
    let point_at_periapsis = orbit.get_position_at_true_anomaly(0.0);

    assert!(
        point_near_infinity.length() > 1e9,
        "Point near infinity is not far enough"
    );
    assert!(
        point_near_infinity.y.abs() > 0.0,
        "Y coord near infinity should move a little"
    );
    assert_almost_eq(
        point_near_infinity.z,
        0.0,
        "Point near infinity should be flat",
    );
    assert_almost_eq_vec3(point_at_periapsis, DVec3::new(1.0, 0.0, 0.0), "Pe");

    assert_eq!(orbit.get_specific_orbital_energy(), 0.0);
    assert!(orbit.get_semi_major_axis().is_infinite());
    assert_almost_eq(orbit.get_semi_latus_rectum(), 2.0, "Semi-latus rectum");
}

#[test]
fn hyperbolic_periapsis() {
    for orbit in (0..100).map(|_| random_hyperbolic()) {
        let periapsis = orbit.get_periapsis();
        assert!(periapsis > 0.0, "{orbit}");
        assert!(orbit.get_apoapsis() < 0.0, "{orbit}");
        assert!(orbit.get_specific_orbital_energy() > 0.0, "{orbit}");

        let position = orbit.get_position_at_true_anomaly(0.0);
        assert_almost_eq_relative(position.length(), periapsis, 1e-12, "periapsis radius");
    }
}

#[test]
fn circular_scenario() {
    let orbit = Orbit::with_shape(&EARTH_MU, 7_000_000.0, 0.0).unwrap();

    assert_eq!(orbit.get_orbit_type(), OrbitType::Circular);
    assert!((orbit.get_mean_velocity() - 7546.0).abs() < 1.0);
    assert!((orbit.get_period().unwrap() - 5828.5).abs() < 1.0);
    assert!((orbit.get_period_millis().unwrap() - 5_828_500).abs() < 1000);
}

#[test]
fn solver_residual() {
    let solver = KeplerSolver::default();

    for _ in 0..10_000 {
        let eccentricity = rand::random_range(0.0..0.9999);
        let mean_anomaly = rand::random_range(-20.0..20.0);

        let solution = solver.solve_detailed(mean_anomaly, eccentricity).unwrap();
        let eccentric_anomaly = solution.eccentric_anomaly;
        let residual = eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly;

        assert!(
            solution.converged,
            "did not converge for M = {mean_anomaly}, e = {eccentricity}"
        );
        assert!(residual.abs() <= 1e-9, "M = {mean_anomaly}, e = {eccentricity}");
    }
}

#[test]
fn near_parabolic_solver_converges() {
    let solver = KeplerSolver::default();

    for eccentricity in [0.97387, 0.999, 0.9999, 0.999_999] {
        for i in -400..=400 {
            let mean_anomaly = i as f64 * 0.05;
            let eccentric_anomaly = solver.solve(mean_anomaly, eccentricity).unwrap();
            let residual =
                eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly;

            assert!(
                residual.abs() <= 1e-9,
                "M = {mean_anomaly}, e = {eccentricity}, residual = {residual}"
            );
        }
    }
}

#[test]
fn whole_revolutions_give_the_same_position() {
    for (mean_anomaly, eccentricity) in [(-6.55, 0.97387), (0.3, 0.999), (17.0, 0.9999)] {
        let orbit = Orbit::new(&EARTH_MU, 1e7, eccentricity, 0.4, 1.0, 2.0, mean_anomaly).unwrap();
        let shifted =
            Orbit::new(&EARTH_MU, 1e7, eccentricity, 0.4, 1.0, 2.0, mean_anomaly + TAU).unwrap();

        for t in [0, 1_000, 250_000] {
            let position = orbit.get_position_from_parent_at_time(t).unwrap();
            let shifted_position = shifted.get_position_from_parent_at_time(t).unwrap();

            assert_almost_eq_vec3_rescale(
                position,
                shifted_position,
                &format!("M0 = {mean_anomaly}, e = {eccentricity}, t = {t}"),
            );
            assert!(position.length() <= orbit.get_apoapsis() * (1.0 + 1e-9));
        }
    }
}

#[test]
fn circular_radius_and_speed_are_constant() {
    for orbit in (0..20).map(|_| random_circular()) {
        let radius = orbit.get_semi_major_axis();
        let speed = orbit.get_mean_velocity();

        for state in poll_render(&orbit) {
            assert_almost_eq_relative(state.radius(), radius, 1e-9, "circular radius");
            assert_eq!(orbit.get_rendered_speed(&state), speed);
            assert_almost_eq_relative(
                orbit.get_rendered_velocity(&state).length(),
                speed,
                1e-9,
                "circular velocity",
            );
        }

        assert_eq!(orbit.get_periapsis(), orbit.get_apoapsis());
        assert_eq!(orbit.get_periapsis(), radius);
    }
}

#[test]
fn anomaly_round_trip() {
    let solver = KeplerSolver::default();

    for orbit in (0..100).map(|_| random_elliptic()) {
        let e = orbit.get_eccentricity();

        for i in -30..=30 {
            let true_anomaly = i as f64 * 0.1;

            let eccentric_anomaly = orbit.get_eccentric_anomaly_at_true_anomaly(true_anomaly).unwrap();
            let mean_anomaly = orbit.get_mean_anomaly_at_eccentric_anomaly(eccentric_anomaly);
            let solved = solver.solve(mean_anomaly, e).unwrap();
            let recovered = orbit.get_true_anomaly_at_eccentric_anomaly(solved);

            assert_almost_eq_angle(
                recovered,
                true_anomaly,
                1e-6,
                &format!("true anomaly round trip on {orbit}"),
            );
        }
    }
}

#[test]
fn energy_invariance() {
    for orbit in random_bound_iter(20) {
        let mu = orbit.get_gravitational_parameter();
        let energy = orbit.get_specific_orbital_energy();

        for sv in poll_sv(&orbit) {
            let vis_viva = sv.velocity.length_squared() / 2.0 - mu / sv.position.length();
            assert_almost_eq_relative(vis_viva, energy, 1e-8, "specific orbital energy");
        }

        assert_eq!(energy, orbit.get_specific_orbital_energy());
    }
}

#[test]
fn periapsis_not_above_apoapsis() {
    for orbit in random_bound_iter(1000) {
        assert!(orbit.get_periapsis() <= orbit.get_apoapsis(), "{orbit}");
        assert!(orbit.get_semi_minor_axis() <= orbit.get_semi_major_axis(), "{orbit}");
    }
}

#[test]
fn eccentric_and_true_positions_agree() {
    for orbit in random_any_iter(200) {
        let scale = orbit.get_periapsis();

        for i in -10..=10 {
            let true_anomaly = i as f64 * 0.15;
            let eccentric_anomaly = orbit.get_eccentric_anomaly_at_true_anomaly(true_anomaly).unwrap();

            let by_true = orbit.get_pqw_position_at_true_anomaly(true_anomaly);
            let by_eccentric = orbit.get_pqw_position_at_eccentric_anomaly(eccentric_anomaly);

            assert!(
                (by_true - by_eccentric).length() / scale < 1e-6,
                "{by_true} vs {by_eccentric} at f = {true_anomaly} on {orbit}"
            );
        }
    }
}

#[test]
fn state_vectors_round_trip() {
    for orbit in (0..200).map(|_| random_inclined_elliptic()) {
        let mu = orbit.get_gravitational_parameter();

        for true_anomaly in [0.0, 1.0, 2.5, -2.0] {
            let sv = orbit.get_state_vectors_at_true_anomaly(true_anomaly);
            let recovered = sv.to_elements(mu).unwrap();
            let what = format!("{orbit} at f = {true_anomaly}");

            assert_same_shape(orbit.get_elements(), &recovered, &what);
            assert_same_orientation(orbit.get_elements(), &recovered, &what);
            assert_eq!(recovered.mean_anomaly_at_epoch(), 0.0);
        }
    }
}

#[test]
fn state_vectors_round_trip_at_periapsis() {
    let orbit = inclined_elliptic();
    let sv = orbit.get_state_vectors_at_true_anomaly(0.0);

    let recovered = sv.to_orbit(&EARTH_MU).unwrap();

    assert_almost_eq_relative(
        recovered.get_semi_major_axis(),
        24_400_000.0,
        1e-9,
        "semi-major axis",
    );
    assert!((recovered.get_eccentricity() - 0.7).abs() < 1e-9);
    assert_almost_eq_vec3_rescale(
        recovered.get_position_at_true_anomaly(0.0),
        sv.position,
        "periapsis position",
    );
}

#[test]
fn hyperbolic_state_vectors_round_trip() {
    for orbit in (0..100).map(|_| random_hyperbolic()) {
        let mu = orbit.get_gravitational_parameter();

        for true_anomaly in [0.0, 0.5, -0.5] {
            let sv = orbit.get_state_vectors_at_true_anomaly(true_anomaly);
            let recovered = sv.to_elements(mu).unwrap();

            assert_eq!(recovered.orbit_type(), OrbitType::Hyperbolic);
            assert_same_shape(
                orbit.get_elements(),
                &recovered,
                &format!("{orbit} at f = {true_anomaly}"),
            );
        }
    }
}

#[test]
fn render_matches_direct_queries() {
    let parent = Body::default().with_position(DVec3::new(1e9, -2e9, 3e8));

    for orbit in random_bound_iter(20) {
        for t in poll_times(&orbit).into_iter().step_by(16) {
            let state = orbit.render_at_time(t).unwrap();

            assert_eq!(state.time(), t);
            assert_eq!(state.true_anomaly(), orbit.get_true_anomaly_at_time(t).unwrap());
            assert_eq!(
                state.eccentric_anomaly(),
                orbit.get_eccentric_anomaly_at_time(t).unwrap()
            );
            assert_eq_vec3(
                state.position_from_parent(),
                orbit.get_position_from_parent_at_time(t).unwrap(),
                "rendered position",
            );
            assert_eq_vec3(
                state.absolute_position(&parent),
                orbit.get_absolute_position_at_time(t, &parent).unwrap(),
                "rendered absolute position",
            );
            assert_eq_vec3(
                state.position_from_parent(),
                orbit.transform_pqw_vector(state.position_in_plane()),
                "rendered plane position",
            );
        }
    }
}

#[test]
fn absolute_position_follows_parent() {
    let orbit = inclined_elliptic();
    let state = orbit.render_at_time(1_234_567).unwrap();

    let before = Body::default();
    let after = Body::default().with_position(DVec3::new(5.0, 6.0, 7.0));

    assert_eq!(
        state.absolute_position(&after) - state.absolute_position(&before),
        DVec3::new(5.0, 6.0, 7.0)
    );
}

#[test]
fn rendered_tangent() {
    for orbit in random_bound_iter(20) {
        for state in poll_render(&orbit).into_iter().step_by(8) {
            let tangent = orbit.get_rendered_tangent(&state);
            let radial = state.position_from_parent().normalize();
            let flight_path_angle =
                orbit.get_velocity_angle_at_true_anomaly(state.true_anomaly());

            assert_almost_eq(tangent.length(), 1.0, "tangent length");
            assert!(
                (tangent.dot(radial) - flight_path_angle.sin()).abs() < 1e-9,
                "radial part of tangent on {orbit}"
            );
            assert_almost_eq_relative(
                orbit.get_rendered_velocity(&state).length(),
                orbit.get_rendered_speed(&state),
                1e-9,
                "rendered speed",
            );

            let angle = orbit.get_rendered_tangent_angle(&state);
            assert!((0.0..TAU).contains(&angle));
        }
    }
}

#[test]
fn velocity_is_position_derivative() {
    let orbit = inclined_elliptic();

    for t in [0, 1_000_000, 7_777_777, 20_000_000] {
        let before = orbit.get_position_from_parent_at_time(t - 1000).unwrap();
        let after = orbit.get_position_from_parent_at_time(t + 1000).unwrap();
        let estimate = (after - before) / 2.0;

        let velocity = orbit.get_state_vectors_at_time(t).unwrap().velocity;

        assert!(
            (estimate - velocity).length() / velocity.length() < 1e-5,
            "{estimate} vs {velocity} at t = {t}"
        );
    }
}

#[test]
fn time_since_periapsis() {
    let orbit = inclined_elliptic();

    assert_eq!(orbit.get_time_since_periapsis(0.0).unwrap(), 0.0);
    assert_almost_eq_relative(
        orbit.get_time_since_periapsis(PI).unwrap(),
        orbit.get_period().unwrap() / 2.0,
        1e-12,
        "half period",
    );

    for true_anomaly in [0.5, 2.0, -1.0, 3.0] {
        let seconds = orbit.get_time_since_periapsis(true_anomaly).unwrap();
        let millis = (seconds * 1000.0).round() as i64;

        assert!(
            (orbit.get_mean_anomaly_at_time(millis)
                - orbit.get_mean_anomaly_at_true_anomaly(true_anomaly).unwrap())
            .abs()
                < 1e-6
        );
        assert_almost_eq_angle(
            orbit.get_true_anomaly_at_time(millis).unwrap(),
            true_anomaly,
            1e-5,
            "true anomaly after time since periapsis",
        );
    }
}

#[test]
fn unbound_time_queries_fail() {
    let parabolic = Orbit::with_shape(&EARTH_MU, 7e6, 1.0).unwrap();
    let hyperbolic = Orbit::with_shape(&EARTH_MU, -7e6, 1.5).unwrap();

    assert_eq!(
        parabolic.get_period(),
        Err(OrbitError::InvalidParameter(ParameterError::UnboundOrbit(1.0)))
    );
    assert!(hyperbolic.get_period_millis().is_err());
    assert!(hyperbolic.get_time_since_periapsis(0.3).is_err());
    assert!(parabolic.render_at_time(0).unwrap_err().is_invalid_input());
    assert!(hyperbolic.get_position_from_parent_at_time(10).is_err());
    assert!(hyperbolic.get_state_vectors_at_time(10).is_err());

    // Geometry stays available
    assert!(hyperbolic.get_mean_velocity() > 0.0);
    assert_eq!(parabolic.get_mean_velocity(), 0.0);
}

#[test]
fn invalid_construction() {
    let err = Orbit::with_shape(&EARTH_MU, 7e6, -0.5).unwrap_err();

    assert_eq!(
        err,
        OrbitError::InvalidParameter(ParameterError::NegativeEccentricity(-0.5))
    );
    assert!(Orbit::with_shape(&EARTH_MU, 7e6, f64::NAN).is_err());

    assert_eq!(
        Orbit::with_shape(&EARTH_MU, 7e6, 1.5).unwrap_err(),
        OrbitError::InvalidParameter(ParameterError::InvalidSemiMajorAxis {
            semi_major_axis: 7e6,
            orbit_type: OrbitType::Hyperbolic,
        })
    );
    assert_eq!(
        Orbit::with_shape(&EARTH_MU, -7e6, 0.5).unwrap_err(),
        OrbitError::InvalidParameter(ParameterError::InvalidSemiMajorAxis {
            semi_major_axis: -7e6,
            orbit_type: OrbitType::Elliptical,
        })
    );
    assert!(Orbit::with_shape(&-EARTH_MU, 7e6, 0.0).unwrap_err().is_invalid_input());
}

#[test]
fn parentless_orbit_has_no_period() {
    let orbit = Orbit::with_shape(&0.0, 7e6, 0.0).unwrap();
    let expected = Err(OrbitError::InvalidParameter(
        ParameterError::NonPositiveGravitationalParameter(0.0),
    ));

    assert_eq!(orbit.get_period(), expected);
    assert_eq!(orbit.get_period_millis(), expected.map(|_: f64| 0));
    assert_eq!(orbit.get_time_since_periapsis(0.0), expected);

    // Without a parent nothing moves
    let position = orbit.get_position_from_parent_at_time(1_000_000).unwrap();
    assert_eq!(position, DVec3::new(7e6, 0.0, 0.0));
    assert_eq!(orbit.get_mean_velocity(), 0.0);
}

#[test]
fn parent_gravitational_parameter_is_read_once() {
    let earth = Body::default();
    let orbit = Orbit::with_shape(&earth, 7e6, 0.1).unwrap();

    assert_eq!(orbit.get_gravitational_parameter(), earth.mass * crate::GRAVITATIONAL_CONSTANT);
}

#[test]
fn display() {
    let orbit = Orbit::with_shape(&1.0, 2.0, 0.5).unwrap();

    assert_eq!(
        orbit.to_string(),
        "elliptical orbit, semi-major axis 2 m, eccentricity 0.5"
    );
}

#[test]
fn sv_from_rendered_state() {
    let orbit = inclined_elliptic();
    let state = orbit.render_at_time(42_000).unwrap();

    let sv = StateVectors {
        position: state.position_from_parent(),
        velocity: orbit.get_rendered_velocity(&state),
    };

    assert_eq!(sv, orbit.get_state_vectors_at_time(42_000).unwrap());
}

#[test]
fn thread_safety() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<Orbit>();
    assert_send_sync::<RenderedState>();
    assert_send_sync::<OrbitError>();
    assert_send_sync::<StateVectors>();

    let orbit = inclined_elliptic();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let orbit = &orbit;
                scope.spawn(move || orbit.render_at_time(i * 1_000_000).unwrap())
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let state = handle.join().unwrap();
            assert_eq!(state, orbit.render_at_time(i as i64 * 1_000_000).unwrap());
        }
    });
}

#[test]
fn flat_positions_are_finite() {
    let orbit = Orbit::with_shape(&1.0, 1.0, 0.999_999).unwrap();

    for pos in poll_flat(&orbit) {
        assert!(
            pos.x.is_finite() && pos.y.is_finite(),
            "2D position algorithm instability at near-parabolic edge case"
        );
    }

    for ecc in poll_eccentric_anomaly(&inclined_elliptic()) {
        assert!(ecc.is_finite());
    }
}
