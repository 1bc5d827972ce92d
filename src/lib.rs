//! # Keplerian Orbit Engine
//! This library crate contains logic for two-body Keplerian orbits: given
//! the classical orbital elements of a body around a parent, it finds
//! where the body is, and how fast it moves, at any instant.
//!
//! Keplerian orbits don't use time steps to calculate the next position of
//! an object. The elements determine the object's *full trajectory*, and
//! any point of it can be evaluated directly.
//! This way, you don't need to worry about lag destabilizing the orbit.
//!
//! It's a two-body model: it doesn't account for external forces like
//! gravity from other bodies or the engines of a spacecraft.
//!
//! ## Getting started
//! This crate provides a few main types:
//! - [`Orbit`]: An immutable orbit around a parent body, answering
//!   geometric, kinematic and time-based queries.
//!   It caches the rotation from the orbital plane into the parent's frame.
//! - [`OrbitalElements`]: The validated elements an [`Orbit`] is built from.
//! - [`Body`]: A celestial body with a mass, usable as a parent through
//!   the [`ParentBody`] trait.
//! - [`StateVectors`]: A position and velocity, which can be turned back
//!   into orbital elements.
//! - [`KeplerSolver`]: The Newton-Raphson solver for Kepler's equation.
//!
//! The [`anomaly`], [`geometry`] and [`vector`] modules expose the
//! underlying free functions.
//!
//! ## Units
//! Distances are in meters, angles in radians and speeds in m/s.
//! Time-based queries take an `i64` time in milliseconds since epoch.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//!
//! use keplerian_engine::{Body, Orbit, OrbitType};
//!
//! # fn main() -> keplerian_engine::Result<()> {
//! // Create a perfectly circular orbit with a radius of 1 meter
//! let orbit = Orbit::default();
//! assert_eq!(orbit.get_position_from_parent_at_time(0)?, DVec3::new(1.0, 0.0, 0.0));
//!
//! // A low Earth orbit
//! let orbit = Orbit::with_shape(&Body::default(), 7_000_000.0, 0.0)?;
//! assert_eq!(orbit.get_orbit_type(), OrbitType::Circular);
//! assert!((orbit.get_mean_velocity() - 7546.0).abs() < 1.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//! Diagnostics go through the [`log`](https://docs.rs/log) facade:
//! the solver reports a missed convergence at `debug` level, and rendering
//! traces every evaluated instant at `trace` level. Install any logger to
//! see them.

#![warn(missing_docs)]

pub mod anomaly;
mod body;
mod elements;
mod error;
pub mod geometry;
mod orbit;
mod solvers;
mod state_vectors;
mod transform;
pub mod vector;

pub use body::{Body, ParentBody, GRAVITATIONAL_CONSTANT};
pub use elements::{OrbitType, OrbitalElements};
pub use error::{NumericalError, OrbitError, ParameterError, Result};
pub use orbit::{Orbit, RenderedState};
pub use solvers::{
    calculate_eccentric_anomaly, normalize_angle, KeplerSolver, Solution, DEFAULT_MAX_ITERATIONS,
    DEFAULT_PRECISION,
};
pub use state_vectors::StateVectors;
pub use transform::{rotate_into_parent_frame, Matrix3x2};

#[cfg(test)]
mod tests;
