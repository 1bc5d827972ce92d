use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The gravitational constant, in m^3 kg^-1 s^-2.
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;

/// The read-only view an orbit needs of the body it revolves around.
///
/// Orbits read the gravitational parameter once on construction and
/// never hold on to the body. The absolute position is only queried
/// when asking for absolute coordinates, so the body hierarchy stays
/// in charge of how (and when) parents move.
pub trait ParentBody {
    /// The standard gravitational parameter of the body, in m^3 s^-2.
    #[doc(alias = "mu")]
    fn gravitational_parameter(&self) -> f64;

    /// The position of the body in absolute coordinates, in meters.
    fn absolute_position(&self) -> DVec3;
}

/// A struct representing a celestial body.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Body {
    /// The name of the celestial body.
    pub name: String,

    /// The mass of the celestial body, in kilograms.
    pub mass: f64,

    /// The radius of the celestial body, in meters.
    pub radius: f64,

    /// The position of the celestial body in absolute coordinates, in meters.
    pub position: DVec3,
}

impl Body {
    /// Creates a new `Body` instance at the origin.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the celestial body.
    /// * `mass` - The mass of the celestial body, in kilograms.
    /// * `radius` - The radius of the celestial body, in meters.
    pub fn new(name: String, mass: f64, radius: f64) -> Self {
        Self {
            name,
            mass,
            radius,
            position: DVec3::ZERO,
        }
    }

    /// Moves the body to the given absolute position.
    pub fn with_position(self, position: DVec3) -> Self {
        Self { position, ..self }
    }
}

impl ParentBody for Body {
    fn gravitational_parameter(&self) -> f64 {
        GRAVITATIONAL_CONSTANT * self.mass
    }

    fn absolute_position(&self) -> DVec3 {
        self.position
    }
}

/// A bare gravitational parameter acts as a parent sitting at the origin.
impl ParentBody for f64 {
    fn gravitational_parameter(&self) -> f64 {
        *self
    }

    fn absolute_position(&self) -> DVec3 {
        DVec3::ZERO
    }
}

impl<T: ParentBody + ?Sized> ParentBody for &T {
    fn gravitational_parameter(&self) -> f64 {
        (**self).gravitational_parameter()
    }

    fn absolute_position(&self) -> DVec3 {
        (**self).absolute_position()
    }
}

impl Default for Body {
    /// Creates a default `Body` instance.
    ///
    /// Currently, this function returns the Earth.
    /// However, do not rely on this behavior, as it may change in the future.
    fn default() -> Self {
        Self {
            name: "Earth".to_string(),
            mass: 5.972e24,
            radius: 6.371e6,
            position: DVec3::ZERO,
        }
    }
}
