//! Single planar pendulum: one point mass on a massless rigid rod
//!
//! The bob position is never stored; it is recomputed from the current angle
//! on every query so it always sits exactly `length` away from the pivot.

use nalgebra::Vector1;

use super::error::{check_dt, require_finite, require_positive, Result};
use super::forces::SingleLinkGravity;
use super::integrator::Method;
use super::params::GRAVITY;
use super::states::{link_end, NVec2, Segment};

#[derive(Debug, Clone)]
pub struct SinglePendulumSim {
    theta: Vector1<f64>, // angle from the downward vertical (rad)
    omega: Vector1<f64>, // angular velocity (rad/s)
    length: f64,
    mass: f64,
    pivot: NVec2,
    g: f64,
    method: Method,
}

impl SinglePendulumSim {
    /// Build a pendulum at rest at `start_angle`
    /// Fails with `InvalidConfiguration` on a non-positive length or mass
    pub fn new(length: f64, start_angle: f64, pivot: NVec2, mass: f64) -> Result<Self> {
        require_positive("length", length)?;
        require_positive("mass", mass)?;
        require_finite("start_angle", start_angle)?;
        require_finite("pivot.x", pivot.x)?;
        require_finite("pivot.y", pivot.y)?;

        Ok(Self {
            theta: Vector1::new(start_angle),
            omega: Vector1::new(0.0),
            length,
            mass,
            pivot,
            g: GRAVITY,
            method: Method::default(),
        })
    }

    /// Start with a non-zero angular velocity instead of at rest
    pub fn with_angular_velocity(mut self, omega: f64) -> Result<Self> {
        self.omega[0] = require_finite("omega", omega)?;
        Ok(self)
    }

    pub fn with_gravity(mut self, g: f64) -> Result<Self> {
        self.g = require_finite("g", g)?;
        Ok(self)
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Advance the pendulum by `dt` seconds
    /// Rejects `dt <= 0` with `InvalidArgument` and leaves the state untouched
    pub fn step(&mut self, dt: f64) -> Result<()> {
        check_dt(dt)?;
        let dynamics = self.dynamics();
        self.method.advance(&dynamics, &mut self.theta, &mut self.omega, dt);
        Ok(())
    }

    pub fn dynamics(&self) -> SingleLinkGravity {
        SingleLinkGravity { g: self.g, length: self.length }
    }

    pub fn angle(&self) -> f64 {
        self.theta[0]
    }

    pub fn angular_velocity(&self) -> f64 {
        self.omega[0]
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn pivot(&self) -> NVec2 {
        self.pivot
    }

    pub fn gravity(&self) -> f64 {
        self.g
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn bob_position(&self) -> NVec2 {
        link_end(self.pivot, self.length, self.theta[0])
    }

    /// Pivot to bob, for drawing the rod
    pub fn rod_endpoints(&self) -> Segment {
        (self.pivot, self.bob_position())
    }

    /// Kinetic energy: 1/2 * m * L^2 * omega^2
    pub fn kinetic_energy(&self) -> f64 {
        let w = self.omega[0];
        0.5 * self.mass * self.length * self.length * w * w
    }

    /// Potential energy measured from the lowest point of the swing
    pub fn potential_energy(&self) -> f64 {
        self.mass * self.g * self.length * (1.0 - self.theta[0].cos())
    }

    pub fn energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }
}
