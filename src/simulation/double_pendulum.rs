//! Two-link planar pendulum with coupled nonlinear dynamics
//!
//! State is the pair of link angles and angular velocities; both bob
//! positions are derived from the angles on demand:
//! - bob1 = pivot + L1 * (cos(theta1 - pi/2), sin(theta1 - pi/2))
//! - bob2 = bob1  + L2 * (cos(theta2 - pi/2), sin(theta2 - pi/2))
//!
//! The motion is chaotic: trajectories from nearby initial angles separate
//! quickly, and the semi-implicit Euler scheme does not conserve energy
//! exactly.

use nalgebra::Vector2;

use super::error::{check_dt, require_finite, require_positive, Result};
use super::forces::DoubleLinkGravity;
use super::integrator::Method;
use super::params::GRAVITY;
use super::states::{link_end, NVec2, Segment};

#[derive(Debug, Clone)]
pub struct DoublePendulumSim {
    theta: Vector2<f64>, // (theta1, theta2) from the downward vertical
    omega: Vector2<f64>, // (omega1, omega2)
    m1: f64,
    m2: f64,
    l1: f64,
    l2: f64,
    pivot: NVec2,
    g: f64,
    method: Method,
}

impl DoublePendulumSim {
    /// Build a double pendulum at rest with link angles `theta1`, `theta2`
    ///
    /// Both masses must be > 0: with `m1 > 0` the coupled equations never
    /// divide by zero, so `step` carries no runtime guard for it
    pub fn new(l1: f64, l2: f64, theta1: f64, theta2: f64, pivot: NVec2, m1: f64, m2: f64) -> Result<Self> {
        require_positive("l1", l1)?;
        require_positive("l2", l2)?;
        require_positive("m1", m1)?;
        require_positive("m2", m2)?;
        require_finite("theta1", theta1)?;
        require_finite("theta2", theta2)?;
        require_finite("pivot.x", pivot.x)?;
        require_finite("pivot.y", pivot.y)?;

        Ok(Self {
            theta: Vector2::new(theta1, theta2),
            omega: Vector2::zeros(),
            m1,
            m2,
            l1,
            l2,
            pivot,
            g: GRAVITY,
            method: Method::default(),
        })
    }

    pub fn with_angular_velocities(mut self, omega1: f64, omega2: f64) -> Result<Self> {
        self.omega = Vector2::new(require_finite("omega1", omega1)?, require_finite("omega2", omega2)?);
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

    /// Advance both links by `dt` seconds
    ///
    /// Both accelerations are computed from the pre-step snapshot, then
    /// link 1 and link 2 are each moved velocity-first. Rejects `dt <= 0`
    /// with `InvalidArgument` before touching any state
    pub fn step(&mut self, dt: f64) -> Result<()> {
        check_dt(dt)?;
        let dynamics = self.dynamics();
        self.method.advance(&dynamics, &mut self.theta, &mut self.omega, dt);
        Ok(())
    }

    pub fn dynamics(&self) -> DoubleLinkGravity {
        DoubleLinkGravity {
            g: self.g,
            m1: self.m1,
            m2: self.m2,
            l1: self.l1,
            l2: self.l2,
        }
    }

    pub fn theta1(&self) -> f64 {
        self.theta[0]
    }

    pub fn theta2(&self) -> f64 {
        self.theta[1]
    }

    pub fn omega1(&self) -> f64 {
        self.omega[0]
    }

    pub fn omega2(&self) -> f64 {
        self.omega[1]
    }

    /// Link lengths (L1, L2)
    pub fn lengths(&self) -> (f64, f64) {
        (self.l1, self.l2)
    }

    /// Bob masses (m1, m2)
    pub fn masses(&self) -> (f64, f64) {
        (self.m1, self.m2)
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

    pub fn bob1_position(&self) -> NVec2 {
        link_end(self.pivot, self.l1, self.theta[0])
    }

    /// Hangs off the current bob1, not the pivot
    pub fn bob2_position(&self) -> NVec2 {
        link_end(self.bob1_position(), self.l2, self.theta[1])
    }

    /// [pivot -> bob1, bob1 -> bob2]
    pub fn rod_endpoints(&self) -> [Segment; 2] {
        let bob1 = self.bob1_position();
        let bob2 = link_end(bob1, self.l2, self.theta[1]);
        [(self.pivot, bob1), (bob1, bob2)]
    }

    /// T = 1/2 m1 L1^2 w1^2 + 1/2 m2 (L1^2 w1^2 + L2^2 w2^2 + 2 L1 L2 w1 w2 cos(t1 - t2))
    pub fn kinetic_energy(&self) -> f64 {
        let (w1, w2) = (self.omega[0], self.omega[1]);
        let v1_sq = self.l1 * self.l1 * w1 * w1;
        let v2_sq = v1_sq
            + self.l2 * self.l2 * w2 * w2
            + 2.0 * self.l1 * self.l2 * w1 * w2 * (self.theta[0] - self.theta[1]).cos();
        0.5 * self.m1 * v1_sq + 0.5 * self.m2 * v2_sq
    }

    /// Potential energy with both bobs at rest hanging down as the zero level
    pub fn potential_energy(&self) -> f64 {
        let (c1, c2) = (self.theta[0].cos(), self.theta[1].cos());
        let h1 = self.l1 * (1.0 - c1);
        let h2 = self.l1 * (1.0 - c1) + self.l2 * (1.0 - c2);
        self.g * (self.m1 * h1 + self.m2 * h2)
    }

    pub fn energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }
}
