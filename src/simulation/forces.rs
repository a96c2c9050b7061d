//! Angular acceleration terms for the pendulum systems
//!
//! Defines the [`AngularDynamics`] trait consumed by the integrators, plus
//! the gravity-driven equations of motion for a single link and for the
//! coupled two-link pendulum

use nalgebra::{SVector, Vector1, Vector2};

/// Equations of motion for `N` angular degrees of freedom
/// Implementations return the angular accelerations for the given state
/// and must not depend on anything mutated during a step
pub trait AngularDynamics<const N: usize> {
    fn accelerations(&self, theta: &SVector<f64, N>, omega: &SVector<f64, N>) -> SVector<f64, N>;
}

/// Gravity on a single rigid link (point mass on a massless rod)
#[derive(Debug, Clone, Copy)]
pub struct SingleLinkGravity {
    pub g: f64, // gravitational acceleration
    pub length: f64, // rod length
}

impl AngularDynamics<1> for SingleLinkGravity {
    fn accelerations(&self, theta: &Vector1<f64>, _omega: &Vector1<f64>) -> Vector1<f64> {
        // alpha = -(g / L) * sin(theta)
        Vector1::new(-(self.g / self.length) * theta[0].sin())
    }
}

/// Gravity on two coupled point-mass links (Lagrangian double pendulum)
///
/// The shared denominator `2*m1 + m2 - m2*cos(2*theta1 - 2*theta2)` is at
/// least `2*m1` for every angle pair, so it stays away from zero as long as
/// `m1 > 0` (checked when the pendulum is built)
#[derive(Debug, Clone, Copy)]
pub struct DoubleLinkGravity {
    pub g: f64,
    pub m1: f64, // upper bob mass
    pub m2: f64, // lower bob mass
    pub l1: f64, // upper link length
    pub l2: f64, // lower link length
}

impl AngularDynamics<2> for DoubleLinkGravity {
    fn accelerations(&self, theta: &Vector2<f64>, omega: &Vector2<f64>) -> Vector2<f64> {
        let DoubleLinkGravity { g, m1, m2, l1, l2 } = *self;
        let (t1, t2) = (theta[0], theta[1]);
        let (w1, w2) = (omega[0], omega[1]);

        let delta = t1 - t2;
        let (sin_d, cos_d) = delta.sin_cos();
        let mass_term = 2.0 * m1 + m2 - m2 * (2.0 * t1 - 2.0 * t2).cos();

        // upper link
        let den1 = l1 * mass_term;
        let acc1 = (-g * (2.0 * m1 + m2) * t1.sin()
            - m2 * g * (t1 - 2.0 * t2).sin()
            - 2.0 * sin_d * m2 * (w2 * w2 * l2 + w1 * w1 * l1 * cos_d))
            / den1;

        // lower link
        let den2 = l2 * mass_term;
        let acc2 = (2.0 * sin_d
            * (w1 * w1 * l1 * (m1 + m2)
                + g * (m1 + m2) * t1.cos()
                + w2 * w2 * l2 * m2 * cos_d))
            / den2;

        Vector2::new(acc1, acc2)
    }
}
