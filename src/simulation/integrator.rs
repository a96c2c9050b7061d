//! Fixed-step time integrators for the pendulum systems
//!
//! Both integrators advance a set of `N` angles and angular velocities
//! driven by an [`AngularDynamics`] term:
//! - semi-implicit (symplectic) Euler, the reference scheme
//! - classical 4th-order Runge–Kutta, more accurate per step but not symplectic
//!
//! Accelerations are always evaluated from a snapshot of the state taken
//! before anything is mutated.

use nalgebra::SVector;

use crate::configuration::config::IntegratorConfig;
use super::forces::AngularDynamics;

/// Integration scheme used by a pendulum's `step`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    SemiImplicitEuler,
    Rk4,
}

impl From<IntegratorConfig> for Method {
    fn from(cfg: IntegratorConfig) -> Self {
        match cfg {
            IntegratorConfig::Euler => Method::SemiImplicitEuler,
            IntegratorConfig::Rk4 => Method::Rk4,
        }
    }
}

impl Method {
    /// Advance `theta`/`omega` in place by one step of `dt`
    pub fn advance<D, const N: usize>(self, dynamics: &D, theta: &mut SVector<f64, N>, omega: &mut SVector<f64, N>, dt: f64)
    where
        D: AngularDynamics<N> + ?Sized,
    {
        match self {
            Method::SemiImplicitEuler => semi_implicit_euler(dynamics, theta, omega, dt),
            Method::Rk4 => rk4(dynamics, theta, omega, dt),
        }
    }
}

/// One semi-implicit Euler step
/// a_n = f(theta_n, omega_n)
/// omega_n+1 = omega_n + dt * a_n
/// theta_n+1 = theta_n + dt * omega_n+1   (uses the *updated* velocity)
pub fn semi_implicit_euler<D, const N: usize>(dynamics: &D, theta: &mut SVector<f64, N>, omega: &mut SVector<f64, N>, dt: f64)
where
    D: AngularDynamics<N> + ?Sized,
{
    // every link's acceleration comes from the same pre-step state
    let acc = dynamics.accelerations(theta, omega);

    for i in 0..N {
        omega[i] += acc[i] * dt;
        theta[i] += omega[i] * dt;
    }
}

/// One classical RK4 step on the first-order system
/// d(theta)/dt = omega, d(omega)/dt = f(theta, omega)
pub fn rk4<D, const N: usize>(dynamics: &D, theta: &mut SVector<f64, N>, omega: &mut SVector<f64, N>, dt: f64)
where
    D: AngularDynamics<N> + ?Sized,
{
    let half_dt = 0.5 * dt;
    let q0 = *theta;
    let w0 = *omega;

    // k1 at the start of the interval
    let k1_q = w0;
    let k1_w = dynamics.accelerations(&q0, &w0);

    // k2, k3 at the midpoint
    let q = q0 + k1_q * half_dt;
    let w = w0 + k1_w * half_dt;
    let k2_q = w;
    let k2_w = dynamics.accelerations(&q, &w);

    let q = q0 + k2_q * half_dt;
    let w = w0 + k2_w * half_dt;
    let k3_q = w;
    let k3_w = dynamics.accelerations(&q, &w);

    // k4 at the end of the interval
    let q = q0 + k3_q * dt;
    let w = w0 + k3_w * dt;
    let k4_q = w;
    let k4_w = dynamics.accelerations(&q, &w);

    let sixth = dt / 6.0;
    *theta = q0 + (k1_q + k2_q * 2.0 + k3_q * 2.0 + k4_q) * sixth;
    *omega = w0 + (k1_w + k2_w * 2.0 + k3_w * 2.0 + k4_w) * sixth;
}
