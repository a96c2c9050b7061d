//! Numerical and physical parameters for a scenario
//!
//! `Parameters` holds runtime settings:
//! - frame step size, sub-steps per frame and end time,
//! - gravitational acceleration `g`,
//! - the relative energy drift above which the driver warns

/// Standard gravity in scene units per second squared
pub const GRAVITY: f64 = 9.81;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // time end
    pub dt: f64, // frame step size
    pub sub_steps: u32, // integrator steps per frame
    pub g: f64, // gravitational acceleration
    pub drift_warn: f64, // relative energy drift warning threshold
}

impl Parameters {
    /// Step size handed to the integrator for each sub-step
    pub fn sub_dt(&self) -> f64 {
        self.dt / self.sub_steps.max(1) as f64
    }

    /// Number of whole frames needed to reach `t_end`
    pub fn frames(&self) -> usize {
        (self.t_end / self.dt).round().max(0.0) as usize
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            t_end: 30.0,
            dt: 1.0 / 30.0,
            sub_steps: 1,
            g: GRAVITY,
            drift_warn: 0.05,
        }
    }
}
