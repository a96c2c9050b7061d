//! Configuration types for loading pendulum scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integrator choice and parallel stepping
//! - [`ParametersConfig`] – frame timing and physical constants
//! - [`PendulumConfig`]   – initial state for each pendulum (single or double)
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! A double pendulum plus a fan of seven single pendulums:
//!
//! ```yaml
//! engine:
//!   integrator: "euler"     # or "rk4"
//!   parallel: false
//!
//! parameters:
//!   t_end: 30.0             # total simulation time
//!   dt: 0.0333333           # frame step
//!   sub_steps: 1            # integrator steps per frame
//!   g: 9.81                 # gravitational acceleration
//!
//! pendulums:
//!   - kind: double
//!     l1: 2.0
//!     l2: 2.0
//!     theta1: 1.5707963
//!     theta2: 1.5707963
//!     pivot: [0.0, 2.0]
//!     trail: 20
//!   - kind: single
//!     length: 2.0
//!     start_angle: 1.0471976
//!     pivot: [0.0, 2.0]
//!     copies: 7             # one pendulum per start angle
//!     spread: 0.1           # copy i starts at start_angle + i * spread / copies
//! ```
//!
//! The scenario builder maps this configuration into runtime pendulums and
//! trails, validating every value on the way.

use serde::Deserialize;

use crate::simulation::params::GRAVITY;
use crate::simulation::trail::DEFAULT_TRAIL_CAPACITY;

/// Which integrator method used by the engine
/// integrator: "euler"` or `integrator: "rk4"
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorConfig {
    #[default]
    #[serde(rename = "euler")] // Semi-implicit Euler, reproduces the reference trajectories
    Euler,

    #[serde(rename = "rk4")] // Classical 4th-order Runge–Kutta, higher local accuracy per step but not symplectic
    Rk4,
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub integrator: IntegratorConfig, // Time integrator used for every pendulum
    #[serde(default)]
    pub parallel: bool, // `true` - step independent pendulums on the rayon pool
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64, // time end
    pub dt: f64, // frame step size
    #[serde(default = "default_sub_steps")]
    pub sub_steps: u32, // integrator steps per frame
    #[serde(default = "default_g")]
    pub g: f64, // gravitational acceleration
    #[serde(default = "default_drift_warn")]
    pub drift_warn: f64, // warn when relative energy drift exceeds this
}

/// Initial state of one pendulum (or a fan of copies of it)
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PendulumConfig {
    Single {
        length: f64,
        #[serde(default)]
        start_angle: f64,
        #[serde(default = "default_pivot")]
        pivot: [f64; 2],
        #[serde(default = "default_mass")]
        mass: f64,
        #[serde(default)]
        omega: f64,
        #[serde(default = "default_trail")]
        trail: usize,
        #[serde(default = "default_copies")]
        copies: usize,
        #[serde(default)]
        spread: f64, // total angle range covered by the copies' start angles
    },
    Double {
        #[serde(default = "default_link")]
        l1: f64,
        #[serde(default = "default_link")]
        l2: f64,
        #[serde(default)]
        theta1: f64,
        #[serde(default)]
        theta2: f64,
        #[serde(default = "default_pivot")]
        pivot: [f64; 2],
        #[serde(default = "default_mass")]
        m1: f64,
        #[serde(default = "default_mass")]
        m2: f64,
        #[serde(default)]
        omega1: f64,
        #[serde(default)]
        omega2: f64,
        #[serde(default = "default_trail")]
        trail: usize,
        #[serde(default = "default_copies")]
        copies: usize,
        #[serde(default)]
        spread: f64, // total range covered by the copies' theta2
    },
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // Engine-level configuration
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    pub pendulums: Vec<PendulumConfig>, // Pendulums that define the initial state of the scene
}

impl ScenarioConfig {
    pub fn from_yaml_str(src: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(src)
    }
}

fn default_sub_steps() -> u32 {
    1
}

fn default_g() -> f64 {
    GRAVITY
}

fn default_drift_warn() -> f64 {
    0.05
}

fn default_pivot() -> [f64; 2] {
    [0.0, 2.0]
}

fn default_mass() -> f64 {
    1.0
}

fn default_link() -> f64 {
    2.0
}

fn default_trail() -> usize {
    DEFAULT_TRAIL_CAPACITY
}

fn default_copies() -> usize {
    1
}
