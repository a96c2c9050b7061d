//! Build fully-initialized pendulum scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! (`Scenario`) containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - every pendulum, each with one trail per bob and an energy monitor
//! - the current simulation time
//!
//! The scenario is the frame driver: each `step` advances every pendulum by
//! one frame and then feeds the new bob positions into their trails.

use log::debug;
use rayon::prelude::*;

use crate::configuration::config::{PendulumConfig, ScenarioConfig};
use crate::simulation::double_pendulum::DoublePendulumSim;
use crate::simulation::energy::EnergyMonitor;
use crate::simulation::engine::Engine;
use crate::simulation::error::{require_finite, require_positive, Result, SimError};
use crate::simulation::integrator::Method;
use crate::simulation::params::Parameters;
use crate::simulation::pendulum::SinglePendulumSim;
use crate::simulation::states::{NVec2, Segment};
use crate::simulation::trail::TrailBuffer;

/// Either pendulum kind behind one stepping interface
#[derive(Debug, Clone)]
pub enum Pendulum {
    Single(SinglePendulumSim),
    Double(DoublePendulumSim),
}

impl Pendulum {
    pub fn step(&mut self, dt: f64) -> Result<()> {
        match self {
            Pendulum::Single(p) => p.step(dt),
            Pendulum::Double(p) => p.step(dt),
        }
    }

    /// Bob positions, upper bob first
    pub fn bob_positions(&self) -> Vec<NVec2> {
        match self {
            Pendulum::Single(p) => vec![p.bob_position()],
            Pendulum::Double(p) => vec![p.bob1_position(), p.bob2_position()],
        }
    }

    pub fn rod_endpoints(&self) -> Vec<Segment> {
        match self {
            Pendulum::Single(p) => vec![p.rod_endpoints()],
            Pendulum::Double(p) => p.rod_endpoints().to_vec(),
        }
    }

    pub fn energy(&self) -> f64 {
        match self {
            Pendulum::Single(p) => p.energy(),
            Pendulum::Double(p) => p.energy(),
        }
    }
}

/// A pendulum together with the trails of its bobs
#[derive(Debug, Clone)]
pub struct TrackedPendulum {
    pub pendulum: Pendulum,
    pub trails: Vec<TrailBuffer>, // one per bob, same order as `bob_positions`
    pub monitor: EnergyMonitor,
}

impl TrackedPendulum {
    /// Trails start at the bobs' initial positions
    pub fn new(pendulum: Pendulum, trail_capacity: usize) -> Result<Self> {
        let trails = pendulum
            .bob_positions()
            .into_iter()
            .map(|bob| TrailBuffer::seeded(trail_capacity, bob))
            .collect::<Result<Vec<_>>>()?;
        let monitor = EnergyMonitor::new(pendulum.energy());

        Ok(Self { pendulum, trails, monitor })
    }

    /// Run `sub_steps` integrator steps of `dt`, then record the frame
    pub fn advance(&mut self, dt: f64, sub_steps: u32) -> Result<()> {
        for _ in 0..sub_steps.max(1) {
            self.pendulum.step(dt)?;
        }
        for (trail, bob) in self.trails.iter_mut().zip(self.pendulum.bob_positions()) {
            trail.push(bob);
        }
        self.monitor.observe(self.pendulum.energy());
        Ok(())
    }
}

/// Runtime bundle built from a [`ScenarioConfig`]
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub pendulums: Vec<TrackedPendulum>,
    pub t: f64,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            t_end: require_finite("t_end", p_cfg.t_end)?,
            dt: require_positive("dt", p_cfg.dt)?,
            sub_steps: p_cfg.sub_steps,
            g: require_finite("g", p_cfg.g)?,
            drift_warn: p_cfg.drift_warn,
        };
        if parameters.sub_steps == 0 {
            return Err(SimError::InvalidConfiguration("sub_steps must be >= 1".into()));
        }

        // Engine (runtime) from EngineConfig
        let engine = Engine::from(&cfg.engine);

        // Pendulums: expand fans, then attach trails
        let mut pendulums = Vec::new();
        for pc in &cfg.pendulums {
            pendulums.extend(build_pendulums(pc, &parameters, engine.integrator)?);
        }
        debug!("built scenario with {} pendulums, integrator {:?}", pendulums.len(), engine.integrator);

        Ok(Self {
            engine,
            parameters,
            pendulums,
            t: 0.0,
        })
    }

    /// Advance every pendulum by one frame
    pub fn step(&mut self) -> Result<()> {
        if self.engine.parallel {
            self.step_parallel()
        } else {
            self.step_sequential()
        }
    }

    pub fn step_sequential(&mut self) -> Result<()> {
        let dt = self.parameters.sub_dt();
        let n = self.parameters.sub_steps;
        for p in self.pendulums.iter_mut() {
            p.advance(dt, n)?;
        }
        self.t += self.parameters.dt;
        Ok(())
    }

    /// Pendulums share no mutable state, so each one can run on its own
    /// worker; steps within one pendulum stay sequential
    pub fn step_parallel(&mut self) -> Result<()> {
        let dt = self.parameters.sub_dt();
        let n = self.parameters.sub_steps;
        self.pendulums.par_iter_mut().try_for_each(|p| p.advance(dt, n))?;
        self.t += self.parameters.dt;
        Ok(())
    }

    /// Step until `t_end`, returning the number of frames taken
    pub fn run(&mut self) -> Result<usize> {
        let frames = self.parameters.frames();
        for _ in 0..frames {
            self.step()?;
        }
        Ok(frames)
    }
}

/// Expand one config entry into `copies` pendulums
/// Copy `i` is offset by `i * spread / copies` in its start angle (single)
/// or its lower link angle (double)
fn build_pendulums(pc: &PendulumConfig, params: &Parameters, method: Method) -> Result<Vec<TrackedPendulum>> {
    let copies = match pc {
        PendulumConfig::Single { copies, .. } | PendulumConfig::Double { copies, .. } => *copies,
    };
    if copies == 0 {
        return Err(SimError::InvalidConfiguration("copies must be >= 1".into()));
    }

    let mut out = Vec::with_capacity(copies);
    for i in 0..copies {
        let tracked = match *pc {
            PendulumConfig::Single { length, start_angle, pivot, mass, omega, trail, spread, .. } => {
                let offset = i as f64 * spread / copies as f64;
                let sim = SinglePendulumSim::new(length, start_angle + offset, NVec2::new(pivot[0], pivot[1]), mass)?
                    .with_angular_velocity(omega)?
                    .with_gravity(params.g)?
                    .with_method(method);
                TrackedPendulum::new(Pendulum::Single(sim), trail)?
            }
            PendulumConfig::Double { l1, l2, theta1, theta2, pivot, m1, m2, omega1, omega2, trail, spread, .. } => {
                let offset = i as f64 * spread / copies as f64;
                let sim = DoublePendulumSim::new(l1, l2, theta1, theta2 + offset, NVec2::new(pivot[0], pivot[1]), m1, m2)?
                    .with_angular_velocities(omega1, omega2)?
                    .with_gravity(params.g)?
                    .with_method(method);
                TrackedPendulum::new(Pendulum::Double(sim), trail)?
            }
        };
        out.push(tracked);
    }
    Ok(out)
}
