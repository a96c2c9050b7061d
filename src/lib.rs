pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{NVec2, Segment, link_end};
pub use simulation::error::{SimError, Result};
pub use simulation::params::{Parameters, GRAVITY};
pub use simulation::forces::{AngularDynamics, SingleLinkGravity, DoubleLinkGravity};
pub use simulation::integrator::{Method, semi_implicit_euler, rk4};
pub use simulation::pendulum::SinglePendulumSim;
pub use simulation::double_pendulum::DoublePendulumSim;
pub use simulation::trail::{TrailBuffer, DEFAULT_TRAIL_CAPACITY};
pub use simulation::energy::EnergyMonitor;
pub use simulation::scenario::{Scenario, Pendulum, TrackedPendulum};

pub use configuration::config::{IntegratorConfig, EngineConfig, ParametersConfig, PendulumConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_step, bench_drift_curve};
