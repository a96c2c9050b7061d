//! High-level runtime engine settings
//!
//! Selects the integrator and whether independent pendulums are stepped
//! in parallel when running a `Scenario`

use crate::configuration::config::EngineConfig;
use crate::simulation::integrator::Method;

#[derive(Debug, Clone, Default)]
pub struct Engine {
    pub integrator: Method, // semi-implicit euler or rk4
    pub parallel: bool, // false = sequential, true = rayon across pendulums
}

impl From<&EngineConfig> for Engine {
    fn from(cfg: &EngineConfig) -> Self {
        Self {
            integrator: cfg.integrator.into(),
            parallel: cfg.parallel,
        }
    }
}
