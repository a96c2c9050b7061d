pub mod states;
pub mod params;
pub mod engine;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod pendulum;
pub mod double_pendulum;
pub mod trail;
pub mod energy;
pub mod scenario;
