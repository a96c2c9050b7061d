//! Error types for the pendulum simulations

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Raised at construction: non-positive length/mass/capacity, non-finite input
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Raised by `step` for a non-positive or non-finite time step
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Reject anything that is not a finite, strictly positive value
pub(crate) fn require_positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidConfiguration(format!("{name} must be finite and > 0, got {value}")))
    }
}

/// Reject NaN/inf, any sign allowed (angles, angular velocities, pivot coordinates)
pub(crate) fn require_finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::InvalidConfiguration(format!("{name} must be finite, got {value}")))
    }
}

/// Time step precondition shared by every `step`
pub(crate) fn check_dt(dt: f64) -> Result<()> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidArgument(format!("dt must be finite and > 0, got {dt}")))
    }
}
