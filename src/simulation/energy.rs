//! Energy drift monitoring
//!
//! Neither integrator conserves mechanical energy exactly. `EnergyMonitor`
//! remembers the energy at construction and reports how far later samples
//! have moved away from it.

#[derive(Debug, Clone)]
pub struct EnergyMonitor {
    baseline: f64,
    max_drift: f64, // largest relative drift seen so far
}

impl EnergyMonitor {
    pub fn new(baseline: f64) -> Self {
        Self { baseline, max_drift: 0.0 }
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Relative drift |E - E0| / |E0| (absolute when E0 is ~0)
    pub fn drift(&self, energy: f64) -> f64 {
        let diff = (energy - self.baseline).abs();
        if self.baseline.abs() > 1e-12 {
            diff / self.baseline.abs()
        } else {
            diff
        }
    }

    /// Record a sample and return its drift
    pub fn observe(&mut self, energy: f64) -> f64 {
        let drift = self.drift(energy);
        if drift > self.max_drift || drift.is_nan() {
            self.max_drift = drift;
        }
        drift
    }

    pub fn max_drift(&self) -> f64 {
        self.max_drift
    }
}
