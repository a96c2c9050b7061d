use std::f64::consts::FRAC_PI_2;
use std::time::Instant;

use crate::simulation::double_pendulum::DoublePendulumSim;
use crate::simulation::error::Result;
use crate::simulation::integrator::Method;
use crate::simulation::pendulum::SinglePendulumSim;
use crate::simulation::states::NVec2;

const DT: f64 = 1.0 / 240.0;

/// Helper to build `n` double pendulums fanned out over theta2
fn make_doubles(n: usize, method: Method) -> Result<Vec<DoublePendulumSim>> {
    (0..n)
        .map(|i| -> Result<DoublePendulumSim> {
            let theta2 = FRAC_PI_2 + i as f64 * 0.1 / n as f64;
            Ok(DoublePendulumSim::new(2.0, 2.0, FRAC_PI_2, theta2, NVec2::new(0.0, 2.0), 1.0, 1.0)?.with_method(method))
        })
        .collect()
}

/// Helper to build `n` single pendulums fanned out over the start angle
fn make_singles(n: usize, method: Method) -> Result<Vec<SinglePendulumSim>> {
    (0..n)
        .map(|i| -> Result<SinglePendulumSim> {
            let angle = FRAC_PI_2 / 1.5 + i as f64 * 0.1 / n as f64;
            Ok(SinglePendulumSim::new(2.0, angle, NVec2::new(0.0, 2.0), 1.0)?.with_method(method))
        })
        .collect()
}

/// Time `steps` frames over `n` pendulums for each integrator
/// Prints microseconds per pendulum-step
pub fn bench_step() -> Result<()> {
    let ns = [1, 10, 100, 1000, 10000];
    let steps = 1000;

    for n in ns {
        let mut per_method = Vec::new();

        for method in [Method::SemiImplicitEuler, Method::Rk4] {
            let mut singles = make_singles(n, method)?;
            let mut doubles = make_doubles(n, method)?;

            let t0 = Instant::now();
            for _ in 0..steps {
                for p in singles.iter_mut() {
                    p.step(DT)?;
                }
            }
            let single_us = t0.elapsed().as_secs_f64() * 1e6 / (n * steps) as f64;

            let t1 = Instant::now();
            for _ in 0..steps {
                for p in doubles.iter_mut() {
                    p.step(DT)?;
                }
            }
            let double_us = t1.elapsed().as_secs_f64() * 1e6 / (n * steps) as f64;

            per_method.push((method, single_us, double_us));
        }

        for (method, single_us, double_us) in per_method {
            println!("N = {n:5}, {:?}: single = {:8.4} us, double = {:8.4} us", method, single_us, double_us);
        }
    }
    Ok(())
}

/// Energy drift of one double pendulum after 60 s, per integrator and step size
/// Paste output directly into a spreadsheet to graph
pub fn bench_drift_curve() -> Result<()> {
    println!("dt,euler_drift,rk4_drift");

    for k in 4..=10 {
        let dt = 1.0 / (1 << k) as f64; // 1/16 .. 1/1024
        let steps = (60.0 / dt) as usize;
        let mut drifts = [0.0; 2];

        for (slot, method) in [Method::SemiImplicitEuler, Method::Rk4].into_iter().enumerate() {
            let mut p = DoublePendulumSim::new(2.0, 2.0, FRAC_PI_2, FRAC_PI_2, NVec2::new(0.0, 2.0), 1.0, 1.0)?.with_method(method);
            let e0 = p.energy();
            for _ in 0..steps {
                p.step(dt)?;
            }
            drifts[slot] = (p.energy() - e0).abs() / e0.abs();
        }

        println!("{:.6},{:.6e},{:.6e}", dt, drifts[0], drifts[1]);
    }
    Ok(())
}
