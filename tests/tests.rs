use std::f64::consts::{FRAC_PI_2, PI};

use pendsim::simulation::double_pendulum::DoublePendulumSim;
use pendsim::simulation::error::SimError;
use pendsim::simulation::integrator::Method;
use pendsim::simulation::pendulum::SinglePendulumSim;
use pendsim::simulation::scenario::{Pendulum, Scenario};
use pendsim::simulation::states::NVec2;
use pendsim::simulation::trail::TrailBuffer;
use pendsim::configuration::config::{IntegratorConfig, PendulumConfig, ScenarioConfig};

const G: f64 = 9.81;

/// Default pivot used by the reference scenes
pub fn pivot() -> NVec2 {
    NVec2::new(0.0, 2.0)
}

/// Build a unit-mass single pendulum at rest
pub fn single(length: f64, angle: f64) -> SinglePendulumSim {
    SinglePendulumSim::new(length, angle, pivot(), 1.0).unwrap()
}

/// Build a double pendulum with 2.0 links and unit masses at rest
pub fn double(theta1: f64, theta2: f64) -> DoublePendulumSim {
    DoublePendulumSim::new(2.0, 2.0, theta1, theta2, pivot(), 1.0, 1.0).unwrap()
}

/// Reference coupled accelerations, written out term by term
fn reference_accels(p: &DoublePendulumSim) -> (f64, f64) {
    let (t1, t2, w1, w2) = (p.theta1(), p.theta2(), p.omega1(), p.omega2());
    let (m1, m2) = p.masses();
    let (l1, l2) = p.lengths();

    let den = 2.0 * m1 + m2 - m2 * (2.0 * t1 - 2.0 * t2).cos();
    let num1 = -G * (2.0 * m1 + m2) * t1.sin()
        - m2 * G * (t1 - 2.0 * t2).sin()
        - 2.0 * (t1 - t2).sin() * m2 * (w2.powi(2) * l2 + w1.powi(2) * l1 * (t1 - t2).cos());
    let num2 = 2.0 * (t1 - t2).sin()
        * (w1.powi(2) * l1 * (m1 + m2) + G * (m1 + m2) * t1.cos() + w2.powi(2) * l2 * m2 * (t1 - t2).cos());

    (num1 / (l1 * den), num2 / (l2 * den))
}

const SCENARIO_YAML: &str = r#"
engine:
  integrator: "euler"
parameters:
  t_end: 2.0
  dt: 0.0333333333
pendulums:
  - kind: single
    length: 2.0
    start_angle: 1.0471975512
    copies: 7
    spread: 0.1
  - kind: double
    theta1: 1.5707963268
    theta2: 1.5707963268
    trail: 50
"#;

// ==================================================================================
// Single pendulum tests
// ==================================================================================

#[test]
fn single_first_step_matches_hand_computation() {
    let mut p = single(2.0, FRAC_PI_2);
    let dt = 1.0 / 30.0;
    p.step(dt).unwrap();

    let omega = -(G / 2.0) * FRAC_PI_2.sin() * dt;
    assert_eq!(p.angular_velocity(), omega);
    assert_eq!((p.angular_velocity() * 1e4).round() / 1e4, -0.1635);
    assert!((p.angle() - (FRAC_PI_2 + omega * dt)).abs() < 1e-15);
    assert_eq!((p.angle() * 1e4).round() / 1e4, 1.5653);
}

#[test]
fn single_bob_stays_on_circle() {
    for &(length, angle) in &[(0.5, 0.3), (2.0, FRAC_PI_2), (3.0, 3.0), (1.0, -2.5)] {
        let mut p = single(length, angle);
        for _ in 0..10_000 {
            p.step(1.0 / 240.0).unwrap();
            let r = (p.bob_position() - p.pivot()).norm();
            assert!((r - length).abs() < 1e-9, "rod length drifted: {} vs {}", r, length);
        }
    }
}

#[test]
fn single_rod_endpoints_follow_bob() {
    let mut p = single(2.0, 1.0);
    p.step(0.01).unwrap();
    let (a, b) = p.rod_endpoints();
    assert_eq!(a, p.pivot());
    assert_eq!(b, p.bob_position());
}

#[test]
fn single_small_angle_energy_stays_bounded() {
    let mut p = single(1.0, 0.01);
    let e0 = p.energy();
    let mut worst: f64 = 0.0;
    for _ in 0..1000 {
        p.step(1.0 / 240.0).unwrap();
        worst = worst.max((p.energy() - e0).abs() / e0);
    }
    assert!(worst < 0.02, "energy drift too large: {}", worst);
}

#[test]
fn single_is_deterministic() {
    let mut a = single(2.0, 1.2);
    let mut b = single(2.0, 1.2);
    let dts = [1.0 / 30.0, 1.0 / 60.0, 1.0 / 240.0, 0.02];
    for i in 0..4000 {
        let dt = dts[i % dts.len()];
        a.step(dt).unwrap();
        b.step(dt).unwrap();
        assert_eq!(a.angle(), b.angle());
        assert_eq!(a.angular_velocity(), b.angular_velocity());
    }
}

#[test]
fn single_rejects_bad_construction() {
    assert!(matches!(SinglePendulumSim::new(0.0, 0.1, pivot(), 1.0), Err(SimError::InvalidConfiguration(_))));
    assert!(matches!(SinglePendulumSim::new(-1.0, 0.1, pivot(), 1.0), Err(SimError::InvalidConfiguration(_))));
    assert!(matches!(SinglePendulumSim::new(1.0, 0.1, pivot(), 0.0), Err(SimError::InvalidConfiguration(_))));
    assert!(matches!(SinglePendulumSim::new(1.0, f64::NAN, pivot(), 1.0), Err(SimError::InvalidConfiguration(_))));
}

#[test]
fn single_rejects_non_positive_dt_without_mutation() {
    let mut p = single(2.0, 1.0).with_angular_velocity(0.5).unwrap();
    for dt in [0.0, -0.01, f64::NAN] {
        let err = p.step(dt).unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument(_)));
        assert_eq!(p.angle(), 1.0);
        assert_eq!(p.angular_velocity(), 0.5);
    }
}

#[test]
fn single_at_rest_stays_at_rest() {
    let mut p = single(2.0, 0.0);
    for _ in 0..100 {
        p.step(1.0 / 30.0).unwrap();
    }
    assert_eq!(p.angle(), 0.0);
    assert!(p.bob_position().norm() < 1e-12);
}

// ==================================================================================
// Double pendulum tests
// ==================================================================================

#[test]
fn double_starts_at_rest_with_stacked_bobs() {
    let p = double(0.0, 0.0);
    assert_eq!(p.omega1(), 0.0);
    assert_eq!(p.omega2(), 0.0);
    assert!((p.bob1_position() - NVec2::new(0.0, 0.0)).norm() < 1e-12);
    assert!((p.bob2_position() - NVec2::new(0.0, -2.0)).norm() < 1e-12);
}

#[test]
fn double_first_step_from_horizontal() {
    // theta1 = theta2 = pi/2: acc1 = -g/2, acc2 = 0
    let mut p = double(FRAC_PI_2, FRAC_PI_2);
    let dt = 1.0 / 30.0;
    p.step(dt).unwrap();

    assert!((p.omega1() - (-G / 2.0) * dt).abs() < 1e-12);
    assert!(p.omega2().abs() < 1e-12);
    assert!((p.theta1() - (FRAC_PI_2 + p.omega1() * dt)).abs() < 1e-12);
    assert!((p.theta2() - FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn double_uses_pre_step_snapshot_for_both_links() {
    let mut p = DoublePendulumSim::new(1.2, 0.9, 0.4, 1.1, pivot(), 1.5, 0.8)
        .unwrap()
        .with_angular_velocities(1.3, -0.7)
        .unwrap();
    let dt = 0.01;

    let (acc1, acc2) = reference_accels(&p);
    let w1 = p.omega1() + acc1 * dt;
    let w2 = p.omega2() + acc2 * dt;
    let t1 = p.theta1() + w1 * dt;
    let t2 = p.theta2() + w2 * dt;

    p.step(dt).unwrap();
    assert!((p.omega1() - w1).abs() < 1e-12);
    assert!((p.omega2() - w2).abs() < 1e-12);
    assert!((p.theta1() - t1).abs() < 1e-12);
    assert!((p.theta2() - t2).abs() < 1e-12);
}

#[test]
fn double_links_keep_their_lengths() {
    let configs = [
        (2.0, 2.0, FRAC_PI_2, FRAC_PI_2, 1.0, 1.0),
        (1.0, 0.5, 2.5, -1.0, 2.0, 0.3),
        (0.7, 1.9, 0.1, 2.0, 1.0, 2.0),
    ];
    for &(l1, l2, t1, t2, m1, m2) in &configs {
        let mut p = DoublePendulumSim::new(l1, l2, t1, t2, pivot(), m1, m2).unwrap();
        for _ in 0..10_000 {
            p.step(1.0 / 240.0).unwrap();
            let b1 = p.bob1_position();
            let b2 = p.bob2_position();
            assert!(((b1 - p.pivot()).norm() - l1).abs() < 1e-9);
            assert!(((b2 - b1).norm() - l2).abs() < 1e-9);
        }
    }
}

#[test]
fn double_rod_endpoints_chain() {
    let mut p = double(1.0, -0.5);
    p.step(0.02).unwrap();
    let [(a0, a1), (b0, b1)] = p.rod_endpoints();
    assert_eq!(a0, p.pivot());
    assert_eq!(a1, p.bob1_position());
    assert_eq!(b0, a1);
    assert_eq!(b1, p.bob2_position());
}

#[test]
fn double_is_sensitive_to_initial_conditions() {
    let mut a = double(FRAC_PI_2, FRAC_PI_2);
    let mut b = double(FRAC_PI_2, FRAC_PI_2 + 1e-6);
    let dt = 1.0 / 240.0;

    let mut diverged_at = None;
    for step in 0..60_000 {
        a.step(dt).unwrap();
        b.step(dt).unwrap();
        if (a.bob2_position() - b.bob2_position()).norm() > 0.1 {
            diverged_at = Some(step);
            break;
        }
    }
    assert!(diverged_at.is_some(), "trajectories never separated");
}

#[test]
fn double_rejects_bad_construction() {
    assert!(matches!(DoublePendulumSim::new(0.0, 1.0, 0.0, 0.0, pivot(), 1.0, 1.0), Err(SimError::InvalidConfiguration(_))));
    assert!(matches!(DoublePendulumSim::new(1.0, -1.0, 0.0, 0.0, pivot(), 1.0, 1.0), Err(SimError::InvalidConfiguration(_))));
    assert!(matches!(DoublePendulumSim::new(1.0, 1.0, 0.0, 0.0, pivot(), 0.0, 1.0), Err(SimError::InvalidConfiguration(_))));
    assert!(matches!(DoublePendulumSim::new(1.0, 1.0, 0.0, 0.0, pivot(), 1.0, -2.0), Err(SimError::InvalidConfiguration(_))));
}

#[test]
fn double_rejects_non_positive_dt_without_mutation() {
    let mut p = double(1.0, 2.0).with_angular_velocities(0.3, -0.4).unwrap();
    assert!(matches!(p.step(0.0), Err(SimError::InvalidArgument(_))));
    assert!(matches!(p.step(-1.0 / 30.0), Err(SimError::InvalidArgument(_))));
    assert_eq!((p.theta1(), p.theta2()), (1.0, 2.0));
    assert_eq!((p.omega1(), p.omega2()), (0.3, -0.4));
}

#[test]
fn double_energy_is_zero_hanging_at_rest() {
    let p = double(0.0, 0.0);
    assert!(p.energy().abs() < 1e-12);
    let q = double(PI, PI);
    // both bobs raised: m1 g 2 L1 + m2 g (2 L1 + 2 L2)
    assert!((q.potential_energy() - G * (4.0 + 8.0)).abs() < 1e-9);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn rk4_conserves_energy_better_than_euler() {
    let dt = 1.0 / 60.0;
    let mut euler = single(1.0, 1.0);
    let mut rk = single(1.0, 1.0).with_method(Method::Rk4);
    let e0 = euler.energy();
    let (mut euler_drift, mut rk_drift): (f64, f64) = (0.0, 0.0);
    for _ in 0..1000 {
        euler.step(dt).unwrap();
        rk.step(dt).unwrap();
        euler_drift = euler_drift.max((euler.energy() - e0).abs() / e0);
        rk_drift = rk_drift.max((rk.energy() - e0).abs() / e0);
    }
    assert!(rk_drift < 1e-4, "rk4 drift {}", rk_drift);
    assert!(rk_drift < euler_drift);
}

#[test]
fn rk4_keeps_double_geometry() {
    let mut p = double(FRAC_PI_2, FRAC_PI_2).with_method(Method::Rk4);
    for _ in 0..2000 {
        p.step(1.0 / 240.0).unwrap();
    }
    let b1 = p.bob1_position();
    assert!(((b1 - p.pivot()).norm() - 2.0).abs() < 1e-9);
    assert!(((p.bob2_position() - b1).norm() - 2.0).abs() < 1e-9);
}

// ==================================================================================
// Trail buffer tests
// ==================================================================================

#[test]
fn trail_never_exceeds_capacity_plus_one() {
    let mut trail = TrailBuffer::new(5).unwrap();
    for i in 0..100 {
        trail.push(NVec2::new(i as f64, 0.0));
        assert!(trail.len() <= 6);
    }
    // settles at capacity + 1, keeping the newest points
    assert_eq!(trail.len(), 6);
    let xs: Vec<f64> = trail.points().map(|p| p.x).collect();
    assert_eq!(xs, vec![94.0, 95.0, 96.0, 97.0, 98.0, 99.0]);
}

#[test]
fn trail_skips_repeated_point() {
    let mut trail = TrailBuffer::new(10).unwrap();
    let p = NVec2::new(1.0, 2.0);
    trail.push(p);
    trail.push(p);
    assert_eq!(trail.len(), 1);
    trail.push(NVec2::new(1.0, 2.5));
    trail.push(p);
    assert_eq!(trail.len(), 3);
}

#[test]
fn trail_segments_connect_neighbours_in_order() {
    let mut trail = TrailBuffer::new(3).unwrap();
    assert_eq!(trail.segments().count(), 0);
    for i in 0..10 {
        trail.push(NVec2::new(i as f64, (i * i) as f64));
        let segs: Vec<_> = trail.segments().collect();
        assert_eq!(segs.len(), trail.len() - 1);
        let pts: Vec<NVec2> = trail.points().copied().collect();
        for (k, (a, b)) in segs.iter().enumerate() {
            assert_eq!(*a, pts[k]);
            assert_eq!(*b, pts[k + 1]);
            assert!(b.x > a.x);
        }
    }
}

#[test]
fn trail_rejects_zero_capacity() {
    assert!(matches!(TrailBuffer::new(0), Err(SimError::InvalidConfiguration(_))));
    assert!(TrailBuffer::seeded(0, NVec2::zeros()).is_err());
}

#[test]
fn trail_default_and_seeded() {
    let trail = TrailBuffer::default();
    assert_eq!(trail.capacity(), 20);
    assert!(trail.is_empty());

    let mut seeded = TrailBuffer::seeded(20, NVec2::new(0.5, 0.5)).unwrap();
    assert_eq!(seeded.len(), 1);
    seeded.push(NVec2::new(0.5, 0.5));
    assert_eq!(seeded.len(), 1);
    assert_eq!(seeded.last(), Some(&NVec2::new(0.5, 0.5)));
    seeded.clear();
    assert!(seeded.is_empty());
}

#[test]
fn trail_follows_motionless_bob_without_growing() {
    let mut p = single(2.0, 0.0);
    let mut trail = TrailBuffer::seeded(20, p.bob_position()).unwrap();
    for _ in 0..50 {
        p.step(1.0 / 30.0).unwrap();
        trail.push(p.bob_position());
    }
    assert_eq!(trail.len(), 1);
}

// ==================================================================================
// Scenario / configuration tests
// ==================================================================================

#[test]
fn scenario_parses_and_expands_fans() {
    let cfg = ScenarioConfig::from_yaml_str(SCENARIO_YAML).unwrap();
    assert_eq!(cfg.engine.integrator, IntegratorConfig::Euler);
    assert_eq!(cfg.pendulums.len(), 2);
    assert!(matches!(cfg.pendulums[1], PendulumConfig::Double { trail: 50, .. }));

    let scenario = Scenario::build_scenario(cfg).unwrap();
    assert_eq!(scenario.pendulums.len(), 8);
    assert_eq!(scenario.parameters.sub_steps, 1);
    assert_eq!(scenario.parameters.g, 9.81);

    for (i, tracked) in scenario.pendulums.iter().take(7).enumerate() {
        match &tracked.pendulum {
            Pendulum::Single(p) => {
                let expected = 1.0471975512 + i as f64 * 0.1 / 7.0;
                assert!((p.angle() - expected).abs() < 1e-12);
                assert_eq!(tracked.trails.len(), 1);
                assert_eq!(tracked.trails[0].capacity(), 20);
            }
            Pendulum::Double(_) => panic!("expected single pendulum at {i}"),
        }
    }
    assert_eq!(scenario.pendulums[7].trails.len(), 2);
}

#[test]
fn scenario_step_feeds_trails() {
    let cfg = ScenarioConfig::from_yaml_str(SCENARIO_YAML).unwrap();
    let mut scenario = Scenario::build_scenario(cfg).unwrap();
    let frames = scenario.run().unwrap();
    assert_eq!(frames, 60);
    assert!((scenario.t - 2.0).abs() < 1e-6);

    for tracked in &scenario.pendulums {
        let bobs = tracked.pendulum.bob_positions();
        for (trail, bob) in tracked.trails.iter().zip(bobs.iter()) {
            assert_eq!(trail.last(), Some(bob));
            assert!(trail.len() <= trail.capacity() + 1);
        }
    }
}

#[test]
fn scenario_parallel_matches_sequential() {
    let cfg = ScenarioConfig::from_yaml_str(SCENARIO_YAML).unwrap();
    let mut seq = Scenario::build_scenario(cfg.clone()).unwrap();
    let mut par = Scenario::build_scenario(cfg).unwrap();
    for _ in 0..100 {
        seq.step_sequential().unwrap();
        par.step_parallel().unwrap();
    }
    for (a, b) in seq.pendulums.iter().zip(par.pendulums.iter()) {
        assert_eq!(a.pendulum.bob_positions(), b.pendulum.bob_positions());
    }
}

#[test]
fn scenario_sub_steps_split_the_frame() {
    let yaml = r#"
engine:
  integrator: "rk4"
parameters:
  t_end: 1.0
  dt: 0.04
  sub_steps: 4
pendulums:
  - kind: single
    length: 1.5
    start_angle: 0.8
"#;
    let mut scenario = Scenario::build_scenario(ScenarioConfig::from_yaml_str(yaml).unwrap()).unwrap();
    let mut reference = SinglePendulumSim::new(1.5, 0.8, pivot(), 1.0).unwrap().with_method(Method::Rk4);

    scenario.step().unwrap();
    for _ in 0..4 {
        reference.step(0.01).unwrap();
    }
    match &scenario.pendulums[0].pendulum {
        Pendulum::Single(p) => {
            assert_eq!(p.method(), Method::Rk4);
            assert_eq!(p.angle(), reference.angle());
        }
        Pendulum::Double(_) => panic!("expected single pendulum"),
    }
}

#[test]
fn scenario_rejects_invalid_values() {
    let bad_dt = SCENARIO_YAML.replace("dt: 0.0333333333", "dt: 0.0");
    let cfg = ScenarioConfig::from_yaml_str(&bad_dt).unwrap();
    assert!(matches!(Scenario::build_scenario(cfg), Err(SimError::InvalidConfiguration(_))));

    let bad_copies = SCENARIO_YAML.replace("copies: 7", "copies: 0");
    let cfg = ScenarioConfig::from_yaml_str(&bad_copies).unwrap();
    assert!(Scenario::build_scenario(cfg).is_err());

    let bad_trail = SCENARIO_YAML.replace("trail: 50", "trail: 0");
    let cfg = ScenarioConfig::from_yaml_str(&bad_trail).unwrap();
    assert!(Scenario::build_scenario(cfg).is_err());

    let bad_length = SCENARIO_YAML.replace("length: 2.0", "length: -2.0");
    let cfg = ScenarioConfig::from_yaml_str(&bad_length).unwrap();
    assert!(Scenario::build_scenario(cfg).is_err());
}

#[test]
fn scenario_monitors_energy() {
    let cfg = ScenarioConfig::from_yaml_str(SCENARIO_YAML).unwrap();
    let mut scenario = Scenario::build_scenario(cfg).unwrap();
    let baseline = scenario.pendulums[0].monitor.baseline();
    assert!((baseline - scenario.pendulums[0].pendulum.energy()).abs() < 1e-12);
    scenario.run().unwrap();
    assert!(scenario.pendulums[0].monitor.max_drift() > 0.0);
}
