//! Core geometric types shared by the pendulum simulations.
//!
//! - `NVec2`   2D point / vector in scene units (pivot, bob positions)
//! - `Segment` pair of endpoints, used for rods and trail pieces
//!
//! Angles are measured from the downward vertical, so angle 0 hangs straight
//! below the pivot and positive angles swing counter-clockwise.

use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Start and end point of a rod or trail piece
pub type Segment = (NVec2, NVec2);

/// Endpoint of a rigid link of `length` hanging from `origin` at `angle`
/// - end = origin + length * (cos(angle - pi/2), sin(angle - pi/2))
#[inline]
pub fn link_end(origin: NVec2, length: f64, angle: f64) -> NVec2 {
    let a = angle - FRAC_PI_2;
    origin + length * NVec2::new(a.cos(), a.sin())
}
