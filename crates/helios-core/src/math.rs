//! Geometry helpers shared by the orientation, guidance, and collision code.
//!
//! Angles at this boundary are degrees (the orientation state is kept in
//! degrees); conversion to radians happens only where a matrix is built.

use glam::Vec3;

/// Component-wise tolerance used when testing two unit vectors for
/// coincidence.
const COINCIDENT_EPSILON: f32 = 1e-6;

/// Nudge applied to escape a degenerate (colinear) axis computation.
const PERTURBATION: Vec3 = Vec3::new(0.05, 0.0, 0.05);

/// Euclidean distance between two points.
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    (a - b).length()
}

/// Angle between two vectors in degrees, with the cosine clamped into
/// acos's domain so accumulated float error never produces NaN.
pub fn rotation_angle(u: Vec3, v: Vec3) -> f32 {
    let u = u.normalize_or_zero();
    let v = v.normalize_or_zero();
    let cosine = u.dot(v).clamp(-1.0, 1.0);
    cosine.acos().to_degrees()
}

/// Rotation axis taking `u` toward `v`.
///
/// When the two directions are coincident (or opposite) the cross product
/// vanishes; a perturbed copy of `v` is substituted so the caller always
/// receives a usable unit axis instead of NaN.
pub fn rotation_axis(u: Vec3, v: Vec3) -> Vec3 {
    let u = u.normalize_or_zero();
    let mut v = v.normalize_or_zero();
    if coincident(u, v) || coincident(u, -v) {
        v = (v + PERTURBATION).normalize();
    }
    // Zero-length input leaves the cross product degenerate even after
    // the perturbation; any unit axis is safe since the angle is 0 there.
    u.cross(v).try_normalize().unwrap_or(Vec3::Y)
}

/// Rotate `v` by `degrees` about `axis` (Rodrigues' formula). Positive
/// angles sweep clockwise when sighting down the axis.
pub fn rotate_about(v: Vec3, axis: Vec3, degrees: f32) -> Vec3 {
    let axis = axis.normalize_or_zero();
    let radians = degrees.to_radians();
    let (s, c) = radians.sin_cos();
    v * c + axis * axis.dot(v) * (1.0 - c) + v.cross(axis) * s
}

fn coincident(a: Vec3, b: Vec3) -> bool {
    (a.x - b.x).abs() < COINCIDENT_EPSILON
        && (a.y - b.y).abs() < COINCIDENT_EPSILON
        && (a.z - b.z).abs() < COINCIDENT_EPSILON
}
