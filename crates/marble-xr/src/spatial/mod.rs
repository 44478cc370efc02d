//! Spatial primitives for table-space simulation
//!
//! Coordinates follow the host's convention:
//! - X: Right (+) / Left (-)
//! - Y: Up (+) / Down (-)
//! - Z: Forward (+) / Backward (-)
//!
//! Rotations about `Vector3D::UP` by a positive angle carry `FORWARD` toward
//! `RIGHT`, and `Vector3D::signed_angle` uses the same sign.

mod point3d;
mod quaternion;
mod transform;
mod vector3d;

pub use point3d::Point3D;
pub use quaternion::Quaternion;
pub use transform::Transform;
pub use vector3d::Vector3D;

/// Values smaller than this are treated as zero by divisions and normalisation.
pub const EPSILON: f32 = 1e-6;

/// Linear interpolation between two scalars (unclamped)
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp a scalar into `[0, 1]`
pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}
