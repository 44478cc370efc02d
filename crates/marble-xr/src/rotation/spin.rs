//! Constant rotation about a local axis

use crate::config::SpinConfig;
use crate::spatial::{Quaternion, Transform, Vector3D};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSpin {
    /// Degrees per second
    pub speed: f32,
    pub axis: Vector3D,
}

impl ConstantSpin {
    pub fn new(speed: f32, axis: Vector3D) -> Self {
        Self { speed, axis }
    }

    pub fn from_config(config: &SpinConfig) -> Self {
        Self::new(config.speed, config.axis)
    }

    pub fn tick(&self, transform: &mut Transform, dt: f32) {
        transform.rotate_local(Quaternion::angle_axis(self.speed * dt, self.axis));
    }
}

impl Default for ConstantSpin {
    fn default() -> Self {
        Self::from_config(&SpinConfig::default())
    }
}
