//! Trigger-volume force fields acting on rigid bodies
//!
//! The host reports which bodies are inside a fan or booster volume each
//! physics tick; the field computes the push and hands it to the body
//! through [`ForceReceiver`].

use serde::{Deserialize, Serialize};

use crate::config::{BoosterConfig, FanConfig};
use crate::spatial::{clamp01, lerp, Point3D, Transform, Vector3D};

/// How a force is applied to a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceMode {
    /// Continuous force, scaled by inverse mass
    Force,
    /// Continuous acceleration, independent of mass
    Acceleration,
}

/// A host rigidbody that can receive forces
pub trait ForceReceiver {
    fn position(&self) -> Point3D;

    /// Physics layer the body lives on
    fn layer(&self) -> u32;

    fn add_force(&mut self, force: Vector3D, mode: ForceMode);
}

/// Fan that pushes bodies along its forward axis, weaker with distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanForceField {
    pub transform: Transform,
    pub thrust: f32,
    /// Distance at which the push reaches zero; non-positive disables falloff
    pub falloff: f32,
}

impl FanForceField {
    pub fn new(transform: Transform, config: &FanConfig) -> Self {
        Self {
            transform,
            thrust: config.thrust,
            falloff: config.falloff,
        }
    }

    /// Push multiplier for a body at `position`, `[0, 1]`
    pub fn strength_at(&self, position: Point3D) -> f32 {
        if self.falloff <= 0.0 {
            return 1.0;
        }
        let distance = position.distance(&self.transform.position);
        lerp(1.0, 0.0, clamp01(distance / self.falloff))
    }

    /// Force for a body at `position`
    pub fn force_at(&self, position: Point3D) -> Vector3D {
        self.transform.forward() * (self.thrust * self.strength_at(position))
    }

    /// Apply the fan to a body inside its volume
    pub fn apply(&self, body: &mut dyn ForceReceiver) {
        let force = self.force_at(body.position());
        body.add_force(force, ForceMode::Force);
    }
}

/// Booster pad that accelerates balls along its forward axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Booster {
    pub transform: Transform,
    pub strength: f32,
    pub ball_layer: u32,
}

impl Booster {
    pub fn new(transform: Transform, config: &BoosterConfig) -> Self {
        Self {
            transform,
            strength: config.strength,
            ball_layer: config.ball_layer,
        }
    }

    /// Apply the boost; returns false for bodies that are not balls
    pub fn apply(&self, body: &mut dyn ForceReceiver) -> bool {
        if body.layer() != self.ball_layer {
            return false;
        }
        body.add_force(self.transform.forward() * self.strength, ForceMode::Acceleration);
        true
    }
}

/// Minimal point-mass rigidbody for headless simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Point3D,
    pub velocity: Vector3D,
    pub mass: f32,
    pub layer: u32,
    /// Acceleration accumulated since the last integration step
    #[serde(skip)]
    pending: Vector3D,
}

impl Body {
    pub fn new(position: Point3D, mass: f32, layer: u32) -> Self {
        Self {
            position,
            velocity: Vector3D::ZERO,
            mass,
            layer,
            pending: Vector3D::ZERO,
        }
    }

    /// Semi-implicit Euler step with gravity; clears accumulated forces
    pub fn integrate(&mut self, gravity: Vector3D, dt: f32) {
        self.velocity += (gravity + self.pending) * dt;
        self.position = self.position + self.velocity * dt;
        self.pending = Vector3D::ZERO;
    }
}

impl ForceReceiver for Body {
    fn position(&self) -> Point3D {
        self.position
    }

    fn layer(&self) -> u32 {
        self.layer
    }

    fn add_force(&mut self, force: Vector3D, mode: ForceMode) {
        let acceleration = match mode {
            ForceMode::Force if self.mass > 0.0 => force * (1.0 / self.mass),
            ForceMode::Force => Vector3D::ZERO,
            ForceMode::Acceleration => force,
        };
        self.pending += acceleration;
    }
}
