//! Table rotation: inertial drag spinning and constant prop spin

mod rotator;
mod spin;

pub use rotator::{decay_duration, InertialRotator, RotationPhase};
pub use spin::ConstantSpin;
