//! marble-xr: interaction logic for a mixed-reality marble table
//!
//! This crate provides the table's behaviour as host-agnostic state machines:
//! - Nearest-anchor snapping between track pieces
//! - Inertial table rotation with drag decay, plus constant prop spin
//! - Hand-clap detection from palm poses
//! - Fan and booster force fields
//! - Item and ball spawners with eased appear animations
//! - Out-of-bounds clean-up and trash-can deletion
//!
//! The host owns rendering, physics and input. It delivers [`TableEvent`]s
//! between ticks and advances each component once per fixed step.

pub mod animation;
pub mod app;
pub mod config;
pub mod error;
pub mod forces;
pub mod gesture;
pub mod input;
pub mod lifecycle;
pub mod rotation;
pub mod snap;
pub mod spatial;
pub mod spawn;

// Re-export commonly used types
pub use animation::{Easing, Tween};
pub use app::{ScriptedEvent, SimulationRunner, TableApp};
pub use config::MarbleConfig;
pub use error::{MarbleError, Result};
pub use forces::{Body, Booster, FanForceField, ForceMode, ForceReceiver};
pub use gesture::{ClapDetector, ClapKind};
pub use input::{Grabbable, Hand, HandPoseSource, ObjectId, TableEvent, TrackedHands};
pub use lifecycle::{Highlight, OutOfBoundsSweep, TrashCheck, TrashVerdict};
pub use rotation::{ConstantSpin, InertialRotator, RotationPhase};
pub use snap::{AnchorSet, SnapBehaviour, SnapMatcher, SnapOutcome, SnapTick};
pub use spatial::{Point3D, Quaternion, Transform, Vector3D};
pub use spawn::{BallSpawner, ItemSpawner};
