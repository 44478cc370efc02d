//! Host input abstraction
//!
//! The host's physics callbacks, grab interactions and hand tracking are
//! delivered to the table as discrete [`TableEvent`]s. Components never
//! poll the host directly.

mod event;
mod grab;
mod hand;

pub use event::{ObjectId, TableEvent};
pub use grab::Grabbable;
pub use hand::{Hand, HandPoseSource, TrackedHands};
