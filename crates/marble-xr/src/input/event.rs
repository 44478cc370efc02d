//! Discrete events delivered by the host between ticks

use serde::{Deserialize, Serialize};

use crate::spatial::{Point3D, Transform};

/// Identifier of a scene object known to the table
pub type ObjectId = String;

/// Unified input event for the marble table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableEvent {
    /// An interactor started holding an object
    GrabStart {
        target: ObjectId,
        /// World position of the grabbing interactor
        interactor: Point3D,
    },

    /// The last interactor let go of an object
    GrabEnd { target: ObjectId },

    /// The interactor holding an object moved
    InteractorMove { position: Point3D },

    /// The proximity volumes of two snappable objects started overlapping
    ProximityEnter { target: ObjectId, other: ObjectId },

    /// The proximity volumes of two snappable objects stopped overlapping
    ProximityExit { target: ObjectId, other: ObjectId },

    /// An object started or stopped touching the trash volume
    TrashContact { target: ObjectId, touching: bool },

    /// Latest palm positions; `None` keeps the last known pose
    HandUpdate {
        left: Option<Point3D>,
        right: Option<Point3D>,
    },

    /// Move the table in front of the viewer
    Recenter { viewer: Transform },

    /// Regular tick marker emitted after each fixed update
    Tick,
}

impl TableEvent {
    pub fn is_tick(&self) -> bool {
        matches!(self, TableEvent::Tick)
    }

    /// Object the event is addressed to, if any
    pub fn target(&self) -> Option<&str> {
        match self {
            TableEvent::GrabStart { target, .. }
            | TableEvent::GrabEnd { target }
            | TableEvent::ProximityEnter { target, .. }
            | TableEvent::ProximityExit { target, .. }
            | TableEvent::TrashContact { target, .. } => Some(target),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target() {
        let event = TableEvent::GrabEnd {
            target: "rail".to_string(),
        };
        assert_eq!(event.target(), Some("rail"));
        assert_eq!(TableEvent::Tick.target(), None);
        assert!(TableEvent::Tick.is_tick());
    }
}
