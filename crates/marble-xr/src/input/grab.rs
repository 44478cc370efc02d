//! Grab interaction seam

use crate::spatial::Point3D;

/// Implemented by anything an interactor can pick up or drag.
///
/// The host calls `on_grab_start` when the first interactor selects the
/// object and `on_grab_end` when the last one lets go.
pub trait Grabbable {
    /// `interactor` is the world position of the grabbing hand or controller
    fn on_grab_start(&mut self, interactor: Point3D);

    fn on_grab_end(&mut self);

    fn is_held(&self) -> bool;
}
