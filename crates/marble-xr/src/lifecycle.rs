//! Ball clean-up and trash-can deletion

use serde::{Deserialize, Serialize};

use crate::config::CleanupConfig;
use crate::input::Grabbable;
use crate::spatial::Point3D;

/// Periodic scan for balls that fell off the table
#[derive(Debug, Clone, PartialEq)]
pub struct OutOfBoundsSweep {
    floor_height: f32,
    interval: f32,
    /// Seconds until the next sweep; the first one runs immediately
    countdown: f32,
}

impl OutOfBoundsSweep {
    pub fn new(floor_height: f32, interval: f32) -> Self {
        Self {
            floor_height,
            interval,
            countdown: 0.0,
        }
    }

    pub fn from_config(config: &CleanupConfig) -> Self {
        Self::new(config.floor_height, config.sweep_interval)
    }

    pub fn floor_height(&self) -> f32 {
        self.floor_height
    }

    /// Indices of positions below the floor
    pub fn sweep(&self, positions: &[Point3D]) -> Vec<usize> {
        positions
            .iter()
            .enumerate()
            .filter(|(_, p)| p.y < self.floor_height)
            .map(|(i, _)| i)
            .collect()
    }

    /// Advance by `dt`; returns the fallen indices when a sweep is due
    pub fn tick(&mut self, dt: f32, positions: &[Point3D]) -> Option<Vec<usize>> {
        self.countdown -= dt;
        if self.countdown > 0.0 {
            return None;
        }
        self.countdown = self.interval.max(0.0);

        let fallen = self.sweep(positions);
        if !fallen.is_empty() {
            tracing::debug!("Sweeping {} balls below {}", fallen.len(), self.floor_height);
        }
        Some(fallen)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    #[default]
    Normal,
    /// Releasing now would delete the object
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum TrashVerdict {
    /// Still held; show this highlight
    Hovering { highlight: Highlight },
    Delete,
    Keep,
}

/// Decides whether a released object goes in the trash
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrashCheck {
    held: bool,
    touching: bool,
    released: bool,
}

impl TrashCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_touching(&mut self, touching: bool) {
        self.touching = touching;
    }

    pub fn is_touching(&self) -> bool {
        self.touching
    }

    pub fn highlight(&self) -> Highlight {
        if self.held && self.touching {
            Highlight::Danger
        } else {
            Highlight::Normal
        }
    }

    /// Current verdict; a release verdict is reported once
    pub fn poll(&mut self) -> Option<TrashVerdict> {
        if self.held {
            return Some(TrashVerdict::Hovering {
                highlight: self.highlight(),
            });
        }
        if !std::mem::take(&mut self.released) {
            return None;
        }
        if self.touching {
            tracing::debug!("Object released over trash");
            Some(TrashVerdict::Delete)
        } else {
            Some(TrashVerdict::Keep)
        }
    }
}

impl Grabbable for TrashCheck {
    fn on_grab_start(&mut self, _interactor: Point3D) {
        self.held = true;
        self.released = false;
    }

    fn on_grab_end(&mut self) {
        if self.held {
            self.released = true;
        }
        self.held = false;
    }

    fn is_held(&self) -> bool {
        self.held
    }
}
