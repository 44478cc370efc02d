//! Ball emitter that runs while it is not being held

use crate::config::BallSpawnerConfig;
use crate::input::Grabbable;
use crate::spatial::Point3D;

/// Emits balls at a fixed cadence after it has been placed.
///
/// Idle until the first release; picking it up stops emission and putting
/// it down again restarts it with an immediate ball.
#[derive(Debug, Clone, PartialEq)]
pub struct BallSpawner {
    delay: f32,
    held: bool,
    running: bool,
    /// Seconds until the next ball
    countdown: f32,
}

impl BallSpawner {
    pub fn new(delay: f32) -> Self {
        Self {
            delay,
            held: false,
            running: false,
            countdown: 0.0,
        }
    }

    pub fn from_config(config: &BallSpawnerConfig) -> Self {
        Self::new(config.spawn_delay)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by `dt`; returns how many balls to emit this tick (at most one)
    pub fn tick(&mut self, dt: f32) -> u32 {
        if !self.running {
            return 0;
        }

        self.countdown -= dt;
        if self.countdown > 0.0 {
            return 0;
        }
        self.countdown = self.delay.max(0.0);
        1
    }
}

impl Grabbable for BallSpawner {
    fn on_grab_start(&mut self, _interactor: Point3D) {
        self.held = true;
        if self.running {
            tracing::debug!("Ball spawner picked up, emission stopped");
        }
        self.running = false;
    }

    fn on_grab_end(&mut self) {
        self.held = false;
        if self.running {
            return;
        }
        tracing::debug!("Ball spawner placed, emitting every {:.2}s", self.delay);
        self.running = true;
        // First ball comes out on the next tick.
        self.countdown = 0.0;
    }

    fn is_held(&self) -> bool {
        self.held
    }
}
