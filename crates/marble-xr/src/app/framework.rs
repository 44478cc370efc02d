//! Table application framework

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::input::TableEvent;

/// Table application trait
pub trait TableApp {
    /// Application state type
    type State;

    /// Initialize application state
    fn init(&self) -> Self::State;

    /// Handle a table event, return true to continue, false to stop.
    ///
    /// This includes the `Tick` event sent after each fixed update.
    fn handle_event(&mut self, event: TableEvent, state: &mut Self::State) -> bool;

    /// Advance every component by one fixed step of `dt` seconds
    fn fixed_update(&mut self, state: &mut Self::State, dt: f32);

    /// Called after each fixed update
    fn on_tick(&mut self, _state: &mut Self::State) {}
}

/// An event the runner delivers before the fixed update of `tick`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    pub tick: u64,
    pub event: TableEvent,
}

impl ScriptedEvent {
    pub fn new(tick: u64, event: TableEvent) -> Self {
        Self { tick, event }
    }
}

/// Fixed-step runner that plays a script of events into a [`TableApp`]
pub struct SimulationRunner<A: TableApp> {
    app: A,
    fixed_dt: f32,
    script: VecDeque<ScriptedEvent>,
    ticks_run: u64,
    running: bool,
}

impl<A: TableApp> SimulationRunner<A> {
    /// Create a new runner stepping `fixed_dt` seconds per tick
    pub fn new(app: A, fixed_dt: f32) -> Self {
        Self {
            app,
            fixed_dt,
            script: VecDeque::new(),
            ticks_run: 0,
            running: true,
        }
    }

    pub fn from_config(app: A, config: &SimulationConfig) -> Self {
        Self::new(app, config.fixed_dt())
    }

    /// Set the event script; events for the same tick keep their order
    pub fn with_script(mut self, mut script: Vec<ScriptedEvent>) -> Self {
        script.sort_by_key(|e| e.tick);
        self.script = script.into();
        self
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    pub fn ticks_run(&self) -> u64 {
        self.ticks_run
    }

    /// Run up to `ticks` fixed steps and return the final state
    pub fn run(&mut self, ticks: u64) -> A::State {
        let mut state = self.app.init();
        self.running = true;
        self.ticks_run = 0;
        tracing::info!(
            "Running {} ticks at {:.4}s with {} scripted events",
            ticks,
            self.fixed_dt,
            self.script.len()
        );

        for tick in 0..ticks {
            while self.script.front().is_some_and(|e| e.tick <= tick) {
                let Some(scripted) = self.script.pop_front() else {
                    break;
                };
                tracing::trace!("tick {}: {:?}", tick, scripted.event);
                if !self.app.handle_event(scripted.event, &mut state) {
                    self.running = false;
                    break;
                }
            }
            if !self.running {
                tracing::info!("App stopped at tick {}", tick);
                break;
            }

            self.app.fixed_update(&mut state, self.fixed_dt);
            self.app.on_tick(&mut state);
            self.ticks_run += 1;
            if !self.app.handle_event(TableEvent::Tick, &mut state) {
                self.running = false;
                tracing::info!("App stopped after tick {}", tick);
                break;
            }
        }

        tracing::info!("Simulation finished after {} ticks", self.ticks_run);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::Point3D;

    #[derive(Default)]
    struct Recorder {
        stop_on_grab_end: bool,
        stop_after_ticks: Option<u32>,
    }

    #[derive(Default)]
    struct Log {
        elapsed: f32,
        updates: u32,
        ticks_seen: u32,
        events: Vec<(u32, String)>,
    }

    impl TableApp for Recorder {
        type State = Log;

        fn init(&self) -> Log {
            Log::default()
        }

        fn handle_event(&mut self, event: TableEvent, state: &mut Log) -> bool {
            if event.is_tick() {
                state.ticks_seen += 1;
                return self.stop_after_ticks != Some(state.ticks_seen);
            }
            let stop = self.stop_on_grab_end && matches!(event, TableEvent::GrabEnd { .. });
            if let Some(target) = event.target() {
                state.events.push((state.updates, target.to_string()));
            }
            !stop
        }

        fn fixed_update(&mut self, state: &mut Log, dt: f32) {
            state.elapsed += dt;
            state.updates += 1;
        }
    }

    fn grab(tick: u64, target: &str) -> ScriptedEvent {
        ScriptedEvent::new(
            tick,
            TableEvent::GrabStart {
                target: target.to_string(),
                interactor: Point3D::ORIGIN,
            },
        )
    }

    #[test]
    fn test_runs_fixed_steps() {
        let mut runner = SimulationRunner::new(Recorder::default(), 0.02);
        let log = runner.run(50);
        assert_eq!(log.updates, 50);
        assert_eq!(log.ticks_seen, 50);
        assert!((log.elapsed - 1.0).abs() < 0.001);
        assert_eq!(runner.ticks_run(), 50);
    }

    #[test]
    fn test_events_delivered_before_their_tick() {
        let mut runner = SimulationRunner::new(Recorder::default(), 0.1)
            .with_script(vec![grab(3, "b"), grab(0, "a"), grab(3, "c")]);
        let log = runner.run(5);
        assert_eq!(
            log.events,
            vec![(0, "a".to_string()), (3, "b".to_string()), (3, "c".to_string())]
        );
    }

    #[test]
    fn test_app_can_stop_the_run() {
        let app = Recorder {
            stop_on_grab_end: true,
            ..Recorder::default()
        };
        let mut runner = SimulationRunner::new(app, 0.1).with_script(vec![ScriptedEvent::new(
            4,
            TableEvent::GrabEnd {
                target: "a".to_string(),
            },
        )]);
        let log = runner.run(10);
        assert_eq!(log.updates, 4);
        assert_eq!(runner.ticks_run(), 4);
    }

    #[test]
    fn test_tick_handler_can_stop_the_run() {
        let app = Recorder {
            stop_after_ticks: Some(3),
            ..Recorder::default()
        };
        let mut runner = SimulationRunner::new(app, 0.1);
        let log = runner.run(10);
        assert_eq!(log.updates, 3);
        assert_eq!(log.ticks_seen, 3);
        assert_eq!(runner.ticks_run(), 3);
    }

    #[test]
    fn test_from_config_uses_tick_rate() {
        let config = SimulationConfig {
            tick_rate_hz: 100.0,
            ..SimulationConfig::default()
        };
        let runner = SimulationRunner::from_config(Recorder::default(), &config);
        assert!((runner.fixed_dt() - 0.01).abs() < 1e-6);
    }
}
