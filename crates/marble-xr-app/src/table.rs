//! The marble table: every component wired to host events

use serde::Serialize;

use marble_xr::config::MarbleConfig;
use marble_xr::lifecycle::{OutOfBoundsSweep, TrashCheck, TrashVerdict};
use marble_xr::snap::{AnchorSet, SnapBehaviour, SnapTick};
use marble_xr::spawn::{pedestal_positions, recenter_position, BallSpawner, ItemSpawner};
use marble_xr::{
    Body, Booster, ClapDetector, ClapKind, ConstantSpin, FanForceField, Grabbable,
    InertialRotator, Point3D, RotationPhase, TableApp, TableEvent, TrackedHands, Transform,
    Vector3D,
};

/// Scene object names the table responds to
pub mod objects {
    pub const PIECE: &str = "piece";
    pub const TRACK: &str = "track";
    pub const TABLE: &str = "table";
    pub const ITEM: &str = "item";
    pub const BALL_SPAWNER: &str = "ball_spawner";
}

/// Table pivot before any recenter
pub const TABLE_ORIGIN: Point3D = Point3D {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};

const BALL_MASS: f32 = 0.05;
/// Height above the spawner pedestal where balls appear
const BALL_DROP_HEIGHT: f32 = 0.15;
/// Radius of the booster trigger volume
const BOOSTER_REACH: f32 = 0.1;
/// Radius of the fan trigger volume
const FAN_REACH: f32 = 0.5;
const FAN_LOCAL: Point3D = Point3D {
    x: 0.0,
    y: 0.05,
    z: -0.1,
};
const BOOSTER_LOCAL: Point3D = Point3D {
    x: 0.0,
    y: 0.0,
    z: 0.1,
};

/// Anchors of the movable track piece, in its proxy frame
pub fn piece_anchors() -> AnchorSet {
    AnchorSet::from_points([Point3D::new(0.1, 0.0, 0.0), Point3D::new(-0.1, 0.0, 0.0)])
}

/// World anchors of the fixed track the piece connects to
pub fn track_anchors() -> Vec<Point3D> {
    vec![Point3D::new(0.33, 1.0, 0.0), Point3D::new(0.53, 1.0, 0.0)]
}

/// Counters collected while the table runs
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableStats {
    pub ticks: u64,
    pub landings: Vec<Vector3D>,
    pub snaps_cancelled: u32,
    pub piece_position: Point3D,
    pub piece_deleted: bool,
    /// Signed table yaw in degrees
    pub table_yaw: f32,
    pub table_phase: RotationPhase,
    pub claps: Vec<ClapKind>,
    pub balls_spawned: u32,
    pub balls_swept: u32,
    pub balls_alive: usize,
    pub items_presented: u64,
    pub items_full_size: u32,
    pub ignored_events: u32,
}

pub struct TableState {
    pub piece: SnapBehaviour,
    /// Piece position minus interactor position at grab time
    grab_offset: Vector3D,
    pub trash: TrashCheck,
    pub rotator: InertialRotator,
    pub prop: Transform,
    pub hands: TrackedHands,
    pub clap: ClapDetector,
    pub item_spawner: ItemSpawner,
    pub ball_spawner: BallSpawner,
    pub balls: Vec<Body>,
    pub fan: FanForceField,
    pub booster: Booster,
    pub sweep: OutOfBoundsSweep,
    pub stats: TableStats,
}

/// Table application hosting every component
pub struct MarbleTable {
    config: MarbleConfig,
    spin: ConstantSpin,
    pedestals: Vec<Point3D>,
}

impl MarbleTable {
    pub fn new(config: MarbleConfig) -> Self {
        Self {
            spin: ConstantSpin::from_config(&config.spin),
            pedestals: pedestal_positions(2, config.table.radius),
            config,
        }
    }

    pub fn config(&self) -> &MarbleConfig {
        &self.config
    }

    fn ball_spawn_point(&self, state: &TableState) -> Point3D {
        let pedestal = self.pedestals.get(1).copied().unwrap_or(Point3D::ORIGIN);
        state.rotator.pivot().transform_point(pedestal) + Vector3D::UP * BALL_DROP_HEIGHT
    }

    fn grab_start(&mut self, target: &str, interactor: Point3D, state: &mut TableState) -> bool {
        match target {
            objects::PIECE if !state.stats.piece_deleted => {
                state.grab_offset = state.piece.body().position - interactor;
                state.piece.on_grab_start(interactor);
                state.trash.on_grab_start(interactor);
            }
            objects::TABLE => state.rotator.on_grab_start(interactor),
            objects::ITEM => {
                let current = state.item_spawner.current().id;
                state.item_spawner.on_item_grabbed(current);
            }
            objects::BALL_SPAWNER => state.ball_spawner.on_grab_start(interactor),
            _ => return false,
        }
        true
    }

    fn grab_end(&mut self, target: &str, state: &mut TableState) -> bool {
        match target {
            objects::PIECE if !state.stats.piece_deleted => {
                state.piece.on_grab_end();
                state.trash.on_grab_end();
            }
            objects::TABLE => state.rotator.on_grab_end(),
            objects::ITEM => {}
            objects::BALL_SPAWNER => state.ball_spawner.on_grab_end(),
            _ => return false,
        }
        true
    }

    fn update_balls(&self, state: &mut TableState, dt: f32) {
        let pivot = *state.rotator.pivot();
        state.fan.transform = Transform::from_position_rotation(
            pivot.transform_point(FAN_LOCAL),
            pivot.rotation,
        );
        state.booster.transform = Transform::from_position_rotation(
            pivot.transform_point(BOOSTER_LOCAL),
            pivot.rotation,
        );

        let spawned = state.ball_spawner.tick(dt);
        if spawned > 0 {
            let at = self.ball_spawn_point(state);
            for _ in 0..spawned {
                state
                    .balls
                    .push(Body::new(at, BALL_MASS, self.config.booster.ball_layer));
            }
            state.stats.balls_spawned += spawned;
        }

        let gravity = self.config.simulation.gravity;
        for ball in &mut state.balls {
            if ball.position.distance(&state.fan.transform.position) < FAN_REACH {
                state.fan.apply(&mut *ball);
            }
            if ball.position.distance(&state.booster.transform.position) < BOOSTER_REACH {
                state.booster.apply(&mut *ball);
            }
            ball.integrate(gravity, dt);
        }

        let positions: Vec<Point3D> = state.balls.iter().map(|b| b.position).collect();
        if let Some(fallen) = state.sweep.tick(dt, &positions) {
            for index in fallen.iter().rev() {
                state.balls.remove(*index);
            }
            state.stats.balls_swept += fallen.len() as u32;
        }
    }
}

impl TableApp for MarbleTable {
    type State = TableState;

    fn init(&self) -> TableState {
        let config = &self.config;
        let pivot = Transform::from_position(TABLE_ORIGIN);
        TableState {
            piece: SnapBehaviour::new(
                piece_anchors(),
                Transform::from_position(TABLE_ORIGIN),
                config.snap.snap_distance,
            ),
            grab_offset: Vector3D::ZERO,
            trash: TrashCheck::new(),
            rotator: InertialRotator::from_config(pivot, &config.rotation),
            prop: Transform::from_position(TABLE_ORIGIN),
            hands: TrackedHands::new(),
            clap: ClapDetector::from_config(&config.clap),
            item_spawner: ItemSpawner::new(config.item_spawner),
            ball_spawner: BallSpawner::from_config(&config.ball_spawner),
            balls: Vec::new(),
            fan: FanForceField::new(pivot, &config.fan),
            booster: Booster::new(pivot, &config.booster),
            sweep: OutOfBoundsSweep::from_config(&config.cleanup),
            stats: TableStats::default(),
        }
    }

    fn handle_event(&mut self, event: TableEvent, state: &mut TableState) -> bool {
        let target = event.target().map(str::to_owned);
        let handled = match event {
            TableEvent::Tick => {
                state.stats.ticks += 1;
                true
            }
            TableEvent::GrabStart { target, interactor } => {
                self.grab_start(&target, interactor, state)
            }
            TableEvent::GrabEnd { target } => self.grab_end(&target, state),
            TableEvent::InteractorMove { position } => {
                state.rotator.move_controller(position);
                if state.piece.is_held() {
                    let mut body = *state.piece.body();
                    body.position = position + state.grab_offset;
                    state.piece.set_body(body);
                }
                true
            }
            TableEvent::ProximityEnter { target, other } => {
                if target == objects::PIECE && other == objects::TRACK {
                    state.piece.on_proximity_enter(track_anchors());
                    true
                } else {
                    false
                }
            }
            TableEvent::ProximityExit { target, other } => {
                if target == objects::PIECE && other == objects::TRACK {
                    state.piece.on_proximity_exit();
                    true
                } else {
                    false
                }
            }
            TableEvent::TrashContact { target, touching } => {
                if target == objects::PIECE {
                    state.trash.set_touching(touching);
                    true
                } else {
                    false
                }
            }
            TableEvent::HandUpdate { left, right } => {
                state.hands.update(left, right);
                true
            }
            TableEvent::Recenter { viewer } => {
                let position = recenter_position(&viewer, self.config.table.recenter_distance);
                tracing::info!(
                    "Recentering table at ({:.2}, {:.2}, {:.2})",
                    position.x,
                    position.y,
                    position.z
                );
                state.rotator.set_pivot_position(position);
                true
            }
        };

        if !handled {
            tracing::warn!("Ignoring event for unknown object {:?}", target);
            state.stats.ignored_events += 1;
        }
        true
    }

    fn fixed_update(&mut self, state: &mut TableState, dt: f32) {
        match state.piece.fixed_tick() {
            SnapTick::Landed { offset } => state.stats.landings.push(offset),
            SnapTick::Cancelled => state.stats.snaps_cancelled += 1,
            SnapTick::Idle | SnapTick::Matching(_) => {}
        }

        if let Some(TrashVerdict::Delete) = state.trash.poll() {
            tracing::info!("Piece dropped in the trash");
            state.stats.piece_deleted = true;
        }

        state.rotator.tick(dt);
        self.spin.tick(&mut state.prop, dt);

        if let Some(kind) = state.clap.tick(&state.hands, dt) {
            tracing::info!("{:?} clap", kind);
            state.stats.claps.push(kind);
        }

        let finished = state.item_spawner.tick(dt);
        state.stats.items_full_size += finished.len() as u32;

        self.update_balls(state, dt);
    }

    fn on_tick(&mut self, state: &mut TableState) {
        let stats = &mut state.stats;
        stats.piece_position = state.piece.body().position;
        stats.table_yaw = Vector3D::signed_angle(
            &Vector3D::FORWARD,
            &state.rotator.rotation().forward(),
            &Vector3D::UP,
        );
        stats.table_phase = state.rotator.phase();
        stats.balls_alive = state.balls.len();
        stats.items_presented = state.item_spawner.current().id + 1;
    }
}
