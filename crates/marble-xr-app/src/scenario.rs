//! Scripted scenarios for the headless table

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use marble_xr::{
    MarbleConfig, MarbleError, Point3D, Quaternion, ScriptedEvent, SimulationRunner, TableEvent,
    Transform,
};

use crate::table::{objects, MarbleTable, TableStats, TABLE_ORIGIN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Carry a track piece next to the fixed track and let go
    Snap,
    /// Flick the table and let it coast to a stop
    Rotate,
    /// A double clap followed by a single clap
    Clap,
    /// Place the ball spawner, take an item, trash the piece
    Marbles,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Snap,
        Scenario::Rotate,
        Scenario::Clap,
        Scenario::Marbles,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Snap => "snap",
            Scenario::Rotate => "rotate",
            Scenario::Clap => "clap",
            Scenario::Marbles => "marbles",
        }
    }

    /// Ticks needed for the script to play out
    pub fn default_ticks(&self) -> u64 {
        match self {
            Scenario::Snap => 40,
            Scenario::Rotate => 250,
            Scenario::Clap => 120,
            Scenario::Marbles => 300,
        }
    }

    pub fn script(&self) -> Vec<ScriptedEvent> {
        match self {
            Scenario::Snap => snap_script(),
            Scenario::Rotate => rotate_script(),
            Scenario::Clap => clap_script(),
            Scenario::Marbles => marbles_script(),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = MarbleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MarbleError::UnknownScenario(s.to_string()))
    }
}

/// Result of one scenario run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario: Scenario,
    pub ticks: u64,
    pub dt: f32,
    pub stats: TableStats,
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.stats;
        writeln!(f, "scenario: {} ({} ticks at {:.3}s)", self.scenario, self.ticks, self.dt)?;
        writeln!(
            f,
            "piece: ({:.3}, {:.3}, {:.3}) landings={} cancelled={} deleted={}",
            stats.piece_position.x,
            stats.piece_position.y,
            stats.piece_position.z,
            stats.landings.len(),
            stats.snaps_cancelled,
            stats.piece_deleted
        )?;
        writeln!(f, "table: yaw={:.1} deg phase={:?}", stats.table_yaw, stats.table_phase)?;
        writeln!(f, "claps: {:?}", stats.claps)?;
        writeln!(
            f,
            "balls: spawned={} swept={} alive={}",
            stats.balls_spawned, stats.balls_swept, stats.balls_alive
        )?;
        write!(
            f,
            "items: presented={} full_size={}",
            stats.items_presented, stats.items_full_size
        )
    }
}

/// Run `scenario` for `ticks` fixed steps (its default when `None`)
pub fn run_scenario(scenario: Scenario, config: MarbleConfig, ticks: Option<u64>) -> ScenarioReport {
    let ticks = ticks.unwrap_or_else(|| scenario.default_ticks());
    tracing::info!("Starting {} scenario", scenario);

    let mut runner = SimulationRunner::from_config(MarbleTable::new(config), &config.simulation)
        .with_script(scenario.script());
    let state = runner.run(ticks);

    ScenarioReport {
        scenario,
        ticks: runner.ticks_run(),
        dt: runner.fixed_dt(),
        stats: state.stats,
    }
}

fn grab(tick: u64, target: &str, interactor: Point3D) -> ScriptedEvent {
    ScriptedEvent::new(
        tick,
        TableEvent::GrabStart {
            target: target.to_string(),
            interactor,
        },
    )
}

fn release(tick: u64, target: &str) -> ScriptedEvent {
    ScriptedEvent::new(
        tick,
        TableEvent::GrabEnd {
            target: target.to_string(),
        },
    )
}

fn snap_script() -> Vec<ScriptedEvent> {
    let start = TABLE_ORIGIN;
    let end = Point3D::new(0.2, 1.0, 0.01);

    let mut script = vec![grab(0, objects::PIECE, start)];
    for step in 1..=10u64 {
        let t = step as f32 / 10.0;
        script.push(ScriptedEvent::new(
            step,
            TableEvent::InteractorMove {
                position: start.lerp(&end, t),
            },
        ));
    }
    script.push(ScriptedEvent::new(
        6,
        TableEvent::ProximityEnter {
            target: objects::PIECE.to_string(),
            other: objects::TRACK.to_string(),
        },
    ));
    script.push(release(20, objects::PIECE));
    script
}

fn rotate_script() -> Vec<ScriptedEvent> {
    const ARM: f32 = 0.5;
    // Controller position `degrees` around the pivot, measured from forward toward right
    let around = |degrees: f32| {
        let radians = degrees.to_radians();
        Point3D::new(
            TABLE_ORIGIN.x + radians.sin() * ARM,
            TABLE_ORIGIN.y,
            TABLE_ORIGIN.z + radians.cos() * ARM,
        )
    };

    let mut script = vec![grab(0, objects::TABLE, around(0.0))];
    for step in 1..=10u64 {
        script.push(ScriptedEvent::new(
            step,
            TableEvent::InteractorMove {
                position: around(3.0 * step as f32),
            },
        ));
    }
    script.push(release(11, objects::TABLE));
    script
}

fn clap_script() -> Vec<ScriptedEvent> {
    let hands = |tick: u64, gap: f32| {
        ScriptedEvent::new(
            tick,
            TableEvent::HandUpdate {
                left: Some(Point3D::new(-gap / 2.0, 1.2, 0.3)),
                right: Some(Point3D::new(gap / 2.0, 1.2, 0.3)),
            },
        )
    };

    vec![
        hands(0, 0.6),
        hands(5, 0.04),
        hands(10, 0.6),
        hands(15, 0.04),
        hands(20, 0.6),
        hands(70, 0.04),
        hands(75, 0.6),
    ]
}

fn marbles_script() -> Vec<ScriptedEvent> {
    let viewer = Transform::from_position_rotation(Point3D::new(0.0, 1.2, -0.5), Quaternion::IDENTITY);
    let hand = Point3D::new(0.1, 1.1, 0.2);

    vec![
        ScriptedEvent::new(0, TableEvent::Recenter { viewer }),
        grab(1, objects::BALL_SPAWNER, hand),
        release(2, objects::BALL_SPAWNER),
        grab(10, objects::ITEM, hand),
        release(12, objects::ITEM),
        grab(30, objects::PIECE, hand),
        ScriptedEvent::new(
            35,
            TableEvent::TrashContact {
                target: objects::PIECE.to_string(),
                touching: true,
            },
        ),
        release(40, objects::PIECE),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use marble_xr::config::RotationConfig;
    use marble_xr::{ClapKind, RotationPhase};

    #[test]
    fn test_parse_scenario_names() {
        assert_eq!("snap".parse::<Scenario>().unwrap(), Scenario::Snap);
        assert_eq!(" Marbles ".parse::<Scenario>().unwrap(), Scenario::Marbles);
        assert!(matches!(
            "bowling".parse::<Scenario>(),
            Err(MarbleError::UnknownScenario(name)) if name == "bowling"
        ));
    }

    #[test]
    fn test_snap_scenario_lands_on_track() {
        let report = run_scenario(Scenario::Snap, MarbleConfig::default(), None);
        let stats = &report.stats;

        assert_eq!(stats.landings.len(), 1);
        assert_eq!(stats.snaps_cancelled, 0);
        // Right anchor (0.3, 1.0, 0.01) is pulled onto the track end (0.33, 1.0, 0.0).
        assert!((stats.piece_position.x - 0.23).abs() < 0.001);
        assert!((stats.piece_position.y - 1.0).abs() < 0.001);
        assert!(stats.piece_position.z.abs() < 0.001);
    }

    #[test]
    fn test_snap_out_of_range_lands_unmoved() {
        let config = MarbleConfig {
            snap: marble_xr::config::SnapConfig { snap_distance: 0.01 },
            ..MarbleConfig::default()
        };
        let report = run_scenario(Scenario::Snap, config, None);
        assert_eq!(report.stats.landings, vec![marble_xr::Vector3D::ZERO]);
        assert!((report.stats.piece_position.x - 0.2).abs() < 0.001);
    }

    #[test]
    fn test_rotate_scenario_coasts_to_rest() {
        let config = MarbleConfig {
            rotation: RotationConfig {
                drag: 900.0,
                ..RotationConfig::default()
            },
            ..MarbleConfig::default()
        };
        let report = run_scenario(Scenario::Rotate, config, None);

        // 30 degrees of sweep at sensitivity 3, then half a second of coasting.
        assert_eq!(report.stats.table_phase, RotationPhase::Idle);
        assert!(report.stats.table_yaw > 120.0);
        assert!(report.stats.table_yaw < 180.0);
    }

    #[test]
    fn test_light_drag_is_still_coasting() {
        let report = run_scenario(Scenario::Rotate, MarbleConfig::default(), None);
        assert_eq!(report.stats.table_phase, RotationPhase::Decaying);
    }

    #[test]
    fn test_clap_scenario() {
        let report = run_scenario(Scenario::Clap, MarbleConfig::default(), None);
        assert_eq!(report.stats.claps, vec![ClapKind::Double, ClapKind::Single]);
    }

    #[test]
    fn test_marbles_scenario() {
        let report = run_scenario(Scenario::Marbles, MarbleConfig::default(), None);
        let stats = &report.stats;

        assert!(stats.piece_deleted);
        assert!(stats.balls_spawned >= 5);
        assert!(stats.balls_swept > 0);
        assert_eq!(stats.balls_alive as u32, stats.balls_spawned - stats.balls_swept);
        assert_eq!(stats.items_presented, 2);
        assert_eq!(stats.items_full_size, 1);
        assert_eq!(stats.ignored_events, 0);
    }
}
