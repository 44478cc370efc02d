use std::io::Write;

use marble_xr::{ClapKind, MarbleConfig, MarbleError};
use marble_xr_app::{run_scenario, Scenario};

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_config_file_drives_scenario() {
    // A wide clap threshold turns the "apart" hand pose into a touch too.
    let file = config_file(
        r#"
        [clap]
        threshold = 1.0
        "#,
    );
    let config = MarbleConfig::load(file.path()).unwrap();
    let report = run_scenario(Scenario::Clap, config, None);
    assert!(report.stats.claps.is_empty());

    let report = run_scenario(Scenario::Clap, MarbleConfig::default(), None);
    assert_eq!(report.stats.claps, vec![ClapKind::Double, ClapKind::Single]);
}

#[test]
fn test_snap_distance_from_file() {
    let file = config_file(
        r#"
        [snap]
        snap_distance = 0.01
        "#,
    );
    let config = MarbleConfig::load(file.path()).unwrap();
    let report = run_scenario(Scenario::Snap, config, None);
    assert!((report.stats.piece_position.x - 0.2).abs() < 0.001);
    assert!((report.stats.piece_position.z - 0.01).abs() < 0.001);
}

#[test]
fn test_tick_override() {
    let report = run_scenario(Scenario::Marbles, MarbleConfig::default(), Some(5));
    assert_eq!(report.ticks, 5);
    assert_eq!(report.stats.ticks, 5);
    assert_eq!(report.stats.balls_spawned, 1);
}

#[test]
fn test_faster_tick_rate_shrinks_dt() {
    let file = config_file(
        r#"
        [simulation]
        tick_rate_hz = 100.0
        "#,
    );
    let config = MarbleConfig::load(file.path()).unwrap();
    let report = run_scenario(Scenario::Snap, config, Some(1));
    assert!((report.dt - 0.01).abs() < 1e-6);
}

#[test]
fn test_invalid_config_is_rejected() {
    let file = config_file(
        r#"
        [ball_spawner]
        spawn_delay = -1.0
        "#,
    );
    let err = MarbleConfig::load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        MarbleError::InvalidTunable {
            field: "ball_spawner.spawn_delay",
            ..
        }
    ));
}

#[test]
fn test_report_serializes_to_json() {
    let report = run_scenario(Scenario::Snap, MarbleConfig::default(), None);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["scenario"], "snap");
    assert_eq!(json["stats"]["landings"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["stats"]["table_phase"], "idle");
}

#[test]
fn test_effective_config_round_trips_through_toml() {
    let file = config_file(
        r#"
        [item_spawner]
        easing = "ease_in_cubic"
        "#,
    );
    let config = MarbleConfig::load(file.path()).unwrap();
    let rendered = toml::to_string_pretty(&config).unwrap();
    assert_eq!(MarbleConfig::from_toml_str(&rendered).unwrap(), config);
}
