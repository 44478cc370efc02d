//! Tunables for every table component, loaded from TOML.
//!
//! Every section carries `#[serde(default)]`, so a file only needs the keys
//! it overrides:
//!
//! ```toml
//! [snap]
//! snap_distance = 0.08
//!
//! [rotation]
//! sensitivity = 2.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::error::{MarbleError, Result};
use crate::spatial::Vector3D;

/// Nearest-anchor snapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Anchors closer than this (metres) are pulled together
    pub snap_distance: f32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            snap_distance: 0.05,
        }
    }
}

/// Inertial table rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Multiplier from controller sweep angle to table angle
    pub sensitivity: f32,
    /// Angular drag; decay lasts `|velocity| / drag` seconds
    pub drag: f32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            sensitivity: 3.0,
            drag: 0.33,
        }
    }
}

/// Constant local-axis spin for decorative props
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    /// Degrees per second
    pub speed: f32,
    pub axis: Vector3D,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            speed: 90.0,
            axis: Vector3D::UP,
        }
    }
}

/// Hand clap counting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClapConfig {
    /// Palms closer than this (metres) count as touching
    pub threshold: f32,
    /// Quiet time (seconds) that closes a clap sequence
    pub window: f32,
}

impl Default for ClapConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            window: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanConfig {
    pub thrust: f32,
    /// Distance at which the fan stops pushing; zero disables falloff
    pub falloff: f32,
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            thrust: 1.0,
            falloff: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoosterConfig {
    /// Acceleration applied along the booster's forward axis
    pub strength: f32,
    /// Physics layer that boosters act on
    pub ball_layer: u32,
}

impl Default for BoosterConfig {
    fn default() -> Self {
        Self {
            strength: 1.0,
            ball_layer: 9,
        }
    }
}

/// Item pedestal animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemSpawnerConfig {
    /// Idle spin of the waiting item, degrees per second
    pub spin_speed: f32,
    /// Scale of an item resting on its pedestal
    pub rest_scale: f32,
    /// Height above the pedestal once the item has appeared
    pub item_height: f32,
    /// Seconds for the appear and grow animations
    pub spawn_duration: f32,
    pub easing: Easing,
}

impl Default for ItemSpawnerConfig {
    fn default() -> Self {
        Self {
            spin_speed: 20.0,
            rest_scale: 0.25,
            item_height: 0.1,
            spawn_duration: 0.5,
            easing: Easing::EaseInOutSine,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSpawnerConfig {
    /// Seconds between emitted balls
    pub spawn_delay: f32,
}

impl Default for BallSpawnerConfig {
    fn default() -> Self {
        Self { spawn_delay: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Distance of item pedestals from the table centre
    pub radius: f32,
    /// Distance in front of the viewer when recentering
    pub recenter_distance: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            radius: 0.15,
            recenter_distance: 0.5,
        }
    }
}

/// Ball clean-up and trash handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Balls below this height are removed (may be negative)
    pub floor_height: f32,
    /// Seconds between out-of-bounds sweeps
    pub sweep_interval: f32,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            floor_height: -10.0,
            sweep_interval: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed ticks per second for the headless runner
    pub tick_rate_hz: f32,
    /// World gravity applied to simulated bodies
    pub gravity: Vector3D,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 50.0,
            gravity: Vector3D::new(0.0, -9.81, 0.0),
        }
    }
}

impl SimulationConfig {
    /// Seconds per fixed tick
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.tick_rate_hz
    }
}

/// Every tunable of the marble table
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarbleConfig {
    pub snap: SnapConfig,
    pub rotation: RotationConfig,
    pub spin: SpinConfig,
    pub clap: ClapConfig,
    pub fan: FanConfig,
    pub booster: BoosterConfig,
    pub item_spawner: ItemSpawnerConfig,
    pub ball_spawner: BallSpawnerConfig,
    pub table: TableConfig,
    pub cleanup: CleanupConfig,
    pub simulation: SimulationConfig,
}

impl MarbleConfig {
    /// Read, parse and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| MarbleError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!("Loaded marble config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: MarbleConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject negative or non-finite tunables
    pub fn validate(&self) -> Result<()> {
        let tunables = [
            ("snap.snap_distance", self.snap.snap_distance),
            ("rotation.sensitivity", self.rotation.sensitivity),
            ("rotation.drag", self.rotation.drag),
            ("spin.speed", self.spin.speed),
            ("clap.threshold", self.clap.threshold),
            ("clap.window", self.clap.window),
            ("fan.thrust", self.fan.thrust),
            ("fan.falloff", self.fan.falloff),
            ("booster.strength", self.booster.strength),
            ("item_spawner.spin_speed", self.item_spawner.spin_speed),
            ("item_spawner.rest_scale", self.item_spawner.rest_scale),
            ("item_spawner.item_height", self.item_spawner.item_height),
            ("item_spawner.spawn_duration", self.item_spawner.spawn_duration),
            ("ball_spawner.spawn_delay", self.ball_spawner.spawn_delay),
            ("table.radius", self.table.radius),
            ("table.recenter_distance", self.table.recenter_distance),
            ("cleanup.sweep_interval", self.cleanup.sweep_interval),
        ];

        for (field, value) in tunables {
            if !value.is_finite() || value < 0.0 {
                return Err(MarbleError::InvalidTunable { field, value });
            }
        }

        let rate = self.simulation.tick_rate_hz;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(MarbleError::InvalidTunable {
                field: "simulation.tick_rate_hz",
                value: rate,
            });
        }

        Ok(())
    }
}
