//! Configuration loading for the navigation stack.

use crate::error::Result;
use crate::navigator::NavigatorConfig;
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration, loadable from TOML.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NavConfig {
    /// Navigator behavior.
    #[serde(default)]
    pub navigator: NavigatorConfig,

    /// Range sensor simulation.
    #[serde(default)]
    pub sensor: SensorConfig,

    /// Drive tuning.
    #[serde(default)]
    pub drive: DriveConfig,
}

/// Range sensor settings.
#[derive(Clone, Debug, Deserialize)]
pub struct SensorConfig {
    /// Maximum detection range in meters (default: 5.0)
    #[serde(default = "default_max_range")]
    pub max_range_m: f32,

    /// Safety threshold that trips obstacle listeners (default: 0.5)
    #[serde(default = "default_safe_distance")]
    pub safe_distance_m: f32,

    /// Ray march step in cell units (default: 0.25)
    #[serde(default = "default_step_cells")]
    pub step_cells: f32,
}

/// Drive strategy settings.
#[derive(Clone, Debug, Deserialize)]
pub struct DriveConfig {
    /// Point-drive speed in cell units per second (default: 2.0)
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Diff-drive cruise velocity in cell units per second (default: 2.0)
    #[serde(default = "default_speed")]
    pub linear_vel: f32,

    /// Diff-drive rotation velocity in rad/s (default: 3.0)
    #[serde(default = "default_angular_vel")]
    pub angular_vel: f32,
}

fn default_max_range() -> f32 {
    5.0
}

fn default_safe_distance() -> f32 {
    0.5
}

fn default_step_cells() -> f32 {
    0.25
}

fn default_speed() -> f32 {
    2.0
}

fn default_angular_vel() -> f32 {
    3.0
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            max_range_m: default_max_range(),
            safe_distance_m: default_safe_distance(),
            step_cells: default_step_cells(),
        }
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            linear_vel: default_speed(),
            angular_vel: default_angular_vel(),
        }
    }
}

impl NavConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: NavConfig = toml::from_str(&text)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NavConfig::default();
        assert_eq!(config.sensor.max_range_m, 5.0);
        assert_eq!(config.navigator.replan_cooldown_s, 2.0);
        assert_eq!(config.drive.speed, 2.0);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: NavConfig = toml::from_str(
            r#"
            [navigator]
            replan_cooldown_s = 4.0

            [sensor]
            max_range_m = 3.0
            "#,
        )
        .unwrap();
        assert_eq!(config.navigator.replan_cooldown_s, 4.0);
        assert_eq!(config.sensor.max_range_m, 3.0);
        // Untouched fields keep their defaults
        assert_eq!(config.sensor.safe_distance_m, 0.5);
        assert_eq!(config.drive.angular_vel, 3.0);
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: NavConfig = toml::from_str("").unwrap();
        assert_eq!(config.navigator.obstacle_check_distance_m, 0.8);
    }
}
