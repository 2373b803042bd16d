//! Placement Configuration
//!
//! Global placement settings: active scale, room cell pitch, floor height and
//! the floor level new objects are built on. Persisted as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Floor level new objects are built on, in multiples of the floor height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorLevel {
    #[default]
    Ground,
    Half,
    First,
    FirstAndHalf,
    Second,
    Third,
    Fourth,
}

impl FloorLevel {
    /// Height in floors.
    pub fn floors(self) -> f32 {
        match self {
            FloorLevel::Ground => 0.0,
            FloorLevel::Half => 0.5,
            FloorLevel::First => 1.0,
            FloorLevel::FirstAndHalf => 1.5,
            FloorLevel::Second => 2.0,
            FloorLevel::Third => 3.0,
            FloorLevel::Fourth => 4.0,
        }
    }
}

/// Central placement settings shared by the snapper and the room generator.
///
/// Every distance the engine derives from bounds already carries the active
/// scale through the placed objects; the absolute tolerances below are
/// multiplied by `active_scale` where they are used.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Uniform scale applied to every instantiated object
    pub active_scale: f32,
    /// Room cell size in world units (before scale)
    pub cell_pitch: f32,
    /// Height of one storey (before scale)
    pub floor_height: f32,
    /// Storey new objects are built on
    pub floor_level: FloorLevel,
    /// Lift applied after a vertical drop so the dropped top surface stays
    /// above the object below
    pub vertical_epsilon: f32,
    /// Minimum amount an edge must be longer than the object before a
    /// sideways shift applies
    pub sideways_tolerance: f32,
    /// Whether room drags ring the floor with perimeter objects
    pub add_perimeter_to_rooms: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            active_scale: 1.0,
            cell_pitch: 4.0,
            floor_height: 6.0,
            floor_level: FloorLevel::Ground,
            vertical_epsilon: 0.005,
            sideways_tolerance: 0.5,
            add_perimeter_to_rooms: true,
        }
    }
}

impl PlacementConfig {
    /// Config at a given scale, everything else default.
    pub fn with_scale(active_scale: f32) -> Self {
        Self {
            active_scale,
            ..Self::default()
        }
    }

    /// World height of the active floor level.
    pub fn build_height(&self) -> f32 {
        self.floor_level.floors() * self.floor_height * self.active_scale
    }

    /// Room cell pitch in world units.
    pub fn scaled_cell_pitch(&self) -> f32 {
        self.cell_pitch * self.active_scale
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.active_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "active_scale must be positive, got {}",
                self.active_scale
            )));
        }
        if !(self.cell_pitch > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "cell_pitch must be positive, got {}",
                self.cell_pitch
            )));
        }
        if !(self.floor_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "floor_height must be positive, got {}",
                self.floor_height
            )));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlacementConfig::default();
        assert_eq!(config.active_scale, 1.0);
        assert_eq!(config.cell_pitch, 4.0);
        assert_eq!(config.floor_height, 6.0);
        assert_eq!(config.build_height(), 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_build_height_follows_level_and_scale() {
        let mut config = PlacementConfig::with_scale(2.0);
        config.floor_level = FloorLevel::FirstAndHalf;
        assert_eq!(config.build_height(), 18.0);
        assert_eq!(config.scaled_cell_pitch(), 8.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "active_scale": 0.5, "floor_level": "Second" }"#;
        let config = PlacementConfig::from_json_str(json).expect("partial config should load");
        assert_eq!(config.active_scale, 0.5);
        assert_eq!(config.floor_level, FloorLevel::Second);
        assert_eq!(config.cell_pitch, 4.0);
    }

    #[test]
    fn test_invalid_scale_rejected() {
        let result = PlacementConfig::from_json_str(r#"{ "active_scale": 0.0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = PlacementConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("blueprint_config_{}.json", std::process::id()));
        let mut config = PlacementConfig::default();
        config.floor_level = FloorLevel::Third;
        config.save(&path).expect("save");
        let loaded = PlacementConfig::load(&path).expect("load");
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
