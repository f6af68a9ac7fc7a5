//! Engine configuration.
//!
//! Settings are read from an optional JSON file. Every field has a default, so a
//! partial file only overrides what it names and a missing file runs the defaults.

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{VoxelWorldError, VoxelWorldResult};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "VOXEL_WORLD_CONFIG";
/// Config file used when the environment variable is unset.
pub const DEFAULT_CONFIG_PATH: &str = "voxel_world.json";

/// Main engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window title bar text
    pub window_title: String,
    /// Initial window width in logical pixels
    pub window_width: u32,
    /// Initial window height in logical pixels
    pub window_height: u32,
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Near clipping plane
    pub z_near: f32,
    /// Far clipping plane
    pub z_far: f32,
    /// Camera movement in units per second
    pub camera_speed: f32,
    /// Arrow-key rotation in degrees per second
    pub rotation_speed: f32,
    /// Mouse look in degrees per pixel
    pub mouse_sensitivity: f32,
    /// Where the camera starts
    pub camera_start: [f32; 3],
    /// Number of chunks along x, y and z
    pub world_extent: [u32; 3],
    /// WGSL shader loaded at startup
    pub shader_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_title: "Voxel World".to_string(),
            window_width: 1280,
            window_height: 720,
            fov_y_degrees: 45.0,
            z_near: 0.1,
            z_far: 1000.0,
            camera_speed: 10.0,
            rotation_speed: 90.0,
            mouse_sensitivity: 0.1,
            camera_start: [8.0, 16.0, 30.0],
            world_extent: [2, 1, 2],
            shader_path: PathBuf::from("assets/shaders/basic_shader.wgsl"),
        }
    }
}

impl EngineConfig {
    /// Loads the config from `$VOXEL_WORLD_CONFIG`, or `voxel_world.json` when the
    /// variable is unset.
    pub fn load() -> VoxelWorldResult<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from(&path)
    }

    /// Loads the config at `path`, falling back to defaults if the file is missing.
    ///
    /// # Errors
    /// An unreadable file or malformed JSON is an error; absence is not.
    pub fn load_from(path: &Path) -> VoxelWorldResult<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(VoxelWorldError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = Self::from_json(&contents).map_err(|source| VoxelWorldError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The world extent as a vector.
    pub fn world_extent(&self) -> cgmath::Vector3<u32> {
        self.world_extent.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn partial_json_overrides_named_fields() {
        let config =
            EngineConfig::from_json(r#"{ "window_title": "Test", "world_extent": [3, 1, 1] }"#)
                .unwrap();

        assert_eq!(config.window_title, "Test");
        assert_eq!(config.world_extent(), cgmath::Vector3::new(3, 1, 1));
        assert_eq!(config.fov_y_degrees, 45.0);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(EngineConfig::from_json("{ window_title: ").is_err());
        assert!(EngineConfig::from_json(r#"{ "window_width": "wide" }"#).is_err());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("voxel_world_config_that_does_not_exist.json");
        assert_eq!(EngineConfig::load_from(&path).unwrap(), EngineConfig::default());
    }

    #[test]
    fn malformed_file_reports_path() {
        let path = std::env::temp_dir().join(format!(
            "voxel_world_malformed_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "not json").unwrap();

        let err = EngineConfig::load_from(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, VoxelWorldError::Config { .. }));
        assert!(err.to_string().contains("voxel_world_malformed"));
    }
}
