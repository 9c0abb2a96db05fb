//! Run settings
//!
//! Loaded from a JSON file when one is given, defaults otherwise.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Settings load/save errors
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Window caption (passed through to whatever renderer is attached)
    pub caption: String,
    pub width: u32,
    pub height: u32,

    // === Loop ===
    /// Target frame rate
    pub fps: u32,
    /// Frames to run before stopping (0 = until quit)
    pub frames: u64,
    /// Pace frames against the wall clock instead of stepping at a fixed dt
    pub realtime: bool,
    /// Frames between renderer position dumps (0 = never)
    pub log_every: u64,

    // === Scene ===
    /// Seed for scene placement
    pub seed: u64,
    /// Balls placed at random on top of the default pair
    pub extra_balls: u32,
    pub player_radius: f32,
    pub ball_radius: f32,

    // === Physics ===
    pub default_friction: f32,
    pub movement_force: f32,
    pub kick_multiplier: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            caption: "Swimball".to_string(),
            width: 1280,
            height: 768,

            fps: DEFAULT_FPS,
            frames: 600,
            realtime: false,
            log_every: 60,

            seed: 0,
            extra_balls: 0,
            player_radius: 40.0,
            ball_radius: 30.0,

            default_friction: DEFAULT_FRICTION,
            movement_force: DEFAULT_MOVEMENT_FORCE,
            kick_multiplier: DEFAULT_KICK_MULTIPLIER,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.fps == 0 {
            return Err(SettingsError::Invalid("fps must be positive".into()));
        }
        if !(self.default_friction > 0.0 && self.default_friction <= 1.0) {
            return Err(SettingsError::Invalid(format!(
                "default_friction must be in (0, 1], got {}",
                self.default_friction
            )));
        }
        if self.player_radius < 0.0 || self.ball_radius < 0.0 {
            return Err(SettingsError::Invalid("radii must be non-negative".into()));
        }
        Ok(())
    }

    /// Nominal tick length at the target frame rate
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.fps, 60);
        assert!((settings.movement_force - 2000.0).abs() < 1e-2);
        assert!((settings.frame_dt() - 1.0 / 60.0).abs() < 1e-6);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"fps": 30, "extra_balls": 4}"#).unwrap();
        assert_eq!(settings.fps, 30);
        assert_eq!(settings.extra_balls, 4);
        assert_eq!(settings.ball_radius, 30.0);
    }

    #[test]
    fn test_save_load_file() {
        let path = std::env::temp_dir().join(format!("swimball_settings_{}.json", std::process::id()));
        let settings = Settings {
            seed: 99,
            realtime: true,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_invalid_rejected() {
        let settings = Settings {
            fps: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));

        let path = std::env::temp_dir().join("swimball_settings_missing_file.json");
        assert!(matches!(Settings::load(&path), Err(SettingsError::Io(_))));
    }
}
