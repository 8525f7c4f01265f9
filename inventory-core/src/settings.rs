use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default main window size, in points
pub const DEFAULT_WINDOW_WIDTH: f32 = 1200.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 700.0;

/// Application settings shared by the GUI and CLI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Start with the demonstration catalog instead of an empty one
    #[serde(default)]
    pub load_sample_data: bool,
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
}

fn default_window_width() -> f32 {
    DEFAULT_WINDOW_WIDTH
}

fn default_window_height() -> f32 {
    DEFAULT_WINDOW_HEIGHT
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            load_sample_data: false,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl Settings {
    /// Loads settings from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(get_settings_path()?)
    }

    /// Loads settings from a file; a missing file yields the defaults
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {:?}", path))
    }

    /// Saves settings to the given file, creating parent directories
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write settings to {:?}", path.as_ref()))?;

        Ok(())
    }
}

/// Gets the path to the settings file
pub fn get_settings_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("INVENTORY_SETTINGS") {
        return Ok(PathBuf::from(path));
    }

    let config_dir = dirs::config_dir().context("Failed to determine config directory")?;

    Ok(config_dir.join("inventory").join("settings.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() -> Result<()> {
        let dir = tempdir()?;
        let settings = Settings::load_from(dir.path().join("absent.yaml"))?;
        assert_eq!(settings, Settings::default());
        Ok(())
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("settings.yaml");

        let settings = Settings {
            load_sample_data: true,
            window_width: 800.0,
            window_height: 600.0,
        };
        settings.save_to(&path)?;

        let loaded = Settings::load_from(&path)?;
        assert_eq!(loaded, settings);
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "load_sample_data: true\n")?;

        let loaded = Settings::load_from(&path)?;
        assert!(loaded.load_sample_data);
        assert_eq!(loaded.window_width, DEFAULT_WINDOW_WIDTH);
        assert_eq!(loaded.window_height, DEFAULT_WINDOW_HEIGHT);
        Ok(())
    }

    #[test]
    fn test_invalid_file_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "load_sample_data: [not, a, bool]\n")?;

        let err = Settings::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings file"));
        Ok(())
    }
}
