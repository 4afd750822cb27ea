//! Persisted user settings (last opened folder, external tool locations).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings that survive between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Folder reopened automatically on startup.
    pub last_used_folder: Option<PathBuf>,

    /// Tiled executable used by "open in Tiled".
    pub tiled_path: Option<PathBuf>,

    /// Emulator launched after a build.
    pub emulator_path: Option<PathBuf>,
}

impl Settings {
    /// Default location, relative to the working directory.
    pub const DEFAULT_PATH: &'static str = "settings.json";

    /// Load settings, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Configured Tiled executable, if it points at an existing file.
    pub fn tiled_executable(&self) -> Option<&Path> {
        self.tiled_path.as_deref().filter(|path| path.is_file())
    }

    /// Configured emulator, if it points at an existing file.
    pub fn emulator_executable(&self) -> Option<&Path> {
        self.emulator_path.as_deref().filter(|path| path.is_file())
    }

    /// Last used folder, if it still exists.
    pub fn reopenable_folder(&self) -> Option<&Path> {
        self.last_used_folder.as_deref().filter(|path| path.is_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            last_used_folder: Some(dir.path().to_path_buf()),
            tiled_path: Some(PathBuf::from("/opt/tiled/tiled")),
            emulator_path: None,
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "tiled_path": "tiled.exe" }"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.tiled_path, Some(PathBuf::from("tiled.exe")));
        assert_eq!(settings.last_used_folder, None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::load(&path), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_missing_tools_are_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            last_used_folder: Some(dir.path().join("gone")),
            tiled_path: Some(dir.path().join("tiled")),
            emulator_path: None,
        };
        assert!(settings.tiled_executable().is_none());
        assert!(settings.emulator_executable().is_none());
        assert!(settings.reopenable_folder().is_none());
    }
}
