//! Configuration for the editor core.

use std::path::PathBuf;

use bevy::prelude::*;

/// Configuration for `DsveditCorePlugin` and [`crate::Editor`].
#[derive(Resource, Debug, Clone)]
pub struct EditorConfig {
    /// Folder that receives `Exported <game>/` and built images.
    ///
    /// Defaults to the parent of the working directory, next to the extracted files.
    pub export_root: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            export_root: PathBuf::from(".."),
        }
    }
}

impl EditorConfig {
    pub fn new(export_root: impl Into<PathBuf>) -> Self {
        Self {
            export_root: export_root.into(),
        }
    }
}
