//! Export and import of the editor's current room.

use std::path::PathBuf;

use bevy::prelude::*;
use dsvedit_core::{Editor, EditorError};

use crate::error::TmxError;
use crate::export::export;
use crate::import::import;

/// Result of importing the current room's document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Tiles were replaced and the room recomposited.
    Imported { layer_count: usize },

    /// Nothing was exported for this room yet.
    MissingDocument(PathBuf),
}

/// Render any missing tilesets for the current room and write its TMX document.
///
/// Returns the document path.
pub fn export_current_room(editor: &mut Editor) -> Result<PathBuf, TmxError> {
    let tileset_paths = editor.ensure_room_tilesets()?;
    let room = editor.room().ok_or(EditorError::NoRoom)?;
    let path = editor.paths().document_path(room);
    export(room, &tileset_paths, &path)?;
    Ok(path)
}

/// Replace the current room's tiles from its TMX document and recomposite.
pub fn import_current_room(editor: &mut Editor) -> Result<ImportOutcome, TmxError> {
    let path = editor.document_path().ok_or(EditorError::NoRoom)?;
    if !path.is_file() {
        warn!(
            "No Tiled document at {}. Export the room to Tiled first.",
            path.display()
        );
        return Ok(ImportOutcome::MissingDocument(path));
    }

    let room = editor.room_mut().ok_or(EditorError::NoRoom)?;
    let layer_count = import(&path, room)?;
    editor.recomposite()?;
    Ok(ImportOutcome::Imported { layer_count })
}
