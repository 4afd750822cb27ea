//! Plugin exposing Tiled interchange as events.

use std::path::PathBuf;

use bevy::prelude::*;
use dsvedit_core::Editor;
use dsvedit_core::events::RoomComposited;

use crate::interchange::{ImportOutcome, export_current_room, import_current_room};

/// Write the current room's TMX document.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportRoom;

/// Replace the current room's tiles from its TMX document.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportRoom;

/// Fired after a document was written.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct RoomExported {
    pub room_address: u32,
    pub path: PathBuf,
}

/// Plugin that handles [`ExportRoom`] and [`ImportRoom`].
///
/// A successful import also triggers [`RoomComposited`], since the room's raster was
/// rebuilt.
#[derive(Default)]
pub struct DsveditTmxPlugin;

impl Plugin for DsveditTmxPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(on_export_room);
        app.add_observer(on_import_room);

        debug!("DsveditTmxPlugin initialized");
    }
}

fn on_export_room(
    _trigger: On<ExportRoom>,
    editor: Option<ResMut<Editor>>,
    mut commands: Commands,
) {
    let Some(mut editor) = editor else {
        warn!("Ignoring export: no game is open");
        return;
    };

    match export_current_room(&mut editor) {
        Ok(path) => {
            let room_address = editor.room().map_or(0, |room| room.metadata_address);
            commands.trigger(RoomExported { room_address, path });
        }
        Err(err) => error!("Export to Tiled failed: {err}"),
    }
}

fn on_import_room(
    _trigger: On<ImportRoom>,
    editor: Option<ResMut<Editor>>,
    mut commands: Commands,
) {
    let Some(mut editor) = editor else {
        warn!("Ignoring import: no game is open");
        return;
    };

    match import_current_room(&mut editor) {
        Ok(ImportOutcome::Imported { .. }) => {
            if let (Some(room), Some(composite)) = (editor.room(), editor.room_composite()) {
                commands.trigger(RoomComposited {
                    sector_index: room.sector_index,
                    room_index: room.room_index,
                    room_address: composite.room_address,
                    layer_count: composite.layers.len(),
                });
            }
        }
        Ok(ImportOutcome::MissingDocument(_)) => {}
        Err(err) => error!("Import from Tiled failed: {err}"),
    }
}
