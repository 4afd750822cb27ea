//! Tiled TMX interchange for `dsvedit`.
//!
//! Exports a room as a TMX document whose tilesets are the editor's cached rasters, and
//! imports the edited document back into the room.
//!
//! # Features
//!
//! - **Bit-exact tiles**: tile index and both flips survive export → import unchanged
//! - **Shared tilesets**: layers drawing from the same raster share one embedded tileset
//! - **All-or-nothing import**: a document that does not match the room's layer shape is
//!   rejected before any tile is written
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use dsvedit_core::DsveditCorePlugin;
//! use dsvedit_tmx::{DsveditTmxPlugin, ExportRoom};
//!
//! App::new()
//!     .add_plugins(DsveditCorePlugin::default())
//!     .add_plugins(DsveditTmxPlugin)
//!     .add_systems(Update, |mut commands: Commands| commands.trigger(ExportRoom))
//!     .run();
//! ```

pub mod error;
pub mod export;
pub mod import;
pub mod interchange;
pub mod plugin;

#[cfg(test)]
mod test_support;

pub use error::TmxError;
pub use export::{
    FLIPPED_HORIZONTALLY_FLAG, FLIPPED_VERTICALLY_FLAG, TmxDocument, encode_gid, export,
};
pub use import::{decode, import};
pub use interchange::{ImportOutcome, export_current_room, import_current_room};
pub use plugin::{DsveditTmxPlugin, ExportRoom, ImportRoom, RoomExported};
