//! # `dsvedit_core`
//!
//! Everything between the record store and the screen: the on-disk tileset cache, room
//! and map compositing, and the area/sector/room selection state machine.
//!
//! **This crate does NOT read game files or render tilesets itself** - it drives the
//! [`RecordStore`](dsvedit_records::RecordStore) and
//! [`TilesetRenderer`](dsvedit_records::TilesetRenderer) seams from `dsvedit_records`.
//!
//! ## What This Crate Provides
//!
//! 1. **Tileset cache**: one PNG per (tileset, palette, graphics, collision) combination,
//!    rendered on first use and reused across sessions
//! 2. **Room compositing**: per-layer rasters with flips, opacity and depth ordering
//! 3. **Map compositing**: the area map image plus its clickable units
//! 4. **Selection**: the [`Editor`] resource and the observers that drive it
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use dsvedit_core::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DsveditCorePlugin::default())
//!         .add_observer(on_room_composited)
//!         .run();
//! }
//!
//! fn on_room_composited(trigger: On<RoomComposited>, editor: Res<Editor>) {
//!     let Some(composite) = editor.room_composite() else {
//!         return;
//!     };
//!     info!("{} layers at {:?}", trigger.event().layer_count, composite.size);
//! }
//! ```

pub mod cache;
pub mod compositor;
pub mod config;
pub mod editor;
pub mod events;
pub mod map;
pub mod navigator;
pub mod plugin;
pub mod selection;
pub mod settings;

#[cfg(test)]
mod test_support;

pub use cache::{CacheError, ExportPaths, TilesetCache};
pub use compositor::{CompositedLayer, LayerCompositor, RoomComposite, TilePlacement};
pub use config::EditorConfig;
pub use editor::{Editor, EditorError};
pub use map::{MapComposite, MapCompositor, MapUnit};
pub use navigator::MapNavigator;
pub use plugin::DsveditCorePlugin;
pub use selection::{AreaList, RebuildCounters, Selection};
pub use settings::{Settings, SettingsError};

pub mod prelude {
    //! Common imports for `dsvedit_core` users.

    pub use crate::cache::{ExportPaths, TilesetCache};
    pub use crate::compositor::{CompositedLayer, RoomComposite};
    pub use crate::config::EditorConfig;
    pub use crate::editor::{Editor, EditorError};
    pub use crate::events::{
        AreaLoaded, EditorCommand, NavigateToRoom, RoomComposited, SelectArea, SelectRoom,
        SelectSector,
    };
    pub use crate::map::{MapComposite, MapUnit};
    pub use crate::plugin::DsveditCorePlugin;
    pub use crate::selection::Selection;
    pub use crate::settings::Settings;
}
