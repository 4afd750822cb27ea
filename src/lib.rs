//! # dsvedit
//!
//! Level editing for the three Nintendo DS Castlevania games: room compositing,
//! overworld map navigation and Tiled interchange.
//!
//! This is a unified meta-crate that combines the `dsvedit_*` sub-crates with the session
//! workflows (open, export to Tiled, build) around them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use dsvedit::prelude::*;
//! use dsvedit::session;
//!
//! fn open(opener: &dyn StoreOpener, world: &mut World) -> Result<(), SessionError> {
//!     let config = world.resource::<EditorConfig>().clone();
//!     let mut settings = Settings::load(Settings::DEFAULT_PATH.as_ref()).unwrap_or_default();
//!     if let Some(editor) = session::reopen_last_folder(opener, &config, &mut settings)? {
//!         world.insert_resource(editor);
//!     }
//!     Ok(())
//! }
//!
//! App::new().add_plugins(DsveditPlugin::default()).run();
//! ```
//!
//! ## Features
//!
//! - **default**: Includes `tmx`
//! - **tmx**: Tiled TMX export and import
//!
//! ## Architecture
//!
//! - **Layer 1** ([`records`]): Record model, game detection and the store/renderer seams
//! - **Layer 2** ([`core`]): Tileset cache, compositing, map navigation, selection
//! - **Layer 3** (optional): [`tmx`] interchange

pub mod plugin;
pub mod session;

// Re-export sub-crates for advanced usage
pub use dsvedit_core as core;
pub use dsvedit_records as records;

#[cfg(feature = "tmx")]
pub use dsvedit_tmx as tmx;

/// Unified prelude for dsvedit
pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::records::prelude::*;

    #[cfg(feature = "tmx")]
    pub use crate::tmx::{DsveditTmxPlugin, ExportRoom, ImportOutcome, ImportRoom, RoomExported};

    pub use crate::plugin::DsveditPlugin;
    pub use crate::session::SessionError;
}
