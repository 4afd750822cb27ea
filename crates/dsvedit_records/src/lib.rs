//! # `dsvedit_records`
//!
//! Layer 1 of `dsvedit`: the level record model and the seams to the collaborators that
//! live outside this workspace.
//!
//! ## What Layer 1 Provides
//!
//! 1. **Record tree**: [`Area`] → [`Sector`] → [`Room`] → [`Layer`] → [`Tile`], plus the
//!    overworld [`Map`] and room [`Door`]s. These are plain values with no behavior
//!    beyond derived keys and unit conversions.
//! 2. **Game detection**: [`Game`] recognizes the three supported cartridges by their
//!    header signature.
//! 3. **Collaborator traits**: [`RecordStore`], [`TilesetRenderer`] and [`StoreOpener`]
//!    describe the extraction store and the pixel renderer. This crate never parses ROM
//!    bytes itself.
//!
//! ## What Layer 1 Does NOT Provide
//!
//! - Rasterization, caching or compositing (see `dsvedit_core`)
//! - Tiled interchange (see `dsvedit_tmx`)

pub mod game;
pub mod records;
pub mod store;

pub use game::Game;
pub use records::{
    Area, Door, Layer, Map, MapTile, OverlayId, Room, Sector, Tile, OPACITY_MAX,
    SCREEN_HEIGHT_IN_PIXELS, SCREEN_HEIGHT_IN_TILES, SCREEN_WIDTH_IN_PIXELS,
    SCREEN_WIDTH_IN_TILES, TILE_SIZE, TILESET_CELLS, TILESET_COLUMNS,
};
pub use store::{
    AreaEntry, OpenedStore, RecordStore, RenderError, StoreError, StoreOpener,
    TilesetRenderer, TilesetRequest,
};

pub mod prelude {
    //! Common imports for `dsvedit_records` users.

    pub use crate::game::Game;
    pub use crate::records::{Area, Door, Layer, Map, MapTile, OverlayId, Room, Sector, Tile};
    pub use crate::store::{
        AreaEntry, OpenedStore, RecordStore, RenderError, StoreError, StoreOpener,
        TilesetRenderer, TilesetRequest,
    };
}
