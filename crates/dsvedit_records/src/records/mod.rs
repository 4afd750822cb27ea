//! Level record value types.
//!
//! The tree is rebuilt wholesale by the record store on every area selection and
//! discarded on the next one. Nothing here holds a reference into another record;
//! cross links (map tiles to rooms) are plain indices.

pub mod area;
pub mod layer;
pub mod map;
pub mod room;

pub use area::{Area, OverlayId, Sector};
pub use layer::{Layer, Tile};
pub use map::{Map, MapTile};
pub use room::{Door, Room};

/// Side length of one tileset cell in pixels.
pub const TILE_SIZE: u32 = 16;

/// Columns in a tileset sheet. Cell `i` sits at column `i % 16`, row `i / 16`.
pub const TILESET_COLUMNS: u32 = 16;

/// Cells in a tileset sheet (16×16 grid).
pub const TILESET_CELLS: u32 = 256;

/// A screen is 16 tiles across.
pub const SCREEN_WIDTH_IN_TILES: u32 = 16;

/// A screen is 12 tiles down.
pub const SCREEN_HEIGHT_IN_TILES: u32 = 12;

pub const SCREEN_WIDTH_IN_PIXELS: u32 = SCREEN_WIDTH_IN_TILES * TILE_SIZE;
pub const SCREEN_HEIGHT_IN_PIXELS: u32 = SCREEN_HEIGHT_IN_TILES * TILE_SIZE;

/// Layer opacity value meaning fully opaque.
pub const OPACITY_MAX: u8 = 31;
