//! Layer and tile records.
//!
//! Layer width is always counted in tiles. Room extents are stored in screens; use
//! [`Layer::width_in_screens`] and [`Layer::height_in_screens`] to convert.

use super::{
    OPACITY_MAX, SCREEN_HEIGHT_IN_TILES, SCREEN_WIDTH_IN_TILES, TILE_SIZE, TILESET_COLUMNS,
};

/// One cell of a layer: a tileset index plus its flip flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tile {
    /// Index into the layer's 256-cell tileset.
    pub index_on_tileset: u8,

    /// Mirror the cell left to right.
    pub horizontal_flip: bool,

    /// Mirror the cell top to bottom.
    pub vertical_flip: bool,
}

impl Tile {
    pub fn new(index_on_tileset: u8, horizontal_flip: bool, vertical_flip: bool) -> Self {
        Self {
            index_on_tileset,
            horizontal_flip,
            vertical_flip,
        }
    }

    /// Unflipped tile.
    pub fn plain(index_on_tileset: u8) -> Self {
        Self::new(index_on_tileset, false, false)
    }

    /// `(column, row)` of this tile's cell in the tileset grid.
    pub fn tileset_cell(&self) -> (u32, u32) {
        let index = u32::from(self.index_on_tileset);
        (index % TILESET_COLUMNS, index / TILESET_COLUMNS)
    }

    /// Top-left pixel of this tile's cell in the tileset sheet.
    pub fn tileset_origin(&self) -> (u32, u32) {
        let (column, row) = self.tileset_cell();
        (column * TILE_SIZE, row * TILE_SIZE)
    }
}

/// A single tile layer of a room.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layer {
    /// Paint-order key. Larger values sit further back.
    pub z_index: i32,

    /// 0..=31, where 31 is opaque.
    pub opacity: u8,

    /// Width in tiles.
    pub width: u32,

    /// Address of the tileset graphics list for this layer.
    pub tileset_address: u32,

    /// Address of the collision tileset paired with the graphics.
    pub collision_tileset_address: u32,

    /// Color depth of the graphics (16 or 256 colors per palette).
    pub colors_per_palette: u16,

    /// Row-major tiles, `width × height` long.
    pub tiles: Vec<Tile>,
}

impl Layer {
    /// Height in tiles, derived from the tile count.
    pub fn height(&self) -> u32 {
        if self.width == 0 {
            return 0;
        }
        (self.tiles.len() as u32).div_ceil(self.width)
    }

    pub fn width_in_screens(&self) -> u32 {
        self.width.div_ceil(SCREEN_WIDTH_IN_TILES)
    }

    pub fn height_in_screens(&self) -> u32 {
        self.height().div_ceil(SCREEN_HEIGHT_IN_TILES)
    }

    /// Width in tiles for a layer spanning `screens` screens.
    pub fn screens_to_tiles(screens: u32) -> u32 {
        screens * SCREEN_WIDTH_IN_TILES
    }

    /// True when the tile sequence fills a whole `width × height` grid.
    pub fn is_rectangular(&self) -> bool {
        self.width != 0 && self.tiles.len() as u32 % self.width == 0
    }

    /// Opacity as a 0.0..=1.0 factor.
    pub fn opacity_factor(&self) -> f32 {
        f32::from(self.opacity.min(OPACITY_MAX)) / f32::from(OPACITY_MAX)
    }

    /// Paint depth of the layer: `-z_index`.
    pub fn depth(&self) -> f32 {
        -(self.z_index as f32)
    }

    /// Grid position, in tiles, of the tile at flat position `index`.
    ///
    /// A zero-width layer has no grid; this only guards the division. Such layers are
    /// skipped when compositing and rejected on TMX export.
    pub fn position_of(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        let width = self.width.max(1);
        (index % width, index / width)
    }

    /// Iterate tiles with their `(x, y)` grid positions.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (u32, u32, &Tile)> {
        self.tiles.iter().enumerate().map(|(index, tile)| {
            let (x, y) = self.position_of(index);
            (x, y, tile)
        })
    }

    /// File stem of the rendered tileset for this layer.
    ///
    /// Every renderer input that changes the output pixels (other than the room's
    /// graphic tileset list, which is fixed per tileset address) is part of the name.
    pub fn tileset_filename(&self, palette_offset: u32) -> String {
        format!(
            "{:08X}-{:08X}_{:08X}-{:03}",
            self.tileset_address,
            palette_offset,
            self.collision_tileset_address,
            self.colors_per_palette
        )
    }
}
