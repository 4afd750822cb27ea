//! Seams to the record store and the pixel renderer.
//!
//! Both collaborators live outside this workspace. The store owns the extracted
//! filesystem and knows how to decode level records; the renderer turns tileset and map
//! records into images. Renderer output is a pure function of its inputs, which is what
//! makes the file-backed tileset cache in `dsvedit_core` safe without invalidation.

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::game::Game;
use crate::records::{Area, Map, OverlayId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Unknown {0}")]
    UnknownOverlay(OverlayId),

    #[error("Area {0} does not exist")]
    UnknownArea(usize),

    #[error("Malformed record data: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Renderer failed: {0}")]
    Failed(String),
}

/// Dropdown entry for an area, available without decoding the area itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaEntry {
    pub index: usize,
    pub name: String,
}

impl AreaEntry {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    /// Area dropdown label, `"%02d %s"`.
    pub fn label(&self) -> String {
        format!("{:02} {}", self.index, self.name)
    }
}

/// Access to the extracted game data.
pub trait RecordStore: Send + Sync {
    /// Overlays that stay resident for the whole session.
    fn constant_overlays(&self) -> Vec<OverlayId>;

    /// Areas in index order.
    fn areas(&self) -> Vec<AreaEntry>;

    /// Decode the full record tree of one area.
    fn read_area(&self, area_index: usize) -> Result<Area, StoreError>;

    /// Make an overlay resident. Loading an already resident overlay is a no-op.
    fn load_overlay(&mut self, overlay: OverlayId) -> Result<(), StoreError>;

    /// Flush pending record edits to the extracted files.
    fn commit_file_changes(&mut self) -> Result<(), StoreError>;

    /// Rebuild a playable image from the extracted files.
    fn write_to_rom(&mut self, output_path: &Path) -> Result<(), StoreError>;
}

/// Inputs of one tileset render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilesetRequest<'a> {
    pub tileset_address: u32,
    pub palette_offset: u32,
    pub graphic_tilesets: &'a [u32],
    pub colors_per_palette: u16,
    pub collision_tileset_address: u32,
}

/// Pixel renderer for tilesets and area maps.
pub trait TilesetRenderer: Send + Sync {
    /// Render a 256×256 tileset sheet and write it as a PNG at `output_path`.
    fn render_tileset(
        &self,
        request: &TilesetRequest<'_>,
        output_path: &Path,
    ) -> Result<(), RenderError>;

    /// Render an area's overworld map to encoded image bytes.
    fn render_map(&self, map: &Map) -> Result<Vec<u8>, RenderError>;
}

/// A freshly opened store with a renderer bound to it.
pub struct OpenedStore {
    pub store: Box<dyn RecordStore>,
    pub renderer: Box<dyn TilesetRenderer>,
}

/// Creates stores from a ROM image or an already extracted folder.
pub trait StoreOpener {
    /// Extract `rom_path` into `folder` and open the result.
    fn open_and_extract_rom(
        &self,
        game: Game,
        rom_path: &Path,
        folder: &Path,
    ) -> Result<OpenedStore, StoreError>;

    /// Open a folder produced by a previous extraction.
    fn open_directory(&self, game: Game, folder: &Path) -> Result<OpenedStore, StoreError>;
}
