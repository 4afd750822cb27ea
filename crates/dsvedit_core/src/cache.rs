//! File-backed tileset cache.
//!
//! Rendered tilesets are written under
//! `<export root>/Exported <game>/rooms/<area name>/Tilesets/<tileset filename>.png` and
//! reused on every later composite, across sessions. There is no invalidation: the
//! renderer is a pure function of the inputs encoded in the file name.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use dsvedit_records::{Game, Layer, RecordStore, RenderError, Room, StoreError};
use dsvedit_records::{TilesetRenderer, TilesetRequest};
use image::RgbaImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to load overlay for room {room:08X}: {source}")]
    Overlay {
        room: u32,
        #[source]
        source: StoreError,
    },

    #[error("Failed to render tileset {}: {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("Renderer did not produce {}", .0.display())]
    MissingAfterRender(PathBuf),

    #[error("Tileset {} is unreadable: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Layout of everything written under the export root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    root: PathBuf,
    game: Game,
}

impl ExportPaths {
    pub fn new(root: impl Into<PathBuf>, game: Game) -> Self {
        Self {
            root: root.into(),
            game,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn game(&self) -> Game {
        self.game
    }

    /// `<root>/Exported <game>/rooms`
    pub fn rooms_folder(&self) -> PathBuf {
        self.root
            .join(format!("Exported {}", self.game.code()))
            .join("rooms")
    }

    pub fn area_folder(&self, area_name: &str) -> PathBuf {
        self.rooms_folder().join(area_name)
    }

    pub fn tileset_path(&self, room: &Room, layer: &Layer) -> PathBuf {
        self.area_folder(&room.area_name)
            .join("Tilesets")
            .join(format!("{}.png", room.tileset_filename(layer)))
    }

    /// Tiled document for a room.
    pub fn document_path(&self, room: &Room) -> PathBuf {
        self.area_folder(&room.area_name)
            .join(format!("{}.tmx", room.filename()))
    }

    /// Image written by a build.
    pub fn rom_output_path(&self) -> PathBuf {
        self.root.join(format!("{} hack.nds", self.game.code()))
    }
}

/// Makes sure a rendered tileset exists for a layer before it is sampled.
#[derive(Debug, Clone)]
pub struct TilesetCache {
    paths: ExportPaths,
}

impl TilesetCache {
    pub fn new(paths: ExportPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ExportPaths {
        &self.paths
    }

    pub fn is_resident(&self, room: &Room, layer: &Layer) -> bool {
        self.paths.tileset_path(room, layer).is_file()
    }

    /// Return the tileset file for `layer`, rendering it first on a miss.
    ///
    /// A hit touches neither the store nor the renderer. A miss loads the room's overlay
    /// (idempotent on the store side) and renders into the cache path.
    pub fn ensure(
        &self,
        store: &mut dyn RecordStore,
        renderer: &dyn TilesetRenderer,
        room: &Room,
        layer: &Layer,
    ) -> Result<PathBuf, CacheError> {
        let path = self.paths.tileset_path(room, layer);
        if path.is_file() {
            debug!("Tileset cache hit: {}", path.display());
            return Ok(path);
        }

        info!(
            "Rendering tileset {} for room {:08X}",
            path.display(),
            room.metadata_address
        );

        store
            .load_overlay(room.overlay)
            .map_err(|source| CacheError::Overlay {
                room: room.metadata_address,
                source,
            })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let request = TilesetRequest {
            tileset_address: layer.tileset_address,
            palette_offset: room.palette_offset,
            graphic_tilesets: &room.graphic_tilesets,
            colors_per_palette: layer.colors_per_palette,
            collision_tileset_address: layer.collision_tileset_address,
        };
        renderer
            .render_tileset(&request, &path)
            .map_err(|source| CacheError::Render {
                path: path.clone(),
                source,
            })?;

        if !path.is_file() {
            return Err(CacheError::MissingAfterRender(path));
        }
        Ok(path)
    }

    /// Ensure every layer of `room`, returning the tileset paths in layer order.
    pub fn ensure_room(
        &self,
        store: &mut dyn RecordStore,
        renderer: &dyn TilesetRenderer,
        room: &Room,
    ) -> Result<Vec<PathBuf>, CacheError> {
        room.layers
            .iter()
            .map(|layer| self.ensure(store, renderer, room, layer))
            .collect()
    }

    /// Ensure and decode the tileset for `layer`.
    pub fn load(
        &self,
        store: &mut dyn RecordStore,
        renderer: &dyn TilesetRenderer,
        room: &Room,
        layer: &Layer,
    ) -> Result<RgbaImage, CacheError> {
        let path = self.ensure(store, renderer, room, layer)?;
        let image = image::open(&path).map_err(|source| CacheError::Image {
            path: path.clone(),
            source,
        })?;
        Ok(image.to_rgba8())
    }
}
