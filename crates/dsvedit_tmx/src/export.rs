//! Room → TMX.
//!
//! Every room layer becomes one finite, CSV-encoded tile layer. Each distinct tileset
//! file becomes one embedded 16×16-cell tileset whose image is the cached raster, so
//! Tiled shows exactly what the compositor draws.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use dsvedit_records::{Layer, Room, Tile, TILE_SIZE, TILESET_CELLS, TILESET_COLUMNS};
use normalize_path::NormalizePath;

use crate::error::TmxError;

/// Tiled's horizontal flip bit in a global tile id.
pub const FLIPPED_HORIZONTALLY_FLAG: u32 = 0x8000_0000;

/// Tiled's vertical flip bit in a global tile id.
pub const FLIPPED_VERTICALLY_FLAG: u32 = 0x4000_0000;

/// Name of the layer property carrying the room layer's z index.
pub const Z_INDEX_PROPERTY: &str = "z_index";

/// Encode `tile` as a global tile id for a tileset starting at `first_gid`.
pub fn encode_gid(first_gid: u32, tile: Tile) -> u32 {
    let mut gid = first_gid + u32::from(tile.index_on_tileset);
    if tile.horizontal_flip {
        gid |= FLIPPED_HORIZONTALLY_FLAG;
    }
    if tile.vertical_flip {
        gid |= FLIPPED_VERTICALLY_FLAG;
    }
    gid
}

/// First global id of the `ordinal`-th embedded tileset.
pub fn first_gid(ordinal: usize) -> u32 {
    1 + ordinal as u32 * TILESET_CELLS
}

/// An embedded tileset entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesetEntry {
    pub first_gid: u32,
    pub name: String,
    /// Image path as written into the document, relative to it when possible.
    pub image_source: String,
}

/// A tile layer entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerEntry {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub opacity: f32,
    pub z_index: i32,
    pub gids: Vec<u32>,
}

/// In-memory TMX document for one room.
#[derive(Debug, Clone, PartialEq)]
pub struct TmxDocument {
    pub width: u32,
    pub height: u32,
    pub tilesets: Vec<TilesetEntry>,
    pub layers: Vec<LayerEntry>,
}

impl TmxDocument {
    /// Build the document for `room`.
    ///
    /// `tileset_paths[i]` is the cached tileset raster of `room.layers[i]`. Layers sharing a
    /// raster share one embedded tileset. Image sources are written relative to
    /// `document_dir` when the raster lives under it.
    pub fn from_room(
        room: &Room,
        tileset_paths: &[PathBuf],
        document_dir: &Path,
    ) -> Result<Self, TmxError> {
        if tileset_paths.len() != room.layers.len() {
            return Err(TmxError::TilesetPathCount {
                expected: room.layers.len(),
                found: tileset_paths.len(),
            });
        }

        let mut tilesets: Vec<(PathBuf, TilesetEntry)> = Vec::new();
        let mut layers = Vec::with_capacity(room.layers.len());

        for (index, (layer, path)) in room.layers.iter().zip(tileset_paths).enumerate() {
            if !layer.is_rectangular() {
                return Err(TmxError::RaggedLayer {
                    layer: index,
                    width: layer.width,
                    tiles: layer.tiles.len(),
                });
            }

            let first_gid = match tilesets.iter().find(|(known, _)| known == path) {
                Some((_, entry)) => entry.first_gid,
                None => {
                    let entry = TilesetEntry {
                        first_gid: first_gid(tilesets.len()),
                        name: room.tileset_filename(layer),
                        image_source: image_source(path, document_dir),
                    };
                    let first_gid = entry.first_gid;
                    tilesets.push((path.clone(), entry));
                    first_gid
                }
            };

            layers.push(layer_entry(index, layer, first_gid));
        }

        Ok(Self {
            width: layers.iter().map(|layer| layer.width).max().unwrap_or(0),
            height: layers.iter().map(|layer| layer.height).max().unwrap_or(0),
            tilesets: tilesets.into_iter().map(|(_, entry)| entry).collect(),
            layers,
        })
    }

    /// Serialize as TMX XML.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!(
            "<map version=\"1.10\" orientation=\"orthogonal\" renderorder=\"right-down\" \
             width=\"{}\" height=\"{}\" tilewidth=\"{TILE_SIZE}\" tileheight=\"{TILE_SIZE}\" \
             infinite=\"0\" nextlayerid=\"{}\" nextobjectid=\"1\">\n",
            self.width,
            self.height,
            self.layers.len() + 1
        ));

        let sheet_size = TILESET_COLUMNS * TILE_SIZE;
        for tileset in &self.tilesets {
            xml.push_str(&format!(
                " <tileset firstgid=\"{}\" name=\"{}\" tilewidth=\"{TILE_SIZE}\" \
                 tileheight=\"{TILE_SIZE}\" tilecount=\"{TILESET_CELLS}\" \
                 columns=\"{TILESET_COLUMNS}\">\n",
                tileset.first_gid,
                escape(&tileset.name)
            ));
            xml.push_str(&format!(
                "  <image source=\"{}\" width=\"{sheet_size}\" height=\"{sheet_size}\"/>\n",
                escape(&tileset.image_source)
            ));
            xml.push_str(" </tileset>\n");
        }

        for (index, layer) in self.layers.iter().enumerate() {
            xml.push_str(&format!(
                " <layer id=\"{}\" name=\"{}\" width=\"{}\" height=\"{}\" opacity=\"{}\">\n",
                index + 1,
                escape(&layer.name),
                layer.width,
                layer.height,
                layer.opacity
            ));
            xml.push_str(&format!(
                "  <properties>\n   <property name=\"{Z_INDEX_PROPERTY}\" type=\"int\" value=\"{}\"/>\n  </properties>\n",
                layer.z_index
            ));
            xml.push_str("  <data encoding=\"csv\">\n");
            let rows: Vec<String> = layer
                .gids
                .chunks(layer.width.max(1) as usize)
                .map(|row| {
                    row.iter()
                        .map(u32::to_string)
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .collect();
            xml.push_str(&rows.join(",\n"));
            xml.push_str("\n</data>\n </layer>\n");
        }

        xml.push_str("</map>\n");
        xml
    }

    /// Write the document to `path`, creating parent folders.
    pub fn write(&self, path: &Path) -> Result<(), TmxError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_xml())?;
        Ok(())
    }
}

/// Export `room` to a TMX file at `path`.
///
/// `tileset_paths` must hold one cached raster per layer, in layer order.
pub fn export(room: &Room, tileset_paths: &[PathBuf], path: &Path) -> Result<(), TmxError> {
    let document_dir = path.parent().unwrap_or(Path::new(""));
    let document = TmxDocument::from_room(room, tileset_paths, document_dir)?;
    document.write(path)?;
    info!(
        "Exported room {:08X} ({} layers, {} tilesets) to {}",
        room.metadata_address,
        document.layers.len(),
        document.tilesets.len(),
        path.display()
    );
    Ok(())
}

fn layer_entry(index: usize, layer: &Layer, first_gid: u32) -> LayerEntry {
    LayerEntry {
        name: format!("Layer {index}"),
        width: layer.width,
        height: layer.height(),
        opacity: layer.opacity_factor(),
        z_index: layer.z_index,
        gids: layer
            .tiles
            .iter()
            .map(|tile| encode_gid(first_gid, *tile))
            .collect(),
    }
}

fn image_source(tileset_path: &Path, document_dir: &Path) -> String {
    let tileset_path = tileset_path.normalize();
    let source = tileset_path
        .strip_prefix(document_dir.normalize())
        .unwrap_or(&tileset_path);
    source.to_string_lossy().replace('\\', "/")
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
