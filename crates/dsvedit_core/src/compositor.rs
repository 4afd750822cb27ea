//! Room layer compositing.
//!
//! Every layer of a room is rasterized on its own from the cached tileset, then the
//! layers are ordered by depth (`-z_index`, stable) and can be flattened into one
//! alpha-blended room image.
//!
//! # Placement
//!
//! For the tile at flat position `p` of a layer `width` tiles wide:
//! - source cell: `(index % 16, index / 16)` of the tileset, 16×16 pixels
//! - destination: `(p % width, p / width)` tiles, i.e. pixel `(col * 16, row * 16)`
//! - horizontal then vertical mirror when flagged (the two commute)

use bevy::prelude::*;
use dsvedit_records::{Layer, RecordStore, Room, TILE_SIZE, TilesetRenderer};
use image::{Rgba, RgbaImage, imageops};

use crate::cache::{CacheError, TilesetCache};

/// One tile copied from the tileset into a layer raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlacement {
    /// Top-left pixel of the source cell in the tileset.
    pub source: UVec2,

    /// Top-left pixel of the destination cell in the layer.
    pub destination: UVec2,

    pub horizontal_flip: bool,
    pub vertical_flip: bool,
}

/// A rasterized layer: one paint unit.
#[derive(Debug, Clone)]
pub struct CompositedLayer {
    /// Position of the layer in `Room::layers`.
    pub layer_index: usize,

    /// `-z_index`. Lower depth paints first.
    pub depth: f32,

    /// `opacity / 31`.
    pub opacity: f32,

    pub placements: Vec<TilePlacement>,

    /// Layer pixels before opacity is applied.
    pub image: RgbaImage,
}

/// All layers of a room, in paint order.
#[derive(Debug, Clone)]
pub struct RoomComposite {
    /// Identity of the composited room.
    pub room_address: u32,

    /// Scene size in pixels, from the room extents.
    pub size: UVec2,

    /// Back to front.
    pub layers: Vec<CompositedLayer>,
}

impl RoomComposite {
    /// Layer indices in paint order, back to front.
    pub fn paint_order(&self) -> Vec<usize> {
        self.layers.iter().map(|layer| layer.layer_index).collect()
    }

    /// Blend every layer, back to front, into one image of `size`.
    pub fn flatten(&self) -> RgbaImage {
        let mut canvas = RgbaImage::new(self.size.x, self.size.y);
        for layer in &self.layers {
            for (x, y, pixel) in layer.image.enumerate_pixels() {
                if x >= canvas.width() || y >= canvas.height() {
                    continue;
                }
                blend_over(canvas.get_pixel_mut(x, y), *pixel, layer.opacity);
            }
        }
        canvas
    }
}

/// Builds [`RoomComposite`]s from room records.
pub struct LayerCompositor;

impl LayerCompositor {
    /// Composite every layer of `room`.
    ///
    /// A layer with tiles but zero width has no grid to place them on and is skipped
    /// with a warning.
    ///
    /// Tilesets missing from the cache are rendered on the way. The room itself is only
    /// read.
    pub fn composite(
        cache: &TilesetCache,
        store: &mut dyn RecordStore,
        renderer: &dyn TilesetRenderer,
        room: &Room,
    ) -> Result<RoomComposite, CacheError> {
        let mut layers = Vec::with_capacity(room.layers.len());

        for (layer_index, layer) in room.layers.iter().enumerate() {
            if layer.width == 0 && !layer.tiles.is_empty() {
                warn!(
                    "Skipping layer {layer_index} of room {:08X}: zero width with {} tiles",
                    room.metadata_address,
                    layer.tiles.len()
                );
                continue;
            }
            let tileset = cache.load(store, renderer, room, layer)?;
            let placements = Self::plan(layer);
            let image = Self::rasterize(layer, &placements, &tileset);

            layers.push(CompositedLayer {
                layer_index,
                depth: layer.depth(),
                opacity: layer.opacity_factor(),
                placements,
                image,
            });
        }

        // Stable: layers sharing a z_index keep record order, later ones on top.
        layers.sort_by(|a, b| a.depth.total_cmp(&b.depth));

        let (width, height) = room.pixel_size();
        debug!(
            "Composited room {:08X}: {} layers, {}x{} px",
            room.metadata_address,
            layers.len(),
            width,
            height
        );

        Ok(RoomComposite {
            room_address: room.metadata_address,
            size: UVec2::new(width, height),
            layers,
        })
    }

    /// Compute where every tile of `layer` comes from and goes to.
    pub fn plan(layer: &Layer) -> Vec<TilePlacement> {
        layer
            .iter_tiles()
            .map(|(x, y, tile)| {
                let (source_x, source_y) = tile.tileset_origin();
                TilePlacement {
                    source: UVec2::new(source_x, source_y),
                    destination: UVec2::new(x * TILE_SIZE, y * TILE_SIZE),
                    horizontal_flip: tile.horizontal_flip,
                    vertical_flip: tile.vertical_flip,
                }
            })
            .collect()
    }

    /// Draw `placements` from `tileset` into a fresh layer-sized image.
    pub fn rasterize(
        layer: &Layer,
        placements: &[TilePlacement],
        tileset: &RgbaImage,
    ) -> RgbaImage {
        let mut canvas = RgbaImage::new(layer.width * TILE_SIZE, layer.height() * TILE_SIZE);
        for placement in placements {
            let cell = Self::extract_cell(tileset, placement);
            imageops::replace(
                &mut canvas,
                &cell,
                i64::from(placement.destination.x),
                i64::from(placement.destination.y),
            );
        }
        canvas
    }

    /// Copy one 16×16 cell out of the tileset and apply its mirrors.
    pub fn extract_cell(tileset: &RgbaImage, placement: &TilePlacement) -> RgbaImage {
        let mut cell = imageops::crop_imm(
            tileset,
            placement.source.x,
            placement.source.y,
            TILE_SIZE,
            TILE_SIZE,
        )
        .to_image();
        if placement.horizontal_flip {
            imageops::flip_horizontal_in_place(&mut cell);
        }
        if placement.vertical_flip {
            imageops::flip_vertical_in_place(&mut cell);
        }
        cell
    }
}

/// Porter-Duff "over" with an extra opacity factor on the source.
fn blend_over(destination: &mut Rgba<u8>, source: Rgba<u8>, opacity: f32) {
    let source_alpha = f32::from(source[3]) / 255.0 * opacity;
    if source_alpha <= 0.0 {
        return;
    }
    let destination_alpha = f32::from(destination[3]) / 255.0;
    let out_alpha = source_alpha + destination_alpha * (1.0 - source_alpha);

    for channel in 0..3 {
        let s = f32::from(source[channel]) / 255.0;
        let d = f32::from(destination[channel]) / 255.0;
        let out = (s * source_alpha + d * destination_alpha * (1.0 - source_alpha)) / out_alpha;
        destination[channel] = (out * 255.0).round() as u8;
    }
    destination[3] = (out_alpha * 255.0).round() as u8;
}
