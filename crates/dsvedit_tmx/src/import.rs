//! TMX → room.
//!
//! Tile layers are matched to room layers by position; other layer kinds are skipped.
//! The whole document is decoded before anything is written, so a mismatch leaves the
//! room exactly as it was.

use std::path::Path;

use bevy::prelude::*;
use dsvedit_records::{Layer, Room, Tile, TILESET_CELLS};
use tiled::{LayerType, TileLayer};

use crate::error::TmxError;

/// Parse the TMX file at `path`.
pub fn load(path: &Path) -> Result<tiled::Map, TmxError> {
    let mut loader = tiled::Loader::new();
    Ok(loader.load_tmx_map(path)?)
}

/// Decode every tile layer of `map` against the shape of `room`.
///
/// Returns one tile sequence per room layer, in layer order. Empty cells decode as
/// tile 0 without flips. Tiled's diagonal flip has no counterpart and is dropped.
pub fn decode(map: &tiled::Map, room: &Room) -> Result<Vec<Vec<Tile>>, TmxError> {
    let tile_layers: Vec<TileLayer<'_>> = map
        .layers()
        .filter_map(|layer| match layer.layer_type() {
            LayerType::Tiles(tile_layer) => Some(tile_layer),
            _ => None,
        })
        .collect();

    if tile_layers.len() != room.layers.len() {
        return Err(TmxError::LayerCountMismatch {
            expected: room.layers.len(),
            found: tile_layers.len(),
        });
    }

    tile_layers
        .iter()
        .zip(&room.layers)
        .enumerate()
        .map(|(index, (tile_layer, layer))| decode_layer(index, tile_layer, layer))
        .collect()
}

fn decode_layer(
    index: usize,
    tile_layer: &TileLayer<'_>,
    layer: &Layer,
) -> Result<Vec<Tile>, TmxError> {
    let (Some(width), Some(height)) = (tile_layer.width(), tile_layer.height()) else {
        return Err(TmxError::InfiniteLayer(index));
    };

    let found = (width * height) as usize;
    if found != layer.tiles.len() {
        return Err(TmxError::TileCountMismatch {
            layer: index,
            expected: layer.tiles.len(),
            found,
        });
    }
    if width != layer.width {
        return Err(TmxError::LayerWidthMismatch {
            layer: index,
            expected: layer.width,
            found: width,
        });
    }

    let mut tiles = Vec::with_capacity(found);
    let mut diagonal = 0usize;
    for y in 0..height {
        for x in 0..width {
            let Some(tile) = tile_layer.get_tile(x as i32, y as i32) else {
                tiles.push(Tile::default());
                continue;
            };
            let id = tile.id();
            if id >= TILESET_CELLS {
                return Err(TmxError::TileOutOfRange { layer: index, id });
            }
            if tile.flip_d {
                diagonal += 1;
            }
            tiles.push(Tile::new(id as u8, tile.flip_h, tile.flip_v));
        }
    }

    if diagonal > 0 {
        warn!("Layer {index}: ignored diagonal flip on {diagonal} tiles");
    }
    Ok(tiles)
}

/// Overwrite `room`'s tiles from the TMX file at `path`.
///
/// On error the room is left untouched. Returns the number of layers replaced.
pub fn import(path: &Path, room: &mut Room) -> Result<usize, TmxError> {
    let map = load(path)?;
    let decoded = decode(&map, room)?;

    let count = decoded.len();
    for (layer, tiles) in room.layers.iter_mut().zip(decoded) {
        layer.tiles = tiles;
    }
    info!(
        "Imported {count} layers into room {:08X} from {}",
        room.metadata_address,
        path.display()
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::export;
    use dsvedit_records::{OPACITY_MAX, OverlayId};
    use std::fs;
    use std::path::PathBuf;

    fn layer(z_index: i32, width: u32, tiles: Vec<Tile>, tileset_address: u32) -> Layer {
        Layer {
            z_index,
            opacity: OPACITY_MAX,
            width,
            tileset_address,
            collision_tileset_address: 0,
            colors_per_palette: 16,
            tiles,
        }
    }

    fn room() -> Room {
        let front = (0..32u32)
            .map(|i| Tile::new((i * 8) as u8, i % 2 == 0, i % 3 == 0))
            .collect();
        let back = (0..32u32).map(|i| Tile::new(255 - i as u8, true, true)).collect();
        Room::new(0x0200_1000, 0, 0, 0, OverlayId(0), "Castle")
            .with_layer(layer(0, 8, front, 0x10))
            .with_layer(layer(1, 16, back, 0x20))
    }

    fn exported(room: &Room) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let document = dir.path().join("room.tmx");
        let paths: Vec<PathBuf> = room
            .layers
            .iter()
            .map(|layer| dir.path().join(format!("{}.png", room.tileset_filename(layer))))
            .collect();
        export(room, &paths, &document).unwrap();
        (dir, document)
    }

    fn scrambled(room: &Room) -> Room {
        let mut room = room.clone();
        for layer in &mut room.layers {
            for tile in &mut layer.tiles {
                *tile = Tile::plain(7);
            }
        }
        room
    }

    #[test]
    fn test_round_trip_preserves_every_tile() {
        let original = room();
        let (_dir, document) = exported(&original);
        let mut target = scrambled(&original);

        let count = import(&document, &mut target).unwrap();

        assert_eq!(count, 2);
        assert_eq!(target, original);
        assert!(target.layers[1].tiles.iter().all(|t| t.horizontal_flip && t.vertical_flip));
    }

    #[test]
    fn test_layer_count_mismatch_leaves_room_untouched() {
        let original = room();
        let (_dir, document) = exported(&original);
        let mut target = scrambled(&original);
        target.layers.push(layer(2, 8, vec![Tile::plain(0); 32], 0x30));
        let before = target.clone();

        let result = import(&document, &mut target);

        assert!(matches!(
            result,
            Err(TmxError::LayerCountMismatch {
                expected: 3,
                found: 2
            })
        ));
        assert_eq!(target, before);
    }

    #[test]
    fn test_tile_count_mismatch_leaves_room_untouched() {
        let original = room();
        let (_dir, document) = exported(&original);
        let mut target = scrambled(&original);
        target.layers[1].tiles.truncate(16);
        let before = target.clone();

        let result = import(&document, &mut target);

        assert!(matches!(
            result,
            Err(TmxError::TileCountMismatch {
                layer: 1,
                expected: 16,
                found: 32
            })
        ));
        assert_eq!(target, before);
    }

    #[test]
    fn test_width_mismatch_is_rejected() {
        let original = room();
        let (_dir, document) = exported(&original);
        let mut target = scrambled(&original);
        target.layers[0].width = 16;

        assert!(matches!(
            import(&document, &mut target),
            Err(TmxError::LayerWidthMismatch { layer: 0, .. })
        ));
    }

    #[test]
    fn test_empty_cells_decode_as_tile_zero() {
        let dir = tempfile::tempdir().unwrap();
        let document = dir.path().join("room.tmx");
        fs::write(
            &document,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" orientation="orthogonal" renderorder="right-down" width="2" height="1" tilewidth="16" tileheight="16" infinite="0" nextlayerid="2" nextobjectid="1">
 <tileset firstgid="1" name="t" tilewidth="16" tileheight="16" tilecount="256" columns="16">
  <image source="t.png" width="256" height="256"/>
 </tileset>
 <layer id="1" name="Layer 0" width="2" height="1">
  <data encoding="csv">
0,3221225478
</data>
 </layer>
</map>
"#,
        )
        .unwrap();
        let mut target = Room::new(0, 0, 0, 0, OverlayId(0), "Castle")
            .with_layer(layer(0, 2, vec![Tile::plain(9); 2], 0x10));

        import(&document, &mut target).unwrap();

        assert_eq!(
            target.layers[0].tiles,
            vec![Tile::plain(0), Tile::new(5, true, true)]
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut target = room();
        assert!(import(&dir.path().join("absent.tmx"), &mut target).is_err());
    }
}
