//! A one-area store and a PNG-writing renderer for interchange tests.

use std::path::Path;

use dsvedit_core::{Editor, EditorConfig};
use dsvedit_records::prelude::*;
use dsvedit_records::OPACITY_MAX;
use image::{Rgba, RgbaImage};

struct SingleAreaStore {
    area: Area,
}

impl RecordStore for SingleAreaStore {
    fn constant_overlays(&self) -> Vec<OverlayId> {
        Vec::new()
    }

    fn areas(&self) -> Vec<AreaEntry> {
        vec![AreaEntry::new(self.area.index, self.area.name.clone())]
    }

    fn read_area(&self, area_index: usize) -> Result<Area, StoreError> {
        if area_index == self.area.index {
            Ok(self.area.clone())
        } else {
            Err(StoreError::UnknownArea(area_index))
        }
    }

    fn load_overlay(&mut self, _overlay: OverlayId) -> Result<(), StoreError> {
        Ok(())
    }

    fn commit_file_changes(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    fn write_to_rom(&mut self, _output_path: &Path) -> Result<(), StoreError> {
        Ok(())
    }
}

struct SolidRenderer;

impl TilesetRenderer for SolidRenderer {
    fn render_tileset(
        &self,
        request: &TilesetRequest<'_>,
        output_path: &Path,
    ) -> Result<(), RenderError> {
        let shade = request.tileset_address as u8;
        RgbaImage::from_pixel(256, 256, Rgba([shade, 0, 0, 255]))
            .save(output_path)
            .map_err(|err| RenderError::Failed(err.to_string()))
    }

    fn render_map(&self, _map: &Map) -> Result<Vec<u8>, RenderError> {
        Ok(Vec::new())
    }
}

fn layer(z_index: i32, tiles: Vec<Tile>, tileset_address: u32) -> Layer {
    Layer {
        z_index,
        opacity: OPACITY_MAX,
        width: 16,
        tileset_address,
        collision_tileset_address: 0x0210_0000,
        colors_per_palette: 16,
        tiles,
    }
}

fn area() -> Area {
    let front = (0..16 * 12)
        .map(|i| Tile::new((i % 256) as u8, i % 2 == 0, i % 5 == 0))
        .collect();
    let back = (0..16 * 12).map(|i| Tile::new((i % 3) as u8, false, true)).collect();
    let room = Room::new(0x0200_0000, 0, 0, 0, OverlayId(40), "Castle")
        .with_palette_offset(0x0208_0000)
        .with_layer(layer(0, front, 0x0230_0000))
        .with_layer(layer(1, back, 0x0231_0000));

    Area {
        index: 0,
        name: "Castle".to_string(),
        sectors: vec![Sector {
            index: 0,
            name: None,
            overlay: OverlayId(40),
            rooms: vec![room],
        }],
        map: Map {
            tiles: vec![MapTile::room(0, 0, 0, 0)],
        },
    }
}

/// An initialized editor rooted in a fresh temporary folder.
pub fn editor() -> (tempfile::TempDir, Editor) {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = Editor::new(
        Game::DawnOfSorrow,
        OpenedStore {
            store: Box::new(SingleAreaStore { area: area() }),
            renderer: Box::new(SolidRenderer),
        },
        &EditorConfig::new(dir.path()),
    );
    editor.initialize().unwrap();
    (dir, editor)
}
