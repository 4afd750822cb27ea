//! Recording fakes for the store and renderer, shared by this crate's tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use dsvedit_records::prelude::*;
use dsvedit_records::OPACITY_MAX;
use image::{Rgba, RgbaImage};

/// Owned copy of a [`TilesetRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub tileset_address: u32,
    pub palette_offset: u32,
    pub graphic_tilesets: Vec<u32>,
    pub colors_per_palette: u16,
    pub collision_tileset_address: u32,
    pub output_path: PathBuf,
}

#[derive(Debug, Default)]
struct StoreLog {
    overlay_loads: Vec<OverlayId>,
    area_reads: Vec<usize>,
    commits: usize,
    rom_writes: Vec<PathBuf>,
}

#[derive(Clone, Default)]
pub struct FakeStore {
    areas: Vec<Area>,
    log: Arc<Mutex<StoreLog>>,
}

impl FakeStore {
    pub fn with_areas(areas: Vec<Area>) -> Self {
        Self {
            areas,
            log: Arc::default(),
        }
    }

    pub fn overlay_loads(&self) -> Vec<OverlayId> {
        self.log.lock().unwrap().overlay_loads.clone()
    }

    pub fn area_reads(&self) -> Vec<usize> {
        self.log.lock().unwrap().area_reads.clone()
    }

    pub fn commits(&self) -> usize {
        self.log.lock().unwrap().commits
    }

    pub fn rom_writes(&self) -> Vec<PathBuf> {
        self.log.lock().unwrap().rom_writes.clone()
    }
}

impl RecordStore for FakeStore {
    fn constant_overlays(&self) -> Vec<OverlayId> {
        vec![OverlayId(0)]
    }

    fn areas(&self) -> Vec<AreaEntry> {
        self.areas
            .iter()
            .map(|area| AreaEntry::new(area.index, area.name.clone()))
            .collect()
    }

    fn read_area(&self, area_index: usize) -> Result<Area, StoreError> {
        self.log.lock().unwrap().area_reads.push(area_index);
        self.areas
            .get(area_index)
            .cloned()
            .ok_or(StoreError::UnknownArea(area_index))
    }

    fn load_overlay(&mut self, overlay: OverlayId) -> Result<(), StoreError> {
        self.log.lock().unwrap().overlay_loads.push(overlay);
        Ok(())
    }

    fn commit_file_changes(&mut self) -> Result<(), StoreError> {
        self.log.lock().unwrap().commits += 1;
        Ok(())
    }

    fn write_to_rom(&mut self, output_path: &Path) -> Result<(), StoreError> {
        self.log
            .lock()
            .unwrap()
            .rom_writes
            .push(output_path.to_path_buf());
        Ok(())
    }
}

#[derive(Clone, Copy, Default)]
enum RenderMode {
    #[default]
    Gradient,
    Nothing,
    Garbage,
    Failing,
}

#[derive(Debug, Default)]
struct RenderLog {
    tilesets: Vec<RecordedRequest>,
    maps: usize,
}

#[derive(Clone, Default)]
pub struct FakeRenderer {
    mode: RenderMode,
    log: Arc<Mutex<RenderLog>>,
}

impl FakeRenderer {
    pub fn writing_nothing() -> Self {
        Self {
            mode: RenderMode::Nothing,
            ..Default::default()
        }
    }

    pub fn writing_garbage() -> Self {
        Self {
            mode: RenderMode::Garbage,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            mode: RenderMode::Failing,
            ..Default::default()
        }
    }

    pub fn tileset_renders(&self) -> usize {
        self.log.lock().unwrap().tilesets.len()
    }

    pub fn map_renders(&self) -> usize {
        self.log.lock().unwrap().maps
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.log.lock().unwrap().tilesets.last().cloned()
    }
}

impl TilesetRenderer for FakeRenderer {
    fn render_tileset(
        &self,
        request: &TilesetRequest<'_>,
        output_path: &Path,
    ) -> Result<(), RenderError> {
        self.log.lock().unwrap().tilesets.push(RecordedRequest {
            tileset_address: request.tileset_address,
            palette_offset: request.palette_offset,
            graphic_tilesets: request.graphic_tilesets.to_vec(),
            colors_per_palette: request.colors_per_palette,
            collision_tileset_address: request.collision_tileset_address,
            output_path: output_path.to_path_buf(),
        });
        match self.mode {
            RenderMode::Gradient => gradient_tileset()
                .save(output_path)
                .map_err(|err| RenderError::Failed(err.to_string())),
            RenderMode::Nothing => Ok(()),
            RenderMode::Garbage => Ok(std::fs::write(output_path, b"not a png")?),
            RenderMode::Failing => Err(RenderError::Failed("no graphics".to_string())),
        }
    }

    fn render_map(&self, map: &Map) -> Result<Vec<u8>, RenderError> {
        self.log.lock().unwrap().maps += 1;
        Ok(vec![map.tiles.len() as u8])
    }
}

/// A 256×256 sheet where every pixel encodes its own position: `(x, y, 0, 255)`.
pub fn gradient_tileset() -> RgbaImage {
    RgbaImage::from_fn(256, 256, |x, y| Rgba([x as u8, y as u8, 0, 255]))
}

pub fn layer(z_index: i32, width: u32, tiles: Vec<Tile>, tileset_address: u32) -> Layer {
    Layer {
        z_index,
        opacity: OPACITY_MAX,
        width,
        tileset_address,
        collision_tileset_address: 0x0210_0000,
        colors_per_palette: 16,
        tiles,
    }
}

/// Two layers, 16×12 tiles each, on different tilesets.
pub fn sample_room() -> Room {
    let front = (0..16 * 12).map(|i| Tile::plain((i % 256) as u8)).collect();
    let back = (0..16 * 12)
        .map(|i| Tile::new((i % 7) as u8, i % 2 == 0, i % 3 == 0))
        .collect();
    Room::new(0x0200_1000, 0, 0, 0, OverlayId(41), "Castle")
        .with_palette_offset(0x0208_0000)
        .with_graphic_tilesets(vec![0x0220_0000, 0x0220_4000])
        .with_layer(layer(0, 16, front, 0x0230_0000))
        .with_layer(layer(1, 16, back, 0x0231_0000))
}

/// An area with two sectors of three one-layer rooms each, and a map linking them.
pub fn sample_area(index: usize) -> Area {
    let sectors = (0..2)
        .map(|sector_index| {
            let rooms = (0..3)
                .map(|room_index| {
                    let address =
                        0x0200_0000 + (index * 0x1000 + sector_index * 0x100 + room_index) as u32;
                    let tiles = vec![Tile::plain(room_index as u8); 16 * 12];
                    Room::new(
                        address,
                        index,
                        sector_index,
                        room_index,
                        OverlayId(40 + sector_index as u32),
                        format!("Area{index}"),
                    )
                    .with_layer(layer(0, 16, tiles, 0x0230_0000))
                })
                .collect();
            Sector {
                index: sector_index,
                name: None,
                overlay: OverlayId(40 + sector_index as u32),
                rooms,
            }
        })
        .collect();

    Area {
        index,
        name: format!("Area{index}"),
        sectors,
        map: Map {
            tiles: vec![
                MapTile::room(0, 0, 0, 0),
                MapTile::room(1, 0, 1, 2),
                MapTile::blank(2, 0),
            ],
        },
    }
}
