//! Overworld map compositing.
//!
//! The area map is one externally rendered image plus a grid of clickable units, one per
//! [`MapTile`]. Units are 5×5 pixels on a 4-pixel grid so that neighbours overlap by
//! exactly one pixel.

use bevy::math::URect;
use bevy::prelude::*;
use dsvedit_records::{Map, MapTile, RenderError, TilesetRenderer};

/// Grid spacing of map units in pixels.
pub const MAP_UNIT_SPACING: u32 = 4;

/// Side of a map unit's bounding box in pixels. One more than the spacing.
pub const MAP_UNIT_EXTENT: u32 = MAP_UNIT_SPACING + 1;

/// Map scene size: 64×48 units plus the trailing overlap pixel.
pub const MAP_SCENE_SIZE: UVec2 = UVec2::new(64 * MAP_UNIT_SPACING + 1, 48 * MAP_UNIT_SPACING + 1);

/// One interactive cell of the overworld map.
///
/// Holds plain indices, never a reference into the record tree, so it stays valid no
/// matter when the tree is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapUnit {
    pub map_tile: MapTile,
}

impl MapUnit {
    pub fn new(map_tile: MapTile) -> Self {
        Self { map_tile }
    }

    /// Top-left pixel of the unit.
    pub fn pixel_position(&self) -> UVec2 {
        UVec2::new(
            self.map_tile.x_pos * MAP_UNIT_SPACING,
            self.map_tile.y_pos * MAP_UNIT_SPACING,
        )
    }

    /// Bounding box, `min` inclusive and `max` exclusive.
    pub fn bounds(&self) -> URect {
        let min = self.pixel_position();
        URect::from_corners(min, min + UVec2::splat(MAP_UNIT_EXTENT))
    }

    /// Whether `point` (scene pixels) falls inside the unit's box.
    pub fn contains(&self, point: Vec2) -> bool {
        let bounds = self.bounds();
        point.x >= bounds.min.x as f32
            && point.y >= bounds.min.y as f32
            && point.x < bounds.max.x as f32
            && point.y < bounds.max.y as f32
    }

    pub fn is_interactive(&self) -> bool {
        !self.map_tile.is_blank
    }
}

/// A composed area map.
#[derive(Debug, Clone)]
pub struct MapComposite {
    /// Encoded map image as produced by the renderer. Not decoded here.
    pub background: Vec<u8>,

    /// Units in map tile order, blank ones included.
    pub units: Vec<MapUnit>,

    pub scene_size: UVec2,
}

/// Builds [`MapComposite`]s.
pub struct MapCompositor;

impl MapCompositor {
    /// Render the map image and lay out one unit per map tile.
    pub fn composite(
        map: &Map,
        renderer: &dyn TilesetRenderer,
    ) -> Result<MapComposite, RenderError> {
        let background = renderer.render_map(map)?;
        Ok(Self::from_parts(map, background))
    }

    /// Lay out units over an already rendered map image.
    pub fn from_parts(map: &Map, background: Vec<u8>) -> MapComposite {
        let units: Vec<MapUnit> = map.tiles.iter().copied().map(MapUnit::new).collect();
        debug!(
            "Composited map: {} units ({} blank)",
            units.len(),
            units.iter().filter(|unit| !unit.is_interactive()).count()
        );
        MapComposite {
            background,
            units,
            scene_size: MAP_SCENE_SIZE,
        }
    }
}
