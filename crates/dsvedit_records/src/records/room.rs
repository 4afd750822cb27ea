//! Room and door records.

use super::area::OverlayId;
use super::layer::Layer;
use super::{SCREEN_HEIGHT_IN_PIXELS, SCREEN_WIDTH_IN_PIXELS};

/// A door out of a room. Positions are in screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Door {
    pub x_pos: u8,
    pub y_pos: u8,

    /// Metadata address of the room this door leads to.
    pub destination_room: u32,
}

impl Door {
    /// Position byte meaning "no position".
    pub const UNDEFINED: u8 = 0xFF;

    /// Screen position of the door, or `None` when either axis is undefined.
    pub fn screen_position(&self) -> Option<(u32, u32)> {
        if self.x_pos == Self::UNDEFINED || self.y_pos == Self::UNDEFINED {
            return None;
        }
        Some((u32::from(self.x_pos), u32::from(self.y_pos)))
    }

    /// Top-left pixel of the door's screen.
    pub fn pixel_position(&self) -> Option<(u32, u32)> {
        self.screen_position()
            .map(|(x, y)| (x * SCREEN_WIDTH_IN_PIXELS, y * SCREEN_HEIGHT_IN_PIXELS))
    }
}

/// A room: the unit of composition and Tiled interchange.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Room {
    /// Address of the room's metadata record. Unique across the image.
    pub metadata_address: u32,

    pub area_index: usize,
    pub sector_index: usize,
    pub room_index: usize,

    /// Overlay that must be resident before this room's graphics can be rendered.
    pub overlay: OverlayId,

    /// Area name as used in export folder names.
    pub area_name: String,

    pub layers: Vec<Layer>,
    pub doors: Vec<Door>,

    /// Widest layer, in screens.
    pub max_layer_width: u32,

    /// Tallest layer, in screens.
    pub max_layer_height: u32,

    pub palette_offset: u32,

    /// Graphic tileset ids loaded for this room, in load order.
    pub graphic_tilesets: Vec<u32>,
}

impl Room {
    pub fn new(
        metadata_address: u32,
        area_index: usize,
        sector_index: usize,
        room_index: usize,
        overlay: OverlayId,
        area_name: impl Into<String>,
    ) -> Self {
        Self {
            metadata_address,
            area_index,
            sector_index,
            room_index,
            overlay,
            area_name: area_name.into(),
            ..Default::default()
        }
    }

    /// Append a layer, growing the room extents to cover it.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.max_layer_width = self.max_layer_width.max(layer.width_in_screens());
        self.max_layer_height = self.max_layer_height.max(layer.height_in_screens());
        self.layers.push(layer);
        self
    }

    pub fn with_palette_offset(mut self, palette_offset: u32) -> Self {
        self.palette_offset = palette_offset;
        self
    }

    pub fn with_graphic_tilesets(mut self, graphic_tilesets: Vec<u32>) -> Self {
        self.graphic_tilesets = graphic_tilesets;
        self
    }

    /// File stem used for this room's Tiled document.
    pub fn filename(&self) -> String {
        format!(
            "room_{:02}-{:02}-{:02}_{:08X}",
            self.area_index, self.sector_index, self.room_index, self.metadata_address
        )
    }

    /// Scene size in pixels: the room extents converted from screens.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.max_layer_width * SCREEN_WIDTH_IN_PIXELS,
            self.max_layer_height * SCREEN_HEIGHT_IN_PIXELS,
        )
    }

    /// Tileset file stem for one of this room's layers.
    pub fn tileset_filename(&self, layer: &Layer) -> String {
        layer.tileset_filename(self.palette_offset)
    }

    /// Room dropdown label, `"%02d %08X"`.
    pub fn label(&self) -> String {
        format!("{:02} {:08X}", self.room_index, self.metadata_address)
    }

    /// Doors that have a real position.
    pub fn placed_doors(&self) -> impl Iterator<Item = &Door> {
        self.doors.iter().filter(|door| door.screen_position().is_some())
    }
}
