//! Overworld map records.

/// One cell of an area's overworld map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapTile {
    /// Grid column, in 4-pixel map units.
    pub x_pos: u32,

    /// Grid row, in 4-pixel map units.
    pub y_pos: u32,

    /// Target sector. Meaningless when `is_blank`.
    pub sector_index: usize,

    /// Target room. Meaningless when `is_blank`.
    pub room_index: usize,

    pub is_blank: bool,
}

impl MapTile {
    /// A cell linked to a room.
    pub fn room(x_pos: u32, y_pos: u32, sector_index: usize, room_index: usize) -> Self {
        Self {
            x_pos,
            y_pos,
            sector_index,
            room_index,
            is_blank: false,
        }
    }

    /// A layout-only cell with no room behind it.
    pub fn blank(x_pos: u32, y_pos: u32) -> Self {
        Self {
            x_pos,
            y_pos,
            is_blank: true,
            ..Default::default()
        }
    }
}

/// The overworld map of one area.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map {
    pub tiles: Vec<MapTile>,
}
