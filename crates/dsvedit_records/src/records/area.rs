//! Area and sector records.

use std::fmt;

use super::map::Map;
use super::room::Room;

/// Identifier of a loadable code/data overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct OverlayId(pub u32);

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay {}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sector {
    pub index: usize,

    /// Display name, when the game data names its sectors.
    pub name: Option<String>,

    /// Overlay required to render this sector's graphics.
    pub overlay: OverlayId,

    pub rooms: Vec<Room>,
}

impl Sector {
    /// Sector dropdown label: `"%02d %s"`, or `"%02d"` when unnamed.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{:02} {}", self.index, name),
            None => format!("{:02}", self.index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Area {
    pub index: usize,
    pub name: String,
    pub sectors: Vec<Sector>,
    pub map: Map,
}

impl Area {
    pub fn sector(&self, sector_index: usize) -> Option<&Sector> {
        self.sectors.get(sector_index)
    }

    pub fn room(&self, sector_index: usize, room_index: usize) -> Option<&Room> {
        self.sectors.get(sector_index)?.rooms.get(room_index)
    }

    pub fn room_mut(&mut self, sector_index: usize, room_index: usize) -> Option<&mut Room> {
        self.sectors.get_mut(sector_index)?.rooms.get_mut(room_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_label() {
        let mut sector = Sector {
            index: 4,
            ..Default::default()
        };
        assert_eq!(sector.label(), "04");
        sector.name = Some("Garden".to_string());
        assert_eq!(sector.label(), "04 Garden");
    }

    #[test]
    fn test_room_lookup() {
        let area = Area {
            sectors: vec![Sector {
                rooms: vec![
                    Room::default(),
                    Room {
                        metadata_address: 7,
                        ..Default::default()
                    },
                ],
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(area.room(0, 1).map(|r| r.metadata_address), Some(7));
        assert!(area.room(0, 2).is_none());
        assert!(area.room(1, 0).is_none());
    }
}
