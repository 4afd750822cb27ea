//! Map click handling.
//!
//! Turns a press on the overworld map into a [`NavigateToRoom`] event. The event is meant
//! to be applied through [`crate::Editor::navigate`], the same path dropdown selection
//! uses.

use bevy::prelude::*;

use crate::events::NavigateToRoom;
use crate::map::{MapComposite, MapUnit};

pub struct MapNavigator;

impl MapNavigator {
    /// Event for a press on `unit`, or `None` for blank units.
    pub fn press(unit: &MapUnit) -> Option<NavigateToRoom> {
        if !unit.is_interactive() {
            return None;
        }
        Some(NavigateToRoom {
            sector_index: unit.map_tile.sector_index,
            room_index: unit.map_tile.room_index,
        })
    }

    /// Topmost interactive unit under `point`.
    ///
    /// Blank units are not hit-testable. Where boxes overlap, the unit added last wins.
    pub fn unit_at(map: &MapComposite, point: Vec2) -> Option<&MapUnit> {
        map.units
            .iter()
            .rev()
            .find(|unit| unit.is_interactive() && unit.contains(point))
    }

    /// Event for a press at `point` in scene pixels.
    pub fn click(map: &MapComposite, point: Vec2) -> Option<NavigateToRoom> {
        Self::unit_at(map, point).and_then(Self::press)
    }
}
