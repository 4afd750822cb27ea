//! Selection commands and rebuild notifications.
//!
//! Commands are dispatched to the editor either directly ([`crate::Editor::dispatch`])
//! or, inside a Bevy app, by triggering them and letting the observers registered by
//! [`crate::DsveditCorePlugin`] apply them. Notifications are triggered after a rebuild so
//! presentation code can refresh.

use bevy::prelude::*;

/// Select an area by its slot in the area list.
///
/// While the "Select Area" placeholder is present, any slot resolves to the first real
/// area.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectArea {
    pub index: usize,
}

/// Select a sector of the current area. Re-selecting the current sector is a no-op
/// unless `force` is set.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectSector {
    pub index: usize,
    pub force: bool,
}

/// Select a room of the current sector. Re-selecting the current room is a no-op
/// unless `force` is set.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectRoom {
    pub index: usize,
    pub force: bool,
}

/// Jump to a room, as emitted by a map click.
///
/// Applied as a sector selection followed by a room selection, in that order.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateToRoom {
    pub sector_index: usize,
    pub room_index: usize,
}

/// Any selection change, for callers that queue commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    SelectArea(SelectArea),
    SelectSector(SelectSector),
    SelectRoom(SelectRoom),
    Navigate(NavigateToRoom),
}

impl From<SelectArea> for EditorCommand {
    fn from(event: SelectArea) -> Self {
        Self::SelectArea(event)
    }
}

impl From<SelectSector> for EditorCommand {
    fn from(event: SelectSector) -> Self {
        Self::SelectSector(event)
    }
}

impl From<SelectRoom> for EditorCommand {
    fn from(event: SelectRoom) -> Self {
        Self::SelectRoom(event)
    }
}

impl From<NavigateToRoom> for EditorCommand {
    fn from(event: NavigateToRoom) -> Self {
        Self::Navigate(event)
    }
}

/// Fired after an area's records, sector list and map were rebuilt.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct AreaLoaded {
    pub area_index: usize,
    pub sector_count: usize,
}

/// Fired after the current room's layers were composited.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct RoomComposited {
    pub sector_index: usize,
    pub room_index: usize,
    pub room_address: u32,
    pub layer_count: usize,
}
