//! The selection state machine and everything it rebuilds.
//!
//! ```text
//! select_area ──► rebind Area ──► select_sector(0, force) ──► sector list ──► map
//!                                      │
//!                                      └► rebind Sector ──► select_room(0, force) ──► room list
//!                                                                │
//!                                                                └► rebind Room ──► composite
//! ```
//!
//! Map clicks and dropdown changes both end up in [`Editor::select_sector`] and
//! [`Editor::select_room`]; there is no second path.

use std::path::PathBuf;

use bevy::prelude::*;
use dsvedit_records::{
    Area, Game, OpenedStore, RecordStore, RenderError, Room, Sector, StoreError,
    TilesetRenderer,
};
use thiserror::Error;

use crate::cache::{CacheError, ExportPaths, TilesetCache};
use crate::compositor::{LayerCompositor, RoomComposite};
use crate::config::EditorConfig;
use crate::events::{EditorCommand, NavigateToRoom};
use crate::map::{MapComposite, MapCompositor};
use crate::navigator::MapNavigator;
use crate::selection::{AreaList, RebuildCounters, Selection};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("No area at list slot {0}")]
    AreaOutOfRange(usize),

    #[error("Area {area} has no sector {sector}")]
    SectorOutOfRange { area: usize, sector: usize },

    #[error("Sector {sector} has no room {room}")]
    RoomOutOfRange { sector: usize, room: usize },

    #[error("No area is selected")]
    NoArea,

    #[error("No room is selected")]
    NoRoom,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Failed to render area map: {0}")]
    Map(#[from] RenderError),
}

/// Everything [`Editor::select_area`] replaces before the new area is known to load.
struct AreaState {
    area: Option<Area>,
    selection: Selection,
    room_labels: Vec<String>,
    room_composite: Option<RoomComposite>,
    counters: RebuildCounters,
}

/// Owns the open store, the live record tree and the derived rasters.
#[derive(Resource)]
pub struct Editor {
    game: Game,
    store: Box<dyn RecordStore>,
    renderer: Box<dyn TilesetRenderer>,
    cache: TilesetCache,
    areas: AreaList,
    area: Option<Area>,
    selection: Selection,
    sector_labels: Vec<String>,
    room_labels: Vec<String>,
    room_composite: Option<RoomComposite>,
    map: Option<MapComposite>,
    counters: RebuildCounters,
}

impl Editor {
    /// Wrap an opened store. Nothing is selected until [`Editor::initialize`].
    pub fn new(game: Game, opened: OpenedStore, config: &EditorConfig) -> Self {
        Self {
            game,
            store: opened.store,
            renderer: opened.renderer,
            cache: TilesetCache::new(ExportPaths::new(config.export_root.clone(), game)),
            areas: AreaList::default(),
            area: None,
            selection: Selection::default(),
            sector_labels: Vec::new(),
            room_labels: Vec::new(),
            room_composite: None,
            map: None,
            counters: RebuildCounters::default(),
        }
    }

    /// Make the store's always-resident overlays available.
    pub fn load_constant_overlays(&mut self) -> Result<(), EditorError> {
        for overlay in self.store.constant_overlays() {
            self.store.load_overlay(overlay)?;
        }
        Ok(())
    }

    /// Fill the area list (with its placeholder) and select the first area.
    pub fn initialize(&mut self) -> Result<(), EditorError> {
        self.areas = AreaList::with_placeholder(self.store.areas());
        self.select_area(0)
    }

    /// Select the area at `slot` of the area list. Always rebuilds.
    ///
    /// While the placeholder is still listed, it is removed and the first real area is
    /// selected instead, whatever `slot` was.
    pub fn select_area(&mut self, slot: usize) -> Result<(), EditorError> {
        let slot = if self.areas.take_placeholder() {
            debug!("Removed area placeholder, selecting first area");
            0
        } else {
            slot
        };

        let area_index = self
            .areas
            .entry(slot)
            .ok_or(EditorError::AreaOutOfRange(slot))?
            .index;
        let area = self.store.read_area(area_index)?;
        let sector_labels: Vec<String> = area.sectors.iter().map(Sector::label).collect();
        let map = MapCompositor::composite(&area.map, self.renderer.as_ref())?;

        let previous = AreaState {
            area: self.area.replace(area),
            selection: std::mem::replace(
                &mut self.selection,
                Selection {
                    area_index: Some(area_index),
                    sector_index: None,
                    room_index: None,
                },
            ),
            room_labels: std::mem::take(&mut self.room_labels),
            room_composite: self.room_composite.take(),
            counters: self.counters,
        };

        if let Err(err) = self.select_sector(0, true) {
            warn!("Area {area_index} failed to load, keeping the previous area: {err}");
            self.restore(previous);
            return Err(err);
        }

        self.sector_labels = sector_labels;
        self.map = Some(map);
        self.counters.areas += 1;

        let area = self.area.as_ref().ok_or(EditorError::NoArea)?;
        info!("Loaded area {:02} {}", area.index, area.name);
        Ok(())
    }

    fn restore(&mut self, previous: AreaState) {
        self.area = previous.area;
        self.selection = previous.selection;
        self.room_labels = previous.room_labels;
        self.room_composite = previous.room_composite;
        self.counters = previous.counters;
    }

    /// Select a sector of the current area.
    ///
    /// Returns `Ok(false)` without touching anything when `index` is already selected and
    /// `force` is not set.
    pub fn select_sector(&mut self, index: usize, force: bool) -> Result<bool, EditorError> {
        if self.selection.sector_index == Some(index) && !force {
            return Ok(false);
        }

        let area = self.area.as_ref().ok_or(EditorError::NoArea)?;
        let sector = area.sector(index).ok_or(EditorError::SectorOutOfRange {
            area: area.index,
            sector: index,
        })?;
        let room_labels: Vec<String> = sector.rooms.iter().map(Room::label).collect();
        let has_rooms = !sector.rooms.is_empty();

        self.selection.sector_index = Some(index);
        self.selection.room_index = None;
        self.counters.sectors += 1;

        if has_rooms {
            self.select_room(0, true)?;
        } else {
            warn!("Sector {index} has no rooms");
            self.room_composite = None;
        }
        self.room_labels = room_labels;
        Ok(true)
    }

    /// Select a room of the current sector and composite it.
    ///
    /// Returns `Ok(false)` without touching anything when `index` is already selected and
    /// `force` is not set.
    pub fn select_room(&mut self, index: usize, force: bool) -> Result<bool, EditorError> {
        if self.selection.room_index == Some(index) && !force {
            return Ok(false);
        }

        let sector = self.selection.sector_index.ok_or(EditorError::NoArea)?;
        let area = self.area.as_ref().ok_or(EditorError::NoArea)?;
        if area.room(sector, index).is_none() {
            return Err(EditorError::RoomOutOfRange {
                sector,
                room: index,
            });
        }

        self.selection.room_index = Some(index);
        self.counters.rooms += 1;
        self.load_layers()?;
        Ok(true)
    }

    /// Apply a map navigation: sector first (which resets the room to 0), then room.
    pub fn navigate(&mut self, event: NavigateToRoom) -> Result<(), EditorError> {
        debug!(
            "Navigating to sector {} room {}",
            event.sector_index, event.room_index
        );
        self.select_sector(event.sector_index, false)?;
        self.select_room(event.room_index, false)?;
        Ok(())
    }

    /// Hit-test the current map at `point` and navigate to the room found there.
    pub fn click_map(&mut self, point: Vec2) -> Result<Option<NavigateToRoom>, EditorError> {
        let Some(event) = self
            .map
            .as_ref()
            .and_then(|map| MapNavigator::click(map, point))
        else {
            return Ok(None);
        };
        self.navigate(event)?;
        Ok(Some(event))
    }

    pub fn dispatch(&mut self, command: impl Into<EditorCommand>) -> Result<(), EditorError> {
        match command.into() {
            EditorCommand::SelectArea(event) => self.select_area(event.index),
            EditorCommand::SelectSector(event) => {
                self.select_sector(event.index, event.force).map(drop)
            }
            EditorCommand::SelectRoom(event) => {
                self.select_room(event.index, event.force).map(drop)
            }
            EditorCommand::Navigate(event) => self.navigate(event),
        }
    }

    /// Composite the current room again, e.g. after its tiles were replaced.
    pub fn recomposite(&mut self) -> Result<(), EditorError> {
        self.load_layers()
    }

    fn load_layers(&mut self) -> Result<(), EditorError> {
        self.room_composite = None;

        let (Some(sector), Some(room_index)) =
            (self.selection.sector_index, self.selection.room_index)
        else {
            return Err(EditorError::NoRoom);
        };
        let room = self
            .area
            .as_ref()
            .and_then(|area| area.room(sector, room_index))
            .ok_or(EditorError::NoRoom)?;

        let composite = LayerCompositor::composite(
            &self.cache,
            self.store.as_mut(),
            self.renderer.as_ref(),
            room,
        )?;
        self.room_composite = Some(composite);
        Ok(())
    }

    /// Make sure every layer of the current room has a cached tileset.
    ///
    /// Returns the tileset paths in layer order.
    pub fn ensure_room_tilesets(&mut self) -> Result<Vec<PathBuf>, EditorError> {
        let (Some(sector), Some(room_index)) =
            (self.selection.sector_index, self.selection.room_index)
        else {
            return Err(EditorError::NoRoom);
        };
        let room = self
            .area
            .as_ref()
            .and_then(|area| area.room(sector, room_index))
            .ok_or(EditorError::NoRoom)?;
        Ok(self
            .cache
            .ensure_room(self.store.as_mut(), self.renderer.as_ref(), room)?)
    }

    /// Flush pending record edits through the store.
    pub fn save_files(&mut self) -> Result<(), EditorError> {
        self.store.commit_file_changes()?;
        Ok(())
    }

    /// Write a playable image next to the export folder. Returns its path.
    pub fn write_to_rom(&mut self) -> Result<PathBuf, EditorError> {
        let path = self.cache.paths().rom_output_path();
        self.store.write_to_rom(&path)?;
        info!("Wrote {}", path.display());
        Ok(path)
    }

    pub fn game(&self) -> Game {
        self.game
    }

    pub fn paths(&self) -> &ExportPaths {
        self.cache.paths()
    }

    pub fn cache(&self) -> &TilesetCache {
        &self.cache
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn counters(&self) -> RebuildCounters {
        self.counters
    }

    pub fn area(&self) -> Option<&Area> {
        self.area.as_ref()
    }

    pub fn sector(&self) -> Option<&Sector> {
        self.area.as_ref()?.sector(self.selection.sector_index?)
    }

    pub fn room(&self) -> Option<&Room> {
        self.area
            .as_ref()?
            .room(self.selection.sector_index?, self.selection.room_index?)
    }

    /// Mutable access to the current room, for edits made outside the compositor.
    ///
    /// Call [`Editor::recomposite`] afterwards to refresh the raster.
    pub fn room_mut(&mut self) -> Option<&mut Room> {
        let (sector, room) = (self.selection.sector_index?, self.selection.room_index?);
        self.area.as_mut()?.room_mut(sector, room)
    }

    /// Tiled document path for the current room.
    pub fn document_path(&self) -> Option<PathBuf> {
        self.room().map(|room| self.paths().document_path(room))
    }

    pub fn area_labels(&self) -> Vec<String> {
        self.areas.labels()
    }

    pub fn sector_labels(&self) -> &[String] {
        &self.sector_labels
    }

    pub fn room_labels(&self) -> &[String] {
        &self.room_labels
    }

    pub fn room_composite(&self) -> Option<&RoomComposite> {
        self.room_composite.as_ref()
    }

    pub fn map(&self) -> Option<&MapComposite> {
        self.map.as_ref()
    }
}
