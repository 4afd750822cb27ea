//! Plugin wiring the editor into a Bevy app.

use bevy::prelude::*;

use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::events::{
    AreaLoaded, EditorCommand, NavigateToRoom, RoomComposited, SelectArea, SelectRoom,
    SelectSector,
};
use crate::selection::RebuildCounters;

/// Plugin that applies selection commands to the [`Editor`] resource.
///
/// This plugin:
/// - Inserts the [`EditorConfig`] resource
/// - Adds observers for [`SelectArea`], [`SelectSector`], [`SelectRoom`] and
///   [`NavigateToRoom`]
/// - Triggers [`AreaLoaded`] and [`RoomComposited`] after each rebuild
///
/// The [`Editor`] resource itself is inserted once a game is opened. Commands triggered
/// before that are ignored.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use dsvedit_core::prelude::*;
///
/// App::new()
///     .add_plugins(DsveditCorePlugin::new(EditorConfig::new("..")))
///     .add_observer(|trigger: On<RoomComposited>| {
///         info!("room {:08X} ready", trigger.event().room_address);
///     })
///     .run();
/// ```
#[derive(Default)]
pub struct DsveditCorePlugin {
    pub config: EditorConfig,
}

impl DsveditCorePlugin {
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }
}

impl Plugin for DsveditCorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone());

        app.add_observer(on_select_area);
        app.add_observer(on_select_sector);
        app.add_observer(on_select_room);
        app.add_observer(on_navigate_to_room);

        debug!("DsveditCorePlugin initialized");
    }
}

fn on_select_area(trigger: On<SelectArea>, editor: Option<ResMut<Editor>>, commands: Commands) {
    apply(*trigger.event(), editor, commands);
}

fn on_select_sector(trigger: On<SelectSector>, editor: Option<ResMut<Editor>>, commands: Commands) {
    apply(*trigger.event(), editor, commands);
}

fn on_select_room(trigger: On<SelectRoom>, editor: Option<ResMut<Editor>>, commands: Commands) {
    apply(*trigger.event(), editor, commands);
}

fn on_navigate_to_room(
    trigger: On<NavigateToRoom>,
    editor: Option<ResMut<Editor>>,
    commands: Commands,
) {
    apply(*trigger.event(), editor, commands);
}

fn apply(command: impl Into<EditorCommand>, editor: Option<ResMut<Editor>>, commands: Commands) {
    let command = command.into();
    let Some(mut editor) = editor else {
        warn!("Ignoring {command:?}: no game is open");
        return;
    };

    let before = editor.counters();
    if let Err(err) = editor.dispatch(command) {
        error!("{command:?} failed: {err}");
    }
    notify(&editor, before, commands);
}

/// Trigger notifications for whatever `before` → now says was rebuilt.
fn notify(editor: &Editor, before: RebuildCounters, mut commands: Commands) {
    let after = editor.counters();

    if after.areas != before.areas
        && let Some(area) = editor.area()
    {
        commands.trigger(AreaLoaded {
            area_index: area.index,
            sector_count: area.sectors.len(),
        });
    }

    if after.rooms != before.rooms
        && let (Some(room), Some(composite)) = (editor.room(), editor.room_composite())
    {
        commands.trigger(RoomComposited {
            sector_index: room.sector_index,
            room_index: room.room_index,
            room_address: composite.room_address,
            layer_count: composite.layers.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Selection;
    use crate::test_support::{FakeRenderer, FakeStore, sample_area};
    use dsvedit_records::{Game, OpenedStore};

    #[derive(Resource, Default)]
    struct Seen {
        areas: Vec<usize>,
        rooms: Vec<u32>,
    }

    fn app(root: &std::path::Path) -> App {
        let mut app = App::new();
        app.add_plugins(DsveditCorePlugin::new(EditorConfig::new(root)));
        app.init_resource::<Seen>();
        app.add_observer(|trigger: On<AreaLoaded>, mut seen: ResMut<Seen>| {
            seen.areas.push(trigger.event().area_index);
        });
        app.add_observer(|trigger: On<RoomComposited>, mut seen: ResMut<Seen>| {
            seen.rooms.push(trigger.event().room_address);
        });
        app
    }

    fn open(app: &mut App) {
        let config = app.world().resource::<EditorConfig>().clone();
        let mut editor = Editor::new(
            Game::OrderOfEcclesia,
            OpenedStore {
                store: Box::new(FakeStore::with_areas(vec![sample_area(0)])),
                renderer: Box::new(FakeRenderer::default()),
            },
            &config,
        );
        editor.initialize().unwrap();
        app.insert_resource(editor);
    }

    #[test]
    fn test_commands_without_editor_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());

        app.world_mut().trigger(SelectArea { index: 0 });
        app.world_mut().flush();

        assert!(app.world().get_resource::<Editor>().is_none());
        assert!(app.world().resource::<Seen>().areas.is_empty());
    }

    #[test]
    fn test_navigation_updates_editor_and_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        open(&mut app);

        app.world_mut().trigger(NavigateToRoom {
            sector_index: 1,
            room_index: 2,
        });
        app.world_mut().flush();

        let editor = app.world().resource::<Editor>();
        assert_eq!(
            editor.selection(),
            Selection {
                area_index: Some(0),
                sector_index: Some(1),
                room_index: Some(2),
            }
        );
        assert_eq!(app.world().resource::<Seen>().rooms, vec![0x0200_0102]);
    }

    #[test]
    fn test_no_op_selection_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        open(&mut app);

        app.world_mut().trigger(SelectRoom {
            index: 0,
            force: false,
        });
        app.world_mut().flush();

        assert!(app.world().resource::<Seen>().rooms.is_empty());
    }

    #[test]
    fn test_area_selection_notifies_area_and_room() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        open(&mut app);

        app.world_mut().trigger(SelectArea { index: 0 });
        app.world_mut().flush();

        let seen = app.world().resource::<Seen>();
        assert_eq!(seen.areas, vec![0]);
        assert_eq!(seen.rooms, vec![0x0200_0000]);
    }

    #[test]
    fn test_failed_selection_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        open(&mut app);

        app.world_mut().trigger(SelectSector {
            index: 7,
            force: false,
        });
        app.world_mut().flush();

        let editor = app.world().resource::<Editor>();
        assert_eq!(editor.selection().sector_index, Some(0));
    }
}
