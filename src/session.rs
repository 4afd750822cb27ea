//! Session workflows: opening a game, handing rooms to Tiled, saving and building.
//!
//! These wrap the [`Editor`] with the filesystem checks and external programs that sit
//! around it. A successful open returns a ready editor (constant overlays loaded, first
//! area selected) for the caller to insert as a resource.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use bevy::prelude::*;
use dsvedit_core::{Editor, EditorConfig, EditorError, Settings};
use dsvedit_records::{Game, OpenedStore, StoreError, StoreOpener};
use thiserror::Error;

#[cfg(feature = "tmx")]
use dsvedit_tmx::{ImportOutcome, TmxError};

/// Header file inside an extracted folder.
pub const HEADER_PATH: [&str; 2] = ["ftc", "ndsheader.bin"];

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Header file not present: {}", .0.display())]
    MissingHeader(PathBuf),

    #[error("Failed to launch {}: {source}", program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[cfg(feature = "tmx")]
    #[error(transparent)]
    Tmx(#[from] TmxError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Folder a ROM is extracted into: `<folder>/Extracted files <rom stem>`.
pub fn extraction_folder(rom_path: &Path, folder: &Path) -> PathBuf {
    let stem = rom_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    folder.join(format!("Extracted files {stem}"))
}

/// Extract a ROM next to itself and open it.
///
/// Returns `Ok(None)` after a warning when the ROM is not a supported game.
pub fn open_rom(
    opener: &dyn StoreOpener,
    config: &EditorConfig,
    rom_path: &Path,
    settings: &mut Settings,
) -> Result<Option<Editor>, SessionError> {
    if !rom_path.is_file() {
        return Err(SessionError::NotAFile(rom_path.to_path_buf()));
    }
    let Some(game) = detect(rom_path)? else {
        return Ok(None);
    };

    let folder = extraction_folder(rom_path, rom_path.parent().unwrap_or(Path::new("")));
    info!("Extracting {} into {}", rom_path.display(), folder.display());
    let opened = opener.open_and_extract_rom(game, rom_path, &folder)?;
    let editor = start(game, opened, config)?;

    settings.last_used_folder = Some(folder);
    Ok(Some(editor))
}

/// Open a previously extracted folder.
///
/// Returns `Ok(None)` after a warning when the folder's header is not a supported game.
pub fn open_folder(
    opener: &dyn StoreOpener,
    config: &EditorConfig,
    folder: &Path,
    settings: &mut Settings,
) -> Result<Option<Editor>, SessionError> {
    if !folder.is_dir() {
        return Err(SessionError::NotADirectory(folder.to_path_buf()));
    }
    let header = HEADER_PATH.iter().fold(folder.to_path_buf(), |path, part| path.join(part));
    if !header.is_file() {
        return Err(SessionError::MissingHeader(header));
    }
    let Some(game) = detect(&header)? else {
        return Ok(None);
    };

    let opened = opener.open_directory(game, folder)?;
    let editor = start(game, opened, config)?;

    settings.last_used_folder = Some(folder.to_path_buf());
    Ok(Some(editor))
}

/// Reopen the last used folder if it still exists.
pub fn reopen_last_folder(
    opener: &dyn StoreOpener,
    config: &EditorConfig,
    settings: &mut Settings,
) -> Result<Option<Editor>, SessionError> {
    let Some(folder) = settings.reopenable_folder().map(Path::to_path_buf) else {
        return Ok(None);
    };
    open_folder(opener, config, &folder, settings)
}

fn detect(path: &Path) -> Result<Option<Game>, SessionError> {
    let game = Game::detect(path)?;
    match game {
        Some(game) => info!("Detected {} ({})", game.title(), game.code()),
        None => warn!("{} is not a DSVania", path.display()),
    }
    Ok(game)
}

fn start(game: Game, opened: OpenedStore, config: &EditorConfig) -> Result<Editor, SessionError> {
    let mut editor = Editor::new(game, opened, config);
    editor.load_constant_overlays()?;
    editor.initialize()?;
    Ok(editor)
}

/// Export the current room and open it in the configured Tiled.
///
/// Returns the document path, or `Ok(None)` after a warning when Tiled is not configured.
#[cfg(feature = "tmx")]
pub fn open_in_tiled(
    editor: &mut Editor,
    settings: &Settings,
) -> Result<Option<PathBuf>, SessionError> {
    let Some(tiled) = settings.tiled_executable() else {
        warn!("Can't find Tiled. Set the Tiled path in the settings first.");
        return Ok(None);
    };
    let document = dsvedit_tmx::export_current_room(editor)?;
    launch(tiled, &document)?;
    Ok(Some(document))
}

/// Read the current room back from its Tiled document.
#[cfg(feature = "tmx")]
pub fn import_from_tiled(editor: &mut Editor) -> Result<ImportOutcome, SessionError> {
    Ok(dsvedit_tmx::import_current_room(editor)?)
}

/// Flush pending edits into the extracted files.
pub fn save_files(editor: &mut Editor) -> Result<(), SessionError> {
    editor.save_files()?;
    Ok(())
}

/// Write `<export root>/<game> hack.nds` and optionally start the emulator on it.
pub fn build(
    editor: &mut Editor,
    settings: &Settings,
    launch_emulator: bool,
) -> Result<PathBuf, SessionError> {
    let output = editor.write_to_rom()?;
    if launch_emulator {
        match settings.emulator_executable() {
            Some(emulator) => launch(emulator, &output)?,
            None => warn!("No emulator configured, not launching {}", output.display()),
        }
    }
    Ok(output)
}

fn launch(program: &Path, argument: &Path) -> Result<(), SessionError> {
    debug!("Launching {} {}", program.display(), argument.display());
    Command::new(program)
        .arg(argument)
        .spawn()
        .map_err(|source| SessionError::Launch {
            program: program.to_path_buf(),
            source,
        })?;
    Ok(())
}
