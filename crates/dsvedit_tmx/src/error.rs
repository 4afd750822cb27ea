use dsvedit_core::EditorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmxError {
    #[error("Room has {expected} layers but the document has {found} tile layers")]
    LayerCountMismatch { expected: usize, found: usize },

    #[error("Layer {layer} has {expected} tiles but the document layer has {found}")]
    TileCountMismatch {
        layer: usize,
        expected: usize,
        found: usize,
    },

    #[error("Layer {layer} is {expected} tiles wide but the document layer is {found}")]
    LayerWidthMismatch {
        layer: usize,
        expected: u32,
        found: u32,
    },

    #[error("Layer {layer} does not fill a rectangular grid ({tiles} tiles, width {width})")]
    RaggedLayer { layer: usize, width: u32, tiles: usize },

    #[error("Document layer {0} is infinite")]
    InfiniteLayer(usize),

    #[error("Layer {layer} uses tile {id}, past the end of a 256-cell tileset")]
    TileOutOfRange { layer: usize, id: u32 },

    #[error("Expected {expected} tileset paths, got {found}")]
    TilesetPathCount { expected: usize, found: usize },

    #[error("Failed to parse document: {0}")]
    Tiled(#[from] tiled::Error),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
