use thiserror::Error;

/// Hard failures raised while building atlases, players and sub-images.
///
/// Runtime misuse (unknown item names and similar) never produces one of
/// these; see [`crate::PlayStatus`] instead.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("{name} ({}x{}) won't cut into {}x{} sprites", .sheet[0], .sheet[1], .cell[0], .cell[1])]
    InvalidSpriteSize {
        name: String,
        sheet: [u32; 2],
        cell: [u32; 2],
    },

    #[error("item {item:?} references cell {cell}, but the atlas only has {cells}")]
    CellOutOfRange {
        item: String,
        cell: usize,
        cells: usize,
    },

    #[error("animation {item:?} needs at least 2 frames, got {frames}")]
    ShortAnimation { item: String, frames: usize },

    #[error("animation {item:?} has invalid speed {speed}, expected seconds per frame > 0")]
    InvalidSpeed { item: String, speed: f32 },

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    PixelBufferSize { expected: usize, actual: usize },

    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SheetError>;
