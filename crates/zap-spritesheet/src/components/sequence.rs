//! Named sequence items: static frames and frame animations over an atlas.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetError};

/// Seconds per frame when an animation doesn't specify its own speed.
pub const DEFAULT_SPEED: f32 = 0.1;

/// Playback parameters of an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemOptions {
    /// Restart from the first frame after the last one (animations only).
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Seconds per frame (animations only).
    pub speed: f32,
    /// Seconds the item stays locked against soft switches once shown.
    /// Zero disables the lock.
    pub length: f32,
    /// Return to the player's default item when done.
    pub reset_on_complete: bool,
}

impl Default for ItemOptions {
    fn default() -> Self {
        Self {
            looping: false,
            speed: DEFAULT_SPEED,
            length: 0.0,
            reset_on_complete: false,
        }
    }
}

impl ItemOptions {
    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_length(mut self, length: f32) -> Self {
        self.length = length;
        self
    }

    pub fn reset_on_complete(mut self, reset: bool) -> Self {
        self.reset_on_complete = reset;
        self
    }

    /// Whether showing the item starts a length lock.
    pub fn locks(&self) -> bool {
        self.length > 0.0
    }
}

/// What an item shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// A single cell.
    StaticFrame(usize),
    /// Cells shown one after another, at least two of them.
    Animation(Vec<usize>),
}

/// A named static frame or animation.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceItem {
    pub name: String,
    pub kind: ItemKind,
    pub options: ItemOptions,
}

impl SequenceItem {
    /// A single cell.
    pub fn frame(name: impl Into<String>, cell: usize) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::StaticFrame(cell),
            options: ItemOptions::default(),
        }
    }

    /// An animation over an explicit cell list.
    pub fn animation(name: impl Into<String>, frames: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Animation(frames),
            options: ItemOptions::default(),
        }
    }

    /// An animation over `count` consecutive cells starting at `start`.
    pub fn range(name: impl Into<String>, start: usize, count: usize) -> Self {
        Self::animation(name, (start..start + count).collect())
    }

    pub fn with_options(mut self, options: ItemOptions) -> Self {
        self.options = options;
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.options.looping = looping;
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.options.speed = speed;
        self
    }

    pub fn length(mut self, length: f32) -> Self {
        self.options.length = length;
        self
    }

    pub fn reset_on_complete(mut self, reset: bool) -> Self {
        self.options.reset_on_complete = reset;
        self
    }

    /// Cells in display order.
    pub fn cells(&self) -> &[usize] {
        match &self.kind {
            ItemKind::StaticFrame(cell) => std::slice::from_ref(cell),
            ItemKind::Animation(frames) => frames,
        }
    }

    /// Cell at a position of the sequence.
    pub fn cell(&self, frame: usize) -> Option<usize> {
        self.cells().get(frame).copied()
    }

    pub fn frame_count(&self) -> usize {
        self.cells().len()
    }

    pub fn is_animation(&self) -> bool {
        matches!(self.kind, ItemKind::Animation(_))
    }

    /// Time to play every frame once. Zero for static frames.
    pub fn total_duration(&self) -> f32 {
        match &self.kind {
            ItemKind::StaticFrame(_) => 0.0,
            ItemKind::Animation(frames) => self.options.speed * frames.len() as f32,
        }
    }

    /// Check the item against an atlas with `cells` cells.
    pub fn validate(&self, cells: usize) -> Result<()> {
        if let ItemKind::Animation(frames) = &self.kind {
            if frames.len() < 2 {
                return Err(SheetError::ShortAnimation {
                    item: self.name.clone(),
                    frames: frames.len(),
                });
            }
            let speed = self.options.speed;
            if !(speed.is_finite() && speed > 0.0) {
                return Err(SheetError::InvalidSpeed {
                    item: self.name.clone(),
                    speed,
                });
            }
        }
        match self.cells().iter().find(|&&cell| cell >= cells) {
            Some(&cell) => Err(SheetError::CellOutOfRange {
                item: self.name.clone(),
                cell,
                cells,
            }),
            None => Ok(()),
        }
    }
}
