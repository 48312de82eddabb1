use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assets::atlas::{AtlasGrid, TilingPolicy};
use crate::components::sequence::{ItemKind, ItemOptions, SequenceItem};
use crate::error::Result;

/// Manifest describing one spritesheet and the items played from it.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetManifest {
    /// Human-readable name (e.g., "bat"). Also used in diagnostics.
    pub name: String,
    /// Sheet size in pixels, [width, height].
    pub sheet: [u32; 2],
    /// Cell size in pixels, [width, height].
    pub cell: [u32; 2],
    /// Tiling rules the sheet must satisfy (default: exact).
    #[serde(default)]
    pub policy: TilingPolicy,
    /// Cell shown before anything plays (default: 0).
    #[serde(default)]
    pub default_cell: usize,
    /// Item to fall back to after reset-on-complete items.
    #[serde(default)]
    pub default: Option<String>,
    /// Named items.
    #[serde(default)]
    pub items: BTreeMap<String, ItemDescriptor>,
}

/// Describes a named item. The `kind` tag picks static frame or animation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemDescriptor {
    Static {
        cell: usize,
        #[serde(flatten)]
        options: ItemOptions,
    },
    Animation {
        frames: Vec<usize>,
        #[serde(flatten)]
        options: ItemOptions,
    },
}

impl ItemDescriptor {
    fn to_item(&self, name: &str) -> SequenceItem {
        let (kind, options) = match self {
            ItemDescriptor::Static { cell, options } => (ItemKind::StaticFrame(*cell), *options),
            ItemDescriptor::Animation { frames, options } => (ItemKind::Animation(frames.clone()), *options),
        };
        SequenceItem {
            name: name.to_string(),
            kind,
            options,
        }
    }
}

impl SheetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve the atlas geometry this manifest describes.
    pub fn resolve_atlas(&self) -> Result<AtlasGrid> {
        AtlasGrid::resolve(self.name.clone(), self.sheet, self.cell, self.policy)
    }

    /// All items, in name order.
    pub fn items(&self) -> impl Iterator<Item = SequenceItem> + '_ {
        self.items.iter().map(|(name, desc)| desc.to_item(name))
    }
}
