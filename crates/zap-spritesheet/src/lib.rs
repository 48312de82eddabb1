pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod error;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::types::{EntityId, PlayStatus, PlaybackEvent};
pub use assets::atlas::{AtlasGrid, TilingPolicy};
pub use assets::manifest::{ItemDescriptor, SheetManifest};
pub use assets::registry::SequenceRegistry;
pub use assets::slice::{slice, SheetPixels, SubImage};
pub use components::sequence::{ItemKind, ItemOptions, SequenceItem, DEFAULT_SPEED};
pub use components::sprite::SpriteComponent;
pub use crate::core::scene::{SheetEntity, SpriteScene};
pub use crate::core::time::{FrameClock, ManualClock, SystemClock};
pub use error::{Result, SheetError};
pub use renderer::target::VisualTarget;
pub use systems::animation::{tick_players, tick_with_clock};
pub use systems::playback::{PlaybackCursor, PlaybackState, SpritesheetPlayer, DEFAULT_MAX_EVENTS};
