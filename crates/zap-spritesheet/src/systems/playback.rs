//! Playback of named sequence items on one sprite.
//!
//! A [`SpritesheetPlayer`] owns the atlas layout, the item registry and a single
//! playback cursor. The host calls [`SpritesheetPlayer::tick`] once per frame;
//! everything time-based (frame advance, length locks, auto-revert) happens there.

use glam::Vec2;
use log::{debug, trace, warn};

use crate::api::types::{PlayStatus, PlaybackEvent};
use crate::assets::atlas::AtlasGrid;
use crate::assets::manifest::SheetManifest;
use crate::assets::registry::SequenceRegistry;
use crate::components::sequence::{ItemKind, SequenceItem};
use crate::error::{Result, SheetError};
use crate::renderer::target::VisualTarget;

/// Events a player buffers between drains (default for [`SpritesheetPlayer::with_max_events`]).
pub const DEFAULT_MAX_EVENTS: usize = 32;

/// Playback status of a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing active.
    #[default]
    Stopped,
    /// An animation is advancing.
    Playing,
    /// Holding the last frame of a finished animation, or a static frame.
    Paused,
}

/// Mutable playback state of one player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackCursor {
    /// Active item name.
    pub current: Option<String>,
    /// Position within the active item's cell list.
    pub frame: usize,
    /// Seconds until the next frame advance.
    pub time_left: f32,
    pub state: PlaybackState,
    /// True while a length lock holds the active item.
    pub locked: bool,
    /// Seconds until the length lock expires.
    pub lock_left: f32,
}

impl Default for PlaybackCursor {
    fn default() -> Self {
        Self {
            current: None,
            frame: 0,
            time_left: 0.0,
            state: PlaybackState::Stopped,
            locked: false,
            lock_left: 0.0,
        }
    }
}

/// Plays items from one spritesheet on one visual target.
pub struct SpritesheetPlayer<T: VisualTarget> {
    name: String,
    atlas: AtlasGrid,
    registry: SequenceRegistry,
    cursor: PlaybackCursor,
    target: T,
    /// Cell currently shown on the target.
    cell: usize,
    events: Vec<PlaybackEvent>,
    /// Oldest events are dropped past this many.
    max_events: usize,
}

impl<T: VisualTarget> SpritesheetPlayer<T> {
    /// Attach a player to `target`. Sets the UV scale to one cell and shows cell 0.
    pub fn new(name: impl Into<String>, atlas: AtlasGrid, mut target: T) -> Self {
        let name = name.into();
        target.set_uv_scale(atlas.step());
        target.set_uv_offset(atlas.offset(0).unwrap_or(Vec2::ZERO));
        Self {
            registry: SequenceRegistry::new(name.clone()),
            name,
            atlas,
            cursor: PlaybackCursor::default(),
            target,
            cell: 0,
            events: Vec::new(),
            max_events: DEFAULT_MAX_EVENTS,
        }
    }

    /// Keep at most `max` undrained events. Zero disables recording.
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self.trim_events();
        self
    }

    /// Show `cell` until something is played.
    pub fn with_default_cell(mut self, cell: usize) -> Result<Self> {
        let offset = self.atlas.offset(cell).ok_or_else(|| SheetError::CellOutOfRange {
            item: self.name.clone(),
            cell,
            cells: self.atlas.len(),
        })?;
        self.cell = cell;
        self.target.set_uv_offset(offset);
        Ok(self)
    }

    /// Build a player with every item a manifest describes.
    pub fn from_manifest(manifest: &SheetManifest, target: T) -> Result<Self> {
        let atlas = manifest.resolve_atlas()?;
        let mut player = Self::new(manifest.name.clone(), atlas, target)
            .with_default_cell(manifest.default_cell)?;
        for item in manifest.items() {
            player.add_item(item, None, false)?;
        }
        if let Some(default) = &manifest.default {
            player.set_default(default);
        }
        Ok(player)
    }

    // -- Registry --

    /// Register an item under `name` (or its own name). Replaces any item of the same name.
    pub fn add_item(&mut self, item: SequenceItem, name: Option<&str>, make_default: bool) -> Result<()> {
        item.validate(self.atlas.len())?;
        self.registry.add(item, name, make_default);
        Ok(())
    }

    /// Set the item playback falls back to. Unknown names are logged and ignored.
    pub fn set_default(&mut self, name: &str) -> bool {
        let found = self.registry.set_default(name);
        if !found {
            self.record(PlaybackEvent::UnknownItem { item: name.to_string() });
        }
        found
    }

    // -- Transitions --

    /// Start playing `name` from its first frame.
    ///
    /// With `ignore_if_current`, requesting the active item keeps it running
    /// untouched. Length locks don't apply here, only to [`switch`](Self::switch).
    pub fn play(&mut self, name: &str, ignore_if_current: bool) -> PlayStatus {
        let Some(item) = self.registry.get(name) else {
            return self.unknown_item(name);
        };

        if ignore_if_current && self.cursor.current.as_deref() == Some(name) {
            debug!("{} already plays {name}, won't switch", self.name);
            return PlayStatus::AlreadyActive;
        }

        let options = item.options;
        let first = item.cells()[0];
        let state = match item.kind {
            ItemKind::Animation(_) => PlaybackState::Playing,
            ItemKind::StaticFrame(_) => PlaybackState::Paused,
        };

        self.stop();

        self.cursor = PlaybackCursor {
            current: Some(name.to_string()),
            frame: 0,
            time_left: options.speed,
            state,
            locked: options.locks(),
            lock_left: options.length,
        };
        self.show_cell(first);

        debug!("{} started playing {name}", self.name);
        self.record(PlaybackEvent::Started { item: name.to_string() });
        PlayStatus::Started
    }

    /// Play `name` unless it's already active or a length lock holds the current item.
    pub fn switch(&mut self, name: &str) -> PlayStatus {
        if !self.registry.contains(name) {
            return self.unknown_item(name);
        }

        if self.cursor.locked && self.cursor.current.as_deref() != Some(name) {
            debug!("{} is locked, dropped switch to {name}", self.name);
            return PlayStatus::Locked;
        }

        self.play(name, true)
    }

    /// Stop the active item, keeping its current cell on screen.
    pub fn stop(&mut self) {
        let Some(item) = self.cursor.current.take() else {
            return;
        };
        debug!("{} has stopped playback of {item}", self.name);
        self.cursor.state = PlaybackState::Stopped;
        self.cursor.frame = 0;
        self.cursor.locked = false;
        self.record(PlaybackEvent::Stopped { item });
    }

    // -- Per-frame update --

    /// Advance playback by `dt` seconds, at most one frame per call.
    ///
    /// Does nothing once the target is dead. Negative or non-finite deltas are ignored.
    pub fn tick(&mut self, dt: f32) {
        if !(dt.is_finite() && dt >= 0.0) {
            warn!("{} ignored tick with bad delta {dt}", self.name);
            return;
        }
        if !self.target.is_alive() || self.cursor.state == PlaybackState::Stopped {
            return;
        }

        if self.tick_lock(dt) {
            return;
        }

        match self.cursor.state {
            PlaybackState::Playing => self.advance(dt),
            PlaybackState::Paused => self.revert_when_complete(),
            PlaybackState::Stopped => {}
        }
    }

    /// Count down the length lock. Returns true if expiry switched to another item.
    fn tick_lock(&mut self, dt: f32) -> bool {
        if !self.cursor.locked {
            return false;
        }
        self.cursor.lock_left -= dt;
        if self.cursor.lock_left > 0.0 {
            return false;
        }

        let Some(current) = self.cursor.current.clone() else {
            return false;
        };
        let Some(item) = self.registry.get(&current) else {
            return false;
        };
        let options = item.options;

        self.cursor.lock_left = options.length;
        self.cursor.locked = false;
        debug!("{}: lock on {current} expired", self.name);
        self.record(PlaybackEvent::Unlocked { item: current.clone() });

        if !options.reset_on_complete {
            return false;
        }
        match self.revert_target(&current) {
            Some(default) => self.switch(&default).started(),
            None => false,
        }
    }

    fn advance(&mut self, dt: f32) {
        let Some(current) = self.cursor.current.as_deref() else {
            return;
        };
        let Some(item) = self.registry.get(current) else {
            return;
        };
        let ItemKind::Animation(frames) = &item.kind else {
            return;
        };

        self.cursor.time_left -= dt;
        if self.cursor.time_left > 0.0 {
            return;
        }

        // At most one frame per tick; the timer restarts from the full speed.
        self.cursor.time_left = item.options.speed;

        let last = frames.len() - 1;
        let completed = !item.options.looping && self.cursor.frame + 1 >= last;
        let frame = if completed {
            last
        } else if self.cursor.frame < last {
            self.cursor.frame + 1
        } else {
            0
        };

        let cell = frames[frame];
        let item = current.to_string();
        self.cursor.frame = frame;
        trace!("{}: {item} frame {frame} (cell {cell})", self.name);
        self.show_cell(cell);
        self.record(PlaybackEvent::FrameChanged { item: item.clone(), cell });

        if completed {
            self.cursor.state = PlaybackState::Paused;
            debug!("{}: {item} completed", self.name);
            self.record(PlaybackEvent::Completed { item });
        }
    }

    /// Finished non-looping animations with `reset_on_complete` go back to the default item.
    fn revert_when_complete(&mut self) {
        if self.cursor.locked {
            return;
        }
        let Some(current) = self.cursor.current.clone() else {
            return;
        };
        let Some(item) = self.registry.get(&current) else {
            return;
        };
        if !item.is_animation() || !item.options.reset_on_complete {
            return;
        }
        if let Some(default) = self.revert_target(&current) {
            debug!("{}: {current} done, back to {default}", self.name);
            self.play(&default, true);
        }
    }

    fn revert_target(&self, current: &str) -> Option<String> {
        self.registry
            .default_item()
            .filter(|&default| default != current)
            .map(str::to_string)
    }

    fn show_cell(&mut self, cell: usize) {
        if let Some(offset) = self.atlas.offset(cell) {
            self.cell = cell;
            self.target.set_uv_offset(offset);
        }
    }

    fn record(&mut self, event: PlaybackEvent) {
        self.events.push(event);
        self.trim_events();
    }

    fn trim_events(&mut self) {
        if self.events.len() > self.max_events {
            let excess = self.events.len() - self.max_events;
            self.events.drain(..excess);
        }
    }

    fn unknown_item(&mut self, name: &str) -> PlayStatus {
        warn!("{} has no item named {name}!", self.name);
        self.record(PlaybackEvent::UnknownItem { item: name.to_string() });
        PlayStatus::UnknownItem
    }

    // -- Accessors --

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn atlas(&self) -> &AtlasGrid {
        &self.atlas
    }

    pub fn registry(&self) -> &SequenceRegistry {
        &self.registry
    }

    pub fn cursor(&self) -> &PlaybackCursor {
        &self.cursor
    }

    pub fn state(&self) -> PlaybackState {
        self.cursor.state
    }

    pub fn current_item(&self) -> Option<&str> {
        self.cursor.current.as_deref()
    }

    /// Cell currently shown on the target.
    pub fn current_cell(&self) -> usize {
        self.cell
    }

    pub fn is_locked(&self) -> bool {
        self.cursor.locked
    }

    pub fn default_item(&self) -> Option<&str> {
        self.registry.default_item()
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Events recorded since the last drain, oldest first.
    ///
    /// Holds at most [`max_events`](Self::max_events); older ones are dropped.
    pub fn events(&self) -> &[PlaybackEvent] {
        &self.events
    }

    pub fn max_events(&self) -> usize {
        self.max_events
    }

    /// Take all recorded events.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.events)
    }
}
