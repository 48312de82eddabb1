/// Unique identifier for a player in a [`crate::SpriteScene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// Outcome of a `play`/`switch` request.
///
/// Requests never fail hard. Anything other than `Started` leaves the
/// playback cursor untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayStatus {
    /// The item became active and restarted from its first frame.
    Started,
    /// The item was already active and the request asked to keep it running.
    AlreadyActive,
    /// A length lock is holding the current item; soft switch dropped.
    Locked,
    /// No item with that name is registered.
    UnknownItem,
}

impl PlayStatus {
    pub fn started(self) -> bool {
        self == PlayStatus::Started
    }
}

/// Something that happened inside a player during a call or a tick.
/// Collected per player and drained by the host, like frame events.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// An item started playing.
    Started { item: String },
    /// Playback of an item was stopped.
    Stopped { item: String },
    /// The displayed cell changed.
    FrameChanged { item: String, cell: usize },
    /// A non-looping animation reached its last frame.
    Completed { item: String },
    /// A length lock expired.
    Unlocked { item: String },
    /// A request named an item that does not exist. Logged as a warning.
    UnknownItem { item: String },
}

impl PlaybackEvent {
    /// Whether this event was also reported as a warning.
    pub fn is_warning(&self) -> bool {
        matches!(self, PlaybackEvent::UnknownItem { .. })
    }
}
