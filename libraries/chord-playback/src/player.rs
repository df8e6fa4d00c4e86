//! Player abstraction driven by the queue engine
//!
//! The playback engine itself (decoding, buffering, audio output) is an
//! external collaborator. The queue engine only needs the small surface
//! below, and it is the sole component that mutates the player on the
//! engine's behalf.

use chord_core::types::MediaMetadata;

/// Player transport state as observed by the queue engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Nothing loaded, or the player was stopped/reset
    Idle,

    /// Loading/buffering media
    Buffering,

    /// Media loaded and playable
    Ready,

    /// Playback reached the end of the media set
    Ended,
}

/// Live player surface.
///
/// Methods take `&self`; implementations own their interior mutability so the
/// engine can drive the player from both the caller's thread and background
/// load tasks.
pub trait Player: Send + Sync {
    /// Replace the media set with a single item
    fn set_media_item(&self, item: MediaMetadata);

    /// Replace the entire media set atomically
    fn set_media_items(&self, items: Vec<MediaMetadata>);

    /// Insert items at the given index
    fn add_media_items(&self, index: usize, items: Vec<MediaMetadata>);

    /// Number of items currently in the media set
    fn item_count(&self) -> usize;

    /// Begin preparation of the current media set
    fn prepare(&self);

    /// Start playback as soon as the player is ready
    fn set_play_when_ready(&self, play: bool);

    /// Enable/disable player-side shuffle
    fn set_shuffle_enabled(&self, enabled: bool);

    /// Current transport state
    fn playback_state(&self) -> PlayerState;

    /// Move the play cursor to `index` at `position_ms`
    fn seek_to(&self, index: usize, position_ms: u64);
}
