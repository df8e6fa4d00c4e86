//! Queue contract and the finite queue variants
//!
//! A queue turns a heterogeneous media source (a fixed list, a remote radio
//! feed, an album plus recommendations) into a uniform, lazily-expanding
//! playback sequence. Exactly two operations may suspend on I/O
//! (`initial_status` and `next_page`); everything else is synchronous.

use crate::error::{PlaybackError, Result};
use crate::persist::{QueueData, QueueType};
use async_trait::async_trait;
use chord_core::types::MediaMetadata;

/// One resolved page of a queue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueStatus {
    /// Queue/radio display name (may arrive with the first page)
    pub title: Option<String>,

    /// Resolved playable items
    pub items: Vec<MediaMetadata>,

    /// Index within `items` that should become current (None = unset)
    ///
    /// Invariant: when `Some(i)`, `i < items.len()`. Empty `items` means
    /// "nothing to play" and callers must not advance the player.
    pub media_item_index: Option<usize>,

    /// Starting playback position in milliseconds
    pub position_ms: u64,
}

impl QueueStatus {
    /// The index to hand to the player, defaulting to the first item.
    pub fn resolved_index(&self) -> usize {
        self.media_item_index.unwrap_or(0)
    }
}

/// Uniform contract over all queue variants.
///
/// Lifecycle: constructed with enough addressing information to perform its
/// first fetch, then `initial_status` is called exactly once before any
/// `next_page` call. A queue is destroyed/replaced wholesale when the user
/// starts a different queue; there is no partial reuse.
///
/// Variants never retry internally; retry policy belongs to the caller. A
/// failed `next_page` leaves the continuation cursor unchanged so the same
/// token can be retried.
#[async_trait]
pub trait Queue: Send {
    /// A single item known synchronously, usable to start the player before
    /// the full page resolves. Non-None only when no network/DB round trip
    /// is needed to name it.
    fn preload_item(&self) -> Option<MediaMetadata> {
        None
    }

    /// Resolve the initial page. May suspend on I/O. An empty result is not
    /// an error: it returns a status with empty items.
    async fn initial_status(&mut self) -> Result<QueueStatus>;

    /// Whether a further page can be fetched. Synchronous and non-blocking.
    fn has_next_page(&self) -> bool;

    /// Fetch the next page, advancing the continuation cursor on success.
    async fn next_page(&mut self) -> Result<Vec<MediaMetadata>>;

    /// The minimal reconstructible address of this queue for persistence.
    fn persist_data(&self) -> (QueueType, Option<QueueData>);
}

/// Sentinel queue: no preload, empty initial status, never a next page.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyQueue;

#[async_trait]
impl Queue for EmptyQueue {
    async fn initial_status(&mut self) -> Result<QueueStatus> {
        Ok(QueueStatus::default())
    }

    fn has_next_page(&self) -> bool {
        false
    }

    async fn next_page(&mut self) -> Result<Vec<MediaMetadata>> {
        Err(PlaybackError::QueueExhausted)
    }

    fn persist_data(&self) -> (QueueType, Option<QueueData>) {
        (QueueType::List, None)
    }
}

/// Fixed, finite queue over an already-resolved item sequence.
#[derive(Debug, Clone)]
pub struct ListQueue {
    title: Option<String>,
    items: Vec<MediaMetadata>,
    start_index: usize,
    start_position_ms: u64,
}

impl ListQueue {
    /// Create a list queue starting at the first item.
    pub fn new(title: Option<String>, items: Vec<MediaMetadata>) -> Self {
        Self {
            title,
            items,
            start_index: 0,
            start_position_ms: 0,
        }
    }

    /// Start at a specific item and position.
    pub fn starting_at(mut self, index: usize, position_ms: u64) -> Self {
        self.start_index = index;
        self.start_position_ms = position_ms;
        self
    }
}

#[async_trait]
impl Queue for ListQueue {
    async fn initial_status(&mut self) -> Result<QueueStatus> {
        let media_item_index = if self.items.is_empty() {
            None
        } else {
            Some(self.start_index.min(self.items.len() - 1))
        };

        Ok(QueueStatus {
            title: self.title.clone(),
            items: self.items.clone(),
            media_item_index,
            position_ms: self.start_position_ms,
        })
    }

    fn has_next_page(&self) -> bool {
        false
    }

    async fn next_page(&mut self) -> Result<Vec<MediaMetadata>> {
        Err(PlaybackError::QueueExhausted)
    }

    fn persist_data(&self) -> (QueueType, Option<QueueData>) {
        (QueueType::List, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> MediaMetadata {
        MediaMetadata::new(id, format!("Track {id}"))
    }

    #[tokio::test]
    async fn empty_queue_is_terminal() {
        let mut queue = EmptyQueue;
        assert!(queue.preload_item().is_none());
        assert!(!queue.has_next_page());

        let status = queue.initial_status().await.expect("empty status");
        assert!(status.items.is_empty());
        assert!(status.media_item_index.is_none());

        assert!(matches!(
            queue.next_page().await,
            Err(PlaybackError::QueueExhausted)
        ));
    }

    #[tokio::test]
    async fn list_queue_never_has_next_page() {
        let items: Vec<_> = (0..100).map(|i| track(&i.to_string())).collect();
        let mut queue = ListQueue::new(Some("Big list".into()), items);

        assert!(!queue.has_next_page());
        let status = queue.initial_status().await.expect("status");
        assert_eq!(status.items.len(), 100);
        assert!(!queue.has_next_page());
        assert!(matches!(
            queue.next_page().await,
            Err(PlaybackError::QueueExhausted)
        ));
    }

    #[tokio::test]
    async fn list_queue_resolves_start_index_and_position() {
        let mut queue =
            ListQueue::new(None, vec![track("a"), track("b"), track("c")]).starting_at(1, 42_000);

        let status = queue.initial_status().await.expect("status");
        assert_eq!(status.media_item_index, Some(1));
        assert_eq!(status.resolved_index(), 1);
        assert_eq!(status.position_ms, 42_000);
    }

    #[tokio::test]
    async fn list_queue_clamps_out_of_range_start_index() {
        let mut queue = ListQueue::new(None, vec![track("a"), track("b")]).starting_at(9, 0);

        let status = queue.initial_status().await.expect("status");
        assert_eq!(status.media_item_index, Some(1));
    }

    #[tokio::test]
    async fn empty_list_has_unset_index() {
        let mut queue = ListQueue::new(None, Vec::new());
        let status = queue.initial_status().await.expect("status");
        assert!(status.media_item_index.is_none());
        assert_eq!(status.resolved_index(), 0);
    }
}
