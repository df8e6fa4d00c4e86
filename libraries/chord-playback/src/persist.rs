//! Serializable queue snapshots for process-restart survival
//!
//! A snapshot stores the resolved items seen so far plus the minimal
//! reconstructible address of the queue's variant. Restore deliberately
//! rebuilds a plain `ListQueue`: bounded history survives, the radio tail
//! restarts from scratch. The addressing data is still captured so a
//! variant-faithful restore can be added without a schema break.

use crate::error::Result;
use crate::queue::{ListQueue, Queue};
use chord_core::types::{MediaMetadata, WatchEndpoint};
use serde::{Deserialize, Serialize};

/// Closed set of persistable queue variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueType {
    List,
    RemoteRadio,
    RemoteAlbumRadio,
    LocalAlbumRadio,
}

/// Variant-specific addressing data.
///
/// Never stores live object references, only values that can reconstruct an
/// equivalent (not necessarily identical-cursor) queue after a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueueData {
    RemoteRadio {
        endpoint: WatchEndpoint,
        continuation: Option<String>,
    },
    RemoteAlbumRadio {
        playlist_id: String,
        album_song_count: usize,
        continuation: Option<String>,
        first_page_loaded: bool,
    },
    LocalAlbumRadio {
        album_id: String,
        start_index: usize,
        continuation: Option<String>,
        first_page_loaded: bool,
    },
}

/// Full resumable snapshot of a queue.
///
/// Created when the app suspends with an active queue; consumed once at
/// startup and discarded after a successful restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistQueue {
    /// Presentation title at capture time
    pub title: Option<String>,

    /// Resolved item sequence seen so far
    pub items: Vec<MediaMetadata>,

    /// Player cursor at capture time
    pub media_item_index: usize,

    /// Playback position at capture time, in milliseconds
    pub position_ms: u64,

    /// Variant tag of the captured queue
    pub queue_type: QueueType,

    /// Variant addressing data, when the variant has any
    pub queue_data: Option<QueueData>,
}

impl PersistQueue {
    /// Snapshot a live queue together with the player's cursor/position.
    ///
    /// `items` is the player's current media set: the resolved sequence the
    /// user actually sees, including lazily appended pages.
    pub fn capture(
        queue: &dyn Queue,
        title: Option<String>,
        items: Vec<MediaMetadata>,
        media_item_index: usize,
        position_ms: u64,
    ) -> Self {
        let (queue_type, queue_data) = queue.persist_data();
        Self {
            title,
            items,
            media_item_index,
            position_ms,
            queue_type,
            queue_data,
        }
    }

    /// Rebuild a queue from the snapshot.
    ///
    /// Every queue type restores as a `ListQueue` over the persisted items:
    /// the continuation tail is dropped, order/index/position are exact.
    pub fn into_queue(self) -> ListQueue {
        ListQueue::new(self.title, self.items).starting_at(self.media_item_index, self.position_ms)
    }

    /// Serialize to JSON for storage.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self).map_err(chord_core::ChordError::from)?)
    }

    /// Deserialize a stored snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json).map_err(chord_core::ChordError::from)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::EmptyQueue;

    fn track(id: &str) -> MediaMetadata {
        MediaMetadata::new(id, format!("Track {id}"))
    }

    #[tokio::test]
    async fn list_snapshot_round_trips_exactly() {
        let items: Vec<_> = (0..7).map(|i| track(&format!("t{i}"))).collect();
        let queue = ListQueue::new(Some("Saved".into()), items.clone());

        let snapshot = PersistQueue::capture(&queue, Some("Saved".into()), items.clone(), 4, 93_500);
        assert_eq!(snapshot.queue_type, QueueType::List);
        assert!(snapshot.queue_data.is_none());

        let mut restored = snapshot.into_queue();
        let status = restored.initial_status().await.expect("status");
        assert_eq!(status.items, items);
        assert_eq!(status.media_item_index, Some(4));
        assert_eq!(status.position_ms, 93_500);
        assert_eq!(status.title.as_deref(), Some("Saved"));
        assert!(!restored.has_next_page());
    }

    #[test]
    fn json_round_trip_preserves_addressing_data() {
        let snapshot = PersistQueue {
            title: Some("Radio".into()),
            items: vec![track("a"), track("b")],
            media_item_index: 1,
            position_ms: 12_000,
            queue_type: QueueType::RemoteRadio,
            queue_data: Some(QueueData::RemoteRadio {
                endpoint: WatchEndpoint::for_playlist("RDx"),
                continuation: Some("tok9".into()),
            }),
        };

        let json = snapshot.to_json().expect("serialize");
        let restored = PersistQueue::from_json(&json).expect("deserialize");
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn empty_sentinel_captures_as_a_bare_list() {
        let snapshot = PersistQueue::capture(&EmptyQueue, None, Vec::new(), 0, 0);
        assert_eq!(snapshot.queue_type, QueueType::List);
        assert!(snapshot.items.is_empty());
    }
}
