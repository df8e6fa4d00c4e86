//! Queue manager - drives the active queue into a live player
//!
//! Owns the single active queue, applies content filters to fetched pages,
//! and keeps the queue/player relationship consistent under concurrent loads
//! and user-initiated queue switches. Constructed once per playback session
//! and passed by reference to whatever drives the player.

use crate::error::Result;
use crate::filter::ContentFilters;
use crate::player::{Player, PlayerState};
use crate::queue::{EmptyQueue, Queue};
use chord_core::traits::PreferenceStore;
use chord_core::types::MediaMetadata;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info};

/// Shared reference to the active queue.
///
/// The queue lives behind an async lock because its two suspend points
/// (`initial_status`, `next_page`) are awaited while holding it.
pub type SharedQueue = Arc<AsyncMutex<Box<dyn Queue>>>;

struct ManagerState {
    queue: Mutex<SharedQueue>,
    title: Mutex<Option<String>>,
    suggestion_ids: Mutex<HashSet<String>>,
    load_task: Mutex<Option<AbortHandle>>,
}

/// Orchestrates the active queue against the live player.
///
/// The player is the single mutable shared resource; this manager is the
/// only component that mutates it on the queue engine's behalf.
pub struct QueueManager {
    player: Arc<dyn Player>,
    prefs: Arc<dyn PreferenceStore>,
    state: Arc<ManagerState>,
}

impl QueueManager {
    /// Create a manager with an empty sentinel queue.
    pub fn new(player: Arc<dyn Player>, prefs: Arc<dyn PreferenceStore>) -> Self {
        Self {
            player,
            prefs,
            state: Arc::new(ManagerState {
                queue: Mutex::new(Arc::new(AsyncMutex::new(Box::new(EmptyQueue)))),
                title: Mutex::new(None),
                suggestion_ids: Mutex::new(HashSet::new()),
                load_task: Mutex::new(None),
            }),
        }
    }

    /// Start playing a new queue.
    ///
    /// Synchronous effects, visible before the call returns: suggestion
    /// bookkeeping is cleared, any in-flight load for a previous queue is
    /// aborted, the current-queue reference and title are replaced, player
    /// shuffle is disabled, and a preload item (when the variant has one) is
    /// handed to the player so playback starts immediately.
    ///
    /// The initial page resolves on a background task; the returned handle
    /// carries the fetch outcome. A fetch failure is not retried here and
    /// leaves the player untouched past the preload.
    pub fn play_queue(&self, queue: Box<dyn Queue>, play_when_ready: bool) -> JoinHandle<Result<()>> {
        self.state.suggestion_ids.lock().unwrap().clear();
        if let Some(prev) = self.state.load_task.lock().unwrap().take() {
            debug!("Aborting superseded queue load");
            prev.abort();
        }

        let preload = queue.preload_item();

        // Replace the reference before any I/O: the new queue is observable
        // immediately, and a stale load can never re-attach the old one.
        let shared: SharedQueue = Arc::new(AsyncMutex::new(queue));
        *self.state.queue.lock().unwrap() = Arc::clone(&shared);
        *self.state.title.lock().unwrap() = None;

        // Queue ordering is authoritative; shuffle is re-applied by the
        // caller afterwards if desired.
        self.player.set_shuffle_enabled(false);

        let preload_id = preload.as_ref().map(|item| item.id.clone());
        if let Some(item) = preload {
            debug!(id = %item.id, "Starting playback from preload item");
            self.player.set_media_item(item);
            self.player.prepare();
            self.player.set_play_when_ready(play_when_ready);
        }

        let filters = ContentFilters::from_prefs(self.prefs.as_ref());
        let player = Arc::clone(&self.player);
        let state = Arc::clone(&self.state);

        let handle = tokio::spawn(async move {
            let status = shared.lock().await.initial_status().await?;

            // Race guard: a preload was issued and the player has since gone
            // idle, meaning the user navigated away before the fetch
            // returned. The stale result must not touch the player.
            if preload_id.is_some() && player.playback_state() == PlayerState::Idle {
                debug!("Player went idle during load, discarding fetched page");
                return Ok(());
            }

            let resolved_index = status.resolved_index();
            if let Some(title) = status.title {
                *state.title.lock().unwrap() = Some(title);
            }

            let (items, index) =
                filters.apply_with_index(status.items, Some(resolved_index));
            if items.is_empty() {
                info!("Queue resolved to no playable items after filtering");
                return Ok(());
            }
            let index = index.unwrap_or(0);

            if let Some(preload_id) = preload_id {
                splice_around_preload(player.as_ref(), items, index, &preload_id);
            } else {
                player.set_media_items(items);
                player.seek_to(index, status.position_ms);
                player.prepare();
                player.set_play_when_ready(play_when_ready);
            }

            Ok(())
        });

        *self.state.load_task.lock().unwrap() = Some(handle.abort_handle());
        handle
    }

    /// Fetch and append the current queue's next page.
    ///
    /// The "near end of buffered items" driver: call when the player is
    /// running out of buffered items. Returns the number of items appended
    /// (0 when the queue is exhausted, the page filtered to nothing, or the
    /// queue was switched while the fetch was in flight).
    pub async fn extend_current(&self) -> Result<usize> {
        let shared = self.current_queue();

        let items = {
            let mut queue = shared.lock().await;
            if !queue.has_next_page() {
                return Ok(0);
            }
            queue.next_page().await?
        };

        // The queue may have been replaced while the fetch was in flight;
        // a page for a detached queue is dropped.
        if !Arc::ptr_eq(&shared, &self.current_queue()) {
            debug!("Queue replaced during page fetch, dropping page");
            return Ok(0);
        }

        let filters = ContentFilters::from_prefs(self.prefs.as_ref());
        let items = filters.apply(items);
        if items.is_empty() {
            return Ok(0);
        }

        let appended = items.len();
        self.player.add_media_items(self.player.item_count(), items);
        debug!(appended, "Extended player queue with next page");
        Ok(appended)
    }

    /// Reset to the empty sentinel and clear bookkeeping. The player is not
    /// mutated and in-flight page fetches are not cancelled; their results
    /// become unreachable.
    pub fn clear_queue(&self) {
        *self.state.queue.lock().unwrap() = Arc::new(AsyncMutex::new(Box::new(EmptyQueue)));
        *self.state.title.lock().unwrap() = None;
        self.state.suggestion_ids.lock().unwrap().clear();
    }

    /// The active queue.
    pub fn current_queue(&self) -> SharedQueue {
        Arc::clone(&self.state.queue.lock().unwrap())
    }

    /// Replace the active queue without `play_queue`'s side effects.
    ///
    /// For callers that already own a validated queue (e.g. after restoring
    /// a snapshot or driving `next_page` themselves).
    pub fn set_queue(&self, queue: Box<dyn Queue>) {
        *self.state.queue.lock().unwrap() = Arc::new(AsyncMutex::new(queue));
    }

    /// Current display title, if one has resolved.
    pub fn queue_title(&self) -> Option<String> {
        self.state.title.lock().unwrap().clone()
    }

    /// Set the display title directly.
    pub fn set_queue_title(&self, title: Option<String>) {
        *self.state.title.lock().unwrap() = title;
    }

    /// Record an item id the player appended algorithmically rather than as
    /// part of the explicit queue.
    pub fn mark_suggestion(&self, id: impl Into<String>) {
        self.state.suggestion_ids.lock().unwrap().insert(id.into());
    }

    /// Whether an item id was appended by recommendation logic.
    pub fn is_suggestion(&self, id: &str) -> bool {
        self.state.suggestion_ids.lock().unwrap().contains(id)
    }
}

/// Splice a fetched page around the already-playing preload item.
///
/// Items before the resolved index are inserted at position 0, items after
/// it are appended, and the page's copy of the preload item is dropped so
/// the final player queue matches the page order without a duplicate.
fn splice_around_preload(
    player: &dyn Player,
    items: Vec<MediaMetadata>,
    index: usize,
    preload_id: &str,
) {
    let mut before = items;
    let mut after = before.split_off((index + 1).min(before.len()));
    let current = before.pop();

    // If the cursor landed on something other than the preload (its own
    // entry was filtered out), the item is kept instead of dropped.
    if let Some(current) = current {
        if current.id != preload_id {
            after.insert(0, current);
        }
    }

    if !before.is_empty() {
        player.add_media_items(0, before);
    }
    if !after.is_empty() {
        player.add_media_items(player.item_count(), after);
    }
}
