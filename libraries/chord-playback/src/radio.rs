//! Continuation-capable queue variants backed by the remote catalog
//!
//! All three variants share the same cursor policy: a fetch failure
//! propagates without touching the stored endpoint/continuation, so the
//! caller can retry with the same token.

use crate::error::{PlaybackError, Result};
use crate::persist::{QueueData, QueueType};
use crate::queue::{Queue, QueueStatus};
use async_trait::async_trait;
use chord_core::traits::CatalogClient;
use chord_core::types::{LocalAlbum, MediaMetadata, WatchEndpoint};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Remote radio/mix queue.
///
/// Wraps a watch endpoint; the first fetch captures a fresh endpoint (the
/// backend may rewrite it) and a continuation token, and every further page
/// replaces both.
pub struct RadioQueue {
    catalog: Arc<dyn CatalogClient>,
    endpoint: WatchEndpoint,
    continuation: Option<String>,
    preload: Option<MediaMetadata>,
}

impl RadioQueue {
    /// Radio for an arbitrary endpoint (mix page, playlist radio).
    pub fn new(catalog: Arc<dyn CatalogClient>, endpoint: WatchEndpoint) -> Self {
        Self {
            catalog,
            endpoint,
            continuation: None,
            preload: None,
        }
    }

    /// Radio seeded from a single song.
    ///
    /// The song itself becomes the preload item, so playback can start
    /// before the first network round trip returns.
    pub fn radio(catalog: Arc<dyn CatalogClient>, song: MediaMetadata) -> Self {
        let endpoint = WatchEndpoint::radio_for_song(&song.id);
        Self {
            catalog,
            endpoint,
            continuation: None,
            preload: Some(song),
        }
    }
}

#[async_trait]
impl Queue for RadioQueue {
    fn preload_item(&self) -> Option<MediaMetadata> {
        self.preload.clone()
    }

    async fn initial_status(&mut self) -> Result<QueueStatus> {
        let page = self.catalog.fetch_next(&self.endpoint).await?;
        debug!(
            items = page.items.len(),
            continuation = page.continuation.is_some(),
            "Radio queue loaded first page"
        );

        self.endpoint = page.endpoint;
        self.continuation = page.continuation;

        Ok(QueueStatus {
            title: page.title,
            items: page.items,
            media_item_index: page.current_index,
            position_ms: 0,
        })
    }

    fn has_next_page(&self) -> bool {
        self.continuation.is_some()
    }

    async fn next_page(&mut self) -> Result<Vec<MediaMetadata>> {
        let token = self
            .continuation
            .as_deref()
            .ok_or(PlaybackError::QueueExhausted)?;

        let page = self.catalog.fetch_continuation(&self.endpoint, token).await?;

        self.endpoint = page.endpoint;
        self.continuation = page.continuation;
        Ok(page.items)
    }

    fn persist_data(&self) -> (QueueType, Option<QueueData>) {
        (
            QueueType::RemoteRadio,
            Some(QueueData::RemoteRadio {
                endpoint: self.endpoint.clone(),
                continuation: self.continuation.clone(),
            }),
        )
    }
}

/// Remote album followed by its radio feed.
///
/// The initial page is the album's own (pre-fetched) track list merged with
/// the head of the what's-next feed; later pages come purely from the radio
/// continuation.
pub struct AlbumRadioQueue {
    catalog: Arc<dyn CatalogClient>,
    playlist_id: String,
    album_title: Option<String>,
    album_songs: Vec<MediaMetadata>,
    endpoint: WatchEndpoint,
    continuation: Option<String>,
    first_page_loaded: bool,
}

impl AlbumRadioQueue {
    /// Queue for a remote album whose tracks are already in hand.
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        playlist_id: impl Into<String>,
        album_title: Option<String>,
        album_songs: Vec<MediaMetadata>,
    ) -> Self {
        let playlist_id = playlist_id.into();
        let endpoint = WatchEndpoint::for_playlist(playlist_id.clone());
        Self {
            catalog,
            playlist_id,
            album_title,
            album_songs,
            endpoint,
            continuation: None,
            first_page_loaded: false,
        }
    }
}

#[async_trait]
impl Queue for AlbumRadioQueue {
    fn preload_item(&self) -> Option<MediaMetadata> {
        self.album_songs.first().cloned()
    }

    async fn initial_status(&mut self) -> Result<QueueStatus> {
        let page = self.catalog.fetch_next(&self.endpoint).await?;

        self.endpoint = page.endpoint;
        self.continuation = page.continuation;
        self.first_page_loaded = true;

        // The feed may echo the album's own tracks back; suppress them by id
        // so the cursor stays on the album's first track.
        let album_ids: HashSet<&str> = self.album_songs.iter().map(|s| s.id.as_str()).collect();
        let mut items = self.album_songs.clone();
        items.extend(
            page.items
                .into_iter()
                .filter(|item| !album_ids.contains(item.id.as_str())),
        );

        debug!(
            album_songs = self.album_songs.len(),
            merged = items.len(),
            "Album radio queue loaded first page"
        );

        let media_item_index = if items.is_empty() { None } else { Some(0) };

        Ok(QueueStatus {
            title: self.album_title.clone().or(page.title),
            items,
            media_item_index,
            position_ms: 0,
        })
    }

    fn has_next_page(&self) -> bool {
        self.continuation.is_some()
    }

    async fn next_page(&mut self) -> Result<Vec<MediaMetadata>> {
        let token = self
            .continuation
            .as_deref()
            .ok_or(PlaybackError::QueueExhausted)?;

        let page = self.catalog.fetch_continuation(&self.endpoint, token).await?;

        self.endpoint = page.endpoint;
        self.continuation = page.continuation;
        Ok(page.items)
    }

    fn persist_data(&self) -> (QueueType, Option<QueueData>) {
        (
            QueueType::RemoteAlbumRadio,
            Some(QueueData::RemoteAlbumRadio {
                playlist_id: self.playlist_id.clone(),
                album_song_count: self.album_songs.len(),
                continuation: self.continuation.clone(),
                first_page_loaded: self.first_page_loaded,
            }),
        )
    }
}

/// Local album followed by its remote radio feed.
///
/// The initial page is entirely local (no I/O). The radio tail starts on the
/// first `next_page` call, which must first resolve the local album's remote
/// playlist id; that resolution happens once and is cached on the instance.
pub struct LocalAlbumRadioQueue {
    catalog: Arc<dyn CatalogClient>,
    album: LocalAlbum,
    start_index: usize,
    remote_playlist_id: Option<String>,
    endpoint: Option<WatchEndpoint>,
    continuation: Option<String>,
    first_radio_fetched: bool,
}

impl LocalAlbumRadioQueue {
    /// Queue over a local album's songs, starting at `start_index`.
    pub fn new(catalog: Arc<dyn CatalogClient>, album: LocalAlbum, start_index: usize) -> Self {
        Self {
            catalog,
            album,
            start_index,
            remote_playlist_id: None,
            endpoint: None,
            continuation: None,
            first_radio_fetched: false,
        }
    }

    async fn resolved_playlist_id(&mut self) -> Result<Option<String>> {
        if self.remote_playlist_id.is_none() {
            self.remote_playlist_id = self
                .catalog
                .resolve_remote_playlist_id(&self.album.id)
                .await?;
        }
        Ok(self.remote_playlist_id.clone())
    }
}

#[async_trait]
impl Queue for LocalAlbumRadioQueue {
    async fn initial_status(&mut self) -> Result<QueueStatus> {
        let items = self.album.songs.clone();
        let media_item_index = if items.is_empty() {
            None
        } else {
            Some(self.start_index.min(items.len() - 1))
        };

        Ok(QueueStatus {
            title: Some(self.album.title.clone()),
            items,
            media_item_index,
            position_ms: 0,
        })
    }

    fn has_next_page(&self) -> bool {
        // The first page was entirely local; at least one remote fetch is
        // always attempted before the queue can report exhaustion.
        !self.first_radio_fetched || self.continuation.is_some()
    }

    async fn next_page(&mut self) -> Result<Vec<MediaMetadata>> {
        if !self.first_radio_fetched {
            let Some(playlist_id) = self.resolved_playlist_id().await? else {
                debug!(album_id = %self.album.id, "No remote match for album, radio tail is empty");
                self.first_radio_fetched = true;
                return Ok(Vec::new());
            };

            let endpoint = WatchEndpoint::for_playlist(playlist_id);
            let page = self.catalog.fetch_next(&endpoint).await?;

            self.endpoint = Some(page.endpoint);
            self.continuation = page.continuation;
            self.first_radio_fetched = true;

            debug!(
                items = page.items.len(),
                "Local album radio fetched first remote page"
            );
            return Ok(page.items);
        }

        let token = self
            .continuation
            .as_deref()
            .ok_or(PlaybackError::QueueExhausted)?;
        let endpoint = self
            .endpoint
            .clone()
            .ok_or_else(|| PlaybackError::InvalidOperation("Missing radio endpoint".into()))?;

        let page = self.catalog.fetch_continuation(&endpoint, token).await?;

        self.endpoint = Some(page.endpoint);
        self.continuation = page.continuation;
        Ok(page.items)
    }

    fn persist_data(&self) -> (QueueType, Option<QueueData>) {
        (
            QueueType::LocalAlbumRadio,
            Some(QueueData::LocalAlbumRadio {
                album_id: self.album.id.clone(),
                start_index: self.start_index,
                continuation: self.continuation.clone(),
                first_page_loaded: self.first_radio_fetched,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chord_core::types::RadioPage;
    use chord_core::ChordError;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// What the fake catalog saw, for asserting request sequences.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Request {
        Next(Option<String>),
        Continuation(String),
        Resolve(String),
    }

    #[derive(Default)]
    struct FakeCatalog {
        pages: Mutex<VecDeque<chord_core::Result<RadioPage>>>,
        resolutions: Mutex<VecDeque<chord_core::Result<Option<String>>>>,
        requests: Mutex<Vec<Request>>,
    }

    impl FakeCatalog {
        fn with_pages(pages: Vec<chord_core::Result<RadioPage>>) -> Arc<Self> {
            Arc::new(Self {
                pages: Mutex::new(pages.into()),
                ..Self::default()
            })
        }

        fn queue_resolution(&self, resolution: chord_core::Result<Option<String>>) {
            self.resolutions.lock().unwrap().push_back(resolution);
        }

        fn requests(&self) -> Vec<Request> {
            self.requests.lock().unwrap().clone()
        }

        fn next_response(&self) -> chord_core::Result<RadioPage> {
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ChordError::catalog("no more fake pages")))
        }
    }

    #[async_trait]
    impl CatalogClient for FakeCatalog {
        async fn fetch_album_tracks(
            &self,
            _album_id: &str,
        ) -> chord_core::Result<Vec<MediaMetadata>> {
            Ok(Vec::new())
        }

        async fn fetch_next(&self, endpoint: &WatchEndpoint) -> chord_core::Result<RadioPage> {
            self.requests
                .lock()
                .unwrap()
                .push(Request::Next(endpoint.playlist_id.clone()));
            self.next_response()
        }

        async fn fetch_continuation(
            &self,
            _endpoint: &WatchEndpoint,
            continuation: &str,
        ) -> chord_core::Result<RadioPage> {
            self.requests
                .lock()
                .unwrap()
                .push(Request::Continuation(continuation.to_string()));
            self.next_response()
        }

        async fn resolve_remote_playlist_id(
            &self,
            album_id: &str,
        ) -> chord_core::Result<Option<String>> {
            self.requests
                .lock()
                .unwrap()
                .push(Request::Resolve(album_id.to_string()));
            self.resolutions
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ChordError::catalog("no fake resolution")))
        }
    }

    fn track(id: &str) -> MediaMetadata {
        MediaMetadata::new(id, format!("Track {id}"))
    }

    fn page(ids: &[&str], continuation: Option<&str>) -> RadioPage {
        RadioPage {
            title: Some("Fake Radio".into()),
            items: ids.iter().map(|id| track(id)).collect(),
            current_index: Some(0),
            endpoint: WatchEndpoint::for_playlist("RDfake"),
            continuation: continuation.map(String::from),
        }
    }

    #[tokio::test]
    async fn radio_threads_continuation_tokens() {
        let catalog = FakeCatalog::with_pages(vec![
            Ok(page(&["a"], Some("tok1"))),
            Ok(page(&["b"], Some("tok2"))),
            Ok(page(&["c"], None)),
        ]);
        let mut queue = RadioQueue::radio(catalog.clone(), track("seed"));

        queue.initial_status().await.expect("first page");
        assert!(queue.has_next_page());

        queue.next_page().await.expect("second page");
        queue.next_page().await.expect("third page");
        assert!(!queue.has_next_page());

        // Each continuation request carries the previous response's token,
        // never the original one.
        assert_eq!(
            catalog.requests(),
            vec![
                Request::Next(Some("RDseed".into())),
                Request::Continuation("tok1".into()),
                Request::Continuation("tok2".into()),
            ]
        );
    }

    #[tokio::test]
    async fn radio_preload_is_the_seed_song() {
        let catalog = FakeCatalog::with_pages(vec![]);
        let queue = RadioQueue::radio(catalog, track("seed"));
        assert_eq!(queue.preload_item().expect("preload").id, "seed");
    }

    #[tokio::test]
    async fn exhausted_radio_refuses_next_page() {
        let catalog = FakeCatalog::with_pages(vec![Ok(page(&["a"], None))]);
        let mut queue = RadioQueue::new(catalog, WatchEndpoint::for_playlist("RDx"));

        queue.initial_status().await.expect("first page");
        assert!(!queue.has_next_page());
        assert!(matches!(
            queue.next_page().await,
            Err(PlaybackError::QueueExhausted)
        ));
    }

    #[tokio::test]
    async fn failed_page_leaves_the_cursor_retryable() {
        let catalog = FakeCatalog::with_pages(vec![
            Ok(page(&["a"], Some("tok1"))),
            Err(ChordError::network("connection reset")),
            Ok(page(&["b"], Some("tok2"))),
        ]);
        let mut queue = RadioQueue::new(catalog.clone(), WatchEndpoint::for_playlist("RDx"));

        queue.initial_status().await.expect("first page");
        queue.next_page().await.expect_err("transport failure");

        // The cursor did not advance: the retry re-sends the same token.
        assert!(queue.has_next_page());
        queue.next_page().await.expect("retry succeeds");
        assert_eq!(
            catalog.requests()[1..],
            [
                Request::Continuation("tok1".into()),
                Request::Continuation("tok1".into()),
            ]
        );
    }

    #[tokio::test]
    async fn album_radio_merges_album_before_feed() {
        // The feed echoes album track "a2" back; it must not appear twice.
        let catalog = FakeCatalog::with_pages(vec![Ok(page(&["a2", "r1", "r2"], Some("tok1")))]);
        let mut queue = AlbumRadioQueue::new(
            catalog,
            "OLAK123",
            Some("My Album".into()),
            vec![track("a1"), track("a2")],
        );

        assert_eq!(queue.preload_item().expect("preload").id, "a1");

        let status = queue.initial_status().await.expect("status");
        let ids: Vec<_> = status.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a1", "a2", "r1", "r2"]);
        assert_eq!(status.media_item_index, Some(0));
        assert_eq!(status.title.as_deref(), Some("My Album"));
        assert!(queue.has_next_page());
    }

    fn local_album(ids: &[&str]) -> LocalAlbum {
        LocalAlbum {
            id: "alb1".into(),
            title: "Local Album".into(),
            songs: ids.iter().map(|id| track(id)).collect(),
        }
    }

    #[tokio::test]
    async fn local_album_initial_page_needs_no_io() {
        let catalog = FakeCatalog::with_pages(vec![]);
        let mut queue =
            LocalAlbumRadioQueue::new(catalog.clone(), local_album(&["l1", "l2", "l3"]), 1);

        let status = queue.initial_status().await.expect("status");
        assert_eq!(status.items.len(), 3);
        assert_eq!(status.media_item_index, Some(1));
        assert_eq!(status.title.as_deref(), Some("Local Album"));
        assert!(catalog.requests().is_empty());

        // Even with the whole first page local, one remote fetch is owed.
        assert!(queue.has_next_page());
    }

    #[tokio::test]
    async fn local_album_resolves_remote_playlist_once() {
        let catalog = FakeCatalog::with_pages(vec![
            Err(ChordError::network("timeout")),
            Ok(page(&["r1"], None)),
        ]);
        catalog.queue_resolution(Ok(Some("OLAK999".into())));
        let mut queue =
            LocalAlbumRadioQueue::new(catalog.clone(), local_album(&["l1"]), 0);

        queue.initial_status().await.expect("status");

        // First attempt: resolution succeeds, the page fetch fails.
        queue.next_page().await.expect_err("fetch failure");
        assert!(queue.has_next_page());

        // Retry: the cached playlist id is reused, no second resolution.
        let items = queue.next_page().await.expect("retry");
        assert_eq!(items.len(), 1);
        assert!(!queue.has_next_page());

        let resolves = catalog
            .requests()
            .into_iter()
            .filter(|r| matches!(r, Request::Resolve(_)))
            .count();
        assert_eq!(resolves, 1);
    }

    #[tokio::test]
    async fn local_album_without_remote_match_ends_quietly() {
        let catalog = FakeCatalog::with_pages(vec![]);
        catalog.queue_resolution(Ok(None));
        let mut queue =
            LocalAlbumRadioQueue::new(catalog.clone(), local_album(&["l1"]), 0);

        queue.initial_status().await.expect("status");
        let items = queue.next_page().await.expect("empty tail is not an error");
        assert!(items.is_empty());
        assert!(!queue.has_next_page());
    }
}
