/// Collaborator traits for Chord Player
use crate::error::Result;
use crate::types::{MediaMetadata, RadioPage, WatchEndpoint};
use async_trait::async_trait;

/// Remote catalog client.
///
/// Implementers talk to the catalog service that backs radio/mix feeds and
/// album lookups. All methods are failure-transparent: callers own retry
/// policy, implementations never retry internally.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch the track list of a remote album.
    async fn fetch_album_tracks(&self, album_id: &str) -> Result<Vec<MediaMetadata>>;

    /// Fetch the first page of a radio/mix feed.
    ///
    /// The returned page carries a possibly rewritten endpoint and a
    /// continuation token for subsequent pages.
    async fn fetch_next(&self, endpoint: &WatchEndpoint) -> Result<RadioPage>;

    /// Fetch a further page of a radio/mix feed.
    ///
    /// `continuation` is passed back verbatim from the previous page.
    async fn fetch_continuation(
        &self,
        endpoint: &WatchEndpoint,
        continuation: &str,
    ) -> Result<RadioPage>;

    /// Resolve a local album to its remote playlist id, if the catalog
    /// knows the album. Returns `Ok(None)` when there is no remote match.
    async fn resolve_remote_playlist_id(&self, album_id: &str) -> Result<Option<String>>;
}

/// User preference reads consumed by the queue engine.
///
/// Reads are synchronous and cheap; the engine reads each flag once per
/// queue start.
pub trait PreferenceStore: Send + Sync {
    /// Hide explicit-flagged content from fetched pages
    fn hide_explicit(&self) -> bool;

    /// Hide video-type tracks from fetched pages
    fn hide_videos(&self) -> bool;
}
