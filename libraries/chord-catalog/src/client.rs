//! HTTP client for the Chord catalog service.

use crate::error::{CatalogError, Result};
use crate::types::{AlbumPlaylistResponse, AlbumTracksResponse, NextRequest, NextResponse};
use async_trait::async_trait;
use chord_core::traits::CatalogClient;
use chord_core::types::{MediaMetadata, RadioPage, WatchEndpoint};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog service
    pub url: String,
}

impl CatalogConfig {
    /// Create a configuration with the given base URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// HTTP implementation of the catalog contract.
///
/// # Example
///
/// ```ignore
/// use chord_catalog::{CatalogConfig, CatalogHttpClient};
/// use chord_core::types::WatchEndpoint;
///
/// let client = CatalogHttpClient::new(CatalogConfig::new("https://catalog.example.com"))?;
/// let page = client.next(&WatchEndpoint::radio_for_song("abc123")).await?;
/// println!("{} items, continuation: {:?}", page.items.len(), page.continuation);
/// ```
pub struct CatalogHttpClient {
    http: Client,
    base_url: String,
}

impl CatalogHttpClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("ChordPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CatalogError::Request)?;

        Ok(Self { http, base_url })
    }

    /// Fetch the first page of a radio/mix feed.
    pub async fn next(&self, endpoint: &WatchEndpoint) -> Result<RadioPage> {
        self.post_next(NextRequest {
            endpoint,
            continuation: None,
        })
        .await
    }

    /// Fetch a further page of a radio/mix feed with a continuation token.
    pub async fn continuation(
        &self,
        endpoint: &WatchEndpoint,
        continuation: &str,
    ) -> Result<RadioPage> {
        self.post_next(NextRequest {
            endpoint,
            continuation: Some(continuation),
        })
        .await
    }

    async fn post_next(&self, request: NextRequest<'_>) -> Result<RadioPage> {
        let url = format!("{}/api/next", self.base_url);
        debug!(
            url = %url,
            playlist_id = ?request.endpoint.playlist_id,
            has_continuation = request.continuation.is_some(),
            "Fetching radio page"
        );

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();

        if status.is_success() {
            let page: NextResponse = response.json().await.map_err(|e| {
                CatalogError::Parse(format!("Failed to parse radio page: {e}"))
            })?;

            debug!(
                items = page.tracks.len(),
                continuation = page.continuation.is_some(),
                "Fetched radio page"
            );

            Ok(page.into())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(CatalogError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Fetch the track list of a remote album.
    pub async fn album_tracks(&self, album_id: &str) -> Result<Vec<MediaMetadata>> {
        let url = format!("{}/api/albums/{}/tracks", self.base_url, album_id);
        debug!(url = %url, album_id = %album_id, "Fetching album tracks");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();

        if status.is_success() {
            let body: AlbumTracksResponse = response.json().await.map_err(|e| {
                CatalogError::Parse(format!("Failed to parse album tracks: {e}"))
            })?;

            Ok(body.tracks.into_iter().map(Into::into).collect())
        } else if status.as_u16() == 404 {
            Err(CatalogError::Server {
                status: 404,
                message: format!("Album not found: {album_id}"),
            })
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(CatalogError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Resolve a local album to its remote playlist id.
    ///
    /// Returns `Ok(None)` when the catalog has no match for the album.
    pub async fn remote_playlist_id(&self, album_id: &str) -> Result<Option<String>> {
        let url = format!("{}/api/albums/{}/playlist", self.base_url, album_id);
        debug!(url = %url, album_id = %album_id, "Resolving remote playlist id");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();

        if status.is_success() {
            let body: AlbumPlaylistResponse = response.json().await.map_err(|e| {
                CatalogError::Parse(format!("Failed to parse playlist id: {e}"))
            })?;

            Ok(Some(body.playlist_id))
        } else if status.as_u16() == 404 {
            Ok(None)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(CatalogError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> CatalogError {
    if e.is_connect() || e.is_timeout() {
        CatalogError::Unreachable(e.to_string())
    } else {
        CatalogError::Request(e)
    }
}

#[async_trait]
impl CatalogClient for CatalogHttpClient {
    async fn fetch_album_tracks(&self, album_id: &str) -> chord_core::Result<Vec<MediaMetadata>> {
        Ok(self.album_tracks(album_id).await?)
    }

    async fn fetch_next(&self, endpoint: &WatchEndpoint) -> chord_core::Result<RadioPage> {
        Ok(self.next(endpoint).await?)
    }

    async fn fetch_continuation(
        &self,
        endpoint: &WatchEndpoint,
        continuation: &str,
    ) -> chord_core::Result<RadioPage> {
        Ok(self.continuation(endpoint, continuation).await?)
    }

    async fn resolve_remote_playlist_id(
        &self,
        album_id: &str,
    ) -> chord_core::Result<Option<String>> {
        Ok(self.remote_playlist_id(album_id).await?)
    }
}
