//! Wire types for the catalog API.

use chord_core::types::{AlbumRef, ArtistRef, MediaMetadata, RadioPage, WatchEndpoint};
use serde::{Deserialize, Serialize};

/// Artist credit as returned by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogArtist {
    pub id: Option<String>,
    pub name: String,
}

/// Album reference as returned by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogAlbum {
    pub id: String,
    pub title: String,
}

/// A playable item as returned by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogTrack {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artists: Vec<CatalogArtist>,
    /// Duration in seconds; absent when the catalog does not know it
    #[serde(default)]
    pub duration_secs: Option<i32>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub album: Option<CatalogAlbum>,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub video: bool,
    #[serde(default)]
    pub set_video_id: Option<String>,
}

impl From<CatalogTrack> for MediaMetadata {
    fn from(track: CatalogTrack) -> Self {
        MediaMetadata {
            id: track.id,
            title: track.title,
            artists: track
                .artists
                .into_iter()
                .map(|a| ArtistRef {
                    id: a.id,
                    name: a.name,
                })
                .collect(),
            duration_secs: track.duration_secs.unwrap_or(-1),
            thumbnail_url: track.thumbnail_url,
            album: track.album.map(|a| AlbumRef {
                id: a.id,
                title: a.title,
            }),
            explicit: track.explicit,
            // Liked state lives in the local library, not the catalog
            liked: false,
            video: track.video,
            set_video_id: track.set_video_id,
        }
    }
}

/// Request body for `POST /api/next`.
#[derive(Debug, Serialize)]
pub struct NextRequest<'a> {
    pub endpoint: &'a WatchEndpoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation: Option<&'a str>,
}

/// Response body for `POST /api/next`.
#[derive(Debug, Deserialize)]
pub struct NextResponse {
    #[serde(default)]
    pub title: Option<String>,
    pub tracks: Vec<CatalogTrack>,
    #[serde(default)]
    pub current_index: Option<usize>,
    pub endpoint: WatchEndpoint,
    #[serde(default)]
    pub continuation: Option<String>,
}

impl From<NextResponse> for RadioPage {
    fn from(response: NextResponse) -> Self {
        RadioPage {
            title: response.title,
            items: response.tracks.into_iter().map(Into::into).collect(),
            current_index: response.current_index,
            endpoint: response.endpoint,
            continuation: response.continuation,
        }
    }
}

/// Response body for `GET /api/albums/{id}/tracks`.
#[derive(Debug, Deserialize)]
pub struct AlbumTracksResponse {
    pub tracks: Vec<CatalogTrack>,
}

/// Response body for `GET /api/albums/{id}/playlist`.
#[derive(Debug, Deserialize)]
pub struct AlbumPlaylistResponse {
    pub playlist_id: String,
}
