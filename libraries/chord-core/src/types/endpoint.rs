/// Remote radio/mix addressing and page types
use crate::types::MediaMetadata;
use serde::{Deserialize, Serialize};

/// Address of a remote "watch" (radio/mix) feed.
///
/// The backend may rewrite this on every page fetch; callers always use the
/// most recently returned endpoint for the next request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchEndpoint {
    /// Seed song identifier
    pub video_id: Option<String>,

    /// Mix/playlist identifier
    pub playlist_id: Option<String>,

    /// Opaque backend parameters
    pub params: Option<String>,
}

impl WatchEndpoint {
    /// Endpoint for a radio seeded from a single song.
    ///
    /// The catalog derives the mix playlist from the seed song id.
    pub fn radio_for_song(song_id: &str) -> Self {
        Self {
            video_id: Some(song_id.to_string()),
            playlist_id: Some(format!("RD{song_id}")),
            params: None,
        }
    }

    /// Endpoint for a radio seeded from a remote playlist/album.
    pub fn for_playlist(playlist_id: impl Into<String>) -> Self {
        Self {
            video_id: None,
            playlist_id: Some(playlist_id.into()),
            params: None,
        }
    }
}

/// One page of a remote radio/mix feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadioPage {
    /// Display name of the radio/mix (usually only on the first page)
    pub title: Option<String>,

    /// Resolved playable items on this page
    pub items: Vec<MediaMetadata>,

    /// Index within `items` that should become current (None = unset)
    pub current_index: Option<usize>,

    /// Endpoint to use for the next request (backend may rewrite it)
    pub endpoint: WatchEndpoint,

    /// Opaque continuation token; None means the feed is exhausted
    pub continuation: Option<String>,
}
