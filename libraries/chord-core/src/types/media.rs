/// Playable media item domain types
use serde::{Deserialize, Serialize};

/// Reference to an artist on a media item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    /// Catalog artist identifier (None for artists without a catalog page)
    pub id: Option<String>,

    /// Artist display name
    pub name: String,
}

/// Reference to the album a media item belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRef {
    /// Catalog or library album identifier
    pub id: String,

    /// Album title
    pub title: String,
}

/// Canonical identity and attributes of a playable item.
///
/// Created by collaborators (library rows, catalog API items) when converting
/// into playback form. Immutable value type: never mutated, only replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaMetadata {
    /// Stable catalog/library identifier
    pub id: String,

    /// Item title
    pub title: String,

    /// Credited artists, in display order
    pub artists: Vec<ArtistRef>,

    /// Duration in seconds (-1 = unknown)
    pub duration_secs: i32,

    /// Thumbnail URL
    pub thumbnail_url: Option<String>,

    /// Album the item belongs to
    pub album: Option<AlbumRef>,

    /// Explicit-content flag
    pub explicit: bool,

    /// Liked/favorited by the user
    pub liked: bool,

    /// Whether the item is a video-type track rather than audio
    pub video: bool,

    /// Position token for remote playlist mutation
    pub set_video_id: Option<String>,
}

impl MediaMetadata {
    /// Create an item with minimal metadata
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artists: Vec::new(),
            duration_secs: -1,
            thumbnail_url: None,
            album: None,
            explicit: false,
            liked: false,
            video: false,
            set_video_id: None,
        }
    }

    /// Joined artist names for display
    pub fn artist_line(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_has_unknown_duration() {
        let item = MediaMetadata::new("t1", "Song");
        assert_eq!(item.duration_secs, -1);
        assert!(!item.explicit);
        assert!(!item.video);
    }

    #[test]
    fn artist_line_joins_in_order() {
        let mut item = MediaMetadata::new("t1", "Song");
        item.artists = vec![
            ArtistRef {
                id: Some("a1".into()),
                name: "First".into(),
            },
            ArtistRef {
                id: None,
                name: "Second".into(),
            },
        ];
        assert_eq!(item.artist_line(), "First, Second");
    }
}
