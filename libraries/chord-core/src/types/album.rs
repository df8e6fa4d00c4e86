/// Local library album types
use crate::types::MediaMetadata;
use serde::{Deserialize, Serialize};

/// An album read from the local library, with its songs in track order.
///
/// Produced by the library store before queue construction; the queue engine
/// never reads the library itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalAlbum {
    /// Library album identifier
    pub id: String,

    /// Album title
    pub title: String,

    /// Songs in track order, already converted to playback form
    pub songs: Vec<MediaMetadata>,
}
