//! Domain types for Chord Player

mod album;
mod endpoint;
mod media;

pub use album::LocalAlbum;
pub use endpoint::{RadioPage, WatchEndpoint};
pub use media::{AlbumRef, ArtistRef, MediaMetadata};
