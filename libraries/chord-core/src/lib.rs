//! Chord Player Core
//!
//! Core types, collaborator traits, and error handling for Chord Player.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `MediaMetadata`, `WatchEndpoint`, `RadioPage`, `LocalAlbum`
//! - **Collaborator Traits**: `CatalogClient`, `PreferenceStore`
//! - **Error Handling**: Unified `ChordError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use chord_core::types::{MediaMetadata, WatchEndpoint};
//!
//! // A playable item, as produced by a library row or catalog response
//! let song = MediaMetadata::new("dQw4w9WgXcQ", "Never Gonna Give You Up");
//!
//! // The radio feed seeded from that song
//! let endpoint = WatchEndpoint::radio_for_song(&song.id);
//! assert!(endpoint.playlist_id.is_some());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{ChordError, Result};
pub use traits::{CatalogClient, PreferenceStore};
pub use types::{AlbumRef, ArtistRef, LocalAlbum, MediaMetadata, RadioPage, WatchEndpoint};
