//! Chord Player - Queue & Continuation Engine
//!
//! Turns heterogeneous, pageable, potentially infinite media sources into a
//! single uniform, lazily-expanding playback sequence.
//!
//! This crate provides:
//! - The `Queue` contract and its variants (list, remote radio, remote album
//!   radio, local album radio, empty sentinel)
//! - `QueueManager`: drives a queue into a live player, coordinating
//!   background page fetches against user actions
//! - Content filters (explicit, video) applied off the playback-start path
//! - `PersistQueue`: serializable snapshots for process-restart survival
//!
//! # Architecture
//!
//! `chord-playback` never talks to the network or a database itself. The
//! catalog and preference store are injected through `chord-core` traits,
//! and the playback engine is reached only through the [`Player`] trait.
//! Exactly two operations may suspend on I/O: [`Queue::initial_status`] and
//! [`Queue::next_page`]; everything else is synchronous.
//!
//! # Example: starting a radio
//!
//! ```ignore
//! use chord_playback::{QueueManager, RadioQueue};
//!
//! let manager = QueueManager::new(player, prefs);
//!
//! // Playback starts from the seed song immediately; the rest of the mix
//! // splices in around it when the first page resolves.
//! let load = manager.play_queue(Box::new(RadioQueue::radio(catalog, song)), true);
//! load.await??;
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod filter;
pub mod manager;
pub mod persist;
pub mod player;
pub mod queue;
pub mod radio;

pub use error::{PlaybackError, Result};
pub use filter::ContentFilters;
pub use manager::{QueueManager, SharedQueue};
pub use persist::{PersistQueue, QueueData, QueueType};
pub use player::{Player, PlayerState};
pub use queue::{EmptyQueue, ListQueue, Queue, QueueStatus};
pub use radio::{AlbumRadioQueue, LocalAlbumRadioQueue, RadioQueue};
