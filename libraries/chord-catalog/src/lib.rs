//! HTTP client for the Chord catalog service.
//!
//! Implements the `chord_core::CatalogClient` contract over HTTP: radio/mix
//! page fetches with continuation tokens, album track lists, and local-album
//! to remote-playlist resolution.

#![forbid(unsafe_code)]

pub mod client;
pub mod error;
pub mod types;

pub use client::{CatalogConfig, CatalogHttpClient};
pub use error::{CatalogError, Result};
