//! # VK Integration Module
//!
//! Client side of the VK.com audio API as used by vkaudio.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer
//!          ↓
//! LibraryFetcher (library)
//!     ├── listing request → response::parse_collections
//!     └── one track request per slot → response::parse_tracks
//!                                        ↓
//!                              AggregationState views (aggregation)
//!          ↓
//! Transport (reqwest)
//!          ↓
//! VK API
//! ```
//!
//! ## Fetching the library
//!
//! A run first lists the user's playlists with `audio.getAlbums`. When that
//! succeeds it requests the tracks of the implicit default collection and of
//! every listed playlist with `audio.get`, all at once. Responses are merged
//! into their playlist's slot as they arrive; the ready callback fires once,
//! after the last of them.
//!
//! ```rust
//! let fetcher = LibraryFetcher::from_env(credentials, Arc::new(ConsoleReporter))?;
//! fetcher.request_library(|collections| {
//!     for c in &collections {
//!         println!("{}: {} tracks", c.title, c.tracks.len());
//!     }
//! });
//! ```
//!
//! ## Error Handling
//!
//! Failures are never retried. They are turned into messages for the
//! [`crate::management::ErrorReporter`]:
//! - **Transport**: non-200 status or connection failure
//! - **Decode**: the body is not the expected JSON
//! - **Service**: the body carries an `error.error_msg`
//!
//! A failed listing ends the run without a callback. A failed track request
//! leaves its playlist empty with `fetched == false`.
//!
//! ## Authentication
//!
//! [`auth`] builds the implicit-flow authorization link. The token the user
//! copies back is stored under [`auth::ACCESS_TOKEN_KEY`] and read at the
//! start of every run.

pub mod aggregation;
pub mod auth;
pub mod library;
pub mod response;
pub mod transport;

pub use library::FetchError;
pub use library::LibraryFetcher;
