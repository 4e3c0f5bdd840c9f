//! # CLI Module
//!
//! User-facing commands of vkaudio. Each command loads what it needs
//! (configuration, stored token), delegates to [`crate::vk`] and prints the
//! outcome.
//!
//! ## Commands
//!
//! - [`auth`] - Shows the VK authorization link and opens it in the browser
//! - [`token`] - Stores the access token copied from the browser, or shows the stored one
//! - [`playlists`] - Fetches all playlists with their tracks and prints them
//!
//! ## Usage Patterns
//!
//! ```bash
//! vkaudio auth                                   # Get the authorization link
//! vkaudio token 'https://oauth.vk.com/blank.html#access_token=...&expires_in=0'
//! vkaudio playlists                              # Table of playlists
//! vkaudio playlists --tracks --search rock       # Tracks of matching playlists
//! vkaudio playlists --json > library.json
//! ```
//!
//! Unrecoverable problems (no stored credentials, listing failed) end the
//! process through [`crate::error!`]. A playlist whose tracks failed to load
//! is reported as a warning and printed without tracks.

mod auth;
mod playlists;
mod token;

pub use auth::auth;
pub use playlists::PlaylistsView;
pub use playlists::playlists;
pub use token::token;
