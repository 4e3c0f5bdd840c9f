//! VK.com Audio Library Client
//!
//! This library fetches a user's VK.com audio library: the list of playlists
//! and the tracks of each, fetched concurrently and delivered as one ordered
//! result. It includes the HTTP transport, response decoding, credential
//! storage and the command-line front end.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Credential storage and error reporting
//! - `types` - Data structures and type definitions
//! - `utils` - Formatting helpers
//! - `vk` - VK API client implementation
//!
//! # Example
//!
//! ```
//! use vkaudio::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> vkaudio::Res<()> {
//!     config::load_env().await?;
//!     cli::playlists(cli::PlaylistsView::Table, None).await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod management;
pub mod types;
pub mod utils;
pub mod vk;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with Send + Sync bounds so it can
/// cross task boundaries.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching playlists...");
/// info!("Found {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for unrecoverable errors in the binary: the process exits with code
/// 1 right after printing.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, such as a single playlist that failed to load.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
