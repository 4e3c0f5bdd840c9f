//! Configuration management for the VK audio client.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Every accessor has a default, so the
//! client works without any configuration besides the access token.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_API_URL: &str = "https://api.vk.com";
pub const DEFAULT_APP_ID: u32 = 4747736;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Returns the directory holding `.env` and the stored credentials.
///
/// - Linux: `~/.local/share/vkaudio`
/// - macOS: `~/Library/Application Support/vkaudio`
/// - Windows: `%LOCALAPPDATA%/vkaudio`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("vkaudio");
    path
}

/// Loads environment variables from `.env` in the local data directory.
///
/// Creates the data directory if it doesn't exist. A missing `.env` file is
/// not an error; a malformed one is.
///
/// # Example
///
/// ```
/// use vkaudio::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the VK API base url, `VK_API_URL`.
///
/// Methods are called as `{base}/method/<name>`.
pub fn vk_api_url() -> String {
    env::var("VK_API_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Returns the application id used for the authorization link, `VK_APP_ID`.
pub fn vk_app_id() -> u32 {
    env::var("VK_APP_ID")
        .ok()
        .and_then(|id| id.parse().ok())
        .unwrap_or(DEFAULT_APP_ID)
}

/// Returns the API version sent with every method call, `VK_API_VERSION`.
///
/// Unset means no `v` parameter is sent.
pub fn vk_api_version() -> Option<String> {
    env::var("VK_API_VERSION").ok().filter(|v| !v.is_empty())
}

/// Returns the per-request timeout, `VK_REQUEST_TIMEOUT` in seconds.
pub fn request_timeout() -> Duration {
    let secs = env::var("VK_REQUEST_TIMEOUT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    Duration::from_secs(secs)
}
