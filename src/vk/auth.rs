use crate::{config, info, success, warning};

/// Key under which the access token is kept in the credential store.
pub const ACCESS_TOKEN_KEY: &str = "access-token";

pub const OAUTH_AUTHORIZE_URL: &str = "https://oauth.vk.com/authorize";
pub const OAUTH_REDIRECT_URI: &str = "https://oauth.vk.com/blank.html";
pub const OAUTH_API_VERSION: &str = "5.27";

/// Access permission bits understood by the authorization endpoint.
pub mod permission {
    pub const AUDIO: u32 = 8;
    pub const VIDEO: u32 = 16;
    pub const STATUS: u32 = 1024;
    pub const MESSAGES: u32 = 4096;
    pub const OFFLINE: u32 = 65536;
}

/// Permissions requested by this client: audio and a non-expiring token.
pub const SCOPE: u32 = permission::AUDIO | permission::OFFLINE;

/// Builds the implicit-flow authorization link for `app_id`.
///
/// After granting access the browser lands on the blank redirect page with
/// the token in the URL fragment, which the user pastes back into
/// `vkaudio token`.
pub fn authorize_url(app_id: u32) -> String {
    format!(
        "{auth_url}?client_id={client_id}&scope={scope}&redirect_uri={redirect_uri}&display=page&v={version}&response_type=token",
        auth_url = OAUTH_AUTHORIZE_URL,
        client_id = app_id,
        scope = SCOPE,
        redirect_uri = OAUTH_REDIRECT_URI,
        version = OAUTH_API_VERSION,
    )
}

/// Extracts the bare token from user input.
///
/// Users often paste the whole redirect URL instead of only the token, so
/// everything up to `access_token=` and from the first `&` on is dropped.
pub fn normalize_token(input: &str) -> String {
    let mut token = input.trim();
    if let Some(pos) = token.find("access_token=") {
        token = &token[pos + "access_token=".len()..];
    }
    if let Some(pos) = token.find('&') {
        token = &token[..pos];
    }
    token.trim().to_string()
}

/// Shows the authorization link and tries to open it in the browser.
pub fn auth(open_browser: bool) {
    let auth_url = authorize_url(config::vk_app_id());

    info!("1. Open the link below to get an access token.");
    info!("2. Allow this application to access your account.");
    info!("3. Copy the address bar and run: vkaudio token '<address>'");
    println!("\n{}\n", auth_url);

    if !open_browser {
        return;
    }

    if webbrowser::open(&auth_url).is_err() {
        warning!("Failed to open browser. Please navigate to the link above manually.");
    } else {
        success!("Opened the authorization page in your browser.");
    }
}
