use crate::{
    error, info,
    management::{CredentialStore, FileStore},
    success, utils,
    vk::auth::{ACCESS_TOKEN_KEY, normalize_token},
    warning,
};

/// Stores `value` as access token, or shows the stored one when `None`.
pub async fn token(value: Option<String>) {
    let store = match FileStore::load().await {
        Ok(store) => store,
        Err(e) => error!("Failed to load stored credentials. Err: {}", e),
    };

    let Some(value) = value else {
        match store.get(ACCESS_TOKEN_KEY) {
            Some(token) if !token.is_empty() => {
                info!("Stored access token: {}", utils::mask_token(&token))
            }
            _ => warning!("No access token stored. Run vkaudio auth to get one."),
        }
        return;
    };

    let token = normalize_token(&value);
    if token.is_empty() {
        error!("No access token found in the given input.");
    }

    store.set(ACCESS_TOKEN_KEY, &token);
    if let Err(e) = store.persist().await {
        error!("Failed to save access token. Err: {}", e);
    }

    success!("Access token saved to {}", store.path().display());
}
