use std::sync::Arc;

use reqwest::Url;
use thiserror::Error;
use tokio::sync::oneshot;

use crate::{
    config,
    management::{CredentialStore, ErrorReporter},
    types::Collection,
    vk::{
        aggregation::{AggregationState, View},
        auth::ACCESS_TOKEN_KEY,
        response::{self, ParseError},
        transport::{ReqwestTransport, Transport, TransportError, TransportResult},
    },
};

const METHOD_LIST_ALBUMS: &str = "audio.getAlbums";
const METHOD_LIST_AUDIO: &str = "audio.get";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to retrieve {what} from server: {source}")]
    Transport {
        what: String,
        #[source]
        source: TransportError,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("No access token configured. Run vkaudio auth first.")]
    MissingToken,

    #[error("Invalid API url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Fetches a user's playlists and their tracks.
///
/// Cloning is cheap; clones share the transport, credential store and
/// reporter. Every call to [`LibraryFetcher::request_library`] is a separate
/// run with its own result.
#[derive(Clone)]
pub struct LibraryFetcher {
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialStore>,
    reporter: Arc<dyn ErrorReporter>,
    api_url: String,
    api_version: Option<String>,
}

impl LibraryFetcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            transport,
            credentials,
            reporter,
            api_url: config::DEFAULT_API_URL.to_string(),
            api_version: None,
        }
    }

    /// Fetcher talking to the configured API through a [`ReqwestTransport`].
    pub fn from_env(
        credentials: Arc<dyn CredentialStore>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config::request_timeout())?;
        Ok(Self::new(Arc::new(transport), credentials, reporter)
            .with_api_url(config::vk_api_url())
            .with_api_version(config::vk_api_version()))
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_version(mut self, api_version: Option<String>) -> Self {
        self.api_version = api_version;
        self
    }

    /// Starts one run that fetches the user's playlists and all of their tracks.
    ///
    /// Reads the access token from the credential store and requests the
    /// playlist listing (`audio.getAlbums`). When the listing arrives, one
    /// `audio.get` request is sent for the whole library and one per playlist,
    /// all at once. The call itself returns immediately; results arrive on the
    /// transport's completion context.
    ///
    /// # Arguments
    ///
    /// * `on_ready` - Receives the finished library once every track request
    ///   has completed
    ///
    /// # Returns
    ///
    /// Nothing. The outcome is delivered through `on_ready` and the error reporter:
    /// - `on_ready` gets the default collection first, followed by the
    ///   playlists in the order the server listed them
    /// - A playlist whose track request failed keeps its slot with no tracks
    ///   and `fetched == false`
    /// - A missing token or a failed listing is reported and `on_ready` is
    ///   never called
    ///
    /// # Example
    ///
    /// ```
    /// fetcher.request_library(|library| {
    ///     for collection in library {
    ///         println!("{}: {} tracks", collection.title, collection.tracks.len());
    ///     }
    /// });
    /// ```
    pub fn request_library<F>(&self, on_ready: F)
    where
        F: FnOnce(Vec<Collection>) + Send + 'static,
    {
        let token = match self.access_token() {
            Ok(token) => token,
            Err(e) => return self.report(&e),
        };

        let url = match self.method_url(METHOD_LIST_ALBUMS, &token, &[]) {
            Ok(url) => url,
            Err(e) => return self.report(&e),
        };

        let fetcher = self.clone();
        self.transport.send(
            url,
            Box::new(move |result| fetcher.on_collections(&token, result, on_ready)),
        );
    }

    /// Runs [`LibraryFetcher::request_library`] and waits for its result.
    ///
    /// # Returns
    ///
    /// - `Some(Vec<Collection>)` - The finished library
    /// - `None` - The run ended without calling back, e.g. the token is
    ///   missing or the listing failed. The reason went to the error reporter.
    ///
    /// # Example
    ///
    /// ```
    /// let Some(library) = fetcher.fetch_library().await else {
    ///     error!("Could not fetch your music library.");
    /// };
    /// ```
    pub async fn fetch_library(&self) -> Option<Vec<Collection>> {
        let (tx, rx) = oneshot::channel();
        self.request_library(move |collections| {
            let _ = tx.send(collections);
        });
        rx.await.ok()
    }

    fn on_collections<F>(&self, token: &str, result: TransportResult, on_ready: F)
    where
        F: FnOnce(Vec<Collection>) + Send + 'static,
    {
        let listed = result
            .map_err(|source| FetchError::Transport {
                what: "playlists".to_string(),
                source,
            })
            .and_then(|body| Ok(response::parse_collections(&body)?));

        let listed = match listed {
            Ok(listed) => listed,
            Err(e) => return self.report(&e),
        };

        let mut slots = Vec::with_capacity(listed.len() + 1);
        slots.push(Collection::library_default());
        slots.extend(listed);

        // Every url is built before the first request goes out. Only slot 0
        // asks for the whole library; listed albums always send their id.
        let requests = slots
            .iter()
            .enumerate()
            .map(|(slot, c)| {
                let album_id = (slot > 0).then_some(c.id);
                Ok((self.tracks_url(token, album_id)?, c.title.clone()))
            })
            .collect::<Result<Vec<_>, FetchError>>();

        let requests = match requests {
            Ok(requests) => requests,
            Err(e) => return self.report(&e),
        };

        let views = AggregationState::new(slots, on_ready).into_views();
        for (view, (url, title)) in views.into_iter().zip(requests) {
            let reporter = Arc::clone(&self.reporter);
            self.transport.send(
                url,
                Box::new(move |result| complete_view(view, &title, result, reporter.as_ref())),
            );
        }
    }

    fn access_token(&self) -> Result<String, FetchError> {
        self.credentials
            .get(ACCESS_TOKEN_KEY)
            .filter(|token| !token.is_empty())
            .ok_or(FetchError::MissingToken)
    }

    fn tracks_url(&self, token: &str, album_id: Option<u64>) -> Result<Url, FetchError> {
        let mut params = vec![("need_user", "0".to_string())];
        if let Some(album_id) = album_id {
            params.push(("album_id", album_id.to_string()));
        }
        self.method_url(METHOD_LIST_AUDIO, token, &params)
    }

    fn method_url(
        &self,
        method: &str,
        token: &str,
        params: &[(&str, String)],
    ) -> Result<Url, FetchError> {
        let base = format!("{}/method/{}", self.api_url, method);

        let mut query = vec![("access_token", token.to_string())];
        query.extend(params.iter().cloned());
        if let Some(version) = &self.api_version {
            query.push(("v", version.clone()));
        }

        Url::parse_with_params(&base, &query).map_err(|e| FetchError::InvalidUrl {
            url: base,
            reason: e.to_string(),
        })
    }

    fn report(&self, err: &FetchError) {
        self.reporter.report(&err.to_string());
    }
}

// A failed slot still counts as handled so the run always finishes.
fn complete_view(view: View, title: &str, result: TransportResult, reporter: &dyn ErrorReporter) {
    let tracks = result
        .map_err(|source| FetchError::Transport {
            what: format!("songs of playlist '{}'", title),
            source,
        })
        .and_then(|body| Ok(response::parse_tracks(&body)?));

    match tracks {
        Ok(tracks) => {
            view.fill(tracks);
        }
        Err(e) => {
            reporter.report(&e.to_string());
            view.fail();
        }
    }
}
