use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("server answered with HTTP {0}")]
    Status(u16),

    #[error("{0}")]
    Connection(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => TransportError::Status(status.as_u16()),
            None => TransportError::Connection(err.to_string()),
        }
    }
}

pub type TransportResult = Result<Vec<u8>, TransportError>;

/// Called exactly once with the outcome of a request.
pub type Completion = Box<dyn FnOnce(TransportResult) + Send + 'static>;

/// Fire-and-forget GET transport.
///
/// `send` must return without waiting for the response. Completions of
/// concurrent requests may run in any order and on any thread. There is no
/// cancellation.
pub trait Transport: Send + Sync {
    fn send(&self, url: Url, on_done: Completion);
}

/// [`Transport`] backed by a shared `reqwest` client.
///
/// Each request runs on its own tokio task, so `send` has to be called from
/// within a tokio runtime.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a transport with its own HTTP client.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Upper bound for a whole request, connect through body
    ///
    /// # Returns
    ///
    /// - `Ok(ReqwestTransport)` - Client identifying itself as `vkaudio/<version>`
    /// - `Err(TransportError::Connection)` - The TLS backend could not be initialized
    ///
    /// # Example
    ///
    /// ```
    /// let transport = ReqwestTransport::new(config::request_timeout())?;
    /// ```
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn get(client: Client, url: Url) -> TransportResult {
        let response = client.get(url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(TransportError::Status(response.status().as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, url: Url, on_done: Completion) {
        let client = self.client.clone();
        tokio::spawn(async move {
            on_done(Self::get(client, url).await);
        });
    }
}
