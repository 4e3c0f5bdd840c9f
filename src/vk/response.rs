use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::types::{AlbumItem, AudioItem, Collection, Track};

/// Why a response body could not be turned into a result array.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The body is not valid JSON.
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The service answered with an `error` object instead of a result.
    #[error("{0}")]
    Service(String),

    /// The body is JSON but `response` is missing or not an array.
    #[error("Failed to retrieve data from server: incorrect response")]
    Shape,
}

/// Decodes a VK API envelope and returns the `response` array.
///
/// A non-null `error` member takes precedence over everything else and is
/// surfaced as [`ParseError::Service`] carrying `error.error_msg`.
pub fn parse(body: &[u8]) -> Result<Vec<Value>, ParseError> {
    let mut dom: Value = serde_json::from_slice(body)?;

    if let Some(err) = dom.get("error").filter(|e| !e.is_null()) {
        let message = err
            .get("error_msg")
            .and_then(Value::as_str)
            .unwrap_or("unknown service error");
        return Err(ParseError::Service(message.to_string()));
    }

    match dom.get_mut("response").map(Value::take) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(ParseError::Shape),
    }
}

/// Parses an `audio.getAlbums` body into collections, in response order.
pub fn parse_collections(body: &[u8]) -> Result<Vec<Collection>, ParseError> {
    let items: Vec<AlbumItem> = decode_objects(parse(body)?)?;
    Ok(items.into_iter().map(Collection::from).collect())
}

/// Parses an `audio.get` body into tracks, in response order.
pub fn parse_tracks(body: &[u8]) -> Result<Vec<Track>, ParseError> {
    let items: Vec<AudioItem> = decode_objects(parse(body)?)?;
    Ok(items.into_iter().map(Track::from).collect())
}

// Older API versions put the item count in front of the objects.
fn decode_objects<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>, ParseError> {
    items
        .into_iter()
        .filter(Value::is_object)
        .map(|item| serde_json::from_value(item).map_err(ParseError::from))
        .collect()
}
