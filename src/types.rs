use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Id of the implicit collection holding every track of the user's library.
pub const DEFAULT_COLLECTION_ID: u64 = 0;

/// Title given to the implicit default collection.
pub const DEFAULT_COLLECTION_TITLE: &str = "library default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub url: String,
    pub duration: u32,
}

/// A playlist as returned to the caller.
///
/// `fetched` is false when the track request for this collection failed; the
/// collection still occupies its slot but carries no tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: u64,
    pub title: String,
    pub tracks: Vec<Track>,
    pub fetched: bool,
}

impl Collection {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            tracks: Vec::new(),
            fetched: false,
        }
    }

    pub fn library_default() -> Self {
        Self::new(DEFAULT_COLLECTION_ID, DEFAULT_COLLECTION_TITLE)
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_COLLECTION_ID
    }

    pub fn total_duration(&self) -> u64 {
        self.tracks.iter().map(|t| t.duration as u64).sum()
    }
}

/// Element of the `audio.getAlbums` response array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumItem {
    #[serde(default, deserialize_with = "lenient::number")]
    pub album_id: u64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
}

/// Element of the `audio.get` response array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioItem {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub artist: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub duration: u32,
}

/// Field decoders for response items. A field of the wrong type decodes to
/// its default instead of rejecting the whole response.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            _ => Ok(String::new()),
        }
    }

    /// Floats are truncated. Anything that is not a number fitting `T` is 0.
    pub fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64> + Default,
    {
        let n = match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
            _ => None,
        };
        Ok(n.and_then(|n| T::try_from(n).ok()).unwrap_or_default())
    }
}

impl From<AudioItem> for Track {
    fn from(item: AudioItem) -> Self {
        Track {
            title: item.title,
            artist: item.artist,
            url: item.url,
            duration: item.duration,
        }
    }
}

impl From<AlbumItem> for Collection {
    fn from(item: AlbumItem) -> Self {
        Collection::new(item.album_id, item.title)
    }
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: u64,
    pub title: String,
    pub tracks: String,
    pub duration: String,
}
