use crate::types::{Collection, PlaylistTableRow, Track};

/// Formats seconds as `m:ss`, or `h:mm:ss` from one hour on.
pub fn format_duration(seconds: u64) -> String {
    let (hours, minutes, secs) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

pub fn format_track_line(track: &Track) -> String {
    format!("{} — {}: {}", track.artist, track.title, track.url)
}

/// Hides all but the last four characters of a token.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

/// Keeps collections whose title contains `search`, ignoring case.
pub fn filter_collections(collections: &mut Vec<Collection>, search: Option<&str>) {
    if let Some(search) = search {
        let search_term = search.to_lowercase();
        collections.retain(|c| c.title.to_lowercase().contains(&search_term));
    }
}

pub fn playlist_table_rows(collections: &[Collection]) -> Vec<PlaylistTableRow> {
    collections
        .iter()
        .map(|c| PlaylistTableRow {
            id: c.id,
            title: c.title.clone(),
            tracks: if c.fetched {
                c.tracks.len().to_string()
            } else {
                "failed".to_string()
            },
            duration: format_duration(c.total_duration()),
        })
        .collect()
}
