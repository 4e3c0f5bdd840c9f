use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error,
    management::{ConsoleReporter, FileStore},
    success,
    types::Collection,
    utils,
    vk::LibraryFetcher,
    warning,
};

/// How `vkaudio playlists` prints the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistsView {
    Table,
    Tracks,
    Json,
}

pub async fn playlists(view: PlaylistsView, search: Option<String>) {
    let store = match FileStore::load().await {
        Ok(store) => store,
        Err(e) => error!("Failed to load stored credentials. Err: {}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching playlists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let reporter = ConsoleReporter::with_progress(pb.clone());
    let fetcher = match LibraryFetcher::from_env(Arc::new(store), Arc::new(reporter)) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            pb.finish_and_clear();
            error!("Cannot create HTTP client. Err: {}", e)
        }
    };

    let library = fetcher.fetch_library().await;
    pb.finish_and_clear();

    let Some(mut collections) = library else {
        error!("Failed to fetch playlists.");
    };

    let failed = collections.iter().filter(|c| !c.fetched).count();
    utils::filter_collections(&mut collections, search.as_deref());

    match view {
        PlaylistsView::Table => {
            let table = Table::new(utils::playlist_table_rows(&collections));
            println!("{}", table);
        }
        PlaylistsView::Tracks => print_tracks(&collections),
        PlaylistsView::Json => match serde_json::to_string_pretty(&collections) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Cannot serialize playlists. Err: {}", e),
        },
    }

    if failed > 0 {
        warning!("{} playlist(s) could not be loaded completely.", failed);
    } else if view != PlaylistsView::Json {
        success!(
            "Fetched {} playlists with {} tracks.",
            collections.len(),
            collections.iter().map(|c| c.tracks.len()).sum::<usize>()
        );
    }
}

fn print_tracks(collections: &[Collection]) {
    for collection in collections {
        println!("--- Playlist: {}", collection.title);
        for track in &collection.tracks {
            println!("{}", utils::format_track_line(track));
        }
    }
}
