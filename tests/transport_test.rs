use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use reqwest::Url;
use serde_json::json;
use tokio::sync::oneshot;
use vkaudio::management::{ErrorReporter, MemoryStore};
use vkaudio::vk::LibraryFetcher;
use vkaudio::vk::auth::ACCESS_TOKEN_KEY;
use vkaudio::vk::transport::{ReqwestTransport, Transport, TransportError, TransportResult};

#[derive(Default)]
struct CollectingReporter {
    messages: Mutex<Vec<String>>,
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

async fn albums(Query(params): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
    if params.get("access_token").map(String::as_str) != Some("secret") {
        return Json(json!({
            "error": {"error_code": 5, "error_msg": "User authorization failed: invalid access_token"}
        }));
    }
    Json(json!({"response": [2,
        {"album_id": 11, "title": "Rock"},
        {"album_id": 12, "title": "Broken"}]}))
}

async fn audio(Query(params): Query<HashMap<String, String>>) -> Response {
    match params.get("album_id").map(String::as_str) {
        None => {
            // Answer late so the default collection is not the first to arrive.
            tokio::time::sleep(Duration::from_millis(50)).await;
            Json(json!({"response": [1,
                {"aid": 1, "artist": "X", "title": "A", "url": "u1", "duration": 120}]}))
            .into_response()
        }
        Some("11") => Json(json!({"response": [
            {"aid": 2, "artist": "Y", "title": "B", "url": "u2", "duration": 90}]}))
        .into_response(),
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn spawn_server() -> String {
    let app = Router::new()
        .route("/method/audio.getAlbums", get(albums))
        .route("/method/audio.get", get(audio));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn fetcher(base: &str, token: &str, reporter: Arc<CollectingReporter>) -> LibraryFetcher {
    let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
    LibraryFetcher::new(
        Arc::new(transport),
        Arc::new(MemoryStore::with_value(ACCESS_TOKEN_KEY, token)),
        reporter,
    )
    .with_api_url(base)
}

async fn send(transport: &ReqwestTransport, url: &str) -> TransportResult {
    let (tx, rx) = oneshot::channel();
    transport.send(
        Url::parse(url).unwrap(),
        Box::new(move |result| {
            let _ = tx.send(result);
        }),
    );
    rx.await.unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_fetch_library_over_http() {
    let base = spawn_server().await;
    let reporter = Arc::new(CollectingReporter::default());

    let library = fetcher(&base, "secret", reporter.clone())
        .fetch_library()
        .await
        .expect("library is delivered");

    let ids: Vec<u64> = library.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![0, 11, 12]);

    assert_eq!(library[0].title, "library default");
    assert_eq!(library[0].tracks.len(), 1);
    assert_eq!(library[0].tracks[0].title, "A");
    assert_eq!(library[0].tracks[0].duration, 120);

    assert_eq!(library[1].title, "Rock");
    assert_eq!(library[1].tracks[0].artist, "Y");
    assert_eq!(library[1].tracks[0].url, "u2");

    assert_eq!(library[2].title, "Broken");
    assert!(!library[2].fetched);
    assert!(library[2].tracks.is_empty());

    let messages = reporter.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("'Broken'"));
    assert!(messages[0].contains("500"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_fetch_library_with_rejected_token() {
    let base = spawn_server().await;
    let reporter = Arc::new(CollectingReporter::default());

    let library = fetcher(&base, "expired", reporter.clone())
        .fetch_library()
        .await;

    assert!(library.is_none());
    let messages = reporter.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("invalid access_token"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_fetches_over_http() {
    let base = spawn_server().await;
    let reporter = Arc::new(CollectingReporter::default());
    let fetcher = fetcher(&base, "secret", reporter);

    let (first, second) = tokio::join!(fetcher.fetch_library(), fetcher.fetch_library());
    let (first, second) = (first.unwrap(), second.unwrap());

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
    assert_eq!(first[1].tracks.len(), 1);
}

#[tokio::test]
async fn test_transport_reports_status() {
    let base = spawn_server().await;
    let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();

    let result = send(&transport, &format!("{}/method/unknown", base)).await;
    assert_eq!(result, Err(TransportError::Status(404)));

    let result = send(&transport, &format!("{}/method/audio.get?album_id=99", base)).await;
    assert_eq!(result, Err(TransportError::Status(500)));
}

#[tokio::test]
async fn test_transport_returns_body() {
    let base = spawn_server().await;
    let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();

    let body = send(&transport, &format!("{}/method/audio.get?album_id=11", base))
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["response"][0]["title"], "B");
}

#[tokio::test]
async fn test_transport_connection_failure() {
    // Bind and drop a listener to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
    let result = send(&transport, &format!("http://{}/method/audio.get", addr)).await;
    assert!(matches!(result, Err(TransportError::Connection(_))));
}
