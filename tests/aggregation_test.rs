use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

use vkaudio::types::{Collection, Track};
use vkaudio::vk::aggregation::AggregationState;

fn create_test_track(title: &str) -> Track {
    Track {
        title: title.to_string(),
        artist: "Artist".to_string(),
        url: format!("https://cs.vk.me/{}.mp3", title),
        duration: 60,
    }
}

fn create_slots(count: u64) -> Vec<Collection> {
    let mut slots = vec![Collection::library_default()];
    slots.extend((1..count).map(|i| Collection::new(i * 10, format!("Playlist {}", i))));
    slots
}

type Delivered = Arc<Mutex<Vec<Vec<Collection>>>>;

fn collecting_state(slots: Vec<Collection>) -> (AggregationState, Delivered) {
    let delivered: Delivered = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&delivered);
    let state = AggregationState::new(slots, move |collections| {
        sink.lock().unwrap().push(collections);
    });
    (state, delivered)
}

#[test]
fn test_views_follow_slot_order() {
    let (state, _) = collecting_state(create_slots(4));
    assert_eq!(state.total(), 4);

    let views = state.into_views();
    let slots: Vec<usize> = views.iter().map(|v| v.slot()).collect();
    assert_eq!(slots, vec![0, 1, 2, 3]);
}

#[test]
fn test_only_last_completion_finalizes() {
    let (state, delivered) = collecting_state(create_slots(3));
    let mut views = state.into_views();

    let last = views.remove(0);
    assert!(!views.remove(1).fill(vec![create_test_track("c")]));
    assert!(delivered.lock().unwrap().is_empty());
    assert!(!views.remove(0).fill(vec![create_test_track("b")]));
    assert!(delivered.lock().unwrap().is_empty());

    assert!(last.fill(vec![create_test_track("a")]));

    let delivered = delivered.lock().unwrap();
    assert_eq!(delivered.len(), 1);
    let titles: Vec<&str> = delivered[0]
        .iter()
        .map(|c| c.tracks[0].title.as_str())
        .collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
}

#[test]
fn test_fill_appends_in_order() {
    let (state, delivered) = collecting_state(create_slots(1));
    let view = state.into_views().pop().unwrap();

    view.fill(vec![
        create_test_track("first"),
        create_test_track("second"),
        create_test_track("third"),
    ]);

    let delivered = delivered.lock().unwrap();
    let collection = &delivered[0][0];
    assert!(collection.fetched);
    let titles: Vec<&str> = collection.tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[test]
fn test_failed_view_leaves_empty_slot() {
    let (state, delivered) = collecting_state(create_slots(2));
    let mut views = state.into_views();

    assert!(!views.remove(1).fail());
    assert!(views.remove(0).fill(vec![create_test_track("a")]));

    let delivered = delivered.lock().unwrap();
    assert_eq!(delivered.len(), 1);
    assert!(delivered[0][0].fetched);
    assert_eq!(delivered[0][1].id, 10);
    assert_eq!(delivered[0][1].title, "Playlist 1");
    assert!(!delivered[0][1].fetched);
    assert!(delivered[0][1].tracks.is_empty());
}

#[test]
fn test_no_slots_calls_back_immediately() {
    let (state, delivered) = collecting_state(Vec::new());
    assert!(state.into_views().is_empty());

    let delivered = delivered.lock().unwrap();
    assert_eq!(delivered.len(), 1);
    assert!(delivered[0].is_empty());
}

#[test]
fn test_dropping_views_releases_callback() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let marker = Arc::new(());
    let held = Arc::clone(&marker);

    let state = AggregationState::new(create_slots(2), move |_| {
        let _held = &held;
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let mut views = state.into_views();
    views.remove(0).fill(Vec::new());
    drop(views);

    // The callback (and everything it captured) is gone without being called.
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(Arc::strong_count(&marker), 1);
}

#[test]
fn test_concurrent_completions_finalize_once() {
    for _ in 0..50 {
        let calls = Arc::new(AtomicUsize::new(0));
        let finalizers = Arc::new(AtomicUsize::new(0));
        let delivered: Delivered = Arc::new(Mutex::new(Vec::new()));

        let counter = Arc::clone(&calls);
        let sink = Arc::clone(&delivered);
        let state = AggregationState::new(create_slots(32), move |collections| {
            counter.fetch_add(1, Ordering::SeqCst);
            sink.lock().unwrap().push(collections);
        });

        let handles: Vec<_> = state
            .into_views()
            .into_iter()
            .map(|view| {
                let finalizers = Arc::clone(&finalizers);
                thread::spawn(move || {
                    let slot = view.slot();
                    let finalized = if slot % 7 == 3 {
                        view.fail()
                    } else {
                        view.fill(vec![create_test_track(&format!("track-{}", slot))])
                    };
                    if finalized {
                        finalizers.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(finalizers.load(Ordering::SeqCst), 1);

        let delivered = delivered.lock().unwrap();
        let collections = &delivered[0];
        assert_eq!(collections.len(), 32);
        for (slot, collection) in collections.iter().enumerate() {
            if slot % 7 == 3 {
                assert!(!collection.fetched);
                assert!(collection.tracks.is_empty());
            } else {
                assert_eq!(collection.tracks.len(), 1);
                assert_eq!(collection.tracks[0].title, format!("track-{}", slot));
            }
        }
    }
}
