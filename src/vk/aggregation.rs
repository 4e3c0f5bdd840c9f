//! Fan-in of the per-collection track requests of one library run.
//!
//! A run owns one [`AggregationState`]. Turning it into views hands out exactly
//! one [`View`] per slot; every view shares the completion counter and the
//! pending result but is bound to a single slot. Completing a view consumes
//! it. The view whose completion brings the counter to the total moves the
//! pending result out of the shared core and hands it to the ready callback,
//! so the result and the callback can be taken exactly once.

use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

use crate::types::{Collection, Track};

/// Receives the finished library of one run.
pub type OnReady = Box<dyn FnOnce(Vec<Collection>) + Send + 'static>;

struct Pending {
    collections: Vec<Collection>,
    on_ready: OnReady,
}

struct SharedCore {
    handled: AtomicUsize,
    total: usize,
    pending: Mutex<Option<Pending>>,
}

impl SharedCore {
    fn pending(&self) -> MutexGuard<'_, Option<Pending>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct AggregationState {
    collections: Vec<Collection>,
    on_ready: OnReady,
}

impl AggregationState {
    /// `collections` fixes the slots of the result, in delivery order.
    pub fn new<F>(collections: Vec<Collection>, on_ready: F) -> Self
    where
        F: FnOnce(Vec<Collection>) + Send + 'static,
    {
        Self {
            collections,
            on_ready: Box::new(on_ready),
        }
    }

    pub fn total(&self) -> usize {
        self.collections.len()
    }

    /// Hands out the per-slot views of this run.
    ///
    /// Moves the collections and the ready callback into a core shared by
    /// all views. Each view must be completed exactly once with
    /// [`View::fill`] or [`View::fail`]; the completion that brings the count
    /// to the total delivers the library.
    ///
    /// # Returns
    ///
    /// One view per slot, in slot order. With no slots there is nothing to
    /// wait for: the callback runs immediately with an empty library and the
    /// returned vector is empty.
    ///
    /// # Dropped views
    ///
    /// A view dropped without completing never counts as handled. Once every
    /// view is gone the callback is dropped without being called.
    ///
    /// # Example
    ///
    /// ```
    /// let state = AggregationState::new(slots, |library| println!("{} playlists", library.len()));
    /// for view in state.into_views() {
    ///     view.fill(Vec::new());
    /// }
    /// ```
    pub fn into_views(self) -> Vec<View> {
        let total = self.collections.len();
        if total == 0 {
            (self.on_ready)(Vec::new());
            return Vec::new();
        }

        let core = Arc::new(SharedCore {
            handled: AtomicUsize::new(0),
            total,
            pending: Mutex::new(Some(Pending {
                collections: self.collections,
                on_ready: self.on_ready,
            })),
        });

        (0..total)
            .map(|slot| View {
                core: Arc::clone(&core),
                slot,
            })
            .collect()
    }
}

/// Per-request handle bound to one slot of a run.
pub struct View {
    core: Arc<SharedCore>,
    slot: usize,
}

impl View {
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Appends `tracks` to the bound slot and marks this view handled.
    ///
    /// Returns true when this call finalized the run.
    pub fn fill(self, tracks: Vec<Track>) -> bool {
        if let Some(pending) = self.core.pending().as_mut() {
            if let Some(collection) = pending.collections.get_mut(self.slot) {
                collection.tracks.extend(tracks);
                collection.fetched = true;
            }
        }
        self.mark_done()
    }

    /// Marks this view handled without touching its slot.
    ///
    /// Returns true when this call finalized the run.
    pub fn fail(self) -> bool {
        self.mark_done()
    }

    fn mark_done(self) -> bool {
        let total = self.core.total;
        let done = self.core.handled.fetch_add(1, Ordering::AcqRel) + 1;
        if done != total {
            return false;
        }

        // Only one completion can move the counter from total back to zero.
        if self
            .core
            .handled
            .compare_exchange(total, 0, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        let pending = self.core.pending().take();
        match pending {
            Some(Pending {
                collections,
                on_ready,
            }) => {
                on_ready(collections);
                true
            }
            None => false,
        }
    }
}
