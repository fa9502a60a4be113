//! # Mock Store & Testing Guide
//!
//! [`MockStore`] implements [`ObjectFetcher`] and [`ObjectWriter`] entirely
//! in memory. It lets you test a [`MemberResource`](crate::MemberResource)
//! without any remote API, inject failures that are hard to provoke against a
//! real server, and observe how the guarded sequences were interleaved.
//!
//! ## When to use the mock vs a mock HTTP server
//!
//! | Feature | MockStore | HTTP mock server |
//! |---------|-----------|------------------|
//! | **Speed** | Instant (in-memory) | Fast (but binds a socket) |
//! | **Covers** | Adapter logic, guard behaviour | Request shape, status mapping |
//! | **Error Injection** | `fail_next_fetch` / `fail_next_write` | Per-route responses |
//! | **Interleaving** | Recorded in `history()` | Not observable |
//!
//! ## Example
//!
//! ```rust
//! use member_framework::mock::MockStore;
//! use member_framework::{KeyedMutex, MemberConfig, MemberEntity, MemberResource};
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug)]
//! struct App { uris: Vec<String> }
//!
//! struct AppUri;
//! impl MemberEntity for AppUri {
//!     type Parent = App;
//!     const TYPE_NAME: &'static str = "app_uri";
//!     const PARENT_KIND: &'static str = "application";
//!     fn members(p: &App) -> &[String] { &p.uris }
//!     fn members_mut(p: &mut App) -> &mut Vec<String> { &mut p.uris }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(MockStore::new().with_object("app1", App { uris: vec![] }));
//!     let resource = MemberResource::<AppUri, _>::new(store.clone(), Arc::new(KeyedMutex::new()));
//!
//!     resource.create(MemberConfig::new("app1", "https://a/cb")).await.unwrap();
//!     assert_eq!(store.object("app1").unwrap().uris, vec!["https://a/cb"]);
//!     assert_eq!(store.write_count(), 1);
//! }
//! ```
//!
//! ## Observing critical sections
//!
//! Every fetch and write counts as in flight for its key from the moment it
//! starts until it returns. [`MockStore::peak_in_flight`] reports the largest
//! number of calls that were in flight at once for a key; with the guard in
//! place it must stay at 1. Combine it with [`MockStore::with_delay`] so that
//! racing sequences would actually overlap without the guard.
//!
//! Overlapping calls are not the only way to lose an update: two sequences can
//! also alternate their calls. [`MockStore::history`] catches that, since under
//! the guard every write directly follows a fetch of the same key.

use crate::error::StoreError;
use crate::store::{ObjectFetcher, ObjectWriter};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Operation recorded by the mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Fetch,
    Write,
}

#[derive(Debug, Default)]
struct InFlight {
    open: HashMap<String, usize>,
    peak: HashMap<String, usize>,
    open_total: usize,
    peak_total: usize,
}

impl InFlight {
    fn open(&mut self, key: &str) {
        let open = self.open.entry(key.to_string()).or_default();
        *open += 1;
        let peak = self.peak.entry(key.to_string()).or_default();
        *peak = (*peak).max(*open);
        self.open_total += 1;
        self.peak_total = self.peak_total.max(self.open_total);
    }

    fn close(&mut self, key: &str) {
        if let Some(open) = self.open.get_mut(key) {
            if *open > 0 {
                *open -= 1;
                self.open_total = self.open_total.saturating_sub(1);
            }
        }
    }
}

/// In-memory, instrumented object store.
#[derive(Debug)]
pub struct MockStore<P> {
    objects: Mutex<HashMap<String, P>>,
    delay: Option<Duration>,
    fetch_failures: Mutex<VecDeque<StoreError>>,
    write_failures: Mutex<VecDeque<StoreError>>,
    history: Mutex<Vec<(String, Op)>>,
    in_flight: Mutex<InFlight>,
    fetches: AtomicUsize,
    writes: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<P: Clone + Send + Sync> Default for MockStore<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Clone + Send + Sync> MockStore<P> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            delay: None,
            fetch_failures: Mutex::new(VecDeque::new()),
            write_failures: Mutex::new(VecDeque::new()),
            history: Mutex::new(Vec::new()),
            in_flight: Mutex::new(InFlight::default()),
            fetches: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    /// Seeds an object.
    pub fn with_object(self, id: impl Into<String>, object: P) -> Self {
        lock(&self.objects).insert(id.into(), object);
        self
    }

    /// Sleeps for `delay` inside every fetch and write.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Makes the next fetch fail with `error`.
    pub fn fail_next_fetch(&self, error: StoreError) {
        lock(&self.fetch_failures).push_back(error);
    }

    /// Makes the next write fail with `error`.
    pub fn fail_next_write(&self, error: StoreError) {
        lock(&self.write_failures).push_back(error);
    }

    /// Current state of an object.
    pub fn object(&self, id: &str) -> Option<P> {
        lock(&self.objects).get(id).cloned()
    }

    /// Deletes an object, as if removed by another adapter.
    pub fn remove_object(&self, id: &str) -> Option<P> {
        lock(&self.objects).remove(id)
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Every call in the order it started.
    pub fn history(&self) -> Vec<(String, Op)> {
        lock(&self.history).clone()
    }

    /// True when every write in the history directly follows a fetch of the
    /// same key.
    pub fn writes_follow_fetches(&self) -> bool {
        let history = lock(&self.history);
        history.iter().enumerate().all(|(i, (key, op))| match op {
            Op::Fetch => true,
            Op::Write => i > 0 && matches!(&history[i - 1], (prev, Op::Fetch) if prev == key),
        })
    }

    /// Largest number of calls seen in flight at once for `key`.
    pub fn peak_in_flight(&self, key: &str) -> usize {
        lock(&self.in_flight).peak.get(key).copied().unwrap_or(0)
    }

    /// Largest number of calls seen in flight at once across all keys.
    pub fn peak_in_flight_total(&self) -> usize {
        lock(&self.in_flight).peak_total
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl<P: Clone + Send + Sync> ObjectFetcher<P> for MockStore<P> {
    async fn fetch(&self, id: &str) -> Result<P, StoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        lock(&self.history).push((id.to_string(), Op::Fetch));
        lock(&self.in_flight).open(id);

        self.pause().await;

        let injected = lock(&self.fetch_failures).pop_front();
        let result = match injected {
            Some(error) => Err(error),
            None => lock(&self.objects)
                .get(id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(id.to_string())),
        };
        lock(&self.in_flight).close(id);
        result
    }
}

#[async_trait]
impl<P: Clone + Send + Sync> ObjectWriter<P> for MockStore<P> {
    async fn write(&self, id: &str, parent: &P) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        lock(&self.history).push((id.to_string(), Op::Write));
        lock(&self.in_flight).open(id);

        self.pause().await;

        let injected = lock(&self.write_failures).pop_front();
        let result = match injected {
            Some(error) => Err(error),
            None => {
                lock(&self.objects).insert(id.to_string(), parent.clone());
                Ok(())
            }
        };
        lock(&self.in_flight).close(id);
        result
    }
}
