// ── Memoized fetch slots ──
//
// One `DashMap` entry per key, each holding an explicit state:
//
//   (vacant) ──get──▶ Pending ──settle──▶ Ready | Failed
//       ▲                │                      │
//       └──invalidate────┴──────────────────────┘
//
// A Pending slot owns a `Shared` handle to a spawned fetch so every caller
// joins the same request. Each fetch is tagged with an epoch; a result only
// settles the slot if the slot still holds that epoch, so a fetch that
// outlives an invalidation can never overwrite its replacement.

use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, trace};

use crate::error::CoreError;

pub(crate) type Fetched<T> = Result<Arc<T>, CoreError>;
type SharedFetch<T> = Shared<BoxFuture<'static, Fetched<T>>>;

/// Observable state of one cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// A fetch is in flight, or finished but not yet joined by a reader.
    Pending,
    /// The last fetch succeeded.
    Ready,
    /// The last fetch failed; the error is memoized until invalidated.
    Failed,
}

enum Slot<T> {
    Pending { epoch: u64, fetch: SharedFetch<T> },
    Ready(Arc<T>),
    Failed(CoreError),
}

/// Whether a settled slot satisfies a `get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reuse {
    /// Ready and Failed are served as-is until invalidated.
    Settled,
    /// Only an in-flight fetch is joined; a settled slot is refetched.
    PendingOnly,
}

enum Acquired<T> {
    Settled(Fetched<T>),
    Pending { epoch: u64, fetch: SharedFetch<T> },
}

pub(crate) struct Slots<K, T> {
    label: &'static str,
    slots: DashMap<K, Slot<T>>,
    next_epoch: AtomicU64,
}

impl<K, T> Slots<K, T>
where
    K: Copy + Eq + Hash + fmt::Debug,
    T: Send + Sync + 'static,
{
    pub(crate) fn new(label: &'static str) -> Self {
        Self {
            label,
            slots: DashMap::new(),
            next_epoch: AtomicU64::new(0),
        }
    }

    /// Return the memoized value for `key`, joining an in-flight fetch or
    /// starting exactly one new fetch if the slot does not satisfy `reuse`.
    pub(crate) async fn get<F, Fut>(&self, key: K, reuse: Reuse, fetch: F) -> Fetched<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
    {
        match self.acquire(key, reuse, fetch) {
            Acquired::Settled(result) => result,
            Acquired::Pending { epoch, fetch } => {
                let result = fetch.await;
                self.settle(key, epoch, &result);
                result
            }
        }
    }

    /// Start a fetch for `key` without waiting for it, unless one is
    /// already in flight or `reuse` is satisfied.
    pub(crate) fn prefetch<F, Fut>(&self, key: K, reuse: Reuse, fetch: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
    {
        let _ = self.acquire(key, reuse, fetch);
    }

    /// Drop the memoized entry. Returns `true` if there was one.
    ///
    /// An in-flight fetch keeps running; its result is discarded.
    pub(crate) fn invalidate(&self, key: &K) -> bool {
        let removed = self.slots.remove(key).is_some();
        if removed {
            debug!(kind = self.label, ?key, "invalidated cache entry");
        }
        removed
    }

    pub(crate) fn state(&self, key: &K) -> Option<SlotState> {
        self.slots.get(key).map(|slot| match &*slot {
            Slot::Pending { fetch, .. } => match fetch.peek() {
                None => SlotState::Pending,
                Some(Ok(_)) => SlotState::Ready,
                Some(Err(_)) => SlotState::Failed,
            },
            Slot::Ready(_) => SlotState::Ready,
            Slot::Failed(_) => SlotState::Failed,
        })
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn acquire<F, Fut>(&self, key: K, reuse: Reuse, fetch: F) -> Acquired<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
    {
        // The entry guard holds the shard lock until the end of this match,
        // which is what makes check-then-start atomic per key.
        match self.slots.entry(key) {
            Entry::Occupied(mut occupied) => {
                let joined = match occupied.get() {
                    Slot::Pending { epoch, fetch } => Some((*epoch, fetch.clone())),
                    Slot::Ready(value) if reuse == Reuse::Settled => {
                        trace!(kind = self.label, ?key, "cache hit");
                        return Acquired::Settled(Ok(Arc::clone(value)));
                    }
                    Slot::Failed(err) if reuse == Reuse::Settled => {
                        return Acquired::Settled(Err(err.clone()));
                    }
                    Slot::Ready(_) | Slot::Failed(_) => None,
                };
                let (epoch, fetch) = match joined {
                    Some(joined) => {
                        trace!(kind = self.label, ?key, "joining in-flight fetch");
                        joined
                    }
                    None => {
                        let started = self.start(key, fetch);
                        occupied.insert(Slot::Pending {
                            epoch: started.0,
                            fetch: started.1.clone(),
                        });
                        started
                    }
                };
                Acquired::Pending { epoch, fetch }
            }
            Entry::Vacant(vacant) => {
                let (epoch, fetch) = self.start(key, fetch);
                vacant.insert(Slot::Pending {
                    epoch,
                    fetch: fetch.clone(),
                });
                Acquired::Pending { epoch, fetch }
            }
        }
    }

    /// Spawn the fetch so it makes progress even if every caller walks away.
    fn start<F, Fut>(&self, key: K, fetch: F) -> (u64, SharedFetch<T>)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
    {
        let epoch = self.next_epoch.fetch_add(1, Ordering::Relaxed);
        debug!(kind = self.label, ?key, epoch, "starting fetch");

        let handle = tokio::spawn(fetch());
        let shared = async move {
            match handle.await {
                Ok(result) => result.map(Arc::new),
                Err(e) => Err(CoreError::Internal(format!("fetch task failed: {e}"))),
            }
        }
        .boxed()
        .shared();

        (epoch, shared)
    }

    fn settle(&self, key: K, epoch: u64, result: &Fetched<T>) {
        let Some(mut slot) = self.slots.get_mut(&key) else {
            return;
        };
        let current = matches!(&*slot, Slot::Pending { epoch: e, .. } if *e == epoch);
        if !current {
            trace!(kind = self.label, ?key, epoch, "discarding superseded fetch result");
            return;
        }
        *slot = match result {
            Ok(value) => Slot::Ready(Arc::clone(value)),
            Err(err) => Slot::Failed(err.clone()),
        };
    }
}
