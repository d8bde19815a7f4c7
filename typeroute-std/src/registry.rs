//! Handler registry: buckets of type-erased handlers keyed by event type.
//!
//! The registry is the only shared mutable state of a dispatcher. Every
//! mutation and every bucket lookup goes through one `parking_lot::RwLock`,
//! but the lock is never held while a handler runs: dispatch takes a snapshot
//! of the bucket, releases the lock, and claims entries one at a time through
//! their atomic lifecycle state. Fired `Once` entries are then compacted out
//! under a second, short write lock.

use parking_lot::RwLock;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    marker::PhantomData,
    sync::{
        Arc,
        atomic::{AtomicU8, AtomicU64, Ordering},
    },
};
use typeroute_core::{
    BoxError, EventTypeKey, ExecutionPolicy, Handler, Message, RegistrationHandle,
};

/// A dispatched event with its concrete type erased.
pub(crate) type ErasedEvent = dyn Any + Send + Sync;

/// Object-safe handler invoked with an erased event.
trait ErasedHandler: Send + Sync + 'static {
    fn call_erased(&self, event: &ErasedEvent) -> Result<(), BoxError>;
}

struct Typed<E, H> {
    handler: H,
    _event: PhantomData<fn(&E)>,
}

impl<E: Message, H: Handler<E>> ErasedHandler for Typed<E, H> {
    fn call_erased(&self, event: &ErasedEvent) -> Result<(), BoxError> {
        match event.downcast_ref::<E>() {
            Some(event) => self.handler.call(event),
            // Buckets are keyed by TypeId, so this only fires on a foreign handle.
            None => {
                tracing::warn!(
                    expected = std::any::type_name::<E>(),
                    "event routed to a handler of a different type, skipping"
                );
                Ok(())
            }
        }
    }
}

const LIVE: u8 = 0;
const FIRED: u8 = 1;
const REMOVED: u8 = 2;

/// One registered handler.
pub(crate) struct Entry {
    seq: u64,
    policy: ExecutionPolicy,
    handler: Arc<dyn ErasedHandler>,
    state: AtomicU8,
}

impl Entry {
    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }

    pub(crate) fn policy(&self) -> ExecutionPolicy {
        self.policy
    }

    /// Decides whether the caller may invoke this entry now.
    ///
    /// `Once` entries are claimed with a compare-exchange, so exactly one
    /// caller wins even under concurrent dispatches of the same type.
    pub(crate) fn acquire(&self) -> bool {
        match self.policy {
            ExecutionPolicy::Always => self.state.load(Ordering::Acquire) == LIVE,
            ExecutionPolicy::Once => self
                .state
                .compare_exchange(LIVE, FIRED, Ordering::AcqRel, Ordering::Acquire)
                .is_ok(),
        }
    }

    pub(crate) fn is_live(&self) -> bool {
        self.state.load(Ordering::Acquire) == LIVE
    }

    fn retire(&self) {
        self.state.store(REMOVED, Ordering::Release);
    }

    pub(crate) fn call(&self, event: &ErasedEvent) -> Result<(), BoxError> {
        self.handler.call_erased(event)
    }
}

struct Bucket {
    key: EventTypeKey,
    entries: Vec<Arc<Entry>>,
}

/// The entries of one bucket at the moment dispatch looked them up.
pub(crate) struct Snapshot {
    pub(crate) key: EventTypeKey,
    pub(crate) entries: Vec<Arc<Entry>>,
}

impl Snapshot {
    pub(crate) fn handle(&self, entry: &Entry) -> RegistrationHandle {
        RegistrationHandle::new(self.key, entry.seq)
    }
}

/// Thread-safe mapping from event type to an insertion-ordered bucket of
/// handler entries.
pub(crate) struct Registry {
    buckets: RwLock<HashMap<TypeId, Bucket>>,
    next_seq: AtomicU64,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            buckets: RwLock::new(HashMap::new()),
            next_seq: AtomicU64::new(1),
        }
    }

    /// Appends a handler to the bucket of `E` and mints its handle.
    pub(crate) fn insert<E, H>(&self, policy: ExecutionPolicy, handler: H) -> RegistrationHandle
    where
        E: Message,
        H: Handler<E>,
    {
        let key = EventTypeKey::of::<E>();
        let handler: Arc<dyn ErasedHandler> = Arc::new(Typed {
            handler,
            _event: PhantomData::<fn(&E)>,
        });

        let mut buckets = self.buckets.write();
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        buckets
            .entry(key.type_id())
            .or_insert_with(|| Bucket {
                key,
                entries: Vec::new(),
            })
            .entries
            .push(Arc::new(Entry {
                seq,
                policy,
                handler,
                state: AtomicU8::new(LIVE),
            }));

        RegistrationHandle::new(key, seq)
    }

    /// Removes the entry addressed by `handle`. Returns `false` if it was
    /// already gone.
    pub(crate) fn remove(&self, handle: &RegistrationHandle) -> bool {
        let id = handle.key().type_id();
        let mut buckets = self.buckets.write();
        let Some(bucket) = buckets.get_mut(&id) else {
            return false;
        };
        let Some(pos) = bucket.entries.iter().position(|e| e.seq == handle.seq()) else {
            return false;
        };

        let entry = bucket.entries.remove(pos);
        entry.retire();
        if bucket.entries.is_empty() {
            buckets.remove(&id);
        }
        true
    }

    /// Clones the bucket for `id`, if any. The lock is released on return.
    pub(crate) fn snapshot(&self, id: TypeId) -> Option<Snapshot> {
        let buckets = self.buckets.read();
        buckets.get(&id).map(|bucket| Snapshot {
            key: bucket.key,
            entries: bucket.entries.clone(),
        })
    }

    /// Drops the fired `Once` entries listed in `fired` from the bucket for `id`.
    pub(crate) fn compact(&self, id: TypeId, fired: &[u64]) {
        if fired.is_empty() {
            return;
        }
        let mut buckets = self.buckets.write();
        let Some(bucket) = buckets.get_mut(&id) else {
            return;
        };
        bucket.entries.retain(|entry| {
            let keep = !fired.contains(&entry.seq);
            if !keep {
                entry.retire();
            }
            keep
        });
        if bucket.entries.is_empty() {
            buckets.remove(&id);
        }
    }

    pub(crate) fn contains(&self, handle: &RegistrationHandle) -> bool {
        self.buckets
            .read()
            .get(&handle.key().type_id())
            .is_some_and(|bucket| {
                bucket
                    .entries
                    .iter()
                    .any(|e| e.seq == handle.seq() && e.is_live())
            })
    }

    pub(crate) fn len(&self) -> usize {
        self.buckets
            .read()
            .values()
            .map(|bucket| bucket.entries.iter().filter(|e| e.is_live()).count())
            .sum()
    }

    pub(crate) fn count(&self, id: TypeId) -> usize {
        self.buckets
            .read()
            .get(&id)
            .map_or(0, |bucket| bucket.entries.iter().filter(|e| e.is_live()).count())
    }

    pub(crate) fn clear(&self) {
        let mut buckets = self.buckets.write();
        for entry in buckets.values().flat_map(|bucket| bucket.entries.iter()) {
            entry.retire();
        }
        buckets.clear();
    }
}
