//! Testing utilities for typeroute.
//!
//! This module provides handlers and observers that make dispatch behavior
//! easy to assert on.
//!
//! # Features
//!
//! - [`Recorder`]: A handler that records every event it receives
//! - [`Counter`]: A handler that counts invocations for any event type
//! - [`FaultLog`]: A fault observer that collects faults

use crate::observer::{FaultObserver, HandlerFault};
use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use typeroute_core::{BoxError, Handler, Message, RegistrationHandle};

// ============================================================================
// Recorder
// ============================================================================

/// A handler that records all events it receives.
///
/// Clones share the same storage, so keep one clone for assertions and
/// register the other.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = Recorder::<OrderPlaced>::new();
/// dispatcher.register::<OrderPlaced, _>(recorder.clone());
///
/// dispatcher.dispatch(OrderPlaced { id: 1 })?;
///
/// assert_eq!(recorder.count(), 1);
/// ```
pub struct Recorder<E> {
    events: Arc<Mutex<Vec<E>>>,
}

impl<E: Clone> Recorder<E> {
    /// Create a new, empty recorder.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded events.
    pub fn events(&self) -> Vec<E> {
        self.events.lock().clone()
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        self.events.lock().len()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl<E: Clone> Default for Recorder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Recorder<E> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<E: Message + Clone> Handler<E> for Recorder<E> {
    fn call(&self, event: &E) -> Result<(), BoxError> {
        self.events.lock().push(event.clone());
        Ok(())
    }
}

// ============================================================================
// Counter
// ============================================================================

/// A handler that counts invocations.
///
/// Implements [`Handler`] for every message type, so the event type must be
/// named at registration: `dispatcher.register::<u32, _>(counter.clone())`.
#[derive(Clone, Default)]
pub struct Counter {
    count: Arc<AtomicUsize>,
}

impl Counter {
    /// Create a new counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn get(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<E: Message> Handler<E> for Counter {
    fn call(&self, _event: &E) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// FaultLog
// ============================================================================

/// A fault observer that keeps every fault it sees as `(handle, message)`.
#[derive(Clone, Default)]
pub struct FaultLog {
    faults: Arc<Mutex<Vec<(RegistrationHandle, String)>>>,
}

impl FaultLog {
    /// Create an empty fault log.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded faults, oldest first.
    pub fn faults(&self) -> Vec<(RegistrationHandle, String)> {
        self.faults.lock().clone()
    }

    /// Number of recorded faults.
    pub fn len(&self) -> usize {
        self.faults.lock().len()
    }

    /// Returns `true` if no fault was recorded.
    pub fn is_empty(&self) -> bool {
        self.faults.lock().is_empty()
    }
}

impl FaultObserver for FaultLog {
    fn on_fault(&self, fault: &HandlerFault) {
        self.faults
            .lock()
            .push((fault.handle, fault.error.to_string()));
    }
}
