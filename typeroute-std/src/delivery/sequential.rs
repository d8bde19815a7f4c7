use super::DispatchReport;
use crate::{
    observer::{FaultObserver, HandlerFault},
    registry::{ErasedEvent, Registry, Snapshot},
};
use std::panic::{self, AssertUnwindSafe};
use typeroute_core::{DispatchError, HandlerError};

/// Invokes the snapshot's handlers one by one on the calling thread.
///
/// Stops at the first handler that returns an error or panics. Panics are
/// caught and reported as [`HandlerError::Panicked`]. Fired `Once` entries
/// are compacted before returning, fault or not; entries after the faulting
/// one were never claimed and stay registered.
pub(crate) fn deliver(
    registry: &Registry,
    snapshot: Snapshot,
    event: &ErasedEvent,
    observer: &dyn FaultObserver,
) -> Result<DispatchReport, DispatchError> {
    let mut report = DispatchReport {
        matched: snapshot.entries.len(),
        delivered: 0,
    };
    let mut fired = Vec::new();
    let mut fault = None;

    for entry in &snapshot.entries {
        if !entry.acquire() {
            continue;
        }
        if entry.policy().is_once() {
            fired.push(entry.seq());
        }
        report.delivered += 1;

        let error = match panic::catch_unwind(AssertUnwindSafe(|| entry.call(event))) {
            Ok(Ok(())) => continue,
            Ok(Err(err)) => HandlerError::Failed(err),
            Err(payload) => HandlerError::from_panic(payload),
        };
        fault = Some(HandlerFault {
            handle: snapshot.handle(entry),
            error,
        });
        break;
    }

    if !fired.is_empty() {
        tracing::debug!(event = %snapshot.key, count = fired.len(), "once handlers fired");
        registry.compact(snapshot.key.type_id(), &fired);
    }

    match fault {
        None => Ok(report),
        Some(fault) => {
            observer.on_fault(&fault);
            Err(fault.into())
        }
    }
}
