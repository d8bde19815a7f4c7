use super::DispatchReport;
use crate::{
    observer::{FaultObserver, HandlerFault},
    registry::{ErasedEvent, Registry, Snapshot},
};
use futures::FutureExt;
use std::{panic::AssertUnwindSafe, sync::Arc};
use tokio::runtime::Handle;
use tracing::Instrument;
use typeroute_core::HandlerError;

/// Spawns one task per claimable entry and returns without joining.
///
/// `Once` entries are claimed and compacted here, on the dispatching thread,
/// so a later dispatch can never observe them even if their task has not
/// started yet. Each task catches its own panic and reports it, together with
/// returned errors, to `observer`.
pub(crate) fn deliver(
    registry: &Registry,
    snapshot: Snapshot,
    event: Arc<ErasedEvent>,
    observer: &Arc<dyn FaultObserver>,
    runtime: &Handle,
) -> DispatchReport {
    let mut report = DispatchReport {
        matched: snapshot.entries.len(),
        delivered: 0,
    };
    let mut fired = Vec::new();

    for entry in &snapshot.entries {
        if !entry.acquire() {
            continue;
        }
        if entry.policy().is_once() {
            fired.push(entry.seq());
        }
        report.delivered += 1;

        let handle = snapshot.handle(entry);
        let entry = Arc::clone(entry);
        let event = Arc::clone(&event);
        let observer = Arc::clone(observer);
        let span = tracing::trace_span!("handler", handle = %handle);

        runtime.spawn(
            async move {
                let outcome = AssertUnwindSafe(async { entry.call(&*event) })
                    .catch_unwind()
                    .await;
                let error = match outcome {
                    Ok(Ok(())) => return,
                    Ok(Err(err)) => HandlerError::Failed(err),
                    Err(payload) => HandlerError::from_panic(payload),
                };
                observer.on_fault(&HandlerFault { handle, error });
            }
            .instrument(span),
        );
    }

    if !fired.is_empty() {
        tracing::debug!(event = %snapshot.key, count = fired.len(), "once handlers scheduled");
        registry.compact(snapshot.key.type_id(), &fired);
    }

    report
}
