//! Execution modes for delivering an event to a resolved bucket snapshot.
//!
//! - [`Execution::Sequential`] runs handlers inline, in registration order,
//!   and propagates the first fault to the caller.
//! - [`Execution::Detached`] spawns one tokio task per handler and returns
//!   without waiting; faults are isolated in their task and reported to the
//!   dispatcher's [`FaultObserver`](crate::FaultObserver).

#[cfg(feature = "detached")]
pub(crate) mod detached;
pub(crate) mod sequential;

/// How a dispatcher runs matched handlers.
#[derive(Debug, Clone, Default)]
pub enum Execution {
    /// Run every handler on the dispatching thread before returning.
    #[default]
    Sequential,
    /// Spawn every handler as an independent task on the given runtime.
    #[cfg(feature = "detached")]
    Detached(tokio::runtime::Handle),
}

impl Execution {
    /// Returns `true` for [`Execution::Sequential`].
    pub fn is_sequential(&self) -> bool {
        matches!(self, Execution::Sequential)
    }
}

/// Summary of one dispatch call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchReport {
    /// Entries in the bucket when dispatch looked it up.
    pub matched: usize,
    /// Handlers invoked (sequential) or scheduled (detached).
    pub delivered: usize,
}

impl DispatchReport {
    /// The report for an event no handler was registered for.
    pub const fn unmatched() -> Self {
        Self {
            matched: 0,
            delivered: 0,
        }
    }
}
