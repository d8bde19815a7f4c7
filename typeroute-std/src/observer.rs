//! Fault observers - Observability for handler failures.
//!
//! A detached handler has no caller to return an error to, so every fault is
//! handed to the dispatcher's [`FaultObserver`]. Sequential dispatch reports
//! to the observer as well before returning the error.

use typeroute_core::{DispatchError, HandlerError, RegistrationHandle};

/// A handler fault together with the registration that raised it.
#[derive(Debug)]
pub struct HandlerFault {
    /// The registration whose handler faulted.
    pub handle: RegistrationHandle,
    /// What went wrong.
    pub error: HandlerError,
}

impl From<HandlerFault> for DispatchError {
    fn from(fault: HandlerFault) -> Self {
        DispatchError::Handler {
            handle: fault.handle,
            source: fault.error,
        }
    }
}

/// Receives handler faults.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `FaultObserver`",
    label = "missing `FaultObserver` implementation",
    note = "Implement `on_fault` or pass a closure `Fn(&HandlerFault)`."
)]
pub trait FaultObserver: Send + Sync + 'static {
    /// Called once for every faulting handler invocation.
    fn on_fault(&self, fault: &HandlerFault);
}

impl<F> FaultObserver for F
where
    F: Fn(&HandlerFault) + Send + Sync + 'static,
{
    fn on_fault(&self, fault: &HandlerFault) {
        (self)(fault)
    }
}

/// The default observer: logs every fault through `tracing` at error level.
///
/// # Example
///
/// ```rust,ignore
/// let dispatcher = Dispatcher::builder()
///     .observer(LogFaults::named("billing"))
///     .build();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LogFaults {
    name: &'static str,
}

impl LogFaults {
    /// Create a new `LogFaults` with a default name.
    pub fn new() -> Self {
        Self { name: "dispatcher" }
    }

    /// Create a new `LogFaults` with a custom name.
    ///
    /// The name is recorded on every log event to identify the dispatcher.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for LogFaults {
    fn default() -> Self {
        Self::new()
    }
}

impl FaultObserver for LogFaults {
    fn on_fault(&self, fault: &HandlerFault) {
        tracing::error!(
            dispatcher = %self.name,
            handle = %fault.handle,
            panicked = fault.error.is_panic(),
            error = %fault.error,
            "event handler faulted"
        );
    }
}
