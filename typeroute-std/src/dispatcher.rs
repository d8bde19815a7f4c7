//! The type-routed dispatcher.
//!
//! A [`Dispatcher`] owns one registry. Handlers are registered for a message
//! type and receive every dispatched value whose concrete type is exactly that
//! type. Cloning a dispatcher shares its registry; separately built
//! dispatchers never share state.

use crate::{
    delivery::{self, DispatchReport, Execution},
    observer::{FaultObserver, LogFaults},
    registry::{ErasedEvent, Registry},
};
use std::{
    any::{Any, TypeId},
    fmt,
    sync::Arc,
};
use typeroute_core::{
    DispatchError, EventTypeKey, ExecutionPolicy, Handler, Message,
    RegistrationHandle,
};

struct Shared {
    name: &'static str,
    registry: Registry,
    execution: Execution,
    observer: Arc<dyn FaultObserver>,
}

/// An in-process event dispatcher routing by concrete event type.
///
/// # Example
///
/// ```rust,ignore
/// let dispatcher = Dispatcher::new();
/// let handle = dispatcher.register(|n: &u32| println!("got {n}"));
/// dispatcher.register_once(|s: &String| println!("first string: {s}"));
///
/// dispatcher.dispatch(10_u32)?;          // routed to the u32 handler
/// dispatcher.dispatch("x".to_string())?; // fires the once handler
/// dispatcher.dispatch("y".to_string())?; // nobody listens any more
///
/// dispatcher.unregister(&handle);
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    shared: Arc<Shared>,
}

impl Dispatcher {
    /// Creates a sequential dispatcher with an empty registry.
    pub fn new() -> Self {
        DispatcherBuilder::new().build()
    }

    /// Starts configuring a dispatcher.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Creates a detached dispatcher spawning handlers on `runtime`.
    #[cfg(feature = "detached")]
    pub fn detached(runtime: tokio::runtime::Handle) -> Self {
        DispatcherBuilder::new().detached_on(runtime).build()
    }

    /// The name recorded on this dispatcher's log events.
    pub fn name(&self) -> &'static str {
        self.shared.name
    }

    /// The configured execution mode.
    pub fn execution(&self) -> &Execution {
        &self.shared.execution
    }

    /// Registers a handler that runs on every matching dispatch.
    pub fn register<E, H>(&self, handler: H) -> RegistrationHandle
    where
        E: Message,
        H: Handler<E>,
    {
        self.register_with(ExecutionPolicy::Always, handler)
    }

    /// Registers a handler that runs on the first matching dispatch only.
    pub fn register_once<E, H>(&self, handler: H) -> RegistrationHandle
    where
        E: Message,
        H: Handler<E>,
    {
        self.register_with(ExecutionPolicy::Once, handler)
    }

    /// Registers a handler with an explicit policy.
    pub fn register_with<E, H>(&self, policy: ExecutionPolicy, handler: H) -> RegistrationHandle
    where
        E: Message,
        H: Handler<E>,
    {
        let handle = self.shared.registry.insert::<E, H>(policy, handler);
        tracing::debug!(dispatcher = %self.shared.name, %handle, %policy, "handler registered");
        handle
    }

    /// Removes a registration. Unknown or already removed handles are ignored.
    pub fn unregister(&self, handle: &RegistrationHandle) {
        if self.shared.registry.remove(handle) {
            tracing::debug!(dispatcher = %self.shared.name, %handle, "handler unregistered");
        } else {
            tracing::trace!(dispatcher = %self.shared.name, %handle, "unregister ignored, handle not present");
        }
    }

    /// Dispatches `event` to every handler registered for `E`.
    ///
    /// With [`Execution::Sequential`] the call returns once every handler has
    /// run, or with the first handler fault. With [`Execution::Detached`] it
    /// returns as soon as the handlers are scheduled and never fails.
    pub fn dispatch<E: Message>(&self, event: E) -> Result<DispatchReport, DispatchError> {
        let key = EventTypeKey::of::<E>();
        let _span =
            tracing::trace_span!("dispatch", dispatcher = %self.shared.name, event = %key).entered();

        match &self.shared.execution {
            Execution::Sequential => self.deliver_sequential(key.type_id(), &event),
            #[cfg(feature = "detached")]
            Execution::Detached(runtime) => {
                Ok(self.deliver_detached(key.type_id(), Arc::new(event), runtime))
            }
        }
    }

    /// Dispatches a type-erased event, routing by the runtime type of the
    /// value behind the `Arc`.
    pub fn dispatch_any(
        &self,
        event: Arc<dyn Any + Send + Sync>,
    ) -> Result<DispatchReport, DispatchError> {
        let erased: &dyn Any = &*event;
        let id = erased.type_id();
        let _span =
            tracing::trace_span!("dispatch", dispatcher = %self.shared.name, event = ?id).entered();

        match &self.shared.execution {
            Execution::Sequential => self.deliver_sequential(id, &*event),
            #[cfg(feature = "detached")]
            Execution::Detached(runtime) => Ok(self.deliver_detached(id, event, runtime)),
        }
    }

    fn deliver_sequential(
        &self,
        id: TypeId,
        event: &ErasedEvent,
    ) -> Result<DispatchReport, DispatchError> {
        let Some(snapshot) = self.shared.registry.snapshot(id) else {
            tracing::trace!("no handlers registered, event dropped");
            return Ok(DispatchReport::unmatched());
        };
        delivery::sequential::deliver(
            &self.shared.registry,
            snapshot,
            event,
            self.shared.observer.as_ref(),
        )
    }

    #[cfg(feature = "detached")]
    fn deliver_detached(
        &self,
        id: TypeId,
        event: Arc<ErasedEvent>,
        runtime: &tokio::runtime::Handle,
    ) -> DispatchReport {
        let Some(snapshot) = self.shared.registry.snapshot(id) else {
            tracing::trace!("no handlers registered, event dropped");
            return DispatchReport::unmatched();
        };
        delivery::detached::deliver(
            &self.shared.registry,
            snapshot,
            event,
            &self.shared.observer,
            runtime,
        )
    }

    /// Returns `true` if `handle` is still registered and has not fired.
    pub fn contains(&self, handle: &RegistrationHandle) -> bool {
        self.shared.registry.contains(handle)
    }

    /// Number of live registrations across all event types.
    pub fn len(&self) -> usize {
        self.shared.registry.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live registrations for `E`.
    pub fn handler_count<E: Message>(&self) -> usize {
        self.shared.registry.count(TypeId::of::<E>())
    }

    /// Removes every registration.
    pub fn clear(&self) {
        self.shared.registry.clear();
        tracing::debug!(dispatcher = %self.shared.name, "registry cleared");
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("name", &self.shared.name)
            .field("execution", &self.shared.execution)
            .field("handlers", &self.len())
            .finish()
    }
}

// ============================================================================
// DispatcherBuilder
// ============================================================================

/// Builder for configuring a [`Dispatcher`].
///
/// # Example
/// ```ignore
/// let dispatcher = Dispatcher::builder()
///     .name("orders")
///     .detached()?
///     .observer(|fault: &HandlerFault| eprintln!("{}: {}", fault.handle, fault.error))
///     .build();
/// ```
pub struct DispatcherBuilder {
    name: &'static str,
    execution: Execution,
    observer: Option<Arc<dyn FaultObserver>>,
}

impl DispatcherBuilder {
    /// Create a builder for a sequential dispatcher logging faults via `tracing`.
    pub fn new() -> Self {
        Self {
            name: "dispatcher",
            execution: Execution::Sequential,
            observer: None,
        }
    }

    /// Set the name recorded on log events.
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Run handlers inline on the dispatching thread (the default).
    pub fn sequential(mut self) -> Self {
        self.execution = Execution::Sequential;
        self
    }

    /// Spawn handlers as independent tasks on `runtime`.
    #[cfg(feature = "detached")]
    pub fn detached_on(mut self, runtime: tokio::runtime::Handle) -> Self {
        self.execution = Execution::Detached(runtime);
        self
    }

    /// Spawn handlers on the tokio runtime the builder is called from.
    #[cfg(feature = "detached")]
    pub fn detached(self) -> Result<Self, typeroute_core::BuildError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| typeroute_core::BuildError::NoRuntime)?;
        Ok(self.detached_on(runtime))
    }

    /// Set the execution mode directly.
    pub fn execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Replace the default [`LogFaults`] observer.
    pub fn observer<O: FaultObserver>(mut self, observer: O) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Build the dispatcher.
    pub fn build(self) -> Dispatcher {
        let observer = self
            .observer
            .unwrap_or_else(|| Arc::new(LogFaults::named(self.name)));
        Dispatcher {
            shared: Arc::new(Shared {
                name: self.name,
                registry: Registry::new(),
                execution: self.execution,
                observer,
            }),
        }
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
