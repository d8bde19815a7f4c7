//! # typeroute - Type-Routed In-Process Event Dispatcher
//!
//! `typeroute` routes published values to the handlers registered for their
//! exact concrete type. It is the observer/pub-sub primitive for decoupling
//! producers from consumers inside one process: no transport, no persistence,
//! no queueing.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use typeroute::prelude::*;
//!
//! #[derive(Debug)]
//! struct OrderPlaced { id: u64 }
//! impl Message for OrderPlaced {}
//!
//! let dispatcher = Dispatcher::new();
//! let audit = dispatcher.register(|o: &OrderPlaced| println!("audit {}", o.id));
//! dispatcher.register_once(|o: &OrderPlaced| println!("first order {}", o.id));
//!
//! dispatcher.dispatch(OrderPlaced { id: 1 })?; // both handlers
//! dispatcher.dispatch(OrderPlaced { id: 2 })?; // audit only
//! dispatcher.dispatch(7_u32)?;                 // nobody listens, dropped
//!
//! dispatcher.unregister(&audit);
//! ```
//!
//! ## Execution Modes
//!
//! - **Sequential** (default): handlers run inline in registration order. The
//!   first handler fault (error or panic) stops delivery and is returned as
//!   [`DispatchError`].
//! - **Detached** (`detached` feature): one tokio task per handler, no join,
//!   no ordering. Faults stay inside their task and go to the dispatcher's
//!   [`FaultObserver`].
//!
//! ```rust,ignore
//! let dispatcher = Dispatcher::builder().name("orders").detached()?.build();
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use typeroute_core::{
    // Error types
    BoxError,
    BuildError,
    DispatchError,
    // Routing keys and handles
    EventTypeKey,
    ExecutionPolicy,
    // Handler
    Handler,
    HandlerError,
    IntoOutcome,
    // Message
    Message,
    RegistrationHandle,
};

// Dispatcher
pub use typeroute_std::{
    DispatchReport, Dispatcher, DispatcherBuilder, Execution, FaultObserver, HandlerFault,
    LogFaults,
};

/// Testing utilities.
pub mod testing {
    pub use typeroute_std::testing::{Counter, FaultLog, Recorder};
}

/// Prelude module - common imports for typeroute.
///
/// # Usage
///
/// ```rust,ignore
/// use typeroute::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        DispatchError, DispatchReport, Dispatcher, ExecutionPolicy, Handler, HandlerFault,
        Message, RegistrationHandle,
    };
}

#[cfg(feature = "macros")]
pub use typeroute_macros::{Message, handler};
