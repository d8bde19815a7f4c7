//! # typeroute-core
//!
//! Core traits and types for the typeroute event dispatcher.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! libraries that publish or consume events without depending on the
//! registry implementation in `typeroute-std`.
//!
//! # Vocabulary
//!
//! - [`Message`] - Marker for values that can be dispatched. Routing is by
//!   exact concrete type.
//! - [`Handler`] - A callback bound to one message type. Any
//!   `Fn(&E) -> impl IntoOutcome` closure is a handler.
//! - [`EventTypeKey`] - The routing key derived from a message type.
//! - [`ExecutionPolicy`] - `Always` or `Once`.
//! - [`RegistrationHandle`] - Opaque token for unregistering a handler.
//!
//! # Error Types
//!
//! - [`HandlerError`] - A fault raised by one handler invocation
//! - [`DispatchError`] - A synchronous dispatch stopped by a handler fault
//! - [`BuildError`] - A dispatcher configuration error

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod handler;
mod key;
mod message;
mod outcome;

// Re-exports
pub use error::{BoxError, BuildError, DispatchError, HandlerError};
pub use handler::Handler;
pub use key::{EventTypeKey, ExecutionPolicy, RegistrationHandle};
pub use message::Message;
pub use outcome::IntoOutcome;
