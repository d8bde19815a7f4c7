//! Error types for typeroute.
//!
//! Registration and unregistration never fail, so the only errors in the
//! crate describe a handler fault or a misconfigured builder:
//!
//! - [`HandlerError`] - What went wrong inside one handler invocation
//! - [`DispatchError`] - A synchronous dispatch that stopped on a handler fault
//! - [`BuildError`] - A dispatcher configuration that cannot be satisfied

use crate::key::RegistrationHandle;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A fault raised by a single handler invocation.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The handler panicked; carries the panic message when it was a string.
    #[error("handler panicked: {0}")]
    Panicked(String),

    /// The handler returned an error.
    #[error(transparent)]
    Failed(BoxError),
}

impl HandlerError {
    /// Builds a [`HandlerError::Panicked`] from a caught panic payload.
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        HandlerError::Panicked(message)
    }

    /// Returns `true` if the handler panicked rather than returning an error.
    pub fn is_panic(&self) -> bool {
        matches!(self, HandlerError::Panicked(_))
    }
}

impl From<BoxError> for HandlerError {
    fn from(err: BoxError) -> Self {
        HandlerError::Failed(err)
    }
}

/// Errors returned by a synchronous dispatch.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A handler faulted; delivery stopped at this handler.
    #[error("handler {handle} faulted")]
    Handler {
        /// The registration whose handler faulted.
        handle: RegistrationHandle,
        /// The fault itself.
        #[source]
        source: HandlerError,
    },
}

impl DispatchError {
    /// The registration whose handler caused this error.
    pub fn handle(&self) -> &RegistrationHandle {
        match self {
            DispatchError::Handler { handle, .. } => handle,
        }
    }

    /// The underlying handler fault.
    pub fn handler_error(&self) -> &HandlerError {
        match self {
            DispatchError::Handler { source, .. } => source,
        }
    }
}

/// Errors raised while building a dispatcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Detached execution was requested outside of a tokio runtime.
    #[error("detached execution requires a running tokio runtime")]
    NoRuntime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_panic_str_payload() {
        let err = HandlerError::from_panic(Box::new("boom"));
        assert!(err.is_panic());
        assert_eq!(err.to_string(), "handler panicked: boom");
    }

    #[test]
    fn test_from_panic_string_payload() {
        let err = HandlerError::from_panic(Box::new(String::from("formatted 7")));
        assert_eq!(err.to_string(), "handler panicked: formatted 7");
    }

    #[test]
    fn test_from_panic_opaque_payload() {
        let err = HandlerError::from_panic(Box::new(42_u8));
        assert_eq!(err.to_string(), "handler panicked: non-string panic payload");
    }

    #[test]
    fn test_failed_is_transparent() {
        let err = HandlerError::from(BoxError::from("disk full"));
        assert!(!err.is_panic());
        assert_eq!(err.to_string(), "disk full");
    }
}
