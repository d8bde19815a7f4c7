//! # typeroute-std
//!
//! Registry and dispatcher implementations for the typeroute event
//! dispatcher.
//!
//! This crate provides:
//! - **Dispatcher**: [`Dispatcher`] and [`DispatcherBuilder`]
//! - **Execution modes**: [`Execution::Sequential`] and, with the `detached`
//!   feature, `Execution::Detached` on a tokio runtime
//! - **Fault observers**: [`FaultObserver`], [`LogFaults`]
//! - **Testing utilities**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use typeroute_core;

// Modules
mod delivery;
mod dispatcher;
mod observer;
mod registry;
pub mod testing;

pub use delivery::{DispatchReport, Execution};
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use observer::{FaultObserver, HandlerFault, LogFaults};
