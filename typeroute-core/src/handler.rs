//! # Handler
//!
//! The callback side of the dispatcher: a handler is bound to exactly one
//! event type and is invoked with a shared reference to every dispatched
//! value of that type.
//!
//! # Usage Patterns
//!
//! 1. **Closure**: `|n: &u32| println!("{n}")`
//! 2. **Fallible closure**: `|n: &u32| -> Result<(), MyError> { ... }`
//! 3. **Struct implementation**: `impl Handler<MyEvent> for MyHandler`

use crate::{error::BoxError, message::Message, outcome::IntoOutcome};

/// A callback for events of type `E`.
///
/// The event type is fixed by the implementation, so a handler can never be
/// registered under a routing key it cannot accept.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle events of type `{E}`",
    label = "missing `Handler<{E}>` implementation",
    note = "Closures must have the shape `Fn(&{E}) -> R` where `R: IntoOutcome`."
)]
pub trait Handler<E: Message>: Send + Sync + 'static {
    /// Handles one event.
    fn call(&self, event: &E) -> Result<(), BoxError>;
}

// Blanket impl for closures
impl<F, E, R> Handler<E> for F
where
    E: Message,
    R: IntoOutcome,
    F: Fn(&E) -> R + Send + Sync + 'static,
{
    fn call(&self, event: &E) -> Result<(), BoxError> {
        (self)(event).into_outcome()
    }
}
