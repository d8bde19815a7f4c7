//! Message trait for event types.

use std::any::Any;

/// A marker trait for values that can be published through a dispatcher.
///
/// Messages are routed by their exact concrete type, so `Box<T>` and `T` are
/// distinct routes, as are `&'static str` and `String`.
///
/// # Example
///
/// ```rust,ignore
/// struct OrderPlaced { id: u64 }
///
/// impl Message for OrderPlaced {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must implement `Message` to be dispatched or handled",
    note = "Add `impl Message for {Self} {}` or `#[derive(Message)]`; events must be `Send + Sync + 'static`."
)]
pub trait Message: Any + Send + Sync + 'static {}

macro_rules! impl_message {
    ($($ty:ty),* $(,)?) => {
        $(impl Message for $ty {})*
    };
}

impl_message!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
);

impl<T: Message> Message for Box<T> {}
impl<T: Message> Message for std::sync::Arc<T> {}
impl<T: Message> Message for Vec<T> {}
impl<T: Message> Message for Option<T> {}
impl<T: Message, E: Message> Message for Result<T, E> {}
impl<A: Message, B: Message> Message for (A, B) {}
