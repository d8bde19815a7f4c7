//! Procedural macros for typeroute.
//!
//! - `#[derive(Message)]` implements `typeroute::Message` for a type.
//! - `#[handler]` turns `fn on_x(event: &X) [-> R]` into a unit struct
//!   implementing `typeroute::Handler<X>`.

use proc_macro::TokenStream;

mod event;
mod handler;

/// Derive macro for implementing `Message` trait.
#[proc_macro_derive(Message)]
pub fn derive_message(input: TokenStream) -> TokenStream {
    event::derive_message_impl(input)
}

/// Attribute macro generating a `Handler` from a plain function.
///
/// The generated unit struct takes the function's name unless
/// `#[handler(name = "OtherName")]` is given.
///
/// ```rust,ignore
/// #[handler]
/// fn audit(order: &OrderPlaced) -> Result<(), AuditError> {
///     write_audit_line(order)
/// }
///
/// dispatcher.register(audit);
/// ```
#[proc_macro_attribute]
pub fn handler(attr: TokenStream, item: TokenStream) -> TokenStream {
    handler::handler_impl(attr, item)
}
