//! Event-related macros.
//!
//! This module contains:
//! - `#[derive(Message)]` - Derive macro for implementing the `Message` trait

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro for implementing `Message` trait.
///
/// Generic parameters are carried over unchanged; the `'static + Send + Sync`
/// requirements of `Message` are left to the compiler to check.
pub fn derive_message_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::typeroute::Message for #name #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}
