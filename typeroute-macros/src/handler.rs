//! Handler-related macros.
//!
//! This module contains:
//! - `#[handler]` - Attribute macro turning a plain function into a Handler

use proc_macro::TokenStream;
use quote::quote;
use syn::{FnArg, Ident, ItemFn, LitStr, Token, Type, parse::Parse, parse_macro_input};

/// Arguments for the `#[handler]` macro.
pub(crate) struct HandlerArgs {
    pub name: Option<String>,
}

impl Parse for HandlerArgs {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut name = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => {
                    let lit: LitStr = input.parse()?;
                    name = Some(lit.value());
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(HandlerArgs { name })
    }
}

/// Implementation of the `#[handler]` macro.
pub fn handler_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as HandlerArgs);
    let input = parse_macro_input!(item as ItemFn);

    let fn_name = &input.sig.ident;
    let fn_vis = &input.vis;
    let fn_block = &input.block;
    let fn_output = &input.sig.output;
    let inputs = &input.sig.inputs;

    if let Some(asyncness) = &input.sig.asyncness {
        return syn::Error::new_spanned(asyncness, "Handler function must not be async")
            .to_compile_error()
            .into();
    }

    if !input.sig.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.sig.generics,
            "Handler function must not be generic; it handles exactly one event type",
        )
        .to_compile_error()
        .into();
    }

    if inputs.len() != 1 {
        return syn::Error::new_spanned(
            inputs,
            "Handler function must take exactly one argument: fn(event: &Event)",
        )
        .to_compile_error()
        .into();
    }

    let event_type = match inputs.first() {
        Some(FnArg::Typed(pat_type)) => {
            if let Type::Reference(type_ref) = &*pat_type.ty {
                &type_ref.elem
            } else {
                return syn::Error::new_spanned(
                    &pat_type.ty,
                    "Handler event argument must be a reference (&Event)",
                )
                .to_compile_error()
                .into();
            }
        }
        _ => {
            return syn::Error::new_spanned(
                inputs,
                "Handler function must take an event argument: fn(event: &Event)",
            )
            .to_compile_error()
            .into();
        }
    };

    let struct_name = if let Some(ref custom_name) = args.name {
        Ident::new(custom_name, fn_name.span())
    } else {
        fn_name.clone()
    };

    let expanded = quote! {
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, Default)]
        #[doc = concat!("Auto-generated Handler from `#[typeroute::handler]` on `", stringify!(#fn_name), "`")]
        #fn_vis struct #struct_name;

        impl ::typeroute::Handler<#event_type> for #struct_name {
            fn call(
                &self,
                __event: &#event_type,
            ) -> ::core::result::Result<(), ::typeroute::BoxError> {
                fn __body(#inputs) #fn_output #fn_block
                ::typeroute::IntoOutcome::into_outcome(__body(__event))
            }
        }
    };

    TokenStream::from(expanded)
}
