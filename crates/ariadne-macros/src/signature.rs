//! Signature macro implementation.
//!
//! This module contains the expansion logic for `#[route_signature]`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ItemFn;

use crate::parse::{SignatureAttrs, SignatureParam};

/// Expands the `#[route_signature]` attribute macro.
///
/// The original function is emitted unchanged, followed by a companion
/// function returning its parameter list.
pub fn expand_route_signature(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let attrs: SignatureAttrs = syn::parse2(attr)?;
    let item_fn: ItemFn = syn::parse2(item)?;

    let params = item_fn
        .sig
        .inputs
        .iter()
        .map(SignatureParam::from_fn_arg)
        .collect::<syn::Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

    Ok(generate_signature_code(&attrs, &item_fn, &params))
}

fn generate_signature_code(
    attrs: &SignatureAttrs,
    item_fn: &ItemFn,
    params: &[SignatureParam],
) -> TokenStream {
    let fn_name = &item_fn.sig.ident;
    let vis = &item_fn.vis;
    let companion = attrs
        .name
        .clone()
        .unwrap_or_else(|| format_ident!("{}_signature", fn_name));
    let krate = attrs
        .signature_crate
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(::ariadne_signature));

    let count = params.len();
    let entries = params.iter().map(|param| {
        let name = &param.name;
        let optional = param.optional;
        let declared_type = match &param.declared_type {
            Some(ty) => quote! { ::core::option::Option::Some(#ty) },
            None => quote! { ::core::option::Option::None },
        };
        quote! { #krate::HandlerParameter::new(#name, #declared_type, #optional) }
    });

    let doc = format!("Returns the route signature of [`{fn_name}`].");

    quote! {
        #item_fn

        #[doc = #doc]
        #[allow(dead_code)]
        #vis fn #companion() -> #krate::Signature {
            let parameters: [#krate::HandlerParameter; #count] = [#(#entries),*];
            parameters.into_iter().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(attr: TokenStream, item: TokenStream) -> String {
        expand_route_signature(attr, item)
            .expect("expansion failed")
            .to_string()
    }

    #[test]
    fn test_expand_preserves_original_fn() {
        let out = expand(
            quote! {},
            quote! {
                fn show(user: User) -> Response { todo!() }
            },
        );
        assert!(out.contains("fn show"));
        assert!(out.contains("fn show_signature"));
    }

    #[test]
    fn test_expand_emits_parameters_in_order() {
        let out = expand(
            quote! {},
            quote! {
                async fn show(user: User, id: u64, post: Option<Post>) {}
            },
        );
        let user = out.find("\"user\"").expect("user");
        let id = out.find("\"id\"").expect("id");
        let post = out.find("\"post\"").expect("post");
        assert!(user < id && id < post);
        assert!(out.contains("\"User\""));
        assert!(out.contains("\"Post\""));
    }

    #[test]
    fn test_expand_skips_receiver() {
        let out = expand(
            quote! {},
            quote! {
                pub fn update(&self, user: User) {}
            },
        );
        assert!(!out.contains("\"self\""));
        assert!(out.contains("1usize"));
    }

    #[test]
    fn test_expand_custom_name_and_crate() {
        let out = expand(
            quote! { name = "show_params", signature_crate = "::ariadne::signature" },
            quote! {
                fn show(user: User) {}
            },
        );
        assert!(out.contains("fn show_params"));
        assert!(out.contains("ariadne :: signature"));
        assert!(!out.contains("ariadne_signature"));
    }

    #[test]
    fn test_expand_rejects_patterns() {
        let result = expand_route_signature(
            quote! {},
            quote! {
                fn show((a, b): (u8, u8)) {}
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_rejects_non_fn() {
        let result = expand_route_signature(quote! {}, quote! { struct User; });
        assert!(result.is_err());
    }
}
