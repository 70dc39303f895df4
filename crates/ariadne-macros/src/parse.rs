//! Parsing utilities for signature macros.
//!
//! This module turns attribute arguments and function parameters into the
//! plain data the expansion step emits.

use syn::{
    ext::IdentExt,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Expr, ExprLit, FnArg, GenericArgument, Ident, Lit, Meta, Pat, PatIdent, PatType, PathArguments,
    Token, Type, TypeParamBound,
};

/// Type names that never carry a declared binding type.
const SCALAR_TYPES: &[&str] = &[
    "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64", "i128", "isize",
    "f32", "f64", "bool", "char", "str", "String",
];

/// Smart pointers that are transparent for binding purposes.
const TRANSPARENT_WRAPPERS: &[&str] = &["Arc", "Box", "Rc"];

/// Parsed `#[route_signature(...)]` arguments.
#[derive(Debug, Default)]
pub struct SignatureAttrs {
    /// Overrides the generated companion function name.
    pub name: Option<Ident>,
    /// Path to the signature crate used in generated code.
    pub signature_crate: Option<syn::Path>,
}

impl Parse for SignatureAttrs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut attrs = Self::default();

        let meta_list: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in meta_list {
            let Meta::NameValue(nv) = meta else {
                return Err(syn::Error::new(meta.span(), "expected name = value"));
            };

            let ident = nv
                .path
                .get_ident()
                .ok_or_else(|| syn::Error::new(nv.path.span(), "expected identifier"))?
                .to_string();

            let value = match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => s.clone(),
                _ => {
                    return Err(syn::Error::new(
                        nv.value.span(),
                        "expected string literal",
                    ))
                }
            };

            match ident.as_str() {
                "name" => attrs.name = Some(value.parse()?),
                "signature_crate" => attrs.signature_crate = Some(value.parse()?),
                _ => {
                    return Err(syn::Error::new(
                        nv.path.span(),
                        format!("unknown attribute: {ident}"),
                    ))
                }
            }
        }

        Ok(attrs)
    }
}

/// A parsed handler parameter.
#[derive(Debug, PartialEq, Eq)]
pub struct SignatureParam {
    /// The parameter name.
    pub name: String,
    /// The declared type identifier, `None` for scalars and unnameable types.
    pub declared_type: Option<String>,
    /// Whether the parameter is an `Option<_>`.
    pub optional: bool,
}

impl SignatureParam {
    /// Parses a function argument. Receivers yield `None`.
    pub fn from_fn_arg(arg: &FnArg) -> syn::Result<Option<Self>> {
        match arg {
            FnArg::Receiver(_) => Ok(None),
            FnArg::Typed(PatType { pat, ty, .. }) => {
                let name = Self::extract_name(pat)?;
                let (declared_type, optional) = classify(ty, false);
                Ok(Some(Self {
                    name,
                    declared_type,
                    optional,
                }))
            }
        }
    }

    fn extract_name(pat: &Pat) -> syn::Result<String> {
        match pat {
            Pat::Ident(PatIdent { ident, .. }) => Ok(ident.unraw().to_string()),
            _ => Err(syn::Error::new(
                pat.span(),
                "route handler parameters must be plain identifiers",
            )),
        }
    }
}

/// Reduces a parameter type to the identifier the binding layer looks up.
///
/// References, `Arc`/`Box`/`Rc` and `dyn`/`impl` bounds are peeled. An
/// `Option<T>` marks the parameter optional and classifies `T`.
fn classify(ty: &Type, optional: bool) -> (Option<String>, bool) {
    match ty {
        Type::Reference(r) => classify(&r.elem, optional),
        Type::Paren(p) => classify(&p.elem, optional),
        Type::Group(g) => classify(&g.elem, optional),
        Type::TraitObject(t) => (first_trait_name(t.bounds.iter()), optional),
        Type::ImplTrait(t) => (first_trait_name(t.bounds.iter()), optional),
        Type::Path(type_path) if type_path.qself.is_none() => {
            let Some(segment) = type_path.path.segments.last() else {
                return (None, optional);
            };
            let ident = segment.ident.to_string();

            if ident == "Option" && !optional {
                return match single_type_argument(&segment.arguments) {
                    Some(inner) => classify(inner, true),
                    None => (None, true),
                };
            }
            if TRANSPARENT_WRAPPERS.contains(&ident.as_str()) {
                if let Some(inner) = single_type_argument(&segment.arguments) {
                    return classify(inner, optional);
                }
            }
            if SCALAR_TYPES.contains(&ident.as_str()) {
                return (None, optional);
            }
            (Some(ident), optional)
        }
        _ => (None, optional),
    }
}

fn single_type_argument(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

fn first_trait_name<'a>(mut bounds: impl Iterator<Item = &'a TypeParamBound>) -> Option<String> {
    bounds.find_map(|bound| match bound {
        TypeParamBound::Trait(t) => t.path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn param(arg: FnArg) -> SignatureParam {
        SignatureParam::from_fn_arg(&arg).unwrap().unwrap()
    }

    #[test]
    fn test_parse_empty_attrs() {
        let attrs: SignatureAttrs = parse_quote!();
        assert!(attrs.name.is_none());
        assert!(attrs.signature_crate.is_none());
    }

    #[test]
    fn test_parse_attrs_with_all() {
        let attrs: SignatureAttrs =
            parse_quote!(name = "show_params", signature_crate = "::ariadne::signature");
        assert_eq!(attrs.name.unwrap(), "show_params");
        assert!(attrs.signature_crate.is_some());
    }

    #[test]
    fn test_parse_attrs_unknown() {
        let result: syn::Result<SignatureAttrs> = syn::parse_str(r#"operation = "x""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_plain_model() {
        let p = param(parse_quote!(user: User));
        assert_eq!(p.name, "user");
        assert_eq!(p.declared_type.as_deref(), Some("User"));
        assert!(!p.optional);
    }

    #[test]
    fn test_qualified_path_uses_last_segment() {
        let p = param(parse_quote!(post: crate::models::Post));
        assert_eq!(p.declared_type.as_deref(), Some("Post"));
    }

    #[test]
    fn test_option_marks_optional() {
        let p = param(parse_quote!(post: Option<Arc<Post>>));
        assert_eq!(p.declared_type.as_deref(), Some("Post"));
        assert!(p.optional);
    }

    #[test]
    fn test_references_and_dyn_are_peeled() {
        let p = param(parse_quote!(imageable: &dyn Imageable));
        assert_eq!(p.declared_type.as_deref(), Some("Imageable"));

        let p = param(parse_quote!(imageable: Box<dyn Imageable + Send>));
        assert_eq!(p.declared_type.as_deref(), Some("Imageable"));
    }

    #[test]
    fn test_scalars_are_untyped() {
        for arg in [
            parse_quote!(id: u64),
            parse_quote!(slug: &str),
            parse_quote!(name: String),
            parse_quote!(page: Option<u32>),
        ] {
            assert_eq!(param(arg).declared_type, None);
        }
    }

    #[test]
    fn test_tuple_is_untyped() {
        let p = param(parse_quote!(pair: (u8, u8)));
        assert_eq!(p.declared_type, None);
    }

    #[test]
    fn test_receiver_skipped() {
        let arg: FnArg = parse_quote!(&self);
        assert!(SignatureParam::from_fn_arg(&arg).unwrap().is_none());
    }

    #[test]
    fn test_destructuring_rejected() {
        let arg: FnArg = parse_quote!((a, b): (u8, u8));
        assert!(SignatureParam::from_fn_arg(&arg).is_err());
    }

    #[test]
    fn test_raw_identifier_name() {
        let p = param(parse_quote!(r#type: Kind));
        assert_eq!(p.name, "type");
    }
}
