//! Parsing of `#[capture(...)]` field attributes.
//!
//! This module maps attribute syntax to capture decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{Attribute, Meta, Result, spanned::Spanned};

/// How a field takes part in capture.
///
/// | Attribute            | Role       | Behavior                                     |
/// |----------------------|------------|----------------------------------------------|
/// | None                 | `Captured` | Listed and captured through `Captured`       |
/// | `#[capture(skip)]`   | `Skip`     | Not listed at all                            |
/// | `#[capture(redact)]` | `Redact`   | Listed, always captured as redacted          |
/// | `#[capture(parent)]` | `Parent`   | Its `Reflect` layers follow the type's own   |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FieldRole {
    Captured,
    Skip,
    Redact,
    Parent,
}

fn set_role(target: &mut Option<FieldRole>, next: FieldRole, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[capture] attributes on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_role(attrs: &[Attribute]) -> Result<FieldRole> {
    let mut role: Option<FieldRole> = None;
    for attr in attrs {
        if !attr.path().is_ident("capture") {
            continue;
        }

        let Meta::List(list) = &attr.meta else {
            return Err(syn::Error::new(
                attr.span(),
                "expected #[capture(skip)], #[capture(redact)] or #[capture(parent)]",
            ));
        };

        let Ok(keyword) = syn::parse2::<syn::Ident>(list.tokens.clone()) else {
            return Err(syn::Error::new(
                attr.span(),
                "expected one of `skip`, `redact`, `parent`",
            ));
        };

        let next = match keyword.to_string().as_str() {
            "skip" => FieldRole::Skip,
            "redact" => FieldRole::Redact,
            "parent" => FieldRole::Parent,
            other => {
                return Err(syn::Error::new(
                    keyword.span(),
                    format!("unknown capture option `{other}`"),
                ));
            }
        };
        set_role(&mut role, next, attr.span())?;
    }

    Ok(role.unwrap_or(FieldRole::Captured))
}

/// Rejects `#[capture]` where only field attributes are meaningful.
pub(crate) fn reject_capture_attrs(attrs: &[Attribute], position: &str) -> Result<()> {
    match attrs.iter().find(|attr| attr.path().is_ident("capture")) {
        Some(attr) => Err(syn::Error::new(
            attr.span(),
            format!("#[capture] is not supported on {position}"),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn parse_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            struct Dummy;
        })
        .expect("should parse as DeriveInput");
        input.attrs
    }

    #[test]
    fn no_attribute_is_captured() {
        let attrs = parse_attrs(quote! {});
        assert_eq!(parse_field_role(&attrs).unwrap(), FieldRole::Captured);
    }

    #[test]
    fn known_options_parse() {
        let attrs = parse_attrs(quote! { #[capture(skip)] });
        assert_eq!(parse_field_role(&attrs).unwrap(), FieldRole::Skip);
        let attrs = parse_attrs(quote! { #[capture(redact)] });
        assert_eq!(parse_field_role(&attrs).unwrap(), FieldRole::Redact);
        let attrs = parse_attrs(quote! { #[capture(parent)] });
        assert_eq!(parse_field_role(&attrs).unwrap(), FieldRole::Parent);
    }

    #[test]
    fn bare_capture_errors() {
        let attrs = parse_attrs(quote! { #[capture] });
        let result = parse_field_role(&attrs);
        assert!(result.unwrap_err().to_string().contains("expected #[capture(skip)]"));
    }

    #[test]
    fn unknown_option_errors() {
        let attrs = parse_attrs(quote! { #[capture(hide)] });
        let result = parse_field_role(&attrs);
        assert!(result.unwrap_err().to_string().contains("unknown capture option `hide`"));
    }

    #[test]
    fn non_ident_option_errors() {
        let attrs = parse_attrs(quote! { #[capture(skip, redact)] });
        let result = parse_field_role(&attrs);
        assert!(result.unwrap_err().to_string().contains("expected one of"));
    }

    #[test]
    fn multiple_attributes_error() {
        let attrs = parse_attrs(quote! {
            #[capture(skip)]
            #[capture(redact)]
        });
        let result = parse_field_role(&attrs);
        assert!(result.unwrap_err().to_string().contains("multiple"));
    }

    #[test]
    fn other_attributes_ignored() {
        let attrs = parse_attrs(quote! {
            #[derive(Clone)]
            #[serde(skip)]
        });
        assert_eq!(parse_field_role(&attrs).unwrap(), FieldRole::Captured);
    }

    #[test]
    fn container_attributes_rejected() {
        let attrs = parse_attrs(quote! { #[capture(skip)] });
        let result = reject_capture_attrs(&attrs, "types");
        assert!(result.unwrap_err().to_string().contains("not supported on types"));
        assert!(reject_capture_attrs(&parse_attrs(quote! {}), "types").is_ok());
    }
}
