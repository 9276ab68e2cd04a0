//! Shared field planning for struct and enum derivation.
//!
//! A `Layer` is the ordered list of fields one struct or variant declares,
//! plus its optional parent field. Struct and enum derivation differ only in
//! how a field is reached (`&self.field` versus a pattern binding), so both
//! build a `Layer` and generate descriptors and accessors from it.

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote_spanned};
use syn::{Fields, Ident, Member, Result, spanned::Spanned};

use crate::{
    attrs::{FieldRole, parse_field_role},
    generics::collect_generics_from_type,
    types::is_phantom_data,
};

/// One listed field.
pub(crate) struct ListedField {
    /// Name reported in snapshots: the identifier, or the position for tuple
    /// fields.
    pub(crate) name: String,
    pub(crate) member: Member,
    /// Binding used when the field is reached through a pattern.
    pub(crate) binding: Ident,
    pub(crate) ty: syn::Type,
    pub(crate) redacted: bool,
    pub(crate) span: Span,
}

pub(crate) struct ParentField {
    pub(crate) member: Member,
    pub(crate) binding: Ident,
    pub(crate) span: Span,
}

pub(crate) struct Layer {
    pub(crate) fields: Vec<ListedField>,
    pub(crate) parent: Option<ParentField>,
}

/// Generic parameters needing bounds, collected across every layer.
#[derive(Default)]
pub(crate) struct UsedGenerics {
    pub(crate) captured: Vec<Ident>,
    pub(crate) reflect: Vec<Ident>,
}

pub(crate) fn plan_layer(
    fields: &Fields,
    generics: &syn::Generics,
    used: &mut UsedGenerics,
) -> Result<Layer> {
    let mut listed = Vec::new();
    let mut parent: Option<ParentField> = None;

    for (index, field) in fields.iter().enumerate() {
        let span = field.span();
        let role = parse_field_role(&field.attrs)?;
        let (member, name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.to_string()),
            None => (Member::Unnamed(index.into()), index.to_string()),
        };
        let binding = format_ident!("__capture_{}", name);

        match role {
            FieldRole::Skip => {}
            FieldRole::Parent => {
                if parent.is_some() {
                    return Err(syn::Error::new(
                        span,
                        "at most one field may be marked #[capture(parent)]",
                    ));
                }
                collect_generics_from_type(&field.ty, generics, &mut used.reflect);
                parent = Some(ParentField {
                    member,
                    binding,
                    span,
                });
            }
            FieldRole::Captured if is_phantom_data(&field.ty) => {}
            FieldRole::Captured | FieldRole::Redact => {
                let redacted = role == FieldRole::Redact;
                if !redacted {
                    collect_generics_from_type(&field.ty, generics, &mut used.captured);
                }
                listed.push(ListedField {
                    name,
                    member,
                    binding,
                    ty: field.ty.clone(),
                    redacted,
                    span,
                });
            }
        }
    }

    Ok(Layer {
        fields: listed,
        parent,
    })
}

/// `FieldDescriptor` construction for every listed field.
pub(crate) fn descriptors(layer: &Layer, root: &TokenStream) -> Vec<TokenStream> {
    layer
        .fields
        .iter()
        .map(|field| {
            let ListedField { name, ty, span, .. } = field;
            let descriptor = quote_spanned! { *span =>
                #root::FieldDescriptor::new(#name, ::core::any::type_name::<#ty>())
            };
            if field.redacted {
                quote_spanned! { *span => #descriptor.redacted() }
            } else {
                descriptor
            }
        })
        .collect()
}

/// The value returned for a listed field reached through `access`.
pub(crate) fn field_value(field: &ListedField, access: &TokenStream, root: &TokenStream) -> TokenStream {
    if field.redacted {
        quote_spanned! { field.span =>
            ::core::result::Result::Ok(#root::CapturedRef::Borrowed(&#root::REDACTED))
        }
    } else {
        quote_spanned! { field.span =>
            ::core::result::Result::Ok(#root::CapturedRef::Borrowed(#access))
        }
    }
}
