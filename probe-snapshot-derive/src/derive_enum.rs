//! Enum-specific `Captured` and `Reflect` derivation.
//!
//! Unit variants are captured by name. Variants carrying data are captured as
//! objects whose single layer is named `Type::Variant`; tuple fields are named
//! by position.

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{DataEnum, Fields, Result};

use crate::{
    DeriveOutput, ReflectBodies,
    attrs::reject_capture_attrs,
    fields::{UsedGenerics, descriptors, field_value, plan_layer},
};

fn variant_layer_name(variant: &Ident) -> TokenStream {
    let variant = variant.to_string();
    quote! {
        ::std::format!("{}::{}", ::core::any::type_name::<Self>(), #variant)
    }
}

pub(crate) fn derive_enum(
    data: &DataEnum,
    generics: &syn::Generics,
    root: &TokenStream,
) -> Result<DeriveOutput> {
    let mut used = UsedGenerics::default();
    if data.variants.is_empty() {
        return Ok(DeriveOutput {
            kind_body: quote! { match *self {} },
            reflect_impl: None,
            used,
        });
    }

    let mut kind_arms = Vec::new();
    let mut declared_arms = Vec::new();
    let mut value_arms = Vec::new();
    let mut has_data = false;

    for variant in &data.variants {
        reject_capture_attrs(&variant.attrs, "enum variants")?;
        let ident = &variant.ident;

        if matches!(variant.fields, Fields::Unit) {
            let name = ident.to_string();
            kind_arms.push(quote! { Self::#ident => #root::ValueKind::Enum(#name), });
            declared_arms.push(quote! {
                Self::#ident => ::core::result::Result::Ok(::std::vec::Vec::new()),
            });
            continue;
        }

        has_data = true;
        let layer = plan_layer(&variant.fields, generics, &mut used)?;
        kind_arms.push(quote! { Self::#ident { .. } => #root::ValueKind::Object(self), });

        let layer_name = variant_layer_name(ident);
        let descriptors = descriptors(&layer, root);
        let own = quote! { #root::TypeFields::new(#layer_name, ::std::vec![#(#descriptors),*]) };

        match &layer.parent {
            Some(parent) => {
                let member = &parent.member;
                let binding = &parent.binding;
                declared_arms.push(quote! {
                    Self::#ident { #member: #binding, .. } => {
                        let mut layers = ::std::vec![#own];
                        layers.extend(#root::Reflect::declared_fields(#binding)?);
                        ::core::result::Result::Ok(layers)
                    }
                });
                value_arms.push(quote! {
                    (Self::#ident { #member: #binding, .. }, layer, index) if layer > 0 => {
                        #root::Reflect::field_value(#binding, layer - 1, index)
                    }
                });
            }
            None => declared_arms.push(quote! {
                Self::#ident { .. } => ::core::result::Result::Ok(::std::vec![#own]),
            }),
        }

        for (index, field) in layer.fields.iter().enumerate() {
            let member = &field.member;
            let binding = &field.binding;
            let arm = if field.redacted {
                let value = field_value(field, &quote!(), root);
                quote! { (Self::#ident { .. }, 0, #index) => #value, }
            } else {
                let value = field_value(field, &quote!(#binding), root);
                quote! { (Self::#ident { #member: #binding, .. }, 0, #index) => #value, }
            };
            value_arms.push(arm);
        }
    }

    let reflect_impl = has_data.then(|| ReflectBodies {
        declared_fields: quote! {
            match self {
                #(#declared_arms)*
            }
        },
        field_value: quote! {
            match (self, layer, index) {
                #(#value_arms)*
                (_, layer, index) => ::core::result::Result::Err(#root::unknown_field(layer, index)),
            }
        },
    });

    Ok(DeriveOutput {
        kind_body: quote! {
            match self {
                #(#kind_arms)*
            }
        },
        reflect_impl,
        used,
    })
}
