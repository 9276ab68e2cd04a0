//! Struct-specific `Captured` and `Reflect` derivation.
//!
//! A struct is captured as an object with one layer of declared fields. A
//! `#[capture(parent)]` field appends the parent's layers after it, shifted by
//! one.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataStruct, Result};

use crate::{
    DeriveOutput, ReflectBodies,
    fields::{UsedGenerics, descriptors, field_value, plan_layer},
};

pub(crate) fn derive_struct(
    data: &DataStruct,
    generics: &syn::Generics,
    root: &TokenStream,
) -> Result<DeriveOutput> {
    let mut used = UsedGenerics::default();
    let layer = plan_layer(&data.fields, generics, &mut used)?;

    let descriptors = descriptors(&layer, root);
    let value_arms = layer.fields.iter().enumerate().map(|(index, field)| {
        let member = &field.member;
        let value = field_value(field, &quote!(&self.#member), root);
        quote! { (0, #index) => #value, }
    });

    let (collect_layers, parent_arm) = match &layer.parent {
        Some(parent) => {
            let member = &parent.member;
            (
                quote! {
                    let mut layers = ::std::vec![own];
                    layers.extend(#root::Reflect::declared_fields(&self.#member)?);
                    ::core::result::Result::Ok(layers)
                },
                quote! {
                    (layer, index) if layer > 0 => {
                        #root::Reflect::field_value(&self.#member, layer - 1, index)
                    }
                },
            )
        }
        None => (
            quote! { ::core::result::Result::Ok(::std::vec![own]) },
            quote! {},
        ),
    };

    Ok(DeriveOutput {
        kind_body: quote! { #root::ValueKind::Object(self) },
        reflect_impl: Some(ReflectBodies {
            declared_fields: quote! {
                let own = #root::TypeFields::new(
                    ::core::any::type_name::<Self>(),
                    ::std::vec![#(#descriptors),*],
                );
                #collect_layers
            },
            field_value: quote! {
                match (layer, index) {
                    #(#value_arms)*
                    #parent_arm
                    (layer, index) => ::core::result::Result::Err(#root::unknown_field(layer, index)),
                }
            },
        }),
        used,
    })
}
