//! Derive macro for `probe-snapshot`.
//!
//! This crate generates the inspection code behind `#[derive(Capture)]`. It:
//! - reads `#[capture(...)]` field attributes
//! - emits `Captured` and `Reflect` implementations listing declared fields
//!
//! It does **not** decide what gets redacted at runtime or how values are
//! encoded. Those live in the main `probe-snapshot` crate.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Result, parse_macro_input, spanned::Spanned};

mod attrs;
mod derive_enum;
mod derive_struct;
mod fields;
mod generics;
mod types;
use attrs::reject_capture_attrs;
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use fields::UsedGenerics;
use generics::add_bounds;

/// Derives `probe_snapshot::Captured` and `probe_snapshot::Reflect` for structs
/// and enums.
///
/// # Field Attributes
///
/// - **No annotation**: the field is listed under its name (tuple fields by
///   position) and captured through its own `Captured` implementation.
///
/// - `#[capture(skip)]`: the field is not listed. `PhantomData` fields are
///   skipped without the attribute.
///
/// - `#[capture(redact)]`: the field is listed but always captured as
///   redacted; its type does not need to implement `Captured`.
///
/// - `#[capture(parent)]`: the field's type must implement `Reflect`; its
///   layers are listed after this type's own fields, the way a base type's
///   fields follow a derived type's. At most one per struct or variant.
///
/// # Enums
///
/// Unit variants are captured by variant name. Variants with data are captured
/// as objects with a single layer named `Type::Variant`.
///
/// Unions are rejected at compile time.
#[proc_macro_derive(Capture, attributes(capture))]
pub fn derive_capture(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Bodies of the two `Reflect` methods.
struct ReflectBodies {
    declared_fields: TokenStream,
    field_value: TokenStream,
}

struct DeriveOutput {
    kind_body: TokenStream,
    reflect_impl: Option<ReflectBodies>,
    used: UsedGenerics,
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    reject_capture_attrs(&attrs, "types; annotate fields instead")?;

    let root = crate_root();
    let output = match &data {
        Data::Struct(data) => derive_struct(data, &generics, &root)?,
        Data::Enum(data) => derive_enum(data, &generics, &root)?,
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Capture` cannot be derived for unions",
            ));
        }
    };

    let DeriveOutput {
        kind_body,
        reflect_impl,
        used,
    } = output;

    let generics = add_bounds(generics, &used.captured, &quote!(#root::Captured));
    let generics = add_bounds(generics, &used.reflect, &quote!(#root::Reflect));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let reflect_impl = reflect_impl.map(|bodies| {
        let ReflectBodies {
            declared_fields,
            field_value,
        } = bodies;
        quote! {
            impl #impl_generics #root::Reflect for #ident #ty_generics #where_clause {
                fn declared_fields(
                    &self,
                ) -> ::core::result::Result<::std::vec::Vec<#root::TypeFields>, #root::AlienError> {
                    #declared_fields
                }

                fn field_value(
                    &self,
                    layer: usize,
                    index: usize,
                ) -> ::core::result::Result<#root::CapturedRef<'_>, #root::AlienError> {
                    #field_value
                }
            }
        }
    });

    Ok(quote! {
        impl #impl_generics #root::Captured for #ident #ty_generics #where_clause {
            fn kind(&self) -> #root::ValueKind<'_> {
                #kind_body
            }
        }

        #reflect_impl
    })
}

/// Returns the token stream to reference the probe-snapshot crate root.
///
/// Handles crate renaming (e.g., `snap = { package = "probe-snapshot", ... }`).
/// Inside probe-snapshot itself the crate is reachable under its own name
/// through `extern crate self as probe_snapshot`.
fn crate_root() -> TokenStream {
    match crate_name("probe-snapshot") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::probe_snapshot },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_str(tokens: TokenStream) -> Result<String> {
        let input: DeriveInput = syn::parse2(tokens)?;
        expand(input).map(|tokens| tokens.to_string().replace(' ', ""))
    }

    #[test]
    fn struct_expands_to_captured_and_reflect() {
        let output = expand_str(quote! {
            struct User {
                name: String,
                #[capture(redact)]
                pin: Secret,
                #[capture(skip)]
                cache: Cache,
            }
        })
        .unwrap();
        assert!(output.contains("CapturedforUser"));
        assert!(output.contains("ReflectforUser"));
        assert!(output.contains("\"name\""));
        assert!(output.contains("\"pin\""));
        assert!(!output.contains("\"cache\""));
        assert!(output.contains("REDACTED"));
    }

    #[test]
    fn generic_bounds_follow_field_roles() {
        let output = expand_str(quote! {
            struct Wrapper<T, P, M> {
                value: T,
                #[capture(parent)]
                base: P,
                marker: PhantomData<M>,
            }
        })
        .unwrap();
        assert!(output.contains("T:::probe_snapshot::Captured"));
        assert!(output.contains("P:::probe_snapshot::Reflect"));
        assert!(!output.contains("M:"));
    }

    #[test]
    fn unit_only_enum_has_no_reflect_impl() {
        let output = expand_str(quote! {
            enum Level { Low, High }
        })
        .unwrap();
        assert!(output.contains("ValueKind::Enum(\"Low\")"));
        assert!(!output.contains("ReflectforLevel"));
    }

    #[test]
    fn data_enum_gets_reflect_impl() {
        let output = expand_str(quote! {
            enum Shape { Empty, Circle { radius: f64 }, Pair(u8, u8) }
        })
        .unwrap();
        assert!(output.contains("ReflectforShape"));
        assert!(output.contains("\"Circle\""));
        assert!(output.contains("\"1\""));
    }

    #[test]
    fn two_parents_rejected() {
        let err = expand_str(quote! {
            struct Both {
                #[capture(parent)]
                a: A,
                #[capture(parent)]
                b: B,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("at most one field"));
    }

    #[test]
    fn unions_rejected() {
        let err = expand_str(quote! {
            union Bits { a: u32, b: f32 }
        })
        .unwrap_err();
        assert!(err.to_string().contains("cannot be derived for unions"));
    }

    #[test]
    fn container_attribute_rejected() {
        let err = expand_str(quote! {
            #[capture(skip)]
            struct Plain;
        })
        .unwrap_err();
        assert!(err.to_string().contains("not supported on types"));
    }
}
