//! Type utilities for the derive macro.

/// Checks if a type is `PhantomData<...>` or `std::marker::PhantomData<...>`.
///
/// `PhantomData<T>` never carries data, so such fields are left out of the
/// declared fields without an explicit `#[capture(skip)]`.
pub(crate) fn is_phantom_data(ty: &syn::Type) -> bool {
    let syn::Type::Path(path) = ty else {
        return false;
    };
    path.path.segments.last().is_some_and(|last_segment| {
        last_segment.ident == "PhantomData"
            && matches!(
                last_segment.arguments,
                syn::PathArguments::AngleBracketed(_)
            )
    })
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    fn parse_type(tokens: proc_macro2::TokenStream) -> syn::Type {
        syn::parse2(tokens).expect("should parse as Type")
    }

    #[test]
    fn phantom_data_bare_detected() {
        assert!(is_phantom_data(&parse_type(quote! { PhantomData<T> })));
    }

    #[test]
    fn phantom_data_qualified_paths_detected() {
        assert!(is_phantom_data(&parse_type(
            quote! { std::marker::PhantomData<T> }
        )));
        assert!(is_phantom_data(&parse_type(
            quote! { ::core::marker::PhantomData<fn() -> T> }
        )));
    }

    #[test]
    fn other_types_not_phantom_data() {
        assert!(!is_phantom_data(&parse_type(quote! { String })));
        assert!(!is_phantom_data(&parse_type(quote! { Option<T> })));
        assert!(!is_phantom_data(&parse_type(quote! { &'a PhantomData<T> })));
        assert!(!is_phantom_data(&parse_type(quote! { PhantomData })));
    }
}
