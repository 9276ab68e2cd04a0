//! Which type parameters a field type mentions, and the bounds that follow.
//!
//! Bounds are added only for generics used by listed fields: `Captured` for
//! captured fields, `Reflect` for the parent field. Skipped and redacted fields
//! never read their value, so their types need no bound.
//!
//! `PhantomData<T>` is not descended into, so
//! `struct TypedId<T> { id: u64, _marker: PhantomData<T> }` derives for any `T`.

use syn::{
    Ident, TypePath, parse_quote,
    visit::{self, Visit},
};

/// Records declared type parameters in first-use order.
struct ParamCollector<'g> {
    declared: &'g syn::Generics,
    found: &'g mut Vec<Ident>,
}

impl ParamCollector<'_> {
    fn note(&mut self, ident: &Ident) {
        let declared = self.declared.type_params().any(|param| param.ident == *ident);
        if declared && !self.found.contains(ident) {
            self.found.push(ident.clone());
        }
    }
}

impl<'ast> Visit<'ast> for ParamCollector<'_> {
    fn visit_type_path(&mut self, node: &'ast TypePath) {
        let segments = &node.path.segments;
        if segments.last().is_some_and(|last| last.ident == "PhantomData") {
            return;
        }
        // `T` and `T::Assoc` both depend on `T`
        if let (None, Some(first)) = (&node.qself, segments.first()) {
            self.note(&first.ident);
        }
        visit::visit_type_path(self, node);
    }
}

/// Appends the type parameters of `generics` that `ty` mentions to `result`.
pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    ParamCollector {
        declared: generics,
        found: result,
    }
    .visit_type(ty);
}

/// Adds `bound` to every generic parameter listed in `used_generics`.
pub(crate) fn add_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
    bound: &proc_macro2::TokenStream,
) -> syn::Generics {
    for param in generics
        .type_params_mut()
        .filter(|param| used_generics.contains(&param.ident))
    {
        param.bounds.push(parse_quote!(#bound));
    }
    generics
}
