//! Shared field transformation logic for struct and enum derivation.
//!
//! This module holds the common code for generating per-field traversal
//! calls, shared between `derive_struct` and `derive_enum`.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote_spanned;
use syn::{LitStr, Result};

use crate::{
    declaration::Declaration,
    generics::collect_generics_from_type,
    types::{is_scalar_type, is_string_type},
};

/// Accumulated state during field processing.
///
/// This struct groups the mutable vectors that collect generics and output
/// tokens during traversal of struct fields or enum variants.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) container_path: &'a TokenStream,
    pub(crate) walked_generics: &'a mut Vec<Ident>,
    pub(crate) leaf_generics: &'a mut Vec<Ident>,
    pub(crate) debug_masked_generics: &'a mut Vec<Ident>,
    pub(crate) debug_unmasked_generics: &'a mut Vec<Ident>,
}

/// Generates the traversal token stream for a single field.
///
/// `field_name` is the identifier the engine sees: the field name for named
/// fields, the position (`"0"`, `"1"`, ...) for tuple fields. Overrides are
/// matched against exactly this string.
///
/// ## Field Traversal Rules
///
/// | Declaration | Behavior |
/// |-------------|----------|
/// | None, string-like | Undeclared leaf: consulted with no tag |
/// | None, other | Pass through unchanged (identity) |
/// | `#[mask]` | Walk the nested value, gated by `descend` |
/// | `#[mask(strategy = "...")]` | Leaf: consulted with the declared tag |
pub(crate) fn generate_field_transform(
    ctx: &mut DeriveContext<'_>,
    ty: &syn::Type,
    binding: &Ident,
    field_name: &str,
    span: Span,
    declaration: &Declaration,
) -> Result<TokenStream> {
    let container_path = ctx.container_path;
    let name = LitStr::new(field_name, span);

    match declaration {
        // No declaration: string-like fields stay override-reachable; other
        // types pass through so external types (DateTime, Decimal, etc.)
        // work without any annotation.
        Declaration::PassThrough => {
            collect_generics_from_type(ty, ctx.generics, ctx.debug_masked_generics);
            collect_generics_from_type(ty, ctx.generics, ctx.debug_unmasked_generics);
            if is_string_type(ty) {
                Ok(quote_spanned! { span =>
                    masker.mask_field(#name, ::core::option::Option::None, #binding);
                })
            } else {
                Ok(quote_spanned! { span =>
                    // Field passes through unchanged (no #[mask] declaration)
                    let _ = #binding;
                })
            }
        }
        // Bare #[mask]: walk the nested value unless an override suppresses it
        Declaration::Walk => {
            if is_scalar_type(ty) {
                Err(syn::Error::new(
                    span,
                    "scalar fields are never masked: remove #[mask]. \
                    Only string-like leaves and nested Maskable structures participate.",
                ))
            } else {
                collect_generics_from_type(ty, ctx.generics, ctx.walked_generics);
                collect_generics_from_type(ty, ctx.generics, ctx.debug_masked_generics);
                collect_generics_from_type(ty, ctx.generics, ctx.debug_unmasked_generics);
                Ok(quote_spanned! { span =>
                    if masker.descend(#name) {
                        #container_path::mask_with(#binding, masker);
                    }
                })
            }
        }
        // #[mask(strategy = "...")]: masking leaf with a declared tag.
        // MaskValue handles wrapper nesting: String, Option<String>,
        // Vec<String>, Option<Vec<String>>, map values, etc.
        Declaration::Leaf(strategy) => {
            if is_scalar_type(ty) {
                Err(syn::Error::new(
                    span,
                    "scalar fields cannot carry a masking strategy: strategies apply to \
                    string-like values (String, Option<String>, ...). Scalars are never masked.",
                ))
            } else {
                collect_generics_from_type(ty, ctx.generics, ctx.leaf_generics);
                collect_generics_from_type(ty, ctx.generics, ctx.debug_unmasked_generics);
                Ok(quote_spanned! { span =>
                    masker.mask_field(#name, ::core::option::Option::Some(#strategy), #binding);
                })
            }
        }
    }
}
