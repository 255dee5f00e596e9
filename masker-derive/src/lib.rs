//! Derive macros for `masker`.
//!
//! This crate generates the traversal code behind `#[derive(Mask)]`. It:
//! - reads `#[mask(...)]` field declarations
//! - emits a `Maskable` implementation that calls into a field masker
//!
//! It does **not** define strategies or resolve overrides. Those live in the
//! main `masker` crate and are applied at runtime.

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

use proc_macro2::{Ident, TokenStream};
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod declaration;
mod derive_enum;
mod derive_struct;
mod generics;
mod transform;
mod types;
use container::{parse_container_options, ContainerOptions};
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::{add_debug_bounds, add_leaf_bounds, add_walk_bounds};

/// Derives `masker::Maskable` (and related impls) for structs and enums.
///
/// # Container Attributes
///
/// These attributes are placed on the struct/enum itself:
///
/// - `#[mask(skip_debug)]` - Opt out of `Debug` impl generation. Use this when you need a custom
///   `Debug` implementation or the type already derives `Debug` elsewhere.
///
/// # Field Attributes
///
/// - **No annotation**: Fields of string-like type (`String`, `Option<String>`, `Vec<String>`,
///   `Box<String>`, nested combinations) are undeclared masking leaves: they stay unmodified
///   unless a per-call override targets them by name. All other types pass through unchanged,
///   including external types like `chrono::DateTime` or `rust_decimal::Decimal`.
///
/// - `#[mask]`: Walks into the nested value using `Maskable`. The field type must derive `Mask`
///   or be a supported std container of one. Not allowed on scalars.
///
/// - `#[mask(strategy = "name")]`: Declares the field a masking leaf with a default strategy.
///   The name is resolved against the engine's catalog at mask time; unregistered names leave
///   the field unmodified. Works for `String`, `Option<String>`, `Vec<String>`, `Box<String>`
///   and map values. The type must implement `MaskValue`.
///
/// Unions are rejected at compile time.
///
/// # Additional Generated Impls
///
/// - `Debug`: when *not* building with `cfg(any(test, feature = "testing"))`, declared fields are
///   formatted as the string `"[MASKED]"` rather than their values. Use `#[mask(skip_debug)]` on
///   the container to opt out.
#[proc_macro_derive(Mask, attributes(mask))]
pub fn derive_mask(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the masker crate root.
///
/// Handles crate renaming (e.g., `my_mask = { package = "masker", ... }`)
/// and internal usage (when derive is used inside the masker crate itself).
fn crate_root() -> proc_macro2::TokenStream {
    match crate_name("masker") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::masker },
    }
}

fn crate_path(item: &str) -> proc_macro2::TokenStream {
    let root = crate_root();
    let item_ident = syn::parse_str::<syn::Path>(item).expect("masker crate path should parse");
    quote! { #root::#item_ident }
}

struct DeriveOutput {
    mask_body: TokenStream,
    walked_generics: Vec<Ident>,
    leaf_generics: Vec<Ident>,
    debug_masked_body: TokenStream,
    debug_masked_generics: Vec<Ident>,
    debug_unmasked_body: TokenStream,
    debug_unmasked_generics: Vec<Ident>,
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { skip_debug } = parse_container_options(&attrs)?;

    let crate_root = crate_root();

    let derive_output = match &data {
        Data::Struct(data) => {
            let output = derive_struct(&ident, data.clone(), &generics)?;
            DeriveOutput {
                mask_body: output.mask_body,
                walked_generics: output.walked_generics,
                leaf_generics: output.leaf_generics,
                debug_masked_body: output.debug_masked_body,
                debug_masked_generics: output.debug_masked_generics,
                debug_unmasked_body: output.debug_unmasked_body,
                debug_unmasked_generics: output.debug_unmasked_generics,
            }
        }
        Data::Enum(data) => {
            let output = derive_enum(&ident, data.clone(), &generics)?;
            DeriveOutput {
                mask_body: output.mask_body,
                walked_generics: output.walked_generics,
                leaf_generics: output.leaf_generics,
                debug_masked_body: output.debug_masked_body,
                debug_masked_generics: output.debug_masked_generics,
                debug_unmasked_body: output.debug_unmasked_body,
                debug_unmasked_generics: output.debug_unmasked_generics,
            }
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Mask` cannot be derived for unions",
            ));
        }
    };

    let mask_generics = add_walk_bounds(generics.clone(), &derive_output.walked_generics);
    let mask_generics = add_leaf_bounds(mask_generics, &derive_output.leaf_generics);
    let (impl_generics, ty_generics, where_clause) = mask_generics.split_for_impl();
    let debug_masked_generics =
        add_debug_bounds(generics.clone(), &derive_output.debug_masked_generics);
    let (debug_masked_impl_generics, debug_masked_ty_generics, debug_masked_where_clause) =
        debug_masked_generics.split_for_impl();
    let debug_unmasked_generics =
        add_debug_bounds(generics.clone(), &derive_output.debug_unmasked_generics);
    let (debug_unmasked_impl_generics, debug_unmasked_ty_generics, debug_unmasked_where_clause) =
        debug_unmasked_generics.split_for_impl();
    let mask_body = &derive_output.mask_body;
    let debug_masked_body = &derive_output.debug_masked_body;
    let debug_unmasked_body = &derive_output.debug_unmasked_body;
    let debug_impl = if skip_debug {
        quote! {}
    } else {
        quote! {
            #[cfg(any(test, feature = "testing"))]
            impl #debug_unmasked_impl_generics ::core::fmt::Debug for #ident #debug_unmasked_ty_generics #debug_unmasked_where_clause {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    #debug_unmasked_body
                }
            }

            #[cfg(not(any(test, feature = "testing")))]
            #[allow(unused_variables)]
            impl #debug_masked_impl_generics ::core::fmt::Debug for #ident #debug_masked_ty_generics #debug_masked_where_clause {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    #debug_masked_body
                }
            }
        }
    };

    let trait_impl = quote! {
        impl #impl_generics #crate_root::Maskable for #ident #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn mask_with<M: #crate_root::FieldMasker>(&mut self, masker: &M) {
                #mask_body
            }
        }

        #debug_impl
    };
    Ok(trait_impl)
}
