//! Struct-specific `Maskable` derivation.
//!
//! This module generates the in-place field walk for structs and collects
//! generic parameters that require trait bounds.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{spanned::Spanned, DataStruct, Fields, Result};

use crate::{
    crate_path,
    declaration::{parse_field_declaration, Declaration},
    transform::{generate_field_transform, DeriveContext},
};

pub(crate) struct StructDeriveOutput {
    pub(crate) mask_body: TokenStream,
    pub(crate) walked_generics: Vec<Ident>,
    pub(crate) leaf_generics: Vec<Ident>,
    pub(crate) debug_masked_body: TokenStream,
    pub(crate) debug_masked_generics: Vec<Ident>,
    pub(crate) debug_unmasked_body: TokenStream,
    pub(crate) debug_unmasked_generics: Vec<Ident>,
}

pub(crate) fn derive_struct(
    name: &Ident,
    data: DataStruct,
    generics: &syn::Generics,
) -> Result<StructDeriveOutput> {
    let container_path = crate_path("Maskable");
    match data.fields {
        Fields::Named(fields) => derive_named_struct(name, fields, generics, &container_path),
        Fields::Unnamed(fields) => derive_unnamed_struct(name, fields, generics, &container_path),
        Fields::Unit => Ok(StructDeriveOutput {
            mask_body: quote! {},
            walked_generics: Vec::new(),
            leaf_generics: Vec::new(),
            debug_masked_body: quote! {
                f.write_str(stringify!(#name))
            },
            debug_masked_generics: Vec::new(),
            debug_unmasked_body: quote! {
                f.write_str(stringify!(#name))
            },
            debug_unmasked_generics: Vec::new(),
        }),
    }
}

fn derive_named_struct(
    name: &Ident,
    fields: syn::FieldsNamed,
    generics: &syn::Generics,
    container_path: &TokenStream,
) -> Result<StructDeriveOutput> {
    let mut bindings = Vec::new();
    let mut transforms = Vec::new();
    let mut walked_generics = Vec::new();
    let mut leaf_generics = Vec::new();
    let mut debug_masked_fields = Vec::new();
    let mut debug_unmasked_fields = Vec::new();
    let mut debug_masked_generics = Vec::new();
    let mut debug_unmasked_generics = Vec::new();

    let mut ctx = DeriveContext {
        generics,
        container_path,
        walked_generics: &mut walked_generics,
        leaf_generics: &mut leaf_generics,
        debug_masked_generics: &mut debug_masked_generics,
        debug_unmasked_generics: &mut debug_unmasked_generics,
    };

    for field in fields.named {
        let span = field.span();
        let declaration = parse_field_declaration(&field.attrs)?;
        let ident = field.ident.expect("named field should have an identifier");
        let binding = ident.clone();
        let field_name = ident.to_string();
        let ty = &field.ty;
        bindings.push(ident);

        let is_declared = matches!(&declaration, Declaration::Leaf(_) | Declaration::Walk);
        let transform =
            generate_field_transform(&mut ctx, ty, &binding, &field_name, span, &declaration)?;

        let debug_masked_field = if is_declared {
            quote_spanned! { span =>
                debug.field(stringify!(#binding), &"[MASKED]");
            }
        } else {
            quote_spanned! { span =>
                debug.field(stringify!(#binding), #binding);
            }
        };
        let debug_unmasked_field = quote_spanned! { span =>
            debug.field(stringify!(#binding), #binding);
        };

        transforms.push(transform);
        debug_masked_fields.push(debug_masked_field);
        debug_unmasked_fields.push(debug_unmasked_field);
    }

    Ok(StructDeriveOutput {
        mask_body: quote! {
            let Self { #(#bindings),* } = self;
            #(#transforms)*
        },
        walked_generics,
        leaf_generics,
        debug_masked_body: quote! {
            match self {
                Self { #(#bindings),* } => {
                    let mut debug = f.debug_struct(stringify!(#name));
                    #(#debug_masked_fields)*
                    debug.finish()
                }
            }
        },
        debug_masked_generics,
        debug_unmasked_body: quote! {
            match self {
                Self { #(#bindings),* } => {
                    let mut debug = f.debug_struct(stringify!(#name));
                    #(#debug_unmasked_fields)*
                    debug.finish()
                }
            }
        },
        debug_unmasked_generics,
    })
}

fn derive_unnamed_struct(
    name: &Ident,
    fields: syn::FieldsUnnamed,
    generics: &syn::Generics,
    container_path: &TokenStream,
) -> Result<StructDeriveOutput> {
    let mut bindings = Vec::new();
    let mut transforms = Vec::new();
    let mut walked_generics = Vec::new();
    let mut leaf_generics = Vec::new();
    let mut debug_masked_fields = Vec::new();
    let mut debug_unmasked_fields = Vec::new();
    let mut debug_masked_generics = Vec::new();
    let mut debug_unmasked_generics = Vec::new();

    let mut ctx = DeriveContext {
        generics,
        container_path,
        walked_generics: &mut walked_generics,
        leaf_generics: &mut leaf_generics,
        debug_masked_generics: &mut debug_masked_generics,
        debug_unmasked_generics: &mut debug_unmasked_generics,
    };

    for (index, field) in fields.unnamed.into_iter().enumerate() {
        let ident = format_ident!("field_{index}");
        let binding = ident.clone();
        // Tuple fields are identified by position, like overrides see them.
        let field_name = index.to_string();
        let span = field.span();
        let ty = &field.ty;
        let declaration = parse_field_declaration(&field.attrs)?;
        bindings.push(ident);

        let is_declared = matches!(&declaration, Declaration::Leaf(_) | Declaration::Walk);
        let transform =
            generate_field_transform(&mut ctx, ty, &binding, &field_name, span, &declaration)?;

        let debug_masked_field = if is_declared {
            quote_spanned! { span =>
                debug.field(&"[MASKED]");
            }
        } else {
            quote_spanned! { span =>
                debug.field(#binding);
            }
        };
        let debug_unmasked_field = quote_spanned! { span =>
            debug.field(#binding);
        };

        transforms.push(transform);
        debug_masked_fields.push(debug_masked_field);
        debug_unmasked_fields.push(debug_unmasked_field);
    }

    Ok(StructDeriveOutput {
        mask_body: quote! {
            let Self ( #(#bindings),* ) = self;
            #(#transforms)*
        },
        walked_generics,
        leaf_generics,
        debug_masked_body: quote! {
            match self {
                Self ( #(#bindings),* ) => {
                    let mut debug = f.debug_tuple(stringify!(#name));
                    #(#debug_masked_fields)*
                    debug.finish()
                }
            }
        },
        debug_masked_generics,
        debug_unmasked_body: quote! {
            match self {
                Self ( #(#bindings),* ) => {
                    let mut debug = f.debug_tuple(stringify!(#name));
                    #(#debug_unmasked_fields)*
                    debug.finish()
                }
            }
        },
        debug_unmasked_generics,
    })
}
