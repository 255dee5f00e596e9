//! Enum-specific `Maskable` derivation.
//!
//! This module generates match arms for each variant and collects generic
//! parameters that require trait bounds.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{spanned::Spanned, DataEnum, Fields, Result};

use crate::{
    crate_path,
    declaration::{parse_field_declaration, Declaration},
    transform::{generate_field_transform, DeriveContext},
};

pub(crate) struct EnumDeriveOutput {
    pub(crate) mask_body: TokenStream,
    pub(crate) walked_generics: Vec<Ident>,
    pub(crate) leaf_generics: Vec<Ident>,
    pub(crate) debug_masked_body: TokenStream,
    pub(crate) debug_masked_generics: Vec<Ident>,
    pub(crate) debug_unmasked_body: TokenStream,
    pub(crate) debug_unmasked_generics: Vec<Ident>,
}

/// Context for deriving a single enum variant.
struct VariantContext<'a> {
    name: &'a Ident,
    variant_ident: &'a Ident,
    arms: &'a mut Vec<TokenStream>,
    debug_masked_arms: &'a mut Vec<TokenStream>,
    debug_unmasked_arms: &'a mut Vec<TokenStream>,
}

pub(crate) fn derive_enum(
    name: &Ident,
    data: DataEnum,
    generics: &syn::Generics,
) -> Result<EnumDeriveOutput> {
    let container_path = crate_path("Maskable");
    let mut arms = Vec::new();
    let mut walked_generics = Vec::new();
    let mut leaf_generics = Vec::new();
    let mut debug_masked_arms = Vec::new();
    let mut debug_unmasked_arms = Vec::new();
    let mut debug_masked_generics = Vec::new();
    let mut debug_unmasked_generics = Vec::new();

    for variant in data.variants {
        let variant_ident = &variant.ident;
        let mut variant_ctx = VariantContext {
            name,
            variant_ident,
            arms: &mut arms,
            debug_masked_arms: &mut debug_masked_arms,
            debug_unmasked_arms: &mut debug_unmasked_arms,
        };
        let mut derive_ctx = DeriveContext {
            generics,
            container_path: &container_path,
            walked_generics: &mut walked_generics,
            leaf_generics: &mut leaf_generics,
            debug_masked_generics: &mut debug_masked_generics,
            debug_unmasked_generics: &mut debug_unmasked_generics,
        };

        match variant.fields {
            Fields::Unit => {
                derive_unit_variant(&mut variant_ctx);
            }
            Fields::Named(fields) => {
                derive_named_variant(&mut variant_ctx, &mut derive_ctx, fields)?;
            }
            Fields::Unnamed(fields) => {
                derive_unnamed_variant(&mut variant_ctx, &mut derive_ctx, fields)?;
            }
        }
    }

    let body = quote! {
        match self {
            #(#arms),*
        }
    };

    let debug_masked_body = quote! {
        match self {
            #(#debug_masked_arms),*
        }
    };

    let debug_unmasked_body = quote! {
        match self {
            #(#debug_unmasked_arms),*
        }
    };

    Ok(EnumDeriveOutput {
        mask_body: body,
        walked_generics,
        leaf_generics,
        debug_masked_body,
        debug_masked_generics,
        debug_unmasked_body,
        debug_unmasked_generics,
    })
}

fn derive_unit_variant(ctx: &mut VariantContext<'_>) {
    let name = ctx.name;
    let variant_ident = ctx.variant_ident;

    ctx.arms.push(quote! { #name::#variant_ident => {} });
    ctx.debug_masked_arms.push(quote! {
        #name::#variant_ident => f.write_str(stringify!(#name::#variant_ident))
    });
    ctx.debug_unmasked_arms.push(quote! {
        #name::#variant_ident => f.write_str(stringify!(#name::#variant_ident))
    });
}

fn derive_named_variant(
    variant_ctx: &mut VariantContext<'_>,
    derive_ctx: &mut DeriveContext<'_>,
    fields: syn::FieldsNamed,
) -> Result<()> {
    let name = variant_ctx.name;
    let variant_ident = variant_ctx.variant_ident;

    let mut bindings = Vec::new();
    let mut transforms = Vec::new();
    let mut debug_masked_fields = Vec::new();
    let mut debug_unmasked_fields = Vec::new();

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
            generate_field_transform(derive_ctx, ty, &binding, &field_name, span, &declaration)?;

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

    let pattern = quote! { { #(#bindings),* } };
    variant_ctx.arms.push(quote! {
        #name::#variant_ident #pattern => {
            #(#transforms)*
        }
    });
    variant_ctx.debug_masked_arms.push(quote! {
        #name::#variant_ident #pattern => {
            let mut debug = f.debug_struct(stringify!(#name::#variant_ident));
            #(#debug_masked_fields)*
            debug.finish()
        }
    });
    variant_ctx.debug_unmasked_arms.push(quote! {
        #name::#variant_ident #pattern => {
            let mut debug = f.debug_struct(stringify!(#name::#variant_ident));
            #(#debug_unmasked_fields)*
            debug.finish()
        }
    });
    Ok(())
}

fn derive_unnamed_variant(
    variant_ctx: &mut VariantContext<'_>,
    derive_ctx: &mut DeriveContext<'_>,
    fields: syn::FieldsUnnamed,
) -> Result<()> {
    let name = variant_ctx.name;
    let variant_ident = variant_ctx.variant_ident;

    let mut bindings = Vec::new();
    let mut transforms = Vec::new();
    let mut debug_masked_fields = Vec::new();
    let mut debug_unmasked_fields = Vec::new();

    for (index, field) in fields.unnamed.into_iter().enumerate() {
        let ident = format_ident!("field_{index}");
        let binding = ident.clone();
        let field_name = index.to_string();
        let span = field.span();
        let ty = &field.ty;
        let declaration = parse_field_declaration(&field.attrs)?;
        bindings.push(ident);

        let is_declared = matches!(&declaration, Declaration::Leaf(_) | Declaration::Walk);
        let transform =
            generate_field_transform(derive_ctx, ty, &binding, &field_name, span, &declaration)?;

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

    variant_ctx.arms.push(quote! {
        #name::#variant_ident ( #(#bindings),* ) => {
            #(#transforms)*
        }
    });
    variant_ctx.debug_masked_arms.push(quote! {
        #name::#variant_ident ( #(#bindings),* ) => {
            let mut debug = f.debug_tuple(stringify!(#name::#variant_ident));
            #(#debug_masked_fields)*
            debug.finish()
        }
    });
    variant_ctx.debug_unmasked_arms.push(quote! {
        #name::#variant_ident ( #(#bindings),* ) => {
            let mut debug = f.debug_tuple(stringify!(#name::#variant_ident));
            #(#debug_unmasked_fields)*
            debug.finish()
        }
    });
    Ok(())
}
