//! Parsing of `#[mask(...)]` field declarations.
//!
//! This module maps attribute syntax to traversal decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, LitStr, Meta, Result};

/// Field traversal decision based on `#[mask(...)]` declarations.
///
/// ## Declaration Mapping
///
/// | Attribute | Declaration | Behavior |
/// |-----------|-------------|----------|
/// | None | `PassThrough` | String-like fields become undeclared leaves; others pass through |
/// | `#[mask]` | `Walk` | Walk into the nested `Maskable` value |
/// | `#[mask(strategy = "name")]` | `Leaf(name)` | Masking leaf with a declared strategy |
#[derive(Clone, Debug)]
pub(crate) enum Declaration {
    /// No annotation.
    ///
    /// String-like fields stay reachable by per-call overrides; everything
    /// else passes through unchanged, so external types like `DateTime<Utc>`
    /// or `Decimal` work automatically.
    PassThrough,
    /// Bare `#[mask]`: walk into the nested value.
    Walk,
    /// `#[mask(strategy = "name")]`: masking leaf with a default strategy.
    ///
    /// The name is resolved against the engine's catalog at mask time;
    /// unregistered names degrade to a no-op on the field.
    Leaf(LitStr),
}

fn set_declaration(target: &mut Option<Declaration>, next: Declaration, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[mask] attributes specified on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_declaration(attrs: &[Attribute]) -> Result<Declaration> {
    let mut declaration: Option<Declaration> = None;
    for attr in attrs {
        if !attr.path().is_ident("mask") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                // Bare #[mask] - walk into the nested value
                set_declaration(&mut declaration, Declaration::Walk, attr.span())?;
            }
            Meta::List(_) => {
                let mut strategy: Option<LitStr> = None;
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("strategy") {
                        if strategy.is_some() {
                            return Err(meta.error("duplicate `strategy` declaration"));
                        }
                        strategy = Some(meta.value()?.parse()?);
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown field option `{}`; expected `strategy = \"...\"`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
                match strategy {
                    Some(lit) => {
                        set_declaration(&mut declaration, Declaration::Leaf(lit), attr.span())?;
                    }
                    None => {
                        return Err(syn::Error::new(
                            attr.span(),
                            "expected a strategy declaration (e.g., #[mask(strategy = \"partial\")])",
                        ));
                    }
                }
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[mask]",
                ));
            }
        }
    }

    // Default: no annotation
    Ok(declaration.unwrap_or(Declaration::PassThrough))
}
