//! Type utilities for the derive macro.

/// Checks if a type is a recognized scalar primitive.
///
/// Returns `true` for bare primitive type names like `i32`, `bool`, `f64`, etc.
/// Returns `false` for qualified paths, generic types, or type aliases.
///
/// This is intentionally conservative - if we can't definitively identify
/// a type as a scalar, we treat it as a potentially maskable value and let
/// the trait system decide.
pub(crate) fn is_scalar_type(ty: &syn::Type) -> bool {
    if let syn::Type::Path(path) = ty {
        if path.path.leading_colon.is_some() {
            // Absolute path (e.g., ::std::primitive::i32) - not a simple scalar
            return false;
        }
        if path.path.segments.len() != 1 {
            // Qualified path (e.g., std::primitive::i32) - not a simple scalar
            return false;
        }
        if let Some(segment) = path.path.segments.last() {
            if !segment.arguments.is_empty() {
                // Generic type (e.g., Vec<T>) - not a scalar
                return false;
            }
            let ident = &segment.ident;
            matches!(
                ident.to_string().as_str(),
                "i8" | "i16"
                    | "i32"
                    | "i64"
                    | "i128"
                    | "isize"
                    | "u8"
                    | "u16"
                    | "u32"
                    | "u64"
                    | "u128"
                    | "usize"
                    | "f32"
                    | "f64"
                    | "bool"
                    | "char"
            )
        } else {
            false
        }
    } else {
        false
    }
}

/// Checks if a type is syntactically string-like: `String`, or an `Option`,
/// `Vec`, or `Box` wrapping a string-like type (any nesting depth).
///
/// Undeclared fields of these types are generated as masking leaves so that
/// per-call overrides can reach them by field name.
///
/// This is intentionally conservative - qualified paths
/// (`std::string::String`), type aliases, and foreign string types are not
/// recognized; such fields need an explicit `#[mask(strategy = "...")]`
/// declaration to become leaves.
pub(crate) fn is_string_type(ty: &syn::Type) -> bool {
    let syn::Type::Path(path) = ty else {
        return false;
    };

    if path.path.leading_colon.is_some() || path.path.segments.len() != 1 {
        return false;
    }

    let Some(segment) = path.path.segments.first() else {
        return false;
    };

    if segment.ident == "String" {
        return segment.arguments.is_empty();
    }

    if segment.ident == "Option" || segment.ident == "Vec" || segment.ident == "Box" {
        let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
            return false;
        };
        if args.args.len() != 1 {
            return false;
        }
        let Some(syn::GenericArgument::Type(inner)) = args.args.first() else {
            return false;
        };
        return is_string_type(inner);
    }

    false
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    fn parse_type(tokens: proc_macro2::TokenStream) -> syn::Type {
        syn::parse2(tokens).expect("should parse as Type")
    }

    #[test]
    fn scalar_i32_detected() {
        let ty = parse_type(quote! { i32 });
        assert!(is_scalar_type(&ty));
    }

    #[test]
    fn scalar_bool_detected() {
        let ty = parse_type(quote! { bool });
        assert!(is_scalar_type(&ty));
    }

    #[test]
    fn string_is_not_scalar() {
        let ty = parse_type(quote! { String });
        assert!(!is_scalar_type(&ty));
    }

    #[test]
    fn qualified_path_is_not_scalar() {
        let ty = parse_type(quote! { std::primitive::i32 });
        assert!(!is_scalar_type(&ty));
    }

    #[test]
    fn string_type_detected() {
        let ty = parse_type(quote! { String });
        assert!(is_string_type(&ty));
    }

    #[test]
    fn wrapped_string_types_detected() {
        for tokens in [
            quote! { Option<String> },
            quote! { Vec<String> },
            quote! { Box<String> },
            quote! { Option<Vec<String>> },
        ] {
            let ty = parse_type(tokens);
            assert!(is_string_type(&ty));
        }
    }

    #[test]
    fn qualified_string_is_not_recognized() {
        let ty = parse_type(quote! { std::string::String });
        assert!(!is_string_type(&ty));
    }

    #[test]
    fn non_string_wrappers_are_not_recognized() {
        let ty = parse_type(quote! { Vec<u8> });
        assert!(!is_string_type(&ty));
        let ty = parse_type(quote! { Option<i32> });
        assert!(!is_string_type(&ty));
    }

    #[test]
    fn scalar_is_not_string_type() {
        let ty = parse_type(quote! { bool });
        assert!(!is_string_type(&ty));
    }
}
