//! Declarative field masking for structured data.
//!
//! This crate separates:
//! - **Strategy**: how a sensitive string is transformed (named, registered).
//! - **Declaration**: which fields carry which strategy (`#[mask(...)]`).
//! - **Policy**: per-call overrides and the disable flag.
//!
//! The derive macro generates an in-place walk over your data; the
//! [`MaskEngine`] applies strategies at each field when you call `mask()`
//! (or one of its override/policy/copy variants).
//!
//! Key rules:
//! - Use `#[mask(strategy = "name")]` for string-like leaf fields.
//! - Use bare `#[mask]` for nested `Maskable` structures.
//! - Undeclared `String` fields stay unmodified but remain reachable by
//!   per-call overrides keyed on the field name.
//! - Unannotated fields of other types pass through unchanged.
//! - Overrides beat declarations; the `"none"` sentinel suppresses a field
//!   (subtree included); a disabled policy makes the whole call a no-op.
//! - Unknown strategy names are degraded behavior, not errors: the field is
//!   left unmodified.
//! - `Debug` prints `"[MASKED]"` for declared fields; strategies apply only
//!   when calling the engine.
//!
//! What this crate does:
//! - defines the strategy catalog, built-in strategies, and group aliases
//! - defines the traversal traits and the override-resolution engine
//! - provides integrations behind feature flags (e.g. `slog`)
//!
//! What it does not do:
//! - perform I/O or logging
//! - detect sensitive data from content; masking is always declared
//!
//! The `Mask` derive macro lives in `masker-derive` and is re-exported here.

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
    clippy::option_if_let_else,
    clippy::from_over_into
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use masker_derive::Mask;

// Module declarations
pub mod context;
mod masking;
#[cfg(feature = "slog")]
pub mod slog;

// Re-exports
pub use masking::{
    MaskEngine, MaskPolicy, MaskValue, Maskable, Overrides, StrategyCatalog, StrategyFn,
    OVERRIDE_NONE,
};
#[doc(hidden)]
pub use masking::FieldMasker;
