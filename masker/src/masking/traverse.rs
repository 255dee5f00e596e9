//! Domain layer: types that contain or are maskable data.
//!
//! This module defines the two traits the traversal is built on:
//!
//! - [`Maskable`]: types that *contain* maskable strings (structs, enums,
//!   containers) and are walked field by field
//! - [`MaskValue`]: string-like payloads that *are* masking targets
//!
//! ## Field Handling
//!
//! The derive macro generates different code based on field declarations:
//!
//! | Declaration | Generated Code | Behavior |
//! |-------------|----------------|----------|
//! | None, string-like type | `mask_field` with no tag | Override-reachable leaf |
//! | None, other type | Pass through | Field unchanged (external types work) |
//! | `#[mask]` | `Maskable::mask_with` behind `descend` | Walk the nested value |
//! | `#[mask(strategy = "...")]` | `mask_field` with the tag | Declared masking leaf |
//!
//! ## Container Implementations
//!
//! `Maskable` is implemented for common std containers (`Option`, `Result`,
//! `Vec`, `Box`, maps, sets). Walking a container recurses into its contents;
//! map keys are never visited. The walk mutates in place, so sets (whose
//! elements cannot be mutated behind the hash) are drained and rebuilt.
//!
//! ## External Types
//!
//! External types (like `chrono::DateTime`) don't implement `Maskable`, and
//! that's fine: fields without a `#[mask]` declaration pass through
//! unchanged, so external types work automatically.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    hash::Hash,
    mem,
};

use super::engine::FieldMasker;
use super::strategy::StrategyFn;

// =============================================================================
// MaskValue - Types that ARE masking targets (leaf values)
// =============================================================================

/// String-like payloads a strategy can be applied to.
///
/// The engine treats these values as strings for the purpose of strategy
/// application: applying a transform replaces each contained string with the
/// transform's output and never changes the value's type or shape. Wrapper
/// implementations (`Option`, `Vec`, `Box`, maps) forward to every string
/// they contain, so a single declared field like `Vec<String>` masks each
/// element independently.
///
/// ## Relationship with `Maskable`
///
/// - `MaskValue`: a type that *is* maskable data (`String`, wrappers of it)
/// - `Maskable`: a type that *contains* maskable data (structs, enums)
///
/// Use `#[mask(strategy = "...")]` on fields of `MaskValue` types. Use bare
/// `#[mask]` on fields of `Maskable` types to walk into them.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `MaskValue`",
    label = "this type cannot have a masking strategy applied directly",
    note = "strategy declarations like `#[mask(strategy = \"partial\")]` are for string-like fields (String, Option<String>, ...)",
    note = "if `{Self}` is a struct that derives `Mask`, use bare `#[mask]` instead to walk into it"
)]
pub trait MaskValue {
    /// Applies `transform` to every string contained in this value.
    fn apply_transform(&mut self, transform: &StrategyFn);
}

impl MaskValue for String {
    fn apply_transform(&mut self, transform: &StrategyFn) {
        *self = transform(self);
    }
}

impl MaskValue for Cow<'_, str> {
    fn apply_transform(&mut self, transform: &StrategyFn) {
        *self = Cow::Owned(transform(self));
    }
}

impl<T> MaskValue for Option<T>
where
    T: MaskValue,
{
    fn apply_transform(&mut self, transform: &StrategyFn) {
        if let Some(value) = self {
            value.apply_transform(transform);
        }
    }
}

impl<T> MaskValue for Vec<T>
where
    T: MaskValue,
{
    fn apply_transform(&mut self, transform: &StrategyFn) {
        for value in self {
            value.apply_transform(transform);
        }
    }
}

impl<T> MaskValue for Box<T>
where
    T: MaskValue,
{
    fn apply_transform(&mut self, transform: &StrategyFn) {
        self.as_mut().apply_transform(transform);
    }
}

impl<K, V, S> MaskValue for HashMap<K, V, S>
where
    V: MaskValue,
{
    fn apply_transform(&mut self, transform: &StrategyFn) {
        for value in self.values_mut() {
            value.apply_transform(transform);
        }
    }
}

impl<K, V> MaskValue for BTreeMap<K, V>
where
    V: MaskValue,
{
    fn apply_transform(&mut self, transform: &StrategyFn) {
        for value in self.values_mut() {
            value.apply_transform(transform);
        }
    }
}

// =============================================================================
// Maskable - Types that CONTAIN maskable data (containers)
// =============================================================================

/// A type that contains maskable data and can be traversed in place.
///
/// This trait is implemented by types that derive `Mask`. The generated walk
/// visits fields in declaration order and consults the [`FieldMasker`] at
/// each one, so the same value can be masked under different policies.
///
/// ## When to use
///
/// - Structs/enums containing maskable fields should derive `Mask`
/// - Use bare `#[mask]` on fields to walk into nested `Maskable` values
/// - Use `#[mask(strategy = "...")]` on string-like leaf fields
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Maskable`",
    label = "this type cannot be walked for maskable data",
    note = "use `#[derive(Mask)]` on the type definition",
    note = "or use `#[mask(strategy = \"...\")]` if this is a string-like leaf field"
)]
pub trait Maskable {
    /// Walks this value, masking fields in place as the masker decides.
    fn mask_with<M: FieldMasker>(&mut self, masker: &M);
}

// =============================================================================
// Maskable implementations for standard library types
// =============================================================================

macro_rules! impl_maskable_passthrough {
    ($ty:ty) => {
        impl Maskable for $ty {
            fn mask_with<M: FieldMasker>(&mut self, _masker: &M) {}
        }
    };
}

impl_maskable_passthrough!(String);
impl_maskable_passthrough!(bool);
impl_maskable_passthrough!(char);
impl_maskable_passthrough!(i8);
impl_maskable_passthrough!(i16);
impl_maskable_passthrough!(i32);
impl_maskable_passthrough!(i64);
impl_maskable_passthrough!(i128);
impl_maskable_passthrough!(isize);
impl_maskable_passthrough!(u8);
impl_maskable_passthrough!(u16);
impl_maskable_passthrough!(u32);
impl_maskable_passthrough!(u64);
impl_maskable_passthrough!(u128);
impl_maskable_passthrough!(usize);
impl_maskable_passthrough!(f32);
impl_maskable_passthrough!(f64);
impl_maskable_passthrough!(());

impl Maskable for Cow<'_, str> {
    fn mask_with<M: FieldMasker>(&mut self, _masker: &M) {}
}

impl<T> Maskable for Option<T>
where
    T: Maskable,
{
    fn mask_with<M: FieldMasker>(&mut self, masker: &M) {
        if let Some(value) = self {
            value.mask_with(masker);
        }
    }
}

impl<T, E> Maskable for Result<T, E>
where
    T: Maskable,
    E: Maskable,
{
    fn mask_with<M: FieldMasker>(&mut self, masker: &M) {
        match self {
            Ok(value) => value.mask_with(masker),
            Err(err) => err.mask_with(masker),
        }
    }
}

impl<T> Maskable for Vec<T>
where
    T: Maskable,
{
    fn mask_with<M: FieldMasker>(&mut self, masker: &M) {
        for value in self {
            value.mask_with(masker);
        }
    }
}

impl<T> Maskable for Box<T>
where
    T: Maskable,
{
    fn mask_with<M: FieldMasker>(&mut self, masker: &M) {
        self.as_mut().mask_with(masker);
    }
}

impl<K, V, S> Maskable for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Maskable,
{
    fn mask_with<M: FieldMasker>(&mut self, masker: &M) {
        for value in self.values_mut() {
            value.mask_with(masker);
        }
    }
}

impl<K, V> Maskable for BTreeMap<K, V>
where
    K: Ord,
    V: Maskable,
{
    fn mask_with<M: FieldMasker>(&mut self, masker: &M) {
        for value in self.values_mut() {
            value.mask_with(masker);
        }
    }
}

impl<T, S> Maskable for HashSet<T, S>
where
    T: Maskable + Hash + Eq,
    S: std::hash::BuildHasher + Clone,
{
    fn mask_with<M: FieldMasker>(&mut self, masker: &M) {
        // Set elements cannot be mutated behind the hash: drain and rebuild.
        let hasher = self.hasher().clone();
        let drained = mem::replace(self, HashSet::with_hasher(hasher));
        self.extend(drained.into_iter().map(|mut value| {
            value.mask_with(masker);
            value
        }));
    }
}

impl<T> Maskable for BTreeSet<T>
where
    T: Maskable + Ord,
{
    fn mask_with<M: FieldMasker>(&mut self, masker: &M) {
        let drained = mem::take(self);
        self.extend(drained.into_iter().map(|mut value| {
            value.mask_with(masker);
            value
        }));
    }
}
