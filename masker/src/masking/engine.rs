//! Application layer: override resolution and the masking entry points.
//!
//! The engine composes the pieces defined elsewhere in this module tree:
//! the [`StrategyCatalog`] resolves names to transforms, the traversal
//! (derived or provided for std containers) visits fields, and the
//! [`FieldMasker`] implementation here decides what happens at each field.
//!
//! ## Per-field decision
//!
//! Evaluated in strict priority order, first match wins:
//!
//! 1. disable flag set → the call is a no-op, traversal never starts
//! 2. override for the field's exact name:
//!    - `"none"` → leave unmodified (and do not descend), stop
//!    - a registered strategy, string leaf → apply it, stop
//!    - an unregistered strategy → leave unmodified, stop
//! 3. declared `#[mask(strategy = "...")]` naming a registered strategy →
//!    apply it, stop
//! 4. otherwise → recurse into nested structure; undeclared string leaves
//!    stay unmodified
//!
//! Unknown strategy names are degraded behavior, not errors: the field is
//! left as-is and the walk continues.

use std::collections::HashMap;

use super::strategy::StrategyCatalog;
use super::traverse::{MaskValue, Maskable};

/// Override sentinel that suppresses masking for a field.
///
/// Distinct from the registered `none` *strategy*: the sentinel is matched
/// before any catalog lookup and also stops descent into structure-valued
/// fields.
pub const OVERRIDE_NONE: &str = "none";

/// Per-call field overrides: exact field name to strategy name.
///
/// An entry takes priority over the field's declared strategy. The value is
/// either [`OVERRIDE_NONE`] or the name of a strategy expected to be in the
/// engine's catalog; unregistered names leave the field unmodified.
///
/// Field names are matched exactly and un-dotted. The same override set flows
/// through the whole walk, so a nested field whose name appears here is
/// matched as well; there is no way to target one occurrence by path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    fields: HashMap<String, String>,
}

impl Overrides {
    /// Creates an empty override set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Adds an override, builder style.
    #[must_use]
    pub fn set(mut self, field: impl Into<String>, strategy: impl Into<String>) -> Self {
        self.insert(field, strategy);
        self
    }

    /// Adds an override in place.
    pub fn insert(&mut self, field: impl Into<String>, strategy: impl Into<String>) {
        self.fields.insert(field.into(), strategy.into());
    }

    /// Looks up the override for a field name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Returns whether the set holds no overrides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of overridden fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl<F, S> FromIterator<(F, S)> for Overrides
where
    F: Into<String>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (F, S)>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for (field, strategy) in iter {
            overrides.insert(field, strategy);
        }
        overrides
    }
}

/// The policy governing one masking call: overrides plus the disable flag.
///
/// A policy can be passed explicitly to [`MaskEngine::mask_with_policy`] or
/// installed ambiently via [`crate::context::with_policy`] for boundary call
/// sites that cannot thread parameters; both produce identical results.
#[derive(Clone, Debug, Default)]
pub struct MaskPolicy {
    overrides: Overrides,
    disable_masking: bool,
}

impl MaskPolicy {
    /// Creates the default policy: no overrides, masking enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a policy carrying the given overrides.
    #[must_use]
    pub fn with_overrides(overrides: Overrides) -> Self {
        Self {
            overrides,
            disable_masking: false,
        }
    }

    /// Creates a policy with masking disabled entirely.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            overrides: Overrides::new(),
            disable_masking: true,
        }
    }

    /// Turns off masking for this policy, builder style.
    #[must_use]
    pub fn disable(mut self) -> Self {
        self.disable_masking = true;
        self
    }

    /// The override set carried by this policy.
    #[must_use]
    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Whether this policy suppresses masking entirely.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disable_masking
    }
}

// =============================================================================
// FieldMasker - the per-field decision seam
// =============================================================================

/// Per-field decisions consulted by the traversal.
///
/// The code generated by `#[derive(Mask)]` calls into this trait at every
/// field: [`FieldMasker::mask_field`] for string-like leaves and
/// [`FieldMasker::descend`] to gate recursion into nested structures. The
/// engine provides the implementation; it is a trait so generated code stays
/// decoupled from the engine's internals.
pub trait FieldMasker {
    /// Resolves and applies the strategy (if any) for a string-valued field.
    ///
    /// `declared` carries the field's `#[mask(strategy = "...")]` name, or
    /// `None` for an undeclared string leaf that only overrides can reach.
    fn mask_field<V: MaskValue>(&self, field: &str, declared: Option<&str>, value: &mut V);

    /// Decides whether the walk descends into a structure-valued field.
    fn descend(&self, field: &str) -> bool;
}

/// One masking pass: a catalog to resolve strategies against and the
/// override set in effect. The disable flag is handled before a run is
/// constructed, so it does not appear here.
struct MaskRun<'a> {
    catalog: &'a StrategyCatalog,
    overrides: &'a Overrides,
}

impl FieldMasker for MaskRun<'_> {
    fn mask_field<V: MaskValue>(&self, field: &str, declared: Option<&str>, value: &mut V) {
        match self.overrides.get(field) {
            // Sentinel: leave the field untouched, do not fall back to the tag.
            Some(OVERRIDE_NONE) => {}
            Some(name) => {
                // Unregistered override names degrade to a no-op.
                if let Some(strategy) = self.catalog.resolve(name) {
                    value.apply_transform(strategy);
                }
            }
            None => {
                if let Some(tag) = declared {
                    // Unregistered tags degrade to a no-op as well.
                    if let Some(strategy) = self.catalog.resolve(tag) {
                        value.apply_transform(strategy);
                    }
                }
            }
        }
    }

    fn descend(&self, field: &str) -> bool {
        // "none" suppresses the whole subtree; a strategy-naming override on
        // a structure-valued field cannot apply and does not block recursion.
        self.overrides.get(field) != Some(OVERRIDE_NONE)
    }
}

// =============================================================================
// MaskEngine - public operations
// =============================================================================

/// The masking engine: a strategy catalog plus the public operations.
///
/// The catalog is owned by the engine rather than being process-global, so
/// separate configurations (and tests) stay isolated. Registration takes
/// `&mut self` while masking takes `&self`; the borrow checker therefore
/// enforces the contract that all registration happens before the engine is
/// shared with concurrent masking calls.
///
/// ```ignore
/// use masker::{Mask, MaskEngine, Overrides};
///
/// #[derive(Mask)]
/// struct User {
///     #[mask(strategy = "email")]
///     email: String,
///     #[mask(strategy = "full")]
///     password: String,
/// }
///
/// let engine = MaskEngine::new();
/// let mut user = User {
///     email: "john.doe@example.com".into(),
///     password: "hunter2!".into(),
/// };
/// engine.mask(&mut user);
/// assert_eq!(user.email, "j*******@example.com");
/// assert_eq!(user.password, "********");
/// ```
#[derive(Clone, Debug)]
pub struct MaskEngine {
    catalog: StrategyCatalog,
}

impl Default for MaskEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskEngine {
    /// Creates an engine with the built-in strategy catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: StrategyCatalog::with_builtins(),
        }
    }

    /// Creates an engine around an explicitly constructed catalog.
    #[must_use]
    pub fn with_catalog(catalog: StrategyCatalog) -> Self {
        Self { catalog }
    }

    /// Installs or overwrites a strategy in the engine's catalog.
    pub fn register<F>(&mut self, name: impl Into<String>, transform: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.catalog.register(name, transform);
    }

    /// Binds an alias to another strategy's current behavior.
    ///
    /// Returns `false` when the target is not registered.
    pub fn register_alias(&mut self, alias: impl Into<String>, target: &str) -> bool {
        self.catalog.register_alias(alias, target)
    }

    /// Read access to the engine's catalog.
    #[must_use]
    pub fn catalog(&self) -> &StrategyCatalog {
        &self.catalog
    }

    /// Masks `value` in place using declared strategies only.
    pub fn mask<T: Maskable>(&self, value: &mut T) {
        self.mask_with_policy(value, &MaskPolicy::new());
    }

    /// Masks `value` in place, with `overrides` taking priority over the
    /// declared strategies.
    pub fn mask_with_overrides<T: Maskable>(&self, value: &mut T, overrides: &Overrides) {
        let run = MaskRun {
            catalog: &self.catalog,
            overrides,
        };
        value.mask_with(&run);
    }

    /// Masks `value` in place under an explicit policy.
    ///
    /// This is the primitive the other entry points are defined in terms of.
    /// A disabled policy returns before traversal begins.
    pub fn mask_with_policy<T: Maskable>(&self, value: &mut T, policy: &MaskPolicy) {
        if policy.is_disabled() {
            return;
        }
        self.mask_with_overrides(value, policy.overrides());
    }

    /// Returns a masked copy of `value`, leaving the original untouched.
    pub fn mask_copy<T>(&self, value: &T, overrides: &Overrides) -> T
    where
        T: Maskable + Clone,
    {
        let mut copy = value.clone();
        self.mask_with_overrides(&mut copy, overrides);
        copy
    }

    /// Masks `value` in place under the ambient policy installed by
    /// [`crate::context::with_policy`], or the default policy when none is
    /// installed.
    ///
    /// Produces exactly the result of passing the same policy to
    /// [`MaskEngine::mask_with_policy`].
    pub fn mask_scoped<T: Maskable>(&self, value: &mut T) {
        let policy = crate::context::current_policy();
        self.mask_with_policy(value, &policy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mask;

    #[derive(Clone, Mask)]
    struct Account {
        #[mask(strategy = "email")]
        email: String,
        #[mask(strategy = "phone")]
        phone: String,
        nickname: String,
        login_count: u32,
    }

    fn account() -> Account {
        Account {
            email: "john.doe@example.com".to_string(),
            phone: "9876543210".to_string(),
            nickname: "johnny".to_string(),
            login_count: 42,
        }
    }

    #[test]
    fn declared_strategies_apply() {
        let engine = MaskEngine::new();
        let mut acct = account();
        engine.mask(&mut acct);
        assert_eq!(acct.email, "j*******@example.com");
        assert_eq!(acct.phone, "******3210");
        assert_eq!(acct.nickname, "johnny");
        assert_eq!(acct.login_count, 42);
    }

    #[test]
    fn override_takes_priority_over_tag() {
        let engine = MaskEngine::new();
        let mut acct = account();
        let overrides = Overrides::new().set("email", "full");
        engine.mask_with_overrides(&mut acct, &overrides);
        assert_eq!(acct.email, "********************");
        assert_eq!(acct.phone, "******3210");
    }

    #[test]
    fn none_sentinel_suppresses_tagged_field() {
        let engine = MaskEngine::new();
        let mut acct = account();
        let overrides = Overrides::new().set("email", OVERRIDE_NONE);
        engine.mask_with_overrides(&mut acct, &overrides);
        assert_eq!(acct.email, "john.doe@example.com");
        assert_eq!(acct.phone, "******3210");
    }

    #[test]
    fn unregistered_override_leaves_field_unmodified() {
        let engine = MaskEngine::new();
        let mut acct = account();
        let overrides = Overrides::new().set("email", "no-such-strategy");
        engine.mask_with_overrides(&mut acct, &overrides);
        // The override matched, so the tag is never consulted.
        assert_eq!(acct.email, "john.doe@example.com");
    }

    #[test]
    fn override_reaches_undeclared_string_field() {
        let engine = MaskEngine::new();
        let mut acct = account();
        let overrides = Overrides::new().set("nickname", "full");
        engine.mask_with_overrides(&mut acct, &overrides);
        assert_eq!(acct.nickname, "******");
    }

    #[test]
    fn disabled_policy_is_a_no_op() {
        let engine = MaskEngine::new();
        let mut acct = account();
        let policy = MaskPolicy::with_overrides(Overrides::new().set("email", "full")).disable();
        engine.mask_with_policy(&mut acct, &policy);
        assert_eq!(acct.email, "john.doe@example.com");
        assert_eq!(acct.phone, "9876543210");
    }

    #[test]
    fn mask_copy_leaves_original_untouched() {
        let engine = MaskEngine::new();
        let acct = account();
        let masked = engine.mask_copy(&acct, &Overrides::new());
        assert_eq!(acct.email, "john.doe@example.com");
        assert_eq!(acct.phone, "9876543210");
        assert_eq!(masked.email, "j*******@example.com");
        assert_eq!(masked.phone, "******3210");
        assert_eq!(masked.nickname, "johnny");
    }

    #[test]
    fn unregistered_tag_degrades_to_no_op() {
        #[derive(Mask)]
        struct Record {
            #[mask(strategy = "not-registered")]
            value: String,
        }

        let engine = MaskEngine::new();
        let mut record = Record {
            value: "visible".to_string(),
        };
        engine.mask(&mut record);
        assert_eq!(record.value, "visible");
    }

    #[test]
    fn custom_registration_applies_to_tagged_field() {
        #[derive(Mask)]
        struct Record {
            #[mask(strategy = "vowels")]
            value: String,
        }

        let mut engine = MaskEngine::new();
        engine.register("vowels", |s| {
            s.chars()
                .map(|c| if "aeiou".contains(c) { '*' } else { c })
                .collect()
        });

        let mut record = Record {
            value: "sensitive".to_string(),
        };
        engine.mask(&mut record);
        assert_eq!(record.value, "s*ns*t*v*");
    }

    #[test]
    fn empty_catalog_engine_masks_nothing() {
        let engine = MaskEngine::with_catalog(StrategyCatalog::new());
        let mut acct = account();
        engine.mask(&mut acct);
        assert_eq!(acct.email, "john.doe@example.com");
    }
}
