//! Named masking strategies and the catalog that owns them.
//!
//! Strategies are pure string transformations. They do not traverse structures
//! or decide which fields are sensitive; field declarations and overrides do
//! that. A strategy is looked up by name at the moment a field is masked, so
//! re-registering a name changes behavior for subsequent calls only.
//!
//! All built-in strategies operate on Unicode scalar values: "length" means
//! `chars().count()`, never bytes, and the masked output has the same number
//! of scalar values as the input (except `email`, which preserves the domain
//! verbatim).

use std::{collections::HashMap, sync::Arc};

/// A masking transform: a pure `string -> string` function.
///
/// Strategies must be `Send + Sync` because a catalog is shared across
/// concurrent masking calls once registration is complete.
pub type StrategyFn = dyn Fn(&str) -> String + Send + Sync;

/// Registry of named masking strategies.
///
/// Names are arbitrary strings; registering an existing name overwrites it
/// (last write wins) and nothing is ever removed. All registration must
/// happen before the catalog is shared with concurrent masking calls; the
/// `&mut self` registration methods let the borrow checker enforce that
/// ordering.
///
/// [`StrategyCatalog::with_builtins`] preloads the standard table:
///
/// | name | rule |
/// |------|------|
/// | `full`, `password`, `token` | every character replaced by `*` |
/// | `partial` | first 2 + `*`s + last 2 when longer than 4, else all `*` |
/// | `email` | first char of the local part + `*`s + `@domain` |
/// | `phone`, `creditcard` | `*`s + last 4 when longer than 4, else all `*` |
/// | `dob` | `****-**-` + last 2 for 10-char dates, else all `*` |
/// | `none` | identity |
///
/// plus the group aliases `PII`, `PHI`, `PCI`, `CREDENTIALS`, `FINANCIAL`,
/// and `GDPR` (see [`StrategyCatalog::register_alias`]).
#[derive(Clone)]
pub struct StrategyCatalog {
    strategies: HashMap<String, Arc<StrategyFn>>,
}

impl Default for StrategyCatalog {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl StrategyCatalog {
    /// Creates an empty catalog with no strategies registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Creates a catalog preloaded with the built-in strategies and group
    /// aliases.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        catalog.register("full", mask_full);
        catalog.register("password", mask_full);
        catalog.register("token", mask_full);
        catalog.register("partial", mask_partial);
        catalog.register("email", mask_email);
        catalog.register("phone", mask_keep_last_four);
        catalog.register("creditcard", mask_keep_last_four);
        catalog.register("dob", mask_dob);
        catalog.register("none", mask_none);
        catalog.register_alias("PII", "partial");
        catalog.register_alias("PHI", "dob");
        catalog.register_alias("PCI", "creditcard");
        catalog.register_alias("CREDENTIALS", "full");
        catalog.register_alias("FINANCIAL", "partial");
        catalog.register_alias("GDPR", "full");
        catalog
    }

    /// Installs or overwrites the strategy registered under `name`.
    ///
    /// There are no constraints on the name format.
    pub fn register<F>(&mut self, name: impl Into<String>, transform: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.strategies.insert(name.into(), Arc::new(transform));
    }

    /// Binds `alias` to the *current* transform registered under `target`.
    ///
    /// The binding is by value: re-registering `target` afterwards does not
    /// change what `alias` resolves to. Returns `false` and installs nothing
    /// when `target` is not registered.
    pub fn register_alias(&mut self, alias: impl Into<String>, target: &str) -> bool {
        match self.strategies.get(target) {
            Some(transform) => {
                let transform = Arc::clone(transform);
                self.strategies.insert(alias.into(), transform);
                true
            }
            None => false,
        }
    }

    /// Resolves a strategy name to its transform.
    ///
    /// An unknown name is not an error at this layer; the engine degrades it
    /// to a no-op on the field being masked.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&StrategyFn> {
        self.strategies.get(name).map(|strategy| strategy.as_ref())
    }

    /// Returns whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    /// Returns the number of registered strategies, aliases included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns whether the catalog has no strategies at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl std::fmt::Debug for StrategyCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("StrategyCatalog")
            .field("strategies", &names)
            .finish()
    }
}

/// Replaces every character with `*`, preserving length.
fn mask_full(value: &str) -> String {
    "*".repeat(value.chars().count())
}

/// Keeps the first two and last two characters when the value is longer than
/// four characters; otherwise masks everything.
///
/// Length exactly 4 falls to the fully-masked branch.
fn mask_partial(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let total = chars.len();
    if total > 4 {
        let prefix: String = chars[..2].iter().collect();
        let suffix: String = chars[total - 2..].iter().collect();
        format!("{prefix}{}{suffix}", "*".repeat(total - 4))
    } else {
        "*".repeat(total)
    }
}

/// Keeps the first character of the local part and the domain, masking the
/// remainder of the local part.
///
/// Values that do not split into exactly two parts on `@` are fully masked.
/// An empty local part contributes zero mask characters.
fn mask_email(value: &str) -> String {
    let parts: Vec<&str> = value.split('@').collect();
    match parts.as_slice() {
        [local, domain] => {
            let mut chars = local.chars();
            match chars.next() {
                Some(first) => {
                    let hidden = chars.count();
                    format!("{first}{}@{domain}", "*".repeat(hidden))
                }
                None => format!("@{domain}"),
            }
        }
        _ => mask_full(value),
    }
}

/// Keeps the last four characters when the value is longer than four
/// characters; otherwise masks everything.
///
/// Length exactly 4 falls to the fully-masked branch.
fn mask_keep_last_four(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let total = chars.len();
    if total > 4 {
        let suffix: String = chars[total - 4..].iter().collect();
        format!("{}{suffix}", "*".repeat(total - 4))
    } else {
        "*".repeat(total)
    }
}

/// Masks a `YYYY-MM-DD` date down to its day component.
///
/// Values that are not exactly ten characters are fully masked.
fn mask_dob(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() == 10 {
        let day: String = chars[8..].iter().collect();
        format!("****-**-{day}")
    } else {
        "*".repeat(chars.len())
    }
}

/// Identity transform.
fn mask_none(value: &str) -> String {
    value.to_string()
}
