//! Ambient, thread-scoped mask policies.
//!
//! Explicit policy parameters are the primary interface; this adapter exists
//! for boundary call sites (middleware, serialization hooks) that cannot
//! thread a [`MaskPolicy`] through intermediate layers. A policy installed
//! with [`with_policy`] is visible to [`crate::MaskEngine::mask_scoped`] on
//! the same thread for the duration of the closure, and masking under it
//! produces exactly the result of passing the same policy explicitly.
//!
//! Scopes nest: the innermost policy wins, and the outer one is restored when
//! the scope ends, including on unwind.

use std::cell::RefCell;

use crate::masking::MaskPolicy;

thread_local! {
    static ACTIVE_POLICIES: RefCell<Vec<MaskPolicy>> = const { RefCell::new(Vec::new()) };
}

/// Pops the installed policy when the scope ends, on unwind included.
struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        ACTIVE_POLICIES.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Runs `f` with `policy` installed as the ambient policy for this thread.
///
/// ```ignore
/// use masker::{context, Mask, MaskEngine, MaskPolicy, Overrides};
///
/// #[derive(Mask)]
/// struct User {
///     #[mask(strategy = "full")]
///     password: String,
/// }
///
/// let engine = MaskEngine::new();
/// let policy = MaskPolicy::with_overrides(Overrides::new().set("password", "none"));
/// let mut user = User { password: "hunter2!".into() };
/// context::with_policy(policy, || engine.mask_scoped(&mut user));
/// assert_eq!(user.password, "hunter2!");
/// ```
pub fn with_policy<R>(policy: MaskPolicy, f: impl FnOnce() -> R) -> R {
    ACTIVE_POLICIES.with(|stack| stack.borrow_mut().push(policy));
    let _guard = ScopeGuard;
    f()
}

/// Returns the innermost ambient policy, or the default policy when no scope
/// is active on this thread.
#[must_use]
pub fn current_policy() -> MaskPolicy {
    ACTIVE_POLICIES
        .with(|stack| stack.borrow().last().cloned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masking::Overrides;

    #[test]
    fn no_scope_yields_default_policy() {
        let policy = current_policy();
        assert!(!policy.is_disabled());
        assert!(policy.overrides().is_empty());
    }

    #[test]
    fn scope_installs_and_restores() {
        let policy = MaskPolicy::with_overrides(Overrides::new().set("email", "none"));
        with_policy(policy, || {
            assert_eq!(current_policy().overrides().get("email"), Some("none"));
        });
        assert!(current_policy().overrides().is_empty());
    }

    #[test]
    fn scopes_nest_innermost_wins() {
        let outer = MaskPolicy::with_overrides(Overrides::new().set("email", "full"));
        let inner = MaskPolicy::disabled();
        with_policy(outer, || {
            with_policy(inner, || {
                assert!(current_policy().is_disabled());
            });
            assert!(!current_policy().is_disabled());
            assert_eq!(current_policy().overrides().get("email"), Some("full"));
        });
    }

    #[test]
    fn scope_is_restored_after_panic() {
        let result = std::panic::catch_unwind(|| {
            with_policy(MaskPolicy::disabled(), || panic!("boom"));
        });
        assert!(result.is_err());
        assert!(!current_policy().is_disabled());
    }
}
