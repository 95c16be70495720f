//! Debug-only reentrancy guard for the position index.
//!
//! The index is the one layer that calls user code (the key strategy)
//! while its table is being probed or rewritten. Calling back into the same
//! dictionary from inside a strategy method is a bug; in debug builds it
//! panics, naming the operation that was interrupted. In release builds the
//! guard compiles to nothing.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-index reentrancy tracker. Index methods start with
/// `let _g = self.reentrancy.enter("find");`.
#[derive(Debug)]
pub(crate) struct DebugReentrancy {
    #[cfg(debug_assertions)]
    active: Cell<Option<&'static str>>,
    // !Sync in every profile so the auto traits do not depend on the build.
    _unsync: PhantomData<Cell<()>>,
}

impl DebugReentrancy {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(None),
            _unsync: PhantomData,
        }
    }

    /// Enter a guarded section. In debug builds, panics if another section
    /// of the same index is still open.
    #[inline]
    #[cfg_attr(not(debug_assertions), allow(unused_variables))]
    pub(crate) fn enter(&self, operation: &'static str) -> ReentrancyGuard<'_> {
        #[cfg(debug_assertions)]
        {
            if let Some(outer) = self.active.get() {
                panic!(
                    "reentrancy detected: `{}` called while `{}` was in progress",
                    operation, outer
                );
            }
            self.active.set(Some(operation));
            return ReentrancyGuard { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            return ReentrancyGuard { _z: PhantomData };
        }
    }
}

impl Default for DebugReentrancy {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DebugReentrancy {
    // A clone starts outside any guarded section.
    fn clone(&self) -> Self {
        Self::new()
    }
}

/// RAII guard returned by `DebugReentrancy::enter`.
pub(crate) struct ReentrancyGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl<'a> Drop for ReentrancyGuard<'a> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            debug_assert!(self.owner.active.get().is_some());
            self.owner.active.set(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DebugReentrancy;

    #[test]
    fn sequential_sections_are_ok() {
        let r = DebugReentrancy::new();
        {
            let _g = r.enter("find");
        }
        let _g = r.enter("insert");
    }

    #[cfg(debug_assertions)]
    #[test]
    fn nested_entry_panics_with_both_operations() {
        let r = DebugReentrancy::new();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _outer = r.enter("find");
            let _inner = r.enter("insert");
        }));
        let payload = res.expect_err("expected reentrancy to panic in debug builds");
        let msg = payload
            .downcast_ref::<String>()
            .cloned()
            .unwrap_or_default();
        assert!(msg.contains("insert") && msg.contains("find"), "{}", msg);
    }

    #[cfg(debug_assertions)]
    #[test]
    fn guard_is_released_after_panic() {
        let r = DebugReentrancy::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _outer = r.enter("find");
            panic!("strategy failed");
        }));
        let _g = r.enter("find");
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn nested_entry_is_noop_in_release() {
        let r = DebugReentrancy::new();
        let _g1 = r.enter("find");
        let _g2 = r.enter("insert");
        let (_g1, _g2) = (_g1, _g2);
    }

    #[test]
    fn clone_starts_unentered() {
        let r = DebugReentrancy::new();
        let _g = r.enter("find");
        let c = r.clone();
        let _g2 = c.enter("find");
    }
}
