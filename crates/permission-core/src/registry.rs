// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Pending continuation registry.
//!
//! Every generated dispatcher owns one process-wide [`ContinuationRegistry`]
//! in a `static`. It keeps two maps keyed by [`RequestCode`]:
//!
//! | Map | Filled by | Drained by |
//! |-----|-----------|------------|
//! | grant continuations | every entry point | completion with all grants |
//! | deny continuations | entry points with `#[on_denied]` | completion with any denial |
//!
//! Both maps live behind a single mutex. A completion removes both entries
//! for its code in one critical section, so a code resolves at most once and
//! no stale continuation survives its request. Continuations run after the
//! lock is released; they may call back into the dispatcher.

use std::{
    collections::BTreeMap,
    fmt,
    sync::{Mutex, MutexGuard, PoisonError}
};

use crate::{Completion, GrantResult, RequestCode};

/// Zero-argument deferred invocation.
///
/// Captures the host and the exact argument values of the original call.
pub type Continuation = Box<dyn FnOnce() + Send + 'static>;

struct Continuations {
    grant: BTreeMap<RequestCode, Continuation>,
    deny:  BTreeMap<RequestCode, Continuation>
}

/// Grant and deny continuation maps guarded by one lock.
///
/// Constructible in `const` context so generated code can keep it in a
/// `static`:
///
/// ```rust
/// use permission_core::{Completion, ContinuationRegistry, GrantResult, RequestCode};
///
/// static REGISTRY: ContinuationRegistry = ContinuationRegistry::new();
///
/// let code = RequestCode::new(0x99a);
/// REGISTRY.register(code, Box::new(|| println!("granted")), None);
///
/// let outcome = REGISTRY.complete(code, &["CAMERA"], &[GrantResult::Granted]);
/// assert_eq!(outcome, Completion::Granted);
/// assert!(!REGISTRY.is_pending(code));
/// ```
pub struct ContinuationRegistry {
    inner: Mutex<Continuations>
}

impl ContinuationRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Continuations {
                grant: BTreeMap::new(),
                deny:  BTreeMap::new()
            })
        }
    }

    /// Register the continuations for `code`.
    ///
    /// Replaces any pair still pending under the same code; a replaced deny
    /// continuation is dropped even when `deny` is `None`.
    pub fn register(&self, code: RequestCode, grant: Continuation, deny: Option<Continuation>) {
        let mut inner = self.lock();
        let replaced = inner.grant.insert(code, grant).is_some();
        match deny {
            Some(deny) => {
                inner.deny.insert(code, deny);
            }
            None => {
                inner.deny.remove(&code);
            }
        }
        drop(inner);

        if replaced {
            tracing::debug!(%code, "replaced pending permission request");
        } else {
            tracing::debug!(%code, "registered permission request");
        }
    }

    /// Deliver a platform result for `code`.
    ///
    /// `permissions[i]` and `grant_results[i]` correspond positionally; when
    /// the slices differ in length only the common prefix is inspected.
    ///
    /// Unknown codes (never registered, or already completed) are ignored
    /// and reported as [`Completion::Unknown`].
    pub fn complete<P: AsRef<str>>(
        &self,
        code: RequestCode,
        permissions: &[P],
        grant_results: &[GrantResult]
    ) -> Completion {
        let mut inner = self.lock();
        if !inner.grant.contains_key(&code) {
            drop(inner);
            tracing::trace!(%code, "ignoring result for unknown request code");
            return Completion::Unknown;
        }

        let not_granted: Vec<String> = permissions
            .iter()
            .zip(grant_results)
            .filter(|(_, result)| !result.is_granted())
            .map(|(permission, _)| permission.as_ref().to_string())
            .collect();

        let grant = inner.grant.remove(&code);
        let deny = inner.deny.remove(&code);
        drop(inner);

        if not_granted.is_empty() {
            tracing::debug!(%code, "permission request granted");
            if let Some(grant) = grant {
                grant();
            }
            Completion::Granted
        } else {
            tracing::debug!(%code, ?not_granted, "permission request denied");
            if let Some(deny) = deny {
                deny();
            }
            Completion::Denied {
                not_granted
            }
        }
    }

    /// Whether a request is awaiting its result under `code`.
    pub fn is_pending(&self, code: RequestCode) -> bool {
        self.lock().grant.contains_key(&code)
    }

    /// Number of requests awaiting a result.
    pub fn pending(&self) -> usize {
        self.lock().grant.len()
    }

    fn lock(&self) -> MutexGuard<'_, Continuations> {
        // Continuations never run under the lock, so a poisoned guard still
        // protects consistent maps.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ContinuationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ContinuationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("ContinuationRegistry")
            .field("grant", &inner.grant.keys().collect::<Vec<_>>())
            .field("deny", &inner.deny.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests;
