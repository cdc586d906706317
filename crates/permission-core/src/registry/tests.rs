// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tests for the continuation registry.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering}
};

use pretty_assertions::assert_eq;

use super::*;

fn counter() -> (Arc<AtomicUsize>, Continuation) {
    let count = Arc::new(AtomicUsize::new(0));
    let captured = Arc::clone(&count);
    let continuation: Continuation = Box::new(move || {
        captured.fetch_add(1, Ordering::SeqCst);
    });
    (count, continuation)
}

const CODE: RequestCode = RequestCode::new(0x99a);

#[test]
fn all_granted_runs_grant_once() {
    let registry = ContinuationRegistry::new();
    let (granted, grant) = counter();
    let (denied, deny) = counter();
    registry.register(CODE, grant, Some(deny));

    let outcome = registry.complete(
        CODE,
        &["WRITE_STORAGE", "READ_CONTACTS"],
        &[GrantResult::Granted, GrantResult::Granted]
    );

    assert_eq!(outcome, Completion::Granted);
    assert_eq!(granted.load(Ordering::SeqCst), 1);
    assert_eq!(denied.load(Ordering::SeqCst), 0);
}

#[test]
fn partial_denial_runs_deny_only() {
    let registry = ContinuationRegistry::new();
    let (granted, grant) = counter();
    let (denied, deny) = counter();
    registry.register(CODE, grant, Some(deny));

    let outcome = registry.complete(
        CODE,
        &["WRITE_STORAGE", "READ_CONTACTS"],
        &[GrantResult::Granted, GrantResult::Denied]
    );

    assert_eq!(
        outcome,
        Completion::Denied {
            not_granted: vec!["READ_CONTACTS".to_string()]
        }
    );
    assert_eq!(granted.load(Ordering::SeqCst), 0);
    assert_eq!(denied.load(Ordering::SeqCst), 1);
}

#[test]
fn denial_without_deny_continuation_purges_grant() {
    let registry = ContinuationRegistry::new();
    let (granted, grant) = counter();
    registry.register(CODE, grant, None);

    let outcome = registry.complete(CODE, &["CAMERA"], &[GrantResult::Denied]);
    assert!(outcome.is_denied());
    assert!(!registry.is_pending(CODE));

    // A later all-granted delivery bearing the same code must not resurrect
    // the purged grant continuation.
    let again = registry.complete(CODE, &["CAMERA"], &[GrantResult::Granted]);
    assert_eq!(again, Completion::Unknown);
    assert_eq!(granted.load(Ordering::SeqCst), 0);
}

#[test]
fn second_completion_is_noop() {
    let registry = ContinuationRegistry::new();
    let (granted, grant) = counter();
    let (denied, deny) = counter();
    registry.register(CODE, grant, Some(deny));

    assert_eq!(
        registry.complete(CODE, &["CAMERA"], &[GrantResult::Granted]),
        Completion::Granted
    );
    assert_eq!(
        registry.complete(CODE, &["CAMERA"], &[GrantResult::Denied]),
        Completion::Unknown
    );
    assert_eq!(granted.load(Ordering::SeqCst), 1);
    assert_eq!(denied.load(Ordering::SeqCst), 0);
    assert_eq!(registry.pending(), 0);
}

#[test]
fn unknown_code_is_ignored() {
    let registry = ContinuationRegistry::new();
    let (granted, grant) = counter();
    registry.register(CODE, grant, None);

    let outcome = registry.complete(
        RequestCode::new(7),
        &["CAMERA"],
        &[GrantResult::Granted]
    );

    assert_eq!(outcome, Completion::Unknown);
    assert!(registry.is_pending(CODE));
    assert_eq!(granted.load(Ordering::SeqCst), 0);
}

#[test]
fn mismatched_lengths_use_shorter_bound() {
    let registry = ContinuationRegistry::new();
    let (granted, grant) = counter();
    registry.register(CODE, grant, None);

    // The trailing permission has no result and is not inspected.
    let outcome = registry.complete(CODE, &["A", "B"], &[GrantResult::Granted]);
    assert_eq!(outcome, Completion::Granted);
    assert_eq!(granted.load(Ordering::SeqCst), 1);
}

#[test]
fn not_granted_preserves_request_order() {
    let registry = ContinuationRegistry::new();
    let (_, grant) = counter();
    registry.register(CODE, grant, None);

    let outcome = registry.complete(
        CODE,
        &["A".to_string(), "B".to_string(), "C".to_string()],
        &[GrantResult::Denied, GrantResult::Granted, GrantResult::Denied]
    );
    assert_eq!(
        outcome,
        Completion::Denied {
            not_granted: vec!["A".to_string(), "C".to_string()]
        }
    );
}

#[test]
fn reregistration_replaces_pending_pair() {
    let registry = ContinuationRegistry::new();
    let (first, first_grant) = counter();
    let (stale_deny_count, stale_deny) = counter();
    let (second, second_grant) = counter();

    registry.register(CODE, first_grant, Some(stale_deny));
    registry.register(CODE, second_grant, None);
    assert_eq!(registry.pending(), 1);

    let outcome = registry.complete(CODE, &["CAMERA"], &[GrantResult::Denied]);
    assert!(outcome.is_denied());
    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert_eq!(second.load(Ordering::SeqCst), 0);
    assert_eq!(stale_deny_count.load(Ordering::SeqCst), 0);
}

#[test]
fn continuation_may_reenter_registry() {
    static REGISTRY: ContinuationRegistry = ContinuationRegistry::new();
    let next = RequestCode::new(0x99b);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&seen);
    REGISTRY.register(
        CODE,
        Box::new(move || {
            log.lock().unwrap().push("first");
            let inner_log = Arc::clone(&log);
            REGISTRY.register(
                next,
                Box::new(move || inner_log.lock().unwrap().push("second")),
                None
            );
        }),
        None
    );

    assert!(REGISTRY.complete(CODE, &["A"], &[GrantResult::Granted]).is_granted());
    assert!(REGISTRY.is_pending(next));
    assert!(REGISTRY.complete(next, &["A"], &[GrantResult::Granted]).is_granted());
    assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
}

#[test]
fn concurrent_completions_resolve_once() {
    let registry = Arc::new(ContinuationRegistry::new());
    let (granted, grant) = counter();
    registry.register(CODE, grant, None);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || registry.complete(CODE, &["A"], &[GrantResult::Granted]))
        })
        .collect();

    let known = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(Completion::is_known)
        .count();

    assert_eq!(known, 1);
    assert_eq!(granted.load(Ordering::SeqCst), 1);
}

#[test]
fn debug_lists_pending_codes() {
    let registry = ContinuationRegistry::default();
    let (_, grant) = counter();
    registry.register(CODE, grant, None);
    let rendered = format!("{registry:?}");
    assert!(rendered.contains("ContinuationRegistry"));
    assert!(rendered.contains("0x99a") || rendered.contains("2458"));
}
