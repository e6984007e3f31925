//! Lock and condition variable vocabulary used by the queues.
//!
//! The names follow the foundation primitives: a [`CondVarMutex`] owns the
//! guarded state and one or more [`CondVar`]s are only ever waited on with
//! that mutex's guard.
//!
//! The `*_recover` helpers unwrap a [`LockResult`] by taking the guard out of
//! a [`std::sync::PoisonError`]. They are only sound for state whose critical
//! sections cannot be observed half-done, which holds for every queue in
//! this crate since each critical section is a single push or pop.

use std::sync::LockResult;
use std::time::Duration;

pub use std::sync::{Condvar as CondVar, Mutex as CondVarMutex, MutexGuard as CondVarMutexGuard};

/// Locks `mutex`, recovering the guard if a previous holder panicked.
#[inline]
pub fn lock_recover<T>(mutex: &CondVarMutex<T>) -> CondVarMutexGuard<'_, T> {
    recover(mutex.lock())
}

/// Parks on `condvar`, atomically releasing `guard`, and reacquires it on wake.
#[inline]
pub fn wait_recover<'a, T>(
    condvar: &CondVar,
    guard: CondVarMutexGuard<'a, T>,
) -> CondVarMutexGuard<'a, T> {
    recover(condvar.wait(guard))
}

/// Like [`wait_recover`] but gives up after `timeout`.
///
/// The returned flag is `true` when the wait ended because the timeout
/// elapsed. A `false` flag does not mean the awaited predicate holds.
#[inline]
pub fn wait_timeout_recover<'a, T>(
    condvar: &CondVar,
    guard: CondVarMutexGuard<'a, T>,
    timeout: Duration,
) -> (CondVarMutexGuard<'a, T>, bool) {
    let (guard, result) = recover(condvar.wait_timeout(guard, timeout));
    (guard, result.timed_out())
}

#[inline]
fn recover<G>(result: LockResult<G>) -> G {
    match result {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
