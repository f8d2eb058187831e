//! Mutex and condition variable flavor used by the whole crate.
//!
//! With the `parking-lot` feature the primitives come from `parking_lot` and
//! never poison. Otherwise the `std` primitives are used and a poisoned lock is
//! recovered: every critical section in this crate is a single `Vec` push or
//! pop, so the protected data is never left half-mutated by a panic.

use core::time::Duration;

#[cfg(feature = "parking-lot")]
pub(crate) use parking_lot::{Condvar, Mutex, MutexGuard};
#[cfg(not(feature = "parking-lot"))]
pub(crate) use std::sync::{Condvar, Mutex, MutexGuard};
#[cfg(not(feature = "parking-lot"))]
use std::sync::PoisonError;

#[inline]
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    #[cfg(feature = "parking-lot")]
    {
        mutex.lock()
    }
    #[cfg(not(feature = "parking-lot"))]
    {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Atomically releases `guard` and blocks until `condvar` is notified.
#[inline]
pub(crate) fn wait<'a, T>(condvar: &Condvar, guard: MutexGuard<'a, T>) -> MutexGuard<'a, T> {
    #[cfg(feature = "parking-lot")]
    {
        let mut guard = guard;
        condvar.wait(&mut guard);
        guard
    }
    #[cfg(not(feature = "parking-lot"))]
    {
        condvar.wait(guard).unwrap_or_else(PoisonError::into_inner)
    }
}

/// Like [`wait`], but gives up after `timeout`. The returned flag is `true`
/// when the wait timed out.
#[inline]
pub(crate) fn wait_timeout<'a, T>(
    condvar: &Condvar,
    guard: MutexGuard<'a, T>,
    timeout: Duration,
) -> (MutexGuard<'a, T>, bool) {
    #[cfg(feature = "parking-lot")]
    {
        let mut guard = guard;
        let result = condvar.wait_for(&mut guard, timeout);
        (guard, result.timed_out())
    }
    #[cfg(not(feature = "parking-lot"))]
    {
        let (guard, result) = condvar
            .wait_timeout(guard, timeout)
            .unwrap_or_else(PoisonError::into_inner);
        (guard, result.timed_out())
    }
}
