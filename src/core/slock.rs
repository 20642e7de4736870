use crate::core::backoff::Backoff;
use crate::core::futex::{futex_wait, futex_wake};
use crossbeam_utils::CachePadded;
use std::cell::UnsafeCell;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lock word states
const UNLOCKED: usize = 0;
const LOCKED: usize = 1;
const CONTENDED: usize = 2;

/// Futex-backed mutex owning the state of a single channel or lock.
///
/// Critical sections are a handful of queue operations, so the slow path
/// backs off before parking. Not recursive, not fair; fairness is provided
/// one level up by the waiter queues.
pub(crate) struct SLock<T> {
    state: CachePadded<AtomicUsize>,
    data: UnsafeCell<T>,
}

unsafe impl<T: Send> Send for SLock<T> {}
unsafe impl<T: Send> Sync for SLock<T> {}

impl<T> SLock<T> {
    pub(crate) fn new(data: T) -> Self {
        Self {
            state: CachePadded::new(AtomicUsize::new(UNLOCKED)),
            data: UnsafeCell::new(data),
        }
    }

    #[inline]
    pub(crate) fn lock(&self) -> SGuard<'_, T> {
        if self
            .state
            .compare_exchange(UNLOCKED, LOCKED, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            self.lock_slow();
        }
        SGuard { lock: self }
    }

    #[cold]
    fn lock_slow(&self) {
        let backoff = Backoff::new();

        while !backoff.is_completed() {
            if self.state.load(Ordering::Relaxed) == UNLOCKED
                && self
                    .state
                    .compare_exchange_weak(UNLOCKED, LOCKED, Ordering::Acquire, Ordering::Relaxed)
                    .is_ok()
            {
                return;
            }
            backoff.snooze();
        }

        // Whoever unlocks after this point must issue a wake.
        while self.state.swap(CONTENDED, Ordering::Acquire) != UNLOCKED {
            futex_wait(&self.state, CONTENDED);
        }
    }

    #[inline]
    fn unlock(&self) {
        if self.state.swap(UNLOCKED, Ordering::Release) == CONTENDED {
            futex_wake(&*self.state);
        }
    }

    pub(crate) fn is_locked(&self) -> bool {
        self.state.load(Ordering::Relaxed) != UNLOCKED
    }
}

impl<T> fmt::Debug for SLock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SLock")
            .field("locked", &self.is_locked())
            .finish_non_exhaustive()
    }
}

/// RAII guard; unlocks on drop.
pub(crate) struct SGuard<'a, T> {
    lock: &'a SLock<T>,
}

impl<T> Deref for SGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: the guard proves exclusive ownership of the lock word.
        unsafe { &*self.lock.data.get() }
    }
}

impl<T> DerefMut for SGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: as above, and `&mut self` rules out aliasing through the guard.
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T> Drop for SGuard<'_, T> {
    fn drop(&mut self) {
        self.lock.unlock();
    }
}
