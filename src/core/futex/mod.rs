use std::sync::atomic::AtomicUsize;

#[cfg(any(target_os = "linux", target_os = "android"))]
#[path = "linux.rs"]
mod platform;

#[cfg(target_os = "freebsd")]
#[path = "freebsd.rs"]
mod platform;

#[cfg(windows)]
#[path = "windows.rs"]
mod platform;

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "freebsd",
    windows
)))]
#[path = "fallback.rs"]
mod platform;

/// Sleeps while `atomic` still holds `value`.
///
/// Returns immediately when the value differs. Spurious returns are
/// allowed, so callers always re-check their condition in a loop.
#[inline]
pub(crate) fn futex_wait(atomic: &AtomicUsize, value: usize) {
    platform::wait(atomic, value)
}

/// Wakes one thread sleeping on `atomic`. A null or stale pointer is a no-op.
#[inline]
pub(crate) fn futex_wake(atomic: *const AtomicUsize) {
    platform::wake_one(atomic);
}
