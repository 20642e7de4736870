use std::sync::atomic::{AtomicU32, AtomicUsize};

// The kernel compares the low 32 bits; every value stored by this crate fits.
#[inline]
pub(super) fn wait(a: &AtomicUsize, expected: usize) {
    let word: *const AtomicU32 = (a as *const AtomicUsize).cast();

    unsafe {
        libc::syscall(
            libc::SYS_futex,
            word,
            libc::FUTEX_WAIT | libc::FUTEX_PRIVATE_FLAG,
            expected as u32,
            std::ptr::null::<libc::timespec>(),
        );
    }
}

#[inline]
pub(super) fn wake_one(ptr: *const AtomicUsize) {
    wake(ptr, 1);
}

#[inline]
fn wake(ptr: *const AtomicUsize, count: i32) {
    unsafe {
        libc::syscall(
            libc::SYS_futex,
            ptr.cast::<AtomicU32>(),
            libc::FUTEX_WAKE | libc::FUTEX_PRIVATE_FLAG,
            count,
        );
    }
}
