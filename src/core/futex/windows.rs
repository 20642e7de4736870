use std::sync::atomic::AtomicUsize;
use windows_sys::Win32::System::Threading::{
    INFINITE, WaitOnAddress, WakeByAddressSingle,
};

#[inline]
pub(super) fn wait(a: &AtomicUsize, expected: usize) {
    let ptr: *const AtomicUsize = a;
    let expected_ptr: *const usize = &expected;
    unsafe {
        WaitOnAddress(
            ptr.cast(),
            expected_ptr.cast(),
            size_of::<usize>(),
            INFINITE,
        )
    };
}

#[inline]
pub(super) fn wake_one(ptr: *const AtomicUsize) {
    if !ptr.is_null() {
        unsafe { WakeByAddressSingle(ptr.cast()) };
    }
}
