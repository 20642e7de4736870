use std::sync::atomic::AtomicUsize;

#[inline]
pub(super) fn wait(a: &AtomicUsize, expected: usize) {
    let ptr: *const AtomicUsize = a;
    unsafe {
        libc::_umtx_op(
            ptr as *mut libc::c_void,
            libc::UMTX_OP_WAIT_UINT_PRIVATE,
            expected as libc::c_ulong,
            std::ptr::null_mut(),
            std::ptr::null_mut(),
        );
    }
}

#[inline]
pub(super) fn wake_one(ptr: *const AtomicUsize) {
    wake(ptr, 1);
}

#[inline]
fn wake(ptr: *const AtomicUsize, count: libc::c_ulong) {
    unsafe {
        libc::_umtx_op(
            ptr as *mut libc::c_void,
            libc::UMTX_OP_WAKE_PRIVATE,
            count,
            std::ptr::null_mut(),
            std::ptr::null_mut(),
        );
    }
}
