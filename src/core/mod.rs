pub(crate) mod backoff;
pub(crate) mod futex;
pub(crate) mod slock;
pub(crate) mod thread;
pub(crate) mod waiters;
