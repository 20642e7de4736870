use crate::core::futex::{futex_wait, futex_wake};
use crossbeam_utils::CachePadded;
use std::future::Future;
use std::pin::pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll, Wake, Waker};

const EMPTY: usize = 0;

/// Token counter shared by a [`Parker`] and the wakers it hands out.
struct ParkInner {
    tokens: CachePadded<AtomicUsize>,
}

impl ParkInner {
    #[inline]
    fn try_consume_token(&self) -> bool {
        self.tokens
            .fetch_update(Ordering::Acquire, Ordering::Acquire, |v| {
                if v > EMPTY { Some(v - 1) } else { None }
            })
            .is_ok()
    }

    #[inline]
    fn unpark(&self) {
        // Publish before waking, otherwise a sleeper may miss the token.
        self.tokens.fetch_add(1, Ordering::Release);
        futex_wake(&*self.tokens);
    }
}

impl Wake for ParkInner {
    fn wake(self: Arc<Self>) {
        self.unpark();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.unpark();
    }
}

/// Parks the current thread until one of its wakers fires.
///
/// Wakes arriving before `park` are banked as tokens, so a wake is never lost.
#[derive(Clone)]
pub(crate) struct Parker {
    inner: Arc<ParkInner>,
}

impl Parker {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(ParkInner {
                tokens: CachePadded::new(AtomicUsize::new(EMPTY)),
            }),
        }
    }

    pub(crate) fn park(&self) {
        let inner = &*self.inner;
        while !inner.try_consume_token() {
            // Returns at once if a token landed after the check above.
            futex_wait(&inner.tokens, EMPTY);
        }
    }

    pub(crate) fn waker(&self) -> Waker {
        Waker::from(Arc::clone(&self.inner))
    }
}

/// Drives `future` to completion on the calling thread.
///
/// Backs every `*_blocking` method; the thread sleeps on its parker between polls.
pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
    let mut future = pin!(future);
    let parker = Parker::new();
    let waker = parker.waker();
    let mut cx = Context::from_waker(&waker);

    loop {
        if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
            return output;
        }
        parker.park();
    }
}
