use crate::channels::capacity::Capacity;
use crate::channels::chan::Chan;
use crate::channels::error::{RecvError, TryRecvError};
use crate::core::thread::block_on;
use crate::core::waiters::WaiterId;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// Receiving half of a channel.
///
/// Cloneable; clones compete for items, each item is received once.
/// Dropping the last receiver closes the channel.
pub struct Receiver<T> {
    chan: Arc<Chan<T>>,
}

impl<T> Receiver<T> {
    pub(crate) fn new(chan: Arc<Chan<T>>) -> Self {
        Self { chan }
    }

    /// Receives without waiting.
    ///
    /// Taking a buffered item moves the oldest parked sender's item into the
    /// freed slot. Only buffered items are visible here, so on a rendezvous
    /// channel this always fails, even with a sender waiting. Fails with
    /// [`TryRecvError::Empty`] while open, or [`TryRecvError::Closed`] once
    /// closed and drained.
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        self.chan.try_recv()
    }

    /// Receives the next item, waiting for one if necessary.
    ///
    /// On a rendezvous channel this is the only way to take an item from a
    /// waiting sender. Fails with [`RecvError`] when the channel is closed and
    /// nothing is left to receive, including when it closes while this
    /// future waits.
    ///
    /// Dropping the future while it waits gives up its place in line. If an
    /// item had already been handed to it, the item passes to the next
    /// waiting receive, or back to the front of the buffer. On a rendezvous
    /// channel with no other receive waiting the item is lost, although its
    /// sender has already completed successfully.
    pub fn recv(&self) -> Receiving<'_, T> {
        Receiving {
            chan: &self.chan,
            waiting: None,
            done: false,
        }
    }

    /// Like [`recv`](Receiver::recv), parking the current thread.
    pub fn recv_blocking(&self) -> Result<T, RecvError> {
        block_on(self.recv())
    }

    /// Closes the channel for both sides. See [`Sender::close`](super::Sender::close).
    pub fn close(&self) -> bool {
        self.chan.close()
    }

    pub fn is_closed(&self) -> bool {
        self.chan.is_closed()
    }

    pub fn len(&self) -> usize {
        self.chan.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> Capacity {
        self.chan.capacity()
    }

    /// Yields items until the channel is closed and drained, parking the
    /// current thread in between.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { receiver: self }
    }
}

impl<T> Clone for Receiver<T> {
    fn clone(&self) -> Self {
        self.chan.add_receiver();
        Self {
            chan: Arc::clone(&self.chan),
        }
    }
}

impl<T> Drop for Receiver<T> {
    fn drop(&mut self) {
        self.chan.drop_receiver();
    }
}

impl<T> fmt::Debug for Receiver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Receiver").field("chan", &self.chan).finish()
    }
}

/// Future returned by [`Receiver::recv`].
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Receiving<'a, T> {
    chan: &'a Chan<T>,
    waiting: Option<WaiterId>,
    done: bool,
}

impl<T> Unpin for Receiving<'_, T> {}

impl<T> Future for Receiving<'_, T> {
    type Output = Result<T, RecvError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        if this.done {
            panic!("`Receiving` polled after completion");
        }

        let poll = this.chan.poll_recv(&mut this.waiting, cx);
        this.done = poll.is_ready();
        poll
    }
}

impl<T> Drop for Receiving<'_, T> {
    fn drop(&mut self) {
        if let Some(id) = self.waiting.take() {
            self.chan.cancel_recv(id);
        }
    }
}

impl<T> fmt::Debug for Receiving<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Receiving")
            .field("parked", &self.waiting.is_some())
            .field("done", &self.done)
            .finish()
    }
}

/// Blocking iterator returned by [`Receiver::iter`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    receiver: &'a Receiver<T>,
}

impl<T> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.receiver.recv_blocking().ok()
    }
}
