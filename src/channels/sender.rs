use crate::channels::capacity::Capacity;
use crate::channels::chan::Chan;
use crate::channels::error::{SendError, TrySendError};
use crate::core::thread::block_on;
use crate::core::waiters::WaiterId;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// Sending half of a channel.
///
/// Cloneable; every clone feeds the same channel. Dropping the last sender
/// closes the channel.
pub struct Sender<T> {
    chan: Arc<Chan<T>>,
}

impl<T> Sender<T> {
    pub(crate) fn new(chan: Arc<Chan<T>>) -> Self {
        Self { chan }
    }

    /// Sends without waiting.
    ///
    /// A parked receiver gets the value directly; otherwise it is buffered if
    /// there is room. Fails with [`TrySendError::Full`] or
    /// [`TrySendError::Closed`], returning the value.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.chan.try_send(value)
    }

    /// Sends `value`, waiting for room if the channel is full.
    ///
    /// While waiting the value is held by the returned future, not by the
    /// buffer. It is placed in the buffer (or handed to a receiver) when the
    /// sender is woken; a woken sender never has to compete for the slot
    /// again. Fails with [`SendError`] if the channel is or becomes closed.
    ///
    /// Dropping the future while it waits withdraws the value.
    pub fn send(&self, value: T) -> Sending<'_, T> {
        Sending {
            chan: &self.chan,
            value: Some(value),
            waiting: None,
        }
    }

    /// Like [`send`](Sender::send), parking the current thread.
    pub fn send_blocking(&self, value: T) -> Result<(), SendError<T>> {
        block_on(self.send(value))
    }

    /// Closes the channel for both sides.
    ///
    /// Parked receivers and senders fail; buffered items stay receivable.
    /// Returns `false` if the channel was already closed.
    pub fn close(&self) -> bool {
        self.chan.close()
    }

    pub fn is_closed(&self) -> bool {
        self.chan.is_closed()
    }

    /// Number of buffered items.
    pub fn len(&self) -> usize {
        self.chan.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> Capacity {
        self.chan.capacity()
    }

    /// Whether both handles feed the same channel.
    pub fn same_channel(&self, other: &Sender<T>) -> bool {
        Arc::ptr_eq(&self.chan, &other.chan)
    }
}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        self.chan.add_sender();
        Self {
            chan: Arc::clone(&self.chan),
        }
    }
}

impl<T> Drop for Sender<T> {
    fn drop(&mut self) {
        self.chan.drop_sender();
    }
}

impl<T> fmt::Debug for Sender<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sender").field("chan", &self.chan).finish()
    }
}

/// Future returned by [`Sender::send`].
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Sending<'a, T> {
    chan: &'a Chan<T>,
    value: Option<T>,
    waiting: Option<WaiterId>,
}

// The item is moved around by value, never pinned.
impl<T> Unpin for Sending<'_, T> {}

impl<T> Future for Sending<'_, T> {
    type Output = Result<(), SendError<T>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        this.chan.poll_send(&mut this.value, &mut this.waiting, cx)
    }
}

impl<T> Drop for Sending<'_, T> {
    fn drop(&mut self) {
        if let Some(id) = self.waiting.take() {
            self.chan.cancel_send(id);
        }
    }
}

impl<T> fmt::Debug for Sending<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sending")
            .field("parked", &self.waiting.is_some())
            .finish_non_exhaustive()
    }
}
