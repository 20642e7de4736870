use std::fmt;
use thiserror::Error;

/// Which side of a channel observed the close.
///
/// Both [`SendError`] and [`RecvError`] convert into it, so code that
/// drives both ends can propagate one error type with `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ClosedError {
    #[error("channel was closed while sending")]
    Sending,
    #[error("channel was closed while receiving")]
    Receiving,
}

/// A send failed because the channel is closed. Carries the item back.
#[derive(Clone, Copy, PartialEq, Eq, Error)]
#[error("channel was closed while sending")]
pub struct SendError<T>(pub T);

impl<T> SendError<T> {
    /// Recovers the item that was not delivered.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SendError").finish_non_exhaustive()
    }
}

impl<T> From<SendError<T>> for ClosedError {
    fn from(_: SendError<T>) -> Self {
        ClosedError::Sending
    }
}

/// A receive failed because the channel is closed and drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("channel was closed while receiving")]
pub struct RecvError;

impl From<RecvError> for ClosedError {
    fn from(_: RecvError) -> Self {
        ClosedError::Receiving
    }
}

/// Failure of [`Sender::try_send`](super::Sender::try_send).
///
/// Neither case is exceptional; the item comes back either way.
#[derive(Clone, Copy, PartialEq, Eq, Error)]
pub enum TrySendError<T> {
    #[error("channel is full")]
    Full(T),
    #[error("channel is closed")]
    Closed(T),
}

impl<T> TrySendError<T> {
    pub fn into_inner(self) -> T {
        match self {
            TrySendError::Full(value) | TrySendError::Closed(value) => value,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, TrySendError::Full(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, TrySendError::Closed(_))
    }
}

impl<T> fmt::Debug for TrySendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrySendError::Full(_) => f.write_str("Full(..)"),
            TrySendError::Closed(_) => f.write_str("Closed(..)"),
        }
    }
}

impl<T> From<SendError<T>> for TrySendError<T> {
    fn from(err: SendError<T>) -> Self {
        TrySendError::Closed(err.0)
    }
}

/// Failure of [`Receiver::try_recv`](super::Receiver::try_recv).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum TryRecvError {
    #[error("channel is empty")]
    Empty,
    #[error("channel is closed")]
    Closed,
}

impl From<RecvError> for TryRecvError {
    fn from(_: RecvError) -> Self {
        TryRecvError::Closed
    }
}
