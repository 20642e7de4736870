//! Message-passing channels: rendezvous, bounded and unbounded.
//!
//! All three flavours share one implementation and differ only in their
//! [`Capacity`]. Items are received in the order they were sent, including
//! items handed straight from a sender to a parked receiver.

mod capacity;
mod chan;
mod error;
mod receiver;
mod sender;

pub use capacity::{Capacity, ParseCapacityError};
pub use error::{ClosedError, RecvError, SendError, TryRecvError, TrySendError};
pub use receiver::{Iter, Receiver, Receiving};
pub use sender::{Sender, Sending};

use chan::Chan;
use std::sync::Arc;

/// Creates a channel with the given capacity.
pub fn channel<T>(capacity: Capacity) -> (Sender<T>, Receiver<T>) {
    let chan = Arc::new(Chan::new(capacity));
    (Sender::new(Arc::clone(&chan)), Receiver::new(chan))
}

/// Creates a channel buffering at most `capacity` items.
///
/// `bounded(0)` is the same as [`rendezvous`].
pub fn bounded<T>(capacity: usize) -> (Sender<T>, Receiver<T>) {
    channel(Capacity::Bounded(capacity))
}

/// Creates a channel whose senders never wait.
pub fn unbounded<T>() -> (Sender<T>, Receiver<T>) {
    channel(Capacity::Unbounded)
}

/// Creates a zero-capacity channel: each send completes only by meeting a receive.
pub fn rendezvous<T>() -> (Sender<T>, Receiver<T>) {
    channel(Capacity::RENDEZVOUS)
}
