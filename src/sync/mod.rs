//! FIFO locks: [`Lock`] and [`InterruptibleLock`].

mod error;
mod guard;
mod interruptible;
mod lock;
mod raw;

pub use error::LockError;
pub use guard::LockGuard;
pub use interruptible::{InterruptibleAcquiring, InterruptibleLock, Interrupting};
pub use lock::{Acquiring, Lock};
