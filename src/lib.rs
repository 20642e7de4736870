#![doc = include_str!("../README.md")]
#![doc(test(
    no_crate_inject,
    attr(
        deny(warnings, rust_2018_idioms),
        allow(dead_code, unused_assignments, unused_variables)
    )
))]
#![warn(
    rust_2024_compatibility,
    rust_2018_idioms,
    rustdoc::broken_intra_doc_links,
    unreachable_pub,
)]

pub mod channels;
pub mod sync;

mod core;

pub use channels::{Receiver, Sender, bounded, channel, rendezvous, unbounded};
pub use sync::{InterruptibleLock, Lock, LockError, LockGuard};

#[cfg(test)]
mod test;
