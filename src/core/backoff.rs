use std::cell::Cell;
use std::fmt;
use std::sync::OnceLock;
use std::{hint, thread};

static PARALLELISM: OnceLock<usize> = OnceLock::new();

/// Exponential backoff for the short critical sections guarded by
/// [`SLock`](crate::core::slock::SLock).
///
/// Starts with [`hint::spin_loop`] bursts that double each step, escalates
/// to [`thread::yield_now`], and reports [`is_completed`](Backoff::is_completed)
/// once the caller should park on the futex instead.
/// Limits scale with the number of available cores: spinning is pointless
/// on a single core, and cheap on a wide machine.
pub(crate) struct Backoff {
    step: Cell<usize>,
    spin_limit: usize,
    yield_limit: usize,
}

impl Backoff {
    pub(crate) fn new() -> Self {
        let cores = *PARALLELISM.get_or_init(|| {
            thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

        let (spin_limit, yields) = match cores {
            1 => (0, 2),
            2..=8 => (6, 4),
            9..=32 => (8, 6),
            _ => (10, 8),
        };

        Backoff {
            step: Cell::new(0),
            spin_limit,
            yield_limit: spin_limit + yields,
        }
    }

    /// One backoff step: spin while under the spin limit, then yield.
    #[inline]
    pub(crate) fn snooze(&self) {
        let step = self.step.get();
        if step < self.spin_limit {
            for _ in 0..1u32 << step {
                hint::spin_loop();
            }
        } else {
            thread::yield_now();
        }

        if step <= self.yield_limit {
            self.step.set(step + 1);
        }
    }

    /// `true` once spinning and yielding are exhausted and the caller should block.
    #[inline]
    pub(crate) fn is_completed(&self) -> bool {
        self.step.get() > self.yield_limit
    }
}

impl fmt::Debug for Backoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backoff")
            .field("step", &self.step.get())
            .field("is_completed", &self.is_completed())
            .finish()
    }
}

impl Default for Backoff {
    fn default() -> Backoff {
        Backoff::new()
    }
}
