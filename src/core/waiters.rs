use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::task::{Poll, Waker};

/// Opaque ticket for one parked operation.
///
/// Ids come from a per-queue counter and are never reused, so a stale id
/// cannot match a newer registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct WaiterId(u64);

/// A registration removed from the queue, ready to be resolved.
pub(crate) struct Parked<P> {
    pub(crate) ticket: Ticket,
    pub(crate) payload: P,
}

/// The half of a [`Parked`] needed to resolve it.
pub(crate) struct Ticket {
    id: WaiterId,
    waker: Waker,
}

/// What [`WaiterQueue::cancel`] found for an id.
#[derive(Debug)]
pub(crate) enum Cancelled<P, O> {
    /// Still queued; unlinked and its payload returned.
    Queued(P),
    /// Already resolved but not yet observed.
    Resolved(O),
    /// Unknown id, or the outcome was already taken.
    Gone,
}

/// FIFO of parked operations plus the outcomes of the ones resolved but
/// not yet polled.
///
/// `P` is the payload a waiter carries while queued (a sender's item),
/// `O` the outcome it is resolved with.
///
/// `order` only records arrival; the live registrations sit in `parked`,
/// keyed by id, so re-polls and cancellations never scan the queue. A
/// cancelled id stays in `order` as a tombstone until `pop` skips it or
/// the next compaction drops it.
pub(crate) struct WaiterQueue<P, O> {
    next_id: u64,
    order: VecDeque<WaiterId>,
    parked: HashMap<WaiterId, (Waker, P)>,
    resolved: HashMap<WaiterId, O>,
}

impl<P, O> WaiterQueue<P, O> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            order: VecDeque::new(),
            parked: HashMap::new(),
            resolved: HashMap::new(),
        }
    }

    /// Number of queued (unresolved) waiters.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.parked.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.parked.is_empty()
    }

    pub(crate) fn push(&mut self, payload: P, waker: &Waker) -> WaiterId {
        let id = WaiterId(self.next_id);
        self.next_id += 1;
        self.order.push_back(id);
        self.parked.insert(id, (waker.clone(), payload));
        id
    }

    /// Unlinks the earliest waiter.
    pub(crate) fn pop(&mut self) -> Option<Parked<P>> {
        while let Some(id) = self.order.pop_front() {
            if let Some((waker, payload)) = self.parked.remove(&id) {
                return Some(Parked {
                    ticket: Ticket { id, waker },
                    payload,
                });
            }
        }
        None
    }

    /// Unlinks every waiter, oldest first.
    ///
    /// The queue is emptied up front, so the caller may resolve each entry
    /// while iterating.
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = Parked<P>> + use<P, O> {
        let mut parked = std::mem::take(&mut self.parked);
        std::mem::take(&mut self.order)
            .into_iter()
            .filter_map(move |id| {
                parked.remove(&id).map(|(waker, payload)| Parked {
                    ticket: Ticket { id, waker },
                    payload,
                })
            })
    }

    /// Records the outcome of an unlinked waiter and schedules its wake.
    pub(crate) fn resolve(&mut self, ticket: Ticket, outcome: O, wakeups: &mut Wakeups) {
        self.resolved.insert(ticket.id, outcome);
        wakeups.push(ticket.waker);
    }

    /// Takes the outcome for `id`, or refreshes its waker if still queued.
    pub(crate) fn poll_resolved(&mut self, id: WaiterId, waker: &Waker) -> Poll<O> {
        if let Some(outcome) = self.resolved.remove(&id) {
            return Poll::Ready(outcome);
        }

        if let Some((stored, _)) = self.parked.get_mut(&id)
            && !stored.will_wake(waker)
        {
            *stored = waker.clone();
        }
        Poll::Pending
    }

    /// Forgets `id`, wherever it currently is.
    pub(crate) fn cancel(&mut self, id: WaiterId) -> Cancelled<P, O> {
        if let Some((_, payload)) = self.parked.remove(&id) {
            self.compact();
            return Cancelled::Queued(payload);
        }

        match self.resolved.remove(&id) {
            Some(outcome) => Cancelled::Resolved(outcome),
            None => Cancelled::Gone,
        }
    }

    /// Drops tombstones once they outnumber live entries.
    fn compact(&mut self) {
        if self.order.len() > 2 * self.parked.len() + 16 {
            let parked = &self.parked;
            self.order.retain(|id| parked.contains_key(id));
        }
    }

    #[cfg(test)]
    pub(crate) fn tombstones(&self) -> usize {
        self.order.len() - self.parked.len()
    }
}

impl<P, O> Default for WaiterQueue<P, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, O> fmt::Debug for WaiterQueue<P, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaiterQueue")
            .field("queued", &self.parked.len())
            .field("resolved", &self.resolved.len())
            .finish()
    }
}

/// Wakers collected inside a critical section and fired after it ends.
///
/// Waking under the state lock would let an eager executor re-enter the
/// same channel or lock while its queues are half drained.
#[derive(Default)]
pub(crate) struct Wakeups {
    wakers: Vec<Waker>,
}

impl Wakeups {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn push(&mut self, waker: Waker) {
        self.wakers.push(waker);
    }

    pub(crate) fn len(&self) -> usize {
        self.wakers.len()
    }

    /// Fires every collected waker in the order they were resolved.
    pub(crate) fn wake(self) {
        for waker in self.wakers {
            waker.wake();
        }
    }
}
