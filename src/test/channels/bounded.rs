#[cfg(test)]
mod tests_bounded {
    use crate::channels::{Capacity, TryRecvError, TrySendError, bounded};
    use crate::test::{CountingWaker, poll_once, poll_with};
    use std::task::Poll;

    // ==================== CONSTRUCTION ====================

    #[test]
    fn test_bounded_capacity() {
        let (tx, rx) = bounded::<i32>(5);
        assert_eq!(tx.capacity(), Capacity::Bounded(5));
        assert_eq!(rx.capacity(), Capacity::Bounded(5));
        assert!(rx.is_empty());
        assert!(!rx.is_closed());
    }

    // ==================== TRY_SEND / TRY_RECV ====================

    #[test]
    fn test_try_send_until_full() {
        let (tx, rx) = bounded(2);

        assert_eq!(tx.try_send(1), Ok(()));
        assert_eq!(tx.try_send(2), Ok(()));
        assert_eq!(tx.try_send(3), Err(TrySendError::Full(3)));
        assert_eq!(tx.len(), 2);

        assert_eq!(rx.try_recv(), Ok(1));
        assert_eq!(tx.try_send(3), Ok(()));

        assert_eq!(rx.try_recv(), Ok(2));
        assert_eq!(rx.try_recv(), Ok(3));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_full_error_returns_value() {
        let (tx, _rx) = bounded(1);
        tx.try_send("kept").unwrap();

        let err = tx.try_send("returned").unwrap_err();
        assert!(err.is_full());
        assert_eq!(err.into_inner(), "returned");
    }

    // ==================== BACKPRESSURE ====================

    #[test]
    fn test_scenario_send_suspends_when_full() {
        let (tx, rx) = bounded(2);

        assert_eq!(poll_once(&mut tx.send(1)), Poll::Ready(Ok(())));
        assert_eq!(poll_once(&mut tx.send(2)), Poll::Ready(Ok(())));

        let mut third = tx.send(3);
        assert!(poll_once(&mut third).is_pending());
        // The parked item is not in the buffer yet.
        assert_eq!(tx.len(), 2);

        assert_eq!(poll_once(&mut rx.recv()), Poll::Ready(Ok(1)));
        // The freed slot went to the parked sender.
        assert_eq!(rx.len(), 2);
        assert_eq!(poll_once(&mut third), Poll::Ready(Ok(())));

        assert_eq!(rx.try_recv(), Ok(2));
        assert_eq!(rx.try_recv(), Ok(3));
    }

    #[test]
    fn test_woken_sender_keeps_its_slot() {
        let (tx, rx) = bounded(1);
        tx.try_send(0).unwrap();

        let mut parked = tx.send(1);
        assert!(poll_once(&mut parked).is_pending());

        assert_eq!(rx.try_recv(), Ok(0));
        // A newcomer cannot take the slot the parked sender was given.
        assert_eq!(tx.try_send(2), Err(TrySendError::Full(2)));

        assert_eq!(poll_once(&mut parked), Poll::Ready(Ok(())));
        assert_eq!(rx.try_recv(), Ok(1));
    }

    #[test]
    fn test_parked_senders_are_fifo() {
        let (tx, rx) = bounded(1);
        tx.try_send(0).unwrap();

        let mut a = tx.send(1);
        let mut b = tx.send(2);
        let mut c = tx.send(3);
        assert!(poll_once(&mut a).is_pending());
        assert!(poll_once(&mut b).is_pending());
        assert!(poll_once(&mut c).is_pending());

        for expected in 0..4 {
            assert_eq!(rx.try_recv(), Ok(expected));
            assert!(rx.len() <= 1);
        }

        assert_eq!(poll_once(&mut c), Poll::Ready(Ok(())));
        assert_eq!(poll_once(&mut a), Poll::Ready(Ok(())));
        assert_eq!(poll_once(&mut b), Poll::Ready(Ok(())));
    }

    #[test]
    fn test_recv_wakes_parked_sender() {
        let (tx, rx) = bounded(1);
        tx.try_send(0).unwrap();

        let (counter, waker) = CountingWaker::new();
        let mut parked = tx.send(1);
        assert!(poll_with(&mut parked, &waker).is_pending());
        assert_eq!(counter.count(), 0);

        assert_eq!(rx.try_recv(), Ok(0));
        assert_eq!(counter.count(), 1);
    }

    // ==================== HAND-OFF ====================

    #[test]
    fn test_send_hands_off_to_parked_receiver() {
        let (tx, rx) = bounded(4);

        let (counter, waker) = CountingWaker::new();
        let mut recv = rx.recv();
        assert!(poll_with(&mut recv, &waker).is_pending());

        assert_eq!(tx.try_send(10), Ok(()));
        assert_eq!(counter.count(), 1);
        // Delivered straight to the receiver, never buffered.
        assert_eq!(tx.len(), 0);

        assert_eq!(poll_once(&mut recv), Poll::Ready(Ok(10)));
    }

    #[test]
    fn test_parked_receivers_are_fifo() {
        let (tx, rx) = bounded(2);

        let mut first = rx.recv();
        let mut second = rx.recv();
        assert!(poll_once(&mut first).is_pending());
        assert!(poll_once(&mut second).is_pending());

        tx.try_send("a").unwrap();
        tx.try_send("b").unwrap();

        assert_eq!(poll_once(&mut second), Poll::Ready(Ok("b")));
        assert_eq!(poll_once(&mut first), Poll::Ready(Ok("a")));
    }
}
