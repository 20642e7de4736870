#[cfg(test)]
mod tests_rendezvous {
    use crate::channels::{Capacity, TryRecvError, TrySendError, bounded, rendezvous};
    use crate::test::{CountingWaker, poll_once, poll_with};
    use std::task::Poll;

    #[test]
    fn test_bounded_zero_is_rendezvous() {
        let (tx, _rx) = bounded::<u8>(0);
        assert!(tx.capacity().is_rendezvous());
        assert_eq!(tx.capacity(), Capacity::RENDEZVOUS);
    }

    #[test]
    fn test_try_send_without_receiver_is_full() {
        let (tx, rx) = rendezvous();
        assert_eq!(tx.try_send(1), Err(TrySendError::Full(1)));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_send_waits_for_receiver() {
        let (tx, rx) = rendezvous();

        let (counter, waker) = CountingWaker::new();
        let mut send = tx.send("x");
        assert!(poll_with(&mut send, &waker).is_pending());
        assert_eq!(tx.len(), 0);

        assert_eq!(poll_once(&mut rx.recv()), Poll::Ready(Ok("x")));
        assert_eq!(counter.count(), 1);
        assert_eq!(poll_once(&mut send), Poll::Ready(Ok(())));
        assert_eq!(rx.len(), 0);
    }

    #[test]
    fn test_try_recv_ignores_parked_sender() {
        let (tx, rx) = rendezvous::<u32>();

        let mut send = tx.send(7);
        assert!(poll_once(&mut send).is_pending());
        assert_eq!(rx.len(), 0);

        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        assert!(poll_once(&mut send).is_pending());

        // A waiting receive still pairs with the parked sender.
        assert_eq!(poll_once(&mut rx.recv()), Poll::Ready(Ok(7)));
        assert_eq!(poll_once(&mut send), Poll::Ready(Ok(())));
    }

    #[test]
    fn test_try_recv_after_close_with_parked_sender() {
        let (tx, rx) = rendezvous::<u32>();

        let mut send = tx.send(1);
        assert!(poll_once(&mut send).is_pending());
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));

        rx.close();
        assert_eq!(rx.try_recv(), Err(TryRecvError::Closed));
        assert!(matches!(poll_once(&mut send), Poll::Ready(Err(e)) if e.0 == 1));
    }

    #[test]
    fn test_value_never_observable_as_buffered() {
        let (tx, rx) = rendezvous();

        let mut recv = rx.recv();
        assert!(poll_once(&mut recv).is_pending());

        assert_eq!(tx.try_send(3), Ok(()));
        // Already owned by the parked receiver.
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        assert_eq!(rx.len(), 0);

        assert_eq!(poll_once(&mut recv), Poll::Ready(Ok(3)));
    }

    #[test]
    fn test_senders_served_in_order() {
        let (tx, rx) = rendezvous();

        let mut sends: Vec<_> = (0..5).map(|n| tx.send(n)).collect();
        for send in &mut sends {
            assert!(poll_once(send).is_pending());
        }

        for n in 0..5 {
            assert_eq!(poll_once(&mut rx.recv()), Poll::Ready(Ok(n)));
            assert_eq!(rx.len(), 0);
        }

        for send in &mut sends {
            assert_eq!(poll_once(send), Poll::Ready(Ok(())));
        }
    }
}
