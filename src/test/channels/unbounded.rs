#[cfg(test)]
mod tests_unbounded {
    use crate::channels::{Capacity, TryRecvError, unbounded};
    use crate::test::poll_once;
    use std::task::Poll;

    #[test]
    fn test_new_unbounded() {
        let (tx, rx) = unbounded::<i32>();
        assert_eq!(tx.capacity(), Capacity::Unbounded);
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_send_never_waits() {
        let (tx, rx) = unbounded();

        for i in 0..10_000 {
            assert_eq!(poll_once(&mut tx.send(i)), Poll::Ready(Ok(())));
        }
        assert_eq!(rx.len(), 10_000);

        for i in 0..10_000 {
            assert_eq!(rx.try_recv(), Ok(i));
        }
        assert!(rx.is_empty());
    }

    #[test]
    fn test_multiple_values() {
        let (tx, rx) = unbounded();

        tx.try_send("hello").unwrap();
        tx.try_send("world").unwrap();
        tx.try_send("!").unwrap();

        assert_eq!(rx.try_recv(), Ok("hello"));
        assert_eq!(rx.try_recv(), Ok("world"));
        assert_eq!(rx.try_recv(), Ok("!"));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_recv_waits_for_send() {
        let (tx, rx) = unbounded();

        let mut recv = rx.recv();
        assert!(poll_once(&mut recv).is_pending());
        assert!(poll_once(&mut recv).is_pending());

        tx.try_send(5).unwrap();
        assert_eq!(poll_once(&mut recv), Poll::Ready(Ok(5)));
    }

    #[test]
    fn test_cloned_handles_share_channel() {
        let (tx, rx) = unbounded();
        let tx2 = tx.clone();
        let rx2 = rx.clone();
        assert!(tx.same_channel(&tx2));

        tx.try_send(1).unwrap();
        tx2.try_send(2).unwrap();

        assert_eq!(rx2.try_recv(), Ok(1));
        assert_eq!(rx.try_recv(), Ok(2));
    }
}
