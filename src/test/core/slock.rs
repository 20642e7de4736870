#[cfg(test)]
mod tests_slock {
    use crate::core::slock::SLock;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    // ==================== BASIC ====================

    #[test]
    fn test_lock_unlock_basic() {
        let lock = SLock::new(0u32);
        assert!(!lock.is_locked());

        let mut guard = lock.lock();
        *guard += 1;
        assert!(lock.is_locked());

        drop(guard);
        assert!(!lock.is_locked());
        assert_eq!(*lock.lock(), 1);
    }

    // ==================== CONTENTION ====================

    #[test]
    fn test_lock_protects_data() {
        const THREADS: usize = 8;
        const ITERS: usize = 1_000;
        let lock = Arc::new(SLock::new(0usize));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let lock = Arc::clone(&lock);
                thread::spawn(move || {
                    for _ in 0..ITERS {
                        let mut guard = lock.lock();
                        let val = *guard;
                        thread::yield_now();
                        *guard = val + 1;
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(*lock.lock(), THREADS * ITERS);
    }

    #[test]
    fn test_mutual_exclusion() {
        let lock = Arc::new(SLock::new(()));
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..6)
            .map(|_| {
                let lock = Arc::clone(&lock);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let _guard = lock.lock();
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_inside.fetch_max(now, Ordering::SeqCst);
                        thread::yield_now();
                        inside.fetch_sub(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    }
}
