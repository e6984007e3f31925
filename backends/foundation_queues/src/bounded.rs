//! Bounded blocking queue built on one mutex and two condition variables.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::errors::{ProduceError, QueueError, QueueResult};
use crate::primitives::{
    lock_recover, wait_recover, wait_timeout_recover, CondVar, CondVarMutex, CondVarMutexGuard,
};

/// A fixed-capacity FIFO queue shared by any number of producers and consumers.
///
/// `produce` blocks while the queue holds `capacity` elements and `consume`
/// blocks while it holds none. Every successful operation broadcasts to the
/// opposite class of waiters, each of which re-checks its predicate before
/// proceeding, so the queue stays correct for arbitrary producer and consumer
/// counts.
///
/// Cloning returns another handle to the same queue.
///
/// # Closing
///
/// [`close`](Self::close) wakes every blocked caller. Blocked and later
/// producers get their item back in [`ProduceError::Closed`]. Consumers keep
/// draining the elements still stored and only see [`QueueError::Closed`]
/// once the queue is empty.
///
/// # Examples
///
/// ```
/// use foundation_queues::BoundedBlockingQueue;
/// use std::time::Duration;
///
/// let queue = BoundedBlockingQueue::new(1).unwrap();
/// queue.produce("x").unwrap();
///
/// assert_eq!(queue.try_consume(Duration::from_millis(10)), Ok(Some("x")));
/// assert_eq!(queue.try_consume(Duration::from_millis(10)), Ok(None));
/// ```
pub struct BoundedBlockingQueue<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    state: CondVarMutex<State<T>>,
    not_empty: CondVar,
    not_full: CondVar,
    capacity: usize,
}

struct State<T> {
    buffer: VecDeque<T>,
    closed: bool,
}

impl<T> Clone for BoundedBlockingQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for BoundedBlockingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedBlockingQueue")
            .field("capacity", &self.inner.capacity)
            .field("len", &self.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl<T> BoundedBlockingQueue<T> {
    /// Creates an empty queue that holds at most `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> QueueResult<Self> {
        if capacity < 1 {
            return Err(QueueError::InvalidCapacity(capacity));
        }

        Ok(Self {
            inner: Arc::new(Inner {
                state: CondVarMutex::new(State {
                    buffer: VecDeque::with_capacity(capacity),
                    closed: false,
                }),
                not_empty: CondVar::new(),
                not_full: CondVar::new(),
                capacity,
            }),
        })
    }

    /// Appends `item` to the back of the queue, blocking while it is full.
    ///
    /// # Errors
    ///
    /// Returns [`ProduceError::Closed`] with the item if the queue is closed
    /// before space becomes available.
    pub fn produce(&self, item: T) -> Result<(), ProduceError<T>> {
        let mut guard = lock_recover(&self.inner.state);

        while !guard.closed && guard.buffer.len() == self.inner.capacity {
            guard = wait_recover(&self.inner.not_full, guard);
        }

        if guard.closed {
            return Err(ProduceError::Closed(item));
        }

        self.push_locked(guard, item);
        Ok(())
    }

    /// Like [`produce`](Self::produce) but waits at most `timeout` for space.
    ///
    /// The timeout covers the whole wait, not each individual wake-up.
    ///
    /// # Errors
    ///
    /// Returns [`ProduceError::Timeout`] with the item if no space became
    /// available in time, or [`ProduceError::Closed`] if the queue was closed.
    pub fn try_produce(&self, item: T, timeout: Duration) -> Result<(), ProduceError<T>> {
        let deadline = Instant::now().checked_add(timeout);
        let mut guard = lock_recover(&self.inner.state);

        while !guard.closed && guard.buffer.len() == self.inner.capacity {
            let Some(remaining) = remaining_until(deadline) else {
                return Err(ProduceError::Timeout(item));
            };
            guard = wait_timeout_recover(&self.inner.not_full, guard, remaining).0;
        }

        if guard.closed {
            return Err(ProduceError::Closed(item));
        }

        self.push_locked(guard, item);
        Ok(())
    }

    /// Removes and returns the front element, blocking while the queue is empty.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Closed`] once the queue is closed and drained.
    pub fn consume(&self) -> QueueResult<T> {
        let mut guard = lock_recover(&self.inner.state);

        while !guard.closed && guard.buffer.is_empty() {
            guard = wait_recover(&self.inner.not_empty, guard);
        }

        self.pop_locked(guard).ok_or(QueueError::Closed)
    }

    /// Like [`consume`](Self::consume) but waits at most `timeout` for an element.
    ///
    /// Returns `Ok(None)` when the timeout elapses first, leaving the queue
    /// untouched. The timeout covers the whole wait for an element, not just
    /// acquiring the lock.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Closed`] once the queue is closed and drained.
    pub fn try_consume(&self, timeout: Duration) -> QueueResult<Option<T>> {
        let deadline = Instant::now().checked_add(timeout);
        let mut guard = lock_recover(&self.inner.state);

        while !guard.closed && guard.buffer.is_empty() {
            let Some(remaining) = remaining_until(deadline) else {
                return Ok(None);
            };
            guard = wait_timeout_recover(&self.inner.not_empty, guard, remaining).0;
        }

        match self.pop_locked(guard) {
            Some(item) => Ok(Some(item)),
            None => Err(QueueError::Closed),
        }
    }

    /// Closes the queue and wakes every blocked producer and consumer.
    ///
    /// Returns `true` if this call closed the queue, `false` if it was
    /// already closed.
    pub fn close(&self) -> bool {
        let mut guard = lock_recover(&self.inner.state);
        if guard.closed {
            return false;
        }
        guard.closed = true;

        self.inner.not_empty.notify_all();
        self.inner.not_full.notify_all();
        drop(guard);
        true
    }

    /// Returns whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        lock_recover(&self.inner.state).closed
    }

    /// Returns the number of stored elements.
    ///
    /// This is a snapshot: by the time the caller looks at it other threads
    /// may have changed the queue, so never branch on it and then assume it
    /// still holds.
    #[must_use]
    pub fn len(&self) -> usize {
        lock_recover(&self.inner.state).buffer.len()
    }

    /// Snapshot of whether the queue holds no elements. See [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of whether the queue holds `capacity` elements. See [`len`](Self::len).
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() == self.inner.capacity
    }

    /// Returns the maximum number of stored elements.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    // Caller has waited for space and the queue is open.
    fn push_locked(&self, mut guard: CondVarMutexGuard<'_, State<T>>, item: T) {
        debug_assert!(guard.buffer.len() < self.inner.capacity);
        guard.buffer.push_back(item);

        self.inner.not_empty.notify_all();
        drop(guard);
    }

    // Returns `None` only for a closed and empty queue.
    fn pop_locked(&self, mut guard: CondVarMutexGuard<'_, State<T>>) -> Option<T> {
        let item = guard.buffer.pop_front()?;

        self.inner.not_full.notify_all();
        drop(guard);
        Some(item)
    }
}

/// `None` once the deadline has passed. A missing deadline means the timeout
/// overflowed `Instant` and is treated as unbounded.
fn remaining_until(deadline: Option<Instant>) -> Option<Duration> {
    match deadline {
        Some(deadline) => {
            let remaining = deadline.saturating_duration_since(Instant::now());
            (!remaining.is_zero()).then_some(remaining)
        }
        None => Some(Duration::MAX),
    }
}
