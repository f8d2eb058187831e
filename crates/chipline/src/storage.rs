use core::{fmt, time::Duration};
use portable_atomic::{AtomicBool, Ordering};
use std::time::Instant;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Chip, ConcurrentStack, ConsumeStatus,
    sync::{self, Condvar},
};


/// The single point of coordination between a producer and a consumer.
///
/// `SharedStorage` wraps a [`ConcurrentStack`] and pairs the stack's mutex
/// with a condition variable (the monitor pattern). Producers call
/// [`produce`] and, once done, [`finish`]. Consumers either poll with
/// [`consume`] or block in [`wait_for_item`], which checks the stack, checks
/// the finished flag and starts waiting all under the same lock, so a push or
/// a finish can never slip in between the check and the wait.
///
/// # Example
/// ```
/// use chipline::{ConsumeStatus, SharedStorage};
/// use std::{sync::Arc, thread};
///
/// let storage = Arc::new(SharedStorage::new());
///
/// let consumer = {
///     let storage = Arc::clone(&storage);
///     thread::spawn(move || {
///         let mut taken = Vec::new();
///         while let ConsumeStatus::Ready { item } = storage.wait_for_item() {
///             taken.push(item);
///         }
///         taken
///     })
/// };
///
/// storage.produce(1);
/// storage.produce(2);
/// storage.finish();
///
/// let mut taken = consumer.join().unwrap();
/// taken.sort();
/// assert_eq!(taken, vec![1, 2]);
/// ```
///
/// [`produce`]: SharedStorage::produce
/// [`finish`]: SharedStorage::finish
/// [`consume`]: SharedStorage::consume
/// [`wait_for_item`]: SharedStorage::wait_for_item
pub struct SharedStorage<T = Chip> {
    stack: ConcurrentStack<T>,
    changed: Condvar,
    finished: AtomicBool,
}

impl<T> SharedStorage<T> {
    /// Creates an empty, unfinished storage.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty, unfinished storage whose stack has room for
    /// `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stack: ConcurrentStack::with_capacity(capacity),
            changed: Condvar::new(),
            finished: AtomicBool::new(false),
        }
    }

    /// Pushes `item` and wakes one waiting consumer.
    ///
    /// Items produced after [`finish`](Self::finish) are still stored, but a
    /// consumer that has already observed the storage as drained will not
    /// come back for them.
    pub fn produce(&self, item: T) {
        self.stack.push(item);
        self.changed.notify_one();
    }

    /// Pops the most recently produced item without waiting.
    pub fn consume(&self) -> Option<T> {
        self.stack.pop()
    }

    /// Marks production as complete and wakes every waiting consumer.
    ///
    /// The flag is written while holding the stack lock, so a consumer that
    /// found the stack empty is either already waiting (and gets woken) or
    /// has not checked yet (and will see the flag). Calling this more than
    /// once is harmless.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn finish(&self) {
        {
            let _items = self.stack.lock();
            self.finished.store(true, Ordering::Release);
        }
        self.changed.notify_all();
    }

    /// Returns `true` once [`finish`](Self::finish) has been called.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Returns `true` if no items are waiting to be consumed.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Returns the number of items waiting to be consumed.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Blocks until an item can be popped or the storage is drained.
    ///
    /// Returns [`ConsumeStatus::Ready`] with the top item as soon as one is
    /// available, and [`ConsumeStatus::Drained`] only when the stack is empty
    /// *and* the producer has called [`finish`](Self::finish). Spurious
    /// wakeups are absorbed by re-checking under the lock.
    pub fn wait_for_item(&self) -> ConsumeStatus<T> {
        let mut items = self.stack.lock();
        loop {
            if let Some(item) = items.pop() {
                return ConsumeStatus::Ready { item };
            }
            if self.finished.load(Ordering::Acquire) {
                return ConsumeStatus::Drained;
            }
            items = sync::wait(&self.changed, items);
        }
    }

    /// Like [`wait_for_item`](Self::wait_for_item), but returns
    /// [`ConsumeStatus::TimedOut`] if nothing could be taken within
    /// `timeout`.
    pub fn wait_for_item_timeout(&self, timeout: Duration) -> ConsumeStatus<T> {
        let deadline = Instant::now().checked_add(timeout);
        let mut items = self.stack.lock();
        loop {
            if let Some(item) = items.pop() {
                return ConsumeStatus::Ready { item };
            }
            if self.finished.load(Ordering::Acquire) {
                return ConsumeStatus::Drained;
            }
            let Some(deadline) = deadline else {
                items = sync::wait(&self.changed, items);
                continue;
            };
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return ConsumeStatus::TimedOut;
            }
            (items, _) = sync::wait_timeout(&self.changed, items, remaining);
        }
    }
}

impl<T> Default for SharedStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SharedStorage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedStorage")
            .field("len", &self.len())
            .field("finished", &self.is_finished())
            .finish()
    }
}
