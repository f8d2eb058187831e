use core::fmt;

use crate::sync::{self, Mutex, MutexGuard};


/// A lock-based last-in-first-out stack suitable for multi-threaded
/// environments.
///
/// Every operation takes the same exclusive lock, so pushes and pops are
/// linearizable: each appears to happen atomically relative to the others,
/// and items always come back in strict reverse order of insertion.
///
/// ## Features
/// - ✅ Thread-safe (`Send + Sync` whenever `T: Send`)
/// - ✅ Never blocks beyond the lock itself; an empty stack pops `None`
///
/// ## See Also
/// - [`SharedStorage`] which adds wait/notify on top of this stack.
///
/// [`SharedStorage`]: crate::SharedStorage
pub struct ConcurrentStack<T> {
    #[cfg(feature = "cache-padded")]
    items: crossbeam_utils::CachePadded<Mutex<Vec<T>>>,
    #[cfg(not(feature = "cache-padded"))]
    items: Mutex<Vec<T>>,
}

impl<T> ConcurrentStack<T> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Creates an empty stack with room for `capacity` items before the
    /// backing buffer reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity))
    }

    fn from_vec(items: Vec<T>) -> Self {
        Self {
            #[cfg(feature = "cache-padded")]
            items: crossbeam_utils::CachePadded::new(Mutex::new(items)),
            #[cfg(not(feature = "cache-padded"))]
            items: Mutex::new(items),
        }
    }

    /// Pushes `item` onto the top of the stack.
    ///
    /// # Example
    /// ```
    /// use chipline::ConcurrentStack;
    ///
    /// let stack = ConcurrentStack::new();
    /// stack.push("a");
    /// stack.push("b");
    /// assert_eq!(stack.pop(), Some("b"));
    /// ```
    pub fn push(&self, item: T) {
        self.lock().push(item);
    }

    /// Removes and returns the top item, or `None` if the stack is empty.
    pub fn pop(&self) -> Option<T> {
        self.lock().pop()
    }

    /// Returns a copy of the top item without removing it.
    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.lock().last().cloned()
    }

    /// Returns `true` if the stack holds no items.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns the number of items on the stack.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Locks the backing vector, whose last element is the top of the stack.
    ///
    /// Used by [`SharedStorage`](crate::SharedStorage) to check emptiness and
    /// wait on its condition variable under this very lock.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        #[cfg(feature = "cache-padded")]
        {
            sync::lock(&*self.items)
        }
        #[cfg(not(feature = "cache-padded"))]
        {
            sync::lock(&self.items)
        }
    }
}

impl<T> Default for ConcurrentStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ConcurrentStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentStack")
            .field("len", &self.len())
            .finish()
    }
}
