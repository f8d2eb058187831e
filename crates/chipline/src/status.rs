use core::fmt;
use portable_atomic::{AtomicU8, Ordering};

/// Represents the result of waiting for an item on a [`SharedStorage`].
///
/// - [`ConsumeStatus::Ready`] carries the item that was popped.
/// - [`ConsumeStatus::Drained`] means the storage is empty and its producer
///   has finished, so nothing will ever arrive again.
/// - [`ConsumeStatus::TimedOut`] is only returned by the bounded wait and
///   means nothing arrived before the deadline, but more may still come.
///
/// # Example
///
/// ```
/// use chipline::{ConsumeStatus, SharedStorage};
///
/// let storage = SharedStorage::new();
/// storage.produce(7);
/// storage.finish();
///
/// assert_eq!(storage.wait_for_item(), ConsumeStatus::Ready { item: 7 });
/// assert_eq!(storage.wait_for_item(), ConsumeStatus::Drained);
/// ```
///
/// [`SharedStorage`]: crate::SharedStorage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeStatus<T> {
    /// An item was taken from the top of the stack.
    Ready {
        /// The popped item.
        item: T,
    },
    /// The backlog is empty and the producer has signaled completion.
    Drained,
    /// The bounded wait elapsed with nothing to take.
    TimedOut,
}

impl<T> ConsumeStatus<T> {
    /// Returns the item if one was taken.
    pub fn into_item(self) -> Option<T> {
        match self {
            Self::Ready { item } => Some(item),
            Self::Drained | Self::TimedOut => None,
        }
    }
}

/// Lifecycle of an actor thread.
///
/// A generator moves `Idle → Running → Finished`. A worker additionally
/// alternates between `Running` and `Waiting` while the backlog is empty.
/// `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ActorState {
    Idle = 0,
    Running = 1,
    Waiting = 2,
    Finished = 3,
}

impl ActorState {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Running,
            2 => Self::Waiting,
            3 => Self::Finished,
            _ => Self::Idle,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Waiting => "waiting",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for ActorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An [`ActorState`] that can be shared between the actor's thread and
/// observers.
#[derive(Debug)]
pub(crate) struct AtomicActorState(AtomicU8);

impl AtomicActorState {
    pub(crate) const fn new() -> Self {
        Self(AtomicU8::new(ActorState::Idle as u8))
    }

    pub(crate) fn load(&self) -> ActorState {
        ActorState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn store(&self, state: ActorState) {
        self.0.store(state as u8, Ordering::Release);
    }
}

impl Default for AtomicActorState {
    fn default() -> Self {
        Self::new()
    }
}
