//! The consuming actor.

use core::{fmt, time::Duration};
use std::{sync::Arc, time::Instant};

use crate::{
    ActorHandle, ActorState, ConsumeStatus, Result, SharedStorage, actor, status::AtomicActorState,
};

#[cfg(test)]
mod tests;

/// Thread name of a spawned worker.
pub const WORKER_NAME: &str = "worker";

/// What a [`Worker`] did over its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    /// Items taken from the storage and processed.
    pub processed: usize,
    /// How many times the worker found the storage empty and had to wait.
    pub waits: usize,
    /// Time from entering `Running` to reaching `Finished`.
    pub elapsed: Duration,
}

/// Pops items from a [`SharedStorage`] and processes them until the storage
/// is drained.
///
/// Each iteration first tries a non-blocking [`consume`]. An item is
/// processed immediately and the loop continues with no pause. When the
/// stack is empty the worker enters [`ActorState::Waiting`] and blocks in
/// [`wait_for_item`], which only reports [`ConsumeStatus::Drained`] once the
/// stack is empty *and* the producer has called [`finish`]. That is the
/// worker's sole exit.
///
/// [`consume`]: SharedStorage::consume
/// [`wait_for_item`]: SharedStorage::wait_for_item
/// [`finish`]: SharedStorage::finish
#[derive(Default)]
pub struct Worker {
    state: Arc<AtomicActorState>,
}

impl Worker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ActorState {
        self.state.load()
    }

    /// Runs the worker to completion on the calling thread, handing every
    /// item to `process`.
    pub fn run<T, P>(self, storage: &SharedStorage<T>, mut process: P) -> WorkerReport
    where
        P: FnMut(T),
    {
        let state = self.state;
        state.store(ActorState::Running);
        let started = Instant::now();
        let mut processed = 0;
        let mut waits = 0;

        loop {
            let item = match storage.consume() {
                Some(item) => item,
                None => {
                    state.store(ActorState::Waiting);
                    waits += 1;
                    #[cfg(feature = "tracing")]
                    tracing::debug!("storage empty, waiting");

                    match storage.wait_for_item() {
                        ConsumeStatus::Ready { item } => {
                            state.store(ActorState::Running);
                            item
                        }
                        ConsumeStatus::Drained | ConsumeStatus::TimedOut => break,
                    }
                }
            };
            process(item);
            processed += 1;
        }

        state.store(ActorState::Finished);
        let report = WorkerReport {
            processed,
            waits,
            elapsed: started.elapsed(),
        };
        #[cfg(feature = "tracing")]
        tracing::info!(
            processed = report.processed,
            waits = report.waits,
            "worker finished"
        );
        report
    }

    /// Starts the worker on a new thread named [`WORKER_NAME`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spawn`](crate::Error::Spawn) if the thread could not
    /// be started.
    pub fn spawn<T, P>(
        self,
        storage: Arc<SharedStorage<T>>,
        process: P,
    ) -> Result<ActorHandle<WorkerReport>>
    where
        T: Send + 'static,
        P: FnMut(T) + Send + 'static,
    {
        let state = Arc::clone(&self.state);
        actor::spawn(WORKER_NAME, state, move || self.run(&storage, process))
    }
}

impl fmt::Debug for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worker")
            .field("state", &self.state())
            .finish()
    }
}
