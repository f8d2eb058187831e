use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use crate::{ActorState, Error, Result, status::AtomicActorState};

/// Handle to an actor running on its own named OS thread.
///
/// Returned by [`Generator::spawn`] and [`Worker::spawn`]. The handle can
/// observe the actor's live [`ActorState`] and join it for its report.
///
/// [`Generator::spawn`]: crate::Generator::spawn
/// [`Worker::spawn`]: crate::Worker::spawn
#[derive(Debug)]
pub struct ActorHandle<R> {
    name: &'static str,
    state: Arc<AtomicActorState>,
    thread: JoinHandle<R>,
}

impl<R> ActorHandle<R> {
    /// The actor's name, also used as its thread name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The actor's current state.
    pub fn state(&self) -> ActorState {
        self.state.load()
    }

    /// Returns `true` once the actor's thread has exited.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Waits for the actor to finish and returns its report.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActorPanicked`] if the actor's thread panicked.
    pub fn join(self) -> Result<R> {
        let name = self.name;
        self.thread
            .join()
            .map_err(|_| Error::ActorPanicked { actor: name })
    }
}

pub(crate) fn spawn<R, F>(
    name: &'static str,
    state: Arc<AtomicActorState>,
    body: F,
) -> Result<ActorHandle<R>>
where
    R: Send + 'static,
    F: FnOnce() -> R + Send + 'static,
{
    let thread = thread::Builder::new()
        .name(name.to_owned())
        .spawn(body)
        .map_err(|source| Error::Spawn {
            actor: name,
            source,
        })?;

    #[cfg(feature = "tracing")]
    tracing::trace!("{name} thread started");

    Ok(ActorHandle {
        name,
        state,
        thread,
    })
}
