//! The producing actor.

use core::{fmt, num::NonZeroUsize, time::Duration};
use std::{sync::Arc, thread, time::Instant};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    ActorHandle, ActorState, Result, SharedStorage, Source, actor, status::AtomicActorState,
};


/// Thread name of a spawned generator.
pub const GENERATOR_NAME: &str = "generator";

/// How long and how fast a [`Generator`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Wall-clock time after which the production loop stops.
    pub run_for: Duration,
    /// Pause after each item produced inside the loop.
    pub interval: Duration,
    /// Optional cap on the total number of items, final step included.
    pub max_items: Option<NonZeroUsize>,
}

impl Default for GeneratorConfig {
    /// Twenty seconds of production, one item every two seconds.
    fn default() -> Self {
        Self {
            run_for: Duration::from_secs(20),
            interval: Duration::from_secs(2),
            max_items: None,
        }
    }
}

/// What a [`Generator`] did over its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorReport {
    /// Items pushed into the storage.
    pub produced: usize,
    /// Time from entering `Running` to signaling completion.
    pub elapsed: Duration,
}

/// Produces items from a [`Source`] into a [`SharedStorage`] on a timer.
///
/// The generator moves `Idle → Running → Finished`. While running it makes
/// an item, produces it and sleeps for [`GeneratorConfig::interval`], until
/// [`GeneratorConfig::run_for`] has elapsed (or only one item is left under
/// [`GeneratorConfig::max_items`]). It then performs one final production
/// step, so at least one item is always emitted, and calls
/// [`SharedStorage::finish`] to release the consumer.
///
/// Running consumes the generator: a finished generator cannot be restarted.
///
/// # Example
/// ```
/// use chipline::{Generator, GeneratorConfig, SharedStorage};
/// use core::time::Duration;
///
/// let storage = SharedStorage::new();
/// let config = GeneratorConfig {
///     run_for: Duration::ZERO,
///     ..GeneratorConfig::default()
/// };
///
/// let report = Generator::new(|| 'x', config).run(&storage);
/// assert_eq!(report.produced, 1);
/// assert!(storage.is_finished());
/// ```
pub struct Generator<S> {
    source: S,
    config: GeneratorConfig,
    state: Arc<AtomicActorState>,
}

impl<S> Generator<S> {
    pub fn new(source: S, config: GeneratorConfig) -> Self {
        Self {
            source,
            config,
            state: Arc::new(AtomicActorState::new()),
        }
    }

    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn state(&self) -> ActorState {
        self.state.load()
    }

    /// Runs the generator to completion on the calling thread.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
    pub fn run<T>(self, storage: &SharedStorage<T>) -> GeneratorReport
    where
        S: Source<T>,
        T: fmt::Display,
    {
        let Self {
            mut source,
            config,
            state,
        } = self;

        // Release the consumer even if the source panics mid-run.
        let _finish = FinishOnDrop(storage);

        state.store(ActorState::Running);
        let started = Instant::now();
        let deadline = started.checked_add(config.run_for);
        let loop_budget = config.max_items.map(|max| max.get() - 1);

        let mut produced = 0;
        while deadline.is_none_or(|deadline| Instant::now() < deadline)
            && loop_budget.is_none_or(|budget| produced < budget)
        {
            produce_one(&mut source, storage, &mut produced);
            thread::sleep(config.interval);
        }
        produce_one(&mut source, storage, &mut produced);

        storage.finish();
        state.store(ActorState::Finished);

        let report = GeneratorReport {
            produced,
            elapsed: started.elapsed(),
        };
        #[cfg(feature = "tracing")]
        tracing::info!(
            produced = report.produced,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "generator finished"
        );
        report
    }

    /// Starts the generator on a new thread named [`GENERATOR_NAME`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spawn`](crate::Error::Spawn) if the thread could not
    /// be started.
    pub fn spawn<T>(self, storage: Arc<SharedStorage<T>>) -> Result<ActorHandle<GeneratorReport>>
    where
        S: Source<T> + Send + 'static,
        T: fmt::Display + Send + 'static,
    {
        let state = Arc::clone(&self.state);
        actor::spawn(GENERATOR_NAME, state, move || self.run(&storage))
    }
}

impl<S> fmt::Debug for Generator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("config", &self.config)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

fn produce_one<S, T>(source: &mut S, storage: &SharedStorage<T>, produced: &mut usize)
where
    S: Source<T>,
    T: fmt::Display,
{
    let item = source.make();
    *produced += 1;
    #[cfg(feature = "tracing")]
    tracing::info!(produced = *produced, "generated {item}");
    storage.produce(item);
}

struct FinishOnDrop<'a, T>(&'a SharedStorage<T>);

impl<T> Drop for FinishOnDrop<'_, T> {
    fn drop(&mut self) {
        self.0.finish();
    }
}
