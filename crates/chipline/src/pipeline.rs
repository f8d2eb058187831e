//! Composition root: wires one storage, one generator and one worker.

use core::time::Duration;
use std::{sync::Arc, time::Instant};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Chip, Error, Generator, GeneratorConfig, RandomChips, Result, SharedStorage, Source, Worker,
};


/// Everything needed to run a [`Pipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub generator: GeneratorConfig,
    /// Soldering time per unit of [`ChipKind::weight`](crate::ChipKind::weight).
    pub solder_unit: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            solder_unit: Duration::from_secs(1),
        }
    }
}

impl PipelineConfig {
    /// Rejects configurations that cannot run sensibly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when the generator would produce in a
    /// tight loop: a zero interval over a non-zero run with no item cap.
    pub fn validate(&self) -> Result<()> {
        let generator = &self.generator;
        if generator.interval.is_zero()
            && !generator.run_for.is_zero()
            && generator.max_items.is_none()
        {
            return Err(Error::InvalidConfig {
                reason: "a zero interval needs either a zero duration or an item cap".to_owned(),
            });
        }
        Ok(())
    }
}

/// Totals for a full pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineReport {
    pub produced: usize,
    pub soldered: usize,
    /// Times the worker found the storage empty and waited.
    pub worker_waits: usize,
    pub elapsed: Duration,
}

/// A generator and a worker joined by one [`SharedStorage`] of chips.
///
/// # Example
/// ```
/// use chipline::{GeneratorConfig, Pipeline, PipelineConfig};
/// use core::time::Duration;
///
/// let config = PipelineConfig {
///     generator: GeneratorConfig {
///         run_for: Duration::from_millis(20),
///         interval: Duration::from_millis(5),
///         max_items: None,
///     },
///     solder_unit: Duration::ZERO,
/// };
///
/// let report = Pipeline::new(config).unwrap().run().unwrap();
/// assert_eq!(report.produced, report.soldered);
/// ```
#[derive(Debug)]
pub struct Pipeline<S = RandomChips> {
    config: PipelineConfig,
    source: S,
}

impl Pipeline<RandomChips> {
    /// Builds a pipeline that makes random chips.
    ///
    /// # Errors
    ///
    /// See [`PipelineConfig::validate`].
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Self::with_source(config, RandomChips)
    }
}

impl<S> Pipeline<S>
where
    S: Source<Chip> + Send + 'static,
{
    /// Builds a pipeline around a custom chip source.
    ///
    /// # Errors
    ///
    /// See [`PipelineConfig::validate`].
    pub fn with_source(config: PipelineConfig, source: S) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, source })
    }

    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Starts the worker, then the generator, and blocks until both finish.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spawn`] if either thread cannot be started and
    /// [`Error::ActorPanicked`] if either actor panicked.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
    pub fn run(self) -> Result<PipelineReport> {
        let Self { config, source } = self;
        let started = Instant::now();
        let storage = Arc::new(SharedStorage::<Chip>::new());

        let solder_unit = config.solder_unit;
        let worker = Worker::new().spawn(Arc::clone(&storage), move |chip: Chip| {
            chip.solder(solder_unit);
        })?;

        let generator = match Generator::new(source, config.generator).spawn(Arc::clone(&storage))
        {
            Ok(generator) => generator,
            Err(e) => {
                // Nothing will ever be produced; let the worker drain and exit.
                storage.finish();
                let _ = worker.join();
                return Err(e);
            }
        };

        let generated = generator.join();
        let worked = worker.join();
        let generated = generated?;
        let worked = worked?;

        let report = PipelineReport {
            produced: generated.produced,
            soldered: worked.processed,
            worker_waits: worked.waits,
            elapsed: started.elapsed(),
        };
        #[cfg(feature = "tracing")]
        tracing::info!(
            produced = report.produced,
            soldered = report.soldered,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "pipeline finished"
        );
        Ok(report)
    }
}
