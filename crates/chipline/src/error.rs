use std::io;

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `chipline` can emit.
///
/// The stack and storage operations themselves are total. Errors only come
/// from the edges: starting an actor thread, joining one that panicked, or
/// building a pipeline from a configuration that cannot run.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The operating system refused to start the actor's thread.
    #[error("failed to spawn the {actor} thread")]
    Spawn {
        /// Name of the actor whose thread could not be started.
        actor: &'static str,
        /// Underlying spawn failure.
        #[source]
        source: io::Error,
    },

    /// The actor's thread panicked before producing its report.
    #[error("the {actor} thread panicked")]
    ActorPanicked {
        /// Name of the actor that panicked.
        actor: &'static str,
    },

    /// The configuration was rejected before any thread was started.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Human-readable explanation of what was rejected.
        reason: String,
    },
}
