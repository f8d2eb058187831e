//! # Telemetry
//!
//! Console logging for the `chipline` binary via `tracing-subscriber`.
//!
//! Every line carries a local wall-clock timestamp rendered as
//! [`TIMESTAMP_FORMAT`] and the name of the thread that emitted it
//! (`generator` or `worker`), so interleaving between the two actors is easy
//! to follow.
//!
//! ## Filtering
//!
//! Verbosity is controlled with `RUST_LOG` and defaults to `info`, which shows
//! every generated and soldered chip. Use `RUST_LOG=debug` to also see the
//! worker entering its wait and the storage being finished.
//!
//! ```bash
//! RUST_LOG=debug cargo run --bin chipline -- --run-for-ms 2000 --interval-ms 200
//! ```

use tracing_subscriber::{
    EnvFilter, fmt::time::ChronoLocal, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Local time as hours, minutes, seconds and four fractional digits, e.g.
/// `9:41:07.1234`.
pub const TIMESTAMP_FORMAT: &str = "%-H:%M:%S%.4f";

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_thread_names(true)
                .with_target(false)
                .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_owned())),
        )
        .try_init()?;
    Ok(())
}
