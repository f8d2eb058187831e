use anyhow::bail;
use chipline::{GeneratorConfig, PipelineConfig};
use clap::Parser;
use core::{num::NonZeroUsize, time::Duration};

/// Runtime configuration for the `chipline` binary.
///
/// Every value can come from a CLI flag or an environment variable (a `.env`
/// file in the working directory is loaded first). The defaults reproduce
/// the reference scenario: twenty seconds of production, a chip every two
/// seconds, one second of soldering per unit of chip weight.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "chipline",
    version,
    about = "Generates chips on one thread and solders them on another, newest first"
)]
pub struct CliArgs {
    /// How long the generator keeps producing, in milliseconds.
    ///
    /// One final chip is always produced after this window closes.
    ///
    /// Environment variable: `CHIPLINE_RUN_FOR_MS`
    #[arg(long, env = "CHIPLINE_RUN_FOR_MS", default_value_t = 20_000)]
    pub run_for_ms: u64,

    /// Pause between two produced chips, in milliseconds.
    ///
    /// Environment variable: `CHIPLINE_INTERVAL_MS`
    #[arg(long, env = "CHIPLINE_INTERVAL_MS", default_value_t = 2_000)]
    pub interval_ms: u64,

    /// Soldering time per unit of chip weight, in milliseconds. Small chips
    /// weigh 1, medium 2 and big 3.
    ///
    /// Environment variable: `CHIPLINE_SOLDER_UNIT_MS`
    #[arg(long, env = "CHIPLINE_SOLDER_UNIT_MS", default_value_t = 1_000)]
    pub solder_unit_ms: u64,

    /// Stop after this many chips even if the run window is still open.
    ///
    /// Environment variable: `CHIPLINE_MAX_CHIPS`
    #[arg(long, env = "CHIPLINE_MAX_CHIPS")]
    pub max_chips: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pipeline: PipelineConfig,
}

impl TryFrom<CliArgs> for AppConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let max_items = match args.max_chips {
            None => None,
            Some(0) => bail!("CHIPLINE_MAX_CHIPS must be greater than 0"),
            Some(n) => NonZeroUsize::new(n),
        };

        if args.interval_ms == 0 && args.run_for_ms > 0 && max_items.is_none() {
            bail!(
                "CHIPLINE_INTERVAL_MS is 0 with a {}ms run and no CHIPLINE_MAX_CHIPS; \
                 the generator would never pause",
                args.run_for_ms
            );
        }

        let pipeline = PipelineConfig {
            generator: GeneratorConfig {
                run_for: Duration::from_millis(args.run_for_ms),
                interval: Duration::from_millis(args.interval_ms),
                max_items,
            },
            solder_unit: Duration::from_millis(args.solder_unit_ms),
        };
        pipeline.validate()?;

        Ok(Self { pipeline })
    }
}
