use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use topinfo::config::{Config, load_config};
use topinfo::error::ConfigError;
use topinfo::event::{EventSink, JsonLinesSink};
use topinfo::monitor::ProcessListMonitor;
use topinfo::package::PayloadCompressor;
use topinfo::schedule::{Tick, Ticker};
use topinfo::system::collector::{Collector, ProcessSource};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "topinfo",
    about = "Samples the process list and emits compressed top-info events"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sampling interval in seconds
    #[arg(long)]
    interval: Option<u64>,

    /// Run a single sampling cycle and exit.
    #[arg(long, default_value_t = false)]
    once: bool,

    /// Emit logs as JSON lines.
    #[arg(long, default_value_t = false)]
    json_logs: bool,

    /// Append events to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let (config, config_error) = load_config_for_cli(&cli);
    topinfo::logging::init(&config.logging)?;
    if let Some(err) = config_error {
        warn!(error = %err, "using default config");
    }

    let sink: Box<dyn EventSink> = match &config.output.path {
        Some(path) => Box::new(JsonLinesSink::append(path)?),
        None => Box::new(JsonLinesSink::stdout()),
    };
    let interval = config.monitor.interval();
    let mut monitor = ProcessListMonitor::new(Collector::new(), sink, interval);

    if cli.once {
        return match monitor.tick() {
            Some(_) => Ok(()),
            None => Err(eyre!("process list cycle failed")),
        };
    }

    info!(interval_secs = interval.as_secs(), "starting process list monitor");
    run(&mut monitor, interval).await;
    info!("process list monitor stopped");

    Ok(())
}

async fn run<S, E, C>(monitor: &mut ProcessListMonitor<S, E, C>, interval: Duration)
where
    S: ProcessSource,
    E: EventSink,
    C: PayloadCompressor,
{
    let mut ticker = Ticker::new(interval);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            tick = ticker.next() => match tick {
                Some(Tick::Sample) => {
                    monitor.tick();
                }
                None => break,
            },
            result = &mut shutdown => {
                if let Err(err) = result {
                    warn!(error = %err, "failed to listen for shutdown signal");
                }
                break;
            }
        }
    }
}

fn load_config_for_cli(cli: &Cli) -> (Config, Option<ConfigError>) {
    let (mut config, error) = load_config(cli.config.as_deref());

    if let Some(secs) = cli.interval {
        config.monitor.interval_seconds = secs;
    }
    if cli.json_logs {
        config.logging.json = true;
    }
    if let Some(ref output) = cli.output {
        config.output.path = Some(output.clone());
    }

    (config, error)
}
