mod bandwidth;
mod command;
mod config;
mod error;
mod metric;
mod report;
mod softlayer_client;
mod time_range;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::command::{bandwidth_report, BandwidthRequest};
use crate::config::Config;
use crate::report::OutputFormat;
use crate::softlayer_client::SoftLayerClient;
use crate::time_range::{SummaryPeriod, TimeRange};

/// Bandwidth data over a date range. Bandwidth is listed in GB.
///
/// Using just a date might get you times off by 1 hour, use T00:01 to get
/// just the specific days data. Timezones can also be included with the
/// YYYY-MM-DDTHH:mm:ss.00000-HH:mm format.
///
/// Example: hw-bandwidth 1234 -s 2019-05-01T00:01 -e 2019-05-02T00:00:01.00000-12:00
#[derive(Parser)]
#[command(name = "hw-bandwidth", version)]
struct Cli {
    /// Hardware id
    identifier: String,

    /// Start Date YYYY-MM-DD, YYYY-MM-DDTHH:mm:ss
    #[arg(short = 's', long, alias = "start_date")]
    start_date: String,

    /// End Date YYYY-MM-DD, YYYY-MM-DDTHH:mm:ss
    #[arg(short = 'e', long, alias = "end_date")]
    end_date: String,

    /// 300, 600, 1800, 3600, 43200 or 86400 seconds
    #[arg(short = 'p', long, alias = "summary_period", default_value_t = SummaryPeriod::DEFAULT_SECS)]
    summary_period: u32,

    /// Only show the summary table
    #[arg(short = 'q', long, alias = "quite_summary")]
    quiet_summary: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Config file, defaults to ~/.softlayer.toml
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, env = "SL_USERNAME")]
    username: Option<String>,

    #[arg(long, env = "SL_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "SL_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    /// Log requests and aggregation details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "hw_bandwidth=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(cli.username, cli.api_key, cli.endpoint_url);
    let client = SoftLayerClient::new(&config).context("Failed to create API client")?;

    let request = BandwidthRequest {
        identifier: cli.identifier,
        time_range: TimeRange::new(&cli.start_date, &cli.end_date),
        period: SummaryPeriod::try_from(cli.summary_period)?,
        quiet_summary: cli.quiet_summary,
    };

    for table in bandwidth_report(&client, &request).await? {
        println!("{}", table.render(cli.format)?);
    }
    Ok(())
}
