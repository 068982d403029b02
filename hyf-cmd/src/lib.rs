//! Command implementations for the harvest forecast CLI.
//!
//! Provides subcommands for fetching and normalizing predictions from the
//! forecast backend, generating deterministic offline forecasts, and
//! ingesting uploaded CSV prediction files.

use clap::Subcommand;

pub mod fetch;
pub mod ingest;
pub mod mock;

#[derive(Subcommand)]
pub enum Command {
    /// Fetch predictions from the forecast backend and normalize them
    Fetch {
        /// Base URL of the prediction service
        #[arg(short = 'u', long)]
        base_url: String,

        /// Site to select ("all" for the aggregate across sites)
        #[arg(short = 's', long, default_value = "all")]
        site: String,

        /// Sector to select ("all" for the aggregate across sectors)
        #[arg(short = 'c', long, default_value = "all")]
        sector: String,

        /// Output path for the normalized forecast JSON (stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Generate a deterministic mock forecast without contacting a backend
    Mock {
        /// Site to generate for
        #[arg(short = 's', long, default_value = "all")]
        site: String,

        /// Sector to generate for
        #[arg(short = 'c', long, default_value = "all")]
        sector: String,

        /// First day of the 7-day window (YYYY-MM-DD, today if omitted)
        #[arg(short = 'a', long)]
        as_of: Option<String>,

        /// Output path for the forecast JSON (stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Normalize an uploaded CSV prediction file
    Ingest {
        /// Path to the CSV file (date + value/predicted columns)
        #[arg(short = 'i', long)]
        input: String,

        /// Output path for the normalized forecast JSON (stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Fetch {
            base_url,
            site,
            sector,
            output,
        } => fetch::run_fetch(&base_url, &site, &sector, output.as_deref()).await,
        Command::Mock {
            site,
            sector,
            as_of,
            output,
        } => mock::run_mock(&site, &sector, as_of.as_deref(), output.as_deref()),
        Command::Ingest { input, output } => ingest::run_ingest(&input, output.as_deref()),
    }
}

/// Write a normalized forecast as pretty JSON to a file or stdout.
pub(crate) fn write_result(
    result: &hyf_core::forecast::ForecastResult,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)?;
            log::info!("Forecast written to {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
