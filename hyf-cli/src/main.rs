//! Command line entry point for the harvest yield forecast toolkit.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "hyf-cli",
    version,
    about = "Fetch, generate and normalize harvest yield forecasts"
)]
struct Cli {
    /// Show progress lines (same as RUST_LOG=info)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: hyf_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins when set explicitly
    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    hyf_cmd::run(cli.command).await
}
