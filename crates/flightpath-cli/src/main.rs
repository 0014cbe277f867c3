use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use flightpath_cli::commands::airport::{handle_airport_command, AirportArgs};
use flightpath_cli::commands::route::{handle_route_command, RouteArgs};
use flightpath_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Flight route planning with layover caps and ground hops")]
struct Cli {
    /// Override the dataset directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest route between two airports.
    Route(RouteArgs),
    /// Show the details of one airport.
    Airport(AirportArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Command::Route(args) => handle_route_command(cli.data_dir.as_deref(), cli.format, args),
        Command::Airport(args) => {
            handle_airport_command(cli.data_dir.as_deref(), cli.format, args)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
