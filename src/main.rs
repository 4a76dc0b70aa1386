use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use delivery_ranking::api::{AppState, create_router};
use delivery_ranking::calculation::build_ranking;
use delivery_ranking::config::ConfigLoader;
use delivery_ranking::error::EngineError;
use delivery_ranking::ingest::parse_shifts_csv;
use delivery_ranking::telemetry::{self, TelemetryError};

#[derive(Parser, Debug)]
#[command(
    name = "delivery-ranking",
    about = "Score delivery shifts and serve the worker leaderboard",
    version
)]
struct Cli {
    /// Path to the service YAML file (defaults are used when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a shift spreadsheet and print the ranking as JSON
    Rank(RankArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured bind address
    #[arg(long)]
    bind: Option<String>,
}

#[derive(Args, Debug)]
struct RankArgs {
    /// CSV spreadsheet with one shift per row
    input: PathBuf,
    /// Print only the leaderboard instead of the full run with audit trace
    #[arg(long)]
    ranking_only: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    let loader = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::default(),
    };

    match cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()))
    {
        Command::Serve(args) => run_server(loader, args).await,
        Command::Rank(args) => run_rank(args),
    }
}

async fn run_server(loader: ConfigLoader, args: ServeArgs) -> Result<(), CliError> {
    telemetry::init(loader.telemetry())?;

    let loader = match args.bind {
        Some(bind) => loader.with_bind_address(bind),
        None => loader,
    };
    let address = loader.config().server.bind_address.clone();

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| CliError::Io {
            path: address.clone(),
            source,
        })?;
    info!(%address, "Delivery ranking service listening");

    let router = create_router(AppState::in_memory(loader));
    axum::serve(listener, router)
        .await
        .map_err(|source| CliError::Io {
            path: address,
            source,
        })
}

fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let path = args.input.display().to_string();
    let file = File::open(&args.input).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;

    let shifts = parse_shifts_csv(BufReader::new(file))?;
    let run = build_ranking(shifts);

    let output = if args.ranking_only {
        serde_json::to_string_pretty(&run.ranking)?
    } else {
        serde_json::to_string_pretty(&run)?
    };
    println!("{output}");
    Ok(())
}
