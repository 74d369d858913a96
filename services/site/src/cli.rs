use crate::infra::RatingsSource;
use crate::server;
use crate::table::{render_table, ExpansionState, LOAD_FAILURE};
use clap::{Args, Parser, Subcommand};
use retro_ratings::config::AppConfig;
use retro_ratings::error::AppError;
use retro_ratings::ratings::write_csv;
use retro_ratings::telemetry;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Retro Ratings",
    about = "Rank retro game reviews and serve the ratings table",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the ranked ratings table
    Table(TableArgs),
    /// Write the ranked ratings as CSV
    Export(ExportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the ratings document path
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TableArgs {
    /// Override the ratings document path
    #[arg(long)]
    data: Option<PathBuf>,
    /// Show the score breakdown of the row at this index (repeatable)
    #[arg(long = "expand", value_name = "INDEX")]
    expand: Vec<usize>,
    /// Show every score breakdown
    #[arg(long, conflicts_with = "expand")]
    expand_all: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Override the ratings document path
    #[arg(long)]
    data: Option<PathBuf>,
    /// Destination file (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Table(args) => run_table(args).await,
        Command::Export(args) => run_export(args).await,
    }
}

/// Loads config, applies a `--data` override, and starts logging.
pub(crate) fn prepare(data: Option<PathBuf>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = data {
        config.ratings.data_path = path;
    }
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

async fn run_table(args: TableArgs) -> Result<(), AppError> {
    let TableArgs {
        data,
        expand,
        expand_all,
    } = args;

    let config = prepare(data)?;
    let source = RatingsSource::new(&config.ratings);
    let table = match source.load().await {
        Ok(table) => table,
        Err(err) => {
            eprintln!("{LOAD_FAILURE}");
            return Err(err.into());
        }
    };

    let expansion = if expand_all {
        ExpansionState::all(&table.rows)
    } else {
        expand.into_iter().collect()
    };

    print!("{}", render_table(&table, &expansion));
    Ok(())
}

async fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let ExportArgs { data, output } = args;

    let config = prepare(data)?;
    let source = RatingsSource::new(&config.ratings);
    let table = source.load().await?;
    let scored = source.presenter().build_scored_list(&table.dataset.records);

    match output {
        Some(path) => {
            let file = File::create(&path)?;
            write_csv(&scored, BufWriter::new(file))?;
            info!(path = %path.display(), rows = scored.len(), "exported ratings");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_csv(&scored, &mut handle)?;
            handle.flush()?;
        }
    }

    Ok(())
}
