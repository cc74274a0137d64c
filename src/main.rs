use anyhow::{Context, Result};
use chess_tournaments::chess::{
    self, DirFetcher, Fetcher, HttpFetcher,
    fetch::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS},
    sink::Delim,
};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_TOURNAMENTS: [&str; 4] = [
    "vii-arena-loggichess-1171620/1",
    "vii-arena-loggichess-1171621/1",
    "vii-arena-loggichess-1171622/1",
    "vii-arena-loggichess-1171623/1",
];

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    Tsv,
}

impl From<Format> for Delim {
    fn from(f: Format) -> Self {
        match f {
            Format::Csv => Delim::Csv,
            Format::Tsv => Delim::Tsv,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "chess-tournaments", version)]
#[command(about = "Flatten chess.com tournament rounds into one row per game")]
#[command(after_help = "Environment:\n  CHESS_LOG   Log filter (e.g. warn, info, debug)")]
struct Cli {
    /// Tournament round identifiers, e.g. vii-arena-loggichess-1171620/1
    #[arg(value_name = "TOURNAMENT_ID")]
    tournaments: Vec<String>,

    #[arg(short, long, default_value = "processed_tournament_data.csv")]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Read saved responses (<id with '/' as '_'>.json) instead of calling the API
    #[arg(long, value_name = "DIR")]
    from_dir: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    chess::log::init(cli.verbose);

    let tournaments: Vec<String> = if cli.tournaments.is_empty() {
        DEFAULT_TOURNAMENTS.iter().map(|s| s.to_string()).collect()
    } else {
        cli.tournaments
    };

    let fetcher: Box<dyn Fetcher> = match &cli.from_dir {
        Some(dir) => {
            let fetcher = DirFetcher::new(dir);
            info!(dir = %fetcher.dir().display(), "replaying saved responses");
            Box::new(fetcher)
        }
        None => Box::new(
            HttpFetcher::new(&cli.base_url, Duration::from_secs(cli.timeout_secs))
                .context("creating HTTP client")?,
        ),
    };

    let scraped_at = Utc::now().naive_utc();
    let report = chess::run(fetcher.as_ref(), &tournaments, scraped_at)
        .context("processing tournaments")?;

    if !report.skipped.is_empty() {
        warn!(skipped = report.skipped.len(), "some games were skipped");
    }

    chess::write_table(&cli.output, &report.table, cli.format.into())
        .with_context(|| format!("writing {}", cli.output.display()))?;

    println!(
        "Wrote {} rows from {} tournaments to {}",
        report.table.len(),
        report.tournaments,
        cli.output.display()
    );
    Ok(())
}
