// src/cli.rs
//! `movie-trends` command line.
//!
//! Subcommands map one-to-one onto the library entry points:
//! `extract` → `scrape::run`, `trend` → `analysis::trend`,
//! `latest` → `analysis::latest`, `list` → `SnapshotStore::list`.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{self, WrapErr};
use serde::Serialize;

use crate::analysis;
use crate::config::consts::{MAX_ITEMS, STORE_DIR, TOP_N};
use crate::config::{AppOptions, ExtractOptions};
use crate::error::AggregateError;
use crate::progress::Progress;
use crate::render::{Renderer, StaticRenderer};
use crate::scrape;

#[derive(Parser, Debug)]
#[command(name = "movie-trends")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Snapshot the IMDb Most Popular Movies chart and track how it moves")]
pub struct Cli {
    /// Directory holding snapshot files
    #[arg(long, global = true, env = "MOVIE_TRENDS_STORE", default_value = STORE_DIR)]
    pub store: PathBuf,

    /// More log output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the chart, extract up to 10 movies, write one snapshot
    Extract {
        /// Extract from a saved, already-rendered page instead of a browser
        #[arg(long, value_name = "FILE")]
        from_html: Option<PathBuf>,

        /// Wait after navigation, in milliseconds
        #[arg(long, env = "MOVIE_TRENDS_SETTLE_MS")]
        settle_ms: Option<u64>,

        /// Extra document reads while fewer than 10 rows are rendered
        #[arg(long)]
        retries: Option<u32>,

        /// Chart URL
        #[arg(long)]
        url: Option<String>,
    },

    /// Per-snapshot mean score and vote count for the most persistent titles (JSON)
    Trend {
        /// How many titles to report
        #[arg(long, default_value_t = TOP_N)]
        top: usize,
    },

    /// Newest snapshot as a ranked list (JSON)
    Latest,

    /// Snapshots found in the store
    List,
}

/// How a successful invocation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// Nothing to report; the binary exits with 2.
    NoData,
}

pub fn run(cli: &Cli) -> eyre::Result<Outcome> {
    let app = app_options(cli);

    match &cli.command {
        Command::Extract { from_html, .. } => match from_html {
            Some(path) => {
                let renderer = StaticRenderer::from_file(path)
                    .wrap_err_with(|| format!("reading {}", path.display()))?;
                extract(&renderer, &app.extract, &app)
            }
            None => extract_live(&app.extract, &app),
        },
        Command::Trend { .. } => no_data_or(analysis::trend(&app.store(), &app.aggregate), |report| {
            for s in &report.skipped {
                eprintln!("skipped {}: {}", s.path.display(), s.reason);
            }
            print_json(report)
        }),
        Command::Latest => no_data_or(analysis::latest(&app.store()), print_json),
        Command::List => {
            let sources = app.store().list()?;
            let mut out = io::stdout().lock();
            for src in &sources {
                writeln!(out, "{}\t{}", src.captured_at, src.path.display())?;
            }
            Ok(if sources.is_empty() { Outcome::NoData } else { Outcome::Done })
        }
    }
}

/// Flags and environment folded onto the defaults.
pub fn app_options(cli: &Cli) -> AppOptions {
    let mut app = AppOptions { store_dir: cli.store.clone(), ..AppOptions::default() };

    match &cli.command {
        Command::Extract { from_html, settle_ms, retries, url } => {
            if from_html.is_some() { app.extract = ExtractOptions::offline(); }
            if let Some(ms) = settle_ms { app.extract.settle_delay = ms!(*ms); }
            if let Some(n) = retries { app.extract.readiness_retries = *n; }
            if let Some(u) = url { app.extract.url = u.clone(); }
        }
        Command::Trend { top } => app.aggregate.top_n = *top,
        Command::Latest | Command::List => {}
    }
    app
}

#[cfg(feature = "chrome")]
fn extract_live(opts: &ExtractOptions, app: &AppOptions) -> eyre::Result<Outcome> {
    extract(&crate::render::ChromeRenderer, opts, app)
}

#[cfg(not(feature = "chrome"))]
fn extract_live(_opts: &ExtractOptions, _app: &AppOptions) -> eyre::Result<Outcome> {
    eyre::bail!("built without the `chrome` feature; use --from-html <FILE>")
}

fn extract<R: Renderer>(renderer: &R, opts: &ExtractOptions, app: &AppOptions) -> eyre::Result<Outcome> {
    let mut progress = ConsoleProgress::default();
    let outcome = scrape::run(renderer, opts, &app.store(), Some(&mut progress))?;

    println!(
        "{}\t{} record(s), {} skipped",
        outcome.path.display(),
        outcome.snapshot.len(),
        outcome.skipped
    );
    Ok(Outcome::Done)
}

/// `NoData` / `EmptySnapshot` become exit code 2, anything else is an error.
fn no_data_or<T>(res: Result<T, AggregateError>, f: impl FnOnce(&T) -> eyre::Result<()>) -> eyre::Result<Outcome> {
    match res {
        Ok(v) => f(&v).map(|_| Outcome::Done),
        Err(e @ (AggregateError::NoData | AggregateError::EmptySnapshot(_))) => {
            eprintln!("{e}");
            Ok(Outcome::NoData)
        }
        Err(e) => Err(e.into()),
    }
}

fn print_json<T: Serialize>(value: &T) -> eyre::Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Row-by-row status on stderr.
#[derive(Default)]
struct ConsoleProgress {
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        if total < MAX_ITEMS {
            eprintln!("Only {total} of {MAX_ITEMS} chart rows found");
        }
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, index: usize, title: &str) {
        eprintln!("[{}/{}] {title}", index + 1, self.total);
    }

    fn item_failed(&mut self, index: usize, reason: &str) {
        eprintln!("[{}/{}] skipped: {reason}", index + 1, self.total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_map_onto_subcommands() {
        let cli = Cli::try_parse_from(["movie-trends", "--store", "/tmp/snaps", "trend", "--top", "3"]).unwrap();
        assert_eq!(cli.store, PathBuf::from("/tmp/snaps"));
        assert!(matches!(cli.command, Command::Trend { top: 3 }));

        let cli = Cli::try_parse_from(["movie-trends", "extract", "--from-html", "page.html", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Extract { from_html, retries, .. } => {
                assert_eq!(from_html, Some(PathBuf::from("page.html")));
                assert_eq!(retries, None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn flags_reach_the_options() {
        let cli = Cli::try_parse_from(["movie-trends", "trend", "--top", "3"]).unwrap();
        assert_eq!(app_options(&cli).aggregate.top_n, 3);

        let cli = Cli::try_parse_from(["movie-trends", "trend"]).unwrap();
        assert_eq!(app_options(&cli).aggregate.top_n, TOP_N);

        let cli = Cli::try_parse_from(["movie-trends", "extract", "--from-html", "p.html", "--retries", "2"]).unwrap();
        let app = app_options(&cli);
        assert_eq!(app.extract.settle_delay, std::time::Duration::ZERO);
        assert_eq!(app.extract.readiness_retries, 2);
    }

    #[test]
    fn age_band_json_name() {
        use crate::core::AgeBand;
        assert_eq!(serde_json::to_string(&AgeBand::AllAges).unwrap(), "\"All Ages\"");
        assert_eq!(serde_json::to_string(&AgeBand::PG13).unwrap(), "\"PG13\"");
    }
}
