use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lbpl_stats::config::Config;
use lbpl_stats::export;
use lbpl_stats::fielding::{aggregate_completed, aggregate_fielding, top_n};
use lbpl_stats::scorecard::{parse_scorecards_json, MatchScorecard};
use lbpl_stats::scorecard_fetch::fetch_scorecards;

const USAGE: &str = "usage: lbpl_stats [SCORECARDS_JSON] [--all] [--top N] [--json] [--xlsx PATH]";

#[derive(Debug, Default)]
struct Args {
    input: Option<PathBuf>,
    include_all: bool,
    top: Option<usize>,
    json: bool,
    xlsx: Option<PathBuf>,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args> {
    let mut args = Args::default();
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--all" => args.include_all = true,
            "--json" => args.json = true,
            "--top" => {
                let value = raw.next().context("--top needs a number")?;
                args.top = Some(value.parse().with_context(|| format!("invalid --top {value}"))?);
            }
            "--xlsx" => {
                args.xlsx = Some(PathBuf::from(raw.next().context("--xlsx needs a path")?));
            }
            "-h" | "--help" => bail!(USAGE),
            flag if flag.starts_with("--") => bail!("unknown flag {flag}\n{USAGE}"),
            path => {
                if args.input.is_some() {
                    bail!("only one scorecards file is accepted\n{USAGE}");
                }
                args.input = Some(PathBuf::from(path));
            }
        }
    }
    Ok(args)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_PKG_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = Config::load();
    let args = parse_args(std::env::args().skip(1))?;

    let scorecards = load_scorecards(&config, args.input.as_ref())?;
    let tallies = if args.include_all {
        aggregate_fielding(&scorecards)
    } else {
        aggregate_completed(&scorecards)
    };
    let tallies = top_n(tallies, args.top.or(config.leaderboard_top));

    if let Some(path) = args.xlsx.as_ref() {
        let report = export::export_xlsx(path, &tallies, scorecards.len())?;
        tracing::info!(
            rows = report.rows,
            scorecards = report.scorecards,
            "xlsx written"
        );
    }

    if args.json {
        println!("{}", export::to_json(&tallies)?);
    } else {
        print!("{}", export::render_table(&tallies));
    }
    Ok(())
}

fn load_scorecards(config: &Config, input: Option<&PathBuf>) -> Result<Vec<MatchScorecard>> {
    match input {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            let rows = parse_scorecards_json(&raw)
                .with_context(|| format!("parse {}", path.display()))?;
            tracing::info!(path = %path.display(), rows = rows.len(), "scorecards loaded");
            Ok(rows)
        }
        None => fetch_scorecards(&config.backend()?),
    }
}
