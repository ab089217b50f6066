//! `xes2csv`: convert an XES event log into a CSV table (one row per event)

use std::{ffi::OsString, path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use xes_csv::convert_xes_to_csv;

/// Convert an XES event log into a CSV table with one row per event
#[derive(Parser, Debug)]
#[command(name = "xes2csv", version, about)]
struct Cli {
    /// Path to the input .xes file
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Path of the CSV file to write (overwritten if it exists)
    #[arg(short, long, value_name = "PATH")]
    output: PathBuf,
}

/// Flags that are also accepted with a single dash (`-input`, `-output=...`)
const SINGLE_DASH_FLAGS: [&str; 2] = ["input", "output"];

fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some(s) if is_single_dash_flag(s) => OsString::from(format!("-{s}")),
            _ => arg,
        })
        .collect()
}

fn is_single_dash_flag(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    SINGLE_DASH_FLAGS.iter().any(|flag| {
        rest.strip_prefix(flag)
            .is_some_and(|value| value.is_empty() || value.starts_with('='))
    })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let summary = convert_xes_to_csv(&cli.input, &cli.output)
        .with_context(|| format!("could not convert {}", cli.input.display()))?;
    info!(
        rows = summary.rows,
        columns = summary.columns,
        "Wrote output to {:?}",
        cli.output
    );
    Ok(())
}
