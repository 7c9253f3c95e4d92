//! LeverWatch CLI — compute the daily signal from price CSVs.
//!
//! Commands:
//! - `signal` — run the engine over a price and a benchmark CSV, print the
//!   alert, optionally export the per-bar series
//! - `params` — print the effective (validated) configuration as TOML

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

use leverwatch_core::data::load_csv;
use leverwatch_core::engine::PositionState;
use leverwatch_core::export::{export_json, export_signals_csv};
use leverwatch_core::indicators::PercentileMode;
use leverwatch_core::{generate, EngineConfig, SignalReport};

#[derive(Parser)]
#[command(
    name = "leverwatch",
    about = "LeverWatch CLI — daily signal engine for a leveraged ETF"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute signals and print the alert for the latest bar.
    Signal {
        /// Price CSV for the traded symbol (date,open,high,low,close[,volume]).
        #[arg(long)]
        price: PathBuf,

        /// Benchmark CSV used by the trend gate.
        #[arg(long)]
        benchmark: PathBuf,

        /// Path to a TOML config file. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Start date (YYYY-MM-DD). Overrides the config.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Overrides the config.
        #[arg(long)]
        end: Option<String>,

        /// Write the per-bar signal series as CSV.
        #[arg(long)]
        export_csv: Option<PathBuf>,

        /// Write the full report as JSON.
        #[arg(long)]
        export_json: Option<PathBuf>,

        /// Rank ATR only against values up to each bar.
        #[arg(long, default_value_t = false)]
        expanding_percentile: bool,
    },
    /// Print the effective configuration as TOML.
    Params {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Signal {
            price,
            benchmark,
            config,
            start,
            end,
            export_csv,
            export_json,
            expanding_percentile,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(start) = start.as_deref() {
                config.start_date = Some(parse_date("--start", start)?);
            }
            if let Some(end) = end.as_deref() {
                config.end_date = Some(parse_date("--end", end)?);
            }
            if expanding_percentile {
                config.strategy.percentile_mode = PercentileMode::Expanding;
            }
            run_signal_cmd(
                &config,
                &price,
                &benchmark,
                export_csv.as_deref(),
                export_json.as_deref(),
            )
        }
        Commands::Params { config } => run_params_cmd(config.as_deref()),
    }
}

/// Logs go to stderr so stdout carries only the alert.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_date(flag: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("{flag}: expected YYYY-MM-DD, got '{value}'"))
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn run_signal_cmd(
    config: &EngineConfig,
    price_path: &Path,
    benchmark_path: &Path,
    csv_out: Option<&Path>,
    json_out: Option<&Path>,
) -> Result<()> {
    let price = load_csv(price_path)
        .with_context(|| format!("failed to read price CSV {}", price_path.display()))?;
    let benchmark = load_csv(benchmark_path)
        .with_context(|| format!("failed to read benchmark CSV {}", benchmark_path.display()))?;

    let report = generate(config, price, benchmark).context("signal run failed")?;

    if let Some(path) = csv_out {
        let csv = export_signals_csv(&report.signals)?;
        std::fs::write(path, csv)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "signals CSV written");
    }
    if let Some(path) = json_out {
        let json = export_json(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "report JSON written");
    }

    print_alert(&report);
    Ok(())
}

fn print_alert(report: &SignalReport) {
    println!("Subject: {}", report.alert.subject);
    println!();
    print!("{}", report.alert.body);

    if let PositionState::Long(pos) = &report.final_state {
        println!();
        println!("--- Open Position ---");
        println!("Entry:   ${:.2} on {}", pos.entry, pos.entry_date);
        println!("Stop:    ${:.2}", pos.stop);
        println!("Target:  ${:.2}", pos.target);
        println!("Trail:   ${:.2}", pos.trail.level());
    }
}

fn run_params_cmd(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    config.validate().context("invalid configuration")?;
    let text = toml::to_string_pretty(&config).context("failed to render config")?;
    print!("{text}");
    Ok(())
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
    fn signal_flags_parse() {
        let cli = Cli::try_parse_from([
            "leverwatch",
            "signal",
            "--price",
            "tqqq.csv",
            "--benchmark",
            "qqq.csv",
            "--start",
            "2020-01-02",
            "--expanding-percentile",
        ])
        .unwrap();
        match cli.command {
            Commands::Signal {
                price,
                start,
                expanding_percentile,
                export_csv,
                ..
            } => {
                assert_eq!(price, PathBuf::from("tqqq.csv"));
                assert_eq!(start.as_deref(), Some("2020-01-02"));
                assert!(expanding_percentile);
                assert!(export_csv.is_none());
            }
            Commands::Params { .. } => panic!("expected signal"),
        }
    }

    #[test]
    fn bad_date_is_reported_with_flag() {
        let err = parse_date("--start", "01/02/2020").unwrap_err();
        assert!(err.to_string().contains("--start"));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leverwatch.toml");
        std::fs::write(&path, "symbol = \"SOXL\"\n[strategy]\nshort_ma = 10\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.symbol, "SOXL");
        assert_eq!(config.strategy.short_ma, 10);
    }

    #[test]
    fn signal_command_writes_exports() {
        let dir = tempfile::tempdir().unwrap();
        let mut csv = String::from("Date,Open,High,Low,Close,Volume\n");
        for d in 1..=28 {
            csv.push_str(&format!("2024-02-{d:02},100,101,99,100,1000\n"));
        }
        let price = dir.path().join("price.csv");
        std::fs::write(&price, &csv).unwrap();

        let out_csv = dir.path().join("signals.csv");
        let out_json = dir.path().join("report.json");
        run_signal_cmd(
            &EngineConfig::default(),
            &price,
            &price,
            Some(&out_csv),
            Some(&out_json),
        )
        .unwrap();

        let written = std::fs::read_to_string(&out_csv).unwrap();
        assert_eq!(written.lines().count(), 29);
        assert!(std::fs::read_to_string(&out_json)
            .unwrap()
            .contains("\"schema_version\""));
    }
}
