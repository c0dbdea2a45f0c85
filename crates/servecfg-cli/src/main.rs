//! servecfg CLI
//!
//! Command-line driver for the model configuration validation harness.
//! Runs the pipeline on a single model directory, or the golden fixture
//! sets, with the exit status reflecting whether any model failed.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use console::style;
use tracing::info;

use servecfg_harness::{
    ArtifactBundleInit, BundleInitializer, GoldenTestRunner, NoopBundleInit, RunSummary,
    validate_init,
};

/// Model serving configuration validation toolkit.
#[derive(Parser)]
#[command(name = "servecfg")]
#[command(about = "Golden-output validation for model serving configurations")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true, default_value = "info")]
    log_level: String,

    /// Log format (pretty, compact, json)
    #[arg(long, value_name = "FORMAT", global = true, default_value = "compact")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and initialize a single model directory
    Check {
        /// Model directory to validate
        model_dir: PathBuf,

        /// Derive missing configuration fields from the version artifacts
        #[arg(long)]
        autofill: bool,

        /// Skip the artifact check and accept every initialized model
        #[arg(long)]
        noop_init: bool,
    },

    /// Run one golden fixture set
    Golden {
        /// Fixture set path, relative to the fixture root
        test_set: String,

        /// Derive missing configuration fields from the version artifacts
        #[arg(long)]
        autofill: bool,

        /// Force every model's platform before running
        #[arg(long, value_name = "NAME")]
        platform: Option<String>,

        /// Fixture root; falls back to SERVECFG_FIXTURE_ROOT
        #[arg(long, value_name = "PATH")]
        fixture_root: Option<PathBuf>,

        /// Skip the artifact check and accept every initialized model
        #[arg(long)]
        noop_init: bool,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run both fixed fixture sets (sanity, then autofill)
    GoldenAll {
        /// Platform forced onto the sanity fixture set
        #[arg(long, value_name = "NAME")]
        platform: String,

        /// Fixture root; falls back to SERVECFG_FIXTURE_ROOT
        #[arg(long, value_name = "PATH")]
        fixture_root: Option<PathBuf>,

        /// Skip the artifact check and accept every initialized model
        #[arg(long)]
        noop_init: bool,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli.log_level, &cli.log_format);

    match run(cli) {
        Ok(all_passed) => {
            if all_passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("{} {err:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every model passed.
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Check { model_dir, autofill, noop_init } => {
            match validate_init(&model_dir, autofill, initializer(noop_init)) {
                Ok(rendered) => {
                    print!("{rendered}");
                    println!("{}", style("PASS").green().bold());
                    Ok(true)
                }
                Err(err) => {
                    eprintln!("{err}");
                    println!("{}", style("FAIL").red().bold());
                    Ok(false)
                }
            }
        }
        Commands::Golden { test_set, autofill, platform, fixture_root, noop_init, json } => {
            let mut runner = runner_for(fixture_root)?;
            let summary = runner
                .validate_one(&test_set, autofill, platform.as_deref(), initializer(noop_init))
                .with_context(|| format!("golden run over '{test_set}'"))?;
            finish(&summary, json)
        }
        Commands::GoldenAll { platform, fixture_root, noop_init, json } => {
            let mut runner = runner_for(fixture_root)?;
            let summary = runner
                .validate_all(&platform, initializer(noop_init))
                .context("golden run over the fixed fixture sets")?;
            finish(&summary, json)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(true)
        }
    }
}

fn initializer(noop: bool) -> &'static dyn BundleInitializer {
    if noop { &NoopBundleInit } else { &ArtifactBundleInit }
}

fn runner_for(fixture_root: Option<PathBuf>) -> Result<GoldenTestRunner> {
    match fixture_root {
        Some(root) => Ok(GoldenTestRunner::new(root)),
        None => GoldenTestRunner::from_env().map_err(Into::into),
    }
}

fn finish(summary: &RunSummary, json: bool) -> Result<bool> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        let failed = summary.failures.len();
        let passed = summary.tested - failed;
        println!(
            "{} passed, {} failed, {} tested",
            style(passed).green(),
            if failed > 0 { style(failed).red() } else { style(failed).dim() },
            summary.tested
        );
        for model in &summary.failures {
            println!("  {} {model}", style("FAIL").red().bold());
        }
    }
    info!(tested = summary.tested, failed = summary.failures.len(), "run finished");
    Ok(summary.passed())
}

/// Install the global tracing subscriber.
fn setup_logging(level: &str, format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match format {
        "json" => subscriber.json().init(),
        "pretty" => subscriber.pretty().init(),
        _ => subscriber.compact().init(),
    }
}
