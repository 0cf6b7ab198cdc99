//! spam-rs command line
//!
//! ```bash
//! # Train on data/train/{ham,ham2,spam}, test on data/test/{ham,spam}
//! spam-rs evaluate --train data/train --test data/test
//!
//! # Train once, keep the model
//! spam-rs train --train data/train --output model.json
//!
//! # Re-use a saved model
//! spam-rs test --model model.json --test data/test --format json
//! spam-rs classify --model model.json message.eml inbox.mbox
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use spam_rs::config::{Config, LoggingConfig};
use spam_rs::corpus::{is_mbox, open_source, read_document};
use spam_rs::output::{write_report, OutputFormat};
use spam_rs::spam::{Document, ModelSnapshot, SpamModel, DECISION_THRESHOLD};
use spam_rs::worker::run_blocking;
use spam_rs::SpamDetector;

const DEFAULT_CONFIG_FILE: &str = "spam-rs.toml";

#[derive(Parser)]
#[command(name = "spam-rs")]
#[command(version, about = "Train and evaluate a Bayesian spam filter", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./spam-rs.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on a training root, then test on a test root
    Evaluate {
        /// Training root holding the ham and spam directories
        #[arg(long)]
        train: PathBuf,
        /// Test root holding the ham and spam directories
        #[arg(long)]
        test: PathBuf,
        /// Report format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
        /// Also write the trained model to this file
        #[arg(long)]
        save_model: Option<PathBuf>,
    },
    /// Train on a training root and save the model
    Train {
        /// Training root holding the ham and spam directories
        #[arg(long)]
        train: PathBuf,
        /// Model snapshot to write
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Test a saved model on a test root
    Test {
        /// Model snapshot to read
        #[arg(short, long)]
        model: PathBuf,
        /// Test root holding the ham and spam directories
        #[arg(long)]
        test: PathBuf,
        /// Report format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
    /// Score individual messages, directories or MBOX files
    Classify {
        /// Model snapshot to read
        #[arg(short, long)]
        model: PathBuf,
        /// Messages to score
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.logging, cli.verbose);

    info!("Starting spam-rs v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Evaluate {
            train,
            test,
            format,
            save_model,
        } => {
            let mut detector = SpamDetector::new(config.corpus);
            let (detector, report) = run_blocking(move || {
                let summary = detector.train_from_dir(&train);
                let report = detector.test_from_dir(&test).with_training(summary);
                (detector, report)
            })
            .await?;

            print_report(&report, format)?;

            if let Some(path) = save_model {
                save_snapshot(detector.model(), &path)?;
            }
        }
        Commands::Train { train, output } => {
            let mut detector = SpamDetector::new(config.corpus);
            let (detector, summary) = run_blocking(move || {
                let summary = detector.train_from_dir(&train);
                (detector, summary)
            })
            .await?;

            // each skip was already logged by its corpus
            println!(
                "Learned {} ham and {} spam documents ({} skipped)",
                summary.ham_documents,
                summary.spam_documents,
                summary.skipped.len()
            );
            save_snapshot(detector.model(), &output)?;
        }
        Commands::Test { model, test, format } => {
            let model = load_model(&model)?;
            let detector = SpamDetector::with_model(config.corpus, model);
            let report = run_blocking(move || detector.test_from_dir(&test)).await?;

            print_report(&report, format)?;
        }
        Commands::Classify { model, paths } => {
            let model = load_model(&model)?;
            let scored = run_blocking(move || classify_paths(&model, &paths)).await?;

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for (name, probability) in scored {
                let verdict = if probability >= DECISION_THRESHOLD { "spam" } else { "ham" };
                writeln!(out, "{:<30} {:<18.5} {}", name, probability, verdict)?;
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display())),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            Ok(Config::from_file(DEFAULT_CONFIG_FILE)?)
        }
        None => Ok(Config::default()),
    }
}

fn init_logging(config: &LoggingConfig, verbose: u8) {
    let default_filter = match verbose {
        0 => config.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.format.as_str() {
        "json" => builder.json().init(),
        "compact" => builder.compact().init(),
        _ => builder.pretty().init(),
    }
}

fn load_model(path: &Path) -> anyhow::Result<SpamModel> {
    let snapshot = ModelSnapshot::load(path)?;
    info!(
        "Loaded model trained at {} ({} ham, {} spam documents)",
        snapshot.trained_at, snapshot.ham_documents, snapshot.spam_documents
    );
    Ok(SpamModel::from_snapshot(snapshot))
}

fn save_snapshot(model: &SpamModel, path: &Path) -> anyhow::Result<()> {
    model
        .snapshot()
        .save(path)
        .with_context(|| format!("Failed to write model to {}", path.display()))?;
    info!("Model saved to {}", path.display());
    Ok(())
}

fn print_report(report: &spam_rs::EvaluationReport, format: OutputFormat) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report, format)?;
    Ok(())
}

/// Score every message found under `paths`; plain files are single messages
fn classify_paths(model: &SpamModel, paths: &[PathBuf]) -> Vec<(String, f64)> {
    let mut scored = Vec::new();

    for path in paths {
        if path.is_file() && !is_mbox(path) {
            match read_document(path) {
                Ok(doc) => scored.push(score(model, &doc)),
                Err(e) => warn!("Skipping unreadable document {}: {}", path.display(), e),
            }
            continue;
        }

        // directory and mbox sources log their own skips
        for doc in open_source(path) {
            scored.push(score(model, &doc));
        }
    }

    scored
}

fn score(model: &SpamModel, doc: &Document) -> (String, f64) {
    (doc.name.clone(), model.score(&doc.words()))
}
