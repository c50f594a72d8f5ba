//! clusterval - Score a candidate clustering against a gold standard.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use giztoy_clusterval::{Baseline, Clustering, Evaluation, LoadOptions, evaluate, random_baseline};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Score a candidate clustering against a gold standard.
///
/// Both files hold one cluster per line (`label: item1 item2 ...`), or a
/// persisted structure when they end in .yaml, .yml or .json. The F-score
/// is printed to stdout.
#[derive(Parser, Debug)]
#[command(name = "clusterval")]
#[command(about = "Score a candidate clustering against a gold standard")]
#[command(version)]
struct Args {
    /// Load gold clustering from FILENAME
    #[arg(short, long, value_name = "FILENAME")]
    gold: PathBuf,

    /// Load candidate clustering from FILENAME
    #[arg(short, long, value_name = "FILENAME")]
    candidate: PathBuf,

    /// Drop items already seen in an earlier cluster while loading
    #[arg(long)]
    clean: bool,

    /// Print the best F value of every gold cluster after the score
    #[arg(long)]
    breakdown: bool,

    /// Print the full evaluation as JSON
    #[arg(long)]
    json: bool,

    /// Also score N random redistributions of the candidate
    #[arg(long, value_name = "N")]
    baseline: Option<usize>,

    /// Seed for --baseline (default: random)
    #[arg(long, requires = "baseline")]
    seed: Option<u64>,

    /// Debug logging to stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    evaluation: &'a Evaluation,
    #[serde(skip_serializing_if = "Option::is_none")]
    baseline: Option<Baseline>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let opts = LoadOptions {
        clean: args.clean,
        ..Default::default()
    };
    let gold = load(&args.gold, &opts, "gold")?;
    let candidate = load(&args.candidate, &opts, "candidate")?;

    let evaluation = evaluate(&gold, &candidate);
    tracing::debug!(
        f_score = evaluation.f_score,
        missing = evaluation.missing,
        "scored candidate"
    );

    let baseline = match args.baseline {
        Some(runs) => {
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Some(random_baseline(&gold, &candidate, runs, &mut rng)?)
        }
        None => None,
    };

    if args.json {
        let report = Report {
            evaluation: &evaluation,
            baseline,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", format_score(evaluation.f_score));

    if args.breakdown {
        for m in &evaluation.matches {
            println!(
                "{}\t{}\t{:.4}",
                m.label.as_deref().filter(|l| !l.is_empty()).unwrap_or("-"),
                m.size,
                m.f
            );
        }
        if evaluation.missing > 0 {
            println!("missing\t{}", evaluation.missing);
        }
    }

    if let Some(b) = baseline {
        println!(
            "baseline ({} runs): mean {:.4}, min {:.4}, max {:.4}",
            b.runs, b.mean, b.min, b.max
        );
    }

    Ok(())
}

/// Formats a score so whole values keep their decimal point (`1.0`, not `1`).
fn format_score(score: f64) -> String {
    format!("{score:?}")
}

fn load(path: &Path, opts: &LoadOptions, which: &str) -> Result<Clustering> {
    Clustering::load(path, opts)
        .with_context(|| format!("failed to load {} clustering from {}", which, path.display()))
}

fn init_logging(verbose: bool) {
    if verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}
