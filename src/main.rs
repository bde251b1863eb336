//! seshat CLI: rule-quality metrics over knowledge-graph triples.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use seshat::eval::{BatchEvaluator, EvalConfig, PcaStrategy};
use seshat::graph::TripleDict;
use seshat::io;
use seshat::rule::{filter_rules, Var};

#[derive(Parser)]
#[command(name = "seshat", version, about = "Rule-quality metrics for mined knowledge-graph rules")]
struct Cli {
    /// Materialization triple file (s \t p \t o per line).
    #[arg(long, global = true)]
    materialization: Option<PathBuf>,

    /// Indexed split files (count header, then `s o p` rows). Repeatable.
    #[arg(long = "split", global = true)]
    splits: Vec<PathBuf>,

    /// Worker threads; defaults to available cores.
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a rule file and write measured metrics alongside claimed ones.
    Evaluate {
        /// Rule file, one rule per line.
        #[arg(long)]
        rules: PathBuf,

        /// Output record file (5-column TSV).
        #[arg(long)]
        output: PathBuf,

        /// PCA denominator strategy: `enumerative` or `degree-threshold`.
        #[arg(long, default_value = "enumerative")]
        pca_strategy: PcaStrategy,

        /// Drop rules with claimed head coverage below this.
        #[arg(long)]
        min_hc: Option<f64>,

        /// Drop rules with claimed PCA confidence below this.
        #[arg(long)]
        min_pca: Option<f64>,

        /// Also print outcomes as JSON to stdout.
        #[arg(long)]
        json: bool,
    },

    /// Test every relation for asymmetry: rel(a,b) <= rel(b,a) anti-joined.
    Asymmetry {
        /// Output record file.
        #[arg(long)]
        output: PathBuf,

        /// Functional variable for the PCA estimate (`a` or `b`).
        #[arg(long, default_value = "a")]
        functional_variable: String,
    },
}

fn load_dict(cli: &Cli) -> Result<TripleDict> {
    let mut dict = TripleDict::new();
    if let Some(ref path) = cli.materialization {
        dict.extend(io::load_materialization(path)?);
    }
    for path in &cli.splits {
        dict.extend(io::load_indexed_split(path)?);
    }
    if dict.is_empty() {
        miette::bail!("no triples loaded; pass --materialization and/or --split");
    }
    Ok(dict)
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .into_diagnostic()?;
    }

    match &cli.command {
        Commands::Evaluate {
            rules,
            output,
            pca_strategy,
            min_hc,
            min_pca,
            json,
        } => {
            let dict = load_dict(&cli)?;
            let loaded = io::load_rules(rules)?;
            let kept = filter_rules(loaded, *min_hc, *min_pca);

            let evaluator = BatchEvaluator::new(
                &dict,
                EvalConfig {
                    strategy: *pca_strategy,
                },
            );
            let outcomes = evaluator.evaluate_all(&kept);

            io::write_records(output, &outcomes)?;
            if *json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&outcomes).into_diagnostic()?
                );
            }
            println!("Evaluated {} rule(s) -> {}", outcomes.len(), output.display());
        }

        Commands::Asymmetry {
            output,
            functional_variable,
        } => {
            let fv = functional_variable
                .chars()
                .next()
                .and_then(Var::from_char)
                .ok_or_else(|| miette::miette!("functional variable must be `a` or `b`"))?;

            let dict = load_dict(&cli)?;
            let evaluator = BatchEvaluator::new(&dict, EvalConfig::default());

            let results = evaluator.evaluate_all_asymmetries(fv);
            let outcomes: Vec<seshat::eval::RuleOutcome> = results
                .into_iter()
                .map(|(relation, metrics)| seshat::eval::RuleOutcome {
                    id: format!("NOT: {relation}(b,a) => {relation}(a,b)"),
                    claimed_hc: 0.0,
                    claimed_pca: 0.0,
                    metrics,
                })
                .collect();

            io::write_records(output, &outcomes)?;
            println!(
                "Tested {} relation(s) for asymmetry -> {}",
                outcomes.len(),
                output.display()
            );
        }
    }

    Ok(())
}
