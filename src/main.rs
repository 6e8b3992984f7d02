use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

use u_seating::anneal::AnnealConfig;
use u_seating::io::{read_roster_path, write_assignment_path, write_trace_path, RosterColumns};
use u_seating::plan::SeatingProblem;
use u_seating::score::ScoreConfig;

/// Assign participants to tables.
#[derive(Debug, Parser)]
#[command(name = "u-seating", version, about)]
struct Cli {
    /// Roster CSV with a header row.
    input: PathBuf,

    /// Number of tables.
    #[arg(short = 'm', long = "number-of-tables")]
    tables: usize,

    #[arg(long, default_value = "Name")]
    name_column: String,

    /// Categorical attribute columns, in weight order.
    #[arg(
        long = "attribute",
        value_delimiter = ',',
        default_value = "Primary Organization,Years at BNL,Career State"
    )]
    attributes: Vec<String>,

    #[arg(long, default_value = "Technical Interests")]
    topic_column: String,

    #[arg(long, default_value_t = ';')]
    separator: char,

    /// Diversity base per attribute.
    #[arg(long, value_delimiter = ',', default_value = "1.4,1.2,1.2")]
    feature_bases: Vec<f64>,

    #[arg(long, default_value_t = 1.4)]
    topic_base: f64,

    /// Linear weights: one per attribute, then the topic term.
    #[arg(long, value_delimiter = ',', default_value = "1,1,1,0.5")]
    weights: Vec<f64>,

    #[arg(long, default_value_t = 1 << 8)]
    steps: usize,

    #[arg(long, default_value_t = 1 << 10)]
    microsteps: usize,

    /// Temperature scale A in T = -A ln(t).
    #[arg(long, default_value_t = 0.5)]
    temperature_scale: f64,

    #[arg(long)]
    seed: Option<u64>,

    /// Independent runs; the best final score is kept.
    #[arg(long, default_value_t = 1)]
    restarts: usize,

    /// Assignment CSV [default: table_assignment_<M>.csv]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Score trace CSV [default: table_assignment_<M>_score_log.csv]
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress logging.
    #[arg(short, long)]
    quiet: bool,
}

fn setup_logging(verbosity: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::OFF
    } else {
        match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let columns = RosterColumns {
        name: cli.name_column.clone(),
        attributes: cli.attributes.clone(),
        topics: cli.topic_column.clone(),
    };
    let records = read_roster_path(&cli.input, &columns)
        .with_context(|| format!("reading roster {}", cli.input.display()))?;
    let problem = SeatingProblem::with_separator(records, &cli.attributes, cli.separator)
        .context("encoding roster")?;
    info!(n = problem.participants(), m = cli.tables, "Loaded participants.");

    let score = ScoreConfig::new(cli.feature_bases.clone(), cli.topic_base, cli.weights.clone());
    let mut anneal = AnnealConfig::default()
        .with_steps(cli.steps)
        .with_microsteps(cli.microsteps)
        .with_temperature_scale(cli.temperature_scale);
    anneal.seed = cli.seed;

    let plan = problem
        .solve_restarts(cli.tables, &score, &anneal, cli.restarts)
        .context("optimizing table assignment")?;

    for summary in plan.summaries() {
        println!("{summary}");
    }
    println!(
        "score {:.4} -> {:.4} (seed {})",
        plan.result().initial_score,
        plan.result().final_score,
        plan.result().seed
    );

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format!("table_assignment_{}.csv", cli.tables)));
    write_assignment_path(&output, &cli.attributes, &plan.export_records())
        .with_context(|| format!("writing {}", output.display()))?;

    let trace = cli
        .trace
        .unwrap_or_else(|| PathBuf::from(format!("table_assignment_{}_score_log.csv", cli.tables)));
    write_trace_path(&trace, plan.trace())
        .with_context(|| format!("writing {}", trace.display()))?;

    info!(assignment = %output.display(), trace = %trace.display(), "Wrote outputs.");
    Ok(())
}
