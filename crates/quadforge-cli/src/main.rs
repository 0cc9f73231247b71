//! quadforge CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "quadforge",
    version,
    about = "Exact-form quadratic practice item generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve ax² + bx + c = 0 exactly
    #[command(allow_negative_numbers = true)]
    Solve {
        /// Leading coefficient (non-zero)
        a: i64,
        /// Linear coefficient
        b: i64,
        /// Constant term
        c: i64,
    },

    /// Build one multiple-choice question
    #[command(allow_negative_numbers = true)]
    Quiz {
        a: i64,
        b: i64,
        c: i64,

        /// Seed for the choice layout
        #[arg(long)]
        seed: Option<u64>,

        /// Show the mistake model behind each wrong option
        #[arg(long)]
        explain: bool,

        /// Print the question as JSON
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate questions for an item set
    Generate {
        /// Path to .toml item set or directory
        #[arg(long)]
        item_set: PathBuf,

        /// Seed for the choice layouts (overrides set and config seeds)
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, text, all
        #[arg(long)]
        format: Option<String>,

        /// Filter by tags
        #[arg(long)]
        filter: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate item set TOML files
    Validate {
        /// Path to item set file or directory
        #[arg(long)]
        item_set: PathBuf,
    },

    /// Check that correct answers land uniformly across A–D
    #[command(allow_negative_numbers = true)]
    Audit {
        a: i64,
        b: i64,
        c: i64,

        /// Number of questions to generate
        #[arg(long, default_value = "2000")]
        trials: u64,

        /// First seed; trial i uses seed + i
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Check a typed answer against the real roots
    #[command(allow_negative_numbers = true)]
    Check {
        a: i64,
        b: i64,
        c: i64,

        /// The answer to check, e.g. "-2+√3" or "(1+sqrt5)/2"
        #[arg(long, allow_hyphen_values = true)]
        answer: String,
    },

    /// Compare correct answers between two reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Exit code 1 if any answer changed
        #[arg(long)]
        fail_on_drift: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and example item set
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quadforge=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Solve { a, b, c } => commands::solve::execute(a, b, c),
        Commands::Quiz {
            a,
            b,
            c,
            seed,
            explain,
            json,
            config,
        } => commands::quiz::execute(a, b, c, seed, explain, json, config),
        Commands::Generate {
            item_set,
            seed,
            output,
            format,
            filter,
            config,
        } => commands::generate::execute(item_set, seed, output, format, filter, config),
        Commands::Validate { item_set } => commands::validate::execute(item_set),
        Commands::Audit {
            a,
            b,
            c,
            trials,
            seed,
        } => commands::audit::execute(a, b, c, trials, seed),
        Commands::Check { a, b, c, answer } => commands::check::execute(a, b, c, answer),
        Commands::Compare {
            baseline,
            current,
            fail_on_drift,
            format,
        } => commands::compare::execute(baseline, current, fail_on_drift, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
