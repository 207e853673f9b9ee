use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "ecofront developers",
    version,
    about = "ecofront - Impact aggregation and GWP/NPV trade-off analysis for feedstock allocation.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sweep the feedstock allocation and evaluate GWP and NPV for every scenario.
    Evaluate(EvaluateArgs),
    /// Extract the Pareto front from a pre-evaluated scenario table.
    Pareto(ParetoArgs),
    /// Break down the impact of one functional unit by upstream exchange group.
    Decompose(DecomposeArgs),
    /// Load and check a project configuration and its inventory database.
    Validate(ValidateArgs),
}

/// Options shared by every command that reads a project configuration.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Path to the project configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Override the inventory database path from the config file.
    #[arg(long, value_name = "PATH")]
    pub inventory: Option<PathBuf>,

    /// Override the total amount of feedstock to allocate.
    #[arg(long, value_name = "FLOAT")]
    pub total: Option<f64>,

    /// Override the sweep step.
    #[arg(long, value_name = "FLOAT")]
    pub step: Option<f64>,

    /// Override the number of top contributing processes retained per result.
    #[arg(long, value_name = "INT")]
    pub top_contributors: Option<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S sweep.step=5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Path for the evaluated-point table (CSV).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Also run the trade-off analysis and write the Pareto front to this path.
    #[arg(long, value_name = "PATH")]
    pub front: Option<PathBuf>,
}

/// Arguments for the `pareto` subcommand.
#[derive(Args, Debug)]
pub struct ParetoArgs {
    /// Path to the pre-evaluated scenario table (CSV).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the Pareto front table (CSV).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Zero-based column holding the total GWP.
    #[arg(long, value_name = "INDEX", default_value_t = ecofront::core::io::table::DEFAULT_GWP_COLUMN)]
    pub gwp_column: usize,

    /// Zero-based column holding the total NPV.
    #[arg(long, value_name = "INDEX", default_value_t = ecofront::core::io::table::DEFAULT_NPV_COLUMN)]
    pub npv_column: usize,

    /// Allocation percentage column, as PRODUCT=INDEX. Required; can be used multiple times.
    #[arg(short = 'a', long = "allocation", required = true, value_name = "PRODUCT=INDEX")]
    pub allocation_columns: Vec<String>,

    /// Treat the first row as data instead of a header.
    #[arg(long)]
    pub no_header: bool,

    /// Minimum NPV (exclusive) for a scenario to be feasible.
    #[arg(long, value_name = "FLOAT", default_value_t = 0.0, allow_negative_numbers = true)]
    pub min_npv: f64,

    /// Maximum GWP (exclusive) for a scenario to be feasible.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub max_gwp: Option<f64>,
}

/// Arguments for the `decompose` subcommand.
#[derive(Args, Debug)]
pub struct DecomposeArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Scenario to decompose, by index (e.g. 3) or code (e.g. S003).
    #[arg(long, required = true, value_name = "SCENARIO")]
    pub scenario: String,

    /// Product whose functional unit is decomposed.
    #[arg(long, required = true, value_name = "NAME")]
    pub product: String,

    /// Impact method key ('a|b|c'); defaults to the objective method.
    #[arg(short, long, value_name = "KEY")]
    pub method: Option<String>,

    /// Path for the grouped contribution (waterfall) table.
    #[arg(long, required = true, value_name = "PATH")]
    pub waterfall: PathBuf,

    /// Path for the top contributing processes (bar) table.
    #[arg(long, required = true, value_name = "PATH")]
    pub bar: PathBuf,
}

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}
