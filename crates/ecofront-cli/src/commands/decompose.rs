use super::{load_inventory, load_project};
use crate::cli::DecomposeArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use crate::utils::progress::CliProgressHandler;
use ecofront::core::io::reports;
use ecofront::engine::error::EngineError;
use ecofront::engine::progress::ProgressReporter;
use ecofront::workflows;
use tracing::info;

pub fn run(args: DecomposeArgs, progress_handler: &CliProgressHandler) -> Result<()> {
    let scenario =
        parser::parse_scenario(&args.scenario).map_err(|e| CliError::Argument(e.to_string()))?;
    let method = args
        .method
        .as_deref()
        .map(parser::parse_method_key)
        .transpose()
        .map_err(|e| CliError::Argument(e.to_string()))?;

    let config = load_project(&args.project)?;
    let database = load_inventory(&config.inventory_path)?;
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Decomposing the impact of '{}' in scenario {}...",
        args.product, scenario
    );
    let decomposition = workflows::decompose::run(
        &config.evaluation,
        &database,
        scenario,
        &args.product,
        method.as_ref(),
        &config.grouping,
        &reporter,
    )?;

    reports::write_waterfall_to_path(&args.waterfall, &decomposition.waterfall)
        .map_err(EngineError::from)?;
    reports::write_bar_to_path(&args.bar, &decomposition.bar).map_err(EngineError::from)?;
    info!(
        waterfall = ?args.waterfall,
        bar = ?args.bar,
        "Decomposition tables written."
    );

    println!(
        "✓ {} under {}: total {:.4}",
        decomposition.functional_unit.name, decomposition.method, decomposition.total
    );
    for (group, score) in &decomposition.waterfall {
        println!("  {:<24} {:>14.4}", group, score);
    }
    println!(
        "  Tables written to: {} and {}",
        args.waterfall.display(),
        args.bar.display()
    );
    Ok(())
}
