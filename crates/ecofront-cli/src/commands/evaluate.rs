use super::{load_inventory, load_project};
use super::pareto::print_trade_off;
use crate::cli::EvaluateArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use ecofront::core::io::table;
use ecofront::engine::error::EngineError;
use ecofront::engine::progress::ProgressReporter;
use ecofront::workflows;
use tracing::{info, warn};

pub fn run(args: EvaluateArgs, progress_handler: &CliProgressHandler) -> Result<()> {
    let config = load_project(&args.project)?;
    let database = load_inventory(&config.inventory_path)?;
    let economics = config.require_economics()?;

    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Evaluating the allocation sweep of '{}' under {} method(s)...",
        config.evaluation.sweep.swept_product,
        config.evaluation.methods.len()
    );
    let result = workflows::evaluate::run(&config.evaluation, &database, economics, &reporter)?;

    let products = result.products();
    table::write_points_to_path(&args.output, &result.points, &products)
        .map_err(EngineError::from)?;
    info!(path = ?args.output, points = result.points.len(), "Evaluated points written.");
    println!(
        "✓ {} scenario(s) written to: {}",
        result.points.len(),
        args.output.display()
    );
    if result.scenarios.rejected > 0 {
        println!(
            "  {} sweep candidate(s) skipped because a product would receive no feedstock.",
            result.scenarios.rejected
        );
    }

    if let Some(front_path) = &args.front {
        let trade_off = workflows::trade_off::run(
            &result.points,
            |point| config.feasibility.is_feasible(point),
            &reporter,
        );
        if trade_off.front.is_empty() {
            warn!("No feasible scenario. Writing an empty front table.");
        }
        table::write_front_to_path(front_path, trade_off.front.members(), &products)
            .map_err(EngineError::from)?;
        println!(
            "✓ Pareto front ({} member(s)) written to: {}",
            trade_off.front.len(),
            front_path.display()
        );
        print_trade_off(&trade_off);
    }

    Ok(())
}
