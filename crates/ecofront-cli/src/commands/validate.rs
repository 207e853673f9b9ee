use super::{load_inventory, load_project};
use crate::cli::ValidateArgs;
use crate::error::{CliError, Result};
use ecofront::engine::error::EngineError;
use tracing::info;

/// Checks that the project resolves against its inventory database without evaluating it.
pub fn run(args: ValidateArgs) -> Result<()> {
    let config = load_project(&args.project)?;
    let database = load_inventory(&config.inventory_path)?;
    let evaluation = &config.evaluation;

    for product in &evaluation.sweep.products {
        if database.activity(product.activity.code()).is_none() {
            return Err(EngineError::NotFound {
                kind: "Activity",
                code: product.activity.code().to_string(),
            }
            .into());
        }
    }
    for method in &evaluation.methods {
        if !database.methods().contains(method) {
            return Err(EngineError::NotFound {
                kind: "Impact method",
                code: method.key(),
            }
            .into());
        }
    }
    if let Some(economics) = &config.economics {
        if let Some(missing) = evaluation
            .sweep
            .products
            .iter()
            .find(|p| !economics.products.contains_key(&p.name))
        {
            return Err(CliError::Config(format!(
                "No economic data for product '{}'",
                missing.name
            )));
        }
    }

    let candidates = evaluation
        .sweep
        .candidate_count()
        .map_err(EngineError::from)?;
    info!(candidates, "Project configuration is valid.");

    println!("✓ Configuration is valid.");
    println!(
        "  Inventory: {} ({} activities, {} methods)",
        config.inventory_path.display(),
        database.len(),
        database.methods().len()
    );
    println!(
        "  Sweep: {} candidate(s) of '{}' over {} product(s)",
        candidates,
        evaluation.sweep.swept_product,
        evaluation.sweep.products.len()
    );
    println!("  Objective method: {}", evaluation.objective_method);
    if config.economics.is_none() {
        println!("  No [economics] section: only 'decompose' can run.");
    }
    Ok(())
}
