use crate::cli::ParetoArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use ecofront::core::io::table::{self, ColumnLayout};
use ecofront::core::models::point::EvaluatedPoint;
use ecofront::core::pareto::FeasibilityRule;
use ecofront::engine::error::EngineError;
use ecofront::engine::progress::ProgressReporter;
use ecofront::workflows::{self, trade_off::TradeOffResult};
use tracing::info;

pub fn run(args: ParetoArgs) -> Result<()> {
    let allocation_columns = args
        .allocation_columns
        .iter()
        .map(|spec| parser::parse_allocation_column(spec))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| CliError::Argument(e.to_string()))?;
    let layout = ColumnLayout {
        gwp_column: args.gwp_column,
        npv_column: args.npv_column,
        allocation_columns,
        has_headers: !args.no_header,
    };

    info!("Loading evaluated scenarios from {:?}", &args.input);
    let points = table::read_points_from_path(&args.input, &layout).map_err(|e| {
        CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        }
    })?;

    let rule = FeasibilityRule {
        min_npv: Some(args.min_npv),
        max_gwp: args.max_gwp,
    };
    let result = workflows::trade_off::run(
        &points,
        |point| rule.is_feasible(point),
        &ProgressReporter::new(),
    );

    let products: Vec<String> = layout
        .allocation_columns
        .iter()
        .map(|c| c.product.clone())
        .collect();
    table::write_front_to_path(&args.output, result.front.members(), &products)
        .map_err(EngineError::from)?;

    println!(
        "✓ Pareto front ({} of {} feasible, {} evaluated) written to: {}",
        result.front.len(),
        result.feasible.len(),
        result.evaluated,
        args.output.display()
    );
    print_trade_off(&result);
    Ok(())
}

/// Prints the representative front members and the hypervolume.
pub(crate) fn print_trade_off(result: &TradeOffResult) {
    let Some(reps) = &result.representatives else {
        println!("  No feasible scenario: the Pareto front is empty.");
        return;
    };
    print_member("Best GWP", &reps.best_gwp);
    print_member("Best NPV", &reps.best_npv);
    print_member("Knee", &reps.knee);
    println!(
        "  {:<10} GWP {:>14.4}  NPV {:>14.4}",
        "Ideal", reps.ideal.0, reps.ideal.1
    );
    if let Some(hv) = result.hypervolume {
        println!("  {:<10} {:.4}", "Hypervolume", hv);
    }
}

fn print_member(label: &str, point: &EvaluatedPoint) {
    println!(
        "  {:<10} GWP {:>14.4}  NPV {:>14.4}  [{}] {}",
        label, point.gwp, point.npv, point.id, point.allocation
    );
}
