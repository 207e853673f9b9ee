use crate::core::models::point::EvaluatedPoint;
use crate::core::pareto::{
    ParetoFront, ReferencePoint, Representatives, filter_feasible, hypervolume, pareto_front,
    select_representatives,
};
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct TradeOffResult {
    /// Number of points handed to the workflow before filtering.
    pub evaluated: usize,
    pub feasible: Vec<EvaluatedPoint>,
    pub front: ParetoFront,
    /// `None` when no point is feasible.
    pub representatives: Option<Representatives>,
    /// Measured against the worst GWP and worst NPV of the feasible points.
    pub hypervolume: Option<f64>,
}

/// Drops infeasible points, extracts the GWP/NPV front and summarizes it.
///
/// Infeasible points are excluded silently; an empty feasible set yields an empty front.
#[instrument(skip_all, name = "trade_off_workflow")]
pub fn run<P>(
    points: &[EvaluatedPoint],
    predicate: P,
    reporter: &ProgressReporter,
) -> TradeOffResult
where
    P: Fn(&EvaluatedPoint) -> bool,
{
    reporter.report(Progress::PhaseStart {
        name: "Trade-off Analysis",
    });

    let feasible = filter_feasible(points, predicate);
    if feasible.is_empty() {
        warn!(
            evaluated = points.len(),
            "No feasible points. The Pareto front is empty."
        );
    }

    let front = pareto_front(&feasible);
    let representatives = select_representatives(&front);
    let covered = ReferencePoint::worst_of(&feasible)
        .map(|reference| hypervolume(front.members(), reference));

    if let Some(reps) = &representatives {
        info!(
            feasible = feasible.len(),
            front = front.len(),
            best_gwp = %reps.best_gwp.id,
            best_npv = %reps.best_npv.id,
            knee = %reps.knee.id,
            "Trade-off analysis complete."
        );
    }
    reporter.report(Progress::PhaseFinish);

    TradeOffResult {
        evaluated: points.len(),
        feasible,
        front,
        representatives,
        hypervolume: covered,
    }
}
