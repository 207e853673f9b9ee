use super::compute_with_retries;
use crate::core::inventory::ImpactEngine;
use crate::core::models::contribution::ProcessContribution;
use crate::core::models::functional_unit::FunctionalUnit;
use crate::core::models::method::ImpactMethod;
use crate::engine::context::EvaluationContext;
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use crate::engine::results::ImpactResults;
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug)]
struct WorkUnit<'a> {
    functional_unit: &'a FunctionalUnit,
    method: &'a ImpactMethod,
}

struct WorkOutput<'a> {
    unit: WorkUnit<'a>,
    score: f64,
    top: Vec<ProcessContribution>,
}

/// Scores every functional unit under every method.
///
/// Each (functional unit, method) pair is an independent engine call on the single-item
/// demand `{activity: amount}`. Results are folded into the table only after all calls
/// return; an unresolved activity or method aborts the whole batch.
#[instrument(skip_all, name = "impact_evaluation_task")]
pub fn run<E>(
    context: &EvaluationContext<E>,
    functional_units: &[FunctionalUnit],
    methods: &[ImpactMethod],
) -> Result<ImpactResults, EngineError>
where
    E: ImpactEngine,
{
    let work_list: Vec<WorkUnit> = functional_units
        .iter()
        .flat_map(|functional_unit| {
            methods.iter().map(move |method| WorkUnit {
                functional_unit,
                method,
            })
        })
        .collect();

    if work_list.is_empty() {
        warn!("No functional units or methods to evaluate. Returning empty results.");
        return Ok(ImpactResults::new(methods.to_vec()));
    }

    info!(
        functional_units = functional_units.len(),
        methods = methods.len(),
        "Starting impact evaluation."
    );

    let outputs: Vec<Result<WorkOutput, EngineError>> =
        context.reporter.task(work_list.len() as u64, || {
            #[cfg(not(feature = "parallel"))]
            let iterator = work_list.into_iter();

            #[cfg(feature = "parallel")]
            let iterator = work_list.into_par_iter();

            iterator.map(|unit| evaluate_unit(unit, context)).collect()
        });

    let mut results = ImpactResults::new(methods.to_vec());
    for output in outputs {
        let output = output?;
        results.insert(
            &output.unit.functional_unit.name,
            output.unit.method,
            output.score,
            output.top,
        );
    }

    info!(results = results.len(), "Impact evaluation finished.");
    Ok(results)
}

fn evaluate_unit<'a, E>(
    unit: WorkUnit<'a>,
    context: &EvaluationContext<E>,
) -> Result<WorkOutput<'a>, EngineError>
where
    E: ImpactEngine,
{
    let fu = unit.functional_unit;
    let computation = compute_with_retries(
        context.engine,
        &fu.demand(),
        unit.method,
        context.config.max_retries,
    )
    .map_err(|e| EngineError::from_impact(&fu.name, e))?;

    let score = context.engine.score(&computation);
    let top = context
        .engine
        .top_contributors(&computation, context.config.top_contributors);

    context.reporter.report(Progress::TaskIncrement);
    Ok(WorkOutput { unit, score, top })
}
