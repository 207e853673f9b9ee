use crate::core::inventory::ImpactEngine;
use crate::core::models::contribution::Exchange;
use crate::core::models::functional_unit::FunctionalUnit;
use crate::core::models::ids::ScenarioId;
use crate::core::models::method::ImpactMethod;
use crate::core::scenarios;
use crate::engine::ExchangeGrouping;
use crate::engine::config::EvaluationConfig;
use crate::engine::context::EvaluationContext;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::results::ImpactResults;
use crate::engine::tasks;
use std::collections::BTreeMap;
use std::slice;
use tracing::{info, instrument};

/// Report shapes for one functional unit under one method.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub functional_unit: FunctionalUnit,
    pub method: ImpactMethod,
    /// The unit's full impact score.
    pub total: f64,
    /// Upstream exchange scores summed per group tag.
    pub waterfall: BTreeMap<String, f64>,
    /// Top contributing processes by descending magnitude.
    pub bar: Vec<(String, f64)>,
}

/// Builds the decomposition of `functional_unit` from previously computed `impacts`.
///
/// Fails with [`EngineError::InvalidMethod`] or [`EngineError::PreconditionNotMet`] when
/// `impacts` holds no score for the pair.
pub fn breakdown<E, F>(
    context: &EvaluationContext<E>,
    impacts: &ImpactResults,
    functional_unit: &FunctionalUnit,
    method: &ImpactMethod,
    group_tag_of: &F,
) -> Result<Decomposition, EngineError>
where
    E: ImpactEngine,
    F: Fn(&Exchange) -> String + Sync,
{
    let total = impacts.score(&functional_unit.name, method)?;
    let bar = impacts
        .top_contributors(&functional_unit.name, method)?
        .iter()
        .map(|c| (c.process_name.clone(), c.score))
        .collect();
    let contributions =
        tasks::contribution::run(context, impacts, functional_unit, method, group_tag_of)?;

    Ok(Decomposition {
        functional_unit: functional_unit.clone(),
        method: method.clone(),
        total,
        waterfall: contributions.groups,
        bar,
    })
}

/// Regenerates the sweep, evaluates only the requested functional unit and decomposes it.
///
/// `method` defaults to the objective method.
#[instrument(skip_all, name = "decomposition_workflow", fields(scenario = %scenario, product = product))]
pub fn run<E>(
    config: &EvaluationConfig,
    engine: &E,
    scenario: ScenarioId,
    product: &str,
    method: Option<&ImpactMethod>,
    grouping: &ExchangeGrouping,
    reporter: &ProgressReporter,
) -> Result<Decomposition, EngineError>
where
    E: ImpactEngine,
{
    let method = method.unwrap_or(&config.objective_method);

    reporter.report(Progress::PhaseStart {
        name: "Resolving Functional Unit",
    });
    let scenario_set = scenarios::generate(&config.sweep)?;
    let selected = scenario_set
        .get(scenario)
        .ok_or_else(|| EngineError::NotFound {
            kind: "Scenario",
            code: scenario.code(),
        })?;
    let fu_name = format!("{}_{}", scenario.code(), product);
    let functional_unit = selected
        .functional_units
        .iter()
        .find(|fu| fu.name == fu_name)
        .ok_or_else(|| EngineError::NotFound {
            kind: "Functional unit",
            code: fu_name.clone(),
        })?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Evaluating Impacts",
    });
    let context = EvaluationContext::new(engine, reporter, config);
    let impacts =
        tasks::impact::run(&context, slice::from_ref(functional_unit), &config.methods)?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Aggregating Contributions",
    });
    let tag_of = |exchange: &Exchange| grouping.tag(exchange);
    let decomposition = breakdown(&context, &impacts, functional_unit, method, &tag_of)?;
    reporter.report(Progress::PhaseFinish);

    info!(
        functional_unit = %decomposition.functional_unit.name,
        total = decomposition.total,
        groups = decomposition.waterfall.len(),
        "Decomposition complete."
    );
    Ok(decomposition)
}
