use crate::core::economics::TechnoEconomicEngine;
use crate::core::inventory::ImpactEngine;
use crate::core::io::table::products_of;
use crate::core::models::functional_unit::FunctionalUnit;
use crate::core::models::ids::ScenarioId;
use crate::core::models::method::ImpactMethod;
use crate::core::models::point::EvaluatedPoint;
use crate::core::scenarios::{self, ScenarioSet};
use crate::engine::config::EvaluationConfig;
use crate::engine::context::EvaluationContext;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::results::ImpactResults;
use crate::engine::tasks;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct EvaluationResult {
    pub scenarios: ScenarioSet,
    pub impacts: ImpactResults,
    /// One point per scenario, in scenario order, with percentage allocations.
    pub points: Vec<EvaluatedPoint>,
}

impl EvaluationResult {
    pub fn products(&self) -> Vec<String> {
        products_of(&self.points)
    }
}

#[instrument(skip_all, name = "evaluation_workflow")]
pub fn run<E, T>(
    config: &EvaluationConfig,
    impact_engine: &E,
    economics: &T,
    reporter: &ProgressReporter,
) -> Result<EvaluationResult, EngineError>
where
    E: ImpactEngine,
    T: TechnoEconomicEngine,
{
    // === Phase 1: Scenario generation ===
    reporter.report(Progress::PhaseStart {
        name: "Generating Scenarios",
    });
    let scenario_set = scenarios::generate(&config.sweep)?;
    info!(
        scenarios = scenario_set.scenarios.len(),
        rejected = scenario_set.rejected,
        "Allocation sweep generated."
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Impact evaluation ===
    reporter.report(Progress::PhaseStart {
        name: "Evaluating Impacts",
    });
    let context = EvaluationContext::new(impact_engine, reporter, config);
    let functional_units: Vec<_> = scenario_set.functional_units().cloned().collect();
    let impacts = tasks::impact::run(&context, &functional_units, &config.methods)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Economic evaluation ===
    reporter.report(Progress::PhaseStart {
        name: "Evaluating Economics",
    });
    let npvs = tasks::economics::run(economics, &scenario_set, reporter)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 4: Point assembly ===
    let mut points = Vec::with_capacity(scenario_set.scenarios.len());
    for (scenario, (id, npv)) in scenario_set.scenarios.iter().zip(npvs) {
        debug_assert_eq!(scenario.id, id);
        let gwp = impacts.total(&scenario.functional_units, &config.objective_method)?;
        ensure_finite(scenario.id, "GWP", gwp)?;
        ensure_finite(scenario.id, "NPV", npv)?;
        points.push(EvaluatedPoint::new(
            scenario.id,
            gwp,
            npv,
            scenario.allocation.to_percentages(scenario_set.total),
        ));
    }

    info!(
        points = points.len(),
        objective = %config.objective_method,
        "Evaluation complete."
    );
    Ok(EvaluationResult {
        scenarios: scenario_set,
        impacts,
        points,
    })
}

/// Scores caller-supplied functional units under `methods`, outside of any sweep.
///
/// Retries and the top-contributor count come from `config`; its sweep is not used.
#[instrument(skip_all, name = "impact_scoring_workflow")]
pub fn score_units<E>(
    config: &EvaluationConfig,
    impact_engine: &E,
    functional_units: &[FunctionalUnit],
    methods: &[ImpactMethod],
    reporter: &ProgressReporter,
) -> Result<ImpactResults, EngineError>
where
    E: ImpactEngine,
{
    let context = EvaluationContext::new(impact_engine, reporter, config);
    tasks::impact::run(&context, functional_units, methods)
}

fn ensure_finite(
    scenario: ScenarioId,
    objective: &'static str,
    value: f64,
) -> Result<(), EngineError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::NonFiniteObjective {
            scenario,
            objective,
            value,
        })
    }
}
