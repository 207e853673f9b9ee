use super::compute_with_retries;
use crate::core::inventory::ImpactEngine;
use crate::core::models::contribution::Exchange;
use crate::core::models::functional_unit::{Demand, FunctionalUnit};
use crate::core::models::method::ImpactMethod;
use crate::engine::context::EvaluationContext;
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use crate::engine::results::ImpactResults;
use std::collections::BTreeMap;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub const UNCATEGORIZED_GROUP: &str = "Other";

/// Built-in ways of tagging an upstream exchange for grouped reporting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExchangeGrouping {
    /// The input activity's category, or [`UNCATEGORIZED_GROUP`].
    #[default]
    Category,
    /// The input activity's name; one group per exchange.
    Process,
    /// An explicit `input code -> tag` table, falling back to the category.
    Mapping(BTreeMap<String, String>),
}

impl ExchangeGrouping {
    pub fn tag(&self, exchange: &Exchange) -> String {
        match self {
            ExchangeGrouping::Category => category_or_default(exchange),
            ExchangeGrouping::Process => exchange.input_name.clone(),
            ExchangeGrouping::Mapping(tags) => tags
                .get(exchange.input.code())
                .cloned()
                .unwrap_or_else(|| category_or_default(exchange)),
        }
    }
}

fn category_or_default(exchange: &Exchange) -> String {
    exchange
        .category
        .clone()
        .unwrap_or_else(|| UNCATEGORIZED_GROUP.to_string())
}

/// Summed upstream impact per group tag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContributionBreakdown {
    pub groups: BTreeMap<String, f64>,
}

impl ContributionBreakdown {
    /// Adds `score` to `tag`, starting absent groups at zero.
    pub fn accumulate(&mut self, tag: String, score: f64) {
        let entry = self.groups.entry(tag).or_insert(0.0);
        *entry += score;
    }

    pub fn total(&self) -> f64 {
        self.groups.values().sum()
    }
}

/// Scores each upstream technosphere exchange of `functional_unit` on its own and sums the
/// scores per tag.
///
/// Requires the unit's impact under `method` to be present in `results`.
#[instrument(skip_all, name = "contribution_task", fields(functional_unit = %functional_unit.name))]
pub fn run<E, F>(
    context: &EvaluationContext<E>,
    results: &ImpactResults,
    functional_unit: &FunctionalUnit,
    method: &ImpactMethod,
    group_tag_of: &F,
) -> Result<ContributionBreakdown, EngineError>
where
    E: ImpactEngine,
    F: Fn(&Exchange) -> String + Sync,
{
    results.ensure_computed(&functional_unit.name, method)?;

    let exchanges = context
        .engine
        .technosphere_exchanges(&functional_unit.activity)
        .map_err(|e| EngineError::from_impact(&functional_unit.name, e))?;

    let scored: Vec<Result<(String, f64), EngineError>> =
        context.reporter.task(exchanges.len() as u64, || {
            #[cfg(not(feature = "parallel"))]
            let iterator = exchanges.iter();

            #[cfg(feature = "parallel")]
            let iterator = exchanges.par_iter();

            iterator
                .map(|exchange| {
                    let demand = Demand::single(exchange.input.clone(), exchange.amount);
                    let computation = compute_with_retries(
                        context.engine,
                        &demand,
                        method,
                        context.config.max_retries,
                    )
                    .map_err(|e| EngineError::from_impact(&functional_unit.name, e))?;
                    context.reporter.report(Progress::TaskIncrement);
                    Ok((group_tag_of(exchange), context.engine.score(&computation)))
                })
                .collect()
        });

    let mut breakdown = ContributionBreakdown::default();
    for item in scored {
        let (tag, score) = item?;
        breakdown.accumulate(tag, score);
    }

    info!(
        exchanges = exchanges.len(),
        groups = breakdown.groups.len(),
        "Contribution aggregation finished."
    );
    Ok(breakdown)
}
