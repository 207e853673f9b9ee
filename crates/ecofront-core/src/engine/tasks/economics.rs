use crate::core::economics::TechnoEconomicEngine;
use crate::core::models::ids::ScenarioId;
use crate::core::scenarios::ScenarioSet;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Prices every scenario with the techno-economic engine, in scenario order.
#[instrument(skip_all, name = "economics_task")]
pub fn run<T>(
    economics: &T,
    scenarios: &ScenarioSet,
    reporter: &ProgressReporter,
) -> Result<Vec<(ScenarioId, f64)>, EngineError>
where
    T: TechnoEconomicEngine,
{
    let priced: Vec<Result<(ScenarioId, f64), EngineError>> =
        reporter.task(scenarios.scenarios.len() as u64, || {
            #[cfg(not(feature = "parallel"))]
            let iterator = scenarios.scenarios.iter();

            #[cfg(feature = "parallel")]
            let iterator = scenarios.scenarios.par_iter();

            iterator
                .map(|scenario| {
                    let npv = economics.npv_for(&scenario.allocation).map_err(|source| {
                        EngineError::Economics {
                            scenario: scenario.id,
                            source,
                        }
                    })?;
                    reporter.report(Progress::TaskIncrement);
                    Ok((scenario.id, npv))
                })
                .collect()
        });

    let npvs = priced.into_iter().collect::<Result<Vec<_>, _>>()?;
    info!(scenarios = npvs.len(), "Economic evaluation finished.");
    Ok(npvs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::economics::{EconomicsError, LinearEconomics, ProductEconomics};
    use crate::core::models::functional_unit::ActivityRef;
    use crate::core::scenarios::{AllocationRule, ProductSpec, SweepSpec, generate};
    use std::collections::HashMap;

    fn scenarios() -> ScenarioSet {
        generate(&SweepSpec {
            total: 100.0,
            step: 25.0,
            swept_product: "ethanol".into(),
            products: vec![
                ProductSpec::new("ethanol", ActivityRef::new("ethanol")),
                ProductSpec::new("lactic", ActivityRef::new("lactic")),
            ],
            rule: AllocationRule::Equal,
        })
        .unwrap()
    }

    fn model(products: &[(&str, f64)]) -> LinearEconomics {
        LinearEconomics {
            discount_rate: 0.0,
            lifetime_years: 1,
            capex: 0.0,
            fixed_opex: 0.0,
            products: products
                .iter()
                .map(|(name, margin)| (name.to_string(), ProductEconomics { margin: *margin }))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn every_scenario_is_priced_in_order() {
        let set = scenarios();
        let npvs = run(
            &model(&[("ethanol", 1.0), ("lactic", 2.0)]),
            &set,
            &ProgressReporter::new(),
        )
        .unwrap();

        // ethanol 75/50/25, lactic 25/50/75
        let ids: Vec<usize> = npvs.iter().map(|(id, _)| id.index()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        let values: Vec<f64> = npvs.iter().map(|(_, npv)| *npv).collect();
        assert_eq!(values, vec![125.0, 150.0, 175.0]);
    }

    #[test]
    fn economic_failure_names_the_scenario() {
        let set = scenarios();
        let err = run(&model(&[("ethanol", 1.0)]), &set, &ProgressReporter::new()).unwrap_err();
        match err {
            EngineError::Economics { scenario, source } => {
                assert_eq!(source, EconomicsError::UnknownProduct("lactic".into()));
                assert_eq!(scenario.index(), 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
