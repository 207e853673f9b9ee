use super::ScenarioError;
use super::rules::AllocationRule;
use crate::core::models::allocation::Allocation;
use crate::core::models::functional_unit::{ActivityRef, FunctionalUnit};
use crate::core::models::ids::ScenarioId;
use std::collections::HashSet;
use tracing::debug;

const STEP_TOLERANCE: f64 = 1e-9;

/// A candidate product and how a unit of feedstock turns into its functional unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSpec {
    pub name: String,
    pub activity: ActivityRef,
    /// Product output per unit of allocated feedstock.
    pub yield_factor: f64,
}

impl ProductSpec {
    pub fn new(name: impl Into<String>, activity: ActivityRef) -> Self {
        Self {
            name: name.into(),
            activity,
            yield_factor: 1.0,
        }
    }

    pub fn with_yield(mut self, yield_factor: f64) -> Self {
        self.yield_factor = yield_factor;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepSpec {
    pub total: f64,
    pub step: f64,
    pub swept_product: String,
    pub products: Vec<ProductSpec>,
    pub rule: AllocationRule,
}

impl SweepSpec {
    /// Checks the sweep and returns how many candidates it enumerates.
    pub fn candidate_count(&self) -> Result<usize, ScenarioError> {
        validate(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub id: ScenarioId,
    /// Absolute feedstock amounts per product.
    pub allocation: Allocation,
    pub functional_units: Vec<FunctionalUnit>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSet {
    pub total: f64,
    pub scenarios: Vec<Scenario>,
    /// Sweep candidates dropped because some product would receive no feedstock.
    pub rejected: usize,
}

impl ScenarioSet {
    pub fn functional_units(&self) -> impl Iterator<Item = &FunctionalUnit> {
        self.scenarios.iter().flat_map(|s| s.functional_units.iter())
    }

    pub fn get(&self, id: ScenarioId) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }
}

/// Sweeps the swept product's share from `total` down to `step`, splitting the rest with
/// the allocation rule.
///
/// There are `total / step` candidates. A candidate in which any product would receive a
/// non-positive amount is not generated; the count of such candidates is reported in
/// [`ScenarioSet::rejected`]. Surviving scenarios are numbered consecutively.
///
/// The first candidate gives the swept product everything and is always rejected, so a
/// sweep yields at most `total / step - 1` scenarios (exactly that many under
/// [`AllocationRule::Equal`] or positive proportional weights).
pub fn generate(spec: &SweepSpec) -> Result<ScenarioSet, ScenarioError> {
    let steps = validate(spec)?;

    let others: Vec<&str> = spec
        .products
        .iter()
        .map(|p| p.name.as_str())
        .filter(|name| *name != spec.swept_product)
        .collect();

    let mut scenarios = Vec::with_capacity(steps);
    let mut rejected = 0;

    for k in 0..steps {
        let share = spec.total - k as f64 * spec.step;
        let remainder = spec.total - share;
        let other_amounts = spec.rule.distribute(remainder, &others)?;

        let mut allocation = Allocation::new();
        for product in &spec.products {
            let amount = if product.name == spec.swept_product {
                share
            } else {
                others
                    .iter()
                    .position(|o| *o == product.name)
                    .map_or(0.0, |i| other_amounts[i])
            };
            allocation.set(&product.name, amount);
        }

        if allocation.iter().any(|s| s.amount.is_nan() || s.amount <= 0.0) {
            debug!(
                candidate = k,
                share, "Rejecting sweep candidate with a zero-production product."
            );
            rejected += 1;
            continue;
        }

        let id = ScenarioId(scenarios.len());
        let functional_units = spec
            .products
            .iter()
            .map(|product| {
                let feedstock = allocation.get(&product.name).unwrap_or_default();
                FunctionalUnit::new(
                    format!("{}_{}", id.code(), product.name),
                    product.activity.clone(),
                    feedstock * product.yield_factor,
                )
            })
            .collect();

        scenarios.push(Scenario {
            id,
            allocation,
            functional_units,
        });
    }

    Ok(ScenarioSet {
        total: spec.total,
        scenarios,
        rejected,
    })
}

fn validate(spec: &SweepSpec) -> Result<usize, ScenarioError> {
    if !(spec.total.is_finite() && spec.total > 0.0) {
        return Err(ScenarioError::InvalidTotal(spec.total));
    }

    let invalid_step = ScenarioError::InvalidStep {
        step: spec.step,
        total: spec.total,
    };
    if !(spec.step.is_finite() && spec.step > 0.0) || spec.step > spec.total {
        return Err(invalid_step);
    }
    let ratio = spec.total / spec.step;
    let steps = ratio.round();
    if (ratio - steps).abs() > STEP_TOLERANCE * steps.max(1.0) {
        return Err(invalid_step);
    }

    if spec.products.len() < 2 {
        return Err(ScenarioError::TooFewProducts(spec.products.len()));
    }

    let mut seen = HashSet::new();
    for product in &spec.products {
        if !seen.insert(product.name.as_str()) {
            return Err(ScenarioError::DuplicateProduct(product.name.clone()));
        }
        if !(product.yield_factor.is_finite() && product.yield_factor > 0.0) {
            return Err(ScenarioError::InvalidYield {
                product: product.name.clone(),
                value: product.yield_factor,
            });
        }
    }
    if !seen.contains(spec.swept_product.as_str()) {
        return Err(ScenarioError::UnknownSweptProduct(
            spec.swept_product.clone(),
        ));
    }

    let others: Vec<&str> = spec
        .products
        .iter()
        .map(|p| p.name.as_str())
        .filter(|name| *name != spec.swept_product)
        .collect();
    spec.rule.validate(&others)?;

    Ok(steps as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str) -> ProductSpec {
        ProductSpec::new(name, ActivityRef::new(format!("{}-production", name)))
    }

    fn sweep(total: f64, step: f64, rule: AllocationRule) -> SweepSpec {
        SweepSpec {
            total,
            step,
            swept_product: "ethanol".into(),
            products: vec![product("ethanol"), product("lactic"), product("succinic")],
            rule,
        }
    }

    #[test]
    fn every_scenario_conserves_the_total_feedstock() {
        let set = generate(&sweep(100.0, 1.0, AllocationRule::Equal)).unwrap();
        for scenario in &set.scenarios {
            assert!((scenario.allocation.total() - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn every_product_receives_a_positive_amount() {
        let rule = AllocationRule::Proportional {
            weights: vec![("lactic".into(), 2.0), ("succinic".into(), 1.0)],
        };
        let set = generate(&sweep(100.0, 5.0, rule)).unwrap();
        assert!(!set.scenarios.is_empty());
        for scenario in &set.scenarios {
            assert!(scenario.allocation.iter().all(|s| s.amount > 0.0));
            assert!(scenario.functional_units.iter().all(|fu| fu.amount > 0.0));
        }
    }

    #[test]
    fn candidate_count_equals_total_over_step() {
        let set = generate(&sweep(100.0, 10.0, AllocationRule::Equal)).unwrap();
        assert_eq!(set.scenarios.len() + set.rejected, 10);
        // The full-share candidate leaves nothing for the other products.
        assert_eq!(set.rejected, 1);
        assert_eq!(set.scenarios[0].allocation.get("ethanol"), Some(90.0));
        assert_eq!(set.scenarios.last().unwrap().allocation.get("ethanol"), Some(10.0));
    }

    #[test]
    fn sweep_yields_one_scenario_fewer_than_candidates() {
        for (total, step) in [(100.0, 1.0), (100.0, 25.0), (60.0, 20.0), (10.0, 5.0)] {
            let spec = sweep(total, step, AllocationRule::Equal);
            let candidates = spec.candidate_count().unwrap();
            let set = generate(&spec).unwrap();
            assert_eq!(candidates, (total / step) as usize);
            assert_eq!(set.scenarios.len(), candidates - 1);
            assert_eq!(set.rejected, 1);
        }
    }

    #[test]
    fn functional_unit_codes_are_unique_and_follow_the_scenario() {
        let set = generate(&sweep(100.0, 25.0, AllocationRule::Equal)).unwrap();
        let names: HashSet<_> = set.functional_units().map(|fu| fu.name.clone()).collect();
        assert_eq!(names.len(), set.scenarios.len() * 3);
        assert!(names.contains("S000_ethanol"));
        assert_eq!(set.scenarios[1].id, ScenarioId(1));
    }

    #[test]
    fn yield_scales_functional_unit_amount() {
        let mut spec = sweep(100.0, 50.0, AllocationRule::Equal);
        spec.products[1] = product("lactic").with_yield(0.5);
        let set = generate(&spec).unwrap();
        let scenario = &set.scenarios[0];
        let lactic = scenario
            .functional_units
            .iter()
            .find(|fu| fu.name.ends_with("lactic"))
            .unwrap();
        assert!((lactic.amount - 12.5).abs() < 1e-12);
    }

    #[test]
    fn step_must_divide_total() {
        let result = generate(&sweep(100.0, 30.0, AllocationRule::Equal));
        assert!(matches!(result, Err(ScenarioError::InvalidStep { .. })));
    }

    #[test]
    fn swept_product_must_be_declared() {
        let mut spec = sweep(100.0, 10.0, AllocationRule::Equal);
        spec.swept_product = "butanol".into();
        assert_eq!(
            generate(&spec),
            Err(ScenarioError::UnknownSweptProduct("butanol".into()))
        );
    }

    #[test]
    fn single_product_sweep_is_rejected() {
        let mut spec = sweep(100.0, 10.0, AllocationRule::Equal);
        spec.products.truncate(1);
        assert_eq!(generate(&spec), Err(ScenarioError::TooFewProducts(1)));
    }

    #[test]
    fn duplicate_products_are_rejected() {
        let mut spec = sweep(100.0, 10.0, AllocationRule::Equal);
        spec.products.push(product("lactic"));
        assert_eq!(
            generate(&spec),
            Err(ScenarioError::DuplicateProduct("lactic".into()))
        );
    }
}
