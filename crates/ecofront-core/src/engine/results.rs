use super::error::EngineError;
use crate::core::models::contribution::ProcessContribution;
use crate::core::models::functional_unit::FunctionalUnit;
use crate::core::models::method::ImpactMethod;
use std::collections::HashMap;

/// Impact scores keyed by functional-unit name, then method, with the top contributing
/// processes retained for each pair.
///
/// Built once by the impact evaluation task and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ImpactResults {
    methods: Vec<ImpactMethod>,
    scores: HashMap<String, HashMap<ImpactMethod, f64>>,
    contributors: HashMap<(String, ImpactMethod), Vec<ProcessContribution>>,
}

impl ImpactResults {
    pub(crate) fn new(methods: Vec<ImpactMethod>) -> Self {
        Self {
            methods,
            ..Self::default()
        }
    }

    /// Records a result; a later insert for the same pair replaces the earlier one.
    pub(crate) fn insert(
        &mut self,
        functional_unit: &str,
        method: &ImpactMethod,
        score: f64,
        top: Vec<ProcessContribution>,
    ) {
        self.scores
            .entry(functional_unit.to_string())
            .or_default()
            .insert(method.clone(), score);
        self.contributors
            .insert((functional_unit.to_string(), method.clone()), top);
    }

    pub fn methods(&self) -> &[ImpactMethod] {
        &self.methods
    }

    pub fn len(&self) -> usize {
        self.scores.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn scores_for(&self, functional_unit: &str) -> Option<&HashMap<ImpactMethod, f64>> {
        self.scores.get(functional_unit)
    }

    /// Fails with [`EngineError::InvalidMethod`] if `method` was never evaluated and with
    /// [`EngineError::PreconditionNotMet`] if this unit has no result for it.
    pub fn ensure_computed(
        &self,
        functional_unit: &str,
        method: &ImpactMethod,
    ) -> Result<(), EngineError> {
        self.score(functional_unit, method).map(|_| ())
    }

    pub fn score(&self, functional_unit: &str, method: &ImpactMethod) -> Result<f64, EngineError> {
        if !self.methods.contains(method) {
            return Err(EngineError::InvalidMethod {
                method: method.clone(),
            });
        }
        self.scores
            .get(functional_unit)
            .and_then(|by_method| by_method.get(method))
            .copied()
            .ok_or_else(|| EngineError::PreconditionNotMet {
                functional_unit: functional_unit.to_string(),
                method: method.clone(),
            })
    }

    pub fn top_contributors(
        &self,
        functional_unit: &str,
        method: &ImpactMethod,
    ) -> Result<&[ProcessContribution], EngineError> {
        self.ensure_computed(functional_unit, method)?;
        Ok(self
            .contributors
            .get(&(functional_unit.to_string(), method.clone()))
            .map_or(&[][..], Vec::as_slice))
    }

    /// Sum of the scores of `units` under `method`.
    pub fn total<'a, I>(&self, units: I, method: &ImpactMethod) -> Result<f64, EngineError>
    where
        I: IntoIterator<Item = &'a FunctionalUnit>,
    {
        units
            .into_iter()
            .map(|fu| self.score(&fu.name, method))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::functional_unit::ActivityRef;

    fn gwp() -> ImpactMethod {
        ImpactMethod::new(["IPCC 2013", "climate change", "GWP 100a"])
    }

    fn land() -> ImpactMethod {
        ImpactMethod::new(["ReCiPe", "land use"])
    }

    fn results() -> ImpactResults {
        let mut results = ImpactResults::new(vec![gwp(), land()]);
        results.insert("S000_ethanol", &gwp(), 1.5, vec![]);
        results.insert("S000_lactic", &gwp(), -0.5, vec![]);
        results
    }

    #[test]
    fn unevaluated_method_is_invalid() {
        let err = results()
            .score("S000_ethanol", &ImpactMethod::new(["other"]))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidMethod { .. }));
    }

    #[test]
    fn evaluated_method_without_result_is_a_precondition_failure() {
        let err = results().score("S000_ethanol", &land()).unwrap_err();
        assert!(matches!(err, EngineError::PreconditionNotMet { .. }));
    }

    #[test]
    fn last_insert_wins() {
        let mut results = results();
        results.insert("S000_ethanol", &gwp(), 9.0, vec![]);
        assert_eq!(results.score("S000_ethanol", &gwp()).unwrap(), 9.0);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn total_sums_the_units_of_a_scenario() {
        let units = vec![
            FunctionalUnit::new("S000_ethanol", ActivityRef::new("eth"), 50.0),
            FunctionalUnit::new("S000_lactic", ActivityRef::new("lac"), 50.0),
        ];
        assert_eq!(results().total(&units, &gwp()).unwrap(), 1.0);
    }
}
