use super::allocation::Allocation;
use super::ids::ScenarioId;

/// One evaluated allocation scenario, the unit the Pareto stage works on.
///
/// `allocation` holds percentages of the total feedstock.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedPoint {
    pub id: ScenarioId,
    pub gwp: f64,
    pub npv: f64,
    pub allocation: Allocation,
}

impl EvaluatedPoint {
    pub fn new(id: ScenarioId, gwp: f64, npv: f64, allocation: Allocation) -> Self {
        Self {
            id,
            gwp,
            npv,
            allocation,
        }
    }

    pub fn objectives(&self) -> (f64, f64) {
        (self.gwp, self.npv)
    }
}
