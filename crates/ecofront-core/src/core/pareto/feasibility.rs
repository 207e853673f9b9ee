use crate::core::models::point::EvaluatedPoint;

/// Conditions an evaluated point must meet to take part in the trade-off analysis.
///
/// Both bounds are strict. The default keeps scenarios with a positive NPV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeasibilityRule {
    pub min_npv: Option<f64>,
    pub max_gwp: Option<f64>,
}

impl Default for FeasibilityRule {
    fn default() -> Self {
        Self {
            min_npv: Some(0.0),
            max_gwp: None,
        }
    }
}

impl FeasibilityRule {
    pub fn is_feasible(&self, point: &EvaluatedPoint) -> bool {
        self.min_npv.is_none_or(|min| point.npv > min)
            && self.max_gwp.is_none_or(|max| point.gwp < max)
    }
}

/// The points satisfying `predicate`, in their original order.
pub fn filter_feasible<P>(points: &[EvaluatedPoint], predicate: P) -> Vec<EvaluatedPoint>
where
    P: Fn(&EvaluatedPoint) -> bool,
{
    points.iter().filter(|p| predicate(p)).cloned().collect()
}
