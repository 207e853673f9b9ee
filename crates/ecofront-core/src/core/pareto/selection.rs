use super::front::ParetoFront;
use crate::core::models::point::EvaluatedPoint;

/// Representative members of a Pareto front.
#[derive(Debug, Clone, PartialEq)]
pub struct Representatives {
    pub best_gwp: EvaluatedPoint,
    pub best_npv: EvaluatedPoint,
    /// Member closest to `ideal` in (gwp, npv) space.
    pub knee: EvaluatedPoint,
    /// `(min gwp, max npv)` over the front; not necessarily a member.
    pub ideal: (f64, f64),
}

/// Picks the best-GWP, best-NPV and knee members. `None` for an empty front.
///
/// Ties are broken by encounter order: the first member reaching the optimum wins.
pub fn select_representatives(front: &ParetoFront) -> Option<Representatives> {
    let members = front.members();
    let best_gwp = first_best(members, |candidate, best| candidate.gwp < best.gwp)?;
    let best_npv = first_best(members, |candidate, best| candidate.npv > best.npv)?;

    let ideal = (best_gwp.gwp, best_npv.npv);
    let knee = first_best(members, |candidate, best| {
        distance_to(candidate, ideal) < distance_to(best, ideal)
    })?;

    Some(Representatives {
        best_gwp: best_gwp.clone(),
        best_npv: best_npv.clone(),
        knee: knee.clone(),
        ideal,
    })
}

/// Euclidean distance from `point` to `ideal` in (gwp, npv) space.
pub fn distance_to(point: &EvaluatedPoint, ideal: (f64, f64)) -> f64 {
    (point.gwp - ideal.0).hypot(point.npv - ideal.1)
}

fn first_best<'a, F>(members: &'a [EvaluatedPoint], better: F) -> Option<&'a EvaluatedPoint>
where
    F: Fn(&EvaluatedPoint, &EvaluatedPoint) -> bool,
{
    let mut iter = members.iter();
    let mut best = iter.next()?;
    for candidate in iter {
        if better(candidate, best) {
            best = candidate;
        }
    }
    Some(best)
}
