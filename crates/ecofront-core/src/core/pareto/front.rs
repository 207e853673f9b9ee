use super::dominance::dominates;
use crate::core::models::ids::ScenarioId;
use crate::core::models::point::EvaluatedPoint;

/// The non-dominated subset of a set of evaluated points, in input order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParetoFront {
    members: Vec<EvaluatedPoint>,
}

impl ParetoFront {
    pub fn members(&self) -> &[EvaluatedPoint] {
        &self.members
    }

    pub fn into_members(self) -> Vec<EvaluatedPoint> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: ScenarioId) -> bool {
        self.members.iter().any(|m| m.id == id)
    }

    /// Members ordered by ascending GWP, the order a trade-off curve is drawn in.
    pub fn sorted_by_gwp(&self) -> Vec<&EvaluatedPoint> {
        let mut sorted: Vec<&EvaluatedPoint> = self.members.iter().collect();
        sorted.sort_by(|a, b| a.gwp.total_cmp(&b.gwp).then(b.npv.total_cmp(&a.npv)));
        sorted
    }
}

/// Keeps every point that no other point in `points` dominates.
///
/// Pairwise comparison, quadratic in the number of points. A point is identified by its
/// position in `points`, so repeated [`ScenarioId`]s (e.g. two joined tables) are still
/// compared against each other.
pub fn pareto_front(points: &[EvaluatedPoint]) -> ParetoFront {
    let members = points
        .iter()
        .enumerate()
        .filter(|&(i, candidate)| {
            !points
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && dominates(other, candidate))
        })
        .map(|(_, point)| point.clone())
        .collect();
    ParetoFront { members }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::allocation::Allocation;

    fn point(id: usize, gwp: f64, npv: f64) -> EvaluatedPoint {
        EvaluatedPoint::new(ScenarioId(id), gwp, npv, Allocation::new())
    }

    fn pseudo_random_points(n: usize, seed: u64) -> Vec<EvaluatedPoint> {
        let mut state = seed;
        let mut next = move || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) as f64) / ((1u64 << 31) as f64)
        };
        (0..n)
            .map(|i| point(i, -20.0 + 20.0 * next(), 200.0 * next()))
            .collect()
    }

    #[test]
    fn reference_example_keeps_two_trade_off_points() {
        let points = vec![
            point(0, -10.0, 100.0),
            point(1, -8.0, 150.0),
            point(2, -5.0, 90.0),
            point(3, -8.0, 80.0),
        ];
        let front = pareto_front(&points);
        let ids: Vec<_> = front.members().iter().map(|p| p.id).collect();
        assert_eq!(ids, [ScenarioId(0), ScenarioId(1)]);
    }

    #[test]
    fn front_is_an_antichain() {
        let front = pareto_front(&pseudo_random_points(80, 7));
        for a in front.members() {
            for b in front.members() {
                assert!(!dominates(a, b));
            }
        }
    }

    #[test]
    fn every_excluded_point_is_dominated_by_a_member() {
        let points = pseudo_random_points(80, 11);
        let front = pareto_front(&points);
        for p in points.iter().filter(|p| !front.contains(p.id)) {
            assert!(front.members().iter().any(|m| dominates(m, p)));
        }
    }

    #[test]
    fn filtering_a_front_again_returns_the_same_front() {
        let front = pareto_front(&pseudo_random_points(60, 3));
        let again = pareto_front(front.members());
        assert_eq!(front, again);
    }

    #[test]
    fn distinct_points_with_identical_values_both_remain() {
        let points = vec![point(0, -3.0, 40.0), point(1, -3.0, 40.0), point(2, 0.0, 10.0)];
        let front = pareto_front(&points);
        assert_eq!(front.len(), 2);
        assert!(front.contains(ScenarioId(0)));
        assert!(front.contains(ScenarioId(1)));
    }

    #[test]
    fn repeated_ids_from_joined_tables_are_still_compared() {
        let first_sweep = vec![point(0, -10.0, 100.0), point(1, -4.0, 20.0)];
        let second_sweep = vec![point(0, -5.0, 50.0), point(1, -12.0, 60.0)];
        let joined: Vec<_> = first_sweep.into_iter().chain(second_sweep).collect();

        let front = pareto_front(&joined);
        let objectives: Vec<_> = front.members().iter().map(|p| p.objectives()).collect();
        assert_eq!(objectives, [(-10.0, 100.0), (-12.0, 60.0)]);
    }

    #[test]
    fn empty_input_gives_empty_front() {
        assert!(pareto_front(&[]).is_empty());
    }

    #[test]
    fn sorted_by_gwp_orders_the_curve() {
        let points = vec![point(0, -8.0, 150.0), point(1, -10.0, 100.0)];
        let front = pareto_front(&points);
        let sorted: Vec<_> = front.sorted_by_gwp().iter().map(|p| p.id).collect();
        assert_eq!(sorted, [ScenarioId(1), ScenarioId(0)]);
    }
}
