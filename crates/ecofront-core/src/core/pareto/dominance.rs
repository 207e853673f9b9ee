use crate::core::models::point::EvaluatedPoint;

/// Whether `a` dominates `b` under (minimize GWP, maximize NPV).
///
/// `a` must be no worse than `b` in both objectives and strictly better in at least one.
/// This compares values only, so points with identical objectives never dominate each
/// other. Which points are "the same point" is decided by [`pareto_front`], by position.
///
/// [`pareto_front`]: super::front::pareto_front
pub fn dominates(a: &EvaluatedPoint, b: &EvaluatedPoint) -> bool {
    let no_worse = a.gwp <= b.gwp && a.npv >= b.npv;
    let strictly_better = a.gwp < b.gwp || a.npv > b.npv;
    no_worse && strictly_better
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::allocation::Allocation;
    use crate::core::models::ids::ScenarioId;

    fn point(id: usize, gwp: f64, npv: f64) -> EvaluatedPoint {
        EvaluatedPoint::new(ScenarioId(id), gwp, npv, Allocation::new())
    }

    #[test]
    fn lower_gwp_and_higher_npv_dominates() {
        let a = point(0, -8.0, 150.0);
        let b = point(1, -5.0, 90.0);
        assert!(dominates(&a, &b));
        assert!(!dominates(&b, &a));
    }

    #[test]
    fn equal_gwp_with_higher_npv_dominates() {
        assert!(dominates(&point(0, -8.0, 150.0), &point(1, -8.0, 80.0)));
    }

    #[test]
    fn trade_off_points_are_mutually_non_dominated() {
        let a = point(0, -10.0, 100.0);
        let b = point(1, -8.0, 150.0);
        assert!(!dominates(&a, &b));
        assert!(!dominates(&b, &a));
    }

    #[test]
    fn distinct_scenarios_with_equal_values_do_not_dominate() {
        let a = point(0, -3.0, 40.0);
        let b = point(1, -3.0, 40.0);
        assert!(!dominates(&a, &b));
        assert!(!dominates(&b, &a));
    }

    #[test]
    fn a_point_never_dominates_itself() {
        let a = point(4, -3.0, 40.0);
        assert!(!dominates(&a, &a.clone()));
    }

    #[test]
    fn shared_ids_do_not_hide_a_worse_point() {
        assert!(dominates(&point(0, -10.0, 100.0), &point(0, -5.0, 50.0)));
    }
}
