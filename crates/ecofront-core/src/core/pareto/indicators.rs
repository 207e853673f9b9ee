use crate::core::models::point::EvaluatedPoint;

/// Anchor for the hypervolume indicator: a point every front member should improve on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePoint {
    pub gwp: f64,
    pub npv: f64,
}

impl ReferencePoint {
    /// The worst GWP and worst NPV found among `points`.
    pub fn worst_of(points: &[EvaluatedPoint]) -> Option<Self> {
        let first = points.first()?;
        Some(points.iter().fold(
            ReferencePoint {
                gwp: first.gwp,
                npv: first.npv,
            },
            |acc, p| ReferencePoint {
                gwp: acc.gwp.max(p.gwp),
                npv: acc.npv.min(p.npv),
            },
        ))
    }
}

/// Area of the (gwp, npv) region dominated by `front` and bounded by `reference`.
///
/// Members that do not improve on the reference in both objectives add nothing.
pub fn hypervolume(front: &[EvaluatedPoint], reference: ReferencePoint) -> f64 {
    let mut sorted: Vec<&EvaluatedPoint> = front
        .iter()
        .filter(|p| p.gwp < reference.gwp && p.npv > reference.npv)
        .collect();
    sorted.sort_by(|a, b| a.gwp.total_cmp(&b.gwp));

    let mut area = 0.0;
    let mut covered_npv = reference.npv;
    for point in sorted {
        let height = point.npv - covered_npv;
        if height > 0.0 {
            area += (reference.gwp - point.gwp) * height;
            covered_npv = point.npv;
        }
    }
    area
}
