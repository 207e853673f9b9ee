//! Dominance filtering over evaluated scenarios for the objective pair
//! (minimize GWP, maximize NPV).
//!
//! Everything here is a pure function of its inputs. The front is recomputed from the
//! evaluated points with a quadratic pairwise check.

pub mod dominance;
pub mod feasibility;
pub mod front;
pub mod indicators;
pub mod selection;

pub use dominance::dominates;
pub use feasibility::{FeasibilityRule, filter_feasible};
pub use front::{ParetoFront, pareto_front};
pub use indicators::{ReferencePoint, hypervolume};
pub use selection::{Representatives, select_representatives};
