//! Units of work fanned out to the external engines.
//!
//! Every task builds a complete work list, evaluates the items independently (in parallel
//! with the `parallel` feature), and only then folds the per-item results into its output.
//! The first failing item aborts the task; no partial output is returned.

pub mod contribution;
pub mod economics;
pub mod impact;

use crate::core::inventory::{ImpactEngine, ImpactEngineError};
use crate::core::models::functional_unit::Demand;
use crate::core::models::method::ImpactMethod;
use tracing::debug;

/// Calls the impact engine, retrying transient failures up to `max_retries` times.
pub(crate) fn compute_with_retries<E: ImpactEngine>(
    engine: &E,
    demand: &Demand,
    method: &ImpactMethod,
    max_retries: usize,
) -> Result<E::Computation, ImpactEngineError> {
    let mut attempt = 0;
    loop {
        match engine.compute(demand, method) {
            Err(e) if e.is_transient() && attempt < max_retries => {
                attempt += 1;
                debug!(attempt, error = %e, "Retrying transient impact engine failure.");
            }
            result => return result,
        }
    }
}
