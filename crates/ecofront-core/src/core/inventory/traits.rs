use crate::core::models::contribution::{Exchange, ProcessContribution};
use crate::core::models::functional_unit::{ActivityRef, Demand};
use crate::core::models::method::ImpactMethod;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ImpactEngineError {
    #[error("Activity '{0}' not found in the inventory database")]
    ActivityNotFound(String),

    #[error("Impact method {0} not found in the inventory database")]
    MethodNotFound(ImpactMethod),

    #[error("Supply chain of '{0}' contains a cycle")]
    CyclicSupplyChain(String),

    #[error("Transient impact engine failure: {0}")]
    Transient(String),
}

impl ImpactEngineError {
    pub fn is_transient(&self) -> bool {
        matches!(self, ImpactEngineError::Transient(_))
    }
}

/// Life-cycle impact assessment backend.
///
/// Implementations must be side-effect free: the same demand and method always produce
/// the same computation, so calls may run concurrently and be retried.
pub trait ImpactEngine: Sync {
    /// Result of one impact calculation; inspected through [`score`] and
    /// [`top_contributors`].
    ///
    /// [`score`]: ImpactEngine::score
    /// [`top_contributors`]: ImpactEngine::top_contributors
    type Computation;

    fn compute(
        &self,
        demand: &Demand,
        method: &ImpactMethod,
    ) -> Result<Self::Computation, ImpactEngineError>;

    fn score(&self, computation: &Self::Computation) -> f64;

    /// The `n` processes contributing most to the score, largest magnitude first.
    fn top_contributors(
        &self,
        computation: &Self::Computation,
        n: usize,
    ) -> Vec<ProcessContribution>;

    /// Upstream technosphere inputs of `activity`, in declaration order.
    fn technosphere_exchanges(
        &self,
        activity: &ActivityRef,
    ) -> Result<Vec<Exchange>, ImpactEngineError>;
}
