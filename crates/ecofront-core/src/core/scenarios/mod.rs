//! Enumeration of feedstock-allocation scenarios under a conservation constraint.

pub mod generator;
pub mod rules;

pub use generator::{ProductSpec, Scenario, ScenarioSet, SweepSpec, generate};
pub use rules::AllocationRule;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ScenarioError {
    #[error("Total feedstock must be a positive finite number, got {0}")]
    InvalidTotal(f64),

    #[error("Step {step} must be positive and divide the total {total} into whole steps")]
    InvalidStep { step: f64, total: f64 },

    #[error("At least two products are required for an allocation sweep, got {0}")]
    TooFewProducts(usize),

    #[error("Product '{0}' is declared more than once")]
    DuplicateProduct(String),

    #[error("Swept product '{0}' is not among the declared products")]
    UnknownSweptProduct(String),

    #[error("Yield for product '{product}' must be positive, got {value}")]
    InvalidYield { product: String, value: f64 },

    #[error("Allocation weight for product '{product}' must be positive, got {weight}")]
    InvalidWeight { product: String, weight: f64 },

    #[error("No allocation weight declared for product '{0}'")]
    MissingWeight(String),
}
