//! Interface to the techno-economic engine that prices an allocation.

pub mod linear;

pub use linear::{LinearEconomics, ProductEconomics};

use crate::core::models::allocation::Allocation;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EconomicsError {
    #[error("No economic data for product '{0}'")]
    UnknownProduct(String),

    #[error("Invalid economic parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Techno-economic model, invoked once per scenario.
pub trait TechnoEconomicEngine: Sync {
    /// Net present value of producing `allocation` (absolute feedstock amounts).
    fn npv_for(&self, allocation: &Allocation) -> Result<f64, EconomicsError>;
}
