use super::config::ConfigError;
use crate::core::economics::EconomicsError;
use crate::core::inventory::ImpactEngineError;
use crate::core::io::TableError;
use crate::core::models::ids::ScenarioId;
use crate::core::models::method::ImpactMethod;
use crate::core::scenarios::ScenarioError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{kind} '{code}' not found")]
    NotFound { kind: &'static str, code: String },

    #[error(
        "Impact of functional unit '{functional_unit}' under {method} has not been computed yet"
    )]
    PreconditionNotMet {
        functional_unit: String,
        method: ImpactMethod,
    },

    #[error("Impact method {method} was not part of the evaluation")]
    InvalidMethod { method: ImpactMethod },

    #[error("Scenario generation failed: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("Impact calculation for '{functional_unit}' failed: {source}")]
    Impact {
        functional_unit: String,
        #[source]
        source: ImpactEngineError,
    },

    #[error("Economic evaluation of scenario {scenario} failed: {source}")]
    Economics {
        scenario: ScenarioId,
        #[source]
        source: EconomicsError,
    },

    #[error("Scenario {scenario} has a non-finite {objective} ({value})")]
    NonFiniteObjective {
        scenario: ScenarioId,
        objective: &'static str,
        value: f64,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Table I/O failed: {0}")]
    Table(#[from] TableError),
}

impl EngineError {
    /// Maps an impact engine failure for `functional_unit`, surfacing unresolved
    /// references as [`EngineError::NotFound`].
    pub fn from_impact(functional_unit: &str, error: ImpactEngineError) -> Self {
        match error {
            ImpactEngineError::ActivityNotFound(code) => EngineError::NotFound {
                kind: "Activity",
                code,
            },
            ImpactEngineError::MethodNotFound(method) => EngineError::NotFound {
                kind: "Impact method",
                code: method.key(),
            },
            other => EngineError::Impact {
                functional_unit: functional_unit.to_string(),
                source: other,
            },
        }
    }
}
