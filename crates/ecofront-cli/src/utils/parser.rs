use ecofront::core::io::table::AllocationColumn;
use ecofront::core::models::ids::ScenarioId;
use ecofront::core::models::method::ImpactMethod;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "Invalid impact method key '{0}'. Expected non-empty parts joined by '|' (e.g., 'IPCC 2013|climate change|GWP 100a')."
    )]
    InvalidMethodKey(String),

    #[error("Invalid allocation column '{0}'. Expected 'PRODUCT=INDEX' (e.g., 'ethanol=3').")]
    InvalidAllocationColumn(String),

    #[error("Invalid scenario '{0}'. Expected an index (e.g., '3') or a code (e.g., 'S003').")]
    InvalidScenario(String),

    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidSetValue(String),
}

pub fn parse_method_key(key: &str) -> Result<ImpactMethod, ParseError> {
    ImpactMethod::from_key(key).ok_or_else(|| ParseError::InvalidMethodKey(key.to_string()))
}

pub fn parse_allocation_column(spec: &str) -> Result<AllocationColumn, ParseError> {
    let invalid = || ParseError::InvalidAllocationColumn(spec.to_string());
    let (product, column) = spec.split_once('=').ok_or_else(invalid)?;
    let product = product.trim();
    if product.is_empty() {
        return Err(invalid());
    }
    let column = column.trim().parse().map_err(|_| invalid())?;
    Ok(AllocationColumn {
        product: product.to_string(),
        column,
    })
}

/// Accepts a bare index or the `S`-prefixed code used in functional unit names.
pub fn parse_scenario(value: &str) -> Result<ScenarioId, ParseError> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix('S')
        .or_else(|| trimmed.strip_prefix('s'))
        .unwrap_or(trimmed);
    digits
        .parse()
        .map(ScenarioId)
        .map_err(|_| ParseError::InvalidScenario(value.to_string()))
}

pub fn split_set_value(pair: &str) -> Result<(&str, &str), ParseError> {
    pair.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| ParseError::InvalidSetValue(pair.to_string()))
}
