use super::{EconomicsError, TechnoEconomicEngine};
use crate::core::models::allocation::Allocation;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ProductEconomics {
    /// Yearly cash margin per unit of allocated feedstock.
    pub margin: f64,
}

/// Constant-cash-flow NPV model.
///
/// `npv = -capex + sum_{t=1..lifetime} (sum_p amount_p * margin_p - fixed_opex) / (1 + r)^t`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct LinearEconomics {
    pub discount_rate: f64,
    pub lifetime_years: u32,
    #[serde(default)]
    pub capex: f64,
    #[serde(default)]
    pub fixed_opex: f64,
    pub products: HashMap<String, ProductEconomics>,
}

impl LinearEconomics {
    pub fn validate(&self) -> Result<(), EconomicsError> {
        if !(self.discount_rate.is_finite() && self.discount_rate > -1.0) {
            return Err(EconomicsError::InvalidParameter {
                name: "discount-rate",
                reason: format!("must be greater than -1, got {}", self.discount_rate),
            });
        }
        if self.lifetime_years == 0 {
            return Err(EconomicsError::InvalidParameter {
                name: "lifetime-years",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Sum of discount factors over the project lifetime.
    pub fn annuity_factor(&self) -> f64 {
        (1..=self.lifetime_years)
            .map(|t| (1.0 + self.discount_rate).powi(-(t as i32)))
            .sum()
    }
}

impl TechnoEconomicEngine for LinearEconomics {
    fn npv_for(&self, allocation: &Allocation) -> Result<f64, EconomicsError> {
        let mut yearly_margin = -self.fixed_opex;
        for share in allocation.iter() {
            let product = self
                .products
                .get(&share.product)
                .ok_or_else(|| EconomicsError::UnknownProduct(share.product.clone()))?;
            yearly_margin += share.amount * product.margin;
        }
        Ok(-self.capex + yearly_margin * self.annuity_factor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LinearEconomics {
        LinearEconomics {
            discount_rate: 0.0,
            lifetime_years: 10,
            capex: 500.0,
            fixed_opex: 20.0,
            products: HashMap::from([
                ("ethanol".to_string(), ProductEconomics { margin: 1.0 }),
                ("lactic".to_string(), ProductEconomics { margin: 2.0 }),
            ]),
        }
    }

    #[test]
    fn undiscounted_npv_is_margin_times_lifetime_minus_capex() {
        let allocation = Allocation::from_pairs([("ethanol", 60.0), ("lactic", 40.0)]);
        let npv = model().npv_for(&allocation).unwrap();
        assert!((npv - (-500.0 + (60.0 + 80.0 - 20.0) * 10.0)).abs() < 1e-9);
    }

    #[test]
    fn discounting_reduces_future_cash_flows() {
        let mut m = model();
        m.discount_rate = 0.1;
        m.lifetime_years = 1;
        assert!((m.annuity_factor() - 1.0 / 1.1).abs() < 1e-12);
    }

    #[test]
    fn unknown_product_is_an_error() {
        let allocation = Allocation::from_pairs([("butanol", 10.0)]);
        assert_eq!(
            model().npv_for(&allocation),
            Err(EconomicsError::UnknownProduct("butanol".into()))
        );
    }

    #[test]
    fn zero_lifetime_fails_validation() {
        let mut m = model();
        m.lifetime_years = 0;
        assert!(m.validate().is_err());
    }

    #[test]
    fn deserializes_from_kebab_case_toml() {
        let m: LinearEconomics = toml::from_str(
            r#"
            discount-rate = 0.08
            lifetime-years = 20
            capex = 1000.0
            [products.ethanol]
            margin = 3.5
            "#,
        )
        .unwrap();
        assert_eq!(m.lifetime_years, 20);
        assert_eq!(m.fixed_opex, 0.0);
        assert_eq!(m.products["ethanol"].margin, 3.5);
    }
}
