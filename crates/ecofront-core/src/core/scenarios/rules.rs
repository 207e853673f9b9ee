use super::ScenarioError;

/// How the feedstock left over by the swept product is split among the other products.
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationRule {
    /// Every other product receives the same amount.
    Equal,
    /// Every other product receives an amount proportional to its weight.
    Proportional { weights: Vec<(String, f64)> },
}

impl AllocationRule {
    pub fn validate(&self, products: &[&str]) -> Result<(), ScenarioError> {
        if let AllocationRule::Proportional { weights } = self {
            for &product in products {
                let weight = lookup_weight(weights, product)?;
                if !(weight.is_finite() && weight > 0.0) {
                    return Err(ScenarioError::InvalidWeight {
                        product: product.to_string(),
                        weight,
                    });
                }
            }
        }
        Ok(())
    }

    /// Splits `remainder` across `products`, returning amounts in the same order.
    ///
    /// The last product absorbs rounding so the amounts always sum to `remainder`.
    pub fn distribute(
        &self,
        remainder: f64,
        products: &[&str],
    ) -> Result<Vec<f64>, ScenarioError> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let fractions: Vec<f64> = match self {
            AllocationRule::Equal => vec![1.0 / products.len() as f64; products.len()],
            AllocationRule::Proportional { weights } => {
                let raw = products
                    .iter()
                    .map(|p| lookup_weight(weights, p))
                    .collect::<Result<Vec<_>, _>>()?;
                let sum: f64 = raw.iter().sum();
                raw.into_iter().map(|w| w / sum).collect()
            }
        };

        let mut amounts: Vec<f64> = fractions.iter().map(|f| f * remainder).collect();
        let head: f64 = amounts[..amounts.len() - 1].iter().sum();
        if let Some(last) = amounts.last_mut() {
            *last = remainder - head;
        }
        Ok(amounts)
    }
}

fn lookup_weight(weights: &[(String, f64)], product: &str) -> Result<f64, ScenarioError> {
    weights
        .iter()
        .find(|(name, _)| name == product)
        .map(|(_, w)| *w)
        .ok_or_else(|| ScenarioError::MissingWeight(product.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_rule_splits_evenly() {
        let amounts = AllocationRule::Equal
            .distribute(30.0, &["a", "b", "c"])
            .unwrap();
        assert_eq!(amounts.len(), 3);
        for amount in &amounts {
            assert!((amount - 10.0).abs() < 1e-12);
        }
        assert!((amounts.iter().sum::<f64>() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn proportional_rule_follows_weights() {
        let rule = AllocationRule::Proportional {
            weights: vec![("a".into(), 3.0), ("b".into(), 1.0)],
        };
        let amounts = rule.distribute(40.0, &["a", "b"]).unwrap();
        assert!((amounts[0] - 30.0).abs() < 1e-12);
        assert!((amounts[1] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn proportional_rule_requires_a_weight_for_every_product() {
        let rule = AllocationRule::Proportional {
            weights: vec![("a".into(), 1.0)],
        };
        assert_eq!(
            rule.validate(&["a", "b"]),
            Err(ScenarioError::MissingWeight("b".into()))
        );
    }

    #[test]
    fn proportional_rule_rejects_non_positive_weights() {
        let rule = AllocationRule::Proportional {
            weights: vec![("a".into(), 1.0), ("b".into(), 0.0)],
        };
        assert!(matches!(
            rule.validate(&["a", "b"]),
            Err(ScenarioError::InvalidWeight { .. })
        ));
    }
}
