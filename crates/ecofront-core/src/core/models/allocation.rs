use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductShare {
    pub product: String,
    pub amount: f64,
}

/// Distribution of the feedstock across products, in product declaration order.
///
/// The same type carries either absolute feedstock amounts (as produced by the scenario
/// generator) or percentages of the total (as stored on an [`EvaluatedPoint`]).
///
/// [`EvaluatedPoint`]: super::point::EvaluatedPoint
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Allocation {
    shares: Vec<ProductShare>,
}

impl Allocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            shares: pairs
                .into_iter()
                .map(|(product, amount)| ProductShare {
                    product: product.into(),
                    amount,
                })
                .collect(),
        }
    }

    /// Sets the amount of `product`, appending it if it is not yet present.
    pub fn set(&mut self, product: &str, amount: f64) {
        match self.shares.iter_mut().find(|s| s.product == product) {
            Some(share) => share.amount = amount,
            None => self.shares.push(ProductShare {
                product: product.to_string(),
                amount,
            }),
        }
    }

    pub fn get(&self, product: &str) -> Option<f64> {
        self.shares
            .iter()
            .find(|s| s.product == product)
            .map(|s| s.amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductShare> {
        self.shares.iter()
    }

    pub fn products(&self) -> impl Iterator<Item = &str> {
        self.shares.iter().map(|s| s.product.as_str())
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.shares.iter().map(|s| s.amount).sum()
    }

    /// Expresses every amount as a percentage of `total`.
    pub fn to_percentages(&self, total: f64) -> Allocation {
        Allocation {
            shares: self
                .shares
                .iter()
                .map(|s| ProductShare {
                    product: s.product.clone(),
                    amount: s.amount / total * 100.0,
                })
                .collect(),
        }
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .shares
            .iter()
            .map(|s| format!("{}={:.2}", s.product, s.amount))
            .collect();
        f.write_str(&parts.join(", "))
    }
}
