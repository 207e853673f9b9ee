use crate::core::models::method::ImpactMethod;
use crate::core::scenarios::{AllocationRule, ProductSpec, SweepSpec};
use thiserror::Error;

pub const DEFAULT_TOP_CONTRIBUTORS: usize = 5;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationConfig {
    pub sweep: SweepSpec,
    /// Every method evaluated for every functional unit.
    pub methods: Vec<ImpactMethod>,
    /// The method whose summed score is a scenario's GWP objective.
    pub objective_method: ImpactMethod,
    /// How many top contributing processes to retain per (functional unit, method).
    pub top_contributors: usize,
    /// Extra attempts granted to an impact calculation that fails transiently.
    pub max_retries: usize,
}

#[derive(Default)]
pub struct EvaluationConfigBuilder {
    total: Option<f64>,
    step: Option<f64>,
    swept_product: Option<String>,
    products: Vec<ProductSpec>,
    allocation_rule: Option<AllocationRule>,
    methods: Vec<ImpactMethod>,
    objective_method: Option<ImpactMethod>,
    top_contributors: Option<usize>,
    max_retries: Option<usize>,
}

impl EvaluationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(mut self, total: f64) -> Self {
        self.total = Some(total);
        self
    }
    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }
    pub fn swept_product(mut self, product: impl Into<String>) -> Self {
        self.swept_product = Some(product.into());
        self
    }
    pub fn product(mut self, product: ProductSpec) -> Self {
        self.products.push(product);
        self
    }
    pub fn products(mut self, products: Vec<ProductSpec>) -> Self {
        self.products = products;
        self
    }
    pub fn allocation_rule(mut self, rule: AllocationRule) -> Self {
        self.allocation_rule = Some(rule);
        self
    }
    pub fn method(mut self, method: ImpactMethod) -> Self {
        self.methods.push(method);
        self
    }
    pub fn methods(mut self, methods: Vec<ImpactMethod>) -> Self {
        self.methods = methods;
        self
    }
    pub fn objective_method(mut self, method: ImpactMethod) -> Self {
        self.objective_method = Some(method);
        self
    }
    pub fn top_contributors(mut self, n: usize) -> Self {
        self.top_contributors = Some(n);
        self
    }
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Assembles the configuration. The objective method defaults to the first declared
    /// method and the allocation rule to an equal split.
    pub fn build(self) -> Result<EvaluationConfig, ConfigError> {
        if self.products.is_empty() {
            return Err(ConfigError::MissingParameter("products"));
        }
        if self.methods.is_empty() {
            return Err(ConfigError::MissingParameter("methods"));
        }

        let objective_method = match self.objective_method {
            Some(method) => method,
            None => self.methods[0].clone(),
        };
        if !self.methods.contains(&objective_method) {
            return Err(ConfigError::InvalidValue {
                parameter: "objective_method",
                reason: format!("{} is not among the evaluated methods", objective_method),
            });
        }

        let sweep = SweepSpec {
            total: self.total.ok_or(ConfigError::MissingParameter("total"))?,
            step: self.step.ok_or(ConfigError::MissingParameter("step"))?,
            swept_product: self
                .swept_product
                .ok_or(ConfigError::MissingParameter("swept_product"))?,
            products: self.products,
            rule: self.allocation_rule.unwrap_or(AllocationRule::Equal),
        };
        sweep
            .candidate_count()
            .map_err(|e| ConfigError::InvalidValue {
                parameter: "sweep",
                reason: e.to_string(),
            })?;

        Ok(EvaluationConfig {
            sweep,
            methods: self.methods,
            objective_method,
            top_contributors: self.top_contributors.unwrap_or(DEFAULT_TOP_CONTRIBUTORS),
            max_retries: self.max_retries.unwrap_or(0),
        })
    }
}
