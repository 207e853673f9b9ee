use crate::cli::ProjectArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use ecofront::core::economics::LinearEconomics;
use ecofront::core::models::functional_unit::ActivityRef;
use ecofront::core::pareto::FeasibilityRule;
use ecofront::core::scenarios::{AllocationRule, ProductSpec};
use ecofront::engine::ExchangeGrouping;
use ecofront::engine::config::{DEFAULT_TOP_CONTRIBUTORS, EvaluationConfig, EvaluationConfigBuilder};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Values used when neither the command line nor the config file sets them.
pub struct DefaultsConfig {
    pub total: f64,
    pub step: f64,
    pub top_contributors: usize,
    pub max_retries: usize,
    pub min_npv: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            total: 100.0,
            step: 1.0,
            top_contributors: DEFAULT_TOP_CONTRIBUTORS,
            max_retries: 0,
            min_npv: 0.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum RuleKind {
    Equal,
    Proportional,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum GroupingKind {
    Category,
    Process,
    Mapping,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialSweepConfig {
    total: Option<f64>,
    step: Option<f64>,
    swept_product: Option<String>,
    rule: Option<RuleKind>,
    weights: Option<BTreeMap<String, f64>>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileProduct {
    name: String,
    activity: Option<String>,
    #[serde(rename = "yield")]
    yield_factor: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialGroupingConfig {
    kind: Option<GroupingKind>,
    tags: Option<BTreeMap<String, String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialFeasibilityConfig {
    min_npv: Option<f64>,
    max_gwp: Option<f64>,
}

/// The project file as written, before defaults and command-line overrides.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialProjectConfig {
    inventory: Option<PathBuf>,
    methods: Option<Vec<String>>,
    objective_method: Option<String>,
    top_contributors: Option<usize>,
    max_retries: Option<usize>,
    sweep: Option<PartialSweepConfig>,
    products: Option<Vec<FileProduct>>,
    economics: Option<LinearEconomics>,
    grouping: Option<PartialGroupingConfig>,
    feasibility: Option<PartialFeasibilityConfig>,
    /// Directory relative paths in the file are resolved against.
    #[serde(skip)]
    base_dir: PathBuf,
}

/// Fully merged settings for one command run.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub inventory_path: PathBuf,
    pub evaluation: EvaluationConfig,
    pub economics: Option<LinearEconomics>,
    pub grouping: ExchangeGrouping,
    pub feasibility: FeasibilityRule,
}

impl ProjectConfig {
    pub fn require_economics(&self) -> Result<&LinearEconomics> {
        self.economics.as_ref().ok_or_else(|| {
            CliError::Config("An `[economics]` section is required for this command.".to_string())
        })
    }
}

impl PartialProjectConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    pub fn merge_with_cli(mut self, args: &ProjectArgs) -> Result<ProjectConfig> {
        self.apply_set_values(&args.set_values)?;
        let defaults = DefaultsConfig::default();

        let inventory_path = match (&args.inventory, &self.inventory) {
            (Some(cli), _) => cli.clone(),
            (None, Some(file)) => self.base_dir.join(file),
            (None, None) => {
                return Err(CliError::Config(
                    "An `inventory` path is required either in the config file or via --inventory."
                        .to_string(),
                ));
            }
        };

        let products = self
            .products
            .take()
            .unwrap_or_default()
            .into_iter()
            .map(|p| {
                let activity = ActivityRef::new(p.activity.unwrap_or_else(|| p.name.clone()));
                let spec = ProductSpec::new(p.name, activity);
                match p.yield_factor {
                    Some(y) => spec.with_yield(y),
                    None => spec,
                }
            })
            .collect::<Vec<_>>();

        let sweep = self.sweep.take().unwrap_or_default();
        let swept_product = sweep
            .swept_product
            .or_else(|| products.first().map(|p| p.name.clone()));
        let rule = merge_rule(sweep.rule, sweep.weights)?;

        let objective = self
            .objective_method
            .as_deref()
            .map(parser::parse_method_key)
            .transpose()
            .map_err(|e| CliError::Config(e.to_string()))?;
        let mut methods = self
            .methods
            .take()
            .unwrap_or_default()
            .iter()
            .map(|key| parser::parse_method_key(key))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| CliError::Config(e.to_string()))?;
        if methods.is_empty() {
            methods.extend(objective.clone());
        }

        let mut builder = EvaluationConfigBuilder::new()
            .total(args.total.or(sweep.total).unwrap_or(defaults.total))
            .step(args.step.or(sweep.step).unwrap_or(defaults.step))
            .products(products)
            .allocation_rule(rule)
            .methods(methods)
            .top_contributors(
                args.top_contributors
                    .or(self.top_contributors)
                    .unwrap_or(defaults.top_contributors),
            )
            .max_retries(self.max_retries.unwrap_or(defaults.max_retries));
        if let Some(product) = swept_product {
            builder = builder.swept_product(product);
        }
        if let Some(method) = objective {
            builder = builder.objective_method(method);
        }
        let evaluation = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        if let Some(economics) = &self.economics {
            economics
                .validate()
                .map_err(|e| CliError::Config(e.to_string()))?;
        }

        let feasibility = self.feasibility.take().unwrap_or_default();
        Ok(ProjectConfig {
            inventory_path,
            evaluation,
            economics: self.economics,
            grouping: merge_grouping(self.grouping.take().unwrap_or_default())?,
            feasibility: FeasibilityRule {
                min_npv: Some(feasibility.min_npv.unwrap_or(defaults.min_npv)),
                max_gwp: feasibility.max_gwp,
            },
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value) =
                parser::split_set_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

            match key {
                "inventory" => self.inventory = Some(PathBuf::from(value)),
                "objective-method" => self.objective_method = Some(value.to_string()),
                "top-contributors" => self.top_contributors = Some(parse_value(key, value)?),
                "max-retries" => self.max_retries = Some(parse_value(key, value)?),
                "sweep.total" => self.sweep_mut().total = Some(parse_value(key, value)?),
                "sweep.step" => self.sweep_mut().step = Some(parse_value(key, value)?),
                "sweep.swept-product" => {
                    self.sweep_mut().swept_product = Some(value.to_string());
                }
                "sweep.rule" => {
                    self.sweep_mut().rule = Some(match value {
                        "equal" => RuleKind::Equal,
                        "proportional" => RuleKind::Proportional,
                        _ => return Err(invalid_value(key, value)),
                    });
                }
                "grouping.kind" => {
                    self.grouping_mut().kind = Some(match value {
                        "category" => GroupingKind::Category,
                        "process" => GroupingKind::Process,
                        "mapping" => GroupingKind::Mapping,
                        _ => return Err(invalid_value(key, value)),
                    });
                }
                "feasibility.min-npv" => {
                    self.feasibility_mut().min_npv = Some(parse_value(key, value)?);
                }
                "feasibility.max-gwp" => {
                    self.feasibility_mut().max_gwp = Some(parse_value(key, value)?);
                }
                "economics.discount-rate" => {
                    self.economics_mut(key)?.discount_rate = parse_value(key, value)?;
                }
                "economics.lifetime-years" => {
                    self.economics_mut(key)?.lifetime_years = parse_value(key, value)?;
                }
                "economics.capex" => self.economics_mut(key)?.capex = parse_value(key, value)?,
                "economics.fixed-opex" => {
                    self.economics_mut(key)?.fixed_opex = parse_value(key, value)?;
                }
                _ => {
                    if let Some(product) = key.strip_prefix("sweep.weights.") {
                        let weight = parse_value(key, value)?;
                        self.sweep_mut()
                            .weights
                            .get_or_insert_with(Default::default)
                            .insert(product.to_string(), weight);
                    } else if let Some(code) = key.strip_prefix("grouping.tags.") {
                        self.grouping_mut()
                            .tags
                            .get_or_insert_with(Default::default)
                            .insert(code.to_string(), value.to_string());
                    } else {
                        return Err(CliError::Config(format!(
                            "Unsupported configuration key for --set: '{}'",
                            key
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn sweep_mut(&mut self) -> &mut PartialSweepConfig {
        self.sweep.get_or_insert_with(Default::default)
    }

    fn grouping_mut(&mut self) -> &mut PartialGroupingConfig {
        self.grouping.get_or_insert_with(Default::default)
    }

    fn feasibility_mut(&mut self) -> &mut PartialFeasibilityConfig {
        self.feasibility.get_or_insert_with(Default::default)
    }

    fn economics_mut(&mut self, key: &str) -> Result<&mut LinearEconomics> {
        self.economics.as_mut().ok_or_else(|| {
            CliError::Config(format!(
                "Cannot set '{}': the config file has no `[economics]` section.",
                key
            ))
        })
    }
}

fn merge_rule(
    kind: Option<RuleKind>,
    weights: Option<BTreeMap<String, f64>>,
) -> Result<AllocationRule> {
    match (kind, weights) {
        (Some(RuleKind::Equal), _) | (None, None) => Ok(AllocationRule::Equal),
        (Some(RuleKind::Proportional), None) => Err(CliError::Config(
            "`sweep.rule = \"proportional\"` requires `sweep.weights`".to_string(),
        )),
        (Some(RuleKind::Proportional) | None, Some(weights)) => Ok(AllocationRule::Proportional {
            weights: weights.into_iter().collect(),
        }),
    }
}

fn merge_grouping(partial: PartialGroupingConfig) -> Result<ExchangeGrouping> {
    match (partial.kind, partial.tags) {
        (Some(GroupingKind::Category), _) | (None, None) => Ok(ExchangeGrouping::Category),
        (Some(GroupingKind::Process), _) => Ok(ExchangeGrouping::Process),
        (Some(GroupingKind::Mapping), None) => Err(CliError::Config(
            "`grouping.kind = \"mapping\"` requires `grouping.tags`".to_string(),
        )),
        (Some(GroupingKind::Mapping) | None, Some(tags)) => Ok(ExchangeGrouping::Mapping(tags)),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| invalid_value(key, value))
}

fn invalid_value(key: &str, value: &str) -> CliError {
    CliError::Config(format!("Invalid value for {}: {}", key, value))
}
