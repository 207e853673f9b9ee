use super::traits::{ImpactEngine, ImpactEngineError};
use crate::core::models::contribution::{Exchange, ProcessContribution};
use crate::core::models::functional_unit::{ActivityRef, Demand};
use crate::core::models::method::ImpactMethod;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Activity code '{0}' is declared more than once")]
    DuplicateActivity(String),
    #[error("Activity '{activity}' has an exchange with unknown input '{input}'")]
    UnknownInput { activity: String, input: String },
    #[error("Activity '{activity}' characterizes unknown method '{key}'")]
    UnknownMethod { activity: String, key: String },
    #[error("Invalid impact method key '{0}'")]
    InvalidMethodKey(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatabaseFile {
    #[serde(default)]
    methods: Vec<MethodRecord>,
    #[serde(default)]
    activities: Vec<ActivityRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MethodRecord {
    path: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ActivityRecord {
    code: String,
    name: String,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    category: Option<String>,
    /// Direct characterized impact per unit of output, keyed by method key.
    #[serde(default)]
    impacts: HashMap<String, f64>,
    #[serde(default)]
    exchanges: Vec<ExchangeRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExchangeRecord {
    input: String,
    amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub code: String,
    pub name: String,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub impacts: HashMap<ImpactMethod, f64>,
    /// `(input code, amount per unit of output)`.
    pub inputs: Vec<(String, f64)>,
}

impl Activity {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            unit: None,
            category: None,
            impacts: HashMap::new(),
            inputs: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_impact(mut self, method: &ImpactMethod, per_unit: f64) -> Self {
        self.impacts.insert(method.clone(), per_unit);
        self
    }

    pub fn with_input(mut self, input: impl Into<String>, amount: f64) -> Self {
        self.inputs.push((input.into(), amount));
        self
    }
}

/// In-memory process inventory with per-method direct impact factors.
///
/// Scoring a demand scales every upstream process of the (acyclic) supply chain and sums
/// each process's direct impact.
#[derive(Debug, Clone, Default)]
pub struct InventoryDatabase {
    methods: Vec<ImpactMethod>,
    activities: HashMap<String, Activity>,
}

/// Per-process contributions of one impact calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryComputation {
    pub method: ImpactMethod,
    pub contributions: Vec<ProcessContribution>,
}

impl InventoryDatabase {
    pub fn new(
        methods: Vec<ImpactMethod>,
        activities: Vec<Activity>,
    ) -> Result<Self, InventoryError> {
        let mut map = HashMap::with_capacity(activities.len());
        for activity in activities {
            if map.contains_key(&activity.code) {
                return Err(InventoryError::DuplicateActivity(activity.code));
            }
            map.insert(activity.code.clone(), activity);
        }

        let known_methods: HashSet<&ImpactMethod> = methods.iter().collect();
        for activity in map.values() {
            for (input, _) in &activity.inputs {
                if !map.contains_key(input) {
                    return Err(InventoryError::UnknownInput {
                        activity: activity.code.clone(),
                        input: input.clone(),
                    });
                }
            }
            if let Some(method) = activity.impacts.keys().find(|m| !known_methods.contains(m)) {
                return Err(InventoryError::UnknownMethod {
                    activity: activity.code.clone(),
                    key: method.key(),
                });
            }
        }

        Ok(Self {
            methods,
            activities: map,
        })
    }

    pub fn load(path: &Path) -> Result<Self, InventoryError> {
        let content = std::fs::read_to_string(path).map_err(|e| InventoryError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: DatabaseFile = toml::from_str(&content).map_err(|e| InventoryError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_file(file)
    }

    fn from_file(file: DatabaseFile) -> Result<Self, InventoryError> {
        let methods = file
            .methods
            .into_iter()
            .map(|m| ImpactMethod::new(m.path))
            .collect();

        let mut activities = Vec::with_capacity(file.activities.len());
        for record in file.activities {
            let mut impacts = HashMap::with_capacity(record.impacts.len());
            for (key, value) in record.impacts {
                let method = ImpactMethod::from_key(&key)
                    .ok_or_else(|| InventoryError::InvalidMethodKey(key.clone()))?;
                impacts.insert(method, value);
            }
            activities.push(Activity {
                code: record.code,
                name: record.name,
                unit: record.unit,
                category: record.category,
                impacts,
                inputs: record
                    .exchanges
                    .into_iter()
                    .map(|e| (e.input, e.amount))
                    .collect(),
            });
        }

        Self::new(methods, activities)
    }

    pub fn methods(&self) -> &[ImpactMethod] {
        &self.methods
    }

    pub fn activity(&self, code: &str) -> Option<&Activity> {
        self.activities.get(code)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    fn require(&self, code: &str) -> Result<&Activity, ImpactEngineError> {
        self.activities
            .get(code)
            .ok_or_else(|| ImpactEngineError::ActivityNotFound(code.to_string()))
    }

    /// Activities reachable from `roots`, every process before its inputs.
    fn supply_chain_order<'a>(
        &'a self,
        roots: &[&'a str],
    ) -> Result<Vec<&'a str>, ImpactEngineError> {
        let mut finished: Vec<&str> = Vec::new();
        let mut done: HashSet<&str> = HashSet::new();
        let mut on_path: HashSet<&str> = HashSet::new();

        for &root in roots {
            self.visit(root, &mut on_path, &mut done, &mut finished)?;
        }
        finished.reverse();
        Ok(finished)
    }

    fn visit<'a>(
        &'a self,
        code: &'a str,
        on_path: &mut HashSet<&'a str>,
        done: &mut HashSet<&'a str>,
        finished: &mut Vec<&'a str>,
    ) -> Result<(), ImpactEngineError> {
        if done.contains(code) {
            return Ok(());
        }
        if !on_path.insert(code) {
            return Err(ImpactEngineError::CyclicSupplyChain(code.to_string()));
        }
        let activity = self.require(code)?;
        for (input, _) in &activity.inputs {
            self.visit(input.as_str(), on_path, done, finished)?;
        }
        on_path.remove(code);
        done.insert(code);
        finished.push(code);
        Ok(())
    }
}

impl ImpactEngine for InventoryDatabase {
    type Computation = InventoryComputation;

    fn compute(
        &self,
        demand: &Demand,
        method: &ImpactMethod,
    ) -> Result<InventoryComputation, ImpactEngineError> {
        if !self.methods.contains(method) {
            return Err(ImpactEngineError::MethodNotFound(method.clone()));
        }

        let mut roots = Vec::new();
        let mut scales: HashMap<&str, f64> = HashMap::new();
        for (activity, amount) in demand.iter() {
            let code = self.require(activity.code())?.code.as_str();
            roots.push(code);
            *scales.entry(code).or_insert(0.0) += amount;
        }

        let order = self.supply_chain_order(&roots)?;
        let mut contributions = Vec::with_capacity(order.len());
        for code in order {
            let activity = self.require(code)?;
            let scale = scales.get(code).copied().unwrap_or(0.0);
            for (input, amount) in &activity.inputs {
                *scales.entry(input.as_str()).or_insert(0.0) += scale * amount;
            }
            let factor = activity.impacts.get(method).copied().unwrap_or(0.0);
            contributions.push(ProcessContribution {
                activity: ActivityRef::new(code),
                process_name: activity.name.clone(),
                score: scale * factor,
            });
        }

        Ok(InventoryComputation {
            method: method.clone(),
            contributions,
        })
    }

    fn score(&self, computation: &InventoryComputation) -> f64 {
        computation.contributions.iter().map(|c| c.score).sum()
    }

    fn top_contributors(
        &self,
        computation: &InventoryComputation,
        n: usize,
    ) -> Vec<ProcessContribution> {
        let mut ranked = computation.contributions.clone();
        ranked.sort_by(|a, b| b.score.abs().total_cmp(&a.score.abs()));
        ranked.truncate(n);
        ranked
    }

    fn technosphere_exchanges(
        &self,
        activity: &ActivityRef,
    ) -> Result<Vec<Exchange>, ImpactEngineError> {
        let record = self.require(activity.code())?;
        record
            .inputs
            .iter()
            .map(|(input, amount)| {
                let upstream = self.require(input)?;
                Ok(Exchange {
                    input: ActivityRef::new(input.clone()),
                    input_name: upstream.name.clone(),
                    amount: *amount,
                    category: upstream.category.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn gwp() -> ImpactMethod {
        ImpactMethod::new(["IPCC 2013", "climate change", "GWP 100a"])
    }

    fn database() -> InventoryDatabase {
        let m = gwp();
        InventoryDatabase::new(
            vec![m.clone()],
            vec![
                Activity::new("ethanol", "ethanol fermentation")
                    .with_impact(&m, -1.0)
                    .with_input("electricity", 2.0)
                    .with_input("enzyme", 0.5),
                Activity::new("electricity", "grid electricity")
                    .with_category("Energy")
                    .with_impact(&m, 0.5),
                Activity::new("enzyme", "enzyme production")
                    .with_category("Chemicals")
                    .with_impact(&m, 4.0)
                    .with_input("electricity", 1.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn score_sums_scaled_supply_chain() {
        let db = database();
        let demand = Demand::single(ActivityRef::new("ethanol"), 10.0);
        let computation = db.compute(&demand, &gwp()).unwrap();
        // ethanol 10 * -1, electricity (20 + 5) * 0.5, enzyme 5 * 4
        assert!((db.score(&computation) - (-10.0 + 12.5 + 20.0)).abs() < 1e-12);
    }

    #[test]
    fn top_contributors_are_ranked_by_magnitude() {
        let db = database();
        let demand = Demand::single(ActivityRef::new("ethanol"), 10.0);
        let computation = db.compute(&demand, &gwp()).unwrap();
        let top = db.top_contributors(&computation, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].process_name, "enzyme production");
        assert_eq!(top[1].process_name, "grid electricity");
    }

    #[test]
    fn unknown_activity_is_reported_by_code() {
        let db = database();
        let demand = Demand::single(ActivityRef::new("butanol"), 1.0);
        assert_eq!(
            db.compute(&demand, &gwp()).unwrap_err(),
            ImpactEngineError::ActivityNotFound("butanol".into())
        );
    }

    #[test]
    fn unknown_method_is_rejected() {
        let db = database();
        let demand = Demand::single(ActivityRef::new("ethanol"), 1.0);
        let other = ImpactMethod::new(["ReCiPe", "land use"]);
        assert!(matches!(
            db.compute(&demand, &other),
            Err(ImpactEngineError::MethodNotFound(_))
        ));
    }

    #[test]
    fn cyclic_supply_chain_is_an_error() {
        let m = gwp();
        let db = InventoryDatabase::new(
            vec![m.clone()],
            vec![
                Activity::new("a", "a").with_input("b", 1.0),
                Activity::new("b", "b").with_input("a", 1.0),
            ],
        )
        .unwrap();
        let demand = Demand::single(ActivityRef::new("a"), 1.0);
        assert!(matches!(
            db.compute(&demand, &m),
            Err(ImpactEngineError::CyclicSupplyChain(_))
        ));
    }

    #[test]
    fn exchanges_carry_upstream_name_and_category() {
        let db = database();
        let exchanges = db
            .technosphere_exchanges(&ActivityRef::new("ethanol"))
            .unwrap();
        assert_eq!(exchanges.len(), 2);
        assert_eq!(exchanges[0].input_name, "grid electricity");
        assert_eq!(exchanges[0].category.as_deref(), Some("Energy"));
        assert_eq!(exchanges[1].amount, 0.5);
    }

    #[test]
    fn new_rejects_dangling_inputs() {
        let result = InventoryDatabase::new(
            vec![gwp()],
            vec![Activity::new("a", "a").with_input("missing", 1.0)],
        );
        assert!(matches!(result, Err(InventoryError::UnknownInput { .. })));
    }

    #[test]
    fn load_reads_toml_database() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inventory.toml");
        fs::write(
            &path,
            r#"
            [[methods]]
            path = ["IPCC 2013", "climate change", "GWP 100a"]

            [[activities]]
            code = "ethanol"
            name = "ethanol fermentation"
            impacts = { "IPCC 2013|climate change|GWP 100a" = 1.5 }
            exchanges = [{ input = "steam", amount = 2.0 }]

            [[activities]]
            code = "steam"
            name = "steam from natural gas"
            category = "Utilities"
            impacts = { "IPCC 2013|climate change|GWP 100a" = 0.25 }
            "#,
        )
        .unwrap();

        let db = InventoryDatabase::load(&path).unwrap();
        assert_eq!(db.len(), 2);
        let computation = db
            .compute(&Demand::single(ActivityRef::new("ethanol"), 1.0), &gwp())
            .unwrap();
        assert!((db.score(&computation) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = InventoryDatabase::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(InventoryError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "this is not toml").unwrap();
        assert!(matches!(
            InventoryDatabase::load(&path),
            Err(InventoryError::Toml { .. })
        ));
    }
}
