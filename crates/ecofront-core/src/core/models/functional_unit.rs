use std::fmt;

/// Opaque handle of an activity inside the impact engine's database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivityRef(pub String);

impl ActivityRef {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named reference quantity of one product within one allocation scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionalUnit {
    pub name: String,
    pub activity: ActivityRef,
    pub amount: f64,
}

impl FunctionalUnit {
    pub fn new(name: impl Into<String>, activity: ActivityRef, amount: f64) -> Self {
        Self {
            name: name.into(),
            activity,
            amount,
        }
    }

    /// The single-item demand handed to the impact engine for this unit.
    pub fn demand(&self) -> Demand {
        Demand::single(self.activity.clone(), self.amount)
    }
}

/// Final demand on the technosphere: `activity -> amount`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Demand {
    entries: Vec<(ActivityRef, f64)>,
}

impl Demand {
    pub fn single(activity: ActivityRef, amount: f64) -> Self {
        Self {
            entries: vec![(activity, amount)],
        }
    }

    pub fn add(&mut self, activity: ActivityRef, amount: f64) {
        self.entries.push((activity, amount));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ActivityRef, f64)> {
        self.entries.iter().map(|(a, amount)| (a, *amount))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
