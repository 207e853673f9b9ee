use std::fmt;

/// Stable identity of a scenario within one evaluated table.
///
/// Dominance checks compare scenarios by this identifier rather than by their objective
/// values, so two distinct scenarios with equal (GWP, NPV) are never confused with a
/// self-comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScenarioId(pub usize);

impl ScenarioId {
    pub fn index(self) -> usize {
        self.0
    }

    /// Code used as the prefix of every functional unit belonging to this scenario.
    pub fn code(self) -> String {
        format!("S{:03}", self.0)
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_zero_padded() {
        assert_eq!(ScenarioId(7).code(), "S007");
        assert_eq!(ScenarioId(123).to_string(), "S123");
    }
}
