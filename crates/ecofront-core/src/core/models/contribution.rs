use super::functional_unit::ActivityRef;

/// An upstream technosphere input of an activity.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub input: ActivityRef,
    pub input_name: String,
    pub amount: f64,
    pub category: Option<String>,
}

/// Share of an impact score attributed to a single process.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessContribution {
    pub activity: ActivityRef,
    pub process_name: String,
    pub score: f64,
}
