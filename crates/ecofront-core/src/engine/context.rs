use super::config::EvaluationConfig;
use super::progress::ProgressReporter;
use crate::core::inventory::ImpactEngine;

/// Shared, read-only handles threaded through the evaluation tasks.
#[derive(Clone, Copy)]
pub struct EvaluationContext<'a, E>
where
    E: ImpactEngine,
{
    pub engine: &'a E,
    pub reporter: &'a ProgressReporter<'a>,
    pub config: &'a EvaluationConfig,
}

impl<'a, E> EvaluationContext<'a, E>
where
    E: ImpactEngine,
{
    pub fn new(
        engine: &'a E,
        reporter: &'a ProgressReporter<'a>,
        config: &'a EvaluationConfig,
    ) -> Self {
        Self {
            engine,
            reporter,
            config,
        }
    }
}
