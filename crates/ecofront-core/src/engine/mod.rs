//! # Engine Module
//!
//! Orchestration layer between the stateless models in [`crate::core`] and the public
//! workflows. It owns the evaluation configuration, the error vocabulary, progress
//! reporting, and the tasks that fan calls to the external impact and techno-economic
//! engines out over a worker pool.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Sweep definition, impact methods and evaluation limits
//! - **Results** ([`results`]) - Immutable per-(functional unit, method) score tables
//! - **Progress Monitoring** ([`progress`]) - Phase and task events for front ends
//! - **Error Handling** ([`error`]) - Engine-level errors and their mapping from collaborators
//!
//! Each task consumes a complete input collection and returns a complete, immutable output;
//! parallel work is joined before anything is handed to the next stage.

pub mod config;
pub mod context;
pub mod error;
pub mod progress;
pub mod results;
pub(crate) mod tasks;

pub use tasks::contribution::{ContributionBreakdown, ExchangeGrouping};
