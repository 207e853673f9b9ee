//! # ecofront Core Library
//!
//! Impact aggregation and multi-objective trade-off analysis for allocating a fixed
//! feedstock across competing bio-based products.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture so each stage can be tested on its own.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`FunctionalUnit`,
//!   `EvaluatedPoint`), the scenario generator, the pure Pareto mathematics, the interfaces
//!   to the external impact and techno-economic engines, and tabular I/O.
//!
//! - **[`engine`]: The Logic Core.** Configuration, errors, progress reporting and the
//!   parallel tasks that call out to the external engines and fold their answers into
//!   immutable result tables.
//!
//! - **[`workflows`]: The Public API.** Complete procedures: evaluating a sweep of
//!   allocation scenarios, extracting the GWP/NPV trade-off front, and decomposing the
//!   impact of a single functional unit.

pub mod core;
pub mod engine;
pub mod workflows;
