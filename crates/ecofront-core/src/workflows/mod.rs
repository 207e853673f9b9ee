//! # Workflows Module
//!
//! Top-level entry points of the library. Each workflow takes its inputs explicitly and
//! returns an immutable result; nothing is carried between calls.
//!
//! - **Evaluation** ([`evaluate`]) - Generates the allocation sweep, scores every functional
//!   unit under every method, prices every scenario, and assembles the evaluated points.
//! - **Trade-off** ([`trade_off`]) - Feasibility filtering, the Pareto front, its
//!   representative members and the hypervolume indicator.
//! - **Decomposition** ([`decompose`]) - Grouped upstream contributions and the top
//!   contributing processes of one functional unit.

pub mod decompose;
pub mod evaluate;
pub mod trade_off;
