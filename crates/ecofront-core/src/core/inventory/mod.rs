//! Interface to the life-cycle impact engine, plus an in-memory inventory database that
//! implements it.

pub mod database;
pub mod traits;

pub use database::{Activity, InventoryDatabase, InventoryError};
pub use traits::{ImpactEngine, ImpactEngineError};
