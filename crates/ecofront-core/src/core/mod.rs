pub mod economics;
pub mod inventory;
pub mod io;
pub mod models;
pub mod pareto;
pub mod scenarios;
