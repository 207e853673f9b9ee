pub mod allocation;
pub mod contribution;
pub mod functional_unit;
pub mod ids;
pub mod method;
pub mod point;
