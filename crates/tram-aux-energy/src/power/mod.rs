//! Power consumption models of the auxiliary subsystems.

pub mod hvac;
pub mod lighting;
pub mod power_model;
pub mod vehicle;
pub mod ventilation;
