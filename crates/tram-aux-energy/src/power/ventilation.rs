//! Ventilation (fans) power models.

use crate::power::power_model::{AuxPowerModel, CabinState};

/// Fans running at a constant level.
#[derive(Clone)]
pub struct ConstantVentilationPowerModel {
    power: f64,
}

impl ConstantVentilationPowerModel {
    /// Creates a constant ventilation model.
    ///
    /// * `power` - Power draw in kW.
    pub fn new(power: f64) -> Self {
        Self { power }
    }
}

impl AuxPowerModel for ConstantVentilationPowerModel {
    fn get_power(&self, _state: &CabinState) -> f64 {
        self.power.max(0.)
    }
}

/// Fans keeping a minimum of fresh air and adding airflow for every passenger.
#[derive(Clone)]
pub struct SensorVentilationPowerModel {
    min_power: f64,
    per_passenger: f64,
}

impl SensorVentilationPowerModel {
    /// Creates a sensor ventilation model.
    ///
    /// * `min_power` - Power draw of the empty vehicle in kW.
    /// * `per_passenger` - Additional power per passenger in kW.
    pub fn new(min_power: f64, per_passenger: f64) -> Self {
        Self {
            min_power,
            per_passenger,
        }
    }
}

impl AuxPowerModel for SensorVentilationPowerModel {
    fn get_power(&self, state: &CabinState) -> f64 {
        let power = self.min_power + self.per_passenger * state.passengers as f64;
        power.max(self.min_power).max(0.)
    }
}
