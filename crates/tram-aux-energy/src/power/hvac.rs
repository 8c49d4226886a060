//! Heating and cooling power model.

use serde::{Deserialize, Serialize};

use crate::power::power_model::{AuxPowerModel, CabinState};

/// Temperature thresholds shared by the HVAC models of both policies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    /// Target cabin temperature in °C.
    pub comfort_temp: f64,
    /// Outside temperatures strictly below this value are extreme.
    pub extreme_low: f64,
    /// Outside temperatures strictly above this value are extreme.
    pub extreme_high: f64,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            comfort_temp: 21.,
            extreme_low: 3.,
            extreme_high: 28.,
        }
    }
}

impl ClimateConfig {
    /// Absolute difference between the comfort and outside temperatures.
    pub fn delta_t(&self, outside_temp: f64) -> f64 {
        (self.comfort_temp - outside_temp).abs()
    }

    /// Checks whether the outside temperature is very cold or very hot.
    pub fn is_extreme(&self, outside_temp: f64) -> bool {
        outside_temp < self.extreme_low || outside_temp > self.extreme_high
    }
}

/// HVAC power growing linearly with the gap between comfort and outside temperatures
/// and with the number of passengers.
///
/// Current power is computed as `P = max(0, a * ΔT + b + c * passengers)`, multiplied by
/// the extreme factor on very cold or very hot days.
#[derive(Clone)]
pub struct HvacPowerModel {
    climate: ClimateConfig,
    per_degree: f64,
    base_power: f64,
    per_passenger: f64,
    extreme_factor: f64,
}

impl HvacPowerModel {
    /// Creates an HVAC model.
    ///
    /// * `climate` - Comfort temperature and extreme thresholds.
    /// * `per_degree` - Power per degree of ΔT in kW.
    /// * `base_power` - Baseline power in kW.
    /// * `per_passenger` - Occupant load per passenger in kW.
    /// * `extreme_factor` - Multiplier applied on extreme days.
    pub fn new(
        climate: ClimateConfig,
        per_degree: f64,
        base_power: f64,
        per_passenger: f64,
        extreme_factor: f64,
    ) -> Self {
        Self {
            climate,
            per_degree,
            base_power,
            per_passenger,
            extreme_factor,
        }
    }
}

impl AuxPowerModel for HvacPowerModel {
    fn get_power(&self, state: &CabinState) -> f64 {
        let delta_t = self.climate.delta_t(state.outside_temp);
        let mut power = self.per_degree * delta_t + self.base_power + self.per_passenger * state.passengers as f64;
        if self.climate.is_extreme(state.outside_temp) {
            power *= self.extreme_factor;
        }
        power.max(0.)
    }
}
