//! Interior lighting power models.

use crate::power::power_model::{AuxPowerModel, CabinState};

/// Lighting with two fixed brightness levels, one for daytime and one for night.
#[derive(Clone)]
pub struct FixedLightingPowerModel {
    day_power: f64,
    night_power: f64,
}

impl FixedLightingPowerModel {
    /// Creates a fixed lighting model.
    ///
    /// * `day_power` - Power draw in daylight in kW.
    /// * `night_power` - Power draw in darkness in kW.
    pub fn new(day_power: f64, night_power: f64) -> Self {
        Self { day_power, night_power }
    }
}

impl AuxPowerModel for FixedLightingPowerModel {
    fn get_power(&self, state: &CabinState) -> f64 {
        let power = if state.daylight { self.day_power } else { self.night_power };
        power.max(0.)
    }
}

/// Sensor-driven lighting: starts at a safety minimum, adds power for every passenger
/// and dims in daylight, never going below the minimum.
#[derive(Clone)]
pub struct SensorLightingPowerModel {
    min_power: f64,
    per_passenger: f64,
    daylight_reduction: f64,
}

impl SensorLightingPowerModel {
    /// Creates a sensor lighting model.
    ///
    /// * `min_power` - Safety minimum power draw in kW.
    /// * `per_passenger` - Additional power per passenger in kW.
    /// * `daylight_reduction` - Power reduction in daylight in kW.
    pub fn new(min_power: f64, per_passenger: f64, daylight_reduction: f64) -> Self {
        Self {
            min_power,
            per_passenger,
            daylight_reduction,
        }
    }
}

impl AuxPowerModel for SensorLightingPowerModel {
    fn get_power(&self, state: &CabinState) -> f64 {
        let daylight = if state.daylight { 1. } else { 0. };
        let power = self.min_power + self.per_passenger * state.passengers as f64 - self.daylight_reduction * daylight;
        power.max(self.min_power).max(0.)
    }
}
