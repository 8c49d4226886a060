//! Energy consumption of a trip under the fixed and sensor control policies.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::power::hvac::{ClimateConfig, HvacPowerModel};
use crate::power::lighting::{FixedLightingPowerModel, SensorLightingPowerModel};
use crate::power::vehicle::VehiclePowerModel;
use crate::power::ventilation::{ConstantVentilationPowerModel, SensorVentilationPowerModel};
use crate::trip::TripConditions;

/// Fixed totals not exceeding this value make the savings percentage undefined.
pub const SAVINGS_EPSILON: f64 = 1e-9;

/// Control policy of the auxiliary subsystems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPolicy {
    /// Constant or worst-case power draw regardless of conditions.
    Fixed,
    /// Power scaled with occupancy, daylight and outside temperature.
    Sensor,
}

/// Coefficients of the fixed policy (kW).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedPolicyConfig {
    /// Lighting power in daylight.
    pub lighting_day_power: f64,
    /// Lighting power in darkness.
    pub lighting_night_power: f64,
    /// Constant ventilation power.
    pub ventilation_power: f64,
    /// HVAC power per degree of ΔT.
    pub hvac_per_degree: f64,
    /// HVAC baseline power.
    pub hvac_base_power: f64,
    /// HVAC multiplier on extreme days.
    pub hvac_extreme_factor: f64,
}

impl Default for FixedPolicyConfig {
    fn default() -> Self {
        Self {
            lighting_day_power: 3.5,
            lighting_night_power: 6.0,
            ventilation_power: 3.0,
            hvac_per_degree: 0.13,
            hvac_base_power: 0.7,
            hvac_extreme_factor: 1.10,
        }
    }
}

/// Coefficients of the sensor policy (kW).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorPolicyConfig {
    /// Lighting safety minimum.
    pub lighting_min_power: f64,
    /// Lighting added per passenger.
    pub lighting_per_passenger: f64,
    /// Lighting dimmed in daylight.
    pub lighting_daylight_reduction: f64,
    /// Ventilation of the empty vehicle.
    pub ventilation_min_power: f64,
    /// Ventilation added per passenger.
    pub ventilation_per_passenger: f64,
    /// HVAC power per degree of ΔT.
    pub hvac_per_degree: f64,
    /// HVAC baseline power.
    pub hvac_base_power: f64,
    /// HVAC occupant load per passenger.
    pub hvac_per_passenger: f64,
    /// HVAC multiplier on extreme days.
    pub hvac_extreme_factor: f64,
}

impl Default for SensorPolicyConfig {
    fn default() -> Self {
        Self {
            lighting_min_power: 1.2,
            lighting_per_passenger: 0.02,
            lighting_daylight_reduction: 0.8,
            ventilation_min_power: 1.2,
            ventilation_per_passenger: 0.015,
            hvac_per_degree: 0.11,
            hvac_base_power: 0.4,
            hvac_per_passenger: 0.018,
            hvac_extreme_factor: 1.05,
        }
    }
}

/// Energy model configuration, defaults reproduce the reference tram.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyModelConfig {
    /// Coefficients of the fixed policy.
    pub fixed: FixedPolicyConfig,
    /// Coefficients of the sensor policy.
    pub sensor: SensorPolicyConfig,
    /// Comfort temperature and extreme thresholds.
    pub climate: ClimateConfig,
}

impl EnergyModelConfig {
    /// Checks that all coefficients are finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        let fixed = &self.fixed;
        let sensor = &self.sensor;
        let coefficients = [
            ("fixed.lighting_day_power", fixed.lighting_day_power),
            ("fixed.lighting_night_power", fixed.lighting_night_power),
            ("fixed.ventilation_power", fixed.ventilation_power),
            ("fixed.hvac_per_degree", fixed.hvac_per_degree),
            ("fixed.hvac_base_power", fixed.hvac_base_power),
            ("fixed.hvac_extreme_factor", fixed.hvac_extreme_factor),
            ("sensor.lighting_min_power", sensor.lighting_min_power),
            ("sensor.lighting_per_passenger", sensor.lighting_per_passenger),
            ("sensor.lighting_daylight_reduction", sensor.lighting_daylight_reduction),
            ("sensor.ventilation_min_power", sensor.ventilation_min_power),
            ("sensor.ventilation_per_passenger", sensor.ventilation_per_passenger),
            ("sensor.hvac_per_degree", sensor.hvac_per_degree),
            ("sensor.hvac_base_power", sensor.hvac_base_power),
            ("sensor.hvac_per_passenger", sensor.hvac_per_passenger),
            ("sensor.hvac_extreme_factor", sensor.hvac_extreme_factor),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() || value < 0. {
                return Err(Error::InvalidConfig(format!(
                    "energy coefficient {} = {} must be finite and non-negative",
                    name, value
                )));
            }
        }
        let climate = &self.climate;
        if !climate.comfort_temp.is_finite() || !climate.extreme_low.is_finite() || !climate.extreme_high.is_finite() {
            return Err(Error::InvalidConfig("climate temperatures must be finite".to_string()));
        }
        if climate.extreme_low > climate.extreme_high {
            return Err(Error::InvalidConfig(format!(
                "extreme low threshold {} is above extreme high threshold {}",
                climate.extreme_low, climate.extreme_high
            )));
        }
        Ok(())
    }
}

/// Energy consumed by the auxiliary subsystems during a trip, in kWh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyBreakdown {
    /// Interior lighting.
    pub lighting: f64,
    /// Ventilation fans.
    pub ventilation: f64,
    /// Heating and cooling.
    pub hvac: f64,
    /// Sum of the three subsystems.
    pub total: f64,
}

impl EnergyBreakdown {
    /// Creates a breakdown, the total is computed from the parts.
    pub fn new(lighting: f64, ventilation: f64, hvac: f64) -> Self {
        Self {
            lighting,
            ventilation,
            hvac,
            total: lighting + ventilation + hvac,
        }
    }
}

/// Returns the relative reduction of the sensor total versus the fixed total in percent.
///
/// Returns NaN when the fixed total does not exceed [`SAVINGS_EPSILON`].
pub fn savings_pct(total_fixed: f64, total_sensor: f64) -> f64 {
    if total_fixed > SAVINGS_EPSILON {
        100. * (1. - total_sensor / total_fixed)
    } else {
        f64::NAN
    }
}

/// Energy of a trip under both policies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TripEnergy {
    /// Breakdown under the fixed policy.
    pub fixed: EnergyBreakdown,
    /// Breakdown under the sensor policy.
    pub sensor: EnergyBreakdown,
    /// Savings of the sensor policy in percent, NaN if undefined.
    pub pct_savings: f64,
}

/// Evaluates trip energy under both control policies.
///
/// This is the single implementation of the energy formulas, shared by dataset generation
/// and prediction.
#[derive(Clone)]
pub struct EnergyModel {
    fixed: VehiclePowerModel,
    sensor: VehiclePowerModel,
}

impl EnergyModel {
    /// Creates an energy model from the given coefficients.
    pub fn new(config: &EnergyModelConfig) -> Self {
        let fixed = &config.fixed;
        let sensor = &config.sensor;
        Self {
            fixed: VehiclePowerModel::new(
                Box::new(FixedLightingPowerModel::new(
                    fixed.lighting_day_power,
                    fixed.lighting_night_power,
                )),
                Box::new(ConstantVentilationPowerModel::new(fixed.ventilation_power)),
                Box::new(HvacPowerModel::new(
                    config.climate.clone(),
                    fixed.hvac_per_degree,
                    fixed.hvac_base_power,
                    0.,
                    fixed.hvac_extreme_factor,
                )),
            ),
            sensor: VehiclePowerModel::new(
                Box::new(SensorLightingPowerModel::new(
                    sensor.lighting_min_power,
                    sensor.lighting_per_passenger,
                    sensor.lighting_daylight_reduction,
                )),
                Box::new(SensorVentilationPowerModel::new(
                    sensor.ventilation_min_power,
                    sensor.ventilation_per_passenger,
                )),
                Box::new(HvacPowerModel::new(
                    config.climate.clone(),
                    sensor.hvac_per_degree,
                    sensor.hvac_base_power,
                    sensor.hvac_per_passenger,
                    sensor.hvac_extreme_factor,
                )),
            ),
        }
    }

    /// Returns the vehicle power model of the given policy.
    pub fn policy_model(&self, policy: ControlPolicy) -> &VehiclePowerModel {
        match policy {
            ControlPolicy::Fixed => &self.fixed,
            ControlPolicy::Sensor => &self.sensor,
        }
    }

    /// Returns the energy consumed during the trip under the given policy.
    pub fn get_energy(&self, policy: ControlPolicy, trip: &TripConditions) -> EnergyBreakdown {
        self.policy_model(policy).get_energy(trip)
    }

    /// Returns the energy under both policies and the resulting savings.
    pub fn evaluate(&self, trip: &TripConditions) -> TripEnergy {
        let fixed = self.get_energy(ControlPolicy::Fixed, trip);
        let sensor = self.get_energy(ControlPolicy::Sensor, trip);
        TripEnergy {
            fixed,
            sensor,
            pct_savings: savings_pct(fixed.total, sensor.total),
        }
    }

    /// Returns the savings percentage of the trip, NaN if undefined.
    pub fn pct_savings(&self, trip: &TripConditions) -> f64 {
        self.evaluate(trip).pct_savings
    }
}

impl Default for EnergyModel {
    fn default() -> Self {
        Self::new(&EnergyModelConfig::default())
    }
}
