//! Vehicle auxiliary power model.

use crate::energy::EnergyBreakdown;
use crate::power::power_model::{AuxPowerModel, CabinState};
use crate::trip::TripConditions;

/// A model for estimating the auxiliary energy consumption of a vehicle.
///
/// The consumption is modeled using the following parts, each with its own power model:
/// - interior lighting
/// - ventilation
/// - heating and cooling (HVAC)
#[derive(Clone)]
pub struct VehiclePowerModel {
    lighting: Box<dyn AuxPowerModel>,
    ventilation: Box<dyn AuxPowerModel>,
    hvac: Box<dyn AuxPowerModel>,
}

impl VehiclePowerModel {
    /// Creates the vehicle power model.
    pub fn new(
        lighting: Box<dyn AuxPowerModel>,
        ventilation: Box<dyn AuxPowerModel>,
        hvac: Box<dyn AuxPowerModel>,
    ) -> Self {
        Self {
            lighting,
            ventilation,
            hvac,
        }
    }

    /// Returns the total auxiliary power draw in kW for a given cabin state.
    pub fn get_power(&self, state: &CabinState) -> f64 {
        self.lighting.get_power(state) + self.ventilation.get_power(state) + self.hvac.get_power(state)
    }

    /// Returns the energy in kWh consumed by each subsystem during the trip.
    pub fn get_energy(&self, trip: &TripConditions) -> EnergyBreakdown {
        let state = CabinState::from(trip);
        let hours = trip.duration_hours();
        EnergyBreakdown::new(
            self.lighting.get_power(&state) * hours,
            self.ventilation.get_power(&state) * hours,
            self.hvac.get_power(&state) * hours,
        )
    }
}
