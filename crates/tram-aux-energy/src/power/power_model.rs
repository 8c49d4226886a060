//! Auxiliary power model trait.

use dyn_clone::{clone_trait_object, DynClone};

use crate::trip::TripConditions;

/// Cabin state properties essential to compute the power draw of the auxiliary subsystems.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CabinState {
    /// Whether it is daylight outside.
    pub daylight: bool,
    /// Number of passengers on board.
    pub passengers: u32,
    /// Outside temperature in °C.
    pub outside_temp: f64,
}

impl CabinState {
    /// Creates cabin state with specified properties.
    pub fn new(daylight: bool, passengers: u32, outside_temp: f64) -> Self {
        Self {
            daylight,
            passengers,
            outside_temp,
        }
    }
}

impl From<&TripConditions> for CabinState {
    fn from(trip: &TripConditions) -> Self {
        Self::new(trip.daylight(), trip.passenger_count(), trip.outside_temp_c())
    }
}

/// A model for estimating the power draw of an auxiliary subsystem.
pub trait AuxPowerModel: DynClone {
    /// Returns the subsystem power draw in kW for a given cabin state.
    ///
    /// The returned value is never negative.
    fn get_power(&self, state: &CabinState) -> f64;
}

clone_trait_object!(AuxPowerModel);
