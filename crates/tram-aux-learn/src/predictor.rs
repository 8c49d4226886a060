//! Predictor comparing the learned savings with the exact ones.

use std::path::Path;

use tram_aux_energy::{EnergyModel, Season, TripConditions};

use crate::error::Result;
use crate::features::TripFeatures;
use crate::model::SavingsModel;

/// Learned and exact savings of a trip.
#[derive(Clone, Debug, PartialEq)]
pub struct SavingsComparison {
    /// Trip conditions.
    pub trip: TripConditions,
    /// Savings percentage predicted by the model.
    pub learned_pct: f64,
    /// Savings percentage computed by the energy model, NaN if undefined.
    pub exact_pct: f64,
}

impl SavingsComparison {
    /// Absolute difference of the learned and exact values.
    pub fn abs_error(&self) -> f64 {
        (self.learned_pct - self.exact_pct).abs()
    }
}

/// Savings model with the energy model it was trained against.
pub struct Predictor {
    model: SavingsModel,
    energy: EnergyModel,
}

impl Predictor {
    /// Creates a predictor, the exact values come from the energy config stored in the model.
    pub fn new(model: SavingsModel) -> Self {
        let energy = EnergyModel::new(model.energy());
        Self { model, energy }
    }

    /// Loads the model from a file.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::new(SavingsModel::load(path)?))
    }

    /// Vehicle capacity used for the occupancy of trips.
    pub fn capacity(&self) -> u32 {
        self.model.capacity()
    }

    /// Builds validated trip conditions using the model capacity.
    pub fn trip(
        &self,
        season: Season,
        hour: u32,
        duration_min: u32,
        outside_temp_c: f64,
        passenger_count: u32,
    ) -> Result<TripConditions> {
        Ok(TripConditions::new(
            season,
            hour,
            duration_min,
            outside_temp_c,
            passenger_count,
            self.capacity(),
        )?)
    }

    /// Savings of the trip computed by the energy model.
    pub fn exact_pct_savings(&self, trip: &TripConditions) -> f64 {
        self.energy.pct_savings(trip)
    }

    /// Savings of the trip predicted by the model.
    pub fn learned_pct_savings(&self, trip: &TripConditions) -> Result<f64> {
        self.model.predict(&TripFeatures::from(trip))
    }

    /// Computes both the learned and the exact savings.
    pub fn compare(&self, trip: TripConditions) -> Result<SavingsComparison> {
        let learned_pct = self.learned_pct_savings(&trip)?;
        let exact_pct = self.exact_pct_savings(&trip);
        Ok(SavingsComparison {
            trip,
            learned_pct,
            exact_pct,
        })
    }
}
