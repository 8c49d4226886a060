//! Random trip conditions sampler.
//!
//! All draws take the random generator as an argument, so the whole dataset is reproducible
//! from the seed of the generator passed by the caller.

use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::trip::{Season, TripConditions};

/// Parameters of a normal distribution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalParams {
    /// Mean value.
    pub mean: f64,
    /// Standard deviation.
    pub std_dev: f64,
}

impl NormalParams {
    /// Creates normal distribution parameters.
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    fn distribution(&self, name: &str) -> Result<Normal<f64>> {
        if !self.mean.is_finite() {
            return Err(Error::InvalidConfig(format!("{}: mean {} is not finite", name, self.mean)));
        }
        if !(self.std_dev >= 0.) {
            return Err(Error::InvalidConfig(format!(
                "{}: standard deviation {} must be non-negative",
                name, self.std_dev
            )));
        }
        Normal::new(self.mean, self.std_dev).map_err(|e| Error::InvalidConfig(format!("{}: {}", name, e)))
    }
}

/// A value per season.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeasonTable<T> {
    /// Winter value.
    pub winter: T,
    /// Spring value.
    pub spring: T,
    /// Summer value.
    pub summer: T,
    /// Autumn value.
    pub autumn: T,
}

impl<T> SeasonTable<T> {
    /// Returns the value of the given season.
    pub fn get(&self, season: Season) -> &T {
        match season {
            Season::Winter => &self.winter,
            Season::Spring => &self.spring,
            Season::Summer => &self.summer,
            Season::Autumn => &self.autumn,
        }
    }
}

/// Passenger distribution used during the listed hour ranges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PassengerBand {
    /// Inclusive hour ranges `(first, last)`.
    pub hours: Vec<(u32, u32)>,
    /// Passenger count distribution.
    pub passengers: NormalParams,
}

impl PassengerBand {
    fn contains(&self, hour: u32) -> bool {
        self.hours.iter().any(|&(first, last)| first <= hour && hour <= last)
    }
}

/// Distributions of trip conditions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Relative frequency of each season, normalized when sampling.
    pub season_weights: SeasonTable<f64>,
    /// Trip duration distribution in minutes.
    pub duration: NormalParams,
    /// Shortest trip in minutes.
    pub min_duration: u32,
    /// Longest trip in minutes.
    pub max_duration: u32,
    /// Outside temperature distribution per season in °C.
    pub outside_temp: SeasonTable<NormalParams>,
    /// Passenger distributions for specific hours, the first matching band wins.
    pub passenger_bands: Vec<PassengerBand>,
    /// Passenger distribution for hours not covered by any band.
    pub off_peak_passengers: NormalParams,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            season_weights: SeasonTable {
                winter: 0.28,
                spring: 0.22,
                summer: 0.28,
                autumn: 0.22,
            },
            duration: NormalParams::new(35., 12.),
            min_duration: 10,
            max_duration: 60,
            outside_temp: SeasonTable {
                winter: NormalParams::new(5., 4.),
                spring: NormalParams::new(12., 5.),
                summer: NormalParams::new(24., 5.),
                autumn: NormalParams::new(12., 5.),
            },
            passenger_bands: vec![
                PassengerBand {
                    hours: vec![(7, 9), (16, 18)],
                    passengers: NormalParams::new(140., 40.),
                },
                PassengerBand {
                    hours: vec![(10, 15)],
                    passengers: NormalParams::new(90., 35.),
                },
            ],
            off_peak_passengers: NormalParams::new(30., 20.),
        }
    }
}

/// Draws independent trip conditions from the configured distributions.
#[derive(Clone, Debug)]
pub struct TripSampler {
    capacity: u32,
    seasons: WeightedIndex<f64>,
    duration: Normal<f64>,
    min_duration: u32,
    max_duration: u32,
    outside_temp: Vec<Normal<f64>>,
    passenger_bands: Vec<(PassengerBand, Normal<f64>)>,
    off_peak_passengers: Normal<f64>,
}

impl TripSampler {
    /// Creates a sampler for a vehicle with the given capacity.
    ///
    /// Fails if any distribution parameter is invalid.
    pub fn new(config: &SamplerConfig, capacity: u32) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidConfig("capacity must be positive".to_string()));
        }
        if config.min_duration == 0 || config.min_duration > config.max_duration {
            return Err(Error::InvalidConfig(format!(
                "duration bounds [{}, {}] must be positive and ordered",
                config.min_duration, config.max_duration
            )));
        }
        let weights = Season::ALL.map(|season| *config.season_weights.get(season));
        let seasons =
            WeightedIndex::new(weights).map_err(|e| Error::InvalidConfig(format!("season weights: {}", e)))?;
        let mut outside_temp = Vec::with_capacity(Season::ALL.len());
        for season in Season::ALL {
            let name = format!("outside temperature in {}", season);
            outside_temp.push(config.outside_temp.get(season).distribution(&name)?);
        }
        let mut passenger_bands = Vec::with_capacity(config.passenger_bands.len());
        for band in &config.passenger_bands {
            if band.hours.iter().any(|&(first, last)| first > last || last > 23) {
                return Err(Error::InvalidConfig(format!(
                    "passenger band hours {:?} must be ordered ranges within [0, 23]",
                    band.hours
                )));
            }
            let dist = band.passengers.distribution("passenger band")?;
            passenger_bands.push((band.clone(), dist));
        }
        Ok(Self {
            capacity,
            seasons,
            duration: config.duration.distribution("duration")?,
            min_duration: config.min_duration,
            max_duration: config.max_duration,
            outside_temp,
            passenger_bands,
            off_peak_passengers: config.off_peak_passengers.distribution("off-peak passengers")?,
        })
    }

    /// Vehicle capacity used for the sampled trips.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Picks a season using the season weights as probabilities.
    pub fn sample_season<R: Rng + ?Sized>(&self, rng: &mut R) -> Season {
        Season::ALL[self.seasons.sample(rng)]
    }

    /// Picks an hour of the day uniformly from `[0, 23]`.
    pub fn sample_hour<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(0..24)
    }

    /// Draws a trip duration in minutes, clamped to the duration bounds and truncated.
    pub fn sample_duration<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let duration = self.duration.sample(rng);
        duration.clamp(self.min_duration as f64, self.max_duration as f64) as u32
    }

    /// Draws the outside temperature of the season in °C.
    pub fn sample_outside_temp<R: Rng + ?Sized>(&self, season: Season, rng: &mut R) -> f64 {
        self.outside_temp[season.index()].sample(rng)
    }

    /// Draws the passenger count for a trip starting at the given hour, clamped to `[0, capacity]`.
    pub fn sample_passengers<R: Rng + ?Sized>(&self, hour: u32, rng: &mut R) -> u32 {
        let dist = self
            .passenger_bands
            .iter()
            .find(|(band, _)| band.contains(hour))
            .map(|(_, dist)| dist)
            .unwrap_or(&self.off_peak_passengers);
        dist.sample(rng).clamp(0., self.capacity as f64) as u32
    }

    /// Draws conditions of a single trip.
    ///
    /// The draw order is season, hour, duration, outside temperature, passengers.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TripConditions {
        let season = self.sample_season(rng);
        let hour = self.sample_hour(rng);
        let duration_min = self.sample_duration(rng);
        let outside_temp_c = self.sample_outside_temp(season, rng);
        let passenger_count = self.sample_passengers(hour, rng);
        TripConditions {
            season,
            hour,
            duration_min,
            outside_temp_c,
            passenger_count,
            capacity: self.capacity,
        }
    }
}
