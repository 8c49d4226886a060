//! Trip conditions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Season of the year, determines the daylight window and the outside temperature distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Winter.
    Winter,
    /// Spring.
    Spring,
    /// Summer.
    Summer,
    /// Autumn.
    Autumn,
}

impl Season {
    /// All seasons in the canonical order.
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Autumn];

    /// Returns the lowercase name of the season.
    pub fn name(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }

    /// Returns the position of the season in [`Season::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Season::Winter => 0,
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Autumn => 3,
        }
    }

    /// Returns the daylight window as a half-open range of hours `[start, end)`.
    pub fn daylight_window(&self) -> (u32, u32) {
        match self {
            Season::Winter => (8, 16),
            Season::Spring => (6, 19),
            Season::Summer => (5, 21),
            Season::Autumn => (7, 18),
        }
    }

    /// Checks whether the given hour falls into the daylight window of the season.
    pub fn is_daylight(&self, hour: u32) -> bool {
        let (start, end) = self.daylight_window();
        hour >= start && hour < end
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Season {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        Season::ALL
            .into_iter()
            .find(|season| season.name() == name)
            .ok_or_else(|| Error::UnknownSeason(s.trim().to_string()))
    }
}

/// Conditions of a single trip.
///
/// Daylight and occupancy are not stored but derived from the other fields, so they can never
/// disagree with the season, hour, passengers and capacity of the trip.
#[derive(Clone, Debug, PartialEq)]
pub struct TripConditions {
    pub(crate) season: Season,
    pub(crate) hour: u32,
    pub(crate) duration_min: u32,
    pub(crate) outside_temp_c: f64,
    pub(crate) passenger_count: u32,
    pub(crate) capacity: u32,
}

impl TripConditions {
    /// Creates trip conditions, rejecting values outside of the model domain.
    ///
    /// * `hour` - hour of the day in `[0, 23]`.
    /// * `duration_min` - trip duration in minutes, must be positive.
    /// * `outside_temp_c` - outside temperature in °C, must be finite.
    /// * `passenger_count` - number of passengers in `[0, capacity]`.
    /// * `capacity` - vehicle capacity, must be positive.
    pub fn new(
        season: Season,
        hour: u32,
        duration_min: u32,
        outside_temp_c: f64,
        passenger_count: u32,
        capacity: u32,
    ) -> Result<Self> {
        if hour > 23 {
            return Err(Error::InvalidTrip(format!("hour {} out of range [0, 23]", hour)));
        }
        if duration_min == 0 {
            return Err(Error::InvalidTrip("duration must be positive".to_string()));
        }
        if !outside_temp_c.is_finite() {
            return Err(Error::InvalidTrip(format!(
                "outside temperature {} is not a finite number",
                outside_temp_c
            )));
        }
        if capacity == 0 {
            return Err(Error::InvalidTrip("capacity must be positive".to_string()));
        }
        if passenger_count > capacity {
            return Err(Error::InvalidTrip(format!(
                "passenger count {} exceeds capacity {}",
                passenger_count, capacity
            )));
        }
        Ok(Self {
            season,
            hour,
            duration_min,
            outside_temp_c,
            passenger_count,
            capacity,
        })
    }

    /// Season of the trip.
    pub fn season(&self) -> Season {
        self.season
    }

    /// Hour of the day when the trip starts.
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Whether the trip happens in daylight.
    pub fn daylight(&self) -> bool {
        self.season.is_daylight(self.hour)
    }

    /// Trip duration in minutes.
    pub fn duration_min(&self) -> u32 {
        self.duration_min
    }

    /// Trip duration in hours.
    pub fn duration_hours(&self) -> f64 {
        self.duration_min as f64 / 60.
    }

    /// Outside temperature in °C.
    pub fn outside_temp_c(&self) -> f64 {
        self.outside_temp_c
    }

    /// Number of passengers.
    pub fn passenger_count(&self) -> u32 {
        self.passenger_count
    }

    /// Vehicle capacity.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Passenger count as a percentage of capacity.
    pub fn occupancy_pct(&self) -> f64 {
        100. * self.passenger_count as f64 / self.capacity as f64
    }
}
