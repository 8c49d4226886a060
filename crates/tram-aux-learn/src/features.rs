//! Declarative feature transform.
//!
//! The transform is a list of named input columns with an encoding each. It knows nothing about
//! the learner and is persisted together with the fitted model, so training and prediction
//! always produce identical feature vectors.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use tram_aux_energy::{DatasetRecord, Season, TripConditions};

use crate::error::{Error, Result};

/// Season column.
pub const SEASON: &str = "season";
/// Daylight flag column.
pub const DAYLIGHT: &str = "daylight";
/// Trip duration column.
pub const DURATION_MIN: &str = "duration_min";
/// Outside temperature column.
pub const OUTSIDE_TEMP_C: &str = "outside_temp_c";
/// Passenger count column.
pub const PASSENGER_COUNT: &str = "passenger_count";
/// Occupancy column.
pub const OCCUPANCY_PCT: &str = "occupancy_pct";

/// Encoding of an input column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// One output per category set to 1 for the matching category, unknown categories
    /// encode as all zeros.
    OneHot {
        /// Known categories in output order.
        categories: Vec<String>,
    },
    /// The numeric value is passed unchanged.
    Passthrough,
}

/// Named input column and its encoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureColumn {
    /// Column name.
    pub name: String,
    /// Column encoding.
    pub encoding: Encoding,
}

impl FeatureColumn {
    /// Creates a one-hot encoded column.
    pub fn one_hot(name: &str, categories: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            encoding: Encoding::OneHot {
                categories: categories.iter().map(|c| c.to_string()).collect(),
            },
        }
    }

    /// Creates a numeric passthrough column.
    pub fn passthrough(name: &str) -> Self {
        Self {
            name: name.to_string(),
            encoding: Encoding::Passthrough,
        }
    }
}

/// Source of column values for the transform.
pub trait FeatureSource {
    /// Returns the value of a categorical column.
    fn categorical(&self, column: &str) -> Option<&str>;

    /// Returns the value of a numeric column.
    fn numeric(&self, column: &str) -> Option<f64>;
}

/// Turns named columns of a feature source into a numeric feature vector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureTransform {
    columns: Vec<FeatureColumn>,
}

impl FeatureTransform {
    /// Creates a transform from the list of columns.
    pub fn new(columns: Vec<FeatureColumn>) -> Self {
        Self { columns }
    }

    /// The transform of trip features: one-hot season followed by the numeric trip conditions.
    ///
    /// Season categories are listed in alphabetical order.
    pub fn trip_features() -> Self {
        let mut seasons: Vec<_> = Season::ALL.iter().map(|s| s.name()).collect();
        seasons.sort_unstable();
        Self::new(vec![
            FeatureColumn::one_hot(SEASON, &seasons),
            FeatureColumn::passthrough(DAYLIGHT),
            FeatureColumn::passthrough(DURATION_MIN),
            FeatureColumn::passthrough(OUTSIDE_TEMP_C),
            FeatureColumn::passthrough(PASSENGER_COUNT),
            FeatureColumn::passthrough(OCCUPANCY_PCT),
        ])
    }

    /// Returns the names of the produced features, e.g. `season_autumn` for one-hot outputs.
    pub fn output_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for column in &self.columns {
            match &column.encoding {
                Encoding::OneHot { categories } => {
                    names.extend(categories.iter().map(|c| format!("{}_{}", column.name, c)));
                }
                Encoding::Passthrough => names.push(column.name.clone()),
            }
        }
        names
    }

    /// Returns the length of the produced feature vectors.
    pub fn n_outputs(&self) -> usize {
        self.columns
            .iter()
            .map(|column| match &column.encoding {
                Encoding::OneHot { categories } => categories.len(),
                Encoding::Passthrough => 1,
            })
            .sum()
    }

    /// Builds the feature vector of a source.
    pub fn transform<S: FeatureSource + ?Sized>(&self, source: &S) -> Result<Vec<f64>> {
        let mut features = Vec::with_capacity(self.n_outputs());
        for column in &self.columns {
            match &column.encoding {
                Encoding::OneHot { categories } => {
                    let value = source
                        .categorical(&column.name)
                        .ok_or_else(|| Error::MissingFeature(column.name.clone()))?;
                    features.extend(categories.iter().map(|c| if c == value { 1. } else { 0. }));
                }
                Encoding::Passthrough => {
                    let value = source
                        .numeric(&column.name)
                        .ok_or_else(|| Error::MissingFeature(column.name.clone()))?;
                    features.push(value);
                }
            }
        }
        Ok(features)
    }

    /// Builds the feature matrix with one row per source.
    pub fn matrix<S: FeatureSource>(&self, sources: &[S]) -> Result<Array2<f64>> {
        let n_outputs = self.n_outputs();
        let mut values = Vec::with_capacity(sources.len() * n_outputs);
        for source in sources {
            values.extend(self.transform(source)?);
        }
        let found = values.len();
        Array2::from_shape_vec((sources.len(), n_outputs), values).map_err(|_| Error::FeatureMismatch {
            expected: sources.len() * n_outputs,
            found,
        })
    }
}

/// Trip conditions visible to the learner.
#[derive(Clone, Debug, PartialEq)]
pub struct TripFeatures {
    /// Season of the trip.
    pub season: Season,
    /// Whether the trip happens in daylight.
    pub daylight: bool,
    /// Trip duration in minutes.
    pub duration_min: u32,
    /// Outside temperature in °C.
    pub outside_temp_c: f64,
    /// Number of passengers.
    pub passenger_count: u32,
    /// Passenger count as a percentage of capacity.
    pub occupancy_pct: f64,
}

impl From<&DatasetRecord> for TripFeatures {
    fn from(record: &DatasetRecord) -> Self {
        Self {
            season: record.season,
            daylight: record.daylight != 0,
            duration_min: record.duration_min,
            outside_temp_c: record.outside_temp_c,
            passenger_count: record.passenger_count,
            occupancy_pct: record.occupancy_pct,
        }
    }
}

impl From<&TripConditions> for TripFeatures {
    fn from(trip: &TripConditions) -> Self {
        Self {
            season: trip.season(),
            daylight: trip.daylight(),
            duration_min: trip.duration_min(),
            outside_temp_c: trip.outside_temp_c(),
            passenger_count: trip.passenger_count(),
            occupancy_pct: trip.occupancy_pct(),
        }
    }
}

impl FeatureSource for TripFeatures {
    fn categorical(&self, column: &str) -> Option<&str> {
        match column {
            SEASON => Some(self.season.name()),
            _ => None,
        }
    }

    fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            DAYLIGHT => Some(if self.daylight { 1. } else { 0. }),
            DURATION_MIN => Some(self.duration_min as f64),
            OUTSIDE_TEMP_C => Some(self.outside_temp_c),
            PASSENGER_COUNT => Some(self.passenger_count as f64),
            OCCUPANCY_PCT => Some(self.occupancy_pct),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use ndarray::array;

    use super::*;

    #[test]
    fn trip_feature_names() {
        let transform = FeatureTransform::trip_features();
        assert_eq!(
            transform.output_names(),
            vec![
                "season_autumn",
                "season_spring",
                "season_summer",
                "season_winter",
                "daylight",
                "duration_min",
                "outside_temp_c",
                "passenger_count",
                "occupancy_pct",
            ]
        );
        assert_eq!(transform.n_outputs(), 9);
    }

    #[test]
    fn encode_trip() {
        let trip = TripConditions::new(Season::Winter, 8, 30, 2.0, 50, 200).unwrap();
        let features = FeatureTransform::trip_features()
            .transform(&TripFeatures::from(&trip))
            .unwrap();
        assert_eq!(features, vec![0., 0., 0., 1., 1., 30., 2.0, 50., 25.]);
    }

    #[test]
    fn feature_matrix() {
        let trips = [
            TripConditions::new(Season::Winter, 8, 30, 2.0, 50, 200).unwrap(),
            TripConditions::new(Season::Autumn, 22, 15, 9.5, 0, 200).unwrap(),
        ];
        let features: Vec<_> = trips.iter().map(TripFeatures::from).collect();
        let matrix = FeatureTransform::trip_features().matrix(&features).unwrap();
        assert_eq!(
            matrix,
            array![
                [0., 0., 0., 1., 1., 30., 2.0, 50., 25.],
                [1., 0., 0., 0., 0., 15., 9.5, 0., 0.],
            ]
        );
        let empty: [TripFeatures; 0] = [];
        assert_eq!(FeatureTransform::trip_features().matrix(&empty).unwrap().dim(), (0, 9));
    }

    struct Row(HashMap<&'static str, f64>, &'static str);

    impl FeatureSource for Row {
        fn categorical(&self, column: &str) -> Option<&str> {
            (column == "kind").then_some(self.1)
        }

        fn numeric(&self, column: &str) -> Option<f64> {
            self.0.get(column).copied()
        }
    }

    #[test]
    fn unknown_category_and_missing_column() {
        let transform = FeatureTransform::new(vec![
            FeatureColumn::one_hot("kind", &["a", "b"]),
            FeatureColumn::passthrough("x"),
        ]);
        let row = Row(HashMap::from([("x", 4.)]), "c");
        assert_eq!(transform.transform(&row).unwrap(), vec![0., 0., 4.]);

        let row = Row(HashMap::new(), "a");
        assert!(matches!(transform.transform(&row), Err(Error::MissingFeature(c)) if c == "x"));
    }
}
