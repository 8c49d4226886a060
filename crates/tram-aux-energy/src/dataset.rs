//! Synthetic trip dataset.
//!
//! Rows are kept unrounded in memory. Rounding is applied only when rows are converted to
//! [`DatasetRecord`] for writing the CSV table.

use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::Path;

use log::{debug, info};
use rand::prelude::*;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::energy::{EnergyModel, TripEnergy};
use crate::error::Result;
use crate::sampler::TripSampler;
use crate::trip::{Season, TripConditions};

/// Returns the identifier of the trip with the given 1-based index, e.g. `T00042`.
pub fn trip_id(index: usize) -> String {
    format!("T{:05}", index)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// A single generated trip with its energy under both policies.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetRow {
    /// Sequential trip identifier.
    pub trip_id: String,
    /// Trip conditions.
    pub trip: TripConditions,
    /// Energy under both policies.
    pub energy: TripEnergy,
}

impl DatasetRow {
    /// Savings of the sensor policy in percent, NaN if undefined.
    pub fn pct_savings(&self) -> f64 {
        self.energy.pct_savings
    }
}

/// A row of the dataset CSV table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct DatasetRecord {
    pub trip_id: String,
    pub season: Season,
    pub daylight: u8,
    pub duration_min: u32,
    pub outside_temp_c: f64,
    pub capacity: u32,
    pub passenger_count: u32,
    pub occupancy_pct: f64,
    #[serde(rename = "lighting_kWh_fixed")]
    pub lighting_kwh_fixed: f64,
    #[serde(rename = "vent_kWh_fixed")]
    pub vent_kwh_fixed: f64,
    #[serde(rename = "hvac_kWh_fixed")]
    pub hvac_kwh_fixed: f64,
    #[serde(rename = "total_aux_kWh_fixed")]
    pub total_aux_kwh_fixed: f64,
    #[serde(rename = "lighting_kWh_sensor")]
    pub lighting_kwh_sensor: f64,
    #[serde(rename = "vent_kWh_sensor")]
    pub vent_kwh_sensor: f64,
    #[serde(rename = "hvac_kWh_sensor")]
    pub hvac_kwh_sensor: f64,
    #[serde(rename = "total_aux_kWh_sensor")]
    pub total_aux_kwh_sensor: f64,
    /// Empty in the table when the savings are undefined.
    pub pct_savings: Option<f64>,
}

impl From<&DatasetRow> for DatasetRecord {
    fn from(row: &DatasetRow) -> Self {
        let trip = &row.trip;
        let fixed = &row.energy.fixed;
        let sensor = &row.energy.sensor;
        let pct_savings = row.energy.pct_savings;
        Self {
            trip_id: row.trip_id.clone(),
            season: trip.season(),
            daylight: trip.daylight() as u8,
            duration_min: trip.duration_min(),
            outside_temp_c: round_to(trip.outside_temp_c(), 2),
            capacity: trip.capacity(),
            passenger_count: trip.passenger_count(),
            occupancy_pct: round_to(trip.occupancy_pct(), 1),
            lighting_kwh_fixed: round_to(fixed.lighting, 3),
            vent_kwh_fixed: round_to(fixed.ventilation, 3),
            hvac_kwh_fixed: round_to(fixed.hvac, 3),
            total_aux_kwh_fixed: round_to(fixed.total, 3),
            lighting_kwh_sensor: round_to(sensor.lighting, 3),
            vent_kwh_sensor: round_to(sensor.ventilation, 3),
            hvac_kwh_sensor: round_to(sensor.hvac, 3),
            total_aux_kwh_sensor: round_to(sensor.total, 3),
            pct_savings: pct_savings.is_finite().then(|| round_to(pct_savings, 2)),
        }
    }
}

/// Averages over the dataset rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatasetSummary {
    /// Number of rows.
    pub rows: usize,
    /// Number of rows with defined savings.
    pub rows_with_savings: usize,
    /// Mean total energy under the fixed policy in kWh.
    pub mean_total_fixed: f64,
    /// Mean total energy under the sensor policy in kWh.
    pub mean_total_sensor: f64,
    /// Mean savings in percent over rows with defined savings.
    pub mean_pct_savings: f64,
    /// Mean savings per season, seasons without defined savings are omitted.
    pub mean_pct_savings_by_season: Vec<(Season, f64)>,
}

#[derive(Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn add(&mut self, x: f64) {
        self.sum += x;
        self.count += 1;
    }

    fn value(&self) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        self.sum / self.count as f64
    }
}

/// Ordered sequence of independent trip rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<DatasetRow>,
}

impl Dataset {
    /// Creates a dataset from rows.
    pub fn new(rows: Vec<DatasetRow>) -> Self {
        Self { rows }
    }

    /// Returns the dataset rows.
    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Checks whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the rows converted to rounded table records.
    pub fn records(&self) -> Vec<DatasetRecord> {
        self.rows.iter().map(DatasetRecord::from).collect()
    }

    /// Writes the dataset as a CSV table with a header.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            writer.serialize(DatasetRecord::from(row))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Saves the dataset as a CSV file, creating missing parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        self.write_csv(File::create(path)?)?;
        info!("Saved {} rows to {}", self.len(), path.display());
        Ok(())
    }

    /// Computes the dataset averages.
    pub fn summary(&self) -> DatasetSummary {
        let mut fixed = Mean::default();
        let mut sensor = Mean::default();
        let mut savings = Mean::default();
        let mut by_season: Vec<Mean> = Season::ALL.iter().map(|_| Mean::default()).collect();
        for row in &self.rows {
            fixed.add(row.energy.fixed.total);
            sensor.add(row.energy.sensor.total);
            let pct = row.pct_savings();
            if pct.is_finite() {
                savings.add(pct);
                by_season[row.trip.season().index()].add(pct);
            }
        }
        DatasetSummary {
            rows: self.rows.len(),
            rows_with_savings: savings.count,
            mean_total_fixed: fixed.value(),
            mean_total_sensor: sensor.value(),
            mean_pct_savings: savings.value(),
            mean_pct_savings_by_season: Season::ALL
                .iter()
                .zip(by_season.iter())
                .filter(|(_, mean)| mean.count > 0)
                .map(|(season, mean)| (*season, mean.value()))
                .collect(),
        }
    }
}

/// Reads dataset records from a CSV table.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<DatasetRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

/// Reads dataset records from a CSV file.
pub fn load_records(path: &Path) -> Result<Vec<DatasetRecord>> {
    let records = read_records(File::open(path)?)?;
    info!("Loaded {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// Composes the trip sampler and the energy model into dataset rows.
#[derive(Clone)]
pub struct DatasetBuilder {
    sampler: TripSampler,
    model: EnergyModel,
}

impl DatasetBuilder {
    /// Creates a builder from a sampler and an energy model.
    pub fn new(sampler: TripSampler, model: EnergyModel) -> Self {
        Self { sampler, model }
    }

    /// Creates a builder from the simulation config.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            TripSampler::new(&config.sampler, config.capacity)?,
            EnergyModel::new(&config.energy),
        ))
    }

    /// Returns the energy model used for the rows.
    pub fn model(&self) -> &EnergyModel {
        &self.model
    }

    /// Samples a trip and evaluates its energy, `index` is 1-based.
    pub fn build_row<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> DatasetRow {
        let trip = self.sampler.sample(rng);
        let energy = self.model.evaluate(&trip);
        DatasetRow {
            trip_id: trip_id(index),
            trip,
            energy,
        }
    }

    /// Builds a dataset of `trips` independent rows.
    pub fn build<R: Rng + ?Sized>(&self, trips: usize, rng: &mut R) -> Dataset {
        let rows: Vec<_> = (1..=trips).map(|index| self.build_row(index, rng)).collect();
        debug!("Built {} rows", rows.len());
        Dataset::new(rows)
    }
}

/// Generates the dataset described by the config, seeding the generator with `config.seed`.
pub fn generate_dataset(config: &SimulationConfig) -> Result<Dataset> {
    let builder = DatasetBuilder::from_config(config)?;
    let mut rng = Pcg64::seed_from_u64(config.seed);
    info!("Generating {} trips with seed {}", config.trips, config.seed);
    Ok(builder.build(config.trips, &mut rng))
}
