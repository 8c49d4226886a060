mod config;
mod error;
mod prompt;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use log::info;

use tram_aux_energy::{generate_dataset, load_records, DatasetRecord, Season, SimulationConfig};
use tram_aux_learn::{Predictor, Trainer};

use crate::config::ExperimentConfig;
use crate::error::Result;
use crate::prompt::Prompt;

const DEFAULT_DATA: &str = "synthetic_trips.csv";
const DEFAULT_MODEL: &str = "models/savings_model.json";

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
/// Synthetic tram auxiliary energy dataset and savings model
struct Args {
    /// Path to YAML file with simulation and training configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generates the synthetic trips dataset
    Generate {
        /// Path to produced CSV file
        #[arg(short, long, default_value = DEFAULT_DATA)]
        output: PathBuf,

        /// Number of trips (overrides config)
        #[arg(short, long)]
        trips: Option<usize>,

        /// Random seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Trains the savings model, generating the dataset if it does not exist
    Train {
        /// Path to dataset CSV file
        #[arg(short, long, default_value = DEFAULT_DATA)]
        data: PathBuf,

        /// Path to produced model file
        #[arg(short, long, default_value = DEFAULT_MODEL)]
        model: PathBuf,
    },
    /// Predicts the savings of a trip, asking for the conditions which are not given
    Predict {
        /// Path to model file
        #[arg(short, long, default_value = DEFAULT_MODEL)]
        model: PathBuf,

        /// Season (winter, spring, summer, autumn)
        #[arg(long)]
        season: Option<Season>,

        /// Hour of day (0-23)
        #[arg(long)]
        hour: Option<u32>,

        /// Trip duration in minutes
        #[arg(long)]
        duration: Option<u32>,

        /// Outside temperature in °C
        #[arg(long, allow_negative_numbers = true)]
        temp: Option<f64>,

        /// Number of passengers
        #[arg(long)]
        passengers: Option<u32>,
    },
}

fn main() -> ExitCode {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = ExperimentConfig::load(args.config.as_deref())?;
    match args.command {
        Command::Generate { output, trips, seed } => {
            let mut simulation = config.simulation;
            simulation.trips = trips.unwrap_or(simulation.trips);
            simulation.seed = seed.unwrap_or(simulation.seed);
            generate(&simulation, &output)?;
            Ok(())
        }
        Command::Train { data, model } => train(&config, &data, &model),
        Command::Predict {
            model,
            season,
            hour,
            duration,
            temp,
            passengers,
        } => {
            let predictor = Predictor::load(&model)?;
            let stdin = std::io::stdin();
            let mut prompt = Prompt::new(stdin.lock(), std::io::stderr());
            let season = prompt.value_or_ask(season, "Season (winter/spring/summer/autumn)")?;
            let hour = prompt.value_or_ask(hour, "Hour of day (0-23)")?;
            let duration = prompt.value_or_ask(duration, "Trip duration (min)")?;
            let temp = prompt.value_or_ask(temp, "Outside temperature (°C)")?;
            let passengers = prompt.value_or_ask(
                passengers,
                &format!("Passenger count (0-{})", predictor.capacity()),
            )?;
            predict(&predictor, season, hour, duration, temp, passengers)
        }
    }
}

fn generate(config: &SimulationConfig, output: &Path) -> Result<Vec<DatasetRecord>> {
    let dataset = generate_dataset(config)?;
    dataset.save(output)?;

    let records = dataset.records();
    for record in records.iter().take(5) {
        info!(
            "{} {} daylight={} {} min {:.2} °C {} passengers -> fixed {:.3} kWh, sensor {:.3} kWh",
            record.trip_id,
            record.season,
            record.daylight,
            record.duration_min,
            record.outside_temp_c,
            record.passenger_count,
            record.total_aux_kwh_fixed,
            record.total_aux_kwh_sensor,
        );
    }

    let summary = dataset.summary();
    println!("Trips: {} ({} with defined savings)", summary.rows, summary.rows_with_savings);
    println!("Average fixed energy:  {:.3} kWh", summary.mean_total_fixed);
    println!("Average sensor energy: {:.3} kWh", summary.mean_total_sensor);
    println!("Average savings: {:.2} %", summary.mean_pct_savings);
    for (season, pct) in &summary.mean_pct_savings_by_season {
        println!("  {:<7} {:.2} %", season.name(), pct);
    }
    Ok(records)
}

fn train(config: &ExperimentConfig, data: &Path, model_path: &Path) -> Result<()> {
    let records = if data.exists() {
        info!("Loading dataset from {}", data.display());
        load_records(data)?
    } else {
        info!("Dataset {} not found, generating it", data.display());
        generate(&config.simulation, data)?
    };

    let trainer = Trainer::new(config.training.clone());
    let (model, report) = trainer.train(&records, &config.simulation.energy)?;
    model.save(model_path)?;

    println!(
        "Rows: {} train, {} test, {} skipped",
        report.train_rows, report.test_rows, report.skipped_rows
    );
    println!("MAE:  {:.3}", report.metrics.mae);
    println!("RMSE: {:.3}", report.metrics.rmse);
    println!("R2:   {:.3}", report.metrics.r2);
    println!("Feature importances:");
    for (name, importance) in &report.feature_importances {
        println!("  {:<16} {:.4}", name, importance);
    }
    Ok(())
}

fn predict(predictor: &Predictor, season: Season, hour: u32, duration: u32, temp: f64, passengers: u32) -> Result<()> {
    let trip = predictor.trip(season, hour, duration, temp, passengers)?;
    let comparison = predictor.compare(trip)?;
    println!("Learned prediction: {:.2} %", comparison.learned_pct);
    if comparison.exact_pct.is_finite() {
        println!("Exact formula:      {:.2} %", comparison.exact_pct);
    } else {
        println!("Exact formula:      undefined (fixed policy draws no power)");
    }
    println!("Note: the model is trained on synthetic data, so both values should be close.");
    Ok(())
}
