mod common;
use common::{records, temp_path, training_config};

use approx::assert_abs_diff_eq;

use tram_aux_energy::{EnergyModel, EnergyModelConfig, Season};
use tram_aux_learn::{Error, Predictor, Trainer};

fn predictor() -> Predictor {
    let records = records(1000, 7);
    let (model, _) = Trainer::new(training_config(30))
        .train(&records, &EnergyModelConfig::default())
        .unwrap();
    Predictor::new(model)
}

#[test]
fn test_winter_morning_prediction() {
    let predictor = predictor();
    let trip = predictor.trip(Season::Winter, 8, 30, 2.0, 50).unwrap();
    assert!(trip.daylight());
    assert_abs_diff_eq!(trip.occupancy_pct(), 25., epsilon = 1e-12);

    let comparison = predictor.compare(trip).unwrap();
    assert_abs_diff_eq!(comparison.exact_pct, 30.815, epsilon = 5e-4);
    assert!(comparison.learned_pct.is_finite());
    assert!(comparison.abs_error() < 12., "{:?}", comparison);
}

#[test]
fn test_exact_path_matches_energy_model() {
    let predictor = predictor();
    let model = EnergyModel::default();
    for season in Season::ALL {
        for hour in [0, 7, 12, 19] {
            let trip = predictor.trip(season, hour, 40, -5., 120).unwrap();
            assert_eq!(predictor.exact_pct_savings(&trip), model.pct_savings(&trip));
        }
    }
}

#[test]
fn test_invalid_trip() {
    let predictor = predictor();
    assert!(matches!(
        predictor.trip(Season::Summer, 12, 30, 20., 201),
        Err(Error::Energy(tram_aux_energy::Error::InvalidTrip(_)))
    ));
    assert!(matches!(
        predictor.trip(Season::Summer, 24, 30, 20., 10),
        Err(Error::Energy(tram_aux_energy::Error::InvalidTrip(_)))
    ));
}

#[test]
fn test_missing_model() {
    let path = temp_path("missing/savings_model.json");
    assert!(matches!(Predictor::load(&path), Err(Error::MissingModel(_))));
}
