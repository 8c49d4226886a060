mod common;
use common::trip;

use approx::assert_abs_diff_eq;

use tram_aux_energy::energy::SAVINGS_EPSILON;
use tram_aux_energy::power::hvac::{ClimateConfig, HvacPowerModel};
use tram_aux_energy::power::lighting::{FixedLightingPowerModel, SensorLightingPowerModel};
use tram_aux_energy::power::power_model::{AuxPowerModel, CabinState};
use tram_aux_energy::power::ventilation::SensorVentilationPowerModel;
use tram_aux_energy::{savings_pct, ControlPolicy, EnergyModel, EnergyModelConfig, Season};

#[test]
fn test_winter_morning_trip() {
    let model = EnergyModel::default();
    let trip = trip(Season::Winter, 8, 30, 2.0, 50);
    assert!(trip.daylight());

    let energy = model.evaluate(&trip);
    assert_abs_diff_eq!(energy.fixed.lighting, 1.75, epsilon = 1e-9);
    assert_abs_diff_eq!(energy.fixed.ventilation, 1.5, epsilon = 1e-9);
    assert_abs_diff_eq!(energy.fixed.hvac, 1.7435, epsilon = 1e-9);
    assert_abs_diff_eq!(energy.fixed.total, 4.9935, epsilon = 1e-9);

    // lighting 1.2 + 0.02 * 50 - 0.8 = 1.4 kW, HVAC (0.11 * 19 + 0.4 + 0.018 * 50) * 1.05 = 3.5595 kW
    assert_abs_diff_eq!(energy.sensor.lighting, 0.7, epsilon = 1e-9);
    assert_abs_diff_eq!(energy.sensor.ventilation, 0.975, epsilon = 1e-9);
    assert_abs_diff_eq!(energy.sensor.hvac, 1.77975, epsilon = 1e-9);
    assert_abs_diff_eq!(energy.sensor.total, 3.45475, epsilon = 1e-9);

    assert_abs_diff_eq!(energy.pct_savings, 100. * (1. - 3.45475 / 4.9935), epsilon = 1e-9);
    assert_abs_diff_eq!(energy.pct_savings, 30.815, epsilon = 5e-4);
}

#[test]
fn test_vehicle_power_matches_energy() {
    let model = EnergyModel::default();
    let trip = trip(Season::Winter, 8, 30, 2.0, 50);
    let state = CabinState::from(&trip);

    let fixed = model.policy_model(ControlPolicy::Fixed);
    assert_abs_diff_eq!(fixed.get_power(&state), 3.5 + 3.0 + 3.487, epsilon = 1e-9);
    let sensor = model.policy_model(ControlPolicy::Sensor);
    assert_abs_diff_eq!(sensor.get_power(&state), 1.4 + 1.95 + 3.5595, epsilon = 1e-9);

    for policy in [ControlPolicy::Fixed, ControlPolicy::Sensor] {
        let power = model.policy_model(policy).get_power(&state);
        let energy = model.get_energy(policy, &trip);
        assert_abs_diff_eq!(power * trip.duration_hours(), energy.total, epsilon = 1e-12);
    }
}

#[test]
fn test_night_trip_without_extreme_temperature() {
    let model = EnergyModel::default();
    let trip = trip(Season::Summer, 23, 60, 21.0, 0);
    assert!(!trip.daylight());

    let fixed = model.get_energy(ControlPolicy::Fixed, &trip);
    assert_abs_diff_eq!(fixed.lighting, 6.0, epsilon = 1e-12);
    assert_abs_diff_eq!(fixed.ventilation, 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(fixed.hvac, 0.7, epsilon = 1e-12);

    let sensor = model.get_energy(ControlPolicy::Sensor, &trip);
    assert_abs_diff_eq!(sensor.lighting, 1.2, epsilon = 1e-12);
    assert_abs_diff_eq!(sensor.ventilation, 1.2, epsilon = 1e-12);
    assert_abs_diff_eq!(sensor.hvac, 0.4, epsilon = 1e-12);
}

#[test]
fn test_hot_day_penalty() {
    let model = EnergyModel::default();
    let trip = trip(Season::Summer, 12, 60, 30.0, 100);
    let energy = model.evaluate(&trip);
    // ΔT = 9
    assert_abs_diff_eq!(energy.fixed.hvac, (0.13 * 9. + 0.7) * 1.10, epsilon = 1e-12);
    assert_abs_diff_eq!(energy.sensor.hvac, (0.11 * 9. + 0.4 + 0.018 * 100.) * 1.05, epsilon = 1e-12);

    // the thresholds themselves are not extreme
    let trip = trip_at(28.0);
    let energy = model.evaluate(&trip);
    assert_abs_diff_eq!(energy.fixed.hvac, 0.13 * 7. + 0.7, epsilon = 1e-12);
    let trip = trip_at(3.0);
    let energy = model.evaluate(&trip);
    assert_abs_diff_eq!(energy.fixed.hvac, 0.13 * 18. + 0.7, epsilon = 1e-12);
}

fn trip_at(outside_temp_c: f64) -> tram_aux_energy::TripConditions {
    trip(Season::Spring, 12, 60, outside_temp_c, 0)
}

#[test]
fn test_sensor_floors() {
    let model = EnergyModel::default();
    for season in Season::ALL {
        for hour in 0..24 {
            for passengers in [0, 1, 10, 39, 40, 41, 200] {
                for duration in [1, 10, 37, 60] {
                    let trip = trip(season, hour, duration, 12., passengers);
                    let sensor = model.get_energy(ControlPolicy::Sensor, &trip);
                    let floor = 1.2 * trip.duration_hours();
                    assert!(sensor.lighting >= floor - 1e-12);
                    assert!(sensor.ventilation >= floor - 1e-12);
                }
            }
        }
    }
}

#[test]
fn test_energy_is_non_negative() {
    let model = EnergyModel::default();
    for season in Season::ALL {
        for hour in [0, 8, 12, 20] {
            for temp in [-40., -5., 2.99, 3., 15., 21., 28., 28.01, 45.] {
                for passengers in [0, 50, 200] {
                    let trip = trip(season, hour, 25, temp, passengers);
                    let energy = model.evaluate(&trip);
                    for breakdown in [energy.fixed, energy.sensor] {
                        assert!(breakdown.lighting >= 0.);
                        assert!(breakdown.ventilation >= 0.);
                        assert!(breakdown.hvac >= 0.);
                        assert_abs_diff_eq!(
                            breakdown.total,
                            breakdown.lighting + breakdown.ventilation + breakdown.hvac,
                            epsilon = 1e-12
                        );
                    }
                    assert!(energy.pct_savings.is_finite());
                }
            }
        }
    }
}

#[test]
fn test_model_is_pure() {
    let model = EnergyModel::default();
    let trip = trip(Season::Autumn, 17, 42, -3.5, 163);
    let first = model.evaluate(&trip);
    for _ in 0..10 {
        assert_eq!(model.evaluate(&trip), first);
        assert_eq!(EnergyModel::default().evaluate(&trip), first);
    }
}

#[test]
fn test_undefined_savings() {
    assert!(savings_pct(0., 1.).is_nan());
    assert!(savings_pct(SAVINGS_EPSILON, 0.).is_nan());
    assert!(savings_pct(2. * SAVINGS_EPSILON, 0.).is_finite());
    assert_abs_diff_eq!(savings_pct(4., 3.), 25., epsilon = 1e-12);

    // a fixed policy drawing no power at all leaves the savings undefined
    let mut config = EnergyModelConfig::default();
    config.fixed.lighting_day_power = 0.;
    config.fixed.lighting_night_power = 0.;
    config.fixed.ventilation_power = 0.;
    config.fixed.hvac_per_degree = 0.;
    config.fixed.hvac_base_power = 0.;
    let model = EnergyModel::new(&config);
    let energy = model.evaluate(&trip(Season::Winter, 8, 30, 2., 50));
    assert_eq!(energy.fixed.total, 0.);
    assert!(energy.pct_savings.is_nan());
}

#[test]
fn test_power_models() {
    let day = CabinState::new(true, 50, 21.);
    let night = CabinState::new(false, 50, 21.);

    let fixed = FixedLightingPowerModel::new(3.5, 6.0);
    assert_eq!(fixed.get_power(&day), 3.5);
    assert_eq!(fixed.get_power(&night), 6.0);

    let sensor = SensorLightingPowerModel::new(1.2, 0.02, 0.8);
    assert_abs_diff_eq!(sensor.get_power(&day), 1.4, epsilon = 1e-12);
    assert_abs_diff_eq!(sensor.get_power(&night), 2.2, epsilon = 1e-12);
    assert_abs_diff_eq!(sensor.get_power(&CabinState::new(true, 0, 21.)), 1.2, epsilon = 1e-12);

    let vent = SensorVentilationPowerModel::new(1.2, 0.015);
    assert_abs_diff_eq!(vent.get_power(&day), 1.95, epsilon = 1e-12);

    let hvac = HvacPowerModel::new(ClimateConfig::default(), 0.11, 0.4, 0.018, 1.05);
    assert_abs_diff_eq!(hvac.get_power(&CabinState::new(true, 0, 21.)), 0.4, epsilon = 1e-12);
    assert_abs_diff_eq!(hvac.get_power(&CabinState::new(true, 0, 11.)), 1.5, epsilon = 1e-12);
}

#[test]
fn test_config_validation() {
    assert!(EnergyModelConfig::default().validate().is_ok());

    let mut config = EnergyModelConfig::default();
    config.sensor.hvac_per_passenger = f64::NAN;
    assert!(config.validate().is_err());

    let mut config = EnergyModelConfig::default();
    config.fixed.ventilation_power = -1.;
    assert!(config.validate().is_err());

    let mut config = EnergyModelConfig::default();
    config.climate.extreme_low = 30.;
    assert!(config.validate().is_err());
}
