use tram_aux_energy::{Season, TripConditions};

pub const CAPACITY: u32 = 200;

pub fn trip(season: Season, hour: u32, duration_min: u32, outside_temp_c: f64, passengers: u32) -> TripConditions {
    TripConditions::new(season, hour, duration_min, outside_temp_c, passengers, CAPACITY).unwrap()
}
