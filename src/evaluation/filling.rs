use crate::config::EngineParams;

/// Minutes needed to fill a vehicle of the given capacity.
pub fn filling_minutes(capacity: f64, params: &EngineParams) -> f64 {
    capacity / params.filling_rate_kg_per_min
}

/// Minutes to drive `distance_km` at the configured average speed.
pub fn travel_minutes(distance_km: f64, params: &EngineParams) -> f64 {
    distance_km / params.average_speed_kmph * 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filling_is_linear_in_capacity() {
        let params = EngineParams::default();
        assert_eq!(filling_minutes(4000.0, &params), 800.0);
        assert_eq!(filling_minutes(5000.0, &params), 1000.0);
        assert!(filling_minutes(4500.0, &params) > filling_minutes(4000.0, &params));
    }

    #[test]
    fn thirty_kilometres_at_thirty_kmph_is_an_hour() {
        assert_eq!(travel_minutes(30.0, &EngineParams::default()), 60.0);
    }
}
