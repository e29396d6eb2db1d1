use crate::models::location::Coordinate;

const EARTH_RADIUS_KM: f64 = 6_371.0;

pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();

    let haversine = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng;
    // Rounding can push `haversine` a hair above 1 for antipodal points.
    let central_angle = 2.0 * haversine.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_KM * central_angle
}

/// Great-circle distance rounded to hundredths of a kilometre.
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    round_2dp(haversine_km(a, b))
}

/// Straight-line blend of the two points, axis by axis. Good enough for
/// short urban hops; not a great-circle path.
pub fn interpolate(from: &Coordinate, to: &Coordinate, fraction: f64) -> Coordinate {
    let t = fraction.clamp(0.0, 1.0);
    Coordinate {
        latitude: from.latitude + t * (to.latitude - from.latitude),
        longitude: from.longitude + t * (to.longitude - from.longitude),
    }
}

/// Half-away-from-zero rounding to two decimals.
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
