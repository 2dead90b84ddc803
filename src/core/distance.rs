use crate::domain::model::Coordinates;

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Great-circle distance in miles, unrounded.
pub fn haversine_miles(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h just past 1 for near-antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Rounds to the nearest whole mile, halves rounding up.
pub fn round_miles(miles: f64) -> u32 {
    // Never negative and never above half the circumference, so the cast is lossless.
    miles.round() as u32
}

/// Great-circle distance rounded to the nearest whole mile.
pub fn distance_miles(a: Coordinates, b: Coordinates) -> u32 {
    round_miles(haversine_miles(a, b))
}
