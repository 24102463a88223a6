//! Great-circle distance and radius checks.

/// Mean Earth radius in metres used by [`distance`].
pub const EARTH_RADIUS_M: f64 = 6_372_795.0;

/// Haversine great-circle distance between two lat/lng points in metres.
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lng = (lng2 - lng1).to_radians();
    let lat1_r = lat1.to_radians();
    let lat2_r = lat2.to_radians();

    let a = ((lat2_r - lat1_r) / 2.0).sin().powi(2)
        + lat1_r.cos() * lat2_r.cos() * (d_lng / 2.0).sin().powi(2);
    let sigma = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_M * sigma
}

/// True when the shop lies strictly inside `radius_m` of the query point.
pub fn is_within_radius(
    shop_lat: f64,
    shop_lng: f64,
    query_lat: f64,
    query_lng: f64,
    radius_m: f64,
) -> bool {
    distance(shop_lat, shop_lng, query_lat, query_lng) < radius_m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_known_value() {
        let d = distance(77.1539, 120.398, 77.1804, 129.55);
        assert_eq!(d.trunc() as i64, 225883);
    }

    #[test]
    fn test_distance_symmetric() {
        let ab = distance(59.33258, 18.0649, 59.3, 18.1);
        let ba = distance(59.3, 18.1, 59.33258, 18.0649);
        assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn test_distance_same_point_is_zero() {
        assert_eq!(distance(10.0, 20.0, 10.0, 20.0), 0.0);
    }

    #[test]
    fn test_radius_is_strict() {
        let d = distance(0.0, 0.0, 0.0, 1.0);
        assert!(!is_within_radius(0.0, 0.0, 0.0, 1.0, d));
        assert!(is_within_radius(0.0, 0.0, 0.0, 1.0, d + 1.0));
        assert!(!is_within_radius(0.0, 0.0, 0.0, 1.0, d - 1.0));
    }
}
