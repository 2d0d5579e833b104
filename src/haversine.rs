//! Haversine distances between map coordinates.
//!
//! Graph edge costs are abstract walking effort; this gives the UI a
//! physical length for a drawn route.

use crate::graph::Coordinate;

/// Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in metres.
pub fn distance_m(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Summed length of consecutive segments in metres.
pub fn path_length_m(points: &[Coordinate]) -> f64 {
    points
        .windows(2)
        .map(|pair| distance_m(pair[0], pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point() {
        let p = Coordinate::new(29.7357, -95.5120);
        assert!(distance_m(p, p) < 0.001, "Same point should have ~0 distance");
    }

    #[test]
    fn test_haversine_known_distance() {
        // Las Vegas to Los Angeles, ~370 km
        let dist = distance_m(Coordinate::new(36.17, -115.14), Coordinate::new(34.05, -118.24));
        assert!(
            dist > 350_000.0 && dist < 400_000.0,
            "LV to LA should be ~370km, got {}",
            dist
        );
    }

    #[test]
    fn test_symmetric() {
        let a = Coordinate::new(29.736264, -95.511970);
        let b = Coordinate::new(29.734829, -95.512004);
        assert_eq!(distance_m(a, b), distance_m(b, a));
    }

    #[test]
    fn test_in_store_scale() {
        // Garden (A) to Bakery (I) in the demo store, roughly 160 m apart
        let a = Coordinate::new(29.736264, -95.511970);
        let i = Coordinate::new(29.734829, -95.512004);
        let dist = distance_m(a, i);
        assert!(dist > 140.0 && dist < 180.0, "got {}", dist);
    }

    #[test]
    fn test_path_length_sums_segments() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 0.001);
        let c = Coordinate::new(0.001, 0.001);
        let total = path_length_m(&[a, b, c]);
        let expected = distance_m(a, b) + distance_m(b, c);
        assert!((total - expected).abs() < 1e-9);
        assert_eq!(path_length_m(&[a]), 0.0);
    }
}
