//! Distance between two reported locations.

use crate::entities::Location;

/// Mean equatorial earth radius in meters (WGS-84 semi-major axis).
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Computes the distance in meters between two locations.
///
/// The matcher only relies on the result being symmetric and non-negative,
/// so any geodesic model can be plugged in.
pub trait GeoDistance: Send + Sync + 'static {
    fn meters(&self, a: Location, b: Location) -> f64;
}

/// Great-circle distance on a sphere, rounded to the nearest meter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl GeoDistance for Haversine {
    fn meters(&self, a: Location, b: Location) -> f64 {
        haversine_meters(a, b).round()
    }
}

/// Unrounded haversine distance in meters.
pub fn haversine_meters(a: Location, b: Location) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        let p = Location::new(-122.418208, 37.775206);
        assert_eq!(Haversine.meters(p, p), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = Location::new(-122.418208, 37.775206);
        let b = Location::new(-122.419430, 37.776322);
        assert_eq!(Haversine.meters(a, b), Haversine.meters(b, a));
    }

    #[test]
    fn test_known_distances() {
        // Two points one block apart in San Francisco.
        let a = Location::new(-122.418208, 37.775206);
        let b = Location::new(-122.419044, 37.775206);
        let d = Haversine.meters(a, b);
        assert!((70.0..80.0).contains(&d), "got {d}");

        let c = Location::new(-122.419430, 37.776322);
        let d = Haversine.meters(a, c);
        assert!((150.0..175.0).contains(&d), "got {d}");

        // One degree of latitude along a meridian.
        let d = haversine_meters(Location::new(0.0, 0.0), Location::new(0.0, 1.0));
        assert!((d - 111_319.5).abs() < 1.0, "got {d}");
    }
}
