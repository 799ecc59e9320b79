pub mod geo_distance;

pub use geo_distance::{EARTH_RADIUS_METERS, GeoDistance, Haversine, haversine_meters};
