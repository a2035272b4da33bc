//! Reference great-circle distance.

/// Sphere radius the workbench uses, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6372.8;

/// Great-circle distance between `(x0, y0)` and `(x1, y1)` on a sphere of
/// the given radius. `x` is longitude and `y` latitude, both in degrees;
/// the result is in the radius' unit.
#[must_use]
pub fn reference_haversine(x0: f64, y0: f64, x1: f64, y1: f64, radius: f64) -> f64 {
    let d_lat = (y1 - y0).to_radians();
    let d_lon = (x1 - x0).to_radians();
    let lat0 = y0.to_radians();
    let lat1 = y1.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat0.cos() * lat1.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    radius * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincident_points_are_zero() {
        assert_eq!(reference_haversine(0.0, 0.0, 0.0, 0.0, EARTH_RADIUS_KM), 0.0);
        assert_eq!(
            reference_haversine(12.5, -33.0, 12.5, -33.0, EARTH_RADIUS_KM),
            0.0
        );
    }

    #[test]
    fn london_to_new_york() {
        let d = reference_haversine(0.1246, 51.5007, -74.0445, 40.6892, EARTH_RADIUS_KM);
        assert!((d - 5574.84).abs() < 1e-4 * 5574.84, "distance was {d}");
    }

    #[test]
    fn symmetric_in_endpoints() {
        let ab = reference_haversine(10.0, 20.0, 30.0, 40.0, EARTH_RADIUS_KM);
        let ba = reference_haversine(30.0, 40.0, 10.0, 20.0, EARTH_RADIUS_KM);
        assert!((ab - ba).abs() < 1e-9);
    }
}
