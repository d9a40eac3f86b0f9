//! Partial aspect (drishti) strength by angular separation.
//!
//! One curve serves both Drik Bala (graha onto graha) and Bhava Drishti
//! Bala (graha onto house midpoint).

use crate::graha::Graha;
use crate::graha_relationships::is_benefic;
use crate::util::angular_distance;

/// Aspect value in virupa for a separation in degrees.
///
/// Plateaus: 175-185 deg → 60, 115-125 → 30, 85-95 → 45, 55-65 → 15.
/// Linear ramps join 65→85, 95→115 and 125→175. Zero below 55 deg.
/// Separations above 180 are folded first.
pub fn partial_aspect_value(separation: f64) -> f64 {
    let mut a = separation.abs() % 360.0;
    if a > 180.0 {
        a = 360.0 - a;
    }

    if (175.0..=185.0).contains(&a) {
        60.0
    } else if (115.0..=125.0).contains(&a) {
        30.0
    } else if (85.0..=95.0).contains(&a) {
        45.0
    } else if (55.0..=65.0).contains(&a) {
        15.0
    } else if a > 65.0 && a < 85.0 {
        15.0 + (a - 65.0) * 30.0 / 20.0
    } else if a > 95.0 && a < 115.0 {
        45.0 - (a - 95.0) * 15.0 / 20.0
    } else if a > 125.0 && a < 175.0 {
        30.0 + (a - 125.0) * 30.0 / 50.0
    } else {
        0.0
    }
}

/// Signed contribution of `aspecting` onto `target_lon`: a quarter of the
/// aspect value, added for benefics and subtracted for malefics.
pub fn signed_aspect(aspecting: Graha, aspecting_lon: f64, target_lon: f64) -> f64 {
    let value = partial_aspect_value(angular_distance(aspecting_lon, target_lon));
    if is_benefic(aspecting) {
        value / 4.0
    } else {
        -value / 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn plateaus() {
        assert!((partial_aspect_value(180.0) - 60.0).abs() < EPS);
        assert!((partial_aspect_value(120.0) - 30.0).abs() < EPS);
        assert!((partial_aspect_value(90.0) - 45.0).abs() < EPS);
        assert!((partial_aspect_value(60.0) - 15.0).abs() < EPS);
    }

    #[test]
    fn ramps_are_linear() {
        assert!((partial_aspect_value(75.0) - 30.0).abs() < EPS);
        assert!((partial_aspect_value(105.0) - 37.5).abs() < EPS);
        assert!((partial_aspect_value(150.0) - 45.0).abs() < EPS);
    }

    #[test]
    fn ramps_meet_plateaus() {
        assert!((partial_aspect_value(65.0001) - 15.0).abs() < 1e-3);
        assert!((partial_aspect_value(94.9999) - 45.0).abs() < 1e-3);
        assert!((partial_aspect_value(174.9999) - 60.0).abs() < 1e-3);
    }

    #[test]
    fn no_aspect_below_55() {
        assert_eq!(partial_aspect_value(0.0), 0.0);
        assert_eq!(partial_aspect_value(30.0), 0.0);
        assert_eq!(partial_aspect_value(54.9), 0.0);
    }

    #[test]
    fn folds_reflex_angles() {
        assert!((partial_aspect_value(240.0) - 30.0).abs() < EPS);
        assert!((partial_aspect_value(-90.0) - 45.0).abs() < EPS);
    }

    #[test]
    fn sign_follows_nature() {
        assert!((signed_aspect(Graha::Guru, 0.0, 180.0) - 15.0).abs() < EPS);
        assert!((signed_aspect(Graha::Shani, 0.0, 180.0) + 15.0).abs() < EPS);
        assert_eq!(signed_aspect(Graha::Mangal, 0.0, 10.0), 0.0);
    }
}
