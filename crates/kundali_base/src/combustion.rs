//! Combustion (asta): a graha too close to the Sun loses its strength.

use crate::graha::Graha;
use crate::util::angular_distance;

/// Maximum separation from the Sun (degrees) at which a graha is combust.
///
/// Mercury and Venus use a tighter orb while retrograde. The Sun and the
/// nodes have no orb.
pub const fn combustion_orb(graha: Graha, is_retrograde: bool) -> Option<f64> {
    match (graha, is_retrograde) {
        (Graha::Chandra, _) => Some(12.0),
        (Graha::Mangal, _) => Some(17.0),
        (Graha::Buddh, false) => Some(14.0),
        (Graha::Buddh, true) => Some(12.0),
        (Graha::Guru, _) => Some(11.0),
        (Graha::Shukra, false) => Some(10.0),
        (Graha::Shukra, true) => Some(8.0),
        (Graha::Shani, _) => Some(15.0),
        (Graha::Surya | Graha::Rahu | Graha::Ketu, _) => None,
    }
}

/// True when the separation from the Sun is at most the graha's orb.
/// The orb boundary itself counts as combust.
pub fn is_combust(graha: Graha, sidereal_lon: f64, sun_lon: f64, is_retrograde: bool) -> bool {
    match combustion_orb(graha, is_retrograde) {
        Some(orb) => angular_distance(sidereal_lon, sun_lon) <= orb,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_orb_for_sun_and_nodes() {
        for g in [Graha::Surya, Graha::Rahu, Graha::Ketu] {
            assert!(combustion_orb(g, false).is_none());
            assert!(!is_combust(g, 100.0, 100.0, false));
        }
    }

    #[test]
    fn boundary_is_combust() {
        assert!(is_combust(Graha::Mangal, 117.0, 100.0, false));
        assert!(!is_combust(Graha::Mangal, 117.5, 100.0, false));
    }

    #[test]
    fn retrograde_mercury_tighter() {
        assert!(is_combust(Graha::Buddh, 113.0, 100.0, false));
        assert!(!is_combust(Graha::Buddh, 113.0, 100.0, true));
    }

    #[test]
    fn retrograde_venus_tighter() {
        assert_eq!(combustion_orb(Graha::Shukra, true), Some(8.0));
        assert!(!is_combust(Graha::Shukra, 9.0, 0.0, true));
        assert!(is_combust(Graha::Shukra, 9.0, 0.0, false));
    }

    #[test]
    fn separation_wraps_through_zero() {
        assert!(is_combust(Graha::Shani, 355.0, 5.0, false));
    }
}
