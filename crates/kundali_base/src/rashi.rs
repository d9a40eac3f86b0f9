//! Rashi (zodiac sign) lookup and degrees-minutes-seconds conversion.
//!
//! Twelve equal signs of 30 degrees, Mesha (Aries) starting at 0 deg
//! sidereal.

use serde::Serialize;

use crate::util::{normalize_360, sign_index};

/// The 12 rashis (zodiac signs) starting from Mesha (Aries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 rashis in order (0 = Mesha, 11 = Meena).
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

/// Classical element of a sign. Repeats Fire, Earth, Air, Water from Mesha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RashiElement {
    Fire,
    Earth,
    Air,
    Water,
}

impl Rashi {
    /// Sanskrit name of the rashi.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    /// Western (English) name of the rashi.
    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 0-based index (Mesha=0 .. Meena=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Rashi for a 0-based index. None above 11.
    pub const fn from_index(idx: u8) -> Option<Self> {
        if idx < 12 {
            Some(ALL_RASHIS[idx as usize])
        } else {
            None
        }
    }

    /// Odd (masculine) signs: Mesha, Mithuna, Simha, ... (even 0-based index).
    pub const fn is_odd(self) -> bool {
        self.index() % 2 == 0
    }

    pub const fn element(self) -> RashiElement {
        match self.index() % 4 {
            0 => RashiElement::Fire,
            1 => RashiElement::Earth,
            2 => RashiElement::Air,
            _ => RashiElement::Water,
        }
    }
}

/// Degrees-minutes-seconds representation of an angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dms {
    /// Whole degrees (0..29 within a rashi, or 0..359 standalone).
    pub degrees: u16,
    /// Arc-minutes (0..59).
    pub minutes: u8,
    /// Arc-seconds [0.0, 60.0).
    pub seconds: f64,
}

/// Full rashi position result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RashiInfo {
    pub rashi: Rashi,
    /// 0-based rashi index (0 = Mesha).
    pub rashi_index: u8,
    /// Position within the rashi as DMS.
    pub dms: Dms,
    /// Decimal degrees within the rashi [0.0, 30.0).
    pub degrees_in_rashi: f64,
}

/// Convert decimal degrees to degrees-minutes-seconds.
///
/// Negative input is converted by absolute value.
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let total_degrees = d.floor() as u16;
    let remainder = (d - f64::from(total_degrees)) * 60.0;
    let minutes = (remainder.floor() as u8).min(59);
    let seconds = (remainder - f64::from(minutes)) * 60.0;
    Dms {
        degrees: total_degrees,
        minutes,
        seconds,
    }
}

/// Determine rashi and in-sign DMS from a sidereal longitude.
pub fn rashi_from_longitude(sidereal_lon_deg: f64) -> RashiInfo {
    let lon = normalize_360(sidereal_lon_deg);
    let rashi_index = sign_index(lon);
    let degrees_in_rashi = lon - f64::from(rashi_index) * 30.0;
    RashiInfo {
        rashi: ALL_RASHIS[rashi_index as usize],
        rashi_index,
        dms: deg_to_dms(degrees_in_rashi),
        degrees_in_rashi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn index_matches_order() {
        for (i, r) in ALL_RASHIS.iter().enumerate() {
            assert_eq!(r.index() as usize, i);
            assert_eq!(Rashi::from_index(i as u8), Some(*r));
        }
        assert_eq!(Rashi::from_index(12), None);
    }

    #[test]
    fn odd_signs() {
        assert!(Rashi::Mesha.is_odd());
        assert!(!Rashi::Vrishabha.is_odd());
        assert!(Rashi::Kumbha.is_odd());
    }

    #[test]
    fn elements_cycle() {
        assert_eq!(Rashi::Simha.element(), RashiElement::Fire);
        assert_eq!(Rashi::Makara.element(), RashiElement::Earth);
        assert_eq!(Rashi::Tula.element(), RashiElement::Air);
        assert_eq!(Rashi::Meena.element(), RashiElement::Water);
    }

    #[test]
    fn dms_of_quarter_degree() {
        let dms = deg_to_dms(12.25);
        assert_eq!(dms.degrees, 12);
        assert_eq!(dms.minutes, 15);
        assert!(dms.seconds.abs() < EPS);
    }

    #[test]
    fn rashi_of_leo_position() {
        let info = rashi_from_longitude(135.5);
        assert_eq!(info.rashi, Rashi::Simha);
        assert_eq!(info.rashi_index, 4);
        assert!((info.degrees_in_rashi - 15.5).abs() < EPS);
        assert_eq!(info.dms.degrees, 15);
        assert_eq!(info.dms.minutes, 30);
    }

    #[test]
    fn rashi_wraps_negative() {
        let info = rashi_from_longitude(-5.0);
        assert_eq!(info.rashi, Rashi::Meena);
        assert!((info.degrees_in_rashi - 25.0).abs() < EPS);
    }
}
