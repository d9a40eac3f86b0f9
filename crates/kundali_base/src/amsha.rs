//! Amsha (divisional chart) sign placement for the seven saptavarga charts.
//!
//! Each rule takes a sidereal longitude and returns the 0-based rashi index
//! the point occupies in that divisional chart. The chart builder and the
//! Saptavargaja Bala term both call these functions, so there is a single
//! definition of every varga.

use serde::Serialize;

use crate::rashi::{ALL_RASHIS, Rashi, RashiElement};
use crate::util::{degrees_in_sign, sign_index};

/// The seven divisional charts used by Saptavargaja Bala.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Amsha {
    /// Rasi chart.
    D1,
    /// Hora.
    D2,
    /// Drekkana.
    D3,
    /// Saptamsa.
    D7,
    /// Navamsa.
    D9,
    /// Dwadasamsa.
    D12,
    /// Trimsamsa.
    D30,
}

/// Saptavarga in scoring order.
pub const SAPTAVARGA: [Amsha; 7] = [
    Amsha::D1,
    Amsha::D2,
    Amsha::D3,
    Amsha::D7,
    Amsha::D9,
    Amsha::D12,
    Amsha::D30,
];

impl Amsha {
    pub const fn name(self) -> &'static str {
        match self {
            Self::D1 => "Rasi",
            Self::D2 => "Hora",
            Self::D3 => "Drekkana",
            Self::D7 => "Saptamsa",
            Self::D9 => "Navamsa",
            Self::D12 => "Dwadasamsa",
            Self::D30 => "Trimsamsa",
        }
    }

    /// Number of divisions of a sign.
    pub const fn divisions(self) -> u8 {
        match self {
            Self::D1 => 1,
            Self::D2 => 2,
            Self::D3 => 3,
            Self::D7 => 7,
            Self::D9 => 9,
            Self::D12 => 12,
            Self::D30 => 30,
        }
    }
}

/// Rashi index of `sidereal_lon` in the given divisional chart.
pub fn amsha_rashi(sidereal_lon: f64, amsha: Amsha) -> u8 {
    match amsha {
        Amsha::D1 => sign_index(sidereal_lon),
        Amsha::D2 => hora_rashi(sidereal_lon),
        Amsha::D3 => drekkana_rashi(sidereal_lon),
        Amsha::D7 => saptamsa_rashi(sidereal_lon),
        Amsha::D9 => navamsa_rashi(sidereal_lon),
        Amsha::D12 => dwadasamsa_rashi(sidereal_lon),
        Amsha::D30 => trimsamsa_rashi(sidereal_lon),
    }
}

fn part_of_sign(sidereal_lon: f64, parts: u8) -> u8 {
    let span = 30.0 / f64::from(parts);
    ((degrees_in_sign(sidereal_lon) / span).floor() as u8).min(parts - 1)
}

fn sign_of(sidereal_lon: f64) -> Rashi {
    ALL_RASHIS[usize::from(sign_index(sidereal_lon) % 12)]
}

/// Navamsa (D9): 9 parts of 3 deg 20'. Counting starts from Mesha for fire
/// signs, Makara for earth, Tula for air and Karka for water.
pub fn navamsa_rashi(sidereal_lon: f64) -> u8 {
    let start = match sign_of(sidereal_lon).element() {
        RashiElement::Fire => 0,
        RashiElement::Earth => 9,
        RashiElement::Air => 6,
        RashiElement::Water => 3,
    };
    (start + part_of_sign(sidereal_lon, 9)) % 12
}

/// Hora (D2): odd signs give Simha then Karka, even signs Karka then Simha.
pub fn hora_rashi(sidereal_lon: f64) -> u8 {
    let first_half = degrees_in_sign(sidereal_lon) < 15.0;
    let odd = sign_of(sidereal_lon).is_odd();
    match (odd, first_half) {
        (true, true) | (false, false) => Rashi::Simha.index(),
        _ => Rashi::Karka.index(),
    }
}

/// Drekkana (D3): the sign itself, the 5th and the 9th from it.
pub fn drekkana_rashi(sidereal_lon: f64) -> u8 {
    let offset = [0, 4, 8][part_of_sign(sidereal_lon, 3) as usize];
    (sign_index(sidereal_lon) + offset) % 12
}

/// Saptamsa (D7): odd signs count from themselves, even signs from the 7th.
pub fn saptamsa_rashi(sidereal_lon: f64) -> u8 {
    let sign = sign_index(sidereal_lon);
    let start = if sign_of(sidereal_lon).is_odd() { sign } else { sign + 6 };
    (start + part_of_sign(sidereal_lon, 7)) % 12
}

/// Dwadasamsa (D12): 12 parts of 2.5 deg counted from the sign itself.
pub fn dwadasamsa_rashi(sidereal_lon: f64) -> u8 {
    (sign_index(sidereal_lon) + part_of_sign(sidereal_lon, 12)) % 12
}

/// Trimsamsa (D30): unequal 5/5/8/7/5 degree bands owned by Mars, Saturn,
/// Jupiter, Mercury and Venus in odd signs; the mirrored 5/7/8/5/5 bands in
/// even signs.
pub fn trimsamsa_rashi(sidereal_lon: f64) -> u8 {
    let deg = degrees_in_sign(sidereal_lon);
    let rashi = if sign_of(sidereal_lon).is_odd() {
        if deg < 5.0 {
            Rashi::Mesha
        } else if deg < 10.0 {
            Rashi::Kumbha
        } else if deg < 18.0 {
            Rashi::Dhanu
        } else if deg < 25.0 {
            Rashi::Mithuna
        } else {
            Rashi::Tula
        }
    } else if deg < 5.0 {
        Rashi::Vrishabha
    } else if deg < 12.0 {
        Rashi::Kanya
    } else if deg < 20.0 {
        Rashi::Meena
    } else if deg < 25.0 {
        Rashi::Makara
    } else {
        Rashi::Vrischika
    };
    rashi.index()
}

/// Six divisional placements carried by every chart body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VargaPlacement {
    pub hora: u8,
    pub drekkana: u8,
    pub saptamsa: u8,
    pub navamsa: u8,
    pub dwadasamsa: u8,
    pub trimsamsa: u8,
}

impl VargaPlacement {
    pub fn from_longitude(sidereal_lon: f64) -> Self {
        Self {
            hora: hora_rashi(sidereal_lon),
            drekkana: drekkana_rashi(sidereal_lon),
            saptamsa: saptamsa_rashi(sidereal_lon),
            navamsa: navamsa_rashi(sidereal_lon),
            dwadasamsa: dwadasamsa_rashi(sidereal_lon),
            trimsamsa: trimsamsa_rashi(sidereal_lon),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navamsa_starts_by_element() {
        assert_eq!(navamsa_rashi(0.0), 0); // Mesha -> Mesha
        assert_eq!(navamsa_rashi(30.0), 9); // Vrishabha -> Makara
        assert_eq!(navamsa_rashi(60.0), 6); // Mithuna -> Tula
        assert_eq!(navamsa_rashi(90.0), 3); // Karka -> Karka
    }

    #[test]
    fn navamsa_last_pada_of_mesha() {
        assert_eq!(navamsa_rashi(29.9), 8);
    }

    #[test]
    fn navamsa_exact_part_boundary() {
        // 10 deg is the start of the 4th part
        assert_eq!(navamsa_rashi(10.0), 3);
    }

    #[test]
    fn hora_odd_and_even() {
        assert_eq!(hora_rashi(5.0), 4);
        assert_eq!(hora_rashi(20.0), 3);
        assert_eq!(hora_rashi(35.0), 3);
        assert_eq!(hora_rashi(50.0), 4);
    }

    #[test]
    fn drekkana_offsets() {
        assert_eq!(drekkana_rashi(5.0), 0);
        assert_eq!(drekkana_rashi(15.0), 4);
        assert_eq!(drekkana_rashi(25.0), 8);
        assert_eq!(drekkana_rashi(355.0), 7);
    }

    #[test]
    fn saptamsa_even_sign_starts_at_seventh() {
        assert_eq!(saptamsa_rashi(0.0), 0);
        assert_eq!(saptamsa_rashi(30.0), 7);
        assert_eq!(saptamsa_rashi(59.9), 1);
    }

    #[test]
    fn dwadasamsa_counts_from_own_sign() {
        assert_eq!(dwadasamsa_rashi(0.0), 0);
        assert_eq!(dwadasamsa_rashi(2.5), 1);
        assert_eq!(dwadasamsa_rashi(359.0), 10);
    }

    #[test]
    fn trimsamsa_tables() {
        assert_eq!(trimsamsa_rashi(4.0), 0);
        assert_eq!(trimsamsa_rashi(7.0), 10);
        assert_eq!(trimsamsa_rashi(12.0), 8);
        assert_eq!(trimsamsa_rashi(20.0), 2);
        assert_eq!(trimsamsa_rashi(27.0), 6);
        assert_eq!(trimsamsa_rashi(34.0), 1);
        assert_eq!(trimsamsa_rashi(40.0), 5);
        assert_eq!(trimsamsa_rashi(45.0), 11);
        assert_eq!(trimsamsa_rashi(52.0), 9);
        assert_eq!(trimsamsa_rashi(57.0), 7);
    }

    #[test]
    fn amsha_dispatch_matches_direct_calls() {
        let lon = 217.4;
        assert_eq!(amsha_rashi(lon, Amsha::D1), 7);
        assert_eq!(amsha_rashi(lon, Amsha::D9), navamsa_rashi(lon));
        let p = VargaPlacement::from_longitude(lon);
        assert_eq!(p.trimsamsa, amsha_rashi(lon, Amsha::D30));
        assert_eq!(p.hora, amsha_rashi(lon, Amsha::D2));
    }
}
