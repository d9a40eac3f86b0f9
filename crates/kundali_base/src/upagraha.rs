//! Upagraha (shadow point) longitudes.
//!
//! Five points follow from the Sun by a fixed chain of offsets. Mandi and
//! Gulika depend on Saturn's portion of the day or night, using a fixed
//! 06:00 sunrise and 18:00 sunset.

use serde::Serialize;

use crate::util::normalize_360;

/// The seven upagrahas carried on a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Upagraha {
    Dhooma,
    Vyatipata,
    Parivesha,
    IndraChapa,
    Upaketu,
    Mandi,
    Gulika,
}

pub const ALL_UPAGRAHAS: [Upagraha; 7] = [
    Upagraha::Dhooma,
    Upagraha::Vyatipata,
    Upagraha::Parivesha,
    Upagraha::IndraChapa,
    Upagraha::Upaketu,
    Upagraha::Mandi,
    Upagraha::Gulika,
];

impl Upagraha {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dhooma => "Dhooma",
            Self::Vyatipata => "Vyatipata",
            Self::Parivesha => "Parivesha",
            Self::IndraChapa => "Indra Chapa",
            Self::Upaketu => "Upaketu",
            Self::Mandi => "Mandi",
            Self::Gulika => "Gulika",
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Dhooma offset from the Sun: 133 deg 20'.
const DHOOMA_OFFSET: f64 = 133.0 + 20.0 / 60.0;

/// Upaketu offset from Indra Chapa: 16 deg 40'.
const UPAKETU_OFFSET: f64 = 16.0 + 40.0 / 60.0;

/// Saturn's day portion (1-8) indexed by weekday, 0 = Sunday.
const SATURN_DAY_PORTION: [u8; 7] = [8, 7, 6, 5, 4, 3, 2];

/// Saturn's night portion (1-8) indexed by weekday, 0 = Sunday.
const SATURN_NIGHT_PORTION: [u8; 7] = [2, 1, 7, 6, 5, 4, 3];

/// Weekday of a Julian day, 0 = Sunday .. 6 = Saturday.
pub fn weekday_from_jd(jd: f64) -> u8 {
    ((jd + 1.5).floor() as i64).rem_euclid(7) as u8
}

/// Hours elapsed in the Julian day (counted from noon UT).
pub fn jd_fraction_hours(jd: f64) -> f64 {
    jd.rem_euclid(1.0) * 24.0
}

/// True between the fixed 06:00 sunrise (inclusive) and 18:00 sunset.
pub fn is_day_hour(hour: f64) -> bool {
    (6.0..18.0).contains(&hour)
}

/// The five Sun-derived points in order: Dhooma, Vyatipata, Parivesha,
/// Indra Chapa, Upaketu.
pub fn sun_based_upagrahas(sun_sid_lon: f64) -> [f64; 5] {
    let dhooma = normalize_360(sun_sid_lon + DHOOMA_OFFSET);
    let vyatipata = normalize_360(360.0 - dhooma);
    let parivesha = normalize_360(vyatipata + 180.0);
    let indra_chapa = normalize_360(360.0 - parivesha);
    let upaketu = normalize_360(indra_chapa + UPAKETU_OFFSET);
    [dhooma, vyatipata, parivesha, indra_chapa, upaketu]
}

/// Saturn's portion (1-8) for the weekday and half of day.
pub fn saturn_portion(weekday: u8, is_day: bool) -> u8 {
    let w = (weekday % 7) as usize;
    if is_day {
        SATURN_DAY_PORTION[w]
    } else {
        SATURN_NIGHT_PORTION[w]
    }
}

/// Mandi and Gulika longitudes: Mandi sits at the middle of Saturn's
/// 30 deg portion counted from the Sun, Gulika 7.5 deg behind it.
pub fn mandi_gulika(sun_sid_lon: f64, weekday: u8, hour: f64) -> (f64, f64) {
    let portion = saturn_portion(weekday, is_day_hour(hour));
    let mandi = normalize_360(sun_sid_lon + f64::from(portion - 1) * 30.0 + 15.0);
    let gulika = normalize_360(mandi - 7.5);
    (mandi, gulika)
}

/// All seven upagraha longitudes, ordered as [`ALL_UPAGRAHAS`].
///
/// Weekday and the day/night half both come from the UT Julian day.
pub fn all_upagrahas(sun_sid_lon: f64, jd_ut: f64) -> [f64; 7] {
    let [dhooma, vyatipata, parivesha, indra_chapa, upaketu] = sun_based_upagrahas(sun_sid_lon);
    let (mandi, gulika) = mandi_gulika(sun_sid_lon, weekday_from_jd(jd_ut), jd_fraction_hours(jd_ut));
    [dhooma, vyatipata, parivesha, indra_chapa, upaketu, mandi, gulika]
}
