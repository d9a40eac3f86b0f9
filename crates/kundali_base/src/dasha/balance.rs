//! Birth balance: how much of the first lord's period is left at birth.

use serde::Serialize;

use crate::graha::Graha;
use crate::nakshatra::{NakshatraInfo, nakshatra_from_longitude};

use super::vimshottari::{nakshatra_lord, vimshottari_years};

/// The Moon's position within its nakshatra, expressed in years of the
/// ruling graha's period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashaBalance {
    pub nakshatra: NakshatraInfo,
    pub lord: Graha,
    pub elapsed_years: f64,
    pub remaining_years: f64,
}

/// Birth balance from the Moon's sidereal longitude.
pub fn vimshottari_balance(moon_sidereal_lon: f64) -> DashaBalance {
    let nakshatra = nakshatra_from_longitude(moon_sidereal_lon);
    let lord = nakshatra_lord(nakshatra.nakshatra_index);
    let full = vimshottari_years(lord);
    let elapsed_years = nakshatra.elapsed_fraction * full;
    DashaBalance {
        nakshatra,
        lord,
        elapsed_years,
        remaining_years: full - elapsed_years,
    }
}
