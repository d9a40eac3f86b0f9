//! Bhava Bala: five-fold strength of the twelve whole-sign houses.
//!
//! Consumes the built chart and its Shadbala. All terms are in virupa; a
//! fixed base of 60 virupa is added to every house.

use serde::Serialize;

use crate::chart::ChartState;
use crate::drishti::signed_aspect;
use crate::graha::{ALL_GRAHAS, Graha, sign_lord};
use crate::graha_relationships::is_benefic;
use crate::shadbala::ShadbalaResult;
use crate::util::angular_distance;

/// Added to every house total.
pub const BHAVA_BASE_VIRUPA: f64 = 60.0;

/// Rupa threshold for `is_strong`, independent of the rating bands.
pub const BHAVA_STRONG_RUPAS: f64 = 2.5;

/// Bhavadhipati value when the house lord has no Shadbala entry.
const DEFAULT_BHAVADHIPATI: f64 = 35.0;

/// Rating of a house total in rupas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BhavaRating {
    VeryStrong,
    Strong,
    Medium,
    Weak,
}

impl BhavaRating {
    pub fn from_rupas(rupas: f64) -> Self {
        if rupas >= 4.0 {
            Self::VeryStrong
        } else if rupas >= 3.0 {
            Self::Strong
        } else if rupas >= 2.0 {
            Self::Medium
        } else {
            Self::Weak
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::VeryStrong => "Very Strong",
            Self::Strong => "Strong",
            Self::Medium => "Medium",
            Self::Weak => "Weak",
        }
    }
}

/// Strength of one house.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BhavaBalaEntry {
    /// House number, 1-12.
    pub house: u8,
    /// Rashi index of the house (0-11).
    pub sign: u8,
    pub lord: Graha,
    /// House occupied by the lord.
    pub lord_house: u8,
    /// Grahas in the house, in graha order.
    pub occupants: Vec<Graha>,
    pub bhavadhipati: f64,
    pub digbala: f64,
    pub drishti: f64,
    pub residential: f64,
    pub planet_contribution: f64,
    pub base: f64,
    pub total_virupa: f64,
    pub total_rupas: f64,
    pub rating: BhavaRating,
    pub is_strong: bool,
}

/// Bhava Bala for all twelve houses, house 1 first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BhavaBalaResult {
    pub entries: [BhavaBalaEntry; 12],
}

impl BhavaBalaResult {
    /// Entry for a house number (1-12).
    pub fn get(&self, house: u8) -> Option<&BhavaBalaEntry> {
        self.entries.get(usize::from(house).checked_sub(1)?)
    }

    pub fn total_rupas(&self) -> f64 {
        self.entries.iter().map(|e| e.total_rupas).sum()
    }
}

/// Midpoint of a whole sign, in degrees.
pub fn sign_midpoint(sign: u8) -> f64 {
    f64::from(sign % 12) * 30.0 + 15.0
}

/// Bhavadhipati: the lord's Shadbala virupa scaled by 1/10 into [20, 60].
pub fn bhavadhipati_bala(lord_total_virupa: Option<f64>) -> f64 {
    match lord_total_virupa {
        Some(v) => (v / 10.0).clamp(20.0, 60.0),
        None => DEFAULT_BHAVADHIPATI,
    }
}

/// Digbala: angular class plus a small per-house bonus.
pub fn bhava_digbala(house: u8) -> f64 {
    let class = match house {
        1 | 4 | 7 | 10 => 45.0,
        2 | 5 | 8 | 11 => 30.0,
        _ => 18.0,
    };
    let bonus = match house {
        1 => 6.0,
        10 => 5.0,
        9 => 4.0,
        5 | 11 => 3.0,
        _ => 0.0,
    };
    class + bonus
}

/// Drishti: signed aspects of every graha but Ketu onto the house midpoint,
/// clamped to +/-60.
pub fn bhava_drishti_bala(sidereal_lons: &[f64; 9], midpoint: f64) -> f64 {
    ALL_GRAHAS
        .iter()
        .filter(|&&g| g != Graha::Ketu)
        .map(|&g| signed_aspect(g, sidereal_lons[g.index() as usize], midpoint))
        .sum::<f64>()
        .clamp(-60.0, 60.0)
}

/// Residential strength of one occupant: 60 at the midpoint falling to 0 at
/// 15 deg. Malefics count half.
fn residential_value(graha: Graha, sidereal_lon: f64, midpoint: f64) -> f64 {
    let mut d = angular_distance(sidereal_lon, midpoint);
    if d > 15.0 {
        d = 30.0 - d;
    }
    let value = ((15.0 - d) * 4.0).max(0.0);
    if is_benefic(graha) { value } else { value * 0.5 }
}

/// Residential: occupant proximity to the midpoint, capped at 60.
pub fn bhava_residential_bala(occupants: &[(Graha, f64)], midpoint: f64) -> f64 {
    occupants
        .iter()
        .map(|&(g, lon)| residential_value(g, lon, midpoint))
        .sum::<f64>()
        .min(60.0)
}

/// Contribution of one occupant with the given Shadbala virupa.
///
/// Malefics add in upachaya houses (3, 6, 11), subtract in the remaining
/// dusthanas (8, 12), and add a reduced share elsewhere.
pub fn occupant_contribution(graha: Graha, total_virupa: f64, house: u8) -> f64 {
    let c = (total_virupa / 20.0).clamp(0.0, 30.0);
    if is_benefic(graha) {
        c
    } else if matches!(house, 3 | 6 | 11) {
        0.7 * c
    } else if matches!(house, 8 | 12) {
        -0.4 * c
    } else {
        0.45 * c
    }
}

/// Bhava Bala for one house (1-12).
pub fn bhava_bala_for_house(chart: &ChartState, shadbala: &ShadbalaResult, house: u8) -> BhavaBalaEntry {
    let sign = chart.house_sign(house);
    let midpoint = sign_midpoint(sign);
    let lord = sign_lord(sign);
    let lons = chart.bodies.map(|b| b.sidereal_lon);

    let occupants: Vec<(Graha, f64)> = chart
        .grahas_in_sign(sign)
        .map(|b| (b.graha, b.sidereal_lon))
        .collect();

    let bhavadhipati = bhavadhipati_bala(Some(shadbala.get(lord).total_virupa));
    let digbala = bhava_digbala(house);
    let drishti = bhava_drishti_bala(&lons, midpoint);
    let residential = bhava_residential_bala(&occupants, midpoint);
    let planet_contribution: f64 = occupants
        .iter()
        .map(|&(g, _)| occupant_contribution(g, shadbala.get(g).total_virupa, house))
        .sum();

    let total = bhavadhipati + digbala + drishti + residential + planet_contribution + BHAVA_BASE_VIRUPA;
    let rupas = total / 60.0;

    BhavaBalaEntry {
        house,
        sign,
        lord,
        lord_house: chart.body(lord).house,
        occupants: occupants.iter().map(|&(g, _)| g).collect(),
        bhavadhipati,
        digbala,
        drishti,
        residential,
        planet_contribution,
        base: BHAVA_BASE_VIRUPA,
        total_virupa: total,
        total_rupas: rupas,
        rating: BhavaRating::from_rupas(rupas),
        is_strong: rupas >= BHAVA_STRONG_RUPAS,
    }
}

/// Bhava Bala for all twelve houses.
pub fn bhava_bala_for_chart(chart: &ChartState, shadbala: &ShadbalaResult) -> BhavaBalaResult {
    BhavaBalaResult {
        entries: std::array::from_fn(|i| bhava_bala_for_house(chart, shadbala, i as u8 + 1)),
    }
}
