//! Shadbala: six-fold planetary strength.
//!
//! Every term is in virupa (shashtiamsa, 1/60 of a rupa). The engine scores
//! all nine grahas; terms that have no meaning for the nodes give them a
//! fixed value (30 or 0) instead of skipping them.

use serde::Serialize;

use crate::amsha::{Amsha, SAPTAVARGA, amsha_rashi, navamsa_rashi};
use crate::chart::ChartState;
use crate::drishti::signed_aspect;
use crate::graha::{ALL_GRAHAS, Graha};
use crate::graha_relationships::{
    GrahaGender, SignRelationship, debilitation_point, graha_gender, is_benefic, is_moolatrikona,
    sign_relationship,
};
use crate::upagraha::weekday_from_jd;
use crate::util::{angular_distance, degrees_in_sign, normalize_360, sign_index};

/// Naisargika (natural) strength in virupa, indexed by graha.
pub const NAISARGIKA_BALA: [f64; 9] = [60.0, 51.43, 17.14, 25.71, 34.28, 42.85, 8.57, 8.57, 8.57];

/// Required total strength in virupa, indexed by graha.
pub const REQUIRED_STRENGTH: [f64; 9] = [
    300.0, 360.0, 300.0, 420.0, 390.0, 330.0, 300.0, 300.0, 300.0,
];

/// House (1-12) where each sapta graha gains full directional strength.
const DIG_BALA_BHAVA: [u8; 7] = [10, 4, 10, 1, 1, 4, 7];

/// Mean daily motion used by Cheshta Bala. Zero for the luminaries and nodes.
const MEAN_SPEED: [f64; 9] = [0.0, 0.0, 0.5240, 1.3833, 0.0831, 1.2, 0.0335, 0.0, 0.0];

/// Epoch of the Ahargana count used for the year and month lords.
const AHARGANA_EPOCH_JD: f64 = 588_465.5;

/// Weekday positions in the hora cycle.
const HORA_SEQUENCE: [u8; 7] = [0, 3, 6, 2, 5, 1, 4];

const RATIO_STRONG: f64 = 1.2;
const RATIO_MEDIUM: f64 = 0.9;

// ---------------------------------------------------------------------------
// Sthana Bala
// ---------------------------------------------------------------------------

/// Uchcha Bala: one third of the distance from the debilitation point.
/// 60 at exaltation, 0 at debilitation. Nodes get 30.
pub fn uchcha_bala(graha: Graha, sidereal_lon: f64) -> f64 {
    match debilitation_point(graha) {
        Some(point) => angular_distance(sidereal_lon, point) / 3.0,
        None => 30.0,
    }
}

fn relationship_virupa(rel: SignRelationship) -> f64 {
    match rel {
        SignRelationship::Own => 30.0,
        SignRelationship::Friend => 15.0,
        SignRelationship::Neutral => 7.5,
        SignRelationship::Enemy => 3.75,
    }
}

/// Saptavargaja Bala: dignity in each of the seven vargas.
///
/// Moolatrikona counts only in the rasi chart and scores 45.
pub fn saptavargaja_bala(graha: Graha, sidereal_lon: f64) -> f64 {
    SAPTAVARGA
        .iter()
        .map(|&amsha| {
            if amsha == Amsha::D1 && is_moolatrikona(graha, sidereal_lon) {
                45.0
            } else {
                relationship_virupa(sign_relationship(graha, amsha_rashi(sidereal_lon, amsha)))
            }
        })
        .sum()
}

/// Ojhayugma Bala: 15 each for rasi and navamsa in the preferred parity.
/// Moon and Venus prefer even signs, everything else odd.
pub fn ojhayugma_bala(graha: Graha, sidereal_lon: f64) -> f64 {
    let prefers_even = matches!(graha, Graha::Chandra | Graha::Shukra);
    [sign_index(sidereal_lon), navamsa_rashi(sidereal_lon)]
        .iter()
        .filter(|&&sign| (sign % 2 == 1) == prefers_even)
        .count() as f64
        * 15.0
}

/// Kendradi Bala: 60 in kendras, 30 in panaparas, 15 in apoklimas.
pub fn kendradi_bala(bhava_number: u8) -> f64 {
    match bhava_number {
        1 | 4 | 7 | 10 => 60.0,
        2 | 5 | 8 | 11 => 30.0,
        _ => 15.0,
    }
}

/// Drekkana Bala: 15 when the decanate matches the graha's gender.
pub fn drekkana_bala(graha: Graha, sidereal_lon: f64) -> f64 {
    let decanate = (degrees_in_sign(sidereal_lon) / 10.0).floor() as u8;
    let matched = matches!(
        (graha_gender(graha), decanate),
        (Some(GrahaGender::Male), 0) | (Some(GrahaGender::Neutral), 1) | (Some(GrahaGender::Female), 2)
    );
    if matched { 15.0 } else { 0.0 }
}

/// Sthana Bala breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SthanaBalaBreakdown {
    pub uchcha: f64,
    pub saptavargaja: f64,
    pub ojhayugma: f64,
    pub kendradi: f64,
    pub drekkana: f64,
    pub total: f64,
}

/// Sthana bala for a single graha.
pub fn sthana_bala(graha: Graha, sidereal_lon: f64, bhava: u8) -> SthanaBalaBreakdown {
    let u = uchcha_bala(graha, sidereal_lon);
    let s = saptavargaja_bala(graha, sidereal_lon);
    let o = ojhayugma_bala(graha, sidereal_lon);
    let k = kendradi_bala(bhava);
    let d = drekkana_bala(graha, sidereal_lon);
    SthanaBalaBreakdown {
        uchcha: u,
        saptavargaja: s,
        ojhayugma: o,
        kendradi: k,
        drekkana: d,
        total: u + s + o + k + d,
    }
}

// ---------------------------------------------------------------------------
// Dig Bala
// ---------------------------------------------------------------------------

/// Dig Bala: (180 - distance from the strongest house cusp) / 3.
///
/// The cusp is the ascendant advanced by whole houses. Nodes get 30.
pub fn dig_bala(graha: Graha, sidereal_lon: f64, ascendant_lon: f64) -> f64 {
    let Some(&house) = DIG_BALA_BHAVA.get(graha.index() as usize) else {
        return 30.0;
    };
    let target = normalize_360(ascendant_lon + f64::from(house - 1) * 30.0);
    ((180.0 - angular_distance(sidereal_lon, target)) / 3.0).max(0.0)
}

// ---------------------------------------------------------------------------
// Kala Bala
// ---------------------------------------------------------------------------

/// Lord of a weekday, 0 = Sunday.
pub const fn weekday_lord(weekday: u8) -> Graha {
    const LORDS: [Graha; 7] = [
        Graha::Surya,
        Graha::Chandra,
        Graha::Mangal,
        Graha::Buddh,
        Graha::Guru,
        Graha::Shukra,
        Graha::Shani,
    ];
    LORDS[(weekday % 7) as usize]
}

fn ahargana_cycle_lord(jd_ut: f64, days: f64) -> Graha {
    let cycle = ((jd_ut - AHARGANA_EPOCH_JD) / days).floor() as i64;
    weekday_lord(cycle.rem_euclid(7) as u8)
}

/// Lord of the 360-day year containing the instant.
pub fn year_lord(jd_ut: f64) -> Graha {
    ahargana_cycle_lord(jd_ut, 360.0)
}

/// Lord of the 30-day month containing the instant.
pub fn month_lord(jd_ut: f64) -> Graha {
    ahargana_cycle_lord(jd_ut, 30.0)
}

/// Lord of the hour: the weekday's position in the hora cycle advanced by
/// the whole local hours elapsed.
pub fn hora_lord(jd_ut: f64, local_hour: f64) -> Graha {
    let weekday = weekday_from_jd(jd_ut);
    let start = HORA_SEQUENCE
        .iter()
        .position(|&w| w == weekday)
        .unwrap_or(0);
    let hour = (local_hour.floor() as i64).rem_euclid(24) as usize;
    weekday_lord(HORA_SEQUENCE[(start + hour) % 7])
}

/// Divaratri (Nathonnatha) Bala from the local hour.
///
/// Night grahas peak at midnight, day grahas at noon; Mercury is always 60
/// and the nodes 30.
pub fn divaratri_bala(graha: Graha, local_hour: f64) -> f64 {
    let from_midnight = if local_hour < 12.0 {
        local_hour
    } else {
        24.0 - local_hour
    };
    match graha {
        Graha::Buddh => 60.0,
        Graha::Chandra | Graha::Mangal | Graha::Shani => (12.0 - from_midnight) * 5.0,
        Graha::Surya | Graha::Guru | Graha::Shukra => from_midnight * 5.0,
        Graha::Rahu | Graha::Ketu => 30.0,
    }
}

/// Paksha Bala from the Moon-Sun elongation. The Moon's value is doubled;
/// the result never exceeds 60.
pub fn paksha_bala(graha: Graha, sun_lon: f64, moon_lon: f64) -> f64 {
    let elongation = normalize_360(moon_lon - sun_lon);
    let base = if is_benefic(graha) {
        elongation / 3.0
    } else {
        (180.0 - elongation.min(360.0 - elongation)) / 3.0
    };
    let value = if graha == Graha::Chandra { base * 2.0 } else { base };
    value.min(60.0)
}

/// Ruler of the current third of the day (from 06:00) or night (from 18:00).
fn tribhaga_ruler(local_hour: f64) -> Graha {
    const DAY: [Graha; 3] = [Graha::Buddh, Graha::Surya, Graha::Shani];
    const NIGHT: [Graha; 3] = [Graha::Chandra, Graha::Shukra, Graha::Mangal];
    if (6.0..18.0).contains(&local_hour) {
        let third = (((local_hour - 6.0) / 4.0).floor() as usize).min(2);
        DAY[third]
    } else {
        let elapsed = if local_hour >= 18.0 {
            local_hour - 18.0
        } else {
            local_hour + 6.0
        };
        let third = ((elapsed / 4.0).floor() as usize).min(2);
        NIGHT[third]
    }
}

/// Tribhaga Bala: 60 for the ruler of the current third. Jupiter always 60.
pub fn tribhaga_bala(graha: Graha, local_hour: f64) -> f64 {
    if graha == Graha::Guru || graha == tribhaga_ruler(local_hour) {
        60.0
    } else {
        0.0
    }
}

pub fn abda_bala(graha: Graha, jd_ut: f64) -> f64 {
    if graha == year_lord(jd_ut) { 15.0 } else { 0.0 }
}

pub fn masa_bala(graha: Graha, jd_ut: f64) -> f64 {
    if graha == month_lord(jd_ut) { 30.0 } else { 0.0 }
}

pub fn vara_bala(graha: Graha, jd_ut: f64) -> f64 {
    if graha == weekday_lord(weekday_from_jd(jd_ut)) {
        45.0
    } else {
        0.0
    }
}

pub fn hora_bala(graha: Graha, jd_ut: f64, local_hour: f64) -> f64 {
    if graha == hora_lord(jd_ut, local_hour) {
        60.0
    } else {
        0.0
    }
}

/// Ayana Bala from the approximate declination 23.45 * sin(lon).
///
/// North-favoring grahas gain with northern declination, the rest with
/// southern. The Sun's value is doubled; the result is clamped to [0, 60].
pub fn ayana_bala(graha: Graha, sidereal_lon: f64) -> f64 {
    let declination = 23.45 * sidereal_lon.to_radians().sin();
    let scaled = declination * 30.0 / 23.45;
    let north = matches!(
        graha,
        Graha::Surya | Graha::Mangal | Graha::Guru | Graha::Shukra | Graha::Buddh
    );
    let base = if north { 30.0 + scaled } else { 30.0 - scaled };
    let value = if graha == Graha::Surya { base * 2.0 } else { base };
    value.clamp(0.0, 60.0)
}

/// The instant-dependent inputs shared by every graha's Kala Bala.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KalaBalaInputs {
    pub jd_ut: f64,
    pub local_hour: f64,
    pub sun_lon: f64,
    pub moon_lon: f64,
}

impl KalaBalaInputs {
    pub fn from_chart(chart: &ChartState) -> Self {
        Self {
            jd_ut: chart.jd_ut,
            local_hour: chart.local_hour,
            sun_lon: chart.body(Graha::Surya).sidereal_lon,
            moon_lon: chart.moon().sidereal_lon,
        }
    }
}

/// Kala Bala breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct KalaBalaBreakdown {
    pub divaratri: f64,
    pub paksha: f64,
    pub tribhaga: f64,
    pub abda: f64,
    pub masa: f64,
    pub vara: f64,
    pub hora: f64,
    pub ayana: f64,
    pub total: f64,
}

/// Kala bala for a single graha.
pub fn kala_bala(graha: Graha, sidereal_lon: f64, inputs: &KalaBalaInputs) -> KalaBalaBreakdown {
    let dr = divaratri_bala(graha, inputs.local_hour);
    let p = paksha_bala(graha, inputs.sun_lon, inputs.moon_lon);
    let t = tribhaga_bala(graha, inputs.local_hour);
    let ab = abda_bala(graha, inputs.jd_ut);
    let ma = masa_bala(graha, inputs.jd_ut);
    let va = vara_bala(graha, inputs.jd_ut);
    let ho = hora_bala(graha, inputs.jd_ut, inputs.local_hour);
    let ay = ayana_bala(graha, sidereal_lon);
    KalaBalaBreakdown {
        divaratri: dr,
        paksha: p,
        tribhaga: t,
        abda: ab,
        masa: ma,
        vara: va,
        hora: ho,
        ayana: ay,
        total: dr + p + t + ab + ma + va + ho + ay,
    }
}

// ---------------------------------------------------------------------------
// Cheshta, Naisargika, Drik
// ---------------------------------------------------------------------------

/// Cheshta Bala from the ratio of actual to mean daily motion.
///
/// Retrograde gives 60. Slow motion tapers up from 30, fast motion down
/// toward 0. Sun, Moon and the nodes get 0.
pub fn cheshta_bala(graha: Graha, speed: f64) -> f64 {
    let mean = MEAN_SPEED[graha.index() as usize];
    if mean == 0.0 {
        return 0.0;
    }
    if speed < 0.0 {
        return 60.0;
    }
    let r = speed.abs() / mean;
    if r < 0.5 {
        45.0 + (0.5 - r) * 30.0
    } else if r < 1.0 {
        30.0 + (1.0 - r) * 30.0
    } else {
        (30.0 - (r - 1.0) * 15.0).max(0.0)
    }
}

pub fn naisargika_bala(graha: Graha) -> f64 {
    NAISARGIKA_BALA[graha.index() as usize]
}

/// Drik Bala: signed aspects received from every other graha except Ketu.
/// Not clamped; heavily afflicted grahas go negative.
pub fn drik_bala(graha: Graha, sidereal_lons: &[f64; 9]) -> f64 {
    let target = sidereal_lons[graha.index() as usize];
    ALL_GRAHAS
        .iter()
        .filter(|&&other| other != graha && other != Graha::Ketu)
        .map(|&other| signed_aspect(other, sidereal_lons[other.index() as usize], target))
        .sum()
}

// ---------------------------------------------------------------------------
// Complete Shadbala
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StrengthLabel {
    Strong,
    Medium,
    Weak,
}

impl StrengthLabel {
    /// Label for the ratio of actual to required rupas.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= RATIO_STRONG {
            Self::Strong
        } else if ratio >= RATIO_MEDIUM {
            Self::Medium
        } else {
            Self::Weak
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Medium => "Medium",
            Self::Weak => "Weak",
        }
    }
}

/// Complete Shadbala breakdown for one graha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShadbalaBreakdown {
    pub graha: Graha,
    pub sthana: SthanaBalaBreakdown,
    pub dig: f64,
    pub kala: KalaBalaBreakdown,
    pub cheshta: f64,
    pub naisargika: f64,
    pub drik: f64,
    pub total_virupa: f64,
    pub total_rupas: f64,
    pub required_rupas: f64,
    pub ratio: f64,
    pub label: StrengthLabel,
    pub is_strong: bool,
}

/// Shadbala for all nine grahas, indexed by graha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShadbalaResult {
    pub entries: [ShadbalaBreakdown; 9],
}

impl ShadbalaResult {
    pub fn get(&self, graha: Graha) -> &ShadbalaBreakdown {
        &self.entries[graha.index() as usize]
    }

    /// Sum of every graha's total in rupas.
    pub fn total_rupas(&self) -> f64 {
        self.entries.iter().map(|e| e.total_rupas).sum()
    }
}

/// Shadbala for one graha of a built chart.
pub fn shadbala_for_graha(chart: &ChartState, graha: Graha) -> ShadbalaBreakdown {
    let body = chart.body(graha);
    let lon = body.sidereal_lon;
    let lons = chart.bodies.map(|b| b.sidereal_lon);
    let kala_inputs = KalaBalaInputs::from_chart(chart);

    let sthana = sthana_bala(graha, lon, body.house);
    let dig = dig_bala(graha, lon, chart.ascendant.sidereal_lon);
    let kala = kala_bala(graha, lon, &kala_inputs);
    let cheshta = cheshta_bala(graha, body.speed);
    let naisargika = naisargika_bala(graha);
    let drik = drik_bala(graha, &lons);

    let total = sthana.total + dig + kala.total + cheshta + naisargika + drik;
    let rupas = total / 60.0;
    let required_rupas = REQUIRED_STRENGTH[graha.index() as usize] / 60.0;
    let ratio = rupas / required_rupas;

    ShadbalaBreakdown {
        graha,
        sthana,
        dig,
        kala,
        cheshta,
        naisargika,
        drik,
        total_virupa: total,
        total_rupas: rupas,
        required_rupas,
        ratio,
        label: StrengthLabel::from_ratio(ratio),
        is_strong: ratio >= RATIO_STRONG,
    }
}

/// Shadbala for all nine grahas of a built chart.
pub fn shadbala_for_chart(chart: &ChartState) -> ShadbalaResult {
    ShadbalaResult {
        entries: ALL_GRAHAS.map(|g| shadbala_for_graha(chart, g)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
