//! Chart state: sidereal placements of the nine grahas, the ascendant and
//! the upagrahas, built once from raw tropical ephemeris values.

use log::debug;
use serde::Serialize;

use crate::amsha::{VargaPlacement, navamsa_rashi};
use crate::combustion::is_combust;
use crate::error::KundaliError;
use crate::graha::{ALL_GRAHAS, Graha, PROVIDER_GRAHAS};
use crate::graha_relationships::{debilitation_rashi, exaltation_rashi};
use crate::nakshatra::{NakshatraInfo, nakshatra_from_longitude};
use crate::rashi::{RashiInfo, rashi_from_longitude};
use crate::upagraha::{ALL_UPAGRAHAS, Upagraha, all_upagrahas};
use crate::util::{normalize_360, whole_sign_house};

/// Tropical longitude and daily speed of one body as resolved by an ephemeris.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RawPosition {
    /// Tropical ecliptic longitude, degrees.
    pub longitude: f64,
    /// Signed daily motion, degrees/day. Negative means retrograde.
    pub speed: f64,
}

impl RawPosition {
    pub const fn new(longitude: f64, speed: f64) -> Self {
        Self { longitude, speed }
    }
}

/// Raw positions of the eight provider-resolved grahas, indexed as
/// [`PROVIDER_GRAHAS`] (Surya..Rahu). Ketu is derived from Rahu.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RawPositions {
    pub grahas: [RawPosition; 8],
}

impl RawPositions {
    pub const fn new(grahas: [RawPosition; 8]) -> Self {
        Self { grahas }
    }

    /// Raw position of a provider graha. None for Ketu.
    pub fn get(&self, graha: Graha) -> Option<RawPosition> {
        self.grahas.get(graha.index() as usize).copied()
    }
}

/// The birth instant as supplied by the civil-time collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BirthMoment {
    /// Julian day, UT.
    pub jd_ut: f64,
    /// Local civil time of day in decimal hours, [0, 24).
    pub local_hour: f64,
}

/// One graha placed in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CelestialBody {
    pub graha: Graha,
    /// Sidereal longitude, [0, 360).
    pub sidereal_lon: f64,
    /// Daily speed in degrees/day.
    pub speed: f64,
    pub is_retrograde: bool,
    /// Sign index and in-sign DMS.
    pub rashi: RashiInfo,
    pub vargas: VargaPlacement,
    /// Whole-sign house, 1-12.
    pub house: u8,
    pub is_exalted: bool,
    pub is_debilitated: bool,
    pub is_combust: bool,
    /// Rasi sign equals navamsa sign.
    pub is_vargottama: bool,
}

impl CelestialBody {
    pub fn nakshatra(&self) -> NakshatraInfo {
        nakshatra_from_longitude(self.sidereal_lon)
    }

    pub fn sign(&self) -> u8 {
        self.rashi.rashi_index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ascendant {
    pub sidereal_lon: f64,
    pub rashi: RashiInfo,
    pub navamsa: u8,
}

impl Ascendant {
    pub fn sign(&self) -> u8 {
        self.rashi.rashi_index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UpagrahaPoint {
    pub upagraha: Upagraha,
    pub sidereal_lon: f64,
    pub rashi_index: u8,
    pub navamsa: u8,
    pub house: u8,
}

/// Anything listed in a sign of the rasi or navamsa chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartOccupant {
    Ascendant,
    Graha(Graha),
    Upagraha(Upagraha),
}

/// Immutable chart state shared by every scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartState {
    pub jd_ut: f64,
    pub local_hour: f64,
    /// Ayanamsha subtracted from every tropical longitude.
    pub ayanamsha: f64,
    pub ascendant: Ascendant,
    /// Indexed by `Graha::index()`.
    pub bodies: [CelestialBody; 9],
    /// Ordered as `ALL_UPAGRAHAS`.
    pub upagrahas: [UpagrahaPoint; 7],
    /// Occupants of each sign (0 = Mesha) in the rasi chart.
    pub rasi_chart: [Vec<ChartOccupant>; 12],
    /// Occupants of each sign in the navamsa chart.
    pub navamsa_chart: [Vec<ChartOccupant>; 12],
}

impl ChartState {
    pub fn body(&self, graha: Graha) -> &CelestialBody {
        &self.bodies[graha.index() as usize]
    }

    pub fn lagna_sign(&self) -> u8 {
        self.ascendant.sign()
    }

    /// Sign occupied by the given whole-sign house (1-12).
    pub fn house_sign(&self, house: u8) -> u8 {
        (self.lagna_sign() + (house.clamp(1, 12) - 1)) % 12
    }

    /// Grahas whose rasi sign is `sign`, in graha order.
    pub fn grahas_in_sign(&self, sign: u8) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter().filter(move |b| b.sign() == sign)
    }

    pub fn moon(&self) -> &CelestialBody {
        self.body(Graha::Chandra)
    }
}

fn check_longitude(label: &str, lon: f64) -> Result<(), KundaliError> {
    if !lon.is_finite() || !(0.0..=360.0).contains(&lon) {
        return Err(KundaliError::invalid(format!(
            "{label} longitude {lon} outside [0, 360]"
        )));
    }
    Ok(())
}

fn check_finite(label: &str, value: f64) -> Result<(), KundaliError> {
    if !value.is_finite() {
        return Err(KundaliError::invalid(format!("{label} is not finite")));
    }
    Ok(())
}

fn validate_inputs(
    raw: &RawPositions,
    ascendant_tropical: f64,
    ayanamsha: f64,
    moment: BirthMoment,
) -> Result<(), KundaliError> {
    for g in PROVIDER_GRAHAS {
        let p = raw.grahas[g.index() as usize];
        check_longitude(g.english_name(), p.longitude)?;
        check_finite(&format!("{} speed", g.english_name()), p.speed)?;
    }
    check_longitude("ascendant", ascendant_tropical)?;
    check_finite("ayanamsha", ayanamsha)?;
    if !(-360.0..=360.0).contains(&ayanamsha) {
        return Err(KundaliError::invalid(format!(
            "ayanamsha {ayanamsha} outside [-360, 360]"
        )));
    }
    check_finite("julian day", moment.jd_ut)?;
    if !moment.local_hour.is_finite() || !(0.0..24.0).contains(&moment.local_hour) {
        return Err(KundaliError::invalid(format!(
            "local hour {} outside [0, 24)",
            moment.local_hour
        )));
    }
    Ok(())
}

fn place_body(graha: Graha, sidereal_lon: f64, speed: f64, lagna_sign: u8, sun_lon: f64) -> CelestialBody {
    let rashi = rashi_from_longitude(sidereal_lon);
    let sign = rashi.rashi_index;
    let vargas = VargaPlacement::from_longitude(sidereal_lon);
    let is_retrograde = speed < 0.0;
    // Ketu shares Rahu's motion but is never treated as combust.
    let combust = graha != Graha::Ketu && is_combust(graha, sidereal_lon, sun_lon, is_retrograde);
    CelestialBody {
        graha,
        sidereal_lon,
        speed,
        is_retrograde,
        rashi,
        vargas,
        house: whole_sign_house(lagna_sign, sign),
        is_exalted: sign == exaltation_rashi(graha),
        is_debilitated: sign == debilitation_rashi(graha),
        is_combust: combust,
        is_vargottama: sign == vargas.navamsa,
    }
}

/// Build the chart state from raw tropical values.
///
/// Sidereal longitude = normalize(tropical - ayanamsha). Ketu is placed at
/// Rahu + 180 deg with Rahu's speed. Any non-finite or out-of-range input
/// fails the whole build.
pub fn build_chart_state(
    raw: &RawPositions,
    ascendant_tropical: f64,
    ayanamsha: f64,
    moment: BirthMoment,
) -> Result<ChartState, KundaliError> {
    validate_inputs(raw, ascendant_tropical, ayanamsha, moment)?;

    let asc_lon = normalize_360(ascendant_tropical - ayanamsha);
    let ascendant = Ascendant {
        sidereal_lon: asc_lon,
        rashi: rashi_from_longitude(asc_lon),
        navamsa: navamsa_rashi(asc_lon),
    };
    let lagna_sign = ascendant.sign();

    let mut sidereal = [0.0f64; 9];
    let mut speeds = [0.0f64; 9];
    for g in PROVIDER_GRAHAS {
        let i = g.index() as usize;
        sidereal[i] = normalize_360(raw.grahas[i].longitude - ayanamsha);
        speeds[i] = raw.grahas[i].speed;
    }
    let rahu = Graha::Rahu.index() as usize;
    let ketu = Graha::Ketu.index() as usize;
    sidereal[ketu] = normalize_360(sidereal[rahu] + 180.0);
    speeds[ketu] = speeds[rahu];

    let sun_lon = sidereal[Graha::Surya.index() as usize];
    let bodies = ALL_GRAHAS.map(|g| {
        let i = g.index() as usize;
        place_body(g, sidereal[i], speeds[i], lagna_sign, sun_lon)
    });

    let upa_lons = all_upagrahas(sun_lon, moment.jd_ut);
    let upagrahas = ALL_UPAGRAHAS.map(|u| {
        let lon = upa_lons[u.index() as usize];
        let rashi_index = rashi_from_longitude(lon).rashi_index;
        UpagrahaPoint {
            upagraha: u,
            sidereal_lon: lon,
            rashi_index,
            navamsa: navamsa_rashi(lon),
            house: whole_sign_house(lagna_sign, rashi_index),
        }
    });

    let mut rasi_chart: [Vec<ChartOccupant>; 12] = Default::default();
    let mut navamsa_chart: [Vec<ChartOccupant>; 12] = Default::default();
    rasi_chart[lagna_sign as usize].push(ChartOccupant::Ascendant);
    navamsa_chart[ascendant.navamsa as usize].push(ChartOccupant::Ascendant);
    for b in &bodies {
        rasi_chart[b.sign() as usize].push(ChartOccupant::Graha(b.graha));
        navamsa_chart[b.vargas.navamsa as usize].push(ChartOccupant::Graha(b.graha));
    }
    for u in &upagrahas {
        rasi_chart[u.rashi_index as usize].push(ChartOccupant::Upagraha(u.upagraha));
        navamsa_chart[u.navamsa as usize].push(ChartOccupant::Upagraha(u.upagraha));
    }

    debug!(
        "chart built: jd_ut={} lagna={} moon={:.4}",
        moment.jd_ut,
        ascendant.rashi.rashi.name(),
        bodies[Graha::Chandra.index() as usize].sidereal_lon
    );

    Ok(ChartState {
        jd_ut: moment.jd_ut,
        local_hour: moment.local_hour,
        ayanamsha,
        ascendant,
        bodies,
        upagrahas,
        rasi_chart,
        navamsa_chart,
    })
}
