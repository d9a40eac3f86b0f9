//! Closed-form Vedic chart scoring on already-resolved ephemeris values.
//!
//! This crate provides:
//! - Chart state: sidereal placements, divisional signs, status flags, upagrahas
//! - Shadbala (six-fold planetary strength) for all nine grahas
//! - Bhava Bala (five-fold house strength)
//! - Vimshottari mahadasha/antardasha timeline
//! - Ashtakoota compatibility of two charts
//!
//! Nothing here evaluates an ephemeris or touches I/O; every function is a
//! pure function of its inputs.

pub mod amsha;
pub mod ashtakoota;
pub mod ayanamsha;
pub mod bhava_bala;
pub mod chart;
pub mod combustion;
pub mod dasha;
pub mod drishti;
pub mod error;
pub mod graha;
pub mod graha_relationships;
pub mod kundali;
pub mod nakshatra;
pub mod rashi;
pub mod shadbala;
pub mod upagraha;
pub mod util;

pub use amsha::{Amsha, SAPTAVARGA, VargaPlacement, amsha_rashi, navamsa_rashi};
pub use ashtakoota::{
    ALL_KOOTAS, ASHTAKOOTA_MAX_TOTAL, AshtakootaResult, Gana, Koota, KootaScore, MoonPlacement,
    Nadi, YoniAnimal, ashtakoota, compute_compatibility,
};
pub use ayanamsha::{ALL_AYANAMSHA_SYSTEMS, AyanamshaSystem, mean_ayanamsha_deg};
pub use bhava_bala::{BhavaBalaEntry, BhavaBalaResult, BhavaRating, bhava_bala_for_chart};
pub use chart::{
    Ascendant, BirthMoment, CelestialBody, ChartOccupant, ChartState, RawPosition, RawPositions,
    UpagrahaPoint, build_chart_state,
};
pub use combustion::{combustion_orb, is_combust};
pub use dasha::{Antardasha, DAYS_PER_YEAR, Mahadasha, VimshottariDasha, vimshottari_dasha};
pub use error::KundaliError;
pub use graha::{ALL_GRAHAS, Graha, PROVIDER_GRAHAS, SAPTA_GRAHAS, rashi_lord};
pub use kundali::{ChartResult, compute_chart};
pub use nakshatra::{ALL_NAKSHATRAS_27, Nakshatra, NakshatraInfo, nakshatra_from_longitude};
pub use rashi::{ALL_RASHIS, Dms, Rashi, RashiInfo, deg_to_dms, rashi_from_longitude};
pub use shadbala::{ShadbalaBreakdown, ShadbalaResult, StrengthLabel, shadbala_for_chart};
pub use upagraha::{ALL_UPAGRAHAS, Upagraha};
pub use util::{angular_distance, normalize_360, whole_sign_house};
