//! Vimshottari dasha (planetary period) timeline.
//!
//! The Moon's nakshatra at birth picks the first lord; its unexpired share
//! opens the timeline, followed by the remaining eight lords of the
//! 120-year cycle. Each mahadasha is split into nine proportional
//! antardashas.

pub mod balance;
pub mod types;
pub mod vimshottari;

pub use balance::{DashaBalance, vimshottari_balance};
pub use types::{
    Antardasha, DAYS_PER_YEAR, Mahadasha, VIMSHOTTARI_TOTAL_YEARS, VimshottariDasha,
};
pub use vimshottari::{
    VIMSHOTTARI_GRAHAS, VIMSHOTTARI_YEARS, antardashas, lord_sequence_from, nakshatra_lord,
    vimshottari_dasha, vimshottari_years,
};
