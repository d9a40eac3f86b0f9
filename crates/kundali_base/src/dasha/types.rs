//! Period records for the Vimshottari timeline.

use serde::Serialize;

use crate::graha::Graha;

/// Year length used to place periods on the Julian-day axis.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Length of a full Vimshottari cycle in years.
pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;

/// Allowed drift between a segment and the sum of its antardashas, in years.
pub const ANTARDASHA_SUM_TOLERANCE_YEARS: f64 = 1e-6;

/// A sub-period inside a mahadasha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Antardasha {
    pub lord: Graha,
    /// JD UT, inclusive.
    pub start_jd: f64,
    /// JD UT, exclusive.
    pub end_jd: f64,
    pub years: f64,
}

impl Antardasha {
    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }
}

/// One mahadasha segment. The first segment starts at birth and carries only
/// the balance of its lord's period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mahadasha {
    pub lord: Graha,
    /// JD UT, inclusive.
    pub start_jd: f64,
    /// JD UT, exclusive.
    pub end_jd: f64,
    /// Years actually covered by this segment.
    pub years: f64,
    /// Full period of the lord.
    pub full_years: f64,
    /// True for the segment running at birth.
    pub is_current: bool,
    pub antardashas: Vec<Antardasha>,
}

impl Mahadasha {
    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }

    /// Antardasha running at `jd`, if it falls inside this segment.
    pub fn antardasha_at(&self, jd: f64) -> Option<&Antardasha> {
        self.antardashas
            .iter()
            .find(|a| jd >= a.start_jd && jd < a.end_jd)
    }
}

/// The Vimshottari timeline from birth: nine contiguous mahadashas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VimshottariDasha {
    /// Moon's sidereal longitude at birth.
    pub moon_longitude: f64,
    /// Moon's nakshatra, 1-based (1 = Ashwini).
    pub nakshatra_number: u8,
    pub nakshatra_name: &'static str,
    /// Pada 1-4.
    pub pada: u8,
    /// Fraction of the nakshatra already traversed at birth.
    pub elapsed_fraction: f64,
    /// Years of the first lord's period elapsed before birth.
    pub elapsed_years: f64,
    /// Years of the first lord's period remaining at birth.
    pub balance_years: f64,
    pub mahadashas: Vec<Mahadasha>,
}

impl VimshottariDasha {
    /// The mahadasha and antardasha running at `jd`.
    pub fn active_at(&self, jd: f64) -> Option<(&Mahadasha, Option<&Antardasha>)> {
        self.mahadashas
            .iter()
            .find(|m| jd >= m.start_jd && jd < m.end_jd)
            .map(|m| (m, m.antardasha_at(jd)))
    }

    /// End of the last mahadasha.
    pub fn end_jd(&self) -> Option<f64> {
        self.mahadashas.last().map(|m| m.end_jd)
    }
}
