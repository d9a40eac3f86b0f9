//! Vimshottari mahadasha and antardasha generation.

use log::debug;

use crate::error::KundaliError;
use crate::graha::Graha;

use super::balance::vimshottari_balance;
use super::types::{
    ANTARDASHA_SUM_TOLERANCE_YEARS, Antardasha, DAYS_PER_YEAR, Mahadasha,
    VIMSHOTTARI_TOTAL_YEARS, VimshottariDasha,
};

/// Lords in cyclic order, starting from Ashwini's lord.
pub const VIMSHOTTARI_GRAHAS: [Graha; 9] = [
    Graha::Ketu,
    Graha::Shukra,
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Rahu,
    Graha::Guru,
    Graha::Shani,
    Graha::Buddh,
];

/// Full period in years, parallel to [`VIMSHOTTARI_GRAHAS`].
pub const VIMSHOTTARI_YEARS: [f64; 9] = [7.0, 20.0, 6.0, 10.0, 7.0, 18.0, 16.0, 19.0, 17.0];

/// An antardasha whose duration is within this many years of the remaining
/// skip budget counts as fully elapsed.
const SKIP_EPSILON_YEARS: f64 = 1e-12;

fn sequence_position(graha: Graha) -> usize {
    VIMSHOTTARI_GRAHAS
        .iter()
        .position(|&g| g == graha)
        .unwrap_or(0)
}

/// Full Vimshottari period of a graha in years.
pub fn vimshottari_years(graha: Graha) -> f64 {
    VIMSHOTTARI_YEARS[sequence_position(graha)]
}

/// Lord of a nakshatra (0-based). The nine-lord pattern repeats three times.
pub fn nakshatra_lord(nakshatra_index: u8) -> Graha {
    VIMSHOTTARI_GRAHAS[usize::from(nakshatra_index) % 9]
}

/// The nine lords in order, starting at `start`.
pub fn lord_sequence_from(start: Graha) -> [Graha; 9] {
    let offset = sequence_position(start);
    std::array::from_fn(|i| VIMSHOTTARI_GRAHAS[(offset + i) % 9])
}

/// Antardashas of one mahadasha segment.
///
/// `segment_years` may be shorter than the lord's full period (the birth
/// segment). The part of the sequence that fell before the segment start is
/// skipped, the first remaining antardasha is shortened, and the last one is
/// clipped to `end_jd`.
pub fn antardashas(
    mahadasha_lord: Graha,
    segment_years: f64,
    start_jd: f64,
    end_jd: f64,
) -> Result<Vec<Antardasha>, KundaliError> {
    let full_years = vimshottari_years(mahadasha_lord);
    let sequence = lord_sequence_from(mahadasha_lord);
    let sub_years = |g: Graha| full_years * vimshottari_years(g) / VIMSHOTTARI_TOTAL_YEARS;

    let mut skip = (full_years - segment_years).max(0.0);
    let mut first = 0;
    while first < sequence.len() {
        let d = sub_years(sequence[first]);
        if skip >= d - SKIP_EPSILON_YEARS {
            skip -= d;
            first += 1;
        } else {
            break;
        }
    }

    let mut periods = Vec::with_capacity(sequence.len() - first);
    let mut cursor = start_jd;
    for (i, &lord) in sequence.iter().enumerate().skip(first) {
        let years = if i == first {
            sub_years(lord) - skip
        } else {
            sub_years(lord)
        };
        let end = cursor + years * DAYS_PER_YEAR;
        periods.push(Antardasha {
            lord,
            start_jd: cursor,
            end_jd: end,
            years,
        });
        cursor = end;
    }

    if let Some(last) = periods.last_mut() {
        last.end_jd = end_jd;
        last.years = (end_jd - last.start_jd) / DAYS_PER_YEAR;
    }

    let sum: f64 = periods.iter().map(|a| a.years).sum();
    if (sum - segment_years).abs() > ANTARDASHA_SUM_TOLERANCE_YEARS {
        return Err(KundaliError::invariant(format!(
            "antardashas of {} sum to {sum} years, segment is {segment_years}",
            mahadasha_lord.english_name()
        )));
    }
    Ok(periods)
}

/// Vimshottari timeline from the Moon's sidereal longitude and the birth
/// instant (JD UT).
///
/// The first mahadasha carries the birth balance; the following eight run
/// their full periods in cyclic order.
pub fn vimshottari_dasha(moon_sidereal_lon: f64, birth_jd: f64) -> Result<VimshottariDasha, KundaliError> {
    if !moon_sidereal_lon.is_finite() || !birth_jd.is_finite() {
        return Err(KundaliError::invalid("dasha input is not finite"));
    }
    let balance = vimshottari_balance(moon_sidereal_lon);

    let mut mahadashas = Vec::with_capacity(9);
    let mut cursor = birth_jd;
    for (i, lord) in lord_sequence_from(balance.lord).into_iter().enumerate() {
        let full_years = vimshottari_years(lord);
        let years = if i == 0 { balance.remaining_years } else { full_years };
        let end = cursor + years * DAYS_PER_YEAR;
        mahadashas.push(Mahadasha {
            lord,
            start_jd: cursor,
            end_jd: end,
            years,
            full_years,
            is_current: i == 0,
            antardashas: antardashas(lord, years, cursor, end)?,
        });
        cursor = end;
    }

    debug!(
        "vimshottari: nakshatra={} lord={} balance={:.4}y",
        balance.nakshatra.nakshatra.name(),
        balance.lord.english_name(),
        balance.remaining_years
    );

    Ok(VimshottariDasha {
        moon_longitude: moon_sidereal_lon,
        nakshatra_number: balance.nakshatra.nakshatra_index + 1,
        nakshatra_name: balance.nakshatra.nakshatra.name(),
        pada: balance.nakshatra.pada,
        elapsed_fraction: balance.nakshatra.elapsed_fraction,
        elapsed_years: balance.elapsed_years,
        balance_years: balance.remaining_years,
        mahadashas,
    })
}
