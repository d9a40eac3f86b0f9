//! Birth data: civil calendar fields, fixed UTC offset and place.
//!
//! DST and timezone-name resolution stay with the caller; a birth carries
//! the offset that was in force at the birthplace.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc};
use kundali_base::{AyanamshaSystem, BirthMoment, KundaliError};
use serde::{Deserialize, Serialize};

/// Julian day of the Unix epoch, 1970-01-01T00:00:00 UTC.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Geographic location in degrees. East longitude positive.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl GeoLocation {
    pub const fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }
}

/// A birth as entered: local civil date/time, fixed offset, place and the
/// ayanamsha system to read from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirthInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// Hours east of UTC, e.g. 5.5 for IST.
    pub utc_offset_hours: f64,
    pub location: GeoLocation,
    #[serde(default)]
    pub ayanamsha: AyanamshaSystem,
}

impl BirthInput {
    /// Birth from a local naive date-time.
    pub fn from_local(
        local: NaiveDateTime,
        utc_offset_hours: f64,
        location: GeoLocation,
        ayanamsha: AyanamshaSystem,
    ) -> Self {
        Self {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            second: local.second(),
            utc_offset_hours,
            location,
            ayanamsha,
        }
    }

    /// Reject out-of-range birth parameters before any computation.
    pub fn validate(&self) -> Result<(), KundaliError> {
        if !(1..=3000).contains(&self.year) {
            return Err(KundaliError::invalid(format!(
                "year {} outside [1, 3000]",
                self.year
            )));
        }
        if !(1..=12).contains(&self.month) {
            return Err(KundaliError::invalid(format!(
                "month {} outside [1, 12]",
                self.month
            )));
        }
        if NaiveDate::from_ymd_opt(self.year, self.month, self.day).is_none() {
            return Err(KundaliError::invalid(format!(
                "day {} not valid for {}-{:02}",
                self.day, self.year, self.month
            )));
        }
        if self.hour > 23 {
            return Err(KundaliError::invalid(format!(
                "hour {} outside [0, 23]",
                self.hour
            )));
        }
        if self.minute > 59 {
            return Err(KundaliError::invalid(format!(
                "minute {} outside [0, 59]",
                self.minute
            )));
        }
        if self.second > 59 {
            return Err(KundaliError::invalid(format!(
                "second {} outside [0, 59]",
                self.second
            )));
        }
        check_range("UTC offset", self.utc_offset_hours, -12.0, 14.0)?;
        check_range("latitude", self.location.latitude_deg, -90.0, 90.0)?;
        check_range("longitude", self.location.longitude_deg, -180.0, 180.0)?;
        Ok(())
    }

    /// Local civil date-time of the birth.
    pub fn local_datetime(&self) -> Result<NaiveDateTime, KundaliError> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|d| d.and_hms_opt(self.hour, self.minute, self.second))
            .ok_or_else(|| {
                KundaliError::invalid(format!(
                    "invalid date/time {}-{:02}-{:02} {:02}:{:02}:{:02}",
                    self.year, self.month, self.day, self.hour, self.minute, self.second
                ))
            })
    }

    /// The birth instant in UTC.
    pub fn utc_datetime(&self) -> Result<DateTime<Utc>, KundaliError> {
        let local = self.local_datetime()?;
        let offset_secs = (self.utc_offset_hours * 3600.0).round() as i64;
        Ok((local - TimeDelta::seconds(offset_secs)).and_utc())
    }

    /// Local civil time of day, decimal hours.
    pub fn local_hour(&self) -> f64 {
        f64::from(self.hour) + f64::from(self.minute) / 60.0 + f64::from(self.second) / 3600.0
    }

    /// Validate and convert to the instant the chart engines consume.
    pub fn birth_moment(&self) -> Result<BirthMoment, KundaliError> {
        self.validate()?;
        let utc = self.utc_datetime()?;
        Ok(BirthMoment {
            jd_ut: jd_from_utc(&utc),
            local_hour: self.local_hour(),
        })
    }
}

fn check_range(label: &str, value: f64, min: f64, max: f64) -> Result<(), KundaliError> {
    if !value.is_finite() || value < min || value > max {
        return Err(KundaliError::invalid(format!(
            "{label} {value} outside [{min}, {max}]"
        )));
    }
    Ok(())
}

/// Julian day (UT) of a UTC instant, millisecond resolution.
pub fn jd_from_utc(utc: &DateTime<Utc>) -> f64 {
    utc.timestamp_millis() as f64 / MS_PER_DAY + UNIX_EPOCH_JD
}

/// UTC instant of a Julian day (UT), rounded to the millisecond.
pub fn utc_from_jd(jd_ut: f64) -> Option<DateTime<Utc>> {
    if !jd_ut.is_finite() {
        return None;
    }
    let ms = ((jd_ut - UNIX_EPOCH_JD) * MS_PER_DAY).round() as i64;
    DateTime::from_timestamp_millis(ms)
}

/// Local civil date-time of a Julian day (UT) at a fixed offset.
pub fn local_from_jd(jd_ut: f64, utc_offset_hours: f64) -> Option<NaiveDateTime> {
    let utc = utc_from_jd(jd_ut)?;
    let offset_secs = (utc_offset_hours * 3600.0).round() as i64;
    Some(utc.naive_utc() + TimeDelta::seconds(offset_secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn delhi_birth() -> BirthInput {
        BirthInput {
            year: 2000,
            month: 1,
            day: 1,
            hour: 17,
            minute: 30,
            second: 0,
            utc_offset_hours: 5.5,
            location: GeoLocation::new(28.6139, 77.2090),
            ayanamsha: AyanamshaSystem::Lahiri,
        }
    }

    #[test]
    fn j2000_noon() {
        let utc = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc();
        assert!((jd_from_utc(&utc) - 2_451_545.0).abs() < EPS);
    }

    #[test]
    fn offset_applied_before_jd() {
        // 17:30 IST is 12:00 UTC.
        let m = delhi_birth().birth_moment().unwrap();
        assert!((m.jd_ut - 2_451_545.0).abs() < EPS);
        assert!((m.local_hour - 17.5).abs() < EPS);
    }

    #[test]
    fn negative_offset_crosses_midnight() {
        let mut b = delhi_birth();
        b.hour = 20;
        b.minute = 0;
        b.utc_offset_hours = -5.0;
        let utc = b.utc_datetime().unwrap();
        assert_eq!(utc.day(), 2);
        assert_eq!(utc.hour(), 1);
    }

    #[test]
    fn jd_round_trip_to_local() {
        let b = delhi_birth();
        let m = b.birth_moment().unwrap();
        let local = local_from_jd(m.jd_ut, b.utc_offset_hours).unwrap();
        assert_eq!(local, b.local_datetime().unwrap());
    }

    #[test]
    fn rejects_bad_fields() {
        let cases: [fn(&mut BirthInput); 9] = [
            |b| b.year = 0,
            |b| b.month = 13,
            |b| b.day = 32,
            |b| b.hour = 24,
            |b| b.minute = 60,
            |b| b.second = 60,
            |b| b.utc_offset_hours = 14.5,
            |b| b.location.latitude_deg = 91.0,
            |b| b.location.longitude_deg = -180.5,
        ];
        for set in cases {
            let mut b = delhi_birth();
            set(&mut b);
            assert!(matches!(b.validate(), Err(KundaliError::InvalidInput(_))), "{b:?}");
        }
    }

    #[test]
    fn leap_day_rules() {
        let mut b = delhi_birth();
        b.month = 2;
        b.day = 29;
        b.year = 2000;
        assert!(b.validate().is_ok());
        b.year = 1900;
        assert!(b.validate().is_err());
    }

    #[test]
    fn from_local_keeps_fields() {
        let local = NaiveDate::from_ymd_opt(1990, 7, 4)
            .unwrap()
            .and_hms_opt(6, 15, 30)
            .unwrap();
        let b = BirthInput::from_local(local, 1.0, GeoLocation::default(), AyanamshaSystem::Raman);
        assert_eq!((b.year, b.month, b.day), (1990, 7, 4));
        assert_eq!((b.hour, b.minute, b.second), (6, 15, 30));
        assert!((b.local_hour() - (6.0 + 15.0 / 60.0 + 30.0 / 3600.0)).abs() < EPS);
    }
}
