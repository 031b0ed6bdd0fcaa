use crate::error::{KernelError, Result};
use crate::time::zones::ZoneHistory;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Raw calendar fields as supplied by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivilDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
}

impl CivilDateTime {
    /// Date without a time of day
    pub fn date(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour: None,
            minute: None,
        }
    }

    /// Set the clock reading
    pub fn at(mut self, hour: u32, minute: u32) -> Self {
        self.hour = Some(hour);
        self.minute = Some(minute);
        self
    }

    fn invalid(&self) -> KernelError {
        KernelError::InvalidDate {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            minute: self.minute,
        }
    }

    /// Validate the fields. A minute without an hour is ignored.
    pub fn to_naive(&self) -> Result<(NaiveDate, Option<NaiveTime>)> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .ok_or_else(|| self.invalid())?;
        let time = match self.hour {
            Some(hour) => Some(
                NaiveTime::from_hms_opt(hour, self.minute.unwrap_or(0), 0)
                    .ok_or_else(|| self.invalid())?,
            ),
            None => None,
        };
        Ok((date, time))
    }
}

/// A clock reading corrected into its zone's reference offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instant {
    /// Corrected civil date-time; midnight when no hour was supplied.
    pub local: NaiveDateTime,
    pub has_time: bool,
    /// Offset `local` is expressed in, minutes east of UTC.
    pub offset_minutes: i32,
    /// Offset legally in force for the supplied reading.
    pub legal_offset_minutes: i32,
    pub zone: ZoneHistory,
}

impl Instant {
    pub fn date(&self) -> NaiveDate {
        self.local.date()
    }

    pub fn year(&self) -> i32 {
        self.local.year()
    }

    pub fn hour(&self) -> Option<u32> {
        self.has_time.then(|| self.local.hour())
    }

    pub fn minute(&self) -> Option<u32> {
        self.has_time.then(|| self.local.minute())
    }

    /// The same moment in UTC. Fails when the shift leaves chrono's range.
    pub fn to_utc(&self) -> Result<DateTime<Utc>> {
        let utc = self
            .local
            .checked_sub_signed(Duration::minutes(self.offset_minutes as i64))
            .ok_or(KernelError::InvalidDate {
                year: self.local.year(),
                month: self.local.month(),
                day: self.local.day(),
                hour: self.hour(),
                minute: self.minute(),
            })?;
        Ok(DateTime::<Utc>::from_naive_utc_and_offset(utc, Utc))
    }
}

/// Resolves raw fields and a location into an [`Instant`].
#[derive(Debug, Clone)]
pub struct TimeNormalizer {
    default_zone: ZoneHistory,
    apply_historical: bool,
}

impl TimeNormalizer {
    /// Create a normalizer. Unknown default locations fall back to Korean
    /// time.
    pub fn new(default_location: &str, apply_historical: bool) -> Self {
        let default_zone = ZoneHistory::from_location(default_location).unwrap_or_else(|| {
            log::warn!(
                "TimeNormalizer: unknown default location '{}', using Korean standard time",
                default_location
            );
            ZoneHistory::Korea
        });
        Self {
            default_zone,
            apply_historical,
        }
    }

    pub fn default_zone(&self) -> ZoneHistory {
        self.default_zone
    }

    /// Zone for `location`, the default for empty or unknown ones
    pub fn resolve_zone(&self, location: &str) -> ZoneHistory {
        if location.trim().is_empty() {
            return self.default_zone;
        }
        ZoneHistory::from_location(location).unwrap_or_else(|| {
            log::warn!(
                "TimeNormalizer: unknown location '{}', using default zone {:?}",
                location,
                self.default_zone
            );
            self.default_zone
        })
    }

    /// Validate `input` and correct it into its zone's reference offset
    pub fn normalize(&self, input: &CivilDateTime, location: &str) -> Result<Instant> {
        let (date, time) = input.to_naive()?;
        let zone = self.resolve_zone(location);
        let reference = zone.reference_offset_minutes();
        let legal = zone.legal_offset_minutes(date);

        let instant = match time {
            Some(time) => {
                let reading = date.and_time(time);
                let local = if self.apply_historical {
                    reading
                        .checked_add_signed(Duration::minutes((reference - legal) as i64))
                        .ok_or_else(|| input.invalid())?
                } else {
                    reading
                };
                Instant {
                    local,
                    has_time: true,
                    offset_minutes: reference,
                    legal_offset_minutes: if self.apply_historical { legal } else { reference },
                    zone,
                }
            }
            None => Instant {
                local: date.and_time(NaiveTime::default()),
                has_time: false,
                offset_minutes: reference,
                legal_offset_minutes: legal,
                zone,
            },
        };
        log::debug!(
            "TimeNormalizer: {:?} at '{}' -> {} (legal offset {} min)",
            input,
            location,
            instant.local,
            instant.legal_offset_minutes
        );
        Ok(instant)
    }
}

impl Default for TimeNormalizer {
    fn default() -> Self {
        Self::new("seoul", true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modern_korean_time_unchanged() {
        let normalizer = TimeNormalizer::default();
        let instant = normalizer
            .normalize(&CivilDateTime::date(1990, 5, 15).at(10, 30), "seoul")
            .unwrap();
        assert_eq!(instant.local.to_string(), "1990-05-15 10:30:00");
        assert_eq!(instant.offset_minutes, 540);
        assert_eq!(
            instant.to_utc().unwrap().to_rfc3339(),
            "1990-05-15T01:30:00+00:00"
        );
    }

    #[test]
    fn test_half_hour_regime_shifts_forward() {
        let normalizer = TimeNormalizer::default();
        let instant = normalizer
            .normalize(&CivilDateTime::date(1955, 1, 10).at(23, 45), "seoul")
            .unwrap();
        assert_eq!(instant.local.to_string(), "1955-01-11 00:15:00");
        assert_eq!(instant.legal_offset_minutes, 510);
    }

    #[test]
    fn test_summer_time_shifts_back() {
        let normalizer = TimeNormalizer::default();
        let instant = normalizer
            .normalize(&CivilDateTime::date(1988, 7, 1).at(12, 0), "seoul")
            .unwrap();
        assert_eq!(instant.local.to_string(), "1988-07-01 11:00:00");
    }

    #[test]
    fn test_correction_can_be_disabled() {
        let normalizer = TimeNormalizer::new("seoul", false);
        let instant = normalizer
            .normalize(&CivilDateTime::date(1955, 1, 10).at(23, 45), "seoul")
            .unwrap();
        assert_eq!(instant.local.to_string(), "1955-01-10 23:45:00");
    }

    #[test]
    fn test_date_only_is_not_shifted() {
        let normalizer = TimeNormalizer::default();
        let instant = normalizer
            .normalize(&CivilDateTime::date(1955, 1, 10), "seoul")
            .unwrap();
        assert!(!instant.has_time);
        assert_eq!(instant.hour(), None);
        assert_eq!(instant.local.to_string(), "1955-01-10 00:00:00");
    }

    #[test]
    fn test_invalid_fields() {
        let normalizer = TimeNormalizer::default();
        assert!(matches!(
            normalizer.normalize(&CivilDateTime::date(2023, 2, 29), "seoul"),
            Err(KernelError::InvalidDate { .. })
        ));
        assert!(normalizer
            .normalize(&CivilDateTime::date(2023, 2, 1).at(24, 0), "seoul")
            .is_err());
        assert!(normalizer
            .normalize(&CivilDateTime::date(2023, 2, 1).at(12, 60), "seoul")
            .is_err());
    }

    #[test]
    fn test_unknown_location_uses_default() {
        let normalizer = TimeNormalizer::new("utc", true);
        let instant = normalizer
            .normalize(&CivilDateTime::date(2000, 1, 1).at(0, 0), "nowhere")
            .unwrap();
        assert_eq!(instant.zone, ZoneHistory::Fixed { offset_minutes: 0 });
    }

    #[test]
    fn test_utc_shift_past_calendar_end_is_an_error() {
        let normalizer = TimeNormalizer::default();
        let instant = normalizer
            .normalize(&CivilDateTime::date(262_142, 12, 31).at(23, 59), "utc-05:00")
            .unwrap();
        assert!(matches!(
            instant.to_utc(),
            Err(KernelError::InvalidDate { year: 262_142, .. })
        ));
    }
}
